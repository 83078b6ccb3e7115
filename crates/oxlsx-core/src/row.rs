//! Row-level formatting properties (height, visibility).

use oxlsx_xml::worksheet::Row as RowXml;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RowProps {
    pub height: Option<f64>,
    pub hidden: bool,
    pub style_index: Option<u32>,
}

impl RowProps {
    pub fn from_xml(xml: &RowXml) -> Self {
        Self { height: xml.ht, hidden: xml.hidden.unwrap_or(false), style_index: xml.s }
    }

    /// Apply these properties onto an existing row element, leaving its
    /// cells untouched.
    pub fn apply(self, xml: &mut RowXml) {
        xml.ht = self.height;
        xml.custom_height = self.height.is_some().then_some(true);
        xml.hidden = self.hidden.then_some(true);
        xml.s = self.style_index;
    }
}
