//! Column-level formatting properties (width, visibility).

use oxlsx_xml::worksheet::Col as ColXml;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnProps {
    pub min: u32,
    pub max: u32,
    pub width: Option<f64>,
    pub hidden: bool,
    pub style_index: Option<u32>,
}

impl ColumnProps {
    pub fn new(min: u32, max: u32, width: f64) -> Self {
        Self { min, max, width: Some(width), hidden: false, style_index: None }
    }

    pub fn from_xml(xml: &ColXml) -> Self {
        Self { min: xml.min, max: xml.max, width: xml.width, hidden: xml.hidden.unwrap_or(false), style_index: xml.style }
    }

    pub fn to_xml(self) -> ColXml {
        ColXml {
            min: self.min,
            max: self.max,
            width: self.width,
            style: self.style_index,
            hidden: self.hidden.then_some(true),
            custom_width: self.width.is_some().then_some(true),
        }
    }

    /// Whether this column range covers a given 1-based column number.
    pub fn covers(&self, col: u32) -> bool {
        (self.min..=self.max).contains(&col)
    }
}
