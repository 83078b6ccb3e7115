//! Hyperlink model: external (URL, via relationship) and internal
//! (same-workbook location) links bound to a cell range.

use oxlsx_xml::worksheet::Hyperlink as HyperlinkXml;

#[derive(Debug, Clone, PartialEq)]
pub enum HyperlinkTarget {
    /// Points at an external URL via a worksheet relationship ID.
    External { r_id: String },
    /// Points at a location within the same workbook (e.g. `Sheet2!A1`).
    Internal { location: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Hyperlink {
    pub reference: String,
    pub target: HyperlinkTarget,
    pub display: Option<String>,
    pub tooltip: Option<String>,
}

impl Hyperlink {
    pub fn external(reference: impl Into<String>, r_id: impl Into<String>) -> Self {
        Self { reference: reference.into(), target: HyperlinkTarget::External { r_id: r_id.into() }, display: None, tooltip: None }
    }

    pub fn internal(reference: impl Into<String>, location: impl Into<String>) -> Self {
        Self { reference: reference.into(), target: HyperlinkTarget::Internal { location: location.into() }, display: None, tooltip: None }
    }

    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    pub fn from_xml(xml: &HyperlinkXml) -> Self {
        let target = match (&xml.r_id, &xml.location) {
            (Some(r_id), _) => HyperlinkTarget::External { r_id: r_id.clone() },
            (None, Some(location)) => HyperlinkTarget::Internal { location: location.clone() },
            (None, None) => HyperlinkTarget::Internal { location: String::new() },
        };
        Self { reference: xml.reference.clone(), target, display: xml.display.clone(), tooltip: xml.tooltip.clone() }
    }

    pub fn to_xml(&self) -> HyperlinkXml {
        let (r_id, location) = match &self.target {
            HyperlinkTarget::External { r_id } => (Some(r_id.clone()), None),
            HyperlinkTarget::Internal { location } => (None, Some(location.clone())),
        };
        HyperlinkXml { reference: self.reference.clone(), r_id, location, display: self.display.clone(), tooltip: self.tooltip.clone() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn external_roundtrips_via_relationship_id() {
        let link = Hyperlink::external("A1", "rId3").with_tooltip("Visit");
        let xml = link.to_xml();
        assert_eq!(xml.r_id.as_deref(), Some("rId3"));
        assert!(xml.location.is_none());
        let back = Hyperlink::from_xml(&xml);
        assert_eq!(back, link);
    }

    #[test]
    fn internal_roundtrips_via_location() {
        let link = Hyperlink::internal("B2", "Sheet2!A1");
        let xml = link.to_xml();
        assert!(xml.r_id.is_none());
        assert_eq!(xml.location.as_deref(), Some("Sheet2!A1"));
        let back = Hyperlink::from_xml(&xml);
        assert_eq!(back, link);
    }
}
