//! Shared Strings XML schema structures (`xl/sharedStrings.xml`).

use serde::{Deserialize, Serialize};

use crate::namespaces;

/// Shared string table root element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename = "sst")]
pub struct Sst {
    #[serde(rename = "@xmlns")]
    pub xmlns: String,

    #[serde(rename = "@count", skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,

    #[serde(rename = "@uniqueCount", skip_serializing_if = "Option::is_none")]
    pub unique_count: Option<u32>,

    #[serde(rename = "si", default)]
    pub items: Vec<Si>,
}

/// A shared string item: either a plain `<t>` or a sequence of `<r>` runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Si {
    #[serde(rename = "t", skip_serializing_if = "Option::is_none")]
    pub t: Option<T>,

    #[serde(rename = "r", default)]
    pub r: Vec<R>,
}

/// Text element with optional space preservation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct T {
    #[serde(rename = "@xml:space", alias = "@space", skip_serializing_if = "Option::is_none")]
    pub xml_space: Option<String>,

    #[serde(rename = "$text", default)]
    pub value: String,
}

/// Rich text run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct R {
    #[serde(rename = "rPr", skip_serializing_if = "Option::is_none")]
    pub r_pr: Option<RPr>,

    #[serde(rename = "t")]
    pub t: T,
}

/// Run properties: formatting within a rich text run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RPr {
    #[serde(rename = "b", skip_serializing_if = "Option::is_none")]
    pub b: Option<BoolVal>,

    #[serde(rename = "i", skip_serializing_if = "Option::is_none")]
    pub i: Option<BoolVal>,

    #[serde(rename = "strike", skip_serializing_if = "Option::is_none")]
    pub strike: Option<BoolVal>,

    #[serde(rename = "u", skip_serializing_if = "Option::is_none")]
    pub u: Option<Underline>,

    #[serde(rename = "vertAlign", skip_serializing_if = "Option::is_none")]
    pub vert_align: Option<VertAlign>,

    #[serde(rename = "sz", skip_serializing_if = "Option::is_none")]
    pub sz: Option<FontSize>,

    #[serde(rename = "color", skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,

    #[serde(rename = "rFont", skip_serializing_if = "Option::is_none")]
    pub r_font: Option<FontName>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoolVal {
    #[serde(rename = "@val", skip_serializing_if = "Option::is_none")]
    pub val: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Underline {
    #[serde(rename = "@val", skip_serializing_if = "Option::is_none")]
    pub val: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertAlign {
    #[serde(rename = "@val")]
    pub val: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSize {
    #[serde(rename = "@val")]
    pub val: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Color {
    #[serde(rename = "@rgb", skip_serializing_if = "Option::is_none")]
    pub rgb: Option<String>,

    #[serde(rename = "@theme", skip_serializing_if = "Option::is_none")]
    pub theme: Option<u32>,

    #[serde(rename = "@tint", skip_serializing_if = "Option::is_none")]
    pub tint: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontName {
    #[serde(rename = "@val")]
    pub val: String,
}

impl Default for Sst {
    fn default() -> Self {
        Self {
            xmlns: namespaces::SPREADSHEET_ML.to_string(),
            count: Some(0),
            unique_count: Some(0),
            items: vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_empty() {
        let sst = Sst::default();
        assert_eq!(sst.count, Some(0));
        assert!(sst.items.is_empty());
    }

    #[test]
    fn roundtrip_plain_strings() {
        let sst = Sst {
            xmlns: namespaces::SPREADSHEET_ML.to_string(),
            count: Some(2),
            unique_count: Some(2),
            items: vec![
                Si { t: Some(T { xml_space: None, value: "Name".to_string() }), r: vec![] },
                Si { t: Some(T { xml_space: None, value: "Age".to_string() }), r: vec![] },
            ],
        };
        let xml = quick_xml::se::to_string(&sst).unwrap();
        let parsed: Sst = quick_xml::de::from_str(&xml).unwrap();
        assert_eq!(parsed.items[0].t.as_ref().unwrap().value, "Name");
        assert_eq!(parsed.items[1].t.as_ref().unwrap().value, "Age");
    }

    #[test]
    fn rich_text_entry_preserves_runs() {
        let sst = Sst {
            xmlns: namespaces::SPREADSHEET_ML.to_string(),
            count: Some(1),
            unique_count: Some(1),
            items: vec![Si {
                t: None,
                r: vec![
                    R {
                        r_pr: Some(RPr {
                            b: Some(BoolVal { val: None }),
                            color: Some(Color { rgb: Some("FF0000".to_string()), theme: None, tint: None }),
                            ..Default::default()
                        }),
                        t: T { xml_space: None, value: "Bold".to_string() },
                    },
                    R {
                        r_pr: None,
                        t: T { xml_space: Some("preserve".to_string()), value: " Normal".to_string() },
                    },
                ],
            }],
        };
        let xml = quick_xml::se::to_string(&sst).unwrap();
        let parsed: Sst = quick_xml::de::from_str(&xml).unwrap();
        assert!(parsed.items[0].t.is_none());
        assert_eq!(parsed.items[0].r.len(), 2);
        assert!(parsed.items[0].r[0].r_pr.as_ref().unwrap().b.is_some());
        assert_eq!(
            parsed.items[0].r[0].r_pr.as_ref().unwrap().color.as_ref().unwrap().rgb,
            Some("FF0000".to_string())
        );
    }

    #[test]
    fn parses_real_excel_shared_strings() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="4" uniqueCount="3">
  <si><t>Name</t></si>
  <si><t>Value</t></si>
  <si><t>Description</t></si>
</sst>"#;
        let parsed: Sst = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(parsed.items.len(), 3);
        assert_eq!(parsed.items[0].t.as_ref().unwrap().value, "Name");
    }

    #[test]
    fn parses_real_excel_rich_text_shared_strings() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="1" uniqueCount="1">
  <si>
    <r><rPr><b/><color rgb="FF0000"/></rPr><t>Bold</t></r>
    <r><t> Normal</t></r>
  </si>
</sst>"#;
        let parsed: Sst = quick_xml::de::from_str(xml).unwrap();
        let item = &parsed.items[0];
        assert!(item.t.is_none());
        assert_eq!(item.r.len(), 2);
        assert!(item.r[0].r_pr.as_ref().unwrap().b.is_some());
    }
}
