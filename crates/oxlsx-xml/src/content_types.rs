//! `[Content_Types].xml` schema structures.

use serde::{Deserialize, Serialize};

use crate::namespaces;

/// `[Content_Types].xml` root element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename = "Types")]
pub struct ContentTypes {
    #[serde(rename = "@xmlns")]
    pub xmlns: String,

    #[serde(rename = "Default", default)]
    pub defaults: Vec<ContentTypeDefault>,

    #[serde(rename = "Override", default)]
    pub overrides: Vec<ContentTypeOverride>,
}

/// Extension-based default content type mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentTypeDefault {
    #[serde(rename = "@Extension")]
    pub extension: String,

    #[serde(rename = "@ContentType")]
    pub content_type: String,
}

/// Path-specific content type override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentTypeOverride {
    #[serde(rename = "@PartName")]
    pub part_name: String,

    #[serde(rename = "@ContentType")]
    pub content_type: String,
}

impl ContentTypes {
    /// A fresh content-types table with just the two closed extension defaults;
    /// overrides are added as parts are emitted.
    pub fn new() -> Self {
        Self {
            xmlns: namespaces::CONTENT_TYPES.to_string(),
            defaults: vec![
                ContentTypeDefault {
                    extension: "rels".to_string(),
                    content_type: mime_types::RELS.to_string(),
                },
                ContentTypeDefault {
                    extension: "xml".to_string(),
                    content_type: mime_types::XML.to_string(),
                },
            ],
            overrides: Vec::new(),
        }
    }

    /// Adds or replaces an override for `part_name`, or is a no-op if a
    /// default extension already covers it via `add_default_if_missing`.
    pub fn add_override(&mut self, part_name: impl Into<String>, content_type: impl Into<String>) {
        let part_name = part_name.into();
        if let Some(existing) = self.overrides.iter_mut().find(|o| o.part_name == part_name) {
            existing.content_type = content_type.into();
        } else {
            self.overrides.push(ContentTypeOverride {
                part_name,
                content_type: content_type.into(),
            });
        }
    }

    /// Adds an extension default (e.g. `vml`) if not already present.
    pub fn add_default_if_missing(&mut self, extension: &str, content_type: impl Into<String>) {
        if !self.defaults.iter().any(|d| d.extension == extension) {
            self.defaults.push(ContentTypeDefault {
                extension: extension.to_string(),
                content_type: content_type.into(),
            });
        }
    }
}

impl Default for ContentTypes {
    fn default() -> Self {
        Self::new()
    }
}

/// Standard content type MIME string constants, scoped to the closed part
/// set this engine reads and writes.
pub mod mime_types {
    pub const RELS: &str = "application/vnd.openxmlformats-package.relationships+xml";
    pub const XML: &str = "application/xml";

    pub const WORKBOOK: &str =
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml";
    pub const WORKSHEET: &str =
        "application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml";
    pub const SHARED_STRINGS: &str =
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml";
    pub const STYLES: &str =
        "application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml";
    pub const THEME: &str = "application/vnd.openxmlformats-officedocument.theme+xml";
    pub const COMMENTS: &str =
        "application/vnd.openxmlformats-officedocument.spreadsheetml.comments+xml";
    pub const VML_DRAWING: &str = "application/vnd.openxmlformats-officedocument.vmlDrawing";
    pub const DRAWING: &str = "application/vnd.openxmlformats-officedocument.drawing+xml";
    pub const CHART: &str = "application/vnd.openxmlformats-officedocument.drawingml.chart+xml";
    pub const TABLE: &str =
        "application/vnd.openxmlformats-officedocument.spreadsheetml.table+xml";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_table_has_two_defaults_and_no_overrides() {
        let ct = ContentTypes::new();
        assert_eq!(ct.xmlns, namespaces::CONTENT_TYPES);
        assert_eq!(ct.defaults.len(), 2);
        assert!(ct.overrides.is_empty());
    }

    #[test]
    fn add_override_replaces_existing_entry() {
        let mut ct = ContentTypes::new();
        ct.add_override("/xl/workbook.xml", mime_types::WORKBOOK);
        ct.add_override("/xl/workbook.xml", mime_types::WORKSHEET);
        assert_eq!(ct.overrides.len(), 1);
        assert_eq!(ct.overrides[0].content_type, mime_types::WORKSHEET);
    }

    #[test]
    fn add_default_if_missing_is_idempotent() {
        let mut ct = ContentTypes::new();
        ct.add_default_if_missing("vml", mime_types::VML_DRAWING);
        ct.add_default_if_missing("vml", mime_types::VML_DRAWING);
        assert_eq!(ct.defaults.iter().filter(|d| d.extension == "vml").count(), 1);
    }

    #[test]
    fn roundtrip_through_quick_xml() {
        let mut ct = ContentTypes::new();
        ct.add_override("/xl/workbook.xml", mime_types::WORKBOOK);
        let xml = quick_xml::se::to_string(&ct).unwrap();
        let parsed: ContentTypes = quick_xml::de::from_str(&xml).unwrap();
        assert_eq!(ct, parsed);
    }

    #[test]
    fn parses_real_excel_content_types() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
  <Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
</Types>"#;
        let parsed: ContentTypes = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(parsed.defaults.len(), 2);
        assert_eq!(parsed.overrides.len(), 2);
    }
}
