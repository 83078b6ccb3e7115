//! Workbook XML schema structures (`xl/workbook.xml`).

use serde::{Deserialize, Serialize};

use crate::namespaces;

/// Workbook root element (`xl/workbook.xml`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename = "workbook")]
pub struct WorkbookXml {
    #[serde(rename = "@xmlns")]
    pub xmlns: String,

    #[serde(rename = "@xmlns:r")]
    pub xmlns_r: String,

    #[serde(rename = "workbookPr", skip_serializing_if = "Option::is_none")]
    pub workbook_pr: Option<WorkbookPr>,

    #[serde(rename = "workbookProtection", skip_serializing_if = "Option::is_none")]
    pub workbook_protection: Option<WorkbookProtection>,

    #[serde(rename = "bookViews", skip_serializing_if = "Option::is_none")]
    pub book_views: Option<BookViews>,

    #[serde(rename = "sheets")]
    pub sheets: Sheets,

    #[serde(rename = "definedNames", skip_serializing_if = "Option::is_none")]
    pub defined_names: Option<DefinedNames>,

    #[serde(rename = "calcPr", skip_serializing_if = "Option::is_none")]
    pub calc_pr: Option<CalcPr>,

    #[serde(rename = "pivotCaches", skip_serializing_if = "Option::is_none")]
    pub pivot_caches: Option<PivotCaches>,
}

/// Workbook properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkbookPr {
    #[serde(rename = "@date1904", skip_serializing_if = "Option::is_none")]
    pub date1904: Option<bool>,

    #[serde(
        rename = "@defaultThemeVersion",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_theme_version: Option<u32>,
}

/// `<workbookProtection>` — workbook-level structure/window locks.
///
/// Attribute booleans use the same "1 means blocked" inversion as
/// sheet protection; `oxlsx_core::protection` owns the translation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkbookProtection {
    #[serde(rename = "@lockStructure", skip_serializing_if = "Option::is_none")]
    pub lock_structure: Option<bool>,

    #[serde(rename = "@lockWindows", skip_serializing_if = "Option::is_none")]
    pub lock_windows: Option<bool>,

    #[serde(rename = "@workbookPassword", skip_serializing_if = "Option::is_none")]
    pub workbook_password: Option<String>,
}

/// Book views container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookViews {
    #[serde(rename = "workbookView")]
    pub workbook_views: Vec<WorkbookView>,
}

/// Individual workbook view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkbookView {
    #[serde(rename = "@activeTab", skip_serializing_if = "Option::is_none")]
    pub active_tab: Option<u32>,
}

/// Sheets container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sheets {
    #[serde(rename = "sheet")]
    pub sheets: Vec<SheetEntry>,
}

/// Individual sheet entry in the workbook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetEntry {
    #[serde(rename = "@name")]
    pub name: String,

    #[serde(rename = "@sheetId")]
    pub sheet_id: u32,

    #[serde(rename = "@state", skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(rename = "@r:id", alias = "@id")]
    pub r_id: String,
}

/// Defined names container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefinedNames {
    #[serde(rename = "definedName", default)]
    pub defined_names: Vec<DefinedName>,
}

/// Individual defined name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefinedName {
    #[serde(rename = "@name")]
    pub name: String,

    #[serde(rename = "@localSheetId", skip_serializing_if = "Option::is_none")]
    pub local_sheet_id: Option<u32>,

    #[serde(rename = "$text")]
    pub value: String,
}

/// Calculation properties. Carried through for round-trip fidelity; formula
/// evaluation itself is out of scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalcPr {
    #[serde(rename = "@calcId", skip_serializing_if = "Option::is_none")]
    pub calc_id: Option<u32>,

    #[serde(rename = "@fullCalcOnLoad", skip_serializing_if = "Option::is_none")]
    pub full_calc_on_load: Option<bool>,
}

/// Pivot cache discovery (no cache-record building).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotCaches {
    #[serde(rename = "pivotCache", default)]
    pub caches: Vec<PivotCacheEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotCacheEntry {
    #[serde(rename = "@cacheId")]
    pub cache_id: u32,

    #[serde(rename = "@r:id")]
    pub r_id: String,
}

impl Default for WorkbookXml {
    fn default() -> Self {
        Self {
            xmlns: namespaces::SPREADSHEET_ML.to_string(),
            xmlns_r: namespaces::RELATIONSHIPS.to_string(),
            workbook_pr: None,
            workbook_protection: None,
            book_views: None,
            sheets: Sheets {
                sheets: vec![SheetEntry {
                    name: "Sheet1".to_string(),
                    sheet_id: 1,
                    state: None,
                    r_id: "rId1".to_string(),
                }],
            },
            defined_names: None,
            calc_pr: None,
            pivot_caches: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_single_sheet() {
        let wb = WorkbookXml::default();
        assert_eq!(wb.sheets.sheets.len(), 1);
        assert_eq!(wb.sheets.sheets[0].name, "Sheet1");
        assert!(wb.workbook_protection.is_none());
    }

    #[test]
    fn roundtrip_through_quick_xml() {
        let wb = WorkbookXml::default();
        let xml = quick_xml::se::to_string(&wb).unwrap();
        let parsed: WorkbookXml = quick_xml::de::from_str(&xml).unwrap();
        assert_eq!(wb, parsed);
    }

    #[test]
    fn workbook_protection_roundtrips() {
        let mut wb = WorkbookXml::default();
        wb.workbook_protection = Some(WorkbookProtection {
            lock_structure: Some(true),
            lock_windows: None,
            workbook_password: Some("secret".to_string()),
        });
        let xml = quick_xml::se::to_string(&wb).unwrap();
        let parsed: WorkbookXml = quick_xml::de::from_str(&xml).unwrap();
        assert_eq!(
            parsed.workbook_protection.unwrap().workbook_password,
            Some("secret".to_string())
        );
    }

    #[test]
    fn optional_fields_not_serialized_when_absent() {
        let wb = WorkbookXml::default();
        let xml = quick_xml::se::to_string(&wb).unwrap();
        assert!(!xml.contains("workbookPr"));
        assert!(!xml.contains("bookViews"));
        assert!(!xml.contains("definedNames"));
        assert!(!xml.contains("calcPr"));
        assert!(!xml.contains("workbookProtection"));
    }

    #[test]
    fn parses_real_excel_workbook() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <sheets>
    <sheet name="Sheet1" sheetId="1" r:id="rId1"/>
    <sheet name="Sheet2" sheetId="2" r:id="rId2" state="hidden"/>
  </sheets>
  <definedNames>
    <definedName name="R">Sheet1!$A$1:$B$10</definedName>
  </definedNames>
</workbook>"#;
        let parsed: WorkbookXml = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(parsed.sheets.sheets.len(), 2);
        assert_eq!(parsed.sheets.sheets[1].state, Some("hidden".to_string()));
        let names = parsed.defined_names.unwrap();
        assert_eq!(names.defined_names[0].name, "R");
        assert_eq!(names.defined_names[0].value, "Sheet1!$A$1:$B$10");
    }
}
