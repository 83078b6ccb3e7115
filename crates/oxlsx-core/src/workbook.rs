//! The top-level document model: opens a package, resolves every
//! cross-part relationship, and assembles a read-only [`Workbook`] whose
//! sheets, shared strings, and styles are all loaded up front.

use std::path::Path;

use oxlsx_xml::relationships::rel_types;
use oxlsx_xml::shared_strings::Sst;
use oxlsx_xml::styles::StyleSheet;
use oxlsx_xml::table::TableXml;
use oxlsx_xml::workbook::WorkbookXml;
use oxlsx_xml::worksheet::WorksheetXml;

use crate::chart::charts_from_drawing_rels;
use crate::comment::all_comments;
use crate::defined_names::DefinedNameInfo;
use crate::error::{Error, Result};
use crate::package::{resolve_relationship_target, OpcPackage};
use crate::pivot::{pivot_refs, PivotRef};
use crate::protection::WorkbookProtection;
use crate::sheet::{Sheet, WorksheetData};
use crate::sst::SharedStrings;
use crate::style::StylesTable;
use crate::table::TableInfo;

/// Visibility state of a sheet entry, per `<sheet state="...">`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetState {
    Visible,
    Hidden,
    VeryHidden,
}

impl SheetState {
    fn from_xml(state: Option<&str>) -> Self {
        match state {
            Some("hidden") => SheetState::Hidden,
            Some("veryHidden") => SheetState::VeryHidden,
            _ => SheetState::Visible,
        }
    }
}

/// One entry in the workbook's sheet list, in XML declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetEntryInfo {
    pub name: String,
    pub sheet_id: u32,
    pub relationship_id: String,
    pub state: SheetState,
}

/// Workbook-wide metadata: the sheet list, defined names, protection, and
/// pivot cache references.
#[derive(Debug, Clone)]
pub struct WorkbookInfo {
    pub sheets: Vec<SheetEntryInfo>,
    pub defined_names: Vec<DefinedNameInfo>,
    pub protection: Option<WorkbookProtection>,
    pub pivot_tables: Vec<PivotRef>,
}

/// A fully-loaded, read-only spreadsheet document. Every part is parsed at
/// [`Workbook::open`]; nothing here mutates afterward.
pub struct Workbook {
    info: WorkbookInfo,
    sheet_data: Vec<WorksheetData>,
    shared_strings: SharedStrings,
    styles: StylesTable,
    tables: Vec<TableInfo>,
}

impl Workbook {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::open_bytes(&bytes)
    }

    pub fn open_bytes(data: &[u8]) -> Result<Self> {
        let pkg = OpcPackage::open_bytes(data)?;

        let main_rel = pkg
            .find_main_document()
            .ok_or_else(|| Error::MissingPart("xl/workbook.xml".into()))?;
        let workbook_part = resolve_relationship_target("", &main_rel.target);
        let wb_xml: WorkbookXml = pkg.read_xml_part(&workbook_part)?;
        let wb_rels = pkg.relationships_for(&workbook_part)?;

        let shared_strings = match wb_rels.by_type(rel_types::SHARED_STRINGS).next() {
            Some(rel) => {
                let path = resolve_relationship_target(&workbook_part, &rel.target);
                let sst: Sst = pkg.read_xml_part(&path)?;
                SharedStrings::from_xml(&sst)
            }
            None => SharedStrings::new(),
        };

        let styles = match wb_rels.by_type(rel_types::STYLES).next() {
            Some(rel) => {
                let path = resolve_relationship_target(&workbook_part, &rel.target);
                let sheet: StyleSheet = pkg.read_xml_part(&path)?;
                StylesTable::from_xml(sheet)
            }
            None => StylesTable::new(),
        };

        let mut sheet_data = Vec::with_capacity(wb_xml.sheets.sheets.len());
        let mut tables = Vec::new();

        for entry in &wb_xml.sheets.sheets {
            let rel = wb_rels
                .by_id(&entry.r_id)
                .ok_or_else(|| Error::MissingPart(format!("relationship {}", entry.r_id).into()))?;
            let sheet_path = resolve_relationship_target(&workbook_part, &rel.target);
            let ws_xml: WorksheetXml = pkg.read_xml_part(&sheet_path)?;
            let mut data = WorksheetData::from_xml(&ws_xml);

            let sheet_rels = pkg.relationships_for(&sheet_path)?;

            if let Some(r) = sheet_rels.by_type(rel_types::COMMENTS).next() {
                let path = resolve_relationship_target(&sheet_path, &r.target);
                let comments = pkg.read_xml_part(&path)?;
                data.comments = all_comments(&Some(comments));
            }

            if let Some(r) = sheet_rels.by_type(rel_types::DRAWING).next() {
                let drawing_path = resolve_relationship_target(&sheet_path, &r.target);
                let drawing_rels = pkg.relationships_for(&drawing_path)?;
                let drawing_dir = drawing_path.rsplit_once('/').map(|(dir, _)| dir).unwrap_or_default();
                data.charts = charts_from_drawing_rels(drawing_dir, &drawing_rels);
            }

            if let Some(table_parts) = &ws_xml.table_parts {
                for part in &table_parts.table_parts {
                    if let Some(r) = sheet_rels.by_id(&part.r_id) {
                        let table_path = resolve_relationship_target(&sheet_path, &r.target);
                        let table_xml: TableXml = pkg.read_xml_part(&table_path)?;
                        tables.push(TableInfo::from_xml(&table_xml));
                    }
                }
            }

            sheet_data.push(data);
        }

        let defined_names = crate::defined_names::all_defined_names(&wb_xml);

        let protection = wb_xml.workbook_protection.as_ref().map(WorkbookProtection::from_xml);
        let pivot_tables = pivot_refs(&wb_xml);

        let sheets = wb_xml
            .sheets
            .sheets
            .iter()
            .map(|e| SheetEntryInfo {
                name: e.name.clone(),
                sheet_id: e.sheet_id,
                relationship_id: e.r_id.clone(),
                state: SheetState::from_xml(e.state.as_deref()),
            })
            .collect();

        Ok(Self {
            info: WorkbookInfo { sheets, defined_names, protection, pivot_tables },
            sheet_data,
            shared_strings,
            styles,
            tables,
        })
    }

    pub fn info(&self) -> &WorkbookInfo {
        &self.info
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.info.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn tables(&self) -> &[TableInfo] {
        &self.tables
    }

    /// Look up a sheet by name and bind it to this workbook's shared
    /// strings and styles tables for resolved queries.
    pub fn sheet(&self, name: &str) -> Option<Sheet<'_>> {
        let index = self.info.sheets.iter().position(|s| s.name == name)?;
        Some(Sheet::new(&self.info.sheets[index].name, &self.sheet_data[index], &self.shared_strings, &self.styles))
    }

    /// All sheets in declaration order.
    pub fn sheets(&self) -> Vec<Sheet<'_>> {
        self.info
            .sheets
            .iter()
            .zip(self.sheet_data.iter())
            .map(|(entry, data)| Sheet::new(&entry.name, data, &self.shared_strings, &self.styles))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::PackageWriter;
    use oxlsx_xml::relationships::{Relationship, Relationships};
    use oxlsx_xml::shared_strings::Sst;
    use oxlsx_xml::styles::StyleSheet;
    use oxlsx_xml::workbook::WorkbookXml;
    use oxlsx_xml::worksheet::WorksheetXml;

    fn minimal_workbook_bytes() -> Vec<u8> {
        let mut writer = PackageWriter::new();
        writer.add_relationship(
            "",
            Relationship {
                id: "rId1".to_string(),
                rel_type: rel_types::OFFICE_DOCUMENT.to_string(),
                target: "xl/workbook.xml".to_string(),
                target_mode: None,
            },
        );

        let wb_xml = WorkbookXml::default();
        writer.add_xml_part("xl/workbook.xml", &wb_xml, oxlsx_xml::content_types::mime_types::WORKBOOK).unwrap();

        writer.add_relationship(
            "xl/workbook.xml",
            Relationship {
                id: "rId1".to_string(),
                rel_type: rel_types::WORKSHEET.to_string(),
                target: "worksheets/sheet1.xml".to_string(),
                target_mode: None,
            },
        );
        writer.add_relationship(
            "xl/workbook.xml",
            Relationship {
                id: "rId2".to_string(),
                rel_type: rel_types::STYLES.to_string(),
                target: "styles.xml".to_string(),
                target_mode: None,
            },
        );
        writer.add_relationship(
            "xl/workbook.xml",
            Relationship {
                id: "rId3".to_string(),
                rel_type: rel_types::SHARED_STRINGS.to_string(),
                target: "sharedStrings.xml".to_string(),
                target_mode: None,
            },
        );

        writer
            .add_xml_part("xl/worksheets/sheet1.xml", &WorksheetXml::default(), oxlsx_xml::content_types::mime_types::WORKSHEET)
            .unwrap();
        writer.add_xml_part("xl/styles.xml", &StyleSheet::default(), oxlsx_xml::content_types::mime_types::STYLES).unwrap();
        writer
            .add_xml_part("xl/sharedStrings.xml", &Sst::default(), oxlsx_xml::content_types::mime_types::SHARED_STRINGS)
            .unwrap();

        writer.finalize().unwrap()
    }

    #[test]
    fn open_bytes_loads_default_single_sheet() {
        let bytes = minimal_workbook_bytes();
        let wb = Workbook::open_bytes(&bytes).unwrap();
        assert_eq!(wb.sheet_names(), vec!["Sheet1"]);
        assert!(wb.sheet("Sheet1").is_some());
        assert!(wb.sheet("Missing").is_none());
    }

    #[test]
    fn missing_main_document_errors() {
        let writer = PackageWriter::new();
        let bytes = writer.finalize().unwrap();
        let err = Workbook::open_bytes(&bytes).unwrap_err();
        assert!(matches!(err, Error::MissingPart(_)));
    }
}
