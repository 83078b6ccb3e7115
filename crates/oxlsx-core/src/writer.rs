//! The writer stack: an ordered list of [`SheetBuilder`]s plus interned
//! shared-strings/styles tables, assembled into a fresh archive on
//! [`WorkbookWriter::build_data`]/[`WorkbookWriter::save`].
//!
//! Nothing here edits an opened [`crate::workbook::Workbook`] in place — a
//! writer always starts from scratch and produces an independent archive.

use std::path::Path;

use oxlsx_xml::comments::Comments;
use oxlsx_xml::content_types::mime_types;
use oxlsx_xml::relationships::{rel_types, Relationship, Relationships};
use oxlsx_xml::workbook::{SheetEntry, Sheets, WorkbookXml};
use oxlsx_xml::worksheet::{
    Cell as CellXml, CellFormula, Col as ColXml, Cols, DataValidations, Hyperlinks, InlineString, LegacyDrawingRef, MergeCell,
    MergeCells, Row as RowXml, WorksheetXml,
};

use crate::comment::{add_comment, Comment};
use crate::defined_names::DefinedNameScope;
use crate::error::Result;
use crate::hyperlink::Hyperlink;
use crate::package::PackageWriter;
use crate::pivot::PivotRef;
use crate::protection::{SheetProtection, SheetProtectionOptions, WorkbookProtection};
use crate::sst::SharedStrings;
use crate::style::{Style, StylesTable};
use crate::utils::cell_ref::CellReference;
use crate::validation::DataValidation;
use crate::vml::build_vml_drawing;

/// Accumulates one worksheet's cells, formatting, and annotations until the
/// owning [`WorkbookWriter`] assembles the final archive.
pub struct SheetBuilder {
    name: String,
    xml: WorksheetXml,
    comments: Option<Comments>,
}

impl SheetBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), xml: WorksheetXml::default(), comments: None }
    }

    fn ensure_row(&mut self, row: u32) -> usize {
        match self.xml.sheet_data.rows.binary_search_by_key(&row, |r| r.r) {
            Ok(idx) => idx,
            Err(idx) => {
                self.xml.sheet_data.rows.insert(
                    idx,
                    RowXml { r: row, spans: None, s: None, ht: None, hidden: None, custom_height: None, cells: Vec::new() },
                );
                idx
            }
        }
    }

    fn cell_mut(&mut self, reference: &str) -> Result<&mut CellXml> {
        let coords = CellReference::parse(reference)?;
        let row_idx = self.ensure_row(coords.row);
        let row = &mut self.xml.sheet_data.rows[row_idx];
        let cell_col = |c: &CellXml| CellReference::parse(&c.r).map(|r| r.col).unwrap_or(u32::MAX);
        let cell_idx = match row.cells.binary_search_by_key(&coords.col, cell_col) {
            Ok(idx) => idx,
            Err(idx) => {
                row.cells.insert(idx, CellXml { r: reference.to_string(), s: None, t: None, v: None, f: None, is: None });
                idx
            }
        };
        Ok(&mut row.cells[cell_idx])
    }

    pub fn write_text(&mut self, to: &str, sst: &mut SharedStrings, text: &str) -> Result<()> {
        let idx = sst.add_text(text);
        let cell = self.cell_mut(to)?;
        cell.t = Some(oxlsx_xml::worksheet::cell_types::SHARED_STRING.to_string());
        cell.v = Some(idx.to_string());
        cell.f = None;
        cell.is = None;
        Ok(())
    }

    pub fn write_inline_string(&mut self, to: &str, text: &str) -> Result<()> {
        let cell = self.cell_mut(to)?;
        cell.t = Some(oxlsx_xml::worksheet::cell_types::INLINE_STRING.to_string());
        cell.v = None;
        cell.f = None;
        cell.is = Some(InlineString { t: Some(text.to_string()) });
        Ok(())
    }

    pub fn write_number(&mut self, to: &str, value: f64) -> Result<()> {
        let cell = self.cell_mut(to)?;
        cell.t = None;
        cell.v = Some(format_number(value));
        cell.f = None;
        cell.is = None;
        Ok(())
    }

    pub fn write_boolean(&mut self, to: &str, value: bool) -> Result<()> {
        let cell = self.cell_mut(to)?;
        cell.t = Some(oxlsx_xml::worksheet::cell_types::BOOLEAN.to_string());
        cell.v = Some(if value { "1".to_string() } else { "0".to_string() });
        cell.f = None;
        cell.is = None;
        Ok(())
    }

    pub fn write_formula(&mut self, to: &str, formula: &str, cached_value: Option<f64>) -> Result<()> {
        let cell = self.cell_mut(to)?;
        cell.t = None;
        cell.f = Some(CellFormula { t: None, value: Some(formula.to_string()) });
        cell.v = cached_value.map(format_number);
        cell.is = None;
        Ok(())
    }

    pub fn set_style(&mut self, at: &str, style_index: u32) -> Result<()> {
        self.cell_mut(at)?.s = Some(style_index);
        Ok(())
    }

    pub fn add_comment(&mut self, at: &str, text: &str, author: &str) {
        add_comment(&mut self.comments, &Comment { cell: at.to_string(), author: author.to_string(), text: text.to_string() });
    }

    pub fn add_hyperlink_external(&mut self, at: &str, r_id: &str) {
        self.add_hyperlink(Hyperlink::external(at, r_id));
    }

    pub fn add_hyperlink_internal(&mut self, at: &str, location: &str) {
        self.add_hyperlink(Hyperlink::internal(at, location));
    }

    fn add_hyperlink(&mut self, link: Hyperlink) {
        let container = self.xml.hyperlinks.get_or_insert_with(|| Hyperlinks { hyperlinks: Vec::new() });
        container.hyperlinks.push(link.to_xml());
    }

    pub fn merge_cells(&mut self, range: &str) {
        let container = self.xml.merge_cells.get_or_insert_with(|| MergeCells { count: Some(0), merge_cells: Vec::new() });
        container.merge_cells.push(MergeCell { reference: range.to_string() });
        container.count = Some(container.merge_cells.len() as u32);
    }

    pub fn add_data_validation(&mut self, dv: &DataValidation) {
        let container = self.xml.data_validations.get_or_insert_with(|| DataValidations { count: None, validations: Vec::new() });
        container.validations.push(dv.to_xml());
    }

    pub fn protect_sheet(&mut self, password: Option<String>, options: SheetProtectionOptions) {
        let protection = SheetProtection::new(password, options);
        self.xml.sheet_protection = Some(protection.to_xml());
    }

    pub fn set_row_height(&mut self, row: u32, height: f64, hidden: bool) {
        let idx = self.ensure_row(row);
        let r = &mut self.xml.sheet_data.rows[idx];
        r.ht = Some(height);
        r.custom_height = Some(true);
        r.hidden = hidden.then_some(true);
    }

    pub fn set_column_width(&mut self, min: u32, max: u32, width: f64, hidden: bool) {
        let cols = self.xml.cols.get_or_insert_with(|| Cols { cols: Vec::new() });
        cols.cols.push(ColXml { min, max, width: Some(width), style: None, hidden: hidden.then_some(true), custom_width: Some(true) });
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() { format!("{}", value as i64) } else { value.to_string() }
}

/// Assembles a fresh workbook archive: an ordered list of sheet builders,
/// interned shared strings/styles, defined names, protection, and pivot
/// cache references.
pub struct WorkbookWriter {
    sheets: Vec<SheetBuilder>,
    pub shared_strings: SharedStrings,
    pub styles: StylesTable,
    workbook_xml: WorkbookXml,
}

impl WorkbookWriter {
    pub fn new() -> Self {
        let workbook_xml = WorkbookXml { sheets: Sheets { sheets: Vec::new() }, ..WorkbookXml::default() };
        Self { sheets: Vec::new(), shared_strings: SharedStrings::new(), styles: StylesTable::new(), workbook_xml }
    }

    pub fn add_sheet(&mut self, name: impl Into<String>) -> usize {
        self.sheets.push(SheetBuilder::new(name));
        self.sheets.len() - 1
    }

    pub fn modify_sheet(&mut self, at: usize, mutator: impl FnOnce(&mut SheetBuilder, &mut SharedStrings, &mut StylesTable)) {
        let (sheets, shared_strings, styles) = (&mut self.sheets, &mut self.shared_strings, &mut self.styles);
        if let Some(sheet) = sheets.get_mut(at) {
            mutator(sheet, shared_strings, styles);
        }
    }

    pub fn add_style(&mut self, style: &Style) -> Result<u32> {
        self.styles.add_style(style)
    }

    pub fn set_defined_name(&mut self, name: &str, refers_to: &str, scope: DefinedNameScope) -> Result<()> {
        crate::defined_names::set_defined_name(&mut self.workbook_xml, name, refers_to, scope)
    }

    pub fn protect_workbook(&mut self, protection: &WorkbookProtection) {
        self.workbook_xml.workbook_protection = Some(protection.to_xml());
    }

    pub fn add_pivot_ref(&mut self, pivot: PivotRef) {
        let caches = self.workbook_xml.pivot_caches.get_or_insert_with(|| oxlsx_xml::workbook::PivotCaches { caches: Vec::new() });
        caches.caches.push(oxlsx_xml::workbook::PivotCacheEntry { cache_id: pivot.cache_id, r_id: pivot.relationship_id });
    }

    /// Assemble and serialize the full archive into an in-memory buffer.
    pub fn build_data(mut self) -> Result<Vec<u8>> {
        if self.sheets.is_empty() {
            self.sheets.push(SheetBuilder::new("Sheet1"));
        }

        let mut writer = PackageWriter::new();
        let mut wb_rels = Relationships::new();
        let mut sheet_entries = Vec::with_capacity(self.sheets.len());

        for (i, sheet) in self.sheets.iter().enumerate() {
            let sheet_num = i + 1;
            let sheet_path = format!("xl/worksheets/sheet{sheet_num}.xml");
            let r_id = format!("rId{}", i + 1);

            let mut sheet_xml = sheet.xml.clone();

            if let Some(comments) = &sheet.comments {
                let comments_path = format!("xl/comments{sheet_num}.xml");
                writer.add_xml_part(comments_path.clone(), comments, mime_types::COMMENTS)?;

                let cells: Vec<&str> = comments.comment_list.comments.iter().map(|c| c.r#ref.as_str()).collect();
                let vml = build_vml_drawing(&cells);
                let vml_path = format!("xl/drawings/vmlDrawing{sheet_num}.vml");
                writer.add_part(vml_path.clone(), vml.into_bytes(), mime_types::VML_DRAWING);
                writer.add_default_content_type("vml", mime_types::VML_DRAWING);

                let mut sheet_rels = Relationships::new();
                sheet_rels.relationships.push(Relationship {
                    id: "rId1".to_string(),
                    rel_type: rel_types::COMMENTS.to_string(),
                    target: format!("../comments{sheet_num}.xml"),
                    target_mode: None,
                });
                sheet_rels.relationships.push(Relationship {
                    id: "rId2".to_string(),
                    rel_type: rel_types::VML_DRAWING.to_string(),
                    target: format!("../drawings/vmlDrawing{sheet_num}.vml"),
                    target_mode: None,
                });
                for rel in &sheet_rels.relationships {
                    writer.add_relationship(&sheet_path, rel.clone());
                }
                sheet_xml.legacy_drawing = Some(LegacyDrawingRef { r_id: "rId2".to_string() });
            }

            writer.add_xml_part(sheet_path.clone(), &sheet_xml, mime_types::WORKSHEET)?;

            wb_rels.relationships.push(Relationship {
                id: r_id.clone(),
                rel_type: rel_types::WORKSHEET.to_string(),
                target: format!("worksheets/sheet{sheet_num}.xml"),
                target_mode: None,
            });
            sheet_entries.push(SheetEntry { name: sheet.name.clone(), sheet_id: sheet_num as u32, state: None, r_id });
        }

        let styles_r_id = format!("rId{}", sheet_entries.len() + 1);
        writer.add_xml_part("xl/styles.xml", &self.styles.to_xml(), mime_types::STYLES)?;
        wb_rels.relationships.push(Relationship {
            id: styles_r_id,
            rel_type: rel_types::STYLES.to_string(),
            target: "styles.xml".to_string(),
            target_mode: None,
        });

        if !self.shared_strings.is_empty() {
            let sst_r_id = format!("rId{}", sheet_entries.len() + 2);
            writer.add_xml_part("xl/sharedStrings.xml", &self.shared_strings.to_xml(), mime_types::SHARED_STRINGS)?;
            wb_rels.relationships.push(Relationship {
                id: sst_r_id,
                rel_type: rel_types::SHARED_STRINGS.to_string(),
                target: "sharedStrings.xml".to_string(),
                target_mode: None,
            });
        }

        let wb_xml = WorkbookXml { sheets: Sheets { sheets: sheet_entries }, ..self.workbook_xml };

        writer.add_xml_part("xl/workbook.xml", &wb_xml, mime_types::WORKBOOK)?;
        for rel in wb_rels.relationships {
            writer.add_relationship("xl/workbook.xml", rel);
        }
        writer.add_relationship(
            "",
            Relationship {
                id: "rId1".to_string(),
                rel_type: rel_types::OFFICE_DOCUMENT.to_string(),
                target: "xl/workbook.xml".to_string(),
                target_mode: None,
            },
        );

        writer.finalize()
    }

    pub fn save(self, to: impl AsRef<Path>) -> Result<()> {
        let data = self.build_data()?;
        std::fs::write(to, data)?;
        Ok(())
    }
}

impl Default for WorkbookWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_default_sheet_roundtrips() {
        let writer = WorkbookWriter::new();
        let data = writer.build_data().unwrap();
        let wb = crate::workbook::Workbook::open_bytes(&data).unwrap();
        assert_eq!(wb.sheet_names(), vec!["Sheet1"]);
    }

    #[test]
    fn written_text_and_number_resolve_back() {
        let mut writer = WorkbookWriter::new();
        let idx = writer.add_sheet("Data");
        writer.modify_sheet(idx, |sheet, sst, _styles| {
            sheet.write_text("A1", sst, "hello").unwrap();
            sheet.write_number("B1", 42.0).unwrap();
        });
        let data = writer.build_data().unwrap();
        let wb = crate::workbook::Workbook::open_bytes(&data).unwrap();
        let sheet = wb.sheet("Data").unwrap();
        assert_eq!(sheet.cell(CellReference { col: 1, row: 1 }), Some(crate::cell::CellValue::Text("hello".to_string())));
        assert_eq!(sheet.cell(CellReference { col: 2, row: 1 }), Some(crate::cell::CellValue::Number(42.0)));
    }

    #[test]
    fn comment_emits_vml_and_legacy_drawing_link() {
        let mut writer = WorkbookWriter::new();
        let idx = writer.add_sheet("Sheet1");
        writer.modify_sheet(idx, |sheet, _, _| {
            sheet.add_comment("B2", "a note", "Author");
        });
        let data = writer.build_data().unwrap();
        let pkg = crate::package::OpcPackage::open_bytes(&data).unwrap();
        assert!(pkg.part_exists("xl/comments1.xml"));
        assert!(pkg.part_exists("xl/drawings/vmlDrawing1.vml"));
    }
}
