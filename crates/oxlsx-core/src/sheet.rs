//! The worksheet domain model and its read-only query surface.
//!
//! [`WorksheetData`] is the parsed, structural form of one `xl/worksheets/sheetN.xml`
//! part: cells keyed by [`CellReference`], plus merges, hyperlinks,
//! validations, protection, row/column formatting, and chart/comment
//! references. [`Sheet`] pairs it with the workbook's shared strings and
//! styles tables (referenced, never copied) to resolve cells down to
//! [`CellValue`] on demand.

use std::collections::BTreeMap;

use oxlsx_xml::worksheet::{cell_types, Cell as CellXml, WorksheetXml};

use crate::cell::{CellRaw, CellValue, RawType};
use crate::chart::ChartRef;
use crate::comment::Comment;
use crate::col::ColumnProps;
use crate::hyperlink::Hyperlink;
use crate::merge;
use crate::protection::SheetProtection;
use crate::row::RowProps;
use crate::sst::SharedStrings;
use crate::style::StylesTable;
use crate::utils::cell_ref::{self, CellReference};
use crate::validation::DataValidation;

/// The parsed structural contents of a worksheet, independent of the
/// workbook's shared strings/styles tables.
#[derive(Debug, Clone, Default)]
pub struct WorksheetData {
    pub cells: BTreeMap<CellReference, CellRaw>,
    pub merged_cells: Vec<String>,
    pub hyperlinks: Vec<Hyperlink>,
    pub data_validations: Vec<DataValidation>,
    pub protection: Option<SheetProtection>,
    pub rows: Vec<(u32, RowProps)>,
    pub columns: Vec<ColumnProps>,
    pub charts: Vec<ChartRef>,
    pub comments: Vec<Comment>,
}

impl WorksheetData {
    pub fn from_xml(xml: &WorksheetXml) -> Self {
        let mut cells = BTreeMap::new();
        let mut rows = Vec::new();
        for row in &xml.sheet_data.rows {
            rows.push((row.r, RowProps::from_xml(row)));
            for cell in &row.cells {
                if let Ok(reference) = CellReference::parse(&cell.r) {
                    cells.insert(reference, cell_raw_from_xml(cell));
                }
            }
        }

        let columns = xml.cols.as_ref().map(|cols| cols.cols.iter().map(ColumnProps::from_xml).collect()).unwrap_or_default();

        let merged_cells = merge::ranges(&xml.merge_cells);

        let hyperlinks = xml.hyperlinks.as_ref().map(|h| h.hyperlinks.iter().map(Hyperlink::from_xml).collect()).unwrap_or_default();

        let data_validations =
            xml.data_validations.as_ref().map(|dv| dv.validations.iter().map(DataValidation::from_xml).collect()).unwrap_or_default();

        let protection = xml.sheet_protection.as_ref().map(SheetProtection::from_xml);

        Self { cells, merged_cells, hyperlinks, data_validations, protection, rows, columns, charts: Vec::new(), comments: Vec::new() }
    }
}

fn cell_raw_from_xml(cell: &CellXml) -> CellRaw {
    let raw_type = match cell.t.as_deref() {
        Some(cell_types::SHARED_STRING) => Some(RawType::SharedString),
        Some(cell_types::BOOLEAN) => Some(RawType::Boolean),
        Some(cell_types::ERROR) => Some(RawType::Error),
        Some(cell_types::DATE) => Some(RawType::Date),
        // `str` (formula cached-string result) and `inlineStr` both carry
        // literal text directly; neither goes through the shared-string table.
        Some(cell_types::INLINE_STRING) | Some(cell_types::FORMULA_STRING) => Some(RawType::InlineString),
        Some(cell_types::NUMBER) | None => Some(RawType::Number),
        Some(_) => None,
    };

    let value = cell.is.as_ref().and_then(|is| is.t.clone()).or_else(|| cell.v.clone());
    let formula = cell.f.as_ref().and_then(|f| f.value.clone());

    CellRaw { value, raw_type, style_index: cell.s, formula }
}

/// Resolve a single cell's raw content to its high-level value, following
/// shared-string and date-format indirection.
pub fn resolve_cell(raw: &CellRaw, sst: &SharedStrings, styles: &StylesTable) -> CellValue {
    let Some(raw_value) = raw.value.as_deref() else { return CellValue::Empty };

    match raw.raw_type {
        Some(RawType::SharedString) => match raw_value.parse::<usize>().ok().and_then(|idx| sst.get(idx)) {
            Some(crate::sst::SharedStringEntry::Rich(rt)) => CellValue::RichText(rt.clone()),
            Some(crate::sst::SharedStringEntry::Plain(text)) => CellValue::Text(text.clone()),
            None => CellValue::Empty,
        },
        Some(RawType::Boolean) => CellValue::Boolean(raw_value == "1"),
        Some(RawType::Error) => CellValue::Error(raw_value.to_string()),
        Some(RawType::Date) => raw_value.parse::<f64>().map(CellValue::Date).unwrap_or(CellValue::Empty),
        Some(RawType::InlineString) => CellValue::Text(raw_value.to_string()),
        Some(RawType::Number) | None => match raw_value.parse::<f64>() {
            Ok(n) => {
                let is_date = raw.style_index.is_some_and(|s| styles.is_date_format(s));
                if is_date { CellValue::Date(n) } else { CellValue::Number(n) }
            }
            Err(_) => CellValue::Empty,
        },
    }
}

/// A read-only view over one worksheet, bound to the workbook's shared
/// strings and styles tables for value resolution.
pub struct Sheet<'a> {
    pub name: &'a str,
    pub data: &'a WorksheetData,
    sst: &'a SharedStrings,
    styles: &'a StylesTable,
}

impl<'a> Sheet<'a> {
    pub fn new(name: &'a str, data: &'a WorksheetData, sst: &'a SharedStrings, styles: &'a StylesTable) -> Self {
        Self { name, data, sst, styles }
    }

    fn value_at(&self, reference: &CellReference) -> CellValue {
        self.data.cells.get(reference).map(|raw| resolve_cell(raw, self.sst, self.styles)).unwrap_or(CellValue::Empty)
    }

    pub fn cell(&self, at: CellReference) -> Option<CellValue> {
        self.data.cells.contains_key(&at).then(|| self.value_at(&at))
    }

    /// Cells in column order from `A` to the last populated column in that
    /// row; gaps become [`CellValue::Empty`].
    pub fn row(&self, n: u32) -> Vec<CellValue> {
        let max_col = self.data.cells.keys().filter(|r| r.row == n).map(|r| r.col).max();
        let Some(max_col) = max_col else { return Vec::new() };
        (1..=max_col).map(|col| self.value_at(&CellReference { col, row: n })).collect()
    }

    /// One emission per non-empty row, in ascending row order: the row
    /// number paired with its populated `(reference, value)` cells in
    /// column order.
    pub fn rows(&self) -> Vec<(u32, Vec<(CellReference, CellValue)>)> {
        let mut by_row: BTreeMap<u32, Vec<(CellReference, CellValue)>> = BTreeMap::new();
        for reference in self.data.cells.keys() {
            by_row.entry(reference.row).or_default().push((*reference, self.value_at(reference)));
        }
        by_row.into_iter().collect()
    }

    /// All rows containing at least one cell matching `filter`, each row's
    /// populated cells in column order.
    pub fn rows_filter(&self, filter: impl Fn(&CellReference, &CellValue) -> bool) -> Vec<Vec<(CellReference, CellValue)>> {
        self.rows()
            .into_iter()
            .filter_map(|(_, cells)| cells.iter().any(|(r, v)| filter(r, v)).then_some(cells))
            .collect()
    }

    /// Cells in ascending row order for the given column letter (case-insensitive).
    pub fn column(&self, letter: &str) -> Vec<CellValue> {
        match cell_ref::column_name_to_number(&letter.to_ascii_uppercase()) {
            Ok(col) => self.column_at(col),
            Err(_) => Vec::new(),
        }
    }

    /// Cells in ascending row order for a 1-based column index.
    pub fn column_at(&self, index: u32) -> Vec<CellValue> {
        let rows_in_col: Vec<u32> = self.data.cells.keys().filter(|r| r.col == index).map(|r| r.row).collect();
        let (Some(&min_row), Some(&max_row)) = (rows_in_col.iter().min(), rows_in_col.iter().max()) else {
            return Vec::new();
        };
        (min_row..=max_row).map(|row| self.value_at(&CellReference { col: index, row })).collect()
    }

    /// Row-major values over the rectangle described by an `A1:C3`-style
    /// range. Invalid syntax returns an empty vector.
    pub fn range(&self, range: &str) -> Vec<CellValue> {
        let Some((start, end)) = parse_range(range) else { return Vec::new() };
        let mut out = Vec::new();
        for row in start.row..=end.row {
            for col in start.col..=end.col {
                out.push(self.value_at(&CellReference { col, row }));
            }
        }
        out
    }

    /// First cell matching `pred`, in row-major ascending order.
    pub fn find(&self, pred: impl Fn(&CellReference, &CellValue) -> bool) -> Option<(CellReference, CellValue)> {
        self.data.cells.keys().find_map(|reference| {
            let value = self.value_at(reference);
            pred(reference, &value).then_some((*reference, value))
        })
    }

    /// All cells matching `pred`, in row-major ascending order.
    pub fn find_all(&self, pred: impl Fn(&CellReference, &CellValue) -> bool) -> Vec<(CellReference, CellValue)> {
        self.data
            .cells
            .keys()
            .filter_map(|reference| {
                let value = self.value_at(reference);
                pred(reference, &value).then_some((*reference, value))
            })
            .collect()
    }

    /// Data validations whose `sqref` intersects a query range.
    pub fn validations_for(&self, range: &str) -> Vec<&DataValidation> {
        self.data.data_validations.iter().filter(|dv| dv.intersects_range(range)).collect()
    }

    /// Data validations whose `sqref` covers a single cell.
    pub fn validations_at(&self, cell: &str) -> Vec<&DataValidation> {
        self.data.data_validations.iter().filter(|dv| dv.intersects_cell(cell)).collect()
    }
}

/// Parse an `A1:C3`-style range into its corner [`CellReference`]s,
/// normalized so `start <= end` on both axes. Returns `None` on invalid syntax.
fn parse_range(range: &str) -> Option<(CellReference, CellReference)> {
    let (from, to) = range.split_once(':')?;
    let a = CellReference::parse(from).ok()?;
    let b = CellReference::parse(to).ok()?;
    Some((CellReference { col: a.col.min(b.col), row: a.row.min(b.row) }, CellReference { col: a.col.max(b.col), row: a.row.max(b.row) }))
}
