//! Cell reference conversion utilities.
//!
//! Converts between A1-style cell references (e.g. `"A1"`, `"$AB$100"`,
//! `"XFD1048576"`) and 1-based `(col, row)` numeric coordinates.

use crate::error::{Error, Result};
use crate::utils::constants::{MAX_COLUMNS, MAX_ROWS};

/// Convert a column name (e.g. `"A"`, `"Z"`, `"AA"`, `"XFD"`) to a 1-based
/// column number.
///
/// ```
/// use oxlsx_core::utils::cell_ref::column_name_to_number;
///
/// assert_eq!(column_name_to_number("A").unwrap(), 1);
/// assert_eq!(column_name_to_number("AA").unwrap(), 27);
/// ```
pub fn column_name_to_number(name: &str) -> Result<u32> {
    if name.is_empty() {
        return Err(Error::InvalidCellReference("empty column name".to_string()));
    }

    let mut result: u32 = 0;

    for c in name.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(Error::InvalidCellReference(format!(
                "non-alphabetic character in column name: '{c}'"
            )));
        }

        let digit = (c.to_ascii_uppercase() as u32) - ('A' as u32) + 1;

        result = result
            .checked_mul(26)
            .and_then(|r| r.checked_add(digit))
            .ok_or_else(|| Error::InvalidCellReference(format!("column name overflow: '{name}'")))?;
    }

    if result > MAX_COLUMNS {
        return Err(Error::InvalidCellReference(format!(
            "column '{name}' exceeds maximum column {MAX_COLUMNS}"
        )));
    }

    Ok(result)
}

/// Convert a 1-based column number to its letter name.
///
/// ```
/// use oxlsx_core::utils::cell_ref::column_number_to_name;
///
/// assert_eq!(column_number_to_name(1).unwrap(), "A");
/// assert_eq!(column_number_to_name(27).unwrap(), "AA");
/// ```
pub fn column_number_to_name(num: u32) -> Result<String> {
    if !(1..=MAX_COLUMNS).contains(&num) {
        return Err(Error::InvalidCellReference(format!(
            "column number {num} out of range 1..={MAX_COLUMNS}"
        )));
    }

    let mut col = num;
    let mut result = String::with_capacity(3);

    while col > 0 {
        col -= 1;
        let remainder = (col % 26) as u8;
        result.insert(0, (b'A' + remainder) as char);
        col /= 26;
    }

    Ok(result)
}

/// Parse an A1-style cell reference into `(col, row)` coordinates (both
/// 1-based). Absolute-reference markers (`$`) are stripped before parsing.
///
/// ```
/// use oxlsx_core::utils::cell_ref::cell_name_to_coordinates;
///
/// assert_eq!(cell_name_to_coordinates("A1").unwrap(), (1, 1));
/// assert_eq!(cell_name_to_coordinates("$B$2").unwrap(), (2, 2));
/// ```
pub fn cell_name_to_coordinates(cell: &str) -> Result<(u32, u32)> {
    let cell = cell.replace('$', "");

    if cell.is_empty() {
        return Err(Error::InvalidCellReference("empty cell reference".to_string()));
    }

    let mut col_end = 0;
    for (i, c) in cell.char_indices() {
        if c.is_ascii_alphabetic() {
            col_end = i + c.len_utf8();
        } else {
            break;
        }
    }

    if col_end == 0 {
        return Err(Error::InvalidCellReference(format!("no column letters in '{cell}'")));
    }

    let col_str = &cell[..col_end];
    let row_str = &cell[col_end..];

    if row_str.is_empty() {
        return Err(Error::InvalidCellReference(format!("no row number in '{cell}'")));
    }

    let col = column_name_to_number(col_str)?;

    let row: u32 = row_str
        .parse()
        .map_err(|_| Error::InvalidCellReference(format!("invalid row number in '{cell}'")))?;

    if !(1..=MAX_ROWS).contains(&row) {
        return Err(Error::InvalidCellReference(format!(
            "row {row} out of range 1..={MAX_ROWS}"
        )));
    }

    Ok((col, row))
}

/// Convert 1-based `(col, row)` coordinates to an A1-style cell reference.
///
/// ```
/// use oxlsx_core::utils::cell_ref::coordinates_to_cell_name;
///
/// assert_eq!(coordinates_to_cell_name(1, 1).unwrap(), "A1");
/// assert_eq!(coordinates_to_cell_name(27, 100).unwrap(), "AA100");
/// ```
pub fn coordinates_to_cell_name(col: u32, row: u32) -> Result<String> {
    if !(1..=MAX_ROWS).contains(&row) {
        return Err(Error::InvalidCellReference(format!(
            "row {row} out of range 1..={MAX_ROWS}"
        )));
    }

    let col_name = column_number_to_name(col)?;
    Ok(format!("{col_name}{row}"))
}

/// A parsed, 1-based cell coordinate pair.
///
/// Comparisons and ordering follow row-major order: rows first, then
/// columns within a row, matching worksheet reading order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellReference {
    pub row: u32,
    pub col: u32,
}

impl CellReference {
    /// Parse an A1-style reference such as `"B2"` or `"$AB$100"`.
    pub fn parse(cell: &str) -> Result<Self> {
        let (col, row) = cell_name_to_coordinates(cell)?;
        Ok(Self { col, row })
    }

    /// Build directly from 1-based coordinates, validating range.
    pub fn from_coordinates(col: u32, row: u32) -> Result<Self> {
        if !(1..=MAX_COLUMNS).contains(&col) {
            return Err(Error::InvalidCellReference(format!(
                "column {col} out of range 1..={MAX_COLUMNS}"
            )));
        }
        if !(1..=MAX_ROWS).contains(&row) {
            return Err(Error::InvalidCellReference(format!(
                "row {row} out of range 1..={MAX_ROWS}"
            )));
        }
        Ok(Self { col, row })
    }

    /// Render back to A1-style notation (e.g. `"AA100"`).
    pub fn to_a1(self) -> Result<String> {
        coordinates_to_cell_name(self.col, self.row)
    }
}

impl std::fmt::Display for CellReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_a1() {
            Ok(s) => write!(f, "{s}"),
            Err(_) => write!(f, "?{}:{}", self.col, self.row),
        }
    }
}
