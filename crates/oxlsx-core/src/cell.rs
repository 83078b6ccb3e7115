//! Cell value representation.
//!
//! [`CellValue`] is the resolved, high-level value of a cell — what you get
//! back after a `<c>` element's raw type/style/shared-string indirection has
//! been followed through [`crate::sst::SharedStrings`] and
//! [`crate::style::StylesTable`]. [`CellRaw`] is the unresolved counterpart
//! stored directly in [`crate::sheet::WorksheetData`].

use std::fmt;

use crate::rich_text::RichText;

/// The resolved value of a single cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// No value (empty cell, or cell absent entirely).
    Empty,
    /// Numeric value (Excel stores all numbers, including integers, as f64).
    Number(f64),
    /// Plain string value.
    Text(String),
    /// Boolean value.
    Boolean(bool),
    /// Rich (multi-run, formatted) text value.
    RichText(RichText),
    /// Error value (e.g. `#DIV/0!`, `#N/A`, `#VALUE!`).
    Error(String),
    /// A date/time value, stored as an Excel serial day number.
    Date(f64),
}

impl Default for CellValue {
    fn default() -> Self {
        Self::Empty
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => write!(f, ""),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{n}")
                }
            }
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            CellValue::RichText(rt) => write!(f, "{}", rt.plain_text()),
            CellValue::Error(e) => write!(f, "{e}"),
            CellValue::Date(serial) => write!(f, "{serial}"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

/// The raw type tag stored on a `<c>` element, before shared-string and
/// style-table resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawType {
    Number,
    SharedString,
    Boolean,
    InlineString,
    Error,
    Date,
}

/// The unresolved content of a single cell as read from (or destined for)
/// worksheet XML.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CellRaw {
    /// Raw textual content of `<v>` (or `<is>` for inline strings).
    pub value: Option<String>,
    pub raw_type: Option<RawType>,
    pub style_index: Option<u32>,
    pub formula: Option<String>,
}

impl CellRaw {
    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.formula.is_none()
    }
}
