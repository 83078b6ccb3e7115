//! Excel limit constants mirrored from the OOXML / `.xlsx` format.

/// Maximum number of columns (`XFD` = 16 384 = 2^14).
pub const MAX_COLUMNS: u32 = 16_384;

/// Maximum number of rows (1 048 576 = 2^20).
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum length (in characters) of a sheet name.
pub const MAX_SHEET_NAME_LENGTH: usize = 31;

/// Characters that are not allowed in Excel sheet names.
pub const SHEET_NAME_INVALID_CHARS: &[char] = &[':', '\\', '/', '?', '*', '[', ']'];

/// Default column width used when no explicit width is set (character-width units).
pub const DEFAULT_COL_WIDTH: f64 = 9.140625;

/// Default row height in points.
pub const DEFAULT_ROW_HEIGHT: f64 = 15.0;
