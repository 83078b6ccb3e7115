//! oxlsx: read, query, and write Excel (.xlsx) SpreadsheetML packages.
//!
//! # Quick Start
//!
//! ```no_run
//! use oxlsx::Workbook;
//!
//! let wb = Workbook::open("input.xlsx").unwrap();
//! for sheet in wb.sheets() {
//!     println!("{}", sheet.name);
//! }
//! ```

pub use oxlsx_core::cell::{CellRaw, CellValue, RawType};
pub use oxlsx_core::error::{Error, Result};
pub use oxlsx_core::sheet::Sheet;
pub use oxlsx_core::workbook::{SheetEntryInfo, SheetState, Workbook, WorkbookInfo};
pub use oxlsx_core::writer::{SheetBuilder, WorkbookWriter};

/// Cell reference parsing and coordinate conversion.
pub mod utils {
    pub use oxlsx_core::utils::cell_ref::{
        cell_name_to_coordinates, column_name_to_number, column_number_to_name, coordinates_to_cell_name, CellReference,
    };
    pub use oxlsx_core::utils::constants;
}

/// The crate's version, as set at build time from `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
