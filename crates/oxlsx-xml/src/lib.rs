//! oxlsx-xml: typed OOXML schema structures for Excel (.xlsx) part files.
//!
//! Each module is a pure `serde` schema for one package part, deserialized
//! and serialized via `quick_xml`'s serde integration. No domain logic lives
//! here — interning, query surfaces, and cross-part stitching belong to
//! `oxlsx-core`.
//!
//! # Modules
//!
//! - [`namespaces`] - OOXML namespace URI constants
//! - [`content_types`] - `[Content_Types].xml` structures
//! - [`relationships`] - relationships (`.rels`) structures
//! - [`workbook`] - `xl/workbook.xml` structures
//! - [`worksheet`] - `xl/worksheets/sheetN.xml` structures
//! - [`styles`] - `xl/styles.xml` structures
//! - [`shared_strings`] - `xl/sharedStrings.xml` structures
//! - [`comments`] - `xl/commentsN.xml` structures
//! - [`table`] - `xl/tables/tableN.xml` structures

pub mod comments;
pub mod content_types;
pub mod namespaces;
pub mod relationships;
pub mod shared_strings;
pub mod styles;
pub mod table;
pub mod workbook;
pub mod worksheet;
