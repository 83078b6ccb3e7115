//! Structured table discovery (`xl/tables/tableN.xml`).
//!
//! Tables are exposed read-only: the engine surfaces their name, range, and
//! column headers so callers can locate structured data, without modeling
//! Excel's table styling or totals-row calculation features.

use oxlsx_xml::table::TableXml;

#[derive(Debug, Clone, PartialEq)]
pub struct TableInfo {
    pub name: String,
    pub display_name: String,
    pub reference: String,
    pub columns: Vec<String>,
}

impl TableInfo {
    pub fn from_xml(xml: &TableXml) -> Self {
        Self {
            name: xml.name.clone(),
            display_name: xml.display_name.clone(),
            reference: xml.reference.clone(),
            columns: xml.table_columns.columns.iter().map(|c| c.name.clone()).collect(),
        }
    }
}
