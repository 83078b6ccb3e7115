//! Pivot table discovery: pivot caches are surfaced by reference only, via
//! the `<pivotCaches>` list in `xl/workbook.xml`. Pivot computation and
//! layout are out of scope.

use oxlsx_xml::workbook::WorkbookXml;

/// A reference to a pivot cache registered on the workbook, identified by
/// its cache id and the relationship id pointing at `xl/pivotCache/...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PivotRef {
    pub cache_id: u32,
    pub relationship_id: String,
}

/// List all pivot table caches registered on the workbook, in declaration order.
pub fn pivot_refs(wb: &WorkbookXml) -> Vec<PivotRef> {
    wb.pivot_caches
        .as_ref()
        .map(|caches| caches.caches.iter().map(|c| PivotRef { cache_id: c.cache_id, relationship_id: c.r_id.clone() }).collect())
        .unwrap_or_default()
}
