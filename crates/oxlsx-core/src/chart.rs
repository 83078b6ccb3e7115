//! Chart discovery: charts are surfaced by reference only, not rendered or
//! parsed. A worksheet's drawing relationship points at `xl/drawings/drawingN.xml`,
//! whose own relationships part in turn points at one or more chart parts; we
//! expose those chart part paths without interpreting chart XML content.

use oxlsx_xml::relationships::{rel_types, Relationships};

/// A reference to a chart embedded via a worksheet's drawing, identified by
/// its package part path (e.g. `xl/charts/chart1.xml`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartRef {
    pub part_path: String,
}

/// Resolve chart part paths from a drawing part's relationships, given the
/// drawing part's own location (relative targets are resolved against it).
pub fn charts_from_drawing_rels(drawing_part_dir: &str, rels: &Relationships) -> Vec<ChartRef> {
    rels.by_type(rel_types::CHART)
        .filter(|r| !r.is_external())
        .map(|r| ChartRef { part_path: resolve_relative(drawing_part_dir, &r.target) })
        .collect()
}

fn resolve_relative(base_dir: &str, target: &str) -> String {
    if let Some(stripped) = target.strip_prefix('/') {
        return stripped.to_string();
    }

    let mut segments: Vec<&str> = base_dir.split('/').filter(|s| !s.is_empty()).collect();
    for part in target.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}
