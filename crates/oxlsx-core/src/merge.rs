//! Merged-cell range tracking.

use oxlsx_xml::worksheet::{MergeCell, MergeCells};

/// Merge a new A1-style range into a worksheet's merge list, keeping the
/// canonical `<mergeCells>` shape (count kept in sync with the vector).
pub fn add_merge(merge_cells: &mut Option<MergeCells>, range: &str) {
    let cells = merge_cells.get_or_insert_with(|| MergeCells { count: Some(0), merge_cells: Vec::new() });
    cells.merge_cells.push(MergeCell { reference: range.to_string() });
    cells.count = Some(cells.merge_cells.len() as u32);
}

/// Flatten a worksheet's merge list to plain A1-style range strings, in
/// declaration order.
pub fn ranges(merge_cells: &Option<MergeCells>) -> Vec<String> {
    merge_cells
        .as_ref()
        .map(|mc| mc.merge_cells.iter().map(|m| m.reference.clone()).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_merge_creates_section_on_first_call() {
        let mut merges = None;
        add_merge(&mut merges, "A1:B2");
        assert_eq!(ranges(&merges), vec!["A1:B2".to_string()]);
    }

    #[test]
    fn add_merge_appends_and_updates_count() {
        let mut merges = None;
        add_merge(&mut merges, "A1:B2");
        add_merge(&mut merges, "C1:D2");
        let mc = merges.unwrap();
        assert_eq!(mc.count, Some(2));
        assert_eq!(mc.merge_cells.len(), 2);
    }

    #[test]
    fn ranges_on_absent_section_is_empty() {
        assert!(ranges(&None).is_empty());
    }
}
