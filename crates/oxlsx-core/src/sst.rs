//! Runtime shared string table.
//!
//! Bridges the XML-level [`oxlsx_xml::shared_strings::Sst`] and the
//! high-level cell API. Unlike a naive port, rich-text entries keep their
//! per-run formatting intact end to end — round-tripping a bold run through
//! this table must still be bold when read back.

use std::collections::HashMap;

use oxlsx_xml::shared_strings::{Si, Sst};

use crate::rich_text::RichText;

/// One entry in the shared string table: either plain text or formatted
/// rich text.
#[derive(Debug, Clone, PartialEq)]
pub enum SharedStringEntry {
    Plain(String),
    Rich(RichText),
}

impl SharedStringEntry {
    /// Plain-text projection, discarding any run formatting.
    pub fn plain_text(&self) -> String {
        match self {
            SharedStringEntry::Plain(s) => s.clone(),
            SharedStringEntry::Rich(rt) => rt.plain_text(),
        }
    }
}

/// Runtime shared string table for efficient string lookup and insertion.
///
/// Maintains an ordered list of entries (for index-based lookup) and a
/// reverse map of plain strings (for deduplication on insert).
#[derive(Debug, Default)]
pub struct SharedStrings {
    entries: Vec<SharedStringEntry>,
    plain_index: HashMap<String, usize>,
}

impl SharedStrings {
    pub fn new() -> Self {
        Self { entries: Vec::new(), plain_index: HashMap::new() }
    }

    /// Build from a parsed XML shared-string table.
    pub fn from_xml(sst: &Sst) -> Self {
        let mut table = Self::new();
        for si in &sst.items {
            table.push_from_si(si);
        }
        table
    }

    fn push_from_si(&mut self, si: &Si) {
        let idx = self.entries.len();
        if let Some(ref t) = si.t {
            self.plain_index.entry(t.value.clone()).or_insert(idx);
            self.entries.push(SharedStringEntry::Plain(t.value.clone()));
        } else {
            self.entries.push(SharedStringEntry::Rich(RichText::from(si)));
        }
    }

    /// Serialize back into the XML shared-string table shape.
    pub fn to_xml(&self) -> Sst {
        let items: Vec<Si> = self
            .entries
            .iter()
            .map(|e| match e {
                SharedStringEntry::Plain(s) => Si {
                    t: Some(oxlsx_xml::shared_strings::T {
                        xml_space: needs_space_preserve(s).then(|| "preserve".to_string()),
                        value: s.clone(),
                    }),
                    r: vec![],
                },
                SharedStringEntry::Rich(rt) => Si::from(rt),
            })
            .collect();

        let len = items.len() as u32;
        Sst {
            xmlns: oxlsx_xml::namespaces::SPREADSHEET_ML.to_string(),
            count: Some(len),
            unique_count: Some(len),
            items,
        }
    }

    /// Look up an entry by index. Out-of-range returns `None`.
    pub fn get(&self, index: usize) -> Option<&SharedStringEntry> {
        self.entries.get(index)
    }

    /// Plain-text projection of an entry by index.
    pub fn get_text(&self, index: usize) -> Option<String> {
        self.get(index).map(SharedStringEntry::plain_text)
    }

    /// Intern a plain string, returning its index. Deduplicates against
    /// existing plain entries.
    pub fn add_text(&mut self, s: &str) -> usize {
        if let Some(&idx) = self.plain_index.get(s) {
            return idx;
        }
        let idx = self.entries.len();
        self.entries.push(SharedStringEntry::Plain(s.to_string()));
        self.plain_index.insert(s.to_string(), idx);
        idx
    }

    /// Intern a rich-text value, returning its index. Deduplicates against
    /// an existing rich entry with identical runs.
    pub fn add_rich_text(&mut self, rt: RichText) -> usize {
        if let Some(idx) = self
            .entries
            .iter()
            .position(|e| matches!(e, SharedStringEntry::Rich(existing) if existing == &rt))
        {
            return idx;
        }
        let idx = self.entries.len();
        self.entries.push(SharedStringEntry::Rich(rt));
        idx
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn needs_space_preserve(s: &str) -> bool {
    s.starts_with(' ') || s.ends_with(' ') || s.contains("  ") || s.contains('\n') || s.contains('\t')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rich_text::TextRun;
    use oxlsx_xml::shared_strings::{R, T};

    #[test]
    fn new_is_empty() {
        let table = SharedStrings::new();
        assert!(table.is_empty());
    }

    #[test]
    fn add_text_deduplicates() {
        let mut table = SharedStrings::new();
        assert_eq!(table.add_text("hello"), 0);
        assert_eq!(table.add_text("world"), 1);
        assert_eq!(table.add_text("hello"), 0);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn get_out_of_range_is_none() {
        let table = SharedStrings::new();
        assert!(table.get(0).is_none());
    }

    #[test]
    fn from_xml_preserves_rich_text_formatting() {
        let sst = Sst {
            xmlns: oxlsx_xml::namespaces::SPREADSHEET_ML.to_string(),
            count: Some(1),
            unique_count: Some(1),
            items: vec![Si {
                t: None,
                r: vec![
                    R {
                        r_pr: Some(oxlsx_xml::shared_strings::RPr {
                            b: Some(oxlsx_xml::shared_strings::BoolVal { val: None }),
                            ..Default::default()
                        }),
                        t: T { xml_space: None, value: "Bold".to_string() },
                    },
                    R { r_pr: None, t: T { xml_space: None, value: " Normal".to_string() } },
                ],
            }],
        };

        let table = SharedStrings::from_xml(&sst);
        assert_eq!(table.get_text(0), Some("Bold Normal".to_string()));
        match table.get(0).unwrap() {
            SharedStringEntry::Rich(rt) => {
                assert!(rt.runs[0].bold, "rich-text formatting must survive table round-trip");
            }
            SharedStringEntry::Plain(_) => panic!("expected rich entry to stay rich, not be flattened"),
        }
    }

    #[test]
    fn add_rich_text_deduplicates_identical_runs() {
        let mut table = SharedStrings::new();
        let rt = RichText::new(vec![TextRun { text: "A".to_string(), bold: true, ..Default::default() }]);
        assert_eq!(table.add_rich_text(rt.clone()), 0);
        assert_eq!(table.add_rich_text(rt), 0);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn roundtrip_through_xml() {
        let mut table = SharedStrings::new();
        table.add_text("Name");
        table.add_rich_text(RichText::new(vec![TextRun {
            text: "Bold".to_string(),
            bold: true,
            ..Default::default()
        }]));

        let xml = table.to_xml();
        let back = SharedStrings::from_xml(&xml);
        assert_eq!(back.get_text(0), Some("Name".to_string()));
        assert_eq!(back.get_text(1), Some("Bold".to_string()));
    }
}
