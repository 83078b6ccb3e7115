//! The package layer: an `.xlsx` ZIP archive as a named-part store with a
//! typed content-types table and per-part relationship sidecars.
//!
//! [`OpcPackage`] is the read side: once opened, every part's bytes are
//! loaded into memory and queries against it are pure. [`PackageWriter`] is
//! the write side: parts and relationships are buffered and only assembled
//! into an archive on [`PackageWriter::finalize`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{Cursor, Read, Write};
use std::path::Path;

use serde::Serialize;
use zip::write::SimpleFileOptions;
use zip::CompressionMethod;

use oxlsx_xml::content_types::ContentTypes;
use oxlsx_xml::relationships::{rel_types, Relationship, Relationships};

use crate::error::{Error, Result};

/// XML declaration prepended to every XML part this crate writes.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// An opened `.xlsx` archive. Parts are loaded once at [`OpcPackage::open`]
/// and treated as immutable; `relationships_for` lazily parses and caches
/// per-part `.rels` sidecars on first access.
pub struct OpcPackage {
    parts: HashMap<String, Vec<u8>>,
    part_paths: Vec<String>,
    pub content_types: ContentTypes,
    pub root_relationships: Relationships,
    rels_cache: RefCell<HashMap<String, Relationships>>,
}

impl OpcPackage {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::open_bytes(&data)
    }

    pub fn open_bytes(data: &[u8]) -> Result<Self> {
        let cursor = Cursor::new(data);
        let mut archive = zip::ZipArchive::new(cursor)?;

        let mut parts = HashMap::new();
        let mut part_paths = Vec::new();
        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            if file.is_dir() {
                continue;
            }
            let name = file.name().to_string();
            let mut bytes = Vec::new();
            file.read_to_end(&mut bytes)?;
            part_paths.push(name.clone());
            parts.insert(name, bytes);
        }

        let content_types = read_xml_part(&parts, "[Content_Types].xml")?;
        let root_relationships = read_xml_part(&parts, "_rels/.rels")?;

        Ok(Self { parts, part_paths, content_types, root_relationships, rels_cache: RefCell::new(HashMap::new()) })
    }

    pub fn part_exists(&self, path: &str) -> bool {
        self.parts.contains_key(path)
    }

    pub fn read_part(&self, path: &str) -> Result<&[u8]> {
        self.parts.get(path).map(Vec::as_slice).ok_or_else(|| Error::MissingPart(path.into()))
    }

    pub fn read_xml_part<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        read_xml_part(&self.parts, path)
    }

    /// Content type for a part: an explicit override wins over the
    /// extension-based default.
    pub fn content_type(&self, path: &str) -> Option<String> {
        let normalized = format!("/{}", path.trim_start_matches('/'));
        if let Some(ovr) = self.content_types.overrides.iter().find(|o| o.part_name == normalized) {
            return Some(ovr.content_type.clone());
        }
        let ext = path.rsplit('.').next()?;
        self.content_types.defaults.iter().find(|d| d.extension == ext).map(|d| d.content_type.clone())
    }

    /// Relationships declared for `path`, read from its `.rels` sidecar.
    /// Returns an empty set if the sidecar does not exist.
    pub fn relationships_for(&self, path: &str) -> Result<Relationships> {
        if let Some(cached) = self.rels_cache.borrow().get(path) {
            return Ok(cached.clone());
        }
        let rels_path = relationship_part_path(path);
        let rels = if self.part_exists(&rels_path) { self.read_xml_part(&rels_path)? } else { Relationships::new() };
        self.rels_cache.borrow_mut().insert(path.to_string(), rels.clone());
        Ok(rels)
    }

    /// Scans the root relationships for the `officeDocument` relationship
    /// (the entry point, normally `xl/workbook.xml`).
    pub fn find_main_document(&self) -> Option<&Relationship> {
        self.root_relationships.by_type(rel_types::OFFICE_DOCUMENT).next()
    }

    pub fn part_paths(&self) -> &[String] {
        &self.part_paths
    }
}

fn read_xml_part<T: serde::de::DeserializeOwned>(parts: &HashMap<String, Vec<u8>>, path: &str) -> Result<T> {
    let bytes = parts.get(path).ok_or_else(|| Error::MissingPart(path.into()))?;
    let text = std::str::from_utf8(bytes).map_err(|e| Error::InvalidXml(e.to_string()))?;
    Ok(quick_xml::de::from_str(text)?)
}

/// Resolve a relationship target against the source part path. Absolute
/// (`/`-prefixed) targets resolve against the package root; relative targets
/// resolve against the source part's directory, with `..` segments popped.
pub fn resolve_relationship_target(source_part: &str, target: &str) -> String {
    if let Some(stripped) = target.strip_prefix('/') {
        return stripped.to_string();
    }

    let base_dir = source_part.rsplit_once('/').map(|(dir, _)| dir).unwrap_or_default();
    let mut segments: Vec<&str> = if base_dir.is_empty() { vec![] } else { base_dir.split('/').collect() };
    for seg in target.split('/') {
        match seg {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

/// The `.rels` sidecar path for a package part, e.g.
/// `xl/worksheets/sheet1.xml` -> `xl/worksheets/_rels/sheet1.xml.rels`.
pub fn relationship_part_path(part_path: &str) -> String {
    let normalized = part_path.trim_start_matches('/');
    let (dir, file) = normalized.rsplit_once('/').unwrap_or(("", normalized));
    if dir.is_empty() { format!("_rels/{file}.rels") } else { format!("{dir}/_rels/{file}.rels") }
}

/// Build a relative relationship target pointing from `source_part` at
/// `target_part`, minimizing shared-prefix traversal.
pub fn relative_relationship_target(source_part: &str, target_part: &str) -> String {
    let source_dir = source_part.trim_start_matches('/').rsplit_once('/').map(|(dir, _)| dir).unwrap_or_default();
    let source_segments: Vec<&str> = if source_dir.is_empty() { vec![] } else { source_dir.split('/').collect() };
    let target_segments: Vec<&str> = target_part.trim_start_matches('/').split('/').collect();

    let mut common = 0usize;
    while common < source_segments.len() && common < target_segments.len() && source_segments[common] == target_segments[common] {
        common += 1;
    }

    let mut rel_segments: Vec<String> = Vec::new();
    for _ in 0..(source_segments.len() - common) {
        rel_segments.push("..".to_string());
    }
    rel_segments.extend(target_segments[common..].iter().map(|s| s.to_string()));

    if rel_segments.is_empty() { ".".to_string() } else { rel_segments.join("/") }
}

/// Buffers parts and relationships for a new archive, assembling them into
/// bytes only at [`PackageWriter::finalize`].
pub struct PackageWriter {
    parts: Vec<(String, Vec<u8>)>,
    content_types: ContentTypes,
    root_relationships: Relationships,
    pending_rels: HashMap<String, Relationships>,
}

impl PackageWriter {
    pub fn new() -> Self {
        Self { parts: Vec::new(), content_types: ContentTypes::new(), root_relationships: Relationships::new(), pending_rels: HashMap::new() }
    }

    /// Add a part's raw bytes, recording its content-type override.
    pub fn add_part(&mut self, path: impl Into<String>, bytes: Vec<u8>, content_type: &str) {
        let path = path.into();
        self.content_types.add_override(format!("/{path}"), content_type);
        self.parts.push((path, bytes));
    }

    /// Add an XML part, serializing `value` with the standard XML
    /// declaration prepended.
    pub fn add_xml_part<T: Serialize>(&mut self, path: impl Into<String>, value: &T, content_type: &str) -> Result<()> {
        let body = quick_xml::se::to_string(value)?;
        let mut xml = String::with_capacity(XML_DECLARATION.len() + 1 + body.len());
        xml.push_str(XML_DECLARATION);
        xml.push('\n');
        xml.push_str(&body);
        self.add_part(path, xml.into_bytes(), content_type);
        Ok(())
    }

    /// Add an extension default (e.g. `vml`) to the content-types table if
    /// not already present.
    pub fn add_default_content_type(&mut self, extension: &str, content_type: &str) {
        self.content_types.add_default_if_missing(extension, content_type);
    }

    /// Queue a relationship from `from` (a part path, or `""` for the
    /// package root) to be written once [`PackageWriter::finalize`] runs.
    pub fn add_relationship(&mut self, from: &str, rel: Relationship) {
        if from.is_empty() {
            self.root_relationships.relationships.push(rel);
        } else {
            self.pending_rels.entry(from.to_string()).or_insert_with(Relationships::new).relationships.push(rel);
        }
    }

    /// Serialize every buffered `.rels` sidecar plus `[Content_Types].xml`
    /// and emit the complete archive as an in-memory buffer.
    pub fn finalize(mut self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        {
            let cursor = Cursor::new(&mut buf);
            let mut zip = zip::ZipWriter::new(cursor);
            let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

            for (path, bytes) in &self.parts {
                zip.start_file(path, options)?;
                zip.write_all(bytes)?;
            }

            for (from, rels) in &self.pending_rels {
                let rels_path = relationship_part_path(from);
                let xml = quick_xml::se::to_string(rels)?;
                zip.start_file(&rels_path, options)?;
                zip.write_all(format!("{XML_DECLARATION}\n{xml}").as_bytes())?;
            }

            let root_rels_xml = quick_xml::se::to_string(&self.root_relationships)?;
            zip.start_file("_rels/.rels", options)?;
            zip.write_all(format!("{XML_DECLARATION}\n{root_rels_xml}").as_bytes())?;

            self.content_types.add_override("/xl/workbook.xml", oxlsx_xml::content_types::mime_types::WORKBOOK);
            let content_types_xml = quick_xml::se::to_string(&self.content_types)?;
            zip.start_file("[Content_Types].xml", options)?;
            zip.write_all(format!("{XML_DECLARATION}\n{content_types_xml}").as_bytes())?;

            zip.finish()?;
        }
        Ok(buf)
    }
}

impl Default for PackageWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_target_handles_sibling_directory() {
        assert_eq!(resolve_relationship_target("xl/workbook.xml", "worksheets/sheet1.xml"), "xl/worksheets/sheet1.xml");
        assert_eq!(resolve_relationship_target("xl/worksheets/sheet1.xml", "../drawings/drawing1.xml"), "xl/drawings/drawing1.xml");
    }

    #[test]
    fn resolve_target_absolute_ignores_source() {
        assert_eq!(resolve_relationship_target("xl/worksheets/sheet1.xml", "/xl/styles.xml"), "xl/styles.xml");
    }

    #[test]
    fn relationship_part_path_places_rels_beside_part() {
        assert_eq!(relationship_part_path("xl/worksheets/sheet1.xml"), "xl/worksheets/_rels/sheet1.xml.rels");
        assert_eq!(relationship_part_path("xl/workbook.xml"), "xl/_rels/workbook.xml.rels");
    }

    #[test]
    fn relative_target_climbs_to_common_ancestor() {
        assert_eq!(relative_relationship_target("xl/worksheets/sheet1.xml", "xl/drawings/drawing1.xml"), "../drawings/drawing1.xml");
        assert_eq!(relative_relationship_target("xl/drawings/drawing1.xml", "xl/charts/chart1.xml"), "../charts/chart1.xml");
    }

    #[test]
    fn package_writer_roundtrips_through_opc_package() {
        let mut writer = PackageWriter::new();
        writer.add_relationship("", Relationship {
            id: "rId1".to_string(),
            rel_type: rel_types::OFFICE_DOCUMENT.to_string(),
            target: "xl/workbook.xml".to_string(),
            target_mode: None,
        });
        writer.add_part("xl/workbook.xml", b"<workbook/>".to_vec(), oxlsx_xml::content_types::mime_types::WORKBOOK);
        let bytes = writer.finalize().unwrap();

        let pkg = OpcPackage::open_bytes(&bytes).unwrap();
        assert!(pkg.part_exists("xl/workbook.xml"));
        assert_eq!(pkg.content_type("xl/workbook.xml").as_deref(), Some(oxlsx_xml::content_types::mime_types::WORKBOOK));
        assert!(pkg.find_main_document().is_some());
    }

    #[test]
    fn missing_part_returns_missing_part_error() {
        let mut writer = PackageWriter::new();
        writer.add_relationship("", Relationship {
            id: "rId1".to_string(),
            rel_type: rel_types::OFFICE_DOCUMENT.to_string(),
            target: "xl/workbook.xml".to_string(),
            target_mode: None,
        });
        writer.add_part("xl/workbook.xml", b"<workbook/>".to_vec(), oxlsx_xml::content_types::mime_types::WORKBOOK);
        let bytes = writer.finalize().unwrap();
        let pkg = OpcPackage::open_bytes(&bytes).unwrap();
        assert!(matches!(pkg.read_part("xl/styles.xml"), Err(Error::MissingPart(_))));
    }
}
