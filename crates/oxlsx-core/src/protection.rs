//! Sheet and workbook protection, with OOXML's inverted boolean semantics
//! resolved once at this boundary.
//!
//! OOXML's `<sheetProtection>` attributes are "blocked" flags: `1` (or a
//! bare present attribute) means the action is *disallowed*. That reads
//! backwards to a caller, so every [`SheetProtectionOptions`] field here is
//! "permitted" — the inversion happens in [`SheetProtectionOptions::from_xml`]
//! / [`SheetProtectionOptions::to_xml`] and nowhere else. Passwords are
//! stored and round-tripped as opaque strings; this crate does not hash or
//! validate them.

use oxlsx_xml::worksheet::SheetProtectionXml;
use oxlsx_xml::workbook::WorkbookProtection as WorkbookProtectionXml;

/// Permitted-action flags for a protected sheet. `true` means the reader
/// may still perform that action; OOXML's `1` ("blocked") maps to `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetProtectionOptions {
    pub format_cells: bool,
    pub format_columns: bool,
    pub format_rows: bool,
    pub insert_columns: bool,
    pub insert_rows: bool,
    pub insert_hyperlinks: bool,
    pub delete_columns: bool,
    pub delete_rows: bool,
    pub sort: bool,
    pub auto_filter: bool,
    pub pivot_tables: bool,
    pub select_locked_cells: bool,
    pub select_unlocked_cells: bool,
}

impl SheetProtectionOptions {
    /// Permits the common editing actions a protected sheet typically
    /// still allows (selection), blocks structural changes.
    pub fn default_preset() -> Self {
        Self {
            format_cells: false,
            format_columns: false,
            format_rows: false,
            insert_columns: false,
            insert_rows: false,
            insert_hyperlinks: false,
            delete_columns: false,
            delete_rows: false,
            sort: false,
            auto_filter: false,
            pivot_tables: false,
            select_locked_cells: true,
            select_unlocked_cells: true,
        }
    }

    /// Blocks every protectable action, including cell selection.
    pub fn strict_preset() -> Self {
        Self {
            format_cells: false,
            format_columns: false,
            format_rows: false,
            insert_columns: false,
            insert_rows: false,
            insert_hyperlinks: false,
            delete_columns: false,
            delete_rows: false,
            sort: false,
            auto_filter: false,
            pivot_tables: false,
            select_locked_cells: false,
            select_unlocked_cells: false,
        }
    }
}

impl Default for SheetProtectionOptions {
    fn default() -> Self {
        Self::default_preset()
    }
}

/// Whether an attribute was explicitly set to "blocked" (`true`/present)
/// on read. Absent attributes default to "blocked" in OOXML for most of
/// these flags, except `selectLockedCells`/`selectUnlockedCells`, whose
/// absence means "permitted".
fn blocked_to_permitted(blocked: Option<bool>, permitted_by_default: bool) -> bool {
    match blocked {
        Some(b) => !b,
        None => permitted_by_default,
    }
}

fn permitted_to_blocked(permitted: bool, permitted_by_default: bool) -> Option<bool> {
    if permitted == permitted_by_default {
        None
    } else {
        Some(!permitted)
    }
}

/// Full sheet protection state: whether it is active, its (opaque)
/// password, and the permitted-action flags.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetProtection {
    pub enabled: bool,
    pub password: Option<String>,
    pub options: SheetProtectionOptionsState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetProtectionOptionsState(pub SheetProtectionOptions);

impl SheetProtection {
    pub fn new(password: Option<String>, options: SheetProtectionOptions) -> Self {
        Self { enabled: true, password, options: SheetProtectionOptionsState(options) }
    }

    pub fn from_xml(xml: &SheetProtectionXml) -> Self {
        let options = SheetProtectionOptions {
            format_cells: blocked_to_permitted(xml.format_cells, false),
            format_columns: blocked_to_permitted(xml.format_columns, false),
            format_rows: blocked_to_permitted(xml.format_rows, false),
            insert_columns: blocked_to_permitted(xml.insert_columns, false),
            insert_rows: blocked_to_permitted(xml.insert_rows, false),
            insert_hyperlinks: blocked_to_permitted(xml.insert_hyperlinks, false),
            delete_columns: blocked_to_permitted(xml.delete_columns, false),
            delete_rows: blocked_to_permitted(xml.delete_rows, false),
            sort: blocked_to_permitted(xml.sort, false),
            auto_filter: blocked_to_permitted(xml.auto_filter, false),
            pivot_tables: blocked_to_permitted(xml.pivot_tables, false),
            select_locked_cells: blocked_to_permitted(xml.select_locked_cells, true),
            select_unlocked_cells: blocked_to_permitted(xml.select_unlocked_cells, true),
        };
        Self {
            enabled: xml.sheet.unwrap_or(false),
            password: xml.password.clone(),
            options: SheetProtectionOptionsState(options),
        }
    }

    pub fn to_xml(&self) -> SheetProtectionXml {
        let o = self.options.0;
        SheetProtectionXml {
            sheet: Some(self.enabled),
            password: self.password.clone(),
            format_cells: permitted_to_blocked(o.format_cells, false),
            format_columns: permitted_to_blocked(o.format_columns, false),
            format_rows: permitted_to_blocked(o.format_rows, false),
            insert_columns: permitted_to_blocked(o.insert_columns, false),
            insert_rows: permitted_to_blocked(o.insert_rows, false),
            insert_hyperlinks: permitted_to_blocked(o.insert_hyperlinks, false),
            delete_columns: permitted_to_blocked(o.delete_columns, false),
            delete_rows: permitted_to_blocked(o.delete_rows, false),
            sort: permitted_to_blocked(o.sort, false),
            auto_filter: permitted_to_blocked(o.auto_filter, false),
            pivot_tables: permitted_to_blocked(o.pivot_tables, false),
            select_locked_cells: permitted_to_blocked(o.select_locked_cells, true),
            select_unlocked_cells: permitted_to_blocked(o.select_unlocked_cells, true),
        }
    }
}

/// Workbook-level protection. Unlike sheet protection, these flags are not
/// inverted: `structure_protected` directly mirrors `<workbookProtection
/// lockStructure>`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkbookProtection {
    pub structure_protected: bool,
    pub windows_protected: bool,
    pub password: Option<String>,
}

impl WorkbookProtection {
    pub fn from_xml(xml: &WorkbookProtectionXml) -> Self {
        Self {
            structure_protected: xml.lock_structure.unwrap_or(false),
            windows_protected: xml.lock_windows.unwrap_or(false),
            password: xml.workbook_password.clone(),
        }
    }

    pub fn to_xml(&self) -> WorkbookProtectionXml {
        WorkbookProtectionXml {
            lock_structure: self.structure_protected.then_some(true),
            lock_windows: self.windows_protected.then_some(true),
            workbook_password: self.password.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_preset_permits_selection_blocks_structure() {
        let preset = SheetProtectionOptions::default_preset();
        assert!(preset.select_locked_cells);
        assert!(preset.select_unlocked_cells);
        assert!(!preset.format_cells);
        assert!(!preset.sort);
    }

    #[test]
    fn strict_preset_blocks_everything() {
        let preset = SheetProtectionOptions::strict_preset();
        assert!(!preset.select_locked_cells);
        assert!(!preset.select_unlocked_cells);
    }

    #[test]
    fn xml_blocked_flag_becomes_unpermitted() {
        let xml = SheetProtectionXml { sheet: Some(true), format_cells: Some(true), ..Default::default() };
        let protection = SheetProtection::from_xml(&xml);
        assert!(protection.enabled);
        assert!(!protection.options.0.format_cells);
    }

    #[test]
    fn absent_select_locked_cells_defaults_to_permitted() {
        let xml = SheetProtectionXml { sheet: Some(true), ..Default::default() };
        let protection = SheetProtection::from_xml(&xml);
        assert!(protection.options.0.select_locked_cells);
    }

    #[test]
    fn roundtrip_preserves_permitted_semantics() {
        let protection = SheetProtection::new(Some("secret".to_string()), SheetProtectionOptions::strict_preset());
        let xml = protection.to_xml();
        let back = SheetProtection::from_xml(&xml);
        assert_eq!(back, protection);
    }

    #[test]
    fn password_is_opaque_not_hashed() {
        let protection = SheetProtection::new(Some("plaintext".to_string()), SheetProtectionOptions::default());
        let xml = protection.to_xml();
        assert_eq!(xml.password.as_deref(), Some("plaintext"));
    }

    #[test]
    fn workbook_protection_roundtrips() {
        let protection =
            WorkbookProtection { structure_protected: true, windows_protected: false, password: Some("pw".to_string()) };
        let xml = protection.to_xml();
        let back = WorkbookProtection::from_xml(&xml);
        assert_eq!(back, protection);
    }
}
