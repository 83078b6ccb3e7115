//! Defined names (named ranges): workbook-scoped or sheet-scoped aliases
//! for a cell reference or range.

use oxlsx_xml::workbook::{DefinedName as DefinedNameXml, DefinedNames, WorkbookXml};

use crate::error::{Error, Result};

const DEFINED_NAME_INVALID_CHARS: &[char] = &['\\', '/', '?', '*', '[', ']'];

/// Scope of a defined name: visible workbook-wide, or only within one sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinedNameScope {
    Workbook,
    Sheet(u32),
}

/// A named reference or formula, e.g. `SalesData -> Sheet1!$A$1:$D$10`.
#[derive(Debug, Clone, PartialEq)]
pub struct DefinedNameInfo {
    pub name: String,
    pub refers_to: String,
    pub scope: DefinedNameScope,
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidFormat("defined name cannot be empty".into()));
    }
    if name != name.trim() {
        return Err(Error::InvalidFormat("defined name cannot start or end with whitespace".into()));
    }
    for ch in DEFINED_NAME_INVALID_CHARS {
        if name.contains(*ch) {
            return Err(Error::InvalidFormat(format!("defined name '{name}' contains invalid character '{ch}'")));
        }
    }
    Ok(())
}

fn scope_to_local_sheet_id(scope: DefinedNameScope) -> Option<u32> {
    match scope {
        DefinedNameScope::Workbook => None,
        DefinedNameScope::Sheet(id) => Some(id),
    }
}

fn local_sheet_id_to_scope(local_sheet_id: Option<u32>) -> DefinedNameScope {
    match local_sheet_id {
        None => DefinedNameScope::Workbook,
        Some(id) => DefinedNameScope::Sheet(id),
    }
}

/// Add a defined name, or update it in place if one with the same name and
/// scope already exists.
pub fn set_defined_name(wb: &mut WorkbookXml, name: &str, refers_to: &str, scope: DefinedNameScope) -> Result<()> {
    validate_name(name)?;
    let local_sheet_id = scope_to_local_sheet_id(scope);

    let defined_names = wb.defined_names.get_or_insert_with(|| DefinedNames { defined_names: Vec::new() });

    if let Some(existing) = defined_names.defined_names.iter_mut().find(|dn| dn.name == name && dn.local_sheet_id == local_sheet_id) {
        existing.value = refers_to.to_string();
        return Ok(());
    }

    defined_names.defined_names.push(DefinedNameXml { name: name.to_string(), local_sheet_id, value: refers_to.to_string() });
    Ok(())
}

/// Look up a defined name by name and scope.
pub fn get_defined_name(wb: &WorkbookXml, name: &str, scope: DefinedNameScope) -> Option<DefinedNameInfo> {
    let defined_names = wb.defined_names.as_ref()?;
    let local_sheet_id = scope_to_local_sheet_id(scope);
    defined_names
        .defined_names
        .iter()
        .find(|dn| dn.name == name && dn.local_sheet_id == local_sheet_id)
        .map(|dn| DefinedNameInfo { name: dn.name.clone(), refers_to: dn.value.clone(), scope: local_sheet_id_to_scope(dn.local_sheet_id) })
}

/// Remove a defined name by name and scope.
pub fn delete_defined_name(wb: &mut WorkbookXml, name: &str, scope: DefinedNameScope) -> Result<()> {
    let local_sheet_id = scope_to_local_sheet_id(scope);
    let defined_names = wb.defined_names.as_mut().ok_or_else(|| Error::InvalidFormat(format!("defined name '{name}' not found")))?;

    let idx = defined_names
        .defined_names
        .iter()
        .position(|dn| dn.name == name && dn.local_sheet_id == local_sheet_id)
        .ok_or_else(|| Error::InvalidFormat(format!("defined name '{name}' not found")))?;

    defined_names.defined_names.remove(idx);
    if defined_names.defined_names.is_empty() {
        wb.defined_names = None;
    }
    Ok(())
}

/// List all defined names in declaration order.
pub fn all_defined_names(wb: &WorkbookXml) -> Vec<DefinedNameInfo> {
    let Some(defined_names) = wb.defined_names.as_ref() else { return Vec::new() };
    defined_names
        .defined_names
        .iter()
        .map(|dn| DefinedNameInfo { name: dn.name.clone(), refers_to: dn.value.clone(), scope: local_sheet_id_to_scope(dn.local_sheet_id) })
        .collect()
}
