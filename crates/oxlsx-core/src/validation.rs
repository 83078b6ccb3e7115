//! Data validation rules and `sqref` range-intersection queries.

use oxlsx_xml::worksheet::DataValidationXml;

use crate::utils::cell_ref::CellReference;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationType {
    Whole,
    Decimal,
    List,
    Date,
    Time,
    TextLength,
    Custom,
}

impl ValidationType {
    pub fn as_str(self) -> &'static str {
        match self {
            ValidationType::Whole => "whole",
            ValidationType::Decimal => "decimal",
            ValidationType::List => "list",
            ValidationType::Date => "date",
            ValidationType::Time => "time",
            ValidationType::TextLength => "textLength",
            ValidationType::Custom => "custom",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "whole" => ValidationType::Whole,
            "decimal" => ValidationType::Decimal,
            "list" => ValidationType::List,
            "date" => ValidationType::Date,
            "time" => ValidationType::Time,
            "textLength" => ValidationType::TextLength,
            "custom" => ValidationType::Custom,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationOperator {
    Between,
    NotBetween,
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
}

impl ValidationOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            ValidationOperator::Between => "between",
            ValidationOperator::NotBetween => "notBetween",
            ValidationOperator::Equal => "equal",
            ValidationOperator::NotEqual => "notEqual",
            ValidationOperator::LessThan => "lessThan",
            ValidationOperator::LessThanOrEqual => "lessThanOrEqual",
            ValidationOperator::GreaterThan => "greaterThan",
            ValidationOperator::GreaterThanOrEqual => "greaterThanOrEqual",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "between" => ValidationOperator::Between,
            "notBetween" => ValidationOperator::NotBetween,
            "equal" => ValidationOperator::Equal,
            "notEqual" => ValidationOperator::NotEqual,
            "lessThan" => ValidationOperator::LessThan,
            "lessThanOrEqual" => ValidationOperator::LessThanOrEqual,
            "greaterThan" => ValidationOperator::GreaterThan,
            "greaterThanOrEqual" => ValidationOperator::GreaterThanOrEqual,
            _ => return None,
        })
    }
}

/// A data validation rule bound to one or more ranges (`sqref`).
#[derive(Debug, Clone, PartialEq)]
pub struct DataValidation {
    pub sqref: String,
    pub validation_type: Option<ValidationType>,
    pub operator: Option<ValidationOperator>,
    pub formula1: Option<String>,
    pub formula2: Option<String>,
    pub allow_blank: bool,
    pub show_input_message: bool,
    pub show_error_message: bool,
}

impl DataValidation {
    /// Build a dropdown-list validation from an explicit set of items.
    pub fn dropdown(sqref: impl Into<String>, items: &[&str]) -> Self {
        Self {
            sqref: sqref.into(),
            validation_type: Some(ValidationType::List),
            operator: None,
            formula1: Some(format!("\"{}\"", items.join(","))),
            formula2: None,
            allow_blank: true,
            show_input_message: true,
            show_error_message: true,
        }
    }

    /// Build a whole-number-in-range validation.
    pub fn whole_number_between(sqref: impl Into<String>, min: i64, max: i64) -> Self {
        Self {
            sqref: sqref.into(),
            validation_type: Some(ValidationType::Whole),
            operator: Some(ValidationOperator::Between),
            formula1: Some(min.to_string()),
            formula2: Some(max.to_string()),
            allow_blank: true,
            show_input_message: true,
            show_error_message: true,
        }
    }

    pub fn from_xml(xml: &DataValidationXml) -> Self {
        Self {
            sqref: xml.sqref.clone(),
            validation_type: xml.validation_type.as_deref().and_then(ValidationType::parse),
            operator: xml.operator.as_deref().and_then(ValidationOperator::parse),
            formula1: xml.formula1.clone(),
            formula2: xml.formula2.clone(),
            allow_blank: xml.allow_blank.unwrap_or(false),
            show_input_message: xml.show_input_message.unwrap_or(false),
            show_error_message: xml.show_error_message.unwrap_or(false),
        }
    }

    pub fn to_xml(&self) -> DataValidationXml {
        DataValidationXml {
            validation_type: self.validation_type.map(|t| t.as_str().to_string()),
            operator: self.operator.map(|o| o.as_str().to_string()),
            allow_blank: self.allow_blank.then_some(true),
            show_input_message: self.show_input_message.then_some(true),
            show_error_message: self.show_error_message.then_some(true),
            sqref: self.sqref.clone(),
            formula1: self.formula1.clone(),
            formula2: self.formula2.clone(),
        }
    }

    /// Whether this rule's `sqref` (a space-separated list of subranges)
    /// intersects the given A1-style range.
    pub fn intersects_range(&self, range: &str) -> bool {
        let Some(query) = parse_range(range) else { return false };
        parse_sqref(&self.sqref).iter().any(|r| rects_intersect(*r, query))
    }

    /// Whether this rule's `sqref` covers a single A1-style cell.
    pub fn intersects_cell(&self, cell: &str) -> bool {
        self.intersects_range(cell)
    }
}

type Rect = (CellReference, CellReference);

fn parse_range(range: &str) -> Option<Rect> {
    match range.split_once(':') {
        Some((a, b)) => {
            let start = CellReference::parse(a).ok()?;
            let end = CellReference::parse(b).ok()?;
            Some((start, end))
        }
        None => {
            let cell = CellReference::parse(range).ok()?;
            Some((cell, cell))
        }
    }
}

fn parse_sqref(sqref: &str) -> Vec<Rect> {
    sqref.split_whitespace().filter_map(parse_range).collect()
}

fn rects_intersect(a: Rect, b: Rect) -> bool {
    let (a_min_col, a_max_col) = (a.0.col.min(a.1.col), a.0.col.max(a.1.col));
    let (a_min_row, a_max_row) = (a.0.row.min(a.1.row), a.0.row.max(a.1.row));
    let (b_min_col, b_max_col) = (b.0.col.min(b.1.col), b.0.col.max(b.1.col));
    let (b_min_row, b_max_row) = (b.0.row.min(b.1.row), b.0.row.max(b.1.row));

    a_min_col <= b_max_col && b_min_col <= a_max_col && a_min_row <= b_max_row && b_min_row <= a_max_row
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropdown_builds_quoted_list_formula() {
        let dv = DataValidation::dropdown("A1:A10", &["Yes", "No"]);
        assert_eq!(dv.formula1.as_deref(), Some("\"Yes,No\""));
        assert_eq!(dv.validation_type, Some(ValidationType::List));
    }

    #[test]
    fn single_range_intersects_overlapping_range() {
        let dv = DataValidation::whole_number_between("B2:D10", 1, 100);
        assert!(dv.intersects_range("C5:C5"));
        assert!(dv.intersects_range("A1:B2"));
        assert!(!dv.intersects_range("E1:F2"));
    }

    #[test]
    fn intersects_cell_checks_single_cell_membership() {
        let dv = DataValidation::whole_number_between("B2:D10", 1, 100);
        assert!(dv.intersects_cell("C5"));
        assert!(!dv.intersects_cell("A1"));
    }

    #[test]
    fn multi_subrange_sqref_checked_independently() {
        let dv = DataValidation { sqref: "A1:A5 C1:C5".to_string(), ..DataValidation::dropdown("", &[]) };
        assert!(dv.intersects_cell("A3"));
        assert!(dv.intersects_cell("C3"));
        assert!(!dv.intersects_cell("B3"));
    }

    #[test]
    fn xml_roundtrip_preserves_rule() {
        let dv = DataValidation::dropdown("A1:A10", &["X", "Y"]);
        let xml = dv.to_xml();
        let back = DataValidation::from_xml(&xml);
        assert_eq!(back, dv);
    }

    #[test]
    fn invalid_query_range_does_not_intersect() {
        let dv = DataValidation::whole_number_between("A1:A10", 1, 100);
        assert!(!dv.intersects_range("not-a-range"));
    }
}
