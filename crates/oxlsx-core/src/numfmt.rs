//! Number format code lookups: built-in IDs and the date/time detection
//! heuristic used to decide whether a numeric cell should resolve to
//! [`crate::cell::CellValue::Date`] instead of `Number`.
//!
//! This module deliberately does not render display text — only enough to
//! route a raw numeric value through to the right [`crate::cell::CellValue`]
//! variant.

/// Map a built-in number format ID (0-49) to its format code string.
pub fn builtin_format_code(id: u32) -> Option<&'static str> {
    match id {
        0 => Some("General"),
        1 => Some("0"),
        2 => Some("0.00"),
        3 => Some("#,##0"),
        4 => Some("#,##0.00"),
        5 => Some("#,##0_);(#,##0)"),
        6 => Some("#,##0_);[Red](#,##0)"),
        7 => Some("#,##0.00_);(#,##0.00)"),
        8 => Some("#,##0.00_);[Red](#,##0.00)"),
        9 => Some("0%"),
        10 => Some("0.00%"),
        11 => Some("0.00E+00"),
        12 => Some("# ?/?"),
        13 => Some("# ??/??"),
        14 => Some("m/d/yyyy"),
        15 => Some("d-mmm-yy"),
        16 => Some("d-mmm"),
        17 => Some("mmm-yy"),
        18 => Some("h:mm AM/PM"),
        19 => Some("h:mm:ss AM/PM"),
        20 => Some("h:mm"),
        21 => Some("h:mm:ss"),
        22 => Some("m/d/yyyy h:mm"),
        37 => Some("#,##0_);(#,##0)"),
        38 => Some("#,##0_);[Red](#,##0)"),
        39 => Some("#,##0.00_);(#,##0.00)"),
        40 => Some("#,##0.00_);[Red](#,##0.00)"),
        41 => Some(r#"_(* #,##0_);_(* \(#,##0\);_(* "-"_);_(@_)"#),
        42 => Some(r#"_("$"* #,##0_);_("$"* \(#,##0\);_("$"* "-"_);_(@_)"#),
        43 => Some(r#"_(* #,##0.00_);_(* \(#,##0.00\);_(* "-"??_);_(@_)"#),
        44 => Some(r#"_("$"* #,##0.00_);_("$"* \(#,##0.00\);_("$"* "-"??_);_(@_)"#),
        45 => Some("mm:ss"),
        46 => Some("[h]:mm:ss"),
        47 => Some("mm:ss.0"),
        48 => Some("##0.0E+0"),
        49 => Some("@"),
        _ => None,
    }
}

/// Built-in date/time format IDs: 14-22, 45-47.
pub fn is_builtin_date_format(id: u32) -> bool {
    (14..=22).contains(&id) || (45..=47).contains(&id)
}

/// Heuristic date/time detection over a format code string: the code is
/// date-like if it contains a `y`, `d`, `h`, `s`, or `m` token outside a
/// quoted literal. A bracketed elapsed-time token such as `[mm]` still
/// counts as date-like under this heuristic.
pub fn is_date_format_code(format: &str) -> bool {
    let mut in_quotes = false;
    let mut prev_backslash = false;

    for ch in format.chars() {
        if prev_backslash {
            prev_backslash = false;
            continue;
        }
        match ch {
            '\\' => {
                prev_backslash = true;
                continue;
            }
            '"' => {
                in_quotes = !in_quotes;
                continue;
            }
            _ => {}
        }

        if in_quotes {
            continue;
        }

        let lower = ch.to_ascii_lowercase();
        if matches!(lower, 'y' | 'd' | 'h' | 's' | 'm') {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_format_code_covers_general_and_dates() {
        assert_eq!(builtin_format_code(0), Some("General"));
        assert_eq!(builtin_format_code(14), Some("m/d/yyyy"));
        assert_eq!(builtin_format_code(49), Some("@"));
        assert_eq!(builtin_format_code(163), None);
    }

    #[test]
    fn builtin_date_ids_detected() {
        assert!(is_builtin_date_format(14));
        assert!(is_builtin_date_format(22));
        assert!(is_builtin_date_format(46));
        assert!(!is_builtin_date_format(9));
        assert!(!is_builtin_date_format(0));
    }

    #[test]
    fn date_tokens_detected() {
        assert!(is_date_format_code("yyyy-mm-dd"));
        assert!(is_date_format_code("h:mm:ss"));
        assert!(is_date_format_code("m/d/yyyy"));
    }

    #[test]
    fn non_date_formats_rejected() {
        assert!(!is_date_format_code("0.00"));
        assert!(!is_date_format_code("#,##0"));
    }

    #[test]
    fn quoted_literal_month_does_not_trigger() {
        assert!(!is_date_format_code("\"month\"0"));
    }

    #[test]
    fn bracketed_elapsed_minutes_with_seconds_still_date_like() {
        assert!(is_date_format_code("[mm]:ss.0"));
    }

    #[test]
    fn bracketed_elapsed_minutes_alone_still_date_like() {
        assert!(is_date_format_code("[mm]"));
    }
}
