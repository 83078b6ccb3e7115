//! Styles XML schema structures (`xl/styles.xml`).

use serde::{Deserialize, Serialize};

use crate::namespaces;

/// Stylesheet root element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename = "styleSheet")]
pub struct StyleSheet {
    #[serde(rename = "@xmlns")]
    pub xmlns: String,

    #[serde(rename = "numFmts", skip_serializing_if = "Option::is_none")]
    pub num_fmts: Option<NumFmts>,

    #[serde(rename = "fonts")]
    pub fonts: Fonts,

    #[serde(rename = "fills")]
    pub fills: Fills,

    #[serde(rename = "borders")]
    pub borders: Borders,

    #[serde(rename = "cellStyleXfs", skip_serializing_if = "Option::is_none")]
    pub cell_style_xfs: Option<CellStyleXfs>,

    #[serde(rename = "cellXfs")]
    pub cell_xfs: CellXfs,

    #[serde(rename = "cellStyles", skip_serializing_if = "Option::is_none")]
    pub cell_styles: Option<CellStyles>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumFmts {
    #[serde(rename = "@count", skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,

    #[serde(rename = "numFmt", default)]
    pub num_fmts: Vec<NumFmt>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumFmt {
    #[serde(rename = "@numFmtId")]
    pub num_fmt_id: u32,

    #[serde(rename = "@formatCode")]
    pub format_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fonts {
    #[serde(rename = "@count", skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,

    #[serde(rename = "font", default)]
    pub fonts: Vec<Font>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    #[serde(rename = "b", skip_serializing_if = "Option::is_none")]
    pub b: Option<BoolVal>,

    #[serde(rename = "i", skip_serializing_if = "Option::is_none")]
    pub i: Option<BoolVal>,

    #[serde(rename = "strike", skip_serializing_if = "Option::is_none")]
    pub strike: Option<BoolVal>,

    #[serde(rename = "u", skip_serializing_if = "Option::is_none")]
    pub u: Option<Underline>,

    #[serde(rename = "sz", skip_serializing_if = "Option::is_none")]
    pub sz: Option<FontSize>,

    #[serde(rename = "color", skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,

    #[serde(rename = "name", skip_serializing_if = "Option::is_none")]
    pub name: Option<FontName>,

    #[serde(rename = "family", skip_serializing_if = "Option::is_none")]
    pub family: Option<FontFamily>,

    #[serde(rename = "scheme", skip_serializing_if = "Option::is_none")]
    pub scheme: Option<FontScheme>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fills {
    #[serde(rename = "@count", skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,

    #[serde(rename = "fill", default)]
    pub fills: Vec<Fill>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    #[serde(rename = "patternFill", skip_serializing_if = "Option::is_none")]
    pub pattern_fill: Option<PatternFill>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternFill {
    #[serde(rename = "@patternType", skip_serializing_if = "Option::is_none")]
    pub pattern_type: Option<String>,

    #[serde(rename = "fgColor", skip_serializing_if = "Option::is_none")]
    pub fg_color: Option<Color>,

    #[serde(rename = "bgColor", skip_serializing_if = "Option::is_none")]
    pub bg_color: Option<Color>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Borders {
    #[serde(rename = "@count", skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,

    #[serde(rename = "border", default)]
    pub borders: Vec<Border>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Border {
    #[serde(rename = "@diagonalUp", skip_serializing_if = "Option::is_none")]
    pub diagonal_up: Option<bool>,

    #[serde(rename = "@diagonalDown", skip_serializing_if = "Option::is_none")]
    pub diagonal_down: Option<bool>,

    #[serde(rename = "left", skip_serializing_if = "Option::is_none")]
    pub left: Option<BorderSide>,

    #[serde(rename = "right", skip_serializing_if = "Option::is_none")]
    pub right: Option<BorderSide>,

    #[serde(rename = "top", skip_serializing_if = "Option::is_none")]
    pub top: Option<BorderSide>,

    #[serde(rename = "bottom", skip_serializing_if = "Option::is_none")]
    pub bottom: Option<BorderSide>,

    #[serde(rename = "diagonal", skip_serializing_if = "Option::is_none")]
    pub diagonal: Option<BorderSide>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorderSide {
    #[serde(rename = "@style", skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,

    #[serde(rename = "color", skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellStyleXfs {
    #[serde(rename = "@count", skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,

    #[serde(rename = "xf", default)]
    pub xfs: Vec<Xf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellXfs {
    #[serde(rename = "@count", skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,

    #[serde(rename = "xf", default)]
    pub xfs: Vec<Xf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Xf {
    #[serde(rename = "@numFmtId", skip_serializing_if = "Option::is_none")]
    pub num_fmt_id: Option<u32>,

    #[serde(rename = "@fontId", skip_serializing_if = "Option::is_none")]
    pub font_id: Option<u32>,

    #[serde(rename = "@fillId", skip_serializing_if = "Option::is_none")]
    pub fill_id: Option<u32>,

    #[serde(rename = "@borderId", skip_serializing_if = "Option::is_none")]
    pub border_id: Option<u32>,

    #[serde(rename = "@xfId", skip_serializing_if = "Option::is_none")]
    pub xf_id: Option<u32>,

    #[serde(rename = "@applyAlignment", skip_serializing_if = "Option::is_none")]
    pub apply_alignment: Option<bool>,

    #[serde(rename = "alignment", skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alignment {
    #[serde(rename = "@horizontal", skip_serializing_if = "Option::is_none")]
    pub horizontal: Option<String>,

    #[serde(rename = "@vertical", skip_serializing_if = "Option::is_none")]
    pub vertical: Option<String>,

    #[serde(rename = "@wrapText", skip_serializing_if = "Option::is_none")]
    pub wrap_text: Option<bool>,

    #[serde(rename = "@textRotation", skip_serializing_if = "Option::is_none")]
    pub text_rotation: Option<i32>,

    #[serde(rename = "@indent", skip_serializing_if = "Option::is_none")]
    pub indent: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellStyles {
    #[serde(rename = "@count", skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,

    #[serde(rename = "cellStyle", default)]
    pub cell_styles: Vec<CellStyle>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellStyle {
    #[serde(rename = "@name")]
    pub name: String,

    #[serde(rename = "@xfId")]
    pub xf_id: u32,

    #[serde(rename = "@builtinId", skip_serializing_if = "Option::is_none")]
    pub builtin_id: Option<u32>,
}

/// Color definition, shared across fonts/fills/borders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Color {
    #[serde(rename = "@auto", skip_serializing_if = "Option::is_none")]
    pub auto: Option<bool>,

    #[serde(rename = "@indexed", skip_serializing_if = "Option::is_none")]
    pub indexed: Option<u32>,

    #[serde(rename = "@rgb", skip_serializing_if = "Option::is_none")]
    pub rgb: Option<String>,

    #[serde(rename = "@theme", skip_serializing_if = "Option::is_none")]
    pub theme: Option<u32>,

    #[serde(rename = "@tint", skip_serializing_if = "Option::is_none")]
    pub tint: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoolVal {
    #[serde(rename = "@val", skip_serializing_if = "Option::is_none")]
    pub val: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Underline {
    #[serde(rename = "@val", skip_serializing_if = "Option::is_none")]
    pub val: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSize {
    #[serde(rename = "@val")]
    pub val: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontName {
    #[serde(rename = "@val")]
    pub val: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontFamily {
    #[serde(rename = "@val")]
    pub val: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontScheme {
    #[serde(rename = "@val")]
    pub val: String,
}

impl Default for StyleSheet {
    /// An Excel-compatible minimal stylesheet: one default font, the two
    /// mandatory fills, one empty border, and one `Normal` cell style.
    fn default() -> Self {
        Self {
            xmlns: namespaces::SPREADSHEET_ML.to_string(),
            num_fmts: None,
            fonts: Fonts {
                count: Some(1),
                fonts: vec![Font {
                    b: None,
                    i: None,
                    strike: None,
                    u: None,
                    sz: Some(FontSize { val: 11.0 }),
                    color: Some(Color {
                        auto: None,
                        indexed: None,
                        rgb: None,
                        theme: Some(1),
                        tint: None,
                    }),
                    name: Some(FontName {
                        val: "Calibri".to_string(),
                    }),
                    family: Some(FontFamily { val: 2 }),
                    scheme: Some(FontScheme {
                        val: "minor".to_string(),
                    }),
                }],
            },
            fills: Fills {
                count: Some(2),
                fills: vec![
                    Fill {
                        pattern_fill: Some(PatternFill {
                            pattern_type: Some("none".to_string()),
                            fg_color: None,
                            bg_color: None,
                        }),
                    },
                    Fill {
                        pattern_fill: Some(PatternFill {
                            pattern_type: Some("gray125".to_string()),
                            fg_color: None,
                            bg_color: None,
                        }),
                    },
                ],
            },
            borders: Borders {
                count: Some(1),
                borders: vec![Border {
                    diagonal_up: None,
                    diagonal_down: None,
                    left: Some(BorderSide { style: None, color: None }),
                    right: Some(BorderSide { style: None, color: None }),
                    top: Some(BorderSide { style: None, color: None }),
                    bottom: Some(BorderSide { style: None, color: None }),
                    diagonal: Some(BorderSide { style: None, color: None }),
                }],
            },
            cell_style_xfs: Some(CellStyleXfs {
                count: Some(1),
                xfs: vec![Xf {
                    num_fmt_id: Some(0),
                    font_id: Some(0),
                    fill_id: Some(0),
                    border_id: Some(0),
                    xf_id: None,
                    apply_alignment: None,
                    alignment: None,
                }],
            }),
            cell_xfs: CellXfs {
                count: Some(1),
                xfs: vec![Xf {
                    num_fmt_id: Some(0),
                    font_id: Some(0),
                    fill_id: Some(0),
                    border_id: Some(0),
                    xf_id: Some(0),
                    apply_alignment: None,
                    alignment: None,
                }],
            },
            cell_styles: Some(CellStyles {
                count: Some(1),
                cell_styles: vec![CellStyle {
                    name: "Normal".to_string(),
                    xf_id: 0,
                    builtin_id: Some(0),
                }],
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_stylesheet_has_mandatory_entries() {
        let ss = StyleSheet::default();
        assert_eq!(ss.fonts.fonts.len(), 1);
        assert_eq!(ss.fills.fills.len(), 2);
        assert_eq!(ss.borders.borders.len(), 1);
        assert_eq!(ss.cell_xfs.xfs.len(), 1);
        assert_eq!(ss.cell_styles.as_ref().unwrap().cell_styles[0].name, "Normal");
    }

    #[test]
    fn roundtrip_through_quick_xml() {
        let ss = StyleSheet::default();
        let xml = quick_xml::se::to_string(&ss).unwrap();
        let parsed: StyleSheet = quick_xml::de::from_str(&xml).unwrap();
        assert_eq!(ss, parsed);
    }

    #[test]
    fn parses_real_excel_styles_minimal() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <fonts count="1">
    <font><sz val="11"/><color theme="1"/><name val="Calibri"/><family val="2"/><scheme val="minor"/></font>
  </fonts>
  <fills count="2">
    <fill><patternFill patternType="none"/></fill>
    <fill><patternFill patternType="gray125"/></fill>
  </fills>
  <borders count="1">
    <border><left/><right/><top/><bottom/><diagonal/></border>
  </borders>
  <cellXfs count="1">
    <xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/>
  </cellXfs>
</styleSheet>"#;
        let parsed: StyleSheet = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(parsed.fonts.fonts[0].name.as_ref().unwrap().val, "Calibri");
        assert_eq!(parsed.cell_xfs.xfs[0].num_fmt_id, Some(0));
    }

    #[test]
    fn xf_with_alignment_roundtrips() {
        let xf = Xf {
            num_fmt_id: Some(0),
            font_id: Some(0),
            fill_id: Some(0),
            border_id: Some(0),
            xf_id: Some(0),
            apply_alignment: Some(true),
            alignment: Some(Alignment {
                horizontal: Some("center".to_string()),
                vertical: Some("center".to_string()),
                wrap_text: Some(true),
                text_rotation: None,
                indent: None,
            }),
        };
        let xml = quick_xml::se::to_string(&xf).unwrap();
        let parsed: Xf = quick_xml::de::from_str(&xml).unwrap();
        assert_eq!(parsed.alignment.unwrap().horizontal, Some("center".to_string()));
    }

    #[test]
    fn num_fmt_roundtrips_custom_code() {
        let nf = NumFmt {
            num_fmt_id: 164,
            format_code: "#,##0.00_ ".to_string(),
        };
        let xml = quick_xml::se::to_string(&nf).unwrap();
        let parsed: NumFmt = quick_xml::de::from_str(&xml).unwrap();
        assert_eq!(parsed.format_code, "#,##0.00_ ");
    }

    #[test]
    fn optional_sections_not_serialized_when_absent() {
        let ss = StyleSheet::default();
        let xml = quick_xml::se::to_string(&ss).unwrap();
        assert!(!xml.contains("numFmts"));
    }
}
