//! Style builder and runtime management.
//!
//! High-level, ergonomic style types that map onto the low-level XML
//! stylesheet structures in `oxlsx-xml`. Styles are registered with
//! deduplication: identical font/fill/border components share one index,
//! matching how Excel itself keeps `styles.xml` compact.

use oxlsx_xml::styles::{
    Alignment, Border, BorderSide, Borders, CellStyleXfs, CellStyles, Color, Fill, Fills, Font,
    Fonts, NumFmt, NumFmts, PatternFill, StyleSheet, Xf,
};

use crate::error::{Error, Result};

const MAX_CELL_XFS: usize = 65_430;
const CUSTOM_NUM_FMT_BASE: u32 = 164;

/// Well-known built-in number format IDs (0-163 are reserved by OOXML).
pub mod builtin_num_fmts {
    pub const GENERAL: u32 = 0;
    pub const INTEGER: u32 = 1;
    pub const DECIMAL_2: u32 = 2;
    pub const THOUSANDS: u32 = 3;
    pub const THOUSANDS_DECIMAL: u32 = 4;
    pub const PERCENT: u32 = 9;
    pub const PERCENT_DECIMAL: u32 = 10;
    pub const SCIENTIFIC: u32 = 11;
    pub const DATE_MDY: u32 = 14;
    pub const DATE_DMY: u32 = 15;
    pub const DATE_DM: u32 = 16;
    pub const DATE_MY: u32 = 17;
    pub const TIME_HM_AP: u32 = 18;
    pub const TIME_HMS_AP: u32 = 19;
    pub const TIME_HM: u32 = 20;
    pub const TIME_HMS: u32 = 21;
    pub const DATETIME: u32 = 22;
    pub const TEXT: u32 = 49;
}

/// A color, in any of the three forms OOXML allows.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleColor {
    Rgb(String),
    Theme(u32),
    Indexed(u32),
}

#[derive(Debug, Clone, Default)]
pub struct FontStyle {
    pub name: Option<String>,
    pub size: Option<f64>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub color: Option<StyleColor>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternType {
    None,
    Solid,
    Gray125,
    Other,
}

impl PatternType {
    fn as_str(self) -> &'static str {
        match self {
            PatternType::None => "none",
            PatternType::Solid => "solid",
            PatternType::Gray125 => "gray125",
            PatternType::Other => "none",
        }
    }

    fn from_str(s: &str) -> Self {
        match s {
            "solid" => PatternType::Solid,
            "gray125" => PatternType::Gray125,
            "none" => PatternType::None,
            _ => PatternType::Other,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FillStyle {
    pub pattern: Option<PatternType>,
    pub fg_color: Option<StyleColor>,
    pub bg_color: Option<StyleColor>,
}

impl FillStyle {
    /// Convenience: a solid fill using a single foreground color.
    pub fn solid(rgb: impl Into<String>) -> Self {
        Self { pattern: Some(PatternType::Solid), fg_color: Some(StyleColor::Rgb(rgb.into())), bg_color: None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderLineStyle {
    Thin,
    Medium,
    Thick,
    Dashed,
    Dotted,
    Double,
    Hair,
}

impl BorderLineStyle {
    fn as_str(self) -> &'static str {
        match self {
            BorderLineStyle::Thin => "thin",
            BorderLineStyle::Medium => "medium",
            BorderLineStyle::Thick => "thick",
            BorderLineStyle::Dashed => "dashed",
            BorderLineStyle::Dotted => "dotted",
            BorderLineStyle::Double => "double",
            BorderLineStyle::Hair => "hair",
        }
    }

    fn from_str(s: &str) -> Option<Self> {
        Some(match s {
            "thin" => BorderLineStyle::Thin,
            "medium" => BorderLineStyle::Medium,
            "thick" => BorderLineStyle::Thick,
            "dashed" => BorderLineStyle::Dashed,
            "dotted" => BorderLineStyle::Dotted,
            "double" => BorderLineStyle::Double,
            "hair" => BorderLineStyle::Hair,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone)]
pub struct BorderSideStyle {
    pub style: BorderLineStyle,
    pub color: Option<StyleColor>,
}

#[derive(Debug, Clone, Default)]
pub struct BorderStyle {
    pub left: Option<BorderSideStyle>,
    pub right: Option<BorderSideStyle>,
    pub top: Option<BorderSideStyle>,
    pub bottom: Option<BorderSideStyle>,
    pub diagonal: Option<BorderSideStyle>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalAlign {
    Left,
    Center,
    Right,
    Fill,
    Justify,
    CenterContinuous,
}

impl HorizontalAlign {
    fn as_str(self) -> &'static str {
        match self {
            HorizontalAlign::Left => "left",
            HorizontalAlign::Center => "center",
            HorizontalAlign::Right => "right",
            HorizontalAlign::Fill => "fill",
            HorizontalAlign::Justify => "justify",
            HorizontalAlign::CenterContinuous => "centerContinuous",
        }
    }

    fn from_str(s: &str) -> Option<Self> {
        Some(match s {
            "left" => HorizontalAlign::Left,
            "center" => HorizontalAlign::Center,
            "right" => HorizontalAlign::Right,
            "fill" => HorizontalAlign::Fill,
            "justify" => HorizontalAlign::Justify,
            "centerContinuous" => HorizontalAlign::CenterContinuous,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAlign {
    Top,
    Center,
    Bottom,
    Justify,
}

impl VerticalAlign {
    fn as_str(self) -> &'static str {
        match self {
            VerticalAlign::Top => "top",
            VerticalAlign::Center => "center",
            VerticalAlign::Bottom => "bottom",
            VerticalAlign::Justify => "justify",
        }
    }

    fn from_str(s: &str) -> Option<Self> {
        Some(match s {
            "top" => VerticalAlign::Top,
            "center" => VerticalAlign::Center,
            "bottom" => VerticalAlign::Bottom,
            "justify" => VerticalAlign::Justify,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct AlignmentStyle {
    pub horizontal: Option<HorizontalAlign>,
    pub vertical: Option<VerticalAlign>,
    pub wrap_text: bool,
    pub text_rotation: Option<i32>,
    pub indent: Option<u32>,
}

/// A fully composed style, as returned by [`StylesTable::cell_style`].
#[derive(Debug, Clone, Default)]
pub struct CellStyle {
    pub font: FontStyle,
    pub fill: FillStyle,
    pub border: BorderStyle,
    pub alignment: Option<AlignmentStyle>,
    pub num_fmt_id: u32,
    pub num_fmt_code: Option<String>,
}

/// A style to register: the "what to apply" half of [`CellStyle`].
#[derive(Debug, Clone, Default)]
pub struct Style {
    pub font: Option<FontStyle>,
    pub fill: Option<FillStyle>,
    pub border: Option<BorderStyle>,
    pub alignment: Option<AlignmentStyle>,
    pub num_fmt_builtin: Option<u32>,
    pub num_fmt_custom: Option<String>,
}

fn style_color_to_xml(color: &StyleColor) -> Color {
    match color {
        StyleColor::Rgb(rgb) => Color { auto: None, indexed: None, rgb: Some(rgb.clone()), theme: None, tint: None },
        StyleColor::Theme(t) => Color { auto: None, indexed: None, rgb: None, theme: Some(*t), tint: None },
        StyleColor::Indexed(i) => Color { auto: None, indexed: Some(*i), rgb: None, theme: None, tint: None },
    }
}

fn xml_color_to_style(color: &Color) -> Option<StyleColor> {
    if let Some(ref rgb) = color.rgb {
        Some(StyleColor::Rgb(rgb.clone()))
    } else if let Some(theme) = color.theme {
        Some(StyleColor::Theme(theme))
    } else {
        color.indexed.map(StyleColor::Indexed)
    }
}

fn font_style_to_xml(font: &FontStyle) -> Font {
    use oxlsx_xml::styles::{BoolVal, FontName, FontSize, Underline};
    Font {
        b: font.bold.then_some(BoolVal { val: None }),
        i: font.italic.then_some(BoolVal { val: None }),
        strike: font.strikethrough.then_some(BoolVal { val: None }),
        u: font.underline.then_some(Underline { val: None }),
        sz: font.size.map(|val| FontSize { val }),
        color: font.color.as_ref().map(style_color_to_xml),
        name: font.name.as_ref().map(|val| FontName { val: val.clone() }),
        family: None,
        scheme: None,
    }
}

fn xml_font_to_style(font: &Font) -> FontStyle {
    FontStyle {
        name: font.name.as_ref().map(|n| n.val.clone()),
        size: font.sz.as_ref().map(|s| s.val),
        bold: font.b.is_some(),
        italic: font.i.is_some(),
        underline: font.u.is_some(),
        strikethrough: font.strike.is_some(),
        color: font.color.as_ref().and_then(xml_color_to_style),
    }
}

fn fill_style_to_xml(fill: &FillStyle) -> Fill {
    Fill {
        pattern_fill: Some(PatternFill {
            pattern_type: fill.pattern.map(|p| p.as_str().to_string()),
            fg_color: fill.fg_color.as_ref().map(style_color_to_xml),
            bg_color: fill.bg_color.as_ref().map(style_color_to_xml),
        }),
    }
}

fn xml_fill_to_style(fill: &Fill) -> FillStyle {
    let Some(ref pf) = fill.pattern_fill else { return FillStyle::default() };
    FillStyle {
        pattern: pf.pattern_type.as_ref().map(|s| PatternType::from_str(s)),
        fg_color: pf.fg_color.as_ref().and_then(xml_color_to_style),
        bg_color: pf.bg_color.as_ref().and_then(xml_color_to_style),
    }
}

fn border_side_to_xml(side: &BorderSideStyle) -> BorderSide {
    BorderSide { style: Some(side.style.as_str().to_string()), color: side.color.as_ref().map(style_color_to_xml) }
}

fn xml_border_side_to_style(side: &BorderSide) -> Option<BorderSideStyle> {
    let style = BorderLineStyle::from_str(side.style.as_deref()?)?;
    Some(BorderSideStyle { style, color: side.color.as_ref().and_then(xml_color_to_style) })
}

fn border_style_to_xml(border: &BorderStyle) -> Border {
    Border {
        diagonal_up: None,
        diagonal_down: None,
        left: border.left.as_ref().map(border_side_to_xml),
        right: border.right.as_ref().map(border_side_to_xml),
        top: border.top.as_ref().map(border_side_to_xml),
        bottom: border.bottom.as_ref().map(border_side_to_xml),
        diagonal: border.diagonal.as_ref().map(border_side_to_xml),
    }
}

fn xml_border_to_style(border: &Border) -> BorderStyle {
    BorderStyle {
        left: border.left.as_ref().and_then(xml_border_side_to_style),
        right: border.right.as_ref().and_then(xml_border_side_to_style),
        top: border.top.as_ref().and_then(xml_border_side_to_style),
        bottom: border.bottom.as_ref().and_then(xml_border_side_to_style),
        diagonal: border.diagonal.as_ref().and_then(xml_border_side_to_style),
    }
}

fn alignment_style_to_xml(align: &AlignmentStyle) -> Alignment {
    Alignment {
        horizontal: align.horizontal.map(|h| h.as_str().to_string()),
        vertical: align.vertical.map(|v| v.as_str().to_string()),
        wrap_text: align.wrap_text.then_some(true),
        text_rotation: align.text_rotation,
        indent: align.indent,
    }
}

fn xml_alignment_to_style(align: &Alignment) -> AlignmentStyle {
    AlignmentStyle {
        horizontal: align.horizontal.as_deref().and_then(HorizontalAlign::from_str),
        vertical: align.vertical.as_deref().and_then(VerticalAlign::from_str),
        wrap_text: align.wrap_text.unwrap_or(false),
        text_rotation: align.text_rotation,
        indent: align.indent,
    }
}

fn fonts_equal(a: &Font, b: &Font) -> bool {
    a.b.is_some() == b.b.is_some()
        && a.i.is_some() == b.i.is_some()
        && a.strike.is_some() == b.strike.is_some()
        && a.u.is_some() == b.u.is_some()
        && a.sz == b.sz
        && a.color == b.color
        && a.name == b.name
}

fn add_or_find_font(fonts: &mut Fonts, font: &FontStyle) -> u32 {
    let xml_font = font_style_to_xml(font);
    if let Some(i) = fonts.fonts.iter().position(|existing| fonts_equal(existing, &xml_font)) {
        return i as u32;
    }
    let id = fonts.fonts.len() as u32;
    fonts.fonts.push(xml_font);
    fonts.count = Some(fonts.fonts.len() as u32);
    id
}

fn add_or_find_fill(fills: &mut Fills, fill: &FillStyle) -> u32 {
    let xml_fill = fill_style_to_xml(fill);
    if let Some(i) = fills.fills.iter().position(|existing| existing.pattern_fill == xml_fill.pattern_fill) {
        return i as u32;
    }
    let id = fills.fills.len() as u32;
    fills.fills.push(xml_fill);
    fills.count = Some(fills.fills.len() as u32);
    id
}

fn add_or_find_border(borders: &mut Borders, border: &BorderStyle) -> u32 {
    let xml_border = border_style_to_xml(border);
    if let Some(i) = borders.borders.iter().position(|existing| *existing == xml_border) {
        return i as u32;
    }
    let id = borders.borders.len() as u32;
    borders.borders.push(xml_border);
    borders.count = Some(borders.borders.len() as u32);
    id
}

fn add_or_find_num_fmt(stylesheet: &mut StyleSheet, fmt: &str) -> u32 {
    let num_fmts = stylesheet.num_fmts.get_or_insert_with(|| NumFmts { count: Some(0), num_fmts: Vec::new() });

    if let Some(nf) = num_fmts.num_fmts.iter().find(|nf| nf.format_code == fmt) {
        return nf.num_fmt_id;
    }

    let next_id = num_fmts
        .num_fmts
        .iter()
        .map(|nf| nf.num_fmt_id)
        .max()
        .map(|max_id| max_id + 1)
        .unwrap_or(CUSTOM_NUM_FMT_BASE)
        .max(CUSTOM_NUM_FMT_BASE);

    num_fmts.num_fmts.push(NumFmt { num_fmt_id: next_id, format_code: fmt.to_string() });
    num_fmts.count = Some(num_fmts.num_fmts.len() as u32);
    next_id
}

/// Runtime styles table wrapping a [`StyleSheet`], providing a
/// dedup-on-insert `add_style` and a read-side `cell_style` view.
#[derive(Debug, Clone)]
pub struct StylesTable {
    sheet: StyleSheet,
}

impl StylesTable {
    pub fn new() -> Self {
        Self { sheet: StyleSheet::default() }
    }

    pub fn from_xml(sheet: StyleSheet) -> Self {
        Self { sheet }
    }

    pub fn to_xml(&self) -> StyleSheet {
        self.sheet.clone()
    }

    /// Register a style, deduplicating its components. Returns the
    /// resulting `cellXfs` index.
    pub fn add_style(&mut self, style: &Style) -> Result<u32> {
        if self.sheet.cell_xfs.xfs.len() >= MAX_CELL_XFS {
            return Err(Error::InvalidFormat("maximum number of cell styles exceeded".to_string()));
        }

        let font_id = style.font.as_ref().map(|f| add_or_find_font(&mut self.sheet.fonts, f));
        let fill_id = style.fill.as_ref().map(|f| add_or_find_fill(&mut self.sheet.fills, f));
        let border_id = style.border.as_ref().map(|b| add_or_find_border(&mut self.sheet.borders, b));

        let num_fmt_id = if let Some(code) = &style.num_fmt_custom {
            Some(add_or_find_num_fmt(&mut self.sheet, code))
        } else {
            style.num_fmt_builtin
        };

        let xf = Xf {
            num_fmt_id,
            font_id,
            fill_id,
            border_id,
            xf_id: Some(0),
            apply_alignment: style.alignment.is_some().then_some(true),
            alignment: style.alignment.as_ref().map(alignment_style_to_xml),
        };

        if let Some(i) = self.sheet.cell_xfs.xfs.iter().position(|existing| *existing == xf) {
            return Ok(i as u32);
        }

        let id = self.sheet.cell_xfs.xfs.len() as u32;
        self.sheet.cell_xfs.xfs.push(xf);
        self.sheet.cell_xfs.count = Some(self.sheet.cell_xfs.xfs.len() as u32);
        Ok(id)
    }

    /// Compose the full [`CellStyle`] view for a `cellXfs` index.
    pub fn cell_style(&self, style_id: u32) -> Option<CellStyle> {
        let xf = self.sheet.cell_xfs.xfs.get(style_id as usize)?;

        let font = xf
            .font_id
            .and_then(|id| self.sheet.fonts.fonts.get(id as usize))
            .map(xml_font_to_style)
            .unwrap_or_default();
        let fill = xf
            .fill_id
            .and_then(|id| self.sheet.fills.fills.get(id as usize))
            .map(xml_fill_to_style)
            .unwrap_or_default();
        let border = xf
            .border_id
            .and_then(|id| self.sheet.borders.borders.get(id as usize))
            .map(xml_border_to_style)
            .unwrap_or_default();
        let alignment = xf.alignment.as_ref().map(xml_alignment_to_style);
        let num_fmt_id = xf.num_fmt_id.unwrap_or(builtin_num_fmts::GENERAL);
        let num_fmt_code = self.num_fmt_code(num_fmt_id);

        Some(CellStyle { font, fill, border, alignment, num_fmt_id, num_fmt_code })
    }

    /// Look up the format code for a number-format ID, custom or built-in.
    pub fn num_fmt_code(&self, num_fmt_id: u32) -> Option<String> {
        self.sheet
            .num_fmts
            .as_ref()
            .and_then(|nf| nf.num_fmts.iter().find(|f| f.num_fmt_id == num_fmt_id))
            .map(|f| f.format_code.clone())
            .or_else(|| crate::numfmt::builtin_format_code(num_fmt_id).map(str::to_string))
    }

    /// Whether a `cellXfs` entry's number format should be interpreted as
    /// a date/time when resolving a numeric cell value.
    pub fn is_date_format(&self, style_id: u32) -> bool {
        let Some(style) = self.cell_style(style_id) else { return false };
        match style.num_fmt_code {
            Some(code) => crate::numfmt::is_date_format_code(&code),
            None => crate::numfmt::is_builtin_date_format(style.num_fmt_id),
        }
    }
}

impl Default for StylesTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_has_default_xf_zero() {
        let table = StylesTable::new();
        assert!(table.cell_style(0).is_some());
    }

    #[test]
    fn add_style_deduplicates_identical_styles() {
        let mut table = StylesTable::new();
        let style = Style { font: Some(FontStyle { bold: true, ..Default::default() }), ..Default::default() };
        let id1 = table.add_style(&style).unwrap();
        let id2 = table.add_style(&style).unwrap();
        assert_eq!(id1, id2);
    }

    #[test]
    fn add_style_registers_distinct_fonts_separately() {
        let mut table = StylesTable::new();
        let bold = Style { font: Some(FontStyle { bold: true, ..Default::default() }), ..Default::default() };
        let italic = Style { font: Some(FontStyle { italic: true, ..Default::default() }), ..Default::default() };
        let id1 = table.add_style(&bold).unwrap();
        let id2 = table.add_style(&italic).unwrap();
        assert_ne!(id1, id2);
    }

    #[test]
    fn custom_num_fmt_starts_at_164() {
        let mut table = StylesTable::new();
        let style = Style { num_fmt_custom: Some("#,##0.00_ ".to_string()), ..Default::default() };
        let id = table.add_style(&style).unwrap();
        let cell_style = table.cell_style(id).unwrap();
        assert_eq!(cell_style.num_fmt_id, 164);
        assert_eq!(cell_style.num_fmt_code.as_deref(), Some("#,##0.00_ "));
    }

    #[test]
    fn is_date_format_detects_builtin_date_ids() {
        let mut table = StylesTable::new();
        let style = Style { num_fmt_builtin: Some(builtin_num_fmts::DATE_MDY), ..Default::default() };
        let id = table.add_style(&style).unwrap();
        assert!(table.is_date_format(id));
    }

    #[test]
    fn is_date_format_false_for_general() {
        let table = StylesTable::new();
        assert!(!table.is_date_format(0));
    }

    #[test]
    fn cell_style_out_of_range_is_none() {
        let table = StylesTable::new();
        assert!(table.cell_style(999).is_none());
    }

    #[test]
    fn xml_roundtrip_preserves_registered_style() {
        let mut table = StylesTable::new();
        let style = Style {
            font: Some(FontStyle { bold: true, name: Some("Arial".to_string()), ..Default::default() }),
            fill: Some(FillStyle::solid("FF0000")),
            ..Default::default()
        };
        let id = table.add_style(&style).unwrap();
        let xml = table.to_xml();
        let restored = StylesTable::from_xml(xml);
        let cs = restored.cell_style(id).unwrap();
        assert!(cs.font.bold);
        assert_eq!(cs.font.name.as_deref(), Some("Arial"));
    }
}
