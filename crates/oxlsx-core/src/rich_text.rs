//! Rich text run types and conversion to/from the shared-string-table XML
//! schema (`<si>`/`<r>` elements in `xl/sharedStrings.xml`).

use oxlsx_xml::shared_strings::{BoolVal, Color, FontName, FontSize, RPr, Si, Underline, VertAlign, R, T};

/// Vertical alignment of a text run relative to the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAlign {
    Superscript,
    Subscript,
}

impl VerticalAlign {
    fn as_xml_val(self) -> &'static str {
        match self {
            VerticalAlign::Superscript => "superscript",
            VerticalAlign::Subscript => "subscript",
        }
    }

    fn from_xml_val(val: &str) -> Option<Self> {
        match val {
            "superscript" => Some(VerticalAlign::Superscript),
            "subscript" => Some(VerticalAlign::Subscript),
            _ => None,
        }
    }
}

/// A single formatted text segment within a rich text cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextRun {
    pub text: String,
    pub font_name: Option<String>,
    pub font_size: Option<f64>,
    pub color: Option<String>,
    pub theme_color: Option<i32>,
    pub bold: bool,
    pub italic: bool,
    pub underline: Option<String>,
    pub strikethrough: bool,
    pub vertical_align: Option<VerticalAlign>,
}

/// An ordered sequence of [`TextRun`]s making up one rich-text cell value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RichText {
    pub runs: Vec<TextRun>,
}

impl RichText {
    pub fn new(runs: Vec<TextRun>) -> Self {
        Self { runs }
    }

    /// Concatenate every run's text, discarding formatting.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

fn needs_space_preserve(text: &str) -> bool {
    text.starts_with(' ')
        || text.ends_with(' ')
        || text.contains("  ")
        || text.contains('\n')
        || text.contains('\t')
}

fn run_to_xml(run: &TextRun) -> R {
    let has_formatting = run.bold
        || run.italic
        || run.strikethrough
        || run.font_name.is_some()
        || run.font_size.is_some()
        || run.color.is_some()
        || run.theme_color.is_some()
        || run.underline.is_some()
        || run.vertical_align.is_some();

    let r_pr = if has_formatting {
        Some(RPr {
            b: run.bold.then_some(BoolVal { val: None }),
            i: run.italic.then_some(BoolVal { val: None }),
            strike: run.strikethrough.then_some(BoolVal { val: None }),
            u: run.underline.as_ref().map(|v| Underline { val: Some(v.clone()) }),
            vert_align: run
                .vertical_align
                .map(|v| VertAlign { val: v.as_xml_val().to_string() }),
            sz: run.font_size.map(|val| FontSize { val }),
            color: (run.color.is_some() || run.theme_color.is_some()).then(|| Color {
                rgb: run.color.clone(),
                theme: run.theme_color.map(|t| t as u32),
                tint: None,
            }),
            r_font: run.font_name.as_ref().map(|val| FontName { val: val.clone() }),
        })
    } else {
        None
    };

    R {
        r_pr,
        t: T {
            xml_space: needs_space_preserve(&run.text).then(|| "preserve".to_string()),
            value: run.text.clone(),
        },
    }
}

fn xml_to_run(r: &R) -> TextRun {
    let Some(ref rpr) = r.r_pr else {
        return TextRun { text: r.t.value.clone(), ..Default::default() };
    };

    TextRun {
        text: r.t.value.clone(),
        font_name: rpr.r_font.as_ref().map(|f| f.val.clone()),
        font_size: rpr.sz.as_ref().map(|s| s.val),
        color: rpr.color.as_ref().and_then(|c| c.rgb.clone()),
        theme_color: rpr.color.as_ref().and_then(|c| c.theme).map(|t| t as i32),
        bold: rpr.b.is_some(),
        italic: rpr.i.is_some(),
        underline: rpr.u.as_ref().and_then(|u| u.val.clone()),
        strikethrough: rpr.strike.is_some(),
        vertical_align: rpr.vert_align.as_ref().and_then(|v| VerticalAlign::from_xml_val(&v.val)),
    }
}

impl From<&RichText> for Si {
    fn from(rt: &RichText) -> Self {
        Si { t: None, r: rt.runs.iter().map(run_to_xml).collect() }
    }
}

impl From<&Si> for RichText {
    fn from(si: &Si) -> Self {
        RichText { runs: si.r.iter().map(xml_to_run).collect() }
    }
}
