//! Stroke/fill attributes and the process-wide style inputs.

use egui::Color32;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use crate::shape::ShapeTag;

/// Fill paint of a shape.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Paint {
    /// Unfilled (`fill="none"`).
    #[default]
    None,
    Color(Color32),
    /// A fill string read from persisted data that no known color format
    /// matches. Kept verbatim so it survives another save.
    Unrecognized(String),
}

impl Paint {
    pub fn parse(value: &str) -> Paint {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
            return Paint::None;
        }
        match parse_color(trimmed) {
            Some(color) => Paint::Color(color),
            None => Paint::Unrecognized(trimmed.to_owned()),
        }
    }

    pub fn to_svg(&self) -> Cow<'_, str> {
        match self {
            Paint::None => Cow::Borrowed("none"),
            Paint::Color(color) => Cow::Owned(format_color(*color)),
            Paint::Unrecognized(raw) => Cow::Borrowed(raw),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Paint::None)
    }

    pub fn color(&self) -> Option<Color32> {
        match self {
            Paint::Color(color) => Some(*color),
            _ => None,
        }
    }

    /// Color to paint the interior with. Unrecognized fills show as
    /// [`FALLBACK_FILL`].
    pub fn display_color(&self) -> Option<Color32> {
        match self {
            Paint::None => None,
            Paint::Color(color) => Some(*color),
            Paint::Unrecognized(_) => Some(FALLBACK_FILL),
        }
    }
}

/// Stand-in for fills the editor cannot interpret.
pub const FALLBACK_FILL: Color32 = Color32::from_gray(160);

/// Attributes carried by every shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeStyle {
    pub stroke_color: Color32,
    pub stroke_width: f64,
    pub fill: Paint,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            stroke_color: Color32::BLACK,
            stroke_width: 2.0,
            fill: Paint::None,
        }
    }
}

/// Outcome of mirroring a selected shape's fill back into the inputs.
#[derive(Debug, Clone, PartialEq)]
pub enum FillReflection {
    /// Lines carry no fill; the fill inputs are left alone.
    NotApplicable,
    Disabled,
    Color(Color32),
    /// The shape has a fill the color input cannot represent.
    NotEditable(String),
}

/// Current stroke color/width and fill settings. They seed newly created
/// shapes and mirror the selected shape while one is selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleInputs {
    #[serde(with = "hex_color")]
    pub stroke_color: Color32,
    #[serde(with = "hex_color")]
    pub fill_color: Color32,
    pub fill_enabled: bool,
    pub stroke_width: f64,
    /// False while the selected shape's fill is in a format the color input
    /// cannot show.
    #[serde(skip, default = "default_true")]
    pub fill_editable: bool,
}

fn default_true() -> bool {
    true
}

impl Default for StyleInputs {
    fn default() -> Self {
        Self {
            stroke_color: Color32::BLACK,
            fill_color: Color32::WHITE,
            fill_enabled: false,
            stroke_width: 2.0,
            fill_editable: true,
        }
    }
}

impl StyleInputs {
    /// The fill a new shape receives right now.
    pub fn current_fill(&self) -> Paint {
        if self.fill_enabled {
            Paint::Color(self.fill_color)
        } else {
            Paint::None
        }
    }

    /// Style for a shape created by a draw gesture. Lines never get a fill and
    /// paths only receive theirs when finalized.
    pub fn style_for(&self, tag: ShapeTag) -> ShapeStyle {
        let fill = match tag {
            ShapeTag::Line | ShapeTag::Path => Paint::None,
            ShapeTag::Rect | ShapeTag::Ellipse => self.current_fill(),
        };
        ShapeStyle {
            stroke_color: self.stroke_color,
            stroke_width: self.stroke_width,
            fill,
        }
    }

    /// Copies a selected shape's attributes into the inputs.
    pub fn reflect(&mut self, tag: ShapeTag, style: &ShapeStyle) -> FillReflection {
        self.stroke_color = style.stroke_color;
        self.stroke_width = style.stroke_width;
        self.fill_editable = true;

        if tag == ShapeTag::Line {
            return FillReflection::NotApplicable;
        }
        match &style.fill {
            Paint::None => {
                self.fill_enabled = false;
                FillReflection::Disabled
            }
            Paint::Color(color) => {
                self.fill_enabled = true;
                self.fill_color = *color;
                FillReflection::Color(*color)
            }
            Paint::Unrecognized(raw) => {
                self.fill_enabled = true;
                self.fill_editable = false;
                FillReflection::NotEditable(raw.clone())
            }
        }
    }
}

const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("black", [0, 0, 0]),
    ("white", [255, 255, 255]),
    ("red", [255, 0, 0]),
    ("lime", [0, 255, 0]),
    ("green", [0, 128, 0]),
    ("blue", [0, 0, 255]),
    ("yellow", [255, 255, 0]),
    ("cyan", [0, 255, 255]),
    ("aqua", [0, 255, 255]),
    ("magenta", [255, 0, 255]),
    ("fuchsia", [255, 0, 255]),
    ("gray", [128, 128, 128]),
    ("grey", [128, 128, 128]),
    ("silver", [192, 192, 192]),
    ("maroon", [128, 0, 0]),
    ("olive", [128, 128, 0]),
    ("navy", [0, 0, 128]),
    ("purple", [128, 0, 128]),
    ("teal", [0, 128, 128]),
    ("orange", [255, 165, 0]),
];

fn hex_digit_pair(s: &str) -> Option<u8> {
    u8::from_str_radix(s, 16).ok()
}

fn parse_hex(hex: &str) -> Option<Color32> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let doubled = |i: usize| hex_digit_pair(&hex[i..i + 1].repeat(2));
    let pair = |i: usize| hex_digit_pair(&hex[i..i + 2]);
    match hex.len() {
        3 => Some(Color32::from_rgb(doubled(0)?, doubled(1)?, doubled(2)?)),
        4 => Some(Color32::from_rgba_unmultiplied(doubled(0)?, doubled(1)?, doubled(2)?, doubled(3)?)),
        6 => Some(Color32::from_rgb(pair(0)?, pair(2)?, pair(4)?)),
        8 => Some(Color32::from_rgba_unmultiplied(pair(0)?, pair(2)?, pair(4)?, pair(6)?)),
        _ => None,
    }
}

fn parse_functional(args: &str, with_alpha: bool) -> Option<Color32> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    let expected = if with_alpha { 4 } else { 3 };
    if parts.len() != expected {
        return None;
    }
    let channel = |s: &str| -> Option<u8> {
        let value: f64 = s.parse().ok()?;
        (0.0..=255.0).contains(&value).then(|| value.round() as u8)
    };
    let r = channel(parts[0])?;
    let g = channel(parts[1])?;
    let b = channel(parts[2])?;
    if with_alpha {
        let alpha: f64 = parts[3].parse().ok()?;
        if !(0.0..=1.0).contains(&alpha) {
            return None;
        }
        Some(Color32::from_rgba_unmultiplied(r, g, b, (alpha * 255.0).round() as u8))
    } else {
        Some(Color32::from_rgb(r, g, b))
    }
}

/// Parses the color notations the editor understands: `#rgb`, `#rgba`,
/// `#rrggbb`, `#rrggbbaa`, `rgb(..)`, `rgba(..)` and basic named colors.
pub fn parse_color(value: &str) -> Option<Color32> {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex);
    }

    let lower = value.to_ascii_lowercase();
    if let Some(args) = lower.strip_prefix("rgba(").and_then(|rest| rest.strip_suffix(')')) {
        return parse_functional(args, true);
    }
    if let Some(args) = lower.strip_prefix("rgb(").and_then(|rest| rest.strip_suffix(')')) {
        return parse_functional(args, false);
    }

    NAMED_COLORS
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, [r, g, b])| Color32::from_rgb(*r, *g, *b))
}

/// `#rrggbb`, with an alpha byte appended only for translucent colors.
pub fn format_color(color: Color32) -> String {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    if a == u8::MAX {
        format!("#{r:02x}{g:02x}{b:02x}")
    } else {
        format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
    }
}

/// Serde adapter storing colors as hex strings.
pub mod hex_color {
    use egui::Color32;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(color: &Color32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_color(*color))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color32, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_color(&raw).ok_or_else(|| D::Error::custom(format!("unrecognized color '{raw}'")))
    }
}
