use ordered_float::OrderedFloat;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::VariantNames;

pub type Rgba = [f32; 4];

pub const BLACK: Rgba = [0.0, 0.0, 0.0, 1.0];
pub const TRANSPARENT: Rgba = [0.0, 0.0, 0.0, 0.0];

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid css color: {0}")]
pub struct ColorParseError(pub String);

/// Parse any CSS color string (named, hex, rgb(a), hsl(a)) into normalized RGBA
pub fn parse_css_color(color: &str) -> Result<Rgba, ColorParseError> {
    let parsed = color
        .parse::<css_color_parser::Color>()
        .map_err(|_| ColorParseError(color.to_string()))?;
    Ok([
        parsed.r as f32 / 255.0,
        parsed.g as f32 / 255.0,
        parsed.b as f32 / 255.0,
        parsed.a,
    ])
}

/// Format normalized RGBA as a CSS `rgb(...)` string, ignoring alpha
pub fn to_css_rgb(color: &Rgba) -> String {
    let [r, g, b, _] = color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
    format!("rgb({r},{g},{b})")
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, VariantNames)]
#[strum(serialize_all = "snake_case")]
pub enum StrokeCap {
    #[default]
    Butt,
    Round,
    Square,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, VariantNames)]
#[strum(serialize_all = "snake_case")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, VariantNames)]
#[strum(serialize_all = "snake_case")]
pub enum TextBaseline {
    #[default]
    Alphabetic,
    Top,
    Middle,
    Bottom,
    /// One full line height below the anchor (svg `dy="1em"`)
    LineTop,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FontWeight {
    Name(FontWeightNameSpec),
    Number(f32),
}

impl std::hash::Hash for FontWeight {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            Self::Name(spec) => spec.hash(state),
            Self::Number(num) => OrderedFloat::from(*num).hash(state),
        }
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::Name(FontWeightNameSpec::Normal)
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, VariantNames)]
#[strum(serialize_all = "snake_case")]
pub enum FontWeightNameSpec {
    #[default]
    Normal,
    Bold,
}
