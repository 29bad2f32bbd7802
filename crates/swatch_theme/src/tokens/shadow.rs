//! Shadow parameters and the derived shadow scale
//!
//! A theme only stores the parameters of one base shadow. The full
//! `--shadow-2xs` .. `--shadow-2xl` scale is derived from them when code is
//! generated.

use tracing::warn;

use super::key::TokenKey;
use super::style_set::{StyleSet, ThemeMode};
use crate::color::{format_number, Color, ColorFormat};

/// Base shadow as described by the `shadow-*` tokens of one mode.
#[derive(Clone, Debug, PartialEq)]
pub struct ShadowParams {
    pub color: Color,
    pub opacity: f32,
    pub blur: String,
    pub spread: String,
    pub offset_x: String,
    pub offset_y: String,
}

/// Opacity used when `shadow-opacity` is not a number.
const FALLBACK_OPACITY: f32 = 0.1;

impl ShadowParams {
    /// Read the shadow tokens, falling back to defaults for absent ones.
    ///
    /// Returns `None` when `shadow-color` is not a parseable color.
    pub fn from_style_set(set: &StyleSet, mode: ThemeMode) -> Option<Self> {
        let raw_color = set.resolve(TokenKey::ShadowColor, mode);
        let color = match Color::parse(raw_color) {
            Ok(color) => color,
            Err(err) => {
                warn!(%mode, value = raw_color, error = %err, "omitting shadow scale");
                return None;
            }
        };

        let raw_opacity = set.resolve(TokenKey::ShadowOpacity, mode);
        let opacity = raw_opacity.trim().parse::<f32>().unwrap_or_else(|_| {
            warn!(%mode, value = raw_opacity, "invalid shadow-opacity, using fallback");
            FALLBACK_OPACITY
        });

        Some(Self {
            color,
            opacity: opacity.clamp(0.0, 1.0),
            blur: set.resolve(TokenKey::ShadowBlur, mode).trim().to_string(),
            spread: set.resolve(TokenKey::ShadowSpread, mode).trim().to_string(),
            offset_x: set.resolve(TokenKey::ShadowOffsetX, mode).trim().to_string(),
            offset_y: set.resolve(TokenKey::ShadowOffsetY, mode).trim().to_string(),
        })
    }

    fn color_at(&self, multiplier: f32) -> String {
        self.color
            .with_alpha(self.opacity * multiplier)
            .format(ColorFormat::Hsl)
    }

    fn base_layer(&self, multiplier: f32) -> String {
        format!(
            "{} {} {} {} {}",
            self.offset_x,
            self.offset_y,
            self.blur,
            self.spread,
            self.color_at(multiplier)
        )
    }

    /// Second layer with a fixed y offset and blur, one pixel tighter.
    fn second_layer(&self, offset_y: &str, blur: &str) -> String {
        let spread = self
            .spread
            .trim_end_matches("px")
            .trim()
            .parse::<f64>()
            .unwrap_or(0.0);
        format!(
            "{} {} {} {}px {}",
            self.offset_x,
            offset_y,
            blur,
            format_number(spread - 1.0),
            self.color_at(1.0)
        )
    }

    /// The eight-step scale as `(variable name, value)` pairs, smallest first.
    pub fn scale(&self) -> Vec<(&'static str, String)> {
        let layered = |offset_y: &str, blur: &str| {
            format!(
                "{}, {}",
                self.base_layer(1.0),
                self.second_layer(offset_y, blur)
            )
        };

        vec![
            ("shadow-2xs", self.base_layer(0.5)),
            ("shadow-xs", self.base_layer(0.5)),
            ("shadow-sm", layered("1px", "2px")),
            ("shadow", layered("1px", "2px")),
            ("shadow-md", layered("2px", "4px")),
            ("shadow-lg", layered("4px", "6px")),
            ("shadow-xl", layered("8px", "10px")),
            ("shadow-2xl", self.base_layer(2.5)),
        ]
    }
}

/// Derived shadow scale for one mode, or `None` if the shadow color is malformed.
pub fn derive_shadow_scale(set: &StyleSet, mode: ThemeMode) -> Option<Vec<(&'static str, String)>> {
    ShadowParams::from_style_set(set, mode).map(|params| params.scale())
}
