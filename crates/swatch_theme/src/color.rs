//! Color values, CSS color parsing and format conversion
//!
//! Theme tokens store colors as CSS text. This module turns that text into a
//! [`Color`] and renders it back in one of the supported [`ColorFormat`]s:
//!
//! - `hex`: `#rrggbb` (`#rrggbbaa` when translucent)
//! - `rgb`: `rgb(r, g, b)` / `rgba(r, g, b, a)`
//! - `hsl`: `hsl(h s% l%)` with an optional `/ a`
//! - `oklch`: `oklch(l c h)` with an optional `/ a`
//!
//! Numbers are rounded to at most four decimals so rendered output is stable.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_while1},
    character::complete::{alpha1, char, multispace0},
    combinator::{all_consuming, opt},
    number::complete::double,
    sequence::{delimited, preceded, tuple},
    IResult,
};
use serde::{Deserialize, Serialize};

/// Output format for color tokens
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorFormat {
    Hex,
    Rgb,
    Hsl,
    #[default]
    Oklch,
}

impl ColorFormat {
    pub fn all() -> &'static [ColorFormat] {
        &[
            ColorFormat::Hex,
            ColorFormat::Rgb,
            ColorFormat::Hsl,
            ColorFormat::Oklch,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hex => "hex",
            Self::Rgb => "rgb",
            Self::Hsl => "hsl",
            Self::Oklch => "oklch",
        }
    }
}

impl Display for ColorFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorFormat {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hex" => Ok(Self::Hex),
            "rgb" => Ok(Self::Rgb),
            "hsl" => Ok(Self::Hsl),
            "oklch" => Ok(Self::Oklch),
            other => Err(ColorError::UnknownFormat(other.to_string())),
        }
    }
}

/// Color parsing and conversion failures
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("empty color value")]
    Empty,

    #[error("malformed color `{0}`")]
    Malformed(String),

    #[error("unsupported color function `{0}`")]
    UnsupportedFunction(String),

    #[error("unknown color format `{0}` (expected hex, rgb, hsl or oklch)")]
    UnknownFormat(String),
}

/// RGBA color with f32 components (0.0 to 1.0), sRGB encoded
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create from u8 components (0-255)
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Create from hex value (0xRRGGBB)
    pub fn from_hex(hex: u32) -> Self {
        Self::from_rgba8(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
            255,
        )
    }

    /// Set alpha and return new color
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Convert to u8 array [r, g, b, a], rounding to nearest
    pub fn to_rgba8(&self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }

    /// Linear interpolation between two colors
    pub fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        Self {
            r: from.r + (to.r - from.r) * t,
            g: from.g + (to.g - from.g) * t,
            b: from.b + (to.b - from.b) * t,
            a: from.a + (to.a - from.a) * t,
        }
    }

    /// Build from HSL with hue in degrees and saturation/lightness in 0..1.
    pub fn from_hsl(h: f64, s: f64, l: f64) -> Self {
        let h = h.rem_euclid(360.0) / 360.0;
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);

        if s == 0.0 {
            return Self::rgb(l as f32, l as f32, l as f32);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
            if t < 0.0 {
                t += 1.0;
            }
            if t > 1.0 {
                t -= 1.0;
            }
            if t < 1.0 / 6.0 {
                p + (q - p) * 6.0 * t
            } else if t < 0.5 {
                q
            } else if t < 2.0 / 3.0 {
                p + (q - p) * (2.0 / 3.0 - t) * 6.0
            } else {
                p
            }
        }

        Self::rgb(
            hue_to_rgb(p, q, h + 1.0 / 3.0) as f32,
            hue_to_rgb(p, q, h) as f32,
            hue_to_rgb(p, q, h - 1.0 / 3.0) as f32,
        )
    }

    /// Hue in degrees, saturation and lightness in 0..1.
    pub fn to_hsl(&self) -> (f64, f64, f64) {
        let (r, g, b) = (self.r as f64, self.g as f64, self.b as f64);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;
        let d = max - min;

        if d.abs() < f64::EPSILON {
            return (0.0, 0.0, l);
        }

        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };
        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        (h * 60.0, s, l)
    }

    /// Build from OKLCH: lightness 0..1, chroma, hue in degrees.
    pub fn from_oklch(l: f64, c: f64, h: f64) -> Self {
        let hr = h.to_radians();
        let (a, b) = (c * hr.cos(), c * hr.sin());

        let l_ = l + 0.396_337_777_4 * a + 0.215_803_757_3 * b;
        let m_ = l - 0.105_561_345_8 * a - 0.063_854_172_8 * b;
        let s_ = l - 0.089_484_177_5 * a - 1.291_485_548_0 * b;

        let (l3, m3, s3) = (l_ * l_ * l_, m_ * m_ * m_, s_ * s_ * s_);

        let r = 4.076_741_662_1 * l3 - 3.307_711_591_3 * m3 + 0.230_969_929_2 * s3;
        let g = -1.268_438_004_6 * l3 + 2.609_757_401_1 * m3 - 0.341_319_396_5 * s3;
        let b = -0.004_196_086_3 * l3 - 0.703_418_614_7 * m3 + 1.707_614_701_0 * s3;

        Self::rgb(
            srgb_encode(r) as f32,
            srgb_encode(g) as f32,
            srgb_encode(b) as f32,
        )
    }

    /// Lightness 0..1, chroma, hue in degrees (0 for achromatic colors).
    pub fn to_oklch(&self) -> (f64, f64, f64) {
        let r = srgb_decode(self.r as f64);
        let g = srgb_decode(self.g as f64);
        let b = srgb_decode(self.b as f64);

        let l = 0.412_221_470_8 * r + 0.536_332_536_3 * g + 0.051_445_992_9 * b;
        let m = 0.211_903_498_2 * r + 0.680_699_545_1 * g + 0.107_396_956_6 * b;
        let s = 0.088_302_461_9 * r + 0.281_718_837_6 * g + 0.629_978_700_5 * b;

        let (l_, m_, s_) = (l.cbrt(), m.cbrt(), s.cbrt());

        let lightness = 0.210_454_255_3 * l_ + 0.793_617_785_0 * m_ - 0.004_072_046_8 * s_;
        let a = 1.977_998_495_1 * l_ - 2.428_592_205_0 * m_ + 0.450_593_709_9 * s_;
        let bb = 0.025_904_037_1 * l_ + 0.782_771_766_2 * m_ - 0.808_675_766_0 * s_;

        let chroma = (a * a + bb * bb).sqrt();
        let hue = if chroma < 1e-4 {
            0.0
        } else {
            bb.atan2(a).to_degrees().rem_euclid(360.0)
        };

        (lightness, chroma, hue)
    }

    /// WCAG 2.0 relative luminance
    pub fn relative_luminance(&self) -> f64 {
        fn channel(c: f32) -> f64 {
            let c = c.clamp(0.0, 1.0) as f64;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * channel(self.r) + 0.7152 * channel(self.g) + 0.0722 * channel(self.b)
    }

    /// Parse a CSS color expression.
    pub fn parse(input: &str) -> Result<Self, ColorError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ColorError::Empty);
        }

        if input.starts_with('#') {
            return all_consuming(parse_hex_color)(input)
                .map(|(_, color)| color)
                .map_err(|_| ColorError::Malformed(input.to_string()));
        }

        if let Ok((_, (name, args))) = all_consuming(function_call)(input) {
            return parse_function(name, args, input);
        }

        if let Some(color) = parse_named_color(input) {
            return Ok(color);
        }

        // Tailwind v3 style bare channels: `222.2 47.4% 11.2%`
        parse_bare_hsl(input).ok_or_else(|| ColorError::Malformed(input.to_string()))
    }

    /// Render in the requested format.
    pub fn format(&self, format: ColorFormat) -> String {
        match format {
            ColorFormat::Hex => {
                let [r, g, b, a] = self.to_rgba8();
                if a == 255 {
                    format!("#{r:02x}{g:02x}{b:02x}")
                } else {
                    format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
                }
            }
            ColorFormat::Rgb => {
                let [r, g, b, _] = self.to_rgba8();
                if self.is_opaque() {
                    format!("rgb({r}, {g}, {b})")
                } else {
                    format!("rgba({r}, {g}, {b}, {})", format_number(self.a as f64))
                }
            }
            ColorFormat::Hsl => format!("hsl({}{})", self.hsl_channels(), self.alpha_suffix()),
            ColorFormat::Oklch => {
                let (l, c, h) = self.to_oklch();
                format!(
                    "oklch({} {} {}{})",
                    format_number(l),
                    format_number(c),
                    format_number(h),
                    self.alpha_suffix()
                )
            }
        }
    }

    /// Bare `h s% l%` channels, as Tailwind v3 stylesheets expect.
    pub fn hsl_channels(&self) -> String {
        let (h, s, l) = self.to_hsl();
        format!(
            "{} {}% {}%",
            format_number(h),
            format_number(s * 100.0),
            format_number(l * 100.0)
        )
    }

    /// ` / a` for translucent colors, empty otherwise.
    pub(crate) fn alpha_suffix(&self) -> String {
        if self.is_opaque() {
            String::new()
        } else {
            format!(" / {}", format_number(self.a as f64))
        }
    }
}

/// Strictly convert a CSS color expression into `format`.
pub fn convert_color(value: &str, format: ColorFormat) -> Result<String, ColorError> {
    Color::parse(value).map(|color| color.format(format))
}

/// Bare `h s% l%` channels of `color`, the Tailwind v3 variable form.
pub fn format_hsl_channels(color: &Color) -> String {
    color.hsl_channels()
}

/// WCAG contrast ratio between two colors (1.0 to 21.0).
pub fn contrast_ratio(a: &Color, b: &Color) -> f64 {
    let l1 = a.relative_luminance();
    let l2 = b.relative_luminance();
    let (lighter, darker) = if l1 >= l2 { (l1, l2) } else { (l2, l1) };
    (lighter + 0.05) / (darker + 0.05)
}

/// [`contrast_ratio`] for two CSS color expressions.
pub fn contrast_ratio_str(foreground: &str, background: &str) -> Result<f64, ColorError> {
    let fg = Color::parse(foreground)?;
    let bg = Color::parse(background)?;
    Ok(contrast_ratio(&fg, &bg))
}

/// Round to four decimals and trim trailing zeros.
pub(crate) fn format_number(value: f64) -> String {
    let mut s = format!("{value:.4}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

fn srgb_decode(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn srgb_encode(c: f64) -> f64 {
    let c = c.clamp(0.0, 1.0);
    if c <= 0.003_130_8 {
        12.92 * c
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

// ============================================================================
// Parsers
// ============================================================================

/// Parse hex color: #RGB, #RGBA, #RRGGBB or #RRGGBBAA
fn parse_hex_color(input: &str) -> IResult<&str, Color> {
    let (rest, _) = char('#')(input)?;
    let (rest, hex) = take_while1(|c: char| c.is_ascii_hexdigit())(rest)?;

    let digit = |s: &str| u8::from_str_radix(s, 16).unwrap_or(0);
    let short = |i: usize| digit(&hex[i..i + 1].repeat(2));
    let long = |i: usize| digit(&hex[i..i + 2]);

    let color = match hex.len() {
        3 => Color::from_rgba8(short(0), short(1), short(2), 255),
        4 => Color::from_rgba8(short(0), short(1), short(2), short(3)),
        6 => Color::from_rgba8(long(0), long(2), long(4), 255),
        8 => Color::from_rgba8(long(0), long(2), long(4), long(6)),
        _ => {
            return Err(nom::Err::Error(nom::error::Error::new(
                input,
                nom::error::ErrorKind::LengthValue,
            )))
        }
    };

    Ok((rest, color))
}

/// `name( args )`
fn function_call(input: &str) -> IResult<&str, (&str, &str)> {
    let (input, name) = alpha1(input)?;
    let (input, _) = multispace0(input)?;
    let (input, args) = delimited(
        char('('),
        take_while1(|c: char| c != '(' && c != ')'),
        char(')'),
    )(input)?;
    Ok((input, (name, args)))
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Unit {
    None,
    Percent,
    Deg,
    Rad,
    Turn,
}

#[derive(Clone, Copy, Debug)]
struct Component {
    value: f64,
    unit: Unit,
}

impl Component {
    /// Interpret as a 0..1 fraction where `scale` is the unitless maximum.
    fn fraction(self, scale: f64) -> f64 {
        match self.unit {
            Unit::Percent => self.value / 100.0,
            _ => self.value / scale,
        }
    }

    fn degrees(self) -> f64 {
        match self.unit {
            Unit::Rad => self.value.to_degrees(),
            Unit::Turn => self.value * 360.0,
            _ => self.value,
        }
    }
}

fn component(input: &str) -> IResult<&str, Component> {
    let (input, value) = double(input)?;
    let (input, unit) = opt(alt((
        tag("%"),
        tag_no_case("deg"),
        tag_no_case("rad"),
        tag_no_case("turn"),
    )))(input)?;
    let unit = match unit.map(str::to_ascii_lowercase).as_deref() {
        Some("%") => Unit::Percent,
        Some("deg") => Unit::Deg,
        Some("rad") => Unit::Rad,
        Some("turn") => Unit::Turn,
        _ => Unit::None,
    };
    Ok((input, Component { value, unit }))
}

/// Split function arguments on commas, whitespace and `/`.
fn components(args: &str) -> Option<Vec<Component>> {
    args.split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| all_consuming(component)(part).ok().map(|(_, c)| c))
        .collect()
}

fn alpha_of(parts: &[Component]) -> f32 {
    parts
        .get(3)
        .map(|a| a.fraction(1.0).clamp(0.0, 1.0) as f32)
        .unwrap_or(1.0)
}

fn parse_function(name: &str, args: &str, original: &str) -> Result<Color, ColorError> {
    let malformed = || ColorError::Malformed(original.to_string());
    let parts = components(args).ok_or_else(malformed)?;
    if parts.len() != 3 && parts.len() != 4 {
        return Err(malformed());
    }
    let alpha = alpha_of(&parts);

    let color = match name.to_ascii_lowercase().as_str() {
        "rgb" | "rgba" => Color::rgba(
            parts[0].fraction(255.0).clamp(0.0, 1.0) as f32,
            parts[1].fraction(255.0).clamp(0.0, 1.0) as f32,
            parts[2].fraction(255.0).clamp(0.0, 1.0) as f32,
            alpha,
        ),
        "hsl" | "hsla" => Color::from_hsl(
            parts[0].degrees(),
            parts[1].fraction(100.0),
            parts[2].fraction(100.0),
        )
        .with_alpha(alpha),
        "oklch" => {
            let l = match parts[0].unit {
                Unit::Percent => parts[0].value / 100.0,
                _ if parts[0].value > 1.0 => parts[0].value / 100.0,
                _ => parts[0].value,
            };
            let c = match parts[1].unit {
                Unit::Percent => parts[1].value / 100.0 * 0.4,
                _ => parts[1].value,
            };
            Color::from_oklch(l, c, parts[2].degrees()).with_alpha(alpha)
        }
        other => return Err(ColorError::UnsupportedFunction(other.to_string())),
    };

    Ok(color)
}

/// `h s% l%` with an optional `/ alpha`, as used by Tailwind v3 themes.
fn parse_bare_hsl(input: &str) -> Option<Color> {
    let (_, (h, _, s, _, l, alpha)) = all_consuming(tuple((
        component,
        multispace0,
        component,
        multispace0,
        component,
        opt(preceded(
            delimited(multispace0, char('/'), multispace0),
            component,
        )),
    )))(input)
    .ok()?;

    if s.unit != Unit::Percent || l.unit != Unit::Percent {
        return None;
    }

    let alpha = alpha
        .map(|a| a.fraction(1.0).clamp(0.0, 1.0) as f32)
        .unwrap_or(1.0);
    Some(Color::from_hsl(h.degrees(), s.value / 100.0, l.value / 100.0).with_alpha(alpha))
}

fn parse_named_color(name: &str) -> Option<Color> {
    let color = match name.to_ascii_lowercase().as_str() {
        "black" => Color::BLACK,
        "white" => Color::WHITE,
        "transparent" => Color::TRANSPARENT,
        "red" => Color::from_hex(0xFF0000),
        "green" => Color::from_hex(0x008000),
        "blue" => Color::from_hex(0x0000FF),
        "yellow" => Color::from_hex(0xFFFF00),
        "cyan" | "aqua" => Color::from_hex(0x00FFFF),
        "magenta" | "fuchsia" => Color::from_hex(0xFF00FF),
        "gray" | "grey" => Color::from_hex(0x808080),
        "orange" => Color::from_hex(0xFFA500),
        "purple" => Color::from_hex(0x800080),
        _ => return None,
    };
    Some(color)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.005
    }

    #[test]
    fn parse_hex_forms() {
        assert_eq!(Color::parse("#fff").unwrap(), Color::WHITE);
        assert_eq!(Color::parse("#000000").unwrap(), Color::BLACK);
        let c = Color::parse("#ff000080").unwrap();
        assert_eq!(c.to_rgba8(), [255, 0, 0, 128]);
        assert!(Color::parse("#12345").is_err());
        assert!(Color::parse("#gg0000").is_err());
    }

    #[test]
    fn parse_rgb_comma_and_space_syntax() {
        let a = Color::parse("rgb(255, 128, 0)").unwrap();
        let b = Color::parse("rgb(255 128 0)").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_rgba8(), [255, 128, 0, 255]);

        let c = Color::parse("rgba(0, 0, 0, 0.5)").unwrap();
        assert!(close(c.a, 0.5));
        let d = Color::parse("rgb(0 0 0 / 25%)").unwrap();
        assert!(close(d.a, 0.25));
    }

    #[test]
    fn parse_hsl() {
        let red = Color::parse("hsl(0 100% 50%)").unwrap();
        assert_eq!(red.to_rgba8(), [255, 0, 0, 255]);
        let blue = Color::parse("hsla(240deg, 100%, 50%, 1)").unwrap();
        assert_eq!(blue.to_rgba8(), [0, 0, 255, 255]);
    }

    #[test]
    fn parse_bare_tailwind_v3_channels() {
        let c = Color::parse("0 0% 100%").unwrap();
        assert_eq!(c.to_rgba8(), [255, 255, 255, 255]);
        assert!(Color::parse("1 2 3").is_err());
    }

    #[test]
    fn parse_oklch() {
        let white = Color::parse("oklch(1 0 0)").unwrap();
        assert_eq!(white.to_rgba8(), [255, 255, 255, 255]);
        let black = Color::parse("oklch(0% 0 0)").unwrap();
        assert_eq!(black.to_rgba8(), [0, 0, 0, 255]);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(Color::parse("  "), Err(ColorError::Empty));
        assert!(Color::parse("not-a-color").is_err());
        assert!(matches!(
            Color::parse("lab(50 20 30)"),
            Err(ColorError::UnsupportedFunction(_))
        ));
        assert!(Color::parse("rgb(1, 2)").is_err());
    }

    #[test]
    fn format_each_style() {
        let c = Color::from_hex(0xFF8000);
        assert_eq!(c.format(ColorFormat::Hex), "#ff8000");
        assert_eq!(c.format(ColorFormat::Rgb), "rgb(255, 128, 0)");
        assert!(c.format(ColorFormat::Hsl).starts_with("hsl(30.1176 100% 50%"));
        assert!(c.format(ColorFormat::Oklch).starts_with("oklch(0.7"));

        let translucent = Color::BLACK.with_alpha(0.5);
        assert_eq!(translucent.format(ColorFormat::Hex), "#00000080");
        assert_eq!(translucent.format(ColorFormat::Rgb), "rgba(0, 0, 0, 0.5)");
        assert_eq!(translucent.format(ColorFormat::Hsl), "hsl(0 0% 0% / 0.5)");
    }

    #[test]
    fn oklch_of_white_and_black() {
        assert_eq!(Color::WHITE.format(ColorFormat::Oklch), "oklch(1 0 0)");
        assert_eq!(Color::BLACK.format(ColorFormat::Oklch), "oklch(0 0 0)");
    }

    #[test]
    fn hex_survives_every_format() {
        for hex in ["#1e66f5", "#0a0a0a", "#fafafa", "#ef4444", "#22c55e"] {
            let original = Color::parse(hex).unwrap();
            for format in ColorFormat::all() {
                let rendered = original.format(*format);
                let reparsed = Color::parse(&rendered).unwrap();
                assert_eq!(
                    reparsed.format(ColorFormat::Hex),
                    hex,
                    "{hex} via {format}: {rendered}"
                );
            }
        }
    }

    #[test]
    fn contrast_extremes() {
        let ratio = contrast_ratio(&Color::WHITE, &Color::BLACK);
        assert!((ratio - 21.0).abs() < 0.01);
        let c = Color::from_hex(0x1E66F5);
        assert!((contrast_ratio(&c, &c) - 1.0).abs() < 1e-9);
        assert_eq!(
            contrast_ratio(&Color::BLACK, &Color::WHITE),
            contrast_ratio(&Color::WHITE, &Color::BLACK)
        );
    }

    #[test]
    fn contrast_from_css_text() {
        let ratio = contrast_ratio_str("#ffffff", "oklch(0 0 0)").unwrap();
        assert!((ratio - 21.0).abs() < 0.01);
        assert!(contrast_ratio_str("nope", "#fff").is_err());
    }

    #[test]
    fn format_number_trims() {
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(0.12345), "0.1235");
        assert_eq!(format_number(-0.00001), "0");
        assert_eq!(format_number(96.1), "96.1");
    }

    #[test]
    fn color_format_from_str() {
        assert_eq!("OKLCH".parse::<ColorFormat>(), Ok(ColorFormat::Oklch));
        assert!("cmyk".parse::<ColorFormat>().is_err());
    }
}
