//! Code generation: stylesheet text and framework layout code
//!
//! Both generators are pure functions of the editor state. The same state and
//! options always produce the same bytes.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::color::{Color, ColorFormat};
use crate::fonts::extract_font_family;
use crate::state::ThemeEditorState;
use crate::tokens::{derive_shadow_scale, StyleSet, ThemeMode, TokenKey};

/// Tailwind major version the stylesheet targets
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum TailwindVersion {
    #[serde(rename = "3")]
    V3,
    #[default]
    #[serde(rename = "4")]
    V4,
}

impl Display for TailwindVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::V3 => f.write_str("3"),
            Self::V4 => f.write_str("4"),
        }
    }
}

impl FromStr for TailwindVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches(|c: char| c == 'v' || c == 'V') {
            "3" => Ok(Self::V3),
            "4" => Ok(Self::V4),
            other => Err(format!("unsupported tailwind version `{other}` (expected 3 or 4)")),
        }
    }
}

/// The radius scale exposed to utilities, derived from `--radius`.
const RADIUS_SCALE: &[(&str, &str)] = &[
    ("radius-sm", "calc(var(--radius) - 4px)"),
    ("radius-md", "calc(var(--radius) - 2px)"),
    ("radius-lg", "var(--radius)"),
    ("radius-xl", "calc(var(--radius) + 4px)"),
];

/// Stylesheet for both modes.
///
/// Tailwind 4 output is `:root`, `.dark` and an `@theme inline` block mapping
/// the variables to utilities. Tailwind 3 output wraps `:root` and `.dark` in
/// `@layer base`; with [`ColorFormat::Hsl`] colors are emitted as bare
/// channels, the form v3 configs expect. Translucent colors keep their alpha
/// as `h s% l% / a`.
pub fn generate_theme_code(
    state: &ThemeEditorState,
    format: ColorFormat,
    version: TailwindVersion,
) -> String {
    let styles = &state.styles;
    let (light, light_shadows) = mode_variables(&styles.light, ThemeMode::Light, format, version);
    let (dark, dark_shadows) = mode_variables(&styles.dark, ThemeMode::Dark, format, version);

    let mut out = String::new();
    match version {
        TailwindVersion::V4 => {
            push_block(&mut out, ":root", &light, 0);
            out.push('\n');
            push_block(&mut out, ".dark", &dark, 0);
            out.push('\n');
            let has_shadows = light_shadows || dark_shadows;
            push_block(&mut out, "@theme inline", &theme_inline(state, has_shadows), 0);
        }
        TailwindVersion::V3 => {
            out.push_str("@layer base {\n");
            push_block(&mut out, ":root", &light, 1);
            out.push('\n');
            push_block(&mut out, ".dark", &dark, 1);
            out.push_str("}\n");
        }
    }
    out
}

/// `--name: value;` pairs for one mode, tokens first then the shadow scale.
///
/// The flag reports whether the shadow scale was emitted.
fn mode_variables(
    set: &StyleSet,
    mode: ThemeMode,
    format: ColorFormat,
    version: TailwindVersion,
) -> (Vec<(String, String)>, bool) {
    let mut vars: Vec<(String, String)> = set
        .iter()
        .map(|(key, value)| {
            let rendered = if key.is_color() {
                render_color(key, value, mode, format, version)
            } else {
                value.to_string()
            };
            (key.as_str().to_string(), rendered)
        })
        .collect();

    let scale = derive_shadow_scale(set, mode);
    let has_scale = scale.is_some();
    if let Some(scale) = scale {
        vars.extend(scale.into_iter().map(|(name, value)| (name.to_string(), value)));
    }
    (vars, has_scale)
}

fn render_color(
    key: TokenKey,
    value: &str,
    mode: ThemeMode,
    format: ColorFormat,
    version: TailwindVersion,
) -> String {
    match Color::parse(value) {
        Ok(color) if version == TailwindVersion::V3 && format == ColorFormat::Hsl => {
            format!("{}{}", color.hsl_channels(), color.alpha_suffix())
        }
        Ok(color) => color.format(format),
        Err(err) => {
            warn!(token = %key, %mode, value, error = %err, "keeping unparseable color verbatim");
            value.to_string()
        }
    }
}

/// Utility mappings for the `@theme inline` block.
fn theme_inline(state: &ThemeEditorState, has_shadows: bool) -> Vec<(String, String)> {
    let styles = &state.styles;
    let present = |key: TokenKey| styles.light.contains(key) || styles.dark.contains(key);

    let mut vars: Vec<(String, String)> = TokenKey::all()
        .iter()
        .copied()
        .filter(|key| key.is_color() && *key != TokenKey::ShadowColor && present(*key))
        .map(|key| (format!("color-{key}"), format!("var(--{key})")))
        .collect();

    for key in TokenKey::fonts() {
        if present(*key) {
            vars.push((key.as_str().to_string(), format!("var(--{key})")));
        }
    }

    if present(TokenKey::Radius) {
        vars.extend(
            RADIUS_SCALE
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string())),
        );
    }

    if has_shadows {
        for name in [
            "shadow-2xs",
            "shadow-xs",
            "shadow-sm",
            "shadow",
            "shadow-md",
            "shadow-lg",
            "shadow-xl",
            "shadow-2xl",
        ] {
            vars.push((name.to_string(), format!("var(--{name})")));
        }
    }

    vars
}

fn push_block(out: &mut String, selector: &str, vars: &[(String, String)], indent: usize) {
    let pad = "  ".repeat(indent);
    out.push_str(&format!("{pad}{selector} {{\n"));
    for (name, value) in vars {
        out.push_str(&format!("{pad}  --{name}: {value};\n"));
    }
    out.push_str(&format!("{pad}}}\n"));
}

/// One web font to load in the layout.
struct LayoutFont {
    role: TokenKey,
    family: String,
}

impl LayoutFont {
    /// Loader function exported by `next/font/google`.
    fn loader(&self) -> String {
        self.family
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect()
    }

    fn binding(&self) -> &'static str {
        match self.role {
            TokenKey::FontSerif => "fontSerif",
            TokenKey::FontMono => "fontMono",
            _ => "fontSans",
        }
    }
}

/// Next.js `app/layout.tsx` loading the theme's web fonts via `next/font/google`.
///
/// Fonts are taken from the light styles. Generic families are left to the
/// platform and do not appear.
pub fn generate_layout_code(state: &ThemeEditorState) -> String {
    let fonts: Vec<LayoutFont> = TokenKey::fonts()
        .iter()
        .filter_map(|role| {
            let value = state.styles.light.resolve(*role, ThemeMode::Light);
            extract_font_family(value).map(|family| LayoutFont {
                role: *role,
                family,
            })
        })
        .collect();

    let mut loaders: Vec<String> = fonts.iter().map(LayoutFont::loader).collect();
    loaders.sort();
    loaders.dedup();

    let mut out = String::new();
    out.push_str("import type { Metadata } from \"next\";\n");
    if !loaders.is_empty() {
        out.push_str(&format!(
            "import {{ {} }} from \"next/font/google\";\n",
            loaders.join(", ")
        ));
    }
    out.push_str("import \"./globals.css\";\n\n");

    for font in &fonts {
        out.push_str(&format!(
            "const {} = {}({{\n  subsets: [\"latin\"],\n  variable: \"--{}\",\n}});\n\n",
            font.binding(),
            font.loader(),
            font.role
        ));
    }

    let mut classes: Vec<String> = fonts
        .iter()
        .map(|font| format!("${{{}.variable}}", font.binding()))
        .collect();
    classes.push("antialiased".to_string());
    let class_attr = if fonts.is_empty() {
        "\"antialiased\"".to_string()
    } else {
        format!("{{`{}`}}", classes.join(" "))
    };

    out.push_str(
        "export const metadata: Metadata = {\n  title: \"Create Next App\",\n  description: \"Generated by create next app\",\n};\n\n",
    );
    out.push_str(
        "export default function RootLayout({\n  children,\n}: Readonly<{\n  children: React.ReactNode;\n}>) {\n  return (\n    <html lang=\"en\">\n",
    );
    out.push_str(&format!("      <body className={class_attr}>\n"));
    out.push_str("        {children}\n      </body>\n    </html>\n  );\n}\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::ThemeStyles;
    use pretty_assertions::assert_eq;

    fn small_state() -> ThemeEditorState {
        let light = StyleSet::new()
            .with(TokenKey::Background, "#ffffff")
            .with(TokenKey::Primary, "rgb(255, 0, 0)")
            .with(TokenKey::Radius, "0.5rem");
        let dark = StyleSet::new()
            .with(TokenKey::Background, "#000000")
            .with(TokenKey::Primary, "not-a-color");
        ThemeEditorState {
            styles: ThemeStyles::new(light, dark),
            current_mode: ThemeMode::Light,
            preset: None,
        }
    }

    fn block<'a>(css: &'a str, selector: &str) -> &'a str {
        let start = css.find(&format!("{selector} {{")).unwrap();
        let end = css[start..].find('}').unwrap();
        &css[start..start + end + 1]
    }

    #[test]
    fn v4_layout_and_formatting() {
        let css = generate_theme_code(&small_state(), ColorFormat::Hex, TailwindVersion::V4);

        assert!(css.starts_with(
            ":root {\n  --background: #ffffff;\n  --primary: #ff0000;\n  --radius: 0.5rem;\n"
        ));
        assert!(
            css.contains("}\n\n.dark {\n  --background: #000000;\n  --primary: not-a-color;\n")
        );
        assert!(css.contains("}\n\n@theme inline {\n"));
        assert!(css.ends_with("}\n"));
    }

    #[test]
    fn theme_inline_maps_present_tokens() {
        let css = generate_theme_code(&small_state(), ColorFormat::Oklch, TailwindVersion::V4);
        let inline = block(&css, "@theme inline");

        assert!(inline.contains("--color-background: var(--background);"));
        assert!(inline.contains("--color-primary: var(--primary);"));
        assert!(!inline.contains("--color-ring"));
        assert!(inline.contains("--radius-sm: calc(var(--radius) - 4px);"));
        assert!(inline.contains("--radius-xl: calc(var(--radius) + 4px);"));
    }

    #[test]
    fn shadow_scale_follows_tokens() {
        let css = generate_theme_code(
            &ThemeEditorState::default(),
            ColorFormat::Hex,
            TailwindVersion::V4,
        );
        let root = block(&css, ":root");
        let spacing = root.find("--spacing:").unwrap();
        let shadow = root.find("--shadow-2xs:").unwrap();
        assert!(spacing < shadow);
        assert!(root.contains("--shadow-2xl:"));
        assert!(block(&css, "@theme inline").contains("--shadow-md: var(--shadow-md);"));
    }

    #[test]
    fn malformed_shadow_color_omits_scale() {
        let mut state = ThemeEditorState::default();
        for mode in [ThemeMode::Light, ThemeMode::Dark] {
            state
                .styles
                .for_mode_mut(mode)
                .set(TokenKey::ShadowColor, "mystery");
        }
        let css = generate_theme_code(&state, ColorFormat::Hex, TailwindVersion::V4);
        assert!(!css.contains("--shadow-sm"));
        assert!(css.contains("--shadow-color: mystery;"));
    }

    #[test]
    fn v3_wraps_in_layer_with_bare_hsl() {
        let css = generate_theme_code(&small_state(), ColorFormat::Hsl, TailwindVersion::V3);
        assert!(css.starts_with(
            "@layer base {\n  :root {\n    --background: 0 0% 100%;\n    --primary: 0 100% 50%;\n"
        ));
        assert!(css.contains("  }\n\n  .dark {\n"));
        assert!(!css.contains("@theme"));
        assert!(css.ends_with("  }\n}\n"));
    }

    #[test]
    fn v3_hsl_keeps_translucency() {
        let mut state = small_state();
        state.styles.light.set(TokenKey::Border, "#00000080");
        let css = generate_theme_code(&state, ColorFormat::Hsl, TailwindVersion::V3);
        assert!(css.contains("    --border: 0 0% 0% / 0.502;\n"), "{css}");
        assert!(css.contains("    --primary: 0 100% 50%;\n"));
    }

    #[test]
    fn generation_is_deterministic() {
        let state = ThemeEditorState::default();
        for format in ColorFormat::all() {
            for version in [TailwindVersion::V3, TailwindVersion::V4] {
                assert_eq!(
                    generate_theme_code(&state, *format, version),
                    generate_theme_code(&state, *format, version)
                );
            }
        }
    }

    #[test]
    fn layout_loads_web_fonts_only() {
        let code = generate_layout_code(&ThemeEditorState::default());
        assert!(code.contains(
            "import { Inter, JetBrains_Mono, Source_Serif_4 } from \"next/font/google\";"
        ));
        assert!(code.contains(
            "const fontSans = Inter({\n  subsets: [\"latin\"],\n  variable: \"--font-sans\",\n});"
        ));
        assert!(code.contains(
            "<body className={`${fontSans.variable} ${fontSerif.variable} ${fontMono.variable} antialiased`}>"
        ));
    }

    #[test]
    fn layout_without_web_fonts() {
        let mut state = ThemeEditorState::default();
        for key in TokenKey::fonts() {
            state.styles.light.set(*key, "system-ui, sans-serif");
        }
        let code = generate_layout_code(&state);
        assert!(!code.contains("next/font/google"));
        assert!(code.contains("<body className=\"antialiased\">"));
    }

    #[test]
    fn tailwind_version_parsing() {
        assert_eq!("v3".parse::<TailwindVersion>(), Ok(TailwindVersion::V3));
        assert_eq!("4".parse::<TailwindVersion>(), Ok(TailwindVersion::V4));
        assert!("5".parse::<TailwindVersion>().is_err());
    }
}
