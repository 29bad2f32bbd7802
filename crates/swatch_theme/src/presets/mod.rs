//! Theme presets: the built-in catalog and the preset registry
//!
//! The registry maps a preset id to a labelled [`ThemeStyles`]. It starts out
//! with the built-in presets and can be augmented with themes the user saved,
//! fetched through a [`SavedThemeSource`].

use std::fmt::{Display, Formatter};
use std::sync::OnceLock;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::color::{Color, ColorFormat};
use crate::tokens::{StyleSet, ThemeMode, ThemeStyles, TokenKey};

/// Id of the preset a fresh editor starts from.
pub const DEFAULT_PRESET_ID: &str = "default";

/// Built-in theme preset catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BuiltinPreset {
    Default,
    Neutral,
    Slate,
    Zinc,
}

impl BuiltinPreset {
    /// Stable preset id used as the registry key.
    pub fn id(self) -> &'static str {
        match self {
            Self::Default => DEFAULT_PRESET_ID,
            Self::Neutral => "neutral",
            Self::Slate => "slate",
            Self::Zinc => "zinc",
        }
    }

    /// User-facing display name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Neutral => "Neutral",
            Self::Slate => "Slate",
            Self::Zinc => "Zinc",
        }
    }

    /// Full preset list, in catalog order.
    pub fn all() -> &'static [BuiltinPreset] {
        const PRESETS: [BuiltinPreset; 4] = [
            BuiltinPreset::Default,
            BuiltinPreset::Neutral,
            BuiltinPreset::Slate,
            BuiltinPreset::Zinc,
        ];
        &PRESETS
    }

    /// Light and dark styles for this preset, every token populated.
    pub fn styles(self) -> ThemeStyles {
        match self {
            Self::Default => ThemeStyles::new(
                build_style_set(default_light(), &DEFAULT_EXTRAS, ThemeMode::Light),
                build_style_set(default_dark(), &DEFAULT_EXTRAS, ThemeMode::Dark),
            ),
            Self::Neutral => ThemeStyles::new(
                build_style_set(neutral_light(), &SYSTEM_EXTRAS, ThemeMode::Light),
                build_style_set(neutral_dark(), &SYSTEM_EXTRAS, ThemeMode::Dark),
            ),
            Self::Slate => ThemeStyles::new(
                build_style_set(slate_light(), &SYSTEM_EXTRAS, ThemeMode::Light),
                build_style_set(slate_dark(), &SYSTEM_EXTRAS, ThemeMode::Dark),
            ),
            Self::Zinc => ThemeStyles::new(
                build_style_set(zinc_light(), &SYSTEM_EXTRAS, ThemeMode::Light),
                build_style_set(zinc_dark(), &SYSTEM_EXTRAS, ThemeMode::Dark),
            ),
        }
    }

    pub fn preset(self) -> ThemePreset {
        ThemePreset {
            label: self.display_name().to_string(),
            styles: self.styles(),
            source: PresetSource::BuiltIn,
            created_at: None,
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::all().iter().copied().find(|preset| preset.id() == id)
    }
}

impl Display for BuiltinPreset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Styles of the default preset, used wherever a token has no value.
pub fn default_theme_styles() -> &'static ThemeStyles {
    static DEFAULTS: OnceLock<ThemeStyles> = OnceLock::new();
    DEFAULTS.get_or_init(|| BuiltinPreset::Default.styles())
}

/// Where a preset came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PresetSource {
    #[default]
    BuiltIn,
    Saved,
}

/// A labelled set of styles the editor can switch to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThemePreset {
    pub label: String,
    pub styles: ThemeStyles,
    #[serde(default)]
    pub source: PresetSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl ThemePreset {
    pub fn saved(label: impl Into<String>, styles: ThemeStyles) -> Self {
        Self {
            label: label.into(),
            styles,
            source: PresetSource::Saved,
            created_at: None,
        }
    }

    pub fn is_builtin(&self) -> bool {
        self.source == PresetSource::BuiltIn
    }
}

/// A theme persisted by the user, as handed to the registry.
#[derive(Clone, Debug, PartialEq)]
pub struct SavedTheme {
    pub id: String,
    pub name: String,
    pub styles: ThemeStyles,
    pub created_at: Option<String>,
}

impl SavedTheme {
    pub fn into_preset(self) -> (String, ThemePreset) {
        let preset = ThemePreset {
            label: self.name,
            styles: self.styles,
            source: PresetSource::Saved,
            created_at: self.created_at,
        };
        (self.id, preset)
    }
}

/// Storage that can list every saved theme.
pub trait SavedThemeSource {
    type Error: std::error::Error;

    fn saved_themes(&self) -> Result<Vec<SavedTheme>, Self::Error>;
}

/// Insertion-ordered mapping from preset id to preset, built-ins first.
#[derive(Clone, Debug, PartialEq)]
pub struct PresetRegistry {
    presets: IndexMap<String, ThemePreset>,
}

impl Default for PresetRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl PresetRegistry {
    /// A registry holding exactly the built-in catalog.
    pub fn with_builtins() -> Self {
        let presets = BuiltinPreset::all()
            .iter()
            .map(|preset| (preset.id().to_string(), preset.preset()))
            .collect();
        Self { presets }
    }

    /// Insert or overwrite `id`.
    pub fn register_preset(&mut self, id: impl Into<String>, preset: ThemePreset) {
        let id = id.into();
        self.warn_if_shadowing(&id, &preset);
        debug!(preset = %id, label = %preset.label, "registering preset");
        self.presets.insert(id, preset);
    }

    /// Same overwrite semantics as [`register_preset`](Self::register_preset).
    pub fn update_preset(&mut self, id: impl Into<String>, preset: ThemePreset) {
        let id = id.into();
        self.warn_if_shadowing(&id, &preset);
        debug!(preset = %id, label = %preset.label, "updating preset");
        self.presets.insert(id, preset);
    }

    /// Remove `id`. Removing an absent id is a no-op.
    pub fn unregister_preset(&mut self, id: &str) -> Option<ThemePreset> {
        let removed = self.presets.shift_remove(id);
        if removed.is_some() {
            debug!(preset = %id, "unregistered preset");
        }
        removed
    }

    pub fn get_preset(&self, id: &str) -> Option<&ThemePreset> {
        self.presets.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.presets.contains_key(id)
    }

    /// Every preset in registry order.
    pub fn all_presets(&self) -> impl Iterator<Item = (&str, &ThemePreset)> + '_ {
        self.presets.iter().map(|(id, preset)| (id.as_str(), preset))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.presets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// Merge every saved theme from `source` into the registry.
    ///
    /// Returns the number of saved presets merged, or `None` when the fetch
    /// failed; the registry is left untouched in that case.
    pub fn load_saved_presets<S>(&mut self, source: &S) -> Option<usize>
    where
        S: SavedThemeSource + ?Sized,
    {
        let saved = match source.saved_themes() {
            Ok(saved) => saved,
            Err(err) => {
                warn!(error = %err, "failed to load saved presets");
                return None;
            }
        };

        let count = saved.len();
        for theme in saved {
            let (id, preset) = theme.into_preset();
            self.warn_if_shadowing(&id, &preset);
            self.presets.insert(id, preset);
        }
        debug!(count, total = self.presets.len(), "loaded saved presets");
        Some(count)
    }

    /// Reset to exactly the built-in catalog.
    pub fn unload_saved_presets(&mut self) {
        *self = Self::with_builtins();
        debug!("unloaded saved presets");
    }

    fn warn_if_shadowing(&self, id: &str, preset: &ThemePreset) {
        let shadows_builtin = self
            .presets
            .get(id)
            .is_some_and(|existing| existing.is_builtin() && !preset.is_builtin());
        if shadows_builtin {
            warn!(preset = %id, "saved preset replaces built-in preset with the same id");
        }
    }
}

// ============================================================================
// Built-in palettes
// ============================================================================

#[derive(Clone, Copy)]
struct BasePalette {
    background: u32,
    foreground: u32,
    card: u32,
    primary: u32,
    primary_foreground: u32,
    secondary: u32,
    muted: u32,
    muted_foreground: u32,
    accent: u32,
    destructive: u32,
    border: u32,
    ring: u32,
    sidebar: u32,
}

/// Non-colour tokens shared by both modes of a preset.
struct PresetExtras {
    font_sans: &'static str,
    font_serif: &'static str,
    font_mono: &'static str,
    radius: &'static str,
}

const DEFAULT_EXTRAS: PresetExtras = PresetExtras {
    font_sans: "Inter, ui-sans-serif, system-ui, sans-serif",
    font_serif: "\"Source Serif 4\", ui-serif, serif",
    font_mono: "\"JetBrains Mono\", ui-monospace, monospace",
    radius: "0.625rem",
};

const SYSTEM_EXTRAS: PresetExtras = PresetExtras {
    font_sans: "ui-sans-serif, system-ui, sans-serif",
    font_serif: "ui-serif, Georgia, serif",
    font_mono: "ui-monospace, SFMono-Regular, monospace",
    radius: "0.5rem",
};

const LIGHT_CHARTS: [u32; 5] = [0xE76E50, 0x2A9D90, 0x274754, 0xE8C468, 0xF4A462];
const DARK_CHARTS: [u32; 5] = [0x2662D9, 0x2EB88A, 0xE88C30, 0xAF57DB, 0xE23670];

fn hex(value: u32) -> String {
    Color::from_hex(value).format(ColorFormat::Hex)
}

fn build_style_set(base: BasePalette, extras: &PresetExtras, mode: ThemeMode) -> StyleSet {
    let (charts, shadow_opacity) = match mode {
        ThemeMode::Light => (LIGHT_CHARTS, "0.1"),
        ThemeMode::Dark => (DARK_CHARTS, "0.25"),
    };

    StyleSet::new()
        .with(TokenKey::Background, hex(base.background))
        .with(TokenKey::Foreground, hex(base.foreground))
        .with(TokenKey::Card, hex(base.card))
        .with(TokenKey::CardForeground, hex(base.foreground))
        .with(TokenKey::Popover, hex(base.card))
        .with(TokenKey::PopoverForeground, hex(base.foreground))
        .with(TokenKey::Primary, hex(base.primary))
        .with(TokenKey::PrimaryForeground, hex(base.primary_foreground))
        .with(TokenKey::Secondary, hex(base.secondary))
        .with(TokenKey::SecondaryForeground, hex(base.primary))
        .with(TokenKey::Muted, hex(base.muted))
        .with(TokenKey::MutedForeground, hex(base.muted_foreground))
        .with(TokenKey::Accent, hex(base.accent))
        .with(TokenKey::AccentForeground, hex(base.primary))
        .with(TokenKey::Destructive, hex(base.destructive))
        .with(TokenKey::DestructiveForeground, hex(0xFAFAFA))
        .with(TokenKey::Border, hex(base.border))
        .with(TokenKey::Input, hex(base.border))
        .with(TokenKey::Ring, hex(base.ring))
        .with(TokenKey::Chart1, hex(charts[0]))
        .with(TokenKey::Chart2, hex(charts[1]))
        .with(TokenKey::Chart3, hex(charts[2]))
        .with(TokenKey::Chart4, hex(charts[3]))
        .with(TokenKey::Chart5, hex(charts[4]))
        .with(TokenKey::Sidebar, hex(base.sidebar))
        .with(TokenKey::SidebarForeground, hex(base.foreground))
        .with(TokenKey::SidebarPrimary, hex(base.primary))
        .with(TokenKey::SidebarPrimaryForeground, hex(base.primary_foreground))
        .with(TokenKey::SidebarAccent, hex(base.accent))
        .with(TokenKey::SidebarAccentForeground, hex(base.primary))
        .with(TokenKey::SidebarBorder, hex(base.border))
        .with(TokenKey::SidebarRing, hex(base.ring))
        .with(TokenKey::FontSans, extras.font_sans)
        .with(TokenKey::FontSerif, extras.font_serif)
        .with(TokenKey::FontMono, extras.font_mono)
        .with(TokenKey::Radius, extras.radius)
        .with(TokenKey::ShadowColor, hex(0x000000))
        .with(TokenKey::ShadowOpacity, shadow_opacity)
        .with(TokenKey::ShadowBlur, "3px")
        .with(TokenKey::ShadowSpread, "0px")
        .with(TokenKey::ShadowOffsetX, "0")
        .with(TokenKey::ShadowOffsetY, "1px")
        .with(TokenKey::LetterSpacing, "0em")
        .with(TokenKey::Spacing, "0.25rem")
}

fn default_light() -> BasePalette {
    BasePalette {
        background: 0xFFFFFF,
        foreground: 0x0A0A0A,
        card: 0xFFFFFF,
        primary: 0x2563EB,
        primary_foreground: 0xF8FAFC,
        secondary: 0xF4F4F5,
        muted: 0xF4F4F5,
        muted_foreground: 0x71717A,
        accent: 0xF4F4F5,
        destructive: 0xDC2626,
        border: 0xE4E4E7,
        ring: 0x2563EB,
        sidebar: 0xFAFAFA,
    }
}

fn default_dark() -> BasePalette {
    BasePalette {
        background: 0x0A0A0A,
        foreground: 0xFAFAFA,
        card: 0x171717,
        primary: 0x3B82F6,
        primary_foreground: 0x0A0A0A,
        secondary: 0x27272A,
        muted: 0x27272A,
        muted_foreground: 0xA1A1AA,
        accent: 0x27272A,
        destructive: 0x991B1B,
        border: 0x27272A,
        ring: 0x3B82F6,
        sidebar: 0x171717,
    }
}

fn neutral_light() -> BasePalette {
    BasePalette {
        background: 0xFFFFFF,
        foreground: 0x0A0A0A,
        card: 0xFFFFFF,
        primary: 0x171717,
        primary_foreground: 0xFAFAFA,
        secondary: 0xF5F5F5,
        muted: 0xF5F5F5,
        muted_foreground: 0x737373,
        accent: 0xF5F5F5,
        destructive: 0xEF4444,
        border: 0xE5E5E5,
        ring: 0x0A0A0A,
        sidebar: 0xFAFAFA,
    }
}

fn neutral_dark() -> BasePalette {
    BasePalette {
        background: 0x0A0A0A,
        foreground: 0xFAFAFA,
        card: 0x0A0A0A,
        primary: 0xFAFAFA,
        primary_foreground: 0x171717,
        secondary: 0x262626,
        muted: 0x262626,
        muted_foreground: 0xA3A3A3,
        accent: 0x262626,
        destructive: 0x7F1D1D,
        border: 0x262626,
        ring: 0xD4D4D4,
        sidebar: 0x171717,
    }
}

fn slate_light() -> BasePalette {
    BasePalette {
        background: 0xFFFFFF,
        foreground: 0x020817,
        card: 0xFFFFFF,
        primary: 0x0F172A,
        primary_foreground: 0xF8FAFC,
        secondary: 0xF1F5F9,
        muted: 0xF1F5F9,
        muted_foreground: 0x64748B,
        accent: 0xF1F5F9,
        destructive: 0xEF4444,
        border: 0xE2E8F0,
        ring: 0x020817,
        sidebar: 0xF8FAFC,
    }
}

fn slate_dark() -> BasePalette {
    BasePalette {
        background: 0x020817,
        foreground: 0xF8FAFC,
        card: 0x020817,
        primary: 0xF8FAFC,
        primary_foreground: 0x0F172A,
        secondary: 0x1E293B,
        muted: 0x1E293B,
        muted_foreground: 0x94A3B8,
        accent: 0x1E293B,
        destructive: 0x7F1D1D,
        border: 0x1E293B,
        ring: 0xCBD5E1,
        sidebar: 0x0F172A,
    }
}

fn zinc_light() -> BasePalette {
    BasePalette {
        background: 0xFFFFFF,
        foreground: 0x09090B,
        card: 0xFFFFFF,
        primary: 0x18181B,
        primary_foreground: 0xFAFAFA,
        secondary: 0xF4F4F5,
        muted: 0xF4F4F5,
        muted_foreground: 0x71717A,
        accent: 0xF4F4F5,
        destructive: 0xEF4444,
        border: 0xE4E4E7,
        ring: 0x09090B,
        sidebar: 0xFAFAFA,
    }
}

fn zinc_dark() -> BasePalette {
    BasePalette {
        background: 0x09090B,
        foreground: 0xFAFAFA,
        card: 0x09090B,
        primary: 0xFAFAFA,
        primary_foreground: 0x18181B,
        secondary: 0x27272A,
        muted: 0x27272A,
        muted_foreground: 0xA1A1AA,
        accent: 0x27272A,
        destructive: 0x7F1D1D,
        border: 0x27272A,
        ring: 0xD4D4D8,
        sidebar: 0x18181B,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    struct FailingSource;

    #[derive(Debug, thiserror::Error)]
    #[error("storage offline")]
    struct Offline;

    impl SavedThemeSource for FailingSource {
        type Error = Offline;

        fn saved_themes(&self) -> Result<Vec<SavedTheme>, Offline> {
            Err(Offline)
        }
    }

    struct FixedSource(Vec<SavedTheme>);

    impl SavedThemeSource for FixedSource {
        type Error = Infallible;

        fn saved_themes(&self) -> Result<Vec<SavedTheme>, Infallible> {
            Ok(self.0.clone())
        }
    }

    fn saved(id: &str, name: &str) -> SavedTheme {
        SavedTheme {
            id: id.to_string(),
            name: name.to_string(),
            styles: BuiltinPreset::Zinc.styles(),
            created_at: Some("2026-01-01T00:00:00Z".to_string()),
        }
    }

    #[test]
    fn builtins_populate_every_token() {
        for preset in BuiltinPreset::all() {
            let styles = preset.styles();
            assert_eq!(styles.light.len(), TokenKey::all().len(), "{preset}");
            assert_eq!(styles.dark.len(), TokenKey::all().len(), "{preset}");
            assert!(styles.validate().is_ok());
        }
    }

    #[test]
    fn builtin_ids_round_trip() {
        for preset in BuiltinPreset::all() {
            assert_eq!(BuiltinPreset::from_id(preset.id()), Some(*preset));
        }
        assert_eq!(BuiltinPreset::from_id("ocean"), None);
    }

    #[test]
    fn registry_starts_with_builtins_in_order() {
        let registry = PresetRegistry::default();
        let ids: Vec<_> = registry.ids().collect();
        assert_eq!(ids, vec!["default", "neutral", "slate", "zinc"]);
    }

    #[test]
    fn failed_fetch_leaves_registry_unchanged() {
        let mut registry = PresetRegistry::default();
        assert_eq!(registry.load_saved_presets(&FailingSource), None);
        assert_eq!(registry, PresetRegistry::with_builtins());
    }

    #[test]
    fn saved_presets_append_after_builtins() {
        let mut registry = PresetRegistry::default();
        let source = FixedSource(vec![saved("a1", "Ocean"), saved("b2", "Forest")]);
        assert_eq!(registry.load_saved_presets(&source), Some(2));

        let ocean = registry.get_preset("a1").unwrap();
        assert_eq!(ocean.label, "Ocean");
        assert_eq!(ocean.source, PresetSource::Saved);
        assert_eq!(registry.ids().last(), Some("b2"));
    }

    #[test]
    fn saved_id_can_shadow_builtin_until_unload() {
        let mut registry = PresetRegistry::default();
        registry.load_saved_presets(&FixedSource(vec![saved("slate", "My Slate")]));
        assert_eq!(registry.get_preset("slate").unwrap().label, "My Slate");

        registry.unload_saved_presets();
        assert_eq!(registry.get_preset("slate").unwrap().label, "Slate");
    }

    #[test]
    fn unregister_absent_is_noop() {
        let mut registry = PresetRegistry::default();
        assert!(registry.unregister_preset("missing").is_none());
        assert_eq!(registry.len(), BuiltinPreset::all().len());
    }
}
