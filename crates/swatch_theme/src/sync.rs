//! Live synchronization of the editor state to a document
//!
//! The document is abstracted behind [`DocumentSink`]: custom properties on
//! the root element, the `dark` class and font stylesheet links. The
//! synchronizer is the single writer to a sink, so it can track what it set
//! and remove what is no longer present.

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::fonts::{
    extract_font_family, font_stylesheet_url, EDITOR_FONT_WEIGHTS, INITIAL_PAINT_FONT_WEIGHTS,
};
use crate::presets::default_theme_styles;
use crate::state::ThemeEditorState;
use crate::tokens::{StyleSet, ThemeMode, TokenKey};

/// Key the editor snapshot is persisted under.
pub const STORAGE_KEY: &str = "editor-storage";

/// Root element of a document, as far as theming is concerned
pub trait DocumentSink {
    /// Set a custom property, `name` including the leading `--`.
    fn set_property(&mut self, name: &str, value: &str);

    fn remove_property(&mut self, name: &str);

    fn set_dark_class(&mut self, dark: bool);

    /// Whether a stylesheet link with this href already exists.
    fn has_stylesheet(&self, href: &str) -> bool;

    fn append_stylesheet(&mut self, href: &str);
}

/// Font stylesheet URLs already requested
#[derive(Debug, Default, Clone)]
pub struct FontCache {
    requested: FxHashSet<String>,
}

impl FontCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the stylesheet for the first family in `font_value`.
    ///
    /// Generic families and repeat requests are no-ops. Returns whether a
    /// stylesheet was appended.
    pub fn load<S: DocumentSink + ?Sized>(
        &mut self,
        font_value: &str,
        weights: &[u16],
        sink: &mut S,
    ) -> bool {
        let Some(family) = extract_font_family(font_value) else {
            return false;
        };
        let Some(url) = font_stylesheet_url(&family, weights) else {
            warn!(family = %family, "could not build font stylesheet url");
            return false;
        };

        if self.requested.contains(&url) || sink.has_stylesheet(&url) {
            self.requested.insert(url);
            return false;
        }

        debug!(family = %family, "loading font stylesheet");
        sink.append_stylesheet(&url);
        self.requested.insert(url);
        true
    }

    pub fn contains(&self, url: &str) -> bool {
        self.requested.contains(url)
    }

    pub fn len(&self) -> usize {
        self.requested.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requested.is_empty()
    }
}

/// Keeps a [`DocumentSink`] in step with the editor state
#[derive(Debug, Default)]
pub struct DomSynchronizer {
    applied: FxHashSet<TokenKey>,
    last: Option<(ThemeMode, StyleSet)>,
    fonts: FontCache,
}

impl DomSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fonts(&self) -> &FontCache {
        &self.fonts
    }

    /// Apply the active mode's tokens and load the theme's fonts.
    ///
    /// Properties are only rewritten when the active style set or the mode
    /// changed since the previous call. Returns whether they were.
    pub fn sync<S: DocumentSink + ?Sized>(
        &mut self,
        state: &ThemeEditorState,
        sink: &mut S,
    ) -> bool {
        self.load_fonts(state, sink);

        let mode = state.current_mode;
        let active = state.styles.for_mode(mode);
        let unchanged = self
            .last
            .as_ref()
            .is_some_and(|(last_mode, last_set)| *last_mode == mode && last_set.same_as(active));
        if unchanged {
            return false;
        }

        sink.set_dark_class(mode == ThemeMode::Dark);

        let mut applied = FxHashSet::default();
        for (key, value) in active.iter() {
            sink.set_property(&format!("--{key}"), value);
            applied.insert(key);
        }

        let mut removed = 0usize;
        for key in TokenKey::all() {
            if self.applied.contains(key) && !applied.contains(key) {
                sink.remove_property(&format!("--{key}"));
                removed += 1;
            }
        }

        debug!(%mode, set = applied.len(), removed, "synced theme to document");
        self.applied = applied;
        self.last = Some((mode, active.clone()));
        true
    }

    /// Fonts follow the light styles; both modes share typography.
    fn load_fonts<S: DocumentSink + ?Sized>(&mut self, state: &ThemeEditorState, sink: &mut S) {
        for key in TokenKey::fonts() {
            if let Some(value) = state.styles.light.get(*key) {
                self.fonts.load(value, EDITOR_FONT_WEIGHTS, sink);
            }
        }
    }

    /// Forget what was applied so the next sync rewrites everything.
    pub fn invalidate(&mut self) {
        self.last = None;
    }
}

/// The persisted editor snapshot.
///
/// Every level is optional so that partial or older snapshots still load.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedSnapshot {
    #[serde(default)]
    pub state: SnapshotState,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotState {
    #[serde(rename = "themeState", default, skip_serializing_if = "Option::is_none")]
    pub theme_state: Option<SnapshotTheme>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotTheme {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_mode: Option<ThemeMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<SnapshotStyles>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotStyles {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light: Option<StyleSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark: Option<StyleSet>,
}

impl PersistedSnapshot {
    pub fn from_state(state: &ThemeEditorState) -> Self {
        Self {
            state: SnapshotState {
                theme_state: Some(SnapshotTheme {
                    current_mode: Some(state.current_mode),
                    styles: Some(SnapshotStyles {
                        light: Some(state.styles.light.clone()),
                        dark: Some(state.styles.dark.clone()),
                    }),
                }),
            },
        }
    }

    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn mode(&self) -> Option<ThemeMode> {
        self.state.theme_state.as_ref()?.current_mode
    }

    /// Snapshot styles for `mode`, if present.
    pub fn styles_for(&self, mode: ThemeMode) -> Option<&StyleSet> {
        let styles = self.state.theme_state.as_ref()?.styles.as_ref()?;
        match mode {
            ThemeMode::Light => styles.light.as_ref(),
            ThemeMode::Dark => styles.dark.as_ref(),
        }
    }
}

/// First paint before the editor is running.
///
/// Reads the persisted snapshot when it parses, picks the snapshot's mode (or
/// `prefers_dark`), applies every token with compiled-in defaults for the ones
/// the snapshot lacks and requests the regular weight of each web font.
/// Missing or corrupt snapshots fall back to the defaults. Returns the mode
/// that was painted.
pub fn initial_paint<S: DocumentSink + ?Sized>(
    snapshot_json: Option<&str>,
    prefers_dark: bool,
    sink: &mut S,
) -> ThemeMode {
    let snapshot = snapshot_json.and_then(|raw| match PersistedSnapshot::parse(raw) {
        Ok(snapshot) => Some(snapshot),
        Err(err) => {
            warn!(error = %err, "ignoring unreadable theme snapshot");
            None
        }
    });

    let fallback_mode = if prefers_dark {
        ThemeMode::Dark
    } else {
        ThemeMode::Light
    };
    let mode = snapshot
        .as_ref()
        .and_then(PersistedSnapshot::mode)
        .unwrap_or(fallback_mode);

    let stored = snapshot.as_ref().and_then(|s| s.styles_for(mode));
    let defaults = default_theme_styles().for_mode(mode);

    sink.set_dark_class(mode == ThemeMode::Dark);

    for key in TokenKey::all() {
        let value = stored
            .and_then(|set| set.get(*key))
            .or_else(|| defaults.get(*key));
        if let Some(value) = value {
            sink.set_property(&format!("--{key}"), value);
        }
    }

    let mut fonts = FontCache::new();
    for key in TokenKey::fonts() {
        let value = stored
            .and_then(|set| set.get(*key))
            .or_else(|| defaults.get(*key));
        if let Some(value) = value {
            fonts.load(value, INITIAL_PAINT_FONT_WEIGHTS, sink);
        }
    }

    debug!(%mode, from_snapshot = stored.is_some(), "initial paint");
    mode
}

/// In-memory [`DocumentSink`] that renders an inline `style` attribute
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryDocument {
    properties: IndexMap<String, String>,
    dark: bool,
    stylesheets: Vec<String>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    pub fn is_dark(&self) -> bool {
        self.dark
    }

    pub fn stylesheets(&self) -> &[String] {
        &self.stylesheets
    }

    /// The root element's `style` attribute; a redefined property moves to the end.
    pub fn style_attribute(&self) -> String {
        self.properties
            .iter()
            .map(|(name, value)| format!("{name}: {value};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl DocumentSink for MemoryDocument {
    fn set_property(&mut self, name: &str, value: &str) {
        self.properties.shift_remove(name);
        self.properties.insert(name.to_string(), value.to_string());
    }

    fn remove_property(&mut self, name: &str) {
        self.properties.shift_remove(name);
    }

    fn set_dark_class(&mut self, dark: bool) {
        self.dark = dark;
    }

    fn has_stylesheet(&self, href: &str) -> bool {
        self.stylesheets.iter().any(|existing| existing == href)
    }

    fn append_stylesheet(&mut self, href: &str) {
        self.stylesheets.push(href.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn sync_applies_active_mode() {
        let mut doc = MemoryDocument::new();
        let mut sync = DomSynchronizer::new();
        let mut state = ThemeEditorState::default();
        state.current_mode = ThemeMode::Dark;

        assert!(sync.sync(&state, &mut doc));

        assert!(doc.is_dark());
        assert_eq!(
            doc.property("--background"),
            state.styles.dark.get(TokenKey::Background)
        );
        assert_eq!(doc.property_count(), TokenKey::all().len());
    }

    #[test]
    fn unchanged_state_is_skipped() {
        let mut doc = MemoryDocument::new();
        let mut sync = DomSynchronizer::new();
        let state = ThemeEditorState::default();

        assert!(sync.sync(&state, &mut doc));
        assert!(!sync.sync(&state, &mut doc));

        sync.invalidate();
        assert!(sync.sync(&state, &mut doc));
    }

    #[test]
    fn stale_properties_are_removed() {
        let mut doc = MemoryDocument::new();
        let mut sync = DomSynchronizer::new();
        let mut state = ThemeEditorState::default();
        sync.sync(&state, &mut doc);

        state.styles.light.remove(TokenKey::Chart5);
        assert!(sync.sync(&state, &mut doc));

        assert_eq!(doc.property("--chart-5"), None);
        assert_eq!(doc.property_count(), TokenKey::all().len() - 1);
    }

    #[test]
    fn fonts_load_once() {
        let mut doc = MemoryDocument::new();
        let mut sync = DomSynchronizer::new();
        let mut state = ThemeEditorState::default();

        sync.sync(&state, &mut doc);
        let first = doc.stylesheets().len();
        assert_eq!(first, 3);

        state.current_mode = ThemeMode::Dark;
        sync.sync(&state, &mut doc);
        assert_eq!(doc.stylesheets().len(), first);
        assert_eq!(sync.fonts().len(), 3);
    }

    #[test]
    fn generic_fonts_are_not_loaded() {
        let mut doc = MemoryDocument::new();
        let mut cache = FontCache::new();
        assert!(!cache.load("system-ui, sans-serif", EDITOR_FONT_WEIGHTS, &mut doc));
        assert!(cache.load("Lora, serif", EDITOR_FONT_WEIGHTS, &mut doc));
        assert!(!cache.load("'Lora'", EDITOR_FONT_WEIGHTS, &mut doc));
        assert_eq!(doc.stylesheets().len(), 1);
    }

    #[test]
    fn initial_paint_without_snapshot_uses_preference() {
        let mut doc = MemoryDocument::new();
        let mode = initial_paint(None, true, &mut doc);

        assert_eq!(mode, ThemeMode::Dark);
        assert!(doc.is_dark());
        assert_eq!(
            doc.property("--background"),
            default_theme_styles().dark.get(TokenKey::Background)
        );
        assert!(doc
            .stylesheets()
            .iter()
            .all(|href| href.contains(":wght@400&")));
    }

    #[test]
    fn initial_paint_tolerates_corrupt_snapshot() {
        let mut doc = MemoryDocument::new();
        let mode = initial_paint(Some("{not json"), false, &mut doc);
        assert_eq!(mode, ThemeMode::Light);
        assert_eq!(doc.property_count(), TokenKey::all().len());
    }

    #[test]
    fn initial_paint_merges_snapshot_with_defaults() {
        let raw = r##"{"state":{"themeState":{"currentMode":"light","styles":{"light":{"primary":"#ff0000"}}}}}"##;
        let mut doc = MemoryDocument::new();

        let mode = initial_paint(Some(raw), true, &mut doc);

        assert_eq!(mode, ThemeMode::Light);
        assert!(!doc.is_dark());
        assert_eq!(doc.property("--primary"), Some("#ff0000"));
        assert_eq!(
            doc.property("--ring"),
            default_theme_styles().light.get(TokenKey::Ring)
        );
    }

    #[test]
    fn snapshot_round_trips_state() {
        let mut state = ThemeEditorState::default();
        state.current_mode = ThemeMode::Dark;
        let json = PersistedSnapshot::from_state(&state).to_json().unwrap();

        let snapshot = PersistedSnapshot::parse(&json).unwrap();
        assert_eq!(snapshot.mode(), Some(ThemeMode::Dark));
        assert_eq!(snapshot.styles_for(ThemeMode::Dark), Some(&state.styles.dark));
        assert!(json.starts_with(r#"{"state":{"themeState":{"currentMode":"dark""#));
    }

    #[test]
    fn style_attribute_replaces_definitions() {
        let mut doc = MemoryDocument::new();
        doc.set_property("--primary", "red");
        doc.set_property("--ring", "blue");
        doc.set_property("--primary", "green");
        assert_eq!(doc.style_attribute(), "--ring: blue; --primary: green;");
    }
}
