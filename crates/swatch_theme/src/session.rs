//! Editor session: one store, one preset registry, one document synchronizer
//!
//! The session is created once by the host and handed to whatever drives the
//! editor. Nothing in this crate keeps global state.

use tracing::debug;

use crate::codegen::{generate_layout_code, generate_theme_code, TailwindVersion};
use crate::color::ColorFormat;
use crate::contrast::{check_contrast, standard_pairs, ContrastResult};
use crate::import::{parse_css_input, ImportedStyles};
use crate::presets::{PresetRegistry, PresetSource, SavedThemeSource};
use crate::state::{EditorStore, Outcome, ThemeEditorState};
use crate::sync::{DocumentSink, DomSynchronizer, PersistedSnapshot};
use crate::tokens::{ThemeMode, ThemeStyles};

#[derive(Debug, Default)]
pub struct EditorSession {
    store: EditorStore,
    registry: PresetRegistry,
    synchronizer: DomSynchronizer,
}

impl EditorSession {
    /// Default theme, built-in presets only.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(registry: PresetRegistry) -> Self {
        Self {
            registry,
            ..Self::default()
        }
    }

    pub fn store(&self) -> &EditorStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut EditorStore {
        &mut self.store
    }

    pub fn registry(&self) -> &PresetRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut PresetRegistry {
        &mut self.registry
    }

    pub fn state(&self) -> &ThemeEditorState {
        self.store.state()
    }

    /// Pull saved themes into the registry. See [`PresetRegistry::load_saved_presets`].
    pub fn load_saved_presets<S>(&mut self, source: &S) -> Option<usize>
    where
        S: SavedThemeSource + ?Sized,
    {
        self.registry.load_saved_presets(source)
    }

    pub fn apply_preset(&mut self, id: &str) -> Outcome {
        self.store.apply_theme_preset(&self.registry, id)
    }

    pub fn reset_to_preset(&mut self) -> Outcome {
        self.store.reset_to_current_preset(&self.registry)
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.store.has_unsaved_changes(&self.registry)
    }

    /// Id of the active preset when it is a saved theme.
    pub fn active_saved_preset(&self) -> Option<&str> {
        let id = self.store.state().preset.as_deref()?;
        let preset = self.registry.get_preset(id)?;
        (preset.source == PresetSource::Saved).then_some(id)
    }

    /// Label of the saved theme that edits could be written back to.
    ///
    /// `Some` only while a saved preset is active and has unsaved changes.
    pub fn existing_theme_name(&self) -> Option<&str> {
        if !self.has_unsaved_changes() {
            return None;
        }
        let id = self.active_saved_preset()?;
        self.registry.get_preset(id).map(|preset| preset.label.as_str())
    }

    /// Replace the styles of both modes, keeping mode and preset.
    pub fn set_styles(&mut self, styles: ThemeStyles) {
        let next = ThemeEditorState {
            styles,
            ..self.store.state().clone()
        };
        self.store.set_theme_state(next);
    }

    /// Show a saved theme without losing the current edit.
    ///
    /// The current state goes into the checkpoint and comes back with
    /// [`end_preview`](Self::end_preview).
    pub fn preview_theme(&mut self, styles: ThemeStyles) {
        self.store.save_theme_checkpoint();
        self.set_styles(styles);
        debug!("previewing theme");
    }

    pub fn end_preview(&mut self) -> Outcome {
        self.store.restore_theme_checkpoint()
    }

    /// Take a theme into the editor; leaving the editor reverts to it.
    pub fn open_in_editor(&mut self, styles: ThemeStyles) {
        self.set_styles(styles);
        self.store.save_theme_checkpoint();
    }

    /// Start editing saved theme `id`.
    pub fn open_saved_theme(&mut self, id: impl Into<String>, styles: ThemeStyles) {
        self.store.load_theme(id, styles);
    }

    /// Parse pasted CSS and merge what was recognised.
    ///
    /// The returned value carries the diagnostics for display.
    pub fn import_css(&mut self, css: &str) -> ImportedStyles {
        let imported = parse_css_input(css);
        self.store.merge_imported(&imported);
        imported
    }

    pub fn theme_code(&self, format: ColorFormat, version: TailwindVersion) -> String {
        generate_theme_code(self.store.state(), format, version)
    }

    pub fn layout_code(&self) -> String {
        generate_layout_code(self.store.state())
    }

    /// Contrast of the standard pairs in `mode`.
    pub fn contrast(&self, mode: ThemeMode) -> Vec<ContrastResult> {
        let styles = self.store.state().styles.for_mode(mode);
        check_contrast(&standard_pairs(styles))
    }

    /// Bring `sink` in line with the current state.
    pub fn sync_document<S: DocumentSink + ?Sized>(&mut self, sink: &mut S) -> bool {
        self.synchronizer.sync(self.store.state(), sink)
    }

    /// Snapshot to persist after a change.
    pub fn snapshot(&self) -> PersistedSnapshot {
        PersistedSnapshot::from_state(self.store.state())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::{BuiltinPreset, ThemePreset};
    use crate::sync::MemoryDocument;
    use crate::tokens::TokenKey;

    #[test]
    fn preview_and_return() {
        let mut session = EditorSession::new();
        let before = session.state().clone();

        session.preview_theme(BuiltinPreset::Zinc.styles());
        assert_eq!(session.state().styles, BuiltinPreset::Zinc.styles());
        assert_eq!(session.state().preset, before.preset);

        assert!(session.end_preview().is_applied());
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn import_merges_and_reports() {
        let mut session = EditorSession::new();
        let imported = session.import_css(":root { --primary: #123456; color: red; }");

        assert_eq!(imported.diagnostics.len(), 1);
        assert_eq!(
            session.state().styles.light.get(TokenKey::Primary),
            Some("#123456")
        );
        assert!(session.has_unsaved_changes());
        assert!(session.reset_to_preset().is_applied());
        assert!(!session.has_unsaved_changes());
    }

    #[test]
    fn document_follows_mode_toggle() {
        let mut session = EditorSession::new();
        let mut doc = MemoryDocument::new();

        session.sync_document(&mut doc);
        assert!(!doc.is_dark());

        session.store_mut().toggle_mode();
        assert!(session.sync_document(&mut doc));
        assert!(doc.is_dark());
    }

    #[test]
    fn existing_theme_name_needs_a_dirty_saved_preset() {
        let mut session = EditorSession::new();
        let ocean = ThemePreset::saved("Ocean", BuiltinPreset::Slate.styles());
        session.registry_mut().register_preset("ocean", ocean);

        session
            .store_mut()
            .update_token(ThemeMode::Light, TokenKey::Primary, "#010203");
        assert!(session.has_unsaved_changes());
        assert_eq!(session.existing_theme_name(), None);

        assert!(session.apply_preset("ocean").is_applied());
        assert_eq!(session.active_saved_preset(), Some("ocean"));
        assert_eq!(session.existing_theme_name(), None);

        session
            .store_mut()
            .update_token(ThemeMode::Light, TokenKey::Primary, "#010203");
        assert_eq!(session.existing_theme_name(), Some("Ocean"));

        assert!(session.reset_to_preset().is_applied());
        assert_eq!(session.existing_theme_name(), None);
    }

    #[test]
    fn default_theme_passes_base_contrast() {
        let session = EditorSession::new();
        for mode in [ThemeMode::Light, ThemeMode::Dark] {
            let results = session.contrast(mode);
            assert_eq!(results.len(), 11);
            let base = results.iter().find(|r| r.id == "base").unwrap();
            assert!(base.passes(), "{mode}: {}", base.contrast_ratio);
        }
    }
}
