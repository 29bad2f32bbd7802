//! Editor state store
//!
//! [`EditorStore`] owns the theme being edited: styles for both modes, the
//! active mode, the preset the styles came from and a single checkpoint slot
//! used to revert when the user navigates away without saving.
//!
//! Operations that reference something that may have gone away (a preset id,
//! the checkpoint) never fail. They report [`Outcome::Skipped`] instead.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::import::ImportedStyles;
use crate::presets::{default_theme_styles, PresetRegistry, DEFAULT_PRESET_ID};
use crate::tokens::{ThemeMode, ThemeStyles, TokenKey};

/// The editable theme
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeEditorState {
    pub styles: ThemeStyles,
    pub current_mode: ThemeMode,
    #[serde(default)]
    pub preset: Option<String>,
}

impl Default for ThemeEditorState {
    fn default() -> Self {
        Self {
            styles: default_theme_styles().clone(),
            current_mode: ThemeMode::Light,
            preset: Some(DEFAULT_PRESET_ID.to_string()),
        }
    }
}

/// Why an operation did nothing
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The referenced preset is not in the registry.
    UnknownPreset(String),
    /// The state does not reference a preset.
    NoActivePreset,
    /// No checkpoint has been saved.
    NoCheckpoint,
}

/// Result of an operation that may be a no-op
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
pub enum Outcome {
    Applied,
    Skipped(SkipReason),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

#[derive(Debug, Default)]
pub struct EditorStore {
    state: ThemeEditorState,
    checkpoint: Option<ThemeEditorState>,
    revision: u64,
}

impl EditorStore {
    /// Store holding the default theme.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: ThemeEditorState) -> Self {
        Self {
            state,
            checkpoint: None,
            revision: 0,
        }
    }

    pub fn state(&self) -> &ThemeEditorState {
        &self.state
    }

    pub fn current_mode(&self) -> ThemeMode {
        self.state.current_mode
    }

    /// Incremented by every mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn has_checkpoint(&self) -> bool {
        self.checkpoint.is_some()
    }

    /// Replace the whole state.
    pub fn set_theme_state(&mut self, next: ThemeEditorState) {
        self.state = next;
        self.revision += 1;
        debug!(
            revision = self.revision,
            mode = %self.state.current_mode,
            preset = ?self.state.preset,
            "theme state replaced"
        );
    }

    /// Switch to the styles of preset `id`.
    pub fn apply_theme_preset(&mut self, registry: &PresetRegistry, id: &str) -> Outcome {
        let Some(preset) = registry.get_preset(id) else {
            debug!(preset = %id, "apply skipped: unknown preset");
            return Outcome::Skipped(SkipReason::UnknownPreset(id.to_string()));
        };

        let next = ThemeEditorState {
            styles: preset.styles.clone(),
            current_mode: self.state.current_mode,
            preset: Some(id.to_string()),
        };
        self.set_theme_state(next);
        Outcome::Applied
    }

    /// Discard edits by re-applying the active preset.
    pub fn reset_to_current_preset(&mut self, registry: &PresetRegistry) -> Outcome {
        match self.state.preset.clone() {
            Some(id) => self.apply_theme_preset(registry, &id),
            None => Outcome::Skipped(SkipReason::NoActivePreset),
        }
    }

    /// Whether the styles differ from the active preset's.
    ///
    /// `false` when there is no active preset or it is no longer registered.
    pub fn has_unsaved_changes(&self, registry: &PresetRegistry) -> bool {
        self.state
            .preset
            .as_deref()
            .and_then(|id| registry.get_preset(id))
            .is_some_and(|preset| !self.state.styles.same_as(&preset.styles))
    }

    /// Copy the current state into the checkpoint slot, replacing any earlier one.
    pub fn save_theme_checkpoint(&mut self) {
        self.checkpoint = Some(self.state.clone());
        debug!(revision = self.revision, "theme checkpoint saved");
    }

    /// Restore and clear the checkpoint.
    pub fn restore_theme_checkpoint(&mut self) -> Outcome {
        match self.checkpoint.take() {
            Some(saved) => {
                self.set_theme_state(saved);
                Outcome::Applied
            }
            None => Outcome::Skipped(SkipReason::NoCheckpoint),
        }
    }

    /// Set one token in one mode.
    pub fn update_token(&mut self, mode: ThemeMode, key: TokenKey, value: impl Into<String>) {
        let mut next = self.state.clone();
        next.styles.for_mode_mut(mode).set(key, value);
        self.set_theme_state(next);
    }

    pub fn set_mode(&mut self, mode: ThemeMode) {
        if self.state.current_mode == mode {
            return;
        }
        let next = ThemeEditorState {
            current_mode: mode,
            ..self.state.clone()
        };
        self.set_theme_state(next);
    }

    pub fn toggle_mode(&mut self) {
        self.set_mode(self.state.current_mode.toggle());
    }

    /// Merge tokens from a CSS import into both modes.
    ///
    /// Imported tokens overwrite, all others are kept. Returns `false` and
    /// leaves the state untouched when nothing was imported.
    pub fn merge_imported(&mut self, imported: &ImportedStyles) -> bool {
        if imported.is_empty() {
            return false;
        }
        let mut next = self.state.clone();
        next.styles.light.merge(&imported.light_colors);
        next.styles.dark.merge(&imported.dark_colors);
        self.set_theme_state(next);
        true
    }

    /// Open a saved theme for editing, keeping the current mode.
    pub fn load_theme(&mut self, id: impl Into<String>, styles: ThemeStyles) {
        let next = ThemeEditorState {
            styles,
            current_mode: self.state.current_mode,
            preset: Some(id.into()),
        };
        self.set_theme_state(next);
    }
}
