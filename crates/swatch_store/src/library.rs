//! Theme mutations mirrored into the preset registry
//!
//! Each mutation writes to the repository first. The registry only changes
//! when the write succeeded, so a failed save never shows up as a preset.

use swatch_theme::{EditorSession, PresetRegistry, SavedThemeSource, ThemeStyles};
use tracing::{info, warn};

use crate::error::{Result, StoreError};
use crate::record::{DeletedTheme, ThemePage, ThemeRecord, ThemeUpdate};
use crate::repository::ThemeRepository;

#[derive(Debug, Default)]
pub struct ThemeLibrary<R> {
    repo: R,
}

impl<R: ThemeRepository> ThemeLibrary<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn repository_mut(&mut self) -> &mut R {
        &mut self.repo
    }

    pub fn into_inner(self) -> R {
        self.repo
    }

    /// Save a new theme and register it as a preset.
    pub fn create_theme(
        &mut self,
        registry: &mut PresetRegistry,
        name: &str,
        styles: ThemeStyles,
    ) -> Result<ThemeRecord> {
        let record = self.repo.create(name, styles).map_err(|err| {
            err.log("createTheme", name);
            err
        })?;
        registry.register_preset(record.id.clone(), record.to_preset());
        info!(id = %record.id, name = %record.name, "theme created");
        Ok(record)
    }

    /// Update a saved theme and refresh its preset.
    pub fn update_theme(
        &mut self,
        registry: &mut PresetRegistry,
        id: &str,
        update: ThemeUpdate,
    ) -> Result<ThemeRecord> {
        let record = self.repo.update(id, update).map_err(|err| {
            err.log("updateTheme", id);
            err
        })?;
        registry.update_preset(record.id.clone(), record.to_preset());
        info!(id = %record.id, name = %record.name, "theme updated");
        Ok(record)
    }

    /// Delete a saved theme and drop its preset.
    pub fn delete_theme(
        &mut self,
        registry: &mut PresetRegistry,
        id: &str,
    ) -> Result<DeletedTheme> {
        let deleted = self.repo.delete(id).map_err(|err| {
            err.log("deleteTheme", id);
            err
        })?;
        registry.unregister_preset(&deleted.id);
        info!(id = %deleted.id, name = %deleted.name, "theme deleted");
        Ok(deleted)
    }

    /// Save the session's current styles as a new theme and make it the
    /// active preset.
    pub fn save_current_theme(
        &mut self,
        session: &mut EditorSession,
        name: &str,
    ) -> Result<ThemeRecord> {
        let styles = session.state().styles.clone();
        let record = self.create_theme(session.registry_mut(), name, styles)?;
        activate(session, &record.id);
        Ok(record)
    }

    /// Write the session's current styles over the active saved theme.
    ///
    /// Fails with [`StoreError::Validation`] when the active preset is not a
    /// saved theme.
    pub fn update_active_theme(&mut self, session: &mut EditorSession) -> Result<ThemeRecord> {
        let Some(id) = session.active_saved_preset().map(str::to_string) else {
            let err = StoreError::Validation("No saved theme is active".to_string());
            err.log("updateTheme", session.state().preset.as_deref().unwrap_or_default());
            return Err(err);
        };
        let update = ThemeUpdate::restyle(session.state().styles.clone());
        let record = self.update_theme(session.registry_mut(), &id, update)?;
        activate(session, &record.id);
        Ok(record)
    }

    pub fn theme(&self, id: &str) -> Result<ThemeRecord> {
        self.repo.get(id).map_err(|err| {
            err.log("getTheme", id);
            err
        })
    }

    pub fn themes(&self) -> Result<Vec<ThemeRecord>> {
        self.repo.list().map_err(|err| {
            err.log("getThemes", "");
            err
        })
    }

    pub fn page(&self, cursor: Option<&str>, limit: Option<usize>) -> Result<ThemePage> {
        self.repo.page(cursor, limit).map_err(|err| {
            err.log("getThemesPaginated", cursor.unwrap_or_default());
            err
        })
    }
}

fn activate(session: &mut EditorSession, id: &str) {
    if !session.apply_preset(id).is_applied() {
        warn!(id, "saved theme could not be applied");
    }
}

impl<R: ThemeRepository + SavedThemeSource> ThemeLibrary<R> {
    /// Register every saved theme. See [`PresetRegistry::load_saved_presets`].
    pub fn load_into(&self, registry: &mut PresetRegistry) -> Option<usize> {
        registry.load_saved_presets(&self.repo)
    }
}
