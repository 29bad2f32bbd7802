use std::fs;
use std::path::{Path, PathBuf};

use swatch_theme::{SavedTheme, SavedThemeSource, ThemeStyles};
use tracing::{debug, info};

use super::{TableData, ThemeRepository, ThemeTable};
use crate::error::{Result, StoreError};
use crate::record::{DeletedTheme, ThemePage, ThemeRecord, ThemeUpdate};

/// Repository persisted to a JSON file after every mutation.
///
/// The file holds `{ "themes": [..] }`. A missing file is an empty library
/// and is created on the first write. A mutation whose write fails is undone
/// in memory, so the repository never runs ahead of the file.
#[derive(Debug)]
pub struct JsonFileRepository {
    path: PathBuf,
    table: ThemeTable,
}

impl JsonFileRepository {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let data = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_json::from_str::<TableData>(&content)?
        } else {
            TableData::default()
        };
        let stored = data.themes.len();
        let table = ThemeTable::from_rows(data.themes);
        info!(
            path = %path.display(),
            themes = table.rows().len(),
            dropped = stored - table.rows().len(),
            "opened theme store"
        );
        Ok(Self { path, table })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let data = TableData {
            themes: self.table.rows().to_vec(),
        };
        let json = serde_json::to_string_pretty(&data)?;

        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, json)?;
        fs::rename(&staging, &self.path)?;
        debug!(
            path = %self.path.display(),
            themes = data.themes.len(),
            "theme store written"
        );
        Ok(())
    }

    /// Run a mutation and write the result, rolling back on write failure.
    fn mutate<T>(&mut self, op: impl FnOnce(&mut ThemeTable) -> Result<T>) -> Result<T> {
        let before = self.table.clone();
        let value = op(&mut self.table)?;
        if let Err(err) = self.persist() {
            self.table = before;
            return Err(err);
        }
        Ok(value)
    }
}

impl ThemeRepository for JsonFileRepository {
    fn create(&mut self, name: &str, styles: ThemeStyles) -> Result<ThemeRecord> {
        self.mutate(|table| table.create(name, styles))
    }

    fn get(&self, id: &str) -> Result<ThemeRecord> {
        self.table.get(id)
    }

    fn update(&mut self, id: &str, update: ThemeUpdate) -> Result<ThemeRecord> {
        self.mutate(|table| table.update(id, update))
    }

    fn delete(&mut self, id: &str) -> Result<DeletedTheme> {
        self.mutate(|table| table.delete(id))
    }

    fn list(&self) -> Result<Vec<ThemeRecord>> {
        Ok(self.table.list())
    }

    fn page(&self, cursor: Option<&str>, limit: Option<usize>) -> Result<ThemePage> {
        self.table.page(cursor, limit)
    }
}

impl SavedThemeSource for JsonFileRepository {
    type Error = StoreError;

    fn saved_themes(&self) -> Result<Vec<SavedTheme>> {
        Ok(self
            .table
            .list()
            .iter()
            .map(ThemeRecord::to_saved_theme)
            .collect())
    }
}
