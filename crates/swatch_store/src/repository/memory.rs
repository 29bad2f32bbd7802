use std::convert::Infallible;

use swatch_theme::{SavedTheme, SavedThemeSource, ThemeStyles};

use super::{ThemeRepository, ThemeTable};
use crate::error::Result;
use crate::record::{DeletedTheme, ThemePage, ThemeRecord, ThemeUpdate};

/// Repository that keeps themes for the lifetime of the value.
#[derive(Clone, Debug, Default)]
pub struct MemoryRepository {
    table: ThemeTable,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository seeded with existing rows. Invalid rows are dropped.
    pub fn with_records(records: Vec<ThemeRecord>) -> Self {
        Self {
            table: ThemeTable::from_rows(records),
        }
    }

    pub fn len(&self) -> usize {
        self.table.rows().len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.rows().is_empty()
    }
}

impl ThemeRepository for MemoryRepository {
    fn create(&mut self, name: &str, styles: ThemeStyles) -> Result<ThemeRecord> {
        self.table.create(name, styles)
    }

    fn get(&self, id: &str) -> Result<ThemeRecord> {
        self.table.get(id)
    }

    fn update(&mut self, id: &str, update: ThemeUpdate) -> Result<ThemeRecord> {
        self.table.update(id, update)
    }

    fn delete(&mut self, id: &str) -> Result<DeletedTheme> {
        self.table.delete(id)
    }

    fn list(&self) -> Result<Vec<ThemeRecord>> {
        Ok(self.table.list())
    }

    fn page(&self, cursor: Option<&str>, limit: Option<usize>) -> Result<ThemePage> {
        self.table.page(cursor, limit)
    }
}

impl SavedThemeSource for MemoryRepository {
    type Error = Infallible;

    fn saved_themes(&self) -> std::result::Result<Vec<SavedTheme>, Infallible> {
        Ok(self
            .table
            .list()
            .iter()
            .map(ThemeRecord::to_saved_theme)
            .collect())
    }
}
