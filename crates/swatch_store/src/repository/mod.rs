//! Theme repositories
//!
//! [`ThemeRepository`] is the storage contract the editor relies on. Both
//! implementations share [`ThemeTable`] for validation, ordering and
//! pagination and differ only in where rows live between calls.

mod json_file;
mod memory;

pub use json_file::JsonFileRepository;
pub use memory::MemoryRepository;

use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use swatch_theme::ThemeStyles;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{Result, StoreError};
use crate::record::{iso_timestamp, DeletedTheme, ThemePage, ThemeRecord, ThemeUpdate};

/// Longest accepted theme name, in characters.
pub const MAX_NAME_LEN: usize = 50;

/// Page size when the caller does not pick one.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Largest page a caller may request.
pub const MAX_PAGE_SIZE: usize = 50;

/// Storage for saved themes
pub trait ThemeRepository {
    /// Insert a theme under a fresh id. Both timestamps are the insert time.
    fn create(&mut self, name: &str, styles: ThemeStyles) -> Result<ThemeRecord>;

    fn get(&self, id: &str) -> Result<ThemeRecord>;

    /// Apply `update` and refresh `updated_at`.
    fn update(&mut self, id: &str, update: ThemeUpdate) -> Result<ThemeRecord>;

    fn delete(&mut self, id: &str) -> Result<DeletedTheme>;

    /// Every theme, most recently updated first.
    fn list(&self) -> Result<Vec<ThemeRecord>>;

    /// Themes created strictly before `cursor`, newest first.
    ///
    /// `limit` defaults to [`DEFAULT_PAGE_SIZE`] and must be within
    /// `1..=MAX_PAGE_SIZE`.
    fn page(&self, cursor: Option<&str>, limit: Option<usize>) -> Result<ThemePage>;
}

pub(crate) fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(StoreError::Validation(
            "Theme name cannot be empty".to_string(),
        ));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(StoreError::Validation("Theme name too long".to_string()));
    }
    Ok(())
}

pub(crate) fn validate_styles(styles: &ThemeStyles) -> Result<()> {
    styles
        .validate()
        .map_err(|err| StoreError::Validation(format!("Invalid theme styles: {err}")))
}

pub(crate) fn validate_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(StoreError::Validation("Theme ID required".to_string()));
    }
    Ok(())
}

/// Millisecond clock that never returns the same instant twice.
#[derive(Clone, Debug, Default)]
pub(crate) struct Clock {
    last: Option<DateTime<Utc>>,
}

impl Clock {
    /// Clock that will only hand out instants after `last`.
    pub(crate) fn after(last: Option<DateTime<Utc>>) -> Self {
        Self { last }
    }

    pub(crate) fn tick(&mut self) -> DateTime<Utc> {
        let now = Utc::now().trunc_subsecs(3);
        let next = match self.last {
            Some(last) if now <= last => last + Duration::milliseconds(1),
            _ => now,
        };
        self.last = Some(next);
        next
    }
}

/// Rows plus the clock that stamps them.
#[derive(Clone, Debug, Default)]
pub(crate) struct ThemeTable {
    rows: Vec<ThemeRecord>,
    clock: Clock,
}

/// On-disk and in-memory row layout.
#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct TableData {
    #[serde(default)]
    pub(crate) themes: Vec<ThemeRecord>,
}

impl ThemeTable {
    /// Table over rows read from outside the process.
    ///
    /// Rows that `create` or `update` would have refused are dropped with a
    /// warning, as are repeats of an id already seen.
    pub(crate) fn from_rows(rows: Vec<ThemeRecord>) -> Self {
        let mut kept: Vec<ThemeRecord> = Vec::with_capacity(rows.len());
        for row in rows {
            let checked = validate_id(&row.id)
                .and_then(|()| validate_name(&row.name))
                .and_then(|()| validate_styles(&row.styles));
            if let Err(err) = checked {
                warn!(id = %row.id, error = %err, "dropping invalid stored theme");
                continue;
            }
            if kept.iter().any(|existing| existing.id == row.id) {
                warn!(id = %row.id, "dropping duplicate stored theme");
                continue;
            }
            kept.push(row);
        }
        let rows = kept;
        let latest = rows
            .iter()
            .flat_map(|row| [row.created_at, row.updated_at])
            .max();
        Self {
            rows,
            clock: Clock::after(latest),
        }
    }

    pub(crate) fn rows(&self) -> &[ThemeRecord] {
        &self.rows
    }

    pub(crate) fn create(&mut self, name: &str, styles: ThemeStyles) -> Result<ThemeRecord> {
        validate_name(name)?;
        validate_styles(&styles)?;

        let now = self.clock.tick();
        let record = ThemeRecord {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            styles,
            created_at: now,
            updated_at: now,
        };
        self.rows.push(record.clone());
        debug!(id = %record.id, name = %record.name, "theme created");
        Ok(record)
    }

    pub(crate) fn get(&self, id: &str) -> Result<ThemeRecord> {
        validate_id(id)?;
        self.rows
            .iter()
            .find(|row| row.id == id)
            .cloned()
            .ok_or_else(StoreError::not_found)
    }

    pub(crate) fn update(&mut self, id: &str, update: ThemeUpdate) -> Result<ThemeRecord> {
        validate_id(id)?;
        if let Some(name) = &update.name {
            validate_name(name)?;
        }
        if let Some(styles) = &update.styles {
            validate_styles(styles)?;
        }
        if update.is_empty() {
            return Err(StoreError::Validation(
                "No update data provided".to_string(),
            ));
        }

        let index = self
            .rows
            .iter()
            .position(|row| row.id == id)
            .ok_or_else(StoreError::not_found)?;
        let now = self.clock.tick();
        let row = &mut self.rows[index];
        if let Some(name) = update.name {
            row.name = name;
        }
        if let Some(styles) = update.styles {
            row.styles = styles;
        }
        row.updated_at = now;
        debug!(id, "theme updated");
        Ok(row.clone())
    }

    pub(crate) fn delete(&mut self, id: &str) -> Result<DeletedTheme> {
        validate_id(id)?;
        let index = self
            .rows
            .iter()
            .position(|row| row.id == id)
            .ok_or_else(StoreError::not_found)?;
        let row = self.rows.remove(index);
        debug!(id, "theme deleted");
        Ok(DeletedTheme {
            id: row.id,
            name: row.name,
        })
    }

    pub(crate) fn list(&self) -> Vec<ThemeRecord> {
        let mut rows = self.rows.clone();
        rows.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        rows
    }

    pub(crate) fn page(&self, cursor: Option<&str>, limit: Option<usize>) -> Result<ThemePage> {
        let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE);
        if !(1..=MAX_PAGE_SIZE).contains(&limit) {
            return Err(StoreError::Validation(format!(
                "Page limit must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }
        let before = cursor
            .map(|raw| {
                DateTime::parse_from_rfc3339(raw)
                    .map(|at| at.with_timezone(&Utc))
                    .map_err(|_| StoreError::Validation(format!("Invalid cursor `{raw}`")))
            })
            .transpose()?;

        let mut rows: Vec<&ThemeRecord> = self
            .rows
            .iter()
            .filter(|row| before.map_or(true, |before| row.created_at < before))
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows.truncate(limit + 1);

        let has_more = rows.len() > limit;
        rows.truncate(limit);
        let next_cursor = if has_more {
            rows.last().map(|row| iso_timestamp(&row.created_at))
        } else {
            None
        };

        Ok(ThemePage {
            themes: rows.into_iter().map(ThemeRecord::to_published).collect(),
            next_cursor,
        })
    }
}
