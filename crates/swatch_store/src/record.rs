//! Persisted theme rows and the shapes derived from them

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use swatch_theme::{SavedTheme, ThemePreset, ThemeStyles};

/// A saved theme as stored by a repository
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeRecord {
    pub id: String,
    pub name: String,
    pub styles: ThemeStyles,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ThemeRecord {
    /// Registry entry mirroring this record.
    pub fn to_preset(&self) -> ThemePreset {
        ThemePreset {
            created_at: Some(iso_timestamp(&self.created_at)),
            ..ThemePreset::saved(self.name.clone(), self.styles.clone())
        }
    }

    pub fn to_saved_theme(&self) -> SavedTheme {
        SavedTheme {
            id: self.id.clone(),
            name: self.name.clone(),
            styles: self.styles.clone(),
            created_at: Some(iso_timestamp(&self.created_at)),
        }
    }

    /// Feed entry; a theme is published when it is created.
    pub fn to_published(&self) -> PublishedTheme {
        PublishedTheme {
            id: self.id.clone(),
            theme_id: self.id.clone(),
            name: self.name.clone(),
            styles: self.styles.clone(),
            published_at: iso_timestamp(&self.created_at),
        }
    }
}

/// Partial update; at least one field must be set.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<ThemeStyles>,
}

impl ThemeUpdate {
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            styles: None,
        }
    }

    pub fn restyle(styles: ThemeStyles) -> Self {
        Self {
            name: None,
            styles: Some(styles),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.styles.is_none()
    }
}

/// What remains of a deleted theme
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedTheme {
    pub id: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedTheme {
    pub id: String,
    pub theme_id: String,
    pub name: String,
    pub styles: ThemeStyles,
    pub published_at: String,
}

/// One page of the theme feed, newest first
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemePage {
    pub themes: Vec<PublishedTheme>,
    /// `published_at` of the last theme when more pages follow.
    pub next_cursor: Option<String>,
}

/// RFC 3339 UTC with millisecond precision, the form used for cursors.
pub fn iso_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}
