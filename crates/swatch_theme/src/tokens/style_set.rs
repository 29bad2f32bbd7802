//! Style sets: the token values for one mode, and the light/dark pair

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::warn;

use super::key::TokenKey;
use crate::presets::default_theme_styles;

/// Light or dark mode
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl Display for ThemeMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("unknown theme mode `{other}` (expected light or dark)")),
        }
    }
}

/// Token values for a single mode.
///
/// Every token is optional. Readers that need a value regardless use
/// [`StyleSet::resolve`], which falls back to the built-in defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleSet {
    values: BTreeMap<TokenKey, String>,
}

impl StyleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: TokenKey, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: TokenKey) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }

    /// Set a token, returning the previous value.
    pub fn set(&mut self, key: TokenKey, value: impl Into<String>) -> Option<String> {
        self.values.insert(key, value.into())
    }

    pub fn remove(&mut self, key: TokenKey) -> Option<String> {
        self.values.remove(&key)
    }

    pub fn contains(&self, key: TokenKey) -> bool {
        self.values.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Populated tokens in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (TokenKey, &str)> + '_ {
        self.values.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Populated keys in canonical order.
    pub fn keys(&self) -> impl Iterator<Item = TokenKey> + '_ {
        self.values.keys().copied()
    }

    /// Shallow merge: tokens in `patch` overwrite, everything else is kept.
    pub fn merge(&mut self, patch: &StyleSet) {
        for (key, value) in patch.iter() {
            self.values.insert(key, value.to_string());
        }
    }

    /// Value of `key`, or the built-in default for `mode` when absent.
    pub fn resolve(&self, key: TokenKey, mode: ThemeMode) -> &str {
        match self.get(key) {
            Some(value) => value,
            None => default_theme_styles()
                .for_mode(mode)
                .get(key)
                .unwrap_or_default(),
        }
    }

    /// Structural comparison over the populated tokens.
    pub fn same_as(&self, other: &StyleSet) -> bool {
        self.values == other.values
    }
}

impl FromIterator<(TokenKey, String)> for StyleSet {
    fn from_iter<I: IntoIterator<Item = (TokenKey, String)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl Serialize for StyleSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (key, value) in &self.values {
            map.serialize_entry(key.as_str(), value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for StyleSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct StyleSetVisitor;

        impl<'de> Visitor<'de> for StyleSetVisitor {
            type Value = StyleSet;

            fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str("a map of theme token names to string values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<StyleSet, A::Error> {
                let mut set = StyleSet::new();
                while let Some((name, value)) = access.next_entry::<String, String>()? {
                    match name.parse::<TokenKey>() {
                        Ok(key) => {
                            set.set(key, value);
                        }
                        Err(_) => warn!(token = %name, "dropping unknown theme token"),
                    }
                }
                Ok(set)
            }
        }

        deserializer.deserialize_map(StyleSetVisitor)
    }
}

/// A style set for each mode. Both are always present.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeStyles {
    pub light: StyleSet,
    pub dark: StyleSet,
}

/// Why a [`ThemeStyles`] value was rejected at a boundary.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{mode}.{key}: {reason}")]
pub struct InvalidStyles {
    pub mode: ThemeMode,
    pub key: TokenKey,
    pub reason: &'static str,
}

impl ThemeStyles {
    pub fn new(light: StyleSet, dark: StyleSet) -> Self {
        Self { light, dark }
    }

    pub fn for_mode(&self, mode: ThemeMode) -> &StyleSet {
        match mode {
            ThemeMode::Light => &self.light,
            ThemeMode::Dark => &self.dark,
        }
    }

    pub fn for_mode_mut(&mut self, mode: ThemeMode) -> &mut StyleSet {
        match mode {
            ThemeMode::Light => &mut self.light,
            ThemeMode::Dark => &mut self.dark,
        }
    }

    /// Structural equality over both modes.
    pub fn same_as(&self, other: &ThemeStyles) -> bool {
        self.light.same_as(&other.light) && self.dark.same_as(&other.dark)
    }

    /// Check values that would corrupt generated CSS.
    pub fn validate(&self) -> Result<(), InvalidStyles> {
        for mode in [ThemeMode::Light, ThemeMode::Dark] {
            for (key, value) in self.for_mode(mode).iter() {
                if value.trim().is_empty() {
                    return Err(InvalidStyles {
                        mode,
                        key,
                        reason: "value is empty",
                    });
                }
                if value.contains(|c: char| matches!(c, ';' | '{' | '}')) {
                    return Err(InvalidStyles {
                        mode,
                        key,
                        reason: "value contains `;`, `{` or `}`",
                    });
                }
            }
        }
        Ok(())
    }
}
