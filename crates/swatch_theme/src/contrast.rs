//! Contrast checking for foreground/background token pairs

use serde::Serialize;
use tracing::warn;

use crate::color::contrast_ratio_str;
use crate::tokens::{StyleSet, TokenKey};

/// WCAG AA minimum for normal text.
pub const MIN_CONTRAST_RATIO: f64 = 4.5;

/// Where a pair shows up in the interface.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PairCategory {
    Content,
    Interactive,
    Functional,
}

impl PairCategory {
    pub fn label(self) -> &'static str {
        match self {
            Self::Content => "Content & Containers",
            Self::Interactive => "Interactive Elements",
            Self::Functional => "Navigation & Functional",
        }
    }
}

/// A foreground color to be read on a background color.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ColorPair {
    pub id: String,
    pub foreground: String,
    pub background: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ContrastResult {
    pub id: String,
    /// Rounded to two decimals.
    pub contrast_ratio: f64,
}

impl ContrastResult {
    pub fn passes(&self) -> bool {
        self.contrast_ratio >= MIN_CONTRAST_RATIO
    }
}

struct PairDef {
    id: &'static str,
    label: &'static str,
    category: PairCategory,
    foreground: TokenKey,
    background: TokenKey,
}

const STANDARD_PAIRS: &[PairDef] = &[
    PairDef {
        id: "base",
        label: "Base",
        category: PairCategory::Content,
        foreground: TokenKey::Foreground,
        background: TokenKey::Background,
    },
    PairDef {
        id: "card",
        label: "Card",
        category: PairCategory::Content,
        foreground: TokenKey::CardForeground,
        background: TokenKey::Card,
    },
    PairDef {
        id: "popover",
        label: "Popover",
        category: PairCategory::Content,
        foreground: TokenKey::PopoverForeground,
        background: TokenKey::Popover,
    },
    PairDef {
        id: "muted",
        label: "Muted",
        category: PairCategory::Content,
        foreground: TokenKey::MutedForeground,
        background: TokenKey::Muted,
    },
    PairDef {
        id: "primary",
        label: "Primary",
        category: PairCategory::Interactive,
        foreground: TokenKey::PrimaryForeground,
        background: TokenKey::Primary,
    },
    PairDef {
        id: "secondary",
        label: "Secondary",
        category: PairCategory::Interactive,
        foreground: TokenKey::SecondaryForeground,
        background: TokenKey::Secondary,
    },
    PairDef {
        id: "accent",
        label: "Accent",
        category: PairCategory::Interactive,
        foreground: TokenKey::AccentForeground,
        background: TokenKey::Accent,
    },
    PairDef {
        id: "destructive",
        label: "Destructive",
        category: PairCategory::Functional,
        foreground: TokenKey::DestructiveForeground,
        background: TokenKey::Destructive,
    },
    PairDef {
        id: "sidebar",
        label: "Sidebar Base",
        category: PairCategory::Functional,
        foreground: TokenKey::SidebarForeground,
        background: TokenKey::Sidebar,
    },
    PairDef {
        id: "sidebar-primary",
        label: "Sidebar Primary",
        category: PairCategory::Functional,
        foreground: TokenKey::SidebarPrimaryForeground,
        background: TokenKey::SidebarPrimary,
    },
    PairDef {
        id: "sidebar-accent",
        label: "Sidebar Accent",
        category: PairCategory::Functional,
        foreground: TokenKey::SidebarAccentForeground,
        background: TokenKey::SidebarAccent,
    },
];

/// Display label and category for a standard pair id.
pub fn pair_info(id: &str) -> Option<(&'static str, PairCategory)> {
    STANDARD_PAIRS
        .iter()
        .find(|spec| spec.id == id)
        .map(|spec| (spec.label, spec.category))
}

/// The standard pairs present in `styles`. Pairs missing either side are left out.
pub fn standard_pairs(styles: &StyleSet) -> Vec<ColorPair> {
    STANDARD_PAIRS
        .iter()
        .filter_map(|spec| {
            let foreground = styles.get(spec.foreground)?;
            let background = styles.get(spec.background)?;
            Some(ColorPair {
                id: spec.id.to_string(),
                foreground: foreground.to_string(),
                background: background.to_string(),
            })
        })
        .collect()
}

/// Contrast ratio for each pair.
///
/// A pair whose colors do not parse is skipped with a warning.
pub fn check_contrast(pairs: &[ColorPair]) -> Vec<ContrastResult> {
    pairs
        .iter()
        .filter_map(
            |pair| match contrast_ratio_str(&pair.foreground, &pair.background) {
                Ok(ratio) => Some(ContrastResult {
                    id: pair.id.clone(),
                    contrast_ratio: (ratio * 100.0).round() / 100.0,
                }),
                Err(err) => {
                    warn!(pair = %pair.id, error = %err, "skipping contrast check");
                    None
                }
            },
        )
        .collect()
}

/// Ids of the pairs below [`MIN_CONTRAST_RATIO`].
pub fn failing_pairs(results: &[ContrastResult]) -> Vec<&str> {
    results
        .iter()
        .filter(|result| !result.passes())
        .map(|result| result.id.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(id: &str, fg: &str, bg: &str) -> ColorPair {
        ColorPair {
            id: id.to_string(),
            foreground: fg.to_string(),
            background: bg.to_string(),
        }
    }

    #[test]
    fn standard_pairs_skip_missing_tokens() {
        let styles = StyleSet::new()
            .with(TokenKey::Foreground, "#000000")
            .with(TokenKey::Background, "#ffffff")
            .with(TokenKey::Primary, "#1e66f5");
        let pairs = standard_pairs(&styles);
        assert_eq!(pairs, vec![pair("base", "#000000", "#ffffff")]);
    }

    #[test]
    fn ratios_are_rounded() {
        let results = check_contrast(&[pair("base", "#ffffff", "#000000")]);
        assert_eq!(results[0].contrast_ratio, 21.0);
        assert!(results[0].passes());
    }

    #[test]
    fn unparseable_pairs_are_skipped() {
        let results = check_contrast(&[
            pair("base", "#777777", "#888888"),
            pair("card", "bogus", "#ffffff"),
        ]);
        assert_eq!(results.len(), 1);
        assert_eq!(failing_pairs(&results), vec!["base"]);
    }

    #[test]
    fn pair_info_lookup() {
        assert_eq!(
            pair_info("sidebar"),
            Some(("Sidebar Base", PairCategory::Functional))
        );
        assert_eq!(pair_info("chart-1"), None);
    }
}
