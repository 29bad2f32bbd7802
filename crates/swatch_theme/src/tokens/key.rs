//! The closed token vocabulary

use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Every token a theme can carry.
///
/// Declaration order is the canonical order used when rendering CSS, so
/// `Ord` on this enum doubles as the output order of [`StyleSet`](super::StyleSet).
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum TokenKey {
    // Surfaces
    Background,
    Foreground,
    Card,
    CardForeground,
    Popover,
    PopoverForeground,

    // Brand / interactive
    Primary,
    PrimaryForeground,
    Secondary,
    SecondaryForeground,
    Muted,
    MutedForeground,
    Accent,
    AccentForeground,
    Destructive,
    DestructiveForeground,

    // Borders and focus
    Border,
    Input,
    Ring,

    // Charts
    Chart1,
    Chart2,
    Chart3,
    Chart4,
    Chart5,

    // Sidebar
    Sidebar,
    SidebarForeground,
    SidebarPrimary,
    SidebarPrimaryForeground,
    SidebarAccent,
    SidebarAccentForeground,
    SidebarBorder,
    SidebarRing,

    // Typography
    FontSans,
    FontSerif,
    FontMono,

    // Shape
    Radius,

    // Shadow parameters
    ShadowColor,
    ShadowOpacity,
    ShadowBlur,
    ShadowSpread,
    ShadowOffsetX,
    ShadowOffsetY,

    // Spacing
    LetterSpacing,
    Spacing,
}

impl TokenKey {
    /// Full vocabulary in canonical order.
    pub fn all() -> &'static [TokenKey] {
        const ALL: [TokenKey; 44] = [
            TokenKey::Background,
            TokenKey::Foreground,
            TokenKey::Card,
            TokenKey::CardForeground,
            TokenKey::Popover,
            TokenKey::PopoverForeground,
            TokenKey::Primary,
            TokenKey::PrimaryForeground,
            TokenKey::Secondary,
            TokenKey::SecondaryForeground,
            TokenKey::Muted,
            TokenKey::MutedForeground,
            TokenKey::Accent,
            TokenKey::AccentForeground,
            TokenKey::Destructive,
            TokenKey::DestructiveForeground,
            TokenKey::Border,
            TokenKey::Input,
            TokenKey::Ring,
            TokenKey::Chart1,
            TokenKey::Chart2,
            TokenKey::Chart3,
            TokenKey::Chart4,
            TokenKey::Chart5,
            TokenKey::Sidebar,
            TokenKey::SidebarForeground,
            TokenKey::SidebarPrimary,
            TokenKey::SidebarPrimaryForeground,
            TokenKey::SidebarAccent,
            TokenKey::SidebarAccentForeground,
            TokenKey::SidebarBorder,
            TokenKey::SidebarRing,
            TokenKey::FontSans,
            TokenKey::FontSerif,
            TokenKey::FontMono,
            TokenKey::Radius,
            TokenKey::ShadowColor,
            TokenKey::ShadowOpacity,
            TokenKey::ShadowBlur,
            TokenKey::ShadowSpread,
            TokenKey::ShadowOffsetX,
            TokenKey::ShadowOffsetY,
            TokenKey::LetterSpacing,
            TokenKey::Spacing,
        ];
        &ALL
    }

    /// The three font-role tokens.
    pub fn fonts() -> &'static [TokenKey] {
        &[TokenKey::FontSans, TokenKey::FontSerif, TokenKey::FontMono]
    }

    /// CSS custom-property name without the leading `--`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Foreground => "foreground",
            Self::Card => "card",
            Self::CardForeground => "card-foreground",
            Self::Popover => "popover",
            Self::PopoverForeground => "popover-foreground",
            Self::Primary => "primary",
            Self::PrimaryForeground => "primary-foreground",
            Self::Secondary => "secondary",
            Self::SecondaryForeground => "secondary-foreground",
            Self::Muted => "muted",
            Self::MutedForeground => "muted-foreground",
            Self::Accent => "accent",
            Self::AccentForeground => "accent-foreground",
            Self::Destructive => "destructive",
            Self::DestructiveForeground => "destructive-foreground",
            Self::Border => "border",
            Self::Input => "input",
            Self::Ring => "ring",
            Self::Chart1 => "chart-1",
            Self::Chart2 => "chart-2",
            Self::Chart3 => "chart-3",
            Self::Chart4 => "chart-4",
            Self::Chart5 => "chart-5",
            Self::Sidebar => "sidebar",
            Self::SidebarForeground => "sidebar-foreground",
            Self::SidebarPrimary => "sidebar-primary",
            Self::SidebarPrimaryForeground => "sidebar-primary-foreground",
            Self::SidebarAccent => "sidebar-accent",
            Self::SidebarAccentForeground => "sidebar-accent-foreground",
            Self::SidebarBorder => "sidebar-border",
            Self::SidebarRing => "sidebar-ring",
            Self::FontSans => "font-sans",
            Self::FontSerif => "font-serif",
            Self::FontMono => "font-mono",
            Self::Radius => "radius",
            Self::ShadowColor => "shadow-color",
            Self::ShadowOpacity => "shadow-opacity",
            Self::ShadowBlur => "shadow-blur",
            Self::ShadowSpread => "shadow-spread",
            Self::ShadowOffsetX => "shadow-offset-x",
            Self::ShadowOffsetY => "shadow-offset-y",
            Self::LetterSpacing => "letter-spacing",
            Self::Spacing => "spacing",
        }
    }

    /// Whether the token holds a colour expression.
    ///
    /// Only colour tokens are reformatted by the code generators.
    pub fn is_color(self) -> bool {
        !matches!(
            self,
            Self::FontSans
                | Self::FontSerif
                | Self::FontMono
                | Self::Radius
                | Self::ShadowOpacity
                | Self::ShadowBlur
                | Self::ShadowSpread
                | Self::ShadowOffsetX
                | Self::ShadowOffsetY
                | Self::LetterSpacing
                | Self::Spacing
        )
    }

    /// Whether the token holds a CSS font-family list.
    pub fn is_font(self) -> bool {
        matches!(self, Self::FontSans | Self::FontSerif | Self::FontMono)
    }
}

impl Display for TokenKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not part of the vocabulary.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme token `{0}`")]
pub struct UnknownToken(pub String);

impl FromStr for TokenKey {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().trim_start_matches("--");
        TokenKey::all()
            .iter()
            .copied()
            .find(|key| key.as_str() == name)
            .ok_or_else(|| UnknownToken(s.to_string()))
    }
}
