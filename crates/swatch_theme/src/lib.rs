//! Swatch Theme Engine
//!
//! Editing engine for design-system themes: color, font, radius and shadow
//! tokens for a light and a dark mode.
//!
//! # Overview
//!
//! The engine provides:
//! - **Design tokens**: A closed vocabulary of CSS custom properties per mode
//! - **Presets**: Built-in themes plus user-saved ones in a registry
//! - **Editor state**: A single editable theme with checkpoint/restore
//! - **CSS import**: Pasted stylesheets turned back into tokens
//! - **Code generation**: Tailwind v3/v4 stylesheets and Next.js layout code
//! - **Document sync**: Custom properties and font links kept in step with edits
//! - **Font search**: Paged, cached catalog queries that ignore stale answers
//!
//! # Quick Start
//!
//! ```rust
//! use swatch_theme::{ColorFormat, EditorSession, TailwindVersion, ThemeMode, TokenKey};
//!
//! let mut session = EditorSession::new();
//!
//! // Switch preset and tweak a token
//! let _ = session.apply_preset("slate");
//! session
//!     .store_mut()
//!     .update_token(ThemeMode::Light, TokenKey::Primary, "#1e66f5");
//! assert!(session.has_unsaved_changes());
//!
//! // Export
//! let css = session.theme_code(ColorFormat::Oklch, TailwindVersion::V4);
//! assert!(css.starts_with(":root {"));
//! ```
//!
//! # Stale references
//!
//! Operations that name a preset or the checkpoint return an [`Outcome`].
//! A preset that was unregistered, or a checkpoint that was never saved,
//! yields [`Outcome::Skipped`] and leaves the state untouched.

pub mod codegen;
pub mod color;
pub mod contrast;
pub mod font_search;
pub mod fonts;
pub mod import;
pub mod presets;
pub mod session;
pub mod state;
pub mod sync;
pub mod tokens;

// Re-export commonly used types
pub use codegen::{generate_layout_code, generate_theme_code, TailwindVersion};
pub use color::{
    contrast_ratio, contrast_ratio_str, convert_color, format_hsl_channels, Color, ColorError,
    ColorFormat,
};
pub use contrast::{
    check_contrast, standard_pairs, ColorPair, ContrastResult, MIN_CONTRAST_RATIO,
};
pub use font_search::{
    CategoryFilter, FontCatalog, FontCategory, FontInfo, FontList, FontPage, FontPageRequest,
    FontSearch, UnknownCategory, DEFAULT_FONT_PAGE_SIZE,
};
pub use fonts::{extract_font_family, font_stylesheet_url};
pub use import::{parse_css_input, ImportDiagnostic, ImportedStyles, Severity};
pub use presets::{
    default_theme_styles, BuiltinPreset, PresetRegistry, PresetSource, SavedTheme,
    SavedThemeSource, ThemePreset, DEFAULT_PRESET_ID,
};
pub use session::EditorSession;
pub use state::{EditorStore, Outcome, SkipReason, ThemeEditorState};
pub use sync::{
    initial_paint, DocumentSink, DomSynchronizer, FontCache, MemoryDocument, PersistedSnapshot,
    STORAGE_KEY,
};
pub use tokens::*;
