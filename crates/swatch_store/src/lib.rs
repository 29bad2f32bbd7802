//! Swatch Theme Library
//!
//! Persistence for user-saved themes: a [`ThemeRepository`] contract with an
//! in-memory and a JSON file implementation, cursor pagination, a paged
//! [`ThemeFeed`] and a [`ThemeLibrary`] that keeps the editor's
//! [`PresetRegistry`](swatch_theme::PresetRegistry) in step with storage.
//!
//! ```rust
//! use swatch_store::{MemoryRepository, ThemeLibrary, ThemeUpdate};
//! use swatch_theme::{BuiltinPreset, PresetRegistry};
//!
//! let mut registry = PresetRegistry::default();
//! let mut library = ThemeLibrary::new(MemoryRepository::new());
//!
//! let ocean = library
//!     .create_theme(&mut registry, "Ocean", BuiltinPreset::Slate.styles())
//!     .unwrap();
//! assert_eq!(registry.get_preset(&ocean.id).unwrap().label, "Ocean");
//!
//! library
//!     .update_theme(&mut registry, &ocean.id, ThemeUpdate::rename("Deep Ocean"))
//!     .unwrap();
//! assert_eq!(registry.get_preset(&ocean.id).unwrap().label, "Deep Ocean");
//! ```

pub mod error;
pub mod feed;
pub mod library;
pub mod record;
pub mod repository;

pub use error::{ErrorKind, Result, StoreError};
pub use feed::{PageRequest, ThemeFeed};
pub use library::ThemeLibrary;
pub use record::{iso_timestamp, DeletedTheme, PublishedTheme, ThemePage, ThemeRecord, ThemeUpdate};
pub use repository::{
    JsonFileRepository, MemoryRepository, ThemeRepository, DEFAULT_PAGE_SIZE, MAX_NAME_LEN,
    MAX_PAGE_SIZE,
};
