use pretty_assertions::assert_eq;
use swatch_store::{MemoryRepository, StoreError, ThemeLibrary, ThemeRepository, ThemeUpdate};
use swatch_theme::{BuiltinPreset, EditorSession, PresetRegistry, PresetSource, ThemeMode, TokenKey};

#[test]
fn ocean_lifecycle() {
    let mut registry = PresetRegistry::default();
    let mut library = ThemeLibrary::new(MemoryRepository::new());

    let created = library
        .create_theme(&mut registry, "Ocean", BuiltinPreset::Slate.styles())
        .unwrap();
    assert!(!created.id.is_empty());
    assert_eq!(created.created_at, created.updated_at);

    let renamed = library
        .update_theme(&mut registry, &created.id, ThemeUpdate::rename("Deep Ocean"))
        .unwrap();
    assert_eq!(renamed.id, created.id);
    assert_eq!(renamed.name, "Deep Ocean");
    assert_eq!(renamed.styles, created.styles);
    assert_eq!(renamed.created_at, created.created_at);
    assert!(renamed.updated_at > created.updated_at);

    let preset = registry.get_preset(&created.id).unwrap();
    assert_eq!(preset.label, "Deep Ocean");
    assert_eq!(preset.source, PresetSource::Saved);

    let deleted = library.delete_theme(&mut registry, &created.id).unwrap();
    assert_eq!(deleted.name, "Deep Ocean");
    assert!(registry.get_preset(&created.id).is_none());
    assert_eq!(registry, PresetRegistry::with_builtins());
}

#[test]
fn failed_create_leaves_registry_alone() {
    let mut registry = PresetRegistry::default();
    let mut library = ThemeLibrary::new(MemoryRepository::new());

    let err = library
        .create_theme(&mut registry, &"x".repeat(51), BuiltinPreset::Zinc.styles())
        .unwrap_err();

    assert!(matches!(err, StoreError::Validation(_)));
    assert_eq!(err.user_message(), "Theme name too long");
    assert_eq!(registry, PresetRegistry::with_builtins());
    assert!(library.repository().is_empty());
}

#[test]
fn restyle_keeps_name() {
    let mut registry = PresetRegistry::default();
    let mut library = ThemeLibrary::new(MemoryRepository::new());
    let created = library
        .create_theme(&mut registry, "Forest", BuiltinPreset::Neutral.styles())
        .unwrap();

    let updated = library
        .update_theme(
            &mut registry,
            &created.id,
            ThemeUpdate::restyle(BuiltinPreset::Zinc.styles()),
        )
        .unwrap();

    assert_eq!(updated.name, "Forest");
    assert_eq!(
        registry.get_preset(&created.id).unwrap().styles,
        BuiltinPreset::Zinc.styles()
    );
}

#[test]
fn load_into_registers_existing_rows() {
    let mut repo = MemoryRepository::new();
    let a = repo.create("A", BuiltinPreset::Slate.styles()).unwrap();
    let b = repo.create("B", BuiltinPreset::Zinc.styles()).unwrap();
    let library = ThemeLibrary::new(repo);

    let mut registry = PresetRegistry::default();
    assert_eq!(library.load_into(&mut registry), Some(2));
    assert!(registry.contains(&a.id));
    assert!(registry.contains(&b.id));

    registry.unload_saved_presets();
    assert_eq!(registry, PresetRegistry::with_builtins());
}

#[test]
fn saving_the_current_theme_makes_it_active() {
    let mut session = EditorSession::new();
    let mut library = ThemeLibrary::new(MemoryRepository::new());
    session
        .store_mut()
        .update_token(ThemeMode::Light, TokenKey::Primary, "#1e66f5");
    assert!(session.has_unsaved_changes());

    let saved = library.save_current_theme(&mut session, "Ocean").unwrap();

    assert_eq!(session.state().preset.as_deref(), Some(saved.id.as_str()));
    assert_eq!(saved.styles.light.get(TokenKey::Primary), Some("#1e66f5"));
    assert!(!session.has_unsaved_changes());
    assert_eq!(session.existing_theme_name(), None);
    assert_eq!(library.repository().len(), 1);
}

#[test]
fn updating_the_active_theme_clears_unsaved_changes() {
    let mut session = EditorSession::new();
    let mut library = ThemeLibrary::new(MemoryRepository::new());
    let saved = library.save_current_theme(&mut session, "Ocean").unwrap();

    session
        .store_mut()
        .update_token(ThemeMode::Dark, TokenKey::Accent, "#fab387");
    assert_eq!(session.existing_theme_name(), Some("Ocean"));

    let updated = library.update_active_theme(&mut session).unwrap();

    assert_eq!(updated.id, saved.id);
    assert_eq!(updated.name, "Ocean");
    assert_eq!(updated.styles.dark.get(TokenKey::Accent), Some("#fab387"));
    assert!(updated.updated_at > saved.updated_at);
    assert!(!session.has_unsaved_changes());
    assert_eq!(session.existing_theme_name(), None);
    assert_eq!(
        session.registry().get_preset(&saved.id).unwrap().styles,
        updated.styles
    );
}

#[test]
fn updating_without_a_saved_theme_is_rejected() {
    let mut session = EditorSession::new();
    let mut library = ThemeLibrary::new(MemoryRepository::new());
    session
        .store_mut()
        .update_token(ThemeMode::Light, TokenKey::Primary, "#1e66f5");

    let err = library.update_active_theme(&mut session).unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
    assert!(session.has_unsaved_changes());
    assert!(library.repository().is_empty());
}

#[test]
fn failed_save_keeps_the_edit() {
    let mut session = EditorSession::new();
    let mut library = ThemeLibrary::new(MemoryRepository::new());
    session
        .store_mut()
        .update_token(ThemeMode::Light, TokenKey::Primary, "#1e66f5");
    let before = session.state().clone();

    assert!(library.save_current_theme(&mut session, "  ").is_err());
    assert_eq!(session.state(), &before);
    assert!(session.has_unsaved_changes());
}
