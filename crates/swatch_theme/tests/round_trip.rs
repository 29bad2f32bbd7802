use pretty_assertions::assert_eq;
use swatch_theme::{
    generate_theme_code, parse_css_input, BuiltinPreset, ColorFormat, EditorStore,
    PresetRegistry, TailwindVersion, ThemeEditorState, ThemeMode, ThemeStyles, TokenKey,
};

fn empty_store() -> EditorStore {
    EditorStore::with_state(ThemeEditorState {
        styles: ThemeStyles::default(),
        current_mode: ThemeMode::Light,
        preset: None,
    })
}

#[test]
fn generated_css_imports_back_to_the_same_styles() {
    for preset in BuiltinPreset::all() {
        let mut source = EditorStore::new();
        let _ = source.apply_theme_preset(&PresetRegistry::default(), preset.id());

        let css = generate_theme_code(source.state(), ColorFormat::Hex, TailwindVersion::V4);
        let imported = parse_css_input(&css);
        assert!(!imported.has_warnings(), "{preset}: {:?}", imported.diagnostics);

        let mut target = empty_store();
        assert!(target.merge_imported(&imported));

        assert_eq!(target.state().styles, source.state().styles, "{preset}");
    }
}

#[test]
fn v3_layer_output_imports_back() {
    let source = EditorStore::new();
    let css = generate_theme_code(source.state(), ColorFormat::Hex, TailwindVersion::V3);

    let mut target = empty_store();
    target.merge_imported(&parse_css_input(&css));

    assert!(target.state().styles.same_as(&source.state().styles));
}

#[test]
fn edited_tokens_survive_round_trip() {
    let mut source = EditorStore::new();
    source.update_token(ThemeMode::Dark, TokenKey::Chart3, "#abcdef");
    source.update_token(ThemeMode::Light, TokenKey::LetterSpacing, "0.025em");

    let css = generate_theme_code(source.state(), ColorFormat::Hex, TailwindVersion::V4);
    let mut target = empty_store();
    target.merge_imported(&parse_css_input(&css));

    assert_eq!(
        target.state().styles.dark.get(TokenKey::Chart3),
        Some("#abcdef")
    );
    assert_eq!(
        target.state().styles.light.get(TokenKey::LetterSpacing),
        Some("0.025em")
    );
}

#[test]
fn other_formats_round_trip_through_hex() {
    let source = EditorStore::new();
    for format in [ColorFormat::Rgb, ColorFormat::Hsl, ColorFormat::Oklch] {
        let css = generate_theme_code(source.state(), format, TailwindVersion::V4);
        let mut target = empty_store();
        target.merge_imported(&parse_css_input(&css));

        let back = generate_theme_code(target.state(), ColorFormat::Hex, TailwindVersion::V4);
        let original = generate_theme_code(source.state(), ColorFormat::Hex, TailwindVersion::V4);
        assert_eq!(back, original, "{format}");
    }
}
