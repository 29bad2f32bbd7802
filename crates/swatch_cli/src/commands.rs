//! Subcommand implementations
//!
//! Every command writes its result to `out` and diagnostics to `err`, so the
//! binary can hand in stdout/stderr and tests can hand in buffers.

use std::io::Write;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use swatch_store::{JsonFileRepository, PublishedTheme, ThemeFeed, ThemeLibrary, ThemeUpdate};
use swatch_theme::contrast::pair_info;
use swatch_theme::{
    BuiltinPreset, ColorFormat, EditorSession, Outcome, PresetRegistry, SkipReason,
    TailwindVersion, ThemeMode, ThemeStyles, MIN_CONTRAST_RATIO,
};

use crate::config::SwatchConfig;

/// Saved themes plus the registry they are mirrored into.
pub struct Workspace {
    pub library: ThemeLibrary<JsonFileRepository>,
    pub registry: PresetRegistry,
}

impl Workspace {
    pub fn open(config: &SwatchConfig) -> Result<Self> {
        let repo = JsonFileRepository::open(&config.store.path).with_context(|| {
            format!("Failed to open theme store {}", config.store.path.display())
        })?;
        let library = ThemeLibrary::new(repo);
        let mut registry = PresetRegistry::default();
        library.load_into(&mut registry);
        Ok(Self { library, registry })
    }

    /// Editor session positioned on `preset`.
    pub fn session(&self, preset: &str) -> Result<EditorSession> {
        let mut session = EditorSession::with_registry(self.registry.clone());
        match session.apply_preset(preset) {
            Outcome::Applied => Ok(session),
            Outcome::Skipped(SkipReason::UnknownPreset(id)) => {
                bail!("Unknown preset `{id}`. Run `swatch presets` to list them.")
            }
            Outcome::Skipped(reason) => bail!("Could not load preset `{preset}`: {reason:?}"),
        }
    }
}

fn write_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).context("Failed to serialize output")?;
    writeln!(out)?;
    Ok(())
}

pub fn list(workspace: &Workspace, out: &mut dyn Write) -> Result<()> {
    let themes = workspace.library.themes()?;
    write_json(out, &themes)
}

pub fn show(workspace: &Workspace, id: &str, out: &mut dyn Write) -> Result<()> {
    let theme = workspace
        .library
        .theme(id)
        .map_err(|err| anyhow::anyhow!(err.user_message()))?;
    write_json(out, &theme)
}

/// Where the styles of a new theme come from.
pub enum StyleSource<'a> {
    Preset(&'a str),
    Css { base: &'a str, css: &'a str },
}

pub fn create(
    workspace: &mut Workspace,
    name: &str,
    source: StyleSource<'_>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<()> {
    let styles = match source {
        StyleSource::Preset(id) => workspace.session(id)?.state().styles.clone(),
        StyleSource::Css { base, css } => imported_styles(workspace, base, css, err)?,
    };
    let record = workspace
        .library
        .create_theme(&mut workspace.registry, name, styles)
        .map_err(|e| anyhow::anyhow!("Failed to create theme: {}", e.user_message()))?;
    write_json(out, &record)
}

pub fn rename(workspace: &mut Workspace, id: &str, name: &str, out: &mut dyn Write) -> Result<()> {
    let record = workspace
        .library
        .update_theme(&mut workspace.registry, id, ThemeUpdate::rename(name))
        .map_err(|e| anyhow::anyhow!("Failed to update theme: {}", e.user_message()))?;
    write_json(out, &record)
}

pub fn delete(workspace: &mut Workspace, id: &str, out: &mut dyn Write) -> Result<()> {
    let deleted = workspace
        .library
        .delete_theme(&mut workspace.registry, id)
        .map_err(|e| anyhow::anyhow!("Failed to delete theme: {}", e.user_message()))?;
    write_json(out, &deleted)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FeedOutput<'a> {
    themes: Vec<&'a PublishedTheme>,
    next_cursor: Option<&'a str>,
}

/// Up to `pages` pages of the feed as one `{ themes, nextCursor }` object.
pub fn feed(
    workspace: &Workspace,
    page_size: usize,
    pages: usize,
    out: &mut dyn Write,
) -> Result<()> {
    let repo = workspace.library.repository();
    let mut feed = ThemeFeed::new(page_size);
    feed.load_first_page(repo);
    while feed.pages().len() < pages && feed.fetch_next_page(repo) {}

    if let Some(error) = feed.error() {
        bail!("Failed to load themes: {}", error.user_message());
    }

    let output = FeedOutput {
        themes: feed.themes().collect(),
        next_cursor: feed.pages().last().and_then(|page| page.next_cursor.as_deref()),
    };
    write_json(out, &output)
}

pub fn export(
    workspace: &Workspace,
    preset: &str,
    format: ColorFormat,
    tailwind: TailwindVersion,
    out: &mut dyn Write,
) -> Result<()> {
    let session = workspace.session(preset)?;
    out.write_all(session.theme_code(format, tailwind).as_bytes())?;
    Ok(())
}

pub fn layout(workspace: &Workspace, preset: &str, out: &mut dyn Write) -> Result<()> {
    let session = workspace.session(preset)?;
    out.write_all(session.layout_code().as_bytes())?;
    Ok(())
}

/// Merge `css` over `base` and print the resulting styles.
pub fn import(
    workspace: &Workspace,
    base: &str,
    css: &str,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<()> {
    let styles = imported_styles(workspace, base, css, err)?;
    write_json(out, &styles)
}

fn imported_styles(
    workspace: &Workspace,
    base: &str,
    css: &str,
    err: &mut dyn Write,
) -> Result<ThemeStyles> {
    let mut session = workspace.session(base)?;
    let imported = session.import_css(css);
    for diagnostic in &imported.diagnostics {
        writeln!(err, "{diagnostic}")?;
    }
    if imported.is_empty() {
        bail!("No theme variables found in the input");
    }
    Ok(session.state().styles.clone())
}

/// Print the standard pairs; returns whether every pair passes.
pub fn contrast(
    workspace: &Workspace,
    preset: &str,
    modes: &[ThemeMode],
    out: &mut dyn Write,
) -> Result<bool> {
    let session = workspace.session(preset)?;
    let mut all_pass = true;
    for mode in modes {
        writeln!(out, "{mode}")?;
        for result in session.contrast(*mode) {
            let label = pair_info(&result.id).map_or(result.id.as_str(), |(label, _)| label);
            let verdict = if result.passes() { "pass" } else { "FAIL" };
            all_pass &= result.passes();
            writeln!(out, "  {:>6.2}  {verdict}  {label}", result.contrast_ratio)?;
        }
    }
    if !all_pass {
        writeln!(out, "some pairs are below {MIN_CONTRAST_RATIO}:1")?;
    }
    Ok(all_pass)
}

pub fn presets(workspace: &Workspace, out: &mut dyn Write) -> Result<()> {
    for (id, preset) in workspace.registry.all_presets() {
        let source = if preset.is_builtin() { "built-in" } else { "saved" };
        writeln!(out, "{id}\t{}\t{source}", preset.label)?;
    }
    Ok(())
}

/// Preset used when none is given.
pub fn default_preset() -> &'static str {
    BuiltinPreset::Default.id()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;
    use pretty_assertions::assert_eq;
    use swatch_store::ThemeRepository;
    use tempfile::TempDir;

    fn workspace(dir: &TempDir) -> Workspace {
        let config = SwatchConfig {
            store: StoreConfig {
                path: dir.path().join("themes.json"),
            },
            ..SwatchConfig::default()
        };
        Workspace::open(&config).unwrap()
    }

    fn text(buffer: Vec<u8>) -> String {
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn create_list_and_delete() {
        let dir = TempDir::new().unwrap();
        let mut ws = workspace(&dir);

        let mut out = Vec::new();
        create(&mut ws, "Ocean", StyleSource::Preset("slate"), &mut out, &mut Vec::new()).unwrap();
        let created: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let id = created["id"].as_str().unwrap().to_string();
        assert!(ws.library.repository().get(&id).is_ok());

        let reopened = workspace(&dir);
        let mut out = Vec::new();
        list(&reopened, &mut out).unwrap();
        let listed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(listed[0]["name"], "Ocean");

        let mut out = Vec::new();
        presets(&reopened, &mut out).unwrap();
        assert!(text(out).contains(&format!("{id}\tOcean\tsaved")));

        delete(&mut ws, &id, &mut Vec::new()).unwrap();
        assert!(ws.library.repository().get(&id).is_err());
    }

    #[test]
    fn export_saved_theme() {
        let dir = TempDir::new().unwrap();
        let mut ws = workspace(&dir);
        let mut out = Vec::new();
        create(&mut ws, "Zinc copy", StyleSource::Preset("zinc"), &mut out, &mut Vec::new())
            .unwrap();
        let created: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let id = created["id"].as_str().unwrap();

        let mut saved = Vec::new();
        export(&ws, id, ColorFormat::Hex, TailwindVersion::V4, &mut saved).unwrap();
        let mut builtin = Vec::new();
        export(&ws, "zinc", ColorFormat::Hex, TailwindVersion::V4, &mut builtin).unwrap();
        assert_eq!(text(saved), text(builtin));
    }

    #[test]
    fn unknown_preset_is_reported() {
        let dir = TempDir::new().unwrap();
        let ws = workspace(&dir);
        let err = layout(&ws, "missing", &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("Unknown preset `missing`"));
    }

    #[test]
    fn import_reports_diagnostics() {
        let dir = TempDir::new().unwrap();
        let ws = workspace(&dir);
        let mut out = Vec::new();
        let mut err = Vec::new();
        import(
            &ws,
            default_preset(),
            ":root { --primary: #ff0000; --brand: 1; }",
            &mut out,
            &mut err,
        )
        .unwrap();

        let styles: ThemeStyles = serde_json::from_slice(&out).unwrap();
        assert_eq!(
            styles.light.get(swatch_theme::TokenKey::Primary),
            Some("#ff0000")
        );
        assert!(text(err).contains("--brand"));
    }

    #[test]
    fn import_without_tokens_fails() {
        let dir = TempDir::new().unwrap();
        let ws = workspace(&dir);
        let css = "body { color: red; }";
        let imported = import(&ws, default_preset(), css, &mut Vec::new(), &mut Vec::new());
        assert!(imported.is_err());
    }

    #[test]
    fn feed_pages_are_joined() {
        let dir = TempDir::new().unwrap();
        let mut ws = workspace(&dir);
        for i in 0..5 {
            let name = format!("T{i}");
            let source = StyleSource::Preset("neutral");
            create(&mut ws, &name, source, &mut Vec::new(), &mut Vec::new()).unwrap();
        }

        let mut out = Vec::new();
        feed(&ws, 2, 2, &mut out).unwrap();
        let page: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(page["themes"].as_array().unwrap().len(), 4);
        assert!(page["nextCursor"].is_string());
    }

    #[test]
    fn contrast_report_for_default_passes() {
        let dir = TempDir::new().unwrap();
        let ws = workspace(&dir);
        let mut out = Vec::new();
        let passes = contrast(&ws, default_preset(), &[ThemeMode::Light], &mut out).unwrap();
        let report = text(out);
        assert!(report.starts_with("light\n"));
        assert!(report.contains("Base"), "{report}");
        assert_eq!(passes, !report.contains("FAIL"));
    }
}
