//! Swatch CLI
//!
//! Command-line front end for the Swatch theme engine.
//!
//! ```bash
//! swatch presets                              # built-in and saved presets
//! swatch export --preset slate --format hex   # stylesheet for a preset
//! swatch import theme.css --save "Ocean"      # paste-import and save
//! swatch list                                 # saved themes as JSON
//! ```

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use swatch_theme::{ColorFormat, TailwindVersion, ThemeMode};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::{StyleSource, Workspace};
use config::SwatchConfig;

#[derive(Parser)]
#[command(name = "swatch")]
#[command(about = "Edit, store and export shadcn-style color themes")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to ./swatch.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Theme store file, overriding the config
    #[arg(long, global = true, value_name = "PATH")]
    store: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every saved theme as JSON, most recently updated first
    List,

    /// Print one saved theme as JSON
    Show {
        /// Theme id
        id: String,
    },

    /// Save a new theme from a preset or a stylesheet
    Create {
        /// Theme name (1 to 50 characters)
        name: String,

        /// Preset to copy the styles from
        #[arg(long, default_value = "default", conflicts_with = "css")]
        preset: String,

        /// Stylesheet to import over the default preset ("-" for stdin)
        #[arg(long, value_name = "FILE")]
        css: Option<PathBuf>,
    },

    /// Rename a saved theme
    Rename {
        /// Theme id
        id: String,
        /// New name
        name: String,
    },

    /// Delete a saved theme
    Delete {
        /// Theme id
        id: String,
    },

    /// Page through saved themes, newest first
    Feed {
        /// Themes per page (defaults to the config)
        #[arg(long)]
        limit: Option<usize>,

        /// Number of pages to load
        #[arg(long, default_value_t = 1)]
        pages: usize,
    },

    /// Generate the stylesheet for a preset or saved theme
    Export {
        /// Preset or saved theme id
        #[arg(long, default_value = "default")]
        preset: String,

        /// Color format: hex, rgb, hsl or oklch
        #[arg(long)]
        format: Option<ColorFormat>,

        /// Tailwind major version: 3 or 4
        #[arg(long)]
        tailwind: Option<TailwindVersion>,

        /// Write to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Generate Next.js layout code loading the theme's fonts
    Layout {
        /// Preset or saved theme id
        #[arg(long, default_value = "default")]
        preset: String,
    },

    /// Import a stylesheet over a preset and print or save the result
    Import {
        /// Stylesheet ("-" for stdin)
        file: PathBuf,

        /// Preset the import is merged over
        #[arg(long, default_value = "default")]
        preset: String,

        /// Save the result as a new theme with this name
        #[arg(long, value_name = "NAME")]
        save: Option<String>,
    },

    /// Check text/background contrast against WCAG AA
    Contrast {
        /// Preset or saved theme id
        #[arg(long, default_value = "default")]
        preset: String,

        /// Only check one mode: light or dark
        #[arg(long)]
        mode: Option<ThemeMode>,

        /// Exit with an error when a pair fails
        #[arg(long)]
        strict: bool,
    },

    /// List built-in and saved presets
    Presets,

    /// Print the effective configuration
    Config,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// `SWATCH_LOG` wins over `RUST_LOG`; logs go to stderr.
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("SWATCH_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Failed to read working directory")?;
    let mut config = SwatchConfig::load(cli.config.as_deref(), &cwd)?;
    if let Some(store) = cli.store {
        config.store.path = store;
    }
    debug!(store = %config.store.path.display(), "configuration loaded");

    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();

    match cli.command {
        Commands::List => {
            let listed =
                Workspace::open(&config).and_then(|ws| commands::list(&ws, &mut stdout));
            if let Err(err) = listed {
                error!(error = %format!("{err:#}"), "Failed to list themes");
                writeln!(stdout, r#"{{"error":"Failed to list themes"}}"#)?;
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Show { id } => {
            let ws = Workspace::open(&config)?;
            commands::show(&ws, &id, &mut stdout)?;
        }
        Commands::Create { name, preset, css } => {
            let mut ws = Workspace::open(&config)?;
            match css {
                Some(path) => {
                    let css = read_input(&path)?;
                    let source = StyleSource::Css {
                        base: commands::default_preset(),
                        css: &css,
                    };
                    commands::create(&mut ws, &name, source, &mut stdout, &mut stderr)?;
                }
                None => {
                    let source = StyleSource::Preset(&preset);
                    commands::create(&mut ws, &name, source, &mut stdout, &mut stderr)?;
                }
            }
        }
        Commands::Rename { id, name } => {
            let mut ws = Workspace::open(&config)?;
            commands::rename(&mut ws, &id, &name, &mut stdout)?;
        }
        Commands::Delete { id } => {
            let mut ws = Workspace::open(&config)?;
            commands::delete(&mut ws, &id, &mut stdout)?;
        }
        Commands::Feed { limit, pages } => {
            let ws = Workspace::open(&config)?;
            let page_size = limit.unwrap_or(config.feed.page_size);
            commands::feed(&ws, page_size, pages.max(1), &mut stdout)?;
        }
        Commands::Export {
            preset,
            format,
            tailwind,
            output,
        } => {
            let ws = Workspace::open(&config)?;
            let format = format.unwrap_or(config.export.format);
            let tailwind = tailwind.unwrap_or(config.export.tailwind);
            match output {
                Some(path) => {
                    let mut buffer = Vec::new();
                    commands::export(&ws, &preset, format, tailwind, &mut buffer)?;
                    std::fs::write(&path, buffer)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                }
                None => commands::export(&ws, &preset, format, tailwind, &mut stdout)?,
            }
        }
        Commands::Layout { preset } => {
            let ws = Workspace::open(&config)?;
            commands::layout(&ws, &preset, &mut stdout)?;
        }
        Commands::Import { file, preset, save } => {
            let css = read_input(&file)?;
            let mut ws = Workspace::open(&config)?;
            match save {
                Some(name) => {
                    let source = StyleSource::Css {
                        base: &preset,
                        css: &css,
                    };
                    commands::create(&mut ws, &name, source, &mut stdout, &mut stderr)?;
                }
                None => commands::import(&ws, &preset, &css, &mut stdout, &mut stderr)?,
            }
        }
        Commands::Contrast {
            preset,
            mode,
            strict,
        } => {
            let ws = Workspace::open(&config)?;
            let modes = match mode {
                Some(mode) => vec![mode],
                None => vec![ThemeMode::Light, ThemeMode::Dark],
            };
            let passes = commands::contrast(&ws, &preset, &modes, &mut stdout)?;
            if strict && !passes {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Presets => {
            let ws = Workspace::open(&config)?;
            commands::presets(&ws, &mut stdout)?;
        }
        Commands::Config => {
            write!(stdout, "{}", config.to_toml()?)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .context("Failed to read stdin")?;
        return Ok(input);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
