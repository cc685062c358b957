//! Command-line interface for glyph-atlas.
//!
//! Parses arguments, merges them over the configuration file and produces the
//! `RenderOptions` the application runs with. The `init-config` subcommand
//! writes a default configuration file and exits.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glyph_atlas_config::{CharsetName, Config, LogLevel};
use glyph_atlas_fonts::{Charset, CharsetFlags};

use crate::app::RenderOptions;

/// glyph-atlas - Render a message through a packed glyph atlas
#[derive(Parser, Debug)]
#[command(name = "glyph-atlas")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Message to render
    #[arg(value_name = "MESSAGE", required = true)]
    pub message: Option<String>,

    /// Font file to rasterize (overrides config)
    #[arg(long, value_name = "PATH")]
    pub font: Option<PathBuf>,

    /// Text height in pixels, ascent to descent (overrides config)
    #[arg(long, value_name = "PX")]
    pub size: Option<f32>,

    /// Additional charset to rasterize; repeatable (adds to config)
    #[arg(long = "charset", value_enum, value_name = "CHARSET")]
    pub charsets: Vec<CharsetArg>,

    /// Output canvas width in pixels (overrides config)
    #[arg(long, value_name = "PIXELS")]
    pub width: Option<u32>,

    /// Output canvas height in pixels (overrides config)
    #[arg(long, value_name = "PIXELS")]
    pub height: Option<u32>,

    /// Path of the rendered PNG
    #[arg(short, long, value_name = "PATH", default_value = "message.png")]
    pub output: PathBuf,

    /// Also write the glyph atlas as a grayscale PNG
    #[arg(long, value_name = "PATH")]
    pub atlas: Option<PathBuf>,

    /// Configuration file (default: ~/.config/glyph-atlas/config.yaml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable outline hinting (overrides config)
    #[arg(long)]
    pub no_hinting: bool,

    /// Set debug log level (overrides config and RUST_LOG)
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevelArg>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a default configuration file
    InitConfig {
        /// Destination (default: ~/.config/glyph-atlas/config.yaml)
        #[arg(long, value_name = "PATH")]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

/// Charset argument for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CharsetArg {
    Latin,
    Greek,
    Cyrillic,
}

impl From<CharsetArg> for CharsetName {
    fn from(arg: CharsetArg) -> Self {
        match arg {
            CharsetArg::Latin => CharsetName::Latin,
            CharsetArg::Greek => CharsetName::Greek,
            CharsetArg::Cyrillic => CharsetName::Cyrillic,
        }
    }
}

/// Log level argument for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for LogLevel {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Off => LogLevel::Off,
            LogLevelArg::Error => LogLevel::Error,
            LogLevelArg::Warn => LogLevel::Warn,
            LogLevelArg::Info => LogLevel::Info,
            LogLevelArg::Debug => LogLevel::Debug,
            LogLevelArg::Trace => LogLevel::Trace,
        }
    }
}

/// Result of CLI processing
pub enum CliResult {
    /// Continue with rendering using these options
    Continue(Box<RenderOptions>),
    /// Exit with the given code (subcommand completed)
    Exit(i32),
}

/// Process CLI arguments and handle subcommands
pub fn process_cli(cli: Cli) -> Result<CliResult> {
    if let Some(Commands::InitConfig { path, force }) = cli.command {
        let path = path.unwrap_or_else(Config::config_path);
        return Ok(match init_config(&path, force) {
            Ok(()) => {
                println!("Wrote default config to {}", path.display());
                CliResult::Exit(0)
            }
            Err(e) => {
                eprintln!("glyph-atlas: error: {e:#}");
                CliResult::Exit(1)
            }
        });
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Could not load config {}", path.display()))?,
        None => Config::load().context("Could not load config")?,
    };
    crate::debug::apply_config_log_level(config.log_level);

    Ok(CliResult::Continue(Box::new(build_options(cli, config)?)))
}

/// Write a default config to `path`, refusing to replace an existing file
/// unless `force` is set.
fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    Config::default().save_to(path)
}

/// Merge CLI overrides over a loaded config and validate the result.
pub fn build_options(cli: Cli, mut config: Config) -> Result<RenderOptions> {
    if let Some(font) = cli.font {
        config.font_path = font;
    }
    if let Some(size) = cli.size {
        config.font_size = size;
    }
    if let Some(width) = cli.width {
        config.canvas_width = width;
    }
    if let Some(height) = cli.height {
        config.canvas_height = height;
    }
    if cli.no_hinting {
        config.hinting = false;
    }
    for charset in cli.charsets {
        config = config.with_charset(charset.into());
    }
    config.validate()?;

    let message = cli.message.context("No message given")?;

    Ok(RenderOptions {
        message,
        font_path: config.font_path,
        font_size: config.font_size,
        charsets: charset_flags(&config.charsets)?,
        hinting: config.hinting,
        canvas_width: config.canvas_width,
        canvas_height: config.canvas_height,
        background_color: config.background_color,
        text_color: config.text_color,
        output: cli.output,
        atlas_output: cli.atlas,
    })
}

/// Map configured charset names onto atlas charset flags.
pub fn charset_flags(names: &[CharsetName]) -> Result<CharsetFlags> {
    names
        .iter()
        .map(|name| name.as_str().parse::<Charset>().map_err(anyhow::Error::msg))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("glyph-atlas").chain(args.iter().copied()))
            .expect("valid arguments")
    }

    #[test]
    fn test_message_is_required() {
        assert!(Cli::try_parse_from(["glyph-atlas"]).is_err());
    }

    #[test]
    fn test_defaults_come_from_config() {
        let options = build_options(parse(&["hello"]), Config::default()).unwrap();
        assert_eq!(options.message, "hello");
        assert_eq!(options.font_size, 32.0);
        assert_eq!(options.canvas_width, 1024);
        assert_eq!(options.output, PathBuf::from("message.png"));
        assert_eq!(options.charsets, CharsetFlags::empty());
        assert!(options.hinting);
        assert!(options.atlas_output.is_none());
    }

    #[test]
    fn test_cli_overrides_config() {
        let cli = parse(&[
            "--font",
            "/tmp/x.ttf",
            "--size",
            "12",
            "--width",
            "300",
            "--height",
            "40",
            "--no-hinting",
            "--atlas",
            "atlas.png",
            "hi",
        ]);
        let options = build_options(cli, Config::default()).unwrap();
        assert_eq!(options.font_path, PathBuf::from("/tmp/x.ttf"));
        assert_eq!(options.font_size, 12.0);
        assert_eq!((options.canvas_width, options.canvas_height), (300, 40));
        assert!(!options.hinting);
        assert_eq!(options.atlas_output, Some(PathBuf::from("atlas.png")));
    }

    #[test]
    fn test_charsets_merge_with_config() {
        let config = Config::default().with_charset(CharsetName::Greek);
        let cli = parse(&["--charset", "cyrillic", "--charset", "greek", "текст"]);
        let options = build_options(cli, config).unwrap();
        assert_eq!(
            options.charsets,
            CharsetFlags::GREEK | CharsetFlags::CYRILLIC
        );
    }

    #[test]
    fn test_charset_flags_from_names() {
        let flags = charset_flags(&[CharsetName::Cyrillic, CharsetName::Latin]).unwrap();
        assert_eq!(flags, CharsetFlags::CYRILLIC | CharsetFlags::LATIN);
        assert_eq!(charset_flags(&[]).unwrap(), CharsetFlags::empty());
    }

    #[test]
    fn test_invalid_size_rejected() {
        let cli = parse(&["--size", "0", "hi"]);
        assert!(build_options(cli, Config::default()).is_err());
    }

    #[test]
    fn test_log_level_arg() {
        let cli = parse(&["--log-level", "debug", "hi"]);
        assert_eq!(cli.log_level.map(LogLevel::from), Some(LogLevel::Debug));
    }

    #[test]
    fn test_init_config_subcommand_parses() {
        let cli = parse(&["init-config", "--force"]);
        assert!(matches!(
            cli.command,
            Some(Commands::InitConfig {
                path: None,
                force: true
            })
        ));
    }

    #[test]
    fn test_init_config_refuses_overwrite() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        init_config(&path, false).unwrap();
        assert!(init_config(&path, false).is_err());
        init_config(&path, true).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }
}
