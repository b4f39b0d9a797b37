//! Command-line interface definitions and helpers.
//!
//! Argument parsing, option resolution against the config file and
//! environment, and the `config` subcommand handlers.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use std::path::{Path, PathBuf};

use crate::ascii::{self, DimensionRequest, Fill};
use crate::config::{self, Config, ConfigFileError, RenderOptions, DEFAULT_CONFIG};

/// Value of `COLORTERM` that turns on 24-bit color by default.
pub const TRUECOLOR_ENV_VALUE: &str = "truecolor";

// ==================== CLI Enums ====================

/// Named character ramp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CharacterSet {
    Standard,
    Blocks,
    Minimal,
}

impl From<CharacterSet> for ascii::CharSet {
    fn from(c: CharacterSet) -> Self {
        match c {
            CharacterSet::Standard => ascii::CharSet::Standard,
            CharacterSet::Blocks => ascii::CharSet::Blocks,
            CharacterSet::Minimal => ascii::CharSet::Minimal,
        }
    }
}

/// Which terminal dimension the output should fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FullMode {
    /// Fill the terminal width
    #[value(name = "w")]
    Width,
    /// Fill the terminal height
    #[value(name = "h")]
    Height,
    /// Fill the whole terminal, ignoring aspect ratio
    #[value(name = "term")]
    Terminal,
}

impl From<FullMode> for Fill {
    fn from(m: FullMode) -> Self {
        match m {
            FullMode::Width => Fill::Width,
            FullMode::Height => Fill::Height,
            FullMode::Terminal => Fill::Terminal,
        }
    }
}

// ==================== CLI Arguments ====================

/// Render images and animated GIFs as ASCII art in the terminal
#[derive(Parser, Debug)]
#[command(name = "img2ascii")]
#[command(version, about = "Render images as ASCII art in the terminal", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
#[command(after_help = "Reads the image from stdin when no sources are given.\n\
Press q, Esc or Space to stop an animation, Ctrl+C to quit.")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Image files or http(s) URLs
    pub sources: Vec<String>,

    /// Characters to draw with, darkest to lightest
    #[arg(long, value_name = "CHARS")]
    pub map: Option<String>,

    /// Named character ramp (ignored when --map is set)
    #[arg(long)]
    pub charset: Option<CharacterSet>,

    /// Output width in characters
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: Option<u32>,

    /// Output height in characters
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: Option<u32>,

    /// Fill the terminal width, height or both
    #[arg(long)]
    pub full: Option<FullMode>,

    /// Colorize output with ANSI escapes
    #[arg(long)]
    pub color: bool,

    /// Use 24-bit color instead of the 256-color palette
    #[arg(long, value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub truecolor: Option<bool>,

    /// Draw fully transparent pixels as blanks
    #[arg(long)]
    pub transparent: bool,

    /// Color the background instead of the character
    #[arg(long = "bg")]
    pub background: bool,

    /// Play animated GIFs instead of printing the first frame
    #[arg(long, value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub animate: Option<bool>,

    /// Config file path
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}

impl Args {
    /// Path of the config file in effect.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(config::default_path)
    }

    /// Log level for the number of `-v` flags.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }

    /// Combine flags, the config file and `COLORTERM` into render options.
    ///
    /// Flags win over the file, the file wins over the environment.
    pub fn render_options(
        &self,
        file: &Config,
        colorterm: Option<&str>,
    ) -> Result<RenderOptions, ConfigFileError> {
        let char_map = match (&self.map, self.charset, &file.render.charmap) {
            (Some(map), _, _) => map.clone(),
            (None, Some(set), _) => ascii::CharSet::from(set).ramp().to_string(),
            (None, None, Some(map)) => map.clone(),
            (None, None, None) => file.charset()?.unwrap_or_default().ramp().to_string(),
        };

        let true_color = self
            .truecolor
            .or(file.render.truecolor)
            .unwrap_or_else(|| colorterm == Some(TRUECOLOR_ENV_VALUE));

        Ok(RenderOptions {
            char_map,
            dimensions: DimensionRequest {
                width: self.width,
                height: self.height,
                fill: self.full.map(Fill::from),
            },
            color: self.color || file.render.color.unwrap_or(false),
            true_color,
            transparent: self.transparent || file.render.transparent.unwrap_or(false),
            background: self.background || file.render.background.unwrap_or(false),
            animate: self.animate.or(file.playback.animate).unwrap_or(true),
        })
    }
}

// ==================== Subcommand Handlers ====================

/// Handle config subcommand actions.
pub fn handle_config_action(
    action: ConfigAction,
    path: &Path,
    options: &RenderOptions,
) -> std::io::Result<()> {
    match action {
        ConfigAction::Show => {
            print!("{}", describe_options(options));
            println!();
            if path.exists() {
                println!("Config file: {} (exists)", path.display());
            } else {
                println!("Config file: {} (not found)", path.display());
            }
            Ok(())
        }
        ConfigAction::Init => {
            if path.exists() {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::AlreadyExists,
                    format!("config file already exists: {}", path.display()),
                ));
            }

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, DEFAULT_CONFIG)?;

            println!("Created config file: {}", path.display());
            Ok(())
        }
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

/// Human-readable summary of the effective settings.
pub fn describe_options(options: &RenderOptions) -> String {
    let size = |v: Option<u32>| v.map_or_else(|| "auto".to_string(), |v| v.to_string());
    let fill = match options.dimensions.fill {
        None => "none",
        Some(Fill::Width) => "w",
        Some(Fill::Height) => "h",
        Some(Fill::Terminal) => "term",
    };

    let mut out = String::from("Current configuration:\n");
    out.push_str(&format!("  Charmap: {:?}\n", options.char_map));
    out.push_str(&format!("  Width: {}\n", size(options.dimensions.width)));
    out.push_str(&format!("  Height: {}\n", size(options.dimensions.height)));
    out.push_str(&format!("  Full: {}\n", fill));
    out.push_str(&format!("  Color: {}\n", yes_no(options.color)));
    out.push_str(&format!("  Truecolor: {}\n", yes_no(options.true_color)));
    out.push_str(&format!("  Transparent: {}\n", yes_no(options.transparent)));
    out.push_str(&format!("  Background: {}\n", yes_no(options.background)));
    out.push_str(&format!("  Animate: {}\n", yes_no(options.animate)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ascii::{CharSet, BLOCKS_CHARSET, MINIMAL_CHARSET, STANDARD_CHARSET};

    // ==================== CLI Default Values Tests ====================

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["img2ascii"]);
        assert!(args.sources.is_empty());
        assert!(args.map.is_none());
        assert!(args.charset.is_none());
        assert!(args.width.is_none());
        assert!(args.height.is_none());
        assert!(args.full.is_none());
        assert!(!args.color);
        assert!(args.truecolor.is_none());
        assert!(!args.transparent);
        assert!(!args.background);
        assert!(args.animate.is_none());
        assert!(args.config.is_none());
        assert_eq!(args.verbose, 0);
        assert!(args.command.is_none());
    }

    #[test]
    fn test_args_sources() {
        let args = Args::parse_from(["img2ascii", "cat.png", "https://example.com/dog.gif"]);
        assert_eq!(args.sources, vec!["cat.png", "https://example.com/dog.gif"]);
    }

    #[test]
    fn test_args_optional_bools() {
        let args = Args::parse_from(["img2ascii", "--truecolor", "--animate=false"]);
        assert_eq!(args.truecolor, Some(true));
        assert_eq!(args.animate, Some(false));

        let args = Args::parse_from(["img2ascii", "--truecolor=false", "x.gif"]);
        assert_eq!(args.truecolor, Some(false));
        assert_eq!(args.sources, vec!["x.gif"]);
    }

    #[test]
    fn test_args_flags() {
        let args = Args::parse_from(["img2ascii", "--color", "--transparent", "--bg", "-vv"]);
        assert!(args.color);
        assert!(args.transparent);
        assert!(args.background);
        assert_eq!(args.log_level(), LevelFilter::Debug);
    }

    #[test]
    fn test_args_dimensions() {
        let args = Args::parse_from(["img2ascii", "--width", "40", "--height", "10", "--full", "term"]);
        assert_eq!(args.width, Some(40));
        assert_eq!(args.height, Some(10));
        assert_eq!(args.full, Some(FullMode::Terminal));
    }

    #[test]
    fn test_args_zero_width_rejected() {
        assert!(Args::try_parse_from(["img2ascii", "--width", "0"]).is_err());
    }

    #[test]
    fn test_args_full_values() {
        for (value, expected) in [
            ("w", FullMode::Width),
            ("h", FullMode::Height),
            ("term", FullMode::Terminal),
        ] {
            let args = Args::parse_from(["img2ascii", "--full", value]);
            assert_eq!(args.full, Some(expected));
        }
    }

    #[test]
    fn test_args_charset_values() {
        let args = Args::parse_from(["img2ascii", "--charset", "blocks"]);
        assert_eq!(args.charset, Some(CharacterSet::Blocks));

        let args = Args::parse_from(["img2ascii", "--charset", "minimal"]);
        assert_eq!(args.charset, Some(CharacterSet::Minimal));
    }

    #[test]
    fn test_args_config_subcommands() {
        let args = Args::parse_from(["img2ascii", "config", "show"]);
        assert!(matches!(
            args.command,
            Some(Command::Config {
                action: ConfigAction::Show
            })
        ));

        let args = Args::parse_from(["img2ascii", "config", "init"]);
        assert!(matches!(
            args.command,
            Some(Command::Config {
                action: ConfigAction::Init
            })
        ));
    }

    #[test]
    fn test_log_level() {
        assert_eq!(Args::parse_from(["img2ascii"]).log_level(), LevelFilter::Warn);
        assert_eq!(Args::parse_from(["img2ascii", "-v"]).log_level(), LevelFilter::Info);
    }

    // ==================== Option Resolution Tests ====================

    #[test]
    fn test_render_options_defaults() {
        let args = Args::parse_from(["img2ascii"]);
        let options = args.render_options(&Config::default(), None).unwrap();
        assert_eq!(options, RenderOptions::default());
    }

    #[test]
    fn test_map_wins_over_charset() {
        let args = Args::parse_from(["img2ascii", "--map", " #", "--charset", "blocks"]);
        let options = args.render_options(&Config::default(), None).unwrap();
        assert_eq!(options.char_map, " #");
    }

    #[test]
    fn test_cli_charset_wins_over_file() {
        let file = Config::parse("[render]\ncharmap = \"ab\"").unwrap();
        let args = Args::parse_from(["img2ascii", "--charset", "minimal"]);
        let options = args.render_options(&file, None).unwrap();
        assert_eq!(options.char_map, MINIMAL_CHARSET);
    }

    #[test]
    fn test_file_charmap_and_charset() {
        let args = Args::parse_from(["img2ascii"]);

        let file = Config::parse("[render]\ncharmap = \"ab\"\ncharset = \"blocks\"").unwrap();
        assert_eq!(args.render_options(&file, None).unwrap().char_map, "ab");

        let file = Config::parse("[render]\ncharset = \"blocks\"").unwrap();
        assert_eq!(args.render_options(&file, None).unwrap().char_map, BLOCKS_CHARSET);

        let file = Config::parse("[render]\ncharset = \"nope\"").unwrap();
        assert!(matches!(
            args.render_options(&file, None),
            Err(ConfigFileError::UnknownCharset { .. })
        ));
    }

    #[test]
    fn test_truecolor_precedence() {
        let args = Args::parse_from(["img2ascii"]);
        assert!(args
            .render_options(&Config::default(), Some("truecolor"))
            .unwrap()
            .true_color);
        assert!(!args
            .render_options(&Config::default(), Some("24bit"))
            .unwrap()
            .true_color);

        let file = Config::parse("[render]\ntruecolor = false").unwrap();
        assert!(!args.render_options(&file, Some("truecolor")).unwrap().true_color);

        let args = Args::parse_from(["img2ascii", "--truecolor"]);
        assert!(args.render_options(&file, None).unwrap().true_color);
    }

    #[test]
    fn test_animate_precedence() {
        let file = Config::parse("[playback]\nanimate = false").unwrap();
        let args = Args::parse_from(["img2ascii"]);
        assert!(!args.render_options(&file, None).unwrap().animate);

        let args = Args::parse_from(["img2ascii", "--animate"]);
        assert!(args.render_options(&file, None).unwrap().animate);
    }

    #[test]
    fn test_file_flags_apply() {
        let file = Config::parse("[render]\ncolor = true\nbackground = true").unwrap();
        let args = Args::parse_from(["img2ascii"]);
        let options = args.render_options(&file, None).unwrap();
        assert!(options.color);
        assert!(options.background);
        assert!(!options.transparent);
    }

    #[test]
    fn test_dimension_request() {
        let args = Args::parse_from(["img2ascii", "--width", "20", "--full", "h"]);
        let options = args.render_options(&Config::default(), None).unwrap();
        assert_eq!(options.dimensions.width, Some(20));
        assert_eq!(options.dimensions.height, None);
        assert_eq!(options.dimensions.fill, Some(Fill::Height));
    }

    #[test]
    fn test_charset_to_ascii_charset() {
        assert_eq!(CharSet::from(CharacterSet::Standard), CharSet::Standard);
        assert_eq!(CharSet::from(CharacterSet::Blocks), CharSet::Blocks);
        assert_eq!(CharSet::from(CharacterSet::Minimal), CharSet::Minimal);
        assert_eq!(CharSet::Standard.ramp(), STANDARD_CHARSET);
    }

    // ==================== Handler Tests ====================

    #[test]
    fn test_config_init_writes_default_and_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let options = RenderOptions::default();

        handle_config_action(ConfigAction::Init, &path, &options).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);

        let err = handle_config_action(ConfigAction::Init, &path, &options).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::AlreadyExists);
    }

    #[test]
    fn test_describe_options() {
        let text = describe_options(&RenderOptions::default());
        assert!(text.contains("Width: auto"));
        assert!(text.contains("Animate: yes"));
        assert!(text.contains("Color: no"));
    }
}
