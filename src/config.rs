//! Configuration file handling and render option resolution.
//!
//! Loads defaults from `~/.config/img2ascii/config.toml` (or a custom path)
//! and turns user options into a validated [`RenderConfig`] for a given
//! image size.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::ascii::{calculate_dimensions, CharSet, DimensionRequest, RenderConfig};
use crate::error::ConfigError;

/// Contents written by `img2ascii config init`.
pub const DEFAULT_CONFIG: &str = r#"# img2ascii configuration
# Command-line flags override everything in this file.

[render]
# Characters from darkest to lightest. Takes precedence over `charset`.
# charmap = " .-:=+*#%@$"
# Named ramp: "standard", "blocks" or "minimal"
charset = "standard"
color = false
# Defaults to true when COLORTERM=truecolor
# truecolor = true
transparent = false
background = false

[playback]
animate = true
"#;

/// Configuration file structure.
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub render: RenderSection,
    #[serde(default)]
    pub playback: PlaybackSection,
}

#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
pub struct RenderSection {
    #[serde(default)]
    pub charmap: Option<String>,
    #[serde(default)]
    pub charset: Option<String>,
    #[serde(default)]
    pub color: Option<bool>,
    #[serde(default)]
    pub truecolor: Option<bool>,
    #[serde(default)]
    pub transparent: Option<bool>,
    #[serde(default)]
    pub background: Option<bool>,
}

#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
pub struct PlaybackSection {
    #[serde(default)]
    pub animate: Option<bool>,
}

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigFileError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if path.exists() {
            let content =
                std::fs::read_to_string(&path).map_err(|e| ConfigFileError::IoError {
                    path: path.clone(),
                    source: e,
                })?;
            let config = Self::parse(&content).map_err(|e| ConfigFileError::ParseError {
                path: path.clone(),
                source: e,
            })?;
            log::debug!("loaded config from {}", path.display());
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Named charset from the file, if any.
    pub fn charset(&self) -> Result<Option<CharSet>, ConfigFileError> {
        match self.render.charset.as_deref() {
            None => Ok(None),
            Some(name) => CharSet::from_name(name)
                .map(Some)
                .ok_or_else(|| ConfigFileError::UnknownCharset {
                    name: name.to_string(),
                }),
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("Failed to read config file '{}': {source}", .path.display())]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{}': {source}", .path.display())]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Unknown charset '{name}' (expected standard, blocks or minimal)")]
    UnknownCharset { name: String },
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("img2ascii").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/img2ascii/config.toml")
        })
}

/// Render settings chosen by the user, before an image size is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub char_map: String,
    pub dimensions: DimensionRequest,
    pub color: bool,
    pub true_color: bool,
    pub transparent: bool,
    pub background: bool,
    /// Play animated GIFs instead of printing their first frame.
    pub animate: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            char_map: CharSet::default().ramp().to_string(),
            dimensions: DimensionRequest::default(),
            color: false,
            true_color: false,
            transparent: false,
            background: false,
            animate: true,
        }
    }
}

impl RenderOptions {
    /// Build the render config for an image of `img_width` x `img_height`
    /// pixels shown on a terminal of `terminal` (columns, rows).
    pub fn to_render_config(
        &self,
        img_width: u32,
        img_height: u32,
        terminal: (u16, u16),
    ) -> Result<RenderConfig, ConfigError> {
        if img_width == 0 || img_height == 0 {
            return Err(ConfigError::ImageDimensions);
        }

        let (width, height) = calculate_dimensions(img_width, img_height, &self.dimensions, terminal);

        let config = RenderConfig {
            char_ramp: self.char_map.chars().collect(),
            width: usize::try_from(width).unwrap_or(0),
            height: usize::try_from(height).unwrap_or(0),
            color: self.color,
            true_color: self.true_color,
            transparent: self.transparent,
            background: self.background,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject options that can never produce a valid render config.
    /// Checked against a 1x1 image at startup.
    pub fn validate(&self, terminal: (u16, u16)) -> Result<(), ConfigError> {
        self.to_render_config(1, 1, terminal).map(|_| ())
    }
}
