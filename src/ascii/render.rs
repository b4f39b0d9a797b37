//! Grid renderer: samples a source image onto a character grid.

use super::charset::STANDARD_CHARSET;
use super::color::{colorize, push_colorized};
use super::mapping::char_for;
use super::pixel::{Rgba16, SourceImage};
use crate::error::ConfigError;

/// Options controlling how an image is turned into text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Characters ordered from darkest to lightest.
    pub char_ramp: Vec<char>,
    /// Output width in characters.
    pub width: usize,
    /// Output height in characters.
    pub height: usize,
    /// Emit ANSI color for every cell.
    pub color: bool,
    /// Use 24-bit color instead of the 256-color palette. Only effective with `color`.
    pub true_color: bool,
    /// Render fully transparent pixels as spaces. Only effective with `color`.
    pub transparent: bool,
    /// Color the cell background instead of the glyph. Only effective with `color`.
    pub background: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            char_ramp: STANDARD_CHARSET.chars().collect(),
            width: 80,
            height: 24,
            color: false,
            true_color: false,
            transparent: false,
            background: false,
        }
    }
}

impl RenderConfig {
    /// Check the invariants every render relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.char_ramp.is_empty() {
            Err(ConfigError::EmptyCharMap)
        } else if self.width == 0 {
            Err(ConfigError::NonPositiveWidth)
        } else if self.height == 0 {
            Err(ConfigError::NonPositiveHeight)
        } else {
            Ok(())
        }
    }

    /// Byte length of one rendered cell, used to size output buffers.
    fn cell_size(&self) -> usize {
        if self.color {
            colorize(' ', Rgba16::WHITE, self.true_color, false, false).len()
        } else {
            1
        }
    }
}

/// Render `image` as text according to `config`.
///
/// Each output cell samples exactly one source pixel (nearest neighbor,
/// integer arithmetic); every row ends with `\n`.
pub fn render<I: SourceImage + ?Sized>(image: &I, config: &RenderConfig) -> Result<String, ConfigError> {
    config.validate()?;
    Ok(render_validated(image, config))
}

/// Render with a config that has already passed [`RenderConfig::validate`].
pub(crate) fn render_validated<I: SourceImage + ?Sized>(image: &I, config: &RenderConfig) -> String {
    let width = config.width;
    let height = config.height;

    let bounds = image.bounds();
    let img_w = bounds.width as u64;
    let img_h = bounds.height as u64;

    let mut out = String::with_capacity(config.cell_size() * width * height + height);

    for y in 0..height {
        let src_y = (y as u64 * img_h / height as u64) as u32 + bounds.min_y;
        for x in 0..width {
            let src_x = (x as u64 * img_w / width as u64) as u32 + bounds.min_x;
            let color = image.color_at(src_x, src_y);
            let ch = char_for(color, &config.char_ramp);
            if config.color {
                push_colorized(
                    &mut out,
                    ch,
                    color,
                    config.true_color,
                    config.transparent,
                    config.background,
                );
            } else {
                out.push(ch);
            }
        }
        out.push('\n');
    }

    out
}
