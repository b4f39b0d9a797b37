//! ASCII renderer for still images.
//!
//! The pipeline for one image is:
//!
//! 1. **Sampling** - nearest-neighbor pick of one source pixel per cell
//! 2. **Character mapping** - mean brightness to a position on the ramp
//! 3. **Colorizing** - optional ANSI 256-color or truecolor escape per cell
//!
//! # Character Sets
//!
//! Any non-empty ramp works; presets are available via [`CharSet`]:
//! - `Standard` - 11-level ASCII density ramp
//! - `Blocks` - Unicode block characters
//! - `Minimal` - 4-level clean look

mod charset;
mod color;
mod dimensions;
mod mapping;
mod pixel;
mod render;

pub use charset::{CharSet, BLOCKS_CHARSET, MINIMAL_CHARSET, STANDARD_CHARSET};
pub use color::{colorize, push_colorized, to_ansi256};
pub use dimensions::{calculate_dimensions, DimensionRequest, Fill, DEFAULT_CHAR_ASPECT_RATIO};
pub use mapping::{brightness_index, char_for};
pub use pixel::{Bounds, Rgba16, Rgba16Image, SourceImage};
pub use render::{render, RenderConfig};

pub(crate) use render::render_validated;
