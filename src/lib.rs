//! img2ascii library crate.
//!
//! Renders still images and animated GIFs as ASCII art. This module exposes
//! the components used by the binary and by integration tests.

pub mod animation;
pub mod ascii;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod source;
pub mod terminal;

pub use error::{ConfigError, Error, ErrorKind};
