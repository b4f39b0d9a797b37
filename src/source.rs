//! Decoding of acquired image bytes.
//!
//! Still images go through the `image` crate (JPEG, PNG, GIF, BMP, TIFF,
//! WebP). Animated GIFs are decoded with the `gif` crate directly so the raw
//! frame patches, disposal methods and loop count stay available for the
//! compositor.

use image::{ImageFormat, RgbaImage};

use crate::animation::{AnimatedSource, GifFrame, LoopCount};
use crate::ascii::Rgba16Image;
use crate::error::Error;

fn decode_error(name: &str, message: impl ToString) -> Error {
    Error::Decode {
        name: name.to_string(),
        message: message.to_string(),
    }
}

/// Check whether `bytes` look like a GIF file.
pub fn is_gif(bytes: &[u8]) -> bool {
    matches!(image::guess_format(bytes), Ok(ImageFormat::Gif))
}

/// A decoded source, ready for the renderer or the player.
#[derive(Debug)]
pub enum Decoded {
    Still(Rgba16Image),
    Animated(AnimatedSource),
}

/// Decode `bytes` for display.
///
/// With `animate` set, GIFs take the animation path. A GIF whose frames
/// cannot all be decoded, e.g. a partial download, falls back to a still
/// image of its first frame.
pub fn decode(name: &str, bytes: &[u8], animate: bool) -> Result<Decoded, Error> {
    if animate && is_gif(bytes) {
        match decode_animation(name, bytes) {
            Ok(animation) => return Ok(Decoded::Animated(animation)),
            Err(e) => log::debug!("{}; showing first frame only", e),
        }
    }
    decode_image(name, bytes).map(Decoded::Still)
}

/// Decode a still image. For animated formats this is the first frame.
pub fn decode_image(name: &str, bytes: &[u8]) -> Result<Rgba16Image, Error> {
    let img = image::load_from_memory(bytes).map_err(|e| decode_error(name, e))?;
    log::debug!("decoded {}: {}x{} {:?}", name, img.width(), img.height(), img.color());
    Ok(img.to_rgba16())
}

/// Decode every frame of a GIF without compositing them.
pub fn decode_animation(name: &str, bytes: &[u8]) -> Result<AnimatedSource, Error> {
    let mut options = gif::DecodeOptions::new();
    options.set_color_output(gif::ColorOutput::RGBA);
    let mut decoder = options.read_info(bytes).map_err(|e| decode_error(name, e))?;

    let canvas_width = decoder.width() as u32;
    let canvas_height = decoder.height() as u32;

    let mut frames = Vec::new();
    while let Some(frame) = decoder.read_next_frame().map_err(|e| decode_error(name, e))? {
        let patch = RgbaImage::from_raw(
            frame.width as u32,
            frame.height as u32,
            frame.buffer.to_vec(),
        )
        .ok_or_else(|| decode_error(name, "frame data does not match frame size"))?;

        frames.push(GifFrame {
            patch,
            left: frame.left as u32,
            top: frame.top as u32,
            disposal: frame.dispose.into(),
            delay: frame.delay,
        });
    }

    if frames.is_empty() {
        return Err(decode_error(name, "gif contains no frames"));
    }

    // The loop extension may follow the first frame, so read it last
    let loop_count: LoopCount = decoder.repeat().into();

    log::debug!(
        "decoded {}: {} frames on {}x{} canvas, loop {:?}",
        name,
        frames.len(),
        canvas_width,
        canvas_height,
        loop_count
    );

    Ok(AnimatedSource {
        canvas_width,
        canvas_height,
        frames,
        loop_count,
    })
}
