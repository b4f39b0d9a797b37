//! Reconstructs full canvas frames from GIF frame patches.
//!
//! GIF frames only carry the pixels that changed, positioned somewhere on a
//! shared canvas. Each frame is drawn over the canvas left by its
//! predecessor, and its disposal method decides what the canvas looks like
//! before the next frame is drawn.

use image::{Rgba, RgbaImage};

use super::frames::{AnimatedSource, Disposal, GifFrame};
use crate::ascii::Bounds;

/// Produce one self-contained, canvas-sized bitmap per frame.
pub fn materialize_frames(source: &AnimatedSource) -> Vec<RgbaImage> {
    let Some(first) = source.frames.first() else {
        return Vec::new();
    };

    let mut canvas = RgbaImage::new(source.canvas_width, source.canvas_height);
    let mut previous = canvas.clone();
    copy_patch(&mut canvas, first);

    let mut materialized = Vec::with_capacity(source.frames.len());

    for frame in &source.frames {
        draw_over(&mut canvas, frame);
        materialized.push(canvas.clone());

        match frame.disposal {
            Disposal::RestoreToPrevious => canvas.clone_from(&previous),
            Disposal::RestoreToBackground => {
                clear_rect(&mut canvas, patch_bounds(frame));
                previous.clone_from(&canvas);
            }
            Disposal::Unspecified | Disposal::DoNotDispose => previous.clone_from(&canvas),
        }
    }

    log::debug!(
        "materialized {} frames on a {}x{} canvas",
        materialized.len(),
        source.canvas_width,
        source.canvas_height
    );

    materialized
}

fn patch_bounds(frame: &GifFrame) -> Bounds {
    Bounds::new(frame.left, frame.top, frame.patch.width(), frame.patch.height())
}

/// Visit every patch pixel that lands on the canvas with its canvas position.
fn for_each_on_canvas(
    canvas: &mut RgbaImage,
    frame: &GifFrame,
    mut f: impl FnMut(&mut Rgba<u8>, Rgba<u8>),
) {
    let (canvas_w, canvas_h) = canvas.dimensions();
    for (px, py, src) in frame.patch.enumerate_pixels() {
        let x = frame.left.saturating_add(px);
        let y = frame.top.saturating_add(py);
        if x < canvas_w && y < canvas_h {
            f(canvas.get_pixel_mut(x, y), *src);
        }
    }
}

/// Overwrite the canvas with the patch, transparent pixels included.
fn copy_patch(canvas: &mut RgbaImage, frame: &GifFrame) {
    for_each_on_canvas(canvas, frame, |dst, src| *dst = src);
}

/// Alpha-blend the patch over the canvas.
fn draw_over(canvas: &mut RgbaImage, frame: &GifFrame) {
    for_each_on_canvas(canvas, frame, blend_over);
}

/// Porter-Duff "over" for straight-alpha 8-bit pixels.
fn blend_over(dst: &mut Rgba<u8>, src: Rgba<u8>) {
    let sa = src[3] as u32;
    if sa == 0 {
        return;
    }
    if sa == 255 {
        *dst = src;
        return;
    }

    let da = dst[3] as u32;
    // Both terms scaled by 255 * 255
    let out_a = sa * 255 + da * (255 - sa);
    for i in 0..3 {
        let c = src[i] as u32 * sa * 255 + dst[i] as u32 * da * (255 - sa);
        dst[i] = ((c + out_a / 2) / out_a) as u8;
    }
    dst[3] = ((out_a + 127) / 255) as u8;
}

fn clear_rect(canvas: &mut RgbaImage, rect: Bounds) {
    let (canvas_w, canvas_h) = canvas.dimensions();
    let x_end = rect.min_x.saturating_add(rect.width).min(canvas_w);
    let y_end = rect.min_y.saturating_add(rect.height).min(canvas_h);
    for y in rect.min_y..y_end {
        for x in rect.min_x..x_end {
            canvas.put_pixel(x, y, Rgba([0, 0, 0, 0]));
        }
    }
}
