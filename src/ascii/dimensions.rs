//! Dimension calculation for aspect-ratio-correct ASCII rendering.

/// Terminal character aspect ratio (height / width).
/// Terminal characters are typically ~2x taller than wide, so an image
/// needs half as many rows as its pixel aspect ratio suggests.
pub const DEFAULT_CHAR_ASPECT_RATIO: i64 = 2;

/// Which terminal dimension the output should fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    /// Full terminal width, height derived from the image.
    Width,
    /// Full terminal height, width derived from the image.
    Height,
    /// The whole terminal, ignoring the image aspect ratio.
    Terminal,
}

/// Requested output size. `None` fields are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DimensionRequest {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub fill: Option<Fill>,
}

/// Calculate output dimensions in characters for an image of `img_width` x
/// `img_height` pixels on a terminal of `terminal` (columns, rows).
///
/// One row of the terminal is left free for the prompt. A derived height is
/// `width * img_height / img_width / 2` and a derived width is
/// `height * img_width * 2 / img_height`, both in integer arithmetic.
/// Without an explicit request the output fills the terminal width when the
/// image is wider than the terminal (after aspect correction), otherwise its
/// height.
///
/// The result is not validated and may be zero or negative, e.g. when the
/// terminal size is unknown. `img_width` and `img_height` must be non-zero.
///
/// # Example
/// ```ignore
/// // A 640x480 image, width requested: 40 columns, 15 rows
/// let request = DimensionRequest { width: Some(40), ..Default::default() };
/// assert_eq!(calculate_dimensions(640, 480, &request, (80, 24)), (40, 15));
/// ```
pub fn calculate_dimensions(
    img_width: u32,
    img_height: u32,
    request: &DimensionRequest,
    terminal: (u16, u16),
) -> (i64, i64) {
    let img_w = img_width as i64;
    let img_h = img_height as i64;
    let aspect = DEFAULT_CHAR_ASPECT_RATIO;

    let term_w = terminal.0 as i64;
    // Leave space for the prompt
    let term_h = terminal.1 as i64 - 1;

    let term_aspect = term_w as f64 / term_h as f64 / aspect as f64;
    let img_aspect = img_w as f64 / img_h as f64;

    let height_for = |w: i64| w * img_h / img_w / aspect;
    let width_for = |h: i64| h * img_w * aspect / img_h;

    let requested_w = request.width.map(i64::from);
    let requested_h = request.height.map(i64::from);

    match (request.fill, requested_w, requested_h) {
        (Some(Fill::Terminal), _, _) => (term_w, term_h),
        (Some(Fill::Height), _, _) => (width_for(term_h), term_h),
        (Some(Fill::Width), _, _) => (term_w, height_for(term_w)),
        (None, None, None) if term_aspect < img_aspect => (term_w, height_for(term_w)),
        (None, Some(w), Some(h)) => (w, h),
        (None, Some(w), None) => (w, height_for(w)),
        (None, None, Some(h)) => (width_for(h), h),
        (None, None, None) => (width_for(term_h), term_h),
    }
}
