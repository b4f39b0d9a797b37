//! Animated source types: raw GIF frame patches and playback metadata.

use std::time::Duration;

use image::RgbaImage;

use crate::ascii::{Bounds, Rgba16, SourceImage};

/// How the canvas is prepared after a frame has been shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Disposal {
    /// No disposal specified; behaves like [`Disposal::DoNotDispose`].
    #[default]
    Unspecified,
    /// Leave the frame on the canvas.
    DoNotDispose,
    /// Clear the frame's rectangle to transparent.
    RestoreToBackground,
    /// Restore the canvas to its state before the frame was drawn.
    RestoreToPrevious,
}

impl From<gif::DisposalMethod> for Disposal {
    fn from(method: gif::DisposalMethod) -> Self {
        match method {
            gif::DisposalMethod::Any => Disposal::Unspecified,
            gif::DisposalMethod::Keep => Disposal::DoNotDispose,
            gif::DisposalMethod::Background => Disposal::RestoreToBackground,
            gif::DisposalMethod::Previous => Disposal::RestoreToPrevious,
        }
    }
}

/// Number of times an animation is played.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopCount {
    /// Loop until cancelled.
    Infinite,
    /// Play once, then repeat this many more times.
    Repeat(u16),
}

impl Default for LoopCount {
    fn default() -> Self {
        LoopCount::Repeat(0)
    }
}

impl LoopCount {
    /// Total number of passes, or `None` when looping forever.
    pub fn passes(&self) -> Option<u32> {
        match self {
            LoopCount::Infinite => None,
            LoopCount::Repeat(n) => Some(*n as u32 + 1),
        }
    }
}

impl From<gif::Repeat> for LoopCount {
    fn from(repeat: gif::Repeat) -> Self {
        match repeat {
            gif::Repeat::Infinite => LoopCount::Infinite,
            gif::Repeat::Finite(n) => LoopCount::Repeat(n),
        }
    }
}

/// One GIF frame as stored in the file: a patch positioned on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct GifFrame {
    /// Pixels of the patch; transparent where the frame doesn't draw.
    pub patch: RgbaImage,
    /// Horizontal offset of the patch on the canvas.
    pub left: u32,
    /// Vertical offset of the patch on the canvas.
    pub top: u32,
    pub disposal: Disposal,
    /// Delay after this frame in hundredths of a second.
    pub delay: u16,
}

impl GifFrame {
    /// Patch at the canvas origin with no disposal and no delay.
    pub fn new(patch: RgbaImage) -> Self {
        Self {
            patch,
            left: 0,
            top: 0,
            disposal: Disposal::Unspecified,
            delay: 0,
        }
    }

    pub fn with_offset(mut self, left: u32, top: u32) -> Self {
        self.left = left;
        self.top = top;
        self
    }

    pub fn with_disposal(mut self, disposal: Disposal) -> Self {
        self.disposal = disposal;
        self
    }

    pub fn with_delay(mut self, delay: u16) -> Self {
        self.delay = delay;
        self
    }

    /// Time to wait after showing this frame.
    pub fn delay_duration(&self) -> Duration {
        Duration::from_millis(self.delay as u64 * 10)
    }
}

impl SourceImage for GifFrame {
    fn bounds(&self) -> Bounds {
        Bounds::new(self.left, self.top, self.patch.width(), self.patch.height())
    }

    fn color_at(&self, x: u32, y: u32) -> Rgba16 {
        if !self.bounds().contains(x, y) {
            return Rgba16::TRANSPARENT;
        }
        Rgba16::from_rgba8(self.patch.get_pixel(x - self.left, y - self.top).0)
    }
}

/// A decoded animation: frame patches plus canvas size and loop count.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnimatedSource {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub frames: Vec<GifFrame>,
    pub loop_count: LoopCount,
}

impl AnimatedSource {
    /// Per-frame delays, in frame order.
    pub fn delays(&self) -> Vec<Duration> {
        self.frames.iter().map(GifFrame::delay_duration).collect()
    }
}
