//! Pixel access for images being rendered.

use image::{ImageBuffer, Rgba, RgbaImage};

/// 16-bit-per-channel RGBA image, the decoded form of static sources.
pub type Rgba16Image = ImageBuffer<Rgba<u16>, Vec<u16>>;

/// A color with 16 bits per channel.
///
/// Color channels are premultiplied by alpha, so a fully transparent
/// pixel always reads as black with `a == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba16 {
    pub r: u16,
    pub g: u16,
    pub b: u16,
    pub a: u16,
}

impl Rgba16 {
    pub const BLACK: Rgba16 = Rgba16::opaque(0, 0, 0);
    pub const WHITE: Rgba16 = Rgba16::opaque(0xffff, 0xffff, 0xffff);
    pub const TRANSPARENT: Rgba16 = Rgba16 {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    /// Fully opaque color from 16-bit channels.
    pub const fn opaque(r: u16, g: u16, b: u16) -> Self {
        Self { r, g, b, a: 0xffff }
    }

    /// Convert a straight-alpha 8-bit pixel.
    pub fn from_rgba8(px: [u8; 4]) -> Self {
        let a = px[3] as u32;
        // c * 0x101 widens 8 bits to 16, then scale by alpha/255
        let scale = |c: u8| ((c as u32 * 0x101 * a) / 0xff) as u16;
        Self {
            r: scale(px[0]),
            g: scale(px[1]),
            b: scale(px[2]),
            a: (a * 0x101) as u16,
        }
    }

    /// Convert a straight-alpha 16-bit pixel.
    pub fn from_rgba16(px: [u16; 4]) -> Self {
        let a = px[3] as u32;
        let scale = |c: u16| ((c as u32 * a) / 0xffff) as u16;
        Self {
            r: scale(px[0]),
            g: scale(px[1]),
            b: scale(px[2]),
            a: px[3],
        }
    }
}

/// Rectangle of addressable pixels. `min_x`/`min_y` may be non-zero for
/// images positioned inside a larger canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    pub min_x: u32,
    pub min_y: u32,
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    pub fn new(min_x: u32, min_y: u32, width: u32, height: u32) -> Self {
        Self {
            min_x,
            min_y,
            width,
            height,
        }
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.min_x
            && y >= self.min_y
            && x - self.min_x < self.width
            && y - self.min_y < self.height
    }
}

/// An image the grid renderer can sample.
///
/// Coordinates passed to [`SourceImage::color_at`] are absolute, i.e. they
/// include the bounds offset. Points outside the bounds read as transparent.
pub trait SourceImage {
    fn bounds(&self) -> Bounds;
    fn color_at(&self, x: u32, y: u32) -> Rgba16;
}

impl<T: SourceImage + ?Sized> SourceImage for &T {
    fn bounds(&self) -> Bounds {
        (**self).bounds()
    }

    fn color_at(&self, x: u32, y: u32) -> Rgba16 {
        (**self).color_at(x, y)
    }
}

impl SourceImage for RgbaImage {
    fn bounds(&self) -> Bounds {
        Bounds::new(0, 0, self.width(), self.height())
    }

    fn color_at(&self, x: u32, y: u32) -> Rgba16 {
        self.get_pixel_checked(x, y)
            .map(|px| Rgba16::from_rgba8(px.0))
            .unwrap_or(Rgba16::TRANSPARENT)
    }
}

impl SourceImage for Rgba16Image {
    fn bounds(&self) -> Bounds {
        Bounds::new(0, 0, self.width(), self.height())
    }

    fn color_at(&self, x: u32, y: u32) -> Rgba16 {
        self.get_pixel_checked(x, y)
            .map(|px| Rgba16::from_rgba16(px.0))
            .unwrap_or(Rgba16::TRANSPARENT)
    }
}
