//! Brightness to character mapping.

use super::pixel::Rgba16;

/// Index into a ramp of `levels` characters for the given color.
///
/// Brightness is the unweighted mean of the three 16-bit channels, scaled
/// onto `0..levels` and rounded. Black maps to 0 and white to `levels - 1`.
/// `levels` must be non-zero.
#[inline]
pub fn brightness_index(color: Rgba16, levels: usize) -> usize {
    let sum = color.r as u32 + color.g as u32 + color.b as u32;
    let brightness = sum as f64 / 3.0;
    let index = (brightness * (levels - 1) as f64 / 65535.0).round() as usize;
    index.min(levels - 1)
}

/// Map a color to a character of `ramp`, which is ordered darkest first.
///
/// # Panics
/// Panics if `ramp` is empty; callers validate the ramp beforehand.
#[inline]
pub fn char_for(color: Rgba16, ramp: &[char]) -> char {
    ramp[brightness_index(color, ramp.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

    #[test]
    fn test_black_maps_to_first() {
        assert_eq!(char_for(Rgba16::BLACK, RAMP), ' ');
    }

    #[test]
    fn test_white_maps_to_last() {
        assert_eq!(char_for(Rgba16::WHITE, RAMP), '@');
    }

    #[test]
    fn test_transparent_maps_to_first() {
        assert_eq!(char_for(Rgba16::TRANSPARENT, RAMP), ' ');
    }

    #[test]
    fn test_single_char_ramp() {
        assert_eq!(char_for(Rgba16::WHITE, &['x']), 'x');
        assert_eq!(char_for(Rgba16::BLACK, &['x']), 'x');
    }

    #[test]
    fn test_mid_gray_rounds() {
        // 0x8000 / 0xffff * 9 = 4.5001 -> 5
        let gray = Rgba16::opaque(0x8000, 0x8000, 0x8000);
        assert_eq!(brightness_index(gray, RAMP.len()), 5);
        // 0x7fff / 0xffff * 9 = 4.4999 -> 4
        let gray = Rgba16::opaque(0x7fff, 0x7fff, 0x7fff);
        assert_eq!(brightness_index(gray, RAMP.len()), 4);
    }

    #[test]
    fn test_channels_weighted_equally() {
        let red = Rgba16::opaque(0xffff, 0, 0);
        let green = Rgba16::opaque(0, 0xffff, 0);
        let blue = Rgba16::opaque(0, 0, 0xffff);
        assert_eq!(char_for(red, RAMP), char_for(green, RAMP));
        assert_eq!(char_for(green, RAMP), char_for(blue, RAMP));
        // 1/3 of full brightness over 9 steps = 3
        assert_eq!(brightness_index(red, RAMP.len()), 3);
    }

    #[test]
    fn test_monotonic_in_brightness() {
        let mut last = 0;
        for v in (0..=0xffffu32).step_by(257) {
            let v = v as u16;
            let idx = brightness_index(Rgba16::opaque(v, v, v), RAMP.len());
            assert!(idx >= last);
            last = idx;
        }
        assert_eq!(last, RAMP.len() - 1);
    }
}
