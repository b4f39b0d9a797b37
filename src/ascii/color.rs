//! ANSI color escape sequences for rendered cells.

use std::fmt::Write;

use super::pixel::Rgba16;

/// SGR parameter selecting the foreground color.
const FOREGROUND: u8 = 38;
/// SGR parameter selecting the background color.
const BACKGROUND: u8 = 48;

/// Wrap `ch` in the escape sequence for `color`.
///
/// With `transparent` set, a pixel with zero alpha becomes a bare space.
/// Otherwise the character is colored with 24-bit RGB when `true_color` is
/// set or with the nearest entry of the 6x6x6 cube of the 256-color palette,
/// and styling is reset right after it.
pub fn colorize(ch: char, color: Rgba16, true_color: bool, transparent: bool, background: bool) -> String {
    let mut out = String::with_capacity(24);
    push_colorized(&mut out, ch, color, true_color, transparent, background);
    out
}

/// Append the colorized cell to `out` without allocating a new string.
pub fn push_colorized(
    out: &mut String,
    ch: char,
    color: Rgba16,
    true_color: bool,
    transparent: bool,
    background: bool,
) {
    if transparent && color.a == 0 {
        out.push(' ');
        return;
    }

    let prefix = if background { BACKGROUND } else { FOREGROUND };

    // Writing into a String cannot fail
    let _ = if true_color {
        write!(
            out,
            "\x1b[{};2;{};{};{}m{}\x1b[0m",
            prefix,
            color.r >> 8,
            color.g >> 8,
            color.b >> 8,
            ch
        )
    } else {
        write!(out, "\x1b[{};5;{}m{}\x1b[0m", prefix, to_ansi256(color), ch)
    };
}

/// Index into the 6x6x6 color cube of the 256-color palette (16..=231).
pub fn to_ansi256(color: Rgba16) -> u8 {
    let level = |c: u16| (c as f64 / 65535.0 * 5.0).round() as u8;
    16 + 36 * level(color.r) + 6 * level(color.g) + level(color.b)
}
