//! Playing animations in place on the terminal.

use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveDown, Show};
use crossterm::{execute, queue};

use super::raw_mode::RawModeGuard;
use crate::animation::{play, AnimatedSource, CancelSignal, Playback, PlayerError};
use crate::ascii::RenderConfig;

/// Frame post-processing for in-place playback.
///
/// In raw mode `\n` no longer returns the carriage, so line endings become
/// `\r\n`. After the frame the cursor moves back up `height` rows so the next
/// frame overwrites this one.
pub fn frame_transform(height: usize, raw: bool) -> impl Fn(String) -> String + Sync {
    move |frame| {
        let frame = if raw { frame.replace('\n', "\r\n") } else { frame };
        format!("{}\x1b[{}A\r", frame, height)
    }
}

/// Row count for cursor movement, saturating at the largest move the
/// terminal commands can express.
fn cursor_rows(height: usize) -> u16 {
    u16::try_from(height).unwrap_or(u16::MAX)
}

/// Play `source` on `out`, holding raw mode and a hidden cursor for the
/// duration. The cursor ends up below the last frame.
pub async fn play_in_terminal<W: Write>(
    source: &AnimatedSource,
    config: &RenderConfig,
    out: &mut W,
    cancel: &mut CancelSignal,
) -> Result<Playback, PlayerError> {
    config.validate()?;

    let raw = RawModeGuard::try_enter();
    let transform = frame_transform(config.height, raw.is_some());

    execute!(out, Hide)?;
    let result = play(source, config, transform, out, cancel).await;

    queue!(out, MoveDown(cursor_rows(config.height)), Show)?;
    out.flush()?;
    drop(raw);

    result
}

/// Ensure the cursor is visible, e.g. before exiting on an interrupt.
pub fn restore_cursor() -> io::Result<()> {
    execute!(io::stdout(), Show)
}
