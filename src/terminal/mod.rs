//! Terminal management module - size detection, raw mode, abort keys and in-place playback.

mod keys;
mod playback;
mod raw_mode;

pub use keys::{
    handle_key_event, setup_ctrlc_handler, spawn_key_listener, Interrupt, KeyAction,
    INTERRUPT_EXIT_CODE,
};
pub use playback::{frame_transform, play_in_terminal, restore_cursor};
pub use raw_mode::RawModeGuard;

/// Terminal size in (columns, rows), or (0, 0) when there is no terminal.
pub fn size() -> (u16, u16) {
    crossterm::terminal::size().unwrap_or((0, 0))
}
