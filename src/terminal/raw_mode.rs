//! Raw terminal mode for animation playback, with panic-safe cleanup.

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::io;
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};

/// Set while raw mode is on, so the panic hook knows to restore the terminal.
pub(crate) static RAW_MODE_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Keeps the terminal in raw mode while alive.
///
/// In raw mode keys reach the abort listener immediately instead of after
/// Enter, and `\n` no longer implies a carriage return.
pub struct RawModeGuard {
    _private: (),
}

impl RawModeGuard {
    /// Enter raw mode and return a guard that will restore it on drop.
    ///
    /// # Errors
    /// Returns an error if enabling raw mode fails, e.g. without a TTY
    pub fn enter() -> io::Result<Self> {
        install_panic_hook();

        enable_raw_mode()?;
        RAW_MODE_ACTIVE.store(true, Ordering::SeqCst);

        Ok(Self { _private: () })
    }

    /// Enter raw mode if possible. Playback works without it, only line
    /// endings and key handling differ.
    pub fn try_enter() -> Option<Self> {
        match Self::enter() {
            Ok(guard) => Some(guard),
            Err(e) => {
                log::debug!("raw mode unavailable: {}", e);
                None
            }
        }
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        RAW_MODE_ACTIVE.store(false, Ordering::SeqCst);
        let _ = disable_raw_mode();
    }
}

/// Install a panic hook that restores the terminal before the panic
/// message is printed: raw mode off and the cursor visible again.
pub(crate) fn install_panic_hook() {
    static HOOK_INSTALLED: AtomicBool = AtomicBool::new(false);

    if HOOK_INSTALLED.swap(true, Ordering::SeqCst) {
        return;
    }

    let original_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        if RAW_MODE_ACTIVE.swap(false, Ordering::SeqCst) {
            let _ = disable_raw_mode();
            let _ = crossterm::execute!(io::stdout(), crossterm::cursor::Show);
        }
        original_hook(panic_info);
    }));
}
