//! Keyboard and signal handling for aborting animations.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures_util::StreamExt;
use tokio::task::JoinHandle;

use crate::animation::CancelHandle;

/// Exit status after an interrupt (128 + SIGINT).
pub const INTERRUPT_EXIT_CODE: i32 = 130;

/// What a key press means during playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Stop the current animation and continue with the next source.
    Abort,
    /// Stop the current animation and skip all remaining sources.
    Interrupt,
    None,
}

/// Map a key event to its playback action.
///
/// - `q`, `Q`, `Esc`, `Space`: abort the animation
/// - `Ctrl+C`: interrupt the program
pub fn handle_key_event(event: KeyEvent) -> KeyAction {
    let KeyEvent {
        code,
        modifiers,
        kind,
        ..
    } = event;

    if kind == KeyEventKind::Release {
        return KeyAction::None;
    }

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') | KeyCode::Char('C') => KeyAction::Interrupt,
            _ => KeyAction::None,
        };
    }

    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Char(' ') | KeyCode::Esc => {
            KeyAction::Abort
        }
        _ => KeyAction::None,
    }
}

/// Shared interrupt state between the key listener, the SIGINT handler and
/// the main loop.
#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    requested: Arc<AtomicBool>,
    animating: Arc<AtomicBool>,
}

impl Interrupt {
    /// Record an interrupt and cancel playback. Outside of playback there is
    /// no terminal state to restore, so the process exits right away.
    pub fn request(&self, cancel: &CancelHandle) {
        self.requested.store(true, Ordering::SeqCst);
        cancel.cancel();
        if !self.animating.load(Ordering::SeqCst) {
            std::process::exit(INTERRUPT_EXIT_CODE);
        }
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }

    pub fn set_animating(&self, animating: bool) {
        self.animating.store(animating, Ordering::SeqCst);
    }
}

/// Route SIGINT through [`Interrupt::request`].
pub fn setup_ctrlc_handler(interrupt: Interrupt, cancel: CancelHandle) -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(move || interrupt.request(&cancel))
}

/// Listen for abort keys until the terminal event stream ends.
pub fn spawn_key_listener(cancel: CancelHandle, interrupt: Interrupt) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut events = EventStream::new();
        while let Some(event) = events.next().await {
            match event {
                Ok(Event::Key(key)) => match handle_key_event(key) {
                    KeyAction::Abort => cancel.cancel(),
                    KeyAction::Interrupt => interrupt.request(&cancel),
                    KeyAction::None => {}
                },
                Ok(_) => {}
                Err(e) => {
                    log::debug!("key listener stopped: {}", e);
                    break;
                }
            }
        }
    })
}
