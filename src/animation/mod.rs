//! Animated GIF playback.
//!
//! 1. **Compositing** - rebuild whole frames from GIF frame patches, honoring disposal methods
//! 2. **Rendering** - turn every frame into text on a pool of worker threads
//! 3. **Playback** - write frames in order with their delays until done or cancelled

mod compositor;
mod frames;
mod player;

pub use compositor::materialize_frames;
pub use frames::{AnimatedSource, Disposal, GifFrame, LoopCount};
pub use player::{
    cancel_channel, play, play_frames, render_frames, worker_count, CancelHandle, CancelSignal,
    Playback, PlayerError,
};
