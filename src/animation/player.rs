//! Parallel frame rendering and timed, cancellable playback.

use std::io::{self, Write};
use std::num::NonZeroUsize;
use std::thread;
use std::time::Duration;

use tokio::runtime::{Handle, RuntimeFlavor};
use tokio::sync::mpsc;

use super::compositor::materialize_frames;
use super::frames::{AnimatedSource, LoopCount};
use crate::ascii::{render_validated, RenderConfig, SourceImage};
use crate::error::ConfigError;

/// Errors that can occur while playing an animation.
#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("unable to write frame: {0}")]
    Io(#[from] io::Error),
}

/// How playback ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    /// Every pass was played.
    Completed,
    /// A cancel signal arrived before the last pass finished.
    Cancelled,
}

/// Sending half of a cancel signal. Cheap to clone and safe to use from any
/// thread, including signal handlers.
#[derive(Debug, Clone)]
pub struct CancelHandle(mpsc::Sender<()>);

impl CancelHandle {
    /// Request cancellation. Never blocks: if a request is already pending
    /// or playback is gone, the call does nothing.
    pub fn cancel(&self) {
        let _ = self.0.try_send(());
    }
}

/// Receiving half of a cancel signal.
#[derive(Debug)]
pub struct CancelSignal(mpsc::Receiver<()>);

impl CancelSignal {
    /// Resolve when cancellation is requested. Never resolves once every
    /// [`CancelHandle`] has been dropped.
    pub async fn cancelled(&mut self) {
        if self.0.recv().await.is_none() {
            std::future::pending::<()>().await;
        }
    }

    /// Consume a pending cancel request without waiting.
    pub fn take(&mut self) -> bool {
        self.0.try_recv().is_ok()
    }
}

/// Create a single-slot cancel channel.
pub fn cancel_channel() -> (CancelHandle, CancelSignal) {
    let (tx, rx) = mpsc::channel(1);
    (CancelHandle(tx), CancelSignal(rx))
}

/// Number of render workers: the available CPU parallelism.
pub fn worker_count() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Render every frame to text and apply `transform` to each result.
///
/// Frames are split into one contiguous range per worker; each worker
/// writes only into its own slice of the output, so no locking is needed.
/// Returns once all workers have finished.
pub fn render_frames<I, F>(
    frames: &[I],
    config: &RenderConfig,
    transform: F,
) -> Result<Vec<String>, ConfigError>
where
    I: SourceImage + Sync,
    F: Fn(String) -> String + Sync,
{
    config.validate()?;

    let count = frames.len();
    let workers = worker_count();
    let mut rendered = vec![String::new(); count];

    thread::scope(|scope| {
        let transform = &transform;
        let mut rest: &mut [String] = &mut rendered;
        let mut start = 0;

        for worker in 0..workers {
            let end = (worker + 1) * count / workers;
            let (slots, tail) = std::mem::take(&mut rest).split_at_mut(end - start);
            rest = tail;
            let inputs = &frames[start..end];
            start = end;

            if slots.is_empty() {
                continue;
            }
            scope.spawn(move || {
                for (slot, frame) in slots.iter_mut().zip(inputs) {
                    *slot = transform(render_validated(frame, config));
                }
            });
        }
    });

    log::debug!("rendered {} frames with {} workers", count, workers);
    Ok(rendered)
}

/// Run CPU-bound work without stalling other tasks on a multi-threaded
/// runtime. On a current-thread runtime the work runs inline.
fn run_blocking<T>(f: impl FnOnce() -> T) -> T {
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(f)
        }
        _ => f(),
    }
}

/// Composite, render and play an animation to `out`.
///
/// Rendering finishes completely before the first frame is written. Each
/// frame is followed by its delay, which is cut short by a cancel request.
/// Cancellation is reported as [`Playback::Cancelled`], not as an error.
pub async fn play<W, F>(
    source: &AnimatedSource,
    config: &RenderConfig,
    transform: F,
    out: &mut W,
    cancel: &mut CancelSignal,
) -> Result<Playback, PlayerError>
where
    W: Write,
    F: Fn(String) -> String + Sync,
{
    config.validate()?;

    let frames = run_blocking(|| render_frames(&materialize_frames(source), config, transform))?;

    play_frames(&frames, &source.delays(), source.loop_count, out, cancel).await
}

/// Play already rendered frames. `delays[i]` is the wait after `frames[i]`.
pub async fn play_frames<W: Write>(
    frames: &[String],
    delays: &[Duration],
    loop_count: LoopCount,
    out: &mut W,
    cancel: &mut CancelSignal,
) -> Result<Playback, PlayerError> {
    if frames.is_empty() {
        return Ok(Playback::Completed);
    }

    let passes = loop_count.passes();
    log::debug!("playing {} frames, passes: {:?}", frames.len(), passes);

    let mut pass = 0;
    while passes.map_or(true, |total| pass < total) {
        for (i, frame) in frames.iter().enumerate() {
            out.write_all(frame.as_bytes())?;
            out.flush()?;

            let delay = delays.get(i).copied().unwrap_or_default();
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    log::debug!("playback cancelled at frame {} of pass {}", i, pass);
                    return Ok(Playback::Cancelled);
                }
                _ = tokio::time::sleep(delay) => {}
            }
        }
        pass += 1;
    }

    Ok(Playback::Completed)
}
