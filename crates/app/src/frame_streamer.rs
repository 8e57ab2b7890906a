//! Frame streamer: paces a [`Renderer`] and publishes finished frames.
//!
//! Three buffers are allocated up front and reused round-robin: while one is
//! drawn, the previous one may sit in the channel and the one before that
//! may still be read by a slow sink. Publishing waits for the sink; timer
//! ticks that elapse meanwhile are skipped and counted, never queued.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use embedded_graphics::prelude::Size;
use matrixclock_domain::error::MatrixClockError;
use matrixclock_domain::frame::{BACKGROUND, Frame};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::ports::Renderer;

/// Number of pooled frame buffers.
pub const BUFFER_COUNT: usize = 3;

pub const ONE_FPS: Duration = Duration::from_millis(1000);
pub const TEN_FPS: Duration = Duration::from_millis(100);
pub const FIFTEEN_FPS: Duration = Duration::from_millis(66);
pub const TWENTY_FOUR_FPS: Duration = Duration::from_millis(41);
pub const THIRTY_FPS: Duration = Duration::from_millis(33);
pub const SIXTY_FPS: Duration = Duration::from_millis(16);

/// Receiving ends handed to the display sink.
///
/// Both channels close once the streamer stops. A value on `errors` means
/// rendering failed and no further frame will follow.
pub struct FrameStream {
    pub frames: mpsc::Receiver<Arc<Frame>>,
    pub errors: mpsc::Receiver<MatrixClockError>,
}

/// Counters describing how the stream kept up with its sink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamerStats {
    pub frames_published: u64,
    /// Ticks skipped because a publish was still waiting on the sink.
    pub frames_dropped: u64,
    /// Pool slots replaced because the sink still held the buffer.
    pub buffers_reallocated: u64,
}

#[derive(Debug, Default)]
struct Counters {
    published: AtomicU64,
    dropped: AtomicU64,
    reallocated: AtomicU64,
}

/// Everything the frame loop owns; moved into the task on start.
struct Pipeline<R> {
    renderer: R,
    interval: Duration,
    buffers: [Arc<Frame>; BUFFER_COUNT],
    frames: mpsc::Sender<Arc<Frame>>,
    errors: mpsc::Sender<MatrixClockError>,
    counters: Arc<Counters>,
    cancel: CancellationToken,
}

/// Drives a renderer at a fixed interval.
pub struct FrameStreamer<R> {
    pending: Option<Pipeline<R>>,
    task: Option<JoinHandle<()>>,
    cancel: CancellationToken,
    counters: Arc<Counters>,
}

impl<R: Renderer + 'static> FrameStreamer<R> {
    /// Allocate the buffer pool and the two channels.
    ///
    /// The streamer stops when `shutdown` is cancelled or when
    /// [`stop`](Self::stop) is called, whichever happens first.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixClockError::Validation`] for a zero interval or an
    /// empty frame size.
    pub fn new(
        size: Size,
        renderer: R,
        interval: Duration,
        shutdown: &CancellationToken,
    ) -> Result<(Self, FrameStream), MatrixClockError> {
        crate::agents::ensure_positive(interval, "frame")?;
        let blank = Frame::new(size)?;
        let buffers = [
            Arc::new(blank.clone()),
            Arc::new(blank.clone()),
            Arc::new(blank),
        ];

        let (frames_tx, frames) = mpsc::channel(1);
        let (errors_tx, errors) = mpsc::channel(1);
        let cancel = shutdown.child_token();
        let counters = Arc::new(Counters::default());

        let streamer = Self {
            pending: Some(Pipeline {
                renderer,
                interval,
                buffers,
                frames: frames_tx,
                errors: errors_tx,
                counters: Arc::clone(&counters),
                cancel: cancel.clone(),
            }),
            task: None,
            cancel,
            counters,
        };
        Ok((streamer, FrameStream { frames, errors }))
    }

    /// Start the frame loop. Calling it again, or after [`stop`](Self::stop),
    /// does nothing.
    pub fn start(&mut self) {
        let Some(pipeline) = self.pending.take() else {
            tracing::debug!("frame streamer already started");
            return;
        };
        tracing::info!(interval_ms = pipeline.interval.as_millis(), "frame streamer started");
        self.task = Some(tokio::spawn(pipeline.run()));
    }

    /// Stop the loop and wait for it to finish; both channels are closed
    /// afterwards.
    pub async fn stop(&mut self) {
        self.cancel.cancel();
        self.pending = None;
        if let Some(task) = self.task.take()
            && let Err(err) = task.await
        {
            tracing::warn!(%err, "frame streamer task ended abnormally");
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    #[must_use]
    pub fn stats(&self) -> StreamerStats {
        StreamerStats {
            frames_published: self.counters.published.load(Ordering::Relaxed),
            frames_dropped: self.counters.dropped.load(Ordering::Relaxed),
            buffers_reallocated: self.counters.reallocated.load(Ordering::Relaxed),
        }
    }
}

impl<R: Renderer> Pipeline<R> {
    async fn run(mut self) {
        let mut ticker = crate::agents::ticker(self.interval);
        let mut previous_tick: Option<Instant> = None;
        let mut current = 0;

        loop {
            let tick = tokio::select! {
                biased;
                () = self.cancel.cancelled() => break,
                tick = ticker.tick() => tick,
            };
            if let Some(previous) = previous_tick {
                let skipped = skipped_ticks(tick - previous, self.interval);
                if skipped > 0 {
                    self.counters.dropped.fetch_add(skipped, Ordering::Relaxed);
                    tracing::debug!(skipped, "frame ticks skipped while the sink was busy");
                }
            }
            previous_tick = Some(tick);

            current = (current + 1) % BUFFER_COUNT;
            let slot = &mut self.buffers[current];
            if Arc::strong_count(slot) > 1 {
                self.counters.reallocated.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(slot = current, "frame buffer still held by the sink, reallocating");
            }
            let frame = Arc::make_mut(slot);
            frame.fill(BACKGROUND);

            if let Err(err) = self.renderer.draw_frame(frame) {
                tracing::error!(%err, "render failed, ending frame stream");
                tokio::select! {
                    biased;
                    () = self.cancel.cancelled() => {}
                    _ = self.errors.send(err) => {}
                }
                break;
            }

            let published = Arc::clone(slot);
            tokio::select! {
                biased;
                () = self.cancel.cancelled() => break,
                sent = self.frames.send(published) => {
                    if sent.is_err() {
                        tracing::debug!("frame sink gone, ending frame stream");
                        break;
                    }
                }
            }
            self.counters.published.fetch_add(1, Ordering::Relaxed);
        }
        tracing::debug!("frame streamer stopped");
    }
}

/// Whole periods between two ticks, minus the one that was honoured.
fn skipped_ticks(elapsed: Duration, interval: Duration) -> u64 {
    let periods = elapsed.as_nanos() / interval.as_nanos();
    u64::try_from(periods.saturating_sub(1)).unwrap_or(u64::MAX)
}
