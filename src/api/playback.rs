use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{Chart, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::layout::build_chart_frame;
use crate::render::Renderer;

/// Identifies one scheduled frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Host hook that calls [`PlaybackController::on_frame`] on the next frame.
pub trait FrameScheduler {
    fn schedule_next_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Monotonic time source for playback.
pub trait PlaybackClock {
    fn now(&self) -> Duration;
}

/// Wall clock measured from construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackClock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-driven clock. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }
}

impl PlaybackClock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Scheduler that only records requests; the host fires them explicitly.
#[derive(Debug, Clone, Default)]
pub struct ManualFrameScheduler {
    next_id: u64,
    pending: Vec<FrameHandle>,
    scheduled: usize,
    cancelled: usize,
}

impl ManualFrameScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles requested and not yet cancelled or taken.
    #[must_use]
    pub fn pending(&self) -> &[FrameHandle] {
        &self.pending
    }

    /// Removes and returns the oldest pending handle.
    pub fn take_next(&mut self) -> Option<FrameHandle> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }

    #[must_use]
    pub fn scheduled_count(&self) -> usize {
        self.scheduled
    }

    #[must_use]
    pub fn cancelled_count(&self) -> usize {
        self.cancelled
    }
}

impl FrameScheduler for ManualFrameScheduler {
    fn schedule_next_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        self.scheduled += 1;
        let handle = FrameHandle(self.next_id);
        self.pending.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.cancelled += 1;
        self.pending.retain(|pending| *pending != handle);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackSettings {
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
}

fn default_duration_ms() -> u64 {
    2_000
}

impl PlaybackSettings {
    #[must_use]
    pub fn duration(self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            duration_ms: default_duration_ms(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing,
    /// Interrupted by `stop`, showing the final state.
    Stopped,
}

/// Drives a live, frame-by-frame animation of one chart.
///
/// The host owns the frame loop: every handle returned by the scheduler must
/// eventually be passed back to [`PlaybackController::on_frame`] unless it
/// was cancelled. Only the current pending handle triggers a draw.
pub struct PlaybackController<R: Renderer, S: FrameScheduler, C: PlaybackClock> {
    renderer: R,
    scheduler: S,
    clock: C,
    chart: Chart,
    viewport: Viewport,
    settings: PlaybackSettings,
    state: PlaybackState,
    started_at: Duration,
    pending: Option<FrameHandle>,
    last_progress: Option<f64>,
    on_complete: Option<Box<dyn FnMut()>>,
}

impl<R: Renderer, S: FrameScheduler, C: PlaybackClock> PlaybackController<R, S, C> {
    pub fn new(
        renderer: R,
        scheduler: S,
        clock: C,
        chart: Chart,
        viewport: Viewport,
    ) -> ChartResult<Self> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        chart.validate()?;

        Ok(Self {
            renderer,
            scheduler,
            clock,
            chart,
            viewport,
            settings: PlaybackSettings::default(),
            state: PlaybackState::Idle,
            started_at: Duration::ZERO,
            pending: None,
            last_progress: None,
            on_complete: None,
        })
    }

    #[must_use]
    pub fn with_settings(mut self, settings: PlaybackSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Callback run once each time an animation runs to completion.
    #[must_use]
    pub fn with_on_complete(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    /// Starts the animation from progress 0. No-op while playing.
    pub fn play(&mut self) {
        if self.state == PlaybackState::Playing {
            return;
        }
        self.cancel_pending();
        self.started_at = self.clock.now();
        self.state = PlaybackState::Playing;
        self.pending = Some(self.scheduler.schedule_next_frame());
        debug!(chart_id = %self.chart.id, "playback started");
    }

    /// Host frame callback. Returns `true` when a frame was drawn.
    pub fn on_frame(&mut self, handle: FrameHandle) -> bool {
        if self.state != PlaybackState::Playing || self.pending != Some(handle) {
            return false;
        }
        self.pending = None;

        let progress = self.current_progress();
        self.draw(progress);

        if progress < 1.0 {
            self.pending = Some(self.scheduler.schedule_next_frame());
        } else {
            self.state = PlaybackState::Idle;
            debug!(chart_id = %self.chart.id, "playback completed");
            if let Some(callback) = self.on_complete.as_mut() {
                callback();
            }
        }
        true
    }

    /// Interrupts playback and shows the final state. No-op unless playing.
    pub fn stop(&mut self) {
        if self.state != PlaybackState::Playing {
            return;
        }
        self.cancel_pending();
        self.draw(1.0);
        self.state = PlaybackState::Stopped;
        debug!(chart_id = %self.chart.id, "playback stopped");
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    #[must_use]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    #[must_use]
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Progress of the most recent draw, if any.
    #[must_use]
    pub fn last_progress(&self) -> Option<f64> {
        self.last_progress
    }

    #[must_use]
    pub fn chart(&self) -> &Chart {
        &self.chart
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    fn current_progress(&self) -> f64 {
        let duration = self.settings.duration();
        if duration.is_zero() {
            return 1.0;
        }
        let elapsed = self.clock.now().saturating_sub(self.started_at);
        (elapsed.as_secs_f64() / duration.as_secs_f64()).min(1.0)
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
    }

    fn draw(&mut self, progress: f64) {
        let result = build_chart_frame(&self.chart, self.viewport, progress)
            .and_then(|frame| self.renderer.render(&frame));
        match result {
            Ok(()) => self.last_progress = Some(progress),
            Err(err) => warn!(chart_id = %self.chart.id, progress, error = %err, "live draw failed"),
        }
    }
}

impl<R: Renderer, S: FrameScheduler, C: PlaybackClock> std::fmt::Debug
    for PlaybackController<R, S, C>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("chart_id", &self.chart.id)
            .field("viewport", &self.viewport)
            .field("settings", &self.settings)
            .field("state", &self.state)
            .field("pending", &self.pending)
            .field("last_progress", &self.last_progress)
            .finish_non_exhaustive()
    }
}
