//! Time-driven replay of a path over a configurable duration.
//!
//! One [`PathAnimation`] owns the animation state for one map binding. The
//! host's per-paint callback drives it by calling [`PathAnimation::tick`]
//! with the current time; there is no internal thread or timer, so tests
//! inject synthetic clocks and concurrent animations cannot race.

use crate::animation::path::rendered_path;
use crate::core::config::AnimationConfig;
use crate::render::surface::MapSurface;
use std::time::{Duration, Instant};

/// Minimum interval between surface path updates (~60 updates/second)
const MIN_UPDATE_INTERVAL: Duration = Duration::from_millis(16);

/// Lifecycle states of a path animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationPhase {
    Idle,
    Running,
    Paused,
    Completed,
}

/// State machine replaying a path over `duration_ms`, with looping,
/// pause/resume, and cooperative cancellation
#[derive(Debug)]
pub struct PathAnimation {
    config: AnimationConfig,
    layer_id: String,
    phase: AnimationPhase,
    cycle_start: Option<Instant>,
    paused_at: Option<Instant>,
    paused_accumulated: Duration,
    restart_at: Option<Instant>,
    last_surface_update: Option<Instant>,
    cancelled: bool,
}

impl PathAnimation {
    pub fn new(config: AnimationConfig, layer_id: String) -> Self {
        Self {
            config,
            layer_id,
            phase: AnimationPhase::Idle,
            cycle_start: None,
            paused_at: None,
            paused_accumulated: Duration::ZERO,
            restart_at: None,
            last_surface_update: None,
            cancelled: false,
        }
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    pub fn layer_id(&self) -> &str {
        &self.layer_id
    }

    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Begins a cycle from `Idle` or `Completed`
    ///
    /// Resets progress to 0 and the rendered path to the path's first point.
    /// A no-op when already running/paused or after cancellation.
    pub fn start(&mut self, now: Instant, surface: &mut dyn MapSurface) {
        if self.cancelled {
            log::debug!("start ignored: animation {} is cancelled", self.layer_id);
            return;
        }
        match self.phase {
            AnimationPhase::Running | AnimationPhase::Paused => {
                log::debug!("start ignored: animation {} already active", self.layer_id);
            }
            AnimationPhase::Idle | AnimationPhase::Completed => {
                self.begin_cycle(now, surface);
            }
        }
    }

    /// Freezes progress in place; valid only while `Running`
    pub fn pause(&mut self, now: Instant) {
        if self.phase != AnimationPhase::Running {
            log::debug!(
                "pause ignored: animation {} is {:?}",
                self.layer_id,
                self.phase
            );
            return;
        }
        self.paused_at = Some(now);
        self.phase = AnimationPhase::Paused;
    }

    /// Resumes from `Paused`, subtracting the paused interval from future
    /// elapsed computation so progress does not jump forward
    pub fn resume(&mut self, now: Instant) {
        if self.phase != AnimationPhase::Paused {
            log::debug!(
                "resume ignored: animation {} is {:?}",
                self.layer_id,
                self.phase
            );
            return;
        }
        if let Some(paused_at) = self.paused_at.take() {
            self.paused_accumulated += now.saturating_duration_since(paused_at);
        }
        self.phase = AnimationPhase::Running;
    }

    /// Stops frame scheduling and any pending loop restart
    ///
    /// The instance becomes terminally unusable; animate again by starting a
    /// fresh instance.
    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.restart_at = None;
    }

    /// Current progress in `[0, 1]` at the given time
    pub fn progress(&self, now: Instant) -> f64 {
        let reference = match self.phase {
            AnimationPhase::Idle => return 0.0,
            AnimationPhase::Completed => return 1.0,
            AnimationPhase::Paused => self.paused_at.unwrap_or(now),
            AnimationPhase::Running => now,
        };
        let Some(cycle_start) = self.cycle_start else {
            return 0.0;
        };
        let elapsed = reference
            .saturating_duration_since(cycle_start)
            .saturating_sub(self.paused_accumulated);
        let duration = Duration::from_millis(self.config.duration_ms.max(1));
        (elapsed.as_secs_f64() / duration.as_secs_f64()).min(1.0)
    }

    /// Advances the animation one frame
    ///
    /// Computes progress, pushes the rendered sub-path to the surface
    /// (throttled to ~60 updates/second), completes the cycle at progress 1,
    /// and fires the delayed loop restart. Surface rejections are logged and
    /// the frame skipped; nothing propagates.
    pub fn tick(&mut self, now: Instant, surface: &mut dyn MapSurface) {
        if self.cancelled {
            return;
        }
        match self.phase {
            AnimationPhase::Idle | AnimationPhase::Paused => {}
            AnimationPhase::Completed => {
                if self.restart_at.is_some_and(|restart| now >= restart) {
                    self.begin_cycle(now, surface);
                }
            }
            AnimationPhase::Running => {
                let progress = self.progress(now);
                if progress >= 1.0 {
                    self.complete(now, surface);
                } else if self.should_update_surface(now) {
                    self.apply_path(surface, &rendered_path(&self.config.path, progress));
                    self.last_surface_update = Some(now);
                }
            }
        }
    }

    fn begin_cycle(&mut self, now: Instant, surface: &mut dyn MapSurface) {
        self.cycle_start = Some(now);
        self.paused_at = None;
        self.paused_accumulated = Duration::ZERO;
        self.restart_at = None;
        self.last_surface_update = None;
        self.phase = AnimationPhase::Running;
        // Clear any prior rendered path back to the first point.
        self.apply_path(surface, &rendered_path(&self.config.path, 0.0));
    }

    fn complete(&mut self, now: Instant, surface: &mut dyn MapSurface) {
        self.phase = AnimationPhase::Completed;
        // The final frame always lands regardless of throttling.
        self.apply_path(surface, &self.config.path);
        self.last_surface_update = Some(now);
        if self.config.looped {
            self.restart_at = Some(now + Duration::from_millis(self.config.loop_delay_ms));
        }
    }

    fn should_update_surface(&self, now: Instant) -> bool {
        match self.last_surface_update {
            Some(last) => now.saturating_duration_since(last) >= MIN_UPDATE_INTERVAL,
            None => true,
        }
    }

    fn apply_path(&self, surface: &mut dyn MapSurface, points: &[crate::core::geo::LatLng]) {
        if let Err(e) = surface.set_layer_geometry(&self.layer_id, points) {
            log::warn!("skipping frame for {}: {}", self.layer_id, e);
        }
    }
}
