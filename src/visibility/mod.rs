//! Viewport-visibility driven pause/resume.
//!
//! The host reports how much of a binding's container is in the viewport
//! through an injected [`VisibilitySignal`]; the coordinator turns threshold
//! transitions into `pause()`/`resume()` calls on the binding's animation.
//! Push-style observers (IntersectionObserver and the like) adapt by caching
//! their latest callback value behind this trait.

use crate::animation::engine::{AnimationPhase, PathAnimation};
use std::time::Instant;

/// Fraction of the container that must be visible for an animation to run
pub const VISIBILITY_THRESHOLD: f64 = 0.1;

/// Reports the currently visible fraction of a binding's container, 0.0
/// (fully off-screen) to 1.0 (fully visible)
pub trait VisibilitySignal {
    fn visible_fraction(&self) -> f64;
}

/// Pauses a running animation when its binding scrolls out of the viewport
/// and resumes it on re-entry
///
/// Only animations the coordinator itself paused are resumed, so a manual
/// `pause()` by the host is not overridden, and an `Idle` engine awaiting a
/// delayed `autoStart` is never touched.
#[derive(Debug)]
pub struct VisibilityCoordinator {
    threshold: f64,
    paused_by_visibility: bool,
}

impl VisibilityCoordinator {
    pub fn new() -> Self {
        Self::with_threshold(VISIBILITY_THRESHOLD)
    }

    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            paused_by_visibility: false,
        }
    }

    /// Samples the signal and applies pause/resume against the engine
    ///
    /// Level-based rather than edge-based so a loop restart that fires while
    /// the binding is hidden is paused on the next poll.
    pub fn poll(&mut self, signal: &dyn VisibilitySignal, engine: &mut PathAnimation, now: Instant) {
        let visible = signal.visible_fraction() >= self.threshold;

        if !visible {
            if engine.phase() == AnimationPhase::Running {
                log::debug!("pausing {} (left viewport)", engine.layer_id());
                engine.pause(now);
                self.paused_by_visibility = true;
            }
        } else if self.paused_by_visibility {
            log::debug!("resuming {} (entered viewport)", engine.layer_id());
            engine.resume(now);
            self.paused_by_visibility = false;
        }
    }
}

impl Default for VisibilityCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
