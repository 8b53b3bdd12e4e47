//! A single animated `f32`.
//!
//! [`Animatable`] holds a value that can be assigned directly (interactive
//! tracking) or driven toward a target by a [`SpringSpec`] over successive
//! frames. Integration is semi-implicit Euler at a fixed sub-step, sized
//! from the spring so stiff springs stay stable, and the result does not
//! depend on the frame rate.

use crate::spring::SpringSpec;

/// Longest integration step in seconds; stiff springs use a shorter one.
const INTEGRATION_STEP: f32 = 0.001;

/// Longest frame gap simulated in one call; larger gaps are truncated so a
/// stalled host does not make the value jump.
const MAX_FRAME_DELTA: f32 = 0.25;

/// A value animated by a spring.
#[derive(Clone, Debug, PartialEq)]
pub struct Animatable {
    value: f32,
    velocity: f32,
    target: f32,
    spec: SpringSpec,
    running: bool,
    last_frame_nanos: Option<u64>,
}

impl Animatable {
    pub fn new(value: f32) -> Self {
        Self {
            value,
            velocity: 0.0,
            target: value,
            spec: SpringSpec::default(),
            running: false,
            last_frame_nanos: None,
        }
    }

    /// Current value.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Current velocity in units per second.
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Value the animation is heading to. Equals [`Animatable::value`] when idle.
    pub fn target_value(&self) -> f32 {
        self.target
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Assigns the value immediately, cancelling any running animation.
    pub fn snap_to(&mut self, value: f32) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
        self.running = false;
        self.last_frame_nanos = None;
    }

    /// Starts a spring animation toward `target`, keeping the current velocity.
    pub fn animate_to(&mut self, target: f32, spec: SpringSpec) {
        self.target = target;
        self.spec = spec.sanitized();
        self.last_frame_nanos = None;
        self.running = !self.spec.is_at_rest(self.value - target, self.velocity);
        if !self.running {
            self.value = target;
            self.velocity = 0.0;
        }
    }

    /// Stops the animation where it is.
    pub fn stop(&mut self) {
        self.running = false;
        self.velocity = 0.0;
        self.target = self.value;
        self.last_frame_nanos = None;
    }

    /// Advances the animation to `frame_time_nanos`.
    ///
    /// The first frame after [`Animatable::animate_to`] only records the
    /// timestamp. Returns true while the animation is still running.
    pub fn advance_frame(&mut self, frame_time_nanos: u64) -> bool {
        if !self.running {
            return false;
        }

        let Some(last) = self.last_frame_nanos.replace(frame_time_nanos) else {
            return true;
        };

        let elapsed = frame_time_nanos.saturating_sub(last) as f32 / 1_000_000_000.0;
        let max_step = INTEGRATION_STEP.min(self.spec.stable_time_step());
        let mut remaining = elapsed.min(MAX_FRAME_DELTA);
        while remaining > 0.0 {
            let step = remaining.min(max_step);
            let acceleration = self
                .spec
                .acceleration(self.value - self.target, self.velocity);
            self.velocity += acceleration * step;
            self.value += self.velocity * step;
            remaining -= step;
        }

        if self.spec.is_at_rest(self.value - self.target, self.velocity) {
            self.value = self.target;
            self.velocity = 0.0;
            self.running = false;
            self.last_frame_nanos = None;
        }
        self.running
    }
}

impl Default for Animatable {
    fn default() -> Self {
        Self::new(0.0)
    }
}
