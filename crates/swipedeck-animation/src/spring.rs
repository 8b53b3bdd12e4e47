//! Damped spring description.
//!
//! Parameters follow Jetpack Compose's `spring()`: a unit mass attached to a
//! spring of the given stiffness, damped by `damping_ratio` (1.0 is critical
//! damping, lower values overshoot).

/// Damping ratio for a spring with high bounciness.
pub const DAMPING_RATIO_HIGH_BOUNCY: f32 = 0.2;
/// Damping ratio for a spring with medium bounciness.
pub const DAMPING_RATIO_MEDIUM_BOUNCY: f32 = 0.5;
/// Damping ratio for a spring with low bounciness.
pub const DAMPING_RATIO_LOW_BOUNCY: f32 = 0.75;
/// Damping ratio for a spring that does not overshoot.
pub const DAMPING_RATIO_NO_BOUNCY: f32 = 1.0;

pub const STIFFNESS_HIGH: f32 = 10_000.0;
pub const STIFFNESS_MEDIUM: f32 = 1_500.0;
pub const STIFFNESS_MEDIUM_LOW: f32 = 400.0;
pub const STIFFNESS_LOW: f32 = 200.0;
pub const STIFFNESS_VERY_LOW: f32 = 50.0;

/// Stiffest spring [`SpringSpec::sanitized`] lets through.
pub const MAX_STIFFNESS: f32 = 100_000.0;

/// Most heavily damped spring [`SpringSpec::sanitized`] lets through.
pub const MAX_DAMPING_RATIO: f32 = 10.0;

/// Default distance below which an animation counts as arrived.
pub const DEFAULT_VISIBILITY_THRESHOLD: f32 = 0.001;

/// Velocity threshold, expressed as a multiple of the visibility threshold
/// per second.
const VELOCITY_THRESHOLD_FACTOR: f32 = 10.0;

/// Spring animation parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringSpec {
    /// Damping ratio; 1.0 is critically damped.
    pub damping_ratio: f32,
    /// Spring stiffness (force per unit displacement, unit mass).
    pub stiffness: f32,
    /// Distance from the target below which the value snaps to it.
    pub visibility_threshold: f32,
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self {
            damping_ratio: DAMPING_RATIO_NO_BOUNCY,
            stiffness: STIFFNESS_MEDIUM,
            visibility_threshold: DEFAULT_VISIBILITY_THRESHOLD,
        }
    }
}

impl SpringSpec {
    pub fn new(damping_ratio: f32, stiffness: f32) -> Self {
        Self {
            damping_ratio,
            stiffness,
            ..Self::default()
        }
    }

    pub fn damping_ratio(mut self, damping_ratio: f32) -> Self {
        self.damping_ratio = damping_ratio;
        self
    }

    pub fn stiffness(mut self, stiffness: f32) -> Self {
        self.stiffness = stiffness;
        self
    }

    pub fn visibility_threshold(mut self, threshold: f32) -> Self {
        self.visibility_threshold = threshold;
        self
    }

    /// Returns a copy with non-physical values replaced by defaults and
    /// extreme ones clamped to [`MAX_STIFFNESS`] and [`MAX_DAMPING_RATIO`].
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let mut spec = self;
        if !(spec.stiffness.is_finite() && spec.stiffness > 0.0) {
            log::warn!("invalid spring stiffness {}, using default", spec.stiffness);
            spec.stiffness = defaults.stiffness;
        } else if spec.stiffness > MAX_STIFFNESS {
            log::warn!("spring stiffness {} clamped to {MAX_STIFFNESS}", spec.stiffness);
            spec.stiffness = MAX_STIFFNESS;
        }
        if !(spec.damping_ratio.is_finite() && spec.damping_ratio >= 0.0) {
            log::warn!("invalid spring damping ratio {}, using default", spec.damping_ratio);
            spec.damping_ratio = defaults.damping_ratio;
        } else if spec.damping_ratio > MAX_DAMPING_RATIO {
            log::warn!(
                "spring damping ratio {} clamped to {MAX_DAMPING_RATIO}",
                spec.damping_ratio
            );
            spec.damping_ratio = MAX_DAMPING_RATIO;
        }
        if !(spec.visibility_threshold.is_finite() && spec.visibility_threshold > 0.0) {
            spec.visibility_threshold = defaults.visibility_threshold;
        }
        spec
    }

    /// Natural angular frequency of the undamped spring.
    pub fn natural_frequency(&self) -> f32 {
        self.stiffness.sqrt()
    }

    /// Longest integration step, in seconds, that keeps semi-implicit Euler
    /// stable for this spring: both `ω·dt` and the damping term `2ζω·dt`
    /// stay at or below 1.
    pub fn stable_time_step(&self) -> f32 {
        0.5 / (self.natural_frequency() * self.damping_ratio.max(1.0))
    }

    /// Acceleration of the spring at the given displacement and velocity.
    pub fn acceleration(&self, displacement: f32, velocity: f32) -> f32 {
        let damping = 2.0 * self.damping_ratio * self.natural_frequency();
        -self.stiffness * displacement - damping * velocity
    }

    /// Returns true when both displacement and velocity are small enough
    /// that the animation can stop.
    pub fn is_at_rest(&self, displacement: f32, velocity: f32) -> bool {
        displacement.abs() < self.visibility_threshold
            && velocity.abs() < self.visibility_threshold * VELOCITY_THRESHOLD_FACTOR
    }
}
