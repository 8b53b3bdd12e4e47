use std::cell::Cell;
use std::time::Duration;

/// Duration of one frame at 60 fps.
pub const FRAME_INTERVAL: Duration = Duration::from_nanos(16_666_667);

/// Source of monotonically increasing frame timestamps.
pub trait FrameClock {
    /// Time of the current frame in nanoseconds since an arbitrary origin.
    fn frame_time_nanos(&self) -> u64;
}

/// Frame clock backed by the wall clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemFrameClock {
    origin: web_time::Instant,
}

impl SystemFrameClock {
    pub fn new() -> Self {
        Self {
            origin: web_time::Instant::now(),
        }
    }
}

impl Default for SystemFrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for SystemFrameClock {
    fn frame_time_nanos(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }
}

/// Frame clock that only moves when told to. Used by tests and headless runs.
#[derive(Debug, Default)]
pub struct ManualFrameClock {
    nanos: Cell<u64>,
}

impl ManualFrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the clock forward by `delta`.
    pub fn advance(&self, delta: Duration) {
        let delta = u64::try_from(delta.as_nanos()).unwrap_or(u64::MAX);
        self.nanos.set(self.nanos.get().saturating_add(delta));
    }

    /// Moves the clock forward by one [`FRAME_INTERVAL`].
    pub fn advance_frame(&self) {
        self.advance(FRAME_INTERVAL);
    }
}

impl FrameClock for ManualFrameClock {
    fn frame_time_nanos(&self) -> u64 {
        self.nanos.get()
    }
}
