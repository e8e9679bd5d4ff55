use std::time::{Duration, Instant};

/// Clock-gated rate limiter for camera frames.
///
/// `try_acquire` succeeds at most once per `interval`; the caller
/// supplies the current instant, so tests can drive the clock. The
/// throttle is owned by the request-handling context, not by a
/// process-wide global.
#[derive(Debug)]
pub struct FrameThrottle {
    interval: Duration,
    last: Option<Instant>,
}

impl FrameThrottle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Returns `true` and records `now` if at least `interval` has
    /// passed since the last successful acquisition.
    pub fn try_acquire(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.duration_since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}
