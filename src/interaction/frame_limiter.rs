/// Outcome of offering an update to the limiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimiterDecision {
    /// Run the update now.
    Run,
    /// Too soon; the update was coalesced into the next allowed slot.
    Coalesce,
}

/// Deterministic redraw rate limiter for drag gestures.
///
/// The caller supplies timestamps explicitly, so behavior is reproducible in
/// tests and independent of any timer facility. Updates arriving faster than
/// the configured rate are dropped into a single pending slot (coalesced, not
/// queued); `finish` always grants one final update and `cancel` guarantees
/// no stale update survives a gesture end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameLimiter {
    min_interval_ms: f64,
    last_run_ms: Option<f64>,
    pending: bool,
}

impl FrameLimiter {
    #[must_use]
    pub fn new(max_rate_hz: f64) -> Self {
        let rate = if max_rate_hz.is_finite() && max_rate_hz > 0.0 {
            max_rate_hz
        } else {
            60.0
        };
        Self {
            min_interval_ms: 1_000.0 / rate,
            last_run_ms: None,
            pending: false,
        }
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending
    }

    /// Offers an update at `now_ms`.
    pub fn on_event(&mut self, now_ms: f64) -> LimiterDecision {
        match self.last_run_ms {
            Some(last) if now_ms - last < self.min_interval_ms => {
                self.pending = true;
                LimiterDecision::Coalesce
            }
            _ => {
                self.last_run_ms = Some(now_ms);
                self.pending = false;
                LimiterDecision::Run
            }
        }
    }

    /// Polls for a previously coalesced update becoming due.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        if !self.pending {
            return false;
        }
        match self.last_run_ms {
            Some(last) if now_ms - last < self.min_interval_ms => false,
            _ => {
                self.last_run_ms = Some(now_ms);
                self.pending = false;
                true
            }
        }
    }

    /// Ends the gesture; the final update always runs regardless of timing.
    pub fn finish(&mut self) {
        self.pending = false;
        self.last_run_ms = None;
    }

    /// Cancels the gesture and any coalesced update with it.
    pub fn cancel(&mut self) {
        self.pending = false;
        self.last_run_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::{FrameLimiter, LimiterDecision};

    #[test]
    fn faster_than_interval_events_coalesce() {
        let mut limiter = FrameLimiter::new(100.0); // 10ms interval

        assert_eq!(limiter.on_event(0.0), LimiterDecision::Run);
        assert_eq!(limiter.on_event(3.0), LimiterDecision::Coalesce);
        assert_eq!(limiter.on_event(6.0), LimiterDecision::Coalesce);
        assert!(limiter.has_pending());

        // Only one pending slot exists regardless of how many events arrived.
        assert!(limiter.poll(12.0));
        assert!(!limiter.poll(13.0));
    }

    #[test]
    fn cancel_drops_pending_update() {
        let mut limiter = FrameLimiter::new(100.0);
        let _ = limiter.on_event(0.0);
        let _ = limiter.on_event(1.0);
        assert!(limiter.has_pending());

        limiter.cancel();
        assert!(!limiter.has_pending());
        assert!(!limiter.poll(1_000.0));
    }
}
