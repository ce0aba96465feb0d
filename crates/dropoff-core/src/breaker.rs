//! Failure-count circuit breaker for optional remote lookups.
//!
//! A breaker is owned by the client that makes the calls; there is no shared
//! process-wide instance. Time is passed in explicitly so callers and tests
//! control the clock.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakerState {
    /// Calls flow normally.
    Closed,
    /// Calls are skipped until the cooldown elapses.
    Open,
    /// Cooldown elapsed; one probe call is allowed.
    HalfOpen,
}

/// Guard for a client that adds a remote configuration lookup. The pricing
/// engine and the shops file never call out, so nothing in this workspace
/// holds one yet; a caller wraps each remote call in `allow_at` and reports
/// the outcome with `record_success` or `record_failure_at`.
#[derive(Debug, Clone)]
pub struct CircuitBreaker {
    failure_threshold: u32,
    cooldown: Duration,
    consecutive_failures: u32,
    opened_at: Option<Instant>,
    probe_in_flight: bool,
}

impl CircuitBreaker {
    /// A threshold of zero is treated as one.
    #[must_use]
    pub fn new(failure_threshold: u32, cooldown: Duration) -> Self {
        Self {
            failure_threshold: failure_threshold.max(1),
            cooldown,
            consecutive_failures: 0,
            opened_at: None,
            probe_in_flight: false,
        }
    }

    #[must_use]
    pub fn state_at(&self, now: Instant) -> BreakerState {
        match self.opened_at {
            None => BreakerState::Closed,
            Some(opened) if now.saturating_duration_since(opened) >= self.cooldown => {
                BreakerState::HalfOpen
            }
            Some(_) => BreakerState::Open,
        }
    }

    /// Whether a call may be attempted at `now`.
    ///
    /// In the half-open state only the first caller gets through until that
    /// probe reports back.
    pub fn allow_at(&mut self, now: Instant) -> bool {
        match self.state_at(now) {
            BreakerState::Closed => true,
            BreakerState::Open => false,
            BreakerState::HalfOpen => {
                if self.probe_in_flight {
                    false
                } else {
                    self.probe_in_flight = true;
                    true
                }
            }
        }
    }

    pub fn allow(&mut self) -> bool {
        self.allow_at(Instant::now())
    }

    pub fn record_success(&mut self) {
        if self.opened_at.is_some() {
            tracing::info!("circuit breaker closed after successful probe");
        }
        self.consecutive_failures = 0;
        self.opened_at = None;
        self.probe_in_flight = false;
    }

    pub fn record_failure_at(&mut self, now: Instant) {
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        let probe_failed = self.probe_in_flight;
        self.probe_in_flight = false;

        if probe_failed || self.consecutive_failures >= self.failure_threshold {
            tracing::warn!(
                consecutive_failures = self.consecutive_failures,
                cooldown_ms = u64::try_from(self.cooldown.as_millis()).unwrap_or(u64::MAX),
                "circuit breaker opened"
            );
            self.opened_at = Some(now);
        }
    }

    pub fn record_failure(&mut self) {
        self.record_failure_at(Instant::now());
    }

    #[must_use]
    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COOLDOWN: Duration = Duration::from_secs(30);

    #[test]
    fn stays_closed_below_threshold() {
        let now = Instant::now();
        let mut breaker = CircuitBreaker::new(3, COOLDOWN);
        breaker.record_failure_at(now);
        breaker.record_failure_at(now);
        assert_eq!(breaker.state_at(now), BreakerState::Closed);
        assert!(breaker.allow_at(now));
    }

    #[test]
    fn opens_at_threshold_and_skips_calls() {
        let now = Instant::now();
        let mut breaker = CircuitBreaker::new(2, COOLDOWN);
        breaker.record_failure_at(now);
        breaker.record_failure_at(now);
        assert_eq!(breaker.state_at(now), BreakerState::Open);
        assert!(!breaker.allow_at(now + Duration::from_secs(10)));
    }

    #[test]
    fn success_resets_failure_count() {
        let now = Instant::now();
        let mut breaker = CircuitBreaker::new(2, COOLDOWN);
        breaker.record_failure_at(now);
        breaker.record_success();
        breaker.record_failure_at(now);
        assert_eq!(breaker.state_at(now), BreakerState::Closed);
        assert_eq!(breaker.consecutive_failures(), 1);
    }

    #[test]
    fn half_open_allows_a_single_probe() {
        let now = Instant::now();
        let mut breaker = CircuitBreaker::new(1, COOLDOWN);
        breaker.record_failure_at(now);
        let later = now + COOLDOWN;
        assert_eq!(breaker.state_at(later), BreakerState::HalfOpen);
        assert!(breaker.allow_at(later));
        assert!(!breaker.allow_at(later));
    }

    #[test]
    fn failed_probe_reopens_for_a_full_cooldown() {
        let now = Instant::now();
        let mut breaker = CircuitBreaker::new(5, COOLDOWN);
        for _ in 0..5 {
            breaker.record_failure_at(now);
        }
        let probe_time = now + COOLDOWN;
        assert!(breaker.allow_at(probe_time));
        breaker.record_failure_at(probe_time);
        assert_eq!(
            breaker.state_at(probe_time + Duration::from_secs(1)),
            BreakerState::Open
        );
        assert_eq!(
            breaker.state_at(probe_time + COOLDOWN),
            BreakerState::HalfOpen
        );
    }

    #[test]
    fn successful_probe_closes() {
        let now = Instant::now();
        let mut breaker = CircuitBreaker::new(1, COOLDOWN);
        breaker.record_failure_at(now);
        assert!(breaker.allow_at(now + COOLDOWN));
        breaker.record_success();
        assert_eq!(breaker.state_at(now + COOLDOWN), BreakerState::Closed);
        assert!(breaker.allow_at(now + COOLDOWN));
    }

    #[test]
    fn zero_threshold_behaves_like_one() {
        let now = Instant::now();
        let mut breaker = CircuitBreaker::new(0, COOLDOWN);
        assert!(breaker.allow_at(now));
        breaker.record_failure_at(now);
        assert_eq!(breaker.state_at(now), BreakerState::Open);
    }
}
