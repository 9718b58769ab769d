//! Rate Limiting Infrastructure
//!
//! Cooldown rule: an action for a key is allowed only if the previous
//! accepted action for the same key happened at least `window` ago.
//! The caller supplies the last accepted timestamp, so the rule holds no
//! state of its own.

use std::time::Duration;

use chrono::{DateTime, Utc};

/// Per-key sliding cooldown window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cooldown {
    window: Duration,
}

impl Default for Cooldown {
    fn default() -> Self {
        Self::new(Duration::from_millis(2000))
    }
}

/// Result of a cooldown check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CooldownDecision {
    Allowed,
    /// Rejected; `retry_after` is the remaining part of the window
    CoolingDown { retry_after: Duration },
}

impl CooldownDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, CooldownDecision::Allowed)
    }
}

impl Cooldown {
    pub fn new(window: Duration) -> Self {
        Self { window }
    }

    fn window_ms(&self) -> i64 {
        self.window.as_millis() as i64
    }

    /// Decide whether an action at `now` is allowed given the last accepted one.
    ///
    /// A `last` in the future (clock moved backwards) counts as negative
    /// elapsed time and is therefore still cooling down.
    pub fn check(&self, last: Option<DateTime<Utc>>, now: DateTime<Utc>) -> CooldownDecision {
        let Some(last) = last else {
            return CooldownDecision::Allowed;
        };

        let elapsed_ms = (now - last).num_milliseconds();
        let window_ms = self.window_ms();
        if elapsed_ms >= window_ms {
            CooldownDecision::Allowed
        } else {
            let remaining = (window_ms - elapsed_ms) as u64;
            CooldownDecision::CoolingDown {
                retry_after: Duration::from_millis(remaining),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn t0() -> DateTime<Utc> {
        DateTime::from_timestamp_millis(1_704_067_200_000).unwrap()
    }

    #[test]
    fn test_first_action_allowed() {
        assert!(Cooldown::default().check(None, t0()).is_allowed());
    }

    #[test]
    fn test_inside_window_rejected() {
        let cooldown = Cooldown::default();
        let now = t0() + TimeDelta::milliseconds(500);
        assert_eq!(
            cooldown.check(Some(t0()), now),
            CooldownDecision::CoolingDown {
                retry_after: Duration::from_millis(1500)
            }
        );
    }

    #[test]
    fn test_window_boundary() {
        let cooldown = Cooldown::default();
        let just_before = t0() + TimeDelta::milliseconds(1999);
        let exactly = t0() + TimeDelta::milliseconds(2000);
        assert!(!cooldown.check(Some(t0()), just_before).is_allowed());
        assert!(cooldown.check(Some(t0()), exactly).is_allowed());
    }

    #[test]
    fn test_future_last_still_cooling() {
        let cooldown = Cooldown::default();
        let last = t0() + TimeDelta::milliseconds(100);
        match cooldown.check(Some(last), t0()) {
            CooldownDecision::CoolingDown { retry_after } => {
                assert_eq!(retry_after, Duration::from_millis(2100));
            }
            other => panic!("expected cooldown, got {other:?}"),
        }
    }

    #[test]
    fn test_custom_window() {
        let cooldown = Cooldown::new(Duration::from_secs(10));
        assert_eq!(cooldown.window_ms(), 10_000);
        let now = t0() + TimeDelta::seconds(9);
        assert!(!cooldown.check(Some(t0()), now).is_allowed());
    }
}
