use std::time::Duration;

use crate::types::internal::LoginAttemptState;

/// Whether an attempt may proceed right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardStatus {
    Open {
        failed_attempts: u32,
        remaining_attempts: u32,
    },
    Locked {
        until: i64,
        retry_after_seconds: i64,
    },
}

impl GuardStatus {
    pub fn is_locked(&self) -> bool {
        matches!(self, GuardStatus::Locked { .. })
    }
}

/// Lockout state machine
///
/// `Open` while failures stay under the threshold, `Locked` once the
/// threshold is reached. Expiry is evaluated lazily: a lapsed lockout is
/// cleared the next time the state is evaluated, there is no timer.
#[derive(Debug, Clone, Copy)]
pub struct LoginGuard {
    max_attempts: u32,
    lockout_seconds: i64,
}

impl LoginGuard {
    pub fn new(max_attempts: u32, lockout_duration: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            lockout_seconds: i64::try_from(lockout_duration.as_secs()).unwrap_or(i64::MAX),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Normalize the stored state for `now` and report whether it is locked
    ///
    /// A lockout whose expiry has passed resets the counter to zero.
    pub fn evaluate(&self, state: LoginAttemptState, now: i64) -> (LoginAttemptState, GuardStatus) {
        match state.locked_until {
            Some(until) if now < until => (
                state,
                GuardStatus::Locked {
                    until,
                    retry_after_seconds: until - now,
                },
            ),
            Some(_) => (LoginAttemptState::default(), self.open_status(0)),
            None => (state, self.open_status(state.failed_attempts)),
        }
    }

    /// Record a failed credential check on an open state
    ///
    /// Reaching the threshold starts a lockout of the configured duration.
    pub fn record_failure(&self, state: LoginAttemptState, now: i64) -> LoginAttemptState {
        let failed_attempts = state.failed_attempts.saturating_add(1);
        let locked_until = if failed_attempts >= self.max_attempts {
            Some(now.saturating_add(self.lockout_seconds))
        } else {
            None
        };

        LoginAttemptState {
            failed_attempts,
            locked_until,
        }
    }

    /// A successful check clears everything regardless of prior state
    pub fn record_success(&self) -> LoginAttemptState {
        LoginAttemptState::default()
    }

    fn open_status(&self, failed_attempts: u32) -> GuardStatus {
        GuardStatus::Open {
            failed_attempts,
            remaining_attempts: self.max_attempts.saturating_sub(failed_attempts),
        }
    }
}
