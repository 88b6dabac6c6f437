use std::time::Duration;

/// Identifies one scheduled run of the assistant.
///
/// A token is only honored if no mode change, deactivation or other run happened
/// since it was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScheduleToken {
    epoch: u64,
    sequence: u64,
}

/// What the assistant wants to run next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum TickKind {
    /// Play one move.
    AutoPlay,
    /// Refresh the hint.
    Hint,
}

/// The next run requested by the assistant, after `delay` on the host's clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTick {
    token: ScheduleToken,
    kind: TickKind,
    delay: Duration,
}

impl ScheduledTick {
    #[must_use]
    pub fn token(&self) -> ScheduleToken {
        self.token
    }

    #[must_use]
    pub fn kind(&self) -> TickKind {
        self.kind
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// Issues and validates [`ScheduleToken`]s.
///
/// The epoch changes when the pending work is cancelled; the sequence changes each
/// time a token is consumed, so a token runs at most once.
#[derive(Debug, Default, Clone)]
pub(crate) struct Scheduler {
    epoch: u64,
    sequence: u64,
}

impl Scheduler {
    pub(crate) fn tick(&self, kind: TickKind, delay: Duration) -> ScheduledTick {
        ScheduledTick {
            token: ScheduleToken {
                epoch: self.epoch,
                sequence: self.sequence,
            },
            kind,
            delay,
        }
    }

    /// Invalidates every token issued so far.
    pub(crate) fn cancel(&mut self) {
        self.epoch += 1;
        self.sequence = 0;
    }

    /// Consumes `token` if it is still current.
    pub(crate) fn consume(&mut self, token: ScheduleToken) -> bool {
        if token.epoch != self.epoch || token.sequence != self.sequence {
            return false;
        }
        self.sequence += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_runs_once() {
        let mut scheduler = Scheduler::default();
        let tick = scheduler.tick(TickKind::AutoPlay, Duration::ZERO);
        assert!(scheduler.consume(tick.token()));
        assert!(!scheduler.consume(tick.token()));

        let next = scheduler.tick(TickKind::AutoPlay, Duration::ZERO);
        assert_ne!(next.token(), tick.token());
        assert!(scheduler.consume(next.token()));
    }

    #[test]
    fn test_cancel_invalidates_pending_tokens() {
        let mut scheduler = Scheduler::default();
        let stale = scheduler.tick(TickKind::Hint, Duration::from_secs(5));
        scheduler.cancel();
        assert!(!scheduler.consume(stale.token()));

        let fresh = scheduler.tick(TickKind::Hint, Duration::from_secs(5));
        assert!(scheduler.consume(fresh.token()));
    }
}
