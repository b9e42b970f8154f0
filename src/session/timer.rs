//! One-shot timers owned by the session
//!
//! Timers are not cancellable. They vanish with the session that owns them.

use super::state::Stage;

/// Work deferred to a later clock time
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TimedAction {
    /// Clear the notification with this generation id, if still current
    ExpireNotification(u64),
    /// Announce that `from` is complete, then schedule the stage change
    StageCleared { from: Stage },
    /// Move to `to`, if it directly follows the current stage
    EnterStage { to: Stage },
}

#[derive(Debug, Clone)]
struct Timer {
    due_ms: u64,
    seq: u64,
    action: TimedAction,
}

/// Pending timers, kept sorted by (due time, scheduling order)
#[derive(Debug, Clone, Default)]
pub(crate) struct TimerQueue {
    timers: Vec<Timer>,
    next_seq: u64,
}

impl TimerQueue {
    pub fn schedule(&mut self, due_ms: u64, action: TimedAction) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timers.push(Timer { due_ms, seq, action });
        self.timers.sort_by_key(|t| (t.due_ms, t.seq));
    }

    /// Remove and return the earliest timer due at or before `now_ms`
    pub fn pop_due(&mut self, now_ms: u64) -> Option<(u64, TimedAction)> {
        let first = self.timers.first()?;
        if first.due_ms > now_ms {
            return None;
        }
        let timer = self.timers.remove(0);
        Some((timer.due_ms, timer.action))
    }

    pub fn next_due(&self) -> Option<u64> {
        self.timers.first().map(|t| t.due_ms)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_due_orders_by_time_then_sequence() {
        let mut q = TimerQueue::default();
        q.schedule(200, TimedAction::ExpireNotification(1));
        q.schedule(100, TimedAction::ExpireNotification(2));
        q.schedule(100, TimedAction::ExpireNotification(3));

        assert_eq!(q.next_due(), Some(100));
        assert_eq!(q.pop_due(50), None);
        assert_eq!(q.pop_due(150), Some((100, TimedAction::ExpireNotification(2))));
        assert_eq!(q.pop_due(150), Some((100, TimedAction::ExpireNotification(3))));
        assert_eq!(q.pop_due(150), None);
        assert_eq!(q.len(), 1);
        assert_eq!(q.pop_due(200), Some((200, TimedAction::ExpireNotification(1))));
        assert_eq!(q.next_due(), None);
    }
}
