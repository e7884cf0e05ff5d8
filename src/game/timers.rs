//! One-shot deferred callbacks.
//!
//! Timers are plain data: scheduling returns a [`TimerId`] the caller keeps
//! as a cancellation handle, and the frame loop drains whatever is due at
//! the start of each frame. Everything runs on the single game thread.

/// Handle to a pending timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// What to do when a timer fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerAction {
    /// Clear the player's post-hit invincibility and tint.
    EndInvincibility,
    /// Hide the "Next Stage" banner and bring in the next boss.
    RevealNextStage,
}

#[derive(Clone, Debug)]
struct Pending {
    id: TimerId,
    due_ms: f64,
    action: TimerAction,
}

#[derive(Clone, Debug, Default)]
pub struct Timers {
    next_id: u64,
    pending: Vec<Pending>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, now: f64, delay_ms: f64, action: TimerAction) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            id,
            due_ms: now + delay_ms,
            action,
        });
        id
    }

    /// Returns false if the timer already fired or was canceled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != id);
        self.pending.len() != before
    }

    #[cfg(test)]
    pub(crate) fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|p| p.id == id)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.pending.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and return every timer due at `now`, earliest first. Timers due
    /// at the same instant keep their scheduling order.
    pub fn drain_due(&mut self, now: f64) -> Vec<(TimerId, TimerAction)> {
        let mut due: Vec<Pending> = Vec::new();
        self.pending.retain(|p| {
            if p.due_ms <= now {
                due.push(p.clone());
                false
            } else {
                true
            }
        });
        due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms).then(a.id.0.cmp(&b.id.0)));
        due.into_iter().map(|p| (p.id, p.action)).collect()
    }
}
