//! Between-tick scheduled callbacks
//!
//! Cooldown release and the difficulty ramp are scheduled on the sim clock and
//! fired by the frame driver before a tick, never during one.

/// A scheduled callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Re-arm the fire button
    CooldownRelease,
    /// Tighten the spawn cadence and reschedule
    DifficultyRamp,
}

/// Pending timers, fired in due order
#[derive(Debug, Clone, Default)]
pub struct Timers {
    pending: Vec<(f64, TimerEvent)>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `event` to fire once the clock reaches `due_ms`
    pub fn schedule(&mut self, due_ms: f64, event: TimerEvent) {
        self.pending.push((due_ms, event));
    }

    /// Remove and return the earliest timer due at `now_ms`.
    ///
    /// Timers with equal due times fire in scheduling order.
    pub fn pop_due(&mut self, now_ms: f64) -> Option<(f64, TimerEvent)> {
        let mut earliest: Option<usize> = None;
        for (i, (due, _)) in self.pending.iter().enumerate() {
            if *due > now_ms {
                continue;
            }
            match earliest {
                Some(j) if self.pending[j].0 <= *due => {}
                _ => earliest = Some(i),
            }
        }
        earliest.map(|i| self.pending.remove(i))
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
