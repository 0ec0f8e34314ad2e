//! Game-time timer scheduling
//!
//! Timers advance with the simulation delta, not the wall clock. A task is
//! plain data handed back to the caller when it fires, so the caller decides
//! what firing means with full access to its own state.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a scheduled timer
    pub struct TimerId;
}

#[derive(Debug)]
struct ScheduledTask<T> {
    task: T,
    remaining: f32,
    interval: Option<f32>,
}

/// Delay and repeat timers driven by [`TimerService::advance`]
///
/// A timer fires at most once per advance. A repeating timer that falls
/// behind restarts its interval from the advance that fired it instead of
/// catching up.
#[derive(Debug)]
pub struct TimerService<T> {
    timers: SlotMap<TimerId, ScheduledTask<T>>,
}

impl<T: Clone> TimerService<T> {
    /// Create an empty service
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
        }
    }

    /// Fire `task` once after `delay` seconds
    pub fn schedule(&mut self, task: T, delay: f32) -> TimerId {
        self.timers.insert(ScheduledTask {
            task,
            remaining: delay,
            interval: None,
        })
    }

    /// Fire `task` after `delay` seconds and then every `interval` seconds
    pub fn schedule_repeating(&mut self, task: T, delay: f32, interval: f32) -> TimerId {
        self.timers.insert(ScheduledTask {
            task,
            remaining: delay,
            interval: Some(interval),
        })
    }

    /// Cancel a timer, returning `false` if it already finished or was cancelled
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.timers.remove(id).is_some()
    }

    /// Whether the timer is still pending
    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// Seconds until the timer next fires
    pub fn time_until(&self, id: TimerId) -> Option<f32> {
        self.timers.get(id).map(|scheduled| scheduled.remaining.max(0.0))
    }

    /// Cancel every timer
    pub fn clear(&mut self) {
        self.timers.clear();
    }

    /// Number of pending timers
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// Whether no timer is pending
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Advance every timer and collect the tasks that fired, in slot order
    pub fn advance(&mut self, delta_time: f32) -> Vec<(TimerId, T)> {
        let mut fired = Vec::new();
        let mut finished = Vec::new();

        for (id, scheduled) in &mut self.timers {
            scheduled.remaining -= delta_time;
            if scheduled.remaining > 0.0 {
                continue;
            }
            fired.push((id, scheduled.task.clone()));
            match scheduled.interval {
                Some(interval) => scheduled.remaining = interval,
                None => finished.push(id),
            }
        }

        for id in finished {
            self.timers.remove(id);
        }
        fired
    }
}

impl<T: Clone> Default for TimerService<T> {
    fn default() -> Self {
        Self::new()
    }
}
