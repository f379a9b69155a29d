//! Timer scheduling
//!
//! The desktop never sleeps or spawns threads. It asks a [`Scheduler`] to
//! deliver an event later ("fire once after N ms", "fire every N ms") and the
//! host drains due events by calling [`Scheduler::pop_due`] with the current
//! time. [`TimerQueue`] keeps virtual time, so tests advance it explicitly and
//! the CLI feeds it wall-clock milliseconds.

use crate::domain::gesture::Millis;

/// Handle for cancelling a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// Timing collaborator used by the desktop controller
pub trait Scheduler<E> {
    /// Current time as seen by the scheduler
    fn now(&self) -> Millis;
    /// Fires `event` once, `delay` ms from now
    fn once(&mut self, delay: Millis, event: E) -> TimerId;
    /// Fires `event` every `period` ms until cancelled
    fn every(&mut self, period: Millis, event: E) -> TimerId;
    /// Cancels a timer. Unknown or already-fired ids are ignored.
    fn cancel(&mut self, id: TimerId);
    /// Removes and returns the earliest event due at or before `until`,
    /// advancing the scheduler clock to that event's due time. Returns None
    /// once nothing is due, with the clock moved to `until`.
    fn pop_due(&mut self, until: Millis) -> Option<E>;
}

#[derive(Debug, Clone)]
struct Entry<E> {
    id: TimerId,
    due: Millis,
    seq: u64,
    period: Option<Millis>,
    event: E,
}

/// Virtual-time scheduler. Events due at the same instant fire in the order
/// they were scheduled.
#[derive(Debug, Clone)]
pub struct TimerQueue<E> {
    now: Millis,
    next_id: u64,
    next_seq: u64,
    entries: Vec<Entry<E>>,
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> TimerQueue<E> {
    pub fn new() -> Self {
        Self {
            now: 0,
            next_id: 0,
            next_seq: 0,
            entries: Vec::new(),
        }
    }

    /// Number of pending timers, repeating ones included
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    fn push(&mut self, delay: Millis, period: Option<Millis>, event: E) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        let seq = self.bump_seq();
        self.entries.push(Entry {
            id,
            due: self.now.saturating_add(delay),
            seq,
            period,
            event,
        });
        id
    }

    fn bump_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }
}

impl<E: Clone> Scheduler<E> for TimerQueue<E> {
    fn now(&self) -> Millis {
        self.now
    }

    fn once(&mut self, delay: Millis, event: E) -> TimerId {
        self.push(delay, None, event)
    }

    fn every(&mut self, period: Millis, event: E) -> TimerId {
        self.push(period.max(1), Some(period.max(1)), event)
    }

    fn cancel(&mut self, id: TimerId) {
        self.entries.retain(|entry| entry.id != id);
    }

    fn pop_due(&mut self, until: Millis) -> Option<E> {
        let index = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.due <= until)
            .min_by_key(|(_, entry)| (entry.due, entry.seq))
            .map(|(index, _)| index);

        let Some(index) = index else {
            self.now = self.now.max(until);
            return None;
        };

        let due = self.entries[index].due;
        self.now = self.now.max(due);

        match self.entries[index].period {
            Some(period) => {
                let seq = self.bump_seq();
                let entry = &mut self.entries[index];
                entry.due = due + period;
                entry.seq = seq;
                Some(entry.event.clone())
            }
            None => Some(self.entries.swap_remove(index).event),
        }
    }
}
