//! Cancellable timers for a single-threaded UI loop.
//!
//! A [`Scheduler`] holds pending one-shot and repeating timers, each carrying a
//! payload. The owner polls it with the current time and receives the payloads
//! that came due; nothing runs in the background. Every timer is identified by a
//! [`TimerId`] which acts as its cancellation handle. A cancelled timer never
//! fires, and dropping the scheduler drops every pending timer with it.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::time::Duration;

/// Cancellation handle for a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Timer<T> {
    due: DateTime<Utc>,
    period: Option<chrono::Duration>,
    payload: T,
}

/// Pending timers keyed by id.
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    next_id: u64,
    timers: BTreeMap<TimerId, Timer<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            timers: BTreeMap::new(),
        }
    }
}

/// Convert a std duration, saturating instead of failing on huge values.
fn to_delta(d: Duration) -> chrono::Duration {
    chrono::Duration::milliseconds(d.as_millis().min(i64::MAX as u128) as i64)
}

fn add(at: DateTime<Utc>, delta: chrono::Duration) -> DateTime<Utc> {
    at.checked_add_signed(delta).unwrap_or(DateTime::<Utc>::MAX_UTC)
}

impl<T> Scheduler<T> {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, timer: Timer<T>) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.insert(id, timer);
        id
    }

    /// Fire `payload` once at `due`.
    pub fn schedule_at(&mut self, due: DateTime<Utc>, payload: T) -> TimerId {
        self.insert(Timer {
            due,
            period: None,
            payload,
        })
    }

    /// Fire `payload` once, `delay` after `now`.
    pub fn schedule_once(&mut self, now: DateTime<Utc>, delay: Duration, payload: T) -> TimerId {
        self.schedule_at(add(now, to_delta(delay)), payload)
    }

    /// Fire `payload` every `period`, starting one period after `now`.
    ///
    /// Periods shorter than one millisecond are raised to one millisecond.
    pub fn schedule_every(&mut self, now: DateTime<Utc>, period: Duration, payload: T) -> TimerId {
        let period = to_delta(period.max(Duration::from_millis(1)));
        self.insert(Timer {
            due: add(now, period),
            period: Some(period),
            payload,
        })
    }

    /// Cancel a pending timer. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.timers.remove(&id).is_some()
    }

    /// Cancel every pending timer, returning how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let count = self.timers.len();
        self.timers.clear();
        count
    }

    /// Whether the timer is still pending.
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.contains_key(&id)
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// Whether no timers are pending.
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Earliest pending deadline.
    pub fn next_due(&self) -> Option<DateTime<Utc>> {
        self.timers.values().map(|t| t.due).min()
    }
}

impl<T: Clone> Scheduler<T> {
    /// Collect every timer due at or before `now`, ordered by deadline.
    ///
    /// One-shot timers are removed. A repeating timer fires at most once per
    /// poll and is re-armed on its own cadence, skipping intervals that were
    /// missed while the loop was stalled.
    pub fn poll(&mut self, now: DateTime<Utc>) -> Vec<(TimerId, T)> {
        let mut due: Vec<(DateTime<Utc>, TimerId)> = self
            .timers
            .iter()
            .filter(|(_, t)| t.due <= now)
            .map(|(id, t)| (t.due, *id))
            .collect();
        due.sort();

        let mut fired = Vec::with_capacity(due.len());
        for (_, id) in due {
            let Some(timer) = self.timers.get_mut(&id) else {
                continue;
            };
            match timer.period {
                Some(period) => {
                    fired.push((id, timer.payload.clone()));
                    while timer.due <= now {
                        timer.due = add(timer.due, period);
                    }
                }
                None => {
                    if let Some(timer) = self.timers.remove(&id) {
                        fired.push((id, timer.payload));
                    }
                }
            }
        }
        fired
    }
}
