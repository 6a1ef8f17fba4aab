//! Virtual-clock timer queue.
//!
//! `TimerQueue` keeps its own notion of elapsed time. Tests move it forward
//! with [`advance_by`](TimerQueue::advance_by); real hosts call
//! [`poll`](TimerQueue::poll) with the wall clock and sleep until
//! [`next_deadline_instant`](TimerQueue::next_deadline_instant), the same
//! `WaitUntil` pattern used for cursor blinking, so nothing busy-polls.

use crate::timer::{TimerCallback, TimerId, TimerScheduler};
use std::cell::RefCell;
use std::fmt;
use web_time::{Duration, Instant};

struct TimerEntry {
    id: TimerId,
    period: Duration,
    deadline: Duration,
    /// `None` while the callback is running.
    callback: Option<TimerCallback>,
}

struct TimerQueueInner {
    origin: Instant,
    now: Duration,
    next_id: u64,
    timers: Vec<TimerEntry>,
}

/// Single-threaded [`TimerScheduler`] running on virtual time.
pub struct TimerQueue {
    inner: RefCell<TimerQueueInner>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::with_origin(Instant::now())
    }

    /// Creates a queue whose zero point is `origin` for [`poll`](Self::poll).
    pub fn with_origin(origin: Instant) -> Self {
        Self {
            inner: RefCell::new(TimerQueueInner {
                origin,
                now: Duration::ZERO,
                next_id: 1,
                timers: Vec::new(),
            }),
        }
    }

    /// Virtual time elapsed since the queue was created.
    pub fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    /// Number of timers currently scheduled.
    pub fn active_timer_count(&self) -> usize {
        self.inner.borrow().timers.len()
    }

    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.inner.borrow().timers.iter().any(|entry| entry.id == id)
    }

    /// Earliest pending deadline, in virtual time.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.inner
            .borrow()
            .timers
            .iter()
            .map(|entry| entry.deadline)
            .min()
    }

    /// Earliest pending deadline as a wall-clock instant.
    pub fn next_deadline_instant(&self) -> Option<Instant> {
        let origin = self.inner.borrow().origin;
        self.next_deadline().map(|deadline| origin + deadline)
    }

    /// Advances virtual time by `delta`, firing every timer that falls due.
    ///
    /// Returns the number of callbacks run.
    pub fn advance_by(&self, delta: Duration) -> usize {
        let target = self.now() + delta;
        self.advance_to(target)
    }

    /// Fires due timers for the wall-clock instant `now`.
    pub fn poll(&self, now: Instant) -> usize {
        let origin = self.inner.borrow().origin;
        self.advance_to(now.saturating_duration_since(origin))
    }

    /// Advances virtual time to `target`, firing due timers in deadline order.
    ///
    /// A timer that falls due several times within the step fires once per
    /// period. Moving backwards is ignored.
    pub fn advance_to(&self, target: Duration) -> usize {
        let mut fired = 0;
        loop {
            let due = {
                let mut guard = self.inner.borrow_mut();
                let inner = &mut *guard;
                let next = inner
                    .timers
                    .iter_mut()
                    .filter(|entry| entry.callback.is_some() && entry.deadline <= target)
                    .min_by_key(|entry| (entry.deadline, entry.id));
                match next {
                    Some(entry) => {
                        let deadline = entry.deadline;
                        entry.deadline += entry.period;
                        let due = entry.callback.take().map(|callback| (entry.id, callback));
                        if deadline > inner.now {
                            inner.now = deadline;
                        }
                        due
                    }
                    None => None,
                }
            };

            let Some((id, mut callback)) = due else {
                break;
            };

            // No borrow is held here, callbacks may schedule or cancel.
            callback();
            fired += 1;

            // A callback whose timer was cancelled meanwhile is dropped
            // outside the borrow, its captures may cancel other timers.
            let cancelled = {
                let mut inner = self.inner.borrow_mut();
                match inner.timers.iter_mut().find(|entry| entry.id == id) {
                    Some(entry) => {
                        entry.callback = Some(callback);
                        None
                    }
                    None => Some(callback),
                }
            };
            drop(cancelled);
        }

        let mut inner = self.inner.borrow_mut();
        if target > inner.now {
            inner.now = target;
        }
        if fired > 0 {
            log::trace!("timer queue fired {fired} callback(s), now {:?}", inner.now);
        }
        fired
    }
}

impl Default for TimerQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TimerQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("TimerQueue")
            .field("now", &inner.now)
            .field("timers", &inner.timers.len())
            .finish()
    }
}

impl TimerScheduler for TimerQueue {
    fn schedule_repeating(&self, period: Duration, callback: TimerCallback) -> TimerId {
        let mut inner = self.inner.borrow_mut();
        let id = TimerId(inner.next_id);
        inner.next_id += 1;
        // A zero period would fire forever within one advance.
        let period = period.max(Duration::from_millis(1));
        let deadline = inner.now + period;
        inner.timers.push(TimerEntry {
            id,
            period,
            deadline,
            callback: Some(callback),
        });
        id
    }

    fn cancel(&self, id: TimerId) {
        // Take the entry out before dropping it: a callback's captures may
        // themselves hold registrations that cancel into this queue.
        let removed = {
            let mut inner = self.inner.borrow_mut();
            inner
                .timers
                .iter()
                .position(|entry| entry.id == id)
                .map(|index| inner.timers.remove(index))
        };
        drop(removed);
    }
}
