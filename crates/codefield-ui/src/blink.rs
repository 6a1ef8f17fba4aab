//! Blink timer for the active underline segment.
//!
//! The segment alternates between visible and hidden every
//! [`BLINK_INTERVAL_MS`]. Each field owns its own timer; there is no shared
//! global blink state, so two fields never fight over one cursor.

use codefield_core::{schedule_repeating, TimerId, TimerRegistration, TimerScheduler};
use std::fmt;
use std::rc::Rc;
use web_time::Duration;

/// Blink interval in milliseconds.
pub const BLINK_INTERVAL_MS: u64 = 500;

/// Blink interval duration.
pub const BLINK_INTERVAL: Duration = Duration::from_millis(BLINK_INTERVAL_MS);

/// Owns at most one repeating blink timer.
pub(crate) struct BlinkTimer {
    scheduler: Rc<dyn TimerScheduler>,
    registration: Option<TimerRegistration>,
}

impl BlinkTimer {
    pub(crate) fn new(scheduler: Rc<dyn TimerScheduler>) -> Self {
        Self {
            scheduler,
            registration: None,
        }
    }

    /// Cancels any running timer and arms a new one calling `on_tick` every
    /// interval.
    pub(crate) fn start(&mut self, on_tick: impl FnMut() + 'static) {
        self.stop();
        self.registration = Some(schedule_repeating(
            &self.scheduler,
            BLINK_INTERVAL,
            on_tick,
        ));
    }

    pub(crate) fn stop(&mut self) {
        if let Some(registration) = self.registration.take() {
            log::trace!("blink timer {:?} cancelled", registration.id());
            registration.cancel();
        }
    }

    pub(crate) fn is_armed(&self) -> bool {
        self.registration
            .as_ref()
            .is_some_and(TimerRegistration::is_active)
    }

    pub(crate) fn timer_id(&self) -> Option<TimerId> {
        self.registration.as_ref().and_then(TimerRegistration::id)
    }
}

impl fmt::Debug for BlinkTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlinkTimer")
            .field("timer", &self.timer_id())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codefield_core::TimerQueue;
    use std::cell::Cell;

    #[test]
    fn start_arms_and_stop_cancels() {
        let queue = Rc::new(TimerQueue::new());
        let mut timer = BlinkTimer::new(queue.clone());
        assert!(!timer.is_armed());

        timer.start(|| {});
        assert!(timer.is_armed());
        assert_eq!(queue.active_timer_count(), 1);

        timer.stop();
        assert!(!timer.is_armed());
        assert_eq!(queue.active_timer_count(), 0);
    }

    #[test]
    fn restart_replaces_previous_timer() {
        let queue = Rc::new(TimerQueue::new());
        let mut timer = BlinkTimer::new(queue.clone());
        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));

        timer.start({
            let first = first.clone();
            move || first.set(first.get() + 1)
        });
        timer.start({
            let second = second.clone();
            move || second.set(second.get() + 1)
        });

        assert_eq!(queue.active_timer_count(), 1);
        queue.advance_by(BLINK_INTERVAL * 2);
        assert_eq!(first.get(), 0);
        assert_eq!(second.get(), 2);
    }

    #[test]
    fn dropping_timer_cancels() {
        let queue = Rc::new(TimerQueue::new());
        let mut timer = BlinkTimer::new(queue.clone());
        timer.start(|| {});
        drop(timer);
        assert_eq!(queue.active_timer_count(), 0);
    }
}
