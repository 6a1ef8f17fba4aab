//! Timer scheduling seam and cancellation token.

use std::fmt;
use std::rc::Rc;
use web_time::Duration;

/// Identifier handed out by a [`TimerScheduler`] for one scheduled timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Callback run every time a repeating timer fires.
pub type TimerCallback = Box<dyn FnMut()>;

/// Schedules recurring callbacks on the host event loop.
///
/// Implementations run callbacks on the same thread that schedules them and
/// never while another callback or input handler is running. Callbacks may
/// schedule or cancel timers, including their own.
pub trait TimerScheduler {
    /// Schedules `callback` to run every `period`, first after one period.
    fn schedule_repeating(&self, period: Duration, callback: TimerCallback) -> TimerId;

    /// Cancels a timer. Unknown or already cancelled ids are ignored.
    fn cancel(&self, id: TimerId);
}

/// Schedules a repeating timer and returns the token that owns it.
pub fn schedule_repeating(
    scheduler: &Rc<dyn TimerScheduler>,
    period: Duration,
    callback: impl FnMut() + 'static,
) -> TimerRegistration {
    let id = scheduler.schedule_repeating(period, Box::new(callback));
    TimerRegistration::new(scheduler.clone(), id)
}

/// Ownership of one scheduled timer.
///
/// Dropping the registration cancels the timer, so storing it in an
/// `Option` and taking it out is enough to release the timer on every path.
pub struct TimerRegistration {
    scheduler: Rc<dyn TimerScheduler>,
    id: Option<TimerId>,
}

impl TimerRegistration {
    fn new(scheduler: Rc<dyn TimerScheduler>, id: TimerId) -> Self {
        Self {
            scheduler,
            id: Some(id),
        }
    }

    pub fn id(&self) -> Option<TimerId> {
        self.id
    }

    pub fn is_active(&self) -> bool {
        self.id.is_some()
    }

    pub fn cancel(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(id) = self.id.take() {
            self.scheduler.cancel(id);
        }
    }
}

impl fmt::Debug for TimerRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerRegistration")
            .field("id", &self.id)
            .finish()
    }
}

impl Drop for TimerRegistration {
    fn drop(&mut self) {
        self.release();
    }
}
