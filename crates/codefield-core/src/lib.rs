//! Cooperative timer runtime for codefield.
//!
//! The field is driven by a single-threaded host event loop. The only
//! asynchronous work it does is a recurring blink timer, so this crate offers
//! exactly that: a [`TimerScheduler`] seam the host implements (or the bundled
//! [`TimerQueue`]), and a [`TimerRegistration`] token that cancels its timer
//! when cancelled or dropped.

mod timer;
mod timer_queue;

pub use timer::{schedule_repeating, TimerCallback, TimerId, TimerRegistration, TimerScheduler};
pub use timer_queue::TimerQueue;

pub use web_time::{Duration, Instant};
