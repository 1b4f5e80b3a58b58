use std::time::Duration;

use gloo_timers::callback::Timeout;

use votemap_core::debounce::Scheduler;

/// Schedules callbacks with `setTimeout`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    // Dropping a `Timeout` clears it.
    type Handle = Timeout;

    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> Timeout {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        Timeout::new(millis, callback)
    }
}
