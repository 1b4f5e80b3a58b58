use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::Rc,
    time::Duration,
};

/// Runs callbacks after a delay.
///
/// Dropping the returned handle cancels the callback
/// if it has not been run yet.
pub trait Scheduler {
    type Handle;
    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> Self::Handle;
}

/// Delays an action until no further call arrived within the delay.
///
/// Only the arguments of the last call are passed to the action.
pub struct Debouncer<S: Scheduler, T> {
    scheduler: S,
    delay: Duration,
    pending: RefCell<Option<S::Handle>>,
    armed: Rc<Cell<bool>>,
    action: Rc<dyn Fn(T)>,
}

impl<S: Scheduler, T> fmt::Debug for Debouncer<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.delay)
            .field("pending", &self.armed.get())
            .finish()
    }
}

impl<S, T> Debouncer<S, T>
where
    S: Scheduler,
    S::Handle: 'static,
    T: 'static,
{
    pub fn new<F>(scheduler: S, delay: Duration, action: F) -> Self
    where
        F: Fn(T) + 'static,
    {
        Self {
            scheduler,
            delay,
            pending: RefCell::new(None),
            armed: Rc::new(Cell::new(false)),
            action: Rc::new(action),
        }
    }

    pub fn call(&self, args: T) {
        let action = Rc::clone(&self.action);
        let armed = Rc::clone(&self.armed);
        let handle = self.scheduler.schedule(
            self.delay,
            Box::new(move || {
                armed.set(false);
                action(args);
            }),
        );
        self.armed.set(true);
        // Replacing the previous handle cancels its timer.
        let previous = self.pending.borrow_mut().replace(handle);
        drop(previous);
    }

    pub fn cancel(&self) {
        let previous = self.pending.borrow_mut().take();
        drop(previous);
        self.armed.set(false);
    }

    pub fn is_pending(&self) -> bool {
        self.armed.get()
    }

    pub const fn delay(&self) -> Duration {
        self.delay
    }
}

#[cfg(test)]
pub(crate) use self::manual::ManualScheduler;

#[cfg(test)]
mod manual {
    use std::{
        cell::{Cell, RefCell},
        rc::Rc,
        time::Duration,
    };

    use super::Scheduler;

    struct Timer {
        due: Duration,
        canceled: Rc<Cell<bool>>,
        callback: Box<dyn FnOnce()>,
    }

    #[derive(Default)]
    struct Clock {
        now: Cell<Duration>,
        timers: RefCell<Vec<Timer>>,
    }

    /// A scheduler with a clock that only moves when told to.
    #[derive(Clone, Default)]
    pub struct ManualScheduler {
        clock: Rc<Clock>,
    }

    pub struct ManualHandle {
        canceled: Rc<Cell<bool>>,
    }

    impl Drop for ManualHandle {
        fn drop(&mut self) {
            self.canceled.set(true);
        }
    }

    impl Scheduler for ManualScheduler {
        type Handle = ManualHandle;

        fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> ManualHandle {
            let canceled = Rc::new(Cell::new(false));
            self.clock.timers.borrow_mut().push(Timer {
                due: self.clock.now.get() + delay,
                canceled: Rc::clone(&canceled),
                callback,
            });
            ManualHandle { canceled }
        }
    }

    impl ManualScheduler {
        pub fn advance(&self, by: Duration) {
            let now = self.clock.now.get() + by;
            self.clock.now.set(now);
            loop {
                let due = {
                    let mut timers = self.clock.timers.borrow_mut();
                    timers.retain(|t| !t.canceled.get());
                    timers
                        .iter()
                        .position(|t| t.due <= now)
                        .map(|i| timers.remove(i))
                };
                let Some(timer) = due else {
                    break;
                };
                (timer.callback)();
            }
        }

        pub fn pending_timers(&self) -> usize {
            self.clock
                .timers
                .borrow()
                .iter()
                .filter(|t| !t.canceled.get())
                .count()
        }
    }
}
