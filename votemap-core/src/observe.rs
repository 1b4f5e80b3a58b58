use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::Rc,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(usize);

type Observer<E> = Rc<dyn Fn(&E)>;

/// Explicit change notifications from a state holder to its views.
pub struct Observers<E: ?Sized> {
    next_id: Cell<usize>,
    observers: RefCell<Vec<(ObserverId, Observer<E>)>>,
}

impl<E: ?Sized> Default for Observers<E> {
    fn default() -> Self {
        Self {
            next_id: Cell::new(0),
            observers: RefCell::new(Vec::new()),
        }
    }
}

impl<E: ?Sized> fmt::Debug for Observers<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.observers.borrow().len())
            .finish()
    }
}

impl<E: ?Sized> Observers<E> {
    pub fn subscribe<F>(&self, observer: F) -> ObserverId
    where
        F: Fn(&E) + 'static,
    {
        let id = ObserverId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.observers.borrow_mut().push((id, Rc::new(observer)));
        id
    }

    pub fn unsubscribe(&self, id: ObserverId) {
        self.observers.borrow_mut().retain(|(x, _)| *x != id);
    }

    pub fn notify(&self, event: &E) {
        // Observers may (un)subscribe while being notified.
        let observers: Vec<_> = self
            .observers
            .borrow()
            .iter()
            .map(|(_, o)| Rc::clone(o))
            .collect();
        for observer in observers {
            observer(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notify_subscribed_observers_only() {
        let observers = Observers::<[u32]>::default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let id = {
            let seen = Rc::clone(&seen);
            observers.subscribe(move |values: &[u32]| seen.borrow_mut().push(values.len()))
        };
        observers.notify(&[1, 2, 3]);
        observers.unsubscribe(id);
        observers.notify(&[1]);
        assert_eq!(*seen.borrow(), vec![3]);
    }
}
