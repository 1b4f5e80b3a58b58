//! Cached resource stores.
//!
//! A store wraps one gateway and owns the collection that the views
//! render. Reads go through a [`QueryCache`](crate::cache::QueryCache),
//! mutations invalidate the affected query scopes so that the next
//! read asks the backend again.

use std::{cell::RefCell, fmt::Display};

use crate::{
    cache::Loaded,
    gateways::notify::Notify,
    observe::{ObserverId, Observers},
    util::validate::Validate,
    Error, Result,
};

mod category;
mod invitation;
mod vote;
mod votee;

pub use self::{category::*, invitation::*, vote::*, votee::*};

mod prelude {
    pub(super) use std::rc::Rc;

    pub(super) use votemap_entities::id::Id;

    pub(super) use super::{check, Collection};
    pub(super) use crate::{
        cache::{QueryCache, QueryClient, QueryKey, QueryScope},
        gateways::notify::Notify,
        observe::ObserverId,
        Error, Result,
    };
}

/// The collection a store exposes to its views.
struct Collection<T> {
    items: RefCell<Vec<T>>,
    observers: Observers<[T]>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            items: RefCell::new(Vec::new()),
            observers: Observers::default(),
        }
    }
}

impl<T: Clone> Collection<T> {
    fn get(&self) -> Vec<T> {
        self.items.borrow().clone()
    }

    fn replace(&self, items: Vec<T>) {
        let snapshot = items.clone();
        *self.items.borrow_mut() = items;
        self.observers.notify(&snapshot);
    }

    /// Takes over a loaded value unless it is outdated.
    fn replace_loaded(&self, loaded: Loaded<Vec<T>>) -> Vec<T> {
        let Loaded { value, is_current } = loaded;
        if is_current {
            self.replace(value.clone());
        } else {
            log::debug!("Keep collection: the response predates an invalidation");
        }
        value
    }

    fn subscribe<F>(&self, observer: F) -> ObserverId
    where
        F: Fn(&[T]) + 'static,
    {
        self.observers.subscribe(observer)
    }

    fn unsubscribe(&self, id: ObserverId) {
        self.observers.unsubscribe(id);
    }
}

/// Validates a mutation before it is sent.
fn check<V>(notify: &dyn Notify, input: &V, message: &str) -> Result<()>
where
    V: Validate,
    V::Error: Display,
    Error: From<V::Error>,
{
    input.validate().map_err(|err| {
        log::warn!("Rejected invalid input: {err}");
        notify.error(message);
        Error::from(err)
    })
}
