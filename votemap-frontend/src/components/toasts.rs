use std::{cell::Cell, rc::Rc, time::Duration};

use leptos::*;

use votemap_core::gateways::notify::{Level, Notification, Notify};

const TOAST_DURATION: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, PartialEq, Eq)]
struct Toast {
    id: u64,
    notification: Notification,
}

/// Notifications that are shown for a few seconds.
#[derive(Clone)]
pub struct Toasts {
    toasts: RwSignal<Vec<Toast>>,
    next_id: Rc<Cell<u64>>,
}

impl Toasts {
    #[must_use]
    pub fn new() -> Self {
        Self {
            toasts: RwSignal::new(vec![]),
            next_id: Rc::new(Cell::new(0)),
        }
    }
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new()
    }
}

impl Notify for Toasts {
    fn notify(&self, notification: Notification) {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.toasts.update(|t| t.push(Toast { id, notification }));
        let toasts = self.toasts;
        set_timeout(
            move || toasts.update(|t| t.retain(|toast| toast.id != id)),
            TOAST_DURATION,
        );
    }
}

const fn toast_class(level: Level) -> &'static str {
    match level {
        Level::Success => "bg-teal-600 text-white",
        Level::Info => "bg-white text-gray-800",
        Level::Error => "bg-red-600 text-white",
    }
}

#[component]
pub fn Toaster(toasts: Toasts) -> impl IntoView {
    let items = toasts.toasts;
    view! {
      <div class="fixed top-4 left-1/2 -translate-x-1/2 z-[60] flex flex-col gap-2">
        <For
          each=move || items.get()
          key=|toast| toast.id
          let:toast
        >
          <div class=format!("px-4 py-2 rounded shadow-lg text-sm {}", toast_class(toast.notification.level))>
            { toast.notification.message }
          </div>
        </For>
      </div>
    }
}
