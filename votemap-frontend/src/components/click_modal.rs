use leptos::*;

use votemap_core::ui::{
    modal::{modal_position, DEFAULT_MODAL_SIZE},
    ScreenPoint, Size,
};

fn viewport() -> Size {
    let window = window();
    let width = window
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or_default();
    let height = window
        .inner_height()
        .ok()
        .and_then(|h| h.as_f64())
        .unwrap_or_default();
    Size::new(width, height)
}

/// A dialog shown next to the point where the user clicked.
#[component]
pub fn ClickModal(
    #[prop(into)] open: Signal<bool>,
    #[prop(into)] anchor: MaybeSignal<Option<ScreenPoint>>,
    #[prop(into)] title: MaybeSignal<String>,
    on_dismiss: Callback<()>,
    children: ChildrenFn,
) -> impl IntoView {
    let anchor = Signal::derive(move || anchor.get());
    let title = Signal::derive(move || title.get());

    let handle = window_event_listener(ev::keydown, move |ev| {
        if open.get_untracked() && ev.key() == "Escape" {
            on_dismiss.call(());
        }
    });
    on_cleanup(move || handle.remove());

    let style = move || {
        let ScreenPoint { x, y } = modal_position(anchor.get(), DEFAULT_MODAL_SIZE, viewport());
        format!(
            "position: fixed; left: {x}px; top: {y}px; width: {}px; min-height: {}px",
            DEFAULT_MODAL_SIZE.width, DEFAULT_MODAL_SIZE.height
        )
    };

    let children = store_value(children);

    move || {
        open.get().then(|| {
            view! {
              <div class="fixed inset-0 z-40" on:click=move |_| on_dismiss.call(())>
                <div
                  class="bg-white rounded-lg shadow-lg p-6"
                  style=style
                  on:click=|ev| ev.stop_propagation()
                >
                  <h2 class="text-lg font-semibold">{ move || title.get() }</h2>
                  <div class="mt-4">{ children.with_value(|children| children()) }</div>
                </div>
              </div>
            }
        })
    }
}
