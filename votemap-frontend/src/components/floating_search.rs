use leptos::{html::Input, *};
use wasm_bindgen::JsCast;

use votemap_core::ui::floating_search::{FloatingSearch as State, SearchEffect};

/// A round search button that expands into a search input.
#[component]
pub fn FloatingSearch(on_search: Callback<String>) -> impl IntoView {
    let state = RwSignal::new(State::default());
    let input_ref = create_node_ref::<Input>();
    let container_ref = create_node_ref::<html::Div>();

    let toggle = move |_| {
        if let Some(SearchEffect::FocusInput { after }) = state.try_update(State::toggle).flatten() {
            set_timeout(
                move || {
                    if let Some(input) = input_ref.get_untracked() {
                        let _ = input.focus();
                    }
                },
                after,
            );
        }
    };

    let handle = window_event_listener(ev::mousedown, move |ev| {
        if !state.with_untracked(State::is_expanded) {
            return;
        }
        let Some(container) = container_ref.get_untracked() else {
            return;
        };
        let inside = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::Node>().ok())
            .is_some_and(|node| container.contains(Some(&node)));
        state.update(|s| s.pointer_down(inside));
    });
    on_cleanup(move || handle.remove());

    let expanded = move || state.with(State::is_expanded);

    view! {
      <div
        node_ref=container_ref
        class=move || format!(
            "fixed bottom-6 right-6 z-50 flex items-center transition-all duration-300 ease-in-out {}",
            if expanded() { "w-[300px] md:w-[400px]" } else { "w-auto" }
        )
      >
        <div class="flex items-center w-full overflow-hidden rounded-full shadow-lg bg-white border">
          <Show when=expanded>
            <input
              node_ref=input_ref
              type="search"
              placeholder="Search..."
              class="flex-1 px-4 border-0 outline-none"
              on:keydown=move |ev| {
                  match &*ev.key() {
                      "Escape" => state.update(State::escape),
                      "Enter" => {
                          let value = event_target_value(&ev);
                          let value = value.trim();
                          if !value.is_empty() {
                              on_search.call(value.to_string());
                          }
                      }
                      _ => { /* nothing to do */ }
                  }
              }
            />
          </Show>
          <button
            class="rounded-full h-12 w-12 shrink-0"
            aria-label=move || if expanded() { "Close search" } else { "Open search" }
            on:click=toggle
          >
            { move || if expanded() { "✕" } else { "🔍" } }
          </button>
        </div>
      </div>
    }
}
