use std::rc::Rc;

use leptos::*;

use votemap_core::gateways::geocode::{PlaceSearchGateway, PlaceSuggestion};

/// Search box that proposes places to jump to.
#[component]
pub fn PlaceSearch(
    gateway: Rc<dyn PlaceSearchGateway>,
    on_select: Callback<PlaceSuggestion>,
) -> impl IntoView {
    let (query, set_query) = create_signal(String::new());
    let (suggestions, set_suggestions) = create_signal(Vec::<PlaceSuggestion>::new());
    let gateway = store_value(gateway);

    let search_action = create_action(move |text: &String| {
        let text = text.clone();
        let gateway = gateway.get_value();
        async move {
            match gateway.search_places(&text).await {
                Ok(places) => set_suggestions.set(places),
                Err(err) => {
                    log::error!("Unable to search for '{text}': {err}");
                    set_suggestions.set(vec![]);
                }
            }
        }
    });

    let clear = move || {
        set_query.set(String::new());
        set_suggestions.set(vec![]);
    };

    view! {
      <div class="absolute top-2 right-16 z-40 bg-white shadow-md rounded w-80">
        <div class="relative w-full">
          <input
            type="text"
            placeholder="Search a place..."
            class="w-full h-11 pl-4 pr-10 outline-none"
            prop:value=move || query.get()
            on:input=move |ev| set_query.set(event_target_value(&ev))
            on:keyup=move |ev| {
                ev.stop_propagation();
                match &*ev.key() {
                    "Enter" => {
                        let value = query.get_untracked();
                        let value = value.trim();
                        if !value.is_empty() {
                            search_action.dispatch(value.to_string());
                        }
                    }
                    "Escape" => clear(),
                    _ => { /* nothing to do */ }
                }
            }
          />
          <Show when=move || !query.get().is_empty()>
            <span
              class="absolute right-3 top-1/2 -translate-y-1/2 cursor-pointer text-gray-500"
              on:click=move |_| clear()
            >
              "✕"
            </span>
          </Show>
        </div>
        <ul>
          <For
            each=move || suggestions.get().into_iter().enumerate().collect::<Vec<_>>()
            key=|(i, place)| (*i, place.name.clone())
            let:item
          >
            {
              let (_, place) = item;
              let name = place.name.clone();
              view! {
                <li
                  class="px-4 py-2 text-sm cursor-pointer hover:bg-gray-100"
                  on:click=move |_| {
                      clear();
                      on_select.call(place.clone());
                  }
                >
                  { name }
                </li>
              }
            }
          </For>
        </ul>
      </div>
    }
}
