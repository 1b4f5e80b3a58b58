use leptos::*;

use votemap_core::{
    entities::id::Id,
    ui::multi_select::{MultiSelect, SelectOption},
};

#[component]
pub fn MultiSelectField(
    #[prop(into)] options: Signal<Vec<SelectOption>>,
    on_change: Callback<Vec<Id>>,
    #[prop(default = "Select items")] placeholder: &'static str,
    #[prop(default = "No items found.")] empty_message: &'static str,
) -> impl IntoView {
    let state = RwSignal::new(MultiSelect::default());
    let (open, set_open) = create_signal(false);

    Effect::new(move |_| {
        let options = options.get();
        state.update(|s| s.set_options(options));
    });

    let apply = move |change: Option<Vec<Id>>| {
        if let Some(selected) = change {
            on_change.call(selected);
        }
    };

    let badges = move || {
        state.with(|s| s.badges().cloned().collect::<Vec<_>>())
    };
    let filtered = move || {
        state.with(|s| {
            s.filtered()
                .map(|o| (o.clone(), s.is_selected(&o.id)))
                .collect::<Vec<_>>()
        })
    };

    view! {
      <div class="relative w-full">
        <button
          type="button"
          class="w-full flex flex-wrap items-center gap-1.5 border rounded px-3 py-2 text-left"
          on:click=move |_| set_open.update(|o| *o = !*o)
        >
          { move || state.with(|s| s.selected().is_empty()).then(|| view! {
              <span class="text-gray-400">{ placeholder }</span>
          })}
          <For
            each=badges
            key=|option| option.id.clone()
            let:option
          >
            <span class="inline-flex items-center bg-gray-100 rounded px-2 py-0.5 text-sm">
              { option.name.clone() }
              <span
                class="ml-1 cursor-pointer text-gray-500 hover:text-gray-800"
                on:mousedown=|ev| {
                    ev.prevent_default();
                    ev.stop_propagation();
                }
                on:click=move |ev| {
                    ev.stop_propagation();
                    let id = option.id.clone();
                    let change = state.try_update(|s| s.remove(&id)).flatten();
                    apply(change);
                }
              >
                "×"
              </span>
            </span>
          </For>
        </button>
        <Show when=move || open.get()>
          <div class="absolute z-50 mt-1 w-full bg-white border rounded shadow-lg">
            <input
              type="text"
              class="w-full h-9 px-3 border-b outline-none"
              placeholder="Search..."
              prop:value=move || state.with(|s| s.input().to_string())
              on:input=move |ev| {
                  let value = event_target_value(&ev);
                  state.update(|s| s.set_input(value));
              }
              on:keydown=move |ev| {
                  if ev.key() == "Backspace" {
                      let change = state.try_update(MultiSelect::backspace).flatten();
                      apply(change);
                  }
              }
            />
            <ul class="max-h-64 overflow-auto">
              { move || filtered().is_empty().then(|| view! {
                  <li class="px-3 py-2 text-sm text-gray-500">{ empty_message }</li>
              })}
              <For
                each=filtered
                key=|(option, selected)| (option.id.clone(), *selected)
                let:item
              >
                {
                  let (option, selected) = item;
                  let id = option.id.clone();
                  view! {
                    <li
                      class="flex items-center px-3 py-2 cursor-pointer hover:bg-gray-100"
                      on:click=move |_| {
                          let change = state.try_update(|s| s.toggle(&id)).flatten();
                          apply(change);
                      }
                    >
                      <span class="mr-2 w-4 h-4 border rounded-sm inline-flex items-center justify-center">
                        { selected.then_some("✓") }
                      </span>
                      { option.name }
                    </li>
                  }
                }
              </For>
            </ul>
          </div>
        </Show>
      </div>
    }
}
