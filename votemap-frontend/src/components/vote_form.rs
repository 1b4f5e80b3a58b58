use std::rc::Rc;

use leptos::*;

use votemap_core::{
    gateways::notify::Notify,
    store::CategoryStore,
    ui::multi_select::MultiSelect,
    vote_form::{category_options, VoteForm, VoteeFormData},
};

use super::MultiSelectField;

#[component]
pub fn VoteeForm(
    categories: Rc<CategoryStore>,
    notify: Rc<dyn Notify>,
    #[prop(into)] pending: Signal<bool>,
    on_submit: Callback<VoteeFormData>,
) -> impl IntoView {
    // -- signals -- //

    let form = RwSignal::new(VoteForm::new(pending.get_untracked()));

    // -- actions -- //

    let load_categories = Action::new(move |store: &Rc<CategoryStore>| {
        let store = Rc::clone(store);
        async move {
            let options = category_options(&store).await;
            form.update(|f| f.categories.set_options(options));
        }
    });
    load_categories.dispatch(categories);

    // -- effects -- //

    Effect::new(move |_| {
        let pending = pending.get();
        form.update(|f| f.pending = pending);
    });

    // -- callbacks -- //

    let notify = store_value(notify);

    let on_categories_changed = Callback::new(move |selected| {
        form.update(|f| {
            f.categories = MultiSelect::new(f.categories.options().to_vec(), selected);
        });
    });

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        form.with_untracked(|f| {
            notify.with_value(|notify| f.submit(notify.as_ref(), |data| on_submit.call(data)));
        });
    };

    let options = Signal::derive(move || form.with(|f| f.categories.options().to_vec()));

    view! {
      <form class="space-y-4" on:submit=submit>
        <div>
          <label class="block text-sm font-medium" for="votee-name">"Name"</label>
          <input
            id="votee-name"
            type="text"
            class="mt-1 w-full border rounded px-3 py-2"
            prop:value=move || form.with(|f| f.name.clone())
            on:input=move |ev| {
                let value = event_target_value(&ev);
                form.update(|f| f.name = value);
            }
          />
        </div>
        <div>
          <label class="block text-sm font-medium" for="votee-message">"Message"</label>
          <textarea
            id="votee-message"
            class="mt-1 w-full border rounded px-3 py-2"
            prop:value=move || form.with(|f| f.message.clone())
            on:input=move |ev| {
                let value = event_target_value(&ev);
                form.update(|f| f.message = value);
            }
          />
        </div>
        <div>
          <label class="block text-sm font-medium">"Categories"</label>
          <MultiSelectField
            options
            on_change=on_categories_changed
            placeholder="Select categories"
            empty_message="No categories found."
          />
        </div>
        <button
          type="submit"
          class="w-full rounded bg-blue-600 text-white py-2 disabled:opacity-50"
          prop:disabled=move || form.with(|f| !f.is_submit_enabled())
        >
          { move || form.with(VoteForm::submit_label) }
        </button>
      </form>
    }
}
