use std::rc::Rc;

use anyhow::anyhow;
use leptos::*;

use votemap_core::{
    cache::QueryClient,
    config::{self, raw, Config},
    entities::vote::{NewVote, Vote},
    flow::{FlowState, VoteeSubmission},
    gateways::{
        geocode::{PlaceSearchGateway, PlaceSuggestion},
        notify::Notify,
    },
    map::MapController,
    store::{CategoryStore, VoteStore},
    ui::ScreenPoint,
    vote_form::VoteeFormData,
};
use votemap_frontend_api::{NominatimApi, VotemapApi};

mod components;
use components::*;

mod gateways;
use gateways::{Backend, Geocoder};

mod timer;
use timer::TimeoutScheduler;

type Controller = MapController<TimeoutScheduler>;

/// Values that were present when the app was built.
fn build_var(name: &str) -> Option<String> {
    let value = match name {
        config::ENV_NAME_API_URL => option_env!("VOTEMAP_API_URL"),
        config::ENV_NAME_GEOCODER_URL => option_env!("VOTEMAP_GEOCODER_URL"),
        config::ENV_NAME_DEFAULT_CENTER => option_env!("VOTEMAP_DEFAULT_CENTER"),
        config::ENV_NAME_VOTE_RADIUS_KM => option_env!("VOTEMAP_VOTE_RADIUS_KM"),
        config::ENV_NAME_VOTE_FETCH_DEBOUNCE => option_env!("VOTEMAP_VOTE_FETCH_DEBOUNCE"),
        _ => None,
    };
    value.map(ToString::to_string)
}

fn new_vote(submission: VoteeSubmission) -> NewVote {
    let VoteeSubmission { form, pos, region } = submission;
    let VoteeFormData {
        name,
        message,
        categories,
    } = form;
    NewVote {
        votee_id: None,
        name: Some(name),
        message,
        region,
        pos,
        is_anonymous: true,
        categories: Some(categories),
        voter_id: None,
    }
}

async fn search_first_place(
    gateway: &dyn PlaceSearchGateway,
    text: &str,
) -> anyhow::Result<PlaceSuggestion> {
    gateway
        .search_places(text)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("No place found for '{text}'"))
}

#[allow(clippy::too_many_lines)]
#[component]
#[must_use]
pub fn App() -> impl IntoView {
    // -- init -- //

    let config = Config::from_raw_or_default(raw::Config::from_lookup(build_var));
    log::debug!("Use configuration {config:?}");

    let toasts = Toasts::new();
    let notify: Rc<dyn Notify> = Rc::new(toasts.clone());

    let backend = Rc::new(Backend::new(VotemapApi::new(config.api_url.clone())));
    let geocoder = Rc::new(Geocoder::new(NominatimApi::new(config.geocoder_url.clone())));

    let client = QueryClient::default();
    let vote_store = Rc::new(VoteStore::new(
        Rc::clone(&backend) as _,
        &client,
        Rc::clone(&notify),
    ));
    let category_store = Rc::new(CategoryStore::new(backend, &client, Rc::clone(&notify)));

    let fetch_votes = {
        let vote_store = Rc::clone(&vote_store);
        move |query| {
            let vote_store = Rc::clone(&vote_store);
            spawn_local(async move {
                if let Err(err) = vote_store.fetch_votes(query).await {
                    log::warn!("Unable to fetch votes: {err}");
                }
            });
        }
    };
    let controller: Rc<Controller> = Rc::new(MapController::new(
        Rc::clone(&geocoder) as _,
        TimeoutScheduler,
        &config,
        fetch_votes,
    ));

    // -- signals -- //

    let flow = RwSignal::new(FlowState::Idle);
    let center = RwSignal::new(controller.center());
    let votes = RwSignal::new(Vec::<Vote>::new());

    vote_store.subscribe(move |v| votes.set(v.to_vec()));
    {
        let weak = Rc::downgrade(&controller);
        controller.subscribe(move |state| {
            flow.set(state.clone());
            if let Some(controller) = weak.upgrade() {
                center.set(controller.center());
            }
        });
    }

    let is_modal_open = Signal::derive(move || flow.with(FlowState::is_modal_open));
    let is_form_open = Signal::derive(move || flow.with(FlowState::is_form_open));
    let is_submitting = Signal::derive(move || flow.with(FlowState::is_submitting));
    let anchor = Signal::derive(move || flow.with(|s| s.selection().and_then(|s| s.anchor)));
    let confirm_title = Signal::derive(move || {
        flow.with(|s| {
            s.selection()
                .map(|s| format!("Would you like to create votee in {}?", s.place_name))
                .unwrap_or_default()
        })
    });

    // -- actions -- //

    let controller = store_value(controller);
    let vote_store = store_value(vote_store);
    let geocoder = store_value(geocoder);

    let submit = Action::new(move |data: &VoteeFormData| {
        let data = data.clone();
        let controller = controller.get_value();
        let vote_store = vote_store.get_value();
        async move {
            let result = controller
                .submit(data, |submission| async move {
                    vote_store.create_vote(&new_vote(submission)).await
                })
                .await;
            if let Err(err) = result {
                log::warn!("Unable to submit votee: {err}");
            }
        }
    });

    let search_place = Action::new(move |text: &String| {
        let text = text.clone();
        let geocoder = geocoder.get_value();
        let controller = controller.get_value();
        async move {
            match search_first_place(geocoder.as_ref(), &text).await {
                Ok(place) => controller.select_place(place.pos, None).await,
                Err(err) => log::warn!("Unable to search place: {err}"),
            }
        }
    });

    // -- callbacks -- //

    let on_map_click = Callback::new(move |(pos, anchor): (_, ScreenPoint)| {
        let controller = controller.get_value();
        spawn_local(async move { controller.click_map(pos, anchor).await });
    });

    let on_marker_click = Callback::new(move |anchor| {
        let controller = controller.get_value();
        spawn_local(async move { controller.click_marker(anchor).await });
    });

    let on_place_selected = Callback::new(move |place: PlaceSuggestion| {
        let controller = controller.get_value();
        spawn_local(async move { controller.select_place(place.pos, None).await });
    });

    let on_search = Callback::new(move |text: String| {
        search_place.dispatch(text);
    });

    let on_dismiss = Callback::new(move |()| controller.with_value(|c| c.dismiss()));
    let on_confirm = move |_| controller.with_value(|c| c.confirm());
    let on_submit = Callback::new(move |data: VoteeFormData| submit.dispatch(data));

    // -- effects -- //

    {
        let query = controller.with_value(|c| c.radius_query());
        let vote_store = vote_store.get_value();
        spawn_local(async move {
            if let Err(err) = vote_store.fetch_votes(query).await {
                log::warn!("Unable to fetch initial votes: {err}");
            }
        });
    }

    let category_store = store_value(category_store);
    let notify = store_value(notify);
    let place_search: Rc<dyn PlaceSearchGateway> = geocoder.get_value();

    view! {
      <main class="relative h-screen w-screen">
        <Map center=center votes=votes on_map_click on_marker_click />
        <PlaceSearch gateway=place_search on_select=on_place_selected />
        <FloatingSearch on_search />
        <ClickModal
          open=is_modal_open
          anchor
          title=confirm_title
          on_dismiss
        >
          <div class="flex justify-end gap-2">
            <button class="px-4 py-2 rounded border" on:click=move |_| on_dismiss.call(())>
              "No"
            </button>
            <button class="px-4 py-2 rounded bg-blue-600 text-white" on:click=on_confirm>
              "Yes"
            </button>
          </div>
        </ClickModal>
        <ClickModal
          open=is_form_open
          anchor=None::<ScreenPoint>
          title="Create votee".to_string()
          on_dismiss
        >
          <VoteeForm
            categories=category_store.get_value()
            notify=notify.get_value()
            pending=is_submitting
            on_submit
          />
        </ClickModal>
        <FullScreenLoader is_loading=is_submitting text="Submitting..." />
        <Toaster toasts />
      </main>
    }
}
