use std::{
    cell::{Cell, RefCell},
    future::Future,
    rc::Rc,
};

use votemap_entities::{geo::MapPoint, vote::RadiusQuery};

use crate::{
    config::Config,
    debounce::{Debouncer, Scheduler},
    flow::{FlowState, LocationSelection, Resolution, VoteeSubmission},
    gateways::{self, geocode::ReverseGeocodingGateway},
    geocode::resolve_place_name,
    observe::{ObserverId, Observers},
    ui::ScreenPoint,
    vote_form::VoteeFormData,
    Result,
};

/// Connects the map widget with the location selection flow.
pub struct MapController<S: Scheduler> {
    selection: RefCell<LocationSelection>,
    geocoder: Rc<dyn ReverseGeocodingGateway>,
    center: Cell<MapPoint>,
    radius_km: f64,
    vote_fetch: Debouncer<S, RadiusQuery>,
    observers: Observers<FlowState>,
}

impl<S> MapController<S>
where
    S: Scheduler,
    S::Handle: 'static,
{
    /// `fetch_votes` is called with the debounced radius queries
    /// of place selections.
    pub fn new<F>(
        geocoder: Rc<dyn ReverseGeocodingGateway>,
        scheduler: S,
        config: &Config,
        fetch_votes: F,
    ) -> Self
    where
        F: Fn(RadiusQuery) + 'static,
    {
        Self {
            selection: RefCell::new(LocationSelection::default()),
            geocoder,
            center: Cell::new(config.default_center),
            radius_km: config.vote_radius_km,
            vote_fetch: Debouncer::new(scheduler, config.vote_fetch_debounce, fetch_votes),
            observers: Observers::default(),
        }
    }

    pub fn state(&self) -> FlowState {
        self.selection.borrow().state().clone()
    }

    pub fn center(&self) -> MapPoint {
        self.center.get()
    }

    pub fn radius_query(&self) -> RadiusQuery {
        RadiusQuery {
            center: self.center(),
            radius: self.radius_km,
        }
    }

    pub fn subscribe<F>(&self, observer: F) -> ObserverId
    where
        F: Fn(&FlowState) + 'static,
    {
        self.observers.subscribe(observer)
    }

    pub fn unsubscribe(&self, id: ObserverId) {
        self.observers.unsubscribe(id);
    }

    fn state_changed(&self) {
        let state = self.state();
        self.observers.notify(&state);
    }

    /// A click on the map itself.
    pub async fn click_map(&self, pos: MapPoint, anchor: ScreenPoint) {
        log::debug!("Map clicked at {:?}", pos.to_lat_lng_deg());
        self.center.set(pos);
        self.resolve(pos, Some(anchor)).await;
    }

    /// A selected search result or a click on the marker.
    ///
    /// Besides resolving the place, the votes around it are reloaded.
    pub async fn select_place(&self, pos: MapPoint, anchor: Option<ScreenPoint>) {
        self.center.set(pos);
        self.vote_fetch.call(RadiusQuery {
            center: pos,
            radius: self.radius_km,
        });
        self.resolve(pos, anchor).await;
    }

    /// A click on the marker at the current center.
    pub async fn click_marker(&self, anchor: ScreenPoint) {
        self.select_place(self.center(), Some(anchor)).await;
    }

    async fn resolve(&self, pos: MapPoint, anchor: Option<ScreenPoint>) {
        let Some(request) = self.selection.borrow_mut().begin(pos, anchor) else {
            return;
        };
        self.state_changed();
        let result = self
            .geocoder
            .reverse_geocode(pos)
            .await
            .and_then(|candidates| {
                if candidates.is_empty() {
                    return Err(gateways::Error::Response("No results".into()));
                }
                Ok(resolve_place_name(&candidates))
            });
        let resolution = self
            .selection
            .borrow_mut()
            .place_resolved(&request, result);
        if resolution != Resolution::Stale {
            self.state_changed();
        }
    }

    /// "Yes" in the confirmation modal.
    pub fn confirm(&self) {
        if self.selection.borrow_mut().confirm() {
            self.state_changed();
        }
    }

    /// "No", Escape or a click outside of the current dialog.
    pub fn dismiss(&self) {
        let before = self.state();
        self.selection.borrow_mut().dismiss();
        if self.selection.borrow().state() != &before {
            self.state_changed();
        }
    }

    /// Submits the form of the selected place.
    ///
    /// The flow returns to `Idle` if `on_submit` succeeds
    /// and reopens the form otherwise.
    pub async fn submit<F, Fut>(&self, form: VoteeFormData, on_submit: F) -> Result<()>
    where
        F: FnOnce(VoteeSubmission) -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        let submission = self.selection.borrow_mut().submit(form)?;
        self.state_changed();
        let result = on_submit(submission).await;
        {
            let mut selection = self.selection.borrow_mut();
            if result.is_ok() {
                selection.submission_succeeded()?;
            } else {
                selection.submission_failed()?;
            }
        }
        self.state_changed();
        result
    }
}
