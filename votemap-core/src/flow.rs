//! The location selection state machine.
//!
//! ```text
//! Idle -> ResolvingPlace -> ConfirmPending -> FormOpen -> Submitting -> Idle
//! ```
//!
//! Every state can be left towards `Idle` by dismissing it.

use thiserror::Error;

use votemap_entities::geo::MapPoint;

use crate::{ui::ScreenPoint, vote_form::VoteeFormData};

/// A pending reverse geocoding request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeocodeRequest {
    pub generation: u64,
    pub pos: MapPoint,
}

/// A location together with its resolved name.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub pos: MapPoint,
    pub anchor: Option<ScreenPoint>,
    pub place_name: String,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub enum FlowState {
    #[default]
    Idle,
    ResolvingPlace {
        request: GeocodeRequest,
        anchor: Option<ScreenPoint>,
    },
    ConfirmPending(Selection),
    FormOpen(Selection),
    Submitting(Selection),
}

impl FlowState {
    pub const fn selection(&self) -> Option<&Selection> {
        match self {
            Self::ConfirmPending(s) | Self::FormOpen(s) | Self::Submitting(s) => Some(s),
            Self::Idle | Self::ResolvingPlace { .. } => None,
        }
    }

    pub const fn is_modal_open(&self) -> bool {
        matches!(self, Self::ConfirmPending(_))
    }

    pub const fn is_form_open(&self) -> bool {
        matches!(self, Self::FormOpen(_) | Self::Submitting(_))
    }

    pub const fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting(_))
    }
}

/// Outcome of a completed geocoding request.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Confirm,
    Failed,
    /// The response belongs to a request that has been superseded.
    Stale,
}

/// Everything needed to create a votee at the selected location.
#[derive(Debug, Clone, PartialEq)]
pub struct VoteeSubmission {
    pub form: VoteeFormData,
    pub pos: MapPoint,
    pub region: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("The submission form is not open")]
    FormNotOpen,
    #[error("No submission in progress")]
    NotSubmitting,
}

#[derive(Debug, Default)]
pub struct LocationSelection {
    state: FlowState,
    last_generation: u64,
}

impl LocationSelection {
    pub const fn state(&self) -> &FlowState {
        &self.state
    }

    /// Starts the selection of a location.
    ///
    /// Any pending confirmation or geocoding request is replaced.
    /// While the form is open new selections are ignored.
    pub fn begin(&mut self, pos: MapPoint, anchor: Option<ScreenPoint>) -> Option<GeocodeRequest> {
        if self.state.is_form_open() {
            log::debug!("Ignore location selection while the form is open");
            return None;
        }
        self.last_generation += 1;
        let request = GeocodeRequest {
            generation: self.last_generation,
            pos,
        };
        self.state = FlowState::ResolvingPlace { request, anchor };
        Some(request)
    }

    pub fn place_resolved<E>(&mut self, request: &GeocodeRequest, result: Result<String, E>) -> Resolution
    where
        E: std::fmt::Display,
    {
        let anchor = match &self.state {
            FlowState::ResolvingPlace {
                request: pending,
                anchor,
            } if pending.generation == request.generation => *anchor,
            _ => {
                log::debug!("Discard stale geocoding response #{}", request.generation);
                return Resolution::Stale;
            }
        };
        match result {
            Ok(place_name) => {
                log::debug!("Selected place: {place_name}");
                self.state = FlowState::ConfirmPending(Selection {
                    pos: request.pos,
                    anchor,
                    place_name,
                });
                Resolution::Confirm
            }
            Err(err) => {
                log::error!("Geocoding failed: {err}");
                self.state = FlowState::Idle;
                Resolution::Failed
            }
        }
    }

    /// Answers the confirmation with "Yes".
    pub fn confirm(&mut self) -> bool {
        match std::mem::take(&mut self.state) {
            FlowState::ConfirmPending(selection) => {
                self.state = FlowState::FormOpen(selection);
                true
            }
            state => {
                self.state = state;
                false
            }
        }
    }

    /// Returns to `Idle` and discards the pending location.
    pub fn dismiss(&mut self) {
        if self.state.is_submitting() {
            log::debug!("Cannot dismiss a running submission");
            return;
        }
        self.state = FlowState::Idle;
    }

    pub fn submit(&mut self, form: VoteeFormData) -> Result<VoteeSubmission, FlowError> {
        match std::mem::take(&mut self.state) {
            FlowState::FormOpen(selection) => {
                let submission = VoteeSubmission {
                    form,
                    pos: selection.pos,
                    region: selection.place_name.clone(),
                };
                self.state = FlowState::Submitting(selection);
                Ok(submission)
            }
            state => {
                self.state = state;
                Err(FlowError::FormNotOpen)
            }
        }
    }

    pub fn submission_succeeded(&mut self) -> Result<(), FlowError> {
        if !self.state.is_submitting() {
            return Err(FlowError::NotSubmitting);
        }
        self.state = FlowState::Idle;
        Ok(())
    }

    /// Reopens the form so that the user can try again.
    pub fn submission_failed(&mut self) -> Result<(), FlowError> {
        match std::mem::take(&mut self.state) {
            FlowState::Submitting(selection) => {
                self.state = FlowState::FormOpen(selection);
                Ok(())
            }
            state => {
                self.state = state;
                Err(FlowError::NotSubmitting)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos() -> MapPoint {
        MapPoint::from_lat_lng_deg(28.6139, 77.209)
    }

    fn form() -> VoteeFormData {
        VoteeFormData {
            name: "Alice".into(),
            message: "Great neighbor".into(),
            categories: vec!["c1".into()],
        }
    }

    fn confirmed(flow: &mut LocationSelection) {
        let req = flow.begin(pos(), Some(ScreenPoint::new(10.0, 20.0))).unwrap();
        assert_eq!(
            flow.place_resolved::<String>(&req, Ok("New Delhi".into())),
            Resolution::Confirm
        );
        assert!(flow.confirm());
    }

    #[test]
    fn walk_through_the_happy_path() {
        let mut flow = LocationSelection::default();
        let req = flow.begin(pos(), Some(ScreenPoint::new(10.0, 20.0))).unwrap();
        assert!(matches!(flow.state(), FlowState::ResolvingPlace { .. }));
        flow.place_resolved::<String>(&req, Ok("New Delhi".into()));
        assert!(flow.state().is_modal_open());
        assert_eq!(
            flow.state().selection().unwrap().anchor,
            Some(ScreenPoint::new(10.0, 20.0))
        );
        assert!(flow.confirm());
        assert!(flow.state().is_form_open());
        let submission = flow.submit(form()).unwrap();
        assert_eq!(submission.region, "New Delhi");
        assert_eq!(submission.pos, pos());
        assert!(flow.state().is_submitting());
        flow.submission_succeeded().unwrap();
        assert_eq!(*flow.state(), FlowState::Idle);
    }

    #[test]
    fn discard_stale_geocoding_responses() {
        let mut flow = LocationSelection::default();
        let first = flow.begin(pos(), None).unwrap();
        let second = flow
            .begin(MapPoint::from_lat_lng_deg(19.07, 72.87), None)
            .unwrap();
        assert_eq!(
            flow.place_resolved::<String>(&first, Ok("New Delhi".into())),
            Resolution::Stale
        );
        assert!(matches!(flow.state(), FlowState::ResolvingPlace { .. }));
        flow.place_resolved::<String>(&second, Ok("Mumbai".into()));
        assert_eq!(flow.state().selection().unwrap().place_name, "Mumbai");
    }

    #[test]
    fn return_to_idle_on_geocoding_failure() {
        let mut flow = LocationSelection::default();
        let req = flow.begin(pos(), None).unwrap();
        assert_eq!(
            flow.place_resolved(&req, Err("ZERO_RESULTS")),
            Resolution::Failed
        );
        assert_eq!(*flow.state(), FlowState::Idle);
    }

    #[test]
    fn dismiss_without_opening_the_form() {
        let mut flow = LocationSelection::default();
        let req = flow.begin(pos(), None).unwrap();
        flow.place_resolved::<String>(&req, Ok("New Delhi".into()));
        flow.dismiss();
        assert_eq!(*flow.state(), FlowState::Idle);
        assert!(!flow.confirm());
        assert_eq!(flow.submit(form()), Err(FlowError::FormNotOpen));
    }

    #[test]
    fn dismiss_while_resolving_drops_the_response() {
        let mut flow = LocationSelection::default();
        let req = flow.begin(pos(), None).unwrap();
        flow.dismiss();
        assert_eq!(
            flow.place_resolved::<String>(&req, Ok("New Delhi".into())),
            Resolution::Stale
        );
        assert_eq!(*flow.state(), FlowState::Idle);
    }

    #[test]
    fn ignore_selections_while_the_form_is_open() {
        let mut flow = LocationSelection::default();
        confirmed(&mut flow);
        assert!(flow.begin(pos(), None).is_none());
        assert!(flow.state().is_form_open());
    }

    #[test]
    fn reopen_the_form_after_a_failed_submission() {
        let mut flow = LocationSelection::default();
        confirmed(&mut flow);
        flow.submit(form()).unwrap();
        flow.dismiss();
        assert!(flow.state().is_submitting());
        flow.submission_failed().unwrap();
        assert!(matches!(flow.state(), FlowState::FormOpen(_)));
        assert_eq!(flow.submission_succeeded(), Err(FlowError::NotSubmitting));
    }
}
