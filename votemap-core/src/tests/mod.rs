use std::{
    cell::{Cell, RefCell},
    rc::Rc,
    time::Duration,
};

use async_trait::async_trait;
use futures::{channel::oneshot, executor::LocalPool, task::LocalSpawnExt as _};

use crate::{
    cache::QueryClient,
    config::Config,
    debounce::ManualScheduler,
    flow::FlowState,
    gateways::{
        backend::*,
        geocode::{PlaceCandidate, PlaceKind, ReverseGeocodingGateway},
        notify::{Level, Notification, Notify},
        Error, Result,
    },
    map::MapController,
    store::*,
    ui::ScreenPoint,
    vote_form::{VoteForm, VoteeFormData},
};
use votemap_entities::{
    builders::Builder as _, category::*, email::EmailAddress, geo::MapPoint, id::Id, invitation::*, vote::*, votee::*,
};


#[derive(Default)]
pub struct MockBackend {
    pub votees: RefCell<Vec<Votee>>,
    pub votes: RefCell<Vec<Vote>>,
    pub invitations: RefCell<Vec<Invitation>>,
    pub categories: RefCell<Vec<Category>>,
    /// Every request as `<method> <path>`.
    pub requests: RefCell<Vec<String>>,
    pub created_votes: RefCell<Vec<NewVote>>,
    pub offline: Cell<bool>,
    /// Keep requests pending until `release` is called.
    pub hold: Cell<bool>,
    waiting: RefCell<Vec<oneshot::Sender<()>>>,
}

impl MockBackend {
    pub fn release(&self) {
        self.hold.set(false);
        for tx in self.waiting.borrow_mut().drain(..) {
            let _ = tx.send(());
        }
    }

    pub fn request_count(&self, request: &str) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|r| r.as_str() == request)
            .count()
    }

    async fn request(&self, request: impl Into<String>) -> Result<()> {
        self.requests.borrow_mut().push(request.into());
        if self.hold.get() {
            let (tx, rx) = oneshot::channel();
            self.waiting.borrow_mut().push(tx);
            let _ = rx.await;
        }
        if self.offline.get() {
            return Err(Error::Fetch("offline".into()));
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl VoteeGateway for MockBackend {
    // Lists reflect the state at the time the request was received.
    async fn votees(&self) -> Result<Vec<Votee>> {
        let votees = self.votees.borrow().clone();
        self.request("GET /votees").await?;
        Ok(votees)
    }
    async fn votee(&self, id: &Id) -> Result<Votee> {
        self.request(format!("GET /votees/{id}")).await?;
        self.votees
            .borrow()
            .iter()
            .find(|v| &v.id == id)
            .cloned()
            .ok_or_else(|| Error::Api {
                status: 404,
                message: "Votee not found".into(),
            })
    }
    async fn create_votee(&self, votee: &NewVotee) -> Result<Votee> {
        self.request("POST /votees").await?;
        let created = Votee {
            id: format!("votee-{}", self.votees.borrow().len() + 1).into(),
            name: votee.name.clone(),
            region: "Unknown Location".into(),
            categories: votee.categories.clone(),
            message: Some(votee.message.clone()),
            is_claimed: false,
            user_id: None,
        };
        self.votees.borrow_mut().push(created.clone());
        Ok(created)
    }
    async fn claim_votee(&self, claim: &ClaimVotee) -> Result<()> {
        self.request("POST /votees/claim").await?;
        let mut votees = self.votees.borrow_mut();
        let votee = votees
            .iter_mut()
            .find(|v| v.id == claim.votee_id)
            .ok_or_else(|| Error::Api {
                status: 404,
                message: "Votee not found".into(),
            })?;
        votee.is_claimed = !votee.is_claimed;
        votee.user_id = Some(claim.user_id.clone());
        Ok(())
    }
}

#[async_trait(?Send)]
impl VoteGateway for MockBackend {
    async fn votes(&self, query: &RadiusQuery) -> Result<Vec<Vote>> {
        let (lat, lng) = query.center.to_lat_lng_deg();
        let votes = self.votes.borrow().clone();
        self.request(format!("GET /votes?lat={lat}&lng={lng}&radius={}", query.radius))
            .await?;
        Ok(votes)
    }
    async fn create_vote(&self, vote: &NewVote) -> Result<()> {
        self.request("POST /votes").await?;
        self.created_votes.borrow_mut().push(vote.clone());
        let id = format!("vote-{}", self.created_votes.borrow().len());
        let mut created = Vote::build()
            .id(&id)
            .region(&vote.region)
            .pos(vote.pos)
            .message(&vote.message);
        if vote.is_anonymous {
            created = created.anonymous();
        }
        self.votes.borrow_mut().push(created.finish());
        Ok(())
    }
    async fn support_vote(&self, _: &NewVoteSupport) -> Result<()> {
        self.request("POST /vote-support").await
    }
}

#[async_trait(?Send)]
impl InvitationGateway for MockBackend {
    async fn invitations(&self, votee_id: &Id) -> Result<Vec<Invitation>> {
        self.request(format!("GET /invitations?voteeId={votee_id}"))
            .await?;
        Ok(self
            .invitations
            .borrow()
            .iter()
            .filter(|i| &i.votee_id == votee_id)
            .cloned()
            .collect())
    }
    async fn invite_votee(&self, _: &InviteVotee) -> Result<()> {
        self.request("POST /invite-votee").await
    }
    async fn invite_voters(&self, _: &InviteVoters) -> Result<()> {
        self.request("POST /invite-voters").await
    }
}

#[async_trait(?Send)]
impl CategoryGateway for MockBackend {
    async fn categories(&self) -> Result<Vec<Category>> {
        self.request("GET /categories").await?;
        Ok(self.categories.borrow().clone())
    }
}

type GeocodeReply = Result<Vec<PlaceCandidate>>;

/// Reverse geocoder whose responses are sent by the test.
#[derive(Default)]
pub struct MockGeocoder {
    pub requests: RefCell<Vec<MapPoint>>,
    replies: RefCell<Vec<Option<oneshot::Sender<GeocodeReply>>>>,
}

impl MockGeocoder {
    /// Answers the request with the given index.
    pub fn reply(&self, index: usize, reply: GeocodeReply) {
        let tx = self.replies.borrow_mut()[index]
            .take()
            .expect("pending request");
        tx.send(reply).expect("receiver");
    }

    pub fn reply_with_place(&self, index: usize, name: &str) {
        self.reply(index, Ok(vec![PlaceCandidate::new(PlaceKind::Locality, name)]));
    }
}

#[async_trait(?Send)]
impl ReverseGeocodingGateway for MockGeocoder {
    async fn reverse_geocode(&self, pos: MapPoint) -> Result<Vec<PlaceCandidate>> {
        let (tx, rx) = oneshot::channel();
        self.requests.borrow_mut().push(pos);
        self.replies.borrow_mut().push(Some(tx));
        rx.await
            .map_err(|_| Error::Fetch("geocoder dropped".into()))?
    }
}

#[derive(Default)]
pub struct RecordingNotify {
    pub notifications: RefCell<Vec<Notification>>,
}

impl RecordingNotify {
    pub fn errors(&self) -> Vec<String> {
        self.messages(Level::Error)
    }

    pub fn successes(&self) -> Vec<String> {
        self.messages(Level::Success)
    }

    fn messages(&self, level: Level) -> Vec<String> {
        self.notifications
            .borrow()
            .iter()
            .filter(|n| n.level == level)
            .map(|n| n.message.clone())
            .collect()
    }
}

impl Notify for RecordingNotify {
    fn notify(&self, notification: Notification) {
        self.notifications.borrow_mut().push(notification);
    }
}

pub struct Fixture {
    pub backend: Rc<MockBackend>,
    pub notify: Rc<RecordingNotify>,
    pub client: QueryClient,
    pub votees: Rc<VoteeStore>,
    pub votes: Rc<VoteStore>,
    pub invitations: Rc<InvitationStore>,
    pub categories: Rc<CategoryStore>,
}

impl Fixture {
    pub fn new() -> Self {
        let backend = Rc::new(MockBackend::default());
        let notify = Rc::new(RecordingNotify::default());
        let client = QueryClient::new();
        let votees = VoteeStore::new(backend.clone(), &client, notify.clone());
        let votes = VoteStore::new(backend.clone(), &client, notify.clone());
        let invitations = InvitationStore::new(backend.clone(), &client, notify.clone());
        let categories = CategoryStore::new(backend.clone(), &client, notify.clone());
        Self {
            backend,
            notify,
            client,
            votees: Rc::new(votees),
            votes: Rc::new(votes),
            invitations: Rc::new(invitations),
            categories: Rc::new(categories),
        }
    }
}

pub fn new_delhi() -> MapPoint {
    MapPoint::from_lat_lng_deg(28.6139, 77.209)
}

pub fn mumbai() -> MapPoint {
    MapPoint::from_lat_lng_deg(19.076, 72.8777)
}

pub fn alice() -> VoteeFormData {
    VoteeFormData {
        name: "Alice".into(),
        message: "Great neighbor".into(),
        categories: vec!["c1".into()],
    }
}
