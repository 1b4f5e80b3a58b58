//! Implementations of the core gateways on top of the HTTP clients.

use async_trait::async_trait;

use votemap_boundary as json;
use votemap_core::{
    entities::{category::*, geo::MapPoint, id::Id, invitation::*, vote::*, votee::*},
    gateways::{
        backend::*,
        geocode::{
            PlaceCandidate, PlaceKind, PlaceSearchGateway, PlaceSuggestion,
            ReverseGeocodingGateway,
        },
        Error, Result,
    },
};
use votemap_frontend_api::{self as api, NominatimApi, NominatimPlace, ReverseResponse, VotemapApi};

const SEARCH_LIMIT: usize = 5;

fn from_api_error(err: api::Error) -> Error {
    match err {
        api::Error::Fetch(msg) => Error::Fetch(msg),
        api::Error::Api(json::Error {
            http_status,
            message,
        }) => Error::Api {
            status: http_status,
            message,
        },
    }
}

fn from_conversion_error(err: json::ConversionError) -> Error {
    Error::Response(err.to_string())
}

pub struct Backend {
    api: VotemapApi,
}

impl Backend {
    pub const fn new(api: VotemapApi) -> Self {
        Self { api }
    }
}

#[async_trait(?Send)]
impl VoteeGateway for Backend {
    async fn votees(&self) -> Result<Vec<Votee>> {
        let votees = self.api.votees().await.map_err(from_api_error)?;
        Ok(votees.into_iter().map(Votee::from).collect())
    }

    async fn votee(&self, id: &Id) -> Result<Votee> {
        let votee = self.api.votee(id.as_str()).await.map_err(from_api_error)?;
        Ok(votee.into())
    }

    async fn create_votee(&self, votee: &NewVotee) -> Result<Votee> {
        let new_votee = json::NewVotee::from(votee.clone());
        let votee = self
            .api
            .create_votee(&new_votee)
            .await
            .map_err(from_api_error)?;
        Ok(votee.into())
    }

    async fn claim_votee(&self, claim: &ClaimVotee) -> Result<()> {
        let claim = json::ClaimVotee::from(claim.clone());
        self.api.claim_votee(&claim).await.map_err(from_api_error)
    }
}

#[async_trait(?Send)]
impl VoteGateway for Backend {
    async fn votes(&self, query: &RadiusQuery) -> Result<Vec<Vote>> {
        let (lat, lng) = query.center.to_lat_lng_deg();
        let votes = self
            .api
            .votes(lat, lng, query.radius)
            .await
            .map_err(from_api_error)?;
        votes
            .into_iter()
            .map(|v| Vote::try_from(v).map_err(from_conversion_error))
            .collect()
    }

    async fn create_vote(&self, vote: &NewVote) -> Result<()> {
        let vote = json::NewVote::from(vote.clone());
        self.api.create_vote(&vote).await.map_err(from_api_error)
    }

    async fn support_vote(&self, support: &NewVoteSupport) -> Result<()> {
        let support = json::NewVoteSupport::from(support.clone());
        self.api.support_vote(&support).await.map_err(from_api_error)
    }
}

#[async_trait(?Send)]
impl InvitationGateway for Backend {
    async fn invitations(&self, votee_id: &Id) -> Result<Vec<Invitation>> {
        let invitations = self
            .api
            .invitations(votee_id.as_str())
            .await
            .map_err(from_api_error)?;
        invitations
            .into_iter()
            .map(|i| Invitation::try_from(i).map_err(from_conversion_error))
            .collect()
    }

    async fn invite_votee(&self, invitation: &InviteVotee) -> Result<()> {
        let invitation = json::InviteVotee::from(invitation.clone());
        self.api
            .invite_votee(&invitation)
            .await
            .map_err(from_api_error)
    }

    async fn invite_voters(&self, invitation: &InviteVoters) -> Result<()> {
        let invitation = json::InviteVoters::from(invitation.clone());
        self.api
            .invite_voters(&invitation)
            .await
            .map_err(from_api_error)
    }
}

#[async_trait(?Send)]
impl CategoryGateway for Backend {
    async fn categories(&self) -> Result<Vec<Category>> {
        let categories = self.api.categories().await.map_err(from_api_error)?;
        Ok(categories.into_iter().map(Category::from).collect())
    }
}

pub struct Geocoder {
    api: NominatimApi,
}

impl Geocoder {
    pub const fn new(api: NominatimApi) -> Self {
        Self { api }
    }
}

fn parse_pos(place: &NominatimPlace) -> Option<MapPoint> {
    let lat = place.lat.parse().ok()?;
    let lng = place.lon.parse().ok()?;
    MapPoint::try_from_lat_lng_deg(lat, lng).ok()
}

/// Splits a Nominatim result into candidates of decreasing granularity.
fn candidates(place: NominatimPlace) -> Vec<PlaceCandidate> {
    let NominatimPlace {
        display_name,
        address,
        ..
    } = place;
    let Some(address) = address else {
        return vec![PlaceCandidate::new(PlaceKind::Other, display_name)];
    };
    let mut candidates = vec![];
    if let Some(locality) = address
        .city
        .as_ref()
        .or(address.town.as_ref())
        .or(address.village.as_ref())
    {
        let name = [Some(locality), address.state.as_ref(), address.country.as_ref()]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        candidates.push(PlaceCandidate::new(PlaceKind::Locality, name));
    }
    if let Some(state) = &address.state {
        let name = match &address.country {
            Some(country) => format!("{state}, {country}"),
            None => state.clone(),
        };
        candidates.push(PlaceCandidate::new(PlaceKind::AdministrativeArea, name));
    }
    if let Some(country) = address.country {
        candidates.push(PlaceCandidate::new(PlaceKind::Country, country));
    }
    candidates.push(PlaceCandidate::new(PlaceKind::Other, display_name));
    candidates
}

#[async_trait(?Send)]
impl ReverseGeocodingGateway for Geocoder {
    async fn reverse_geocode(&self, pos: MapPoint) -> Result<Vec<PlaceCandidate>> {
        let (lat, lng) = pos.to_lat_lng_deg();
        match self.api.reverse(lat, lng).await.map_err(from_api_error)? {
            ReverseResponse::Place(place) => Ok(candidates(place)),
            ReverseResponse::NotFound { error } => {
                log::debug!("Nothing found at {lat},{lng}: {error}");
                Ok(vec![])
            }
        }
    }
}

#[async_trait(?Send)]
impl PlaceSearchGateway for Geocoder {
    async fn search_places(&self, text: &str) -> Result<Vec<PlaceSuggestion>> {
        let places = self
            .api
            .search(text, SEARCH_LIMIT)
            .await
            .map_err(from_api_error)?;
        Ok(places
            .into_iter()
            .filter_map(|place| {
                let pos = parse_pos(&place)?;
                let name = place.name.filter(|n| !n.is_empty()).unwrap_or(place.display_name);
                Some(PlaceSuggestion { name, pos })
            })
            .collect())
    }
}
