use gloo_net::http::Request;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use votemap_boundary::{
    Category, ClaimVotee, Invitation, InviteVotee, InviteVoters, NewVote, NewVoteSupport, NewVotee,
    Vote, Votee,
};

use crate::{into_json, into_unit, Result};

/// Public votemap API
#[derive(Clone)]
pub struct VotemapApi {
    url: String,
}

impl VotemapApi {
    #[must_use]
    pub const fn new(url: String) -> Self {
        Self { url }
    }

    pub async fn votees(&self) -> Result<Vec<Votee>> {
        let url = format!("{}/votees", self.url);
        let response = Request::get(&url).send().await?;
        into_json(response).await
    }

    pub async fn votee(&self, id: &str) -> Result<Votee> {
        let encoded_id = utf8_percent_encode(id, NON_ALPHANUMERIC);
        let url = format!("{}/votees/{encoded_id}", self.url);
        let response = Request::get(&url).send().await?;
        into_json(response).await
    }

    pub async fn create_votee(&self, votee: &NewVotee) -> Result<Votee> {
        let url = format!("{}/votees", self.url);
        let response = Request::post(&url).json(votee)?.send().await?;
        into_json(response).await
    }

    pub async fn claim_votee(&self, claim: &ClaimVotee) -> Result<()> {
        let url = format!("{}/votees/claim", self.url);
        let response = Request::post(&url).json(claim)?.send().await?;
        into_unit(response).await
    }

    /// Votes within `radius` kilometers around the given position.
    pub async fn votes(&self, lat: f64, lng: f64, radius: f64) -> Result<Vec<Vote>> {
        let url = format!("{}/votes?lat={lat}&lng={lng}&radius={radius}", self.url);
        let response = Request::get(&url).send().await?;
        into_json(response).await
    }

    pub async fn create_vote(&self, vote: &NewVote) -> Result<()> {
        let url = format!("{}/votes", self.url);
        let response = Request::post(&url).json(vote)?.send().await?;
        into_unit(response).await
    }

    pub async fn support_vote(&self, support: &NewVoteSupport) -> Result<()> {
        let url = format!("{}/vote-support", self.url);
        let response = Request::post(&url).json(support)?.send().await?;
        into_unit(response).await
    }

    pub async fn invitations(&self, votee_id: &str) -> Result<Vec<Invitation>> {
        let encoded_id = utf8_percent_encode(votee_id, NON_ALPHANUMERIC);
        let url = format!("{}/invitations?voteeId={encoded_id}", self.url);
        let response = Request::get(&url).send().await?;
        into_json(response).await
    }

    pub async fn invite_votee(&self, invitation: &InviteVotee) -> Result<()> {
        let url = format!("{}/invite-votee", self.url);
        let response = Request::post(&url).json(invitation)?.send().await?;
        into_unit(response).await
    }

    pub async fn invite_voters(&self, invitation: &InviteVoters) -> Result<()> {
        let url = format!("{}/invite-voters", self.url);
        let response = Request::post(&url).json(invitation)?.send().await?;
        into_unit(response).await
    }

    pub async fn categories(&self) -> Result<Vec<Category>> {
        let url = format!("{}/categories", self.url);
        let response = Request::get(&url).send().await?;
        into_json(response).await
    }
}
