use async_trait::async_trait;

use votemap_entities::{category::*, id::Id, invitation::*, vote::*, votee::*};

use super::Result;

#[async_trait(?Send)]
pub trait VoteeGateway {
    async fn votees(&self) -> Result<Vec<Votee>>;
    async fn votee(&self, id: &Id) -> Result<Votee>;
    async fn create_votee(&self, votee: &NewVotee) -> Result<Votee>;
    async fn claim_votee(&self, claim: &ClaimVotee) -> Result<()>;
}

#[async_trait(?Send)]
pub trait VoteGateway {
    async fn votes(&self, query: &RadiusQuery) -> Result<Vec<Vote>>;
    async fn create_vote(&self, vote: &NewVote) -> Result<()>;
    async fn support_vote(&self, support: &NewVoteSupport) -> Result<()>;
}

#[async_trait(?Send)]
pub trait InvitationGateway {
    async fn invitations(&self, votee_id: &Id) -> Result<Vec<Invitation>>;
    async fn invite_votee(&self, invitation: &InviteVotee) -> Result<()>;
    async fn invite_voters(&self, invitation: &InviteVoters) -> Result<()>;
}

#[async_trait(?Send)]
pub trait CategoryGateway {
    async fn categories(&self) -> Result<Vec<Category>>;
}
