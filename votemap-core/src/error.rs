use thiserror::Error;

use crate::{
    flow::FlowError,
    gateways,
    util::validate::{ClaimInvalidation, InvitationInvalidation, VoteInvalidation, VoteeInvalidation},
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Gateway(#[from] gateways::Error),
    #[error(transparent)]
    Votee(#[from] VoteeInvalidation),
    #[error(transparent)]
    Vote(#[from] VoteInvalidation),
    #[error(transparent)]
    Claim(#[from] ClaimInvalidation),
    #[error(transparent)]
    Invitation(#[from] InvitationInvalidation),
    #[error(transparent)]
    Flow(#[from] FlowError),
}

impl Error {
    pub const fn is_validation(&self) -> bool {
        !matches!(self, Self::Gateway(_) | Self::Flow(_))
    }
}
