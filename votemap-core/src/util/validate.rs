use thiserror::Error;

use votemap_entities::{
    email::EmailAddress,
    invitation::{InviteVotee, InviteVoters},
    vote::{NewVote, NewVoteSupport},
    votee::{ClaimVotee, NewVotee},
};

/// Addresses may have been built without parsing,
/// so they are parsed again before being sent.
pub fn is_valid_email(email: &EmailAddress) -> bool {
    email.as_str().parse::<EmailAddress>().is_ok()
}

/// Client-side checks that run before any request is issued.
///
/// The backend is expected to enforce its own rules,
/// these checks only avoid pointless round trips.
pub trait Validate {
    type Error;
    fn validate(&self) -> Result<(), Self::Error>;
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VoteeInvalidation {
    #[error("The name is empty")]
    Name,
    #[error("The message is empty")]
    Message,
    #[error("No category selected")]
    Categories,
}

impl Validate for NewVotee {
    type Error = VoteeInvalidation;
    fn validate(&self) -> Result<(), Self::Error> {
        if is_blank(&self.name) {
            return Err(Self::Error::Name);
        }
        if is_blank(&self.message) {
            return Err(Self::Error::Message);
        }
        if self.categories.is_empty() || self.categories.iter().any(|id| !id.is_valid()) {
            return Err(Self::Error::Categories);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VoteInvalidation {
    #[error("The message is empty")]
    Message,
    #[error("The region is empty")]
    Region,
    #[error("Neither a votee nor the name of a new votee was given")]
    Votee,
    #[error(transparent)]
    NewVotee(#[from] VoteeInvalidation),
    #[error("Invalid vote id")]
    VoteId,
}

impl Validate for NewVote {
    type Error = VoteInvalidation;
    fn validate(&self) -> Result<(), Self::Error> {
        if is_blank(&self.message) {
            return Err(Self::Error::Message);
        }
        if is_blank(&self.region) {
            return Err(Self::Error::Region);
        }
        match (&self.votee_id, &self.name) {
            (Some(id), _) if id.is_valid() => Ok(()),
            (_, Some(name)) => {
                // A new votee will be created by the backend.
                NewVotee {
                    name: name.clone(),
                    message: self.message.clone(),
                    categories: self.categories.clone().unwrap_or_default(),
                }
                .validate()
                .map_err(Into::into)
            }
            _ => Err(Self::Error::Votee),
        }
    }
}

impl Validate for NewVoteSupport {
    type Error = VoteInvalidation;
    fn validate(&self) -> Result<(), Self::Error> {
        if !self.vote_id.is_valid() {
            return Err(Self::Error::VoteId);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClaimInvalidation {
    #[error("Invalid votee id")]
    VoteeId,
    #[error("Invalid user id")]
    UserId,
}

impl Validate for ClaimVotee {
    type Error = ClaimInvalidation;
    fn validate(&self) -> Result<(), Self::Error> {
        if !self.votee_id.is_valid() {
            return Err(Self::Error::VoteeId);
        }
        if !self.user_id.is_valid() {
            return Err(Self::Error::UserId);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvitationInvalidation {
    #[error("Invalid votee id")]
    VoteeId,
    #[error("Invalid email address: {0}")]
    Email(String),
    #[error("No recipients")]
    Recipients,
}

impl Validate for InviteVotee {
    type Error = InvitationInvalidation;
    fn validate(&self) -> Result<(), Self::Error> {
        if !self.votee_id.is_valid() {
            return Err(Self::Error::VoteeId);
        }
        if !is_valid_email(&self.recipient_email) {
            return Err(Self::Error::Email(self.recipient_email.to_string()));
        }
        Ok(())
    }
}

impl Validate for InviteVoters {
    type Error = InvitationInvalidation;
    fn validate(&self) -> Result<(), Self::Error> {
        if !self.votee_id.is_valid() {
            return Err(Self::Error::VoteeId);
        }
        if self.recipient_emails.is_empty() {
            return Err(Self::Error::Recipients);
        }
        if let Some(invalid) = self
            .recipient_emails
            .iter()
            .find(|e| !is_valid_email(e))
        {
            return Err(Self::Error::Email(invalid.to_string()));
        }
        Ok(())
    }
}
