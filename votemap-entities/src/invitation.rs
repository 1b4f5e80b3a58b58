use std::{fmt, str::FromStr};

use time::OffsetDateTime;

use crate::{email::EmailAddress, id::Id};

/// Lifecycle state of an invitation.
///
/// The state is owned by the backend, unknown values are preserved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InvitationStatus {
    Pending,
    Sent,
    Accepted,
    Declined,
    Expired,
    Other(String),
}

impl InvitationStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Sent => "sent",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
            Self::Expired => "expired",
            Self::Other(s) => s.as_str(),
        }
    }

    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Pending | Self::Sent)
    }
}

impl FromStr for InvitationStatus {
    type Err = std::convert::Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let status = match s.to_lowercase().as_str() {
            "pending" => Self::Pending,
            "sent" => Self::Sent,
            "accepted" => Self::Accepted,
            "declined" => Self::Declined,
            "expired" => Self::Expired,
            _ => Self::Other(s.to_owned()),
        };
        Ok(status)
    }
}

impl fmt::Display for InvitationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An outbound request inviting a party to claim a votee or to vote.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invitation {
    pub id              : Id,
    pub sender_id       : Option<Id>,
    pub recipient_email : EmailAddress,
    pub votee_id        : Id,
    pub status          : InvitationStatus,
    pub sent_at         : OffsetDateTime,
}

/// Invite the nominated person to claim the votee profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteVotee {
    pub votee_id: Id,
    pub recipient_email: EmailAddress,
    pub sender_id: Option<Id>,
}

/// Invite several people to vote for a votee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteVoters {
    pub votee_id: Id,
    pub recipient_emails: Vec<EmailAddress>,
    pub sender_id: Option<Id>,
}
