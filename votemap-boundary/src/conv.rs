use super::*;
use e::{email::EmailAddress, geo::MapPointError, id::Id};
use std::convert::TryFrom;
use thiserror::Error;
use votemap_entities as e;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    #[error(transparent)]
    Position(#[from] MapPointError),
    #[error("Invalid recipient email address: {0}")]
    Email(String),
}

fn ids(from: Vec<String>) -> Vec<Id> {
    from.into_iter().map(Id::from).collect()
}

fn strings(from: Vec<Id>) -> Vec<String> {
    from.into_iter().map(String::from).collect()
}

impl From<Votee> for e::votee::Votee {
    fn from(from: Votee) -> Self {
        let Votee {
            id,
            name,
            region,
            categories,
            message,
            is_claimed,
            user_id,
        } = from;
        Self {
            id: id.into(),
            name,
            region,
            categories: ids(categories),
            message,
            is_claimed,
            user_id: user_id.map(Id::from),
        }
    }
}

impl From<e::votee::Votee> for Votee {
    fn from(from: e::votee::Votee) -> Self {
        let e::votee::Votee {
            id,
            name,
            region,
            categories,
            message,
            is_claimed,
            user_id,
        } = from;
        Self {
            id: id.into(),
            name,
            region,
            categories: strings(categories),
            message,
            is_claimed,
            user_id: user_id.map(String::from),
        }
    }
}

impl From<e::votee::NewVotee> for NewVotee {
    fn from(from: e::votee::NewVotee) -> Self {
        let e::votee::NewVotee {
            name,
            message,
            categories,
        } = from;
        Self {
            name,
            message,
            categories: strings(categories),
        }
    }
}

impl From<e::votee::ClaimVotee> for ClaimVotee {
    fn from(from: e::votee::ClaimVotee) -> Self {
        Self {
            votee_id: from.votee_id.into(),
            user_id: from.user_id.into(),
        }
    }
}

impl TryFrom<Vote> for e::vote::Vote {
    type Error = ConversionError;
    fn try_from(from: Vote) -> Result<Self, Self::Error> {
        let Vote {
            id,
            voter_id,
            message,
            region,
            lat,
            lng,
            is_anonymous,
            created_at,
        } = from;
        let pos = e::geo::MapPoint::try_from_lat_lng_deg(lat, lng)?;
        Ok(Self::new(
            id.into(),
            voter_id.map(Id::from),
            message,
            region,
            pos,
            is_anonymous,
            created_at,
        ))
    }
}

impl From<e::vote::Vote> for Vote {
    fn from(from: e::vote::Vote) -> Self {
        let (lat, lng) = from.pos().to_lat_lng_deg();
        Self {
            voter_id: from.raw_voter_id().map(ToString::to_string),
            region: from.region().to_owned(),
            is_anonymous: from.is_anonymous(),
            lat,
            lng,
            id: from.id.into(),
            message: from.message,
            created_at: from.created_at,
        }
    }
}

impl From<e::vote::NewVote> for NewVote {
    fn from(from: e::vote::NewVote) -> Self {
        let e::vote::NewVote {
            votee_id,
            name,
            message,
            region,
            pos,
            is_anonymous,
            categories,
            voter_id,
        } = from;
        let (lat, lng) = pos.to_lat_lng_deg();
        Self {
            votee_id: votee_id.map(String::from),
            name,
            message,
            region,
            lat,
            lng,
            is_anonymous,
            categories: categories.map(strings),
            voter_id: voter_id.map(String::from),
        }
    }
}

impl From<VoteSupport> for e::vote::VoteSupport {
    fn from(from: VoteSupport) -> Self {
        let VoteSupport {
            id,
            voter_id,
            vote_id,
            created_at,
        } = from;
        Self {
            id: id.into(),
            voter_id: voter_id.map(Id::from),
            vote_id: vote_id.into(),
            created_at,
        }
    }
}

impl From<e::vote::NewVoteSupport> for NewVoteSupport {
    fn from(from: e::vote::NewVoteSupport) -> Self {
        Self {
            vote_id: from.vote_id.into(),
            voter_id: from.voter_id.map(String::from),
        }
    }
}

impl TryFrom<Invitation> for e::invitation::Invitation {
    type Error = ConversionError;
    fn try_from(from: Invitation) -> Result<Self, Self::Error> {
        let Invitation {
            id,
            sender_id,
            recipient_email,
            votee_id,
            status,
            sent_at,
        } = from;
        let recipient_email = recipient_email
            .parse::<EmailAddress>()
            .map_err(|_| ConversionError::Email(recipient_email))?;
        let status = match status.parse() {
            Ok(status) => status,
            Err(infallible) => match infallible {},
        };
        Ok(Self {
            id: id.into(),
            sender_id: sender_id.map(Id::from),
            recipient_email,
            votee_id: votee_id.into(),
            status,
            sent_at,
        })
    }
}

impl From<e::invitation::InviteVotee> for InviteVotee {
    fn from(from: e::invitation::InviteVotee) -> Self {
        Self {
            votee_id: from.votee_id.into(),
            recipient_email: from.recipient_email.into_string(),
            sender_id: from.sender_id.map(String::from),
        }
    }
}

impl From<e::invitation::InviteVoters> for InviteVoters {
    fn from(from: e::invitation::InviteVoters) -> Self {
        Self {
            votee_id: from.votee_id.into(),
            recipient_emails: from
                .recipient_emails
                .into_iter()
                .map(EmailAddress::into_string)
                .collect(),
            sender_id: from.sender_id.map(String::from),
        }
    }
}

impl From<Category> for e::category::Category {
    fn from(from: Category) -> Self {
        Self {
            id: from.id.into(),
            name: from.name,
        }
    }
}

impl From<e::category::Category> for Category {
    fn from(from: e::category::Category) -> Self {
        Self {
            id: from.id.into(),
            name: from.name,
        }
    }
}

impl TryFrom<MapPoint> for e::geo::MapPoint {
    type Error = MapPointError;
    fn try_from(from: MapPoint) -> Result<Self, Self::Error> {
        Self::try_from_lat_lng_deg(from.lat, from.lng)
    }
}

impl From<e::geo::MapPoint> for MapPoint {
    fn from(from: e::geo::MapPoint) -> Self {
        let (lat, lng) = from.to_lat_lng_deg();
        Self { lat, lng }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reject_votes_with_invalid_coordinates() {
        let vote = Vote {
            id: "x".into(),
            voter_id: None,
            message: None,
            region: "Nowhere".into(),
            lat: 123.0,
            lng: 0.0,
            is_anonymous: false,
            created_at: OffsetDateTime::UNIX_EPOCH,
        };
        assert_eq!(
            e::vote::Vote::try_from(vote).unwrap_err(),
            ConversionError::Position(MapPointError::Latitude)
        );
    }

    #[test]
    fn keep_unknown_invitation_status() {
        let invitation = Invitation {
            id: "i1".into(),
            sender_id: None,
            recipient_email: "bob@example.com".into(),
            votee_id: "v1".into(),
            status: "queued".into(),
            sent_at: OffsetDateTime::UNIX_EPOCH,
        };
        let invitation = e::invitation::Invitation::try_from(invitation).unwrap();
        assert_eq!(
            invitation.status,
            e::invitation::InvitationStatus::Other("queued".into())
        );
        assert_eq!(invitation.recipient_email.as_str(), "bob@example.com");
    }

    #[test]
    fn anonymous_vote_keeps_raw_voter_id_on_the_wire() {
        let vote = Vote {
            id: "x".into(),
            voter_id: Some("u1".into()),
            message: Some("hi".into()),
            region: "Delhi".into(),
            lat: 28.6,
            lng: 77.2,
            is_anonymous: true,
            created_at: OffsetDateTime::UNIX_EPOCH,
        };
        let entity = e::vote::Vote::try_from(vote.clone()).unwrap();
        assert!(entity.voter_id().is_none());
        assert_eq!(Vote::from(entity), vote);
    }
}
