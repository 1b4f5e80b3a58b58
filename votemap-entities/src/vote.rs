use time::OffsetDateTime;

use crate::{geo::MapPoint, id::Id};

/// A record expressing support for a votee at a location.
///
/// Position and region are fixed at creation time and can only be read.
#[derive(Debug, Clone, PartialEq)]
pub struct Vote {
    pub id: Id,
    voter_id: Option<Id>,
    pub message: Option<String>,
    region: String,
    pos: MapPoint,
    is_anonymous: bool,
    pub created_at: OffsetDateTime,
}

impl Vote {
    pub const fn new(
        id: Id,
        voter_id: Option<Id>,
        message: Option<String>,
        region: String,
        pos: MapPoint,
        is_anonymous: bool,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            id,
            voter_id,
            message,
            region,
            pos,
            is_anonymous,
            created_at,
        }
    }

    /// The identity of the voter.
    ///
    /// Always `None` for anonymous votes, even if the backend
    /// delivered a voter id.
    pub fn voter_id(&self) -> Option<&Id> {
        if self.is_anonymous {
            return None;
        }
        self.voter_id.as_ref()
    }

    /// The voter id exactly as delivered, regardless of anonymity.
    pub fn raw_voter_id(&self) -> Option<&Id> {
        self.voter_id.as_ref()
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub const fn pos(&self) -> MapPoint {
        self.pos
    }

    pub const fn is_anonymous(&self) -> bool {
        self.is_anonymous
    }
}

/// Request to cast a vote.
///
/// Either `votee_id` refers to an existing votee, or `name` and
/// `categories` describe a votee that the backend creates along with the vote.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct NewVote {
    pub votee_id     : Option<Id>,
    pub name         : Option<String>,
    pub message      : String,
    pub region       : String,
    pub pos          : MapPoint,
    pub is_anonymous : bool,
    pub categories   : Option<Vec<Id>>,
    pub voter_id     : Option<Id>,
}

/// An endorsement of an existing vote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteSupport {
    pub id: Id,
    pub voter_id: Option<Id>,
    pub vote_id: Id,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVoteSupport {
    pub vote_id: Id,
    pub voter_id: Option<Id>,
}

/// Parameters of a radius based vote query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusQuery {
    pub center: MapPoint,
    /// Radius in kilometers.
    pub radius: f64,
}
