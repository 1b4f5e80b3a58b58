use crate::id::Id;

/// A nominated person or entity located on the map.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Votee {
    pub id         : Id,
    pub name       : String,
    pub region     : String,
    pub categories : Vec<Id>,
    pub message    : Option<String>,
    pub is_claimed : bool,
    pub user_id    : Option<Id>,
}

impl Votee {
    pub fn is_claimed_by(&self, user_id: &Id) -> bool {
        self.is_claimed && self.user_id.as_ref() == Some(user_id)
    }
}

/// Request to nominate a new votee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVotee {
    pub name: String,
    pub message: String,
    pub categories: Vec<Id>,
}

/// Request to claim an existing votee profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimVotee {
    pub votee_id: Id,
    pub user_id: Id,
}
