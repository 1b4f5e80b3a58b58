pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

pub use self::{vote_builder::*, votee_builder::*};

pub mod votee_builder {

    use super::*;
    use crate::votee::*;

    #[derive(Debug)]
    pub struct VoteeBuild {
        votee: Votee,
    }

    impl VoteeBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.votee.id = id.into();
            self
        }
        pub fn name(mut self, name: &str) -> Self {
            self.votee.name = name.into();
            self
        }
        pub fn region(mut self, region: &str) -> Self {
            self.votee.region = region.into();
            self
        }
        pub fn categories(mut self, ids: Vec<&str>) -> Self {
            self.votee.categories = ids.into_iter().map(Into::into).collect();
            self
        }
        pub fn message(mut self, message: Option<&str>) -> Self {
            self.votee.message = message.map(Into::into);
            self
        }
        pub fn claimed_by(mut self, user_id: &str) -> Self {
            self.votee.is_claimed = true;
            self.votee.user_id = Some(user_id.into());
            self
        }
        pub fn finish(self) -> Votee {
            self.votee
        }
    }

    impl Builder for Votee {
        type Build = VoteeBuild;
        fn build() -> VoteeBuild {
            VoteeBuild {
                votee: Votee {
                    id: "votee".into(),
                    name: "Votee".into(),
                    region: "Unknown Location".into(),
                    categories: vec!["c1".into()],
                    message: None,
                    is_claimed: false,
                    user_id: None,
                },
            }
        }
    }
}

pub mod vote_builder {

    use super::*;
    use crate::{geo::*, id::Id, vote::*};
    use time::OffsetDateTime;

    #[derive(Debug)]
    pub struct VoteBuild {
        id: Id,
        voter_id: Option<Id>,
        message: Option<String>,
        region: String,
        pos: MapPoint,
        is_anonymous: bool,
    }

    impl VoteBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.id = id.into();
            self
        }
        pub fn voter_id(mut self, voter_id: &str) -> Self {
            self.voter_id = Some(voter_id.into());
            self
        }
        pub fn message(mut self, message: &str) -> Self {
            self.message = Some(message.into());
            self
        }
        pub fn region(mut self, region: &str) -> Self {
            self.region = region.into();
            self
        }
        pub fn pos(mut self, pos: MapPoint) -> Self {
            self.pos = pos;
            self
        }
        pub fn anonymous(mut self) -> Self {
            self.is_anonymous = true;
            self
        }
        pub fn finish(self) -> Vote {
            let Self {
                id,
                voter_id,
                message,
                region,
                pos,
                is_anonymous,
            } = self;
            Vote::new(
                id,
                voter_id,
                message,
                region,
                pos,
                is_anonymous,
                OffsetDateTime::UNIX_EPOCH,
            )
        }
    }

    impl Builder for Vote {
        type Build = VoteBuild;
        fn build() -> VoteBuild {
            VoteBuild {
                id: "vote".into(),
                voter_id: None,
                message: None,
                region: "Unknown Location".into(),
                pos: MapPoint::from_lat_lng_deg(0.0, 0.0),
                is_anonymous: false,
            }
        }
    }
}
