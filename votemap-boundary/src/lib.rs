use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[cfg(feature = "entity-conversions")]
mod conv;

#[cfg(feature = "entity-conversions")]
pub use conv::ConversionError;

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(rename_all = "camelCase")]
pub struct Votee {
    pub id         : String,
    pub name       : String,
    pub region     : String,
    pub categories : Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message    : Option<String>,
    #[serde(default)]
    pub is_claimed : bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id    : Option<String>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(rename_all = "camelCase")]
pub struct NewVotee {
    pub name: String,
    pub message: String,
    pub categories: Vec<String>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(rename_all = "camelCase")]
pub struct ClaimVotee {
    pub votee_id: String,
    pub user_id: String,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub id           : String,
    #[serde(default)]
    pub voter_id     : Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message      : Option<String>,
    pub region       : String,
    pub lat          : f64,
    pub lng          : f64,
    #[serde(default)]
    pub is_anonymous : bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at   : OffsetDateTime,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(rename_all = "camelCase")]
pub struct NewVote {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub votee_id     : Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name         : Option<String>,
    pub message      : String,
    pub region       : String,
    pub lat          : f64,
    pub lng          : f64,
    pub is_anonymous : bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories   : Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voter_id     : Option<String>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(rename_all = "camelCase")]
pub struct VoteSupport {
    pub id: String,
    #[serde(default)]
    pub voter_id: Option<String>,
    pub vote_id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(rename_all = "camelCase")]
pub struct NewVoteSupport {
    pub vote_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voter_id: Option<String>,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(rename_all = "camelCase")]
pub struct Invitation {
    pub id              : String,
    #[serde(default)]
    pub sender_id       : Option<String>,
    pub recipient_email : String,
    pub votee_id        : String,
    pub status          : String,
    #[serde(with = "time::serde::rfc3339")]
    pub sent_at         : OffsetDateTime,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(rename_all = "camelCase")]
pub struct InviteVotee {
    pub votee_id: String,
    pub recipient_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_id: Option<String>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(rename_all = "camelCase")]
pub struct InviteVoters {
    pub votee_id: String,
    pub recipient_emails: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_id: Option<String>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct Category {
    pub id: String,
    pub name: String,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, Copy, PartialEq))]
pub struct MapPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Error body returned by the API for non-2xx responses.
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq, thiserror::Error))]
#[cfg_attr(feature = "extra-derive", error("{message} ({http_status})"))]
#[serde(rename_all = "camelCase")]
pub struct Error {
    pub http_status: u16,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_camel_case_votee() {
        let json = r#"{
          "id": "v1",
          "name": "Alice",
          "region": "Berlin, Germany",
          "categories": ["c1", "c2"],
          "isClaimed": true,
          "userId": "u1"
        }"#;
        let votee: Votee = serde_json::from_str(json).unwrap();
        assert_eq!(votee.categories, vec!["c1", "c2"]);
        assert!(votee.is_claimed);
        assert_eq!(votee.user_id.as_deref(), Some("u1"));
        assert!(votee.message.is_none());
    }

    #[test]
    fn deserialize_vote_with_rfc3339_timestamp() {
        let json = r#"{
          "id": "x",
          "voterId": null,
          "region": "Delhi",
          "lat": 28.6139,
          "lng": 77.209,
          "isAnonymous": true,
          "createdAt": "2025-03-01T12:00:00Z"
        }"#;
        let vote: Vote = serde_json::from_str(json).unwrap();
        assert!(vote.is_anonymous);
        assert_eq!(vote.created_at.unix_timestamp(), 1_740_830_400);
    }

    #[test]
    fn omit_absent_optional_fields_of_new_vote() {
        let vote = NewVote {
            votee_id: None,
            name: Some("Alice".into()),
            message: "Great neighbor".into(),
            region: "Delhi".into(),
            lat: 1.0,
            lng: 2.0,
            is_anonymous: true,
            categories: Some(vec!["c1".into()]),
            voter_id: None,
        };
        let json = serde_json::to_value(&vote).unwrap();
        assert!(json.get("voteeId").is_none());
        assert!(json.get("voterId").is_none());
        assert_eq!(json["isAnonymous"], serde_json::Value::Bool(true));
        assert_eq!(json["categories"][0], "c1");
    }
}
