use async_trait::async_trait;

use votemap_entities::geo::MapPoint;

use super::Result;

/// Granularity of a geocoding result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceKind {
    /// City, town or village.
    Locality,
    PostalTown,
    /// State or province.
    AdministrativeArea,
    Country,
    Other,
}

/// One result of a reverse geocoding request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceCandidate {
    pub kinds: Vec<PlaceKind>,
    pub formatted_address: String,
}

impl PlaceCandidate {
    pub fn new(kind: PlaceKind, formatted_address: impl Into<String>) -> Self {
        Self {
            kinds: vec![kind],
            formatted_address: formatted_address.into(),
        }
    }

    pub fn is_kind_of(&self, kind: PlaceKind) -> bool {
        self.kinds.contains(&kind)
    }
}

/// A place proposed by the search box.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceSuggestion {
    pub name: String,
    pub pos: MapPoint,
}

#[async_trait(?Send)]
pub trait ReverseGeocodingGateway {
    /// An empty list means that nothing was found.
    async fn reverse_geocode(&self, pos: MapPoint) -> Result<Vec<PlaceCandidate>>;
}

#[async_trait(?Send)]
pub trait PlaceSearchGateway {
    async fn search_places(&self, text: &str) -> Result<Vec<PlaceSuggestion>>;
}
