use crate::gateways::geocode::{PlaceCandidate, PlaceKind};

pub const UNKNOWN_LOCATION: &str = "Unknown Location";

/// Chooses the display name of a location from reverse geocoding results.
///
/// Cities and towns are preferred over states or provinces,
/// which are preferred over countries.
pub fn resolve_place_name(candidates: &[PlaceCandidate]) -> String {
    let find = |kinds: &[PlaceKind]| {
        candidates
            .iter()
            .find(|c| kinds.iter().any(|k| c.is_kind_of(*k)))
    };
    find(&[PlaceKind::Locality, PlaceKind::PostalTown])
        .or_else(|| find(&[PlaceKind::AdministrativeArea]))
        .or_else(|| find(&[PlaceKind::Country]))
        .map(|c| c.formatted_address.clone())
        .unwrap_or_else(|| UNKNOWN_LOCATION.to_string())
}
