use thiserror::Error;

pub const LAT_DEG_MIN: f64 = -90.0;
pub const LAT_DEG_MAX: f64 = 90.0;
pub const LNG_DEG_MIN: f64 = -180.0;
pub const LNG_DEG_MAX: f64 = 180.0;

/// A geographic position in decimal degrees (WGS 84).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapPoint {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MapPointError {
    #[error("Latitude out of range")]
    Latitude,
    #[error("Longitude out of range")]
    Longitude,
}

impl MapPoint {
    pub fn try_from_lat_lng_deg(lat: f64, lng: f64) -> Result<Self, MapPointError> {
        if !(LAT_DEG_MIN..=LAT_DEG_MAX).contains(&lat) {
            return Err(MapPointError::Latitude);
        }
        if !(LNG_DEG_MIN..=LNG_DEG_MAX).contains(&lng) {
            return Err(MapPointError::Longitude);
        }
        Ok(Self { lat, lng })
    }

    /// Accepts longitudes beyond the antimeridian, e.g. from a map
    /// that has been panned around the globe, and wraps them
    /// into `[-180, 180]`.
    pub fn try_from_unwrapped_lat_lng_deg(lat: f64, lng: f64) -> Result<Self, MapPointError> {
        let lng = if (LNG_DEG_MIN..=LNG_DEG_MAX).contains(&lng) {
            lng
        } else {
            (lng - LNG_DEG_MIN).rem_euclid(LNG_DEG_MAX - LNG_DEG_MIN) + LNG_DEG_MIN
        };
        Self::try_from_lat_lng_deg(lat, lng)
    }

    /// Panics on out-of-range coordinates. Only use this with literal values.
    pub fn from_lat_lng_deg(lat: f64, lng: f64) -> Self {
        match Self::try_from_lat_lng_deg(lat, lng) {
            Ok(pos) => pos,
            Err(err) => panic!("invalid position ({lat},{lng}): {err}"),
        }
    }

    pub const fn lat(&self) -> f64 {
        self.lat
    }

    pub const fn lng(&self) -> f64 {
        self.lng
    }

    pub const fn to_lat_lng_deg(self) -> (f64, f64) {
        (self.lat, self.lng)
    }
}
