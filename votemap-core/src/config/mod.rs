use std::time::Duration;

use thiserror::Error;

use votemap_entities::geo::{MapPoint, MapPointError};

pub mod raw;

pub const ENV_NAME_API_URL: &str = "VOTEMAP_API_URL";
pub const ENV_NAME_GEOCODER_URL: &str = "VOTEMAP_GEOCODER_URL";
pub const ENV_NAME_DEFAULT_CENTER: &str = "VOTEMAP_DEFAULT_CENTER";
pub const ENV_NAME_VOTE_RADIUS_KM: &str = "VOTEMAP_VOTE_RADIUS_KM";
pub const ENV_NAME_VOTE_FETCH_DEBOUNCE: &str = "VOTEMAP_VOTE_FETCH_DEBOUNCE";

const DEFAULT_API_URL: &str = "/api";
const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";
// New Delhi
const DEFAULT_CENTER: (f64, f64) = (28.6139, 77.209);
const DEFAULT_VOTE_RADIUS_KM: f64 = 5.0;
const DEFAULT_VOTE_FETCH_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Invalid map center '{0}': expected '<lat>,<lng>'")]
    CenterFormat(String),
    #[error("Invalid map center: {0}")]
    Center(#[from] MapPointError),
    #[error("Invalid vote radius '{0}'")]
    Radius(String),
    #[error("Invalid debounce delay: {0}")]
    Debounce(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the votemap backend.
    pub api_url: String,
    /// Base URL of a Nominatim instance.
    pub geocoder_url: String,
    pub default_center: MapPoint,
    pub vote_radius_km: f64,
    pub vote_fetch_debounce: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            geocoder_url: DEFAULT_GEOCODER_URL.to_string(),
            default_center: MapPoint::from_lat_lng_deg(DEFAULT_CENTER.0, DEFAULT_CENTER.1),
            vote_radius_km: DEFAULT_VOTE_RADIUS_KM,
            vote_fetch_debounce: DEFAULT_VOTE_FETCH_DEBOUNCE,
        }
    }
}

impl Config {
    /// Validates `raw` and falls back to the defaults if it is invalid.
    pub fn from_raw_or_default(raw: raw::Config) -> Self {
        Self::try_from(raw).unwrap_or_else(|err| {
            log::warn!("Invalid configuration ({err}): use defaults");
            Self::default()
        })
    }
}

fn parse_center(s: &str) -> Result<MapPoint, Error> {
    let (lat, lng) = s
        .split_once(',')
        .ok_or_else(|| Error::CenterFormat(s.to_string()))?;
    let lat = lat
        .trim()
        .parse::<f64>()
        .map_err(|_| Error::CenterFormat(s.to_string()))?;
    let lng = lng
        .trim()
        .parse::<f64>()
        .map_err(|_| Error::CenterFormat(s.to_string()))?;
    Ok(MapPoint::try_from_lat_lng_deg(lat, lng)?)
}

impl TryFrom<raw::Config> for Config {
    type Error = Error;
    fn try_from(from: raw::Config) -> Result<Self, Self::Error> {
        let raw::Config {
            api_url,
            geocoder_url,
            default_center,
            vote_radius_km,
            vote_fetch_debounce,
        } = from;
        let defaults = Self::default();

        let default_center = default_center
            .as_deref()
            .map(parse_center)
            .transpose()?
            .unwrap_or(defaults.default_center);

        let vote_radius_km = match vote_radius_km {
            Some(radius) => radius
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|r| r.is_finite() && *r > 0.0)
                .ok_or(Error::Radius(radius))?,
            None => defaults.vote_radius_km,
        };

        let vote_fetch_debounce = match vote_fetch_debounce {
            Some(delay) => duration_str::parse(delay.trim()).map_err(|err| Error::Debounce(err.to_string()))?,
            None => defaults.vote_fetch_debounce,
        };

        Ok(Self {
            api_url: api_url
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_url),
            geocoder_url: geocoder_url
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.geocoder_url),
            default_center,
            vote_radius_km,
            vote_fetch_debounce,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn use_defaults_for_missing_values() {
        let cfg = Config::try_from(raw::Config::default()).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.api_url, "/api");
        assert_eq!(cfg.vote_fetch_debounce, Duration::from_millis(500));
    }

    #[test]
    fn parse_values() {
        let raw = raw::Config::from_lookup(|name| {
            match name {
                ENV_NAME_API_URL => Some("https://votemap.example.org/api/"),
                ENV_NAME_DEFAULT_CENTER => Some("52.52, 13.405"),
                ENV_NAME_VOTE_RADIUS_KM => Some("2.5"),
                ENV_NAME_VOTE_FETCH_DEBOUNCE => Some("1s"),
                _ => None,
            }
            .map(ToString::to_string)
        });
        let cfg = Config::try_from(raw).unwrap();
        assert_eq!(cfg.api_url, "https://votemap.example.org/api");
        assert_eq!(cfg.geocoder_url, DEFAULT_GEOCODER_URL);
        assert_eq!(cfg.default_center.to_lat_lng_deg(), (52.52, 13.405));
        assert_eq!(cfg.vote_radius_km, 2.5);
        assert_eq!(cfg.vote_fetch_debounce, Duration::from_secs(1));
    }

    #[test]
    fn reject_invalid_values() {
        let raw = raw::Config {
            default_center: Some("north".into()),
            ..Default::default()
        };
        assert_eq!(
            Config::try_from(raw),
            Err(Error::CenterFormat("north".into()))
        );
        let raw = raw::Config {
            default_center: Some("91,0".into()),
            ..Default::default()
        };
        assert!(matches!(Config::try_from(raw), Err(Error::Center(_))));
        let raw = raw::Config {
            vote_radius_km: Some("-1".into()),
            ..Default::default()
        };
        assert_eq!(Config::try_from(raw), Err(Error::Radius("-1".into())));
        let raw = raw::Config {
            vote_fetch_debounce: Some("soon".into()),
            ..Default::default()
        };
        assert!(matches!(Config::try_from(raw), Err(Error::Debounce(_))));
    }

    #[test]
    fn fall_back_to_defaults() {
        let raw = raw::Config {
            vote_radius_km: Some("far".into()),
            ..Default::default()
        };
        assert_eq!(Config::from_raw_or_default(raw), Config::default());
    }
}
