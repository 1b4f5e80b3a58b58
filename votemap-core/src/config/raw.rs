/// Unvalidated configuration values.
///
/// Missing values are replaced by their defaults.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: Option<String>,
    pub geocoder_url: Option<String>,
    /// `<lat>,<lng>` in degrees.
    pub default_center: Option<String>,
    pub vote_radius_km: Option<String>,
    /// e.g. `500ms` or `1s`
    pub vote_fetch_debounce: Option<String>,
}

impl Config {
    /// Reads the values from a variable lookup, e.g. `std::env::var`
    /// or values captured at compile time.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Self {
            api_url: get(super::ENV_NAME_API_URL),
            geocoder_url: get(super::ENV_NAME_GEOCODER_URL),
            default_center: get(super::ENV_NAME_DEFAULT_CENTER),
            vote_radius_km: get(super::ENV_NAME_VOTE_RADIUS_KM),
            vote_fetch_debounce: get(super::ENV_NAME_VOTE_FETCH_DEBOUNCE),
        }
    }
}
