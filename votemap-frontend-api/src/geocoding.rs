use gloo_net::http::Request;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Deserialize;

use crate::{into_json, Result};

/// Address details of a Nominatim result.
///
/// Only the fields needed to name a place are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NominatimAddress {
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NominatimPlace {
    pub display_name: String,
    /// Latitude in degrees (serialized as string)
    pub lat: String,
    /// Longitude in degrees (serialized as string)
    pub lon: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<NominatimAddress>,
}

/// Response of a reverse lookup.
///
/// Nominatim answers with `200 OK` and an `error` field
/// if nothing was found at the given position.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ReverseResponse {
    Place(NominatimPlace),
    NotFound { error: String },
}

/// Client of a Nominatim geocoding service.
#[derive(Clone)]
pub struct NominatimApi {
    url: String,
}

impl NominatimApi {
    #[must_use]
    pub const fn new(url: String) -> Self {
        Self { url }
    }

    pub async fn reverse(&self, lat: f64, lng: f64) -> Result<ReverseResponse> {
        let url = format!(
            "{}/reverse?format=jsonv2&lat={lat}&lon={lng}&addressdetails=1",
            self.url
        );
        let response = Request::get(&url).send().await?;
        into_json(response).await
    }

    pub async fn search(&self, text: &str, limit: usize) -> Result<Vec<NominatimPlace>> {
        let encoded_txt = utf8_percent_encode(text, NON_ALPHANUMERIC);
        let url = format!(
            "{}/search?format=jsonv2&q={encoded_txt}&limit={limit}",
            self.url
        );
        let response = Request::get(&url).send().await?;
        into_json(response).await
    }
}
