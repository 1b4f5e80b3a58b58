use gloo_net::http::Response;
use serde::de::DeserializeOwned;
use thiserror::Error;

mod geocoding;
mod public;

pub use self::{geocoding::*, public::*};

type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
    #[error("{0}")]
    Fetch(String),

    #[error("{0}")]
    Api(#[from] votemap_boundary::Error),
}

impl From<gloo_net::Error> for Error {
    fn from(err: gloo_net::Error) -> Self {
        Self::Fetch(format!("{err}"))
    }
}

pub async fn into_json<T>(response: Response) -> Result<T>
where
    T: DeserializeOwned,
{
    // ensure we've got 2xx status
    if response.ok() {
        Ok(response.json().await?)
    } else {
        Err(into_api_error(response).await)
    }
}

/// Like [`into_json`] for endpoints whose response body is not needed.
pub async fn into_unit(response: Response) -> Result<()> {
    if response.ok() {
        Ok(())
    } else {
        Err(into_api_error(response).await)
    }
}

async fn into_api_error(response: Response) -> Error {
    let http_status = response.status();
    let status_text = response.status_text();
    match response.json::<votemap_boundary::Error>().await {
        Ok(err) => err.into(),
        // The body is not an API error (e.g. a proxy error page).
        Err(_) => votemap_boundary::Error {
            http_status,
            message: status_text,
        }
        .into(),
    }
}
