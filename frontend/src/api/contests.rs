use crate::api::api_url;
use gloo_net::http::Request;
use log::{debug, warn};
use serde_json::Value;
use shared::{ContestRecord, ErrorResponse};
use thiserror::Error;
use web_sys::AbortSignal;

pub const CONTESTS_PATH: &str = "/api/contests";

#[derive(Debug, Error, PartialEq)]
pub enum FetchError {
    #[error("request was aborted")]
    Aborted,

    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("could not decode contests: {0}")]
    Decode(String),
}

impl FetchError {
    /// Maps a rejected `fetch` by the JS error name; an aborted signal
    /// rejects with `AbortError`.
    pub fn from_js_error(name: &str, message: &str) -> Self {
        match name {
            "AbortError" => FetchError::Aborted,
            _ => FetchError::Network(format!("{}: {}", name, message)),
        }
    }
}

impl From<gloo_net::Error> for FetchError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::JsError(js) => FetchError::from_js_error(&js.name, &js.message),
            gloo_net::Error::SerdeError(e) => FetchError::Decode(e.to_string()),
            other => FetchError::Network(other.to_string()),
        }
    }
}

/// Reads the whole contest collection once.
///
/// The read is all-or-nothing; individual documents that cannot be coerced
/// into a [`ContestRecord`] are skipped. Passing a signal lets the caller
/// abort the request.
pub async fn fetch_contest_records(
    signal: Option<&AbortSignal>,
) -> Result<Vec<ContestRecord>, FetchError> {
    let url = api_url(CONTESTS_PATH);
    debug!("Fetching contests from {}", url);

    let response = Request::get(&url).abort_signal(signal).send().await?;

    if !response.ok() {
        let status = response.status();
        let message = match response.json::<ErrorResponse>().await {
            Ok(err) => err.error,
            Err(_) => response.status_text(),
        };
        return Err(FetchError::Http { status, message });
    }

    let documents = response.json::<Vec<Value>>().await?;
    Ok(records_from_documents(&documents))
}

/// Reads the service's records, coercing any document that is not already in
/// the record shape and dropping the ones without a usable shape.
pub fn records_from_documents(documents: &[Value]) -> Vec<ContestRecord> {
    documents
        .iter()
        .filter_map(|document| {
            if let Ok(record) = serde_json::from_value::<ContestRecord>(document.clone()) {
                if !record.id.is_empty() {
                    return Some(record);
                }
            }
            match ContestRecord::from_document(document) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!("Ignoring malformed contest document: {}", e);
                    None
                }
            }
        })
        .collect()
}
