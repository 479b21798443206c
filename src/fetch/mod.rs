//! HTTP access to the data-source collaborator.

mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::Result;
use chrono::Utc;

/// Fetches the body of `url` as raw bytes. Non-2xx responses are errors.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let req = reqwest::Request::new(reqwest::Method::GET, url.parse()?);

    let resp = client.execute(req).await?.error_for_status()?;
    Ok(resp.bytes().await?.to_vec())
}

/// Appends the `_ts` cache-busting query parameter the Apps Script endpoint
/// expects, so intermediaries never serve a stale payload.
pub fn with_cache_buster(url: &str) -> Result<reqwest::Url> {
    let mut url: reqwest::Url = url.parse()?;
    url.query_pairs_mut()
        .append_pair("_ts", &Utc::now().timestamp_millis().to_string());
    Ok(url)
}
