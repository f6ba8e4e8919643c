//! Wikipedia OpenSearch client.
//!
//! The response is a positional array: `[term, [titles], [descriptions], [urls]]`.
//! Only the first entry of each list is used.

use serde_json::Value;

use super::{ExternalHit, LookupError};
use crate::config::LookupConfig;

pub struct WikipediaClient {
    http: reqwest::Client,
    endpoint: reqwest::Url,
}

impl WikipediaClient {
    pub fn new(config: &LookupConfig) -> Result<Self, LookupError> {
        let endpoint =
            reqwest::Url::parse(&config.endpoint).map_err(|e| LookupError::Endpoint {
                endpoint: config.endpoint.clone(),
                reason: e.to_string(),
            })?;

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { http, endpoint })
    }

    /// Query the endpoint for `term`, asking for at most one result.
    pub async fn lookup(&self, term: &str) -> Result<ExternalHit, LookupError> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("action", "opensearch")
            .append_pair("search", term)
            .append_pair("limit", "1")
            .append_pair("namespace", "0")
            .append_pair("format", "json");

        tracing::debug!(term, url = %url, "opensearch request");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| LookupError::Malformed(e.to_string()))?;

        let hit = parse_opensearch(&body)?;
        tracing::info!(term, title = %hit.title, url = %hit.url, "lookup resolved");
        Ok(hit)
    }
}

/// Normalise an OpenSearch response into its first hit.
pub fn parse_opensearch(body: &Value) -> Result<ExternalHit, LookupError> {
    let parts = body
        .as_array()
        .filter(|a| a.len() >= 4)
        .ok_or_else(|| LookupError::Malformed("expected a four-element array".into()))?;

    let term = parts[0].as_str().unwrap_or_default();
    let list = |idx: usize, what: &str| {
        parts[idx]
            .as_array()
            .ok_or_else(|| LookupError::Malformed(format!("{what} is not a list")))
    };
    let titles = list(1, "titles")?;
    let descriptions = list(2, "descriptions")?;
    let urls = list(3, "urls")?;

    let title = match titles.first() {
        Some(Value::String(title)) => title.clone(),
        Some(_) => return Err(LookupError::Malformed("title is not a string".into())),
        None => return Err(LookupError::NoResults(term.to_string())),
    };
    let url = urls
        .first()
        .and_then(Value::as_str)
        .ok_or_else(|| LookupError::Malformed(format!("no URL for '{title}'")))?
        .to_string();
    // Descriptions are frequently empty strings on current Wikipedia.
    let description = descriptions
        .first()
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Ok(ExternalHit {
        title,
        description,
        url,
    })
}
