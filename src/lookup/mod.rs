//! External lookup: resolve a search term to a single encyclopedia entry.
//!
//! [`WikipediaClient`] issues one OpenSearch request per lookup and
//! normalises the first hit into an [`ExternalHit`]. There is no retry; a
//! failed attempt surfaces as a [`LookupError`].

pub mod wikipedia;

use serde::Serialize;
use thiserror::Error;

pub use wikipedia::{parse_opensearch, WikipediaClient};

/// First search hit: title, short description and page URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternalHit {
    pub title: String,
    pub description: String,
    pub url: String,
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("invalid lookup endpoint {endpoint}: {reason}")]
    Endpoint { endpoint: String, reason: String },

    #[error("lookup request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("lookup service returned HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed lookup response: {0}")]
    Malformed(String),

    #[error("no results for '{0}'")]
    NoResults(String),
}
