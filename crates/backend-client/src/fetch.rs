// Copyright 2025 CI/CD Training Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! HTTP fetch layer.
//!
//! A [`Fetch`] implementation turns a URL into a parsed JSON document or a
//! [`FetchError`]. The production implementation is [`HttpFetcher`], backed by
//! `reqwest`; tests substitute in-memory fetchers to control timing.

use async_trait::async_trait;
use log::debug;
use serde_json::Value;
use thiserror::Error;

/// The single error kind of the loader.
///
/// The `Display` output is the message shown in the dashboard's error banner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request could not be sent or the body could not be read.
    #[error("{0}")]
    Transport(String),

    /// The server answered with a non-success status, e.g. `503 Service Unavailable`.
    #[error("{code} {reason}")]
    Status { code: u16, reason: String },

    /// The body was not valid JSON.
    #[error("invalid JSON body: {0}")]
    Decode(String),
}

impl FetchError {
    /// Build a status error from a `reqwest` status code.
    #[must_use]
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        FetchError::Status {
            code: status.as_u16(),
            reason: status
                .canonical_reason()
                .unwrap_or("Unknown Status")
                .to_string(),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(err.to_string())
    }
}

/// Source of JSON documents addressed by URL.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// GET `url` and parse the body as JSON.
    async fn get_json(&self, url: &str) -> Result<Value, FetchError>;
}

/// `reqwest`-backed fetcher.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured client (proxies, custom TLS roots, ...).
    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::from_status(status));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}
