// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Etherscan-compatible `getblocknobytime` client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;
use url::Url;

use super::{BlockExplorer, ExplorerReply, ExplorerResponse};
use crate::types::timestamp::UnixTimestamp;

/// Block explorer client for Etherscan-compatible APIs
///
/// Issues `GET <base>?module=block&action=getblocknobytime&timestamp=<ts>&closest=before&apikey=<key>`.
///
/// # Examples
///
/// ```rust,ignore
/// use balancescan::EtherscanClient;
///
/// let client = EtherscanClient::new(
///     reqwest::Client::new(),
///     "https://api.etherscan.io/api".parse()?,
///     api_key,
/// );
/// ```
#[derive(Debug, Clone)]
pub struct EtherscanClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
    timeout: Option<Duration>,
}

impl EtherscanClient {
    /// Creates a client for the given API base URL and key
    pub fn new(http: reqwest::Client, base_url: Url, api_key: impl Into<String>) -> Self {
        Self {
            http,
            base_url,
            api_key: api_key.into(),
            timeout: None,
        }
    }

    /// Sets a per-request timeout; a timed out request counts as transient
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Full request URL for a timestamp, including the API key
    fn request_url(&self, timestamp: UnixTimestamp) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("module", "block")
            .append_pair("action", "getblocknobytime")
            .append_pair("timestamp", &timestamp.to_string())
            .append_pair("closest", "before")
            .append_pair("apikey", &self.api_key);
        url
    }
}

/// Classifies a non-200 HTTP status
///
/// Server errors and rate limiting are worth retrying; any other status
/// (bad request, forbidden, not found) will fail the same way again.
fn classify_status(status: StatusCode) -> ExplorerResponse {
    if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
        ExplorerResponse::transient(format!("HTTP {status}"))
    } else {
        ExplorerResponse::permanent(format!("HTTP {status}"))
    }
}

#[async_trait]
impl BlockExplorer for EtherscanClient {
    async fn block_number_by_time(&self, timestamp: UnixTimestamp) -> ExplorerResponse {
        let mut request = self.http.get(self.request_url(timestamp));
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = match request.send().await {
            Ok(response) => response,
            // `without_url` keeps the API key out of logs and errors
            Err(e) => return ExplorerResponse::transient(e.without_url().to_string()),
        };

        let status = response.status();
        if status != StatusCode::OK {
            debug!(timestamp = %timestamp, status = %status, "Block explorer returned non 200 status code");
            return classify_status(status);
        }

        match response.json::<ExplorerReply>().await {
            Ok(reply) => ExplorerResponse::Reply(reply),
            Err(e) => ExplorerResponse::transient(format!(
                "undecodable response body: {}",
                e.without_url()
            )),
        }
    }

    fn endpoint(&self) -> String {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("module", "block")
            .append_pair("action", "getblocknobytime")
            .append_pair("closest", "before")
            .append_pair("apikey", "***");
        url.to_string()
    }
}
