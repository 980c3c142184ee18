// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Block explorer transport for timestamp to block lookups
//!
//! The [`BlockExplorer`] trait is the seam between the
//! [`BlockResolver`](crate::BlockResolver) retry loop and the HTTP API. It
//! never returns `Err`: every outcome is classified into an
//! [`ExplorerResponse`] so the resolver can tell retryable failures from
//! permanent ones.
//!
//! ```text
//! request ─┬─ 200 + JSON body ──────────────► Reply(status, message, result)
//!          ├─ network error / 5xx / 429 / bad body ─► Transient
//!          └─ other non-200 status ─────────► Permanent
//! ```

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::constants::explorer::STATUS_OK;
use crate::types::timestamp::UnixTimestamp;

mod etherscan;

pub use etherscan::EtherscanClient;

/// A well-formed explorer response body
///
/// Mirrors the Etherscan envelope `{ "status": "1", "message": "OK", "result": "11565019" }`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExplorerReply {
    /// `"1"` on success, anything else on failure
    pub status: String,
    /// Human-readable status message (`"OK"`, `"NOTOK"`, ...)
    #[serde(default)]
    pub message: String,
    /// The block number on success, an error description otherwise
    #[serde(default)]
    pub result: Option<String>,
}

impl ExplorerReply {
    /// Whether the explorer flagged this reply as successful
    pub fn is_success(&self) -> bool {
        self.status == STATUS_OK
    }

    /// Short description used in logs and errors for failed replies
    pub fn describe_failure(&self) -> String {
        match self.result.as_deref() {
            Some(result) if !result.is_empty() => {
                format!("status {}: {} ({})", self.status, self.message, result)
            }
            _ => format!("status {}: {}", self.status, self.message),
        }
    }
}

/// Classified outcome of a single explorer request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExplorerResponse {
    /// The explorer answered with a well-formed body (success or failure status)
    Reply(ExplorerReply),
    /// The request failed in a way that may succeed on retry
    Transient {
        /// What went wrong
        reason: String,
    },
    /// The request failed in a way that retrying will not fix
    Permanent {
        /// What went wrong
        reason: String,
    },
}

impl ExplorerResponse {
    /// Create a `Transient` response.
    pub fn transient(reason: impl Into<String>) -> Self {
        ExplorerResponse::Transient {
            reason: reason.into(),
        }
    }

    /// Create a `Permanent` response.
    pub fn permanent(reason: impl Into<String>) -> Self {
        ExplorerResponse::Permanent {
            reason: reason.into(),
        }
    }
}

/// Maps a wall-clock timestamp to the block at or before it
///
/// Implementations issue exactly one upstream request per call; retrying and
/// caching belong to the [`BlockResolver`](crate::BlockResolver).
#[async_trait]
pub trait BlockExplorer: Send + Sync {
    /// Looks up the latest block whose timestamp is <= `timestamp` (closest=before)
    async fn block_number_by_time(&self, timestamp: UnixTimestamp) -> ExplorerResponse;

    /// Endpoint description for errors and logs, with credentials redacted
    fn endpoint(&self) -> String;
}
