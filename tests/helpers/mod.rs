// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for balancescan integration tests
//!
//! Provides mock implementations of the upstream traits so resolution,
//! fetching and aggregation can be tested without a block explorer or an
//! RPC endpoint. Every mock counts its calls.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy_primitives::{Address, BlockNumber, U256};
use async_trait::async_trait;
use balancescan::{
    BalanceFetcher, BlockExplorer, BlockResolver, CacheStore, ExplorerReply, ExplorerResponse,
    RpcError, TokenAmount, TokenBalanceSource, TokenDecimals, UnixTimestamp,
};

/// A successful explorer reply carrying `result`
pub fn success_reply(result: &str) -> ExplorerResponse {
    ExplorerResponse::Reply(ExplorerReply {
        status: "1".to_string(),
        message: "OK".to_string(),
        result: Some(result.to_string()),
    })
}

/// An explorer reply with a failure status
pub fn failure_reply(result: &str) -> ExplorerResponse {
    ExplorerResponse::Reply(ExplorerReply {
        status: "0".to_string(),
        message: "NOTOK".to_string(),
        result: Some(result.to_string()),
    })
}

type Responder = Box<dyn Fn(UnixTimestamp) -> ExplorerResponse + Send + Sync>;

/// Mock BlockExplorer with scripted responses
///
/// Scripted responses are served first, in order; once exhausted, every
/// request is answered by the fallback responder.
///
/// # Example
///
/// ```rust,ignore
/// let explorer = MockExplorer::always(success_reply("100"))
///     .with_script(vec![ExplorerResponse::transient("timeout")]);
/// ```
pub struct MockExplorer {
    script: Mutex<VecDeque<ExplorerResponse>>,
    responder: Responder,
    calls: AtomicUsize,
    requested: Mutex<Vec<UnixTimestamp>>,
}

impl MockExplorer {
    /// Answers every request with a block number equal to the timestamp
    pub fn echo_timestamp() -> Self {
        Self::from_fn(|ts| success_reply(&ts.to_string()))
    }

    /// Answers every request with a clone of `response`
    pub fn always(response: ExplorerResponse) -> Self {
        Self::from_fn(move |_| response.clone())
    }

    /// Answers every request with `responder(timestamp)`
    pub fn from_fn<F>(responder: F) -> Self
    where
        F: Fn(UnixTimestamp) -> ExplorerResponse + Send + Sync + 'static,
    {
        Self {
            script: Mutex::new(VecDeque::new()),
            responder: Box::new(responder),
            calls: AtomicUsize::new(0),
            requested: Mutex::new(Vec::new()),
        }
    }

    /// Serves `responses` before falling back to the responder
    pub fn with_script(self, responses: Vec<ExplorerResponse>) -> Self {
        *self.script.lock().unwrap() = responses.into();
        self
    }

    /// Number of requests received
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Timestamps requested, in order
    pub fn requested(&self) -> Vec<UnixTimestamp> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl BlockExplorer for MockExplorer {
    async fn block_number_by_time(&self, timestamp: UnixTimestamp) -> ExplorerResponse {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().push(timestamp);

        let scripted = self.script.lock().unwrap().pop_front();
        scripted.unwrap_or_else(|| (self.responder)(timestamp))
    }

    fn endpoint(&self) -> String {
        "https://explorer.test/api?apikey=***".to_string()
    }
}

type BalanceFn = Box<dyn Fn(BlockNumber) -> U256 + Send + Sync>;

/// Mock TokenBalanceSource with call counters
///
/// Raw balances are computed from the block number, so tests can check which
/// block each lookup was pinned to.
pub struct MockBalanceSource {
    balance_fn: BalanceFn,
    decimals: TokenDecimals,
    endpoint: String,
    fail_balance: bool,
    balance_calls: AtomicUsize,
    decimals_calls: AtomicUsize,
    blocks: Mutex<Vec<BlockNumber>>,
}

impl MockBalanceSource {
    /// Returns `raw` at every block
    pub fn constant(raw: U256, decimals: u8) -> Self {
        Self::from_fn(move |_| raw, decimals)
    }

    /// Returns `balance_fn(block)` at each block
    pub fn from_fn<F>(balance_fn: F, decimals: u8) -> Self
    where
        F: Fn(BlockNumber) -> U256 + Send + Sync + 'static,
    {
        Self {
            balance_fn: Box::new(balance_fn),
            decimals: TokenDecimals::new(decimals),
            endpoint: "https://rpc.test".to_string(),
            fail_balance: false,
            balance_calls: AtomicUsize::new(0),
            decimals_calls: AtomicUsize::new(0),
            blocks: Mutex::new(Vec::new()),
        }
    }

    /// Overrides the endpoint URL reported to the balance cache key
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    /// Makes every `balance_of` call fail
    pub fn failing(mut self) -> Self {
        self.fail_balance = true;
        self
    }

    /// Number of `balance_of` calls received
    pub fn balance_calls(&self) -> usize {
        self.balance_calls.load(Ordering::SeqCst)
    }

    /// Number of `decimals` calls received
    pub fn decimals_calls(&self) -> usize {
        self.decimals_calls.load(Ordering::SeqCst)
    }

    /// Blocks passed to `balance_of`, in order
    pub fn blocks(&self) -> Vec<BlockNumber> {
        self.blocks.lock().unwrap().clone()
    }
}

#[async_trait]
impl TokenBalanceSource for MockBalanceSource {
    async fn balance_of(
        &self,
        _token: Address,
        _holder: Address,
        block: BlockNumber,
    ) -> Result<TokenAmount, RpcError> {
        self.balance_calls.fetch_add(1, Ordering::SeqCst);
        self.blocks.lock().unwrap().push(block);

        if self.fail_balance {
            return Err(RpcError::call_failed(
                format!("balanceOf at block {block}"),
                std::io::Error::other("connection reset"),
            ));
        }
        Ok(TokenAmount::new((self.balance_fn)(block)))
    }

    async fn decimals(&self, _token: Address) -> Result<TokenDecimals, RpcError> {
        self.decimals_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.decimals)
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Resolver over `explorer` with no delay between retries
pub fn resolver(explorer: Arc<MockExplorer>, cache: Arc<dyn CacheStore>) -> BlockResolver {
    BlockResolver::new(explorer, cache).with_retry_delay(Duration::ZERO)
}

/// Fetcher over mocks sharing one cache
pub fn fetcher(
    explorer: Arc<MockExplorer>,
    source: Arc<MockBalanceSource>,
    cache: Arc<dyn CacheStore>,
) -> BalanceFetcher {
    BalanceFetcher::new(resolver(explorer, Arc::clone(&cache)), source, cache)
}
