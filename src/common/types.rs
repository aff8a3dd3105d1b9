use crate::common::SwapError;
use crate::constants::{
    DEFAULT_CONFIRM_POLL_INTERVAL, DEFAULT_CONFIRM_TIMEOUT, DEFAULT_DEADLINE_SECS,
    DEFAULT_QUOTE_REVIEW_DELAY, DEFAULT_STATUS_CLEAR_DELAY, SEPOLIA_V2_ROUTER,
};
use alloy::primitives::Address;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Client configuration (RPC endpoint, signer, router and timings)
#[derive(Clone)]
pub struct SwapConfig {
    /// JSON-RPC endpoint; `None` means no wallet provider is available
    pub rpc_url: Option<String>,
    /// Hex private key of a local signer. Without one the node-managed accounts are used.
    pub private_key: Option<String>,
    /// Router contract the quotes and swaps go through
    pub router: Address,
    /// Seconds added to "now" for the swap deadline
    pub deadline_secs: u64,
    /// Lifetime of timed status messages
    pub status_clear_delay: Duration,
    /// Pause after the quote is displayed, before anything is signed
    pub quote_review_delay: Duration,
    pub confirm_poll_interval: Duration,
    pub confirm_timeout: Duration,
}

impl Default for SwapConfig {
    fn default() -> Self {
        Self {
            rpc_url: None,
            private_key: None,
            router: SEPOLIA_V2_ROUTER,
            deadline_secs: DEFAULT_DEADLINE_SECS,
            status_clear_delay: DEFAULT_STATUS_CLEAR_DELAY,
            quote_review_delay: DEFAULT_QUOTE_REVIEW_DELAY,
            confirm_poll_interval: DEFAULT_CONFIRM_POLL_INTERVAL,
            confirm_timeout: DEFAULT_CONFIRM_TIMEOUT,
        }
    }
}

// 私钥不能出现在日志里
impl fmt::Debug for SwapConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwapConfig")
            .field("rpc_url", &self.rpc_url)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("router", &self.router)
            .field("deadline_secs", &self.deadline_secs)
            .field("status_clear_delay", &self.status_clear_delay)
            .field("quote_review_delay", &self.quote_review_delay)
            .field("confirm_poll_interval", &self.confirm_poll_interval)
            .field("confirm_timeout", &self.confirm_timeout)
            .finish()
    }
}

impl SwapConfig {
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self { rpc_url: Some(rpc_url.into()), ..Self::default() }
    }

    /// Build the configuration from environment variables
    ///
    /// | variable | default |
    /// | --- | --- |
    /// | `RPC_URL` | unset (no wallet provider) |
    /// | `PRIVATE_KEY` | unset (node-managed accounts) |
    /// | `ROUTER_ADDRESS` | Sepolia Uniswap V2 router |
    /// | `SWAP_DEADLINE_SECS` | 1200 |
    /// | `STATUS_CLEAR_MS` | 5000 |
    /// | `QUOTE_REVIEW_MS` | 4000 |
    /// | `CONFIRM_POLL_MS` | 2000 |
    /// | `CONFIRM_TIMEOUT_SECS` | 180 |
    pub fn from_env() -> Result<Self, SwapError> {
        let mut config = Self::default();
        config.rpc_url = env_string("RPC_URL");
        config.private_key = env_string("PRIVATE_KEY");
        if let Some(router) = env_string("ROUTER_ADDRESS") {
            config.router = Address::from_str(&router)
                .map_err(|e| SwapError::Config(format!("ROUTER_ADDRESS {router}: {e}")))?;
        }
        if let Some(secs) = env_number("SWAP_DEADLINE_SECS")? {
            config.deadline_secs = secs;
        }
        if let Some(ms) = env_number("STATUS_CLEAR_MS")? {
            config.status_clear_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = env_number("QUOTE_REVIEW_MS")? {
            config.quote_review_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = env_number("CONFIRM_POLL_MS")? {
            config.confirm_poll_interval = Duration::from_millis(ms);
        }
        if let Some(secs) = env_number("CONFIRM_TIMEOUT_SECS")? {
            config.confirm_timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }

    pub fn with_private_key(mut self, private_key: impl Into<String>) -> Self {
        self.private_key = Some(private_key.into());
        self
    }

    pub fn with_router(mut self, router: Address) -> Self {
        self.router = router;
        self
    }

    pub fn with_deadline_secs(mut self, deadline_secs: u64) -> Self {
        self.deadline_secs = deadline_secs;
        self
    }

    pub fn with_status_clear_delay(mut self, delay: Duration) -> Self {
        self.status_clear_delay = delay;
        self
    }

    pub fn with_quote_review_delay(mut self, delay: Duration) -> Self {
        self.quote_review_delay = delay;
        self
    }

    /// 设置回执轮询间隔与超时
    pub fn with_confirmation(mut self, poll_interval: Duration, timeout: Duration) -> Self {
        self.confirm_poll_interval = poll_interval;
        self.confirm_timeout = timeout;
        self
    }
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn env_number(key: &str) -> Result<Option<u64>, SwapError> {
    match env_string(key) {
        Some(raw) => raw
            .parse::<u64>()
            .map(Some)
            .map_err(|e| SwapError::Config(format!("{key}={raw}: {e}"))),
        None => Ok(None),
    }
}

pub type AnyResult<T> = anyhow::Result<T>;
