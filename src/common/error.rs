use alloy::primitives::TxHash;
use std::time::Duration;

/// Everything that can go wrong between the form and a confirmed swap
#[derive(Debug, thiserror::Error)]
pub enum SwapError {
    #[error("no wallet provider configured")]
    MissingWallet,
    #[error("wallet returned no accounts")]
    NoAccounts,
    #[error("token out address is required")]
    MissingTokenOut,
    #[error("invalid slippage value: {0:?}")]
    InvalidSlippage(String),
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    #[error("invalid address: {0:?}")]
    InvalidAddress(String),
    #[error("bad address checksum: {0}")]
    InvalidChecksum(String),
    #[error("a swap is already in progress")]
    FlowInProgress,
    #[error("router returned an empty amounts array")]
    EmptyQuote,
    /// Provider / node error, message kept verbatim
    #[error("{0}")]
    Rpc(String),
    #[error("failed to decode {method} result: {reason}")]
    Decode { method: &'static str, reason: String },
    #[error("transaction {0} reverted")]
    TransactionReverted(TxHash),
    #[error("transaction {0} not confirmed within {1:?}")]
    ConfirmationTimeout(TxHash, Duration),
    #[error("invalid configuration: {0}")]
    Config(String),
}

pub const CHECKSUM_HINT: &str = "Address checksum validation failed: make sure the address is a valid EVM address \
     (for native ETH leave Token In empty and the router's WETH() is used).";

impl SwapError {
    /// True for checksum failures, including ones only visible in a provider message
    pub fn is_checksum_error(&self) -> bool {
        matches!(self, SwapError::InvalidChecksum(_))
            || self.to_string().to_lowercase().contains("checksum")
    }

    /// User-facing status line for this error
    pub fn status_message(&self) -> String {
        if self.is_checksum_error() {
            return CHECKSUM_HINT.to_string();
        }
        match self {
            SwapError::MissingWallet => {
                "No wallet provider found, configure RPC_URL (and PRIVATE_KEY) first".to_string()
            },
            SwapError::NoAccounts => "Wallet returned no accounts".to_string(),
            SwapError::MissingTokenOut => "Please fill in the Token Out address".to_string(),
            SwapError::InvalidSlippage(raw) => format!("Invalid slippage value: {raw:?}"),
            SwapError::InvalidAmount(reason) => format!("Invalid amount: {reason}"),
            SwapError::InvalidAddress(raw) => format!("Invalid address: {raw:?}"),
            SwapError::FlowInProgress => "A swap is already in progress".to_string(),
            other => format!("Error: {other}"),
        }
    }
}
