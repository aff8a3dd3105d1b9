//! Wallet provider seam
//!
//! Everything the swap flow needs from a wallet: account access, read-only calls,
//! signing + submission, and waiting for a receipt.

pub mod rpc;
pub mod session;

pub use rpc::RpcWallet;
pub use session::WalletSession;

use crate::common::SwapError;
use alloy::primitives::{Address, Bytes, TxHash, U256};
use async_trait::async_trait;
use serde::Serialize;

/// A contract call or transaction before it reaches the wallet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContractCall {
    pub from: Option<Address>,
    pub to: Address,
    pub data: Bytes,
    /// Native value attached to the call (wei)
    pub value: U256,
}

impl ContractCall {
    pub fn new(to: Address, data: impl Into<Bytes>) -> Self {
        Self { from: None, to, data: data.into(), value: U256::ZERO }
    }

    pub fn with_from(mut self, from: Address) -> Self {
        self.from = Some(from);
        self
    }

    pub fn with_value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }
}

/// Minimal view of a mined transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TxReceipt {
    pub hash: TxHash,
    pub block_number: Option<u64>,
    pub success: bool,
}

#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// `eth_requestAccounts`: accounts the user allows this client to use
    async fn request_accounts(&self) -> Result<Vec<Address>, SwapError>;

    /// Read-only `eth_call`, returns the raw ABI-encoded result
    async fn call(&self, call: ContractCall) -> Result<Bytes, SwapError>;

    /// Sign and submit, returns as soon as the node accepted the transaction
    async fn send_transaction(&self, call: ContractCall) -> Result<TxHash, SwapError>;

    /// Block until the transaction is mined
    async fn wait_for_confirmation(&self, hash: TxHash) -> Result<TxReceipt, SwapError>;
}
