//! JSON-RPC wallet provider
//!
//! 基于 alloy HTTP provider。配置了私钥时用本地签名器签名，
//! 否则交给节点管理的账户（`eth_accounts` / `eth_sendTransaction`）。

use super::{ContractCall, TxReceipt, WalletProvider};
use crate::common::{SwapConfig, SwapError};
use alloy::network::{EthereumWallet, TransactionBuilder};
use alloy::primitives::{Address, Bytes, TxHash};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::signers::local::PrivateKeySigner;
use alloy::transports::http::reqwest::Url;
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};

pub struct RpcWallet {
    provider: DynProvider,
    /// Address of the local signer, if one is configured
    signer: Option<Address>,
    poll_interval: Duration,
    timeout: Duration,
}

impl RpcWallet {
    pub fn new(
        rpc_url: &str,
        private_key: Option<&str>,
        poll_interval: Duration,
        timeout: Duration,
    ) -> Result<Self, SwapError> {
        let url: Url = rpc_url
            .parse()
            .map_err(|e| SwapError::Config(format!("RPC_URL {rpc_url}: {e}")))?;

        let (provider, signer) = match private_key {
            Some(key) => {
                let signer: PrivateKeySigner = key
                    .trim()
                    .parse()
                    .map_err(|e| SwapError::Config(format!("PRIVATE_KEY: {e}")))?;
                let address = signer.address();
                let provider = ProviderBuilder::new()
                    .wallet(EthereumWallet::from(signer))
                    .connect_http(url)
                    .erased();
                (provider, Some(address))
            },
            None => (ProviderBuilder::new().connect_http(url).erased(), None),
        };

        info!("wallet provider ready: {rpc_url} (local signer: {})", signer.is_some());
        Ok(Self { provider, signer, poll_interval, timeout })
    }

    /// `None` when the configuration has no RPC endpoint
    pub fn from_config(config: &SwapConfig) -> Result<Option<Self>, SwapError> {
        match config.rpc_url.as_deref() {
            Some(url) => Self::new(
                url,
                config.private_key.as_deref(),
                config.confirm_poll_interval,
                config.confirm_timeout,
            )
            .map(Some),
            None => Ok(None),
        }
    }

    fn to_request(call: ContractCall) -> TransactionRequest {
        let mut request = TransactionRequest::default()
            .with_to(call.to)
            .with_input(call.data)
            .with_value(call.value);
        if let Some(from) = call.from {
            request = request.with_from(from);
        }
        request
    }
}

fn rpc_error(err: impl std::fmt::Display) -> SwapError {
    SwapError::Rpc(err.to_string())
}

#[async_trait]
impl WalletProvider for RpcWallet {
    async fn request_accounts(&self) -> Result<Vec<Address>, SwapError> {
        if let Some(address) = self.signer {
            return Ok(vec![address]);
        }
        self.provider.get_accounts().await.map_err(rpc_error)
    }

    async fn call(&self, call: ContractCall) -> Result<Bytes, SwapError> {
        self.provider.call(Self::to_request(call)).await.map_err(rpc_error)
    }

    async fn send_transaction(&self, call: ContractCall) -> Result<TxHash, SwapError> {
        let pending =
            self.provider.send_transaction(Self::to_request(call)).await.map_err(rpc_error)?;
        Ok(*pending.tx_hash())
    }

    async fn wait_for_confirmation(&self, hash: TxHash) -> Result<TxReceipt, SwapError> {
        let deadline = Instant::now() + self.timeout;
        loop {
            if let Some(receipt) =
                self.provider.get_transaction_receipt(hash).await.map_err(rpc_error)?
            {
                return Ok(TxReceipt {
                    hash,
                    block_number: receipt.block_number,
                    success: receipt.status(),
                });
            }
            if Instant::now() >= deadline {
                return Err(SwapError::ConfirmationTimeout(hash, self.timeout));
            }
            debug!("waiting for receipt of {hash}");
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
