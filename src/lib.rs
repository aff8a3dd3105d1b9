pub mod app;
pub mod common;
pub mod constants;
pub mod contracts;
pub mod trading;
pub mod utils;
pub mod wallet;

pub use crate::app::{SwapApp, SwapForm};
pub use crate::common::{MockChain, StatusBoard, SwapConfig, SwapError};
pub use crate::trading::{Quote, SwapOutcome, SwapRequest};
pub use crate::wallet::{RpcWallet, WalletProvider, WalletSession};

use crate::trading::{SwapExecutor, fetch_quote};
use alloy::primitives::Address;
use std::sync::Arc;
use tracing::info;

/// Swap client over one wallet provider and one router
///
/// Holds the wallet session and the status line. Every method returns a `Result`;
/// turning errors into status text is left to [`SwapApp`].
pub struct SwapClient {
    /// `None` when no wallet provider is available
    wallet: Option<Arc<dyn WalletProvider>>,
    config: SwapConfig,
    session: WalletSession,
    status: StatusBoard,
}

impl SwapClient {
    pub fn new(config: SwapConfig, wallet: Option<Arc<dyn WalletProvider>>) -> Self {
        let status = StatusBoard::new(config.status_clear_delay);
        Self { wallet, config, session: WalletSession::new(), status }
    }

    /// Builds an [`RpcWallet`] when `config.rpc_url` is set
    pub fn from_config(config: SwapConfig) -> Result<Self, SwapError> {
        let wallet = RpcWallet::from_config(&config)?
            .map(|wallet| Arc::new(wallet) as Arc<dyn WalletProvider>);
        Ok(Self::new(config, wallet))
    }

    pub fn config(&self) -> &SwapConfig {
        &self.config
    }

    pub fn status(&self) -> &StatusBoard {
        &self.status
    }

    pub fn session(&self) -> &WalletSession {
        &self.session
    }

    pub fn account(&self) -> Option<Address> {
        self.session.account()
    }

    pub fn wallet(&self) -> Result<&Arc<dyn WalletProvider>, SwapError> {
        self.wallet.as_ref().ok_or(SwapError::MissingWallet)
    }

    /// Request account access and remember the first account
    pub async fn connect(&self) -> Result<Address, SwapError> {
        let wallet = self.wallet()?;
        let account = wallet.request_accounts().await?.into_iter().next().ok_or(SwapError::NoAccounts)?;
        self.session.connect(account);
        info!("wallet connected: {account}");
        Ok(account)
    }

    pub fn disconnect(&self) {
        if let Some(account) = self.session.account() {
            info!("wallet disconnected: {account}");
        }
        self.session.disconnect();
    }

    /// Quote only, nothing is signed
    pub async fn quote(&self, request: &SwapRequest) -> Result<Quote, SwapError> {
        let wallet = self.wallet()?;
        self.status.set("Fetching quote (getAmountsOut)...");
        let quote = fetch_quote(wallet.as_ref(), self.config.router, request).await?;
        self.status.show(quote.summary());
        Ok(quote)
    }

    /// Quote, pause for review, then approve-if-needed and swap
    pub async fn swap(&self, request: &SwapRequest) -> Result<SwapOutcome, SwapError> {
        let wallet = self.wallet()?;
        let account = match self.session.account() {
            Some(account) => account,
            None => self.connect().await?,
        };

        self.status.set("Fetching quote (getAmountsOut)...");
        let quote = fetch_quote(wallet.as_ref(), self.config.router, request).await?;
        self.status.set(quote.summary());
        if !self.config.quote_review_delay.is_zero() {
            tokio::time::sleep(self.config.quote_review_delay).await;
        }

        SwapExecutor::new(wallet.as_ref(), self.config.router, self.config.deadline_secs, &self.status)
            .execute(account, request, quote)
            .await
    }
}
