//! Swap submission
//!
//! 原生资产输入：直接 `swapExactETHForTokens`，金额作为 value 附带。
//! 代币输入：先查 allowance，不足时 approve 并等待确认，再 `swapExactTokensForTokens`。

use super::quote::Quote;
use super::request::SwapRequest;
use crate::common::{StatusBoard, SwapError};
use crate::contracts::{Erc20Contract, RouterContract};
use crate::wallet::{TxReceipt, WalletProvider};
use alloy::primitives::{Address, TxHash, U256};
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwapOutcome {
    pub quote: Quote,
    /// Set only when an approval had to be sent first
    pub approval: Option<TxReceipt>,
    pub swap: TxReceipt,
}

pub struct SwapExecutor<'a, W: WalletProvider + ?Sized> {
    wallet: &'a W,
    router: Address,
    deadline_secs: u64,
    status: &'a StatusBoard,
}

impl<'a, W: WalletProvider + ?Sized> SwapExecutor<'a, W> {
    pub fn new(wallet: &'a W, router: Address, deadline_secs: u64, status: &'a StatusBoard) -> Self {
        Self { wallet, router, deadline_secs, status }
    }

    /// Unix-seconds deadline counted from now
    pub fn deadline(&self) -> U256 {
        let now = chrono::Utc::now().timestamp().max(0) as u64;
        U256::from(now) + U256::from(self.deadline_secs)
    }

    pub async fn execute(
        &self,
        account: Address,
        request: &SwapRequest,
        quote: Quote,
    ) -> Result<SwapOutcome, SwapError> {
        let router = RouterContract::new(self.router, self.wallet);
        let deadline = self.deadline();

        match request.token_in {
            None => {
                self.status.set("Sending swapExactETHForTokens...");
                let hash = router
                    .swap_exact_eth_for_tokens(
                        account,
                        quote.amount_in,
                        quote.min_amount_out,
                        &quote.path,
                        account,
                        deadline,
                    )
                    .await?;
                let swap = self.confirm_swap(hash).await?;
                Ok(SwapOutcome { quote, approval: None, swap })
            },
            Some(token_in) => {
                let approval = self.ensure_allowance(account, token_in, quote.amount_in).await?;

                self.status.set("Sending swapExactTokensForTokens...");
                let hash = router
                    .swap_exact_tokens_for_tokens(
                        account,
                        quote.amount_in,
                        quote.min_amount_out,
                        &quote.path,
                        account,
                        deadline,
                    )
                    .await?;
                let swap = self.confirm_swap(hash).await?;
                Ok(SwapOutcome { quote, approval, swap })
            },
        }
    }

    /// Approve the router for exactly `amount` when the current allowance is short.
    /// Returns the confirmed approval receipt, or `None` when nothing was sent.
    pub async fn ensure_allowance(
        &self,
        owner: Address,
        token: Address,
        amount: U256,
    ) -> Result<Option<TxReceipt>, SwapError> {
        let erc20 = Erc20Contract::new(token, self.wallet);

        self.status.set("Checking allowance...");
        let allowance = erc20.allowance(owner, self.router).await?;
        if allowance >= amount {
            info!("allowance {allowance} >= {amount}, skipping approve");
            self.status.set("Allowance already sufficient");
            return Ok(None);
        }

        self.status.set("Approving router to spend tokens (approve)...");
        let hash = erc20.approve(owner, self.router, amount).await?;
        self.status.set(format!("Approval sent: {hash}"));
        let receipt = self.confirm(hash).await?;
        self.status.set("Approval confirmed");
        Ok(Some(receipt))
    }

    async fn confirm_swap(&self, hash: TxHash) -> Result<TxReceipt, SwapError> {
        self.status.set(format!("Transaction sent: {hash}"));
        let receipt = self.confirm(hash).await?;
        self.status.show(format!("Swap succeeded: {hash}"));
        Ok(receipt)
    }

    async fn confirm(&self, hash: TxHash) -> Result<TxReceipt, SwapError> {
        let receipt = self.wallet.wait_for_confirmation(hash).await?;
        if !receipt.success {
            warn!("transaction {hash} reverted");
            return Err(SwapError::TransactionReverted(hash));
        }
        info!("transaction {hash} confirmed in block {:?}", receipt.block_number);
        Ok(receipt)
    }
}
