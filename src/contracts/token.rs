use super::abi::IERC20;
use super::read_call;
use crate::common::SwapError;
use crate::wallet::{ContractCall, WalletProvider};
use alloy::primitives::{Address, TxHash, U256};
use alloy::sol_types::SolCall;
use tracing::info;

pub struct Erc20Contract<'a, W: WalletProvider + ?Sized> {
    address: Address,
    wallet: &'a W,
}

impl<'a, W: WalletProvider + ?Sized> Erc20Contract<'a, W> {
    pub fn new(address: Address, wallet: &'a W) -> Self {
        Self { address, wallet }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub async fn decimals(&self) -> Result<u8, SwapError> {
        read_call(self.wallet, self.address, IERC20::decimalsCall {}).await
    }

    pub async fn allowance(&self, owner: Address, spender: Address) -> Result<U256, SwapError> {
        read_call(self.wallet, self.address, IERC20::allowanceCall { owner, spender }).await
    }

    pub async fn approve(
        &self,
        from: Address,
        spender: Address,
        amount: U256,
    ) -> Result<TxHash, SwapError> {
        let call = IERC20::approveCall { spender, amount };
        let tx = ContractCall::new(self.address, call.abi_encode()).with_from(from);
        let hash = self.wallet.send_transaction(tx).await?;
        info!("approve({spender}, {amount}) on {} sent: {hash}", self.address);
        Ok(hash)
    }
}
