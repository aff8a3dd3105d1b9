use super::abi::IUniswapV2Router02;
use super::read_call;
use crate::common::SwapError;
use crate::wallet::{ContractCall, WalletProvider};
use alloy::primitives::{Address, TxHash, U256};
use alloy::sol_types::SolCall;
use tracing::info;

/// Uniswap V2 Router02 at a fixed address
pub struct RouterContract<'a, W: WalletProvider + ?Sized> {
    address: Address,
    wallet: &'a W,
}

impl<'a, W: WalletProvider + ?Sized> RouterContract<'a, W> {
    pub fn new(address: Address, wallet: &'a W) -> Self {
        Self { address, wallet }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Native-wrapper token the router pairs native input with
    pub async fn weth(&self) -> Result<Address, SwapError> {
        read_call(self.wallet, self.address, IUniswapV2Router02::WETHCall {}).await
    }

    /// Amounts along `path`; the last element is the expected output
    pub async fn get_amounts_out(
        &self,
        amount_in: U256,
        path: &[Address],
    ) -> Result<Vec<U256>, SwapError> {
        let call = IUniswapV2Router02::getAmountsOutCall { amountIn: amount_in, path: path.to_vec() };
        read_call(self.wallet, self.address, call).await
    }

    /// Native in, `amount_in` attached as value
    pub async fn swap_exact_eth_for_tokens(
        &self,
        from: Address,
        amount_in: U256,
        amount_out_min: U256,
        path: &[Address],
        to: Address,
        deadline: U256,
    ) -> Result<TxHash, SwapError> {
        let call = IUniswapV2Router02::swapExactETHForTokensCall {
            amountOutMin: amount_out_min,
            path: path.to_vec(),
            to,
            deadline,
        };
        let tx = ContractCall::new(self.address, call.abi_encode())
            .with_from(from)
            .with_value(amount_in);
        let hash = self.wallet.send_transaction(tx).await?;
        info!("swapExactETHForTokens sent: {hash}");
        Ok(hash)
    }

    /// Token in, requires an allowance of at least `amount_in` for the router
    pub async fn swap_exact_tokens_for_tokens(
        &self,
        from: Address,
        amount_in: U256,
        amount_out_min: U256,
        path: &[Address],
        to: Address,
        deadline: U256,
    ) -> Result<TxHash, SwapError> {
        let call = IUniswapV2Router02::swapExactTokensForTokensCall {
            amountIn: amount_in,
            amountOutMin: amount_out_min,
            path: path.to_vec(),
            to,
            deadline,
        };
        let tx = ContractCall::new(self.address, call.abi_encode()).with_from(from);
        let hash = self.wallet.send_transaction(tx).await?;
        info!("swapExactTokensForTokens sent: {hash}");
        Ok(hash)
    }
}
