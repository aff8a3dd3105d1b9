//! Quote / minimum-output helpers
//!
//! 报价只读：`getAmountsOut` 的最后一项是预计输出，最低接受量用整数百分比计算，避免精度问题。

use super::request::SwapRequest;
use crate::common::SwapError;
use crate::constants::{DEFAULT_SLIPPAGE_PCT, NATIVE_DECIMALS};
use crate::contracts::{Erc20Contract, RouterContract};
use crate::utils::{format_amount, parse_amount};
use crate::wallet::WalletProvider;
use alloy::primitives::{Address, U256};
use serde::Serialize;
use tracing::info;

/// Slippage percent from a form field. Empty means the default (1%).
pub fn parse_slippage(input: &str) -> Result<f64, SwapError> {
    let raw = input.trim();
    if raw.is_empty() {
        return Ok(DEFAULT_SLIPPAGE_PCT);
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => Err(SwapError::InvalidSlippage(raw.to_string())),
    }
}

/// `estimated * (100 - round(slippage)) / 100`, floor division.
/// Slippage above 100 clamps the factor at zero.
pub fn min_amount_out(estimated: U256, slippage_pct: f64) -> U256 {
    let keep = (100.0 - slippage_pct.round()).max(0.0) as u64;
    estimated * U256::from(keep) / U256::from(100u64)
}

/// Native input routes through the router's own wrapper token
pub async fn build_path<W: WalletProvider + ?Sized>(
    router: &RouterContract<'_, W>,
    token_in: Option<Address>,
    token_out: Address,
) -> Result<Vec<Address>, SwapError> {
    let first = match token_in {
        Some(token) => token,
        None => router.weth().await?,
    };
    Ok(vec![first, token_out])
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
    /// Input amount in smallest units
    pub amount_in: U256,
    pub path: Vec<Address>,
    pub estimated_out: U256,
    pub min_amount_out: U256,
    pub out_decimals: u8,
}

impl Quote {
    pub fn estimated_out_display(&self) -> String {
        format_amount(self.estimated_out, self.out_decimals)
    }

    pub fn min_amount_out_display(&self) -> String {
        format_amount(self.min_amount_out, self.out_decimals)
    }

    pub fn summary(&self) -> String {
        format!(
            "Estimated output: {}, minimum accepted: {}",
            self.estimated_out_display(),
            self.min_amount_out_display()
        )
    }
}

/// Read-only part of a swap: amount conversion, path, router quote, min output
pub async fn fetch_quote<W: WalletProvider + ?Sized>(
    wallet: &W,
    router_address: Address,
    request: &SwapRequest,
) -> Result<Quote, SwapError> {
    let router = RouterContract::new(router_address, wallet);

    let amount_in = match request.token_in {
        None => parse_amount(&request.amount, NATIVE_DECIMALS)?,
        Some(token) => {
            let decimals = Erc20Contract::new(token, wallet).decimals().await?;
            parse_amount(&request.amount, decimals)?
        },
    };

    let path = build_path(&router, request.token_in, request.token_out).await?;
    let amounts = router.get_amounts_out(amount_in, &path).await?;
    let estimated_out = *amounts.last().ok_or(SwapError::EmptyQuote)?;
    let min_out = min_amount_out(estimated_out, request.slippage_pct);

    // 输出代币精度只用于展示
    let out_decimals = Erc20Contract::new(request.token_out, wallet).decimals().await?;

    let quote = Quote { amount_in, path, estimated_out, min_amount_out: min_out, out_decimals };
    info!("quote: in={amount_in} out={estimated_out} min={min_out} path={:?}", quote.path);
    Ok(quote)
}
