use super::quote::parse_slippage;
use crate::common::SwapError;
use crate::utils::parse_address;
use alloy::primitives::Address;

/// Validated swap parameters. The amount stays a string because its decimals
/// are only known once the input token has been queried.
#[derive(Debug, Clone, PartialEq)]
pub struct SwapRequest {
    /// `None` = native asset
    pub token_in: Option<Address>,
    pub token_out: Address,
    pub amount: String,
    pub slippage_pct: f64,
}

impl SwapRequest {
    /// Validation order: output address present, slippage, then address formats.
    /// Nothing here touches the chain.
    pub fn parse(
        token_in: &str,
        token_out: &str,
        amount: &str,
        slippage: &str,
    ) -> Result<Self, SwapError> {
        let token_out = token_out.trim();
        if token_out.is_empty() {
            return Err(SwapError::MissingTokenOut);
        }
        let slippage_pct = parse_slippage(slippage)?;

        let token_in = token_in.trim();
        let token_in = if token_in.is_empty() { None } else { Some(parse_address(token_in)?) };
        let token_out = parse_address(token_out)?;

        Ok(Self { token_in, token_out, amount: amount.trim().to_string(), slippage_pct })
    }

    pub fn is_native_in(&self) -> bool {
        self.token_in.is_none()
    }
}
