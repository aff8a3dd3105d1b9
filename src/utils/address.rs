//! 地址解析
//!
//! 与浏览器钱包库的规则一致：全小写 / 全大写直接接受，大小写混合时必须符合 EIP-55 checksum。

use crate::common::SwapError;
use alloy::primitives::Address;
use std::str::FromStr;

pub fn parse_address(input: &str) -> Result<Address, SwapError> {
    let raw = input.trim();
    let address =
        Address::from_str(raw).map_err(|_| SwapError::InvalidAddress(raw.to_string()))?;

    let digits = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")).unwrap_or(raw);
    let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
    if has_upper && has_lower && address.to_checksum(None)[2..] != *digits {
        return Err(SwapError::InvalidChecksum(raw.to_string()));
    }

    Ok(address)
}
