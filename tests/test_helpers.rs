//! 测试工具函数
//!
//! 在 MockChain 上构建 SwapApp，默认不暂停报价展示

#![allow(dead_code)]

use alloy::primitives::{Address, U256, address};
use std::sync::Arc;
use std::time::Duration;
use v2_swap_sdk::constants::SEPOLIA_UNI;
use v2_swap_sdk::{MockChain, SwapApp, SwapClient, SwapConfig, WalletProvider};

pub const UNI: Address = SEPOLIA_UNI;
pub const UNI_STR: &str = "0x1f9840a85d5aF5bf1D1762F925BDADdC4201F984";

/// 6-decimals input token
pub const USDC_LIKE: Address = address!("0x94a9d9ac8a22534e3faca9f4e7f2e2cf85d5e4c8");
pub const USDC_LIKE_STR: &str = "0x94a9d9ac8a22534e3faca9f4e7f2e2cf85d5e4c8";

pub fn account() -> Address {
    Address::repeat_byte(0xa1)
}

pub fn ether(whole: u64) -> U256 {
    U256::from(whole) * U256::from(10u64).pow(U256::from(18u64))
}

pub fn test_config() -> SwapConfig {
    SwapConfig::default()
        .with_quote_review_delay(Duration::ZERO)
        .with_status_clear_delay(Duration::from_secs(5))
}

/// UNI registered with 18 decimals, 1 ETH -> 2000 UNI
pub fn default_chain() -> MockChain {
    MockChain::new(account()).with_token(UNI, 18).with_rate(2000, 1)
}

pub fn create_test_app(chain: Arc<MockChain>) -> SwapApp {
    let wallet: Arc<dyn WalletProvider> = chain;
    SwapApp::new(SwapClient::new(test_config(), Some(wallet)))
}

pub fn create_app_without_wallet() -> SwapApp {
    SwapApp::new(SwapClient::new(test_config(), None))
}

/// Fills the form in one go
pub fn fill_form(app: &SwapApp, token_in: &str, token_out: &str, amount: &str, slippage: &str) {
    app.update_form(|form| {
        form.set_token_in(token_in);
        form.set_token_out(token_out);
        form.set_amount(amount);
        form.set_slippage(slippage);
    });
}
