//! 常用代币常量定义
//!
//! Sepolia 上已知代币的合约地址。WETH 不在这里硬编码，运行时通过 `router.WETH()` 读取。

use alloy::primitives::{Address, address};

/// UNI (Sepolia)
pub const SEPOLIA_UNI: Address = address!("0x1f9840a85d5aF5bf1D1762F925BDADdC4201F984");

/// Native asset (ETH) decimals
pub const NATIVE_DECIMALS: u8 = 18;
