use alloy::primitives::{Address, address};

/// Uniswap V2 Router02 deployed on Sepolia
pub const SEPOLIA_V2_ROUTER: Address = address!("0xeE567Fe1712Faf6149d80dA1E6934E354124CfE3");
