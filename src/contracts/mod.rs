//! Typed wrappers over the router and ERC-20 contracts
//!
//! Calldata is encoded with the `sol!` bindings in [`abi`] and routed through a
//! [`WalletProvider`], so the same code runs against a node or [`crate::common::MockChain`].

pub mod abi;
pub mod router;
pub mod token;

pub use router::RouterContract;
pub use token::Erc20Contract;

use crate::common::SwapError;
use crate::wallet::{ContractCall, WalletProvider};
use alloy::primitives::Address;
use alloy::sol_types::SolCall;

/// `eth_call` + decode of a single view function
pub(crate) async fn read_call<W, C>(wallet: &W, to: Address, call: C) -> Result<C::Return, SwapError>
where
    W: WalletProvider + ?Sized,
    C: SolCall,
{
    let raw = wallet.call(ContractCall::new(to, call.abi_encode())).await?;
    C::abi_decode_returns(&raw)
        .map_err(|e| SwapError::Decode { method: C::SIGNATURE, reason: e.to_string() })
}
