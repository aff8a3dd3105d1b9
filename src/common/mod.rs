pub mod error;
pub mod mock_chain;
pub mod status;
pub mod types;

pub use error::SwapError;
pub use mock_chain::{ChainEvent, MockChain, SentTx};
pub use status::StatusBoard;
pub use types::*;
