pub mod executor;
pub mod quote;
pub mod request;

pub use executor::{SwapExecutor, SwapOutcome};
pub use quote::{Quote, build_path, fetch_quote, min_amount_out, parse_slippage};
pub use request::SwapRequest;
