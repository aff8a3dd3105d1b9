pub mod address;
pub mod units;

pub use address::parse_address;
pub use units::{format_amount, parse_amount};
