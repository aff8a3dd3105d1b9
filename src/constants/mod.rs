pub mod router;
pub mod tokens;
pub mod trade;

pub use router::*;
pub use tokens::*;
pub use trade::*;
