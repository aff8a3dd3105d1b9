use crate::common::SwapError;
use crate::constants::DEFAULT_AMOUNT_IN;
use crate::trading::SwapRequest;

/// Raw form fields as typed by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapForm {
    /// Empty = native ETH (routed through the router's WETH)
    pub token_in: String,
    pub token_out: String,
    pub amount: String,
    /// Percent
    pub slippage: String,
}

impl Default for SwapForm {
    fn default() -> Self {
        Self {
            token_in: String::new(),
            token_out: String::new(),
            amount: DEFAULT_AMOUNT_IN.to_string(),
            slippage: "1".to_string(),
        }
    }
}

impl SwapForm {
    pub fn set_token_in(&mut self, value: &str) {
        self.token_in = value.trim().to_string();
    }

    pub fn set_token_out(&mut self, value: &str) {
        self.token_out = value.trim().to_string();
    }

    pub fn set_amount(&mut self, value: &str) {
        self.amount = value.to_string();
    }

    pub fn set_slippage(&mut self, value: &str) {
        self.slippage = value.to_string();
    }

    pub fn to_request(&self) -> Result<SwapRequest, SwapError> {
        SwapRequest::parse(&self.token_in, &self.token_out, &self.amount, &self.slippage)
    }
}
