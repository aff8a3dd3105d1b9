use alloy::primitives::Address;
use parking_lot::RwLock;

/// Connected account, kept only in memory
#[derive(Debug, Default)]
pub struct WalletSession {
    account: RwLock<Option<Address>>,
}

impl WalletSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn account(&self) -> Option<Address> {
        *self.account.read()
    }

    pub fn is_connected(&self) -> bool {
        self.account.read().is_some()
    }

    pub fn connect(&self, account: Address) {
        *self.account.write() = Some(account);
    }

    pub fn disconnect(&self) {
        *self.account.write() = None;
    }
}
