use serde::{Deserialize, Serialize};
use trading_core::{Timestamp, TradingProviderId};

pub type WalletId = u64;

/// A wallet registered for accounting on one provider
///
/// Identity is `(address, provider)`. Wallets are only created by explicit
/// registration; the import pipeline never creates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountingWallet {
    pub id: WalletId,
    pub address: String,
    pub provider: TradingProviderId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl AccountingWallet {
    pub fn new(id: WalletId, address: &str, provider: TradingProviderId, now: Timestamp) -> Self {
        AccountingWallet {
            id,
            address: address.to_string(),
            provider,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn matches(&self, address: &str, provider: TradingProviderId) -> bool {
        self.address == address && self.provider == provider
    }
}
