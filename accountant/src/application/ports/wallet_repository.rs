use async_trait::async_trait;
use trading_core::TradingProviderId;

use crate::domain::AccountingWallet;

#[async_trait]
pub trait WalletReader: Send + Sync {
    async fn find(&self, address: &str, provider: TradingProviderId) -> Option<AccountingWallet>;

    /// Every wallet registered for a provider, oldest first
    async fn list_by_provider(&self, provider: TradingProviderId) -> Vec<AccountingWallet>;
}

#[async_trait]
pub trait WalletWriter: Send + Sync {
    /// Get the wallet or register it; the flag is `true` when it was created
    async fn get_or_create(&self, address: &str, provider: TradingProviderId) -> (AccountingWallet, bool);
}

pub trait WalletRepository: WalletReader + WalletWriter {}

impl<T: WalletReader + WalletWriter> WalletRepository for T {}
