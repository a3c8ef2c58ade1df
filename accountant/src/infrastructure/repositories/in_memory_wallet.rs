use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use trading_core::TradingProviderId;

use super::sequence::IdSequence;
use crate::application::ports::{WalletReader, WalletWriter};
use crate::domain::{AccountingWallet, Clock};
use crate::infrastructure::SystemClock;

/// In-memory wallet registry keyed by `(address, provider)`
pub struct InMemoryWalletRepository {
    wallets: Arc<DashMap<(String, TradingProviderId), AccountingWallet>>,
    ids: Arc<IdSequence>,
    clock: Arc<dyn Clock>,
}

impl InMemoryWalletRepository {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            wallets: Arc::new(DashMap::new()),
            ids: Arc::new(IdSequence::default()),
            clock,
        }
    }

    pub fn records(&self) -> Vec<AccountingWallet> {
        let mut wallets: Vec<AccountingWallet> =
            self.wallets.iter().map(|w| w.value().clone()).collect();
        wallets.sort_by_key(|w| w.id);
        wallets
    }

    pub fn restore(&self, records: Vec<AccountingWallet>) {
        for wallet in records {
            self.ids.observe(wallet.id);
            self.wallets
                .insert((wallet.address.clone(), wallet.provider), wallet);
        }
    }
}

impl Default for InMemoryWalletRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for InMemoryWalletRepository {
    fn clone(&self) -> Self {
        Self {
            wallets: Arc::clone(&self.wallets),
            ids: Arc::clone(&self.ids),
            clock: Arc::clone(&self.clock),
        }
    }
}

#[async_trait]
impl WalletReader for InMemoryWalletRepository {
    async fn find(&self, address: &str, provider: TradingProviderId) -> Option<AccountingWallet> {
        self.wallets
            .get(&(address.to_string(), provider))
            .map(|w| w.value().clone())
    }

    async fn list_by_provider(&self, provider: TradingProviderId) -> Vec<AccountingWallet> {
        let mut wallets: Vec<AccountingWallet> = self
            .wallets
            .iter()
            .filter(|w| w.provider == provider)
            .map(|w| w.value().clone())
            .collect();
        wallets.sort_by_key(|w| w.id);
        wallets
    }
}

#[async_trait]
impl WalletWriter for InMemoryWalletRepository {
    async fn get_or_create(&self, address: &str, provider: TradingProviderId) -> (AccountingWallet, bool) {
        let mut created = false;
        let wallet = self
            .wallets
            .entry((address.to_string(), provider))
            .or_insert_with(|| {
                created = true;
                AccountingWallet::new(self.ids.next(), address, provider, self.clock.now())
            })
            .value()
            .clone();

        (wallet, created)
    }
}
