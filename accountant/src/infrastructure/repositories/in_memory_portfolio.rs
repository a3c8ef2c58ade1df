use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::DashMap;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::sequence::IdSequence;
use crate::application::ports::{PortfolioReader, PortfolioWriter};
use crate::domain::{Clock, WalletId, WalletPortfolio};
use crate::infrastructure::SystemClock;

/// In-memory daily portfolio snapshots, one per wallet and day
pub struct InMemoryPortfolioRepository {
    snapshots: Arc<DashMap<(WalletId, NaiveDate), WalletPortfolio>>,
    ids: Arc<IdSequence>,
    clock: Arc<dyn Clock>,
}

impl InMemoryPortfolioRepository {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            snapshots: Arc::new(DashMap::new()),
            ids: Arc::new(IdSequence::default()),
            clock,
        }
    }

    pub fn records(&self) -> Vec<WalletPortfolio> {
        let mut snapshots: Vec<WalletPortfolio> =
            self.snapshots.iter().map(|s| s.value().clone()).collect();
        snapshots.sort_by_key(|s| s.id);
        snapshots
    }

    pub fn restore(&self, records: Vec<WalletPortfolio>) {
        for snapshot in records {
            self.ids.observe(snapshot.id);
            self.snapshots
                .insert((snapshot.wallet_id, snapshot.portfolio_date), snapshot);
        }
    }
}

impl Default for InMemoryPortfolioRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for InMemoryPortfolioRepository {
    fn clone(&self) -> Self {
        Self {
            snapshots: Arc::clone(&self.snapshots),
            ids: Arc::clone(&self.ids),
            clock: Arc::clone(&self.clock),
        }
    }
}

#[async_trait]
impl PortfolioReader for InMemoryPortfolioRepository {
    async fn find(&self, wallet_id: WalletId, date: NaiveDate) -> Option<WalletPortfolio> {
        self.snapshots
            .get(&(wallet_id, date))
            .map(|s| s.value().clone())
    }
}

#[async_trait]
impl PortfolioWriter for InMemoryPortfolioRepository {
    async fn upsert(
        &self,
        wallet_id: WalletId,
        date: NaiveDate,
        equity_value: Decimal,
        portfolio_value: Decimal,
    ) -> (WalletPortfolio, bool) {
        let now = self.clock.now();
        let mut created = false;
        let mut entry = self
            .snapshots
            .entry((wallet_id, date))
            .or_insert_with(|| {
                created = true;
                WalletPortfolio {
                    id: self.ids.next(),
                    wallet_id,
                    portfolio_date: date,
                    equity_value,
                    portfolio_value,
                    created_at: now,
                    updated_at: now,
                }
            });

        if !created {
            entry.equity_value = equity_value;
            entry.portfolio_value = portfolio_value;
            entry.updated_at = now;
        }

        (entry.value().clone(), created)
    }
}
