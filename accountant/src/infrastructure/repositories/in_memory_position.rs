use async_trait::async_trait;
use dashmap::DashMap;
use rust_decimal::Decimal;
use std::sync::Arc;
use trading_core::{Position, PositionStatus, Timestamp};

use super::sequence::IdSequence;
use crate::application::ports::{PositionReader, PositionWriter};
use crate::domain::{Clock, PositionKey, PositionRecord, WalletId};
use crate::infrastructure::SystemClock;

/// In-memory position store keyed by `(wallet, market, side, created_at)`
pub struct InMemoryPositionRepository {
    positions: Arc<DashMap<PositionKey, PositionRecord>>,
    ids: Arc<IdSequence>,
    clock: Arc<dyn Clock>,
}

impl InMemoryPositionRepository {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            positions: Arc::new(DashMap::new()),
            ids: Arc::new(IdSequence::default()),
            clock,
        }
    }

    pub fn records(&self) -> Vec<PositionRecord> {
        let mut positions: Vec<PositionRecord> =
            self.positions.iter().map(|p| p.value().clone()).collect();
        positions.sort_by_key(|p| p.id);
        positions
    }

    pub fn restore(&self, records: Vec<PositionRecord>) {
        for position in records {
            self.ids.observe(position.id);
            self.positions.insert(position.key(), position);
        }
    }

    /// First matching position in insertion order
    fn first_where(&self, predicate: impl Fn(&PositionRecord) -> bool) -> Option<PositionRecord> {
        self.positions
            .iter()
            .filter(|p| predicate(p.value()))
            .min_by_key(|p| p.id)
            .map(|p| p.value().clone())
    }
}

impl Default for InMemoryPositionRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for InMemoryPositionRepository {
    fn clone(&self) -> Self {
        Self {
            positions: Arc::clone(&self.positions),
            ids: Arc::clone(&self.ids),
            clock: Arc::clone(&self.clock),
        }
    }
}

#[async_trait]
impl PositionReader for InMemoryPositionRepository {
    async fn list_by_wallet(&self, wallet_id: WalletId) -> Vec<PositionRecord> {
        let mut positions: Vec<PositionRecord> = self
            .positions
            .iter()
            .filter(|p| p.wallet_id == wallet_id)
            .map(|p| p.value().clone())
            .collect();
        positions.sort_by_key(|p| p.id);
        positions
    }

    async fn find_closed_spanning(
        &self,
        wallet_id: WalletId,
        market: &str,
        at: Timestamp,
    ) -> Option<PositionRecord> {
        self.first_where(|p| {
            p.wallet_id == wallet_id
                && p.market == market
                && p.status == PositionStatus::Closed
                && p.spans(at)
        })
    }

    async fn find_open_created_before(
        &self,
        wallet_id: WalletId,
        market: &str,
        at: Timestamp,
    ) -> Option<PositionRecord> {
        self.first_where(|p| {
            p.wallet_id == wallet_id
                && p.market == market
                && p.is_open()
                && p.position_created_at <= at
        })
    }

    async fn find_open(&self, wallet_id: WalletId, market: &str) -> Option<PositionRecord> {
        self.first_where(|p| p.wallet_id == wallet_id && p.market == market && p.is_open())
    }

    async fn open_positions_value(&self, wallet_id: WalletId) -> Decimal {
        self.positions
            .iter()
            .filter(|p| p.wallet_id == wallet_id && p.is_open())
            .map(|p| p.value)
            .sum()
    }
}

#[async_trait]
impl PositionWriter for InMemoryPositionRepository {
    async fn upsert(&self, wallet_id: WalletId, position: &Position) -> (PositionRecord, bool) {
        let now = self.clock.now();
        let mut created = false;
        let mut entry = self
            .positions
            .entry(PositionKey::of(wallet_id, position))
            .or_insert_with(|| {
                created = true;
                PositionRecord::new(self.ids.next(), wallet_id, position, now)
            });

        if !created {
            entry.overwrite(position, now);
        }

        (entry.value().clone(), created)
    }

    async fn delete_open(&self, wallet_id: WalletId) -> usize {
        let before = self.positions.len();
        self.positions
            .retain(|_, p| !(p.wallet_id == wallet_id && p.is_open()));
        before - self.positions.len()
    }
}
