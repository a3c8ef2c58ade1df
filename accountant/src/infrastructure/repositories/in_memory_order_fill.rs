use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use trading_core::{OrderFillImportData, Timestamp};

use super::sequence::IdSequence;
use crate::application::ports::{OrderFillReader, OrderFillWriter};
use crate::domain::{Clock, OrderFillKey, OrderFillRecord, OrderRecordId, WalletId};
use crate::infrastructure::SystemClock;

/// In-memory fill store, deduplicated on the fill's natural key
pub struct InMemoryOrderFillRepository {
    fills: Arc<DashMap<(WalletId, OrderFillKey), OrderFillRecord>>,
    ids: Arc<IdSequence>,
    clock: Arc<dyn Clock>,
}

impl InMemoryOrderFillRepository {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            fills: Arc::new(DashMap::new()),
            ids: Arc::new(IdSequence::default()),
            clock,
        }
    }

    pub fn records(&self) -> Vec<OrderFillRecord> {
        let mut fills: Vec<OrderFillRecord> = self.fills.iter().map(|f| f.value().clone()).collect();
        fills.sort_by_key(|f| f.id);
        fills
    }

    pub fn restore(&self, records: Vec<OrderFillRecord>) {
        for fill in records {
            self.ids.observe(fill.id);
            self.fills.insert((fill.wallet_id, fill.key()), fill);
        }
    }
}

impl Default for InMemoryOrderFillRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for InMemoryOrderFillRepository {
    fn clone(&self) -> Self {
        Self {
            fills: Arc::clone(&self.fills),
            ids: Arc::clone(&self.ids),
            clock: Arc::clone(&self.clock),
        }
    }
}

#[async_trait]
impl OrderFillReader for InMemoryOrderFillRepository {
    async fn latest_fill_timestamp(&self, wallet_id: WalletId) -> Option<Timestamp> {
        self.fills
            .iter()
            .filter(|f| f.wallet_id == wallet_id)
            .map(|f| f.fill_timestamp)
            .max()
    }

    async fn list_by_wallet(&self, wallet_id: WalletId) -> Vec<OrderFillRecord> {
        let mut fills: Vec<OrderFillRecord> = self
            .fills
            .iter()
            .filter(|f| f.wallet_id == wallet_id)
            .map(|f| f.value().clone())
            .collect();
        fills.sort_by_key(|f| f.id);
        fills
    }

    async fn count_by_wallet(&self, wallet_id: WalletId) -> usize {
        self.fills.iter().filter(|f| f.wallet_id == wallet_id).count()
    }
}

#[async_trait]
impl OrderFillWriter for InMemoryOrderFillRepository {
    async fn get_or_create(
        &self,
        wallet_id: WalletId,
        order: Option<OrderRecordId>,
        data: &OrderFillImportData,
    ) -> (OrderFillRecord, bool) {
        let mut created = false;
        let fill = self
            .fills
            .entry((wallet_id, OrderFillKey::of(order, data)))
            .or_insert_with(|| {
                created = true;
                OrderFillRecord::new(self.ids.next(), wallet_id, order, data, self.clock.now())
            })
            .value()
            .clone();

        (fill, created)
    }
}
