use async_trait::async_trait;
use dashmap::DashMap;
use rust_decimal::Decimal;
use std::sync::Arc;
use trading_core::{Order, TradeStatus};

use super::sequence::IdSequence;
use crate::application::ports::{OrderReader, OrderWriter};
use crate::domain::{Clock, OrderRecord, OrderRecordId, WalletId};
use crate::infrastructure::SystemClock;

/// In-memory order store
///
/// Orders are indexed by exchange order id, which is assumed unique across
/// wallets of the same deployment.
pub struct InMemoryOrderRepository {
    orders: Arc<DashMap<OrderRecordId, OrderRecord>>,
    /// Index: exchange order id -> record id
    order_id_index: Arc<DashMap<String, OrderRecordId>>,
    ids: Arc<IdSequence>,
    clock: Arc<dyn Clock>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            orders: Arc::new(DashMap::new()),
            order_id_index: Arc::new(DashMap::new()),
            ids: Arc::new(IdSequence::default()),
            clock,
        }
    }

    pub fn records(&self) -> Vec<OrderRecord> {
        let mut orders: Vec<OrderRecord> = self.orders.iter().map(|o| o.value().clone()).collect();
        orders.sort_by_key(|o| o.id);
        orders
    }

    pub fn restore(&self, records: Vec<OrderRecord>) {
        for order in records {
            self.ids.observe(order.id);
            self.order_id_index.insert(order.order_id.clone(), order.id);
            self.orders.insert(order.id, order);
        }
    }
}

impl Default for InMemoryOrderRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for InMemoryOrderRepository {
    fn clone(&self) -> Self {
        Self {
            orders: Arc::clone(&self.orders),
            order_id_index: Arc::clone(&self.order_id_index),
            ids: Arc::clone(&self.ids),
            clock: Arc::clone(&self.clock),
        }
    }
}

#[async_trait]
impl OrderReader for InMemoryOrderRepository {
    async fn get(&self, id: OrderRecordId) -> Option<OrderRecord> {
        self.orders.get(&id).map(|o| o.value().clone())
    }

    async fn find_by_order_id(&self, order_id: &str) -> Option<OrderRecord> {
        let id = *self.order_id_index.get(order_id)?;
        self.get(id).await
    }

    async fn list_by_wallet(&self, wallet_id: WalletId) -> Vec<OrderRecord> {
        let mut orders: Vec<OrderRecord> = self
            .orders
            .iter()
            .filter(|o| o.wallet_id == wallet_id)
            .map(|o| o.value().clone())
            .collect();
        orders.sort_by_key(|o| o.id);
        orders
    }

    async fn list_order_ids_with_status(
        &self,
        wallet_id: WalletId,
        statuses: &[TradeStatus],
    ) -> Vec<String> {
        self.list_by_wallet(wallet_id)
            .await
            .into_iter()
            .filter(|o| statuses.contains(&o.status))
            .map(|o| o.order_id)
            .collect()
    }
}

#[async_trait]
impl OrderWriter for InMemoryOrderRepository {
    async fn insert(&self, wallet_id: WalletId, order: &Order) -> OrderRecord {
        let id = *self
            .order_id_index
            .entry(order.order_id.clone())
            .or_insert_with(|| {
                let id = self.ids.next();
                self.orders
                    .insert(id, OrderRecord::new(id, wallet_id, order, self.clock.now()));
                id
            });

        self.orders
            .get(&id)
            .map(|o| o.value().clone())
            .unwrap_or_else(|| OrderRecord::new(id, wallet_id, order, self.clock.now()))
    }

    async fn refresh(
        &self,
        id: OrderRecordId,
        status: TradeStatus,
        remaining_size: Decimal,
    ) -> Option<OrderRecord> {
        let mut order = self.orders.get_mut(&id)?;
        order.refresh(status, remaining_size, self.clock.now());
        Some(order.value().clone())
    }
}
