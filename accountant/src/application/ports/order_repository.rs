use async_trait::async_trait;
use rust_decimal::Decimal;
use trading_core::{Order, TradeStatus};

use crate::domain::{OrderRecord, OrderRecordId, WalletId};

#[async_trait]
pub trait OrderReader: Send + Sync {
    async fn get(&self, id: OrderRecordId) -> Option<OrderRecord>;

    /// Look up by exchange order id
    async fn find_by_order_id(&self, order_id: &str) -> Option<OrderRecord>;

    async fn list_by_wallet(&self, wallet_id: WalletId) -> Vec<OrderRecord>;

    /// Exchange ids of the wallet's orders whose status is one of `statuses`
    async fn list_order_ids_with_status(
        &self,
        wallet_id: WalletId,
        statuses: &[TradeStatus],
    ) -> Vec<String>;
}

#[async_trait]
pub trait OrderWriter: Send + Sync {
    async fn insert(&self, wallet_id: WalletId, order: &Order) -> OrderRecord;

    /// Patch status and remaining size; `None` if the row does not exist
    async fn refresh(
        &self,
        id: OrderRecordId,
        status: TradeStatus,
        remaining_size: Decimal,
    ) -> Option<OrderRecord>;
}

pub trait OrderRepository: OrderReader + OrderWriter {}

impl<T: OrderReader + OrderWriter> OrderRepository for T {}
