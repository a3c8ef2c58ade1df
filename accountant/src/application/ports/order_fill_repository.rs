use async_trait::async_trait;
use trading_core::{OrderFillImportData, Timestamp};

use crate::domain::{OrderFillRecord, OrderRecordId, WalletId};

#[async_trait]
pub trait OrderFillReader: Send + Sync {
    /// Latest exchange fill time stored for the wallet
    async fn latest_fill_timestamp(&self, wallet_id: WalletId) -> Option<Timestamp>;

    async fn list_by_wallet(&self, wallet_id: WalletId) -> Vec<OrderFillRecord>;

    async fn count_by_wallet(&self, wallet_id: WalletId) -> usize;
}

#[async_trait]
pub trait OrderFillWriter: Send + Sync {
    /// Insert unless a fill with the same natural key exists
    ///
    /// An existing row is returned untouched; `fee` and `closed_pnl` are only
    /// written on first insert. The flag is `true` when a row was created.
    async fn get_or_create(
        &self,
        wallet_id: WalletId,
        order: Option<OrderRecordId>,
        data: &OrderFillImportData,
    ) -> (OrderFillRecord, bool);
}

pub trait OrderFillRepository: OrderFillReader + OrderFillWriter {}

impl<T: OrderFillReader + OrderFillWriter> OrderFillRepository for T {}
