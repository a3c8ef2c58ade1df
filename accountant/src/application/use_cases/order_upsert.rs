use crate::application::ports::{OrderRepository, ProviderError, TradingProvider};
use crate::domain::{AccountingWallet, OrderRecord};

/// Fetch an order from the exchange and store it
///
/// Unknown orders are inserted; known ones only get their status and
/// remaining size refreshed. The flag is `true` when the order was inserted.
pub(crate) async fn import_order<O: OrderRepository + ?Sized>(
    provider: &dyn TradingProvider,
    orders: &O,
    wallet: &AccountingWallet,
    order_id: &str,
) -> Result<(OrderRecord, bool), ProviderError> {
    let order = provider.get_order(&wallet.address, order_id).await?;

    if let Some(existing) = orders.find_by_order_id(order_id).await {
        let refreshed = orders
            .refresh(existing.id, order.status, order.remaining_size)
            .await
            .unwrap_or(existing);
        return Ok((refreshed, false));
    }

    Ok((orders.insert(wallet.id, &order).await, true))
}
