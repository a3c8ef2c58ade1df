use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use trading_core::{OrderHistory, TradeStatus};

use crate::application::ports::{OrderFillReader, OrderReader, PositionReader, WalletReader};
use crate::domain::{AccountingWallet, OrderFillRecord, OrderRecord, OrderRecordId};

use super::report_query::{ReportError, ReportQuery};

/// Totals of the fills recorded against one order
#[derive(Debug, Default)]
struct FillTotals {
    count: u32,
    size: Decimal,
    fee: Decimal,
    closed_pnl: Decimal,
    price_sum: Decimal,
}

impl FillTotals {
    fn add(&mut self, fill: &OrderFillRecord) {
        self.count += 1;
        self.size += fill.size;
        self.fee += fill.fee;
        self.closed_pnl += fill.closed_pnl;
        self.price_sum += fill.price;
    }

    fn average_price(&self) -> Decimal {
        if self.count == 0 {
            return Decimal::ZERO;
        }
        self.price_sum / Decimal::from(self.count)
    }
}

/// Order history of a wallet
///
/// Rows come in three blocks, each newest first by order creation time:
/// orders with fills (aggregated per order), OPEN orders without fills
/// (priced against the open position of their market) and every other
/// order without fills.
pub struct OrderHistoryReportUseCase<W, O, F, P>
where
    W: WalletReader,
    O: OrderReader,
    F: OrderFillReader,
    P: PositionReader,
{
    wallets: Arc<W>,
    orders: Arc<O>,
    fills: Arc<F>,
    positions: Arc<P>,
}

impl<W, O, F, P> OrderHistoryReportUseCase<W, O, F, P>
where
    W: WalletReader,
    O: OrderReader,
    F: OrderFillReader,
    P: PositionReader,
{
    pub fn new(wallets: Arc<W>, orders: Arc<O>, fills: Arc<F>, positions: Arc<P>) -> Self {
        Self {
            wallets,
            orders,
            fills,
            positions,
        }
    }

    pub async fn execute(&self, query: &ReportQuery) -> Result<Vec<OrderHistory>, ReportError> {
        let wallet = self
            .wallets
            .find(&query.wallet_address, query.provider)
            .await
            .ok_or_else(|| {
                tracing::error!(wallet_address = %query.wallet_address, provider = %query.provider, "Accounting wallet not found");
                ReportError::AccountingWalletNotFound {
                    address: query.wallet_address.clone(),
                    provider: query.provider,
                }
            })?;

        tracing::info!(
            wallet_id = wallet.id,
            from = ?query.from,
            to = ?query.to,
            "Building order history"
        );

        let mut totals: HashMap<OrderRecordId, FillTotals> = HashMap::new();
        for fill in self.fills.list_by_wallet(wallet.id).await {
            if let Some(order) = fill.order {
                totals.entry(order).or_default().add(&fill);
            }
        }

        let mut orders: Vec<OrderRecord> = self
            .orders
            .list_by_wallet(wallet.id)
            .await
            .into_iter()
            .filter(|order| query.contains(order.order_created_at))
            .collect();
        orders.sort_by(|a, b| b.order_created_at.cmp(&a.order_created_at));

        let mut filled = Vec::new();
        let mut open = Vec::new();
        let mut unfilled = Vec::new();

        for order in &orders {
            match totals.get(&order.id) {
                Some(fills) => filled.push(history_row(
                    &wallet,
                    order,
                    fills.average_price(),
                    fills.size,
                    fills.fee,
                    fills.closed_pnl,
                )),
                None if order.status == TradeStatus::Open => {
                    if let Some(row) = self.open_order_row(&wallet, order).await {
                        open.push(row);
                    }
                }
                None => unfilled.push(history_row(
                    &wallet,
                    order,
                    Decimal::ZERO,
                    order.remaining_size,
                    Decimal::ZERO,
                    Decimal::ZERO,
                )),
            }
        }

        let mut rows = filled;
        rows.extend(open);
        rows.extend(unfilled);

        tracing::info!(wallet_id = wallet.id, rows = rows.len(), "Built order history");
        Ok(rows)
    }

    /// Open orders carry the unrealized PnL share of the size they would close
    async fn open_order_row(&self, wallet: &AccountingWallet, order: &OrderRecord) -> Option<OrderHistory> {
        let Some(position) = self.positions.find_open(wallet.id, &order.market).await else {
            tracing::error!(
                order_id = %order.order_id,
                market = %order.market,
                "Unable to find open position for open order, continuing"
            );
            return None;
        };

        let pnl = if order.side.is_sell() && !position.remaining_size.is_zero() {
            order.remaining_size / position.remaining_size * position.unrealized_pnl
        } else {
            Decimal::ZERO
        };

        Some(history_row(
            wallet,
            order,
            Decimal::ZERO,
            order.remaining_size,
            Decimal::ZERO,
            pnl,
        ))
    }
}

fn history_row(
    wallet: &AccountingWallet,
    order: &OrderRecord,
    price: Decimal,
    size: Decimal,
    fee: Decimal,
    pnl: Decimal,
) -> OrderHistory {
    OrderHistory {
        wallet_address: wallet.address.clone(),
        provider_name: wallet.provider,
        market: order.market.clone(),
        order_id: order.order_id.clone(),
        trade_side: order.side,
        trade_type: order.trade_type,
        trade_status: order.status,
        price,
        size,
        fee,
        pnl,
        created_at: order.order_created_at,
    }
}
