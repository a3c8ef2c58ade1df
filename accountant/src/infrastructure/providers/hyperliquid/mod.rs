mod schemas;

use async_trait::async_trait;
use chrono::DateTime;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::error;
use trading_core::{
    Order, OrderFill, OrderFillImportData, Position, PositionFunding, PositionSide, PositionStatus,
    TimeWindow, Timestamp, TradeDirection, TradeSide, TradeStatus, TradeType, TradingProviderId,
    WalletAccount,
};

use self::schemas::{HlClearinghouseState, HlFill, HlFundingRecord, HlOpenOrder, HlOrderStatusResponse};
use super::decode::{decode, parse_record, parse_records};
use crate::application::ports::{HyperliquidGateway, ProviderError, TradingProvider};
use crate::domain::OrderRecord;

pub const ORDER_SIDES: &[(&str, TradeSide)] = &[("A", TradeSide::Sell), ("B", TradeSide::Buy)];

pub const ORDER_DIRECTIONS: &[(&str, TradeDirection)] = &[
    ("Open Long", TradeDirection::OpenLong),
    ("Close Long", TradeDirection::CloseLong),
    ("Open Short", TradeDirection::OpenShort),
    ("Close Short", TradeDirection::CloseShort),
];

pub const ORDER_TYPES: &[(&str, TradeType)] = &[
    ("Stop Market", TradeType::StopMarket),
    ("Market", TradeType::Market),
    ("Limit", TradeType::Limit),
];

pub const ORDER_STATUSES: &[(&str, TradeStatus)] = &[
    ("filled", TradeStatus::Filled),
    ("open", TradeStatus::Open),
    ("canceled", TradeStatus::Cancelled),
];

const OPEN_STATUSES: &[TradeStatus] = &[TradeStatus::Open];

/// 2000-01-01T00:00:00Z
const POSITION_EPOCH_SECS: i64 = 946_684_800;

/// HyperLiquid exposes no position history, so every position it reports
/// is OPEN and shares one fixed creation time
fn position_epoch() -> Timestamp {
    DateTime::from_timestamp(POSITION_EPOCH_SECS, 0).unwrap_or_default()
}

fn market_of(coin: &str) -> String {
    format!("{}-USD", coin)
}

/// HyperLiquid adapter
pub struct HyperliquidProvider {
    gateway: Arc<dyn HyperliquidGateway>,
}

impl HyperliquidProvider {
    pub fn new(gateway: Arc<dyn HyperliquidGateway>) -> Self {
        HyperliquidProvider { gateway }
    }

    async fn clearinghouse_state(&self, wallet_address: &str) -> Result<HlClearinghouseState, ProviderError> {
        let response = self
            .gateway
            .fetch_clearinghouse_state(wallet_address)
            .await
            .map_err(|e| {
                error!(wallet_address, error = %e, "Unable to fetch clearinghouse state");
                ProviderError::from(e)
            })?;
        parse_record(response, "Clearinghouse state")
    }
}

#[async_trait]
impl TradingProvider for HyperliquidProvider {
    fn provider(&self) -> TradingProviderId {
        TradingProviderId::Hyperliquid
    }

    fn order_open_statuses(&self) -> &'static [TradeStatus] {
        OPEN_STATUSES
    }

    async fn get_order_fills(
        &self,
        wallet_address: &str,
        window: TimeWindow,
    ) -> Result<Vec<OrderFill>, ProviderError> {
        let response = self
            .gateway
            .fetch_order_fills(wallet_address, window)
            .await
            .map_err(|e| {
                error!(wallet_address, %window, error = %e, "Unable to get order fills");
                ProviderError::from(e)
            })?;
        let fills: Vec<HlFill> = parse_records(response, "Order fills")?;

        fills
            .into_iter()
            .filter(|fill| window.contains(fill.time))
            .map(|fill| {
                Ok(OrderFill {
                    order_id: fill.oid.to_string(),
                    market: market_of(&fill.coin),
                    side: decode(ORDER_SIDES, "order side", &fill.side)?,
                    direction: Some(decode(ORDER_DIRECTIONS, "order direction", &fill.dir)?),
                    price: fill.px,
                    size: fill.sz,
                    fee: fill.fee,
                    closed_pnl: Some(fill.closed_pnl),
                    hash: Some(fill.hash),
                    created_at: fill.time,
                })
            })
            .collect()
    }

    async fn get_order(&self, wallet_address: &str, order_id: &str) -> Result<Order, ProviderError> {
        let oid: u64 = order_id.parse().map_err(|_| {
            ProviderError::DataValidation(format!("order id `{}` is not numeric", order_id))
        })?;
        let response = self
            .gateway
            .fetch_order_status(wallet_address, oid)
            .await
            .map_err(|e| {
                error!(wallet_address, order_id, error = %e, "Unable to get order");
                ProviderError::from(e)
            })?;
        let envelope = parse_record::<HlOrderStatusResponse>(response, "Order")?.order;
        let order = envelope.order;

        Ok(Order {
            order_id: order.oid.to_string(),
            market: market_of(&order.coin),
            trade_type: decode(ORDER_TYPES, "order type", &order.order_type)?,
            side: decode(ORDER_SIDES, "order side", &order.side)?,
            status: decode(ORDER_STATUSES, "order status", &envelope.status)?,
            remaining_size: order.sz,
            original_size: order.orig_sz,
            created_at: order.timestamp,
        })
    }

    async fn get_open_order_ids(&self, wallet_address: &str) -> Result<Vec<String>, ProviderError> {
        let response = self.gateway.fetch_open_orders(wallet_address).await.map_err(|e| {
            error!(wallet_address, error = %e, "Unable to fetch open orders");
            ProviderError::from(e)
        })?;
        let orders: Vec<HlOpenOrder> = parse_records(response, "Open orders")?;
        Ok(orders.into_iter().map(|order| order.oid.to_string()).collect())
    }

    async fn get_positions(
        &self,
        wallet_address: &str,
        _window: TimeWindow,
    ) -> Result<Vec<Position>, ProviderError> {
        let state = self.clearinghouse_state(wallet_address).await?;

        Ok(state
            .asset_positions
            .into_iter()
            .map(|asset| {
                let position = asset.position;
                Position {
                    market: market_of(&position.coin),
                    status: PositionStatus::Open,
                    side: PositionSide::Neutral,
                    size: position.szi.abs(),
                    remaining_size: position.szi.abs(),
                    unrealized_pnl: position.unrealized_pnl,
                    realized_pnl: Decimal::ZERO,
                    value: position.position_value,
                    created_at: position_epoch(),
                    closed_at: None,
                }
            })
            .collect())
    }

    async fn get_position_fundings(
        &self,
        wallet_address: &str,
        from: Timestamp,
        to: Option<Timestamp>,
    ) -> Result<Vec<PositionFunding>, ProviderError> {
        let response = self
            .gateway
            .fetch_funding_payments(wallet_address, from, to)
            .await
            .map_err(|e| {
                error!(wallet_address, %from, ?to, error = %e, "Unable to fetch position fundings");
                ProviderError::from(e)
            })?;
        let records: Vec<HlFundingRecord> = parse_records(response, "Position fundings")?;

        Ok(records
            .into_iter()
            .map(|record| PositionFunding {
                market: market_of(&record.delta.coin),
                payment: record.delta.usdc,
                funding_rate: record.delta.funding_rate,
                position_size: record.delta.szi,
                hash: Some(record.hash),
                created_at: record.time,
            })
            .collect())
    }

    /// HyperLiquid fills already say which way they traded; no position lookup
    async fn prepare_order_fill_for_import(
        &self,
        order_fill: &OrderFill,
        _order: &OrderRecord,
    ) -> Result<OrderFillImportData, ProviderError> {
        let direction = order_fill.direction.ok_or_else(|| {
            ProviderError::DataValidation(format!("fill of order {} has no direction", order_fill.order_id))
        })?;

        Ok(OrderFillImportData {
            order_id: order_fill.order_id.clone(),
            market: order_fill.market.clone(),
            side: order_fill.side,
            position_side: Some(direction.position_side()),
            direction: Some(direction),
            price: order_fill.price,
            size: order_fill.size,
            fee: order_fill.fee,
            closed_pnl: order_fill.closed_pnl.unwrap_or_default(),
            hash: order_fill.hash.clone(),
            created_at: order_fill.created_at,
        })
    }

    async fn get_account_portfolio(&self, wallet_address: &str) -> Result<WalletAccount, ProviderError> {
        let state = self.clearinghouse_state(wallet_address).await?;
        Ok(WalletAccount {
            equity_value: state.margin_summary.account_value,
        })
    }
}
