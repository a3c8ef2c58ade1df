mod schemas;

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, warn};
use trading_core::{
    Order, OrderFill, OrderFillImportData, Position, PositionFunding, PositionSide, PositionStatus,
    TimeWindow, Timestamp, TradeDirection, TradeSide, TradeStatus, TradeType, TradingProviderId,
    WalletAccount,
};

use self::schemas::{DydxAccount, DydxFill, DydxFundingPayment, DydxMarket, DydxOrder, DydxPosition};
use super::decode::{decode, parse_record, parse_records};
use crate::application::ports::{DydxGateway, PositionReader, ProviderError, TradingProvider};
use crate::domain::OrderRecord;

pub const ORDER_TYPES: &[(&str, TradeType)] = &[
    ("MARKET", TradeType::Market),
    ("LIMIT", TradeType::Limit),
    ("STOP", TradeType::Stop),
    ("TRAILING_STOP", TradeType::TrailingStop),
    ("TAKE_PROFIT", TradeType::TakeProfit),
    ("STOP_MARKET", TradeType::StopMarket),
];

pub const ORDER_STATUSES: &[(&str, TradeStatus)] = &[
    ("FILLED", TradeStatus::Filled),
    ("CANCELED", TradeStatus::Cancelled),
    ("UNTRIGGERED", TradeStatus::Untriggered),
    ("PENDING", TradeStatus::Pending),
    ("OPEN", TradeStatus::Open),
];

pub const ORDER_SIDES: &[(&str, TradeSide)] = &[("SELL", TradeSide::Sell), ("BUY", TradeSide::Buy)];

pub const POSITION_STATUSES: &[(&str, PositionStatus)] = &[
    ("OPEN", PositionStatus::Open),
    ("CLOSED", PositionStatus::Closed),
    ("LIQUIDATED", PositionStatus::Liquidated),
];

pub const POSITION_SIDES: &[(&str, PositionSide)] =
    &[("LONG", PositionSide::Long), ("SHORT", PositionSide::Short)];

const OPEN_STATUSES: &[TradeStatus] = &[TradeStatus::Open, TradeStatus::Pending, TradeStatus::Untriggered];

/// Orders in these states may still have traded into a position that is open now
const OPEN_POSITION_FALLBACK_STATUSES: &[TradeStatus] =
    &[TradeStatus::Open, TradeStatus::Filled, TradeStatus::Cancelled];

/// dYdX v3 adapter
///
/// dYdX fills carry neither direction nor realized PnL, so fill preparation
/// attributes each fill to a stored position and apportions the position's
/// realized PnL.
pub struct DydxProvider {
    gateway: Arc<dyn DydxGateway>,
    positions: Arc<dyn PositionReader>,
}

impl DydxProvider {
    pub fn new(gateway: Arc<dyn DydxGateway>, positions: Arc<dyn PositionReader>) -> Self {
        DydxProvider { gateway, positions }
    }

    fn decode_order(order: DydxOrder) -> Result<Order, ProviderError> {
        Ok(Order {
            trade_type: decode(ORDER_TYPES, "order type", &order.order_type)?,
            side: decode(ORDER_SIDES, "order side", &order.side)?,
            status: decode(ORDER_STATUSES, "order status", &order.status)?,
            order_id: order.id,
            market: order.market,
            remaining_size: order.remaining_size,
            original_size: order.size,
            created_at: order.created_at,
        })
    }

    async fn market_price(&self, wallet_address: &str, market: &str) -> Result<Decimal, ProviderError> {
        let mut markets = self.gateway.fetch_markets(wallet_address, market).await?;
        let entry = markets
            .get_mut(market)
            .map(serde_json::Value::take)
            .ok_or_else(|| ProviderError::DataValidation(format!("market {} is missing", market)))?;
        let market: DydxMarket = parse_record(entry, "Market")?;
        Ok(market.oracle_price)
    }
}

#[async_trait]
impl TradingProvider for DydxProvider {
    fn provider(&self) -> TradingProviderId {
        TradingProviderId::Dydx
    }

    fn order_open_statuses(&self) -> &'static [TradeStatus] {
        OPEN_STATUSES
    }

    async fn get_order_fills(
        &self,
        wallet_address: &str,
        window: TimeWindow,
    ) -> Result<Vec<OrderFill>, ProviderError> {
        let response = self.gateway.fetch_order_fills(wallet_address).await.map_err(|e| {
            error!(wallet_address, error = %e, "Unable to get order fills");
            ProviderError::from(e)
        })?;
        let fills: Vec<DydxFill> = parse_records(response, "Order fills")?;

        fills
            .into_iter()
            .filter(|fill| window.contains(fill.created_at))
            .map(|fill| {
                Ok(OrderFill {
                    side: decode(ORDER_SIDES, "order side", &fill.side)?,
                    order_id: fill.order_id,
                    market: fill.market,
                    direction: None,
                    price: fill.price,
                    size: fill.size,
                    fee: fill.fee,
                    closed_pnl: None,
                    hash: Some(fill.id),
                    created_at: fill.created_at,
                })
            })
            .collect()
    }

    async fn get_order(&self, wallet_address: &str, order_id: &str) -> Result<Order, ProviderError> {
        let response = self.gateway.fetch_order(wallet_address, order_id).await.map_err(|e| {
            error!(wallet_address, order_id, error = %e, "Unable to get order");
            ProviderError::from(e)
        })?;
        Self::decode_order(parse_record(response, "Order")?)
    }

    async fn get_open_order_ids(&self, wallet_address: &str) -> Result<Vec<String>, ProviderError> {
        let response = self.gateway.fetch_open_orders(wallet_address).await.map_err(|e| {
            error!(wallet_address, error = %e, "Unable to fetch open orders");
            ProviderError::from(e)
        })?;
        let orders: Vec<DydxOrder> = parse_records(response, "Open orders")?;
        Ok(orders.into_iter().map(|order| order.id).collect())
    }

    /// dYdX returns its full position history; the window is not forwarded
    async fn get_positions(
        &self,
        wallet_address: &str,
        _window: TimeWindow,
    ) -> Result<Vec<Position>, ProviderError> {
        let response = self.gateway.fetch_positions(wallet_address).await.map_err(|e| {
            error!(wallet_address, error = %e, "Unable to fetch positions");
            ProviderError::from(e)
        })?;
        let positions: Vec<DydxPosition> = parse_records(response, "Positions")?;

        let mut prices: HashMap<String, Decimal> = HashMap::new();
        let mut decoded = Vec::with_capacity(positions.len());
        for position in positions {
            let price = match prices.get(&position.market) {
                Some(price) => *price,
                None => {
                    let price = self.market_price(wallet_address, &position.market).await?;
                    prices.insert(position.market.clone(), price);
                    price
                }
            };

            decoded.push(Position {
                status: decode(POSITION_STATUSES, "position status", &position.status)?,
                side: decode(POSITION_SIDES, "position side", &position.side)?,
                size: position.max_size.abs(),
                remaining_size: position.size.abs(),
                unrealized_pnl: position.unrealized_pnl,
                realized_pnl: position.realized_pnl,
                value: position.size * price,
                created_at: position.created_at,
                closed_at: position.closed_at,
                market: position.market,
            });
        }
        Ok(decoded)
    }

    async fn get_position_fundings(
        &self,
        wallet_address: &str,
        from: Timestamp,
        to: Option<Timestamp>,
    ) -> Result<Vec<PositionFunding>, ProviderError> {
        let response = self
            .gateway
            .fetch_funding_payments(wallet_address, to)
            .await
            .map_err(|e| {
                error!(wallet_address, %from, ?to, error = %e, "Unable to fetch position fundings");
                ProviderError::from(e)
            })?;
        let payments: Vec<DydxFundingPayment> = parse_records(response, "Position fundings")?;

        Ok(payments
            .into_iter()
            .filter(|payment| payment.effective_at >= from)
            .map(|payment| PositionFunding {
                market: payment.market,
                payment: payment.payment,
                funding_rate: payment.rate,
                position_size: payment.position_size,
                hash: None,
                created_at: payment.effective_at,
            })
            .collect())
    }

    async fn prepare_order_fill_for_import(
        &self,
        order_fill: &OrderFill,
        order: &OrderRecord,
    ) -> Result<OrderFillImportData, ProviderError> {
        let at = order.order_created_at;
        let mut position = self
            .positions
            .find_closed_spanning(order.wallet_id, &order.market, at)
            .await;

        if position.is_none() && OPEN_POSITION_FALLBACK_STATUSES.contains(&order.status) {
            position = self
                .positions
                .find_open_created_before(order.wallet_id, &order.market, at)
                .await;
        }

        let Some(position) = position else {
            let msg = format!(
                "Unable to find position (order_id={}, market={}, order_created_at={})",
                order.order_id, order.market, at
            );
            warn!("{}. Skipping", msg);
            return Err(ProviderError::PositionNotFound(msg));
        };

        let filled_size = position.size - position.remaining_size;
        let closed_pnl = if order.side.is_sell() && !filled_size.is_zero() && !position.size.is_zero() {
            order_fill.size / position.size * position.realized_pnl
        } else {
            Decimal::ZERO
        };

        Ok(OrderFillImportData {
            order_id: order_fill.order_id.clone(),
            market: order_fill.market.clone(),
            side: order_fill.side,
            position_side: Some(position.side),
            direction: TradeDirection::from_order_side_and_position_side(order.side, position.side),
            price: order_fill.price,
            size: order_fill.size,
            fee: order_fill.fee,
            closed_pnl,
            hash: order_fill.hash.clone(),
            created_at: order_fill.created_at,
        })
    }

    async fn get_account_portfolio(&self, wallet_address: &str) -> Result<WalletAccount, ProviderError> {
        let response = self.gateway.fetch_account(wallet_address).await.map_err(|e| {
            error!(wallet_address, error = %e, "Unable to get account portfolio");
            ProviderError::from(e)
        })?;
        let account: DydxAccount = parse_record(response, "Account portfolio")?;
        Ok(WalletAccount {
            equity_value: account.equity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{GatewayError, PositionWriter};
    use crate::infrastructure::InMemoryPositionRepository;
    use chrono::{TimeDelta, TimeZone, Utc};
    use rust_decimal_macros::dec;
    use serde_json::{Value, json};

    #[derive(Default)]
    struct CannedGateway {
        fills: Vec<Value>,
        positions: Vec<Value>,
        fundings: Vec<Value>,
        fail: bool,
    }

    impl CannedGateway {
        fn check(&self) -> Result<(), GatewayError> {
            if self.fail {
                return Err(GatewayError::Network("connection refused".to_string()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl DydxGateway for CannedGateway {
        async fn fetch_order_fills(&self, _: &str) -> Result<Vec<Value>, GatewayError> {
            self.check().map(|_| self.fills.clone())
        }

        async fn fetch_open_orders(&self, _: &str) -> Result<Vec<Value>, GatewayError> {
            self.check().map(|_| Vec::new())
        }

        async fn fetch_order(&self, _: &str, order_id: &str) -> Result<Value, GatewayError> {
            self.check()?;
            Ok(json!({
                "id": order_id,
                "market": "BTC-USD",
                "side": "SELL",
                "size": "2",
                "remainingSize": "0.5",
                "type": "STOP_MARKET",
                "createdAt": "2024-03-01T10:00:30.500Z",
                "status": "CANCELED"
            }))
        }

        async fn fetch_positions(&self, _: &str) -> Result<Vec<Value>, GatewayError> {
            self.check().map(|_| self.positions.clone())
        }

        async fn fetch_funding_payments(
            &self,
            _: &str,
            _: Option<Timestamp>,
        ) -> Result<Vec<Value>, GatewayError> {
            self.check().map(|_| self.fundings.clone())
        }

        async fn fetch_account(&self, _: &str) -> Result<Value, GatewayError> {
            self.check()?;
            Ok(json!({"equity": "1234.5", "quoteBalance": "1000"}))
        }

        async fn fetch_markets(&self, _: &str, market: &str) -> Result<Value, GatewayError> {
            self.check()?;
            Ok(json!({ market: {"oraclePrice": "20000"} }))
        }
    }

    fn provider(gateway: CannedGateway) -> (DydxProvider, InMemoryPositionRepository) {
        let positions = InMemoryPositionRepository::new();
        (
            DydxProvider::new(Arc::new(gateway), Arc::new(positions.clone())),
            positions,
        )
    }

    fn ts(h: u32, m: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2024, 3, 1, h, m, 0).unwrap()
    }

    #[tokio::test]
    async fn test_get_order_maps_sizes_and_vocabulary() {
        let (provider, _) = provider(CannedGateway::default());
        let order = provider.get_order("0xabc", "o-1").await.unwrap();

        assert_eq!(order.order_id, "o-1");
        assert_eq!(order.trade_type, TradeType::StopMarket);
        assert_eq!(order.status, TradeStatus::Cancelled);
        assert_eq!(order.remaining_size, dec!(0.5));
        assert_eq!(order.original_size, dec!(2));
    }

    #[tokio::test]
    async fn test_gateway_failure_is_provider_api_error() {
        let (provider, _) = provider(CannedGateway {
            fail: true,
            ..Default::default()
        });

        let result = provider.get_open_order_ids("0xabc").await;
        assert!(matches!(result, Err(ProviderError::ProviderApi(_))));
    }

    #[tokio::test]
    async fn test_fills_outside_window_are_dropped() {
        let fill = |id: &str, at: &str| {
            json!({
                "id": id, "side": "BUY", "liquidity": "TAKER", "type": "LIMIT",
                "market": "BTC-USD", "price": "20000", "size": "0.1", "fee": "0.5",
                "createdAt": at, "orderId": "o-1"
            })
        };
        let (provider, _) = provider(CannedGateway {
            fills: vec![
                fill("f1", "2024-03-01T10:00:00.000Z"),
                fill("f2", "2024-03-01T12:00:00.000Z"),
            ],
            ..Default::default()
        });

        let fills = provider
            .get_order_fills("0xabc", TimeWindow::new(ts(9, 0), ts(11, 0)))
            .await
            .unwrap();

        assert_eq!(fills.len(), 1);
        assert_eq!(fills[0].hash.as_deref(), Some("f1"));
        assert!(fills[0].direction.is_none());
        assert!(fills[0].closed_pnl.is_none());
    }

    #[tokio::test]
    async fn test_unknown_position_status_rejects_listing() {
        let (provider, _) = provider(CannedGateway {
            positions: vec![json!({
                "market": "BTC-USD", "status": "FROZEN", "side": "LONG", "size": "1",
                "maxSize": "1", "unrealizedPnl": "0", "realizedPnl": "0",
                "createdAt": "2024-03-01T10:00:00.000Z"
            })],
            ..Default::default()
        });

        let result = provider
            .get_positions("0xabc", TimeWindow::ending_at(ts(12, 0), TimeDelta::days(1)))
            .await;
        assert!(matches!(result, Err(ProviderError::DataValidation(_))));
    }

    #[tokio::test]
    async fn test_position_value_uses_oracle_price() {
        let (provider, _) = provider(CannedGateway {
            positions: vec![json!({
                "market": "BTC-USD", "status": "OPEN", "side": "SHORT", "size": "-0.5",
                "maxSize": "-1.5", "unrealizedPnl": "12", "realizedPnl": "3",
                "createdAt": "2024-03-01T10:00:00.000Z", "closedAt": null
            })],
            ..Default::default()
        });

        let positions = provider
            .get_positions("0xabc", TimeWindow::ending_at(ts(12, 0), TimeDelta::days(1)))
            .await
            .unwrap();

        assert_eq!(positions[0].size, dec!(1.5));
        assert_eq!(positions[0].remaining_size, dec!(0.5));
        assert_eq!(positions[0].value, dec!(-10000));
        assert_eq!(positions[0].side, PositionSide::Short);
    }

    #[tokio::test]
    async fn test_fundings_before_from_are_dropped() {
        let funding = |at: &str| {
            json!({
                "market": "ETH-USD", "payment": "-0.25", "rate": "0.0001",
                "positionSize": "3", "price": "3000", "effectiveAt": at
            })
        };
        let (provider, _) = provider(CannedGateway {
            fundings: vec![
                funding("2024-03-01T08:00:00.000Z"),
                funding("2024-02-28T08:00:00.000Z"),
            ],
            ..Default::default()
        });

        let fundings = provider
            .get_position_fundings("0xabc", ts(0, 0), None)
            .await
            .unwrap();

        assert_eq!(fundings.len(), 1);
        assert!(fundings[0].hash.is_none());
        assert_eq!(fundings[0].funding_rate, dec!(0.0001));
    }

    fn stored_order(side: TradeSide, status: TradeStatus) -> OrderRecord {
        stored_order_at(side, status, ts(10, 0) + TimeDelta::seconds(42))
    }

    fn stored_order_at(side: TradeSide, status: TradeStatus, created_at: Timestamp) -> OrderRecord {
        let order = Order {
            order_id: "o-1".to_string(),
            market: "BTC-USD".to_string(),
            trade_type: TradeType::Limit,
            side,
            status,
            remaining_size: dec!(0),
            original_size: dec!(1),
            created_at,
        };
        OrderRecord::new(1, 1, &order, ts(12, 0))
    }

    fn fill(size: Decimal) -> OrderFill {
        OrderFill {
            order_id: "o-1".to_string(),
            market: "BTC-USD".to_string(),
            side: TradeSide::Sell,
            direction: None,
            price: dec!(20000),
            size,
            fee: dec!(1),
            closed_pnl: None,
            hash: Some("f1".to_string()),
            created_at: ts(10, 1),
        }
    }

    fn closed_long(realized_pnl: Decimal, closed_at: Timestamp) -> Position {
        Position {
            market: "BTC-USD".to_string(),
            status: PositionStatus::Closed,
            side: PositionSide::Long,
            size: dec!(2),
            remaining_size: dec!(0),
            unrealized_pnl: dec!(0),
            realized_pnl,
            value: dec!(0),
            created_at: ts(9, 0),
            closed_at: Some(closed_at),
        }
    }

    #[tokio::test]
    async fn test_sell_fill_on_closed_position_takes_pnl_share() {
        let (provider, positions) = provider(CannedGateway::default());
        positions.upsert(1, &closed_long(dec!(100), ts(11, 0))).await;

        let data = provider
            .prepare_order_fill_for_import(&fill(dec!(1)), &stored_order(TradeSide::Sell, TradeStatus::Filled))
            .await
            .unwrap();

        assert_eq!(data.closed_pnl, dec!(50));
        assert_eq!(data.position_side, Some(PositionSide::Long));
        assert_eq!(data.direction, Some(TradeDirection::CloseLong));
    }

    #[tokio::test]
    async fn test_untriggered_order_does_not_fall_back_to_open_position() {
        let (provider, positions) = provider(CannedGateway::default());
        positions
            .upsert(
                1,
                &Position {
                    market: "BTC-USD".to_string(),
                    status: PositionStatus::Open,
                    side: PositionSide::Long,
                    size: dec!(2),
                    remaining_size: dec!(2),
                    unrealized_pnl: dec!(5),
                    realized_pnl: dec!(0),
                    value: dec!(40000),
                    created_at: ts(9, 0),
                    closed_at: None,
                },
            )
            .await;

        let order_fill = fill(dec!(1));
        let untriggered = provider
            .prepare_order_fill_for_import(&order_fill, &stored_order(TradeSide::Buy, TradeStatus::Untriggered))
            .await;
        assert!(matches!(untriggered, Err(ProviderError::PositionNotFound(_))));

        let open = provider
            .prepare_order_fill_for_import(&order_fill, &stored_order(TradeSide::Buy, TradeStatus::Open))
            .await
            .unwrap();
        assert_eq!(open.closed_pnl, Decimal::ZERO);
        assert_eq!(open.direction, Some(TradeDirection::OpenLong));
    }

    #[tokio::test]
    async fn test_sell_fill_on_untouched_position_has_no_pnl() {
        let (provider, positions) = provider(CannedGateway::default());
        positions
            .upsert(
                1,
                &Position {
                    market: "BTC-USD".to_string(),
                    status: PositionStatus::Open,
                    side: PositionSide::Long,
                    size: dec!(2),
                    remaining_size: dec!(2),
                    unrealized_pnl: dec!(5),
                    realized_pnl: dec!(7),
                    value: dec!(40000),
                    created_at: ts(9, 0),
                    closed_at: None,
                },
            )
            .await;

        let data = provider
            .prepare_order_fill_for_import(&fill(dec!(1)), &stored_order(TradeSide::Sell, TradeStatus::Open))
            .await
            .unwrap();

        assert_eq!(data.closed_pnl, Decimal::ZERO);
        assert_eq!(data.direction, Some(TradeDirection::CloseLong));
    }

    #[tokio::test]
    async fn test_buy_fill_on_closed_position_has_no_pnl() {
        let (provider, positions) = provider(CannedGateway::default());
        positions.upsert(1, &closed_long(dec!(100), ts(11, 0))).await;

        let data = provider
            .prepare_order_fill_for_import(&fill(dec!(1)), &stored_order(TradeSide::Buy, TradeStatus::Filled))
            .await
            .unwrap();

        assert_eq!(data.closed_pnl, Decimal::ZERO);
        assert_eq!(data.position_side, Some(PositionSide::Long));
        assert_eq!(data.direction, Some(TradeDirection::OpenLong));
    }

    #[tokio::test]
    async fn test_order_in_closing_minute_matches_closed_position() {
        let (provider, positions) = provider(CannedGateway::default());
        positions
            .upsert(1, &closed_long(dec!(100), ts(11, 0) + TimeDelta::seconds(10)))
            .await;
        let order = stored_order_at(
            TradeSide::Sell,
            TradeStatus::Filled,
            ts(11, 0) + TimeDelta::seconds(42),
        );

        let data = provider
            .prepare_order_fill_for_import(&fill(dec!(1)), &order)
            .await
            .unwrap();

        assert_eq!(data.closed_pnl, dec!(50));
        assert_eq!(data.direction, Some(TradeDirection::CloseLong));
    }
}
