//! Integration tests for the import pipeline
//!
//! Drives every import category through [`Accountant`] against in-memory
//! stores, with stub providers and a stub dYdX gateway standing in for the
//! exchanges.

use accountant::{
    Accountant, AccountantConfig, AccountantError, FixedClock, ImportCategory, ImportError,
    ImportStatus, ProviderError, ProviderRegistry, TradingProvider,
    application::ports::{
        DydxGateway, FundingPaymentReader, GatewayError, OrderFillReader, OrderReader,
        OrderWriter, PortfolioReader, PositionReader, PositionWriter,
    },
    domain::OrderRecord,
    infrastructure::DydxProvider,
};
use async_trait::async_trait;
use chrono::{TimeDelta, TimeZone, Utc};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use trading_core::{
    Order, OrderFill, OrderFillImportData, Position, PositionFunding, PositionSide, PositionStatus,
    TimeWindow, Timestamp, TradeDirection, TradeSide, TradeStatus, TradeType, TradingProviderId,
    WalletAccount,
};

const WALLET: &str = "0x5f5a9d3c2b1e0f7a8d6c4b2a0e9f8d7c6b5a4e3d";

// ============================================================================
// Test Fixtures
// ============================================================================

fn ts(h: u32, m: u32) -> Timestamp {
    Utc.with_ymd_and_hms(2024, 3, 1, h, m, 0).unwrap()
}

fn order(order_id: &str, side: TradeSide, status: TradeStatus, created_at: Timestamp) -> Order {
    Order {
        order_id: order_id.to_string(),
        market: "BTC-USD".to_string(),
        trade_type: TradeType::Limit,
        side,
        status,
        remaining_size: dec!(0),
        original_size: dec!(1),
        created_at,
    }
}

fn fill(order_id: &str, hash: &str, size: Decimal, at: Timestamp) -> OrderFill {
    OrderFill {
        order_id: order_id.to_string(),
        market: "BTC-USD".to_string(),
        side: TradeSide::Buy,
        direction: Some(TradeDirection::OpenLong),
        price: dec!(64000),
        size,
        fee: dec!(0.8),
        closed_pnl: Some(Decimal::ZERO),
        hash: Some(hash.to_string()),
        created_at: at,
    }
}

fn open_position(market: &str, value: Decimal, created_at: Timestamp) -> Position {
    Position {
        market: market.to_string(),
        status: PositionStatus::Open,
        side: PositionSide::Long,
        size: dec!(1),
        remaining_size: dec!(1),
        unrealized_pnl: dec!(10),
        realized_pnl: dec!(0),
        value,
        created_at,
        closed_at: None,
    }
}

fn funding(hash: &str, payment: Decimal, at: Timestamp) -> PositionFunding {
    PositionFunding {
        market: "ETH-USD".to_string(),
        payment,
        funding_rate: dec!(0.0000125),
        position_size: dec!(2),
        hash: Some(hash.to_string()),
        created_at: at,
    }
}

/// Provider returning canned canonical messages and counting fetches
#[derive(Default)]
struct StubProvider {
    orders: Mutex<HashMap<String, Order>>,
    open_order_ids: Vec<String>,
    fills: Vec<OrderFill>,
    positions: Vec<Position>,
    fundings: Vec<PositionFunding>,
    equity: Decimal,
    fail: bool,
    fill_fetches: AtomicUsize,
    funding_fetches: AtomicUsize,
}

impl StubProvider {
    fn with_orders(orders: Vec<Order>) -> Self {
        StubProvider {
            orders: Mutex::new(
                orders
                    .into_iter()
                    .map(|order| (order.order_id.clone(), order))
                    .collect(),
            ),
            ..Default::default()
        }
    }

    fn check(&self) -> Result<(), ProviderError> {
        if self.fail {
            return Err(ProviderError::ProviderApi("exchange unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl TradingProvider for StubProvider {
    fn provider(&self) -> TradingProviderId {
        TradingProviderId::Hyperliquid
    }

    fn order_open_statuses(&self) -> &'static [TradeStatus] {
        &[TradeStatus::Open]
    }

    async fn get_order_fills(&self, _: &str, window: TimeWindow) -> Result<Vec<OrderFill>, ProviderError> {
        self.fill_fetches.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self
            .fills
            .iter()
            .filter(|fill| window.contains(fill.created_at))
            .cloned()
            .collect())
    }

    async fn get_order(&self, _: &str, order_id: &str) -> Result<Order, ProviderError> {
        self.check()?;
        self.orders
            .lock()
            .get(order_id)
            .cloned()
            .ok_or_else(|| ProviderError::ProviderApi(format!("order {} not found", order_id)))
    }

    async fn get_open_order_ids(&self, _: &str) -> Result<Vec<String>, ProviderError> {
        self.check()?;
        Ok(self.open_order_ids.clone())
    }

    async fn get_positions(&self, _: &str, _: TimeWindow) -> Result<Vec<Position>, ProviderError> {
        self.check()?;
        Ok(self.positions.clone())
    }

    async fn get_position_fundings(
        &self,
        _: &str,
        from: Timestamp,
        _: Option<Timestamp>,
    ) -> Result<Vec<PositionFunding>, ProviderError> {
        self.funding_fetches.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self
            .fundings
            .iter()
            .filter(|funding| funding.created_at >= from)
            .cloned()
            .collect())
    }

    async fn prepare_order_fill_for_import(
        &self,
        order_fill: &OrderFill,
        _: &OrderRecord,
    ) -> Result<OrderFillImportData, ProviderError> {
        Ok(OrderFillImportData {
            order_id: order_fill.order_id.clone(),
            market: order_fill.market.clone(),
            side: order_fill.side,
            position_side: order_fill.direction.map(|d| d.position_side()),
            direction: order_fill.direction,
            price: order_fill.price,
            size: order_fill.size,
            fee: order_fill.fee,
            closed_pnl: order_fill.closed_pnl.unwrap_or_default(),
            hash: order_fill.hash.clone(),
            created_at: order_fill.created_at,
        })
    }

    async fn get_account_portfolio(&self, _: &str) -> Result<WalletAccount, ProviderError> {
        self.check()?;
        Ok(WalletAccount {
            equity_value: self.equity,
        })
    }
}

async fn accountant_with(provider: Arc<dyn TradingProvider>) -> Accountant<FixedClock> {
    let clock = Arc::new(FixedClock::new(ts(12, 0)));
    let mut registry = ProviderRegistry::new();
    registry.register(provider);

    let accountant =
        Accountant::with_clock(AccountantConfig::default(), clock).with_providers(registry);
    accountant
        .register_wallet(WALLET, TradingProviderId::Hyperliquid)
        .await
        .unwrap();
    accountant
}

async fn wallet_id(accountant: &Accountant<FixedClock>, provider: TradingProviderId) -> u64 {
    use accountant::application::ports::WalletReader;
    accountant.wallets.find(WALLET, provider).await.unwrap().id
}

// ============================================================================
// Order fills
// ============================================================================

#[tokio::test]
async fn test_reimporting_same_fills_creates_no_new_rows() {
    let mut stub = StubProvider::with_orders(vec![order(
        "1001",
        TradeSide::Buy,
        TradeStatus::Filled,
        ts(9, 59),
    )]);
    stub.fills = vec![
        fill("1001", "0xaa", dec!(0.4), ts(10, 0)),
        fill("1001", "0xbb", dec!(0.6), ts(10, 1)),
    ];
    let accountant = accountant_with(Arc::new(stub)).await;
    let id = wallet_id(&accountant, TradingProviderId::Hyperliquid).await;

    let first = accountant
        .import(
            ImportCategory::OrderFills,
            WALLET,
            TradingProviderId::Hyperliquid,
            Some(ts(0, 0)),
            Some(ts(23, 0)),
        )
        .await
        .unwrap();
    let second = accountant
        .import(
            ImportCategory::OrderFills,
            WALLET,
            TradingProviderId::Hyperliquid,
            Some(ts(0, 0)),
            Some(ts(23, 0)),
        )
        .await
        .unwrap();

    assert_eq!(first.created, 2);
    assert_eq!(second.fetched, 2);
    assert_eq!(second.created, 0);
    assert_eq!(accountant.order_fills.count_by_wallet(id).await, 2);
    assert_eq!(accountant.orders.list_by_wallet(id).await.len(), 1);
}

#[tokio::test]
async fn test_fill_sync_without_anchor_is_noop() {
    let stub = Arc::new(StubProvider::default());
    let accountant = accountant_with(stub.clone()).await;
    let id = wallet_id(&accountant, TradingProviderId::Hyperliquid).await;

    let summary = accountant
        .import(ImportCategory::OrderFills, WALLET, TradingProviderId::Hyperliquid, None, None)
        .await
        .unwrap();

    assert_eq!(summary.status, ImportStatus::NoOp);
    assert_eq!(stub.fill_fetches.load(Ordering::SeqCst), 0);
    assert_eq!(accountant.order_fills.count_by_wallet(id).await, 0);
}

#[tokio::test]
async fn test_fill_sync_with_one_bound_is_noop() {
    let mut stub = StubProvider::with_orders(vec![order(
        "o-1",
        TradeSide::Buy,
        TradeStatus::Filled,
        ts(9, 0),
    )]);
    stub.fills = vec![fill("o-1", "0xf1", dec!(1), ts(9, 5))];
    let stub = Arc::new(stub);
    let accountant = accountant_with(stub.clone()).await;
    let id = wallet_id(&accountant, TradingProviderId::Hyperliquid).await;

    for (from, to) in [(Some(ts(0, 0)), None), (None, Some(ts(12, 0)))] {
        let summary = accountant
            .import(ImportCategory::OrderFills, WALLET, TradingProviderId::Hyperliquid, from, to)
            .await
            .unwrap();
        assert_eq!(summary.status, ImportStatus::NoOp);
    }

    assert_eq!(stub.fill_fetches.load(Ordering::SeqCst), 0);
    assert_eq!(accountant.order_fills.count_by_wallet(id).await, 0);
    assert!(accountant.orders.list_by_wallet(id).await.is_empty());
}

#[tokio::test]
async fn test_fill_sync_resumes_from_latest_stored_fill() {
    let mut stub = StubProvider::with_orders(vec![order(
        "1001",
        TradeSide::Buy,
        TradeStatus::Filled,
        ts(9, 59),
    )]);
    stub.fills = vec![
        fill("1001", "0xaa", dec!(0.4), ts(10, 0)),
        fill("1001", "0xbb", dec!(0.6), ts(11, 0)),
    ];
    let stub = Arc::new(stub);
    let accountant = accountant_with(stub.clone()).await;
    let id = wallet_id(&accountant, TradingProviderId::Hyperliquid).await;

    accountant
        .import(
            ImportCategory::OrderFills,
            WALLET,
            TradingProviderId::Hyperliquid,
            Some(ts(9, 0)),
            Some(ts(10, 30)),
        )
        .await
        .unwrap();
    let resumed = accountant
        .import(ImportCategory::OrderFills, WALLET, TradingProviderId::Hyperliquid, None, None)
        .await
        .unwrap();

    assert_eq!(stub.fill_fetches.load(Ordering::SeqCst), 2);
    assert_eq!(resumed.created, 1);
    assert_eq!(accountant.order_fills.count_by_wallet(id).await, 2);
}

#[tokio::test]
async fn test_provider_failure_aborts_only_the_category() {
    let stub = StubProvider {
        fail: true,
        ..Default::default()
    };
    let accountant = accountant_with(Arc::new(stub)).await;

    let summary = accountant
        .import(
            ImportCategory::OrderFills,
            WALLET,
            TradingProviderId::Hyperliquid,
            Some(ts(0, 0)),
            Some(ts(23, 0)),
        )
        .await
        .unwrap();

    assert_eq!(summary.status, ImportStatus::Aborted);
}

#[tokio::test]
async fn test_fill_for_unknown_order_is_skipped() {
    let mut stub = StubProvider::with_orders(vec![order(
        "1001",
        TradeSide::Buy,
        TradeStatus::Filled,
        ts(9, 59),
    )]);
    stub.fills = vec![
        fill("9999", "0xaa", dec!(0.4), ts(10, 0)),
        fill("1001", "0xbb", dec!(0.6), ts(10, 1)),
    ];
    let accountant = accountant_with(Arc::new(stub)).await;

    let summary = accountant
        .import(
            ImportCategory::OrderFills,
            WALLET,
            TradingProviderId::Hyperliquid,
            Some(ts(0, 0)),
            Some(ts(23, 0)),
        )
        .await
        .unwrap();

    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.created, 1);
}

// ============================================================================
// Partial-close PnL through the dYdX adapter
// ============================================================================

struct TwoTrancheGateway;

#[async_trait]
impl DydxGateway for TwoTrancheGateway {
    async fn fetch_order_fills(&self, _: &str) -> Result<Vec<Value>, GatewayError> {
        let tranche = |id: &str, at: &str| {
            json!({
                "id": id, "side": "SELL", "liquidity": "TAKER", "type": "LIMIT",
                "market": "BTC-USD", "price": "64000", "size": "1", "fee": "0.5",
                "createdAt": at, "orderId": "o-1"
            })
        };
        Ok(vec![
            tranche("f-2", "2024-03-01T10:02:00.000Z"),
            tranche("f-1", "2024-03-01T10:01:00.000Z"),
        ])
    }

    async fn fetch_open_orders(&self, _: &str) -> Result<Vec<Value>, GatewayError> {
        Ok(Vec::new())
    }

    async fn fetch_order(&self, _: &str, order_id: &str) -> Result<Value, GatewayError> {
        Ok(json!({
            "id": order_id, "market": "BTC-USD", "side": "SELL", "size": "2",
            "remainingSize": "0", "type": "LIMIT",
            "createdAt": "2024-03-01T10:00:30.000Z", "status": "FILLED"
        }))
    }

    async fn fetch_positions(&self, _: &str) -> Result<Vec<Value>, GatewayError> {
        Ok(Vec::new())
    }

    async fn fetch_funding_payments(&self, _: &str, _: Option<Timestamp>) -> Result<Vec<Value>, GatewayError> {
        Ok(Vec::new())
    }

    async fn fetch_account(&self, _: &str) -> Result<Value, GatewayError> {
        Ok(json!({"equity": "0"}))
    }

    async fn fetch_markets(&self, _: &str, market: &str) -> Result<Value, GatewayError> {
        Ok(json!({ market: {"oraclePrice": "64000"} }))
    }
}

#[tokio::test]
async fn test_sell_order_filled_in_two_tranches_splits_realized_pnl() {
    let clock = Arc::new(FixedClock::new(ts(12, 0)));
    let accountant = Accountant::with_clock(AccountantConfig::default(), clock);
    let mut registry = ProviderRegistry::new();
    registry.register(Arc::new(DydxProvider::new(
        Arc::new(TwoTrancheGateway),
        accountant.positions.clone(),
    )));
    let accountant = accountant.with_providers(registry);

    accountant
        .register_wallet(WALLET, TradingProviderId::Dydx)
        .await
        .unwrap();
    let id = wallet_id(&accountant, TradingProviderId::Dydx).await;

    accountant
        .positions
        .upsert(
            id,
            &Position {
                market: "BTC-USD".to_string(),
                status: PositionStatus::Closed,
                side: PositionSide::Long,
                size: dec!(2),
                remaining_size: dec!(0),
                unrealized_pnl: dec!(0),
                realized_pnl: dec!(100),
                value: dec!(0),
                created_at: ts(9, 0),
                closed_at: Some(ts(11, 0)),
            },
        )
        .await;

    let summary = accountant
        .import(
            ImportCategory::OrderFills,
            WALLET,
            TradingProviderId::Dydx,
            Some(ts(0, 0)),
            Some(ts(23, 0)),
        )
        .await
        .unwrap();
    assert_eq!(summary.created, 2);

    let fills = accountant.order_fills.list_by_wallet(id).await;
    assert_eq!(fills.len(), 2);
    for fill in &fills {
        assert_eq!(fill.closed_pnl, dec!(50));
        assert_eq!(fill.direction, Some(TradeDirection::CloseLong));
        assert_eq!(fill.position_side, Some(PositionSide::Long));
    }
}

// ============================================================================
// Positions
// ============================================================================

#[tokio::test]
async fn test_empty_position_listing_deletes_open_positions() {
    let accountant = accountant_with(Arc::new(StubProvider::default())).await;
    let id = wallet_id(&accountant, TradingProviderId::Hyperliquid).await;

    accountant
        .positions
        .upsert(id, &open_position("BTC-USD", dec!(64000), ts(8, 0)))
        .await;
    accountant
        .positions
        .upsert(id, &open_position("ETH-USD", dec!(3500), ts(8, 30)))
        .await;

    let summary = accountant
        .import(ImportCategory::Positions, WALLET, TradingProviderId::Hyperliquid, None, None)
        .await
        .unwrap();

    assert_eq!(summary.deleted, 2);
    let remaining = accountant.positions.list_by_wallet(id).await;
    assert!(remaining.iter().all(|position| !position.is_open()));
}

#[tokio::test]
async fn test_position_reimport_overwrites_in_place() {
    let mut stub = StubProvider::default();
    stub.positions = vec![open_position("BTC-USD", dec!(64000), ts(8, 0))];
    let accountant = accountant_with(Arc::new(stub)).await;
    let id = wallet_id(&accountant, TradingProviderId::Hyperliquid).await;

    let mut stale = open_position("BTC-USD", dec!(60000), ts(8, 0));
    stale.unrealized_pnl = dec!(-40);
    accountant.positions.upsert(id, &stale).await;

    let summary = accountant
        .import(ImportCategory::Positions, WALLET, TradingProviderId::Hyperliquid, None, None)
        .await
        .unwrap();

    assert_eq!(summary.refreshed, 1);
    let positions = accountant.positions.list_by_wallet(id).await;
    assert_eq!(positions.len(), 1);
    assert_eq!(positions[0].value, dec!(64000));
    assert_eq!(positions[0].unrealized_pnl, dec!(10));
}

// ============================================================================
// Open orders
// ============================================================================

#[tokio::test]
async fn test_stale_open_order_is_rechecked() {
    let stub = StubProvider {
        open_order_ids: vec!["1001".to_string()],
        ..StubProvider::with_orders(vec![
            order("1001", TradeSide::Buy, TradeStatus::Open, ts(9, 0)),
            order("1002", TradeSide::Sell, TradeStatus::Cancelled, ts(8, 0)),
        ])
    };
    let accountant = accountant_with(Arc::new(stub)).await;
    let id = wallet_id(&accountant, TradingProviderId::Hyperliquid).await;

    // Stored while still open; the exchange no longer lists it
    accountant
        .orders
        .insert(id, &order("1002", TradeSide::Sell, TradeStatus::Open, ts(8, 0)))
        .await;

    let summary = accountant
        .import(ImportCategory::OpenOrders, WALLET, TradingProviderId::Hyperliquid, None, None)
        .await
        .unwrap();

    assert_eq!(summary.created, 1);
    assert_eq!(summary.refreshed, 1);
    let stale = accountant.orders.find_by_order_id("1002").await.unwrap();
    assert_eq!(stale.status, TradeStatus::Cancelled);
    let fresh = accountant.orders.find_by_order_id("1001").await.unwrap();
    assert_eq!(fresh.status, TradeStatus::Open);
}

// ============================================================================
// Fundings and portfolio
// ============================================================================

#[tokio::test]
async fn test_funding_import_is_append_only() {
    let mut stub = StubProvider::default();
    stub.fundings = vec![
        funding("0x01", dec!(-0.42), ts(8, 0)),
        funding("0x02", dec!(-0.40), ts(9, 0)),
    ];
    let accountant = accountant_with(Arc::new(stub)).await;
    let id = wallet_id(&accountant, TradingProviderId::Hyperliquid).await;

    let first = accountant
        .import(
            ImportCategory::FundingPayments,
            WALLET,
            TradingProviderId::Hyperliquid,
            Some(ts(0, 0)),
            None,
        )
        .await
        .unwrap();
    let second = accountant
        .import(ImportCategory::FundingPayments, WALLET, TradingProviderId::Hyperliquid, None, None)
        .await
        .unwrap();

    assert_eq!(first.created, 2);
    assert_eq!(second.created, 0);
    assert_eq!(accountant.funding_payments.list_by_wallet(id).await.len(), 2);
}

#[tokio::test]
async fn test_funding_sync_with_only_end_bound_is_noop() {
    let mut stub = StubProvider::default();
    stub.fundings = vec![funding("0x01", dec!(-0.42), ts(8, 0))];
    let stub = Arc::new(stub);
    let accountant = accountant_with(stub.clone()).await;
    let id = wallet_id(&accountant, TradingProviderId::Hyperliquid).await;

    let summary = accountant
        .import(
            ImportCategory::FundingPayments,
            WALLET,
            TradingProviderId::Hyperliquid,
            None,
            Some(ts(12, 0)),
        )
        .await
        .unwrap();

    assert_eq!(summary.status, ImportStatus::NoOp);
    assert_eq!(stub.funding_fetches.load(Ordering::SeqCst), 0);
    assert!(accountant.funding_payments.list_by_wallet(id).await.is_empty());
}

#[tokio::test]
async fn test_first_funding_sync_starts_one_lookback_ago() {
    let mut stub = StubProvider::default();
    stub.fundings = vec![
        // Older than the default one-day lookback from 12:00
        funding("0x00", dec!(-0.5), ts(0, 0) - TimeDelta::days(2)),
        funding("0x01", dec!(-0.42), ts(8, 0)),
    ];
    let accountant = accountant_with(Arc::new(stub)).await;
    let id = wallet_id(&accountant, TradingProviderId::Hyperliquid).await;

    let summary = accountant
        .import(ImportCategory::FundingPayments, WALLET, TradingProviderId::Hyperliquid, None, None)
        .await
        .unwrap();

    assert_eq!(summary.created, 1);
    assert_eq!(accountant.funding_payments.list_by_wallet(id).await.len(), 1);
}

#[tokio::test]
async fn test_portfolio_snapshot_is_one_row_per_day() {
    let mut stub = StubProvider::default();
    stub.equity = dec!(2500);
    let accountant = accountant_with(Arc::new(stub)).await;
    let id = wallet_id(&accountant, TradingProviderId::Hyperliquid).await;

    accountant
        .positions
        .upsert(id, &open_position("BTC-USD", dec!(640), ts(8, 0)))
        .await;
    accountant
        .positions
        .upsert(id, &open_position("ETH-USD", dec!(35), ts(8, 30)))
        .await;

    let first = accountant
        .import(ImportCategory::Portfolio, WALLET, TradingProviderId::Hyperliquid, None, None)
        .await
        .unwrap();
    let second = accountant
        .import(ImportCategory::Portfolio, WALLET, TradingProviderId::Hyperliquid, None, None)
        .await
        .unwrap();

    assert_eq!(first.created, 1);
    assert_eq!(second.refreshed, 1);
    let snapshot = accountant
        .portfolios
        .find(id, ts(12, 0).date_naive())
        .await
        .unwrap();
    assert_eq!(snapshot.equity_value, dec!(2500));
    assert_eq!(snapshot.portfolio_value, dec!(675));
}

// ============================================================================
// Wallet and provider preconditions
// ============================================================================

#[tokio::test]
async fn test_unregistered_wallet_is_reported_to_the_caller() {
    let accountant = accountant_with(Arc::new(StubProvider::default())).await;

    let result = accountant
        .import(ImportCategory::OpenOrders, "0xunknown", TradingProviderId::Hyperliquid, None, None)
        .await;

    assert!(matches!(
        result,
        Err(AccountantError::Import(ImportError::AccountingWalletNotFound { .. }))
    ));
}

#[tokio::test]
async fn test_unregistered_provider_is_not_supported() {
    let accountant = accountant_with(Arc::new(StubProvider::default())).await;

    let result = accountant
        .import_all(ImportCategory::Positions, TradingProviderId::Dydx, None, None)
        .await;

    assert!(matches!(
        result,
        Err(AccountantError::Provider(ProviderError::ProviderNotSupported(_)))
    ));
}

#[tokio::test]
async fn test_sync_runs_every_category_for_each_wallet() {
    let mut stub = StubProvider::default();
    stub.equity = dec!(100);
    let accountant = accountant_with(Arc::new(stub)).await;

    let imports = accountant
        .sync_provider(TradingProviderId::Hyperliquid)
        .await
        .unwrap();

    let categories: Vec<ImportCategory> = imports.iter().map(|import| import.category).collect();
    assert_eq!(categories, ImportCategory::SYNC_ORDER.to_vec());
}
