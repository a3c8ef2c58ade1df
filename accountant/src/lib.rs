//! Accountant
//!
//! Per-wallet trading ledger fed from exchange APIs (dYdX, HyperLiquid).
//!
//! # Architecture
//!
//! This crate follows Clean Architecture with clear separation of concerns:
//!
//! - **Domain**: Persisted ledger entities and their natural keys
//! - **Application**: Provider/repository ports, the import pipeline and the reports
//! - **Infrastructure**: Exchange gateways and adapters, in-memory stores, config
//! - **Presentation**: REST API and CSV export
//!
//! # Import pipeline
//!
//! Every category (positions, open orders, fills, fundings, portfolio) is
//! idempotent and can be re-run at will. Provider failures abort only the
//! category that hit them; a fill that cannot be attributed is skipped.
//!
//! # Example
//!
//! ```ignore
//! use accountant::{Accountant, AccountantConfig, ImportCategory};
//! use trading_core::TradingProviderId;
//!
//! #[tokio::main]
//! async fn main() {
//!     let accountant = Accountant::new(AccountantConfig::default());
//!     accountant.register_wallet("0xabc", TradingProviderId::Hyperliquid).await.unwrap();
//!     accountant.sync_provider(TradingProviderId::Hyperliquid).await.unwrap();
//! }
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use domain::{
    AccountingWallet, Clock, FundingPaymentRecord, OrderFillRecord, OrderRecord, PositionRecord,
    WalletPortfolio,
};

pub use application::{
    ImportError, ImportStatus, ImportSummary, RegisterWalletError, RegisterWalletResult,
    ReportError, ReportQuery,
};

// Re-export port traits for integration tests
pub use application::ports::{ProviderError, TradingProvider};

pub use infrastructure::{
    AccountantConfig, ConfigError, FixedClock, InMemoryFundingPaymentRepository,
    InMemoryOrderFillRepository, InMemoryOrderRepository, InMemoryPortfolioRepository,
    InMemoryPositionRepository, InMemoryWalletRepository, ProviderRegistry, SnapshotError,
    StoreSnapshot, SystemClock,
};

pub use presentation::{AppState, create_router};

use axum::Router;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use trading_core::{
    OrderHistory, PositionFundingHistory, TimeWindow, Timestamp, TradingProviderId,
};

use application::ports::{FundingPaymentReader, WalletReader};
use application::{
    FundingHistoryReportUseCase, ImportFundingPaymentsUseCase, ImportOpenOrdersUseCase,
    ImportOrderFillsUseCase, ImportPortfolioSnapshotUseCase, ImportPositionsUseCase,
    OrderHistoryReportUseCase, RegisterWalletUseCase,
};
use infrastructure::{DydxRestClient, HyperliquidRestClient};

/// One independently runnable step of the import pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportCategory {
    Positions,
    OpenOrders,
    OrderFills,
    FundingPayments,
    Portfolio,
}

impl ImportCategory {
    /// Order a full sync runs the categories in; fills need positions and orders first
    pub const SYNC_ORDER: [ImportCategory; 5] = [
        ImportCategory::Positions,
        ImportCategory::OpenOrders,
        ImportCategory::OrderFills,
        ImportCategory::FundingPayments,
        ImportCategory::Portfolio,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImportCategory::Positions => "positions",
            ImportCategory::OpenOrders => "open_orders",
            ImportCategory::OrderFills => "order_fills",
            ImportCategory::FundingPayments => "funding_payments",
            ImportCategory::Portfolio => "portfolio",
        }
    }
}

impl fmt::Display for ImportCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failures surfaced by [`Accountant`] operations
#[derive(Error, Debug)]
pub enum AccountantError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// Outcome of one category for one wallet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletImport {
    pub wallet_address: String,
    pub category: ImportCategory,
    pub summary: ImportSummary,
}

/// The accountant service: stores, provider adapters and the HTTP surface
pub struct Accountant<C: Clock + 'static> {
    pub config: AccountantConfig,
    pub clock: Arc<C>,
    pub wallets: Arc<InMemoryWalletRepository>,
    pub orders: Arc<InMemoryOrderRepository>,
    pub order_fills: Arc<InMemoryOrderFillRepository>,
    pub positions: Arc<InMemoryPositionRepository>,
    pub funding_payments: Arc<InMemoryFundingPaymentRepository>,
    pub portfolios: Arc<InMemoryPortfolioRepository>,
    pub providers: ProviderRegistry,
}

impl<C: Clock + 'static> Accountant<C> {
    /// Create an accountant wired to the live exchange gateways
    pub fn with_clock(config: AccountantConfig, clock: Arc<C>) -> Self {
        let store_clock: Arc<dyn Clock> = clock.clone();
        let positions = Arc::new(InMemoryPositionRepository::with_clock(Arc::clone(
            &store_clock,
        )));

        let providers = ProviderRegistry::with_defaults(
            Arc::new(DydxRestClient::new(&config.dydx)),
            Arc::new(HyperliquidRestClient::new(&config.hyperliquid)),
            positions.clone(),
        );

        Accountant {
            wallets: Arc::new(InMemoryWalletRepository::with_clock(Arc::clone(&store_clock))),
            orders: Arc::new(InMemoryOrderRepository::with_clock(Arc::clone(&store_clock))),
            order_fills: Arc::new(InMemoryOrderFillRepository::with_clock(Arc::clone(
                &store_clock,
            ))),
            positions,
            funding_payments: Arc::new(InMemoryFundingPaymentRepository::with_clock(Arc::clone(
                &store_clock,
            ))),
            portfolios: Arc::new(InMemoryPortfolioRepository::with_clock(store_clock)),
            config,
            clock,
            providers,
        }
    }

    /// Replace the provider adapters (stub gateways in tests)
    pub fn with_providers(mut self, providers: ProviderRegistry) -> Self {
        self.providers = providers;
        self
    }

    /// Restore the stores from the configured snapshot file
    pub fn load_snapshot(&self) -> Result<(), SnapshotError> {
        let Some(path) = &self.config.storage.snapshot_path else {
            return Ok(());
        };
        let snapshot = StoreSnapshot::load(path)?;
        tracing::info!(
            path = %path.display(),
            wallets = snapshot.wallets.len(),
            orders = snapshot.orders.len(),
            order_fills = snapshot.order_fills.len(),
            "Restored store snapshot"
        );
        snapshot.restore_into(
            &self.wallets,
            &self.orders,
            &self.order_fills,
            &self.positions,
            &self.funding_payments,
            &self.portfolios,
        );
        Ok(())
    }

    pub fn save_snapshot(&self) -> Result<(), SnapshotError> {
        self.app_state().persist()
    }

    pub async fn register_wallet(
        &self,
        wallet_address: &str,
        provider: TradingProviderId,
    ) -> Result<RegisterWalletResult, RegisterWalletError> {
        RegisterWalletUseCase::new(Arc::clone(&self.wallets))
            .execute(wallet_address, provider)
            .await
    }

    /// Run one import category for one wallet
    ///
    /// `from`/`to` are optional; each category derives its own window when
    /// they are absent.
    pub async fn import(
        &self,
        category: ImportCategory,
        wallet_address: &str,
        provider_id: TradingProviderId,
        from: Option<Timestamp>,
        to: Option<Timestamp>,
    ) -> Result<ImportSummary, AccountantError> {
        let provider = self.providers.create(provider_id)?;

        let summary = match category {
            ImportCategory::Positions => {
                let window = self.positions_window(from, to);
                ImportPositionsUseCase::new(
                    provider,
                    Arc::clone(&self.wallets),
                    Arc::clone(&self.positions),
                )
                .execute(wallet_address, window)
                .await?
            }
            ImportCategory::OpenOrders => {
                ImportOpenOrdersUseCase::new(
                    provider,
                    Arc::clone(&self.wallets),
                    Arc::clone(&self.orders),
                )
                .execute(wallet_address)
                .await?
            }
            ImportCategory::OrderFills => {
                ImportOrderFillsUseCase::new(
                    provider,
                    Arc::clone(&self.wallets),
                    Arc::clone(&self.orders),
                    Arc::clone(&self.order_fills),
                    self.config.import.order_fills_window(),
                )
                .execute(wallet_address, from, to)
                .await?
            }
            ImportCategory::FundingPayments => {
                let from = match (from, to) {
                    (None, None) => self.funding_seed(wallet_address, provider_id).await,
                    _ => from,
                };
                ImportFundingPaymentsUseCase::new(
                    provider,
                    Arc::clone(&self.wallets),
                    Arc::clone(&self.funding_payments),
                )
                .execute(wallet_address, from, to)
                .await?
            }
            ImportCategory::Portfolio => {
                ImportPortfolioSnapshotUseCase::new(
                    Arc::clone(&self.clock),
                    provider,
                    Arc::clone(&self.wallets),
                    Arc::clone(&self.positions),
                    Arc::clone(&self.portfolios),
                )
                .execute(wallet_address)
                .await?
            }
        };

        tracing::info!(
            wallet_address,
            provider = %provider_id,
            %category,
            status = ?summary.status,
            fetched = summary.fetched,
            created = summary.created,
            refreshed = summary.refreshed,
            deleted = summary.deleted,
            skipped = summary.skipped,
            "Import finished"
        );
        Ok(summary)
    }

    /// Run one category for every wallet registered on `provider_id`
    ///
    /// A wallet whose import fails is logged and skipped.
    pub async fn import_all(
        &self,
        category: ImportCategory,
        provider_id: TradingProviderId,
        from: Option<Timestamp>,
        to: Option<Timestamp>,
    ) -> Result<Vec<WalletImport>, AccountantError> {
        self.providers.create(provider_id)?;

        let mut results = Vec::new();
        for wallet in self.wallets.list_by_provider(provider_id).await {
            match self
                .import(category, &wallet.address, provider_id, from, to)
                .await
            {
                Ok(summary) => results.push(WalletImport {
                    wallet_address: wallet.address,
                    category,
                    summary,
                }),
                Err(e) => {
                    tracing::error!(
                        wallet_address = %wallet.address,
                        provider = %provider_id,
                        %category,
                        error = %e,
                        "Import failed for wallet"
                    );
                }
            }
        }
        Ok(results)
    }

    /// Every category, in [`ImportCategory::SYNC_ORDER`], for every wallet of a provider
    pub async fn sync_provider(
        &self,
        provider_id: TradingProviderId,
    ) -> Result<Vec<WalletImport>, AccountantError> {
        let mut results = Vec::new();
        for category in ImportCategory::SYNC_ORDER {
            results.extend(self.import_all(category, provider_id, None, None).await?);
        }
        Ok(results)
    }

    /// Sync every registered provider; one provider failing does not stop the others
    pub async fn sync_all(&self) -> Vec<WalletImport> {
        let mut results = Vec::new();
        for provider_id in self.providers.provider_ids() {
            match self.sync_provider(provider_id).await {
                Ok(imports) => results.extend(imports),
                Err(e) => {
                    tracing::error!(provider = %provider_id, error = %e, "Provider sync failed");
                }
            }
        }
        results
    }

    pub async fn order_history(&self, query: &ReportQuery) -> Result<Vec<OrderHistory>, ReportError> {
        OrderHistoryReportUseCase::new(
            Arc::clone(&self.wallets),
            Arc::clone(&self.orders),
            Arc::clone(&self.order_fills),
            Arc::clone(&self.positions),
        )
        .execute(query)
        .await
    }

    pub async fn funding_history(
        &self,
        query: &ReportQuery,
    ) -> Result<Vec<PositionFundingHistory>, ReportError> {
        FundingHistoryReportUseCase::new(
            Arc::clone(&self.wallets),
            Arc::clone(&self.funding_payments),
        )
        .execute(query)
        .await
    }

    pub fn app_state(&self) -> Arc<AppState<C>> {
        Arc::new(AppState {
            clock: Arc::clone(&self.clock),
            wallets: Arc::clone(&self.wallets),
            orders: Arc::clone(&self.orders),
            order_fills: Arc::clone(&self.order_fills),
            positions: Arc::clone(&self.positions),
            funding_payments: Arc::clone(&self.funding_payments),
            portfolios: Arc::clone(&self.portfolios),
            snapshot_path: self.config.storage.snapshot_path.clone(),
        })
    }

    /// Create the REST API router
    pub fn rest_router(&self) -> Router {
        create_router(self.app_state())
    }

    /// Run the REST API, plus the periodic sync when it is enabled
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let addr = self.config.server_addr();
        let accountant = Arc::new(self);

        if accountant.config.scheduler.enabled {
            tokio::spawn(Arc::clone(&accountant).run_scheduler());
        }

        let router = accountant.rest_router();

        tracing::info!("Accountant listening on {}", addr);

        let listener = TcpListener::bind(&addr).await?;
        axum::serve(listener, router).await?;

        Ok(())
    }

    async fn run_scheduler(self: Arc<Self>) {
        let period = self.config.scheduler.interval();
        tracing::info!(interval_secs = period.as_secs(), "Scheduled sync enabled");

        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let imports = self.sync_all().await;
            tracing::info!(imports = imports.len(), "Scheduled sync finished");
            if let Err(e) = self.save_snapshot() {
                tracing::error!(error = %e, "Failed to persist store snapshot");
            }
        }
    }

    /// Explicit bounds win; otherwise a lookback ending now
    fn positions_window(&self, from: Option<Timestamp>, to: Option<Timestamp>) -> TimeWindow {
        let lookback = self.config.import.positions_lookback();
        match (from, to) {
            (Some(from), Some(to)) => TimeWindow::new(from, to),
            (Some(from), None) => TimeWindow::new(from, self.clock.now()),
            (None, Some(to)) => TimeWindow::ending_at(to, lookback),
            (None, None) => TimeWindow::ending_at(self.clock.now(), lookback),
        }
    }

    /// Start bound for a funding import with no explicit window
    ///
    /// `None` resumes from the stored watermark; a wallet with no stored
    /// fundings yet starts one lookback ago.
    async fn funding_seed(
        &self,
        wallet_address: &str,
        provider_id: TradingProviderId,
    ) -> Option<Timestamp> {
        let wallet = self.wallets.find(wallet_address, provider_id).await?;
        match self.funding_payments.latest_funding_created_at(wallet.id).await {
            Some(_) => None,
            None => Some(self.clock.now() - self.config.import.fundings_lookback()),
        }
    }
}

impl Accountant<SystemClock> {
    /// Create an accountant on the wall clock
    pub fn new(config: AccountantConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock::new()))
    }
}
