use axum::{
    Router,
    routing::{get, post},
};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::domain::Clock;
use crate::infrastructure::{
    InMemoryFundingPaymentRepository, InMemoryOrderFillRepository, InMemoryOrderRepository,
    InMemoryPortfolioRepository, InMemoryPositionRepository, InMemoryWalletRepository,
    SnapshotError, StoreSnapshot,
};

/// Application state shared across handlers - uses concrete infrastructure types
pub struct AppState<C: Clock> {
    pub clock: Arc<C>,
    pub wallets: Arc<InMemoryWalletRepository>,
    pub orders: Arc<InMemoryOrderRepository>,
    pub order_fills: Arc<InMemoryOrderFillRepository>,
    pub positions: Arc<InMemoryPositionRepository>,
    pub funding_payments: Arc<InMemoryFundingPaymentRepository>,
    pub portfolios: Arc<InMemoryPortfolioRepository>,
    pub snapshot_path: Option<PathBuf>,
}

impl<C: Clock> AppState<C> {
    /// Write the stores to the snapshot file, if one is configured
    pub fn persist(&self) -> Result<(), SnapshotError> {
        let Some(path) = &self.snapshot_path else {
            return Ok(());
        };
        StoreSnapshot::capture(
            &self.wallets,
            &self.orders,
            &self.order_fills,
            &self.positions,
            &self.funding_payments,
            &self.portfolios,
        )
        .save(path)
    }
}

/// Create the REST API router
pub fn create_router<C: Clock + 'static>(state: Arc<AppState<C>>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::<C>))
        // Wallet management
        .route(
            "/management/wallet-address",
            post(handlers::register_wallet::<C>),
        )
        // Report exports
        .route(
            "/accountant/trades/export",
            get(handlers::export_trades::<C>),
        )
        .route(
            "/accountant/fundings/export",
            get(handlers::export_fundings::<C>),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
