use chrono::TimeDelta;
use std::sync::Arc;
use trading_core::{OrderFill, TimeWindow, Timestamp};

use crate::application::ports::{
    OrderFillRepository, OrderRepository, ProviderError, TradingProvider, WalletReader,
};
use crate::domain::AccountingWallet;

use super::import_outcome::{ImportError, ImportSummary, require_wallet};
use super::order_upsert::import_order;

/// Import the fills of a time window
///
/// With no bounds the window starts at the newest stored fill and spans
/// `window_length`. A wallet without any stored fill has no anchor and the
/// import does nothing. Giving only one bound is also a no-op.
pub struct ImportOrderFillsUseCase<W, O, F>
where
    W: WalletReader,
    O: OrderRepository,
    F: OrderFillRepository,
{
    provider: Arc<dyn TradingProvider>,
    wallets: Arc<W>,
    orders: Arc<O>,
    fills: Arc<F>,
    window_length: TimeDelta,
}

impl<W, O, F> ImportOrderFillsUseCase<W, O, F>
where
    W: WalletReader,
    O: OrderRepository,
    F: OrderFillRepository,
{
    pub fn new(
        provider: Arc<dyn TradingProvider>,
        wallets: Arc<W>,
        orders: Arc<O>,
        fills: Arc<F>,
        window_length: TimeDelta,
    ) -> Self {
        Self {
            provider,
            wallets,
            orders,
            fills,
            window_length,
        }
    }

    pub async fn execute(
        &self,
        wallet_address: &str,
        from: Option<Timestamp>,
        to: Option<Timestamp>,
    ) -> Result<ImportSummary, ImportError> {
        let provider = self.provider.provider();
        let wallet = require_wallet(self.wallets.as_ref(), wallet_address, provider).await?;

        let window = match (from, to) {
            (Some(from), Some(to)) => TimeWindow::new(from, to),
            (None, None) => match self.fills.latest_fill_timestamp(wallet.id).await {
                Some(anchor) => TimeWindow::starting_at(anchor, self.window_length),
                None => {
                    tracing::info!(
                        wallet_id = wallet.id,
                        wallet_address,
                        "No stored order fills to anchor the import window, set a date range"
                    );
                    return Ok(ImportSummary::no_op());
                }
            },
            _ => {
                tracing::info!(
                    wallet_id = wallet.id,
                    "Either both window bounds have to be given or neither"
                );
                return Ok(ImportSummary::no_op());
            }
        };

        tracing::info!(wallet_id = wallet.id, %provider, %window, "Started importing order fills");

        let order_fills = match self.provider.get_order_fills(&wallet.address, window).await {
            Ok(fills) => fills,
            Err(e) => {
                tracing::error!(wallet_id = wallet.id, %window, error = %e, "Unable to fetch order fills");
                return Ok(ImportSummary::aborted());
            }
        };

        let mut summary = ImportSummary::fetched(order_fills.len());
        for order_fill in &order_fills {
            match self.import_fill(&wallet, order_fill).await {
                Ok(true) => summary.created += 1,
                Ok(false) => {
                    tracing::debug!(order_id = %order_fill.order_id, "Order fill already exists");
                }
                Err(e) => {
                    tracing::warn!(
                        order_id = %order_fill.order_id,
                        fill = ?order_fill,
                        error = %e,
                        "Unable to import order fill, continuing"
                    );
                    summary.skipped += 1;
                }
            }
        }

        tracing::info!(wallet_id = wallet.id, %window, ?summary, "Finished importing order fills");
        Ok(summary)
    }

    async fn import_fill(
        &self,
        wallet: &AccountingWallet,
        order_fill: &OrderFill,
    ) -> Result<bool, ProviderError> {
        let (order, _) = import_order(
            self.provider.as_ref(),
            self.orders.as_ref(),
            wallet,
            &order_fill.order_id,
        )
        .await?;

        let data = self
            .provider
            .prepare_order_fill_for_import(order_fill, &order)
            .await?;

        let (_, created) = self.fills.get_or_create(wallet.id, Some(order.id), &data).await;
        Ok(created)
    }
}
