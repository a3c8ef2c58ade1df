use async_trait::async_trait;
use thiserror::Error;
use trading_core::{
    Order, OrderFill, OrderFillImportData, Position, PositionFunding, TimeWindow, Timestamp,
    TradeStatus, TradingProviderId, WalletAccount,
};

use crate::domain::OrderRecord;

use super::GatewayError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// Transport or response-code failure reported by the gateway
    #[error("Provider API error: {0}")]
    ProviderApi(String),
    /// Well-formed response whose shape or vocabulary is not the expected one
    #[error("Data validation error: {0}")]
    DataValidation(String),
    #[error("Provider not supported: {0}")]
    ProviderNotSupported(String),
    #[error("Position not found: {0}")]
    PositionNotFound(String),
}

impl From<GatewayError> for ProviderError {
    fn from(err: GatewayError) -> Self {
        ProviderError::ProviderApi(err.to_string())
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::DataValidation(err.to_string())
    }
}

/// Capability set every exchange integration implements
///
/// Implementations translate exchange payloads into canonical messages and
/// never leak gateway errors: transport failures surface as
/// [`ProviderError::ProviderApi`], payloads that do not match the exchange
/// schema as [`ProviderError::DataValidation`].
#[async_trait]
pub trait TradingProvider: Send + Sync {
    fn provider(&self) -> TradingProviderId;

    /// Order statuses this exchange reports for orders that may still change
    fn order_open_statuses(&self) -> &'static [TradeStatus];

    async fn get_order_fills(
        &self,
        wallet_address: &str,
        window: TimeWindow,
    ) -> Result<Vec<OrderFill>, ProviderError>;

    async fn get_order(&self, wallet_address: &str, order_id: &str) -> Result<Order, ProviderError>;

    async fn get_open_order_ids(&self, wallet_address: &str) -> Result<Vec<String>, ProviderError>;

    async fn get_positions(
        &self,
        wallet_address: &str,
        window: TimeWindow,
    ) -> Result<Vec<Position>, ProviderError>;

    async fn get_position_fundings(
        &self,
        wallet_address: &str,
        from: Timestamp,
        to: Option<Timestamp>,
    ) -> Result<Vec<PositionFunding>, ProviderError>;

    /// Resolve a fill against the position it traded into
    ///
    /// Fails with [`ProviderError::PositionNotFound`] when the fill cannot be
    /// attributed to any stored position.
    async fn prepare_order_fill_for_import(
        &self,
        order_fill: &OrderFill,
        order: &OrderRecord,
    ) -> Result<OrderFillImportData, ProviderError>;

    async fn get_account_portfolio(&self, wallet_address: &str) -> Result<WalletAccount, ProviderError>;
}
