mod funding_payment_repository;
mod gateways;
mod order_fill_repository;
mod order_repository;
mod portfolio_repository;
mod position_repository;
mod trading_provider;
mod wallet_repository;

pub use funding_payment_repository::{
    FundingPaymentReader, FundingPaymentRepository, FundingPaymentWriter,
};
pub use gateways::{DydxGateway, GatewayError, HyperliquidGateway};
pub use order_fill_repository::{OrderFillReader, OrderFillRepository, OrderFillWriter};
pub use order_repository::{OrderReader, OrderRepository, OrderWriter};
pub use portfolio_repository::{PortfolioReader, PortfolioRepository, PortfolioWriter};
pub use position_repository::{PositionReader, PositionRepository, PositionWriter};
pub use trading_provider::{ProviderError, TradingProvider};
pub use wallet_repository::{WalletReader, WalletRepository, WalletWriter};
