pub mod ports;
pub mod use_cases;

pub use ports::{
    DydxGateway, FundingPaymentRepository, GatewayError, HyperliquidGateway, OrderFillRepository,
    OrderRepository, PortfolioRepository, PositionRepository, ProviderError, TradingProvider,
    WalletRepository,
};
pub use use_cases::{
    // Reports
    FundingHistoryReportUseCase,
    // Import pipeline
    ImportError,
    ImportFundingPaymentsUseCase,
    ImportOpenOrdersUseCase,
    ImportOrderFillsUseCase,
    ImportPortfolioSnapshotUseCase,
    ImportPositionsUseCase,
    ImportStatus,
    ImportSummary,
    OrderHistoryReportUseCase,
    // Wallet management
    RegisterWalletError,
    RegisterWalletResult,
    RegisterWalletUseCase,
    ReportError,
    ReportQuery,
};
