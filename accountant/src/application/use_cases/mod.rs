mod funding_history_report;
mod import_funding_payments;
mod import_open_orders;
mod import_order_fills;
mod import_outcome;
mod import_portfolio_snapshot;
mod import_positions;
mod order_history_report;
mod order_upsert;
mod register_wallet;
mod report_query;

pub use funding_history_report::FundingHistoryReportUseCase;
pub use import_funding_payments::ImportFundingPaymentsUseCase;
pub use import_open_orders::ImportOpenOrdersUseCase;
pub use import_order_fills::ImportOrderFillsUseCase;
pub use import_outcome::{ImportError, ImportStatus, ImportSummary};
pub use import_portfolio_snapshot::ImportPortfolioSnapshotUseCase;
pub use import_positions::ImportPositionsUseCase;
pub use order_history_report::OrderHistoryReportUseCase;
pub use register_wallet::{RegisterWalletError, RegisterWalletResult, RegisterWalletUseCase};
pub use report_query::{ReportError, ReportQuery};
