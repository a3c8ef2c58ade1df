//! Canonical messages produced by every provider adapter
//!
//! Adapters translate exchange payloads into these types; the import pipeline
//! and the reports only ever see this vocabulary.

mod history;
mod order;
mod position;

pub use history::{OrderHistory, PositionFundingHistory};
pub use order::{Order, OrderFill, OrderFillImportData};
pub use position::{Position, PositionFunding, WalletAccount};
