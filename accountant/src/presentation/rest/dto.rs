use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use trading_core::{Timestamp, TradingProviderId};

use crate::application::ReportQuery;

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterWalletRequest {
    pub address: String,
    pub provider: TradingProviderId,
}

/// Query string of both export endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct ExportQuery {
    pub wallet_address: String,
    pub provider: TradingProviderId,
    /// `YYYY-MM-DD`, read as midnight UTC
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
}

impl ExportQuery {
    pub fn report_query(&self) -> ReportQuery {
        ReportQuery::new(
            self.wallet_address.clone(),
            self.provider,
            Some(midnight(self.from_date)),
            Some(midnight(self.to_date)),
        )
    }
}

pub fn midnight(date: NaiveDate) -> Timestamp {
    date.and_time(NaiveTime::MIN).and_utc()
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub server_time: i64,
}

/// `{"data": {"attributes": ...}}` envelope
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: Attributes<T>,
}

#[derive(Debug, Serialize)]
pub struct Attributes<T: Serialize> {
    pub attributes: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(attributes: T) -> Self {
        DataResponse {
            data: Attributes { attributes },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorTitle,
}

#[derive(Debug, Serialize)]
pub struct ErrorTitle {
    pub title: String,
}

impl ErrorResponse {
    pub fn new(title: impl Into<String>) -> Self {
        ErrorResponse {
            error: ErrorTitle {
                title: title.into(),
            },
        }
    }
}
