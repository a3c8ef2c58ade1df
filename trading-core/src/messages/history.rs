use rust_decimal::Decimal;
use serde::Serialize;

use crate::value_objects::{Timestamp, TradeSide, TradeStatus, TradeType, TradingProviderId};

/// One row of the order history report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderHistory {
    pub wallet_address: String,
    pub provider_name: TradingProviderId,
    pub market: String,
    pub order_id: String,
    pub trade_side: TradeSide,
    pub trade_type: TradeType,
    pub trade_status: TradeStatus,
    pub price: Decimal,
    pub size: Decimal,
    pub fee: Decimal,
    pub pnl: Decimal,
    pub created_at: Timestamp,
}

impl OrderHistory {
    pub const HEADERS: [&'static str; 12] = [
        "wallet_address",
        "provider_name",
        "market",
        "order_id",
        "trade_side",
        "trade_type",
        "trade_status",
        "price",
        "size",
        "fee",
        "pnl",
        "created_at",
    ];

    /// Flatten into a tabular record, column order matching [`Self::HEADERS`]
    pub fn to_record(&self) -> Vec<String> {
        vec![
            self.wallet_address.clone(),
            self.provider_name.to_string(),
            self.market.clone(),
            self.order_id.clone(),
            self.trade_side.to_string(),
            self.trade_type.to_string(),
            self.trade_status.to_string(),
            self.price.normalize().to_string(),
            self.size.normalize().to_string(),
            self.fee.normalize().to_string(),
            self.pnl.normalize().to_string(),
            self.created_at.to_rfc3339(),
        ]
    }
}

/// One row of the funding history report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionFundingHistory {
    pub wallet_address: String,
    pub provider_name: TradingProviderId,
    pub market: String,
    pub amount_paid: Decimal,
    pub funding_rate: Decimal,
    pub position_size: Decimal,
    pub hash: Option<String>,
    pub created_at: Timestamp,
}

impl PositionFundingHistory {
    pub const HEADERS: [&'static str; 8] = [
        "wallet_address",
        "provider_name",
        "market",
        "amount_paid",
        "funding_rate",
        "position_size",
        "hash",
        "created_at",
    ];

    pub fn to_record(&self) -> Vec<String> {
        vec![
            self.wallet_address.clone(),
            self.provider_name.to_string(),
            self.market.clone(),
            self.amount_paid.normalize().to_string(),
            self.funding_rate.normalize().to_string(),
            self.position_size.normalize().to_string(),
            self.hash.clone().unwrap_or_default(),
            self.created_at.to_rfc3339(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    #[test]
    fn test_order_history_record_matches_headers() {
        let row = OrderHistory {
            wallet_address: "0xabc".to_string(),
            provider_name: TradingProviderId::Hyperliquid,
            market: "BTC-USD".to_string(),
            order_id: "42".to_string(),
            trade_side: TradeSide::Sell,
            trade_type: TradeType::StopMarket,
            trade_status: TradeStatus::Filled,
            price: dec!(64000.50),
            size: dec!(0.100),
            fee: dec!(1.2),
            pnl: dec!(-3),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 10, 15, 0).unwrap(),
        };

        let record = row.to_record();
        assert_eq!(record.len(), OrderHistory::HEADERS.len());
        assert_eq!(record[1], "HYPERLIQUID");
        assert_eq!(record[5], "STOP_MARKET");
        assert_eq!(record[7], "64000.5");
        assert_eq!(record[8], "0.1");
        assert_eq!(record[11], "2024-03-01T10:15:00+00:00");
    }

    #[test]
    fn test_funding_history_without_hash_has_empty_column() {
        let row = PositionFundingHistory {
            wallet_address: "0xabc".to_string(),
            provider_name: TradingProviderId::Dydx,
            market: "ETH-USD".to_string(),
            amount_paid: dec!(-0.25),
            funding_rate: dec!(0.0001),
            position_size: dec!(2),
            hash: None,
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap(),
        };

        let record = row.to_record();
        assert_eq!(record.len(), PositionFundingHistory::HEADERS.len());
        assert_eq!(record[6], "");
    }
}
