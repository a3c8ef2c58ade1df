//! CSV rendering of the reports, shared by the REST surface and the CLI

use chrono::NaiveDate;
use std::io::Write;
use trading_core::{OrderHistory, PositionFundingHistory, TradingProviderId};

fn write_csv<W, I>(writer: W, headers: &[&str], records: I) -> Result<W, csv::Error>
where
    W: Write,
    I: IntoIterator<Item = Vec<String>>,
{
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(headers)?;
    for record in records {
        csv.write_record(&record)?;
    }
    csv.into_inner().map_err(|e| csv::Error::from(e.into_error()))
}

pub fn write_order_history<W: Write>(writer: W, rows: &[OrderHistory]) -> Result<W, csv::Error> {
    write_csv(writer, &OrderHistory::HEADERS, rows.iter().map(OrderHistory::to_record))
}

pub fn write_funding_history<W: Write>(
    writer: W,
    rows: &[PositionFundingHistory],
) -> Result<W, csv::Error> {
    write_csv(
        writer,
        &PositionFundingHistory::HEADERS,
        rows.iter().map(PositionFundingHistory::to_record),
    )
}

/// Report kinds, named after the file they are exported to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    OrderHistory,
    PositionFundingHistory,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::OrderHistory => "order_history",
            ReportKind::PositionFundingHistory => "position_funding_history",
        }
    }
}

/// `<kind>_<provider>_<wallet>_<from>_<to>.csv`
pub fn export_file_name(
    kind: ReportKind,
    provider: TradingProviderId,
    wallet_address: &str,
    from: NaiveDate,
    to: NaiveDate,
) -> String {
    format!(
        "{}_{}_{}_{}_{}.csv",
        kind.as_str(),
        provider,
        wallet_address,
        from,
        to
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    #[test]
    fn test_funding_csv_has_header_and_rows() {
        let rows = vec![PositionFundingHistory {
            provider_name: TradingProviderId::Hyperliquid,
            wallet_address: "0xabc".to_string(),
            market: "ETH-USD".to_string(),
            amount_paid: dec!(-0.42),
            funding_rate: dec!(0.0000125),
            position_size: dec!(2),
            hash: None,
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap(),
        }];

        let bytes = write_funding_history(Vec::new(), &rows).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], PositionFundingHistory::HEADERS.join(","));
        assert!(lines[1].starts_with("HYPERLIQUID,0xabc,ETH-USD,-0.42,"));
    }

    #[test]
    fn test_empty_report_is_header_only() {
        let bytes = write_order_history(Vec::new(), &[]).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap().lines().count(), 1);
    }

    #[test]
    fn test_export_file_name() {
        let from = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        assert_eq!(
            export_file_name(ReportKind::OrderHistory, TradingProviderId::Dydx, "0xabc", from, to),
            "order_history_DYDX_0xabc_2024-03-01_2024-03-31.csv"
        );
    }
}
