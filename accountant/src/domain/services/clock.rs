use trading_core::Timestamp;

/// Source of the current time
///
/// Injected wherever "now" matters (row timestamps, the portfolio day, default
/// import windows) so tests can pin it.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;

    fn now_millis(&self) -> i64 {
        self.now().timestamp_millis()
    }

    fn today(&self) -> chrono::NaiveDate {
        self.now().date_naive()
    }
}
