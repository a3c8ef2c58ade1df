use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::debug;
use trading_core::{TimeWindow, Timestamp};

use super::{handle_response, into_array};
use crate::application::ports::{GatewayError, HyperliquidGateway};
use crate::infrastructure::config::HyperliquidConfig;

/// HyperLiquid public `/info` client
#[derive(Clone)]
pub struct HyperliquidRestClient {
    client: Client,
    base_url: String,
    page_limit: usize,
}

impl HyperliquidRestClient {
    pub fn new(config: &HyperliquidConfig) -> Self {
        HyperliquidRestClient {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            page_limit: config.page_limit,
        }
    }

    async fn info(&self, payload: &Value) -> Result<Value, GatewayError> {
        let resp = self
            .client
            .post(format!("{}/info", self.base_url))
            .json(payload)
            .send()
            .await?;

        let body = handle_response(resp).await?;
        debug!(%payload, %body, "HyperLiquid response");
        Ok(body)
    }
}

#[async_trait]
impl HyperliquidGateway for HyperliquidRestClient {
    async fn fetch_open_orders(&self, wallet_address: &str) -> Result<Vec<Value>, GatewayError> {
        let payload = json!({"type": "openOrders", "user": wallet_address});
        into_array(self.info(&payload).await?)
    }

    async fn fetch_order_fills(
        &self,
        wallet_address: &str,
        window: TimeWindow,
    ) -> Result<Vec<Value>, GatewayError> {
        let payload = json!({
            "type": "userFillsByTime",
            "user": wallet_address,
            "startTime": window.from.timestamp_millis(),
            "endTime": window.to.timestamp_millis(),
        });
        into_array(self.info(&payload).await?)
    }

    async fn fetch_order_status(&self, wallet_address: &str, order_id: u64) -> Result<Value, GatewayError> {
        let payload = json!({"type": "orderStatus", "oid": order_id, "user": wallet_address});
        self.info(&payload).await
    }

    async fn fetch_clearinghouse_state(&self, wallet_address: &str) -> Result<Value, GatewayError> {
        let payload = json!({"type": "clearinghouseState", "user": wallet_address});
        self.info(&payload).await
    }

    /// Each page restarts at the last record's `time`, so the boundary record
    /// comes back again; a page with at most one record means there is nothing
    /// newer.
    async fn fetch_funding_payments(
        &self,
        wallet_address: &str,
        from: Timestamp,
        to: Option<Timestamp>,
    ) -> Result<Vec<Value>, GatewayError> {
        let mut payload = json!({
            "type": "userFunding",
            "user": wallet_address,
            "startTime": from.timestamp_millis(),
        });
        if let Some(to) = to {
            payload["endTime"] = json!(to.timestamp_millis());
        }

        let mut collected = Vec::new();
        for _ in 0..self.page_limit {
            let page = into_array(self.info(&payload).await?)?;
            let next_start = page.last().and_then(|record| record.get("time")).cloned();
            let exhausted = page.len() <= 1;
            collected.extend(page);

            match next_start {
                Some(time) if !exhausted => payload["startTime"] = time,
                _ => break,
            }
        }

        Ok(collected)
    }
}
