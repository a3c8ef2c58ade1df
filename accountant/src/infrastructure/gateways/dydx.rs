use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use chrono::{SecondsFormat, Utc};
use hmac::{Hmac, Mac};
use reqwest::Client;
use serde_json::Value;
use sha2::Sha256;
use std::collections::HashMap;
use tracing::debug;
use trading_core::Timestamp;

use super::{handle_response, take_field, take_list};
use crate::application::ports::{DydxGateway, GatewayError};
use crate::infrastructure::config::{DydxConfig, DydxCredentials};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Build the `DYDX-SIGNATURE` header value
///
/// The signed message is `timestamp + method + path_with_query + body`; the
/// secret and the digest are both url-safe base64.
pub fn sign_request(
    secret: &str,
    timestamp: &str,
    method: &str,
    path_with_query: &str,
    body: &str,
) -> Result<String, GatewayError> {
    let key = URL_SAFE
        .decode(secret)
        .map_err(|e| GatewayError::Decode(format!("API secret is not base64: {}", e)))?;
    let mut mac = Hmac::<Sha256>::new_from_slice(&key)
        .map_err(|e| GatewayError::Decode(e.to_string()))?;
    mac.update(timestamp.as_bytes());
    mac.update(method.as_bytes());
    mac.update(path_with_query.as_bytes());
    mac.update(body.as_bytes());
    Ok(URL_SAFE.encode(mac.finalize().into_bytes()))
}

fn path_with_query(endpoint: &str, params: &[(String, String)]) -> String {
    if params.is_empty() {
        return endpoint.to_string();
    }
    let query = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish();
    format!("{}?{}", endpoint, query)
}

fn set_param(params: &mut Vec<(String, String)>, key: &str, value: String) {
    match params.iter_mut().find(|(k, _)| k == key) {
        Some((_, v)) => *v = value,
        None => params.push((key.to_string(), value)),
    }
}

/// One paginated listing endpoint
struct Listing<'a> {
    endpoint: &'a str,
    data_field: &'a str,
    cursor_field: &'a str,
    pages: usize,
}

/// dYdX v3 REST client, signing every request with the wallet's API key
#[derive(Clone)]
pub struct DydxRestClient {
    client: Client,
    base_url: String,
    credentials: HashMap<String, DydxCredentials>,
    page_limit: usize,
    fill_pages: usize,
    order_pages: usize,
    position_pages: usize,
    funding_pages: usize,
}

impl DydxRestClient {
    pub fn new(config: &DydxConfig) -> Self {
        DydxRestClient {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials: config.credentials.clone(),
            page_limit: config.page_limit,
            fill_pages: config.fill_pages,
            order_pages: config.order_pages,
            position_pages: config.position_pages,
            funding_pages: config.funding_pages,
        }
    }

    fn credentials(&self, wallet_address: &str) -> Result<&DydxCredentials, GatewayError> {
        self.credentials
            .get(wallet_address)
            .ok_or_else(|| GatewayError::MissingCredentials(wallet_address.to_string()))
    }

    async fn get(
        &self,
        wallet_address: &str,
        endpoint: &str,
        params: &[(String, String)],
    ) -> Result<Value, GatewayError> {
        let credentials = self.credentials(wallet_address)?;
        let path = path_with_query(endpoint, params);
        let timestamp = Utc::now().format(TIMESTAMP_FORMAT).to_string();
        let signature = sign_request(&credentials.secret, &timestamp, "GET", &path, "")?;

        let resp = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .header("DYDX-SIGNATURE", signature)
            .header("DYDX-API-KEY", &credentials.key)
            .header("DYDX-TIMESTAMP", &timestamp)
            .header("DYDX-PASSPHRASE", &credentials.passphrase)
            .send()
            .await?;

        let body = handle_response(resp).await?;
        debug!(endpoint, %body, "dYdX response");
        Ok(body)
    }

    /// Walk back in time with `createdBeforeOrAt` until a page is empty, the
    /// cursor stops moving, or `pages` pages were read. The cursor is
    /// inclusive, so each page after the first repeats the previous page's
    /// last record; callers dedupe on the natural key.
    async fn get_paginated(
        &self,
        wallet_address: &str,
        listing: Listing<'_>,
        mut params: Vec<(String, String)>,
    ) -> Result<Vec<Value>, GatewayError> {
        set_param(&mut params, "limit", self.page_limit.to_string());

        let mut collected = Vec::new();
        let mut previous_cursor: Option<String> = None;
        for _ in 0..listing.pages {
            let body = self.get(wallet_address, listing.endpoint, &params).await?;
            let page = take_list(body, listing.data_field)?;

            let cursor = page
                .last()
                .and_then(|record| record.get(listing.cursor_field))
                .and_then(Value::as_str)
                .map(str::to_string);
            collected.extend(page);

            match cursor {
                Some(cursor) if previous_cursor.as_deref() != Some(cursor.as_str()) => {
                    set_param(&mut params, "createdBeforeOrAt", cursor.clone());
                    previous_cursor = Some(cursor);
                }
                _ => break,
            }
        }

        Ok(collected)
    }
}

#[async_trait]
impl DydxGateway for DydxRestClient {
    async fn fetch_order_fills(&self, wallet_address: &str) -> Result<Vec<Value>, GatewayError> {
        let listing = Listing {
            endpoint: "/v3/fills",
            data_field: "fills",
            cursor_field: "createdAt",
            pages: self.fill_pages,
        };
        self.get_paginated(wallet_address, listing, Vec::new()).await
    }

    async fn fetch_open_orders(&self, wallet_address: &str) -> Result<Vec<Value>, GatewayError> {
        let listing = Listing {
            endpoint: "/v3/orders",
            data_field: "orders",
            cursor_field: "createdAt",
            pages: self.order_pages,
        };
        let params = vec![("returnLatestOrders".to_string(), "true".to_string())];
        self.get_paginated(wallet_address, listing, params).await
    }

    async fn fetch_order(&self, wallet_address: &str, order_id: &str) -> Result<Value, GatewayError> {
        let body = self
            .get(wallet_address, &format!("/v3/orders/{}", order_id), &[])
            .await?;
        take_field(body, "order")
    }

    async fn fetch_positions(&self, wallet_address: &str) -> Result<Vec<Value>, GatewayError> {
        let listing = Listing {
            endpoint: "/v3/positions",
            data_field: "positions",
            cursor_field: "createdAt",
            pages: self.position_pages,
        };
        self.get_paginated(wallet_address, listing, Vec::new()).await
    }

    async fn fetch_funding_payments(
        &self,
        wallet_address: &str,
        to: Option<Timestamp>,
    ) -> Result<Vec<Value>, GatewayError> {
        let listing = Listing {
            endpoint: "/v3/funding",
            data_field: "fundingPayments",
            cursor_field: "effectiveAt",
            pages: self.funding_pages,
        };
        let params = to
            .map(|to| {
                vec![(
                    "effectiveBeforeOrAt".to_string(),
                    to.to_rfc3339_opts(SecondsFormat::Millis, true),
                )]
            })
            .unwrap_or_default();
        self.get_paginated(wallet_address, listing, params).await
    }

    async fn fetch_account(&self, wallet_address: &str) -> Result<Value, GatewayError> {
        let account_id = self.credentials(wallet_address)?.account_id.clone();
        let params = [("ethereumAddress".to_string(), wallet_address.to_string())];
        let body = self
            .get(wallet_address, &format!("/v3/accounts/{}", account_id), &params)
            .await?;
        take_field(body, "account")
    }

    async fn fetch_markets(&self, wallet_address: &str, market: &str) -> Result<Value, GatewayError> {
        let params = [("market".to_string(), market.to_string())];
        let body = self.get(wallet_address, "/v3/markets", &params).await?;
        take_field(body, "markets")
    }
}
