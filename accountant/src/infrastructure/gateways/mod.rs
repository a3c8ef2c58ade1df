mod dydx;
mod hyperliquid;

pub use dydx::{DydxRestClient, sign_request};
pub use hyperliquid::HyperliquidRestClient;

use serde_json::Value;

use crate::application::ports::GatewayError;

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        GatewayError::Network(err.to_string())
    }
}

/// Turn a raw response into JSON, rejecting anything but 200
async fn handle_response(resp: reqwest::Response) -> Result<Value, GatewayError> {
    let status = resp.status();
    let text = resp.text().await?;

    if status != reqwest::StatusCode::OK {
        return Err(GatewayError::BadResponse {
            status: status.as_u16(),
            body: text,
        });
    }

    serde_json::from_str(&text).map_err(|e| GatewayError::Decode(e.to_string()))
}

/// Move `field` out of a JSON object
fn take_field(mut value: Value, field: &str) -> Result<Value, GatewayError> {
    value
        .get_mut(field)
        .map(Value::take)
        .ok_or_else(|| GatewayError::Decode(format!("missing field `{}`", field)))
}

/// Move the list under `field` out of a JSON object; absent or null is empty
fn take_list(mut value: Value, field: &str) -> Result<Vec<Value>, GatewayError> {
    match value.get_mut(field).map(Value::take) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(list) => into_array(list),
    }
}

fn into_array(value: Value) -> Result<Vec<Value>, GatewayError> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(GatewayError::Decode(format!("expected an array, got {}", other))),
    }
}
