//! Response shapes.
//!
//! Some endpoints wrap their payload as `{ "success", "message", "data" }`,
//! others return it bare. Both are accepted everywhere.

use serde::de::DeserializeOwned;
use serde_json::Value;

use content_admin_products::Product;

use crate::error::ClientError;

/// Decode a payload that may or may not sit inside `{ "data": ... }`.
///
/// An object with a `data` key is always treated as wrapped: a `data` that
/// does not decode as `T` (including `null`) is a parse error, never a
/// fallback to reading the wrapper itself as `T`.
pub fn decode_payload<T: DeserializeOwned>(body: &str) -> Result<T, ClientError> {
    let mut value: Value = serde_json::from_str(body).map_err(|e| ClientError::Parse(e.to_string()))?;

    let data = value.as_object_mut().and_then(|obj| obj.remove("data"));
    let payload = match data {
        Some(data) => data,
        None => value,
    };
    serde_json::from_value(payload).map_err(|e| ClientError::Parse(e.to_string()))
}

/// Items of a list response.
///
/// Expects `data.items`; a top-level `items` array is accepted too. Any other
/// shape yields `None` so the caller can degrade to an empty list.
pub fn decode_list(body: &str) -> Result<Option<Vec<Product>>, ClientError> {
    let value: Value = serde_json::from_str(body).map_err(|e| ClientError::Parse(e.to_string()))?;

    let items = value
        .get("data")
        .and_then(|d| d.get("items"))
        .or_else(|| value.get("items"));

    match items {
        Some(items) if items.is_array() => serde_json::from_value(items.clone())
            .map(Some)
            .map_err(|e| ClientError::Parse(e.to_string())),
        _ => Ok(None),
    }
}
