//! Product Payloads
//!
//! Request fields arrive as loose JSON: a price may be `10`, `9.99` or `"10"`.
//! Handlers test presence with [`is_truthy`] and only then convert.

use rust_decimal::{Decimal, prelude::ToPrimitive};
use salvo::{http::ParseError, prelude::Request};
use serde::{Serializer, de::DeserializeOwned};
use serde_json::Value;
use tracing::debug;

use crate::{errors::ApiError, products::errors::MALFORMED_BODY};

/// Whether a field counts as provided: `null`, `false`, `0` and `""` do not.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|number| number != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// A text field; only JSON strings qualify.
pub(crate) fn text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        _ => None,
    }
}

/// A numeric field, given either as a JSON number or as a numeric string.
pub(crate) fn amount(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(number) => parse_amount(&number.to_string()),
        Value::String(text) => parse_amount(text.trim()),
        _ => None,
    }
}

fn parse_amount(text: &str) -> Option<Decimal> {
    text.parse::<Decimal>()
        .or_else(|_plain| Decimal::from_scientific(text))
        .ok()
}

/// Writes an amount as a JSON number, without a fractional part when it has none.
pub(crate) fn serialize_amount<S>(amount: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let amount = amount.normalize();

    if amount.scale() == 0
        && let Some(whole) = amount.to_i64()
    {
        return serializer.serialize_i64(whole);
    }

    match amount.to_f64() {
        Some(fractional) => serializer.serialize_f64(fractional),
        None => serializer.serialize_str(&amount.to_string()),
    }
}

/// Reads an optional JSON body.
///
/// An empty body, or one sent without a JSON content type, reads as `T::default()`.
pub(crate) async fn read_body<T>(req: &mut Request) -> Result<T, ApiError>
where
    T: DeserializeOwned + Default,
{
    match req.parse_json::<Option<T>>().await {
        Ok(body) => Ok(body.unwrap_or_default()),
        Err(ParseError::InvalidContentType) => Ok(T::default()),
        Err(error) => {
            debug!(error = %error, "rejected request body");

            Err(ApiError::bad_request(MALFORMED_BODY))
        }
    }
}
