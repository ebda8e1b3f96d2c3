use crate::domain::model::{PriceResponse, PriceType};
use crate::utils::error::{ResolverError, Result};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

pub const INVALID_PRICE: &str = "Invalid Price";

const WL_PER_DL: u64 = 100;
const WL_PER_BGL: u64 = 10_000;

lazy_static! {
    // 取字串開頭的整數部分（同 parseInt）
    static ref LEADING_INT: Regex = Regex::new(r"^\s*([+-]?\d+)").unwrap();
}

/// Removes a leading ```` ```json ```` and a trailing ```` ``` ```` marker, then trims.
pub fn strip_code_fence(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix("```json") {
        text = rest.trim_start();
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

/// Splits a WL amount into `BGL DL WL`, skipping zero units.
pub fn format_wl(wl: u64) -> String {
    let bgl = wl / WL_PER_BGL;
    let rem = wl % WL_PER_BGL;
    let dl = rem / WL_PER_DL;
    let wl = rem % WL_PER_DL;

    let mut parts = Vec::new();
    if bgl > 0 {
        parts.push(format!("{} BGL", bgl));
    }
    if dl > 0 {
        parts.push(format!("{} DL", dl));
    }
    if wl > 0 {
        parts.push(format!("{} WL", wl));
    }

    if parts.is_empty() {
        "0 WL".to_string()
    } else {
        parts.join(" ")
    }
}

fn floor_to_wl(price: f64) -> Option<u64> {
    if !price.is_finite() || price < 0.0 {
        return None;
    }
    Some(price.floor() as u64)
}

/// Formats a JSON number or numeric string as mixed units. Anything that
/// does not floor to a non-negative integer yields [`INVALID_PRICE`].
pub fn format_price(value: &Value) -> String {
    let wl = match value {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().and_then(floor_to_wl)),
        Value::String(s) => LEADING_INT
            .captures(s)
            .and_then(|caps| caps[1].parse::<i64>().ok())
            .and_then(|n| u64::try_from(n).ok()),
        _ => None,
    };

    match wl {
        Some(wl) => format_wl(wl),
        None => INVALID_PRICE.to_string(),
    }
}

/// Parses and validates the model's text, then fills `priceInDisplayUnits`.
pub fn normalize_response(raw: &str) -> Result<PriceResponse> {
    let cleaned = strip_code_fence(raw);

    let value: Value = serde_json::from_str(cleaned)
        .map_err(|e| ResolverError::malformed(format!("response is not JSON: {}", e)))?;
    let mut response: PriceResponse = serde_json::from_value(value)
        .map_err(|e| ResolverError::malformed(format!("schema mismatch: {}", e)))?;

    response.price_in_display_units = match response.price_type {
        PriceType::Each => Some(format_price(&Value::Number(response.item_price.clone()))),
        PriceType::Per => None,
    };

    Ok(response)
}
