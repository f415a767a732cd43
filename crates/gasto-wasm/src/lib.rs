//! WASM bindings for natural-language transaction extraction.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use gasto_core::{CategoryTag, ExtractionEngine, TransactionExtractor as _};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Extract a transaction using the browser's local clock as reference time.
///
/// Returns `{status: "success", amount, category, direction, date, description}`
/// or `{status: "failure", reason}`.
#[wasm_bindgen]
pub fn extract_transaction(text: &str) -> Result<JsValue, JsValue> {
    extract_with(&ExtractionEngine::new(), text, browser_now()?)
}

/// Extract a transaction relative to an ISO date (`2024-03-10`) or
/// datetime (`2024-03-10T18:30:00`).
#[wasm_bindgen]
pub fn extract_transaction_at(text: &str, now: &str) -> Result<JsValue, JsValue> {
    extract_with(&ExtractionEngine::new(), text, parse_reference(now)?)
}

/// Format an amount in soles, e.g. `S/ 1,234.50`.
#[wasm_bindgen]
pub fn format_amount(amount: f64) -> Result<String, JsValue> {
    let amount = Decimal::from_f64(amount)
        .ok_or_else(|| JsValue::from_str(&format!("invalid amount: {}", amount)))?;
    Ok(gasto_core::format_amount(amount, "S/"))
}

/// Transaction extractor class for browser use.
///
/// Keeps its own keyword table, so keywords added on one instance are not
/// seen by the free functions above.
#[wasm_bindgen]
pub struct TransactionExtractor {
    engine: ExtractionEngine,
}

#[wasm_bindgen]
impl TransactionExtractor {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            engine: ExtractionEngine::new(),
        }
    }

    /// Add a keyword to a category. Returns false if it was already known.
    #[wasm_bindgen]
    pub fn add_keyword(&self, category: &str, keyword: &str) -> Result<bool, JsValue> {
        self.engine
            .add_keyword(category, keyword)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Extract a transaction using the browser clock.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str) -> Result<JsValue, JsValue> {
        extract_with(&self.engine, text, browser_now()?)
    }

    /// Extract a transaction relative to an ISO date or datetime.
    #[wasm_bindgen]
    pub fn extract_at(&self, text: &str, now: &str) -> Result<JsValue, JsValue> {
        extract_with(&self.engine, text, parse_reference(now)?)
    }

    /// Keywords of one category, sorted.
    #[wasm_bindgen]
    pub fn keywords(&self, category: &str) -> Result<JsValue, JsValue> {
        let tag: CategoryTag = category
            .parse()
            .map_err(|c| JsValue::from_str(&format!("unknown category: {}", c)))?;
        to_js(&self.engine.keywords(tag))
    }

    /// All categories as `{tag, label, emoji}` objects.
    #[wasm_bindgen]
    pub fn categories(&self) -> Result<JsValue, JsValue> {
        #[derive(Serialize)]
        struct CategoryInfo {
            tag: &'static str,
            label: &'static str,
            emoji: &'static str,
        }

        let categories: Vec<CategoryInfo> = self
            .engine
            .categories()
            .into_iter()
            .map(|c| CategoryInfo {
                tag: c.as_str(),
                label: c.label(),
                emoji: c.emoji(),
            })
            .collect();

        to_js(&categories)
    }
}

impl Default for TransactionExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn extract_with(
    engine: &ExtractionEngine,
    text: &str,
    now: NaiveDateTime,
) -> Result<JsValue, JsValue> {
    to_js(&engine.extract(text, now))
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn browser_now() -> Result<NaiveDateTime, JsValue> {
    let now = js_sys::Date::new_0();

    NaiveDate::from_ymd_opt(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
        .and_then(|date| date.and_hms_opt(now.get_hours(), now.get_minutes(), now.get_seconds()))
        .ok_or_else(|| JsValue::from_str("browser clock returned an invalid date"))
}

fn parse_reference(now: &str) -> Result<NaiveDateTime, JsValue> {
    let now = now.trim();

    NaiveDateTime::parse_from_str(now, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(now, "%Y-%m-%dT%H:%M"))
        .or_else(|_| {
            NaiveDate::parse_from_str(now, "%Y-%m-%d").map(|d| d.and_time(NaiveTime::MIN))
        })
        .map_err(|_| JsValue::from_str(&format!("invalid reference date: {}", now)))
}
