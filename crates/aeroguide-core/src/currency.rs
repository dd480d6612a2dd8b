//! Currency conversion against a cached rate table.
//!
//! Rates are per-base (the base currency itself counts as 1.0), so any
//! pair converts through the base: `amount / rate(from) * rate(to)`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use aeroguide_types::error::RatesError;

/// The persisted rates document (the same shape the rates provider returns).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatesDoc {
    pub base: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub rates: HashMap<String, f64>,
}

/// Uppercased ISO code -> per-base rate.
#[derive(Debug, Clone, Default)]
pub struct RateTable {
    rates: HashMap<String, f64>,
}

impl RateTable {
    /// Build the lookup table from a rates document: codes uppercased, the
    /// base currency inserted at 1.0.
    pub fn from_doc(doc: &RatesDoc) -> Self {
        let mut rates: HashMap<String, f64> = doc
            .rates
            .iter()
            .map(|(code, rate)| (code.to_uppercase(), *rate))
            .collect();
        rates.insert(doc.base.to_uppercase(), 1.0);
        Self { rates }
    }

    pub fn from_json(raw: &str) -> Result<Self, RatesError> {
        let doc: RatesDoc =
            serde_json::from_str(raw).map_err(|e| RatesError::Parse(e.to_string()))?;
        Ok(Self::from_doc(&doc))
    }

    /// Per-base rate for a code, case-insensitive.
    pub fn rate(&self, code: &str) -> Option<f64> {
        self.rates.get(&code.to_uppercase()).copied()
    }

    /// Cross-rate conversion. The result is not rounded; presentation is the
    /// caller's concern. The error carries the code as the caller wrote it.
    pub fn convert(&self, amount: f64, from: &str, to: &str) -> Result<f64, RatesError> {
        let from_rate = self
            .rate(from)
            .ok_or_else(|| RatesError::UnsupportedCurrency(from.to_string()))?;
        let to_rate = self
            .rate(to)
            .ok_or_else(|| RatesError::UnsupportedCurrency(to.to_string()))?;
        Ok(amount / from_rate * to_rate)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}
