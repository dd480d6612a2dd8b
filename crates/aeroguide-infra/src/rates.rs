//! Exchange-rate loading and refresh against the Frankfurter API.
//!
//! The serving path never calls the rates provider: conversions run against
//! a table loaded from disk at startup. `fetch_rates`/`update_rates_file`
//! back the `update-rates` subcommand that refreshes the file out of band.

use std::path::Path;
use std::time::Duration;

use aeroguide_core::currency::{RateTable, RatesDoc};
use aeroguide_types::error::{RatesError, UpstreamError};

use crate::http::{send_error, status_error};

const SERVICE: &str = "frankfurter";

const FRANKFURTER_URL: &str = "https://api.frankfurter.app/latest";

/// Load the cached rate table from disk.
///
/// A missing or malformed file logs a warning and yields an empty table;
/// every conversion against it then fails with `UnsupportedCurrency`, which
/// the API surfaces as an unknown currency rather than a crash.
pub async fn load_rate_table(path: &Path) -> RateTable {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(err) => {
            tracing::warn!(
                "Failed to read rates file {}: {err}; conversions will be unavailable \
                 until `aerog update-rates` runs",
                path.display()
            );
            return RateTable::default();
        }
    };

    match RateTable::from_json(&raw) {
        Ok(table) => {
            tracing::info!(currencies = table.len(), "exchange rates loaded");
            table
        }
        Err(err) => {
            tracing::warn!("Failed to parse rates file {}: {err}", path.display());
            RateTable::default()
        }
    }
}

/// Fetch the latest rates for a base currency.
pub async fn fetch_rates(base: &str) -> Result<RatesDoc, UpstreamError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .expect("failed to create reqwest client");

    let response = client
        .get(FRANKFURTER_URL)
        .query(&[("from", base)])
        .send()
        .await
        .map_err(|err| send_error(SERVICE, &err))?;

    let status = response.status();
    if !status.is_success() {
        let error_body = response.text().await.unwrap_or_default();
        return Err(status_error(SERVICE, status.as_u16(), error_body));
    }

    response
        .json::<RatesDoc>()
        .await
        .map_err(|err| UpstreamError::Malformed {
            service: SERVICE,
            message: format!("failed to parse rates response: {err}"),
        })
}

/// Fetch the latest rates and persist them where the service loads from.
pub async fn update_rates_file(path: &Path, base: &str) -> Result<usize, RatesError> {
    let doc = fetch_rates(base)
        .await
        .map_err(|err| RatesError::Io(err.to_string()))?;
    let json = serde_json::to_string_pretty(&doc).map_err(|err| RatesError::Parse(err.to_string()))?;
    tokio::fs::write(path, json)
        .await
        .map_err(|err| RatesError::Io(err.to_string()))?;
    // the base itself counts as one supported currency
    Ok(doc.rates.len() + 1)
}
