//! POST /api/convert - currency conversion against the cached rate table.

use axum::Json;
use axum::extract::State;

use aeroguide_types::error::RatesError;
use aeroguide_types::wire::{ConvertReply, ConvertRequest};

use crate::http::error::ApiError;
use crate::state::AppState;

pub async fn convert(
    State(state): State<AppState>,
    Json(request): Json<ConvertRequest>,
) -> Result<Json<ConvertReply>, ApiError> {
    if !request.amount.is_finite() || request.amount <= 0.0 {
        return Err(ApiError::Validation(
            "amount must be a positive number".to_string(),
        ));
    }
    let from = normalize_code(&request.from)?;
    let to = normalize_code(&request.to)?;

    let result = state
        .rates
        .convert(request.amount, &from, &to)
        .map_err(|err| match err {
            RatesError::UnsupportedCurrency(_) => ApiError::NotFound(err.to_string()),
            other => ApiError::Internal(other.to_string()),
        })?;

    Ok(Json(ConvertReply {
        from,
        to,
        amount: request.amount,
        result: round_cents(result),
    }))
}

/// Currency codes are exactly three ASCII letters, replied uppercased.
fn normalize_code(code: &str) -> Result<String, ApiError> {
    let code = code.trim();
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(code.to_uppercase())
    } else {
        Err(ApiError::Validation(format!(
            "'{code}' is not a 3-letter currency code"
        )))
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
