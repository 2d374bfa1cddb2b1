pub mod dashboard;
pub mod expenses;
pub mod posts;
pub mod residents;
pub mod revenue;

use axum::response::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;

/// `?startDate=...&endDate=...` as accepted by the dashboard and the revenue
/// listing. Values are parsed later so bad input gets a clean 400.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

// Liveness check
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "condo-admin"
    }))
}

pub(crate) fn parse_entry_date(raw: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| ApiError::Validation("Invalid date format. Use YYYY-MM-DD.".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_dates_must_be_iso_days() {
        assert_eq!(
            parse_entry_date("2024-01-10").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
        );
        assert!(parse_entry_date("10/01/2024").is_err());
        assert!(parse_entry_date("2024-02-30").is_err());
        assert!(parse_entry_date("").is_err());
    }
}
