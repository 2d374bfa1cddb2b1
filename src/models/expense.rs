use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Expense {
    pub id: Uuid,
    pub description: String,
    pub category: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateExpenseRequest {
    pub description: String,
    pub category: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
    pub date: String, // Format: "YYYY-MM-DD"
}

#[derive(Debug, Deserialize)]
pub struct UpdateExpenseRequest {
    pub description: String,
    pub category: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
    pub date: String, // Format: "YYYY-MM-DD"
}
