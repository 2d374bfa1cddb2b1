//! Read-side access to the financial ledger (revenues and expenses).
//!
//! The dashboard aggregator talks to storage exclusively through the
//! [`LedgerStore`] trait so it can be exercised against an in-memory fake,
//! while the HTTP layer hands it a [`SqlLedgerStore`] backed by the shared
//! connection pool.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::FromRow;
use thiserror::Error;

use crate::database::Database;

/// Optional date window. Both bounds are inclusive; a missing bound leaves
/// that side open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Whether `date` falls inside the window. A range whose start is after
    /// its end contains nothing.
    pub fn contains(&self, date: NaiveDate) -> bool {
        if let Some(start) = self.start {
            if date < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if date > end {
                return false;
            }
        }
        true
    }
}

/// One ledger record projected to its posting date and amount.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DatedValue {
    pub date: NaiveDate,
    pub value: Decimal,
}

/// One expense record projected to its category label and amount. The label
/// is `None` for records saved without a category.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct CategoryValue {
    pub category: Option<String>,
    pub value: Decimal,
}

/// A ledger read failed. The public message stays generic; the underlying
/// driver error is kept as the source for server-side logging.
#[derive(Debug, Error)]
#[error("ledger store query failed: {message}")]
pub struct FetchError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<sqlx::Error> for FetchError {
    fn from(err: sqlx::Error) -> Self {
        Self {
            message: "database query failed".to_string(),
            source: Some(Box::new(err)),
        }
    }
}

/// The five read operations the dashboard needs. Each one honors the same
/// inclusive date window. Implementations are not required to serve the five
/// reads from one transactional snapshot, so consistency across them is
/// best-effort when writes land mid-flight.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Sum of revenue amounts inside the window.
    async fn revenue_total(&self, range: &DateRange) -> Result<Decimal, FetchError>;

    /// Sum of expense amounts inside the window.
    async fn expense_total(&self, range: &DateRange) -> Result<Decimal, FetchError>;

    /// Every expense inside the window as a `(category, value)` pair, one
    /// per record. Grouping happens in the aggregator, not here.
    async fn expense_categories(&self, range: &DateRange) -> Result<Vec<CategoryValue>, FetchError>;

    /// Every revenue inside the window as a `(date, value)` pair.
    async fn revenue_by_date(&self, range: &DateRange) -> Result<Vec<DatedValue>, FetchError>;

    /// Every expense inside the window as a `(date, value)` pair.
    async fn expense_by_date(&self, range: &DateRange) -> Result<Vec<DatedValue>, FetchError>;
}

/// [`LedgerStore`] backed by the Postgres pool. Cloning the pool is cheap,
/// so handlers build one of these per request.
pub struct SqlLedgerStore {
    pool: Database,
}

impl SqlLedgerStore {
    pub fn new(pool: Database) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LedgerStore for SqlLedgerStore {
    async fn revenue_total(&self, range: &DateRange) -> Result<Decimal, FetchError> {
        let total = sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(value), 0) FROM revenues \
             WHERE ($1::date IS NULL OR date >= $1) AND ($2::date IS NULL OR date <= $2)",
        )
        .bind(range.start)
        .bind(range.end)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    async fn expense_total(&self, range: &DateRange) -> Result<Decimal, FetchError> {
        let total = sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(value), 0) FROM expenses \
             WHERE ($1::date IS NULL OR date >= $1) AND ($2::date IS NULL OR date <= $2)",
        )
        .bind(range.start)
        .bind(range.end)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    async fn expense_categories(&self, range: &DateRange) -> Result<Vec<CategoryValue>, FetchError> {
        let rows = sqlx::query_as::<_, CategoryValue>(
            "SELECT category, value FROM expenses \
             WHERE ($1::date IS NULL OR date >= $1) AND ($2::date IS NULL OR date <= $2)",
        )
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn revenue_by_date(&self, range: &DateRange) -> Result<Vec<DatedValue>, FetchError> {
        let rows = sqlx::query_as::<_, DatedValue>(
            "SELECT date, value FROM revenues \
             WHERE ($1::date IS NULL OR date >= $1) AND ($2::date IS NULL OR date <= $2)",
        )
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn expense_by_date(&self, range: &DateRange) -> Result<Vec<DatedValue>, FetchError> {
        let rows = sqlx::query_as::<_, DatedValue>(
            "SELECT date, value FROM expenses \
             WHERE ($1::date IS NULL OR date >= $1) AND ($2::date IS NULL OR date <= $2)",
        )
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn unbounded_range_contains_everything() {
        let range = DateRange::default();
        assert!(range.contains(date(1990, 1, 1)));
        assert!(range.contains(date(2031, 12, 31)));
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let range = DateRange::new(Some(date(2024, 1, 10)), Some(date(2024, 1, 20)));
        assert!(range.contains(date(2024, 1, 10)));
        assert!(range.contains(date(2024, 1, 20)));
        assert!(!range.contains(date(2024, 1, 9)));
        assert!(!range.contains(date(2024, 1, 21)));
    }

    #[test]
    fn half_open_ranges_check_only_their_bound() {
        let from = DateRange::new(Some(date(2024, 6, 1)), None);
        assert!(from.contains(date(2030, 1, 1)));
        assert!(!from.contains(date(2024, 5, 31)));

        let until = DateRange::new(None, Some(date(2024, 6, 1)));
        assert!(until.contains(date(1999, 1, 1)));
        assert!(!until.contains(date(2024, 6, 2)));
    }

    #[test]
    fn inverted_range_contains_nothing() {
        let range = DateRange::new(Some(date(2025, 1, 1)), Some(date(2024, 1, 1)));
        assert!(!range.contains(date(2024, 6, 15)));
        assert!(!range.contains(date(2025, 1, 1)));
        assert!(!range.contains(date(2024, 1, 1)));
    }

    #[test]
    fn fetch_error_keeps_driver_error_as_source() {
        let err = FetchError::from(sqlx::Error::RowNotFound);
        assert_eq!(err.message(), "database query failed");
        assert!(std::error::Error::source(&err).is_some());

        let plain = FetchError::new("store offline");
        assert!(std::error::Error::source(&plain).is_none());
    }
}
