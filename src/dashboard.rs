//! Aggregation behind the administration dashboard.
//!
//! Five ledger reads run concurrently for one date window; the category
//! breakdown and the monthly series are reduced in memory from the raw rows,
//! so the store only ever answers simple window queries and the same numbers
//! come back no matter which engine sits underneath.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::ledger::{CategoryValue, DateRange, DatedValue, FetchError, LedgerStore};
use crate::models::dashboard::{CategorySlice, DashboardSnapshot, MonthPoint};

/// Colors handed out to breakdown slices in rank order.
const CATEGORY_PALETTE: [&str; 5] = ["#ef4444", "#f97316", "#f43f5e", "#dc2626", "#ea580c"];

/// Knobs for the category breakdown section of the snapshot.
#[derive(Debug, Clone)]
pub struct DashboardOptions {
    /// How many category slices to keep, largest first.
    pub top_categories: usize,
    /// Label under which expenses saved without a category are pooled.
    pub other_label: String,
    /// Colors assigned by rank, cycling when there are more slices than colors.
    pub palette: Vec<String>,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            top_categories: 5,
            other_label: "Other".to_string(),
            palette: CATEGORY_PALETTE.iter().map(|color| color.to_string()).collect(),
        }
    }
}

impl DashboardOptions {
    fn color_for(&self, rank: usize) -> String {
        if self.palette.is_empty() {
            return String::new();
        }
        self.palette[rank % self.palette.len()].clone()
    }
}

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("invalid date range: {0}")]
    InvalidRange(String),
    #[error("failed to load ledger data")]
    Fetch(#[from] FetchError),
}

/// Parses the optional `startDate` / `endDate` query parameters into a
/// [`DateRange`]. Bad input is rejected here, before any store round-trip.
pub fn parse_range(start: Option<&str>, end: Option<&str>) -> Result<DateRange, DashboardError> {
    let start = start.map(parse_date_param).transpose()?;
    let end = end.map(parse_date_param).transpose()?;
    Ok(DateRange::new(start, end))
}

fn parse_date_param(raw: &str) -> Result<NaiveDate, DashboardError> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(stamp.date_naive());
    }
    Err(DashboardError::InvalidRange(format!(
        "{} is not a YYYY-MM-DD date or an RFC 3339 timestamp",
        raw
    )))
}

/// Builds the complete dashboard snapshot for `range`.
///
/// The five reads run concurrently and the first failure aborts the whole
/// computation, so callers never see partially populated numbers. The reads
/// do not share a transactional snapshot, so a write racing them may be
/// visible to some reads and not others; cross-read consistency is
/// best-effort.
pub async fn build_snapshot<S>(
    store: &S,
    range: &DateRange,
    options: &DashboardOptions,
) -> Result<DashboardSnapshot, DashboardError>
where
    S: LedgerStore + ?Sized,
{
    let (revenue, expenses, category_rows, revenue_points, expense_points) = tokio::try_join!(
        store.revenue_total(range),
        store.expense_total(range),
        store.expense_categories(range),
        store.revenue_by_date(range),
        store.expense_by_date(range),
    )?;

    Ok(DashboardSnapshot {
        revenue,
        expenses,
        balance: revenue - expenses,
        expenses_by_category: rank_categories(category_rows, options),
        monthly_data: monthly_series(&revenue_points, &expense_points),
    })
}

fn rank_categories(rows: Vec<CategoryValue>, options: &DashboardOptions) -> Vec<CategorySlice> {
    let mut sums: BTreeMap<String, Decimal> = BTreeMap::new();
    for row in rows {
        let label = row
            .category
            .as_deref()
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .unwrap_or(options.other_label.as_str());
        *sums.entry(label.to_string()).or_insert(Decimal::ZERO) += row.value;
    }

    // Largest first; ties break on the label so equal inputs always rank the
    // same way.
    let mut ranked: Vec<(String, Decimal)> = sums.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(options.top_categories);

    ranked
        .into_iter()
        .enumerate()
        .map(|(rank, (name, value))| CategorySlice {
            name,
            value,
            color_tag: options.color_for(rank),
        })
        .collect()
}

struct MonthBucket {
    label: String,
    revenue: Decimal,
    expense: Decimal,
}

fn monthly_series(revenues: &[DatedValue], expenses: &[DatedValue]) -> Vec<MonthPoint> {
    let mut months: BTreeMap<(i32, u32), MonthBucket> = BTreeMap::new();

    for point in revenues {
        month_bucket(&mut months, point.date).revenue += point.value;
    }
    for point in expenses {
        month_bucket(&mut months, point.date).expense += point.value;
    }

    months
        .into_values()
        .map(|bucket| MonthPoint {
            month: bucket.label,
            revenue: bucket.revenue,
            expense: bucket.expense,
        })
        .collect()
}

/// Buckets are keyed by `(year, month)` so the series orders itself
/// chronologically; the display label is derived from the key, never sorted
/// on.
fn month_bucket(
    months: &mut BTreeMap<(i32, u32), MonthBucket>,
    date: NaiveDate,
) -> &mut MonthBucket {
    months
        .entry((date.year(), date.month()))
        .or_insert_with(|| MonthBucket {
            label: date.format("%b/%y").to_string(),
            revenue: Decimal::ZERO,
            expense: Decimal::ZERO,
        })
}
