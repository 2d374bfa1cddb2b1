use axum::{
    extract::{Query, State},
    response::Json,
};

use crate::auth::CurrentUser;
use crate::dashboard::{build_snapshot, parse_range, DashboardOptions};
use crate::database::Database;
use crate::error::ApiError;
use crate::ledger::SqlLedgerStore;
use crate::models::dashboard::DashboardSnapshot;

use super::RangeQuery;

// Aggregated numbers behind the administration overview (managers only)
pub async fn get_dashboard_data(
    State(db): State<Database>,
    user: CurrentUser,
    Query(query): Query<RangeQuery>,
) -> Result<Json<DashboardSnapshot>, ApiError> {
    user.require_manager()?;

    let range = parse_range(query.start_date.as_deref(), query.end_date.as_deref())?;
    let store = SqlLedgerStore::new(db);
    let snapshot = build_snapshot(&store, &range, &DashboardOptions::default()).await?;

    Ok(Json(snapshot))
}
