//! Checkout and summary handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;

use toko_core::{CheckoutRequest, SummaryResponse, Transaction};

use crate::error::{ApiError, ApiResult};
use crate::routes::AppState;

/// Runs a cart through the checkout engine.
///
/// The whole operation is one atomic unit of work: a `201` means every
/// stock decrement and the transaction record committed together, and
/// any error means nothing was persisted.
pub async fn checkout(
    State(state): State<AppState>,
    Json(request): Json<CheckoutRequest>,
) -> ApiResult<(StatusCode, Json<Transaction>)> {
    let transaction = state.checkout.checkout(&request).await?;
    Ok((StatusCode::CREATED, Json(transaction)))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Transaction>> {
    let transaction = state
        .db
        .transactions()
        .get_by_id(id)
        .await?
        .ok_or(ApiError::NotFound {
            entity: "Transaction",
            id,
        })?;
    Ok(Json(transaction))
}

/// Query parameters for the summary endpoint. Dates are `YYYY-MM-DD`;
/// either side defaults to today (UTC).
#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

pub async fn summary(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> ApiResult<Json<SummaryResponse>> {
    let today = Utc::now().date_naive();
    let start = match query.start_date {
        Some(ref s) => parse_date(s)?,
        None => today,
    };
    let end = match query.end_date {
        Some(ref s) => parse_date(s)?,
        None => today,
    };

    // Inclusive day bounds: [start 00:00:00, end 23:59:59].
    let from = day_start(start);
    let to = day_start(end) + Duration::days(1) - Duration::seconds(1);

    Ok(Json(state.summary.summarize(from, to).await?))
}

fn parse_date(s: &str) -> ApiResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| ApiError::BadRequest(format!("invalid date: {s} (expected YYYY-MM-DD)")))
}

fn day_start(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}
