//! Analytics handlers: period summary, per-day series, fuel efficiency

use std::sync::Arc;

use axum::{
    extract::{Query, Request, State},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::today;
use crate::{get_user_email, AppError, AppState};
use triplog_core::{DailyPoint, EfficiencyReport, Period, Summary};

/// Query parameters for period-based analytics
///
/// Any of `from`/`to` selects a custom range and overrides `period`.
#[derive(Debug, Default, Deserialize)]
pub struct PeriodQuery {
    pub period: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

impl PeriodQuery {
    fn resolve(&self) -> Result<Period, AppError> {
        Ok(Period::resolve(
            self.period.as_deref(),
            self.from.as_deref(),
            self.to.as_deref(),
        )?)
    }
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub label: String,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub summary: Summary,
}

/// GET /api/analytics/summary - Totals, profit and fuel estimates for a period
pub async fn get_summary(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PeriodQuery>,
    request: Request,
) -> Result<Json<SummaryResponse>, AppError> {
    let user_email = get_user_email(request.headers());
    let period = params.resolve()?;

    let report = state.logbook.report(period, today())?;

    state.db.log_audit(
        &user_email,
        "report",
        Some("summary"),
        None,
        Some(&report.label),
    )?;

    Ok(Json(SummaryResponse {
        label: report.label,
        from: report.from,
        to: report.to,
        summary: report.summary,
    }))
}

/// GET /api/analytics/series - Per-day received, distance and fuel cost
pub async fn get_series(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PeriodQuery>,
    request: Request,
) -> Result<Json<Vec<DailyPoint>>, AppError> {
    let user_email = get_user_email(request.headers());
    let period = params.resolve()?;
    let reference = today();

    let series = state.logbook.series(period, reference)?;

    state.db.log_audit(
        &user_email,
        "report",
        Some("series"),
        None,
        Some(&format!("{}, days={}", period.label(reference), series.len())),
    )?;

    Ok(Json(series))
}

/// GET /api/analytics/efficiency - km/l between consecutive refuels
pub async fn get_efficiency(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<EfficiencyReport>, AppError> {
    let user_email = get_user_email(request.headers());

    let report = state.logbook.efficiency()?;

    state.db.log_audit(
        &user_email,
        "report",
        Some("efficiency"),
        None,
        Some(&format!("segments={}", report.segments.len())),
    )?;

    Ok(Json(report))
}
