//! Entry handlers: log list, CRUD, readings, previous odometer

use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use super::today;
use crate::{get_user_email, AppError, AppState, MAX_BODY_SIZE, MAX_PAGE_LIMIT};
use triplog_core::input::{lenient_number, parse_date, parse_number};
use triplog_core::{
    DistancePreview, Entry, EntryFilter, EntryKind, KindFilter, LogPage, NewEntry, SortOrder,
};

/// Query parameters for the log list
#[derive(Debug, Default, Deserialize)]
pub struct ListEntriesQuery {
    pub kind: Option<String>,
    pub order: Option<String>,
    /// Zero-based
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

impl ListEntriesQuery {
    fn to_filter(&self) -> Result<EntryFilter, AppError> {
        let mut filter = EntryFilter::default();
        if let Some(kind) = &self.kind {
            filter.kind = kind
                .parse::<KindFilter>()
                .map_err(|e| AppError::bad_request(&e))?;
        }
        if let Some(order) = &self.order {
            filter.order = order
                .parse::<SortOrder>()
                .map_err(|e| AppError::bad_request(&e))?;
        }
        filter.page = self.page.unwrap_or(0);
        if let Some(size) = self.page_size {
            filter.page_size = size.clamp(1, MAX_PAGE_LIMIT as usize);
        }
        Ok(filter)
    }
}

/// Create/update body; numeric fields accept numbers or numeric strings
#[derive(Debug, Deserialize)]
pub struct EntryRequest {
    #[serde(rename = "type")]
    pub kind: String,
    /// `YYYY-MM-DD`, defaults to today
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub odometer: f64,
    #[serde(default, alias = "amount", deserialize_with = "lenient_number")]
    pub amount_received: f64,
    #[serde(default, alias = "liters", deserialize_with = "lenient_number")]
    pub fuel_liters: f64,
    #[serde(default, alias = "cost", deserialize_with = "lenient_number")]
    pub fuel_cost: f64,
}

impl EntryRequest {
    fn to_new_entry(&self) -> Result<NewEntry, AppError> {
        let kind = self
            .kind
            .parse::<EntryKind>()
            .map_err(|e| AppError::bad_request(&e))?;
        let date = match self.date.as_deref().filter(|d| !d.trim().is_empty()) {
            Some(d) => parse_date(d)?,
            None => today(),
        };

        Ok(match kind {
            EntryKind::Trip => NewEntry::trip(date, self.odometer, self.amount_received),
            EntryKind::Fuel => NewEntry::fuel(date, self.odometer, self.fuel_liters, self.fuel_cost),
            EntryKind::Reading => NewEntry::reading(date, self.odometer),
        })
    }
}

async fn read_entry_request(request: Request) -> Result<EntryRequest, AppError> {
    let bytes = axum::body::to_bytes(request.into_body(), MAX_BODY_SIZE)
        .await
        .map_err(|_| AppError::bad_request("Invalid request body"))?;
    serde_json::from_slice(&bytes).map_err(|_| AppError::bad_request("Invalid JSON"))
}

/// GET /api/entries - Log list page with per-row estimates
pub async fn list_entries(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListEntriesQuery>,
    request: Request,
) -> Result<Json<LogPage>, AppError> {
    let user_email = get_user_email(request.headers());
    let filter = params.to_filter()?;

    let page = state.logbook.log_page(&filter)?;

    state.db.log_audit(
        &user_email,
        "list",
        Some("entries"),
        None,
        Some(&format!(
            "kind={:?}, page={}, count={}",
            filter.kind,
            page.page,
            page.rows.len()
        )),
    )?;

    Ok(Json(page))
}

/// POST /api/entries - Validate and record an entry
pub async fn create_entry(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<Entry>, AppError> {
    let user_email = get_user_email(request.headers());
    let body = read_entry_request(request).await?;
    let new = body.to_new_entry()?;

    let entry = state.logbook.add(new)?;

    state.db.log_audit(
        &user_email,
        "create",
        Some("entry"),
        Some(entry.id),
        Some(&format!(
            "type={}, date={}, odometer={}",
            entry.kind(),
            entry.date,
            entry.odometer
        )),
    )?;

    Ok(Json(entry))
}

/// GET /api/entries/:id - Single entry with its derived distance
pub async fn get_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<Entry>, AppError> {
    let user_email = get_user_email(request.headers());

    let entry = state.logbook.get(id)?;

    state
        .db
        .log_audit(&user_email, "read", Some("entry"), Some(id), None)?;

    Ok(Json(entry))
}

/// PUT /api/entries/:id - Replace an entry
pub async fn update_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<Entry>, AppError> {
    let user_email = get_user_email(request.headers());
    let body = read_entry_request(request).await?;
    let new = body.to_new_entry()?;

    let entry = state.logbook.update(id, new)?;

    state.db.log_audit(
        &user_email,
        "update",
        Some("entry"),
        Some(id),
        Some(&format!(
            "type={}, date={}, odometer={}",
            entry.kind(),
            entry.date,
            entry.odometer
        )),
    )?;

    Ok(Json(entry))
}

/// DELETE /api/entries/:id - Delete an entry and recompute distances
pub async fn delete_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<StatusCode, AppError> {
    let user_email = get_user_email(request.headers());

    state.logbook.delete(id)?;

    state
        .db
        .log_audit(&user_email, "delete", Some("entry"), Some(id), None)?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/readings - Standalone odometer readings, oldest first
pub async fn list_readings(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<Vec<Entry>>, AppError> {
    let user_email = get_user_email(request.headers());

    let readings = state.logbook.readings()?;

    state.db.log_audit(
        &user_email,
        "list",
        Some("readings"),
        None,
        Some(&format!("count={}", readings.len())),
    )?;

    Ok(Json(readings))
}

/// Query parameters for the previous odometer lookup
#[derive(Debug, Deserialize)]
pub struct PreviousOdometerQuery {
    /// `YYYY-MM-DD`, defaults to today
    pub date: Option<String>,
    /// Odometer being entered; enables the distance preview
    pub odometer: Option<String>,
    /// Entry being edited, left out of its own baseline
    pub exclude: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct PreviousOdometerResponse {
    pub date: chrono::NaiveDate,
    pub previous_odometer: f64,
    pub preview: Option<DistancePreview>,
}

/// GET /api/odometer/previous - Baseline for a trip, with optional distance preview
pub async fn get_previous_odometer(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PreviousOdometerQuery>,
    request: Request,
) -> Result<Json<PreviousOdometerResponse>, AppError> {
    let user_email = get_user_email(request.headers());
    let date = match params.date.as_deref().filter(|d| !d.trim().is_empty()) {
        Some(d) => parse_date(d)?,
        None => today(),
    };

    let (previous_odometer, preview) = match params.odometer.as_deref() {
        Some(odometer) => {
            let preview = state
                .logbook
                .preview(date, parse_number(odometer), params.exclude)?;
            (preview.previous_odometer, Some(preview))
        }
        None => (
            state.logbook.previous_odometer(date, params.exclude)?,
            None,
        ),
    };

    state.db.log_audit(
        &user_email,
        "read",
        Some("previous_odometer"),
        params.exclude,
        Some(&format!("date={}", date)),
    )?;

    Ok(Json(PreviousOdometerResponse {
        date,
        previous_odometer,
        preview,
    }))
}
