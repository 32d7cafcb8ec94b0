//! HTTP surface: the weekly board, assignment CRUD, and the lookups that
//! feed the scheduling form.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use chrono::{Local, NaiveDate, Utc};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use shared::dto::{Employee, Order, OrderDetail, OrderStage, OrderStageAssignment};
use shared::error::AppError;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use crate::filter::AssignmentFilters;
use crate::form::{self, FieldErrors, ScheduleRequest};
use crate::normalize::{normalize, NormalizedCalendar};
use crate::queries;
use crate::state::WeekCache;
use crate::view::{self, WeekView};
use crate::week::Week;

pub struct AppState {
    pub db: DatabaseConnection,
    pub employees: Vec<Employee>,
    pub cache: WeekCache,
}

/// Simple liveness endpoint for orchestration.
async fn health() -> &'static str {
    "OK"
}

/* ---------------- Error helpers ---------------- */

#[derive(Serialize, Debug)]
struct ErrorResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<FieldErrors>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn int_err<E: std::fmt::Display>(e: E) -> ApiError {
    error!("db error: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: Some(e.to_string()),
            errors: None,
        }),
    )
}

fn not_found(msg: String) -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: Some(msg),
            errors: None,
        }),
    )
}

fn invalid(errors: FieldErrors) -> ApiError {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ErrorResponse {
            error: None,
            errors: Some(errors),
        }),
    )
}

fn app_err(e: AppError) -> ApiError {
    match e {
        AppError::NotFound(_) => not_found(e.to_string()),
        other => int_err(other),
    }
}

/* ---------------- Calendar ---------------- */

#[derive(Deserialize)]
struct RangeParams {
    from: NaiveDate,
    to: NaiveDate,
}

async fn get_calendar(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RangeParams>,
) -> Result<Json<NormalizedCalendar>, ApiError> {
    let rows = queries::calendar_rows(&state.db, params.from, params.to)
        .await
        .map_err(app_err)?;
    Ok(Json(normalize(rows)))
}

#[derive(Deserialize)]
struct WeekParams {
    date: Option<NaiveDate>,
    order_id: Option<i32>,
    /// Comma-separated employee names.
    employees: Option<String>,
    /// Comma-separated stage statuses.
    statuses: Option<String>,
}

fn split_csv(raw: Option<String>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

async fn get_week(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WeekParams>,
) -> Result<Json<WeekView>, ApiError> {
    let today = Local::now().date_naive();
    let week = Week::containing(params.date.unwrap_or(today));

    let data = match state.cache.get(week.start()).await {
        Some(snapshot) => snapshot,
        None => {
            let ticket = state.cache.begin();
            let rows = queries::calendar_rows(&state.db, week.start(), week.end())
                .await
                .map_err(app_err)?;
            let snapshot = Arc::new(normalize(rows));
            if !state.cache.install(ticket, week.start(), snapshot.clone()).await {
                info!(ticket, "week snapshot arrived late; serving it uncached");
            }
            snapshot
        }
    };

    let filters = AssignmentFilters {
        order_id: params.order_id,
        employee_names: split_csv(params.employees),
        statuses: split_csv(params.statuses),
    };
    Ok(Json(view::assemble(&week, &data, &filters, today)))
}

/* ---------------- Assignments ---------------- */

/// Resolves the detail the selected stage hangs off and checks that it
/// belongs to the selected order. These failures happen after field
/// validation passed, so they report as form-level errors.
async fn resolve_stage_detail(
    db: &DatabaseConnection,
    req: &ScheduleRequest,
) -> Result<i32, ApiError> {
    let Some(stage) = queries::stage_by_id(db, req.order_stage_id)
        .await
        .map_err(app_err)?
    else {
        return Err(invalid(FieldErrors::single(
            "form",
            "Selected stage no longer exists",
        )));
    };
    let Some(detail_id) = stage.order_detail_id else {
        return Err(invalid(FieldErrors::single(
            "form",
            "Selected stage is not linked to an order detail",
        )));
    };
    let details = queries::order_details(db, req.order_id)
        .await
        .map_err(app_err)?;
    if !details.iter().any(|d| d.detail_id == detail_id) {
        return Err(invalid(FieldErrors::single(
            "form",
            "Selected stage does not belong to the selected order",
        )));
    }
    Ok(detail_id)
}

async fn create_assignment_batch(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ScheduleRequest>,
) -> Result<(StatusCode, Json<Vec<OrderStageAssignment>>), ApiError> {
    if let Err(errors) = req.validate() {
        return Err(invalid(errors));
    }
    let detail_id = resolve_stage_detail(&state.db, &req).await?;
    let drafts = req.expand(Some(detail_id), Utc::now());
    if drafts.is_empty() {
        return Err(invalid(FieldErrors::single("form", "No assignments to create")));
    }
    let count = drafts.len();
    let created = queries::create_assignments(&state.db, drafts)
        .await
        .map_err(app_err)?;
    state.cache.invalidate().await;
    info!(count, stage = req.order_stage_id, "created assignment batch");
    if let Err(e) = queries::log_activity(
        &state.db,
        "assignment.created",
        serde_json::json!({ "count": count, "order_stage_id": req.order_stage_id }),
    )
    .await
    {
        warn!("failed to record activity: {}", e);
    }
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_assignment(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
    Json(mut req): Json<ScheduleRequest>,
) -> Result<Json<OrderStageAssignment>, ApiError> {
    // Edits are single-day; an end date on the payload is ignored.
    req.multi_day = false;
    if let Err(errors) = req.validate() {
        return Err(invalid(errors));
    }
    let detail_id = resolve_stage_detail(&state.db, &req).await?;
    let drafts = req.expand(Some(detail_id), Utc::now());
    let Some(patch) = form::update_patch(&drafts) else {
        return Err(invalid(FieldErrors::single("form", "No update to apply")));
    };
    let updated = queries::update_assignment(&state.db, id, patch)
        .await
        .map_err(app_err)?;
    state.cache.invalidate().await;
    info!(id, "updated assignment");
    if let Err(e) = queries::log_activity(
        &state.db,
        "assignment.updated",
        serde_json::json!({ "assignment_id": id }),
    )
    .await
    {
        warn!("failed to record activity: {}", e);
    }
    Ok(Json(updated))
}

async fn delete_assignment(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
) -> Result<StatusCode, ApiError> {
    queries::delete_assignment(&state.db, id)
        .await
        .map_err(app_err)?;
    state.cache.invalidate().await;
    info!(id, "deleted assignment");
    if let Err(e) = queries::log_activity(
        &state.db,
        "assignment.deleted",
        serde_json::json!({ "assignment_id": id }),
    )
    .await
    {
        warn!("failed to record activity: {}", e);
    }
    Ok(StatusCode::NO_CONTENT)
}

/* ---------------- Orders and lookups ---------------- */

async fn list_orders(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Order>>, ApiError> {
    let orders = queries::orders_with_stages(&state.db).await.map_err(app_err)?;
    Ok(Json(orders))
}

async fn get_order(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Order>, ApiError> {
    let order = queries::order_with_stages(&state.db, id).await.map_err(app_err)?;
    Ok(Json(order))
}

async fn list_order_details(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<OrderDetail>>, ApiError> {
    let details = queries::order_details(&state.db, id).await.map_err(app_err)?;
    Ok(Json(details))
}

async fn list_detail_stages(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<OrderStage>>, ApiError> {
    let stages = queries::stages_for_detail(&state.db, id).await.map_err(app_err)?;
    Ok(Json(stages))
}

async fn list_employees(State(state): State<Arc<AppState>>) -> Json<Vec<Employee>> {
    Json(state.employees.clone())
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/calendar", get(get_calendar))
        .route("/calendar/week", get(get_week))
        .route("/assignments", post(create_assignment_batch))
        .route("/assignments/:id", put(update_assignment).delete(delete_assignment))
        .route("/orders", get(list_orders))
        .route("/orders/:id", get(get_order))
        .route("/orders/:id/details", get(list_order_details))
        .route("/details/:id/stages", get(list_detail_stages))
        .route("/employees", get(list_employees))
        .with_state(state)
        .layer(CorsLayer::permissive())
}
