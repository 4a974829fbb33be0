// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JSON API over the record store, analytics and chart builders.

use crate::db::{StorageInfo, UpsertOutcome};
use crate::error::{AppError, Result};
use crate::models::body::BodyField;
use crate::models::plan::{DailyTargets, DAILY_TARGETS};
use crate::models::{
    BodyMetric, DietEntry, ProgressReport, TabularRecord, WeeklyPlan, WeeklySummary, WorkoutEntry,
};
use crate::services::analytics;
use crate::services::charts::{self, ComplianceChart, Heatmap, Series, TimePoint, TrendSeries};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Entries shown in the "recent" dashboard panels.
const RECENT_LIMIT: usize = 5;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/body-metrics",
            get(list_records::<BodyMetric>).post(save_record::<BodyMetric>),
        )
        .route(
            "/api/workouts",
            get(list_records::<WorkoutEntry>).post(save_record::<WorkoutEntry>),
        )
        .route(
            "/api/diet",
            get(list_records::<DietEntry>).post(save_record::<DietEntry>),
        )
        .route("/api/summary/{week}", get(get_weekly_summary))
        .route("/api/stats", get(get_stats))
        .route("/api/recent", get(get_recent))
        .route("/api/charts/compliance", get(get_compliance_chart))
        .route("/api/charts/body/{field}", get(get_body_chart))
        .route("/api/charts/measurements", get(get_measurements_chart))
        .route("/api/charts/weight-change", get(get_weight_change_chart))
        .route("/api/charts/heatmap", get(get_heatmap))
        .route("/api/export/body-metrics.csv", get(export_body_metrics))
        .route("/api/storage", get(get_storage))
        .route("/api/plan", get(get_plan))
        .route("/api/reset", post(reset_data))
}

// ─── Records ─────────────────────────────────────────────────

/// Result of a save.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SaveResponse {
    pub success: bool,
    #[cfg_attr(feature = "binding-generation", ts(type = "\"inserted\" | \"updated\""))]
    pub outcome: UpsertOutcome,
}

async fn list_records<R>(State(state): State<Arc<AppState>>) -> Json<Vec<R>>
where
    R: TabularRecord + Serialize,
{
    Json(state.store.load::<R>().await)
}

async fn save_record<R>(
    State(state): State<Arc<AppState>>,
    Json(record): Json<R>,
) -> Result<Json<SaveResponse>>
where
    R: TabularRecord + DeserializeOwned,
{
    let outcome = state.store.save(record).await?;
    Ok(Json(SaveResponse {
        success: true,
        outcome,
    }))
}

// ─── Summaries ───────────────────────────────────────────────

async fn get_weekly_summary(
    State(state): State<Arc<AppState>>,
    Path(week): Path<String>,
) -> Json<WeeklySummary> {
    Json(state.store.weekly_summary(&week).await)
}

async fn get_stats(State(state): State<Arc<AppState>>) -> Json<ProgressReport> {
    let records = state.store.load_all().await;
    Json(analytics::progress_report(
        &records.body,
        &records.workouts,
        &records.diet,
    ))
}

#[derive(Serialize)]
pub struct RecentActivity {
    pub body_metrics: Vec<BodyMetric>,
    pub completed_workouts: Vec<WorkoutEntry>,
}

async fn get_recent(State(state): State<Arc<AppState>>) -> Json<RecentActivity> {
    let records = state.store.load_all().await;
    Json(RecentActivity {
        body_metrics: analytics::recent_body_metrics(&records.body, RECENT_LIMIT),
        completed_workouts: analytics::recent_completed_workouts(&records.workouts, RECENT_LIMIT),
    })
}

// ─── Charts ──────────────────────────────────────────────────

async fn get_compliance_chart(State(state): State<Arc<AppState>>) -> Json<ComplianceChart> {
    let records = state.store.load_all().await;
    Json(charts::compliance_chart(&records.workouts, &records.diet))
}

async fn get_body_chart(
    State(state): State<Arc<AppState>>,
    Path(field): Path<String>,
) -> Result<Json<TrendSeries>> {
    let field = BodyField::from_column(&field)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown body metric field: {}", field)))?;

    let body = state.store.load::<BodyMetric>().await;
    charts::body_series_with_trend(&body, field)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No {} data recorded", field.column())))
}

async fn get_measurements_chart(State(state): State<Arc<AppState>>) -> Json<Vec<Series>> {
    let body = state.store.load::<BodyMetric>().await;
    Json(charts::measurement_series(&body))
}

async fn get_weight_change_chart(State(state): State<Arc<AppState>>) -> Json<Vec<TimePoint>> {
    let body = state.store.load::<BodyMetric>().await;
    Json(charts::weight_change_series(&body))
}

async fn get_heatmap(State(state): State<Arc<AppState>>) -> Result<Json<Heatmap>> {
    let workouts = state.store.load::<WorkoutEntry>().await;
    charts::completion_heatmap(&workouts)
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No workout data recorded".to_string()))
}

// ─── Storage ─────────────────────────────────────────────────

async fn export_body_metrics(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse> {
    let csv = state.store.export_body_metrics_csv().await?;
    let filename = format!(
        "attachment; filename=\"body_metrics_{}.csv\"",
        chrono::Local::now().format("%Y%m%d")
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, filename),
        ],
        csv,
    ))
}

async fn get_storage(State(state): State<Arc<AppState>>) -> Result<Json<StorageInfo>> {
    Ok(Json(state.store.describe().await?))
}

#[derive(Serialize)]
pub struct PlanResponse {
    pub plan: WeeklyPlan,
    pub daily_targets: DailyTargets,
}

async fn get_plan() -> Json<PlanResponse> {
    Json(PlanResponse {
        plan: WeeklyPlan::get(),
        daily_targets: DAILY_TARGETS,
    })
}

/// Reset must be confirmed explicitly; it cannot be undone.
#[derive(Deserialize)]
struct ResetRequest {
    #[serde(default)]
    confirm: bool,
}

#[derive(Serialize)]
pub struct ResetResponse {
    pub success: bool,
    pub message: String,
}

async fn reset_data(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ResetRequest>,
) -> Result<Json<ResetResponse>> {
    if !req.confirm {
        return Err(AppError::BadRequest(
            "Reset deletes all data; send {\"confirm\": true} to proceed".to_string(),
        ));
    }

    tracing::warn!(backend = state.store.backend_name(), "Resetting all data");
    state.store.reset().await?;

    Ok(Json(ResetResponse {
        success: true,
        message: "All data has been reset".to_string(),
    }))
}
