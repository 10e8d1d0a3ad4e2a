//! HTTP surface (C8): a thin axum wrapper around [`generate_schedule`].
//!
//! Router construction is kept separate from handler bodies, following the
//! same shape the rest of this codebase uses for its application layer. No
//! scheduling logic lives here; every handler does DTO conversion and a
//! single call into the core.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::demo_data::{self, DemoData};
use crate::domain::{Config, PinnedShift, ShiftKind};
use crate::error::ScheduleError;
use crate::solver::{self, ScheduleResponse, DEFAULT_MAX_TIME_SECONDS};

/// Shared, immutable application state. There is no job table: every request
/// is solved synchronously and carries no state into the next one (§5).
pub struct AppState {
    pub max_time_seconds: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            max_time_seconds: DEFAULT_MAX_TIME_SECONDS,
        }
    }
}

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedShiftDto {
    pub employee_idx: usize,
    /// 0-based day of month, matching the programmatic entry point's wire format.
    pub day: usize,
    pub shift_type: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    pub year: i32,
    pub month: u32,
    pub employees: Vec<String>,
    #[serde(default)]
    pub work_days: Option<u32>,
    #[serde(default)]
    pub fixed_shifts: Vec<FixedShiftDto>,
}

const DEFAULT_WORK_DAYS: u32 = 20;

impl ScheduleRequest {
    pub fn into_config(self) -> Result<Config, ScheduleError> {
        let work_days = self.work_days.unwrap_or(DEFAULT_WORK_DAYS) as usize;
        let mut pinned = Vec::with_capacity(self.fixed_shifts.len());
        for fixed in self.fixed_shifts {
            pinned.push(PinnedShift {
                employee_index: fixed.employee_idx,
                day_index: fixed.day,
                kind: ShiftKind::from_code(fixed.shift_type)?,
            });
        }
        Config::new(self.year, self.month, self.employees, work_days, pinned)
    }
}

// ============================================================================
// Router and Handlers
// ============================================================================

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/info", get(info))
        .route("/demo-data", get(list_demo_data))
        .route("/demo-data/{id}", get(get_demo_data))
        .route("/schedules", post(create_schedule))
        .with_state(state)
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// GET /health - liveness probe.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "UP" })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub solver_engine: &'static str,
}

/// GET /info - crate name, version, solver engine identifier.
async fn info() -> Json<InfoResponse> {
    Json(InfoResponse {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        solver_engine: "selen",
    })
}

/// GET /demo-data - list available demo-data presets.
async fn list_demo_data() -> Json<Vec<&'static str>> {
    Json(demo_data::list_demo_data())
}

/// GET /demo-data/{id} - materialize one preset as a `ScheduleRequest`.
async fn get_demo_data(Path(id): Path<String>) -> Result<Json<ScheduleRequest>, ScheduleError> {
    let demo: DemoData = id
        .parse()
        .map_err(|_| ScheduleError::InvalidInput(format!("unknown demo-data id '{id}'")))?;
    Ok(Json(demo_data::generate(demo)))
}

/// POST /schedules - run `generate_schedule` synchronously and return the
/// result or a mapped error.
async fn create_schedule(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ScheduleRequest>,
) -> Result<Json<ScheduleResponse>, ScheduleError> {
    let config = request.into_config()?;
    let response = solver::generate_schedule(config, state.max_time_seconds)?;
    Ok(Json(response))
}
