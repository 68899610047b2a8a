use crate::errors::AppError;
use crate::models::{
    FilterQuery, LimitRequest, Record, RecordKind, RecordListResponse, RecordRequest,
    SummaryResponse,
};
use crate::state::AppState;
use crate::summary::build_summary;
use crate::ui::render_index;
use crate::validation::{limit_from_request, record_from_request};
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use tracing::info;
use uuid::Uuid;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let tracker = state.tracker.lock().await;
    Html(render_index(&build_summary(&*tracker)))
}

pub async fn get_summary(State(state): State<AppState>) -> Json<SummaryResponse> {
    let tracker = state.tracker.lock().await;
    Json(build_summary(&*tracker))
}

pub async fn list_meals(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Json<RecordListResponse> {
    list_records(&state, RecordKind::Meal, query).await
}

pub async fn list_workouts(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Json<RecordListResponse> {
    list_records(&state, RecordKind::Workout, query).await
}

pub async fn submit_meal(
    State(state): State<AppState>,
    payload: Result<Json<RecordRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Record>), AppError> {
    let Json(payload) = payload?;
    submit_record(&state, RecordKind::Meal, payload).await
}

pub async fn submit_workout(
    State(state): State<AppState>,
    payload: Result<Json<RecordRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Record>), AppError> {
    let Json(payload) = payload?;
    submit_record(&state, RecordKind::Workout, payload).await
}

pub async fn delete_meal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SummaryResponse>, AppError> {
    delete_record(&state, RecordKind::Meal, id).await
}

pub async fn delete_workout(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SummaryResponse>, AppError> {
    delete_record(&state, RecordKind::Workout, id).await
}

pub async fn set_limit(
    State(state): State<AppState>,
    payload: Result<Json<LimitRequest>, JsonRejection>,
) -> Result<Json<SummaryResponse>, AppError> {
    let Json(payload) = payload?;
    let limit = limit_from_request(payload)?;
    let mut tracker = state.tracker.lock().await;
    tracker.set_limit(limit)?;
    info!(limit, "daily limit updated");
    Ok(Json(build_summary(&*tracker)))
}

pub async fn reset(State(state): State<AppState>) -> Result<Json<SummaryResponse>, AppError> {
    let mut tracker = state.tracker.lock().await;
    tracker.reset()?;
    info!("tracker reset");
    Ok(Json(build_summary(&*tracker)))
}

async fn list_records(
    state: &AppState,
    kind: RecordKind,
    query: FilterQuery,
) -> Json<RecordListResponse> {
    let tracker = state.tracker.lock().await;
    let text = query.q.unwrap_or_default();
    let items = tracker.filter(kind, text.trim()).into_iter().cloned().collect();
    Json(RecordListResponse { kind, items })
}

async fn submit_record(
    state: &AppState,
    kind: RecordKind,
    payload: RecordRequest,
) -> Result<(StatusCode, Json<Record>), AppError> {
    let record = record_from_request(payload)?;
    let mut tracker = state.tracker.lock().await;
    match kind {
        RecordKind::Meal => tracker.add_meal(record.clone())?,
        RecordKind::Workout => tracker.add_workout(record.clone())?,
    }
    Ok((StatusCode::CREATED, Json(record)))
}

async fn delete_record(
    state: &AppState,
    kind: RecordKind,
    id: Uuid,
) -> Result<Json<SummaryResponse>, AppError> {
    let mut tracker = state.tracker.lock().await;
    let removed = match kind {
        RecordKind::Meal => tracker.remove_meal(id)?,
        RecordKind::Workout => tracker.remove_workout(id)?,
    };
    if removed.is_none() {
        return Err(AppError::not_found(format!("no {} with id {id}", kind.label())));
    }
    Ok(Json(build_summary(&*tracker)))
}
