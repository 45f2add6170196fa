use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::error::AppResult;
use crate::models::record::{Kind, Record, RecordPayload, StatusPayload};
use crate::services::records;
use crate::AppState;

pub async fn list_records(
    State(state): State<AppState>,
    Path(kind): Path<Kind>,
) -> AppResult<Json<Vec<Record>>> {
    let records = records::list(&state.db, kind).await?;
    Ok(Json(records))
}

pub async fn get_record(
    State(state): State<AppState>,
    Path((kind, id)): Path<(Kind, i64)>,
) -> AppResult<Json<Record>> {
    let record = records::get(&state.db, kind, id).await?;
    Ok(Json(record))
}

pub async fn create_record(
    State(state): State<AppState>,
    Path(kind): Path<Kind>,
    Json(payload): Json<RecordPayload>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let record = records::create(&state.db, kind, payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": format!("{} created successfully", kind.spec().label),
            "data": record,
        })),
    ))
}

pub async fn replace_record(
    State(state): State<AppState>,
    Path((kind, id)): Path<(Kind, i64)>,
    Json(payload): Json<RecordPayload>,
) -> AppResult<Json<Value>> {
    let record = records::replace(&state.db, kind, id, payload).await?;

    Ok(Json(json!({
        "message": format!("{} updated successfully", kind.spec().label),
        "data": record,
    })))
}

pub async fn update_record_status(
    State(state): State<AppState>,
    Path((kind, id)): Path<(Kind, i64)>,
    Json(body): Json<StatusPayload>,
) -> AppResult<Json<Value>> {
    let record = records::update_status(&state.db, kind, id, body.status.as_deref()).await?;

    Ok(Json(json!({
        "message": format!("{} status updated successfully", kind.spec().label),
        "data": record,
    })))
}

pub async fn delete_record(
    State(state): State<AppState>,
    Path((kind, id)): Path<(Kind, i64)>,
) -> AppResult<Json<Value>> {
    let record = records::delete(&state.db, kind, id).await?;

    Ok(Json(json!({
        "message": format!("{} deleted successfully", kind.spec().label),
        "deleted": record,
    })))
}
