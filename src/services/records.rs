//! The record service: the only code that writes to the mood/life tables.
//! Every create/replace goes through the validator first; a failed
//! validation never touches the store.

use chrono::Utc;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::models::record::{Kind, Record, RecordPayload, Status};
use crate::validate;

pub async fn list(db: &PgPool, kind: Kind) -> AppResult<Vec<Record>> {
    let spec = kind.spec();
    let records = sqlx::query_as::<_, Record>(&format!(
        "SELECT * FROM {} ORDER BY created_at ASC, id ASC",
        spec.table
    ))
    .fetch_all(db)
    .await?;

    Ok(records)
}

pub async fn get(db: &PgPool, kind: Kind, id: i64) -> AppResult<Record> {
    let spec = kind.spec();
    sqlx::query_as::<_, Record>(&format!("SELECT * FROM {} WHERE id = $1", spec.table))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} not found", spec.label)))
}

pub async fn create(db: &PgPool, kind: Kind, mut payload: RecordPayload) -> AppResult<Record> {
    let spec = kind.spec();

    // Status defaults to Pending when omitted, before validation runs, so
    // a bare payload is not rejected for the field it was never asked for.
    if payload.status.as_deref().map_or(true, |s| s.trim().is_empty()) {
        payload.status = Some(Status::Pending.as_str().to_string());
    }

    let draft = validate::validate(spec, &payload, Utc::now().date_naive())
        .map_err(AppError::Validation)?;

    let record = sqlx::query_as::<_, Record>(&format!(
        r#"
        INSERT INTO {} (title, category, status, date)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
        spec.table
    ))
    .bind(&draft.title)
    .bind(&draft.category)
    .bind(draft.status)
    .bind(draft.date)
    .fetch_one(db)
    .await?;

    tracing::info!(kind = spec.label, id = record.id, "record created");
    Ok(record)
}

/// Full replacement: every mutable field is revalidated and overwritten.
pub async fn replace(
    db: &PgPool,
    kind: Kind,
    id: i64,
    payload: RecordPayload,
) -> AppResult<Record> {
    let spec = kind.spec();

    // Existence first: a missing id is a 404 even when the payload is bad.
    get(db, kind, id).await?;

    let draft = validate::validate(spec, &payload, Utc::now().date_naive())
        .map_err(AppError::Validation)?;

    let record = sqlx::query_as::<_, Record>(&format!(
        r#"
        UPDATE {} SET
            title = $2,
            category = $3,
            status = $4,
            date = $5,
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
        spec.table
    ))
    .bind(id)
    .bind(&draft.title)
    .bind(&draft.category)
    .bind(draft.status)
    .bind(draft.date)
    .fetch_one(db)
    .await?;

    Ok(record)
}

/// Status-only update: mutates `status` and `updated_at`, nothing else,
/// even though the request body carries no other field to begin with.
pub async fn update_status(
    db: &PgPool,
    kind: Kind,
    id: i64,
    raw_status: Option<&str>,
) -> AppResult<Record> {
    let spec = kind.spec();

    let status = validate::validate_status(spec, raw_status).map_err(AppError::Validation)?;

    sqlx::query_as::<_, Record>(&format!(
        "UPDATE {} SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        spec.table
    ))
    .bind(id)
    .bind(status)
    .fetch_optional(db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("{} not found", spec.label)))
}

/// Delete and hand the prior snapshot back as confirmation.
pub async fn delete(db: &PgPool, kind: Kind, id: i64) -> AppResult<Record> {
    let spec = kind.spec();

    sqlx::query_as::<_, Record>(&format!(
        "DELETE FROM {} WHERE id = $1 RETURNING *",
        spec.table
    ))
    .bind(id)
    .fetch_optional(db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("{} not found", spec.label)))
}
