use std::collections::HashMap;

use axum::{
    extract::{Query, Request, State},
    middleware::Next,
    response::Response,
};

use crate::error::AppError;
use crate::AppState;

/// Static API-key guard. The mobile client sends the key as the `apiKey`
/// query parameter on every request; a missing or mismatched key is
/// rejected before any routing to the record service happens.
pub async fn require_api_key(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Query(params): Query<HashMap<String, String>> =
        Query::try_from_uri(req.uri()).unwrap_or_else(|_| Query(HashMap::new()));

    match params.get("apiKey") {
        Some(key) if !key.is_empty() && *key == state.config.api_key => Ok(next.run(req).await),
        _ => Err(AppError::Unauthorized),
    }
}
