use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod auth;
mod config;
mod db;
mod error;
mod handlers;
mod models;
mod services;
mod validate;

use config::Config;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<Config>,
}

fn app(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz));

    // Two parallel resource families (mood, life) behind one generic
    // handler set; the API-key guard runs before any of them.
    let api_routes = Router::new()
        .route("/api/:kind", get(handlers::records::list_records))
        .route("/api/:kind", post(handlers::records::create_record))
        .route("/api/:kind/:id", get(handlers::records::get_record))
        .route("/api/:kind/:id", put(handlers::records::replace_record))
        .route("/api/:kind/:id", delete(handlers::records::delete_record))
        .route(
            "/api/:kind/:id/status",
            put(handlers::records::update_record_status),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::require_api_key,
        ));

    let cors = CorsLayer::new()
        .allow_origin(
            state
                .config
                .frontend_url
                .parse::<axum::http::HeaderValue>()
                .expect("FRONTEND_URL must be a valid origin"),
        )
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ]);

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moodtracker_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Arc::new(Config::from_env());

    // Database
    let db = db::create_pool(&config.database_url).await;

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations applied");

    let state = AppState {
        db,
        config: config.clone(),
    };

    let app = app(state);

    let addr = config.listen_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    const TEST_KEY: &str = "test-api-key";

    /// Router wired to a lazy pool: no connection is made until a query
    /// actually runs, which lets everything short of the store be tested
    /// without a database.
    fn test_app() -> Router {
        let config = Arc::new(Config {
            database_url: "postgres://localhost/moodtracker_test".into(),
            host: "127.0.0.1".into(),
            port: 0,
            frontend_url: "http://localhost:3000".into(),
            api_key: TEST_KEY.into(),
        });
        let db = PgPoolOptions::new()
            .connect_lazy(&config.database_url)
            .expect("lazy pool");
        app(AppState { db, config })
    }

    async fn send(req: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = test_app().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn put_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("PUT")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let (status, body) = send(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "moodtracker-api");
    }

    #[tokio::test]
    async fn test_missing_api_key_is_401_with_fixed_body() {
        let (status, body) = send(
            Request::builder()
                .uri("/api/mood")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            body,
            serde_json::json!({
                "error": "Unauthorized",
                "message": "Anda tidak memiliki apiKey",
                "status": 401,
            })
        );
    }

    #[tokio::test]
    async fn test_wrong_api_key_is_401() {
        let (status, _) = send(
            Request::builder()
                .uri("/api/life?apiKey=wrong")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_create_with_short_title_is_422() {
        let uri = format!("/api/mood?apiKey={TEST_KEY}");
        let (status, body) = send(post_json(
            &uri,
            serde_json::json!({
                "title": "Ok",
                "category": "senang",
                "status": "Pending",
                "date": "2099-01-01",
            }),
        ))
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["message"], "Validation failed");
        assert_eq!(body["errors"]["title"][0], "Judul minimal harus 3 karakter");
    }

    #[tokio::test]
    async fn test_create_collects_all_field_errors() {
        let uri = format!("/api/life?apiKey={TEST_KEY}");
        let (status, body) = send(post_json(&uri, serde_json::json!({}))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["errors"]["title"].is_array());
        assert!(body["errors"]["category"].is_array());
        assert!(body["errors"]["date"].is_array());
        // status is defaulted to Pending on create, so it must NOT error
        assert!(body["errors"].get("status").is_none());
    }

    #[tokio::test]
    async fn test_invalid_status_update_is_422() {
        let uri = format!("/api/mood/1/status?apiKey={TEST_KEY}");
        let (status, body) = send(put_json(&uri, serde_json::json!({ "status": "Done" }))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body["errors"]["status"][0],
            "Status tidak valid. Gunakan Completed atau Pending saja."
        );
    }

    #[tokio::test]
    async fn test_missing_status_update_is_422() {
        let uri = format!("/api/life/1/status?apiKey={TEST_KEY}");
        let (status, body) = send(put_json(&uri, serde_json::json!({}))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body["errors"]["status"][0],
            "Status wajib diisi. Jangan lupa pilih Completed atau Pending."
        );
    }
}
