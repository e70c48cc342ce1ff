//! Route definitions

use super::handlers;
use super::state::AppState;
use axum::http::HeaderValue;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::warn;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .settings
        .server
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // User routes
        .route("/api/users", get(handlers::list_users))
        .route("/api/users/search", get(handlers::search_users))
        .route("/api/users/email/:email", get(handlers::get_user_by_email))
        .route("/api/users/:id", get(handlers::get_user))
        // Data management routes
        .route("/api/data/load", post(handlers::load_data))
        .route("/api/data/status", get(handlers::data_status))
        // Health
        .route("/health", get(handlers::health))
        // Add middleware
        .layer(cors)
        // Add state
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, MemoryStore, User, UserStore};
    use crate::config::Settings;
    use crate::ingest::{IngestionPipeline, PipelineConfig, RetryPolicy};
    use crate::network::HttpClient;
    use crate::source::HttpUserSource;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn app(base_url: &str, users: Vec<User>) -> Router {
        let store = Arc::new(MemoryStore::new());
        if !users.is_empty() {
            store.insert_all(&users).await.unwrap();
        }

        let source = HttpUserSource::new(HttpClient::new().unwrap(), base_url).unwrap();
        let pipeline = IngestionPipeline::with_config(
            Arc::new(source),
            store.clone(),
            PipelineConfig {
                page_size: 30,
                retry: RetryPolicy::none(),
            },
        );

        create_router(AppState::new(Settings::default(), Catalog::new(store), pipeline))
    }

    fn users() -> Vec<User> {
        vec![
            User::new(1, "John", "Doe", "123-45-6789", "john@example.com"),
            User::new(2, "Jane", "Smith", "555-12-0001", "jane@example.com"),
        ]
    }

    async fn send(app: Router, method: &str, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_get_user_by_id() {
        let app = app("http://127.0.0.1:9", users()).await;
        let (status, body) = send(app, "GET", "/api/users/2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["firstName"], "Jane");
    }

    #[tokio::test]
    async fn test_missing_user_is_404() {
        let app = app("http://127.0.0.1:9", users()).await;
        let (status, body) = send(app, "GET", "/api/users/42").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
    }

    #[tokio::test]
    async fn test_get_user_by_email() {
        let app = app("http://127.0.0.1:9", users()).await;
        let (status, body) = send(app, "GET", "/api/users/email/JOHN@example.com").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], 1);
    }

    #[tokio::test]
    async fn test_search_route() {
        let app = app("http://127.0.0.1:9", users()).await;
        let (status, body) = send(app.clone(), "GET", "/api/users/search?q=smith").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([users()[1]]));

        let (status, body) = send(app, "GET", "/api/users/search").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_load_and_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "users": [
                    { "id": 1, "firstName": "Emily", "lastName": "Johnson", "ssn": "900-590-289",
                      "email": "emily@x.com", "age": 28, "role": "admin" },
                    { "id": 2, "firstName": "Michael", "lastName": "Williams", "ssn": "450-101-111",
                      "email": "michael@x.com", "age": 35, "role": "user" }
                ],
                "total": 2, "skip": 0, "limit": 30
            })))
            .expect(1)
            .mount(&server)
            .await;

        let app = app(&server.uri(), vec![]).await;

        let (status, body) = send(app.clone(), "GET", "/api/data/status").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "totalUsers": 0, "dataLoaded": false }));

        let (status, body) = send(app.clone(), "POST", "/api/data/load").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["previousCount"], 0);
        assert_eq!(body["currentCount"], 2);
        assert_eq!(body["loadedCount"], 2);

        // Already loaded: no further fetch
        let (_, body) = send(app.clone(), "POST", "/api/data/load").await;
        assert_eq!(body["loadedCount"], 0);

        let (_, body) = send(app, "GET", "/api/data/status").await;
        assert_eq!(body, json!({ "totalUsers": 2, "dataLoaded": true }));
    }

    #[tokio::test]
    async fn test_failed_load_is_500() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "total": 5 })))
            .mount(&server)
            .await;

        let app = app(&server.uri(), vec![]).await;
        let (status, body) = send(app, "POST", "/api/data/load").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("Error loading users data: "));
    }

    #[tokio::test]
    async fn test_health() {
        let app = app("http://127.0.0.1:9", vec![]).await;
        let (status, body) = send(app, "GET", "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }
}
