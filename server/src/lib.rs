//! HTTP front end for the in-memory todo store.
//!
//! Maps each route to one `TodoStore` operation and its result to a JSON
//! response. Store errors become status codes through `ApiError`.

pub mod config;
pub mod error;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, HeaderValue, Method, StatusCode},
    routing::{get, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use todo_core::{TodoItem, TodoStore};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use uuid::Uuid;

use crate::config::Config;
use crate::error::ApiError;

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateTodo {
    pub task: String,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

/// Body of `PUT /todo/status`. `item` is the task text, matched ignoring case.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateStatus {
    pub item: String,
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteTodo {
    pub item: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub time: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub message: String,
    pub task: String,
    pub id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusUpdatedResponse {
    pub message: String,
    pub item: String,
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub message: String,
    pub item: String,
}

/// Builds the router around an existing store.
pub fn app(store: TodoStore, config: &Config) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/todo", get(list_todos).post(create_todo).delete(delete_todo))
        .route("/todo/status", put(update_status))
        .route("/todo/priority/{priority}", get(todos_by_priority))
        .route("/todo/status/{status}", get(todos_by_status))
        .route("/search", get(search_todos))
        .with_state(store)
        .layer(cors_layer(config))
        .layer(timeout_layer(config))
        .layer(TraceLayer::new_for_http())
}

pub async fn run(listener: TcpListener, store: TodoStore, config: &Config) -> Result<(), std::io::Error> {
    axum::serve(listener, app(store, config))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origins = config.origins();
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE]);

    if origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(Any);
    }
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

fn timeout_layer(config: &Config) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, config.request_timeout())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        time: Utc::now().to_rfc3339(),
    })
}

async fn list_todos(State(store): State<TodoStore>) -> Json<Vec<TodoItem>> {
    Json(store.all().await)
}

async fn create_todo(
    State(store): State<TodoStore>,
    payload: Result<Json<CreateTodo>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let Json(input) = payload?;
    let id = store
        .add(&input.task, input.priority.as_deref(), input.due_date)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Todo created successfully".to_string(),
            task: input.task,
            id,
        }),
    ))
}

async fn update_status(
    State(store): State<TodoStore>,
    payload: Result<Json<UpdateStatus>, JsonRejection>,
) -> Result<Json<StatusUpdatedResponse>, ApiError> {
    let Json(input) = payload?;
    let updated = store.update_status(&input.item, &input.status).await?;
    Ok(Json(StatusUpdatedResponse {
        message: "Todo status updated successfully".to_string(),
        item: input.item,
        status: updated.status.to_string(),
    }))
}

async fn delete_todo(
    State(store): State<TodoStore>,
    payload: Result<Json<DeleteTodo>, JsonRejection>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let Json(input) = payload?;
    store.delete(&input.item).await?;
    Ok(Json(DeletedResponse {
        message: "Todo deleted successfully".to_string(),
        item: input.item,
    }))
}

async fn todos_by_priority(
    State(store): State<TodoStore>,
    Path(priority): Path<String>,
) -> Result<Json<Vec<TodoItem>>, ApiError> {
    Ok(Json(store.by_priority(&priority).await?))
}

async fn todos_by_status(
    State(store): State<TodoStore>,
    Path(status): Path<String>,
) -> Result<Json<Vec<TodoItem>>, ApiError> {
    Ok(Json(store.by_status(&status).await?))
}

async fn search_todos(
    State(store): State<TodoStore>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<TodoItem>>, ApiError> {
    match query.q.as_deref() {
        Some(q) if !q.is_empty() => Ok(Json(store.search(q).await)),
        _ => Err(ApiError::BadRequest("Search query is required".to_string())),
    }
}
