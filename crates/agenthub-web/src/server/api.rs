//! REST API endpoints over the shared marketplace.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::info;

use agenthub_core::community::{time_ago, NewDiscussion};
use agenthub_core::marketplace::{SubmitError, SUBMIT_OK};
use agenthub_core::query::QuerySpec;
use agenthub_core::submission::SubmissionForm;

use super::AppState;

type Reply = (StatusCode, Json<Value>);

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/agents", get(list_agents))
        .route("/api/agents/{id}", get(get_agent))
        .route("/api/categories", get(get_categories))
        .route("/api/stats", get(get_stats))
        .route("/api/contributors", get(get_contributors))
        .route("/api/featured", get(get_featured))
        .route("/api/submissions", post(post_submission))
        .route("/api/discussions", get(list_discussions).post(post_discussion))
        .route("/api/discussions/{id}/like", post(post_like))
        .route("/api/notifications", get(get_notifications))
        .route("/api/refresh", post(post_refresh))
}

// --- Catalog ---

async fn list_agents(
    State(state): State<Arc<AppState>>,
    Query(spec): Query<QuerySpec>,
) -> Json<Value> {
    let market = state.marketplace.read().await;
    let catalog = market.catalog();
    let agents = catalog.query(&spec);
    Json(json!({
        "total": catalog.len(),
        "showing": agents.len(),
        "agents": agents,
    }))
}

async fn get_agent(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Reply {
    let market = state.marketplace.read().await;
    match market.catalog().get(&id) {
        Some(entry) => (StatusCode::OK, Json(json!(entry))),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": format!("agent '{}' not found", id)})),
        ),
    }
}

async fn get_categories(State(state): State<Arc<AppState>>) -> Json<Value> {
    let market = state.marketplace.read().await;
    Json(json!(market.catalog().categories()))
}

async fn get_stats(State(state): State<Arc<AppState>>) -> Json<Value> {
    let market = state.marketplace.read().await;
    let catalog = market.catalog();

    let mut difficulty = Map::new();
    for (level, count) in catalog.difficulty_counts() {
        difficulty.insert(level.as_str().to_string(), json!(count));
    }

    Json(json!({
        "stats": catalog.stats(),
        "difficulty": difficulty,
        "sources": catalog.source_stats(),
        "last_error": market.last_error,
    }))
}

#[derive(Deserialize)]
struct LimitQuery {
    limit: Option<usize>,
}

async fn get_contributors(
    State(state): State<Arc<AppState>>,
    Query(q): Query<LimitQuery>,
) -> Json<Value> {
    let market = state.marketplace.read().await;
    let limit = q.limit.unwrap_or(market.config().top_contributors);
    Json(json!(market.catalog().top_contributors(limit)))
}

async fn get_featured(
    State(state): State<Arc<AppState>>,
    Query(q): Query<LimitQuery>,
) -> Json<Value> {
    let market = state.marketplace.read().await;
    let count = q.limit.unwrap_or(market.config().featured_count);
    Json(json!(market.catalog().featured(count)))
}

// --- Submissions ---

async fn post_submission(
    State(state): State<Arc<AppState>>,
    Json(form): Json<SubmissionForm>,
) -> Reply {
    let mut market = state.marketplace.write().await;
    match market.submit(&form) {
        Ok(submission) => (
            StatusCode::OK,
            Json(json!({"ok": true, "id": submission.id, "message": SUBMIT_OK})),
        ),
        Err(SubmitError::Invalid(errors)) => {
            let message = SubmitError::Invalid(errors.clone()).user_message();
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({"ok": false, "error": message, "errors": errors})),
            )
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"ok": false, "error": e.user_message()})),
        ),
    }
}

// --- Community ---

async fn list_discussions(State(state): State<Arc<AppState>>) -> Json<Value> {
    let market = state.marketplace.read().await;
    let now = Utc::now();
    let list: Vec<Value> = market
        .discussions()
        .iter()
        .map(|d| {
            let mut value = json!(d);
            value["time_ago"] = json!(time_ago(d.created_at, now));
            value
        })
        .collect();
    Json(json!(list))
}

async fn post_discussion(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewDiscussion>,
) -> Reply {
    let mut market = state.marketplace.write().await;
    match market.create_discussion(body) {
        Some(discussion) => (StatusCode::OK, Json(json!({"ok": true, "discussion": discussion}))),
        None => (
            StatusCode::BAD_REQUEST,
            Json(json!({"ok": false, "error": "title and content are required"})),
        ),
    }
}

async fn post_like(State(state): State<Arc<AppState>>, Path(id): Path<u64>) -> Reply {
    let mut market = state.marketplace.write().await;
    match market.like_discussion(id) {
        Some(likes) => (StatusCode::OK, Json(json!({"ok": true, "id": id, "likes": likes}))),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"ok": false, "error": format!("discussion {} not found", id)})),
        ),
    }
}

// --- Notifications ---

async fn get_notifications(State(state): State<Arc<AppState>>) -> Json<Value> {
    let mut market = state.marketplace.write().await;
    Json(json!(market.active_notifications()))
}

// --- Refresh ---

async fn post_refresh(State(state): State<Arc<AppState>>) -> Json<Value> {
    // Fetch without holding the lock so readers keep the old catalog meanwhile
    let source = state.marketplace.read().await.source().clone();
    info!("Refreshing catalog from {}", source.describe());
    let loaded = source.load().await;

    let mut market = state.marketplace.write().await;
    let ok = market.apply_refresh(loaded);
    Json(json!({
        "ok": ok,
        "total": market.catalog().len(),
        "error": market.last_error,
    }))
}
