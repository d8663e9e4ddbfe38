//! In-process stand-in for the ContentBird content API, used by the client
//! crate's integration tests. Mirrors the endpoint surface, checks the
//! `CB-KEY` / `CB-SECRET` headers on every content route, and exposes two
//! fault routes (`/api/slow`, `/api/plain`) so the client's timeout and
//! parse-failure classifications can be exercised over real HTTP.

use std::{collections::HashMap, sync::Arc, time::Duration};

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

/// Contents per page on list endpoints.
pub const PAGE_SIZE: usize = 2;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Content {
    pub slug: String,
    pub title: String,
    pub body: String,
    pub section: String,
}

/// Section name to its contents, in insertion order.
pub type Db = Arc<RwLock<HashMap<String, Vec<Content>>>>;

#[derive(Clone)]
struct AppState {
    db: Db,
    key: String,
    secret: String,
}

type ApiResult = Result<Json<Value>, (StatusCode, Json<Value>)>;

pub fn app(key: &str, secret: &str) -> Router {
    let state = AppState {
        db: Arc::new(RwLock::new(HashMap::new())),
        key: key.to_string(),
        secret: secret.to_string(),
    };
    Router::new()
        .route("/api/home/contents", get(home_contents))
        .route("/api/contents", get(all_contents))
        .route("/api/contents/{slug}", get(content_by_slug))
        .route(
            "/api/sections/{section}/contents",
            get(section_contents).post(create_content),
        )
        .route("/api/sections/{section}/contents/new", get(new_content))
        .route("/api/sections/{section}/contents/{slug}", get(section_content))
        .route("/api/slow", get(slow))
        .route("/api/plain", get(plain))
        .with_state(state)
}

pub async fn run(listener: TcpListener, key: &str, secret: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(key, secret)).await
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), (StatusCode, Json<Value>)> {
    let sent = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
    };
    if sent("CB-KEY") == state.key && sent("CB-SECRET") == state.secret {
        Ok(())
    } else {
        Err((
            StatusCode::FORBIDDEN,
            Json(json!({"message": "no channel matching your credentials"})),
        ))
    }
}

fn content_json(content: &Content) -> Value {
    json!({
        "slug": content.slug,
        "title": content.title,
        "body": content.body,
        "section": content.section,
    })
}

fn page_param(params: &HashMap<String, String>) -> usize {
    params
        .get("page")
        .and_then(|page| page.parse().ok())
        .unwrap_or(1)
        .max(1)
}

fn wants(params: &HashMap<String, String>, name: &str) -> bool {
    params
        .get("context")
        .map(|context| context.split(',').any(|entry| entry == name))
        .unwrap_or(false)
}

fn paginate(items: Vec<Value>, page: usize) -> Vec<Value> {
    items
        .chunks(PAGE_SIZE)
        .nth(page - 1)
        .map(<[Value]>::to_vec)
        .unwrap_or_default()
}

fn not_found(message: &str) -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({"message": message})))
}

async fn home_contents(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult {
    authorize(&state, &headers)?;
    let db = state.db.read().await;
    let mut contents: Vec<&Content> = db.values().flatten().collect();
    contents.sort_by(|a, b| a.slug.cmp(&b.slug));
    let items = contents.iter().map(|c| content_json(c)).collect();
    let mut body = json!({"result": paginate(items, page_param(&params))});
    if wants(&params, "sections") {
        let mut sections: Vec<&String> = db.keys().collect();
        sections.sort();
        body["sections"] = json!(sections);
    }
    Ok(Json(body))
}

async fn all_contents(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult {
    authorize(&state, &headers)?;
    let db = state.db.read().await;
    let mut contents: Vec<&Content> = db.values().flatten().collect();
    contents.sort_by(|a, b| a.slug.cmp(&b.slug));
    let items = contents.iter().map(|c| content_json(c)).collect();
    Ok(Json(json!({"result": paginate(items, page_param(&params))})))
}

async fn content_by_slug(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(slug): Path<String>,
) -> ApiResult {
    authorize(&state, &headers)?;
    let db = state.db.read().await;
    db.values()
        .flatten()
        .find(|content| content.slug == slug)
        .map(|content| Json(json!({"content": content_json(content)})))
        .ok_or_else(|| not_found("no content with this slug"))
}

async fn section_contents(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(section): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult {
    authorize(&state, &headers)?;
    let db = state.db.read().await;
    let contents = db
        .get(&section)
        .ok_or_else(|| not_found("no section with this slug"))?;
    let items = contents.iter().map(content_json).collect();
    Ok(Json(json!({"result": paginate(items, page_param(&params))})))
}

async fn section_content(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((section, slug)): Path<(String, String)>,
) -> ApiResult {
    authorize(&state, &headers)?;
    let db = state.db.read().await;
    let contents = db
        .get(&section)
        .ok_or_else(|| not_found("no section with this slug"))?;
    contents
        .iter()
        .find(|content| content.slug == slug)
        .map(|content| Json(json!({"content": content_json(content)})))
        .ok_or_else(|| not_found("no content with this slug"))
}

async fn new_content(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult {
    authorize(&state, &headers)?;
    Ok(Json(json!({"content": {"title": "", "body": ""}})))
}

async fn create_content(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(section): Path<String>,
    Json(body): Json<Value>,
) -> ApiResult {
    authorize(&state, &headers)?;
    // The API expects `{"content": {"title": ..., ...}}` and reports a bare
    // application error when the envelope is missing or malformed.
    let params = body
        .get("content")
        .and_then(Value::as_object)
        .ok_or_else(|| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"message": "an error occurred"})),
            )
        })?;
    let title = params
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let content = Content {
        slug: slugify(&title),
        title,
        body: params
            .get("body")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        section: section.clone(),
    };
    let rendered = content_json(&content);

    let mut db = state.db.write().await;
    let contents = db.entry(section).or_default();
    match contents.iter_mut().find(|c| c.slug == content.slug) {
        Some(existing) => *existing = content,
        None => contents.push(content),
    }
    Ok(Json(json!({"content": rendered})))
}

/// Responds after the client's total timeout has expired.
async fn slow() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(6)).await;
    Json(json!({"message": "too late"}))
}

/// A 200 whose body is not JSON.
async fn plain() -> &'static str {
    "not json"
}

fn slugify(title: &str) -> String {
    let mut slug = String::new();
    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}
