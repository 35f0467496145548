use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use engine::persist::SnapshotWriter;
use engine::{Article, ArticleStore, DocId, NewArticle, SearchHit, SortOrder, StoreError};
use parking_lot::RwLock;
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Everything handlers share: the store behind the one lock that spans
/// create, search, retrieve, and reload. `create` checks for duplicate ids
/// before appending, so all mutation goes through the write half. The lock
/// is never held across an await.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<ArticleStore>>,
}

/// Build the application: load the last snapshot from `data_path`, start
/// the background snapshot writer against the same file, and wire the
/// routes.
pub fn build_app(data_path: PathBuf) -> Router {
    let mut store = ArticleStore::new();
    store.reload(&data_path);
    let store = store.with_writer(SnapshotWriter::spawn(data_path));
    let state = AppState {
        store: Arc::new(RwLock::new(store)),
    };

    // A wrong method on a known path answers the same catch-all 404 as
    // an unknown path.
    Router::new()
        .route("/", get(welcome).fallback(unknown_endpoint))
        .route("/articles", post(create_article).fallback(unknown_endpoint))
        .route("/articles/search", get(search_articles).fallback(unknown_endpoint))
        .route("/articles/:id", get(get_article).fallback(unknown_endpoint))
        .fallback(unknown_endpoint)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// JSON error body plus the status to send it under.
pub struct ApiError {
    status: StatusCode,
    message: &'static str,
}

impl ApiError {
    fn bad_request(message: &'static str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message,
        }
    }

    fn not_found(message: &'static str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateId(_) => Self::bad_request("ID already exists."),
            _ => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "An unexpected error occurred.",
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// Create payload as it arrives off the wire: everything optional, so
/// presence checks happen here and the engine only ever sees well-typed
/// input.
#[derive(Deserialize)]
pub struct CreateArticleRequest {
    pub id: Option<DocId>,
    pub title: Option<String>,
    pub body: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub sort: Option<String>,
}

async fn welcome() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the Article Search API",
        "availableEndpoints": [
            { "method": "POST", "path": "/articles", "description": "Create a new article" },
            { "method": "GET", "path": "/articles/search", "description": "Search articles by query" },
            { "method": "GET", "path": "/articles/:id", "description": "Retrieve article by ID" },
        ],
    }))
}

async fn create_article(
    State(state): State<AppState>,
    Json(req): Json<CreateArticleRequest>,
) -> Result<(StatusCode, Json<Article>), ApiError> {
    let title = req.title.filter(|t| !t.is_empty());
    let body = req.body.filter(|b| !b.is_empty());
    let (Some(title), Some(body)) = (title, body) else {
        return Err(ApiError::bad_request("Both title and body are required."));
    };

    let article = state.store.write().create(NewArticle {
        id: req.id,
        title,
        body,
        tags: req.tags,
    })?;
    Ok((StatusCode::CREATED, Json(article)))
}

async fn search_articles(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<SearchHit>>, ApiError> {
    let Some(query) = params.q.filter(|q| !q.is_empty()) else {
        return Err(ApiError::bad_request("Search query is required."));
    };
    let order = SortOrder::parse(params.sort.as_deref().unwrap_or("relevance"));
    let hits = state.store.read().search(&query, order);
    Ok(Json(hits))
}

async fn get_article(
    State(state): State<AppState>,
    Path(id): Path<DocId>,
) -> Result<Json<Article>, ApiError> {
    let store = state.store.read();
    match store.get(id) {
        Some(article) => Ok(Json(article.clone())),
        None => Err(ApiError::not_found("Article not found.")),
    }
}

async fn unknown_endpoint() -> ApiError {
    ApiError::not_found("Endpoint not found.")
}
