//! HTTP surface of the board.
//!
//! [`router`] builds the axum [`Router`] over a [`Store`]; [`serve`] opens the
//! configured database and runs it until ctrl-c or SIGTERM.

use anyhow::{Context, Result};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::board::types::{Comment, IdeaSummary, IdeaUpdate, LikeToggle, NewComment, NewIdea};
use crate::board::{comments, ideas, likes};
use crate::config::{BoardConfig, ServerConfig};
use crate::db::{self, Store};
use crate::error::BoardError;

/// Error returned by every handler.
#[derive(Debug)]
pub enum ApiError {
    Board(BoardError),
    /// The path, query or body could not be parsed into the handler's input.
    Rejected(String),
}

impl From<BoardError> for ApiError {
    fn from(err: BoardError) -> Self {
        Self::Board(err)
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Rejected(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Rejected(rejection.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Rejected(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            Self::Board(BoardError::IdeaNotFound(id)) => {
                tracing::debug!(id, "idea not found");
                (
                    StatusCode::NOT_FOUND,
                    BoardError::IdeaNotFound(id).to_string(),
                )
            }
            Self::Board(other) => {
                tracing::error!(error = %other, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            // Every malformed input is reported as 422, whichever extractor caught it.
            Self::Rejected(detail) => {
                tracing::debug!(%detail, "request rejected");
                (StatusCode::UNPROCESSABLE_ENTITY, detail)
            }
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

#[derive(Debug, Deserialize)]
pub struct LikeParams {
    pub user_id: String,
}

async fn list_ideas(State(store): State<Store>) -> ApiResult<Vec<IdeaSummary>> {
    let ideas = store.call(|conn| ideas::list_ideas(conn)).await?;
    Ok(Json(ideas))
}

async fn create_idea(
    State(store): State<Store>,
    payload: Result<Json<NewIdea>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(idea) = payload?;
    let id = store
        .call(move |conn| ideas::create_idea(conn, &idea))
        .await?;
    tracing::info!(id, "idea created");
    Ok(Json(json!({ "message": "Idea added", "id": id })))
}

async fn update_idea(
    State(store): State<Store>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<IdeaUpdate>, JsonRejection>,
) -> ApiResult<Value> {
    let Path(idea_id) = path?;
    let Json(idea) = payload?;
    store
        .call(move |conn| ideas::update_idea(conn, idea_id, &idea))
        .await?;
    tracing::info!(id = idea_id, "idea updated");
    Ok(Json(json!({ "message": "Idea updated" })))
}

async fn delete_idea(
    State(store): State<Store>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Value> {
    let Path(idea_id) = path?;
    store
        .call(move |conn| ideas::delete_idea(conn, idea_id))
        .await?;
    tracing::info!(id = idea_id, "idea deleted");
    Ok(Json(json!({ "message": "Idea deleted" })))
}

async fn toggle_like(
    State(store): State<Store>,
    path: Result<Path<i64>, PathRejection>,
    query: Result<Query<LikeParams>, QueryRejection>,
) -> ApiResult<LikeToggle> {
    let Path(idea_id) = path?;
    let Query(LikeParams { user_id }) = query?;
    let toggle = store
        .call(move |conn| likes::toggle_like(conn, idea_id, &user_id))
        .await?;
    tracing::info!(id = idea_id, liked = toggle.liked, "like toggled");
    Ok(Json(toggle))
}

async fn list_comments(
    State(store): State<Store>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Vec<Comment>> {
    let Path(idea_id) = path?;
    let comments = store
        .call(move |conn| comments::list_comments(conn, idea_id))
        .await?;
    Ok(Json(comments))
}

async fn create_comment(
    State(store): State<Store>,
    payload: Result<Json<NewComment>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(comment) = payload?;
    let idea_id = comment.idea_id;
    let id = store
        .call(move |conn| comments::create_comment(conn, &comment))
        .await?;
    tracing::info!(id, idea_id, "comment added");
    Ok(Json(json!({ "message": "Comment added" })))
}

/// CORS for a single allow-listed origin with credentials.
///
/// Only a request whose `Origin` matches gets the allow headers back.
/// Credentials rule out the `*` wildcard, so methods and headers are mirrored
/// from the preflight request instead.
fn cors_layer(origin: &str) -> Result<CorsLayer> {
    let origin: HeaderValue = origin
        .parse()
        .with_context(|| format!("invalid allowed origin: {origin}"))?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list([origin]))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

/// Build the board router over `store`.
pub fn router(store: Store, config: &ServerConfig) -> Result<Router> {
    let cors = cors_layer(&config.allowed_origin)?;

    Ok(Router::new()
        .route("/ideas", get(list_ideas).post(create_idea))
        .route("/ideas/{idea_id}", put(update_idea).delete(delete_idea))
        .route("/ideas/{idea_id}/like", post(toggle_like))
        .route("/ideas/{idea_id}/comments", get(list_comments))
        .route("/comments", post(create_comment))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(store))
}

/// Open the configured database and serve the board over HTTP.
pub async fn serve(config: BoardConfig) -> Result<()> {
    let db_path = config.resolved_db_path();
    let conn = db::open_database(&db_path)?;
    tracing::info!(db = %db_path.display(), "database ready");

    let app = router(Store::new(conn), &config.server)?;

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(
        addr = %bind_addr,
        origin = %config.server.allowed_origin,
        "ideas board listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("ideas board shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
        tracing::info!("received ctrl-c, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                tracing::info!("received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
