use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use db::{
    models::{Comment, Post},
    types::{DbId, VoteValue},
};
use serde::Deserialize;
use web::{errors::AppError, AppState};

use crate::{
    common::votes,
    entities::{Status, VoteReceipt},
    error::ApiError,
    routers::actor,
};

#[derive(Deserialize)]
pub struct NewStatusForm {
    pub title: Option<String>,
    pub content: String,
}

pub async fn http_post_create(
    state: State<Arc<AppState>>,
    headers: HeaderMap,
    Json(form): Json<NewStatusForm>,
) -> Result<impl IntoResponse, AppError> {
    let actor = match actor(&headers, &state.db_pool).await {
        Ok(actor) => actor,
        Err(err) => return Ok(err.into_response()),
    };

    let post = Post::create(&actor.id, form.title, form.content, &state.db_pool).await?;
    Ok(Json(Status::build(post)).into_response())
}

pub async fn http_get_get(
    state: State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = DbId::from(id);
    let post = Post::by_id(&id, &state.db_pool).await?;
    match post {
        Some(post) => Ok(Json(Status::build(post)).into_response()),
        None => Ok(ApiError::new("Record not found", StatusCode::NOT_FOUND).into_response()),
    }
}

#[derive(Deserialize)]
pub struct VoteForm {
    pub value: i16,
}

pub async fn http_post_vote(
    state: State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(form): Json<VoteForm>,
) -> Result<impl IntoResponse, AppError> {
    let actor = match actor(&headers, &state.db_pool).await {
        Ok(actor) => actor,
        Err(err) => return Ok(err.into_response()),
    };

    // Only exactly +1 / -1 ever reaches the engine.
    let requested = match VoteValue::from_i16(form.value) {
        Some(requested) => requested,
        None => {
            return Ok(ApiError::new(
                "value must be 1 or -1",
                StatusCode::UNPROCESSABLE_ENTITY,
            )
            .into_response())
        }
    };

    let id = DbId::from(id);
    match votes::apply_vote(&id, &actor, requested, &state.db_pool).await {
        Ok(outcome) => Ok(Json(VoteReceipt::from(outcome)).into_response()),
        Err(err) => Ok(ApiError::from(err).into_response()),
    }
}

pub async fn http_post_unvote(
    state: State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let actor = match actor(&headers, &state.db_pool).await {
        Ok(actor) => actor,
        Err(err) => return Ok(err.into_response()),
    };

    let id = DbId::from(id);
    match votes::remove_vote(&id, &actor, &state.db_pool).await {
        Ok(outcome) => Ok(Json(VoteReceipt::from(outcome)).into_response()),
        Err(err) => Ok(ApiError::from(err).into_response()),
    }
}

#[derive(Deserialize)]
pub struct NewCommentForm {
    pub content: String,
    pub in_reply: Option<String>,
}

pub async fn http_post_comment(
    state: State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(form): Json<NewCommentForm>,
) -> Result<impl IntoResponse, AppError> {
    let actor = match actor(&headers, &state.db_pool).await {
        Ok(actor) => actor,
        Err(err) => return Ok(err.into_response()),
    };

    let id = DbId::from(id);
    let post = Post::by_id(&id, &state.db_pool).await?;
    if post.is_none() {
        return Ok(ApiError::new("Record not found", StatusCode::NOT_FOUND).into_response());
    }

    let comment = Comment::create(
        &id,
        &actor.id,
        form.content,
        form.in_reply.map(DbId::from),
        &state.db_pool,
    )
    .await?;

    Ok(Json(serde_json::json!({
        "id": comment.id.to_string(),
        "post_id": comment.post_id.to_string(),
        "content": comment.content,
        "created_at": comment.published,
    }))
    .into_response())
}

pub fn statuses(_state: &Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/v1/statuses", post(http_post_create))
        .route("/api/v1/statuses/:id", get(http_get_get))
        .route("/api/v1/statuses/:id/vote", post(http_post_vote))
        .route("/api/v1/statuses/:id/unvote", post(http_post_unvote))
        .route("/api/v1/statuses/:id/comments", post(http_post_comment))
}
