use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use db::{models::User, pagination::PaginationQuery, types::DbId};
use serde::Deserialize;
use web::{errors::AppError, AppState};

use crate::{
    common::{comments, follows},
    entities::{Account, Relationship, UserComment},
    error::ApiError,
    routers::actor,
};

#[derive(Deserialize)]
pub struct NewAccountForm {
    pub name: String,
    pub display_name: Option<String>,
    pub bio: Option<String>,
}

pub async fn http_post_create(
    state: State<Arc<AppState>>,
    Json(form): Json<NewAccountForm>,
) -> Result<impl IntoResponse, AppError> {
    if User::by_name(&form.name, &state.db_pool).await?.is_some() {
        return Ok(ApiError::new("Name already taken", StatusCode::UNPROCESSABLE_ENTITY)
            .into_response());
    }

    let user = User::create(form.name, form.display_name, form.bio, &state.db_pool).await?;
    Ok(Json(Account::build(user)).into_response())
}

pub async fn http_get_get(
    state: State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = DbId::from(id);
    let user = User::by_id(&id, &state.db_pool).await?;
    match user {
        Some(user) => Ok(Json(Account::build(user)).into_response()),
        None => Ok(ApiError::new("Record not found", StatusCode::NOT_FOUND).into_response()),
    }
}

pub async fn http_get_followers(
    state: State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let id = DbId::from(id);
    let user = User::by_id(&id, &state.db_pool).await?;

    if let Some(user) = user {
        Ok(Json(
            user.followers(pagination.into(), &state.db_pool)
                .await?
                .into_iter()
                .map(Account::build)
                .collect::<Vec<Account>>(),
        )
        .into_response())
    } else {
        Ok(ApiError::new("Record not found", StatusCode::NOT_FOUND).into_response())
    }
}

pub async fn http_get_following(
    state: State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let id = DbId::from(id);
    let user = User::by_id(&id, &state.db_pool).await?;

    if let Some(user) = user {
        Ok(Json(
            user.following(pagination.into(), &state.db_pool)
                .await?
                .into_iter()
                .map(Account::build)
                .collect::<Vec<Account>>(),
        )
        .into_response())
    } else {
        Ok(ApiError::new("Record not found", StatusCode::NOT_FOUND).into_response())
    }
}

pub async fn http_post_follow(
    state: State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let actor = match actor(&headers, &state.db_pool).await {
        Ok(actor) => actor,
        Err(err) => return Ok(err.into_response()),
    };

    let id = DbId::from(id);
    match follows::follow(&actor, &id, &state.db_pool).await {
        Ok(()) => Ok(Json(Relationship::build(&actor, &id, &state.db_pool).await?).into_response()),
        Err(err) => Ok(ApiError::from(err).into_response()),
    }
}

pub async fn http_post_unfollow(
    state: State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let actor = match actor(&headers, &state.db_pool).await {
        Ok(actor) => actor,
        Err(err) => return Ok(err.into_response()),
    };

    let id = DbId::from(id);
    match follows::unfollow(&actor, &id, &state.db_pool).await {
        Ok(()) => Ok(Json(Relationship::build(&actor, &id, &state.db_pool).await?).into_response()),
        Err(err) => Ok(ApiError::from(err).into_response()),
    }
}

pub async fn http_get_relationship(
    state: State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let actor = match actor(&headers, &state.db_pool).await {
        Ok(actor) => actor,
        Err(err) => return Ok(err.into_response()),
    };

    let id = DbId::from(id);
    match Relationship::build(&actor, &id, &state.db_pool).await {
        Ok(relationship) => Ok(Json(relationship).into_response()),
        Err(err) => Ok(ApiError::from(err).into_response()),
    }
}

pub async fn http_get_comments(
    state: State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = DbId::from(id);
    if User::by_id(&id, &state.db_pool).await?.is_none() {
        return Ok(ApiError::new("Record not found", StatusCode::NOT_FOUND).into_response());
    }

    match comments::comments_by_user(&id, &state.db_pool).await {
        Ok(rows) => Ok(Json(
            rows.into_iter()
                .map(UserComment::build)
                .collect::<Vec<UserComment>>(),
        )
        .into_response()),
        Err(err) => Ok(ApiError::from(err).into_response()),
    }
}

pub fn accounts(_state: &Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/v1/accounts", post(http_post_create))
        .route("/api/v1/accounts/:id", get(http_get_get))
        .route("/api/v1/accounts/:id/followers", get(http_get_followers))
        .route("/api/v1/accounts/:id/following", get(http_get_following))
        .route("/api/v1/accounts/:id/follow", post(http_post_follow))
        .route("/api/v1/accounts/:id/unfollow", post(http_post_unfollow))
        .route(
            "/api/v1/accounts/:id/relationship",
            get(http_get_relationship),
        )
        .route("/api/v1/accounts/:id/comments", get(http_get_comments))
}
