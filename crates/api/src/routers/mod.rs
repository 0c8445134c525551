pub mod accounts;
pub mod statuses;

use std::sync::Arc;

use axum::{http::HeaderMap, http::StatusCode, Router};
use db::{models::User, types::DbId};
use diesel_async::{pooled_connection::deadpool::Pool, AsyncPgConnection};
use web::AppState;

use crate::error::ApiError;

/// Identity verification is an external collaborator; the id in this
/// header has already been resolved by it and is trusted as-is.
pub const ACTOR_HEADER: &str = "x-actor-id";

pub(crate) async fn actor(
    headers: &HeaderMap,
    db_pool: &Pool<AsyncPgConnection>,
) -> Result<User, ApiError> {
    let id = headers
        .get(ACTOR_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| {
            ApiError::new(
                "Missing x-actor-id header",
                StatusCode::UNPROCESSABLE_ENTITY,
            )
        })?;

    match User::by_id(&DbId::from(id.to_string()), db_pool).await {
        Ok(Some(user)) => Ok(user),
        Ok(None) => Err(ApiError::new("Actor not found", StatusCode::NOT_FOUND)),
        Err(err) => Err(ApiError::new_with_description(
            "Store unavailable",
            &err.to_string(),
            StatusCode::SERVICE_UNAVAILABLE,
        )),
    }
}

pub fn api(state: &Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .merge(accounts::accounts(state))
        .merge(statuses::statuses(state))
}
