//! Post CRUD handlers: create, list, read, update, delete.

use crate::error::AppError;
use crate::extractors::{JsonBody, PostId};
use crate::response::{created, ok};
use crate::service::{parse_new_post, parse_post_patch};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let posts = state.posts.list().await?;
    Ok(ok(posts))
}

pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let input = parse_new_post(body)?;
    let post = state.posts.create(input).await?;
    Ok(created(post))
}

pub async fn read(
    State(state): State<AppState>,
    PostId(id): PostId,
) -> Result<impl IntoResponse, AppError> {
    let post = state.posts.read(id).await?;
    Ok(ok(post))
}

pub async fn update(
    State(state): State<AppState>,
    PostId(id): PostId,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let patch = parse_post_patch(body)?;
    let post = state.posts.update(id, patch).await?;
    Ok(ok(post))
}

pub async fn delete(
    State(state): State<AppState>,
    PostId(id): PostId,
) -> Result<impl IntoResponse, AppError> {
    let post = state.posts.delete(id).await?;
    Ok(ok(post))
}
