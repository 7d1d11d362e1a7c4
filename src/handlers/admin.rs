// src/handlers/admin.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        content_type::{ContentType, CreateContentTypeRequest},
        node::CreateNodeRequest,
    },
    state::SharedContentStore,
};

/// Registers a new content type.
/// Admin only.
pub async fn create_content_type(
    State(store): State<SharedContentStore>,
    Json(payload): Json<CreateContentTypeRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let content_type = store
        .create_content_type(ContentType::from(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(content_type)))
}

/// Creates a node.
/// Admin only.
pub async fn create_node(
    State(store): State<SharedContentStore>,
    Json(payload): Json<CreateNodeRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let node = store.create_node(payload).await?;

    Ok((StatusCode::CREATED, Json(node)))
}

/// Deletes a node by ID.
/// Admin only.
pub async fn delete_node(
    State(store): State<SharedContentStore>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !store.delete_node(id).await? {
        return Err(AppError::NotFound("Node not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
