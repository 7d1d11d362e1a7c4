// src/handlers/content.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};

use crate::{error::AppError, models::node::NodeListParams, state::SharedContentStore};

/// Lists the content types a cleanup can target.
pub async fn list_content_types(
    State(store): State<SharedContentStore>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(store.list_content_types().await?))
}

/// Lists the text formats a cleaned body can be tagged with.
pub async fn list_text_formats(
    State(store): State<SharedContentStore>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(store.list_text_formats().await?))
}

/// Lists nodes, optionally filtered by content type.
pub async fn list_nodes(
    State(store): State<SharedContentStore>,
    Query(params): Query<NodeListParams>,
) -> Result<impl IntoResponse, AppError> {
    let nodes = store.list_nodes(params.content_type.as_deref()).await?;
    Ok(Json(nodes))
}

pub async fn get_node(
    State(store): State<SharedContentStore>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let node = store
        .find_node(id)
        .await?
        .ok_or(AppError::NotFound("Node not found".to_string()))?;

    Ok(Json(node))
}
