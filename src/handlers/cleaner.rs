// src/handlers/cleaner.rs

use axum::{Extension, Json, extract::State, response::IntoResponse};
use validator::Validate;

use crate::{
    cleaner::{HtmlCleaner, batch::clean_content_type},
    error::AppError,
    models::cleaning::{CleanContentRequest, PreviewRequest, PreviewResponse},
    state::SharedContentStore,
    utils::jwt::Claims,
};

/// Cleans the body of every node of the chosen content type.
/// Admin only.
pub async fn run_cleanup(
    State(store): State<SharedContentStore>,
    State(cleaner): State<HtmlCleaner>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CleanContentRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    tracing::info!(
        "User {} started cleanup of '{}' ({:?})",
        claims.sub,
        payload.content_type,
        payload.options
    );

    let report = clean_content_type(store.as_ref(), &cleaner, &payload).await?;

    Ok(Json(report))
}

/// Cleans a single fragment and returns it without saving anything.
/// Admin only.
pub async fn preview_cleanup(
    State(cleaner): State<HtmlCleaner>,
    Json(payload): Json<PreviewRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let html = cleaner.clean(&payload.html, &payload.options);

    Ok(Json(PreviewResponse { html }))
}
