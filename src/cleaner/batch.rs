// src/cleaner/batch.rs

use crate::{
    error::AppError,
    models::cleaning::{CleanContentRequest, CleaningReport},
    repository::ContentStore,
};

use super::HtmlCleaner;

/// Rewrites the body of every node of `request.content_type`.
///
/// Each node is loaded, cleaned, re-tagged with `request.text_format`
/// and saved on its own. A node deleted after listing, before either its
/// load or its save, counts as missing. Any other load or save error
/// counts as failed. Either way the run continues with the next node.
/// Only lookup failures before the loop abort the whole run.
pub async fn clean_content_type(
    store: &dyn ContentStore,
    cleaner: &HtmlCleaner,
    request: &CleanContentRequest,
) -> Result<CleaningReport, AppError> {
    store
        .find_content_type(&request.content_type)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Content type '{}' not found", request.content_type))
        })?;

    store
        .find_text_format(&request.text_format)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Text format '{}' not found", request.text_format))
        })?;

    let ids = store.node_ids_by_type(&request.content_type).await?;

    tracing::info!(
        content_type = %request.content_type,
        text_format = %request.text_format,
        policy = %cleaner.policy(),
        nodes = ids.len(),
        "Starting content cleanup"
    );

    let mut report = CleaningReport {
        content_type: request.content_type.clone(),
        text_format: request.text_format.clone(),
        ..CleaningReport::default()
    };

    for id in ids {
        let node = match store.find_node(id).await {
            Ok(Some(node)) => node,
            Ok(None) => {
                tracing::warn!("Node {} disappeared before cleanup, skipping", id);
                report.missing += 1;
                continue;
            }
            Err(e) => {
                tracing::error!("Failed to load node {}: {}", id, e);
                report.failed += 1;
                continue;
            }
        };

        let cleaned = cleaner.clean(&node.body_value, &request.options);
        let changed = cleaned != node.body_value;

        match store
            .save_node_body(id, &cleaned, &request.text_format)
            .await
        {
            Ok(()) => {
                report.processed += 1;
                if changed {
                    report.changed += 1;
                }
            }
            Err(AppError::NotFound(_)) => {
                tracing::warn!("Node {} disappeared before its cleaned body was saved", id);
                report.missing += 1;
            }
            Err(e) => {
                tracing::error!("Failed to save cleaned node {}: {}", id, e);
                report.failed += 1;
            }
        }
    }

    tracing::info!(
        processed = report.processed,
        changed = report.changed,
        missing = report.missing,
        failed = report.failed,
        "{} nodes have been cleaned",
        report.processed
    );

    Ok(report)
}
