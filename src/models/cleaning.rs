// src/models/cleaning.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::cleaner::CleaningOptions;

use super::content_type::MACHINE_NAME_RE;

/// DTO for the bulk cleanup form.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CleanContentRequest {
    /// Only nodes of this content type are rewritten.
    #[validate(length(min = 1, max = 32), regex(path = *MACHINE_NAME_RE))]
    pub content_type: String,

    /// Every cleaned body is re-tagged with this text format.
    #[validate(length(min = 1, max = 32), regex(path = *MACHINE_NAME_RE))]
    pub text_format: String,

    #[serde(flatten)]
    pub options: CleaningOptions,
}

/// Outcome of a bulk cleanup run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningReport {
    pub content_type: String,
    pub text_format: String,
    /// Nodes cleaned and saved.
    pub processed: usize,
    /// Subset of `processed` whose body text actually changed.
    pub changed: usize,
    /// Ids that disappeared between listing and loading.
    pub missing: usize,
    /// Nodes whose save failed.
    pub failed: usize,
}

/// DTO for cleaning a single fragment without touching stored content.
#[derive(Debug, Deserialize, Validate)]
pub struct PreviewRequest {
    #[validate(length(max = 1000000))]
    pub html: String,

    #[serde(flatten)]
    pub options: CleaningOptions,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PreviewResponse {
    pub html: String,
}
