// src/models/content_type.rs

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Lowercase machine names such as `article` or `basic_html`.
pub static MACHINE_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9_]*$").expect("valid machine name pattern"));

/// Represents the 'content_types' table.
/// Every node belongs to exactly one content type.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct ContentType {
    /// Machine name, also the primary key.
    pub id: String,
    pub label: String,
}

/// DTO for registering a new content type.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateContentTypeRequest {
    #[validate(
        length(min = 1, max = 32),
        regex(path = *MACHINE_NAME_RE, message = "Use lowercase letters, digits and underscores.")
    )]
    pub id: String,
    #[validate(length(min = 1, max = 100))]
    pub label: String,
}

impl From<CreateContentTypeRequest> for ContentType {
    fn from(req: CreateContentTypeRequest) -> Self {
        Self {
            id: req.id,
            label: req.label,
        }
    }
}
