// src/models/node.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::content_type::MACHINE_NAME_RE;

/// Represents the 'nodes' table: a piece of content with a rich-text body.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Node {
    pub id: i64,

    /// Machine name of the owning content type.
    pub content_type: String,

    pub title: String,

    /// Raw body markup.
    pub body_value: String,

    /// Text format id used when the body is rendered.
    pub body_format: String,

    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// DTO for creating a node.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateNodeRequest {
    #[validate(length(min = 1, max = 32), regex(path = *MACHINE_NAME_RE))]
    pub content_type: String,

    #[validate(length(
        min = 1,
        max = 200,
        message = "Title length must be between 1 and 200 chars"
    ))]
    pub title: String,

    #[validate(length(max = 1000000))]
    #[serde(default)]
    pub body_value: String,

    #[validate(length(min = 1, max = 32), regex(path = *MACHINE_NAME_RE))]
    pub body_format: String,
}

/// Query parameters for listing nodes.
#[derive(Debug, Deserialize)]
pub struct NodeListParams {
    pub content_type: Option<String>,
}
