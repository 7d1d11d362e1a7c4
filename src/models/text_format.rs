// src/models/text_format.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'text_formats' table.
/// The format decides how a stored body is filtered when rendered.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct TextFormat {
    pub id: String,
    pub label: String,
}
