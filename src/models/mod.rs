// src/models/mod.rs

pub mod cleaning;
pub mod content_type;
pub mod node;
pub mod text_format;
pub mod user;
