// src/repository/mod.rs

//! Storage seams used by the handlers and the bulk cleaner.
//!
//! Handlers never talk to the database directly; they go through these
//! traits so the same code runs on Postgres and on the in-memory store.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::{
    error::AppError,
    models::{
        content_type::ContentType,
        node::{CreateNodeRequest, Node},
        text_format::TextFormat,
        user::User,
    },
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn list_content_types(&self) -> Result<Vec<ContentType>, AppError>;

    async fn find_content_type(&self, id: &str) -> Result<Option<ContentType>, AppError>;

    /// Fails with `Conflict` when the id is taken.
    async fn create_content_type(&self, content_type: ContentType)
    -> Result<ContentType, AppError>;

    async fn list_text_formats(&self) -> Result<Vec<TextFormat>, AppError>;

    async fn find_text_format(&self, id: &str) -> Result<Option<TextFormat>, AppError>;

    /// Ids of every node of `content_type`, ascending.
    async fn node_ids_by_type(&self, content_type: &str) -> Result<Vec<i64>, AppError>;

    async fn list_nodes(&self, content_type: Option<&str>) -> Result<Vec<Node>, AppError>;

    async fn find_node(&self, id: i64) -> Result<Option<Node>, AppError>;

    async fn create_node(&self, node: CreateNodeRequest) -> Result<Node, AppError>;

    /// Returns `false` when nothing was deleted.
    async fn delete_node(&self, id: i64) -> Result<bool, AppError>;

    /// Replaces the body and its text format. Fails with `NotFound` when
    /// the node no longer exists.
    async fn save_node_body(
        &self,
        id: i64,
        body_value: &str,
        body_format: &str,
    ) -> Result<(), AppError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with `Conflict` when the username is taken.
    async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        role: &str,
    ) -> Result<User, AppError>;

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError>;
}
