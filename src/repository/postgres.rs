// src/repository/postgres.rs

use async_trait::async_trait;
use sqlx::PgPool;

use super::{ContentStore, UserStore};
use crate::{
    error::AppError,
    models::{
        content_type::ContentType,
        node::{CreateNodeRequest, Node},
        text_format::TextFormat,
        user::User,
    },
};

const NODE_COLUMNS: &str =
    "id, content_type, title, body_value, body_format, created_at, updated_at";

/// Postgres-backed store. Schema lives in `migrations/`.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db_err| db_err.is_foreign_key_violation())
}

#[async_trait]
impl ContentStore for PgStore {
    async fn list_content_types(&self) -> Result<Vec<ContentType>, AppError> {
        let types = sqlx::query_as::<_, ContentType>(
            "SELECT id, label FROM content_types ORDER BY label",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(types)
    }

    async fn find_content_type(&self, id: &str) -> Result<Option<ContentType>, AppError> {
        let content_type =
            sqlx::query_as::<_, ContentType>("SELECT id, label FROM content_types WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(content_type)
    }

    async fn create_content_type(
        &self,
        content_type: ContentType,
    ) -> Result<ContentType, AppError> {
        sqlx::query_as::<_, ContentType>(
            r#"
            INSERT INTO content_types (id, label)
            VALUES ($1, $2)
            RETURNING id, label
            "#,
        )
        .bind(&content_type.id)
        .bind(&content_type.label)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict(format!("Content type '{}' already exists", content_type.id))
            } else {
                tracing::error!("Failed to create content type: {:?}", e);
                AppError::from(e)
            }
        })
    }

    async fn list_text_formats(&self) -> Result<Vec<TextFormat>, AppError> {
        let formats =
            sqlx::query_as::<_, TextFormat>("SELECT id, label FROM text_formats ORDER BY label")
                .fetch_all(&self.pool)
                .await?;

        Ok(formats)
    }

    async fn find_text_format(&self, id: &str) -> Result<Option<TextFormat>, AppError> {
        let format =
            sqlx::query_as::<_, TextFormat>("SELECT id, label FROM text_formats WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(format)
    }

    async fn node_ids_by_type(&self, content_type: &str) -> Result<Vec<i64>, AppError> {
        let ids = sqlx::query_scalar::<_, i64>(
            "SELECT id FROM nodes WHERE content_type = $1 ORDER BY id",
        )
        .bind(content_type)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    async fn list_nodes(&self, content_type: Option<&str>) -> Result<Vec<Node>, AppError> {
        let sql = format!(
            "SELECT {} FROM nodes WHERE ($1::TEXT IS NULL OR content_type = $1) ORDER BY id",
            NODE_COLUMNS
        );

        let nodes = sqlx::query_as::<_, Node>(&sql)
            .bind(content_type)
            .fetch_all(&self.pool)
            .await?;

        Ok(nodes)
    }

    async fn find_node(&self, id: i64) -> Result<Option<Node>, AppError> {
        let sql = format!("SELECT {} FROM nodes WHERE id = $1", NODE_COLUMNS);

        let node = sqlx::query_as::<_, Node>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(node)
    }

    async fn create_node(&self, node: CreateNodeRequest) -> Result<Node, AppError> {
        let sql = format!(
            r#"
            INSERT INTO nodes (content_type, title, body_value, body_format)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            NODE_COLUMNS
        );

        sqlx::query_as::<_, Node>(&sql)
            .bind(&node.content_type)
            .bind(&node.title)
            .bind(&node.body_value)
            .bind(&node.body_format)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    AppError::BadRequest("Unknown content type or text format".to_string())
                } else {
                    tracing::error!("Failed to create node: {:?}", e);
                    AppError::from(e)
                }
            })
    }

    async fn delete_node(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM nodes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn save_node_body(
        &self,
        id: i64,
        body_value: &str,
        body_format: &str,
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE nodes
            SET body_value = $1, body_format = $2, updated_at = NOW()
            WHERE id = $3
            "#,
        )
        .bind(body_value)
        .bind(body_format)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Node {} not found", id)));
        }

        Ok(())
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        role: &str,
    ) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password, role)
            VALUES ($1, $2, $3)
            RETURNING id, username, password, role, created_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict(format!("Username '{}' already exists", username))
            } else {
                tracing::error!("Failed to create user: {:?}", e);
                AppError::from(e)
            }
        })
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password, role, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
