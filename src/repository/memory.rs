// src/repository/memory.rs

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

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

#[derive(Default)]
struct Inner {
    content_types: BTreeMap<String, ContentType>,
    text_formats: BTreeMap<String, TextFormat>,
    nodes: BTreeMap<i64, Node>,
    users: HashMap<String, User>,
    next_node_id: i64,
    next_user_id: i64,
}

/// Process-local store used when no database is configured, and in tests.
/// Data is lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    /// Same content types and text formats the initial migration seeds.
    pub fn with_defaults() -> Self {
        let mut inner = Inner::default();

        for (id, label) in [
            ("plain_text", "Plain text"),
            ("basic_html", "Basic HTML"),
            ("full_html", "Full HTML"),
        ] {
            inner.text_formats.insert(
                id.to_string(),
                TextFormat {
                    id: id.to_string(),
                    label: label.to_string(),
                },
            );
        }

        for (id, label) in [("article", "Article"), ("page", "Basic page")] {
            inner.content_types.insert(
                id.to_string(),
                ContentType {
                    id: id.to_string(),
                    label: label.to_string(),
                },
            );
        }

        Self {
            inner: RwLock::new(inner),
        }
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn list_content_types(&self) -> Result<Vec<ContentType>, AppError> {
        let inner = self.inner.read().await;
        let mut types: Vec<ContentType> = inner.content_types.values().cloned().collect();
        types.sort_by(|a, b| a.label.cmp(&b.label));
        Ok(types)
    }

    async fn find_content_type(&self, id: &str) -> Result<Option<ContentType>, AppError> {
        Ok(self.inner.read().await.content_types.get(id).cloned())
    }

    async fn create_content_type(
        &self,
        content_type: ContentType,
    ) -> Result<ContentType, AppError> {
        let mut inner = self.inner.write().await;
        if inner.content_types.contains_key(&content_type.id) {
            return Err(AppError::Conflict(format!(
                "Content type '{}' already exists",
                content_type.id
            )));
        }
        inner
            .content_types
            .insert(content_type.id.clone(), content_type.clone());
        Ok(content_type)
    }

    async fn list_text_formats(&self) -> Result<Vec<TextFormat>, AppError> {
        let inner = self.inner.read().await;
        let mut formats: Vec<TextFormat> = inner.text_formats.values().cloned().collect();
        formats.sort_by(|a, b| a.label.cmp(&b.label));
        Ok(formats)
    }

    async fn find_text_format(&self, id: &str) -> Result<Option<TextFormat>, AppError> {
        Ok(self.inner.read().await.text_formats.get(id).cloned())
    }

    async fn node_ids_by_type(&self, content_type: &str) -> Result<Vec<i64>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .nodes
            .values()
            .filter(|node| node.content_type == content_type)
            .map(|node| node.id)
            .collect())
    }

    async fn list_nodes(&self, content_type: Option<&str>) -> Result<Vec<Node>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .nodes
            .values()
            .filter(|node| content_type.is_none_or(|ct| node.content_type == ct))
            .cloned()
            .collect())
    }

    async fn find_node(&self, id: i64) -> Result<Option<Node>, AppError> {
        Ok(self.inner.read().await.nodes.get(&id).cloned())
    }

    async fn create_node(&self, node: CreateNodeRequest) -> Result<Node, AppError> {
        let mut inner = self.inner.write().await;

        if !inner.content_types.contains_key(&node.content_type)
            || !inner.text_formats.contains_key(&node.body_format)
        {
            return Err(AppError::BadRequest(
                "Unknown content type or text format".to_string(),
            ));
        }

        inner.next_node_id += 1;
        let now = Utc::now();
        let node = Node {
            id: inner.next_node_id,
            content_type: node.content_type,
            title: node.title,
            body_value: node.body_value,
            body_format: node.body_format,
            created_at: Some(now),
            updated_at: Some(now),
        };
        inner.nodes.insert(node.id, node.clone());

        Ok(node)
    }

    async fn delete_node(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.inner.write().await.nodes.remove(&id).is_some())
    }

    async fn save_node_body(
        &self,
        id: i64,
        body_value: &str,
        body_format: &str,
    ) -> Result<(), AppError> {
        let mut inner = self.inner.write().await;

        if !inner.text_formats.contains_key(body_format) {
            return Err(AppError::BadRequest(format!(
                "Unknown text format '{}'",
                body_format
            )));
        }

        let node = inner
            .nodes
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Node {} not found", id)))?;

        node.body_value = body_value.to_string();
        node.body_format = body_format.to_string();
        node.updated_at = Some(Utc::now());

        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        role: &str,
    ) -> Result<User, AppError> {
        let mut inner = self.inner.write().await;

        if inner.users.contains_key(username) {
            return Err(AppError::Conflict(format!(
                "Username '{}' already exists",
                username
            )));
        }

        inner.next_user_id += 1;
        let user = User {
            id: inner.next_user_id,
            username: username.to_string(),
            password: password_hash.to_string(),
            role: role.to_string(),
            created_at: Some(Utc::now()),
        };
        inner.users.insert(user.username.clone(), user.clone());

        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self.inner.read().await.users.get(username).cloned())
    }
}
