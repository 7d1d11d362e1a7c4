// src/state.rs

use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    cleaner::HtmlCleaner,
    config::Config,
    repository::{ContentStore, UserStore},
};

pub type SharedContentStore = Arc<dyn ContentStore>;
pub type SharedUserStore = Arc<dyn UserStore>;

#[derive(Clone)]
pub struct AppState {
    pub content: SharedContentStore,
    pub users: SharedUserStore,
    pub cleaner: HtmlCleaner,
    pub config: Config,
}

impl AppState {
    pub fn new(content: SharedContentStore, users: SharedUserStore, config: Config) -> Self {
        Self {
            content,
            users,
            cleaner: HtmlCleaner::new(config.attribute_policy),
            config,
        }
    }
}

impl FromRef<AppState> for SharedContentStore {
    fn from_ref(state: &AppState) -> Self {
        state.content.clone()
    }
}

impl FromRef<AppState> for SharedUserStore {
    fn from_ref(state: &AppState) -> Self {
        state.users.clone()
    }
}

impl FromRef<AppState> for HtmlCleaner {
    fn from_ref(state: &AppState) -> Self {
        state.cleaner
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
