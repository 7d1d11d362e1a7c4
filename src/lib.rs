// src/lib.rs

pub mod cleaner;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod state;
pub mod utils;

pub use cleaner::{AttributePolicy, CleaningOptions, HtmlCleaner, clean_html};
pub use routes::create_router;
