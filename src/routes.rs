// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{delete, get, post},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{admin, auth, cleaner, content},
    state::AppState,
    utils::jwt::{admin_middleware, auth_middleware},
};

/// Assembles the main application router.
///
/// * Public routes: auth, content types, text formats, nodes.
/// * Admin routes: content management and the bulk cleaner,
///   behind JWT authentication plus the admin role check.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin([
            HeaderValue::from_static("http://localhost:3000"),
            HeaderValue::from_static("http://127.0.0.1:3000"),
        ])
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login));

    let content_routes = Router::new()
        .route("/api/content-types", get(content::list_content_types))
        .route("/api/text-formats", get(content::list_text_formats))
        .route("/api/nodes", get(content::list_nodes))
        .route("/api/nodes/{id}", get(content::get_node));

    let admin_routes = Router::new()
        .route("/content-types", post(admin::create_content_type))
        .route("/nodes", post(admin::create_node))
        .route("/nodes/{id}", delete(admin::delete_node))
        .route("/cleaner/run", post(cleaner::run_cleanup))
        .route("/cleaner/preview", post(cleaner::preview_cleanup))
        // Layers run bottom-up: authenticate first, then check the role.
        .layer(middleware::from_fn(admin_middleware))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .nest("/api/auth", auth_routes)
        .merge(content_routes)
        .nest("/api/admin", admin_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
