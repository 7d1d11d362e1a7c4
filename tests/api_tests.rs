// tests/api_tests.rs

use std::sync::Arc;

use content_cleaner::{
    cleaner::AttributePolicy,
    config::Config,
    models::node::CreateNodeRequest,
    repository::{ContentStore, MemoryStore},
    routes,
    state::AppState,
    utils::jwt::{ADMIN_ROLE, USER_ROLE, sign_jwt},
};

const SECRET: &str = "test_secret_for_integration_tests";

struct TestApp {
    address: String,
    store: Arc<MemoryStore>,
}

impl TestApp {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }
}

fn test_config(policy: AttributePolicy) -> Config {
    Config {
        database_url: None,
        jwt_secret: SECRET.to_string(),
        jwt_expiration: 600,
        rust_log: "error".to_string(),
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        admin_username: None,
        admin_password: None,
        attribute_policy: policy,
    }
}

/// Spawns the app on a random port, backed by a fresh in-memory store.
async fn spawn_app_with(policy: AttributePolicy) -> TestApp {
    let store = Arc::new(MemoryStore::with_defaults());
    let state = AppState::new(store.clone(), store.clone(), test_config(policy));
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        address: format!("http://127.0.0.1:{}", port),
        store,
    }
}

async fn spawn_app() -> TestApp {
    spawn_app_with(AttributePolicy::SinglePass).await
}

fn admin_token() -> String {
    format!("Bearer {}", sign_jwt(1, ADMIN_ROLE, SECRET, 600).unwrap())
}

fn user_token() -> String {
    format!("Bearer {}", sign_jwt(2, USER_ROLE, SECRET, 600).unwrap())
}

async fn seed_node(app: &TestApp, content_type: &str, body: &str) -> i64 {
    app.store
        .create_node(CreateNodeRequest {
            content_type: content_type.to_string(),
            title: "Seeded".to_string(),
            body_value: body.to_string(),
            body_format: "full_html".to_string(),
        })
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn unknown_path_returns_404() {
    let app = spawn_app().await;

    let response = reqwest::get(app.url("/random_path_that_does_not_exist"))
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn lists_form_options() {
    let app = spawn_app().await;

    let types: Vec<serde_json::Value> = reqwest::get(app.url("/api/content-types"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let ids: Vec<&str> = types.iter().filter_map(|t| t["id"].as_str()).collect();
    assert!(ids.contains(&"article"));
    assert!(ids.contains(&"page"));

    let formats: Vec<serde_json::Value> = reqwest::get(app.url("/api/text-formats"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(formats.len(), 3);
}

#[tokio::test]
async fn cleaner_requires_authentication() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(app.url("/api/admin/cleaner/run"))
        .json(&serde_json::json!({
            "content_type": "article",
            "text_format": "basic_html"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn cleaner_requires_admin_role() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(app.url("/api/admin/cleaner/run"))
        .header("Authorization", user_token())
        .json(&serde_json::json!({
            "content_type": "article",
            "text_format": "basic_html"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 403);
}

#[tokio::test]
async fn run_cleans_and_reports() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let dirty = seed_node(
        &app,
        "article",
        r#"<div class="x"><script>bad()</script><a href="u">L</a><img src="i.png"></div>"#,
    )
    .await;
    let clean = seed_node(&app, "article", "<p>fine</p>").await;
    let other = seed_node(&app, "page", r#"<p id="keep">page</p>"#).await;

    let response = client
        .post(app.url("/api/admin/cleaner/run"))
        .header("Authorization", admin_token())
        .json(&serde_json::json!({
            "content_type": "article",
            "text_format": "basic_html",
            "remove_scripts": true,
            "remove_links": true,
            "remove_images": true
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let report: serde_json::Value = response.json().await.unwrap();
    assert_eq!(report["processed"], 2);
    assert_eq!(report["changed"], 1);
    assert_eq!(report["missing"], 0);
    assert_eq!(report["failed"], 0);

    let node: serde_json::Value = reqwest::get(app.url(&format!("/api/nodes/{}", dirty)))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(node["body_value"], "<div>L</div>");
    assert_eq!(node["body_format"], "basic_html");

    let node: serde_json::Value = reqwest::get(app.url(&format!("/api/nodes/{}", clean)))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(node["body_format"], "basic_html");

    let node: serde_json::Value = reqwest::get(app.url(&format!("/api/nodes/{}", other)))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(node["body_value"], r#"<p id="keep">page</p>"#);
}

#[tokio::test]
async fn run_with_unknown_content_type_returns_404() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(app.url("/api/admin/cleaner/run"))
        .header("Authorization", admin_token())
        .json(&serde_json::json!({
            "content_type": "blog",
            "text_format": "basic_html"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn run_with_empty_text_format_fails_validation() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(app.url("/api/admin/cleaner/run"))
        .header("Authorization", admin_token())
        .json(&serde_json::json!({
            "content_type": "article",
            "text_format": ""
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn preview_uses_configured_policy() {
    let body = serde_json::json!({
        "html": r#"<p class="a" id="b">x<script>y()</script></p>"#,
        "remove_scripts": true
    });

    for (policy, expected) in [
        (AttributePolicy::SinglePass, r#"<p class="a">x</p>"#),
        (AttributePolicy::FixedPoint, "<p>x</p>"),
    ] {
        let app = spawn_app_with(policy).await;
        let response = reqwest::Client::new()
            .post(app.url("/api/admin/cleaner/preview"))
            .header("Authorization", admin_token())
            .json(&body)
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 200);
        let preview: serde_json::Value = response.json().await.unwrap();
        assert_eq!(preview["html"], expected);
    }
}

#[tokio::test]
async fn admin_manages_content() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(app.url("/api/admin/content-types"))
        .header("Authorization", admin_token())
        .json(&serde_json::json!({"id": "news", "label": "News"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 201);

    let duplicate = client
        .post(app.url("/api/admin/content-types"))
        .header("Authorization", admin_token())
        .json(&serde_json::json!({"id": "news", "label": "News again"}))
        .send()
        .await
        .unwrap();
    assert_eq!(duplicate.status().as_u16(), 409);

    let bad_name = client
        .post(app.url("/api/admin/content-types"))
        .header("Authorization", admin_token())
        .json(&serde_json::json!({"id": "Bad Name", "label": "Bad"}))
        .send()
        .await
        .unwrap();
    assert_eq!(bad_name.status().as_u16(), 400);

    let created: serde_json::Value = client
        .post(app.url("/api/admin/nodes"))
        .header("Authorization", admin_token())
        .json(&serde_json::json!({
            "content_type": "news",
            "title": "Hello",
            "body_value": "<p>x</p>",
            "body_format": "basic_html"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = created["id"].as_i64().unwrap();

    let listed: Vec<serde_json::Value> = reqwest::get(app.url("/api/nodes?content_type=news"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);

    let deleted = client
        .delete(app.url(&format!("/api/admin/nodes/{}", id)))
        .header("Authorization", admin_token())
        .send()
        .await
        .unwrap();
    assert_eq!(deleted.status().as_u16(), 204);

    let gone = reqwest::get(app.url(&format!("/api/nodes/{}", id)))
        .await
        .unwrap();
    assert_eq!(gone.status().as_u16(), 404);
}

#[tokio::test]
async fn register_and_login_flow() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(app.url("/api/auth/register"))
        .json(&serde_json::json!({"username": "editor", "password": "password123"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 201);
    let user: serde_json::Value = response.json().await.unwrap();
    assert!(user.get("password").is_none());

    let too_short = client
        .post(app.url("/api/auth/register"))
        .json(&serde_json::json!({"username": "yo", "password": "password123"}))
        .send()
        .await
        .unwrap();
    assert_eq!(too_short.status().as_u16(), 400);

    let wrong = client
        .post(app.url("/api/auth/login"))
        .json(&serde_json::json!({"username": "editor", "password": "nope"}))
        .send()
        .await
        .unwrap();
    assert_eq!(wrong.status().as_u16(), 401);

    let login: serde_json::Value = client
        .post(app.url("/api/auth/login"))
        .json(&serde_json::json!({"username": "editor", "password": "password123"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let token = login["token"].as_str().expect("Token not found");
    assert_eq!(login["role"], "user");

    // A freshly registered editor is not an admin.
    let response = client
        .post(app.url("/api/admin/cleaner/preview"))
        .header("Authorization", format!("Bearer {}", token))
        .json(&serde_json::json!({"html": "<p>x</p>"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 403);
}
