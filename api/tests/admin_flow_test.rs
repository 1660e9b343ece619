//! End-to-end tests for the administrative user-management routes.

use std::sync::Arc;

use actix_web::{http::StatusCode, test, web};
use serde_json::{json, Value};

use kb_api::app::{create_app, AppState};
use kb_core::repositories::MockUserRepository;
use kb_core::services::admin::AdminService;
use kb_core::services::auth::{AuthService, AuthServiceConfig};
use kb_core::services::notifier::MockNotifier;
use kb_core::services::token::TokenService;
use kb_shared::config::AssetConfig;

fn test_state() -> web::Data<AppState<MockUserRepository, MockNotifier>> {
    let repo = Arc::new(MockUserRepository::new());
    let notifier = Arc::new(MockNotifier::new());
    let tokens = Arc::new(TokenService::new(
        "integration-test-secret-0123456789ab",
        3600,
    ));
    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&repo),
        Arc::clone(&notifier),
        Arc::clone(&tokens),
        AuthServiceConfig {
            assets: AssetConfig::default(),
            acquire_secret: "acquire-secret".to_string(),
        },
    ));
    let admin_service = Arc::new(AdminService::new(repo, notifier, AssetConfig::default()));
    web::Data::new(AppState {
        auth_service,
        admin_service,
        token_service: tokens,
    })
}

/// Registers an account through the public route and yields
/// (bearer token, user id).
macro_rules! register_admin {
    ($app:expr) => {{
        let req = test::TestRequest::post()
            .uri("/user/register")
            .set_json(json!({
                "first_name": "ada",
                "last_name": "obi",
                "email": "ada@example.com",
                "password": "s3cret-pass",
                "phone_number": "08031110000"
            }))
            .to_request();
        let resp = test::call_service($app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        (
            body["data"]["token"].as_str().unwrap().to_string(),
            body["data"]["user"]["id"].as_str().unwrap().to_string(),
        )
    }};
}

#[actix_web::test]
async fn test_admin_routes_require_bearer_token() {
    let app = test::init_service(create_app(test_state())).await;

    let req = test::TestRequest::get().uri("/admin/user").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], json!(false));
    assert_eq!(body["title"], json!("Authorization"));
}

#[actix_web::test]
async fn test_create_and_find_user() {
    let app = test::init_service(create_app(test_state())).await;
    let (token, _) = register_admin!(&app);

    let req = test::TestRequest::post()
        .uri("/admin/user")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({
            "first_name": "sade",
            "email": "sade@example.com",
            "phone_number": "08032220000"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], json!("User created successfully"));
    let id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["phone_number"], json!("2348032220000"));
    assert_eq!(body["data"]["customer_id"].as_str().map(str::len), Some(8));

    let req = test::TestRequest::get()
        .uri(&format!("/admin/user/{id}"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["first_name"], json!("Sade"));
}

#[actix_web::test]
async fn test_create_duplicate_email_is_conflict() {
    let app = test::init_service(create_app(test_state())).await;
    let (token, _) = register_admin!(&app);

    let req = test::TestRequest::post()
        .uri("/admin/user")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({ "email": "ada@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], json!("Email address already exists"));
}

#[actix_web::test]
async fn test_list_users_includes_pagination() {
    let app = test::init_service(create_app(test_state())).await;
    let (token, _) = register_admin!(&app);

    let req = test::TestRequest::get()
        .uri("/admin/user?page=1&per_page=5")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], json!("Users retrieved successfully"));
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["pagination"]["total"], json!(1));
    assert_eq!(body["pagination"]["current_page"], json!(1));
    assert_eq!(body["pagination"]["per_page"], json!(5));
}

#[actix_web::test]
async fn test_search_users_by_name() {
    let app = test::init_service(create_app(test_state())).await;
    let (token, _) = register_admin!(&app);

    let req = test::TestRequest::get()
        .uri("/admin/user/search?query=ada")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["data"][0]["email"], json!("ada@example.com"));
}

#[actix_web::test]
async fn test_user_metrics_counts_accounts() {
    let app = test::init_service(create_app(test_state())).await;
    let (token, _) = register_admin!(&app);

    let req = test::TestRequest::get()
        .uri("/admin/user/metrics")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["total"], json!(1));
}

#[actix_web::test]
async fn test_update_user_returns_id() {
    let app = test::init_service(create_app(test_state())).await;
    let (token, id) = register_admin!(&app);

    let req = test::TestRequest::patch()
        .uri(&format!("/admin/user/{id}"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({ "tier": 2, "employer": "Kobo" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["id"], json!(id));
}

#[actix_web::test]
async fn test_remove_user_hides_them_from_lookup() {
    let app = test::init_service(create_app(test_state())).await;
    let (token, id) = register_admin!(&app);

    let req = test::TestRequest::delete()
        .uri(&format!("/admin/user/{id}"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/admin/user/{id}"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_update_email_emits_new_verification() {
    let app = test::init_service(create_app(test_state())).await;
    let (token, id) = register_admin!(&app);

    let req = test::TestRequest::patch()
        .uri(&format!("/admin/user/{id}/update-email"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({ "email": "Ada.New@Example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["email"], json!("ada.new@example.com"));
}

#[actix_web::test]
async fn test_suspend_then_suspend_again_is_rejected() {
    let app = test::init_service(create_app(test_state())).await;
    let (token, id) = register_admin!(&app);

    let req = test::TestRequest::patch()
        .uri(&format!("/admin/user/{id}/suspend"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({ "message": "chargeback review" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], json!("Account suspended successfully"));
    assert!(body["data"]["suspended_at"].is_string());

    let req = test::TestRequest::patch()
        .uri(&format!("/admin/user/{id}/suspend"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], json!("This account is already suspended."));
}

#[actix_web::test]
async fn test_unsuspend_requires_suspended_account() {
    let app = test::init_service(create_app(test_state())).await;
    let (token, id) = register_admin!(&app);

    let req = test::TestRequest::patch()
        .uri(&format!("/admin/user/{id}/unsuspend"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], json!("Your account is not suspended."));
}

#[actix_web::test]
async fn test_close_then_reopen_account() {
    let app = test::init_service(create_app(test_state())).await;
    let (token, id) = register_admin!(&app);

    let req = test::TestRequest::patch()
        .uri(&format!("/admin/user/{id}/close-account"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["data"]["closed_at"].is_string());

    // suspending a closed account is refused
    let req = test::TestRequest::patch()
        .uri(&format!("/admin/user/{id}/suspend"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["message"],
        json!("This account is currently being reviewed.")
    );

    let req = test::TestRequest::patch()
        .uri(&format!("/admin/user/{id}/open-account"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["data"]["closed_at"].is_null());
}
