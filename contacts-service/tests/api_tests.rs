mod common;

use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

async fn register(app: &TestApp, email: &str, password: &str) -> serde_json::Value {
    let response = app
        .post("/register/")
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    response.json().await.expect("Failed to parse response")
}

async fn login(app: &TestApp, email: &str, password: &str) -> String {
    let response = app
        .post("/token/")
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    body["access_token"].as_str().expect("Missing token").to_string()
}

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let body = register(&app, "nicola@example.com", "pass_word!").await;

    assert_eq!(body["email"], "nicola@example.com");
    assert!(body["id"].is_string());
    assert!(body["created_at"].is_string());

    // The password hash never leaves the domain layer
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_invalid_email() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/register/")
        .json(&json!({ "email": "not-an-email", "password": "pass_word!" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["error"].as_str().unwrap().to_lowercase().contains("email"));
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;

    register(&app, "nicola@example.com", "pass_word!").await;

    // Same email again, different password
    let response = app
        .post("/register/")
        .json(&json!({ "email": "nicola@example.com", "password": "other_password" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["error"].as_str().unwrap().contains("already registered"));
}

#[tokio::test]
async fn test_concurrent_registration_has_single_winner() {
    let app = TestApp::spawn().await;

    let payload = json!({ "email": "race@example.com", "password": "pass_word!" });
    let (first, second) = tokio::join!(
        app.post("/register/").json(&payload).send(),
        app.post("/register/").json(&payload).send(),
    );

    let mut statuses = vec![
        first.expect("Failed to execute request").status().as_u16(),
        second.expect("Failed to execute request").status().as_u16(),
    ];
    statuses.sort_unstable();

    assert_eq!(statuses, vec![200, 400]);
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::spawn().await;

    register(&app, "nicola@example.com", "pass_word!").await;

    let response = app
        .post("/token/")
        .json(&json!({ "email": "nicola@example.com", "password": "pass_word!" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(!body["access_token"].as_str().unwrap().is_empty());
    assert_eq!(body["token_type"], "bearer");
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;

    register(&app, "nicola@example.com", "Correct_Password!").await;

    let wrong_password = app
        .post("/token/")
        .json(&json!({ "email": "nicola@example.com", "password": "Wrong_Password!" }))
        .send()
        .await
        .expect("Failed to execute request");

    let unknown_email = app
        .post("/token/")
        .json(&json!({ "email": "nouser@example.com", "password": "anything" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(wrong_password.status(), StatusCode::BAD_REQUEST);
    assert_eq!(unknown_email.status(), StatusCode::BAD_REQUEST);

    // Identical bodies: responses must not reveal whether the account exists
    let wrong_password_body: serde_json::Value =
        wrong_password.json().await.expect("Failed to parse response");
    let unknown_email_body: serde_json::Value =
        unknown_email.json().await.expect("Failed to parse response");
    assert_eq!(wrong_password_body, unknown_email_body);
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/contacts/")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response
            .headers()
            .get("www-authenticate")
            .and_then(|v| v.to_str().ok()),
        Some("Bearer")
    );
}

#[tokio::test]
async fn test_protected_route_rejects_malformed_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get_authenticated("/contacts/", "not.a.token")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_rejects_expired_token() {
    let app = TestApp::spawn().await;

    register(&app, "nicola@example.com", "pass_word!").await;

    let now = chrono::Utc::now().timestamp();
    let expired_claims = auth::Claims {
        sub: "nicola@example.com".to_string(),
        exp: now - 3600,
        iat: now - 7200,
    };
    let expired_token = app
        .jwt_handler
        .encode(&expired_claims)
        .expect("Failed to encode token");

    let response = app
        .get_authenticated("/contacts/", &expired_token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response
            .headers()
            .get("www-authenticate")
            .and_then(|v| v.to_str().ok()),
        Some("Bearer")
    );
}

#[tokio::test]
async fn test_protected_route_rejects_unknown_subject() {
    let app = TestApp::spawn().await;

    // Well-formed and freshly signed, but nobody registered this email
    let claims = auth::Claims::for_subject("ghost@example.com", chrono::Duration::minutes(30));
    let token = app.jwt_handler.encode(&claims).expect("Failed to encode token");

    let response = app
        .get_authenticated("/contacts/", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_current_user_resolves_from_fresh_token() {
    let app = TestApp::spawn().await;

    let registered = register(&app, "nicola@example.com", "pass_word!").await;
    let token = login(&app, "nicola@example.com", "pass_word!").await;

    let response = app
        .get_authenticated("/users/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["email"], "nicola@example.com");
    assert_eq!(body["id"], registered["id"]);
}

#[tokio::test]
async fn test_contact_crud_workflow() {
    let app = TestApp::spawn().await;

    register(&app, "nicola@example.com", "pass_word!").await;
    let token = login(&app, "nicola@example.com", "pass_word!").await;

    // 1. Create
    let create_response = app
        .post_authenticated("/contacts/", &token)
        .json(&json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada@example.com"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(create_response.status(), StatusCode::OK);

    let created: serde_json::Value = create_response
        .json()
        .await
        .expect("Failed to parse response");
    let contact_id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["first_name"], "Ada");
    assert_eq!(created["phone"], serde_json::Value::Null);

    // 2. Read
    let get_response = app
        .get_authenticated(&format!("/contacts/{}", contact_id), &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(get_response.status(), StatusCode::OK);

    let fetched: serde_json::Value = get_response.json().await.expect("Failed to parse response");
    assert_eq!(fetched["last_name"], "Lovelace");

    // 3. List
    let list_response = app
        .get_authenticated("/contacts/", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(list_response.status(), StatusCode::OK);

    let listed: serde_json::Value = list_response.json().await.expect("Failed to parse response");
    assert_eq!(listed.as_array().unwrap().len(), 1);

    // 4. Partial update leaves absent fields unchanged
    let update_response = app
        .put_authenticated(&format!("/contacts/{}", contact_id), &token)
        .json(&json!({ "phone": "+1-555-0100" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(update_response.status(), StatusCode::OK);

    let updated: serde_json::Value = update_response
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(updated["phone"], "+1-555-0100");
    assert_eq!(updated["first_name"], "Ada");

    // 5. Delete returns the last representation
    let delete_response = app
        .delete_authenticated(&format!("/contacts/{}", contact_id), &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(delete_response.status(), StatusCode::OK);

    let deleted: serde_json::Value = delete_response
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(deleted["id"], contact_id.as_str());

    // 6. Gone
    let gone_response = app
        .get_authenticated(&format!("/contacts/{}", contact_id), &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(gone_response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_contact_not_found() {
    let app = TestApp::spawn().await;

    register(&app, "nicola@example.com", "pass_word!").await;
    let token = login(&app, "nicola@example.com", "pass_word!").await;

    let fake_uuid = uuid::Uuid::new_v4().to_string();

    let get_response = app
        .get_authenticated(&format!("/contacts/{}", fake_uuid), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(get_response.status(), StatusCode::NOT_FOUND);

    let update_response = app
        .put_authenticated(&format!("/contacts/{}", fake_uuid), &token)
        .json(&json!({ "first_name": "Nobody" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(update_response.status(), StatusCode::NOT_FOUND);

    let delete_response = app
        .delete_authenticated(&format!("/contacts/{}", fake_uuid), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(delete_response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_contacts_pagination() {
    let app = TestApp::spawn().await;

    register(&app, "nicola@example.com", "pass_word!").await;
    let token = login(&app, "nicola@example.com", "pass_word!").await;

    for i in 0..3 {
        let response = app
            .post_authenticated("/contacts/", &token)
            .json(&json!({
                "first_name": format!("Contact{}", i),
                "last_name": "Example"
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::OK);
    }

    let first_page = app
        .get_authenticated("/contacts/?limit=2", &token)
        .send()
        .await
        .expect("Failed to execute request");
    let first_page: serde_json::Value = first_page.json().await.expect("Failed to parse response");
    assert_eq!(first_page.as_array().unwrap().len(), 2);

    let second_page = app
        .get_authenticated("/contacts/?skip=2&limit=2", &token)
        .send()
        .await
        .expect("Failed to execute request");
    let second_page: serde_json::Value =
        second_page.json().await.expect("Failed to parse response");
    assert_eq!(second_page.as_array().unwrap().len(), 1);
}
