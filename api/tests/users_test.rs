//! Account lifecycle over HTTP

mod common;

use actix_web::{http::StatusCode, test};
use futures_util::future::join_all;
use serde_json::{json, Value};

use sf_api::create_app;
use sf_core::domain::entities::user::Role;

use common::{bearer, TestApp};

#[actix_web::test]
async fn test_alice_scenario() {
    let t = TestApp::new();
    let app = test::init_service(create_app(t.state.clone(), t.authorizer.clone(), &t.config)).await;

    let credentials = json!({ "login": "alice", "password": "wonderland" });

    let req = test::TestRequest::post()
        .uri("/users/register")
        .set_json(&credentials)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let alice_id = body["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri("/users/register")
        .set_json(&credentials)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "User already exists" }));

    let req = test::TestRequest::post()
        .uri("/users/authenticate")
        .set_json(json!({ "login": "alice", "password": "wrong" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/users/authenticate")
        .set_json(&credentials)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let token = body["token"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/users")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Insufficient permissions");

    assert!(t.users.set_role(alice_id, Role::Admin).await);
    let req = test::TestRequest::post()
        .uri("/users/authenticate")
        .set_json(&credentials)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let admin_token = body["token"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/users")
        .insert_header(bearer(&admin_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body[0]["login"], "alice");
    assert!(body[0].get("password_hash").is_none());
}

#[actix_web::test]
async fn test_missing_credentials_and_unknown_login() {
    let t = TestApp::new();
    let app = test::init_service(create_app(t.state.clone(), t.authorizer.clone(), &t.config)).await;

    let req = test::TestRequest::post()
        .uri("/users/register")
        .set_json(json!({ "login": "bob" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Missing login or password");

    let req = test::TestRequest::post()
        .uri("/users/authenticate")
        .set_json(json!({ "login": "nobody", "password": "x" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "User not found");
}

#[actix_web::test]
async fn test_concurrent_duplicate_registration_creates_one_account() {
    let t = TestApp::new();
    let app = test::init_service(create_app(t.state.clone(), t.authorizer.clone(), &t.config)).await;

    let calls = (0..8).map(|_| {
        let req = test::TestRequest::post()
            .uri("/users/register")
            .set_json(json!({ "login": "carol", "password": "pw" }))
            .to_request();
        test::call_service(&app, req)
    });
    let statuses: Vec<StatusCode> = join_all(calls)
        .await
        .into_iter()
        .map(|resp| resp.status())
        .collect();

    assert_eq!(statuses.iter().filter(|s| **s == StatusCode::CREATED).count(), 1);
    assert!(statuses
        .iter()
        .all(|s| *s == StatusCode::CREATED || *s == StatusCode::CONFLICT));
    assert_eq!(t.users.count().await, 1);
}

#[actix_web::test]
async fn test_profile_read_and_update() {
    let t = TestApp::new();
    let app = test::init_service(create_app(t.state.clone(), t.authorizer.clone(), &t.config)).await;
    let (_, token) = t.customer("dave").await;

    let req = test::TestRequest::put()
        .uri("/users/me")
        .insert_header(bearer(&token))
        .set_json(json!({ "name": "Dave", "email": "dave@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "message": "User information updated" }));

    let req = test::TestRequest::get()
        .uri("/users/me")
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["user"]["name"], "Dave");
    assert_eq!(body["user"]["email"], "dave@example.com");
    assert_eq!(body["addresses"], json!([]));
}

#[actix_web::test]
async fn test_password_change_takes_effect() {
    let t = TestApp::new();
    let app = test::init_service(create_app(t.state.clone(), t.authorizer.clone(), &t.config)).await;
    let (_, token) = t.customer("erin").await;

    let req = test::TestRequest::put()
        .uri("/users/me")
        .insert_header(bearer(&token))
        .set_json(json!({ "password": "new-secret" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/users/authenticate")
        .set_json(json!({ "login": "erin", "password": "secret" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/users/authenticate")
        .set_json(json!({ "login": "erin", "password": "new-secret" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_account_by_id_requires_ownership() {
    let t = TestApp::new();
    let app = test::init_service(create_app(t.state.clone(), t.authorizer.clone(), &t.config)).await;
    let (frank_id, frank) = t.customer("frank").await;
    let (grace_id, _) = t.customer("grace").await;
    let (_, admin) = t.admin("root").await;

    let req = test::TestRequest::get()
        .uri(&format!("/users/{}", frank_id))
        .insert_header(bearer(&frank))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/users/{}", grace_id))
        .insert_header(bearer(&frank))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::put()
        .uri(&format!("/users/{}", grace_id))
        .insert_header(bearer(&frank))
        .set_json(json!({ "name": "Mallory" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri(&format!("/users/{}", grace_id))
        .insert_header(bearer(&admin))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/users/999")
        .insert_header(bearer(&admin))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}
