//! Product catalog and search routes

mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

use sf_api::create_app;
use sf_core::services::MockChatCompletion;

use common::{bearer, TestApp};

#[actix_web::test]
async fn test_product_crud_requires_admin() {
    let t = TestApp::new();
    let app = test::init_service(create_app(t.state.clone(), t.authorizer.clone(), &t.config)).await;
    let (_, customer) = t.customer("kate").await;
    let (_, admin) = t.admin("root").await;

    let product = json!({
        "name": "Laptop",
        "description": "14 inch",
        "price": 999.0,
        "quantity_in_stock": 3,
        "image_urls": ["https://cdn/laptop.png"]
    });

    let req = test::TestRequest::post()
        .uri("/products")
        .insert_header(bearer(&customer))
        .set_json(&product)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri("/products")
        .set_json(&product)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/products")
        .insert_header(bearer(&admin))
        .set_json(&product)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let id = body["id"].as_i64().unwrap();

    let req = test::TestRequest::get()
        .uri(&format!("/products/{}", id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["name"], "Laptop");
    assert_eq!(body["images"], json!(["https://cdn/laptop.png"]));

    let req = test::TestRequest::put()
        .uri(&format!("/products/{}", id))
        .insert_header(bearer(&admin))
        .set_json(json!({ "price": 899.0 }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/products").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body[0]["price"], 899.0);
    assert_eq!(body[0]["name"], "Laptop");

    let req = test::TestRequest::delete()
        .uri(&format!("/products/{}", id))
        .insert_header(bearer(&admin))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/products/{}", id))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_missing_products_are_404() {
    let t = TestApp::new();
    let app = test::init_service(create_app(t.state.clone(), t.authorizer.clone(), &t.config)).await;
    let (_, admin) = t.admin("root").await;

    let req = test::TestRequest::put()
        .uri("/products/404")
        .insert_header(bearer(&admin))
        .set_json(json!({ "name": "Ghost" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete()
        .uri("/products/404")
        .insert_header(bearer(&admin))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_product_without_price_is_400() {
    let t = TestApp::new();
    let app = test::init_service(create_app(t.state.clone(), t.authorizer.clone(), &t.config)).await;
    let (_, admin) = t.admin("root").await;

    let req = test::TestRequest::post()
        .uri("/products")
        .insert_header(bearer(&admin))
        .set_json(json!({ "name": "Laptop" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Missing price");
}

#[actix_web::test]
async fn test_product_with_comma_separated_urls() {
    let t = TestApp::new();
    let app = test::init_service(create_app(t.state.clone(), t.authorizer.clone(), &t.config)).await;
    let (_, admin) = t.admin("root").await;

    let req = test::TestRequest::post()
        .uri("/products/image_urls")
        .insert_header(bearer(&admin))
        .set_json(json!({
            "name": "Phone",
            "price": 10.0,
            "imageUrl": "https://cdn/1.png,https://cdn/2.png"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;

    let req = test::TestRequest::get()
        .uri(&format!("/products/{}", body["id"]))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["images"], json!(["https://cdn/1.png", "https://cdn/2.png"]));
}

#[actix_web::test]
async fn test_ai_search_returns_parsed_hits_and_logs() {
    let t = TestApp::new();
    let app = test::init_service(create_app(t.state.clone(), t.authorizer.clone(), &t.config)).await;
    let (user_id, token) = t.customer("liam").await;
    t.seed_product("Apple iPhone 13", "Smartphone").await;

    let req = test::TestRequest::post()
        .uri("/search")
        .insert_header(bearer(&token))
        .set_json(json!({ "query": "a phone from apple" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["result"][0]["product_id"], 1);
    assert_eq!(body["result"][0]["product_name"], "Apple iPhone 13");

    let logs = t.consultant.search_logs().await;
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].user_id, user_id);
    assert_eq!(t.chat.requests().await.len(), 1);
}

#[actix_web::test]
async fn test_search_requires_query_and_token() {
    let t = TestApp::new();
    let app = test::init_service(create_app(t.state.clone(), t.authorizer.clone(), &t.config)).await;
    let (_, token) = t.customer("mia").await;

    let req = test::TestRequest::post()
        .uri("/search")
        .insert_header(bearer(&token))
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Missing required fields");

    let req = test::TestRequest::post()
        .uri("/search/v2")
        .set_json(json!({ "query": "phone" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_ai_search_upstream_failure_is_500() {
    let t = TestApp::with_chat(MockChatCompletion::failing("model overloaded"));
    let app = test::init_service(create_app(t.state.clone(), t.authorizer.clone(), &t.config)).await;
    let (_, token) = t.customer("noah").await;

    let req = test::TestRequest::post()
        .uri("/search")
        .insert_header(bearer(&token))
        .set_json(json!({ "query": "phone" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Internal server error");
}

#[actix_web::test]
async fn test_fuzzy_search_ranks_matching_products() {
    let t = TestApp::new();
    let app = test::init_service(create_app(t.state.clone(), t.authorizer.clone(), &t.config)).await;
    let (_, token) = t.customer("olivia").await;
    t.seed_product("iPhone", "Apple smartphone").await;
    t.seed_product("Wall clock", "Quartz").await;

    let req = test::TestRequest::post()
        .uri("/search/v2")
        .insert_header(bearer(&token))
        .set_json(json!({ "query": "iphone" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let hits = body["result"].as_array().unwrap();
    assert!(!hits.is_empty());
    assert_eq!(hits[0]["item"]["name"], "iPhone");
    assert_eq!(hits[0]["refIndex"], 0);
    assert!(hits.iter().all(|hit| hit["item"]["name"] != "Wall clock"));
    // No chat traffic for the fuzzy variant
    assert!(t.chat.requests().await.is_empty());
}

#[actix_web::test]
async fn test_consultant_conversation_grows() {
    let t = TestApp::with_chat(MockChatCompletion::replying("Happy to help!"));
    let app = test::init_service(create_app(t.state.clone(), t.authorizer.clone(), &t.config)).await;
    let (_, token) = t.customer("paul").await;

    let req = test::TestRequest::post()
        .uri("/consultant/send-message")
        .insert_header(bearer(&token))
        .set_json(json!({ "message": "Which laptop should I buy?" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let conversation = body["conversation"].as_array().unwrap();
    assert_eq!(conversation.len(), 2);
    assert_eq!(conversation[0]["is_client"], true);
    assert_eq!(conversation[1]["message"], "Happy to help!");
    assert_eq!(conversation[1]["is_client"], false);

    let req = test::TestRequest::post()
        .uri("/consultant/send-message")
        .insert_header(bearer(&token))
        .set_json(json!({ "message": "" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
}
