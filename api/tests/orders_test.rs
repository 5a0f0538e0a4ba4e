//! Orders, addresses and the notification channel

mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

use sf_api::create_app;
use sf_core::services::Notification;

use common::{bearer, TestApp};

fn order_body(product_id: i64) -> Value {
    json!({
        "user_id": 999,
        "total_price": 200.0,
        "delivery_type": "courier",
        "address_lat": 53.9,
        "address_lng": 27.5,
        "items": [{ "id": product_id, "quantity": 2, "price": 100.0 }]
    })
}

#[actix_web::test]
async fn test_order_belongs_to_token_holder() {
    let t = TestApp::new();
    let app = test::init_service(create_app(t.state.clone(), t.authorizer.clone(), &t.config)).await;
    let (user_id, token) = t.customer("quinn").await;
    let product_id = t.seed_product("Laptop", "14 inch").await;
    let mut subscription = t.state.notifications.subscribe(user_id);

    let req = test::TestRequest::post()
        .uri("/orders")
        .insert_header(bearer(&token))
        .set_json(order_body(product_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let order_id = body["order_id"].as_i64().unwrap();

    assert_eq!(
        subscription.next().await,
        Some(Notification::OrderCreated { order_id })
    );

    let req = test::TestRequest::get()
        .uri("/orders/user")
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let orders = body.as_array().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["user_id"], user_id);
    assert_eq!(orders[0]["items"][0]["product_name"], "Laptop");
}

#[actix_web::test]
async fn test_order_with_missing_product_stores_nothing() {
    let t = TestApp::new();
    let app = test::init_service(create_app(t.state.clone(), t.authorizer.clone(), &t.config)).await;
    let (_, token) = t.customer("rose").await;
    let product_id = t.seed_product("Laptop", "14 inch").await;

    let mut body = order_body(product_id);
    body["items"]
        .as_array_mut()
        .unwrap()
        .push(json!({ "id": 404, "quantity": 1, "price": 1.0 }));

    let req = test::TestRequest::post()
        .uri("/orders")
        .insert_header(bearer(&token))
        .set_json(&body)
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );

    let req = test::TestRequest::get()
        .uri("/orders/user")
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!([]));
}

#[actix_web::test]
async fn test_admin_order_management() {
    let t = TestApp::new();
    let app = test::init_service(create_app(t.state.clone(), t.authorizer.clone(), &t.config)).await;
    let (user_id, customer) = t.customer("sam").await;
    let (_, admin) = t.admin("root").await;
    let product_id = t.seed_product("Laptop", "14 inch").await;

    let req = test::TestRequest::get()
        .uri("/orders")
        .insert_header(bearer(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "No orders found");

    let req = test::TestRequest::post()
        .uri("/orders")
        .insert_header(bearer(&customer))
        .set_json(order_body(product_id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let order_id = body["order_id"].as_i64().unwrap();

    let req = test::TestRequest::get()
        .uri("/orders")
        .insert_header(bearer(&customer))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri("/orders")
        .insert_header(bearer(&admin))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["orders"][0]["customer"]["login"], "sam");

    let req = test::TestRequest::get()
        .uri(&format!("/orders/{}", order_id))
        .insert_header(bearer(&admin))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["items"].as_array().unwrap().len(), 1);

    let mut subscription = t.state.notifications.subscribe(user_id);
    let req = test::TestRequest::put()
        .uri(&format!("/orders/{}", order_id))
        .insert_header(bearer(&admin))
        .set_json(json!({ "status": "shipped" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    assert!(matches!(
        subscription.next().await,
        Some(Notification::OrderStatusChanged { order_id: id, .. }) if id == order_id
    ));

    let req = test::TestRequest::put()
        .uri(&format!("/orders/{}", order_id))
        .insert_header(bearer(&admin))
        .set_json(json!({ "status": "teleported" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::put()
        .uri("/orders/404")
        .insert_header(bearer(&admin))
        .set_json(json!({ "status": "shipped" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri("/orders/404")
        .insert_header(bearer(&admin))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_address_lifecycle() {
    let t = TestApp::new();
    let app = test::init_service(create_app(t.state.clone(), t.authorizer.clone(), &t.config)).await;
    let (_, owner) = t.customer("tina").await;
    let (_, stranger) = t.customer("uma").await;

    let req = test::TestRequest::get()
        .uri("/addresses/user")
        .insert_header(bearer(&owner))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "No addresses found for the user");

    let req = test::TestRequest::post()
        .uri("/addresses")
        .insert_header(bearer(&owner))
        .set_json(json!({ "name": "Home" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Missing name, lat or lng");

    let req = test::TestRequest::post()
        .uri("/addresses")
        .insert_header(bearer(&owner))
        .set_json(json!({ "name": "Home", "lat": 53.9, "lng": 27.5 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let id = body["id"].as_i64().unwrap();

    let req = test::TestRequest::get()
        .uri("/addresses/user")
        .insert_header(bearer(&owner))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["addresses"][0]["name"], "Home");

    let req = test::TestRequest::delete()
        .uri(&format!("/addresses/{}", id))
        .insert_header(bearer(&stranger))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::delete()
        .uri(&format!("/addresses/{}", id))
        .insert_header(bearer(&owner))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::delete()
        .uri(&format!("/addresses/{}", id))
        .insert_header(bearer(&owner))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_notification_channel_requires_token() {
    let t = TestApp::new();
    let app = test::init_service(create_app(t.state.clone(), t.authorizer.clone(), &t.config)).await;

    let req = test::TestRequest::get().uri("/ws").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_notification_channel_upgrades_with_token() {
    let t = TestApp::new();
    let app = test::init_service(create_app(t.state.clone(), t.authorizer.clone(), &t.config)).await;
    let (_, token) = t.customer("vera").await;

    let req = test::TestRequest::get()
        .uri("/ws")
        .insert_header(bearer(&token))
        .insert_header(("Upgrade", "websocket"))
        .insert_header(("Connection", "Upgrade"))
        .insert_header(("Sec-WebSocket-Version", "13"))
        .insert_header(("Sec-WebSocket-Key", "dGhlIHNhbXBsZSBub25jZQ=="))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::SWITCHING_PROTOCOLS
    );
}
