//! Shared wiring for the HTTP tests: in-memory repositories and a scripted
//! chat-completion client behind the real application factory.

#![allow(dead_code)]

use actix_web::{http::header, web};
use std::sync::Arc;

use sf_api::{AppState, Repositories};
use sf_core::domain::entities::product::NewProduct;
use sf_core::domain::entities::user::Role;
use sf_core::repositories::{
    MockAddressRepository, MockConsultantRepository, MockOrderRepository, MockProductRepository,
    MockUserRepository, ProductRepository,
};
use sf_core::services::{Authorizer, MockChatCompletion, RegisterCommand};
use sf_shared::config::AppConfig;

pub struct TestApp {
    pub state: web::Data<AppState>,
    pub authorizer: web::Data<Authorizer>,
    pub config: AppConfig,
    pub users: Arc<MockUserRepository>,
    pub products: Arc<MockProductRepository>,
    pub consultant: Arc<MockConsultantRepository>,
    pub chat: Arc<MockChatCompletion>,
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.bcrypt_cost = 4;
    config.auth.jwt.secret = "api-test-secret".to_string();
    config
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_chat(MockChatCompletion::replying("Apple iPhone 13, 1;"))
    }

    pub fn with_chat(chat: MockChatCompletion) -> Self {
        let config = test_config();
        let users = Arc::new(MockUserRepository::new());
        let products = Arc::new(MockProductRepository::new());
        let consultant = Arc::new(MockConsultantRepository::new());
        let chat = Arc::new(chat);

        let repos = Repositories {
            users: users.clone(),
            addresses: Arc::new(MockAddressRepository::new()),
            products: products.clone(),
            orders: Arc::new(MockOrderRepository::new(users.clone(), products.clone())),
            consultant: consultant.clone(),
        };
        let (state, authorizer) = AppState::build(repos, chat.clone(), &config);

        Self {
            state: web::Data::new(state),
            authorizer: web::Data::new(authorizer),
            config,
            users,
            products,
            consultant,
            chat,
        }
    }

    /// Register an account and return its id and a fresh token
    pub async fn customer(&self, login: &str) -> (i64, String) {
        let user = self
            .state
            .auth
            .register(RegisterCommand {
                login: login.to_string(),
                password: "secret".to_string(),
                email: None,
                number: None,
                name: None,
            })
            .await
            .unwrap();
        let token = self.state.auth.authenticate(login, "secret").await.unwrap();
        (user.id, token)
    }

    /// Register an account, promote it in the store, then log in
    pub async fn admin(&self, login: &str) -> (i64, String) {
        let (id, _) = self.customer(login).await;
        assert!(self.users.set_role(id, Role::Admin).await);
        let token = self.state.auth.authenticate(login, "secret").await.unwrap();
        (id, token)
    }

    pub async fn seed_product(&self, name: &str, description: &str) -> i64 {
        self.products
            .create(NewProduct {
                name: name.to_string(),
                description: description.to_string(),
                price: 100.0,
                quantity_in_stock: 5,
                key_words: vec![],
                image_urls: vec![],
            })
            .await
            .unwrap()
    }
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}
