//! Application state shared by all workers

use std::sync::Arc;
use std::time::Duration;

use sf_core::repositories::{
    AddressRepository, ConsultantRepository, OrderRepository, ProductRepository, UserRepository,
};
use sf_core::services::{
    AddressService, AuthService, AuthServiceConfig, Authorizer, CatalogService, ChatCompletion,
    ConsultantService, NotificationHub, OrderService, SearchService, TokenService,
    TokenServiceConfig, TtlCache,
};
use sf_shared::config::AppConfig;

/// Storage ports the services are built on
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub addresses: Arc<dyn AddressRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub consultant: Arc<dyn ConsultantRepository>,
}

/// Services reachable from every handler
pub struct AppState {
    pub auth: AuthService,
    pub addresses: AddressService,
    pub catalog: CatalogService,
    pub orders: OrderService,
    pub consultant: ConsultantService,
    pub search: SearchService,
    pub notifications: NotificationHub,
}

impl AppState {
    /// Wire the services; the returned [`Authorizer`] shares the token service
    pub fn build(
        repos: Repositories,
        chat: Arc<dyn ChatCompletion>,
        config: &AppConfig,
    ) -> (Self, Authorizer) {
        let tokens = Arc::new(TokenService::new(TokenServiceConfig::from(&config.auth.jwt)));
        let product_cache = Arc::new(TtlCache::new(Duration::from_secs(
            config.cache.product_ttl_seconds,
        )));
        let notifications = NotificationHub::default();

        let state = Self {
            auth: AuthService::new(
                Arc::clone(&repos.users),
                Arc::clone(&repos.addresses),
                Arc::clone(&tokens),
                AuthServiceConfig::from(&config.auth),
            ),
            addresses: AddressService::new(Arc::clone(&repos.addresses)),
            catalog: CatalogService::new(Arc::clone(&repos.products), Arc::clone(&product_cache)),
            orders: OrderService::new(Arc::clone(&repos.orders), notifications.clone()),
            consultant: ConsultantService::new(
                Arc::clone(&repos.consultant),
                Arc::clone(&repos.products),
                Arc::clone(&repos.orders),
                Arc::clone(&chat),
                config.consultant.clone(),
            ),
            search: SearchService::new(
                Arc::clone(&repos.products),
                product_cache,
                chat,
                Arc::clone(&repos.consultant),
                config.consultant.clone(),
            ),
            notifications,
        };

        (state, Authorizer::new(tokens, repos.users))
    }
}
