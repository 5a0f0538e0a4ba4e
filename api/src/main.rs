use actix_web::{web, HttpServer};
use anyhow::Context;
use log::info;
use std::sync::Arc;

use sf_api::{create_app, AppState, Repositories};
use sf_infra::{
    DatabasePool, MySqlAddressRepository, MySqlConsultantRepository, MySqlOrderRepository,
    MySqlProductRepository, MySqlUserRepository, OpenAiChatClient,
};
use sf_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();

    // Initialize logger; tracing events from core and infra arrive through `log`
    env_logger::init_from_env(
        env_logger::Env::new().default_filter_or(config.environment.default_log_filter()),
    );

    info!("Starting storefront API ({} environment)", config.environment);
    config.validate().context("invalid configuration")?;

    let pool = DatabasePool::new(&config.database)
        .await
        .context("failed to connect to the database")?;
    if config.database.run_migrations {
        pool.run_migrations()
            .await
            .context("failed to apply migrations")?;
    }

    let db = pool.get_pool().clone();
    let repos = Repositories {
        users: Arc::new(MySqlUserRepository::new(db.clone())),
        addresses: Arc::new(MySqlAddressRepository::new(db.clone())),
        products: Arc::new(MySqlProductRepository::new(db.clone())),
        orders: Arc::new(MySqlOrderRepository::new(db.clone())),
        consultant: Arc::new(MySqlConsultantRepository::new(db)),
    };
    let chat = Arc::new(
        OpenAiChatClient::new(&config.consultant).context("failed to build chat client")?,
    );

    let (state, authorizer) = AppState::build(repos, chat, &config);
    let state = web::Data::new(state);
    let authorizer = web::Data::new(authorizer);

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let app_config = config.clone();
    let mut server = HttpServer::new(move || {
        create_app(state.clone(), authorizer.clone(), &app_config)
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    pool.close().await;
    Ok(())
}
