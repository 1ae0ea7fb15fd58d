use sea_orm::Database;
use tracing::info;

use campus_registry::config::RegistryConfig;
use campus_registry::router::build_router;
use campus_registry::state::AppState;

#[tokio::main]
async fn main() {
    campus_core::tracing::init_tracing();

    let config = RegistryConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState {
        db,
        jwt_secret: config.jwt_secret,
    };

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.registry_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("registry service listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
