#![recursion_limit = "256"]

mod config;
mod routes;
mod services;
mod state;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = config::ServerConfig::from_env().expect("invalid configuration");

    let accounts = services::accounts::AccountDirectory::new();
    if config.seed_demo_accounts {
        let inserted = accounts.seed_demo(&config.demo_password).await;
        tracing::info!(inserted, "demo accounts seeded");
    }
    let state = state::AppState::new(accounts);

    let app = match routes::leptos_app(state.clone(), config.site_root.clone()) {
        Ok(app) => app,
        Err(e) => {
            tracing::warn!(error = %e, "leptos configuration unavailable; serving API only");
            routes::api_routes(state)
        }
    };

    let port = config.port;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "account portal listening");
    axum::serve(listener, app).await.expect("server failed");
}
