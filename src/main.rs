use anyhow::Context;
use arrest_config::ServerConfig;
use arrest_management::logging::init_tracing;
use arrest_management::router::init_router;
use arrest_management::state::AppState;
use dotenvy::dotenv;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing().context("Failed to initialize logging")?;

    let state = AppState::from_env().await?;
    let app = init_router(state);

    let server = ServerConfig::from_env();
    let listener = tokio::net::TcpListener::bind(server.addr())
        .await
        .with_context(|| format!("Failed to bind {}", server.addr()))?;

    tracing::info!(port = server.port, "Server running");
    tracing::info!("Swagger UI available at http://localhost:{}/swagger-ui", server.port);

    axum::serve(listener, app).await?;
    Ok(())
}
