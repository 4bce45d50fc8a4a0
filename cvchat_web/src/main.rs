use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;

use cvchat_web::{app, env, logging, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::configure_logging();

    let app = app(Arc::new(AppState::from_env()));

    let addr = socket_addr_from_env(env::API_PORT, 3000);
    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .context("server terminated unexpectedly")?;

    Ok(())
}

fn socket_addr_from_env(port_env_key: &str, default: u16) -> SocketAddr {
    let port = std::env::var(port_env_key).ok();
    let port = port.and_then(|x| x.parse().ok()).unwrap_or(default);
    SocketAddr::from(([0, 0, 0, 0], port))
}
