use std::net::SocketAddr;
use std::sync::Arc;

use mathtutor_server::config::Config;
use mathtutor_server::handlers;
use mathtutor_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    dotenv::dotenv().ok();

    let config = Config::load();
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = Arc::new(AppState::new(config)?);
    let app = handlers::router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    handlers::log_startup(&addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
