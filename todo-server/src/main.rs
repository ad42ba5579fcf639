use std::net::{Ipv4Addr, SocketAddr};

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use todo_server::config::Config;
use todo_server::db::Db;
use todo_server::rpc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("todo_server=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;
    let db = Db::connect(&config.database_url).await?;

    let app = rpc::router(db)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("RPC server listening at port: {}", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
