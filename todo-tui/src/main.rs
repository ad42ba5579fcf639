use clap::Parser;

use crate::api::ApiClient;

mod api;
mod ui;

#[derive(Parser)]
#[command(name = "todo", about = "Terminal client for the todo RPC server")]
struct Args {
    /// Base URL of the RPC server.
    #[arg(long, default_value = "http://localhost:2022")]
    server: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let client = ApiClient::new(args.server);

    client
        .healthcheck()
        .await
        .map_err(|err| anyhow::anyhow!("server unreachable: {err}"))?;

    ui::run_app(client).await?;

    Ok(())
}
