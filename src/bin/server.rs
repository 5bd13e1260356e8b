use clap::Parser;
use tracing_subscriber::EnvFilter;

use udp_chat::cli::{ServerArgs, DEFAULT_LOG_FILTER};
use udp_chat::ChatServer;

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

#[tokio::main]
async fn main() -> udp_chat::Result<()> {
    init_tracing();

    let args = ServerArgs::parse();
    let server = ChatServer::bind(args.config()).await?;
    tracing::info!(
        addr = %server.local_addr(),
        max_rooms = server.registry().max_rooms(),
        "Chat server started"
    );

    server
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
        })
        .await
}
