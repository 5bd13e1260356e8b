use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

use udp_chat::cli::{ClientArgs, DEFAULT_LOG_FILTER};
use udp_chat::client::{prompt_nickname, run_console, ChatClient};

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() -> udp_chat::Result<()> {
    init_tracing();

    let args = ClientArgs::parse();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    let nickname = match args.nickname {
        Some(nickname) => nickname,
        None => match prompt_nickname(&mut lines, &mut stdout).await? {
            Some(nickname) => nickname,
            None => return Ok(()),
        },
    };

    let client = ChatClient::connect(args.server, nickname).await?;

    let banner = format!(
        "Using {} as {}\nType HELP for the command list\n",
        client.server_addr(),
        client.nickname()
    );
    stdout.write_all(banner.as_bytes()).await?;

    run_console(&client, &mut lines, &mut stdout).await?;
    client.close();
    Ok(())
}
