use clap::Parser;
use quotebook::{telemetry, Store};

mod commands;
mod init;

type Error = Box<dyn std::error::Error + Send + Sync>;

#[derive(Clone, Copy)]
struct Context<'a> {
    store: &'a Store,
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let cli = commands::Cli::parse();
    let telemetry = telemetry::init_telemetry().map_err(|e| anyhow::anyhow!(e))?;

    let result = run(cli).await;

    if let Some(guard) = telemetry {
        guard.shutdown();
    }

    result
}

async fn run(cli: commands::Cli) -> anyhow::Result<()> {
    let store = init::init(cli.database).await?;

    let ctx = Context {
        store: &store,
        json: cli.json,
    };
    let result = commands::run(ctx, cli.command).await;

    store.close().await;

    result.map_err(|e| anyhow::anyhow!(e))
}
