use quotebook::{Config, Store};

fn init_config(database: Option<String>) -> anyhow::Result<Config> {
    let config = Config::from_env_with(database)
        .inspect_err(|e| tracing::error!(err = ?e, "an error occurred when reading configuration"))?;

    tracing::info!(
        database_url = %config.database_url,
        max_connections = config.max_connections,
        write_timeout = ?config.write_timeout,
        "loaded configuration."
    );

    Ok(config)
}

pub async fn init(database: Option<String>) -> anyhow::Result<Store> {
    tracing::info!("initializing... please wait warmly.");

    let config = init_config(database)?;
    let store = Store::open(&config).await?;

    tracing::info!("finished initializing!");
    Ok(store)
}
