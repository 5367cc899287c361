use order_server::{Config, Server, ServerState, init_logger_with_file, print_banner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (.env is optional)
    let _ = dotenv::dotenv();

    // 2. Configuration
    let config = Config::from_env()?;

    // 3. Logging
    init_logger_with_file(&config.log_level, config.log_json, config.log_dir.as_deref())?;

    print_banner();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Tempero order server starting...");

    // 4. State: database, migrations, bootstrap admin
    let state = ServerState::initialize(&config).await?;

    // 5. HTTP server
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
