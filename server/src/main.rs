use tokio::net::TcpListener;
use todo_core::TodoStore;
use todo_server::config::Config;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let listener = TcpListener::bind(config.address()).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    let store = TodoStore::new();
    todo_server::run(listener, store, &config).await?;
    Ok(())
}
