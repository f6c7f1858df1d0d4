use clap::Parser;
use tokio::net::TcpListener;
use todo_server::config::Config;
use todo_server::store::Store;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("todo_server=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::parse();
    let store = Store::open(&config.database)
        .inspect_err(|error| tracing::error!(%error, "DB error"))?;

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, database = %config.database.display(), "Server Started");
    todo_server::run(listener, store).await?;
    Ok(())
}
