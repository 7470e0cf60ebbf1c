use factotum::{ChatClient, Config};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "factotum=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::debug!(model = %config.model, endpoint = %config.api_base, "configuration loaded");

    println!("Welcome to the factotum chat client (function-calling). Type 'exit' to quit.");
    let mut client = ChatClient::new(config)?;
    client.chat().await
}
