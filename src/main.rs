use karma::app::App;
use karma::config::Config;
use karma::prompt::{DialoguerTerminal, Prompt};
use karma::TodoStore;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "karma=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::new_from_env();
    let store = TodoStore::from_config(&config);

    let prompt = Prompt::new(DialoguerTerminal::new());
    let mut app = App::new(store, prompt);

    info!("starting karma");
    app.run().await?;

    Ok(())
}
