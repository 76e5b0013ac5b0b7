use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use urlwiz_web::{AppState, api_client::ApiClient, config::WebConfig, router};

#[derive(Parser)]
#[command(name = "urlwiz-web")]
#[command(about = "URL Wizard web frontend", long_about = None)]
struct Cli {
    /// Config file to use instead of the default search locations
    #[arg(long, env = "URLWIZ_CONFIG")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the web frontend (default)
    Serve,
    /// Flag a search request as a public example
    MarkExample {
        uuid: String,
        /// Clear the flag instead of setting it
        #[arg(long)]
        unset: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "urlwiz_web=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = WebConfig::load(cli.config.as_deref())?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await,
        Commands::MarkExample { uuid, unset } => {
            let result = ApiClient::new(config.api_url.clone())
                .set_example(&uuid, !unset)
                .await?;
            println!(
                "Search {} is {} an example.",
                uuid,
                if result.is_example { "now" } else { "no longer" }
            );
            Ok(())
        }
    }
}

async fn serve(config: WebConfig) -> anyhow::Result<()> {
    tracing::info!("Web frontend starting...");
    tracing::info!("API URL: {}", config.api_url);
    if let Some(id) = &config.analytics_id {
        tracing::info!("Analytics: {}", id);
    }

    let addr = config.bind_addr();
    let app = router(AppState::new(config));

    tracing::info!("Web frontend listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
