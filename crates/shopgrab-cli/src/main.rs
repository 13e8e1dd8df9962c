use clap::{Parser, Subcommand};
use shopgrab_scraper::{FetchConfig, StorefrontClient};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "shopgrab-cli")]
#[command(about = "Scrape Shopify storefront categories and products")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the products on a collection page
    Category {
        /// Absolute URL of the collection page
        url: String,
    },
    /// Fetch full detail for one product page
    Product {
        /// Absolute URL of the product page
        url: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = shopgrab_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = StorefrontClient::new(&FetchConfig::from_app_config(&config))?;

    let output = match cli.command {
        Commands::Category { url } => {
            let entries = client.extract_category(&url).await?;
            tracing::info!(url = %url, entries = entries.len(), "category scraped");
            serde_json::to_string_pretty(&entries)?
        }
        Commands::Product { url } => {
            let record = client.extract_product(&url).await?;
            if record.is_none() {
                tracing::warn!(url = %url, "no product extracted");
            }
            serde_json::to_string_pretty(&record)?
        }
    };

    println!("{output}");
    Ok(())
}
