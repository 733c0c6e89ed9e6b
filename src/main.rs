//! amz-listing-scraper - Scrape Amazon search listings and product details into a CSV file

use amz_listing_scraper::commands::{ProductCommand, ScrapeCommand};
use amz_listing_scraper::config::{Config, OutputFormat};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "amz-listing-scraper",
    version,
    about = "Scrape Amazon search listings and product details into a CSV file"
)]
struct Cli {
    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true, env = "AMZ_PROXY")]
    proxy: Option<String>,

    /// Pause after each listing page in milliseconds
    #[arg(long, global = true, env = "AMZ_DELAY")]
    delay: Option<u64>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape listing pages and product details into a file
    #[command(alias = "s")]
    Scrape {
        /// Search results URL
        #[arg(long)]
        base_url: Option<String>,

        /// Maximum number of listing pages
        #[arg(short, long)]
        pages: Option<u32>,

        /// Maximum number of products
        #[arg(short, long)]
        max: Option<usize>,

        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (csv, jsonl)
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },

    /// Fetch the detail fields of a single product page
    #[command(alias = "p")]
    Product {
        /// Product URL, absolute or relative to the search URL (e.g. /dp/B0XXXXXXXX)
        url: String,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::INFO.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }
    if let Some(delay) = cli.delay {
        config.delay_ms = delay;
    }

    match cli.command {
        Commands::Scrape { base_url, pages, max, output, format } => {
            if let Some(base_url) = base_url {
                config.base_url = base_url;
            }
            if let Some(pages) = pages {
                config.num_pages = pages;
            }
            if let Some(max) = max {
                config.max_products = max;
            }
            if let Some(output) = output {
                config.output_path = output;
            }
            if let Some(format) = format {
                config.format = format;
            }

            let summary = ScrapeCommand::new(config).execute().await?;
            println!("{}", summary);
        }

        Commands::Product { url, json } => {
            let output = ProductCommand::new(config).execute(&url, json).await?;
            println!("{}", output);
        }
    }

    Ok(())
}
