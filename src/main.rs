use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use amatta::config::{AmattaConfig, CONFIG_FILE_NAME};
use amatta::storefront::models::NewProduct;

mod cmd;

#[derive(Parser)]
#[command(name = "amatta")]
#[command(version, about = "Storefront with seller-link enrichment")]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the config file (defaults to ./amatta.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the storefront HTTP server
    Serve {
        /// Address to bind (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to serve on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Enable dev mode (permissive CORS)
        #[arg(long)]
        dev: bool,
    },
    /// Fetch products and show them with seller metadata
    Products {
        /// Print the listing as JSON
        #[arg(long)]
        json: bool,

        /// Resolve metadata through a running amatta server instead of microlink
        #[arg(long)]
        via_proxy: Option<String>,

        /// Maximum concurrent metadata lookups (overrides config)
        #[arg(long)]
        max_concurrency: Option<usize>,
    },
    /// Add a product to the product source
    Add {
        #[arg(long)]
        name: String,

        /// Price in KRW
        #[arg(long)]
        price: u64,

        #[arg(long)]
        seller: String,

        #[arg(long, default_value = "")]
        image_url: String,
    },
    /// Look up seller metadata for a single link
    Unfurl {
        url: String,

        /// Print the upstream response untouched
        #[arg(long)]
        raw: bool,

        /// Render a preview card, using this name when the page has no title
        #[arg(long)]
        product_name: Option<String>,
    },
    /// View or initialize configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Write a default amatta.toml
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));

    let mut config = AmattaConfig::resolve(&config_path)?;
    amatta::logging::init(&config.logging, cli.verbose);

    match cli.command {
        Commands::Serve { host, port, dev } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            config.server.dev |= dev;
            cmd::cmd_serve(&config).await?;
        }
        Commands::Products {
            json,
            via_proxy,
            max_concurrency,
        } => {
            if let Some(limit) = max_concurrency {
                config.metadata.max_concurrency = limit.max(1);
            }
            cmd::cmd_products(&config, json, via_proxy.as_deref()).await?;
        }
        Commands::Add {
            name,
            price,
            seller,
            image_url,
        } => {
            let product = NewProduct {
                name,
                price,
                seller,
                image_url,
            };
            cmd::cmd_add(&config, product).await?;
        }
        Commands::Unfurl {
            url,
            raw,
            product_name,
        } => {
            cmd::cmd_unfurl(&config, &url, raw, product_name.as_deref()).await?;
        }
        Commands::Config { command } => cmd::cmd_config(&config_path, command)?,
    }

    Ok(())
}
