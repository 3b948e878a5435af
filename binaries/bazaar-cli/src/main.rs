//! Bazaar CLI
//!
//! Runs the storefront server and exposes the catalog, favorites and
//! keyword suggestions from the terminal.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bazaar_catalog::{Catalog, ProductQuery};
use bazaar_config::BazaarConfig;
use bazaar_core::{format_grouped, Listing};
use bazaar_favorites::{FavoritesStore, JsonFileKv};
use bazaar_suggest::{AnthropicSuggester, KeywordSuggester, SuggestionGateway, SuggestionRequest};
use bazaar_web::AppState;

#[derive(Parser)]
#[command(name = "bazaar")]
#[command(about = "Bazaar - classifieds storefront, favorites and sell wizard")]
#[command(version)]
struct Cli {
    /// Config file (defaults to $BAZAAR_CONFIG, then the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    Serve {
        /// Bind host (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Bind port (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Search the catalog
    Search {
        /// Text matched against title, description and keywords
        #[arg(short, long)]
        query: Option<String>,

        /// Exact category ("all" for every category)
        #[arg(short, long)]
        category: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List catalog categories
    Categories,

    /// Show one listing
    Show {
        /// Listing id
        id: String,
    },

    /// Manage favorites
    Favorites {
        #[command(subcommand)]
        command: FavoritesCommands,
    },

    /// Ask the suggestion provider for listing keywords
    Suggest {
        #[arg(short, long)]
        title: String,

        #[arg(short, long)]
        description: String,
    },

    /// Print the effective configuration
    Config,
}

#[derive(Subcommand)]
enum FavoritesCommands {
    /// List favorite listings
    List,
    /// Add or remove a listing
    Toggle {
        /// Listing id
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let config = BazaarConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Commands::Serve { host, port } => cmd_serve(config, host, port).await,
        Commands::Search {
            query,
            category,
            json,
        } => cmd_search(&config, query, category, json),
        Commands::Categories => cmd_categories(&config),
        Commands::Show { id } => cmd_show(&config, &id),
        Commands::Favorites { command } => cmd_favorites(&config, command),
        Commands::Suggest { title, description } => cmd_suggest(&config, title, description).await,
        Commands::Config => {
            print!("{}", config.to_yaml().context("Failed to render configuration")?);
            Ok(())
        }
    }
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "bazaar=info,bazaar_web=info,tower_http=info".into());
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn load_catalog(config: &BazaarConfig) -> Result<Catalog> {
    match &config.catalog.seed_path {
        Some(path) => Catalog::from_json_file(path)
            .with_context(|| format!("Failed to load catalog from {}", path.display())),
        None => Ok(Catalog::sample()),
    }
}

fn open_favorites(config: &BazaarConfig) -> FavoritesStore {
    FavoritesStore::open(JsonFileKv::at_path(config.storage.favorites_path()))
}

fn print_row(listing: &Listing, favorite: bool) {
    println!(
        "  {} {:<4} {:<40} {:>12}  {:<12} {}",
        if favorite { "♥" } else { " " },
        listing.id,
        listing.title,
        format!("₹{}", format_grouped(listing.price)),
        listing.category,
        listing.location
    );
}

async fn cmd_serve(mut config: BazaarConfig, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let state = AppState::from_config(&config).context("Failed to initialise application state")?;
    tracing::info!(
        listings = state.catalog.len(),
        provider = state.suggest.provider_name(),
        "Starting Bazaar"
    );

    let addr = config.server.bind_addr();
    bazaar_web::serve(Arc::new(state), &addr)
        .await
        .with_context(|| format!("Server on {} failed", addr))
}

fn cmd_search(
    config: &BazaarConfig,
    query: Option<String>,
    category: Option<String>,
    json: bool,
) -> Result<()> {
    let catalog = load_catalog(config)?;
    let favorites = open_favorites(config);
    let query = ProductQuery { query, category };
    let products = catalog.products(&query);

    if json {
        println!("{}", serde_json::to_string_pretty(&products)?);
        return Ok(());
    }

    if products.is_empty() {
        println!("No products found");
        return Ok(());
    }
    println!("\n  {} result(s)\n", products.len());
    for listing in products {
        print_row(listing, favorites.is_favorite(&listing.id));
    }
    println!();
    Ok(())
}

fn cmd_categories(config: &BazaarConfig) -> Result<()> {
    let catalog = load_catalog(config)?;
    for category in catalog.categories() {
        println!("{}", category);
    }
    Ok(())
}

fn cmd_show(config: &BazaarConfig, id: &str) -> Result<()> {
    let catalog = load_catalog(config)?;
    let listing = catalog.find(id)?;
    let favorite = open_favorites(config).is_favorite(&listing.id);

    println!("\n  {}{}", listing.title, if favorite { "  ♥" } else { "" });
    println!("  ₹{}", format_grouped(listing.price));
    println!("  {} · {}", listing.category, listing.location);
    println!("\n  {}\n", listing.description);
    println!("  Seller:   {}", listing.seller.name);
    if !listing.keywords.is_empty() {
        println!("  Keywords: {}", listing.keywords.join(", "));
    }
    for image in &listing.images {
        println!("  Image:    {}", image);
    }
    println!();
    Ok(())
}

fn cmd_favorites(config: &BazaarConfig, command: FavoritesCommands) -> Result<()> {
    let catalog = load_catalog(config)?;
    let mut favorites = open_favorites(config);

    match command {
        FavoritesCommands::List => {
            let ids = favorites.ids().cloned().unwrap_or_default();
            let listings = catalog.with_ids(ids.iter().map(String::as_str));
            if listings.is_empty() {
                println!("No favorites yet");
                return Ok(());
            }
            for listing in listings {
                print_row(listing, true);
            }
        }
        FavoritesCommands::Toggle { id } => {
            catalog.find(&id)?;
            let ids = favorites
                .toggle(&id)
                .with_context(|| format!("Failed to save favorite {}", id))?;
            if ids.contains(&id) {
                println!("  ♥ Added {}", id);
            } else {
                println!("  Removed {}", id);
            }
        }
    }
    Ok(())
}

async fn cmd_suggest(config: &BazaarConfig, title: String, description: String) -> Result<()> {
    let request = SuggestionRequest::new(title, description);
    if !request.is_complete() {
        anyhow::bail!("Title and Description needed");
    }

    let provider: Arc<dyn KeywordSuggester> = Arc::new(
        AnthropicSuggester::from_config(&config.suggest)
            .context("Keyword suggestions are not configured")?,
    );
    let response = SuggestionGateway::new(provider).suggest(&request).await;

    if !response.success {
        anyhow::bail!(response.error.unwrap_or_else(|| "Suggestion failed".to_string()));
    }
    for keyword in response.keywords() {
        println!("{}", keyword);
    }
    Ok(())
}
