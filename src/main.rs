use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wishlist_service::cart::SqliteCart;
use wishlist_service::config::Config;
use wishlist_service::db::{self, AppState, queries};
use wishlist_service::handlers;
use wishlist_service::models::{CreateCustomer, CreateProduct, ProductType};
use wishlist_service::signing::ShareLinkSigner;

const DB_POOL_SIZE: u32 = 8;

#[derive(Parser)]
#[command(name = "wishlist-service", version, about = "Customer wishlist service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Create a customer and print its API key
    CreateCustomer {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    /// Add a product to the catalog
    CreateProduct {
        #[arg(long)]
        sku: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        url_key: String,
        #[arg(long, default_value = "simple")]
        product_type: ProductType,
        #[arg(long)]
        parent_id: Option<String>,
        #[arg(long)]
        price_cents: Option<i64>,
        /// Only reachable through its parent
        #[arg(long)]
        hidden: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wishlist_service=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let pool = db::create_pool(&config.database_path, DB_POOL_SIZE)
        .with_context(|| format!("failed to open database at {}", config.database_path))?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config, pool).await,
        Command::CreateCustomer { name, email } => {
            let conn = pool.get()?;
            let created = queries::create_customer(&conn, &CreateCustomer { name, email })?;
            tracing::info!("Created customer {}", created.customer.id);
            println!("{}", serde_json::to_string_pretty(&created)?);
            Ok(())
        }
        Command::CreateProduct {
            sku,
            name,
            url_key,
            product_type,
            parent_id,
            price_cents,
            hidden,
        } => {
            let conn = pool.get()?;
            let product = queries::create_product(
                &conn,
                &CreateProduct {
                    sku,
                    name,
                    url_key,
                    product_type,
                    parent_id,
                    status: true,
                    visible_individually: !hidden,
                    price_cents,
                },
            )?;
            println!("{}", serde_json::to_string_pretty(&product)?);
            Ok(())
        }
    }
}

async fn serve(config: Config, pool: db::DbPool) -> anyhow::Result<()> {
    let secret = match &config.share_link_secret {
        Some(secret) => secret.clone(),
        None => {
            tracing::warn!(
                "SHARE_LINK_SECRET not set; generated a per-process key, shared links will not survive a restart"
            );
            ShareLinkSigner::generate_secret()
        }
    };

    let state = AppState {
        db: pool,
        base_url: config.base_url.clone(),
        default_channel: config.default_channel.clone(),
        wishlist: config.wishlist,
        share_links: ShareLinkSigner::new(secret, &config.base_url, config.share_link_ttl_seconds),
        cart: Arc::new(SqliteCart),
    };

    if config.dev_mode {
        tracing::warn!("Running in dev mode: /dev seeding endpoints are enabled");
    }

    let app = handlers::app(state, config.dev_mode);

    let listener = tokio::net::TcpListener::bind(config.addr())
        .await
        .with_context(|| format!("failed to bind {}", config.addr()))?;
    tracing::info!("Listening on {}", config.addr());

    axum::serve(listener, app).await?;
    Ok(())
}
