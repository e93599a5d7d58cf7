use std::{path::PathBuf, time::Duration};

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use client_core::{
    item_count, total_value, HttpBackend, Notifier, Severity, Storefront, TracingNotifier,
};
use shared::domain::{CartItem, Product, ProductId};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod config;

use config::{load_settings, DEFAULT_CONFIG_PATH};

#[derive(Parser, Debug)]
#[command(about = "Browse the storefront catalog and manage your cart")]
struct Cli {
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// Backend base URL, e.g. http://localhost:8082/api/v1
    #[arg(long)]
    endpoint: Option<String>,
    /// Bearer token returned by `login`.
    #[arg(long)]
    token: Option<String>,
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// Print products and carts as JSON.
    #[arg(long)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Products,
    Search { text: String },
    Register { username: String, password: String },
    Login { username: String, password: String },
    Cart,
    Add { product_id: String },
    SetQty { product_id: String, qty: u32 },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut settings = load_settings(&cli.config)?;
    if let Some(endpoint) = cli.endpoint {
        settings.endpoint = endpoint;
    }
    if let Some(token) = cli.token {
        settings.token = Some(token);
    }
    if let Some(secs) = cli.timeout_secs {
        settings.request_timeout_secs = secs;
    }

    let backend = HttpBackend::with_timeout(
        &settings.endpoint,
        Duration::from_secs(settings.request_timeout_secs),
    )?;
    debug!(
        endpoint = backend.endpoint(),
        has_token = settings.token.is_some(),
        "storefront: settings loaded"
    );
    let token = settings.token.as_deref();
    let storefront = Storefront::new(backend.clone(), backend.clone(), TracingNotifier);

    match cli.command {
        Command::Products => {
            print_products(&storefront.load_catalog().await, cli.json)?;
        }
        Command::Search { text } => match backend.search_products(&text).await {
            Ok(products) if products.is_empty() => println!("No products found"),
            Ok(products) => print_products(&products, cli.json)?,
            Err(error) => {
                TracingNotifier.notify(&error.message, Severity::Error);
                bail!("search failed: {error}");
            }
        },
        Command::Register { username, password } => {
            backend.register(&username, &password).await?;
            TracingNotifier.notify("Registered successfully", Severity::Success);
        }
        Command::Login { username, password } => {
            let session = backend.login(&username, &password).await?;
            TracingNotifier.notify("Logged in successfully", Severity::Success);
            println!("username={} balance={}", session.username, session.balance);
            println!("token={}", session.token);
        }
        Command::Cart => {
            let catalog = storefront.load_catalog().await;
            let items = storefront.refresh_cart(token, &catalog).await;
            print_cart(&items, cli.json)?;
        }
        Command::Add { product_id } => {
            let catalog = storefront.load_catalog().await;
            let items = storefront.refresh_cart(token, &catalog).await;
            let items = storefront
                .add_to_cart(token, &items, &catalog, &ProductId::from(product_id))
                .await?;
            print_cart(&items, cli.json)?;
        }
        Command::SetQty { product_id, qty } => {
            let catalog = storefront.load_catalog().await;
            let items = storefront.refresh_cart(token, &catalog).await;
            let items = storefront
                .set_quantity(token, &items, &catalog, &ProductId::from(product_id), qty)
                .await?;
            print_cart(&items, cli.json)?;
        }
    }

    Ok(())
}

fn print_products(products: &[Product], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(products)?);
        return Ok(());
    }
    for product in products {
        println!(
            "{}  {} [{}]  {:.2}  {}/5",
            product.id, product.name, product.category, product.cost, product.rating
        );
    }
    Ok(())
}

fn print_cart(items: &[CartItem], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
        return Ok(());
    }
    if items.is_empty() {
        println!("Cart is empty");
        return Ok(());
    }
    for item in items {
        println!(
            "{}  {} x{}  {:.2}",
            item.product_id,
            item.name,
            item.qty,
            item.line_total()
        );
    }
    println!(
        "{} item(s), order total {:.2}",
        item_count(items),
        total_value(items)
    );
    Ok(())
}
