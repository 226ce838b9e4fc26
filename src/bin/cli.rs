#![cfg(not(tarpaulin_include))]

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use storefront::config::{load_app_configuration, load_config};
use storefront::downloader;
use storefront::label;
use storefront::loader;
use storefront::product::Product;
use storefront::state::AppState;

/// Inspect the storefront inventory from a terminal
#[derive(Parser, Debug)]
#[command(name = "storefront-cli")]
#[command(about = "Query the inventory, print labels and take backups")]
struct Args {
    /// Configuration file (defaults to $STOREFRONT_CONFIG or storefront.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every product
    List,
    /// Case-insensitive name search
    Search { query: String },
    /// Render a product's label to a PNG file
    Label {
        barcode: String,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long, default_value_t = label::DEFAULT_WIDTH)]
        width: u32,
        #[arg(long, default_value_t = label::DEFAULT_HEIGHT)]
        height: u32,
    },
    /// Write a dated backup of the inventory
    Export {
        #[arg(long)]
        xlsx: bool,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Replace the inventory with a CSV backup
    Restore { backup: PathBuf },
    /// Products at or below their restock threshold
    LowStock,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => load_app_configuration()?,
    };
    let mut state = AppState::open(config)?;

    match args.command {
        Command::List => print_table(state.inventory.products().iter()),
        Command::Search { query } => print_table(state.inventory.search(&query).into_iter()),
        Command::LowStock => print_table(state.inventory.low_stock().into_iter()),
        Command::Label {
            barcode,
            output,
            width,
            height,
        } => {
            let product = state
                .inventory
                .find_by_barcode(&barcode)
                .ok_or_else(|| format!("No product with barcode {}", barcode))?;
            let png = state
                .labels
                .render_png(&product.barcode, &product.name, width, height)?;
            let path = output.unwrap_or_else(|| PathBuf::from(format!("label_{}.png", product.barcode)));
            std::fs::write(&path, png)?;
            println!("Label written to {}", path.display());
        }
        Command::Restore { backup } => {
            let products = loader::load_backup(&backup)?;
            let count = products.len();
            let report = state.inventory.replace_all(products)?;
            println!("Restored {} products from {}", count, backup.display());
            if let Some(warning) = report.remote_warning {
                eprintln!("Warning: {}", warning);
            }
        }
        Command::Export { xlsx, output } => {
            let products = state.inventory.products();
            let (bytes, extension) = if xlsx {
                (downloader::to_xlsx(products)?, "xlsx")
            } else {
                (downloader::to_csv(products)?.into_bytes(), "csv")
            };
            let path = output.unwrap_or_else(|| PathBuf::from(downloader::backup_filename(extension)));
            std::fs::write(&path, bytes)?;
            println!("Exported {} products to {}", products.len(), path.display());
        }
    }

    Ok(())
}

fn print_table<'a>(products: impl Iterator<Item = &'a Product>) {
    println!(
        "{:<16} {:<24} {:<12} {:>10} {:>6}  {}",
        "Barcode", "Name", "Category", "Price", "Qty", "Status"
    );
    for p in products {
        println!(
            "{:<16} {:<24} {:<12} {:>10.2} {:>6}  {}",
            p.barcode,
            label::truncate_name(&p.name),
            p.category,
            p.price,
            p.quantity,
            p.stock_status()
        );
    }
}
