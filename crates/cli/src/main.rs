//! Stride CLI - catalog file management.
//!
//! # Usage
//!
//! ```bash
//! # Summarize the catalog
//! stride-cli catalog show
//!
//! # List brands in a specific file
//! stride-cli catalog brands --path /var/lib/stride/products.json
//!
//! # Add a product
//! stride-cli catalog add --id 9 --name "Speedcross 6" --price 124.99 \
//!     --brand Salomon --gender Unisex --category Hiking
//!
//! # Add a review
//! stride-cli catalog review --product-id 9 --rating 5 --comment "Grippy" --reviewer Ines
//! ```
//!
//! The catalog path defaults to `STOREFRONT_CATALOG_PATH`, the same variable
//! the storefront reads.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

const DEFAULT_CATALOG_PATH: &str = "crates/storefront/data/products.json";

#[derive(Parser)]
#[command(name = "stride-cli")]
#[command(author, version, about = "Stride CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and edit the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(clap::Args)]
struct CatalogPath {
    /// Catalog JSON file
    #[arg(long, env = "STOREFRONT_CATALOG_PATH", default_value = DEFAULT_CATALOG_PATH)]
    path: PathBuf,
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Print product count and every product
    Show {
        #[command(flatten)]
        catalog: CatalogPath,
    },
    /// Print distinct brands
    Brands {
        #[command(flatten)]
        catalog: CatalogPath,
    },
    /// Append a product
    Add {
        #[arg(long)]
        id: i32,

        #[arg(long)]
        name: String,

        /// Price in pounds, e.g. 89.99
        #[arg(long)]
        price: String,

        #[arg(long)]
        brand: String,

        /// Target gender, e.g. Male, Female, Unisex
        #[arg(long)]
        gender: String,

        /// Shoe kind, e.g. Running, Walking, Hiking
        #[arg(long)]
        category: String,

        #[arg(long, default_value = "")]
        description: String,

        #[arg(long, default_value = "")]
        image_url: String,

        #[command(flatten)]
        catalog: CatalogPath,
    },
    /// Append a review to a product
    Review {
        #[arg(long)]
        product_id: i32,

        /// Rating from 1 to 5
        #[arg(long)]
        rating: i32,

        #[arg(long, default_value = "")]
        comment: String,

        #[arg(long)]
        reviewer: String,

        #[command(flatten)]
        catalog: CatalogPath,
    },
}

fn main() {
    // Load .env so the catalog path matches the storefront's
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::Show { catalog } => commands::catalog::show(&catalog.path)?,
            CatalogAction::Brands { catalog } => {
                commands::catalog::brands(&catalog.path)?;
            }
            CatalogAction::Add {
                id,
                name,
                price,
                brand,
                gender,
                category,
                description,
                image_url,
                catalog,
            } => commands::catalog::add(
                &catalog.path,
                commands::catalog::NewProduct {
                    id,
                    name,
                    price,
                    brand,
                    gender,
                    category,
                    description,
                    image_url,
                },
            )?,
            CatalogAction::Review {
                product_id,
                rating,
                comment,
                reviewer,
                catalog,
            } => commands::catalog::review(&catalog.path, product_id, rating, &comment, &reviewer)?,
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_review_command() {
        let cli = Cli::try_parse_from([
            "stride-cli",
            "catalog",
            "review",
            "--product-id",
            "3",
            "--rating",
            "4",
            "--reviewer",
            "Jo",
            "--path",
            "/tmp/products.json",
        ]);
        assert!(matches!(
            cli.map(|c| c.command),
            Ok(Commands::Catalog {
                action: CatalogAction::Review {
                    product_id: 3,
                    rating: 4,
                    ..
                }
            })
        ));
    }
}
