//! Bazaar CLI - Command line storefront.
//!
//! Commands:
//! - `bazaar products` - List and filter the catalog
//! - `bazaar product` - Show one product with its reviews
//! - `bazaar categories` / `bazaar category` - Browse by category
//! - `bazaar featured` - Products currently on sale
//! - `bazaar cart` - Manage the persisted shopping cart
//! - `bazaar config` - Manage configuration

mod commands;
mod config;
mod context;
mod logging;
mod output;

use clap::{Parser, Subcommand};

use commands::{CartArgs, CategoryArgs, ConfigArgs, FeaturedArgs, ProductArgs, ProductsArgs};

/// Bazaar - Browse the store and manage your cart
#[derive(Parser)]
#[command(name = "bazaar")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products, with optional filters and sort order
    Products(ProductsArgs),

    /// Show a product's details and reviews
    Product(ProductArgs),

    /// List categories
    Categories,

    /// List the products in a category
    Category(CategoryArgs),

    /// Show featured (discounted) products
    Featured(FeaturedArgs),

    /// Manage the shopping cart
    Cart(CartArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn main() {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let ctx = match context::Context::load(cli.config.as_deref(), output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    if let Err(e) = logging::init(&ctx.config.logging, cli.verbose) {
        ctx.output.warn(&format!("{:#}", e));
    }

    // Execute command
    let result = match cli.command {
        Commands::Products(args) => commands::catalog::run_products(args, &ctx),
        Commands::Product(args) => commands::catalog::run_product(args, &ctx),
        Commands::Categories => commands::catalog::run_categories(&ctx),
        Commands::Category(args) => commands::catalog::run_category(args, &ctx),
        Commands::Featured(args) => commands::catalog::run_featured(args, &ctx),
        Commands::Cart(args) => commands::cart::run(args, &ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_commerce::search::SortOption;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_products_filters() {
        let cli = Cli::try_parse_from([
            "bazaar",
            "products",
            "--category",
            "books",
            "--category",
            "clothing",
            "--max-price",
            "50",
            "--sort",
            "price_asc",
            "--json",
        ])
        .unwrap();

        assert!(cli.json);
        let Commands::Products(args) = cli.command else {
            panic!("expected products command");
        };
        assert_eq!(args.categories, ["books", "clothing"]);
        assert_eq!(args.max_price, Some(50.0));
        assert_eq!(args.sort, SortOption::PriceAsc);
    }

    #[test]
    fn test_parse_cart_update_negative() {
        let cli = Cli::try_parse_from(["bazaar", "cart", "update", "p1", "-2"]).unwrap();
        let Commands::Cart(CartArgs {
            command: Some(commands::CartCommand::Update { id, quantity }),
        }) = cli.command
        else {
            panic!("expected cart update");
        };
        assert_eq!(id, "p1");
        assert_eq!(quantity, -2);
    }

    #[test]
    fn test_parse_cart_defaults_to_show() {
        let cli = Cli::try_parse_from(["bazaar", "cart"]).unwrap();
        assert!(matches!(cli.command, Commands::Cart(CartArgs { command: None })));
    }

    #[test]
    fn test_rejects_unknown_sort() {
        assert!(Cli::try_parse_from(["bazaar", "products", "--sort", "cheapest"]).is_err());
    }
}
