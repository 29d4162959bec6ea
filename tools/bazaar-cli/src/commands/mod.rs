//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod config;

use bazaar_commerce::search::SortOption;
use clap::{Args, Subcommand};

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Only products in this category (repeatable).
    #[arg(long = "category", value_name = "SLUG")]
    pub categories: Vec<String>,

    /// Minimum price in rupees, inclusive (e.g. 1499).
    #[arg(long)]
    pub min_price: Option<f64>,

    /// Maximum price, inclusive.
    #[arg(long)]
    pub max_price: Option<f64>,

    /// Hide out-of-stock products.
    #[arg(long)]
    pub in_stock: bool,

    /// Only discounted products.
    #[arg(long)]
    pub on_sale: bool,

    /// Minimum average rating (0-5).
    #[arg(long)]
    pub min_rating: Option<f32>,

    /// Match name, description or features.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Sort order: featured, price-asc, price-desc, newest, best-selling, rating.
    #[arg(long, default_value_t = SortOption::Featured)]
    pub sort: SortOption,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product ID.
    pub id: String,
}

/// Arguments for the category command.
#[derive(Args)]
pub struct CategoryArgs {
    /// Category slug.
    pub slug: String,
}

/// Arguments for the featured command.
#[derive(Args)]
pub struct FeaturedArgs {
    /// Number of products (defaults to catalog.featured_limit).
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart and order summary.
    Show,
    /// Add a product to the cart.
    Add {
        /// Product ID.
        id: String,
        /// Units to add.
        #[arg(short, long, default_value = "1")]
        quantity: i64,
    },
    /// Set a product's quantity; zero or less removes it.
    Update {
        /// Product ID.
        id: String,
        /// New quantity.
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Add one unit.
    Inc {
        /// Product ID.
        id: String,
    },
    /// Remove one unit; the last unit removes the product.
    Dec {
        /// Product ID.
        id: String,
    },
    /// Remove a product.
    Remove {
        /// Product ID.
        id: String,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file and the catalog it points to.
    Validate,
}
