//! Catalog browsing commands.

use anyhow::{bail, Result};
use bazaar_commerce::catalog::{Catalog, Product, MAX_RATING};
use bazaar_commerce::search::ProductQuery;
use bazaar_commerce::Money;

use super::{CategoryArgs, FeaturedArgs, ProductArgs, ProductsArgs};
use crate::context::Context;
use crate::output::{price_label, stars, stock_badge};

const TABLE_HEADER: [&str; 6] = ["ID", "NAME", "PRICE", "WAS", "RATING", "STOCK"];
const TABLE_WIDTHS: [usize; 6] = [6, 32, 10, 10, 12, 12];

/// Run the products command.
pub fn run_products(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let query = build_query(&args, &catalog, ctx)?;
    let products = catalog.search(&query);

    if ctx.output.is_json() {
        return ctx.output.json(&products);
    }

    ctx.output.header(&format!(
        "Products ({}) sorted by {}",
        products.len(),
        args.sort.display_name()
    ));
    if products.is_empty() {
        ctx.output.info("No products match these filters");
        return Ok(());
    }
    print_product_table(ctx, &products);
    Ok(())
}

fn build_query(args: &ProductsArgs, catalog: &Catalog, ctx: &Context) -> Result<ProductQuery> {
    let currency = ctx.config.pricing.currency()?;

    for slug in &args.categories {
        if catalog.category_by_slug(slug).is_none() {
            bail!("Unknown category: {}", slug);
        }
    }
    for bound in [args.min_price, args.max_price].into_iter().flatten() {
        if !bound.is_finite() || bound < 0.0 {
            bail!("Price bounds must be non-negative, got {}", bound);
        }
    }

    let mut query = ProductQuery::new().sort_by(args.sort);
    for slug in &args.categories {
        query = query.category(slug.as_str());
    }
    query = query.price_between(
        args.min_price.map(|p| Money::from_decimal(p, currency)),
        args.max_price.map(|p| Money::from_decimal(p, currency)),
    );
    if args.in_stock {
        query = query.in_stock_only();
    }
    if args.on_sale {
        query = query.on_sale_only();
    }
    if let Some(rating) = args.min_rating {
        if !(0.0..=MAX_RATING).contains(&rating) {
            bail!("Minimum rating must be between 0 and {}", MAX_RATING);
        }
        query = query.min_rating(rating);
    }
    if let Some(text) = args.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        query = query.text(text);
    }

    Ok(query)
}

/// Run the product command.
pub fn run_product(args: ProductArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let Some(product) = catalog.product_by_id(&args.id) else {
        bail!("No product with ID {}", args.id);
    };

    if ctx.output.is_json() {
        return ctx.output.json(product);
    }

    ctx.output.header(&product.name);
    ctx.output.kv("id", product.id.as_str());
    let category = catalog
        .category_by_slug(&product.category)
        .map_or(product.category.as_str(), |c| c.name.as_str());
    ctx.output.kv("category", category);
    ctx.output.kv("price", &price_label(product));
    if let (Some(savings), Some(percent)) = (product.savings(), product.discount_percentage()) {
        ctx.output.kv("you save", &format!("{} ({}%)", savings.display(), percent));
    }
    ctx.output.kv(
        "rating",
        &format!(
            "{} {:.1} ({} reviews)",
            stars(product.rating),
            product.rating,
            product.review_count
        ),
    );
    ctx.output.kv("availability", &stock_badge(product.in_stock));

    if !product.description.is_empty() {
        ctx.output.blank();
        ctx.output.info(&product.description);
    }

    if !product.features.is_empty() {
        ctx.output.header("Features");
        for feature in &product.features {
            ctx.output.list_item(feature);
        }
    }

    if !product.reviews.is_empty() {
        ctx.output.header("Reviews");
        for review in &product.reviews {
            ctx.output.list_item(&format!(
                "{} {} on {}",
                stars(f32::from(review.rating)),
                review.user_name,
                review.date.format("%B %-d, %Y")
            ));
            ctx.output.info(&review.comment);
        }
    }

    Ok(())
}

/// Run the categories command.
pub fn run_categories(ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;

    if ctx.output.is_json() {
        return ctx.output.json(&catalog.list_categories());
    }

    ctx.output.header("Categories");
    let widths = [6, 14, 16, 8];
    ctx.output.table_header(&["ID", "SLUG", "NAME", "PRODUCTS"], &widths);
    for category in catalog.list_categories() {
        let count = catalog.products_by_category(&category.slug).len().to_string();
        ctx.output.table_row(
            &[category.id.as_str(), &category.slug, &category.name, &count],
            &widths,
        );
    }
    Ok(())
}

/// Run the category command.
pub fn run_category(args: CategoryArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let Some(category) = catalog.category_by_slug(&args.slug) else {
        bail!("Unknown category: {}", args.slug);
    };
    let products = catalog.products_by_category(&category.slug);

    if ctx.output.is_json() {
        return ctx.output.json(&serde_json::json!({
            "category": category,
            "products": products,
        }));
    }

    ctx.output.header(&category.name);
    if let Some(description) = &category.description {
        ctx.output.info(description);
    }
    if products.is_empty() {
        ctx.output.info("No products in this category");
        return Ok(());
    }
    ctx.output.blank();
    print_product_table(ctx, &products);
    Ok(())
}

/// Run the featured command.
pub fn run_featured(args: FeaturedArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let limit = args.limit.unwrap_or(ctx.config.catalog.featured_limit);
    let products = catalog.featured_products(limit);

    if ctx.output.is_json() {
        return ctx.output.json(&products);
    }

    ctx.output.header("Featured Products");
    if products.is_empty() {
        ctx.output.info("Nothing on sale right now");
        return Ok(());
    }
    print_product_table(ctx, &products);
    Ok(())
}

fn print_product_table(ctx: &Context, products: &[&Product]) {
    ctx.output.table_header(&TABLE_HEADER, &TABLE_WIDTHS);
    for product in products {
        let price = product.price.display();
        let was = product
            .original_price
            .filter(|_| product.is_on_sale())
            .map_or_else(|| "-".to_string(), |original| original.display());
        let rating = format!("{:.1} ({})", product.rating, product.review_count);
        let stock = stock_badge(product.in_stock);
        ctx.output.table_row(
            &[
                product.id.as_str(),
                &truncate(&product.name, TABLE_WIDTHS[1]),
                &price,
                &was,
                &rating,
                &stock,
            ],
            &TABLE_WIDTHS,
        );
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{kept}…")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Desk Lamp", 12), "Desk Lamp");
        assert_eq!(truncate("Wireless Headphones", 8), "Wireles…");
        assert_eq!(truncate("Wireless Headphones", 8).chars().count(), 8);
    }
}
