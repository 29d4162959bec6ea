//! Cart management commands.

use anyhow::{Context as _, Result};
use bazaar_cache::FileStore;
use bazaar_commerce::cart::{CartChange, CartStore, PricingRules};
use bazaar_commerce::catalog::{Catalog, Product};
use dialoguer::Confirm;

use super::{CartArgs, CartCommand};
use crate::context::Context;

/// Run the cart command.
pub fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let rules = ctx.config.pricing.rules()?;
    let mut cart = ctx.open_cart()?;
    ctx.output.debug(&format!(
        "cart slot {:?} in {}",
        cart.key(),
        ctx.data_dir().display()
    ));

    let output = ctx.output.clone();
    cart.subscribe(move |event| {
        output.debug(&format!(
            "{}: {} items, subtotal {}",
            describe(&event.change),
            event.item_count,
            event.subtotal
        ));
    });

    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => return show(&cart, &rules, ctx),
        CartCommand::Add { id, quantity } => {
            let catalog = ctx.catalog()?;
            let product = find_product(&catalog, &id)?;
            cart.add_to_cart(product, quantity)
                .with_context(|| format!("Cannot add {} to the cart", product.name))?;
            ctx.output.success(&format!("Added {} x {}", quantity, product.name));
        }
        CartCommand::Update { id, quantity } => {
            let name = entry_name(&cart, &id);
            let found = cart
                .update_quantity(&id, quantity)
                .with_context(|| format!("Cannot update {}", name))?;
            if !found {
                not_in_cart(ctx, &id);
            } else if quantity <= 0 {
                ctx.output.success(&format!("Removed {}", name));
            } else {
                ctx.output.success(&format!("Set {} to {}", name, quantity));
            }
        }
        CartCommand::Inc { id } => {
            let name = entry_name(&cart, &id);
            if cart.increment(&id).with_context(|| format!("Cannot add another {}", name))? {
                ctx.output.success(&format!("Added one {}", name));
            } else {
                not_in_cart(ctx, &id);
            }
        }
        CartCommand::Dec { id } => {
            let name = entry_name(&cart, &id);
            if cart.decrement(&id)? {
                ctx.output.success(&format!("Removed one {}", name));
            } else {
                not_in_cart(ctx, &id);
            }
        }
        CartCommand::Remove { id } => {
            let name = entry_name(&cart, &id);
            if cart.remove_from_cart(&id) {
                ctx.output.success(&format!("Removed {}", name));
            } else {
                not_in_cart(ctx, &id);
            }
        }
        CartCommand::Clear { yes } => {
            if !yes && !ctx.output.is_json() && !cart.state().is_empty() {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Remove all {} items from the cart?", cart.item_count()))
                    .default(false)
                    .interact()?;

                if !confirmed {
                    ctx.output.warn("Cart left unchanged");
                    return Ok(());
                }
            }

            cart.clear_cart();
            ctx.output.success("Cart cleared");
        }
    }

    if ctx.output.is_json() {
        return show(&cart, &rules, ctx);
    }
    ctx.output.info(&format!(
        "Cart: {} items, subtotal {}",
        cart.item_count(),
        cart.subtotal()
    ));
    Ok(())
}

fn find_product<'a>(catalog: &'a Catalog, id: &str) -> Result<&'a Product> {
    catalog
        .product_by_id(id)
        .with_context(|| format!("No product with ID {}", id))
}

/// Name of the product under `id` in the cart, or the id itself.
fn entry_name(cart: &CartStore<FileStore>, id: &str) -> String {
    cart.state()
        .get(id)
        .map_or_else(|| id.to_string(), |entry| entry.product.name.clone())
}

fn not_in_cart(ctx: &Context, id: &str) {
    ctx.output.warn(&format!("{id} is not in the cart; use `bazaar cart add {id}`"));
}

fn describe(change: &CartChange) -> String {
    match change {
        CartChange::Added {
            product_id,
            quantity,
        } => format!("added {} x {}", quantity, product_id),
        CartChange::QuantitySet {
            product_id,
            quantity,
        } => format!("set {} to {}", product_id, quantity),
        CartChange::Removed { product_id } => format!("removed {}", product_id),
        CartChange::Cleared => "cleared".to_string(),
    }
}

fn show(cart: &CartStore<FileStore>, rules: &PricingRules, ctx: &Context) -> Result<()> {
    let pricing = cart.pricing(rules)?;

    if ctx.output.is_json() {
        return ctx.output.json(&serde_json::json!({
            "items": cart.state(),
            "item_count": cart.item_count(),
            "pricing": pricing,
        }));
    }

    ctx.output.header("Shopping Cart");
    if cart.state().is_empty() {
        ctx.output.info("Your cart is empty. Try `bazaar featured`.");
        return Ok(());
    }

    let widths = [6, 32, 5, 10, 10];
    ctx.output.table_header(&["ID", "NAME", "QTY", "PRICE", "TOTAL"], &widths);
    for line in &pricing.line_items {
        ctx.output.table_row(
            &[
                line.product_id.as_str(),
                &line.name,
                &line.quantity.to_string(),
                &line.unit_price.display(),
                &line.total.display(),
            ],
            &widths,
        );
    }

    ctx.output.header("Order Summary");
    ctx.output.kv("items", &cart.item_count().to_string());
    ctx.output.kv("subtotal", &pricing.subtotal.display());
    let shipping = if pricing.has_free_shipping() {
        "Free".to_string()
    } else {
        pricing.shipping_total.display()
    };
    ctx.output.kv("shipping", &shipping);
    ctx.output.kv(
        &format!("tax ({})", format_rate(rules.tax_rate_bps)),
        &pricing.tax_total.display(),
    );
    ctx.output.kv("total", &pricing.grand_total.display());

    if pricing.free_shipping_remaining.is_positive() {
        ctx.output.blank();
        ctx.output.info(&format!(
            "Add {} more for free shipping",
            pricing.free_shipping_remaining
        ));
    }
    Ok(())
}

/// Basis points as a percentage, e.g. `825` as `8.25%`.
fn format_rate(bps: i64) -> String {
    let whole = bps / 100;
    match bps % 100 {
        0 => format!("{}%", whole),
        frac if frac % 10 == 0 => format!("{}.{}%", whole, frac / 10),
        frac => format!("{}.{:02}%", whole, frac),
    }
}
