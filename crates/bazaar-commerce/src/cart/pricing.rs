//! Order summary pricing for the cart page.

use crate::cart::CartState;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Shipping and tax rules applied to a cart subtotal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PricingRules {
    /// Subtotal at or above which shipping is free.
    pub free_shipping_threshold: Money,
    /// Shipping charged below the threshold.
    pub flat_shipping: Money,
    /// Tax rate in basis points (800 = 8%).
    pub tax_rate_bps: i64,
}

/// Free shipping from ₹50.00, otherwise ₹5.99, and 8% tax.
impl Default for PricingRules {
    fn default() -> Self {
        Self {
            free_shipping_threshold: Money::new(5000, Currency::INR),
            flat_shipping: Money::new(599, Currency::INR),
            tax_rate_bps: 800,
        }
    }
}

/// Complete pricing breakdown for a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartPricing {
    /// Sum of line totals.
    pub subtotal: Money,
    /// Shipping cost.
    pub shipping_total: Money,
    /// Tax amount.
    pub tax_total: Money,
    /// Final total (subtotal + shipping + tax).
    pub grand_total: Money,
    /// How much more the subtotal needs for free shipping; zero once reached.
    pub free_shipping_remaining: Money,
    /// Per-line pricing breakdown.
    pub line_items: Vec<LineItemPricing>,
}

impl CartPricing {
    /// Price `cart` under `rules`.
    ///
    /// An empty cart costs nothing, shipping included. Fails if the rules
    /// are in a different currency from the cart.
    pub fn calculate(cart: &CartState, rules: &PricingRules) -> Result<Self, CommerceError> {
        let currency = cart.currency().unwrap_or(rules.flat_shipping.currency);
        for rule_money in [rules.free_shipping_threshold, rules.flat_shipping] {
            if rule_money.currency != currency {
                return Err(CommerceError::CurrencyMismatch {
                    expected: currency.code().to_string(),
                    got: rule_money.currency.code().to_string(),
                });
            }
        }

        let line_items: Vec<LineItemPricing> = cart
            .entries()
            .iter()
            .map(|entry| LineItemPricing {
                product_id: entry.product.id.clone(),
                name: entry.product.name.clone(),
                unit_price: entry.product.price,
                quantity: entry.quantity,
                total: entry.line_total(),
            })
            .collect();

        let subtotal = cart.subtotal();
        let zero = Money::zero(currency);

        let free_shipping = cart.is_empty()
            || subtotal.amount_cents >= rules.free_shipping_threshold.amount_cents;
        let shipping_total = if free_shipping { zero } else { rules.flat_shipping };
        let free_shipping_remaining = if free_shipping {
            zero
        } else {
            Money::new(
                rules.free_shipping_threshold.amount_cents - subtotal.amount_cents,
                currency,
            )
        };

        let tax_total = subtotal.apply_bps(rules.tax_rate_bps);
        let grand_total = Money::saturating_sum([subtotal, shipping_total, tax_total], currency);

        Ok(Self {
            subtotal,
            shipping_total,
            tax_total,
            grand_total,
            free_shipping_remaining,
            line_items,
        })
    }

    /// Check if shipping is free.
    pub fn has_free_shipping(&self) -> bool {
        self.shipping_total.is_zero()
    }
}

/// Pricing for a single cart entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItemPricing {
    pub product_id: ProductId,
    pub name: String,
    /// Snapshot unit price.
    pub unit_price: Money,
    pub quantity: i64,
    /// Unit price times quantity.
    pub total: Money,
}
