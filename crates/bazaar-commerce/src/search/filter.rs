//! Search filter types.

use crate::catalog::Product;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A predicate over products. A query matches a product when every one of
/// its filters does.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Filter {
    /// Product is in any of these category slugs. An empty list matches all.
    Categories(Vec<String>),
    /// Price within inclusive bounds.
    PriceRange {
        min: Option<Money>,
        max: Option<Money>,
    },
    /// Only show in-stock items.
    InStock,
    /// Only show discounted items.
    OnSale,
    /// Average rating at least this high.
    MinRating(f32),
    /// Case-insensitive substring of the name, description or features.
    Text(String),
}

impl Filter {
    /// Create a category filter.
    pub fn categories<I, S>(slugs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Filter::Categories(slugs.into_iter().map(Into::into).collect())
    }

    /// Create a price range filter.
    pub fn price_range(min: Option<Money>, max: Option<Money>) -> Self {
        Filter::PriceRange { min, max }
    }

    /// Create a text search filter.
    pub fn text(query: impl Into<String>) -> Self {
        Filter::Text(query.into())
    }

    /// Check whether `product` passes this filter.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Filter::Categories(slugs) => {
                slugs.is_empty() || slugs.iter().any(|slug| *slug == product.category)
            }
            Filter::PriceRange { min, max } => {
                // Bounds in another currency never match.
                let above_min = min.map_or(true, |min| product.price >= min);
                let below_max = max.map_or(true, |max| product.price <= max);
                above_min && below_max
            }
            Filter::InStock => product.in_stock,
            Filter::OnSale => product.is_on_sale(),
            Filter::MinRating(min) => product.rating >= *min,
            Filter::Text(needle) => {
                let needle = needle.to_lowercase();
                needle.is_empty()
                    || product.name.to_lowercase().contains(&needle)
                    || product.description.to_lowercase().contains(&needle)
                    || product
                        .features
                        .iter()
                        .any(|feature| feature.to_lowercase().contains(&needle))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn usd(cents: i64) -> Money {
        Money::new(cents, Currency::USD)
    }

    fn jeans() -> Product {
        let mut product = Product::new("p4", "Designer Jeans", usd(3999), "clothing")
            .with_original_price(usd(4499))
            .with_rating(4.6, 215);
        product.features = vec!["Premium Denim".to_string()];
        product
    }

    #[test]
    fn test_category_filter() {
        assert!(Filter::categories(["clothing", "books"]).matches(&jeans()));
        assert!(!Filter::categories(["books"]).matches(&jeans()));
        assert!(Filter::categories(Vec::<String>::new()).matches(&jeans()));
    }

    #[test]
    fn test_price_range_is_inclusive() {
        assert!(Filter::price_range(Some(usd(3999)), Some(usd(3999))).matches(&jeans()));
        assert!(!Filter::price_range(Some(usd(4000)), None).matches(&jeans()));
        assert!(!Filter::price_range(None, Some(usd(3998))).matches(&jeans()));
        assert!(Filter::price_range(None, None).matches(&jeans()));
    }

    #[test]
    fn test_price_range_other_currency_never_matches() {
        let eur = Money::new(0, Currency::EUR);
        assert!(!Filter::price_range(Some(eur), None).matches(&jeans()));
    }

    #[test]
    fn test_stock_sale_rating() {
        let mut product = jeans();
        assert!(Filter::InStock.matches(&product));
        assert!(Filter::OnSale.matches(&product));
        assert!(Filter::MinRating(4.5).matches(&product));
        assert!(!Filter::MinRating(4.7).matches(&product));

        product.in_stock = false;
        product.original_price = None;
        assert!(!Filter::InStock.matches(&product));
        assert!(!Filter::OnSale.matches(&product));
    }

    #[test]
    fn test_text_filter() {
        assert!(Filter::text("jeans").matches(&jeans()));
        assert!(Filter::text("DENIM").matches(&jeans()));
        assert!(!Filter::text("oak").matches(&jeans()));
    }
}
