//! Search query builder.

use std::fmt;
use std::str::FromStr;

use crate::catalog::Product;
use crate::money::Money;
use crate::search::Filter;
use serde::{Deserialize, Serialize};

/// Sort options for the product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Catalog order.
    #[default]
    Featured,
    /// Sort by price, low to high.
    PriceAsc,
    /// Sort by price, high to low.
    PriceDesc,
    /// Most recently added first. The catalog appends new products, so this
    /// is reverse catalog order.
    Newest,
    /// Most reviewed first.
    BestSelling,
    /// Highest rated first.
    Rating,
}

impl SortOption {
    /// Every option, in menu order.
    pub const ALL: [SortOption; 6] = [
        SortOption::Featured,
        SortOption::PriceAsc,
        SortOption::PriceDesc,
        SortOption::Newest,
        SortOption::BestSelling,
        SortOption::Rating,
    ];

    /// Stable machine name, as accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Featured => "featured",
            SortOption::PriceAsc => "price-asc",
            SortOption::PriceDesc => "price-desc",
            SortOption::Newest => "newest",
            SortOption::BestSelling => "best-selling",
            SortOption::Rating => "rating",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Featured => "Featured",
            SortOption::PriceAsc => "Price: Low to High",
            SortOption::PriceDesc => "Price: High to Low",
            SortOption::Newest => "Newest First",
            SortOption::BestSelling => "Best Selling",
            SortOption::Rating => "Highest Rated",
        }
    }

    /// Order `products` in place. Sorting is stable, so ties keep their
    /// incoming (catalog) order.
    fn sort(&self, products: &mut Vec<&Product>) {
        match self {
            SortOption::Featured => {}
            SortOption::PriceAsc => products.sort_by_key(|p| p.price.amount_cents),
            SortOption::PriceDesc => {
                products.sort_by(|a, b| b.price.amount_cents.cmp(&a.price.amount_cents))
            }
            SortOption::Newest => products.reverse(),
            SortOption::BestSelling => products.sort_by(|a, b| b.review_count.cmp(&a.review_count)),
            SortOption::Rating => products.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        SortOption::ALL
            .into_iter()
            .find(|option| option.as_str() == normalized)
            .ok_or_else(|| {
                let names: Vec<&str> = SortOption::ALL.iter().map(SortOption::as_str).collect();
                format!("unknown sort {:?}, expected one of: {}", s, names.join(", "))
            })
    }
}

/// A product listing query: filters plus a sort order.
///
/// ```
/// use bazaar_commerce::search::{ProductQuery, SortOption};
///
/// let query = ProductQuery::new()
///     .category("books")
///     .in_stock_only()
///     .sort_by(SortOption::PriceAsc);
/// assert_eq!(query.filters().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductQuery {
    filters: Vec<Filter>,
    sort: SortOption,
}

impl ProductQuery {
    /// Match everything, in catalog order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an arbitrary filter.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Restrict to a category. Repeated calls widen the set (OR).
    pub fn category(mut self, slug: impl Into<String>) -> Self {
        let slug = slug.into();
        for filter in &mut self.filters {
            if let Filter::Categories(slugs) = filter {
                slugs.push(slug);
                return self;
            }
        }
        self.filter(Filter::Categories(vec![slug]))
    }

    /// Inclusive price bounds.
    pub fn price_between(self, min: Option<Money>, max: Option<Money>) -> Self {
        if min.is_none() && max.is_none() {
            return self;
        }
        self.filter(Filter::price_range(min, max))
    }

    pub fn in_stock_only(self) -> Self {
        self.filter(Filter::InStock)
    }

    pub fn on_sale_only(self) -> Self {
        self.filter(Filter::OnSale)
    }

    pub fn min_rating(self, rating: f32) -> Self {
        self.filter(Filter::MinRating(rating))
    }

    /// Free-text match on name, description and features.
    pub fn text(self, text: impl Into<String>) -> Self {
        self.filter(Filter::text(text))
    }

    pub fn sort_by(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn sort(&self) -> SortOption {
        self.sort
    }

    /// Run the query over `products`, which must be in catalog order.
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        let mut matched: Vec<&Product> = products
            .iter()
            .filter(|product| self.filters.iter().all(|f| f.matches(product)))
            .collect();
        self.sort.sort(&mut matched);
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn usd(cents: i64) -> Money {
        Money::new(cents, Currency::USD)
    }

    fn products() -> Vec<Product> {
        vec![
            Product::new("a", "Novel", usd(599), "books").with_rating(4.9, 302),
            Product::new("b", "Kite", usd(1500), "toys")
                .with_original_price(usd(2000))
                .with_rating(4.2, 40),
            Product::new("c", "Atlas", usd(1500), "books").with_rating(4.9, 12),
            Product::new("d", "Robot", usd(8999), "toys").with_rating(3.1, 500),
        ]
    }

    fn ids(found: &[&Product]) -> Vec<String> {
        found.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_empty_query_is_catalog_order() {
        let products = products();
        assert_eq!(ids(&ProductQuery::new().apply(&products)), ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_price_asc_ties_keep_catalog_order() {
        let products = products();
        let found = ProductQuery::new().sort_by(SortOption::PriceAsc).apply(&products);
        assert_eq!(ids(&found), ["a", "b", "c", "d"]);

        let found = ProductQuery::new().sort_by(SortOption::PriceDesc).apply(&products);
        assert_eq!(ids(&found), ["d", "b", "c", "a"]);
    }

    #[test]
    fn test_other_sorts() {
        let products = products();
        let sorted = |sort| ids(&ProductQuery::new().sort_by(sort).apply(&products));

        assert_eq!(sorted(SortOption::Newest), ["d", "c", "b", "a"]);
        assert_eq!(sorted(SortOption::BestSelling), ["d", "a", "b", "c"]);
        assert_eq!(sorted(SortOption::Rating), ["a", "c", "b", "d"]);
    }

    #[test]
    fn test_repeated_category_widens() {
        let products = products();
        let query = ProductQuery::new().category("books");
        assert_eq!(ids(&query.apply(&products)), ["a", "c"]);

        let query = query.category("toys");
        assert_eq!(query.filters().len(), 1);
        assert_eq!(ids(&query.apply(&products)), ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_filters_combine_with_and() {
        let products = products();
        let found = ProductQuery::new()
            .price_between(Some(usd(1000)), Some(usd(5000)))
            .category("books")
            .apply(&products);
        assert_eq!(ids(&found), ["c"]);

        let found = ProductQuery::new().on_sale_only().apply(&products);
        assert_eq!(ids(&found), ["b"]);
    }

    #[test]
    fn test_open_price_range_adds_nothing() {
        assert!(ProductQuery::new().price_between(None, None).filters().is_empty());
    }

    #[test]
    fn test_sort_from_str() {
        assert_eq!("price-asc".parse::<SortOption>(), Ok(SortOption::PriceAsc));
        assert_eq!("Best_Selling".parse::<SortOption>(), Ok(SortOption::BestSelling));
        assert!("cheapest".parse::<SortOption>().is_err());

        for option in SortOption::ALL {
            assert_eq!(option.as_str().parse::<SortOption>(), Ok(option));
        }
    }
}
