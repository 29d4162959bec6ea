//! The read-only catalog.

use std::collections::HashMap;
use std::path::Path;

use crate::catalog::{Category, Product};
use crate::error::CommerceError;
use crate::search::ProductQuery;
use serde::{Deserialize, Serialize};

/// Number of products the homepage features.
pub const DEFAULT_FEATURED_LIMIT: usize = 4;

/// The storefront's own catalog, embedded at build time.
const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.json");

/// On-disk shape of a catalog file.
#[derive(Debug, Serialize, Deserialize)]
struct CatalogData {
    categories: Vec<Category>,
    products: Vec<Product>,
}

/// Immutable, indexed set of products and categories.
///
/// Records keep their declaration order; every listing returns them in that
/// order. Misses return `None` or an empty list, never an error.
#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<Category>,
    products: Vec<Product>,
    by_product_id: HashMap<String, usize>,
    by_category_slug: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, validating every record and the references between
    /// them.
    pub fn new(categories: Vec<Category>, products: Vec<Product>) -> Result<Self, CommerceError> {
        let mut by_category_slug = HashMap::with_capacity(categories.len());
        let mut category_ids = HashMap::with_capacity(categories.len());
        for (position, category) in categories.iter().enumerate() {
            category.validate()?;
            if by_category_slug
                .insert(category.slug.clone(), position)
                .is_some()
            {
                return Err(CommerceError::Duplicate {
                    kind: "category slug",
                    id: category.slug.clone(),
                });
            }
            if category_ids.insert(category.id.clone(), position).is_some() {
                return Err(CommerceError::Duplicate {
                    kind: "category id",
                    id: category.id.to_string(),
                });
            }
        }

        let mut by_product_id = HashMap::with_capacity(products.len());
        for (position, product) in products.iter().enumerate() {
            product.validate()?;
            if !by_category_slug.contains_key(&product.category) {
                return Err(CommerceError::UnknownCategory {
                    product_id: product.id.to_string(),
                    category: product.category.clone(),
                });
            }
            if by_product_id
                .insert(product.id.as_str().to_string(), position)
                .is_some()
            {
                return Err(CommerceError::Duplicate {
                    kind: "product id",
                    id: product.id.to_string(),
                });
            }
        }

        tracing::debug!(
            categories = categories.len(),
            products = products.len(),
            "catalog built"
        );

        Ok(Self {
            categories,
            products,
            by_product_id,
            by_category_slug,
        })
    }

    /// The storefront's static catalog.
    pub fn builtin() -> Result<Self, CommerceError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Parse and validate a catalog from JSON
    /// (`{"categories": [...], "products": [...]}`).
    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        let data: CatalogData = serde_json::from_str(json)?;
        Self::new(data.categories, data.products)
    }

    /// Load a catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CommerceError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    /// All products in declaration order.
    pub fn list_products(&self) -> &[Product] {
        &self.products
    }

    /// All categories in declaration order.
    pub fn list_categories(&self) -> &[Category] {
        &self.categories
    }

    /// Look up a product by id.
    pub fn product_by_id(&self, id: &str) -> Option<&Product> {
        self.by_product_id
            .get(id)
            .and_then(|&position| self.products.get(position))
    }

    /// Products whose category is `slug`, in catalog order.
    pub fn products_by_category(&self, slug: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|product| product.category == slug)
            .collect()
    }

    /// Look up a category by slug.
    pub fn category_by_slug(&self, slug: &str) -> Option<&Category> {
        self.by_category_slug
            .get(slug)
            .and_then(|&position| self.categories.get(position))
    }

    /// Look up a category by id.
    pub fn category_by_id(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == *id)
    }

    /// The homepage selection: the first `limit` discounted products in
    /// catalog order.
    pub fn featured_products(&self, limit: usize) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|product| product.original_price.is_some())
            .take(limit)
            .collect()
    }

    /// Filter and sort products.
    pub fn search(&self, query: &ProductQuery) -> Vec<&Product> {
        query.apply(&self.products)
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
