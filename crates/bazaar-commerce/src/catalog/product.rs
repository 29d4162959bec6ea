//! Product and review types.

use crate::error::CommerceError;
use crate::ids::{ProductId, ReviewId};
use crate::money::Money;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Highest rating a product or review can carry.
pub const MAX_RATING: f32 = 5.0;

/// A product in the catalog.
///
/// Carts hold copies of this record, so the whole product serializes into the
/// persisted cart slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Current selling price.
    pub price: Money,
    /// Pre-discount price, shown struck through when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Money>,
    /// Slug of the category this product belongs to.
    pub category: String,
    /// Image URL.
    pub image: String,
    /// Long-form description.
    pub description: String,
    /// Bullet-point feature list.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
    /// Whether the product can currently be bought.
    pub in_stock: bool,
    /// Average rating, 0.0 to 5.0.
    pub rating: f32,
    /// Total number of reviews, including ones not embedded below.
    pub review_count: u32,
    /// Sample of customer reviews.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reviews: Vec<Review>,
}

impl Product {
    /// Create an in-stock product with no discount, reviews or features.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Money,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            original_price: None,
            category: category.into(),
            image: String::new(),
            description: String::new(),
            features: Vec::new(),
            in_stock: true,
            rating: 0.0,
            review_count: 0,
            reviews: Vec::new(),
        }
    }

    /// Set the pre-discount price.
    pub fn with_original_price(mut self, original_price: Money) -> Self {
        self.original_price = Some(original_price);
        self
    }

    /// Set the average rating and review count.
    pub fn with_rating(mut self, rating: f32, review_count: u32) -> Self {
        self.rating = rating;
        self.review_count = review_count;
        self
    }

    /// Check if the product carries a discount.
    pub fn is_on_sale(&self) -> bool {
        self.original_price
            .is_some_and(|original| original.amount_cents > self.price.amount_cents)
    }

    /// Discount off the original price as a whole percentage, rounded to
    /// nearest. `None` when there is no original price.
    pub fn discount_percentage(&self) -> Option<u32> {
        let original = self.original_price?;
        if original.amount_cents <= 0 {
            return None;
        }
        let savings = (original.amount_cents - self.price.amount_cents).max(0);
        let percent = (savings as f64 / original.amount_cents as f64 * 100.0).round();
        Some(percent as u32)
    }

    /// Amount saved against the original price.
    pub fn savings(&self) -> Option<Money> {
        self.original_price
            .and_then(|original| original.try_subtract(&self.price))
            .filter(Money::is_positive)
    }

    /// Number of filled stars when rendering the rating.
    pub fn full_stars(&self) -> u8 {
        self.rating.clamp(0.0, MAX_RATING).floor() as u8
    }

    /// Check the record invariants the catalog relies on.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.id.as_str().is_empty() {
            return Err(CommerceError::InvalidCatalog(format!(
                "product {:?} has an empty id",
                self.name
            )));
        }
        if !self.price.is_positive() {
            return Err(CommerceError::InvalidCatalog(format!(
                "product {} has non-positive price {}",
                self.id, self.price
            )));
        }
        if let Some(original) = self.original_price {
            if original.currency != self.price.currency {
                return Err(CommerceError::CurrencyMismatch {
                    expected: self.price.currency.code().to_string(),
                    got: original.currency.code().to_string(),
                });
            }
            if original.amount_cents < self.price.amount_cents {
                return Err(CommerceError::InvalidCatalog(format!(
                    "product {} has original price {} below price {}",
                    self.id, original, self.price
                )));
            }
        }
        if !(0.0..=MAX_RATING).contains(&self.rating) {
            return Err(CommerceError::InvalidCatalog(format!(
                "product {} has rating {} outside 0-5",
                self.id, self.rating
            )));
        }
        for review in &self.reviews {
            review.validate()?;
        }
        Ok(())
    }
}

/// A customer review attached to a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Review {
    /// Unique review identifier.
    pub id: ReviewId,
    /// Display name of the reviewer.
    pub user_name: String,
    /// Star rating, 0 to 5.
    pub rating: u8,
    /// Review text.
    pub comment: String,
    /// Date the review was posted.
    pub date: NaiveDate,
    /// Avatar image URL.
    pub avatar: String,
}

impl Review {
    fn validate(&self) -> Result<(), CommerceError> {
        if f32::from(self.rating) > MAX_RATING {
            return Err(CommerceError::InvalidCatalog(format!(
                "review {} has rating {} outside 0-5",
                self.id, self.rating
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn usd(cents: i64) -> Money {
        Money::new(cents, Currency::USD)
    }

    #[test]
    fn test_product_creation() {
        let product = Product::new("p1", "Headphones", usd(12499), "electronics");
        assert_eq!(product.id.as_str(), "p1");
        assert!(product.in_stock);
        assert!(!product.is_on_sale());
        assert_eq!(product.discount_percentage(), None);
        product.validate().unwrap();
    }

    #[test]
    fn test_discount_percentage_rounds() {
        let product = Product::new("p1", "Headphones", usd(12499), "electronics")
            .with_original_price(usd(16999));

        assert!(product.is_on_sale());
        // (16999 - 12499) / 16999 = 26.47%
        assert_eq!(product.discount_percentage(), Some(26));
        assert_eq!(product.savings(), Some(usd(4500)));
    }

    #[test]
    fn test_full_stars() {
        let product = Product::new("p1", "Watch", usd(100), "electronics").with_rating(4.9, 521);
        assert_eq!(product.full_stars(), 4);
    }

    #[test]
    fn test_validate_rejects_bad_prices() {
        let free = Product::new("p1", "Free", usd(0), "books");
        assert!(free.validate().is_err());

        let inverted = Product::new("p2", "Odd", usd(500), "books").with_original_price(usd(400));
        assert!(inverted.validate().is_err());

        let mixed = Product::new("p3", "Mixed", usd(500), "books")
            .with_original_price(Money::new(600, Currency::EUR));
        assert!(matches!(
            mixed.validate(),
            Err(CommerceError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_bad_ratings() {
        let product = Product::new("p1", "Book", usd(599), "books").with_rating(5.5, 1);
        assert!(product.validate().is_err());
    }

    #[test]
    fn test_review_date_wire_format() {
        let json = r#"{
            "id": "r1",
            "user_name": "Sarah Johnson",
            "rating": 5,
            "comment": "Great",
            "date": "2024-02-15",
            "avatar": ""
        }"#;
        let review: Review = serde_json::from_str(json).unwrap();
        assert_eq!(review.date, NaiveDate::from_ymd_opt(2024, 2, 15).unwrap());
    }
}
