//! Category and condition filtering for the product list.
//!
//! Each selector either matches everything (the `all` sentinel) or a single
//! exact value. A product is listed when both selectors match it.

use crate::types::Product;

/// Query/select value meaning "no restriction".
pub const ALL: &str = "all";

/// One filter selector.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selector {
    #[default]
    All,
    Only(String),
}

impl Selector {
    /// Parse a selector from a query parameter or select value.
    ///
    /// A missing or empty value, or the `all` sentinel, selects everything.
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            None | Some("" | ALL) => Self::All,
            Some(value) => Self::Only(value.to_string()),
        }
    }

    /// Whether `value` passes this selector.
    #[must_use]
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == value,
        }
    }

    /// The value to put back into a query string or select control.
    #[must_use]
    pub fn as_param(&self) -> &str {
        match self {
            Self::All => ALL,
            Self::Only(value) => value,
        }
    }
}

/// The two list-page selectors.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListingFilter {
    pub category: Selector,
    pub condition: Selector,
}

impl ListingFilter {
    /// Create a filter from query parameter values.
    #[must_use]
    pub fn from_params(category: Option<&str>, condition: Option<&str>) -> Self {
        Self {
            category: Selector::parse(category),
            condition: Selector::parse(condition),
        }
    }

    /// Whether a product satisfies both selectors.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.category.matches(&product.category) && self.condition.matches(&product.condition)
    }

    /// The matching products, in catalog order.
    #[must_use]
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }
}

/// Distinct values of a product field, in first-seen order.
#[must_use]
pub fn distinct_values<'a>(
    products: &'a [Product],
    field: impl Fn(&'a Product) -> &'a str,
) -> Vec<&'a str> {
    let mut seen = Vec::new();
    for value in products.iter().map(field) {
        if !value.is_empty() && !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Price, ProductId};

    fn product(id: &str, category: &str, condition: &str) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("item {id}"),
            price: Price::new("10"),
            original_price: None,
            description: String::new(),
            category: category.to_string(),
            condition: condition.to_string(),
            seller_name: String::new(),
            seller_avatar: String::new(),
            image: String::new(),
            contact: None,
            create_time: None,
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product("1", "electronics", "new"),
            product("2", "books", "used"),
            product("3", "electronics", "used"),
            product("4", "sports", "new"),
        ]
    }

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_selector_parse() {
        assert_eq!(Selector::parse(None), Selector::All);
        assert_eq!(Selector::parse(Some("")), Selector::All);
        assert_eq!(Selector::parse(Some("all")), Selector::All);
        assert_eq!(
            Selector::parse(Some("books")),
            Selector::Only("books".to_string())
        );
        assert_eq!(Selector::Only("books".to_string()).as_param(), "books");
        assert_eq!(Selector::All.as_param(), "all");
    }

    #[test]
    fn test_all_is_identity() {
        let products = catalog();
        let filter = ListingFilter::default();
        assert_eq!(filter.apply(&products).len(), products.len());
    }

    #[test]
    fn test_category_only() {
        let products = catalog();
        let filter = ListingFilter::from_params(Some("electronics"), None);
        assert_eq!(ids(&filter.apply(&products)), ["1", "3"]);
    }

    #[test]
    fn test_both_selectors_are_anded() {
        let products = catalog();
        let filter = ListingFilter::from_params(Some("electronics"), Some("used"));
        assert_eq!(ids(&filter.apply(&products)), ["3"]);

        let filter = ListingFilter::from_params(Some("books"), Some("new"));
        assert!(filter.apply(&products).is_empty());
    }

    #[test]
    fn test_every_combination_matches_manual_subset() {
        let products = catalog();
        let categories = ["all", "electronics", "books", "sports", "furniture"];
        let conditions = ["all", "new", "used"];

        for cat in categories {
            for cond in conditions {
                let filter = ListingFilter::from_params(Some(cat), Some(cond));
                let expected: Vec<&Product> = products
                    .iter()
                    .filter(|p| cat == "all" || p.category == cat)
                    .filter(|p| cond == "all" || p.condition == cond)
                    .collect();
                assert_eq!(filter.apply(&products), expected, "cat={cat} cond={cond}");
            }
        }
    }

    #[test]
    fn test_distinct_values_first_seen_order() {
        let products = catalog();
        assert_eq!(
            distinct_values(&products, |p| p.category.as_str()),
            ["electronics", "books", "sports"]
        );
        assert_eq!(
            distinct_values(&products, |p| p.condition.as_str()),
            ["new", "used"]
        );
    }
}
