//! Product records.
//!
//! A product comes either from the static catalog or from the publish flow.
//! Both share one JSON shape (camelCase field names), which is also the
//! format user-published listings are persisted in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// Category assigned to every listing created through the publish flow.
pub const USER_CATEGORY: &str = "用户发布";

/// Seller name shown on listings created through the publish flow.
pub const USER_SELLER_NAME: &str = "我发布的";

/// Seller avatar shown on listings created through the publish flow.
pub const USER_SELLER_AVATAR: &str = "https://cdn-icons-png.flaticon.com/512/149/149071.png";

/// Conditions offered by the publish form.
pub const CONDITION_OPTIONS: &[&str] = &["全新", "九成新", "八成新", "七成新及以下"];

/// A listed product.
///
/// `id`, `title`, `price`, `category` and `condition` are required: filtering
/// and lookup depend on them. Display-only text fields default to empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Price>,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub condition: String,
    #[serde(default)]
    pub seller_name: String,
    #[serde(default)]
    pub seller_avatar: String,
    /// Image URL, or an inline `data:` URL for published listings.
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub create_time: Option<DateTime<Utc>>,
}

impl Product {
    /// Whether this product was published on this device.
    #[must_use]
    pub fn is_user_published(&self) -> bool {
        self.id.is_user_published()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_catalog_record() {
        let json = r#"{
            "id": 1,
            "title": "二手显示器",
            "price": 399,
            "originalPrice": 899,
            "description": "24寸",
            "category": "electronics",
            "condition": "九成新",
            "sellerName": "小王",
            "sellerAvatar": "https://example.com/a.png",
            "image": "https://example.com/p.png"
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id.as_str(), "1");
        assert_eq!(product.price.as_str(), "399");
        assert_eq!(product.original_price, Some(Price::new("899")));
        assert_eq!(product.contact, None);
        assert_eq!(product.create_time, None);
        assert!(!product.is_user_published());
    }

    #[test]
    fn test_display_fields_default_to_empty() {
        let json = r#"{"id":"9","title":"书","price":"5","category":"books","condition":"全新"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.description.is_empty());
        assert!(product.seller_name.is_empty());
        assert!(product.image.is_empty());
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        let json = r#"{"id":"9","title":"书","price":"5","condition":"全新"}"#;
        assert!(serde_json::from_str::<Product>(json).is_err());
    }

    #[test]
    fn test_create_time_round_trips_as_millis() {
        let json = r#"{"id":"u_1700000000000","title":"t","price":"1","category":"用户发布",
            "condition":"全新","contact":"123","createTime":1700000000000}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(
            product.create_time.map(|t| t.timestamp_millis()),
            Some(1_700_000_000_000)
        );

        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["createTime"], 1_700_000_000_000_i64);
        assert_eq!(value["contact"], "123");
        assert!(value.get("originalPrice").is_none());
    }
}
