//! Publish form validation.
//!
//! A [`PublishDraft`] is what the form submitted. Validation runs in a fixed
//! order (text fields, then condition, then image) and stops at the first
//! failure, so the user sees one alert at a time. Nothing is written unless
//! [`PublishDraft::into_product`] succeeds.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::types::{Price, Product, ProductId, USER_CATEGORY, USER_SELLER_AVATAR, USER_SELLER_NAME};

/// Reasons a publish submission is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PublishError {
    #[error("请填写完整商品信息")]
    MissingFields,
    #[error("请选择商品成色")]
    MissingCondition,
    #[error("请上传商品图片")]
    MissingImage,
}

/// An image held inline as a `data:image/...;base64,` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData(String);

impl ImageData {
    /// Encode uploaded bytes.
    ///
    /// Returns `None` for an empty upload or a non-image content type.
    #[must_use]
    pub fn encode(content_type: &str, bytes: &[u8]) -> Option<Self> {
        let content_type = content_type.trim().to_ascii_lowercase();
        if bytes.is_empty() || !content_type.starts_with("image/") {
            return None;
        }
        Some(Self(format!(
            "data:{content_type};base64,{}",
            STANDARD.encode(bytes)
        )))
    }

    /// Accept a previously encoded image carried back by the form.
    ///
    /// Returns `None` unless `url` is a base64 image data URL.
    #[must_use]
    pub fn from_data_url(url: &str) -> Option<Self> {
        let rest = url.trim().strip_prefix("data:image/")?;
        let (_, payload) = rest.split_once(";base64,")?;
        if payload.is_empty() || STANDARD.decode(payload).is_err() {
            return None;
        }
        Some(Self(url.trim().to_string()))
    }

    /// Get the data URL.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The raw publish form.
#[derive(Debug, Clone, Default)]
pub struct PublishDraft {
    pub title: String,
    pub price: String,
    pub contact: String,
    pub description: String,
    pub condition: String,
    pub image: Option<ImageData>,
}

impl PublishDraft {
    /// Check the draft without consuming it.
    ///
    /// # Errors
    ///
    /// Returns the first failing check as a `PublishError`.
    pub fn validate(&self) -> Result<(), PublishError> {
        let text_fields = [&self.title, &self.price, &self.contact, &self.description];
        if text_fields.iter().any(|field| field.trim().is_empty()) {
            return Err(PublishError::MissingFields);
        }
        if self.condition.trim().is_empty() {
            return Err(PublishError::MissingCondition);
        }
        if self.image.is_none() {
            return Err(PublishError::MissingImage);
        }
        Ok(())
    }

    /// Build the listing record published at `created_at`.
    ///
    /// # Errors
    ///
    /// Returns the first failing check as a `PublishError`.
    pub fn into_product(self, created_at: DateTime<Utc>) -> Result<Product, PublishError> {
        self.validate()?;
        let image = self.image.ok_or(PublishError::MissingImage)?;
        let price = Price::new(self.price.trim());

        Ok(Product {
            id: ProductId::user_published(created_at),
            title: self.title.trim().to_string(),
            original_price: Some(price.clone()),
            price,
            description: self.description.trim().to_string(),
            category: USER_CATEGORY.to_string(),
            condition: self.condition.trim().to_string(),
            seller_name: USER_SELLER_NAME.to_string(),
            seller_avatar: USER_SELLER_AVATAR.to_string(),
            image: image.0,
            contact: Some(self.contact.trim().to_string()),
            create_time: Some(created_at),
        })
    }
}
