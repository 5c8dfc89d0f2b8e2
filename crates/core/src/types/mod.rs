//! Core types for Campus Market.
//!
//! This module provides type-safe wrappers for the marketplace's domain concepts.

pub mod comment;
pub mod id;
pub mod price;
pub mod product;
pub mod session;

pub use comment::{Comment, CommentError};
pub use id::ProductId;
pub use price::Price;
pub use product::{CONDITION_OPTIONS, Product, USER_CATEGORY, USER_SELLER_AVATAR, USER_SELLER_NAME};
pub use session::{DEFAULT_DISPLAY_NAME, UserSession};
