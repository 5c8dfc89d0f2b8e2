//! Campus Market Core - Shared domain types.
//!
//! This crate provides the types used across all Campus Market components:
//! - `storefront` - The local marketplace web site
//! - `cli` - Command-line tools for inspecting and clearing local data
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no storage
//! access, no HTTP clients. Page handlers feed these types with whatever they
//! read from the catalog and the local store, and render the results.
//!
//! # Modules
//!
//! - [`types`] - Products, prices, identifiers, sessions, and comments
//! - [`filter`] - Category/condition selection over a product list
//! - [`carousel`] - Slide index state for the home page marquee
//! - [`publish`] - Validation of the publish form into a new listing

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod carousel;
pub mod filter;
pub mod publish;
pub mod types;

pub use carousel::Carousel;
pub use filter::{ListingFilter, Selector};
pub use publish::{ImageData, PublishDraft, PublishError};
pub use types::*;
