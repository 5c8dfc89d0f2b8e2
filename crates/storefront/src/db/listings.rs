//! Repository for user-published listings.

use campus_market_core::Product;

use super::{KeyValueStore, RepositoryError, read_json, write_json};

/// Store key holding the user-published listings.
pub const LISTINGS_KEY: &str = "user_goods";

/// Repository for listings published on this device.
///
/// Listings are kept newest first. There is no edit or delete of a single
/// listing; [`ListingRepository::clear`] drops them all.
pub struct ListingRepository<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> ListingRepository<'a> {
    /// Create a new listing repository.
    #[must_use]
    pub const fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// All published listings, newest first. Empty if none were stored.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store fails or the stored list is corrupt.
    pub fn all(&self) -> Result<Vec<Product>, RepositoryError> {
        Ok(read_json(self.store, LISTINGS_KEY)?.unwrap_or_default())
    }

    /// Insert `product` in front of all previously published listings.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store fails or the stored list is corrupt.
    /// A corrupt list is left untouched.
    pub fn publish(&self, product: Product) -> Result<(), RepositoryError> {
        let mut listings = self.all()?;
        listings.insert(0, product);
        write_json(self.store, LISTINGS_KEY, &listings)
    }

    /// Remove every published listing.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store cannot be written.
    pub fn clear(&self) -> Result<(), RepositoryError> {
        self.store.remove(LISTINGS_KEY)?;
        Ok(())
    }
}
