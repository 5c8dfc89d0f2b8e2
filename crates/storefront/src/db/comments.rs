//! Repository for per-product comment threads.

use campus_market_core::{Comment, ProductId};

use super::{KeyValueStore, RepositoryError, read_json, write_json};

/// Prefix of the store key for a product's comment thread.
pub const COMMENTS_KEY_PREFIX: &str = "comments_";

/// Store key of the comment thread for `product_id`.
#[must_use]
pub fn thread_key(product_id: &ProductId) -> String {
    format!("{COMMENTS_KEY_PREFIX}{product_id}")
}

/// Repository for comment threads. Each product has its own thread.
pub struct CommentRepository<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> CommentRepository<'a> {
    /// Create a new comment repository.
    #[must_use]
    pub const fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// Comments on `product_id`, in submission order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store fails or the thread is corrupt.
    pub fn list(&self, product_id: &ProductId) -> Result<Vec<Comment>, RepositoryError> {
        Ok(read_json(self.store, &thread_key(product_id))?.unwrap_or_default())
    }

    /// Append `comment` to the thread for `product_id`.
    ///
    /// Returns the number of comments in the thread afterwards.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store fails or the thread is corrupt.
    pub fn append(
        &self,
        product_id: &ProductId,
        comment: Comment,
    ) -> Result<usize, RepositoryError> {
        let mut thread = self.list(product_id)?;
        thread.push(comment);
        write_json(self.store, &thread_key(product_id), &thread)?;
        Ok(thread.len())
    }

    /// Remove the whole thread for `product_id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store cannot be written.
    pub fn clear(&self, product_id: &ProductId) -> Result<(), RepositoryError> {
        self.store.remove(&thread_key(product_id))?;
        Ok(())
    }

    /// Products that have a stored thread, with the thread length.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store fails or a thread is corrupt.
    pub fn threads(&self) -> Result<Vec<(ProductId, usize)>, RepositoryError> {
        self.store
            .keys()?
            .into_iter()
            .filter_map(|key| key.strip_prefix(COMMENTS_KEY_PREFIX).map(ProductId::from))
            .map(|id| -> Result<(ProductId, usize), RepositoryError> {
                let count = self.list(&id)?.len();
                Ok((id, count))
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    fn texts(comments: &[Comment]) -> Vec<&str> {
        comments.iter().map(Comment::as_str).collect()
    }

    #[test]
    fn test_append_keeps_submission_order() {
        let store = MemoryStore::new();
        let comments = CommentRepository::new(&store);
        let product = ProductId::new("1");

        for (n, text) in ["first", "second", "third"].into_iter().enumerate() {
            let count = comments
                .append(&product, Comment::parse(text).unwrap())
                .unwrap();
            assert_eq!(count, n + 1);
        }

        assert_eq!(
            texts(&comments.list(&product).unwrap()),
            ["first", "second", "third"]
        );
        assert_eq!(
            store.get("comments_1").unwrap().as_deref(),
            Some(r#"["first","second","third"]"#)
        );
    }

    #[test]
    fn test_threads_are_isolated_per_product() {
        let store = MemoryStore::new();
        let comments = CommentRepository::new(&store);
        let a = ProductId::new("1");
        let b = ProductId::new("u_1700000000000");

        comments.append(&a, Comment::parse("for a").unwrap()).unwrap();
        comments.append(&a, Comment::parse("again a").unwrap()).unwrap();

        assert!(comments.list(&b).unwrap().is_empty());
        assert_eq!(comments.list(&a).unwrap().len(), 2);
    }

    #[test]
    fn test_threads_and_clear() {
        let store = MemoryStore::new();
        store.set("campus_user", r#"{"name":"x"}"#.to_string()).unwrap();
        let comments = CommentRepository::new(&store);
        comments
            .append(&ProductId::new("2"), Comment::parse("hi").unwrap())
            .unwrap();
        comments
            .append(&ProductId::new("5"), Comment::parse("yo").unwrap())
            .unwrap();

        assert_eq!(
            comments.threads().unwrap(),
            [(ProductId::new("2"), 1), (ProductId::new("5"), 1)]
        );

        comments.clear(&ProductId::new("2")).unwrap();
        assert_eq!(comments.threads().unwrap(), [(ProductId::new("5"), 1)]);
    }
}
