//! `ClientStore` trait — persisted client-side state.

use async_trait::async_trait;

use crate::error::StorageError;

/// Backend-agnostic store for small per-user state blobs.
///
/// The onboarding workflow uses it for the deep-link redirect target; the
/// interface itself is a general user-scoped JSON key-value store.
#[async_trait]
pub trait ClientStore: Send + Sync {
    /// Get a value, or `None` if the key is absent.
    async fn get_value(
        &self,
        user_id: &str,
        key: &str,
    ) -> Result<Option<serde_json::Value>, StorageError>;

    /// Insert or overwrite a value.
    async fn set_value(
        &self,
        user_id: &str,
        key: &str,
        value: &serde_json::Value,
    ) -> Result<(), StorageError>;

    /// Delete a value. Returns whether a row existed.
    async fn remove_value(&self, user_id: &str, key: &str) -> Result<bool, StorageError>;
}
