//! Property repository port (read side).
//!
//! Listings are owned elsewhere. The dialog engine queries them by
//! structured filter and bumps view counters; it never writes anything else.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PropertyId};
use crate::domain::property::{Property, PropertyFilter, SortOrder};

/// Repository port for querying property listings.
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    /// Find listings matching `filter`, ordered by `sort`, at most `limit`.
    ///
    /// An empty result is not an error.
    async fn find(
        &self,
        filter: &PropertyFilter,
        limit: u32,
        sort: SortOrder,
    ) -> Result<Vec<Property>, DomainError>;

    /// Count all listings matching `filter`.
    async fn count(&self, filter: &PropertyFilter) -> Result<u64, DomainError>;

    /// Find a single listing by ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &PropertyId) -> Result<Option<Property>, DomainError>;

    /// Increment a listing's view counter.
    ///
    /// Unknown IDs are ignored.
    async fn increment_views(&self, id: &PropertyId) -> Result<(), DomainError>;
}
