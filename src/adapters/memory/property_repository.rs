//! In-Memory Property Repository Adapter
//!
//! Holds a seeded set of listings and evaluates filters in process.
//! Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, PropertyId};
use crate::domain::property::{Property, PropertyFilter, SortOrder};
use crate::ports::PropertyRepository;

/// In-memory listing storage.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPropertyRepository {
    properties: Arc<RwLock<HashMap<PropertyId, Property>>>,
}

impl InMemoryPropertyRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository seeded with `properties`
    pub fn with_properties(properties: impl IntoIterator<Item = Property>) -> Self {
        let map = properties.into_iter().map(|p| (p.id, p)).collect();
        Self {
            properties: Arc::new(RwLock::new(map)),
        }
    }

    /// Add or replace a listing
    pub async fn insert(&self, property: Property) {
        self.properties.write().await.insert(property.id, property);
    }
}

#[async_trait]
impl PropertyRepository for InMemoryPropertyRepository {
    async fn find(
        &self,
        filter: &PropertyFilter,
        limit: u32,
        sort: SortOrder,
    ) -> Result<Vec<Property>, DomainError> {
        let properties = self.properties.read().await;
        let mut matches: Vec<Property> = properties
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();

        matches.sort_by(|a, b| sort.compare(a, b));
        matches.truncate(limit as usize);
        Ok(matches)
    }

    async fn count(&self, filter: &PropertyFilter) -> Result<u64, DomainError> {
        let properties = self.properties.read().await;
        Ok(properties.values().filter(|p| filter.matches(p)).count() as u64)
    }

    async fn find_by_id(&self, id: &PropertyId) -> Result<Option<Property>, DomainError> {
        Ok(self.properties.read().await.get(id).cloned())
    }

    async fn increment_views(&self, id: &PropertyId) -> Result<(), DomainError> {
        if let Some(property) = self.properties.write().await.get_mut(id) {
            property.views += 1;
        }
        Ok(())
    }
}
