//! SweepInactive maintenance handler.
//!
//! Deletes conversations idle past the retention window. Run periodically
//! from a background task, never on the request path.

use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::ports::ConversationStore;

/// Default retention for idle conversations.
pub const DEFAULT_RETENTION_DAYS: u32 = 30;

pub struct SweepInactiveHandler {
    store: Arc<dyn ConversationStore>,
    retention_days: u32,
}

impl SweepInactiveHandler {
    pub fn new(store: Arc<dyn ConversationStore>, retention_days: u32) -> Self {
        Self {
            store,
            retention_days,
        }
    }

    /// Runs one sweep and returns how many conversations were removed.
    pub async fn handle(&self) -> Result<u64, DomainError> {
        let removed = self.store.sweep_inactive(self.retention_days).await?;
        if removed > 0 {
            tracing::info!(
                removed,
                retention_days = self.retention_days,
                "Swept inactive conversations"
            );
        } else {
            tracing::debug!("No inactive conversations to sweep");
        }
        Ok(removed)
    }
}
