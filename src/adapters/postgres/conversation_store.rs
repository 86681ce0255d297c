//! PostgreSQL implementation of ConversationStore.
//!
//! One row per session in `conversations`; turns live in `conversation_turns`
//! and are only ever inserted, never rewritten.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::conversation::{Conversation, ConversationState, Preferences, Turn};
use crate::domain::foundation::{
    ConversationId, DomainError, SessionId, Timestamp, UserId,
};
use crate::ports::ConversationStore;

/// PostgreSQL implementation of ConversationStore.
#[derive(Clone)]
pub struct PostgresConversationStore {
    pool: PgPool,
}

impl PostgresConversationStore {
    /// Creates a new PostgresConversationStore.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_turns(&self, conversation_id: uuid::Uuid) -> Result<Vec<Turn>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT payload
            FROM conversation_turns
            WHERE conversation_id = $1
            ORDER BY position ASC
            "#,
        )
        .bind(conversation_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch turns: {}", e)))?;

        rows.iter()
            .map(|row| {
                let payload: serde_json::Value = row.get("payload");
                serde_json::from_value(payload).map_err(|e| {
                    DomainError::database(format!("Failed to decode turn: {}", e))
                })
            })
            .collect()
    }

    async fn reconstitute(&self, row: PgRow) -> Result<Conversation, DomainError> {
        let id: uuid::Uuid = row.get("id");
        let session_id: String = row.get("session_id");
        let user_id: Option<String> = row.get("user_id");
        let preferences: serde_json::Value = row.get("preferences");
        let state: &str = row.get("state");
        let total_messages: i64 = row.get("total_messages");
        let last_activity: chrono::DateTime<chrono::Utc> = row.get("last_activity");
        let is_active: bool = row.get("is_active");
        let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");
        let updated_at: chrono::DateTime<chrono::Utc> = row.get("updated_at");

        let session_id = SessionId::new(session_id)
            .map_err(|e| DomainError::database(format!("Invalid stored session id: {}", e)))?;
        let user_id = user_id
            .map(UserId::new)
            .transpose()
            .map_err(|e| DomainError::database(format!("Invalid stored user id: {}", e)))?;
        let preferences: Preferences = serde_json::from_value(preferences)
            .map_err(|e| DomainError::database(format!("Failed to decode preferences: {}", e)))?;
        let state: ConversationState = state
            .parse()
            .map_err(|e| DomainError::database(format!("Invalid stored state: {}", e)))?;

        let history = self.load_turns(id).await?;

        Ok(Conversation::reconstitute(
            ConversationId::from_uuid(id),
            session_id,
            user_id,
            preferences,
            state,
            history,
            total_messages.max(0) as u64,
            Timestamp::from_datetime(last_activity),
            is_active,
            Timestamp::from_datetime(created_at),
            Timestamp::from_datetime(updated_at),
        ))
    }
}

#[async_trait]
impl ConversationStore for PostgresConversationStore {
    async fn load_or_create_active(
        &self,
        session_id: &SessionId,
        user_id: Option<&UserId>,
    ) -> Result<Conversation, DomainError> {
        match self.find_by_session(session_id).await? {
            Some(mut conversation) => {
                conversation.reactivate();
                if let Some(user_id) = user_id {
                    conversation.link_user(user_id.clone());
                }
                Ok(conversation)
            }
            None => Ok(Conversation::new(session_id.clone(), user_id.cloned())),
        }
    }

    async fn find_by_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<Conversation>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, session_id, user_id, preferences, state, total_messages,
                   last_activity, is_active, created_at, updated_at
            FROM conversations
            WHERE session_id = $1
            "#,
        )
        .bind(session_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch conversation: {}", e)))?;

        match row {
            Some(row) => Ok(Some(self.reconstitute(row).await?)),
            None => Ok(None),
        }
    }

    async fn persist(&self, conversation: &Conversation) -> Result<(), DomainError> {
        let preferences = serde_json::to_value(conversation.preferences())
            .map_err(|e| DomainError::database(format!("Failed to encode preferences: {}", e)))?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database(format!("Failed to start transaction: {}", e)))?;

        // The upsert locks the session row, so exchanges on one session
        // append their turns one after another. On a concurrent first message
        // the row that won keeps its id, and turns attach to that id.
        let row = sqlx::query(
            r#"
            INSERT INTO conversations (
                id, session_id, user_id, preferences, state, total_messages,
                last_activity, is_active, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (session_id) DO UPDATE SET
                user_id = EXCLUDED.user_id,
                preferences = EXCLUDED.preferences,
                state = EXCLUDED.state,
                total_messages = EXCLUDED.total_messages,
                last_activity = EXCLUDED.last_activity,
                is_active = EXCLUDED.is_active,
                updated_at = EXCLUDED.updated_at
            RETURNING id
            "#,
        )
        .bind(*conversation.id().as_uuid())
        .bind(conversation.session_id().as_str())
        .bind(conversation.user_id().map(|u| u.as_str()))
        .bind(preferences)
        .bind(conversation.state().as_str())
        .bind(conversation.total_messages() as i64)
        .bind(*conversation.last_activity().as_datetime())
        .bind(conversation.is_active())
        .bind(*conversation.created_at().as_datetime())
        .bind(*conversation.updated_at().as_datetime())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| DomainError::database(format!("Failed to upsert conversation: {}", e)))?;
        let stored_id: uuid::Uuid = row.get("id");

        let turns = TurnBatch::from_turns(conversation.unsaved_turns())?;
        if !turns.is_empty() {
            sqlx::query(
                r#"
                INSERT INTO conversation_turns (id, conversation_id, position, role, payload, created_at)
                SELECT t.id, $1::uuid, next.position + t.offset_in_batch::int - 1, t.role, t.payload, t.created_at
                FROM UNNEST($2::uuid[], $3::text[], $4::jsonb[], $5::timestamptz[])
                    WITH ORDINALITY AS t(id, role, payload, created_at, offset_in_batch)
                CROSS JOIN (
                    SELECT COALESCE(MAX(position) + 1, 0) AS position
                    FROM conversation_turns
                    WHERE conversation_id = $1::uuid
                ) AS next
                ORDER BY t.offset_in_batch
                ON CONFLICT (id) DO NOTHING
                "#,
            )
            .bind(stored_id)
            .bind(turns.ids)
            .bind(turns.roles)
            .bind(turns.payloads)
            .bind(turns.created_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database(format!("Failed to append turns: {}", e)))?;
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::database(format!("Failed to commit transaction: {}", e)))?;

        Ok(())
    }

    async fn sweep_inactive(&self, retention_days: u32) -> Result<u64, DomainError> {
        let cutoff = Timestamp::now().minus_days(i64::from(retention_days));

        // Turns are removed by ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM conversations WHERE last_activity < $1")
            .bind(*cutoff.as_datetime())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::database(format!("Failed to sweep conversations: {}", e))
            })?;

        Ok(result.rows_affected())
    }
}

// === Helper Functions ===

/// Column arrays for a single multi-row turn insert.
#[derive(Debug, Default)]
struct TurnBatch {
    ids: Vec<uuid::Uuid>,
    roles: Vec<String>,
    payloads: Vec<serde_json::Value>,
    created_at: Vec<chrono::DateTime<chrono::Utc>>,
}

impl TurnBatch {
    fn from_turns(turns: &[Turn]) -> Result<Self, DomainError> {
        let mut batch = Self::default();
        for turn in turns {
            let payload = serde_json::to_value(turn)
                .map_err(|e| DomainError::database(format!("Failed to encode turn: {}", e)))?;
            batch.ids.push(*turn.id().as_uuid());
            batch.roles.push(if turn.is_user() { "user" } else { "assistant" }.to_string());
            batch.payloads.push(payload);
            batch.created_at.push(*turn.timestamp().as_datetime());
        }
        Ok(batch)
    }

    fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
