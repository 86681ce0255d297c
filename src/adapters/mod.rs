//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Model providers and the multi-model gateway
//! - `http` - REST API (axum)
//! - `memory` - In-memory stores for tests and database-less runs
//! - `postgres` - PostgreSQL stores (sqlx)

pub mod ai;
pub mod http;
pub mod memory;
pub mod postgres;
