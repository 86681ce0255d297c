//! PostgreSQL implementation of PropertyRepository.
//!
//! Every filter field is bound as a nullable parameter so one statement
//! covers all filter shapes.

use async_trait::async_trait;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{PgPool, Postgres, Row};

use crate::domain::foundation::{DomainError, PropertyId, Timestamp};
use crate::domain::property::{
    ListingStatus, Property, PropertyContact, PropertyFilter, PropertyLocation, PropertyType,
    SortOrder,
};
use crate::ports::PropertyRepository;

const PROPERTY_COLUMNS: &str = r#"
    id, title, description, property_type, status, price,
    address, city, area, state, bedrooms, bathrooms, area_sqft, amenities,
    contact_name, contact_phone, contact_email, views, created_at
"#;

// $1 status, $2 type, $3 city regex, $4 min price, $5 max price,
// $6 min bedrooms, $7 min bathrooms, $8 amenities (any-of)
const FILTER_CLAUSE: &str = r#"
    ($1::text IS NULL OR status = $1)
    AND ($2::text IS NULL OR property_type = $2)
    AND ($3::text IS NULL OR city ~* $3)
    AND ($4::bigint IS NULL OR price >= $4)
    AND ($5::bigint IS NULL OR price <= $5)
    AND ($6::int IS NULL OR bedrooms >= $6)
    AND ($7::int IS NULL OR bathrooms >= $7)
    AND (
        cardinality($8::text[]) = 0
        OR EXISTS (
            SELECT 1
            FROM unnest(amenities) AS have, unnest($8::text[]) AS want
            WHERE strpos(lower(have), lower(want)) > 0
        )
    )
"#;

/// PostgreSQL implementation of PropertyRepository.
#[derive(Clone)]
pub struct PostgresPropertyRepository {
    pool: PgPool,
}

impl PostgresPropertyRepository {
    /// Creates a new PostgresPropertyRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PropertyRepository for PostgresPropertyRepository {
    async fn find(
        &self,
        filter: &PropertyFilter,
        limit: u32,
        sort: SortOrder,
    ) -> Result<Vec<Property>, DomainError> {
        let sql = format!(
            "SELECT {} FROM properties WHERE {} ORDER BY {} LIMIT $9",
            PROPERTY_COLUMNS,
            FILTER_CLAUSE,
            order_by(sort)
        );

        let rows = bind_filter(sqlx::query(&sql), filter)
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to query properties: {}", e)))?;

        rows.iter().map(row_to_property).collect()
    }

    async fn count(&self, filter: &PropertyFilter) -> Result<u64, DomainError> {
        let sql = format!(
            "SELECT COUNT(*) AS total FROM properties WHERE {}",
            FILTER_CLAUSE
        );

        let row = bind_filter(sqlx::query(&sql), filter)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to count properties: {}", e)))?;

        let total: i64 = row.get("total");
        Ok(total.max(0) as u64)
    }

    async fn find_by_id(&self, id: &PropertyId) -> Result<Option<Property>, DomainError> {
        let sql = format!("SELECT {} FROM properties WHERE id = $1", PROPERTY_COLUMNS);

        let row = sqlx::query(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to fetch property: {}", e)))?;

        row.as_ref().map(row_to_property).transpose()
    }

    async fn increment_views(&self, id: &PropertyId) -> Result<(), DomainError> {
        sqlx::query("UPDATE properties SET views = views + 1 WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::database(format!("Failed to increment property views: {}", e))
            })?;

        Ok(())
    }
}

// === Helper Functions ===

fn order_by(sort: SortOrder) -> &'static str {
    match sort {
        SortOrder::NewestFirst => "created_at DESC",
    }
}

fn bind_filter<'q>(
    query: Query<'q, Postgres, PgArguments>,
    filter: &PropertyFilter,
) -> Query<'q, Postgres, PgArguments> {
    let city = filter
        .city
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(regex::escape);

    query
        .bind(filter.status.map(|s| s.as_str()))
        .bind(filter.property_type.map(|t| t.as_str()))
        .bind(city)
        .bind(filter.min_price.map(clamp_i64))
        .bind(filter.max_price.map(clamp_i64))
        .bind(filter.min_bedrooms.map(clamp_i32))
        .bind(filter.min_bathrooms.map(clamp_i32))
        .bind(filter.amenities.clone())
}

fn clamp_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn clamp_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

fn row_to_property(row: &PgRow) -> Result<Property, DomainError> {
    let id: uuid::Uuid = row.get("id");
    let property_type: &str = row.get("property_type");
    let status: &str = row.get("status");
    let price: i64 = row.get("price");
    let bedrooms: i32 = row.get("bedrooms");
    let bathrooms: i32 = row.get("bathrooms");
    let area_sqft: Option<i32> = row.get("area_sqft");
    let views: i64 = row.get("views");
    let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");

    let property_type: PropertyType = property_type
        .parse()
        .map_err(|e| DomainError::database(format!("Invalid stored property type: {}", e)))?;
    let status: ListingStatus = status
        .parse()
        .map_err(|e| DomainError::database(format!("Invalid stored listing status: {}", e)))?;

    Ok(Property {
        id: PropertyId::from_uuid(id),
        title: row.get("title"),
        description: row.get("description"),
        property_type,
        status,
        price: price.max(0) as u64,
        location: PropertyLocation {
            address: row.get("address"),
            city: row.get("city"),
            area: row.get("area"),
            state: row.get("state"),
        },
        bedrooms: bedrooms.max(0) as u32,
        bathrooms: bathrooms.max(0) as u32,
        area_sqft: area_sqft.map(|a| a.max(0) as u32),
        amenities: row.get("amenities"),
        contact: PropertyContact {
            name: row.get("contact_name"),
            phone: row.get("contact_phone"),
            email: row.get("contact_email"),
        },
        views: views.max(0) as u64,
        created_at: Timestamp::from_datetime(created_at),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_first_orders_by_creation() {
        assert_eq!(order_by(SortOrder::NewestFirst), "created_at DESC");
    }

    #[test]
    fn oversized_bounds_are_clamped() {
        assert_eq!(clamp_i64(u64::MAX), i64::MAX);
        assert_eq!(clamp_i32(u32::MAX), i32::MAX);
        assert_eq!(clamp_i64(8_000_000), 8_000_000);
    }

    #[test]
    fn filter_clause_binds_eight_parameters() {
        assert!(FILTER_CLAUSE.contains("$8"));
        assert!(!FILTER_CLAUSE.contains("$9"));
    }
}
