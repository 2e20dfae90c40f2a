//! Database operations for the favorites table.
//!
//! The list query joins favorites against properties so the API returns
//! denormalized card projections in a single round trip, ordered by when
//! each pair was created.

use casa_engine::{FavoriteProperty, PropertyId, UserId};
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

/// A favorited property row, joined from favorites and properties.
#[derive(Debug)]
pub struct StoredFavorite {
    pub property_id: i64,
    pub title: String,
    pub price: f64,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub living_area: f64,
    pub thumbnail_url: Option<String>,
    pub city: String,
    pub state: String,
    pub favorited_at: DateTime<Utc>,
}

impl<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> for StoredFavorite {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        Ok(StoredFavorite {
            property_id: row.try_get("property_id")?,
            title: row.try_get("title")?,
            price: row.try_get("price")?,
            bedrooms: row.try_get("bedrooms")?,
            bathrooms: row.try_get("bathrooms")?,
            living_area: row.try_get("living_area")?,
            thumbnail_url: row.try_get("thumbnail_url")?,
            city: row.try_get("city")?,
            state: row.try_get("state")?,
            favorited_at: row.try_get("favorited_at")?,
        })
    }
}

impl StoredFavorite {
    /// Convert a database row to the wire projection.
    pub fn to_property(&self) -> Result<FavoriteProperty, casa_engine::Error> {
        Ok(FavoriteProperty {
            id: PropertyId::new(self.property_id)?,
            title: self.title.clone(),
            price: self.price,
            bedrooms: self.bedrooms.max(0) as u32,
            bathrooms: self.bathrooms.max(0) as u32,
            living_area: self.living_area,
            thumbnail_url: self.thumbnail_url.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
        })
    }
}

/// List a user's favorited properties, oldest favorite first.
pub async fn list_favorites(pool: &PgPool, user: UserId) -> Result<Vec<StoredFavorite>, sqlx::Error> {
    sqlx::query_as::<_, StoredFavorite>(
        r#"
        SELECT p.id AS property_id, p.title, p.price, p.bedrooms, p.bathrooms,
               p.living_area, p.thumbnail_url, p.city, p.state,
               f.created_at AS favorited_at
        FROM favorites f
        JOIN properties p ON p.id = f.property_id
        WHERE f.user_id = $1
        ORDER BY f.created_at ASC
        "#,
    )
    .bind(user)
    .fetch_all(pool)
    .await
}

/// Insert a (user, property) pair. The composite primary key makes a
/// duplicate insert fail with a unique violation; a missing property fails
/// the foreign key.
pub async fn insert_favorite(
    pool: &PgPool,
    user: UserId,
    property: PropertyId,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO favorites (user_id, property_id)
        VALUES ($1, $2)
        "#,
    )
    .bind(user)
    .bind(property.get())
    .execute(pool)
    .await?;

    Ok(())
}

/// Delete a (user, property) pair. Returns whether a row was deleted.
pub async fn delete_favorite(
    pool: &PgPool,
    user: UserId,
    property: PropertyId,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM favorites
        WHERE user_id = $1 AND property_id = $2
        "#,
    )
    .bind(user)
    .bind(property.get())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Check if a SQL error is a unique constraint violation.
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(db_err) = e {
        // PostgreSQL unique violation code is "23505"
        db_err.code().map(|c| c == "23505").unwrap_or(false)
    } else {
        false
    }
}

/// Check if a SQL error is a foreign key violation.
pub fn is_foreign_key_violation(e: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(db_err) = e {
        // PostgreSQL foreign key violation code is "23503"
        db_err.code().map(|c| c == "23503").unwrap_or(false)
    } else {
        false
    }
}
