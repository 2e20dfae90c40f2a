//! List handler - returns a user's favorited properties.

use crate::db;
use crate::error::Result;
use casa_engine::{FavoriteProperty, UserId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

/// One favorites entry on the wire: the card projection plus when the
/// pair was created. Clients that only want the projection can ignore
/// the timestamp.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteEntry {
    #[serde(flatten)]
    pub property: FavoriteProperty,
    pub favorited_at: DateTime<Utc>,
}

/// Response for the favorites list.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse {
    /// Denormalized card projections, oldest favorite first
    pub properties: Vec<FavoriteEntry>,
}

/// Return the full favorites list for a user.
pub async fn handle_list(pool: &PgPool, user: UserId) -> Result<ListResponse> {
    let rows = db::list_favorites(pool, user).await?;

    let mut properties = Vec::with_capacity(rows.len());
    for row in &rows {
        properties.push(FavoriteEntry {
            property: row.to_property()?,
            favorited_at: row.favorited_at,
        });
    }

    Ok(ListResponse { properties })
}

#[cfg(test)]
mod tests {
    use super::*;
    use casa_engine::PropertyId;
    use chrono::TimeZone;

    #[test]
    fn entry_flattens_projection_and_carries_timestamp() {
        let entry = FavoriteEntry {
            property: FavoriteProperty {
                id: PropertyId::new(7).unwrap(),
                title: "Seaside Bungalow".to_string(),
                price: 625_000.0,
                bedrooms: 3,
                bathrooms: 2,
                living_area: 1950.0,
                thumbnail_url: None,
                city: "San Diego".to_string(),
                state: "CA".to_string(),
            },
            favorited_at: Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 0).unwrap(),
        };

        let value = serde_json::to_value(&entry).unwrap();

        // Flattened: projection fields sit at the top level
        assert_eq!(value["id"], 7);
        assert_eq!(value["livingArea"], 1950.0);
        assert_eq!(value["favoritedAt"], "2026-08-25T12:00:00Z");
        assert!(value.get("property").is_none());
    }
}
