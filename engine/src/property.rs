//! Property identifier and the denormalized favorite projection.
//!
//! Identifiers arrive from the outside world as integers or numeric strings
//! interchangeably. All parsing happens here, at the boundary, so the rest
//! of the engine only ever sees a validated [`PropertyId`].

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A validated property identifier. Always a positive integer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PropertyId(i64);

impl PropertyId {
    /// Create an identifier from a raw integer. Rejects zero and negatives.
    pub fn new(raw: i64) -> Result<Self> {
        if raw <= 0 {
            return Err(Error::InvalidPropertyId(raw.to_string()));
        }
        Ok(Self(raw))
    }

    /// Get the underlying integer value.
    pub fn get(&self) -> i64 {
        self.0
    }

    /// Normalize a loose JSON value into an identifier.
    ///
    /// Accepts integer numbers and numeric strings, the two shapes the
    /// upstream API produces. Everything else (floats, null, objects) is
    /// rejected rather than coerced.
    pub fn coerce(value: &serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(raw) => Self::new(raw),
                None => Err(Error::InvalidPropertyId(n.to_string())),
            },
            serde_json::Value::String(s) => s.parse(),
            other => Err(Error::InvalidPropertyId(other.to_string())),
        }
    }
}

impl TryFrom<i64> for PropertyId {
    type Error = Error;

    fn try_from(raw: i64) -> Result<Self> {
        Self::new(raw)
    }
}

impl FromStr for PropertyId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let raw: i64 = s
            .trim()
            .parse()
            .map_err(|_| Error::InvalidPropertyId(s.to_string()))?;
        Self::new(raw)
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A denormalized projection of a property as returned by the list endpoint.
///
/// Owned by the favorites cache. Replaced wholesale on every full reload and
/// never partially mutated except removal-by-identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteProperty {
    /// Property identifier
    pub id: PropertyId,
    /// Listing title
    pub title: String,
    /// Asking price
    pub price: f64,
    /// Bedroom count
    pub bedrooms: u32,
    /// Bathroom count
    pub bathrooms: u32,
    /// Living area in square feet
    pub living_area: f64,
    /// First listing image, if any
    pub thumbnail_url: Option<String>,
    /// Location summary: city
    pub city: String,
    /// Location summary: state
    pub state: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_accepts_positive() {
        let id = PropertyId::new(42).unwrap();
        assert_eq!(id.get(), 42);
    }

    #[test]
    fn new_rejects_zero_and_negative() {
        assert!(matches!(
            PropertyId::new(0),
            Err(Error::InvalidPropertyId(_))
        ));
        assert!(matches!(
            PropertyId::new(-3),
            Err(Error::InvalidPropertyId(_))
        ));
    }

    #[test]
    fn parse_numeric_string() {
        let id: PropertyId = "42".parse().unwrap();
        assert_eq!(id, PropertyId::new(42).unwrap());

        // Surrounding whitespace is tolerated
        let id: PropertyId = " 7 ".parse().unwrap();
        assert_eq!(id.get(), 7);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("abc".parse::<PropertyId>().is_err());
        assert!("".parse::<PropertyId>().is_err());
        assert!("4.5".parse::<PropertyId>().is_err());
        assert!("-1".parse::<PropertyId>().is_err());
    }

    #[test]
    fn coerce_number_and_string_agree() {
        let from_number = PropertyId::coerce(&json!(42)).unwrap();
        let from_string = PropertyId::coerce(&json!("42")).unwrap();
        assert_eq!(from_number, from_string);
    }

    #[test]
    fn coerce_rejects_non_numeric() {
        assert!(PropertyId::coerce(&json!(null)).is_err());
        assert!(PropertyId::coerce(&json!(4.5)).is_err());
        assert!(PropertyId::coerce(&json!({"id": 1})).is_err());
        assert!(PropertyId::coerce(&json!([1])).is_err());
    }

    #[test]
    fn id_serializes_transparently() {
        let id = PropertyId::new(9).unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "9");

        let parsed: PropertyId = serde_json::from_str("9").unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn projection_serialization_format() {
        let property = FavoriteProperty {
            id: PropertyId::new(7).unwrap(),
            title: "Oceanfront Villa".to_string(),
            price: 1_250_000.0,
            bedrooms: 4,
            bathrooms: 3,
            living_area: 2800.0,
            thumbnail_url: Some("https://cdn.example.com/7.jpg".to_string()),
            city: "Honolulu".to_string(),
            state: "HI".to_string(),
        };

        let json = serde_json::to_string(&property).unwrap();
        assert!(json.contains("livingArea")); // camelCase
        assert!(json.contains("thumbnailUrl"));

        let parsed: FavoriteProperty = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, property);
    }

    #[test]
    fn projection_without_thumbnail() {
        let json = r#"{
            "id": 3,
            "title": "Downtown Loft",
            "price": 450000,
            "bedrooms": 1,
            "bathrooms": 1,
            "livingArea": 720,
            "thumbnailUrl": null,
            "city": "Portland",
            "state": "OR"
        }"#;

        let parsed: FavoriteProperty = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.id.get(), 3);
        assert!(parsed.thumbnail_url.is_none());
    }
}
