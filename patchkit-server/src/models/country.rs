//! Country entity and its PATCH request
//!
//! Slug format: lowercase alphanumeric words joined by single hyphens

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use patchkit_core::{apply_optional, apply_value, Nullable};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum length for country names and slugs
const MAX_NAME_LEN: usize = 100;

static SLUG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("invalid slug regex"));

/// Country record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Country {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub slug: String,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker, NULL while the country is live
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, thiserror::Error)]
pub enum CountryError {
    #[error("country not found")]
    NotFound,

    #[error("invalid country name")]
    InvalidName,

    #[error("invalid slug")]
    InvalidSlug,

    #[error("slug already exists")]
    SlugExists,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Fields needed to create a country
#[derive(Debug, Clone, Deserialize)]
pub struct NewCountry {
    pub name: String,
    pub code: String,
    pub slug: String,
    #[serde(default)]
    pub position: i32,
}

impl NewCountry {
    /// Validate and build a fresh record with a generated id.
    pub fn into_country(self) -> Result<Country, CountryError> {
        validate_name(&self.name)?;
        validate_slug(&self.slug)?;

        let now = Utc::now();
        Ok(Country {
            id: Uuid::new_v4(),
            name: self.name.trim().to_owned(),
            code: self.code,
            slug: self.slug,
            position: self.position,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        })
    }
}

/// PATCH body for a country.
///
/// Omitted keys leave the column alone. `null` is only meaningful for
/// `deleted_at`; the required columns ignore it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCountryRequest {
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub name: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub code: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub slug: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub position: Nullable<i32>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub deleted_at: Nullable<DateTime<Utc>>,
}

impl UpdateCountryRequest {
    /// True when no key was sent at all.
    pub fn is_empty(&self) -> bool {
        !(self.name.is_set()
            || self.code.is_set()
            || self.slug.is_set()
            || self.position.is_set()
            || self.deleted_at.is_set())
    }

    /// Merge onto `country`. Nothing is written if validation fails, and
    /// `updated_at` only moves when a column actually changed.
    pub fn apply(&self, country: &mut Country) -> Result<(), CountryError> {
        if let Some(name) = self.name.data() {
            validate_name(name)?;
        }
        if let Some(slug) = self.slug.data() {
            validate_slug(slug)?;
        }

        let before = country.clone();
        apply_value(&self.name.as_ref().map(|n| n.trim().to_owned()), &mut country.name);
        apply_value(&self.code, &mut country.code);
        apply_value(&self.slug, &mut country.slug);
        apply_value(&self.position, &mut country.position);
        apply_optional(&self.deleted_at, &mut country.deleted_at);

        if *country != before {
            country.updated_at = Utc::now();
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<(), CountryError> {
    let name = name.trim();
    if name.is_empty() || name.chars().count() > MAX_NAME_LEN {
        return Err(CountryError::InvalidName);
    }
    Ok(())
}

fn validate_slug(slug: &str) -> Result<(), CountryError> {
    if slug.len() > MAX_NAME_LEN || !SLUG_RE.is_match(slug) {
        return Err(CountryError::InvalidSlug);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vietnam() -> Country {
        NewCountry {
            name: "Viet Nam".into(),
            code: "VN".into(),
            slug: "viet-nam".into(),
            position: 1,
        }
        .into_country()
        .unwrap()
    }

    fn patch(payload: serde_json::Value) -> UpdateCountryRequest {
        serde_json::from_value(payload).unwrap()
    }

    #[test]
    fn new_country_validates() {
        let country = vietnam();
        assert_eq!(country.name, "Viet Nam");
        assert!(country.deleted_at.is_none());

        let bad = NewCountry {
            name: "  ".into(),
            code: "XX".into(),
            slug: "xx".into(),
            position: 0,
        };
        assert!(matches!(bad.into_country(), Err(CountryError::InvalidName)));

        let bad = NewCountry {
            name: "Lao".into(),
            code: "LA".into(),
            slug: "Lao PDR".into(),
            position: 0,
        };
        assert!(matches!(bad.into_country(), Err(CountryError::InvalidSlug)));
    }

    #[test]
    fn slug_format() {
        assert!(validate_slug("viet-nam").is_ok());
        assert!(validate_slug("a1").is_ok());
        assert!(validate_slug("-lead").is_err());
        assert!(validate_slug("double--dash").is_err());
        assert!(validate_slug("").is_err());
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let mut country = vietnam();
        let before = country.clone();
        let req = patch(json!({}));

        assert!(req.is_empty());
        req.apply(&mut country).unwrap();
        assert_eq!(country, before);
    }

    #[test]
    fn patch_updates_sent_fields_only() {
        let mut country = vietnam();
        let req = patch(json!({"name": " Vietnam ", "position": 3}));

        req.apply(&mut country).unwrap();
        assert_eq!(country.name, "Vietnam");
        assert_eq!(country.position, 3);
        assert_eq!(country.slug, "viet-nam");
        assert_eq!(country.code, "VN");
    }

    #[test]
    fn null_on_required_field_is_ignored() {
        let mut country = vietnam();
        let before = country.clone();
        let req = patch(json!({"name": null, "position": null}));

        assert!(!req.is_empty());
        req.apply(&mut country).unwrap();
        assert_eq!(country, before);
    }

    #[test]
    fn updated_at_moves_only_on_change() {
        let mut country = vietnam();
        let stale = "2020-01-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap();
        country.updated_at = stale;

        patch(json!({"code": "VN", "slug": "viet-nam"}))
            .apply(&mut country)
            .unwrap();
        assert_eq!(country.updated_at, stale);

        patch(json!({"code": "VNM"})).apply(&mut country).unwrap();
        assert_eq!(country.code, "VNM");
        assert!(country.updated_at > stale);
    }

    #[test]
    fn deleted_at_set_and_cleared() {
        let mut country = vietnam();

        patch(json!({"deleted_at": "2024-06-01T00:00:00Z"}))
            .apply(&mut country)
            .unwrap();
        assert_eq!(
            country.deleted_at.map(|ts| ts.to_rfc3339()),
            Some("2024-06-01T00:00:00+00:00".to_string())
        );

        patch(json!({"name": "Viet Nam"})).apply(&mut country).unwrap();
        assert!(country.deleted_at.is_some());

        patch(json!({"deleted_at": null})).apply(&mut country).unwrap();
        assert!(country.deleted_at.is_none());
    }

    #[test]
    fn invalid_patch_writes_nothing() {
        let mut country = vietnam();
        let before = country.clone();

        let err = patch(json!({"position": 9, "slug": "Not A Slug"}))
            .apply(&mut country)
            .unwrap_err();
        assert!(matches!(err, CountryError::InvalidSlug));
        assert_eq!(country, before);
    }

    #[test]
    fn patch_rejects_wrong_types() {
        let result = serde_json::from_value::<UpdateCountryRequest>(json!({"position": "first"}));
        assert!(result.is_err());
    }

    #[test]
    fn patch_serializes_only_sent_keys() {
        let req = patch(json!({"deleted_at": null, "code": "VN"}));
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"code": "VN", "deleted_at": null})
        );
    }
}
