use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;
use crate::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Apartment,
    House,
    Villa,
    Office,
    Land,
    Commercial,
    Other,
}

impl PropertyType {
    pub const ALL: [PropertyType; 7] = [
        PropertyType::Apartment,
        PropertyType::House,
        PropertyType::Villa,
        PropertyType::Office,
        PropertyType::Land,
        PropertyType::Commercial,
        PropertyType::Other,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PropertyType::Apartment => "apartment",
            PropertyType::House => "house",
            PropertyType::Villa => "villa",
            PropertyType::Office => "office",
            PropertyType::Land => "land",
            PropertyType::Commercial => "commercial",
            PropertyType::Other => "other",
        }
    }
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingType {
    Rent,
    Sale,
}

impl ListingType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ListingType::Rent => "rent",
            ListingType::Sale => "sale",
        }
    }
}

impl FromStr for ListingType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rent" => Ok(ListingType::Rent),
            "sale" => Ok(ListingType::Sale),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    Active,
    Pending,
    Inactive,
}

impl ListingStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ListingStatus::Active => "active",
            ListingStatus::Pending => "pending",
            ListingStatus::Inactive => "inactive",
        }
    }
}

impl FromStr for ListingStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(ListingStatus::Active),
            "pending" => Ok(ListingStatus::Pending),
            "inactive" => Ok(ListingStatus::Inactive),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

/// Returned when a stored or submitted enum value has no matching variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown value '{0}'")]
pub struct UnknownVariant(pub String);

/// A listing as seen by the geo module. Read-only: the store owns it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingRecord {
    pub id: i64,
    pub title: String,
    pub price: Decimal,
    pub property_type: PropertyType,
    pub listing_type: ListingType,
    pub area: f64,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub status: ListingStatus,
    /// `None` when the listing was never geocoded; such listings never
    /// appear in geo queries.
    pub location: Option<GeoPoint>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub thumbnail_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ListingRecord {
    /// Location of an active listing, or `None` if it must be skipped by
    /// every geo query.
    #[must_use]
    pub fn geo_location(&self) -> Option<GeoPoint> {
        if self.status == ListingStatus::Active {
            self.location
        } else {
            None
        }
    }
}

/// Optional field constraints shared by radius search and clustering.
///
/// Every bound is independent; `None` imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingFilters {
    pub property_type: Option<PropertyType>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub min_area: Option<f64>,
    pub max_area: Option<f64>,
    pub min_bedrooms: Option<i32>,
    pub min_bathrooms: Option<i32>,
}

impl ListingFilters {
    #[must_use]
    pub fn matches(&self, listing: &ListingRecord) -> bool {
        self.property_type.is_none_or(|t| listing.property_type == t)
            && self.min_price.is_none_or(|min| listing.price >= min)
            && self.max_price.is_none_or(|max| listing.price <= max)
            && self.min_area.is_none_or(|min| listing.area >= min)
            && self.max_area.is_none_or(|max| listing.area <= max)
            && self.min_bedrooms.is_none_or(|min| listing.bedrooms >= min)
            && self.min_bathrooms.is_none_or(|min| listing.bathrooms >= min)
    }
}

/// One entry of the seed file (`config/listings.yaml`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingSeed {
    /// Stable key used to upsert the listing on repeated seeding.
    pub key: String,
    pub title: String,
    pub price: Decimal,
    pub property_type: PropertyType,
    pub listing_type: ListingType,
    pub area: f64,
    #[serde(default)]
    pub bedrooms: i32,
    #[serde(default)]
    pub bathrooms: i32,
    #[serde(default = "default_status")]
    pub status: ListingStatus,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub thumbnail_url: Option<String>,
}

fn default_status() -> ListingStatus {
    ListingStatus::Active
}

#[derive(Debug, Deserialize)]
pub struct ListingsFile {
    pub listings: Vec<ListingSeed>,
}

/// Load and validate listing seeds from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_listings(path: &Path) -> Result<ListingsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ListingsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: ListingsFile = serde_yaml::from_str(&content)?;
    validate_listings(&file)?;
    Ok(file)
}

fn validate_listings(file: &ListingsFile) -> Result<(), ConfigError> {
    let mut seen_keys = HashSet::new();

    for seed in &file.listings {
        if seed.key.trim().is_empty() {
            return Err(ConfigError::Validation(
                "listing key must be non-empty".to_string(),
            ));
        }
        if !seen_keys.insert(seed.key.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate listing key: '{}'",
                seed.key
            )));
        }
        if seed.title.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "listing '{}' has an empty title",
                seed.key
            )));
        }
        if seed.price.is_sign_negative() {
            return Err(ConfigError::Validation(format!(
                "listing '{}' has a negative price",
                seed.key
            )));
        }
        if seed.area < 0.0 || seed.bedrooms < 0 || seed.bathrooms < 0 {
            return Err(ConfigError::Validation(format!(
                "listing '{}' has a negative area, bedroom or bathroom count",
                seed.key
            )));
        }
        match (seed.latitude, seed.longitude) {
            (None, None) => {}
            (Some(lat), Some(lng)) => {
                if !GeoPoint::new(lat, lng).is_valid() {
                    return Err(ConfigError::Validation(format!(
                        "listing '{}' has out-of-range coordinates ({lat}, {lng})",
                        seed.key
                    )));
                }
            }
            _ => {
                return Err(ConfigError::Validation(format!(
                    "listing '{}' must set both latitude and longitude or neither",
                    seed.key
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "listings_test.rs"]
mod tests;
