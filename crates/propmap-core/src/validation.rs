//! Query-parameter validation for the map endpoints.
//!
//! Parsing never stops at the first problem: every failing field is
//! collected into [`FieldErrors`] and returned together, keyed by the
//! parameter name the client sent (`bounds[north]` is reported as
//! `bounds.north`).

use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::geo::{
    BoundingBox, ClusterConfig, ClusterQuery, GeoConfig, GeoPoint, RadiusQuery, SortKey,
};
use crate::listings::{ListingFilters, PropertyType};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Comma-separated field names, for log lines and error messages.
    #[must_use]
    pub fn summary(&self) -> String {
        self.fields().collect::<Vec<_>>().join(", ")
    }

    /// `Ok(())` when nothing was recorded.
    ///
    /// # Errors
    ///
    /// Returns the collected errors as a [`ValidationError`].
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { fields: self })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid parameters: {}", .fields.summary())]
pub struct ValidationError {
    pub fields: FieldErrors,
}

impl ValidationError {
    #[must_use]
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut fields = FieldErrors::new();
        fields.add(field, message);
        Self { fields }
    }
}

// ---------------------------------------------------------------------------
// Range rules, shared by the raw parsers and the typed `validate` methods.
// ---------------------------------------------------------------------------

pub(crate) fn check_latitude(errors: &mut FieldErrors, field: &str, value: f64) {
    if !GeoPoint::latitude_in_range(value) {
        errors.add(field, format!("The {field} field must be between -90 and 90."));
    }
}

pub(crate) fn check_longitude(errors: &mut FieldErrors, field: &str, value: f64) {
    if !GeoPoint::longitude_in_range(value) {
        errors.add(
            field,
            format!("The {field} field must be between -180 and 180."),
        );
    }
}

pub(crate) fn check_radius(errors: &mut FieldErrors, value: f64, config: &GeoConfig) {
    if value < config.min_radius_km {
        errors.add(
            "radius",
            format!("The radius field must be at least {}.", config.min_radius_km),
        );
    } else if value > config.max_radius_km {
        errors.add(
            "radius",
            format!(
                "The radius field must not be greater than {}.",
                config.max_radius_km
            ),
        );
    }
}

pub(crate) fn check_page(errors: &mut FieldErrors, value: i64) {
    if value < 1 {
        errors.add("page", "The page field must be at least 1.");
    } else if value > i64::from(u32::MAX) {
        errors.add(
            "page",
            format!("The page field must not be greater than {}.", u32::MAX),
        );
    }
}

pub(crate) fn check_per_page(errors: &mut FieldErrors, value: i64, config: &GeoConfig) {
    if value < 1 {
        errors.add("per_page", "The per_page field must be at least 1.");
    } else if value > i64::from(config.max_per_page) {
        errors.add(
            "per_page",
            format!(
                "The per_page field must not be greater than {}.",
                config.max_per_page
            ),
        );
    }
}

pub(crate) fn check_zoom(errors: &mut FieldErrors, value: i64, config: &ClusterConfig) {
    if value < i64::from(config.min_zoom) || value > i64::from(config.max_zoom) {
        errors.add(
            "zoom_level",
            format!(
                "The zoom_level field must be between {} and {}.",
                config.min_zoom, config.max_zoom
            ),
        );
    }
}

pub(crate) fn check_price_range(
    errors: &mut FieldErrors,
    min: Option<Decimal>,
    max: Option<Decimal>,
) {
    for (field, value) in [("min_price", min), ("max_price", max)] {
        if value.is_some_and(|v| v.is_sign_negative() && !v.is_zero()) {
            errors.add(field, format!("The {field} field must be at least 0."));
        }
    }
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            errors.add(
                "max_price",
                "The max_price field must be greater than or equal to min_price.",
            );
        }
    }
}

pub(crate) fn check_area_range(errors: &mut FieldErrors, min: Option<f64>, max: Option<f64>) {
    for (field, value) in [("min_area", min), ("max_area", max)] {
        if value.is_some_and(|v| v < 0.0) {
            errors.add(field, format!("The {field} field must be at least 0."));
        }
    }
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            errors.add(
                "max_area",
                "The max_area field must be greater than or equal to min_area.",
            );
        }
    }
}

pub(crate) fn check_min_count(errors: &mut FieldErrors, field: &str, value: Option<i32>) {
    if value.is_some_and(|v| v < 0) {
        errors.add(field, format!("The {field} field must be at least 0."));
    }
}

pub(crate) fn check_filters(errors: &mut FieldErrors, filters: &ListingFilters) {
    check_price_range(errors, filters.min_price, filters.max_price);
    check_area_range(errors, filters.min_area, filters.max_area);
    check_min_count(errors, "bedrooms", filters.min_bedrooms);
    check_min_count(errors, "bathrooms", filters.min_bathrooms);
}

/// Edge ranges plus orientation. Orientation is skipped once any edge is out
/// of range.
pub(crate) fn check_bounds(
    errors: &mut FieldErrors,
    north: Option<f64>,
    south: Option<f64>,
    east: Option<f64>,
    west: Option<f64>,
) {
    let before = errors.len();
    for (field, value) in [("bounds.north", north), ("bounds.south", south)] {
        if let Some(v) = value {
            check_latitude(errors, field, v);
        }
    }
    for (field, value) in [("bounds.east", east), ("bounds.west", west)] {
        if let Some(v) = value {
            check_longitude(errors, field, v);
        }
    }
    if errors.len() != before {
        return;
    }
    if let (Some(n), Some(s)) = (north, south) {
        if s > n {
            errors.add(
                "bounds.south",
                "The bounds.south field must be less than or equal to bounds.north.",
            );
        }
    }
    if let (Some(e), Some(w)) = (east, west) {
        if w > e {
            errors.add(
                "bounds.west",
                "The bounds.west field must be less than or equal to bounds.east.",
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Raw parameter parsing
// ---------------------------------------------------------------------------

struct Params<'a> {
    raw: &'a HashMap<String, String>,
    errors: FieldErrors,
}

impl<'a> Params<'a> {
    fn new(raw: &'a HashMap<String, String>) -> Self {
        Self {
            raw,
            errors: FieldErrors::new(),
        }
    }

    /// Trimmed value; empty strings count as absent.
    fn value(&self, key: &str) -> Option<&'a str> {
        self.raw
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    fn required(&mut self, key: &str, field: &str) -> Option<&'a str> {
        let value = self.value(key);
        if value.is_none() {
            self.errors
                .add(field, format!("The {field} field is required."));
        }
        value
    }

    fn number(&mut self, field: &str, raw: Option<&str>) -> Option<f64> {
        let raw = raw?;
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => Some(v),
            _ => {
                self.errors
                    .add(field, format!("The {field} field must be a number."));
                None
            }
        }
    }

    fn decimal(&mut self, key: &str) -> Option<Decimal> {
        let raw = self.value(key)?;
        if let Ok(v) = Decimal::from_str(raw).or_else(|_| Decimal::from_scientific(raw)) {
            Some(v)
        } else {
            self.errors
                .add(key, format!("The {key} field must be a number."));
            None
        }
    }

    fn integer(&mut self, field: &str, raw: Option<&str>) -> Option<i64> {
        let raw = raw?;
        if let Ok(v) = raw.parse::<i64>() {
            Some(v)
        } else {
            self.errors
                .add(field, format!("The {field} field must be an integer."));
            None
        }
    }

    fn count(&mut self, key: &str) -> Option<i32> {
        let raw = self.value(key);
        let value = self.integer(key, raw)?;
        if let Ok(v) = i32::try_from(value) {
            Some(v)
        } else {
            self.errors
                .add(key, format!("The {key} field is out of range."));
            None
        }
    }

    /// `bounds[<name>]`, reported as `bounds.<name>`.
    fn bounds_edge(&mut self, name: &str) -> Option<f64> {
        let field = format!("bounds.{name}");
        let raw = self.required(&format!("bounds[{name}]"), &field);
        self.number(&field, raw)
    }

    fn enumerated<T: FromStr>(&mut self, key: &str) -> Option<T> {
        let raw = self.value(key)?;
        if let Ok(v) = raw.parse::<T>() {
            Some(v)
        } else {
            self.errors
                .add(key, format!("The selected {key} is invalid."));
            None
        }
    }
}

/// Parse and validate the radius search parameters.
///
/// # Errors
///
/// Returns a [`ValidationError`] naming every invalid or missing field.
#[allow(clippy::implicit_hasher)] // axum hands the query over as a std HashMap
pub fn parse_radius_query(
    raw: &HashMap<String, String>,
    config: &GeoConfig,
) -> Result<RadiusQuery, ValidationError> {
    let mut p = Params::new(raw);

    let latitude = p.required("latitude", "latitude");
    let latitude = p.number("latitude", latitude);
    let longitude = p.required("longitude", "longitude");
    let longitude = p.number("longitude", longitude);
    let radius = p.required("radius", "radius");
    let radius = p.number("radius", radius);

    let property_type = p.enumerated::<PropertyType>("property_type");
    let min_price = p.decimal("min_price");
    let max_price = p.decimal("max_price");
    let min_area = p.value("min_area");
    let min_area = p.number("min_area", min_area);
    let max_area = p.value("max_area");
    let max_area = p.number("max_area", max_area);
    let min_bedrooms = p.count("bedrooms");
    let min_bathrooms = p.count("bathrooms");
    let sort = p.enumerated::<SortKey>("sort_by").unwrap_or_default();
    let page = p.value("page");
    let page = p.integer("page", page);
    let per_page = p.value("per_page");
    let per_page = p.integer("per_page", per_page);

    let mut errors = p.errors;
    if let Some(v) = latitude {
        check_latitude(&mut errors, "latitude", v);
    }
    if let Some(v) = longitude {
        check_longitude(&mut errors, "longitude", v);
    }
    if let Some(v) = radius {
        check_radius(&mut errors, v, config);
    }
    let filters = ListingFilters {
        property_type,
        min_price,
        max_price,
        min_area,
        max_area,
        min_bedrooms,
        min_bathrooms,
    };
    check_filters(&mut errors, &filters);
    if let Some(v) = page {
        check_page(&mut errors, v);
    }
    if let Some(v) = per_page {
        check_per_page(&mut errors, v, config);
    }
    errors.into_result()?;

    let (Some(latitude), Some(longitude), Some(radius_km)) = (latitude, longitude, radius) else {
        return Err(ValidationError::single("radius", "The radius field is required."));
    };

    Ok(RadiusQuery {
        center: GeoPoint::new(latitude, longitude),
        radius_km,
        filters,
        sort,
        page: page.and_then(|v| u32::try_from(v).ok()).unwrap_or(1),
        per_page: per_page
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(config.default_per_page),
    })
}

/// Parse and validate the cluster viewport parameters.
///
/// # Errors
///
/// Returns a [`ValidationError`] naming every invalid or missing field.
#[allow(clippy::implicit_hasher)] // axum hands the query over as a std HashMap
pub fn parse_cluster_query(
    raw: &HashMap<String, String>,
    config: &GeoConfig,
) -> Result<ClusterQuery, ValidationError> {
    let mut p = Params::new(raw);

    let north = p.bounds_edge("north");
    let south = p.bounds_edge("south");
    let east = p.bounds_edge("east");
    let west = p.bounds_edge("west");

    let zoom = p.required("zoom_level", "zoom_level");
    let zoom = p.integer("zoom_level", zoom);
    let property_type = p.enumerated::<PropertyType>("property_type");
    let min_price = p.decimal("min_price");
    let max_price = p.decimal("max_price");

    let mut errors = p.errors;
    check_bounds(&mut errors, north, south, east, west);
    if let Some(v) = zoom {
        check_zoom(&mut errors, v, &config.cluster);
    }
    check_price_range(&mut errors, min_price, max_price);
    errors.into_result()?;

    let (Some(north), Some(south), Some(east), Some(west), Some(zoom)) =
        (north, south, east, west, zoom)
    else {
        return Err(ValidationError::single(
            "zoom_level",
            "The zoom_level field is required.",
        ));
    };
    let zoom_level = u8::try_from(zoom).map_err(|_| {
        ValidationError::single("zoom_level", "The zoom_level field is out of range.")
    })?;

    Ok(ClusterQuery {
        bounds: BoundingBox {
            north,
            south,
            east,
            west,
        },
        zoom_level,
        property_type,
        min_price,
        max_price,
    })
}

#[cfg(test)]
#[path = "validation_test.rs"]
mod tests;
