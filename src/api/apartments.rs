//! Apartments API endpoints
//!
//! Everything related to the apartment evaluations

use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;

use crate::apartments::Apartment;
use crate::database::ApartmentValues;
use crate::database::Database;

use super::ApartmentId;
use super::Error;
use super::Form;
use super::Status;
use super::Success;
use super::lenient;
use super::parse_address;

/// Submitted apartment, used for both create and update
///
/// An update replaces every field, omitted fields fall back to their defaults
#[derive(Debug, Deserialize)]
pub struct ApartmentForm {
    #[serde(default)]
    address: String,

    #[serde(default, deserialize_with = "lenient::visit_date")]
    visit_date: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "lenient::text")]
    notes: String,

    #[serde(default, deserialize_with = "lenient::rating")]
    rating: i64,

    #[serde(default, deserialize_with = "lenient::price")]
    price: f64,

    #[serde(
        default = "lenient::default_floor",
        deserialize_with = "lenient::floor"
    )]
    floor: i64,

    #[serde(default, deserialize_with = "lenient::flag")]
    is_gated: bool,

    #[serde(default, deserialize_with = "lenient::flag")]
    has_garage: bool,

    #[serde(default, deserialize_with = "lenient::flag")]
    has_laundry: bool,
}

impl ApartmentForm {
    /// Validate the form and turn it into storage values
    fn values(&self) -> Result<ApartmentValues<'_>, Error> {
        Ok(ApartmentValues {
            address: parse_address(&self.address)?,
            visit_date: self.visit_date,
            notes: &self.notes,
            rating: self.rating,
            price: self.price,
            floor: self.floor,
            is_gated: self.is_gated,
            has_garage: self.has_garage,
            has_laundry: self.has_laundry,
        })
    }
}

/// List all apartments
///
/// Request:
/// ```sh
/// curl -k https://localhost:8443/api/apartments
/// ```
///
/// Response:
/// ```json
/// [ { "id": 1, "address": "123 Main St", ... } ]
/// ```
pub async fn list(
    Extension(database): Extension<Database>,
) -> Result<Success<Vec<Apartment>>, Error> {
    let apartments = database
        .find_all_apartments()
        .await
        .map_err(Error::storage("Failed to list apartments"))?;

    Ok(Success::ok(apartments))
}

/// Get a single apartment
///
/// Request:
/// ```sh
/// curl -k https://localhost:8443/api/apartments/1
/// ```
///
/// Response:
/// ```json
/// { "id": 1, "address": "123 Main St", ... }
/// ```
pub async fn single(
    Extension(database): Extension<Database>,
    ApartmentId(id): ApartmentId,
) -> Result<Success<Apartment>, Error> {
    database
        .find_single_apartment_by_id(id)
        .await
        .map_err(Error::storage("Failed to get apartment"))?
        .map_or_else(|| Err(not_found()), |apartment| Ok(Success::ok(apartment)))
}

/// Create an apartment
///
/// Request:
/// ```sh
/// curl -k -H 'Content-Type: application/json' \
///     --data '{ "address": "123 Main St", "price": 1500, "rating": 4 }' \
///     https://localhost:8443/api/apartments
/// ```
///
/// Response:
/// ```json
/// { "id": 1, "address": "123 Main St", "floor": 1, ... }
/// ```
pub async fn create(
    Extension(database): Extension<Database>,
    Form(form): Form<ApartmentForm>,
) -> Result<Success<Apartment>, Error> {
    let values = form.values()?;

    let apartment = database
        .create_apartment(&values)
        .await
        .map_err(Error::storage("Failed to create apartment"))?;

    tracing::debug!("Created apartment {}", apartment.id);

    Ok(Success::created(apartment))
}

/// Replace an apartment
///
/// Request:
/// ```sh
/// curl -k -X PUT -H 'Content-Type: application/json' \
///     --data '{ "address": "123 Main St", "price": 1600, "rating": 3 }' \
///     https://localhost:8443/api/apartments/1
/// ```
///
/// Response:
/// ```json
/// { "id": 1, "address": "123 Main St", "price": 1600.0, ... }
/// ```
pub async fn update(
    Extension(database): Extension<Database>,
    ApartmentId(id): ApartmentId,
    Form(form): Form<ApartmentForm>,
) -> Result<Success<Apartment>, Error> {
    let values = form.values()?;

    let apartment = database
        .update_apartment(id, &values)
        .await
        .map_err(Error::storage("Failed to update apartment"))?
        .ok_or_else(not_found)?;

    tracing::debug!("Updated apartment {}", apartment.id);

    Ok(Success::ok(apartment))
}

/// Delete an apartment, permanently
///
/// Request:
/// ```sh
/// curl -k -X DELETE https://localhost:8443/api/apartments/1
/// ```
///
/// Response:
/// ```json
/// { "status": "success" }
/// ```
pub async fn delete(
    Extension(database): Extension<Database>,
    ApartmentId(id): ApartmentId,
) -> Result<Success<Status>, Error> {
    let deleted_id = database
        .delete_apartment(id)
        .await
        .map_err(Error::storage("Failed to delete apartment"))?
        .ok_or_else(not_found)?;

    tracing::debug!("Deleted apartment {deleted_id}");

    Ok(Success::ok(Status::success()))
}

fn not_found() -> Error {
    Error::not_found("Apartment not found")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn form(value: serde_json::Value) -> ApartmentForm {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_form_defaults() {
        let form = form(json!({ "address": "123 Main St" }));

        assert_eq!(form.address, "123 Main St");
        assert_eq!(form.visit_date, None);
        assert_eq!(form.notes, "");
        assert_eq!(form.rating, 0);
        assert!(form.price.abs() < f64::EPSILON);
        assert_eq!(form.floor, 1);
        assert!(!form.is_gated);
        assert!(!form.has_garage);
        assert!(!form.has_laundry);
    }

    #[test]
    fn test_form_lenient_values() {
        let form = form(json!({
            "address": "123 Main St",
            "visit_date": "",
            "notes": null,
            "rating": "4",
            "price": "cheap",
            "floor": "third",
            "is_gated": "on",
            "has_garage": 1,
            "has_laundry": "nope",
        }));

        assert_eq!(form.visit_date, None);
        assert_eq!(form.notes, "");
        assert_eq!(form.rating, 4);
        assert!(form.price.abs() < f64::EPSILON);
        assert_eq!(form.floor, 1);
        assert!(form.is_gated);
        assert!(form.has_garage);
        assert!(!form.has_laundry);
    }

    #[test]
    fn test_form_invalid_visit_date() {
        let result = serde_json::from_value::<ApartmentForm>(json!({
            "address": "123 Main St",
            "visit_date": "next tuesday",
        }));

        assert!(result.is_err());
    }

    #[test]
    fn test_form_values_trim_address() {
        let form = form(json!({ "address": "  123 Main St  " }));

        let values = form.values().unwrap();
        assert_eq!(values.address, "123 Main St");
    }

    #[test]
    fn test_form_values_require_address() {
        assert!(form(json!({})).values().is_err());
        assert!(form(json!({ "address": "   " })).values().is_err());
    }
}
