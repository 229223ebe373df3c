//! Form types

use chrono::DateTime;
use chrono::Utc;

/// Values to create or replace an Apartment
///
/// Every mutable field is present, an update replaces all of them
pub struct ApartmentValues<'a> {
    /// Street address, already trimmed
    pub address: &'a str,

    /// Date of the visit, if any
    pub visit_date: Option<DateTime<Utc>>,

    /// Free-form notes
    pub notes: &'a str,

    /// Rating, 0 is unrated
    pub rating: i64,

    /// Monthly price
    pub price: f64,

    /// Floor the apartment is on
    pub floor: i64,

    /// Is the building gated
    pub is_gated: bool,

    /// Does it come with a garage
    pub has_garage: bool,

    /// Is there laundry on site
    pub has_laundry: bool,
}
