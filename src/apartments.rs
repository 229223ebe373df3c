//! Apartments

use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

/// An apartment evaluation, as stored
#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
pub struct Apartment {
    /// Apartment ID, assigned by the database
    pub id: i64,

    /// Street address, never empty
    pub address: String,

    /// When the apartment was visited, `None` when not visited yet
    pub visit_date: Option<DateTime<Utc>>,

    /// Free-form notes
    pub notes: String,

    /// Rating from 1 to 5, 0 is unrated
    pub rating: i64,

    /// Monthly price
    pub price: f64,

    /// Floor the apartment is on
    pub floor: i64,

    pub is_gated: bool,
    pub has_garage: bool,
    pub has_laundry: bool,

    /// Creation date
    pub created_at: DateTime<Utc>,

    /// Last updated at
    pub updated_at: DateTime<Utc>,
}
