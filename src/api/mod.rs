//! All API endpoint setup

use axum::Router;
use axum::routing::get;

pub use request::ApartmentId;
pub use request::Form;
pub use request::parse_address;
pub use response::Error;
pub use response::Status;
pub use response::Success;

mod apartments;
mod lenient;
mod request;
mod response;

/// Get the Axum router for all API routes
pub fn router() -> Router {
    let apartments = Router::new()
        .route("/", get(apartments::list).post(apartments::create))
        .route(
            "/{id}",
            get(apartments::single)
                .put(apartments::update)
                .delete(apartments::delete),
        );

    Router::new().nest("/apartments", apartments)
}
