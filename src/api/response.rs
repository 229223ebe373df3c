//! API response helpers

use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use serde::Serialize;

use crate::database;

/// Hold data for a successful API interaction
pub struct Success<V>
where
    V: Serialize,
{
    status_code: StatusCode,
    data: V,
}

impl<V> Success<V>
where
    V: Serialize,
{
    pub fn ok(data: V) -> Self {
        Self {
            status_code: StatusCode::OK,
            data,
        }
    }

    pub fn created(data: V) -> Self {
        Self {
            status_code: StatusCode::CREATED,
            data,
        }
    }
}

impl<V> IntoResponse for Success<V>
where
    V: Serialize,
{
    fn into_response(self) -> Response {
        (self.status_code, Json(self.data)).into_response()
    }
}

/// Body of a successful delete
#[derive(Debug, Serialize)]
pub struct Status {
    status: &'static str,
}

impl Status {
    pub fn success() -> Self {
        Self { status: "success" }
    }
}

/// Failed API interaction, rendered as `{"error": ..., "description": ...}`
#[derive(Debug)]
pub struct Error {
    status_code: StatusCode,
    message: String,
    description: Option<String>,
}

impl Error {
    fn new<M>(status_code: StatusCode, message: M) -> Self
    where
        M: ToString,
    {
        Self {
            status_code,
            message: message.to_string(),
            description: None,
        }
    }

    pub fn bad_request<M>(message: M) -> Self
    where
        M: ToString,
    {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found<M>(message: M) -> Self
    where
        M: ToString,
    {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal_server_error<M>(message: M) -> Self
    where
        M: ToString,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Attach details about what exactly was wrong with the request
    #[must_use]
    pub fn with_description<D>(self, description: D) -> Self
    where
        D: ToString,
    {
        Self {
            description: Some(description.to_string()),
            ..self
        }
    }

    /// Log a storage failure and hide its details from the client
    pub fn storage(message: &'static str) -> impl FnOnce(database::Error) -> Self {
        move |err| {
            tracing::error!("{message}: {err}");

            Self::internal_server_error(message)
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
            description: self.description,
        };

        (self.status_code, Json(body)).into_response()
    }
}
