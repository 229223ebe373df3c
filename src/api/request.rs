//! API request helpers

use axum::extract::FromRequest;
use axum::extract::FromRequestParts;
use axum::extract::Json;
use axum::extract::Path;
use axum::extract::Request;
use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::PathRejection;
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use super::Error;

/// Parse and normalize a required address
///
/// ```rust
/// let address = "  123 Main St ";
/// assert_eq!(parse_address(address).unwrap(), "123 Main St")
/// ```
pub fn parse_address(address: &str) -> Result<&str, Error> {
    let address = address.trim();

    if address.is_empty() {
        return Err(Error::bad_request("Address is required"));
    }

    Ok(address)
}

/// Parse an apartment ID from a path segment
pub fn parse_id(id: &str) -> Result<i64, Error> {
    id.parse::<i64>()
        .map_err(|err| Error::bad_request("Invalid apartment ID").with_description(err))
}

/// The underlying serde message is more useful than the rejection text
fn source_or_self<E>(err: &E) -> String
where
    E: std::error::Error,
{
    err.source()
        .map_or_else(|| err.to_string(), ToString::to_string)
}

fn parse_json<J>(json: Result<Json<J>, JsonRejection>) -> Result<J, Error> {
    match json {
        Ok(Json(json)) => Ok(json),
        Err(err) => match err {
            JsonRejection::JsonDataError(err) => {
                Err(Error::bad_request("Data error").with_description(source_or_self(&err)))
            }
            JsonRejection::JsonSyntaxError(err) => {
                Err(Error::bad_request("JSON syntax error").with_description(source_or_self(&err)))
            }
            JsonRejection::MissingJsonContentType(_err) => Err(Error::bad_request(
                "Missing `application/json` content type",
            )),
            JsonRejection::BytesRejection(err) => {
                Err(Error::bad_request("Invalid characters in JSON").with_description(err))
            }
            err => Err(Error::bad_request("Unknown JSON error").with_description(err)),
        },
    }
}

/// Wrapper for the JSON extractor
pub struct Form<F>(pub F);

impl<S, F> FromRequest<S> for Form<F>
where
    S: Send + Sync,
    F: DeserializeOwned + Send,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let json = Json::<F>::from_request(req, state).await;

        parse_json(json).map(Form)
    }
}

fn parse_path(path: Result<Path<String>, PathRejection>) -> Result<i64, Error> {
    match path {
        Ok(Path(id)) => parse_id(&id),
        Err(err) => match err {
            PathRejection::FailedToDeserializePathParams(err) => {
                Err(Error::bad_request("Invalid apartment ID").with_description(err))
            }
            PathRejection::MissingPathParams(err) => {
                Err(Error::bad_request("Missing path parameter").with_description(err))
            }
            err => Err(Error::bad_request("Unknown path error").with_description(err)),
        },
    }
}

/// The `{id}` segment of an apartment route
pub struct ApartmentId(pub i64);

impl<S> FromRequestParts<S> for ApartmentId
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let path = Path::<String>::from_request_parts(parts, state).await;

        parse_path(path).map(ApartmentId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_address() {
        assert_eq!(parse_address("123 Main St").unwrap(), "123 Main St");
        assert_eq!(parse_address("  123 Main St\n").unwrap(), "123 Main St");

        assert!(parse_address("").is_err());
        assert!(parse_address(" \t ").is_err());
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert_eq!(parse_id("-1").unwrap(), -1);

        assert!(parse_id("abc").is_err());
        assert!(parse_id("4.2").is_err());
        assert!(parse_id("").is_err());
        assert!(parse_id(" 42").is_err());
        assert!(parse_id("42 ").is_err());
        assert!(parse_id("99999999999999999999").is_err());
    }
}
