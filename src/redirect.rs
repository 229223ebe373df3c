//! Redirect to HTTPS
//!
//! The plain listener only exists to send everyone to the secured listener

use axum::Extension;
use axum::Router;
use axum::http::HeaderMap;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::http::Uri;
use axum::http::header::LOCATION;
use axum_extra::TypedHeader;
use axum_extra::headers::Host;
use tower_http::trace::TraceLayer;

/// Where the redirects point to
#[derive(Clone, Copy, Debug)]
struct SecurePort(u16);

/// Create the router for the plain listener
///
/// Every method and path ends up in the same redirect
pub fn router(secure_port: u16) -> Router {
    Router::new()
        .fallback(redirect)
        .layer(TraceLayer::new_for_http())
        .layer(Extension(SecurePort(secure_port)))
}

/// Permanently redirect to the same host, path and query, but on the secured listener
async fn redirect(
    Extension(SecurePort(secure_port)): Extension<SecurePort>,
    host: Option<TypedHeader<Host>>,
    uri: Uri,
) -> Result<(StatusCode, HeaderMap), (StatusCode, String)> {
    let Some(TypedHeader(host)) = host else {
        return Err((StatusCode::BAD_REQUEST, "Missing host header".to_string()));
    };

    let target = secure_location(host.hostname(), secure_port, &uri);

    tracing::debug!("Redirecting to: {target}");

    let location = HeaderValue::from_str(&target)
        .map_err(|err| (StatusCode::BAD_REQUEST, err.to_string()))?;

    let mut headers = HeaderMap::new();
    headers.insert(LOCATION, location);

    Ok((StatusCode::MOVED_PERMANENTLY, headers))
}

/// Build the HTTPS location, the port of the original host is replaced
fn secure_location(hostname: &str, secure_port: u16, uri: &Uri) -> String {
    let path_and_query = uri
        .path_and_query()
        .map_or("/", |path_and_query| path_and_query.as_str());

    format!("https://{hostname}:{secure_port}{path_and_query}")
}
