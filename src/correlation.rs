use hyper::header::HeaderMap;
use uuid::Uuid;

/// Header carrying the correlation id across all three hops.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Returns the caller-supplied correlation id, or generates one in the
/// `tid_` form the collaborators expect when the header is missing or empty.
pub fn from_headers(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .unwrap_or_else(generate)
}

fn generate() -> String {
    format!("tid_{}", Uuid::new_v4().simple())
}
