//! Response header filtering.
//!
//! Only a fixed allow-list of origin headers reaches the client. Caching,
//! security and hop-by-hop headers set by the origin are dropped.

use axum::http::{
    header::{self, GetAll},
    HeaderMap, HeaderName, HeaderValue,
};

/// Origin headers relayed to the client.
pub const RELAYED_HEADERS: [HeaderName; 6] = [
    header::CONTENT_TYPE,
    header::CONTENT_LENGTH,
    header::CACHE_CONTROL,
    header::ETAG,
    header::LAST_MODIFIED,
    header::CONTENT_DISPOSITION,
];

/// Copy the allow-listed headers out of an origin response.
///
/// Header names are case-insensitive by construction in `HeaderMap`.
/// Repeated values are joined with `", "` into a single header.
pub fn filter_headers(origin: &HeaderMap) -> HeaderMap {
    let mut out = HeaderMap::new();
    for name in RELAYED_HEADERS.iter() {
        if let Some(value) = combine(origin.get_all(name)) {
            out.insert(name.clone(), value);
        }
    }
    out
}

fn combine(values: GetAll<'_, HeaderValue>) -> Option<HeaderValue> {
    let mut iter = values.iter();
    let first = iter.next()?;

    let mut joined = first.as_bytes().to_vec();
    for value in iter {
        joined.extend_from_slice(b", ");
        joined.extend_from_slice(value.as_bytes());
    }
    // Joining valid values with ", " keeps the bytes valid
    HeaderValue::from_bytes(&joined).ok().or_else(|| Some(first.clone()))
}
