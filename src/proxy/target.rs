//! Target URL extraction and validation.
//!
//! # Responsibilities
//! - Strictly percent-decode the raw `url` path parameter
//! - Parse the result as an absolute URL
//! - Allow only the `http` and `https` schemes
//!
//! # Design Decisions
//! - A `%` that is not followed by two hex digits is a decode failure, as is
//!   a decoded byte sequence that is not UTF-8
//! - Hosts are not filtered: private, loopback and link-local targets are
//!   reachable. Deployments must restrict egress at the network level.

use percent_encoding::percent_decode_str;
use url::Url;

use crate::proxy::error::{ProxyError, UrlRejection};

/// Schemes the proxy will fetch from.
pub const ALLOWED_SCHEMES: [&str; 2] = ["http", "https"];

/// Percent-decode a URI component, rejecting malformed escapes.
pub fn decode_component(raw: &str) -> Result<String, UrlRejection> {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let escape = bytes.get(i + 1..i + 3).ok_or(UrlRejection::Decode)?;
            if !escape.iter().all(u8::is_ascii_hexdigit) {
                return Err(UrlRejection::Decode);
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    percent_decode_str(raw)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| UrlRejection::Decode)
}

/// Turn the raw path parameter into a validated target URL.
pub fn parse_target(raw: Option<&str>) -> Result<Url, ProxyError> {
    let raw = match raw {
        Some(r) if !r.is_empty() => r,
        _ => return Err(ProxyError::MissingParameter),
    };

    let decoded = decode_component(raw)?;
    let url = Url::parse(&decoded).map_err(UrlRejection::from)?;

    // Url lowercases the scheme while parsing
    if !ALLOWED_SCHEMES.contains(&url.scheme()) {
        return Err(UrlRejection::Scheme(url.scheme().to_string()).into());
    }

    Ok(url)
}
