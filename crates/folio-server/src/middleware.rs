use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

/// Newtype wrapping a request ID string, stored as a request extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Axum middleware that extracts or generates a request ID.
///
/// If the incoming request has an `x-request-id` header, that value is used.
/// Otherwise a new `UUIDv4` is generated. The ID is:
/// - Inserted into request extensions as [`RequestId`]
/// - Set on the response as the `x-request-id` header
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    req.extensions_mut().insert(RequestId(id.clone()));

    let mut res = next.run(req).await;

    if let Ok(val) = HeaderValue::from_str(&id) {
        res.headers_mut().insert("x-request-id", val);
    }

    res
}

/// Rate-limit bucket key for a request: the first non-empty forwarding
/// header, else a shared `"unknown"` bucket.
///
/// `x-forwarded-for` values are used verbatim, so clients behind the same
/// proxy chain share one bucket.
#[must_use]
pub fn client_key(headers: &HeaderMap) -> String {
    ["x-forwarded-for", "x-real-ip"]
        .into_iter()
        .find_map(|name| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|s| !s.is_empty())
        })
        .map_or_else(|| "unknown".to_owned(), ToOwned::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for &(name, value) in pairs {
            map.insert(name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn client_key_prefers_forwarded_for() {
        let map = headers(&[("x-forwarded-for", "203.0.113.9"), ("x-real-ip", "10.0.0.1")]);
        assert_eq!(client_key(&map), "203.0.113.9");
    }

    #[test]
    fn client_key_falls_back_to_real_ip() {
        let map = headers(&[("x-real-ip", "10.0.0.1")]);
        assert_eq!(client_key(&map), "10.0.0.1");
    }

    #[test]
    fn client_key_skips_blank_forwarded_header() {
        let map = headers(&[("x-forwarded-for", "   "), ("x-real-ip", "10.0.0.1")]);
        assert_eq!(client_key(&map), "10.0.0.1");
    }

    #[test]
    fn client_key_defaults_to_shared_bucket() {
        assert_eq!(client_key(&HeaderMap::new()), "unknown");
    }
}
