//! In-memory TTL cache for API responses.
//!
//! Keeps frequently requested list/projection payloads warm for a few
//! minutes; entries expire lazily on read and the whole cache is dropped
//! after any write to the catalog.

use axum::body::{to_bytes, Body};
use axum::extract::Request;
use axum::http::{header, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Default TTL: 5 minutes
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

#[derive(Clone)]
struct CacheEntry {
    body: Vec<u8>,
    content_type: String,
    inserted_at: Instant,
    ttl: Duration,
}

static CACHE: Lazy<RwLock<HashMap<String, CacheEntry>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

pub fn get_cached(key: &str) -> Option<(Vec<u8>, String)> {
    let expired = {
        let cache = CACHE.read().ok()?;
        match cache.get(key) {
            None => return None,
            Some(entry) => {
                if entry.inserted_at.elapsed() <= entry.ttl {
                    return Some((entry.body.clone(), entry.content_type.clone()));
                }
                true
            }
        }
    };
    if expired {
        if let Ok(mut cache) = CACHE.write() {
            cache.remove(key);
        }
    }
    None
}

pub fn set_cached(key: String, body: Vec<u8>, content_type: String, ttl: Duration) {
    if let Ok(mut cache) = CACHE.write() {
        cache.insert(
            key,
            CacheEntry {
                body,
                content_type,
                inserted_at: Instant::now(),
                ttl,
            },
        );
    }
}

pub fn clear_cache(key: &str) {
    if let Ok(mut cache) = CACHE.write() {
        cache.remove(key);
    }
}

pub fn clear_all() {
    if let Ok(mut cache) = CACHE.write() {
        cache.clear();
    }
}

fn cache_key(req: &Request) -> String {
    let path = req.uri().path();
    let query = req.uri().query().unwrap_or("");
    format!("cache:{}:{}:{}", req.method(), path, query)
}

fn is_cacheable(req: &Request) -> bool {
    if req.method() != Method::GET {
        return false;
    }
    let path = req.uri().path();
    path.starts_with("/api/p9")
        || path.starts_with("/api/reference")
        || path.starts_with("/api/brand")
        || path == "/api/category"
        || path == "/api/gear"
        || path == "/api/campsite"
}

/// Response cache middleware for the read-heavy routes.
///
/// Serves stored bodies with an `X-Cache: HIT` header; successful responses
/// passing through are stored for [`DEFAULT_TTL`].
pub async fn response_cache(req: Request, next: Next) -> Response {
    if !is_cacheable(&req) {
        return next.run(req).await;
    }

    let key = cache_key(&req);

    if let Some((body, content_type)) = get_cached(&key) {
        return Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, content_type)
            .header("X-Cache", "HIT")
            .header(header::CACHE_CONTROL, "public, max-age=300")
            .body(Body::from(body))
            .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response());
    }

    let response = next.run(req).await;
    let (mut parts, body) = response.into_parts();

    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(_) => return Response::from_parts(parts, Body::default()),
    };

    if parts.status == StatusCode::OK {
        let content_type = parts
            .headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/json")
            .to_string();
        set_cached(key, bytes.to_vec(), content_type, DEFAULT_TTL);
    }

    parts
        .headers
        .insert("X-Cache", header::HeaderValue::from_static("MISS"));
    Response::from_parts(parts, Body::from(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        set_cached(
            "cache:test:a".into(),
            b"payload".to_vec(),
            "application/json".into(),
            DEFAULT_TTL,
        );
        let (body, content_type) = get_cached("cache:test:a").unwrap();
        assert_eq!(body, b"payload");
        assert_eq!(content_type, "application/json");
        clear_cache("cache:test:a");
        assert!(get_cached("cache:test:a").is_none());
    }

    #[test]
    fn test_expired_entry_is_dropped() {
        set_cached(
            "cache:test:expired".into(),
            b"old".to_vec(),
            "application/json".into(),
            Duration::ZERO,
        );
        assert!(get_cached("cache:test:expired").is_none());
    }

    #[test]
    fn test_clear_all() {
        set_cached(
            "cache:test:b".into(),
            b"x".to_vec(),
            "application/json".into(),
            DEFAULT_TTL,
        );
        clear_all();
        assert!(get_cached("cache:test:b").is_none());
    }
}
