//! Caller network address extraction.

use axum::extract::ConnectInfo;
use axum::http::{Extensions, HeaderMap};
use std::net::SocketAddr;

/// Address used when neither proxy headers nor the peer socket are available.
pub const UNKNOWN_ADDRESS: &str = "unknown";

/// Resolves the caller's IP address for one request.
///
/// When `behind_proxy` is true the first entry of `X-Forwarded-For` wins,
/// then `X-Real-IP`. Otherwise (or if those headers are absent) the peer
/// socket address from [`ConnectInfo`] is used. Only trust proxy headers when
/// the service actually runs behind a reverse proxy that sets them.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
///
/// let addr = client_address(&headers, &Extensions::new(), true);
/// assert_eq!(addr, "203.0.113.7");
/// ```
pub fn client_address(headers: &HeaderMap, extensions: &Extensions, behind_proxy: bool) -> String {
    if behind_proxy {
        let forwarded = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        let real_ip = || {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
        };

        if let Some(ip) = forwarded.or_else(real_ip) {
            return ip.to_string();
        }
    }

    extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_ADDRESS.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn peer(addr: &str) -> Extensions {
        let mut extensions = Extensions::new();
        extensions.insert(ConnectInfo(addr.parse::<SocketAddr>().unwrap()));
        extensions
    }

    #[test]
    fn test_peer_address_without_proxy() {
        let headers = HeaderMap::new();

        assert_eq!(
            client_address(&headers, &peer("192.0.2.10:51234"), false),
            "192.0.2.10"
        );
    }

    #[test]
    fn test_forwarded_headers_ignored_without_proxy() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.7"));

        assert_eq!(
            client_address(&headers, &peer("192.0.2.10:51234"), false),
            "192.0.2.10"
        );
    }

    #[test]
    fn test_forwarded_for_first_entry_behind_proxy() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.1"));

        assert_eq!(
            client_address(&headers, &peer("10.0.0.1:80"), true),
            "203.0.113.7"
        );
    }

    #[test]
    fn test_real_ip_fallback_behind_proxy() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.1"));

        assert_eq!(client_address(&headers, &Extensions::new(), true), "198.51.100.1");
    }

    #[test]
    fn test_ipv6_peer() {
        assert_eq!(
            client_address(&HeaderMap::new(), &peer("[2001:db8::1]:443"), false),
            "2001:db8::1"
        );
    }

    #[test]
    fn test_unknown_when_nothing_available() {
        assert_eq!(
            client_address(&HeaderMap::new(), &Extensions::new(), true),
            UNKNOWN_ADDRESS
        );
    }
}
