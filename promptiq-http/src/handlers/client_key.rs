use axum::http::HeaderMap;

/// Sentinel key used when no address header is present.
pub const UNKNOWN_CLIENT_KEY: &str = "unknown";

/// Resolve the client key used to bucket usage counts: forwarded-address
/// header first (first comma-separated entry), then real-address, then the
/// CDN connecting-address header. Header authenticity is not validated; this
/// is a heuristic, not a security boundary.
pub fn resolve_client_key(headers: &HeaderMap) -> String {
    if let Some(forwarded) = header_str(headers, "x-forwarded-for") {
        return forwarded
            .split(',')
            .next()
            .unwrap_or(forwarded)
            .trim()
            .to_string();
    }
    if let Some(real_ip) = header_str(headers, "x-real-ip") {
        return real_ip.to_string();
    }
    if let Some(cf_connecting_ip) = header_str(headers, "cf-connecting-ip") {
        return cf_connecting_ip.to_string();
    }

    UNKNOWN_CLIENT_KEY.to_string()
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn test_forwarded_for_takes_first_entry() {
        let headers = headers(&[
            ("x-forwarded-for", "203.0.113.7, 10.0.0.1"),
            ("x-real-ip", "198.51.100.2"),
        ]);
        assert_eq!(resolve_client_key(&headers), "203.0.113.7");
    }

    #[test]
    fn test_real_ip_before_cdn_header() {
        let headers = headers(&[
            ("x-real-ip", "198.51.100.2"),
            ("cf-connecting-ip", "192.0.2.9"),
        ]);
        assert_eq!(resolve_client_key(&headers), "198.51.100.2");
    }

    #[test]
    fn test_cdn_header_last() {
        let headers = headers(&[("cf-connecting-ip", "192.0.2.9")]);
        assert_eq!(resolve_client_key(&headers), "192.0.2.9");
    }

    #[test]
    fn test_unknown_fallback() {
        assert_eq!(resolve_client_key(&HeaderMap::new()), UNKNOWN_CLIENT_KEY);
    }
}
