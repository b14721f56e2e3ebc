//! C10's request-metadata half: header/user-agent probe signals and the
//! outbound response scrub, both of which need the HTTP request/response
//! the pure `text_processing::hygiene` functions never see.

use std::time::Duration;

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use once_cell::sync::Lazy;
use rand::Rng;

/// Header names associated with scanning tools and detection harnesses
/// rather than an ordinary chat client.
static SUSPICIOUS_HEADERS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "x-scan-id",
        "x-honeypot-probe",
        "x-automated-test",
        "x-bot-detection",
    ]
});

/// Substrings of bot/scraper/scanner user-agents.
const BOT_UA_SUBSTRINGS: &[&str] = &[
    "curl/", "python-requests", "scrapy", "httpclient", "bot", "crawler", "spider", "scanner",
];

/// Response headers the outbound scrub allows through untouched; every
/// other header (including anything naming the server/framework) is
/// stripped before the response leaves the process.
const ALLOWED_RESPONSE_HEADERS: &[&str] = &["content-type", "x-request-id"];

pub fn has_suspicious_header(headers: &HeaderMap) -> bool {
    headers
        .keys()
        .any(|name| SUSPICIOUS_HEADERS.iter().any(|s| name.as_str().eq_ignore_ascii_case(s)))
}

pub fn is_bot_user_agent(headers: &HeaderMap) -> bool {
    let Some(ua) = headers.get(axum::http::header::USER_AGENT).and_then(|v| v.to_str().ok())
    else {
        return false;
    };
    let lower = ua.to_lowercase();
    BOT_UA_SUBSTRINGS.iter().any(|s| lower.contains(s))
}

/// Strips every response header not on the allowlist and sets the three
/// mandated security headers. Mutates `headers` in place.
pub fn scrub_response_headers(headers: &mut HeaderMap) {
    let to_remove: Vec<HeaderName> = headers
        .keys()
        .filter(|name| !ALLOWED_RESPONSE_HEADERS.contains(&name.as_str()))
        .cloned()
        .collect();
    for name in to_remove {
        headers.remove(name);
    }
    headers.insert(
        axum::http::header::CACHE_CONTROL,
        HeaderValue::from_static("no-store"),
    );
    headers.insert(
        axum::http::header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
}

/// A small random delay so response timing can't be used as a side
/// channel for probing internal branch decisions.
pub async fn jitter() {
    let millis = rand::thread_rng().gen_range(50..=150);
    tokio::time::sleep(Duration::from_millis(millis)).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for (k, v) in pairs {
            headers.insert(
                HeaderName::from_bytes(k.as_bytes()).unwrap(),
                HeaderValue::from_str(v).unwrap(),
            );
        }
        headers
    }

    #[test]
    fn flags_known_suspicious_header() {
        let headers = headers_with(&[("X-Scan-Id", "1")]);
        assert!(has_suspicious_header(&headers));
    }

    #[test]
    fn ordinary_headers_are_not_flagged() {
        let headers = headers_with(&[("Content-Type", "application/json")]);
        assert!(!has_suspicious_header(&headers));
    }

    #[test]
    fn flags_bot_user_agent() {
        let headers = headers_with(&[("User-Agent", "python-requests/2.31")]);
        assert!(is_bot_user_agent(&headers));
    }

    #[test]
    fn ordinary_user_agent_is_not_flagged() {
        let headers = headers_with(&[("User-Agent", "Mozilla/5.0 (Windows NT 10.0)")]);
        assert!(!is_bot_user_agent(&headers));
    }

    #[test]
    fn scrub_keeps_only_allowed_headers_and_adds_security_headers() {
        let mut headers = headers_with(&[
            ("Content-Type", "application/json"),
            ("Server", "axum"),
            ("X-Powered-By", "some-framework"),
        ]);
        scrub_response_headers(&mut headers);
        assert!(headers.contains_key("content-type"));
        assert!(!headers.contains_key("server"));
        assert!(!headers.contains_key("x-powered-by"));
        assert_eq!(headers.get("cache-control").unwrap(), "no-store");
        assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    }
}
