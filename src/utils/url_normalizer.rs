//! URL normalization and domain extraction.
//!
//! Turns whatever the user typed (`example.com`, `https://example.com/path`,
//! `HTTP://Example.COM`) into a full URL and derives the domain key used for
//! deduplication and lookups.

use url::Url;

const DEFAULT_SCHEME: &str = "https://";

/// Returns the remainder after an `http://` or `https://` prefix, matched
/// case-insensitively.
fn strip_http_scheme(input: &str) -> Option<&str> {
    ["https://", "http://"].into_iter().find_map(|prefix| {
        input
            .get(..prefix.len())
            .filter(|head| head.eq_ignore_ascii_case(prefix))
            .map(|_| &input[prefix.len()..])
    })
}

/// Parses `url` and returns its lowercase host, if it has a non-empty one.
fn parsed_host(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    parsed
        .host_str()
        .filter(|host| !host.is_empty())
        .map(str::to_ascii_lowercase)
}

/// Converts a domain name or URL into a full URL.
///
/// # Rules
///
/// 1. Surrounding whitespace is trimmed
/// 2. Input without an `http://`/`https://` prefix gets `https://` prepended
/// 3. If the result still has no host, the text after the scheme (leading
///    slashes removed) is re-wrapped under `https://`
///
/// The user's spelling is kept otherwise: no trailing slash is added and the
/// URL is not re-serialized. The function is idempotent.
///
/// Input with no host at all (`/`, `https://`) normalizes to a URL whose
/// [`extract_domain`] is empty; callers treat that as missing input.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_url("example.com"), "https://example.com");
/// assert_eq!(normalize_url("http://example.com/a"), "http://example.com/a");
/// assert_eq!(normalize_url("http://?ref=1"), "https://?ref=1");
/// ```
pub fn normalize_url(input: &str) -> String {
    let trimmed = input.trim();

    let candidate = if strip_http_scheme(trimmed).is_some() {
        trimmed.to_string()
    } else {
        format!("{DEFAULT_SCHEME}{trimmed}")
    };

    if parsed_host(&candidate).is_some() {
        return candidate;
    }

    let rest = strip_http_scheme(&candidate)
        .unwrap_or(&candidate)
        .trim_start_matches('/');
    format!("{DEFAULT_SCHEME}{rest}")
}

/// Extracts the domain key from a URL.
///
/// Returns the parsed host (lowercase, without port or credentials). When the
/// URL has no parseable host, falls back to the first non-empty segment of the
/// text after the scheme, with credentials and port stripped.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(extract_domain("https://Example.com:8080/path"), "example.com");
/// assert_eq!(extract_domain("https://my site/path"), "my site");
/// ```
pub fn extract_domain(url: &str) -> String {
    if let Some(host) = parsed_host(url) {
        return host;
    }

    let trimmed = url.trim();
    let rest = strip_http_scheme(trimmed).unwrap_or(trimmed);

    rest.split(['/', '?', '#'])
        .find(|segment| !segment.is_empty())
        .map(|segment| {
            let without_credentials = segment.rsplit('@').next().unwrap_or(segment);
            let host = without_credentials
                .split(':')
                .next()
                .filter(|host| !host.is_empty())
                .unwrap_or(without_credentials);
            host.to_lowercase()
        })
        .unwrap_or_default()
}

/// Normalizes `input` and returns both the URL and its domain key.
pub fn resolve(input: &str) -> (String, String) {
    let url = normalize_url(input);
    let domain = extract_domain(&url);
    (url, domain)
}
