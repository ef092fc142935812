//! Per-candidate classification: follow it, record it, or flag it.
//!
//! Extraction is deliberately credulous, so every candidate passes through
//! here before it can touch the frontier. The outcome is a tagged variant
//! rather than a filter chain; new extraction strategies feed the same
//! decision table.

use crate::extract::RawCandidate;
use crate::path;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use url::Url;

/// Directories conventionally holding non-content resources.
const STATIC_DIRS: &[&str] = &["images", "css", "js", "assets", "media"];

/// Extensions for stylesheets, scripts, images, fonts, media and documents.
const STATIC_EXTENSIONS: &[&str] = &[
    "css", "js", "jpg", "jpeg", "png", "gif", "svg", "ico", "webp", "woff", "woff2", "ttf", "eot",
    "mp3", "mp4", "avi", "pdf",
];

/// Schemes that can never resolve to a crawlable HTTP resource.
const NON_HTTP_SCHEMES: &[&str] = &[
    "mailto:",
    "javascript:",
    "tel:",
    "sms:",
    "data:",
    "file:",
    "ftp:",
];

/// Junk trimmed off candidate edges before the URL-likeness check.
const TRIM_CHARS: &[char] = &[' ', ';', '(', ')', '[', ']', '{', '}'];

/// A quoted resource reference embedded in a larger expression.
static EMBEDDED_RESOURCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"["']([^"']*\.(?:php|html?|js|css|png|jpe?g|gif)(?:\?[^"']*)?)["']"#)
        .expect("hardcoded regex pattern is valid")
});

/// A bare value ending in a recognized extension, optional query/fragment.
static URL_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.(?:php|html?|js|css|png|jpe?g|gif)(?:[?#].*)?$")
        .expect("hardcoded regex pattern is valid")
});

/// Why a candidate was routed to the suspicious log instead of the frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuspectReason {
    NonHttpScheme,
    ContainsAtSign,
    NotUrlLike,
    Malformed,
}

impl SuspectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuspectReason::NonHttpScheme => "non-http-scheme",
            SuspectReason::ContainsAtSign => "contains-at-sign",
            SuspectReason::NotUrlLike => "not-url-like",
            SuspectReason::Malformed => "malformed",
        }
    }
}

impl std::fmt::Display for SuspectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Same-host page path, normalized and ready to enqueue.
    Internal(String),
    /// Resolved to a host other than the crawl target; `host[:port]`.
    External(String),
    /// Conventional static resource; dropped without comment.
    StaticAsset,
    /// Could not be confidently resolved to a followable URL.
    Suspicious(SuspectReason),
}

/// Decide what one candidate is, relative to the page it was found on.
/// Pure: the same candidate against the same base always classifies the
/// same way.
pub fn classify(
    candidate: &RawCandidate,
    current_path: &str,
    base_root: &Url,
    base_domain: &str,
) -> Classification {
    let value = candidate.value.trim();
    let lower = value.to_ascii_lowercase();

    if NON_HTTP_SCHEMES.iter().any(|s| lower.starts_with(s)) {
        return Classification::Suspicious(SuspectReason::NonHttpScheme);
    }

    // Bare email addresses and the like; anything already http-ish keeps
    // going and gets judged by resolution instead.
    if value.contains('@') && !lower.starts_with("http") {
        return Classification::Suspicious(SuspectReason::ContainsAtSign);
    }

    let target = match pull_embedded_resource(value) {
        Some(embedded) => embedded,
        None => {
            if is_malformed(value) {
                return Classification::Suspicious(SuspectReason::Malformed);
            }
            let trimmed = value.trim_matches(TRIM_CHARS);
            if !looks_like_url(trimmed) {
                return Classification::Suspicious(SuspectReason::NotUrlLike);
            }
            trimmed.to_string()
        }
    };

    let Some(resolved) = resolve(&target, current_path, base_root) else {
        return Classification::Suspicious(SuspectReason::Malformed);
    };

    let domain = host_key(&resolved);
    if domain != base_domain {
        return Classification::External(domain);
    }

    let resolved_path = resolved.path();
    if in_static_dir(resolved_path) || has_static_extension(resolved_path) {
        return Classification::StaticAsset;
    }

    Classification::Internal(path::normalize(resolved_path))
}

/// Exact dedup key for a resolved host: `host` or `host:port` when the
/// port is explicit.
pub fn host_key(url: &Url) -> String {
    let host = url.host_str().unwrap_or("unknown");
    match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    }
}

/// Pull a quoted `...ext` substring out of a larger expression, e.g. the
/// argument buried inside a decorated function call.
fn pull_embedded_resource(value: &str) -> Option<String> {
    EMBEDDED_RESOURCE_RE
        .captures(value)
        .and_then(|capture| capture.get(1))
        .map(|m| m.as_str().to_string())
}

fn looks_like_url(value: &str) -> bool {
    if value.is_empty() {
        return false;
    }
    value.starts_with("http://")
        || value.starts_with("https://")
        || value.starts_with('/')
        || value.starts_with("./")
        || value.starts_with("../")
        || URL_SUFFIX_RE.is_match(value)
}

/// Fast structural damage check: a literal space, unbalanced parentheses,
/// or an odd number of quote characters.
fn is_malformed(value: &str) -> bool {
    if value.contains(' ') {
        return true;
    }
    if value.matches('(').count() != value.matches(')').count() {
        return true;
    }
    value.matches('\'').count() % 2 != 0 || value.matches('"').count() % 2 != 0
}

/// Resolve a surviving candidate to an absolute URL. Root-relative values
/// resolve against the site root; everything else resolves against the
/// current page's directory, joined with a trailing slash so relative
/// links behave as they would in a browser-rendered document.
fn resolve(target: &str, current_path: &str, base_root: &Url) -> Option<Url> {
    if target.starts_with("http://") || target.starts_with("https://") {
        return Url::parse(target).ok();
    }

    let base = if target.starts_with('/') {
        base_root.clone()
    } else {
        let page_dir = if path::is_file_path(current_path) {
            path::dirname(current_path)
        } else {
            current_path.to_string()
        };
        if page_dir == "/" {
            base_root.clone()
        } else {
            base_root.join(&format!("{page_dir}/")).ok()?
        }
    };

    base.join(target).ok()
}

fn in_static_dir(resolved_path: &str) -> bool {
    resolved_path
        .trim_start_matches('/')
        .split('/')
        .next()
        .map(|first| STATIC_DIRS.contains(&first.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

fn has_static_extension(resolved_path: &str) -> bool {
    let segment = resolved_path.rsplit('/').next().unwrap_or("");
    segment
        .rsplit_once('.')
        .map(|(_, ext)| STATIC_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_one(value: &str, current_path: &str) -> Classification {
        let base_root = Url::parse("http://example.com/").unwrap();
        classify(
            &RawCandidate {
                value: value.to_string(),
            },
            current_path,
            &base_root,
            "example.com",
        )
    }

    #[test]
    fn non_http_schemes_are_suspicious() {
        assert_eq!(
            classify_one("mailto:x@y.com", "/"),
            Classification::Suspicious(SuspectReason::NonHttpScheme)
        );
        assert_eq!(
            classify_one("JavaScript:void(0)", "/"),
            Classification::Suspicious(SuspectReason::NonHttpScheme)
        );
    }

    #[test]
    fn bare_email_addresses_are_suspicious() {
        assert_eq!(
            classify_one("admin@example.com", "/"),
            Classification::Suspicious(SuspectReason::ContainsAtSign)
        );
    }

    #[test]
    fn space_bearing_values_are_malformed() {
        assert_eq!(
            classify_one("foo bar", "/"),
            Classification::Suspicious(SuspectReason::Malformed)
        );
    }

    #[test]
    fn unbalanced_structure_is_malformed() {
        assert_eq!(
            classify_one("doThing(arg", "/"),
            Classification::Suspicious(SuspectReason::Malformed)
        );
        assert_eq!(
            classify_one("it's-broken", "/"),
            Classification::Suspicious(SuspectReason::Malformed)
        );
    }

    #[test]
    fn plain_words_are_not_url_like() {
        assert_eq!(
            classify_one("justtext", "/"),
            Classification::Suspicious(SuspectReason::NotUrlLike)
        );
    }

    #[test]
    fn external_hosts_are_collected() {
        assert_eq!(
            classify_one("http://external.example/z", "/"),
            Classification::External("external.example".to_string())
        );
    }

    #[test]
    fn explicit_port_makes_a_distinct_host() {
        assert_eq!(
            classify_one("http://example.com:8080/admin", "/"),
            Classification::External("example.com:8080".to_string())
        );
    }

    #[test]
    fn static_directory_rule() {
        assert_eq!(classify_one("/images/logo.png", "/"), Classification::StaticAsset);
        assert_eq!(classify_one("/assets/app", "/"), Classification::StaticAsset);
    }

    #[test]
    fn static_extension_rule_outside_static_dirs() {
        assert_eq!(classify_one("/styles/app.css", "/"), Classification::StaticAsset);
        assert_eq!(classify_one("/downloads/manual.pdf", "/"), Classification::StaticAsset);
    }

    #[test]
    fn cross_host_static_files_count_as_external() {
        // The host comparison runs before the static allow-lists.
        assert_eq!(
            classify_one("https://cdn.example.net/lib.js", "/"),
            Classification::External("cdn.example.net".to_string())
        );
    }

    #[test]
    fn root_relative_values_resolve_against_the_site_root() {
        assert_eq!(
            classify_one("/admin/panel.php", "/deep/nested/page.php"),
            Classification::Internal("/admin/panel.php".to_string())
        );
    }

    #[test]
    fn relative_values_resolve_against_the_page_directory() {
        assert_eq!(
            classify_one("panel.php", "/admin/index.php"),
            Classification::Internal("/admin/panel.php".to_string())
        );
        assert_eq!(
            classify_one("./list.php", "/admin"),
            Classification::Internal("/admin/list.php".to_string())
        );
        assert_eq!(
            classify_one("../up.php", "/a/b/c.php"),
            Classification::Internal("/a/up.php".to_string())
        );
    }

    #[test]
    fn embedded_quoted_resources_are_pulled_out() {
        assert_eq!(
            classify_one(r#"loadContent("reports/q3.php"); refresh();"#, "/"),
            Classification::Internal("/reports/q3.php".to_string())
        );
    }

    #[test]
    fn queries_and_fragments_never_reach_the_path() {
        assert_eq!(
            classify_one("/search.php?q=1#results", "/"),
            Classification::Internal("/search.php".to_string())
        );
    }

    #[test]
    fn bracket_junk_is_trimmed_before_the_url_check() {
        assert_eq!(
            classify_one("(/wrapped.php)", "/"),
            Classification::Internal("/wrapped.php".to_string())
        );
    }

    #[test]
    fn classification_is_pure() {
        let base_root = Url::parse("http://example.com/").unwrap();
        let candidate = RawCandidate {
            value: "/repeat.php".to_string(),
        };
        let first = classify(&candidate, "/", &base_root, "example.com");
        let second = classify(&candidate, "/", &base_root, "example.com");
        assert_eq!(first, second);
    }
}
