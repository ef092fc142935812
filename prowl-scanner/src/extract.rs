//! Candidate harvesting from a fetched page. Everything link-shaped is
//! collected into one flat list; deciding what a candidate actually is
//! belongs to the classifier.

use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;

/// A raw string pulled from a page that might name a crawlable resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCandidate {
    pub value: String,
}

/// Reference attributes inspected on elements of interest, including the
/// vendor data-attributes used by lazy-loading patterns.
const LINK_ATTRIBUTES: &[&str] = &["href", "src", "action", "data-src", "data-lazy-src"];

const ELEMENTS_OF_INTEREST: &str = "a, link, script, img, iframe, source, form, button";

/// First-argument string literals of common async-request wrappers.
static REQUEST_WRAPPER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:\b(?:fetch|axios(?:\.\w+)?)|\$\.(?:ajax|get|post))\s*\(\s*["']([^"']+)["']"#)
        .expect("hardcoded regex pattern is valid")
});

/// First-argument string literals of any single-argument call.
static SINGLE_ARG_CALL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\b[A-Za-z_]\w*\s*\(\s*["']([^"']+)["']\s*\)"#)
        .expect("hardcoded regex pattern is valid")
});

/// Quoted strings ending in a recognized page/script/style/image extension.
static QUOTED_RESOURCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"["']([^"']+\.(?:php|html?|js|css|png|jpe?g|gif)(?:\?[^"']*)?)["']"#)
        .expect("hardcoded regex pattern is valid")
});

/// Scan a parsed page for candidate link strings. Order is deterministic:
/// document order for elements, attribute table before event handlers,
/// then inline script bodies pass by pass. Duplicates are preserved.
pub fn extract(document: &Html) -> Vec<RawCandidate> {
    let mut candidates = Vec::new();

    let elements = Selector::parse(ELEMENTS_OF_INTEREST).unwrap();
    for element in document.select(&elements) {
        for attr in LINK_ATTRIBUTES {
            if let Some(value) = element.value().attr(attr) {
                push_candidate(&mut candidates, value);
            }
        }

        // Event handlers carry inline script, same as <script> bodies.
        for (name, value) in element.value().attrs() {
            if name.starts_with("on") {
                scan_script_text(&mut candidates, value);
            }
        }
    }

    let scripts = Selector::parse("script").unwrap();
    for element in document.select(&scripts) {
        let body: String = element.text().collect();
        scan_script_text(&mut candidates, &body);
    }

    candidates
}

fn push_candidate(out: &mut Vec<RawCandidate>, value: &str) {
    // In-page fragment anchors never name a fetchable resource.
    if value.is_empty() || value.starts_with('#') {
        return;
    }
    out.push(RawCandidate {
        value: value.to_string(),
    });
}

/// Three independent passes over one stretch of script text; a literal
/// matched by more than one pass yields one candidate per pass.
fn scan_script_text(out: &mut Vec<RawCandidate>, text: &str) {
    for re in [&*REQUEST_WRAPPER_RE, &*SINGLE_ARG_CALL_RE, &*QUOTED_RESOURCE_RE] {
        for capture in re.captures_iter(text) {
            if let Some(literal) = capture.get(1) {
                push_candidate(out, literal.as_str());
            }
        }
    }
}
