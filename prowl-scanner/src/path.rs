//! Path canonicalization. A normalized path is the unit of identity for
//! frontier deduplication: it starts with `/`, carries no query or
//! fragment, and has no trailing `/` unless it is the root itself.

/// Extensions that mark a path as a fetchable page or script file rather
/// than a directory. Static-asset extensions deliberately do not belong
/// here; those are the classifier's concern.
const PAGE_EXTENSIONS: &[&str] = &["php", "html", "htm", "asp", "aspx", "jsp", "cgi", "js"];

/// Canonicalize an arbitrary path/URL fragment into comparable form.
/// Idempotent: `normalize(normalize(x)) == normalize(x)` for all inputs.
pub fn normalize(raw: &str) -> String {
    let mut path = raw.trim();

    // Absolute URLs contribute only their path component; scheme and host
    // are resolution concerns handled upstream.
    if let Some(rest) = path
        .strip_prefix("http://")
        .or_else(|| path.strip_prefix("https://"))
    {
        path = match rest.find('/') {
            Some(idx) => &rest[idx..],
            None => "",
        };
    }

    // Query and fragment never participate in path identity.
    let path = path.split(['?', '#']).next().unwrap_or("");

    if path.is_empty() || path == "/" {
        return "/".to_string();
    }

    let mut normalized = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };

    while normalized.len() > 1 && normalized.ends_with('/') {
        normalized.pop();
    }

    normalized
}

/// Whether the final segment of `path` names a page/script file.
pub fn is_file_path(path: &str) -> bool {
    let segment = path.rsplit('/').next().unwrap_or("");
    segment
        .rsplit_once('.')
        .map(|(_, ext)| PAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Parent directory of `path`; the root is its own parent.
pub fn dirname(path: &str) -> String {
    match path.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(idx) => path[..idx].to_string(),
    }
}
