//! Path normalization and URL joining.

/// Collapse repeated slashes and drop a trailing slash.
///
/// Empty input and `/` are returned unchanged.
pub fn normalize_path(path: &str) -> String {
    if path.is_empty() || path == "/" {
        return path.to_string();
    }

    let mut normalized = String::with_capacity(path.len());
    for c in path.chars() {
        if c == '/' && normalized.ends_with('/') {
            continue;
        }
        normalized.push(c);
    }

    if normalized.len() > 1 && normalized.ends_with('/') {
        normalized.pop();
    }
    normalized
}

/// Join a path onto the base URL.
///
/// Paths starting with `http` are taken as already absolute. No
/// percent-encoding happens here.
pub fn build_url(path: &str, base_url: &str) -> String {
    if path.starts_with("http") {
        return path.to_string();
    }

    let base = base_url.strip_suffix('/').unwrap_or(base_url);
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}
