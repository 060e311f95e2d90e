use reqwest::Url;

/// Joins a base URL and a path with exactly one slash between them.
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{}/{}", base, path)
}

/// Reduces an absolute URL to its path and query so it can be routed back
/// through a base-URL-relative client. Anything that does not parse as an
/// absolute URL is returned unchanged.
pub fn path_and_query(link: &str) -> String {
    match Url::parse(link) {
        Ok(url) => match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        },
        Err(_) => link.to_string(),
    }
}

/// Like `path_and_query`, but also drops the path prefix of `base_url`, so
/// the result can be joined back onto the base without repeating it.
pub fn relative_to_base(link: &str, base_url: &str) -> String {
    let reduced = path_and_query(link);
    let Ok(base) = Url::parse(base_url) else {
        return reduced;
    };
    let prefix = base.path().trim_end_matches('/');
    if prefix.is_empty() {
        return reduced;
    }
    match reduced.strip_prefix(prefix) {
        Some(rest) if rest.starts_with('/') || rest.starts_with('?') => rest.to_string(),
        _ => reduced,
    }
}
