//! Url normalization for records returned by an image source.

/// Returns `url` unchanged when it is already absolute; otherwise joins it
/// to `origin` with exactly one `/` between them.
pub fn normalize_url(origin: &str, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        return url.to_string();
    }
    let origin = origin.trim_end_matches('/');
    let path = url.trim_start_matches('/');
    format!("{origin}/{path}")
}
