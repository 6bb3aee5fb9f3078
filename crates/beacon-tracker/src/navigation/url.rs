//! Navigation target resolution.

use beacon_collector::Url;

/// The url a pageview reports for a navigation target.
///
/// Absolute `http`/`https` targets are reduced to path plus query. Anything
/// else, including targets that fail to parse, is taken as an already
/// resolved relative path and returned unchanged.
pub fn resolve_path(target: &str) -> String {
    if !target.starts_with("http") {
        return target.to_string();
    }
    match Url::parse(target) {
        Ok(url) => match url.query() {
            Some(query) if !query.is_empty() => format!("{}?{query}", url.path()),
            _ => url.path().to_string(),
        },
        Err(e) => {
            tracing::trace!("navigation: opaque target {target:?}: {e}");
            target.to_string()
        }
    }
}
