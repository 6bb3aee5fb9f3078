//! Config resolver: embedding attributes → resolved configuration or an
//! inert outcome.
//!
//! Inactivity is a normal result, not an error. An inert tracker makes no
//! network calls and installs no listeners.

use crate::constants::attributes;
use crate::models::DoNotTrackSignal;
use crate::traits::EmbeddingElement;
use url::Url;

/// Configuration resolved from the embedding element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Site identifier carried by every beacon.
    pub website: String,
    /// Endpoint root without a trailing slash; the collect path is appended.
    pub endpoint_root: String,
    pub auto_track: bool,
    pub observe_mutations: bool,
    pub do_not_track: bool,
    pub use_cache: bool,
    /// Hostname allow-list. Empty means every hostname is allowed.
    pub domains: Vec<String>,
}

/// Why a tracker stayed inert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InertReason {
    /// No embedding element carrying a site identifier.
    MissingEmbedding,
    /// Opt-out attribute present and the browser signal enabled.
    DoNotTrack,
    /// Allow-list configured and the current hostname is not on it.
    DomainNotAllowed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    Active(TrackerConfig),
    Inert(InertReason),
}

impl Activation {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }
}

/// Resolve the embedding attributes against the current page.
pub fn resolve(
    embedding: Option<&EmbeddingElement>,
    hostname: &str,
    dnt_signal: &DoNotTrackSignal,
) -> Activation {
    let Some(element) = embedding else {
        return Activation::Inert(InertReason::MissingEmbedding);
    };
    let Some(website) = element.attribute(attributes::WEBSITE_ID) else {
        return Activation::Inert(InertReason::MissingEmbedding);
    };

    let do_not_track = flag_present(element, attributes::DO_NOT_TRACK);
    if do_not_track && dnt_signal.is_enabled() {
        return Activation::Inert(InertReason::DoNotTrack);
    }

    let domains = non_empty(element, attributes::DOMAINS)
        .map(parse_domains)
        .unwrap_or_default();
    if !domains.is_empty() && !domains.iter().any(|d| d == hostname) {
        return Activation::Inert(InertReason::DomainNotAllowed);
    }

    let endpoint_root = match non_empty(element, attributes::HOST_URL) {
        Some(host_url) => remove_trailing_slash(host_url).to_string(),
        None => script_directory(&element.src),
    };

    Activation::Active(TrackerConfig {
        website: website.to_string(),
        endpoint_root,
        auto_track: flag_default_on(element, attributes::AUTO_TRACK),
        observe_mutations: flag_default_on(element, attributes::OBSERVE_MUTATIONS),
        do_not_track,
        use_cache: flag_present(element, attributes::CACHE),
        domains,
    })
}

fn non_empty<'a>(element: &'a EmbeddingElement, name: &str) -> Option<&'a str> {
    element.attribute(name).filter(|v| !v.is_empty())
}

/// On unless the attribute is literally `"false"`.
fn flag_default_on(element: &EmbeddingElement, name: &str) -> bool {
    element.attribute(name) != Some("false")
}

/// On only when the attribute is present with a non-empty value.
fn flag_present(element: &EmbeddingElement, name: &str) -> bool {
    non_empty(element, name).is_some()
}

/// Split a comma-separated hostname list, trimming whitespace.
pub fn parse_domains(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .collect()
}

/// Strip one trailing slash, keeping a bare `/` intact.
pub fn remove_trailing_slash(url: &str) -> &str {
    if url.len() > 1 {
        url.strip_suffix('/').unwrap_or(url)
    } else {
        url
    }
}

/// The script source url with its last path segment removed.
///
/// `https://stats.example.com/js/tracker.js` → `https://stats.example.com/js`.
/// Absolute sources are normalized first (scheme and host case, default
/// port, dot segments). Sources that do not parse as absolute urls are cut
/// textually.
pub fn script_directory(src: &str) -> String {
    let Ok(mut url) = Url::parse(src) else {
        return relative_directory(src);
    };
    url.set_query(None);
    url.set_fragment(None);
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop();
    } else {
        return relative_directory(src);
    }
    remove_trailing_slash(url.as_str()).to_string()
}

fn relative_directory(src: &str) -> String {
    let path = src.split(['?', '#']).next().unwrap_or(src);
    match path.rfind('/') {
        Some(end) => path[..end].to_string(),
        None => String::new(),
    }
}
