//! Page snapshot read from the host once at load time.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
}

impl std::fmt::Display for ScreenSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Location, referrer, screen, and language of the embedding page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContext {
    pub hostname: String,
    pub pathname: String,
    /// Query string including the leading `?`, or empty.
    pub search: String,
    /// The real document referrer. Used only for the first pageview.
    pub referrer: String,
    pub screen: ScreenSize,
    pub language: String,
}

impl PageContext {
    /// Path plus query, the url form every beacon reports.
    pub fn initial_url(&self) -> String {
        format!("{}{}", self.pathname, self.search)
    }
}
