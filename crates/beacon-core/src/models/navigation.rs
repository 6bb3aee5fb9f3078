use serde::{Deserialize, Serialize};

/// The (current url, current referrer) pair the navigation tracker owns.
///
/// Starts from the page location and the real document referrer. Each
/// intercepted transition moves the previous url into the referrer slot,
/// so in-app chains are preserved instead of the browser referrer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    pub url: String,
    pub referrer: String,
}

impl NavigationState {
    pub fn new(url: impl Into<String>, referrer: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            referrer: referrer.into(),
        }
    }

    /// Move to `next`, returning the new state. The referrer becomes the url
    /// that was current before the transition.
    pub fn advance(&mut self, next: impl Into<String>) -> &Self {
        let previous = std::mem::replace(&mut self.url, next.into());
        self.referrer = previous;
        self
    }
}
