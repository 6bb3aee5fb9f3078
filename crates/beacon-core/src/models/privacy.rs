//! Browser do-not-track signal.

use serde::{Deserialize, Serialize};

/// Raw do-not-track values as the host exposes them. Browsers disagree on
/// where the flag lives, so every known location is carried and the first
/// one present wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoNotTrackSignal {
    /// Window-level value.
    pub window: Option<String>,
    /// Navigator-level value.
    pub navigator: Option<String>,
    /// Vendor-prefixed navigator value.
    pub ms_navigator: Option<String>,
    /// Result of the vendor tracking-protection query, when the host has one.
    pub tracking_protection: Option<bool>,
}

impl DoNotTrackSignal {
    /// A signal that reports do-not-track as enabled.
    pub fn enabled() -> Self {
        Self {
            navigator: Some("1".to_string()),
            ..Self::default()
        }
    }

    pub fn is_enabled(&self) -> bool {
        let first = [&self.window, &self.navigator, &self.ms_navigator]
            .into_iter()
            .filter_map(|v| v.as_deref())
            .find(|v| !v.is_empty());

        match first {
            Some(value) => value == "1" || value == "yes",
            None => self.tracking_protection.unwrap_or(false),
        }
    }
}
