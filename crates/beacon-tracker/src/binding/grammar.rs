//! Binding class-token grammar.

use beacon_core::constants::BINDING_SEPARATOR;
use beacon_core::errors::ConfigError;
use regex::Regex;

/// Event type and value parsed from one class token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindingToken {
    pub event_type: String,
    pub event_value: String,
}

/// The one anchored pattern a class token must match to declare a binding.
///
/// Event types are lowercase letters. Event values are lowercase letters,
/// digits, underscores and hyphens, at least two characters long and never
/// starting with a hyphen.
#[derive(Debug, Clone)]
pub struct BindingGrammar {
    fragment: String,
    pattern: Regex,
}

impl BindingGrammar {
    pub fn new(prefix: &str) -> Result<Self, ConfigError> {
        let fragment = format!("{prefix}{BINDING_SEPARATOR}");
        let source = format!(
            "^{}([a-z]+){sep}([a-z0-9_]+[a-z0-9_-]+)$",
            regex::escape(&fragment),
            sep = BINDING_SEPARATOR,
        );
        let pattern = Regex::new(&source).map_err(|e| ConfigError::ValidationFailed {
            field: "binding_prefix".to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { fragment, pattern })
    }

    /// `<prefix>--`: the substring every candidate class attribute contains.
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    pub fn parse_class_token(&self, token: &str) -> Option<BindingToken> {
        let captures = self.pattern.captures(token)?;
        Some(BindingToken {
            event_type: captures[1].to_string(),
            event_value: captures[2].to_string(),
        })
    }

    /// Every binding declared in a whitespace-separated class attribute, in
    /// attribute order.
    pub fn parse_class_name<'a>(
        &'a self,
        class_name: &'a str,
    ) -> impl Iterator<Item = BindingToken> + 'a {
        class_name
            .split_whitespace()
            .filter_map(|token| self.parse_class_token(token))
    }
}
