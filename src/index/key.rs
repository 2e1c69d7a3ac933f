//! Match keys for the response index.
//!
//! Keys are structured records rather than delimiter-joined strings, so a
//! URI or matcher containing `|` cannot collide with another key. The
//! `URI|METHOD|MATCHER` text form exists only for display and for the
//! `/delete` endpoint.

use std::fmt;

/// Priority tier of the response index, searched in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tier {
    /// Request body contains a substring.
    Body,
    /// Request carries a header with an exact value.
    Header,
    /// URI and method only.
    Fallback,
}

impl Tier {
    /// All tiers, highest priority first.
    pub const ALL: [Tier; 3] = [Tier::Body, Tier::Header, Tier::Fallback];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Body => "body",
            Tier::Header => "header",
            Tier::Fallback => "fallback",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The condition part of a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Condition {
    /// Uppercased body substring.
    Body(String),
    /// Normalized header name and value.
    Header { name: String, value: String },
    /// No condition.
    Any,
}

/// Composite key identifying one entry within a tier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchKey {
    uri: String,
    method: String,
    condition: Condition,
}

impl MatchKey {
    /// Tier A key. URI, method and matcher are uppercased.
    pub fn body(uri: &str, method: &str, matcher: &str) -> Self {
        Self {
            uri: uri.to_uppercase(),
            method: method.to_uppercase(),
            condition: Condition::Body(matcher.to_uppercase()),
        }
    }

    /// Tier B key. Name and value are normalized with [`normalize_header_part`].
    pub fn header(uri: &str, method: &str, matcher: &HeaderMatcher) -> Self {
        Self {
            uri: uri.to_uppercase(),
            method: method.to_uppercase(),
            condition: Condition::Header {
                name: normalize_header_part(&matcher.name),
                value: normalize_header_part(&matcher.value),
            },
        }
    }

    /// Tier C key.
    pub fn fallback(uri: &str, method: &str) -> Self {
        Self {
            uri: uri.to_uppercase(),
            method: method.to_uppercase(),
            condition: Condition::Any,
        }
    }

    pub fn tier(&self) -> Tier {
        match self.condition {
            Condition::Body(_) => Tier::Body,
            Condition::Header { .. } => Tier::Header,
            Condition::Any => Tier::Fallback,
        }
    }

    /// True when this key answers the given (already uppercased) URI and method.
    pub fn targets(&self, uri: &str, method: &str) -> bool {
        self.uri == uri && self.method == method
    }
}

impl fmt::Display for MatchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.condition {
            Condition::Body(matcher) => write!(f, "{}|{}|{}", self.uri, self.method, matcher),
            Condition::Header { name, value } => {
                write!(f, "{}|{}|{}:{}", self.uri, self.method, name, value)
            }
            Condition::Any => write!(f, "{}|{}", self.uri, self.method),
        }
    }
}

/// Uppercase, trim, and strip colons and whitespace.
pub fn normalize_header_part(raw: &str) -> String {
    raw.trim()
        .to_uppercase()
        .chars()
        .filter(|c| *c != ':' && !c.is_whitespace())
        .collect()
}

/// A parsed `Key: Value` request header matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMatcher {
    /// Header name, trimmed.
    pub name: String,
    /// Expected header value, trimmed.
    pub value: String,
}

/// Why a header matcher could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HeaderMatcherError {
    #[error("requestHeader must be \"key: value\", found more than one ':' in '{0}'")]
    TooManyColons(String),
    #[error("requestHeader must be \"key: value\", found no ':' in '{0}'")]
    MissingColon(String),
    #[error("requestHeader '{0}' has an empty header name")]
    EmptyName(String),
    #[error("requestHeader '{0}' has an empty header value")]
    EmptyValue(String),
}

impl HeaderMatcher {
    pub fn parse(raw: &str) -> Result<Self, HeaderMatcherError> {
        let parts: Vec<&str> = raw.split(':').collect();
        match parts.as_slice() {
            [name, value] => {
                let name = name.trim();
                let value = value.trim();
                if name.is_empty() {
                    return Err(HeaderMatcherError::EmptyName(raw.to_string()));
                }
                if value.is_empty() {
                    return Err(HeaderMatcherError::EmptyValue(raw.to_string()));
                }
                Ok(Self {
                    name: name.to_string(),
                    value: value.to_string(),
                })
            }
            [_] => Err(HeaderMatcherError::MissingColon(raw.to_string())),
            _ => Err(HeaderMatcherError::TooManyColons(raw.to_string())),
        }
    }
}
