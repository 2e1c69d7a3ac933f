//! Route matching logic.
//!
//! # Responsibilities
//! - Match request paths against route templates (`/helloworld/{name}`)
//! - Match request methods against the declared method set
//!
//! # Design Decisions
//! - A `{name}` segment matches exactly one non-empty path segment
//! - Literal segments are case-sensitive, methods are not
//! - No regex variables, templates are compiled to a segment list

use std::collections::BTreeSet;

use axum::http::Method;

/// A template could not be compiled.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("route '{0}' must start with '/'")]
    MissingLeadingSlash(String),
    #[error("route '{0}' uses a regex variable, only {{name}} variables are supported")]
    RegexVariable(String),
    #[error("route '{0}' has a variable that does not span a whole segment")]
    PartialVariable(String),
    #[error("route '{0}' has an unnamed variable")]
    EmptyVariable(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Variable,
}

/// A compiled path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

impl PathPattern {
    pub fn parse(template: &str) -> Result<Self, PatternError> {
        let rest = template
            .strip_prefix('/')
            .ok_or_else(|| PatternError::MissingLeadingSlash(template.to_string()))?;

        let segments = rest
            .split('/')
            .map(|segment| {
                match (segment.strip_prefix('{'), segment.ends_with('}')) {
                    (Some(inner), true) => {
                        let name = &inner[..inner.len() - 1];
                        if name.contains(':') {
                            Err(PatternError::RegexVariable(template.to_string()))
                        } else if name.trim().is_empty() {
                            Err(PatternError::EmptyVariable(template.to_string()))
                        } else {
                            Ok(Segment::Variable)
                        }
                    }
                    _ if segment.contains('{') || segment.contains('}') => {
                        Err(PatternError::PartialVariable(template.to_string()))
                    }
                    _ => Ok(Segment::Literal(segment.to_string())),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { segments })
    }

    /// Returns true if the request path matches this template.
    pub fn matches(&self, path: &str) -> bool {
        let Some(rest) = path.strip_prefix('/') else {
            return false;
        };
        let mut parts = rest.split('/');
        for segment in &self.segments {
            let Some(part) = parts.next() else {
                return false;
            };
            match segment {
                Segment::Literal(literal) if literal != part => return false,
                Segment::Variable if part.is_empty() => return false,
                _ => {}
            }
        }
        parts.next().is_none()
    }
}

/// The methods a route accepts, uppercased.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MethodSet(BTreeSet<String>);

impl MethodSet {
    pub fn new<I, S>(methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            methods
                .into_iter()
                .map(|m| m.as_ref().trim().to_uppercase())
                .collect(),
        )
    }

    pub fn contains(&self, method: &Method) -> bool {
        self.0.contains(&method.as_str().to_uppercase())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
