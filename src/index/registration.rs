//! Registration: turning route definitions into index entries.
//!
//! A candidate with a body matcher goes to the body tier, one with a header
//! matcher to the header tier (both if it declares both), and one with
//! neither to the fallback tier. Every candidate of a route is compiled
//! before anything is inserted, so a rejected route leaves the index as it
//! was.

use std::sync::Arc;

use crate::config::schema::{ResponseCandidate, RouteDefinition};
use crate::index::key::{HeaderMatcher, HeaderMatcherError, MatchKey};
use crate::index::store::{MockEntry, ResponseIndex};

/// A candidate could not be turned into index entries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("route '{route}', response #{position}: {source}")]
pub struct RegistrationError {
    pub route: String,
    /// Zero-based position of the candidate within the route.
    pub position: usize,
    #[source]
    pub source: HeaderMatcherError,
}

/// Parse a candidate's matchers and compute the keys it is indexed under.
pub fn compile(
    candidate: &ResponseCandidate,
) -> Result<(Arc<MockEntry>, Vec<MatchKey>), HeaderMatcherError> {
    let uri = candidate.uri.as_str();
    let method = candidate.method.as_str();

    let header_matcher = candidate
        .header_matcher()
        .map(HeaderMatcher::parse)
        .transpose()?;
    let body_matcher = candidate.body_matcher().map(str::to_uppercase);

    let mut keys = Vec::with_capacity(2);
    if let Some(matcher) = candidate.body_matcher() {
        keys.push(MatchKey::body(uri, method, matcher));
    }
    if let Some(matcher) = &header_matcher {
        keys.push(MatchKey::header(uri, method, matcher));
    }
    if keys.is_empty() {
        keys.push(MatchKey::fallback(uri, method));
    }

    let entry = Arc::new(MockEntry {
        candidate: candidate.clone(),
        body_matcher,
        header_matcher,
    });
    Ok((entry, keys))
}

impl ResponseIndex {
    /// Index every candidate of a route. Returns the keys written, in order.
    pub fn register(&self, route: &RouteDefinition) -> Result<Vec<MatchKey>, RegistrationError> {
        let compiled = route
            .responses
            .iter()
            .enumerate()
            .map(|(position, candidate)| {
                compile(candidate).map_err(|source| RegistrationError {
                    route: route.route.clone(),
                    position,
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut written = Vec::new();
        for (entry, keys) in compiled {
            for key in keys {
                tracing::info!(
                    key = %key,
                    tier = %key.tier(),
                    status = entry.candidate.status_code,
                    "Registered response"
                );
                if self.put(key.clone(), entry.clone()).is_some() {
                    tracing::warn!(key = %key, "Replaced previously registered response");
                }
                written.push(key);
            }
        }
        Ok(written)
    }
}
