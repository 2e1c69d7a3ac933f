//! Resolution: picking the response for an incoming request.
//!
//! Tiers are searched body → header → fallback and the first tier with an
//! eligible entry wins, whatever the registration order across tiers.
//! Within the body and header tiers several entries may be eligible at once;
//! the earliest registered one is returned.
//!
//! URI, method and body matching are case-insensitive: both the stored keys
//! and the incoming values are uppercased. Header values compare exactly
//! after trimming; header names follow HTTP and ignore case.

use std::sync::Arc;

use axum::http::HeaderMap;

use crate::index::key::{HeaderMatcher, MatchKey, Tier};
use crate::index::store::{MockEntry, ResponseIndex};

/// The parts of a request that take part in matching.
#[derive(Debug, Clone, Copy)]
pub struct IncomingRequest<'a> {
    pub method: &'a str,
    /// Path and query, as received.
    pub uri: &'a str,
    pub body: &'a [u8],
    pub headers: &'a HeaderMap,
}

/// A successful resolution.
#[derive(Debug, Clone)]
pub struct Resolved {
    /// Tier the response was found in.
    pub tier: Tier,
    pub entry: Arc<MockEntry>,
}

impl ResponseIndex {
    /// Find the response for a request, or `None` when nothing is mapped.
    pub fn resolve(&self, request: &IncomingRequest<'_>) -> Option<Resolved> {
        let uri = request.uri.to_uppercase();
        let method = request.method.to_uppercase();

        if self.len(Tier::Body) > 0 {
            let body = String::from_utf8_lossy(request.body).to_uppercase();
            let found = self.first_match(Tier::Body, |key, entry| {
                key.targets(&uri, &method)
                    && entry
                        .body_matcher
                        .as_deref()
                        .is_some_and(|matcher| body.contains(matcher))
            });
            if let Some(entry) = found {
                return Some(Resolved {
                    tier: Tier::Body,
                    entry,
                });
            }
        }

        let found = self.first_match(Tier::Header, |key, entry| {
            key.targets(&uri, &method)
                && entry
                    .header_matcher
                    .as_ref()
                    .is_some_and(|matcher| header_matches(request.headers, matcher))
        });
        if let Some(entry) = found {
            return Some(Resolved {
                tier: Tier::Header,
                entry,
            });
        }

        self.get(&MatchKey::fallback(&uri, &method))
            .map(|entry| Resolved {
                tier: Tier::Fallback,
                entry,
            })
    }
}

fn header_matches(headers: &HeaderMap, matcher: &HeaderMatcher) -> bool {
    headers
        .get(matcher.name.as_str())
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.trim() == matcher.value)
}
