use crate::models::{Term, TermRef};
use serde_json::Value;
use std::collections::HashSet;
use tracing::debug;

/// Resolves numeric term identifiers against the taxonomy collaborator
pub trait TermResolver {
    /// `None` means the term does not exist (e.g. deleted); never an error
    fn resolve_term(&self, id: i64) -> Option<Term>;
}

/// Resolver for hosts without a taxonomy: every numeric reference drops
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTerms;

impl TermResolver for NoTerms {
    fn resolve_term(&self, _id: i64) -> Option<Term> {
        None
    }
}

/// Read raw term references out of a field value
/// Accepts a single reference or an arbitrarily nested array of references;
/// anything unrecognized degrades to no reference
pub fn term_refs_from_value(value: &Value) -> Vec<TermRef> {
    let mut refs = Vec::new();
    push_refs(value, &mut refs);
    refs
}

fn push_refs(value: &Value, refs: &mut Vec<TermRef>) {
    match value {
        Value::Array(entries) => {
            for entry in entries {
                push_refs(entry, refs);
            }
        }
        Value::Number(n) => {
            if let Some(id) = n.as_i64() {
                refs.push(TermRef::Id(id));
            }
        }
        Value::String(s) => {
            if !s.trim().is_empty() {
                refs.push(TermRef::Text(s.clone()));
            }
        }
        Value::Object(map) => {
            if let Some(slug) = map.get("slug").and_then(Value::as_str) {
                refs.push(TermRef::Object {
                    slug: slug.to_string(),
                    name: map.get("name").and_then(Value::as_str).map(String::from),
                });
            }
        }
        _ => {}
    }
}

/// Normalize raw references into canonical terms
/// De-duplicates by slug, preserving first-seen order and first-seen labels;
/// unresolvable numeric identifiers are dropped silently
pub fn normalize_terms(refs: &[TermRef], resolver: &dyn TermResolver) -> Vec<Term> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for term_ref in refs {
        let term = match term_ref {
            TermRef::Id(id) => match resolver.resolve_term(*id) {
                Some(term) => term,
                None => {
                    debug!(id, "dropping unresolvable term reference");
                    continue;
                }
            },
            TermRef::Object { slug, name } => {
                Term::from_parts(slug, name.as_deref().unwrap_or(slug))
            }
            TermRef::Text(s) => Term::from_label(s),
        };

        if term.slug.is_empty() {
            continue;
        }
        if seen.insert(term.slug.clone()) {
            out.push(term);
        }
    }

    out
}

/// Normalized slugs for a reference list, de-duplicated in first-seen order
pub fn normalize_slugs(refs: &[TermRef], resolver: &dyn TermResolver) -> Vec<String> {
    normalize_terms(refs, resolver)
        .into_iter()
        .map(|t| t.slug)
        .collect()
}
