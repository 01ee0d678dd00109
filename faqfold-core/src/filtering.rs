use crate::models::{FilterSpec, TermRef};
use crate::terms::{self, TermResolver};

/// Build the filter spec for one render from block-level reference lists
/// The page-level fallback include list applies only when both block-level
/// lists are empty
pub fn build_filter(
    include: &[TermRef],
    exclude: &[TermRef],
    page_fallback: &[TermRef],
    resolver: &dyn TermResolver,
) -> FilterSpec {
    let (include, exclude) = if include.is_empty() && exclude.is_empty() {
        (page_fallback, &[][..])
    } else {
        (include, exclude)
    };

    FilterSpec {
        include: terms::normalize_slugs(include, resolver),
        exclude: terms::normalize_slugs(exclude, resolver),
    }
}

/// Check if the spec constrains anything
pub fn has_filters(spec: &FilterSpec) -> bool {
    !spec.include.is_empty() || !spec.exclude.is_empty()
}

/// Decide whether an item with the given category slugs passes the filter
/// Include is match-any when non-empty; exclude rejects on any match and
/// dominates when both would apply
pub fn matches_filter(item_slugs: &[String], spec: &FilterSpec) -> bool {
    if !spec.include.is_empty() && !item_slugs.iter().any(|s| spec.include.contains(s)) {
        return false;
    }
    if !spec.exclude.is_empty() && item_slugs.iter().any(|s| spec.exclude.contains(s)) {
        return false;
    }
    true
}
