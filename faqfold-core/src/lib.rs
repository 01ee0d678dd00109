// Public modules
pub mod collect;
pub mod document;
pub mod filtering;
pub mod io;
pub mod models;
pub mod render;
pub mod schema_org;
pub mod schema_validation;
pub mod sorting;
pub mod source;
pub mod terms;
pub mod text;

// Re-export commonly used types for convenience
pub use collect::{collect_faq_items, collect_review_items};
pub use document::{ContentDocument, EntityRows, PageInfo, SharedRows, TermEntry};
pub use filtering::{build_filter, has_filters, matches_filter};
pub use io::{load_document, save_document};
pub use models::{
    BlockKind, DisplayItem, FaqFields, FilterSpec, RenderOptions, ReviewFields, ReviewedKind, Row,
    SchemaContext, Term, TermRef,
};
pub use render::{category_union, render_block, render_no_rows, render_unavailable};
pub use schema_org::{
    append_graph_entry, faq_page, review_graph, script_tag, seo_faq_entry, seo_review_entries,
};
pub use schema_validation::{document_schema, validate_against_schema, validate_document};
pub use sorting::{natural_cmp, normalize_for_sorting, sort_terms};
pub use source::{resolve_source, ResolvedSource, RowSource, SourceId};
pub use terms::{normalize_slugs, normalize_terms, term_refs_from_value, NoTerms, TermResolver};
