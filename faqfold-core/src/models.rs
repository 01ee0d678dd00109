use crate::text;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A repeater row: raw field values keyed by field name
pub type Row = HashMap<String, serde_json::Value>;

/// Canonical category term
/// Two terms with the same slug are the same term regardless of label casing
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Term {
    pub slug: String,
    pub label: String,
}

impl Term {
    /// Build a term from a human-readable label, deriving the slug
    /// A label that slugifies to nothing keeps the raw trimmed label as slug
    pub fn from_label(label: &str) -> Term {
        let label = text::clean_text(label);
        let slug = text::slugify(&label);
        let slug = if slug.is_empty() { label.clone() } else { slug };
        Term { slug, label }
    }

    /// Build a term from an explicit slug plus label, re-sanitizing the slug
    pub fn from_parts(slug: &str, label: &str) -> Term {
        let sanitized = text::slugify(slug);
        let slug = if sanitized.is_empty() {
            slug.trim().to_string()
        } else {
            sanitized
        };
        let label = text::clean_text(label);
        let label = if label.is_empty() { slug.clone() } else { label };
        Term { slug, label }
    }
}

/// A raw term reference as it arrives from field storage
/// Resolved into canonical terms once, at the normalizer boundary
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum TermRef {
    /// Numeric identifier resolvable against the taxonomy collaborator
    Id(i64),
    /// Term-like object exposing a slug and an optional display name
    Object {
        slug: String,
        #[serde(default)]
        name: Option<String>,
    },
    /// Free text, treated as slug and label at once
    Text(String),
}

/// One normalized, validated entry ready for rendering and structured data
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct DisplayItem {
    /// Question text for FAQ entries, review title (possibly empty) for reviews
    pub title: String,
    /// Paragraph-formatted markup for display
    pub body_html: String,
    /// Tag-stripped text for search indexing and structured data
    pub body_plain: String,
    /// Ordered, slug-deduplicated category terms
    pub terms: Vec<Term>,
    pub reviewer: Option<String>,
    pub reviewer_url: Option<String>,
    /// Clamped to [0, 5]; absent when the source field was not numeric
    pub rating: Option<f64>,
    pub external_id: Option<String>,
}

impl DisplayItem {
    /// Category slugs in term order
    pub fn term_slugs(&self) -> Vec<String> {
        self.terms.iter().map(|t| t.slug.clone()).collect()
    }
}

/// Include/exclude category slugs for one render
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

/// Field-name mapping for FAQ repeater rows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqFields {
    pub repeater: String,
    pub question: String,
    pub answer: String,
    pub categories: String,
}

impl Default for FaqFields {
    fn default() -> Self {
        FaqFields {
            repeater: "faq_items".to_string(),
            question: "question".to_string(),
            answer: "answer".to_string(),
            categories: "categories".to_string(),
        }
    }
}

/// Field-name mapping for review repeater rows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewFields {
    pub repeater: String,
    pub body: String,
    pub reviewer: String,
    pub title: String,
    pub reviewer_url: String,
    pub rating: String,
    pub external_id: String,
    pub categories: String,
}

impl Default for ReviewFields {
    fn default() -> Self {
        ReviewFields {
            repeater: "reviews".to_string(),
            body: "body".to_string(),
            reviewer: "reviewer_name".to_string(),
            title: "review_title".to_string(),
            reviewer_url: "reviewer_url".to_string(),
            rating: "rating".to_string(),
            external_id: "review_id".to_string(),
            categories: "categories".to_string(),
        }
    }
}

/// Which block shape a fragment renders as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Faq,
    Review,
}

impl BlockKind {
    pub fn base_class(&self) -> &'static str {
        match self {
            BlockKind::Faq => "faqfold-list",
            BlockKind::Review => "faqfold-reviews",
        }
    }

    pub fn anchor_prefix(&self) -> &'static str {
        match self {
            BlockKind::Faq => "faq-list",
            BlockKind::Review => "review-list",
        }
    }
}

/// What the reviewed thing is in Review structured data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReviewedKind {
    #[default]
    CreativeWork,
    Organization,
    LocalBusiness,
}

impl ReviewedKind {
    pub fn schema_type(&self) -> &'static str {
        match self {
            ReviewedKind::CreativeWork => "CreativeWork",
            ReviewedKind::Organization => "Organization",
            ReviewedKind::LocalBusiness => "LocalBusiness",
        }
    }
}

/// Page identity for the `itemReviewed` node of Review structured data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaContext {
    pub url: String,
    pub name: String,
    #[serde(default)]
    pub reviewed: ReviewedKind,
}

/// Per-render presentation configuration
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub kind: BlockKind,
    /// Collision-resistant identifier for this block instance
    pub block_id: String,
    /// Explicit anchor override; slugified before use
    pub anchor: Option<String>,
    pub extra_classes: Vec<String>,
    /// Editor preview mode: surfaces source notices invisible on the public path
    pub preview: bool,
    /// Label of the winning data source, for preview messaging
    pub source_label: Option<String>,
    /// Whether to embed the JSON-LD script; decided once by the caller
    pub emit_schema: bool,
    pub schema_ctx: Option<SchemaContext>,
}

impl RenderOptions {
    pub fn new(kind: BlockKind, block_id: &str) -> RenderOptions {
        RenderOptions {
            kind,
            block_id: block_id.to_string(),
            anchor: None,
            extra_classes: Vec::new(),
            preview: false,
            source_label: None,
            emit_schema: true,
            schema_ctx: None,
        }
    }

    /// Anchor identifier: slugified explicit override, else derived from the
    /// block identifier
    pub fn anchor_id(&self) -> String {
        if let Some(anchor) = &self.anchor {
            let slug = text::slugify(anchor);
            if !slug.is_empty() {
                return slug;
            }
        }
        let slug = text::slugify(&self.block_id);
        if slug.is_empty() {
            format!("{}-block", self.kind.anchor_prefix())
        } else {
            format!("{}-{}", self.kind.anchor_prefix(), slug)
        }
    }
}
