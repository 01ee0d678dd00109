use crate::models::{BlockKind, FaqFields, ReviewFields, Row, SchemaContext, Term, TermRef};
use crate::source::{RowSource, SourceId};
use crate::terms::TermResolver;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A self-contained content document: repeater rows, term table, and filter
/// configuration for one render
/// Plays the part of the host's field storage and taxonomy for the CLI and
/// for tests
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ContentDocument {
    pub kind: BlockKind,
    /// Repeater name override; defaults per kind
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeater: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<PageInfo>,
    /// Taxonomy table: numeric term id (as a string key) to term
    #[serde(default)]
    pub terms: HashMap<String, TermEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<EntityRows>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared: Option<SharedRows>,
    #[serde(default)]
    pub include_categories: Vec<TermRef>,
    #[serde(default)]
    pub exclude_categories: Vec<TermRef>,
    /// Page-level fallback include list
    #[serde(default)]
    pub page_categories: Vec<TermRef>,
    /// A competing SEO integration owns structured data for this page
    #[serde(default)]
    pub seo_plugin_active: bool,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PageInfo {
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub reviewed: crate::models::ReviewedKind,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TermEntry {
    pub slug: String,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EntityRows {
    pub id: u64,
    #[serde(default)]
    pub rows: Vec<Row>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SharedRows {
    #[serde(default)]
    pub rows: Vec<Row>,
}

impl ContentDocument {
    /// The repeater this document feeds
    pub fn repeater_name(&self) -> String {
        match &self.repeater {
            Some(name) => name.clone(),
            None => match self.kind {
                BlockKind::Faq => FaqFields::default().repeater,
                BlockKind::Review => ReviewFields::default().repeater,
            },
        }
    }

    /// Identifier of the current entity; 0 when the document has none
    pub fn entity_id(&self) -> u64 {
        self.entity.as_ref().map(|e| e.id).unwrap_or(0)
    }

    /// Schema context for Review structured data, when page identity is known
    pub fn schema_context(&self) -> Option<SchemaContext> {
        self.page.as_ref().map(|p| SchemaContext {
            url: p.url.clone(),
            name: p.title.clone(),
            reviewed: p.reviewed,
        })
    }
}

impl RowSource for ContentDocument {
    fn rows(&self, repeater: &str, source: SourceId) -> Vec<Row> {
        if repeater != self.repeater_name() {
            return Vec::new();
        }
        match source {
            SourceId::Entity(id) => match &self.entity {
                Some(entity) if entity.id == id => entity.rows.clone(),
                _ => Vec::new(),
            },
            SourceId::Shared => self
                .shared
                .as_ref()
                .map(|s| s.rows.clone())
                .unwrap_or_default(),
        }
    }
}

impl TermResolver for ContentDocument {
    fn resolve_term(&self, id: i64) -> Option<Term> {
        self.terms
            .get(&id.to_string())
            .map(|entry| Term::from_parts(&entry.slug, &entry.name))
    }
}
