use crate::models::Row;
use tracing::info;

/// Identifies where a repeater's rows are attached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceId {
    /// The current content entity
    Entity(u64),
    /// The global shared settings record
    Shared,
}

/// The field-storage collaborator, abstracted for injection
pub trait RowSource {
    /// Ordered rows for a repeater at the given attachment point
    /// Empty when the repeater has no rows there
    fn rows(&self, repeater: &str, source: SourceId) -> Vec<Row>;
}

/// The winning data source for one render
#[derive(Debug, Clone)]
pub struct ResolvedSource {
    pub id: SourceId,
    pub rows: Vec<Row>,
}

impl ResolvedSource {
    /// Human label for preview messaging
    pub fn label(&self) -> &'static str {
        match self.id {
            SourceId::Entity(_) => "this entry",
            SourceId::Shared => "shared settings",
        }
    }
}

/// Choose the data source for a render
/// Fixed priority: entity-scoped rows win over the shared fallback; the first
/// source with at least one row is used. This order is deliberately not
/// configurable; preview messaging depends on knowing which branch fired.
pub fn resolve_source(
    source: &dyn RowSource,
    repeater: &str,
    entity: u64,
) -> Option<ResolvedSource> {
    let entity_rows = source.rows(repeater, SourceId::Entity(entity));
    if !entity_rows.is_empty() {
        info!(repeater, entity, rows = entity_rows.len(), "using entity rows");
        return Some(ResolvedSource {
            id: SourceId::Entity(entity),
            rows: entity_rows,
        });
    }

    let shared_rows = source.rows(repeater, SourceId::Shared);
    if !shared_rows.is_empty() {
        info!(repeater, rows = shared_rows.len(), "falling back to shared settings rows");
        return Some(ResolvedSource {
            id: SourceId::Shared,
            rows: shared_rows,
        });
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    struct FakeRows {
        entity: Vec<Row>,
        shared: Vec<Row>,
    }

    impl RowSource for FakeRows {
        fn rows(&self, _repeater: &str, source: SourceId) -> Vec<Row> {
            match source {
                SourceId::Entity(_) => self.entity.clone(),
                SourceId::Shared => self.shared.clone(),
            }
        }
    }

    fn row(question: &str) -> Row {
        let mut row = HashMap::new();
        row.insert("question".to_string(), json!(question));
        row
    }

    #[test]
    fn test_entity_rows_win() {
        let source = FakeRows {
            entity: vec![row("a")],
            shared: vec![row("b"), row("c")],
        };
        let resolved = resolve_source(&source, "faq_items", 7).unwrap();
        assert_eq!(resolved.id, SourceId::Entity(7));
        assert_eq!(resolved.rows.len(), 1);
        assert_eq!(resolved.label(), "this entry");
    }

    #[test]
    fn test_shared_fallback() {
        let source = FakeRows {
            entity: Vec::new(),
            shared: vec![row("a"), row("b"), row("c")],
        };
        let resolved = resolve_source(&source, "faq_items", 7).unwrap();
        assert_eq!(resolved.id, SourceId::Shared);
        assert_eq!(resolved.rows.len(), 3);
        assert_eq!(resolved.label(), "shared settings");
    }

    #[test]
    fn test_no_rows_anywhere() {
        let source = FakeRows {
            entity: Vec::new(),
            shared: Vec::new(),
        };
        assert!(resolve_source(&source, "faq_items", 7).is_none());
    }
}
