use crate::document::ContentDocument;
use serde_json::{json, Value};

/// JSON Schema for content documents
pub fn document_schema() -> Value {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": "faqfold content document",
        "type": "object",
        "required": ["kind"],
        "properties": {
            "kind": {"type": "string", "enum": ["faq", "review"]},
            "repeater": {"type": "string", "minLength": 1},
            "page": {
                "type": "object",
                "required": ["url", "title"],
                "properties": {
                    "url": {"type": "string", "minLength": 1},
                    "title": {"type": "string"},
                    "reviewed": {
                        "type": "string",
                        "enum": ["creative_work", "organization", "local_business"]
                    }
                }
            },
            "terms": {
                "type": "object",
                "additionalProperties": {
                    "type": "object",
                    "required": ["slug", "name"],
                    "properties": {
                        "slug": {"type": "string"},
                        "name": {"type": "string"}
                    }
                }
            },
            "entity": {
                "type": "object",
                "required": ["id"],
                "properties": {
                    "id": {"type": "integer", "minimum": 0},
                    "rows": {"type": "array", "items": {"type": "object"}}
                }
            },
            "shared": {
                "type": "object",
                "properties": {
                    "rows": {"type": "array", "items": {"type": "object"}}
                }
            },
            "include_categories": {"type": "array"},
            "exclude_categories": {"type": "array"},
            "page_categories": {"type": "array"},
            "seo_plugin_active": {"type": "boolean"}
        }
    })
}

/// Validate raw document JSON against the embedded schema
/// Returns Ok(()) if valid, Err with a list of validation errors if invalid
pub fn validate_against_schema(data: &Value) -> Result<(), Vec<String>> {
    let schema = document_schema();
    let compiled = jsonschema::validator_for(&schema)
        .map_err(|e| vec![format!("Schema compilation error: {}", e)])?;

    match compiled.validate(data) {
        Ok(()) => Ok(()),
        Err(error) => {
            let path_str = error.instance_path.to_string();
            let location = if path_str.is_empty() {
                "root".to_string()
            } else {
                path_str
            };
            Err(vec![format!("{} at {}", error, location)])
        }
    }
}

/// Semantic checks the JSON Schema cannot express
pub fn validate_document(doc: &ContentDocument) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for key in doc.terms.keys() {
        if key.parse::<i64>().is_err() {
            errors.push(format!(
                "Term table key '{}' is not a numeric identifier",
                key
            ));
        }
    }

    if let Some(entity) = &doc.entity {
        if entity.id == 0 && !entity.rows.is_empty() {
            errors.push("Entity rows require a non-zero entity id".to_string());
        }
    }

    if let Some(repeater) = &doc.repeater {
        if repeater.trim().is_empty() {
            errors.push("Repeater name cannot be blank".to_string());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
