use crate::document::ContentDocument;
use crate::schema_validation::{validate_against_schema, validate_document};
use std::error::Error;
use std::fs;
use std::path::Path;

/// Load a content document from a JSON file, validating it against the
/// embedded schema and the semantic checks
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<ContentDocument, Box<dyn Error>> {
    let contents = fs::read_to_string(path)?;
    let raw: serde_json::Value = serde_json::from_str(&contents)?;

    if let Err(errors) = validate_against_schema(&raw) {
        return Err(format!("Validation failed: {}", errors.join("; ")).into());
    }

    let document: ContentDocument = serde_json::from_value(raw)?;

    if let Err(errors) = validate_document(&document) {
        return Err(format!("Validation failed: {}", errors.join("; ")).into());
    }

    Ok(document)
}

/// Save a content document to a JSON file with pretty printing
pub fn save_document<P: AsRef<Path>>(
    document: &ContentDocument,
    path: P,
) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(document)?;
    fs::write(path, json)?;
    Ok(())
}
