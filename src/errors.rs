use std::path::Path;

/// Map document loading errors to user-friendly messages
/// Returns (title, message, details)
pub fn map_load_error(error: &dyn std::error::Error, path: &Path) -> (String, String, String) {
    let error_string = error.to_string();

    if error_string.contains("Validation failed") {
        (
            "Validation Error".to_string(),
            "The content document has validation errors.".to_string(),
            error_string,
        )
    } else if error_string.contains("No such file") {
        (
            "File Not Found".to_string(),
            "The file could not be found.".to_string(),
            format!(
                "Path: {}\n\nPlease verify the file exists and you have permission to read it.",
                path.display()
            ),
        )
    } else if error_string.contains("Permission denied") {
        (
            "Permission Denied".to_string(),
            "Permission denied.".to_string(),
            format!(
                "You don't have permission to read this file:\n{}",
                path.display()
            ),
        )
    } else if error_string.contains("expected") || error_string.contains("EOF") {
        (
            "Invalid JSON".to_string(),
            "The file is not a valid JSON document.".to_string(),
            error_string,
        )
    } else {
        (
            "Error Loading File".to_string(),
            "Failed to load content document.".to_string(),
            error_string,
        )
    }
}
