//! Document parsers for YAML and JSON asset files

pub mod json;
pub mod yaml;

use crate::diagnostics::{DocumentFormat, ValidationError, ValidationResult};
use crate::fs::FileSystem;
use std::path::Path;
use tracing::debug;

/// A parsed YAML or JSON document.
///
/// JSON is a subset of the YAML data model, so both formats load into the
/// same value type.
pub type Document = serde_yaml::Value;

/// Format implied by the file extension, if it is one we parse
pub fn format_for_path(file: &str) -> Option<DocumentFormat> {
    match Path::new(file).extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => Some(DocumentFormat::Yaml),
        Some("json") => Some(DocumentFormat::Json),
        _ => None,
    }
}

/// Parse `content` in the given format, attributing failures to `file`
pub fn parse_document(
    file: &str,
    format: DocumentFormat,
    content: &str,
) -> ValidationResult<Document> {
    let parsed = match format {
        DocumentFormat::Yaml => yaml::parse_yaml_document(content).map_err(|e| e.to_string()),
        DocumentFormat::Json => json::parse_json_document(content).map_err(|e| e.to_string()),
    };
    parsed.map_err(|message| ValidationError::Parse {
        file: file.to_string(),
        format,
        message,
    })
}

/// Read and parse a changed file. Files without a JSON extension are read
/// as YAML.
pub fn load_document(fs: &dyn FileSystem, file: &str) -> ValidationResult<Document> {
    let format = format_for_path(file).unwrap_or(DocumentFormat::Yaml);
    debug!(file, %format, "loading document");
    let content = fs.read_to_string(Path::new(file))?;
    parse_document(file, format, &content)
}
