//! JSON parsing for processor files and embedded dashboard bodies

use super::Document;

/// Parse a JSON file into a document.
///
/// Goes through `serde_json::Value` first: JSON objects may repeat a key
/// (the last one wins) while YAML mappings may not.
pub fn parse_json_document(content: &str) -> Result<Document, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    serde_yaml::to_value(value).map_err(<serde_json::Error as serde::de::Error>::custom)
}

/// Check that a string holds syntactically valid JSON.
///
/// The parsed value is discarded; dashboard bodies are not inspected beyond
/// syntax.
pub fn check_json_syntax(content: &str) -> Result<(), serde_json::Error> {
    serde_json::from_str::<serde_json::Value>(content).map(|_| ())
}
