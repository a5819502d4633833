//! YAML parsing for asset, team, collection and manifest files

use super::Document;

/// Parse a single-document YAML file.
///
/// An empty file parses to a null document.
pub fn parse_yaml_document(content: &str) -> Result<Document, serde_yaml::Error> {
    serde_yaml::from_str(content)
}
