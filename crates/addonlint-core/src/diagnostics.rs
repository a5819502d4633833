//! Validation errors and result types

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Format of a parsed document, derived from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Yaml => write!(f, "YAML"),
            DocumentFormat::Json => write!(f, "JSON"),
        }
    }
}

/// Validation failures.
///
/// Every variant carries enough context (file, key path, expected vs. found)
/// to be actionable on its own when printed.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Refusing to read symlink: {path}")]
    FileSymlink { path: PathBuf },

    #[error("Not a regular file: {path}")]
    FileNotRegular { path: PathBuf },

    #[error("File too large: {path} ({size} bytes exceeds limit of {limit} bytes)")]
    FileTooBig { path: PathBuf, size: u64, limit: u64 },

    #[error("Error parsing {format} file: {file} - {message}")]
    Parse {
        file: String,
        format: DocumentFormat,
        message: String,
    },

    #[error("Missing required file {path}: {reason}")]
    MissingFile { path: String, reason: String },

    #[error("Missing required key '{key_path}' in {file}")]
    MissingKey { file: String, key_path: String },

    #[error("Key '{key_path}' in {file} must be {expected}, found {found}")]
    WrongType {
        file: String,
        key_path: String,
        expected: String,
        found: String,
    },

    #[error("Key '{key_path}' in {file} must equal {expected}, found {found}")]
    ValueMismatch {
        file: String,
        key_path: String,
        expected: String,
        found: String,
    },

    #[error("Key '{key_path}' in {file} is not valid JSON: {message}")]
    InvalidEmbeddedJson {
        file: String,
        key_path: String,
        message: String,
    },

    #[error("{product_dir}: '{present}/' requires '{required}/' to be present in the same change")]
    DependencyViolation {
        product_dir: String,
        present: String,
        required: String,
    },

    #[error("Invalid file extension for {kind}: {file} (expected {expected})")]
    InvalidExtension {
        file: String,
        kind: String,
        expected: String,
    },

    #[error("Slug mismatch in {file}: '{field}' is '{found}', expected '{expected}'")]
    SlugMismatch {
        file: String,
        field: String,
        found: String,
        expected: String,
    },

    #[error("{product_dir} must contain at least one asset directory ({expected})")]
    NoAssetDirectory {
        product_dir: String,
        expected: String,
    },

    #[error("{}", render_asset_requirements(.product_dir, .missing, .invalid))]
    AssetRequirements {
        product_dir: String,
        missing: Vec<String>,
        invalid: Vec<ValidationError>,
    },
}

impl ValidationError {
    /// Stable identifier for the failure category, used in machine-readable output
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::FileRead { .. }
            | ValidationError::FileSymlink { .. }
            | ValidationError::FileNotRegular { .. }
            | ValidationError::FileTooBig { .. } => "file-read",
            ValidationError::Parse { .. } => "parse-error",
            ValidationError::MissingFile { .. } => "missing-file",
            ValidationError::MissingKey { .. } => "missing-key",
            ValidationError::WrongType { .. } => "wrong-type",
            ValidationError::ValueMismatch { .. } => "value-mismatch",
            ValidationError::InvalidEmbeddedJson { .. } => "invalid-embedded-json",
            ValidationError::DependencyViolation { .. } => "dependency-violation",
            ValidationError::InvalidExtension { .. } => "invalid-extension",
            ValidationError::SlugMismatch { .. } => "slug-mismatch",
            ValidationError::NoAssetDirectory { .. } => "no-asset-directory",
            ValidationError::AssetRequirements { .. } => "asset-requirements",
        }
    }
}

fn render_asset_requirements(
    product_dir: &str,
    missing: &[String],
    invalid: &[ValidationError],
) -> String {
    let mut out = format!("{} failed asset directory requirements", product_dir);
    if !missing.is_empty() {
        out.push_str("\nMissing assets:");
        for message in missing {
            out.push_str("\n  - ");
            out.push_str(message);
        }
    }
    if !invalid.is_empty() {
        out.push_str("\nInvalid files:");
        for error in invalid {
            out.push_str("\n  - ");
            out.push_str(&error.to_string());
        }
    }
    out
}
