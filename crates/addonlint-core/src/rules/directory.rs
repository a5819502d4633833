//! Directory-level validation for one product
//!
//! Checks run in a fixed order and stop at the first failure, except the
//! per-asset-directory requirements which collect every missing or invalid
//! file across all asset kinds before failing once.

use crate::classify::{Companion, ProductGroup};
use crate::diagnostics::{ValidationError, ValidationResult};
use crate::fs::FileSystem;
use crate::parsers::{self, json::check_json_syntax, Document};
use crate::rules::structure;
use crate::schemas::shape::type_name;
use crate::schemas::{manifest_docs_shape, manifest_shape, AssetKind, ExpectedShape, SchemaKind};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::debug;

/// Key path of the embedded dashboard body
pub const DASHBOARD_JSON_PATH: &str = "spec.dashboard_json";

pub struct DirectoryValidator;

impl DirectoryValidator {
    /// Validate the directory layout and per-file shapes of one product.
    ///
    /// Returns the asset directories the change touches.
    pub fn validate(
        &self,
        group: &ProductGroup,
        fs: &dyn FileSystem,
    ) -> ValidationResult<BTreeSet<AssetKind>> {
        let product = group.product();

        Self::check_parseable(group, fs)?;
        debug!(product, "all documents parse");

        Self::check_readme(group)?;
        Self::check_manifest(group, fs)?;
        debug!(product, "README and manifest present");

        let asset_dirs = group.existing_asset_dirs();
        Self::check_has_asset_dir(group, &asset_dirs)?;
        Self::check_dependencies(group, &asset_dirs)?;
        Self::check_asset_requirements(group, &asset_dirs, fs)?;
        debug!(product, ?asset_dirs, "asset directories valid");

        if asset_dirs.iter().any(AssetKind::is_platform) {
            Self::check_platform_companions(group, fs)?;
            debug!(product, "team and collection valid");
        }

        Ok(asset_dirs)
    }

    /// Every touched YAML/JSON file must parse
    fn check_parseable(group: &ProductGroup, fs: &dyn FileSystem) -> ValidationResult<()> {
        for file in group.files() {
            if let Some(format) = parsers::format_for_path(file) {
                let content = fs.read_to_string(Path::new(file))?;
                parsers::parse_document(file, format, &content)?;
            }
        }
        Ok(())
    }

    fn check_readme(group: &ProductGroup) -> ValidationResult<()> {
        let readme = group.path_of("README.md");
        if group.files().iter().any(|f| *f == readme) {
            return Ok(());
        }
        Err(ValidationError::MissingFile {
            path: readme,
            reason: format!("every change to {} must include its README.md", group.dir()),
        })
    }

    fn check_manifest(group: &ProductGroup, fs: &dyn FileSystem) -> ValidationResult<()> {
        let manifests = group.manifest_files();
        let file = match manifests.as_slice() {
            [single] => *single,
            _ => {
                return Err(ValidationError::MissingFile {
                    path: group.path_of("manifest.(yml|yaml)"),
                    reason: format!("expected exactly one manifest, found {}", manifests.len()),
                })
            }
        };

        let doc = parsers::load_document(fs, file)?;
        structure::check(
            &doc,
            &ExpectedShape::new().present(&["tech_type", "asset_list"]),
            file,
        )?;
        if has_key(&doc, "data_source_and_docs") {
            structure::check(&doc, &manifest_docs_shape(), file)?;
        }
        structure::check(&doc, &manifest_shape(), file)
    }

    fn check_has_asset_dir(
        group: &ProductGroup,
        asset_dirs: &BTreeSet<AssetKind>,
    ) -> ValidationResult<()> {
        if asset_dirs.is_empty() {
            return Err(ValidationError::NoAssetDirectory {
                product_dir: group.dir().to_string(),
                expected: AssetKind::all_dir_names(),
            });
        }
        Ok(())
    }

    /// Monitors and notification policies ship together
    fn check_dependencies(
        group: &ProductGroup,
        asset_dirs: &BTreeSet<AssetKind>,
    ) -> ValidationResult<()> {
        let monitors = asset_dirs.contains(&AssetKind::Monitors);
        let policies = asset_dirs.contains(&AssetKind::NotificationPolicies);
        let (present, required) = match (monitors, policies) {
            (true, false) => (AssetKind::Monitors, AssetKind::NotificationPolicies),
            (false, true) => (AssetKind::NotificationPolicies, AssetKind::Monitors),
            _ => return Ok(()),
        };
        Err(ValidationError::DependencyViolation {
            product_dir: group.dir().to_string(),
            present: present.dir_name().to_string(),
            required: required.dir_name().to_string(),
        })
    }

    fn check_asset_requirements(
        group: &ProductGroup,
        asset_dirs: &BTreeSet<AssetKind>,
        fs: &dyn FileSystem,
    ) -> ValidationResult<()> {
        let mut missing = Vec::new();
        let mut invalid = Vec::new();

        for &kind in asset_dirs {
            let (accepted, rejected): (Vec<&str>, Vec<&str>) =
                group.files_under(kind).partition(|file| kind.accepts(file));

            if accepted.is_empty() {
                missing.push(format!(
                    "{}/{}/ must contain at least one {} file",
                    group.dir(),
                    kind,
                    kind.extensions_label()
                ));
            }

            invalid.extend(rejected.into_iter().map(|file| ValidationError::InvalidExtension {
                file: file.to_string(),
                kind: kind.dir_name().to_string(),
                expected: kind.extensions_label(),
            }));

            if let Some(schema) = kind.schema() {
                invalid.extend(
                    accepted
                        .into_iter()
                        .filter_map(|file| Self::check_asset_file(file, schema, fs).err()),
                );
            }
        }

        if missing.is_empty() && invalid.is_empty() {
            return Ok(());
        }
        Err(ValidationError::AssetRequirements {
            product_dir: group.dir().to_string(),
            missing,
            invalid,
        })
    }

    fn check_asset_file(
        file: &str,
        schema: SchemaKind,
        fs: &dyn FileSystem,
    ) -> ValidationResult<()> {
        let doc = parsers::load_document(fs, file)?;
        structure::check(&doc, &schema.expected_shape(), file)?;
        if schema == SchemaKind::Dashboard {
            check_dashboard_json(&doc, file)?;
        }
        Ok(())
    }

    /// Platform assets need exactly one team and one collection file, each
    /// matching its schema
    fn check_platform_companions(group: &ProductGroup, fs: &dyn FileSystem) -> ValidationResult<()> {
        for companion in [Companion::Collection, Companion::Team] {
            let file = locate_companion(group, companion)?;
            let doc = parsers::load_document(fs, file)?;
            structure::check(&doc, &companion.schema().expected_shape(), file)?;
        }
        Ok(())
    }
}

/// The single team or collection file of a product
pub fn locate_companion(group: &ProductGroup, companion: Companion) -> ValidationResult<&str> {
    let files = group.companion_files(companion);
    match files.as_slice() {
        [single] => Ok(*single),
        _ => Err(ValidationError::MissingFile {
            path: group.path_of(&format!("*{}.(yml|yaml)", companion.stem_suffix())),
            reason: format!(
                "platform assets require exactly one {} file, found {}",
                companion.stem_suffix(),
                files.len()
            ),
        }),
    }
}

/// `spec.dashboard_json` is either an inline mapping or a string holding JSON
pub fn check_dashboard_json(doc: &Document, file: &str) -> ValidationResult<()> {
    let invalid = |message: String| ValidationError::InvalidEmbeddedJson {
        file: file.to_string(),
        key_path: DASHBOARD_JSON_PATH.to_string(),
        message,
    };
    match &doc["spec"]["dashboard_json"] {
        Document::Mapping(_) => Ok(()),
        Document::String(body) => check_json_syntax(body).map_err(|e| invalid(e.to_string())),
        other => Err(invalid(format!(
            "expected a dictionary or a JSON string, found {}",
            type_name(other)
        ))),
    }
}

fn has_key(doc: &Document, key: &str) -> bool {
    doc.as_mapping().is_some_and(|m| m.contains_key(key))
}
