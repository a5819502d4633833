//! Cross-file slug consistency
//!
//! Within one product, the collection must belong to the product's team,
//! dashboards and monitors must belong to the collection, and notification
//! policies must belong to the team.

use crate::classify::{Companion, ProductGroup};
use crate::diagnostics::{ValidationError, ValidationResult};
use crate::fs::FileSystem;
use crate::parsers::{self, Document};
use crate::rules::directory::locate_companion;
use crate::schemas::shape::type_name;
use crate::schemas::AssetKind;
use std::collections::BTreeSet;
use tracing::debug;

pub struct CrossFileValidator;

impl CrossFileValidator {
    /// Check slug references. A no-op unless a platform asset directory is
    /// touched.
    pub fn validate(
        &self,
        group: &ProductGroup,
        asset_dirs: &BTreeSet<AssetKind>,
        fs: &dyn FileSystem,
    ) -> ValidationResult<()> {
        if !asset_dirs.iter().any(AssetKind::is_platform) {
            return Ok(());
        }

        let team_file = locate_companion(group, Companion::Team)?;
        let team_slug = spec_string(&parsers::load_document(fs, team_file)?, "slug", team_file)?;

        let collection_file = locate_companion(group, Companion::Collection)?;
        let collection = parsers::load_document(fs, collection_file)?;
        expect_slug(&collection, "team_slug", &team_slug, collection_file)?;
        let collection_slug = spec_string(&collection, "slug", collection_file)?;
        debug!(product = group.product(), %team_slug, %collection_slug, "resolved owner slugs");

        for kind in [AssetKind::Dashboards, AssetKind::Monitors] {
            for file in yaml_files(group, kind) {
                let doc = parsers::load_document(fs, file)?;
                expect_slug(&doc, "collection_slug", &collection_slug, file)?;
            }
        }

        for file in yaml_files(group, AssetKind::NotificationPolicies) {
            let doc = parsers::load_document(fs, file)?;
            expect_slug(&doc, "team_slug", &team_slug, file)?;
        }

        Ok(())
    }
}

fn yaml_files(group: &ProductGroup, kind: AssetKind) -> impl Iterator<Item = &str> {
    group.files_under(kind).filter(move |file| kind.accepts(file))
}

/// String value of `spec.<field>`
fn spec_string(doc: &Document, field: &str, file: &str) -> ValidationResult<String> {
    let key_path = format!("spec.{}", field);
    match doc.get("spec").and_then(|spec| spec.get(field)) {
        Some(Document::String(value)) => Ok(value.clone()),
        Some(other) => Err(ValidationError::WrongType {
            file: file.to_string(),
            key_path,
            expected: "string".to_string(),
            found: type_name(other).to_string(),
        }),
        None => Err(ValidationError::MissingKey {
            file: file.to_string(),
            key_path,
        }),
    }
}

fn expect_slug(doc: &Document, field: &str, expected: &str, file: &str) -> ValidationResult<()> {
    let found = spec_string(doc, field, file)?;
    if found == expected {
        return Ok(());
    }
    Err(ValidationError::SlugMismatch {
        file: file.to_string(),
        field: format!("spec.{}", field),
        found,
        expected: expected.to_string(),
    })
}
