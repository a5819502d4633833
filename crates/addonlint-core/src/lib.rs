//! # addonlint-core
//!
//! Core validation engine for vendor-product template repositories.
//!
//! Given the list of files changed in a pull request, validates every
//! touched product directory under the templates root:
//! - Required files (README, manifest, team and collection metadata)
//! - Asset directory layout and file extensions
//! - Document shape of dashboards, monitors and notification policies
//! - Slug references between team, collection and assets

pub mod classify;
pub mod config;
pub mod diagnostics;
pub mod file_utils;
pub mod fs;
pub mod parsers;
pub mod rules;
pub mod schemas;

#[cfg(test)]
mod test_fixtures;

use serde::Serialize;
use std::collections::BTreeSet;
use tracing::info;

pub use classify::{classify, ProductGroup};
pub use config::ValidatorConfig;
pub use diagnostics::{ValidationError, ValidationResult};
pub use fs::{FileSystem, MockFileSystem, RealFileSystem};
pub use schemas::AssetKind;

use rules::{CrossFileValidator, DirectoryValidator};

/// Progress callbacks for a validation run.
///
/// All methods default to no-ops.
pub trait Reporter {
    /// Called once with the full changed-file list
    fn files_found(&mut self, _files: &[String]) {}

    fn product_started(&mut self, _group: &ProductGroup) {}

    fn product_passed(&mut self, _group: &ProductGroup, _asset_dirs: &BTreeSet<AssetKind>) {}
}

/// Reporter that discards all progress
#[derive(Debug, Default)]
pub struct SilentReporter;

impl Reporter for SilentReporter {}

/// Outcome for one product that passed validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductSummary {
    pub product: String,
    pub directory: String,
    pub asset_dirs: Vec<AssetKind>,
}

/// Result of a successful run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub files_changed: usize,
    pub products: Vec<ProductSummary>,
}

/// Split a changed-files listing into paths: one per line, surrounding
/// whitespace trimmed, blank lines skipped
pub fn parse_changed_files(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Run directory-level then cross-file validation for one product
pub fn validate_product(
    group: &ProductGroup,
    fs: &dyn FileSystem,
) -> ValidationResult<BTreeSet<AssetKind>> {
    let asset_dirs = DirectoryValidator.validate(group, fs)?;
    CrossFileValidator.validate(group, &asset_dirs, fs)?;
    Ok(asset_dirs)
}

/// Main entry point: validate every product touched by `changed_files`.
///
/// Products are validated in the order they first appear. The first failing
/// product aborts the run and its error is returned.
pub fn validate_changed_files(
    changed_files: &[String],
    fs: &dyn FileSystem,
    config: &ValidatorConfig,
    reporter: &mut dyn Reporter,
) -> ValidationResult<RunSummary> {
    reporter.files_found(changed_files);

    let groups = classify(changed_files, config.root());
    info!(
        files = changed_files.len(),
        products = groups.len(),
        "classified changed files"
    );

    let mut products = Vec::with_capacity(groups.len());
    for group in &groups {
        reporter.product_started(group);
        info!(product = group.product(), "validating");

        let asset_dirs = validate_product(group, fs)?;

        reporter.product_passed(group, &asset_dirs);
        products.push(ProductSummary {
            product: group.product().to_string(),
            directory: group.dir().to_string(),
            asset_dirs: asset_dirs.into_iter().collect(),
        });
    }

    Ok(RunSummary {
        files_changed: changed_files.len(),
        products,
    })
}
