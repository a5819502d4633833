//! JSON output format support.
//!
//! Machine-readable summary of a run for CI annotations.

use addonlint_core::{AssetKind, ProductGroup, Reporter, ValidationError};
use serde::Serialize;
use std::collections::BTreeSet;

/// Root structure for JSON output.
#[derive(Debug, Serialize)]
pub struct JsonOutput {
    /// Version of addonlint that produced this output.
    pub version: String,
    /// Number of paths in the changed-files list.
    pub files_changed: usize,
    /// Products in validation order, up to and including a failing one.
    pub products: Vec<JsonProduct>,
    /// The failure that aborted the run, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonError>,
}

#[derive(Debug, Serialize)]
pub struct JsonProduct {
    pub product: String,
    pub directory: String,
    /// "passed" or "failed"
    pub status: &'static str,
    pub asset_dirs: Vec<AssetKind>,
}

#[derive(Debug, Serialize)]
pub struct JsonError {
    pub code: String,
    pub product: Option<String>,
    pub message: String,
}

/// Reporter that accumulates progress into a [`JsonOutput`].
#[derive(Debug)]
pub struct JsonReporter {
    output: JsonOutput,
}

impl JsonReporter {
    pub fn new() -> Self {
        Self {
            output: JsonOutput {
                version: env!("CARGO_PKG_VERSION").to_string(),
                files_changed: 0,
                products: Vec::new(),
                error: None,
            },
        }
    }

    /// Finish the report, marking the in-flight product as failed if the
    /// run stopped with an error
    pub fn finish(mut self, error: Option<&ValidationError>) -> JsonOutput {
        if let Some(err) = error {
            let failed = self
                .output
                .products
                .last_mut()
                .filter(|p| p.status == "running");
            let product = failed.map(|p| {
                p.status = "failed";
                p.product.clone()
            });
            self.output.error = Some(JsonError {
                code: err.code().to_string(),
                product,
                message: err.to_string(),
            });
        }
        self.output
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for JsonReporter {
    fn files_found(&mut self, files: &[String]) {
        self.output.files_changed = files.len();
    }

    fn product_started(&mut self, group: &ProductGroup) {
        self.output.products.push(JsonProduct {
            product: group.product().to_string(),
            directory: group.dir().to_string(),
            status: "running",
            asset_dirs: Vec::new(),
        });
    }

    fn product_passed(&mut self, _group: &ProductGroup, asset_dirs: &BTreeSet<AssetKind>) {
        if let Some(current) = self.output.products.last_mut() {
            current.status = "passed";
            current.asset_dirs = asset_dirs.iter().copied().collect();
        }
    }
}
