//! Grouping of changed files by vendor product
//!
//! Paths look like `<root>/<product>/...`. Anything outside the root, or too
//! shallow to name a product and a file, is not ours to validate and is
//! dropped silently.

use crate::schemas::{AssetKind, SchemaKind};
use std::collections::{BTreeSet, HashMap, HashSet};

/// Changed files belonging to one product directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductGroup {
    product: String,
    /// `<root>/<product>/`
    prefix: String,
    files: Vec<String>,
}

/// Companion metadata files living directly in the product directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Companion {
    Team,
    Collection,
}

impl Companion {
    /// File name suffix before the YAML extension
    pub fn stem_suffix(&self) -> &'static str {
        match self {
            Companion::Team => "team",
            Companion::Collection => "collection",
        }
    }

    pub fn schema(&self) -> SchemaKind {
        match self {
            Companion::Team => SchemaKind::Team,
            Companion::Collection => SchemaKind::Collection,
        }
    }
}

impl ProductGroup {
    pub fn new(root: &str, product: &str) -> Self {
        Self {
            product: product.to_string(),
            prefix: format!("{}/{}/", root, product),
            files: Vec::new(),
        }
    }

    pub fn product(&self) -> &str {
        &self.product
    }

    /// Product directory without trailing slash, e.g. `templates/acme`
    pub fn dir(&self) -> &str {
        self.prefix.trim_end_matches('/')
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Path of a file directly inside the product directory
    pub fn path_of(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name)
    }

    /// Path relative to the product directory
    pub fn relative<'a>(&self, file: &'a str) -> Option<&'a str> {
        file.strip_prefix(self.prefix.as_str())
    }

    /// Files located directly in the product directory (not in a subdirectory)
    pub fn top_level_files(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files.iter().filter_map(|file| {
            self.relative(file)
                .filter(|name| !name.contains('/'))
                .map(|name| (file.as_str(), name))
        })
    }

    /// Files anywhere under `<prefix><kind>/`
    pub fn files_under(&self, kind: AssetKind) -> impl Iterator<Item = &str> {
        let dir_prefix = format!("{}{}/", self.prefix, kind.dir_name());
        self.files
            .iter()
            .map(String::as_str)
            .filter(move |file| file.starts_with(&dir_prefix))
    }

    /// Asset directories with at least one touched file
    pub fn existing_asset_dirs(&self) -> BTreeSet<AssetKind> {
        AssetKind::ALL
            .into_iter()
            .filter(|kind| self.files_under(*kind).next().is_some())
            .collect()
    }

    /// Top-level `manifest.yml` / `manifest.yaml` files
    pub fn manifest_files(&self) -> Vec<&str> {
        self.top_level_files()
            .filter(|(_, name)| matches!(*name, "manifest.yml" | "manifest.yaml"))
            .map(|(file, _)| file)
            .collect()
    }

    /// Top-level files named `*team.yml|yaml` or `*collection.yml|yaml`
    pub fn companion_files(&self, companion: Companion) -> Vec<&str> {
        let suffix = companion.stem_suffix();
        self.top_level_files()
            .filter(|(_, name)| {
                let stem = name
                    .strip_suffix(".yaml")
                    .or_else(|| name.strip_suffix(".yml"));
                stem.is_some_and(|stem| stem.ends_with(suffix))
            })
            .map(|(file, _)| file)
            .collect()
    }

    fn push(&mut self, file: &str) {
        self.files.push(file.to_string());
    }
}

/// Group changed files by product, preserving the order in which products
/// (and files within a product) first appear. Duplicate paths are kept once.
pub fn classify(changed_files: &[String], root: &str) -> Vec<ProductGroup> {
    let root_prefix = format!("{}/", root);
    let mut groups: Vec<ProductGroup> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for file in changed_files {
        if !file.starts_with(&root_prefix) {
            continue;
        }
        let segments: Vec<&str> = file.split('/').collect();
        if segments.len() < 3 || segments[1].is_empty() {
            continue;
        }
        if !seen.insert(file.as_str()) {
            continue;
        }

        let product = segments[1];
        let slot = *index.entry(product).or_insert_with(|| {
            groups.push(ProductGroup::new(root, product));
            groups.len() - 1
        });
        groups[slot].push(file);
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_groups_by_product_in_first_seen_order() {
        let changed = paths(&[
            "templates/zeta/README.md",
            "templates/acme/README.md",
            "templates/zeta/manifest.yaml",
        ]);

        let groups = classify(&changed, "templates");
        let products: Vec<&str> = groups.iter().map(|g| g.product()).collect();
        assert_eq!(products, vec!["zeta", "acme"]);
        assert_eq!(
            groups[0].files(),
            &["templates/zeta/README.md", "templates/zeta/manifest.yaml"]
        );
    }

    #[test]
    fn test_non_qualifying_paths_are_excluded() {
        let changed = paths(&[
            "README.md",
            "docs/templates/acme/README.md",
            "templates/README.md",
            "templates//README.md",
            "templatesx/acme/README.md",
            ".github/workflows/validate.yml",
        ]);

        assert!(classify(&changed, "templates").is_empty());
    }

    #[test]
    fn test_duplicates_are_tolerated() {
        let changed = paths(&[
            "templates/acme/team.yaml",
            "templates/acme/team.yaml",
            "templates/acme/README.md",
        ]);

        let groups = classify(&changed, "templates");
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].files().len(), 2);
        assert_eq!(groups[0].companion_files(Companion::Team).len(), 1);
    }

    #[test]
    fn test_custom_root() {
        let changed = paths(&["addons/acme/README.md", "templates/acme/README.md"]);

        let groups = classify(&changed, "addons");
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].dir(), "addons/acme");
        assert_eq!(groups[0].path_of("README.md"), "addons/acme/README.md");
    }

    #[test]
    fn test_existing_asset_dirs() {
        let changed = paths(&[
            "templates/acme/monitors/m1.yaml",
            "templates/acme/parsers/nested/p.conf",
            "templates/acme/monitors.yaml",
            "templates/acme/dashboards-old/d.yaml",
            "templates/other/dashboards/d.yaml",
        ]);

        let groups = classify(&changed, "templates");
        let dirs = groups[0].existing_asset_dirs();
        assert_eq!(
            dirs.into_iter().collect::<Vec<_>>(),
            vec![AssetKind::Monitors, AssetKind::Parsers]
        );
    }

    #[test]
    fn test_companion_matching_is_top_level_suffix() {
        let changed = paths(&[
            "templates/acme/acme-team.yaml",
            "templates/acme/collection.yml",
            "templates/acme/dashboards/team.yaml",
            "templates/acme/teams.yaml",
            "templates/acme/team.json",
            "templates/acme/steam.yaml.bak",
        ]);

        let group = &classify(&changed, "templates")[0];
        assert_eq!(
            group.companion_files(Companion::Team),
            vec!["templates/acme/acme-team.yaml"]
        );
        assert_eq!(
            group.companion_files(Companion::Collection),
            vec!["templates/acme/collection.yml"]
        );
    }

    #[test]
    fn test_manifest_files() {
        let changed = paths(&[
            "templates/acme/manifest.yaml",
            "templates/acme/manifest.yml",
            "templates/acme/dashboards/manifest.yaml",
            "templates/acme/old-manifest.yaml",
        ]);

        let group = &classify(&changed, "templates")[0];
        assert_eq!(
            group.manifest_files(),
            vec!["templates/acme/manifest.yaml", "templates/acme/manifest.yml"]
        );
    }
}
