//! Shared documents for validator tests: a complete, valid `acme` product.

use crate::fs::MockFileSystem;

pub const README: &str = "templates/acme/README.md";
pub const MANIFEST: &str = "templates/acme/manifest.yaml";
pub const TEAM: &str = "templates/acme/team.yaml";
pub const COLLECTION: &str = "templates/acme/collection.yaml";
pub const DASHBOARD: &str = "templates/acme/dashboards/d1.yaml";
pub const MONITOR: &str = "templates/acme/monitors/m1.yaml";
pub const POLICY: &str = "templates/acme/notification-policies/np1.yaml";

pub const MANIFEST_YAML: &str = r#"tech_type: database
data_source_and_docs:
  - title: Acme metrics reference
    url: https://docs.example.com/acme/metrics
asset_list:
  - asset_type: dashboard
    name: Acme Overview
    slug: d1
    file: dashboards/d1.yaml
    config_required: false
    description: Overview of Acme health
"#;

pub const TEAM_YAML: &str = r#"api_version: v1/config
kind: Team
spec:
  slug: t1
  name: Team One
"#;

pub const COLLECTION_YAML: &str = r#"api_version: v1/config
kind: Collection
spec:
  slug: c1
  name: Acme
  team_slug: t1
"#;

pub const DASHBOARD_YAML: &str = r#"api_version: v1/config
kind: Dashboard
spec:
  slug: d1
  name: Acme Overview
  collection_slug: c1
  dashboard_json: '{"panels": [], "title": "Acme"}'
"#;

pub const MONITOR_YAML: &str = r#"api_version: v1/config
kind: Monitor
spec:
  slug: m1
  name: Acme down
  collection_slug: c1
  notification_policy_slug: np1
  prometheus_query: 'up{job="acme"} == 0'
"#;

pub const POLICY_YAML: &str = r#"api_version: v1/config
kind: NotificationPolicy
spec:
  slug: np1
  name: Acme on-call
  team_slug: t1
  routes:
    defaults:
      receiver: email
"#;

/// Dashboard document with `dashboard_json` replaced by the given YAML
/// fragment (already indented for a `spec` child key)
pub fn dashboard_with_json(fragment: &str) -> String {
    format!(
        "api_version: v1/config\nkind: Dashboard\nspec:\n  slug: d1\n  name: Acme Overview\n  collection_slug: c1\n  dashboard_json: {}\n",
        fragment
    )
}

/// README, manifest, team, collection and one dashboard
pub fn dashboard_product() -> (Vec<String>, MockFileSystem) {
    let fs = MockFileSystem::new();
    fs.add_file(README, "# Acme\n");
    fs.add_file(MANIFEST, MANIFEST_YAML);
    fs.add_file(TEAM, TEAM_YAML);
    fs.add_file(COLLECTION, COLLECTION_YAML);
    fs.add_file(DASHBOARD, DASHBOARD_YAML);
    let files = [README, MANIFEST, TEAM, COLLECTION, DASHBOARD]
        .iter()
        .map(|s| s.to_string())
        .collect();
    (files, fs)
}

/// Every platform asset kind plus companions
pub fn full_product() -> (Vec<String>, MockFileSystem) {
    let (mut files, fs) = dashboard_product();
    fs.add_file(MONITOR, MONITOR_YAML);
    fs.add_file(POLICY, POLICY_YAML);
    files.push(MONITOR.to_string());
    files.push(POLICY.to_string());
    (files, fs)
}
