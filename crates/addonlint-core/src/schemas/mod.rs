//! Schema catalog for template repository documents
//!
//! Fixed tables: the expected shape of every typed document kind, the
//! recognized asset directories and the file extensions each accepts.

pub mod shape;

use serde::Serialize;
use std::fmt;

pub use shape::{Expectation, ExpectedShape, TypeMarker};

/// `api_version` every typed document must declare
pub const API_VERSION: &str = "v1/config";

/// Typed documents with a catalogued shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    Team,
    Collection,
    Dashboard,
    Monitor,
    NotificationPolicy,
}

impl SchemaKind {
    pub fn name(&self) -> &'static str {
        match self {
            SchemaKind::Team => "Team",
            SchemaKind::Collection => "Collection",
            SchemaKind::Dashboard => "Dashboard",
            SchemaKind::Monitor => "Monitor",
            SchemaKind::NotificationPolicy => "NotificationPolicy",
        }
    }

    /// Shape of the `spec` mapping
    pub fn spec_shape(&self) -> ExpectedShape {
        let base = ExpectedShape::new().strings(&["slug", "name"]);
        match self {
            SchemaKind::Team => base,
            SchemaKind::Collection => base.strings(&["team_slug"]),
            // dashboard_json may be an inline mapping or a JSON string; the
            // directory validator checks it separately
            SchemaKind::Dashboard => base
                .strings(&["collection_slug"])
                .field("dashboard_json", TypeMarker::Any),
            SchemaKind::Monitor => base.strings(&[
                "collection_slug",
                "notification_policy_slug",
                "prometheus_query",
            ]),
            SchemaKind::NotificationPolicy => base.strings(&["team_slug"]).field(
                "routes",
                ExpectedShape::new().field("defaults", TypeMarker::Dictionary),
            ),
        }
    }

    /// Full document shape: version and spec
    pub fn expected_shape(&self) -> ExpectedShape {
        ExpectedShape::new()
            .field("api_version", Expectation::literal(API_VERSION))
            .field("spec", self.spec_shape())
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Recognized asset directories directly under a product directory.
///
/// Variant order is the order directories are checked and reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssetKind {
    Dashboards,
    Monitors,
    NotificationPolicies,
    Collectors,
    Processors,
    Parsers,
}

const YAML_EXTENSIONS: &[&str] = &["yaml", "yml"];

impl AssetKind {
    pub const ALL: [AssetKind; 6] = [
        AssetKind::Dashboards,
        AssetKind::Monitors,
        AssetKind::NotificationPolicies,
        AssetKind::Collectors,
        AssetKind::Processors,
        AssetKind::Parsers,
    ];

    pub fn dir_name(&self) -> &'static str {
        match self {
            AssetKind::Dashboards => "dashboards",
            AssetKind::Monitors => "monitors",
            AssetKind::NotificationPolicies => "notification-policies",
            AssetKind::Collectors => "collectors",
            AssetKind::Processors => "processors",
            AssetKind::Parsers => "parsers",
        }
    }

    /// Accepted extensions, without the leading dot
    pub fn accepted_extensions(&self) -> &'static [&'static str] {
        match self {
            AssetKind::Dashboards
            | AssetKind::Monitors
            | AssetKind::NotificationPolicies
            | AssetKind::Collectors => YAML_EXTENSIONS,
            AssetKind::Processors => &["json"],
            AssetKind::Parsers => &["conf"],
        }
    }

    /// Accepted extensions rendered for messages, e.g. `.yaml/.yml`
    pub fn extensions_label(&self) -> String {
        self.accepted_extensions()
            .iter()
            .map(|ext| format!(".{}", ext))
            .collect::<Vec<_>>()
            .join("/")
    }

    pub fn accepts(&self, file: &str) -> bool {
        std::path::Path::new(file)
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.accepted_extensions().contains(&ext))
    }

    /// Dashboards, monitors and notification policies require team and
    /// collection companions and take part in slug cross-checks
    pub fn is_platform(&self) -> bool {
        self.schema().is_some()
    }

    /// Typed schema that files in this directory must match, if any
    pub fn schema(&self) -> Option<SchemaKind> {
        match self {
            AssetKind::Dashboards => Some(SchemaKind::Dashboard),
            AssetKind::Monitors => Some(SchemaKind::Monitor),
            AssetKind::NotificationPolicies => Some(SchemaKind::NotificationPolicy),
            AssetKind::Collectors | AssetKind::Processors | AssetKind::Parsers => None,
        }
    }

    /// Comma-separated directory names, for messages
    pub fn all_dir_names() -> String {
        Self::ALL
            .iter()
            .map(|kind| kind.dir_name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Keys every manifest `asset_list` entry must carry
pub const MANIFEST_ASSET_KEYS: &[&str] = &[
    "asset_type",
    "name",
    "slug",
    "file",
    "config_required",
    "description",
];

/// Required manifest shape: `tech_type` plus a list of asset entries
pub fn manifest_shape() -> ExpectedShape {
    ExpectedShape::new().present(&["tech_type"]).field(
        "asset_list",
        Expectation::list_of(ExpectedShape::new().present(MANIFEST_ASSET_KEYS).into()),
    )
}

/// Shape of the optional `data_source_and_docs` manifest key
pub fn manifest_docs_shape() -> ExpectedShape {
    ExpectedShape::new().field(
        "data_source_and_docs",
        Expectation::list_of(ExpectedShape::new().present(&["title", "url"]).into()),
    )
}
