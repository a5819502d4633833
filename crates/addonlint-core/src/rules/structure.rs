//! Structural matcher
//!
//! Checks a document against an [`ExpectedShape`]. This is a shape check,
//! not equality: keys the shape does not mention are ignored. The first
//! mismatch is returned with its dotted/indexed key path, e.g.
//! `spec.routes.defaults` or `asset_list[2].slug`.

use crate::diagnostics::{ValidationError, ValidationResult};
use crate::parsers::Document;
use crate::schemas::shape::{describe, type_name};
use crate::schemas::{Expectation, ExpectedShape};
use serde_yaml::Mapping;

/// Key path reported when the document itself is not a mapping
pub const DOCUMENT_ROOT: &str = "(document root)";

/// Match `document` against `shape`, attributing failures to `file`
pub fn check(document: &Document, shape: &ExpectedShape, file: &str) -> ValidationResult<()> {
    let mapping = document
        .as_mapping()
        .ok_or_else(|| ValidationError::WrongType {
            file: file.to_string(),
            key_path: DOCUMENT_ROOT.to_string(),
            expected: "dictionary".to_string(),
            found: type_name(document).to_string(),
        })?;
    check_mapping(mapping, shape, "", file)
}

fn check_mapping(
    mapping: &Mapping,
    shape: &ExpectedShape,
    prefix: &str,
    file: &str,
) -> ValidationResult<()> {
    for (key, expectation) in shape.fields() {
        let key_path = format!("{}{}", prefix, key);
        let value = mapping
            .get(key)
            .ok_or_else(|| ValidationError::MissingKey {
                file: file.to_string(),
                key_path: key_path.clone(),
            })?;
        check_value(value, expectation, &key_path, file)?;
    }
    Ok(())
}

fn check_value(
    value: &Document,
    expectation: &Expectation,
    key_path: &str,
    file: &str,
) -> ValidationResult<()> {
    match expectation {
        Expectation::Nested(shape) => {
            let mapping = value
                .as_mapping()
                .ok_or_else(|| wrong_type(file, key_path, "dictionary", value))?;
            check_mapping(mapping, shape, &format!("{}.", key_path), file)
        }
        Expectation::List(template) => {
            let items = value
                .as_sequence()
                .ok_or_else(|| wrong_type(file, key_path, "list", value))?;
            items.iter().enumerate().try_for_each(|(i, item)| {
                check_value(item, template, &format!("{}[{}]", key_path, i), file)
            })
        }
        Expectation::Type(marker) => {
            if marker.matches(value) {
                Ok(())
            } else {
                Err(wrong_type(file, key_path, marker.name(), value))
            }
        }
        Expectation::Literal(expected) => {
            if value == expected {
                Ok(())
            } else {
                Err(ValidationError::ValueMismatch {
                    file: file.to_string(),
                    key_path: key_path.to_string(),
                    expected: describe(expected),
                    found: describe(value),
                })
            }
        }
    }
}

fn wrong_type(file: &str, key_path: &str, expected: &str, value: &Document) -> ValidationError {
    ValidationError::WrongType {
        file: file.to_string(),
        key_path: key_path.to_string(),
        expected: expected.to_string(),
        found: type_name(value).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::{SchemaKind, TypeMarker};
    use crate::test_fixtures::{
        COLLECTION_YAML, DASHBOARD_YAML, MONITOR_YAML, POLICY_YAML, TEAM_YAML,
    };
    use proptest::prelude::*;

    const FILE: &str = "templates/acme/team.yaml";

    fn yaml(content: &str) -> Document {
        serde_yaml::from_str(content).unwrap()
    }

    fn team_shape() -> ExpectedShape {
        SchemaKind::Team.expected_shape()
    }

    #[test]
    fn test_valid_document_passes() {
        let doc = yaml("api_version: v1/config\nkind: Team\nspec:\n  slug: t1\n  name: Team One\n");
        assert!(check(&doc, &team_shape(), FILE).is_ok());
    }

    #[test]
    fn test_missing_nested_key_reports_dotted_path() {
        let doc = yaml("api_version: v1/config\nkind: Team\nspec:\n  name: Team One\n");

        match check(&doc, &team_shape(), FILE).unwrap_err() {
            ValidationError::MissingKey { file, key_path } => {
                assert_eq!(key_path, "spec.slug");
                assert_eq!(file, FILE);
            }
            other => panic!("Expected MissingKey, got {:?}", other),
        }
    }

    #[test]
    fn test_nested_value_must_be_dictionary() {
        let doc = yaml("api_version: v1/config\nkind: Team\nspec: [t1]\n");

        match check(&doc, &team_shape(), FILE).unwrap_err() {
            ValidationError::WrongType {
                key_path,
                expected,
                found,
                ..
            } => {
                assert_eq!(key_path, "spec");
                assert_eq!(expected, "dictionary");
                assert_eq!(found, "list");
            }
            other => panic!("Expected WrongType, got {:?}", other),
        }
    }

    #[test]
    fn test_type_marker_mismatch_names_both_types() {
        let doc = yaml("api_version: v1/config\nkind: Team\nspec:\n  slug: 42\n  name: x\n");

        match check(&doc, &team_shape(), FILE).unwrap_err() {
            ValidationError::WrongType {
                key_path,
                expected,
                found,
                ..
            } => {
                assert_eq!(key_path, "spec.slug");
                assert_eq!(expected, "string");
                assert_eq!(found, "integer");
            }
            other => panic!("Expected WrongType, got {:?}", other),
        }
    }

    #[test]
    fn test_literal_mismatch() {
        let doc = yaml("api_version: v2/config\nkind: Team\nspec:\n  slug: t1\n  name: x\n");

        match check(&doc, &team_shape(), FILE).unwrap_err() {
            ValidationError::ValueMismatch {
                key_path,
                expected,
                found,
                ..
            } => {
                assert_eq!(key_path, "api_version");
                assert_eq!(expected, "'v1/config'");
                assert_eq!(found, "'v2/config'");
            }
            other => panic!("Expected ValueMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_deep_nested_path() {
        let doc = yaml(
            "api_version: v1/config\nkind: NotificationPolicy\nspec:\n  slug: np\n  name: n\n  team_slug: t1\n  routes:\n    defaults: email\n",
        );

        match check(&doc, &SchemaKind::NotificationPolicy.expected_shape(), FILE).unwrap_err() {
            ValidationError::WrongType { key_path, .. } => {
                assert_eq!(key_path, "spec.routes.defaults")
            }
            other => panic!("Expected WrongType, got {:?}", other),
        }
    }

    #[test]
    fn test_list_of_dicts_reports_indexed_path() {
        let shape = ExpectedShape::new().field(
            "asset_list",
            Expectation::list_of(ExpectedShape::new().strings(&["slug"]).into()),
        );
        let doc = yaml("asset_list:\n  - slug: a\n  - name: b\n");

        match check(&doc, &shape, FILE).unwrap_err() {
            ValidationError::MissingKey { key_path, .. } => {
                assert_eq!(key_path, "asset_list[1].slug")
            }
            other => panic!("Expected MissingKey, got {:?}", other),
        }
    }

    #[test]
    fn test_list_of_type_markers() {
        let shape =
            ExpectedShape::new().field("tags", Expectation::list_of(TypeMarker::String.into()));

        assert!(check(&yaml("tags: [a, b]\n"), &shape, FILE).is_ok());
        assert!(check(&yaml("tags: []\n"), &shape, FILE).is_ok());
        match check(&yaml("tags: [a, 3]\n"), &shape, FILE).unwrap_err() {
            ValidationError::WrongType { key_path, .. } => assert_eq!(key_path, "tags[1]"),
            other => panic!("Expected WrongType, got {:?}", other),
        }
    }

    #[test]
    fn test_list_of_literals() {
        let shape = ExpectedShape::new().field("env", Expectation::list_of(Expectation::literal("prod")));

        assert!(check(&yaml("env: [prod, prod]\n"), &shape, FILE).is_ok());
        assert!(matches!(
            check(&yaml("env: [prod, dev]\n"), &shape, FILE).unwrap_err(),
            ValidationError::ValueMismatch { .. }
        ));
    }

    #[test]
    fn test_list_expected_but_scalar_found() {
        let shape =
            ExpectedShape::new().field("tags", Expectation::list_of(TypeMarker::String.into()));

        match check(&yaml("tags: a\n"), &shape, FILE).unwrap_err() {
            ValidationError::WrongType { expected, .. } => assert_eq!(expected, "list"),
            other => panic!("Expected WrongType, got {:?}", other),
        }
    }

    #[test]
    fn test_non_mapping_document() {
        match check(&yaml("- a\n- b\n"), &team_shape(), FILE).unwrap_err() {
            ValidationError::WrongType { key_path, .. } => assert_eq!(key_path, DOCUMENT_ROOT),
            other => panic!("Expected WrongType, got {:?}", other),
        }
    }

    /// Every required key path of a shape, parents before children
    fn required_paths(shape: &ExpectedShape, prefix: &[String]) -> Vec<Vec<String>> {
        let mut paths = Vec::new();
        for (key, expectation) in shape.fields() {
            let mut path = prefix.to_vec();
            path.push(key.to_string());
            paths.push(path.clone());
            if let Expectation::Nested(nested) = expectation {
                paths.extend(required_paths(nested, &path));
            }
        }
        paths
    }

    #[test]
    fn test_removing_any_required_key_fails() {
        let cases = [
            (SchemaKind::Team, TEAM_YAML),
            (SchemaKind::Collection, COLLECTION_YAML),
            (SchemaKind::Dashboard, DASHBOARD_YAML),
            (SchemaKind::Monitor, MONITOR_YAML),
            (SchemaKind::NotificationPolicy, POLICY_YAML),
        ];

        for (kind, full) in cases {
            let shape = kind.expected_shape();
            assert!(check(&yaml(full), &shape, FILE).is_ok(), "{} fixture", kind);

            let paths = required_paths(&shape, &[]);
            assert!(paths.len() >= 4, "{} has too few required keys", kind);
            for path in paths {
                let (last, parents) = path.split_last().unwrap();
                let mut doc = yaml(full);
                let mut node = &mut doc;
                for parent in parents {
                    node = node.get_mut(parent.as_str()).unwrap();
                }
                node.as_mapping_mut().unwrap().remove(last.as_str());

                match check(&doc, &shape, FILE) {
                    Err(ValidationError::MissingKey { key_path, .. }) => {
                        assert_eq!(key_path, path.join("."), "{}", kind)
                    }
                    other => panic!("{}: removing {:?} gave {:?}", kind, path, other),
                }
            }
        }
    }

    #[test]
    fn test_removing_routes_defaults_fails() {
        let mut doc = yaml(POLICY_YAML);
        doc["spec"]["routes"].as_mapping_mut().unwrap().remove("defaults");

        match check(&doc, &SchemaKind::NotificationPolicy.expected_shape(), FILE).unwrap_err() {
            ValidationError::MissingKey { key_path, .. } => {
                assert_eq!(key_path, "spec.routes.defaults")
            }
            other => panic!("Expected MissingKey, got {:?}", other),
        }
    }

    #[test]
    fn test_kind_key_is_not_required() {
        let doc = yaml("api_version: v1/config\nspec:\n  slug: t1\n  name: Team One\n");
        assert!(check(&doc, &team_shape(), FILE).is_ok());
    }

    proptest! {
        #[test]
        fn prop_extra_keys_are_ignored(
            extras in proptest::collection::btree_map("x_[a-z]{1,8}", "[a-zA-Z0-9 ]{0,12}", 0..6),
            spec_extras in proptest::collection::btree_map("y_[a-z]{1,8}", 0i64..1000, 0..6),
        ) {
            let mut doc = yaml("api_version: v1/config\nkind: Team\nspec:\n  slug: t1\n  name: x\n");
            for (k, v) in &extras {
                doc.as_mapping_mut().unwrap().insert(k.as_str().into(), v.as_str().into());
            }
            for (k, v) in &spec_extras {
                doc["spec"].as_mapping_mut().unwrap().insert(k.as_str().into(), (*v).into());
            }
            prop_assert!(check(&doc, &team_shape(), FILE).is_ok());
        }
    }
}
