//! Property-based tests for the path algebra.
//!
//! Note: normalize, compare and `app_relative` already carry small property
//! suites. This module runs heavier cases across module boundaries: value
//! construction, combination and relationships.

use std::sync::Arc;

use proptest::prelude::*;

use super::combine::combine;
use super::compare::{cmp_ignore_case, eq_ignore_case};
use super::normalize::reduce;
use super::{PathRelationship, VirtualPath};
use crate::app_root::{AppRoot, StaticAppRoot, UnknownAppRoot};

fn root() -> AppRoot {
    Arc::new(StaticAppRoot::new("/app/").unwrap())
}

// Strategy for generating segment names
fn segment_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_-]{1,12}"
}

fn absolute_path_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(segment_strategy(), 1..8).prop_map(|parts| format!("/{}", parts.join("/")))
}

// Paths with dot segments, doubled separators and backslashes mixed in
fn messy_path_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            3 => segment_strategy(),
            1 => Just(".".to_string()),
            1 => Just("..".to_string()),
            1 => Just(String::new()),
        ],
        1..10,
    )
    .prop_flat_map(|parts| {
        let len = parts.len();
        (Just(parts), prop::collection::vec(prop::bool::ANY, len))
    })
    .prop_map(|(parts, backslashes)| {
        let mut path = String::new();
        for (part, backslash) in parts.iter().zip(backslashes) {
            path.push(if backslash { '\\' } else { '/' });
            path.push_str(part);
        }
        path
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 10000,
        max_shrink_iters: 10000,
        .. ProptestConfig::default()
    })]

    // Reduction is idempotent: reduce(reduce(p)) == reduce(p)
    #[test]
    fn reduce_idempotent(path in messy_path_strategy()) {
        let root = root();
        if let Ok(once) = reduce(&path, root.as_ref()) {
            let twice = reduce(&once, root.as_ref()).unwrap();
            prop_assert_eq!(once, twice);
        }
    }

    // Created values never carry backslashes, doubled slashes or dot segments
    #[test]
    fn created_values_are_canonical(path in messy_path_strategy()) {
        if let Ok(value) = VirtualPath::create_absolute(&path, &root()) {
            let absolute = value.absolute().unwrap();
            prop_assert!(absolute.starts_with('/'));
            prop_assert!(!absolute.contains('\\'));
            prop_assert!(!absolute.contains("//"));
            prop_assert!(!absolute.split('/').any(|s| s == "." || s == ".."));
        }
    }

    // Clean absolute paths survive construction unchanged
    #[test]
    fn clean_paths_unchanged(path in absolute_path_strategy()) {
        let value = VirtualPath::create_absolute(&path, &root()).unwrap();
        prop_assert_eq!(value.absolute().unwrap(), path.as_str());
    }

    // A rooted addition displaces any base
    #[test]
    fn rooted_addition_displaces_base(base in absolute_path_strategy(), addition in absolute_path_strategy()) {
        prop_assert_eq!(combine(&base, &addition, root().as_ref()).unwrap(), addition);
    }

    // Converting to app-relative form and back is lossless
    #[test]
    fn app_relative_round_trip(tail in absolute_path_strategy()) {
        let root = root();
        let absolute = format!("/app{tail}");
        let value = VirtualPath::create_absolute(&absolute, &root).unwrap();
        let relative = value.app_relative_or_none().unwrap().unwrap().to_string();

        let back = VirtualPath::create_non_relative(&relative, &root).unwrap();
        prop_assert_eq!(back.absolute().unwrap(), absolute.as_str());
        prop_assert!(back.try_eq(&value).unwrap());
    }

    // Parent chains always terminate at the root
    #[test]
    fn parent_chain_reaches_root(path in absolute_path_strategy()) {
        let mut current = VirtualPath::create_absolute(&path, &root()).unwrap();
        let mut steps = 0;
        while let Some(parent) = current.parent().unwrap() {
            prop_assert!(parent.absolute().unwrap().ends_with('/'));
            current = parent;
            steps += 1;
        }
        prop_assert!(current.is_root());
        prop_assert_eq!(steps, path.matches('/').count());
    }

    // Case folding agrees between equality and ordering
    #[test]
    fn case_insensitive_comparison_consistent(a in absolute_path_strategy(), b in absolute_path_strategy()) {
        prop_assert!(eq_ignore_case(&a, &a.to_uppercase()));
        prop_assert_eq!(eq_ignore_case(&a, &b), cmp_ignore_case(&a, &b).is_eq());
    }

    // Path relationship is reflexive: path is always the same as itself
    #[test]
    fn path_relationship_reflexive(path in absolute_path_strategy()) {
        prop_assert_eq!(PathRelationship::between(&path, &path), PathRelationship::Same);
    }

    // Relationship is antisymmetric: swapping operands swaps ancestor and descendant
    #[test]
    fn path_relationship_antisymmetric(a in absolute_path_strategy(), b in absolute_path_strategy()) {
        let forward = PathRelationship::between(&a, &b);
        let backward = PathRelationship::between(&b, &a);
        let expected = match forward {
            PathRelationship::Ancestor => PathRelationship::Descendant,
            PathRelationship::Descendant => PathRelationship::Ancestor,
            other => other,
        };
        prop_assert_eq!(backward, expected);
    }

    // Containment is transitive (if A contains B and B contains C, then A contains C)
    #[test]
    fn path_containment_transitive(base in absolute_path_strategy(), parts1 in 1..5usize, parts2 in 1..5usize) {
        let mut path_b = base.clone();
        for i in 0..parts1 {
            path_b.push_str(&format!("/sub{i}"));
        }

        let mut path_c = path_b.clone();
        for i in 0..parts2 {
            path_c.push_str(&format!("/deep{i}"));
        }

        prop_assert_eq!(PathRelationship::between(&base, &path_b), PathRelationship::Ancestor);
        prop_assert_eq!(PathRelationship::between(&path_b, &path_c), PathRelationship::Ancestor);
        prop_assert_eq!(PathRelationship::between(&base, &path_c), PathRelationship::Ancestor);
    }

    // Sibling names sharing a prefix are never nested
    #[test]
    fn sibling_prefix_unrelated(base in absolute_path_strategy(), suffix in "[a-z0-9]{1,4}") {
        let sibling = format!("{base}{suffix}");
        prop_assert_eq!(PathRelationship::between(&base, &sibling), PathRelationship::Unrelated);
    }

    // Without a root, app-relative values never resolve but stay displayable
    #[test]
    fn unknown_root_never_resolves(path in absolute_path_strategy()) {
        let unknown: AppRoot = Arc::new(UnknownAppRoot);
        let value = VirtualPath::create_non_relative(&format!("~{path}"), &unknown).unwrap();
        prop_assert!(value.absolute().is_err());
        prop_assert_eq!(value.to_string(), format!("~{path}"));
    }
}
