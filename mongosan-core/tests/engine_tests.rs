// mongosan-core/tests/engine_tests.rs
use std::sync::Arc;
use std::thread;

use serde_json::{json, Value};
use test_log::test;

use mongosan_core::{
    has, sanitize, sanitize_value, OperatorEngine, Policy, SanitizationEngine, SanitizeOptions,
};

fn options(replace_with: &str, allow_dots: bool, dry_run: bool) -> SanitizeOptions {
    SanitizeOptions {
        replace_with: replace_with.to_string(),
        allow_dots,
        dry_run,
        ..SanitizeOptions::default()
    }
}

#[test]
fn test_scenario_root_string() {
    assert_eq!(sanitize(&json!("user.$name"), &SanitizeOptions::default()), json!("user__name"));
}

#[test]
fn test_scenario_has_operator_in_string() {
    assert!(has(&json!("price.$lt"), false));
}

#[test]
fn test_scenario_object_keys() {
    let input = json!({ "$where": "1==1", "a.b": 5 });
    assert_eq!(
        sanitize(&input, &SanitizeOptions::default()),
        json!({ "_where": "1==1", "a_b": 5 })
    );
}

#[test]
fn test_scenario_empty_replacement_collision() {
    let input = json!({ "a.b": 1, "a$b": 2 });
    assert_eq!(sanitize(&input, &options("", false, false)), json!({ "ab": 2 }));
}

#[test]
fn test_scenario_allow_dots() {
    let input = json!({ "a": { "$gt": 3 } });
    assert_eq!(sanitize(&input, &options("_", true, false)), json!({ "a": { "_gt": 3 } }));
    assert_eq!(sanitize(&json!("a.b"), &options("_", true, false)), json!("a.b"));
}

#[test]
fn test_scenario_clean_input_is_copied() {
    let input = json!({ "safe": "value", "nested": { "also": "safe" } });
    assert!(!has(&input, false));

    let result = sanitize_value(&input, &Policy::default());
    assert!(!result.modified);
    assert_eq!(result.value, input);
}

#[test]
fn test_dry_run_flags_without_rewriting() {
    let input = json!({ "$set": { "role.admin": true }, "tags": ["$x", 1, null] });
    let result = sanitize_value(&input, &Policy::default().with_dry_run(true));
    assert!(result.modified);
    assert_eq!(result.value, input);
}

#[test]
fn test_replacement_is_applied_to_every_character() {
    let input = json!({ "$a.$b": "..$" });
    assert_eq!(
        sanitize(&input, &options("[x]", false, false)),
        json!({ "[x]a[x][x]b": "[x][x][x]" })
    );
}

#[test]
fn test_forbidden_replacement_degrades_to_default() {
    assert_eq!(sanitize(&json!("$gt"), &options("$$", false, false)), json!("_gt"));
}

#[test]
fn test_numbers_booleans_and_null_survive() {
    let input = json!([1, -2.5, true, false, null, { "n": 0 }]);
    let result = sanitize_value(&input, &Policy::default());
    assert!(!result.modified);
    assert_eq!(result.value, input);
}

#[test]
fn test_engine_is_shareable_across_threads() {
    let engine: Arc<dyn SanitizationEngine> = Arc::new(OperatorEngine::default());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                let input = json!({ format!("$k{}", i): [format!("v.{}", i)] });
                engine.sanitize_value(&input)
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let result = handle.join().expect("worker panicked");
        assert!(result.modified);
        assert_eq!(result.value, json!({ format!("_k{}", i): [format!("v_{}", i)] }));
    }
}

mod properties {
    use super::{has, sanitize, sanitize_value, Policy, SanitizeOptions, Value};
    use proptest::prelude::*;

    fn arb_text() -> impl Strategy<Value = String> {
        prop::string::string_regex("[a-c$._]{0,6}").unwrap()
    }

    fn arb_json() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(Value::from),
            arb_text().prop_map(Value::String),
        ];
        leaf.prop_recursive(4, 48, 5, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
                prop::collection::vec((arb_text(), inner), 0..5)
                    .prop_map(|entries| Value::Object(entries.into_iter().collect())),
            ]
        })
    }

    /// Arrays keep their length; objects never grow and keep their order
    /// when no keys collided.
    fn shape_preserved(original: &Value, sanitized: &Value) -> bool {
        match (original, sanitized) {
            (Value::Array(a), Value::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| shape_preserved(x, y))
            }
            (Value::Object(a), Value::Object(b)) => {
                if a.len() == b.len() {
                    a.values().zip(b.values()).all(|(x, y)| shape_preserved(x, y))
                } else {
                    b.len() < a.len()
                }
            }
            (Value::String(_), Value::String(_)) => true,
            (a, b) => a == b,
        }
    }

    proptest! {
        #[test]
        fn sanitize_is_idempotent(input in arb_json()) {
            let once = sanitize(&input, &SanitizeOptions::default());
            let twice = sanitize(&once, &SanitizeOptions::default());
            prop_assert_eq!(twice, once);
        }

        #[test]
        fn input_is_never_mutated(
            input in arb_json(),
            dry_run in any::<bool>(),
            allow_dots in any::<bool>(),
        ) {
            let before = input.clone();
            let _ = sanitize_value(&input, &Policy::new("", dry_run, allow_dots));
            prop_assert_eq!(input, before);
        }

        #[test]
        fn dry_run_returns_input(input in arb_json(), allow_dots in any::<bool>()) {
            let result = sanitize_value(&input, &Policy::new("_", true, allow_dots));
            prop_assert_eq!(&result.value, &input);
            prop_assert_eq!(result.modified, has(&input, allow_dots));
        }

        #[test]
        fn has_matches_observable_change(input in arb_json()) {
            let sanitized = sanitize(&input, &SanitizeOptions::default());
            prop_assert_eq!(has(&input, false), sanitized != input);
        }

        #[test]
        fn detection_matches_character_class(s in "[a-z$.]{0,10}") {
            let value = Value::String(s.clone());
            prop_assert_eq!(has(&value, false), s.contains('$') || s.contains('.'));
            prop_assert_eq!(has(&value, true), s.contains('$'));
        }

        #[test]
        fn structure_is_preserved(input in arb_json()) {
            let sanitized = sanitize(&input, &SanitizeOptions::default());
            prop_assert!(shape_preserved(&input, &sanitized));
        }
    }
}
