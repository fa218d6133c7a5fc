use fieldcheck::resolve::{resolve_path, value_size};
use proptest::prelude::*;
use serde_json::{Value, json};

/// Strategy for arbitrary JSON values nested up to `depth` levels.
fn arb_json(depth: u32) -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|i| json!(i)),
        "[a-z]{1,8}".prop_map(Value::String),
    ];

    leaf.prop_recursive(depth, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec(("[a-z][a-z0-9]{0,5}", inner), 1..5).prop_map(|pairs| {
                let map: serde_json::Map<String, Value> = pairs.into_iter().collect();
                Value::Object(map)
            }),
        ]
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn resolution_never_panics(
        path in "\\PC{0,30}",
        value in arb_json(2),
    ) {
        let _ = resolve_path(&value, &path);
    }

    #[test]
    fn non_wildcard_paths_yield_exactly_one_pair(
        segments in prop::collection::vec("[a-z]{1,6}", 1..5),
        value in arb_json(3),
    ) {
        let path = segments.join(".");
        let resolved = resolve_path(&value, &path);
        prop_assert_eq!(resolved.len(), 1);
        prop_assert_eq!(&resolved[0].0, &path);
    }

    #[test]
    fn wildcard_over_array_yields_one_pair_per_element(
        n in 0..8usize,
        elem in arb_json(1),
    ) {
        let arr: Vec<Value> = (0..n).map(|_| elem.clone()).collect();
        let obj = json!({"items": arr});
        let resolved = resolve_path(&obj, "items.*");
        prop_assert_eq!(resolved.len(), n);
        for (i, (path, value)) in resolved.iter().enumerate() {
            prop_assert_eq!(path, &format!("items.{}", i));
            prop_assert_eq!(value.as_ref(), Some(&elem));
        }
    }

    #[test]
    fn wildcard_expansion_paths_are_distinct(
        value in arb_json(3),
    ) {
        let resolved = resolve_path(&value, "*.*");
        let mut paths: Vec<&String> = resolved.iter().map(|(p, _)| p).collect();
        let total = paths.len();
        paths.sort();
        paths.dedup();
        prop_assert_eq!(paths.len(), total);
    }

    #[test]
    fn resolution_leaves_input_untouched(
        path in "[a-z.*]{0,20}",
        value in arb_json(3),
    ) {
        let before = value.clone();
        let _ = resolve_path(&value, &path);
        prop_assert_eq!(value, before);
    }

    #[test]
    fn size_never_panics(value in arb_json(3)) {
        let _ = value_size(&value);
    }

    #[test]
    fn sequence_size_is_element_count(items in prop::collection::vec(arb_json(1), 0..8)) {
        let n = items.len();
        prop_assert_eq!(value_size(&Value::Array(items)), Some(n as f64));
    }
}
