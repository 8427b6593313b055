//! Integration tests for JSON value and ordered-map helpers.

use indexmap::IndexMap;
use rstest::rstest;
use serde_json::{json, Value};

use vvkit::domain::map::{
    aget, diff_key, intersect_key, is_blank, json_encode, shift_key, shift_keys, to_array,
    unset_key,
};
use vvkit::domain::Records;

fn sample() -> IndexMap<String, i32> {
    [("a", 1), ("b", 2), ("c", 3), ("d", 4)]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

fn keys<V>(map: &IndexMap<String, V>) -> Vec<&str> {
    map.keys().map(String::as_str).collect()
}

#[rstest]
#[case(json!(null), true)]
#[case(json!(false), true)]
#[case(json!(""), true)]
#[case(json!([]), true)]
#[case(json!({}), true)]
#[case(json!([null, ["", false]]), true)]
#[case(json!({"x": null, "y": [""]}), true)]
#[case(json!(0), false)]
#[case(json!("0"), false)]
#[case(json!(true), false)]
#[case(json!(" "), false)]
#[case(json!([null, [0]]), false)]
fn given_value_when_checking_blank_then_recurses_into_containers(
    #[case] value: Value,
    #[case] expected: bool,
) {
    assert_eq!(is_blank(&value), expected, "{}", value);
}

#[rstest]
#[case(json!(5), true, json!([5]))]
#[case(json!("x"), false, json!(["x"]))]
#[case(json!(null), true, json!([]))]
#[case(json!(""), true, json!([]))]
#[case(json!(""), false, json!([""]))]
#[case(json!([1, 2]), true, json!([1, 2]))]
#[case(json!({"k": 1}), true, json!({"k": 1}))]
fn given_value_when_converting_to_array_then_wraps_scalars(
    #[case] value: Value,
    #[case] skip_blank: bool,
    #[case] expected: Value,
) {
    assert_eq!(to_array(value, skip_blank), expected);
}

#[test]
fn given_several_sources_when_picking_then_first_holder_wins() {
    let primary = json!({"a": 1});
    let secondary = json!({"a": 9, "b": 2});

    let picked = aget(&["a", "b", "c"], [&primary, &secondary]);

    assert_eq!(Value::Object(picked), json!({"a": 1, "b": 2, "c": null}));
}

#[test]
fn given_scalar_source_when_picking_then_it_fills_missing_and_stops() {
    let first = json!({"a": 1});
    let default = json!("n/a");
    let ignored = json!({"b": 2});

    let picked = aget(&["b", "a"], [&first, &default, &ignored]);

    assert_eq!(
        picked.keys().map(String::as_str).collect::<Vec<_>>(),
        ["b", "a"]
    );
    assert_eq!(Value::Object(picked), json!({"a": 1, "b": "n/a"}));
}

#[test]
fn given_no_sources_when_picking_then_all_null() {
    let picked = aget(&["x"], std::iter::empty::<&Value>());
    assert_eq!(Value::Object(picked), json!({"x": null}));
}

#[test]
fn given_key_list_when_intersecting_then_keeps_map_order() {
    let kept = intersect_key(&sample(), &["d", "a", "zz"]);
    assert_eq!(keys(&kept), ["a", "d"]);
}

#[test]
fn given_key_list_when_diffing_then_drops_listed_keys() {
    let rest = diff_key(&sample(), &["b", "zz"]);
    assert_eq!(keys(&rest), ["a", "c", "d"]);
}

#[test]
fn given_key_list_when_unsetting_then_removes_in_place() {
    let mut map = sample();
    unset_key(&mut map, &["a", "c"]);
    assert_eq!(keys(&map), ["b", "d"]);
}

#[test]
fn given_key_when_shifting_then_returns_value_and_removes_it() {
    let mut map = sample();

    assert_eq!(shift_key(&mut map, "b"), Some(2));
    assert_eq!(shift_key(&mut map, "b"), None);
    assert_eq!(keys(&map), ["a", "c", "d"]);
}

#[test]
fn given_keys_when_shifting_many_then_returns_values_in_key_order() {
    let mut map = sample();

    assert_eq!(shift_keys(&mut map, &["c", "x", "a"]), [Some(3), None, Some(1)]);
    assert_eq!(keys(&map), ["b", "d"]);
}

#[test]
fn given_records_when_intersecting_then_works_on_record_sets() {
    let records: Records = serde_json::from_value(json!({
        "1": {"name": "a"},
        "2": {"name": "b"}
    }))
    .unwrap();

    assert_eq!(keys(&intersect_key(&records, &["2"])), ["2"]);
}

#[test]
fn given_unicode_and_slashes_when_encoding_then_left_unescaped() {
    let encoded = json_encode(&json!({"path": "a/b", "word": "привет", "n": [1, 2]})).unwrap();
    assert_eq!(encoded, r#"{"path":"a/b","word":"привет","n":[1,2]}"#);
}
