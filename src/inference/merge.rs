use serde_json::{Map, Value};

/// Collapse the object elements of an array into one representative object.
///
/// Non-object elements are skipped. Keys keep their first-seen order. When a
/// key repeats, a null value yields to a non-null one; between two non-null
/// values an array beats anything else, an object beats a scalar, a string
/// beats a number, and otherwise the first value stays.
pub fn merge_objects<'a, I>(items: I) -> Map<String, Value>
where
    I: IntoIterator<Item = &'a Value>,
{
    let mut out = Map::new();
    for item in items {
        let Value::Object(map) = item else { continue };
        for (key, value) in map {
            match out.get_mut(key) {
                None => {
                    out.insert(key.clone(), value.clone());
                }
                Some(existing) => {
                    if prefers(existing, value) {
                        *existing = value.clone();
                    }
                }
            }
        }
    }
    out
}

/// Whether `new` should replace `existing` for the same key.
fn prefers(existing: &Value, new: &Value) -> bool {
    match (existing, new) {
        (_, Value::Null) => false,
        (Value::Null, _) => true,
        (Value::Array(_), _) => false,
        (_, Value::Array(_)) => true,
        (Value::Object(_), _) => false,
        (_, Value::Object(_)) => true,
        (Value::Number(_), Value::String(_)) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_yields_and_string_beats_number() {
        let items = json!([{"a": 1, "b": "x"}, {"a": null, "b": 2, "c": true}]);
        let merged = merge_objects(items.as_array().unwrap());
        assert_eq!(Value::Object(merged), json!({"a": 1, "b": "x", "c": true}));
    }

    #[test]
    fn number_is_replaced_by_later_string() {
        let items = json!([{"code": 7}, {"code": "A7"}]);
        let merged = merge_objects(items.as_array().unwrap());
        assert_eq!(merged["code"], json!("A7"));
    }

    #[test]
    fn structured_values_win() {
        let items = json!([
            {"meta": "flat", "tags": "one", "owner": null},
            {"meta": {"k": 1}, "tags": ["a", "b"], "owner": {"id": 3}},
            {"meta": [1], "tags": {"x": 1}},
        ]);
        let merged = merge_objects(items.as_array().unwrap());
        assert_eq!(merged["meta"], json!([1]));
        assert_eq!(merged["tags"], json!(["a", "b"]));
        assert_eq!(merged["owner"], json!({"id": 3}));
    }

    #[test]
    fn first_seen_wins_otherwise_and_order_is_first_seen() {
        let items = json!([
            {"z": true, "a": 1.5},
            "skipped",
            [{"nested": 1}],
            {"a": 2, "m": false, "z": false},
        ]);
        let merged = merge_objects(items.as_array().unwrap());
        assert_eq!(merged.keys().collect::<Vec<_>>(), vec!["z", "a", "m"]);
        assert_eq!(merged["a"], json!(1.5));
        assert_eq!(merged["z"], json!(true));
    }

    #[test]
    fn no_objects_gives_empty_map() {
        let items = json!([1, "two", null]);
        assert!(merge_objects(items.as_array().unwrap()).is_empty());
    }
}
