use json2thrift::{
    apply_naming_style, convert, convert_with, generate_idl, parse_idl, EditOverlay, InferOptions,
    Modifier, NamingStyle, Session,
};
use serde_json::json;

#[test]
fn end_to_end_example() {
    let idl = convert(&json!({"id": 1, "name": "a", "tags": ["x", "y"]}));
    assert_eq!(
        idl,
        "struct GeneratedStruct {\n  1: optional i64 id;\n  2: optional string name;\n  3: optional list<string> tags;\n}"
    );
}

#[test]
fn heterogeneous_array_elements_merge_into_one_struct() {
    let value = json!({
        "users": [
            {"id": 1, "name": "Zhang", "email": "z@example.com", "age": 25},
            {"id": 2, "name": "Li", "phone": "13800138000", "department": "R&D"},
            {"id": 3, "name": "Wang", "email": "w@example.com", "phone": "13900139000", "age": 30, "isManager": true}
        ]
    });
    let expected = "\
struct UsersItem {
  1: optional i64 id;
  2: optional string name;
  3: optional string email;
  4: optional i64 age;
  5: optional string phone;
  6: optional string department;
  7: optional bool isManager;
}

struct GeneratedStruct {
  1: optional list<UsersItem> users;
}";
    assert_eq!(convert(&value), expected);
}

#[test]
fn root_shapes() {
    assert_eq!(
        convert(&json!([{"a": 1}, {"b": "x"}])),
        "struct GeneratedStruct {\n  1: optional i64 a;\n  2: optional string b;\n}\n\n// Root type: list<GeneratedStruct>"
    );
    assert_eq!(convert(&json!(["a", "b"])), "// Root type: list<string>");
    assert_eq!(convert(&json!([])), "// Root type: list<string>");
    assert_eq!(convert(&json!(5)), "// Generated Thrift IDL\n\n// Root type: i64");
    assert_eq!(convert(&json!({})), "struct GeneratedStruct {\n}");
    assert_eq!(
        convert(&json!([[{"k": true}]])),
        "struct ArrayItem {\n  1: optional bool k;\n}\n\n// Root type: list<list<ArrayItem>>"
    );
}

#[test]
fn dependencies_are_defined_before_use() {
    let value = json!({
        "customer": {"id": 9},
        "lines": [{"item": {"sku": "a"}, "qty": 1}],
        "item": {"sku": "b"}
    });
    let idl = convert_with(&value, &InferOptions::default().with_root_name("Order"));
    let at = |needle: &str| idl.find(needle).unwrap_or_else(|| panic!("missing {needle} in\n{idl}"));
    assert!(at("struct Item {") < at("struct LinesItem {"));
    assert!(at("struct LinesItem {") < at("struct Order {"));
    assert!(at("struct Customer {") < at("struct Order {"));
    // the second `item` object has the same field names, so it reuses `Item`
    assert_eq!(idl.matches("struct Item {").count(), 1);
    assert!(idl.contains("  3: optional Item item;"));
}

#[test]
fn same_field_names_dedup_even_with_different_types() {
    let value = json!({
        "a": {"point": {"x": 1, "y": 2}},
        "b": {"point": {"x": "left", "y": null}}
    });
    let idl = convert(&value);
    assert_eq!(idl.matches("struct Point {").count(), 1);

    let strict = convert_with(&value, &InferOptions { strict_dedup: true, ..InferOptions::default() });
    assert!(strict.contains("struct Point {"));
    assert!(strict.contains("struct PointXY {"));
}

#[test]
fn inference_is_deterministic() {
    let value = json!({"orders": [{"id": 1, "meta": {"tags": ["a"]}}, {"id": "2", "meta": {"tags": []}}]});
    assert_eq!(convert(&value), convert(&value));
}

#[test]
fn conversions_are_independent_across_threads() {
    let value = json!({"node": {"leaf": {"v": 1.5}}, "list": [{"leaf": {"v": 2}}]});
    let expected = convert(&value);
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let value = value.clone();
            std::thread::spawn(move || convert(&value))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn parse_of_render_round_trips_loaded_structs() {
    let mut session = Session::new();
    let structs = session
        .load_from_json(&json!({
            "id": 1,
            "profile": {"bio": "x", "links": [{"url": "u", "rank": 0.5}]},
            "matrix": [[1, 2], [3]],
            "flags": [true]
        }))
        .to_vec();
    let text = generate_idl(&structs, &EditOverlay::new());
    assert_eq!(parse_idl(&text, &EditOverlay::new()), structs);
}

#[test]
fn round_trip_keeps_non_identifier_keys() {
    let mut session = Session::new();
    let structs = session
        .load_from_json(&json!({
            "first-name": "a",
            "@type": "x",
            "content-type": {"charset": "utf8", "x-params": {"q": 0.5}}
        }))
        .to_vec();
    let names: Vec<&str> = structs.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["X-params", "Content-type", "Root"]);

    let text = generate_idl(&structs, &EditOverlay::new());
    assert_eq!(parse_idl(&text, &EditOverlay::new()), structs);

    let mut reloaded = Session::new();
    reloaded.load_from_text(&text);
    assert_eq!(reloaded.idl(), text);
}

#[test]
fn overrides_keep_indices_and_reset_restores_names() {
    let mut session = Session::new();
    session.load_from_json(&json!({"id": 1, "name": "a", "tags": ["x"]}));
    let before: Vec<u32> = session.view()[0].fields.iter().map(|f| f.index).collect();

    session.set_name("Root.id", "userId");
    session.set_modifier("Root.tags", Modifier::Required);
    session.set_modifier("Root.name", Modifier::None);
    let view = session.view();
    let after: Vec<u32> = view[0].fields.iter().map(|f| f.index).collect();
    assert_eq!(before, after);
    assert_eq!(
        session.idl(),
        "struct Root {\n  1: optional i64 userId;\n  2: string name;\n  3: required list<string> tags;\n}"
    );

    session.reset_changes();
    assert!(session.idl().contains("  1: optional i64 id;"));
}

#[test]
fn edited_text_reloads_with_overlay() {
    let mut session = Session::new();
    session.load_from_json(&json!({"user_id": 1}));
    session.apply_naming_style("Root.user_id", NamingStyle::PascalCase);
    let text = session.idl();
    assert_eq!(text, "struct Root {\n  1: optional i64 UserId;\n}");

    // the renamed text is a new source: its path is keyed by the new name
    let mut reloaded = Session::new();
    reloaded.load_from_text(&text);
    assert_eq!(reloaded.structs()[0].fields[0].path, "Root.UserId");
    assert_eq!(reloaded.idl(), text);
}

#[test]
fn naming_styles() {
    assert_eq!(apply_naming_style("user_id", NamingStyle::CamelCase), "userId");
    assert_eq!(apply_naming_style("UserId", NamingStyle::SnakeCase), "user_id");
}
