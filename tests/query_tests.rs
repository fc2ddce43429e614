//! Integration tests for path queries and filters over decoded documents.

use jsonquery::{
    decode_json, decode_yaml, evaluate_filter, evaluate_path, parse_filter, parse_path,
    QueryError, Selection, Value,
};

fn users() -> Value {
    decode_json(r#"{"users":[{"name":"John","age":30},{"name":"Jane","age":25}]}"#).unwrap()
}

#[test]
fn test_wildcard_names_scenario() {
    let doc = users();
    let result = evaluate_path(&doc, &parse_path("users[*].name").unwrap()).unwrap();
    assert_eq!(result.to_value(), decode_json(r#"["John","Jane"]"#).unwrap());
}

#[test]
fn test_filter_age_scenario() {
    let list = decode_json(r#"[{"age":30},{"age":25}]"#).unwrap();
    let Value::Array(items) = &list else {
        panic!("expected array");
    };
    let kept = evaluate_filter(items, &parse_filter("age > 25").unwrap());
    assert_eq!(kept, vec![&decode_json(r#"{"age":30}"#).unwrap()]);
}

#[test]
fn test_missing_key_scenario() {
    let doc = decode_json(r#"{"a":{"b":1}}"#).unwrap();
    let err = evaluate_path(&doc, &parse_path("a.c").unwrap()).unwrap_err();
    match err {
        QueryError::PathNotFound { prefix, segment } => {
            assert_eq!(prefix, "a");
            assert_eq!(segment, "c");
        }
        other => panic!("expected PathNotFound, got {:?}", other),
    }
}

#[test]
fn test_strict_path_never_returns_null_for_missing_key() {
    let doc = decode_json(r#"{"a":{"b":null}}"#).unwrap();
    assert_eq!(
        evaluate_path(&doc, &parse_path("a.b").unwrap()).unwrap(),
        Selection::Single(&Value::Null)
    );
    assert!(evaluate_path(&doc, &parse_path("a.x").unwrap()).is_err());
}

#[test]
fn test_wildcard_count_matches_elements_with_trailing_key() {
    let doc = decode_json(
        r#"{"orders":[
            {"items":[{"sku":"a"},{"sku":"b"}]},
            {"items":[]},
            {"note":"no items"},
            {"items":[{"sku":"c"},{"qty":2}]}
        ]}"#,
    )
    .unwrap();
    let result = evaluate_path(&doc, &parse_path("orders[*].items[*].sku").unwrap()).unwrap();
    assert_eq!(result.to_value(), decode_json(r#"["a","b","c"]"#).unwrap());
}

#[test]
fn test_path_then_filter_over_yaml() {
    let yaml = r#"
team:
  members:
    - name: Ann
      role: dev
      level: 3
    - name: Bo
      role: ops
      level: 1
    - name: Cy
      role: dev
      level: 2
"#;
    let doc = decode_yaml(yaml).unwrap();
    let members = evaluate_path(&doc, &parse_path("team.members[*]").unwrap()).unwrap();

    let devs = evaluate_filter(members.values(), &parse_filter("role == dev").unwrap());
    let names: Vec<&str> = devs
        .iter()
        .filter_map(|m| m.get("name").and_then(Value::as_str))
        .collect();
    assert_eq!(names, vec!["Ann", "Cy"]);

    let senior = evaluate_filter(devs, &parse_filter("level >= 3").unwrap());
    assert_eq!(senior.len(), 1);
}

#[test]
fn test_regex_filter_over_emails() {
    let doc = decode_json(
        r#"[{"email":"a@example.com"},{"email":"b@other.org"},{"email":"c@example.com"}]"#,
    )
    .unwrap();
    let all = evaluate_path(&doc, &parse_path("[*]").unwrap()).unwrap();
    let kept = evaluate_filter(all.values(), &parse_filter("email ~ \"@example.com\"").unwrap());
    assert_eq!(kept.len(), 2);
}

#[test]
fn test_concurrent_queries_share_one_tree() {
    let doc = users();
    let names = parse_path("users[*].name").unwrap();
    let ages = parse_path("users[*].age").unwrap();

    std::thread::scope(|scope| {
        let a = scope.spawn(|| evaluate_path(&doc, &names).unwrap().len());
        let b = scope.spawn(|| evaluate_path(&doc, &ages).unwrap().len());
        assert_eq!(a.join().unwrap(), 2);
        assert_eq!(b.join().unwrap(), 2);
    });
}

#[test]
fn test_syntax_errors_are_typed() {
    assert!(matches!(
        parse_path("users[x]"),
        Err(QueryError::PathSyntax { .. })
    ));
    assert!(matches!(
        parse_filter("age <> 3"),
        Err(QueryError::FilterSyntax { .. })
    ));
    assert!(matches!(
        decode_yaml("a:\n\t- b"),
        Err(jsonquery::DecodeError::Yaml { line: 2, .. })
    ));
}
