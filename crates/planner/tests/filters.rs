use docstore_model::{
    core::value::Value,
    filter::{Condition, ConditionKind, FilterExpression, FilterPath, Literal},
};
use docstore_planner::{
    error::PlannerError,
    schema::DocumentProperties,
    search::{FilterCompiler, SearchQueryBuilder},
};
use serde_json::json;

const COLUMNS: [&str; 3] = ["key", "leaf", "text_value"];

fn compile(props: &DocumentProperties, expression: serde_json::Value) -> FilterCompiler {
    let expression: FilterExpression = serde_json::from_value(expression).unwrap();
    FilterCompiler::new(props, expression).unwrap()
}

fn sample(kind: ConditionKind) -> Condition {
    match kind {
        ConditionKind::Eq => Condition::Eq(Literal::from("x")),
        ConditionKind::Ne => Condition::Ne(Literal::from(1.0)),
        ConditionKind::Gt => Condition::Gt(Literal::from(1.0)),
        ConditionKind::Gte => Condition::Gte(Literal::from(1.0)),
        ConditionKind::Lt => Condition::Lt(Literal::from(1.0)),
        ConditionKind::Lte => Condition::Lte(Literal::from(1.0)),
        ConditionKind::In => Condition::In(vec![Literal::from("a"), Literal::from("b")]),
        ConditionKind::Exists => Condition::Exists,
        ConditionKind::Contains => Condition::Contains(Literal::from(true)),
        ConditionKind::ContainsKey => Condition::ContainsKey("zip".to_string()),
        ConditionKind::Like => Condition::Like("J%".to_string()),
    }
}

// Scenario: {"tags": {"$contains": "javascript"}} against a four column schema.
// Expected Outcome: field equality, index pattern, leaf guard, value equality, with filtering.
#[test]
fn contains_on_top_level_array() {
    let props = DocumentProperties::with_max_depth(4);
    let compiler = compile(
        &props,
        json!({ "path": ["tags"], "condition": { "contains": "javascript" } }),
    );

    let query = compiler.build_query("store", "docs", &COLUMNS);
    assert_eq!(
        query.cql,
        "SELECT key, leaf, text_value FROM store.docs \
         WHERE p0 = ? AND p1 LIKE ? AND p2 = ? AND text_value = ? ALLOW FILTERING"
    );
    assert_eq!(
        query.values,
        vec![
            Value::from("tags"),
            Value::from("[%]"),
            Value::from(""),
            Value::from("javascript"),
        ]
    );
    assert_eq!(query.bind_markers, 0);
    assert!(query.allow_filtering);
}

// Scenario: {"a.b.arr": {"$contains": 95}}.
// Expected Outcome: three path equalities, the pattern on p3, the guard on p4, the number column.
#[test]
fn contains_on_nested_array() {
    let props = DocumentProperties::default();
    let compiler = compile(
        &props,
        json!({ "path": ["a", "b", "arr"], "condition": { "contains": 95 } }),
    );

    let query = compiler.build_query("store", "docs", &[]);
    assert_eq!(
        query.cql,
        "SELECT * FROM store.docs WHERE p0 = ? AND p1 = ? AND p2 = ? \
         AND p3 LIKE ? AND p4 = ? AND dbl_value = ? ALLOW FILTERING"
    );
    assert_eq!(query.values.last(), Some(&Value::Float(95.0)));
}

// Scenario: the array index lands in the last path column.
// Expected Outcome: no leaf guard is emitted.
#[test]
fn contains_without_room_for_leaf_guard() {
    let props = DocumentProperties::with_max_depth(2);
    let compiler = compile(
        &props,
        json!({ "path": ["tags"], "condition": { "contains": "javascript" } }),
    );

    assert_eq!(compiler.predicates().len(), 3);
    assert_eq!(
        compiler.values(),
        vec![
            Value::from("tags"),
            Value::from("[%]"),
            Value::from("javascript")
        ]
    );
}

// Scenario: every condition kind through the dispatching compiler.
// Expected Outcome: predicates and values always line up one to one.
#[test]
fn predicates_and_values_stay_aligned() {
    let props = DocumentProperties::default();
    let path = FilterPath::new(["user", "address"]).unwrap();

    for kind in ConditionKind::ALL {
        let expression = FilterExpression::new(path.clone(), sample(kind));
        let compiler = FilterCompiler::new(&props, expression).unwrap();

        assert_eq!(
            compiler.predicates().len(),
            compiler.values().len(),
            "misaligned output for {kind}"
        );
        let query = compiler.build_query("store", "docs", &COLUMNS);
        assert_eq!(query.cql.matches('?').count(), query.values.len());
    }
}

// Scenario: equality on a fully specified path.
// Expected Outcome: no ALLOW FILTERING.
#[test]
fn equality_is_index_local() {
    let props = DocumentProperties::default();
    let compiler = compile(
        &props,
        json!({ "path": ["user", "name"], "condition": { "eq": "John" } }),
    );

    let query = compiler.build_query("store", "docs", &COLUMNS);
    assert_eq!(
        query.cql,
        "SELECT key, leaf, text_value FROM store.docs WHERE p0 = ? AND p1 = ? AND text_value = ?"
    );
    assert!(!query.allow_filtering);
}

// Scenario: $exists and $containsKey on the same object.
// Expected Outcome: the column after the field holds the sentinel or the key.
#[test]
fn exists_and_contains_key() {
    let props = DocumentProperties::default();

    let exists = compile(
        &props,
        json!({ "path": ["user", "address"], "condition": "exists" }),
    );
    assert_eq!(
        exists.values(),
        vec![Value::from("user"), Value::from("address"), Value::from("")]
    );

    let contains_key = compile(
        &props,
        json!({ "path": ["user", "address"], "condition": { "contains_key": "zip" } }),
    );
    assert_eq!(
        contains_key.values(),
        vec![Value::from("user"), Value::from("address"), Value::from("zip")]
    );
    assert!(!contains_key.allow_filtering());
}

// Scenario: an equality filter restricted to one document.
// Expected Outcome: the key restriction renders last and is bound per fetch.
#[test]
fn document_scoped_query_binds_key_late() {
    let props = DocumentProperties::default();
    let compiler = compile(
        &props,
        json!({ "path": ["user", "name"], "condition": { "eq": "John" } }),
    )
    .scoped_to_document()
    .unwrap();

    let query = compiler.build_query("store", "docs", &COLUMNS);
    assert_eq!(
        query.cql,
        "SELECT key, leaf, text_value FROM store.docs \
         WHERE p0 = ? AND p1 = ? AND text_value = ? AND key = ?"
    );
    assert_eq!(query.values.len(), 3);
    assert_eq!(query.bind_markers, 1);

    let bound = query.bind(vec![Value::from("doc-1")]).unwrap();
    assert_eq!(bound.values.len(), 4);
    assert_eq!(bound.values.last(), Some(&Value::from("doc-1")));

    let err = query.bind(vec![]).unwrap_err();
    assert!(matches!(
        err,
        PlannerError::BindMismatch {
            expected: 1,
            actual: 0
        }
    ));
}

// Scenario: a CONTAINS filter asked to be restricted to one document.
// Expected Outcome: scoping is refused and the unscoped statement has no late markers.
#[test]
fn contains_is_never_document_scoped() {
    let props = DocumentProperties::with_max_depth(4);
    let compiler = compile(
        &props,
        json!({ "path": ["tags"], "condition": { "contains": "rust" } }),
    );

    assert!(compiler.bind_predicates().is_empty());
    assert_eq!(compiler.build_query("store", "docs", &COLUMNS).bind_markers, 0);

    let err = compiler.scoped_to_document().unwrap_err();
    assert!(matches!(
        err,
        PlannerError::InvalidArgument {
            actual: ConditionKind::Contains,
            ..
        }
    ));
}

// Scenario: booleans stored as numbers.
// Expected Outcome: the boolean column is compared against 1/0.
#[test]
fn numeric_booleans() {
    let props = DocumentProperties::from_json_str(
        &json!({ "max_depth": 4, "numeric_booleans": true }).to_string(),
    )
    .unwrap();
    let compiler = compile(
        &props,
        json!({ "path": ["flags"], "condition": { "contains": false } }),
    );

    let query = compiler.build_query("store", "docs", &COLUMNS);
    assert!(query.cql.contains("bool_value = ?"));
    assert_eq!(query.values.last(), Some(&Value::Int(0)));
}

// Scenario: a renamed value column that needs quoting.
// Expected Outcome: the custom column name is used and quoted.
#[test]
fn custom_table_layout() {
    let props = DocumentProperties::from_json_str(
        &json!({
            "max_depth": 4,
            "table": { "string_value_column": "StrValue", "path_column_prefix": "path_" }
        })
        .to_string(),
    )
    .unwrap();
    let compiler = compile(
        &props,
        json!({ "path": ["tags"], "condition": { "contains": "x" } }),
    );

    let query = compiler.build_query("store", "docs", &[]);
    assert_eq!(
        query.cql,
        r#"SELECT * FROM store.docs WHERE path_0 = ? AND path_1 LIKE ? AND path_2 = ? AND "StrValue" = ? ALLOW FILTERING"#
    );
}
