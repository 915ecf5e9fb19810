use async_stringify::{Array, Identity, Object, Space, Value, render, stringify, to_json};
use futures::executor::block_on;
use serde_json::json;

fn fixtures() -> Vec<serde_json::Value> {
    vec![
        json!(null),
        json!("plain"),
        json!(42),
        json!([]),
        json!({}),
        json!({"name": "John", "age": 30}),
        json!({"z": 1, "a": 2, "m": [true, false, null]}),
        json!({"nested": {"list": [1, 2.5, {"deep": ["x", "y"]}], "empty": {}}}),
        json!([{"id": 1, "tags": ["a", "b"]}, {"id": 2, "tags": []}]),
        json!({"quote": "say \"hi\"", "ctrl": "tab\tnewline\n", "unicode": "héllo ☃"}),
    ]
}

#[test]
fn identity_matches_serde_json() -> Result<(), Box<dyn std::error::Error>> {
    for json in fixtures() {
        let compact = block_on(stringify(Value::from(json.clone()), &Identity, None))?;
        assert_eq!(compact, Some(serde_json::to_string(&json)?), "compact: {json}");

        let pretty = block_on(stringify(
            Value::from(json.clone()),
            &Identity,
            Some(Space::Count(2)),
        ))?;
        assert_eq!(pretty, Some(serde_json::to_string_pretty(&json)?), "pretty: {json}");
    }
    Ok(())
}

#[test]
fn identity_matches_the_reference_renderer() -> Result<(), Box<dyn std::error::Error>> {
    let date = Object::new();
    date.set_hook(|_| Value::from("2020-01-01T00:00:00.000Z"));
    let holes = Array::with_len(2);
    holes.set(1, "last");
    let shared: Object = [("v", 1)].into_iter().collect();
    let root: Object = [
        ("date", Value::Object(date)),
        ("holes", Value::Array(holes)),
        ("a", Value::Object(shared.clone())),
        ("b", Value::Object(shared)),
        ("nan", Value::from(f64::NAN)),
        ("gone", Value::Undefined),
    ]
    .into_iter()
    .collect();
    let root = Value::Object(root);

    for space in [None, Some(Space::Count(3)), Some(Space::from("->"))] {
        let reference = render(&root, space.as_ref())?;
        let resolved = block_on(stringify(root.clone(), &Identity, space))?;
        assert_eq!(resolved, reference);
    }
    assert_eq!(
        render(&root, None)?.as_deref(),
        Some(r#"{"date":"2020-01-01T00:00:00.000Z","holes":[null,"last"],"a":{"v":1},"b":{"v":1},"nan":null}"#)
    );
    Ok(())
}

#[test]
fn second_pass_preserves_content() -> Result<(), Box<dyn std::error::Error>> {
    for json in fixtures() {
        let first = block_on(stringify(Value::from(json), &Identity, None))?
            .expect("fixtures are serializable");
        let reparsed: serde_json::Value = serde_json::from_str(&first)?;
        let second = block_on(stringify(Value::from(reparsed.clone()), &Identity, None))?
            .expect("fixtures are serializable");
        assert_eq!(first, second);
        assert_eq!(to_json(&Value::from(reparsed.clone()))?, Some(reparsed));
    }
    Ok(())
}

#[test]
fn numbers_print_like_the_reference_encoder() -> Result<(), Box<dyn std::error::Error>> {
    let cases = [
        (9_007_199_254_740_992.0, "9007199254740992"),
        (1e16, "10000000000000000"),
        (1.2345678901234567e19, "12345678901234567000"),
        (1e20, "100000000000000000000"),
        (1e21, "1e+21"),
        (-1e21, "-1e+21"),
        (1e-7, "1e-7"),
        (0.000001, "0.000001"),
        (-0.0, "0"),
        (0.5, "0.5"),
        (-0.25, "-0.25"),
        (0.1, "0.1"),
        (123.456, "123.456"),
        (f64::INFINITY, "null"),
    ];
    for (n, expected) in cases {
        let text = block_on(stringify(Value::from(n), &Identity, None))?;
        assert_eq!(text.as_deref(), Some(expected), "{n:e}");
        assert_eq!(render(&Value::from(n), None)?.as_deref(), Some(expected), "{n:e}");
    }

    let nested: Array = [1e21, 2e-7, 4096.0].into_iter().collect();
    let root: Object = [("id", Value::from(1e17)), ("list", Value::Array(nested))]
        .into_iter()
        .collect();
    let out = block_on(stringify(Value::Object(root), &Identity, Some(Space::Count(1))))?;
    assert_eq!(
        out.as_deref(),
        Some("{\n \"id\": 100000000000000000,\n \"list\": [\n  1e+21,\n  2e-7,\n  4096\n ]\n}")
    );
    Ok(())
}
