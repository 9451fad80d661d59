//! Tests for input format loading: key order and scalar kinds per format

use rstest::rstest;

use value2md::{convert, InputFormat, Scalar, Value};

const JSON_DOC: &str = r#"{
  "zeta": "first",
  "alpha": {"mid": "second"},
  "list": ["x", 2, 1.5]
}"#;

const YAML_DOC: &str = r#"
zeta: first
alpha:
  mid: second
list:
  - x
  - 2
  - 1.5
"#;

const TOML_DOC: &str = r#"
zeta = "first"
list = ["x", 2, 1.5]

[alpha]
mid = "second"
"#;

fn keys(value: &Value) -> Vec<String> {
    value
        .as_mapping()
        .expect("mapping root")
        .iter()
        .map(|(k, _)| k.to_string())
        .collect()
}

#[rstest]
#[case(InputFormat::Json, JSON_DOC, vec!["zeta", "alpha", "list"])]
#[case(InputFormat::Yaml, YAML_DOC, vec!["zeta", "alpha", "list"])]
#[case(InputFormat::Toml, TOML_DOC, vec!["zeta", "list", "alpha"])]
fn given_document_when_parsing_then_key_order_preserved(
    #[case] format: InputFormat,
    #[case] doc: &str,
    #[case] expected: Vec<&str>,
) {
    let value = format.parse(doc).unwrap();
    assert_eq!(keys(&value), expected);
}

#[rstest]
#[case(InputFormat::Json, JSON_DOC)]
#[case(InputFormat::Yaml, YAML_DOC)]
#[case(InputFormat::Toml, TOML_DOC)]
fn given_document_when_parsing_then_list_scalars_typed(
    #[case] format: InputFormat,
    #[case] doc: &str,
) {
    let value = format.parse(doc).unwrap();
    let list = value.as_mapping().unwrap().get("list").unwrap();

    assert_eq!(
        list,
        &Value::Sequence(vec![
            Value::Scalar(Scalar::Text("x".into())),
            Value::Scalar(Scalar::Integer(2)),
            Value::Scalar(Scalar::Float(1.5)),
        ])
    );
}

#[test]
fn given_yaml_document_when_converting_then_level_markup() {
    let value = InputFormat::Yaml.parse(YAML_DOC).unwrap();
    assert_eq!(
        convert(&value, None, 2).unwrap(),
        "#first\n##second\nx\n\n2\n\n1.5\n\n"
    );
}

#[test]
fn given_many_keys_when_parsing_json_then_order_is_not_sorted() {
    let doc = r#"{"c": "3", "a": "1", "b": "2"}"#;
    let value = InputFormat::Json.parse(doc).unwrap();
    assert_eq!(convert(&value, None, 2).unwrap(), "#3\n#1\n#2\n");
}

#[rstest]
#[case(InputFormat::Json, "[1, 2")]
#[case(InputFormat::Yaml, "a: [1, 2")]
#[case(InputFormat::Toml, "a = ")]
fn given_broken_document_when_parsing_then_error_names_format(
    #[case] format: InputFormat,
    #[case] doc: &str,
) {
    let err = format.parse(doc).unwrap_err();
    assert!(
        err.to_string().contains(&format!("cannot parse {format} input")),
        "unexpected error: {err}"
    );
}
