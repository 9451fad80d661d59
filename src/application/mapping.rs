//! Tag mapping sources: mapping files and `key=tag` pairs

use crate::application::format::InputFormat;
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{TagMapping, Value};

/// Parse a mapping document: a flat table of key to tag strings.
pub fn parse_mapping(format: InputFormat, content: &str) -> ApplicationResult<TagMapping> {
    let value = format.parse(content)?;
    let Value::Mapping(table) = value else {
        return Err(ApplicationError::InvalidMapping {
            message: "mapping document must be a table of key = tag".to_string(),
        });
    };

    let mut mapping = TagMapping::new();
    for (key, tag) in table.iter() {
        match tag.as_scalar() {
            Some(scalar) => mapping.insert(key, scalar.to_string()),
            None => {
                return Err(ApplicationError::InvalidMapping {
                    message: format!("tag for key {key:?} must be a string"),
                })
            }
        }
    }
    Ok(mapping)
}

/// Parse one `key=tag` pair. The tag may be empty; the key may not.
pub fn parse_tag_pair(pair: &str) -> ApplicationResult<(String, String)> {
    let (key, tag) = pair
        .split_once('=')
        .ok_or_else(|| ApplicationError::InvalidMapping {
            message: format!("expected KEY=TAG, got {pair:?}"),
        })?;
    let key = key.trim();
    if key.is_empty() {
        return Err(ApplicationError::InvalidMapping {
            message: format!("empty key in {pair:?}"),
        });
    }
    Ok((key.to_string(), tag.trim().to_string()))
}

/// Parse a list of `key=tag` pairs; later pairs win.
pub fn parse_tag_pairs<S: AsRef<str>>(pairs: &[S]) -> ApplicationResult<TagMapping> {
    let mut mapping = TagMapping::new();
    for pair in pairs {
        let (key, tag) = parse_tag_pair(pair.as_ref())?;
        mapping.insert(key, tag);
    }
    Ok(mapping)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_pair_when_parsing_then_splits_on_first_equals() {
        let (key, tag) = parse_tag_pair("title=h1").unwrap();
        assert_eq!(key, "title");
        assert_eq!(tag, "h1");

        let (key, tag) = parse_tag_pair("a=b=c").unwrap();
        assert_eq!(key, "a");
        assert_eq!(tag, "b=c");
    }

    #[test]
    fn given_pair_with_empty_tag_when_parsing_then_ok() {
        let (key, tag) = parse_tag_pair("skip=").unwrap();
        assert_eq!(key, "skip");
        assert_eq!(tag, "");
    }

    #[test]
    fn given_malformed_pair_when_parsing_then_invalid_mapping() {
        assert!(parse_tag_pair("title").is_err());
        assert!(parse_tag_pair("=h1").is_err());
    }

    #[test]
    fn given_repeated_key_when_parsing_pairs_then_last_wins() {
        let mapping = parse_tag_pairs(&["title=h1", "title=h2"]).unwrap();
        assert_eq!(mapping.get("title"), Some("h2"));
        assert_eq!(mapping.len(), 1);
    }

    #[test]
    fn given_toml_table_when_parsing_mapping_then_loads_tags() {
        let mapping = parse_mapping(InputFormat::Toml, "title = \"h1\"\nbody = \"p\"\n").unwrap();
        assert_eq!(mapping.get("title"), Some("h1"));
        assert_eq!(mapping.get("body"), Some("p"));
    }

    #[test]
    fn given_nested_table_when_parsing_mapping_then_invalid_mapping() {
        let result = parse_mapping(InputFormat::Json, r#"{"title": {"nested": "h1"}}"#);
        assert!(matches!(result, Err(ApplicationError::InvalidMapping { .. })));
    }

    #[test]
    fn given_list_root_when_parsing_mapping_then_invalid_mapping() {
        let result = parse_mapping(InputFormat::Json, r#"["h1"]"#);
        assert!(matches!(result, Err(ApplicationError::InvalidMapping { .. })));
    }
}
