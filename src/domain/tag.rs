//! Key-to-role tag mapping

use std::collections::BTreeMap;

use crate::domain::error::{DomainError, DomainResult};

/// Tag value that removes an inherited tag entry when layers are merged.
pub const TAG_NEGATION: &str = "!";

/// Markup role a tag selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagRole {
    Paragraph,
    ListItem,
    Image,
    /// Heading with the given number of `#` markers.
    Heading(u8),
    /// Any other non-empty tag; rendered as a paragraph.
    Unknown,
}

impl TagRole {
    /// Interpret a non-empty tag.
    ///
    /// Tags starting with `h` are headings whose level is the final character,
    /// so `h3` is level 3 and `h10` is level 0. `key` only feeds the error.
    pub fn parse(key: &str, tag: &str) -> DomainResult<Self> {
        if tag.starts_with('h') {
            return tag
                .chars()
                .last()
                .and_then(|c| c.to_digit(10))
                .map(|d| TagRole::Heading(d as u8))
                .ok_or_else(|| DomainError::InvalidTagFormat {
                    key: key.to_string(),
                    tag: tag.to_string(),
                });
        }
        Ok(match tag {
            "p" => TagRole::Paragraph,
            "li" => TagRole::ListItem,
            "img" => TagRole::Image,
            _ => TagRole::Unknown,
        })
    }
}

/// Caller-supplied table from mapping keys to markup tags.
///
/// Tags are kept as written and interpreted only when a scalar under that key
/// is rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagMapping {
    tags: BTreeMap<String, String>,
}

impl TagMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, tag: impl Into<String>) {
        self.tags.insert(key.into(), tag.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.tags.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tags.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Overlay `other` onto self; entries of `other` win per key and a
    /// [`TAG_NEGATION`] entry removes the key.
    pub fn merge(&mut self, other: &TagMapping) {
        for (key, tag) in other.iter() {
            if tag == TAG_NEGATION {
                self.remove(key);
            } else {
                self.insert(key, tag);
            }
        }
    }

    /// Role for `key`, or `None` when the key is unmapped or mapped to "".
    pub fn role_for(&self, key: &str) -> DomainResult<Option<TagRole>> {
        match self.get(key) {
            None | Some("") => Ok(None),
            Some(tag) => TagRole::parse(key, tag).map(Some),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TagMapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = TagMapping::new();
        for (k, v) in iter {
            mapping.insert(k, v);
        }
        mapping
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_known_tags_when_parsing_then_maps_roles() {
        assert_eq!(TagRole::parse("k", "p").unwrap(), TagRole::Paragraph);
        assert_eq!(TagRole::parse("k", "li").unwrap(), TagRole::ListItem);
        assert_eq!(TagRole::parse("k", "img").unwrap(), TagRole::Image);
        assert_eq!(TagRole::parse("k", "h1").unwrap(), TagRole::Heading(1));
        assert_eq!(TagRole::parse("k", "h9").unwrap(), TagRole::Heading(9));
        assert_eq!(TagRole::parse("k", "blockquote").unwrap(), TagRole::Unknown);
    }

    #[test]
    fn given_multi_digit_heading_when_parsing_then_uses_last_digit() {
        assert_eq!(TagRole::parse("k", "h10").unwrap(), TagRole::Heading(0));
    }

    #[test]
    fn given_heading_without_digit_when_parsing_then_invalid_tag_format() {
        let err = TagRole::parse("title", "html").unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidTagFormat {
                key: "title".into(),
                tag: "html".into()
            }
        );
        assert!(TagRole::parse("title", "h").is_err());
    }

    #[test]
    fn given_empty_or_missing_tag_when_role_for_then_none() {
        let mapping: TagMapping = [("empty", "")].into_iter().collect();
        assert_eq!(mapping.role_for("empty").unwrap(), None);
        assert_eq!(mapping.role_for("missing").unwrap(), None);
    }

    #[test]
    fn given_overlay_when_merging_then_overlay_wins() {
        let mut base: TagMapping = [("title", "h1"), ("body", "p")].into_iter().collect();
        let overlay: TagMapping = [("title", "h2"), ("pic", "img")].into_iter().collect();

        base.merge(&overlay);

        assert_eq!(base.get("title"), Some("h2"));
        assert_eq!(base.get("body"), Some("p"));
        assert_eq!(base.get("pic"), Some("img"));
        assert_eq!(base.len(), 3);
    }

    #[test]
    fn given_negation_in_overlay_when_merging_then_key_removed() {
        let mut base: TagMapping = [("title", "h1"), ("body", "p")].into_iter().collect();
        let overlay: TagMapping = [("body", "!"), ("missing", "!")].into_iter().collect();

        base.merge(&overlay);

        assert_eq!(base.get("title"), Some("h1"));
        assert_eq!(base.get("body"), None);
        assert_eq!(base.get("missing"), None);
        assert_eq!(base.len(), 1);
    }
}
