//! Tree-to-markup conversion.
//!
//! Two traversal modes share the list walk and the leaf renderers:
//! - Level mode: heading depth follows nesting depth, capped by the title level.
//! - Mapping mode: a tag mapping picks the markup role per key; unmapped
//!   scalars are dropped.

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::markup;
use crate::domain::tag::TagMapping;
use crate::domain::value::{Mapping, Value};

/// Nesting depth up to which Level mode renders scalars as headings.
pub const DEFAULT_TITLE_LEVEL: usize = 2;

/// Deepest container nesting accepted before conversion fails.
///
/// Below the 128-level recursion limit of the JSON and YAML parsers, so the
/// guard also triggers for parsed input.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Converts one value into markup.
///
/// ```
/// use value2md::{Converter, Mapping, Value};
///
/// let inner: Mapping = [("b", "text")].into_iter().collect();
/// let root: Mapping = [("a", Value::from(inner))].into_iter().collect();
/// let root = Value::from(root);
///
/// assert_eq!(Converter::new(&root).convert().unwrap(), "##text\n");
/// assert_eq!(
///     Converter::new(&root).with_title_level(1).convert().unwrap(),
///     "text\n\n"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Converter<'a> {
    value: &'a Value,
    mapping: Option<&'a TagMapping>,
    title_level: usize,
    max_depth: usize,
}

impl<'a> Converter<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self {
            value,
            mapping: None,
            title_level: DEFAULT_TITLE_LEVEL,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Select Mapping mode. An empty mapping leaves Level mode in place.
    pub fn with_mapping(mut self, mapping: &'a TagMapping) -> Self {
        self.mapping = Some(mapping);
        self
    }

    pub fn with_title_level(mut self, title_level: usize) -> Self {
        self.title_level = title_level;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Run the conversion. Scalar roots produce empty output.
    pub fn convert(self) -> DomainResult<String> {
        let mode = match self.mapping {
            Some(mapping) if !mapping.is_empty() => Mode::Tagged(mapping),
            _ => Mode::Levelled,
        };
        let mut walker = Walker {
            mode,
            title_level: self.title_level,
            max_depth: self.max_depth,
            out: String::new(),
        };

        match (self.value, mode) {
            (Value::Mapping(map), Mode::Tagged(tags)) => walker.walk_tagged(tags, map, 1)?,
            (Value::Mapping(map), Mode::Levelled) => walker.walk_levelled(map, 1, 1)?,
            (Value::Sequence(items), _) => walker.walk_list(items, 1, 1)?,
            _ => {}
        }
        Ok(walker.out)
    }
}

/// Convert `value` with the default depth limit.
pub fn convert(
    value: &Value,
    mapping: Option<&TagMapping>,
    title_level: usize,
) -> DomainResult<String> {
    let converter = Converter::new(value).with_title_level(title_level);
    match mapping {
        Some(mapping) => converter.with_mapping(mapping).convert(),
        None => converter.convert(),
    }
}

#[derive(Debug, Clone, Copy)]
enum Mode<'a> {
    Levelled,
    Tagged(&'a TagMapping),
}

/// One conversion run. `level` drives headings in Level mode, `depth` counts
/// every container entered and feeds the depth guard.
struct Walker<'a> {
    mode: Mode<'a>,
    title_level: usize,
    max_depth: usize,
    out: String,
}

impl<'a> Walker<'a> {
    fn guard(&self, depth: usize) -> DomainResult<()> {
        if depth > self.max_depth {
            return Err(DomainError::MaxDepthExceeded {
                limit: self.max_depth,
            });
        }
        Ok(())
    }

    fn walk_tagged(
        &mut self,
        tags: &'a TagMapping,
        map: &Mapping,
        depth: usize,
    ) -> DomainResult<()> {
        self.guard(depth)?;
        for (key, value) in map.iter() {
            match value {
                Value::Mapping(inner) => self.walk_tagged(tags, inner, depth + 1)?,
                Value::Sequence(items) => self.walk_list(items, 1, depth + 1)?,
                Value::Scalar(scalar) => {
                    if let Some(role) = tags.role_for(key)? {
                        markup::render_role(&mut self.out, role, scalar);
                    }
                }
                Value::Bool(_) | Value::Null => {}
            }
        }
        Ok(())
    }

    fn walk_levelled(&mut self, map: &Mapping, level: usize, depth: usize) -> DomainResult<()> {
        self.guard(depth)?;
        for (_, value) in map.iter() {
            match value {
                Value::Scalar(scalar) if level <= self.title_level => {
                    markup::heading(&mut self.out, level, scalar)
                }
                Value::Scalar(scalar) => markup::paragraph(&mut self.out, scalar),
                Value::Mapping(inner) => self.walk_levelled(inner, level + 1, depth + 1)?,
                Value::Sequence(items) => self.walk_list(items, level + 1, depth + 1)?,
                Value::Bool(_) | Value::Null => {}
            }
        }
        Ok(())
    }

    fn walk_list(&mut self, items: &[Value], level: usize, depth: usize) -> DomainResult<()> {
        self.guard(depth)?;
        for item in items {
            match item {
                Value::Mapping(map) => match self.mode {
                    Mode::Tagged(tags) => self.walk_tagged(tags, map, depth + 1)?,
                    Mode::Levelled => self.walk_levelled(map, level, depth + 1)?,
                },
                // A list inside a list restarts at level 1.
                Value::Sequence(inner) => self.walk_list(inner, 1, depth + 1)?,
                Value::Scalar(scalar) => markup::paragraph(&mut self.out, scalar),
                Value::Bool(_) | Value::Null => {}
            }
        }
        Ok(())
    }
}
