//! Document conversion service
//!
//! Loads structured input, resolves the tag mapping from settings and request,
//! converts to markup and writes the result.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::format::InputFormat;
use crate::application::mapping::{parse_mapping, parse_tag_pairs};
use crate::application::{ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{Converter, TagMapping, Value};
use crate::infrastructure::traits::FileSystem;

/// Per-request options; `None` falls back to settings.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Input format (overrides extension detection)
    pub format: Option<InputFormat>,
    /// Tag mapping file (overrides the configured one)
    pub mapping_file: Option<PathBuf>,
    /// `key=tag` pairs applied on top of all other mapping sources
    pub tags: Vec<String>,
    /// Title-level ceiling for level mode
    pub title_level: Option<usize>,
    /// Nesting depth limit
    pub max_depth: Option<usize>,
}

/// Service turning structured documents into markup.
pub struct DocumentService {
    fs: Arc<dyn FileSystem>,
    settings: Arc<Settings>,
}

impl DocumentService {
    /// Create a new document service.
    pub fn new(fs: Arc<dyn FileSystem>, settings: Arc<Settings>) -> Self {
        Self { fs, settings }
    }

    /// Read and parse an input file.
    ///
    /// Format: explicit, then file extension, then configured `input_format`.
    pub fn load_value(&self, path: &Path, format: Option<InputFormat>) -> ApplicationResult<Value> {
        let format = InputFormat::resolve(format, Some(path))
            .or_else(|e| self.settings.input_format.ok_or(e))?;
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read input", path)?;
        debug!("load_value: {} as {}", path.display(), format);
        format.parse(&content)
    }

    /// Resolve the effective tag mapping.
    ///
    /// Layers (later wins per key): configured tags, mapping file, `key=tag` pairs.
    pub fn resolve_mapping(&self, options: &ConvertOptions) -> ApplicationResult<TagMapping> {
        let mut mapping = self.settings.tag_mapping();

        let mapping_file = options
            .mapping_file
            .as_deref()
            .or(self.settings.mapping_file.as_deref());
        if let Some(path) = mapping_file {
            let format = InputFormat::resolve(None, Some(path))?;
            let content = self
                .fs
                .read_to_string(path)
                .with_path_context("read mapping", path)?;
            mapping.merge(&parse_mapping(format, &content)?);
        }

        mapping.merge(&parse_tag_pairs(options.tags.as_slice())?);
        debug!("resolve_mapping: {} tags", mapping.len());
        Ok(mapping)
    }

    /// Convert an already loaded value.
    pub fn render(&self, value: &Value, options: &ConvertOptions) -> ApplicationResult<String> {
        let mapping = self.resolve_mapping(options)?;
        let title_level = options.title_level.unwrap_or(self.settings.title_level);
        let max_depth = options.max_depth.unwrap_or(self.settings.max_depth);
        debug!(
            "render: mode={}, title_level={}, max_depth={}",
            if mapping.is_empty() { "level" } else { "mapping" },
            title_level,
            max_depth
        );

        let markup = Converter::new(value)
            .with_mapping(&mapping)
            .with_title_level(title_level)
            .with_max_depth(max_depth)
            .convert()?;
        Ok(markup)
    }

    /// Convert document text (e.g. read from stdin).
    ///
    /// Format: explicit, then configured `input_format`, then JSON.
    #[instrument(skip(self, content, options))]
    pub fn convert_str(
        &self,
        content: &str,
        options: &ConvertOptions,
    ) -> ApplicationResult<String> {
        let format = options
            .format
            .or(self.settings.input_format)
            .unwrap_or(InputFormat::Json);
        let value = format.parse(content)?;
        self.render(&value, options)
    }

    /// Convert an input file.
    #[instrument(skip(self, options))]
    pub fn convert_file(
        &self,
        input: &Path,
        options: &ConvertOptions,
    ) -> ApplicationResult<String> {
        let value = self.load_value(input, options.format)?;
        self.render(&value, options)
    }

    /// Write markup to `path`, creating parent directories.
    #[instrument(skip(self, markup))]
    pub fn write_output(&self, path: &Path, markup: &str) -> ApplicationResult<()> {
        self.fs
            .ensure_parent(path)
            .with_path_context("create parent directory", path)?;
        self.fs
            .write(path, markup)
            .with_path_context("write output", path)?;
        debug!("write_output: {} bytes to {}", markup.len(), path.display());
        Ok(())
    }
}
