//! Render structured data as Markdown.
//!
//! A nested value (mappings, lists, scalars) is walked in one of two modes:
//! - **Level mode** (no tag mapping): scalars nested up to the title level become
//!   headings with as many `#` as their depth, deeper ones paragraphs.
//! - **Mapping mode** (tag mapping given): each scalar's key selects its markup
//!   (`h1`..`h9`, `p`, `li`, `img`); unmapped keys are dropped.
//!
//! Scalars inside lists are always paragraphs. Scalar text is emitted verbatim.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use application::{ApplicationError, ApplicationResult, InputFormat};
pub use domain::{
    convert, Converter, DomainError, DomainResult, Mapping, Scalar, TagMapping, TagRole, Value,
};
