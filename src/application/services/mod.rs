//! Application services

pub mod document;

pub use document::{ConvertOptions, DocumentService};
