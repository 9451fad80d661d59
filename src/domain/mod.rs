//! Domain layer: structured values and the markup conversion engine
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod converter;
pub mod error;
pub mod markup;
pub mod tag;
pub mod value;

pub use converter::{convert, Converter, DEFAULT_MAX_DEPTH, DEFAULT_TITLE_LEVEL};
pub use error::{DomainError, DomainResult};
pub use tag::{TagMapping, TagRole, TAG_NEGATION};
pub use value::{Mapping, Scalar, Value};
