//! Leaf renderers: append one markup construct to the output buffer

use std::fmt::Write;

use crate::domain::tag::TagRole;
use crate::domain::value::Scalar;

pub const HEADING_MARKER: &str = "#";
pub const INDENT: &str = "  ";
pub const LIST_MARKER: &str = "* ";
pub const IMAGE_MARKER: &str = "!";
pub const EMPTY_LINK_TEXT: &str = "[]";

/// `{value}\n\n`
pub fn paragraph(out: &mut String, value: &Scalar) {
    // Writing into a String cannot fail.
    let _ = write!(out, "{value}\n\n");
}

/// `{'#' * level}{value}\n`, no trailing blank line.
pub fn heading(out: &mut String, level: usize, value: &Scalar) {
    out.push_str(&HEADING_MARKER.repeat(level));
    let _ = writeln!(out, "{value}");
}

/// `  * {value}\n`
pub fn list_item(out: &mut String, value: &Scalar) {
    let _ = writeln!(out, "{INDENT}{LIST_MARKER}{value}");
}

/// `![]({value})\n\n`
pub fn image(out: &mut String, value: &Scalar) {
    let _ = write!(out, "{IMAGE_MARKER}{EMPTY_LINK_TEXT}({value})\n\n");
}

/// Render `value` in the markup construct selected by `role`.
pub fn render_role(out: &mut String, role: TagRole, value: &Scalar) {
    match role {
        TagRole::Heading(level) => heading(out, usize::from(level), value),
        TagRole::ListItem => list_item(out, value),
        TagRole::Image => image(out, value),
        TagRole::Paragraph | TagRole::Unknown => paragraph(out, value),
    }
}
