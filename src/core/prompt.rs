//! Renders [`ImageParameters`] as natural-language prompts.
//!
//! Two renderings are produced from the same field order and fallback text:
//! a compact numbered list for display and copying, and a verbose one with
//! emphasized labels that is sent to the API.

use std::fmt::Write;

use super::params::{Field, ImageParameters};

/// Text used for a field the user left blank
pub const NOT_SPECIFIED: &str = "Not specified";

const COMPACT_HEADER: &str = "Create an image with the following specifications:";
const VERBOSE_HEADER: &str =
    "Create a high-quality image based on the following structured specification:";
const VERBOSE_INSTRUCTION: &str =
    "Please ensure the image adheres strictly to the visual style and atmosphere described.";

fn field_value(params: &ImageParameters, field: Field) -> &str {
    params.value(field).unwrap_or(NOT_SPECIFIED)
}

/// Numbered plain list shown to the user and copied to the clipboard
pub fn compact_prompt(params: &ImageParameters) -> String {
    let mut out = String::from(COMPACT_HEADER);
    for (i, field) in Field::all().iter().enumerate() {
        let _ = write!(
            out,
            "\n{}. {}: {}",
            i + 1,
            field.compact_label(),
            field_value(params, *field)
        );
    }
    let _ = write!(out, "\nRatio: {}", params.aspect_ratio);
    out
}

/// Instruction-style prompt used as the request payload
pub fn verbose_prompt(params: &ImageParameters) -> String {
    let mut out = String::from(VERBOSE_HEADER);
    out.push('\n');
    for (i, field) in Field::all().iter().enumerate() {
        let _ = write!(
            out,
            "\n{}. **{}**: {}",
            i + 1,
            field.verbose_label(),
            field_value(params, *field)
        );
    }
    let _ = write!(
        out,
        "\n{}. **Aspect Ratio**: {}",
        Field::all().len() + 1,
        params.aspect_ratio
    );
    out.push_str("\n\n");
    out.push_str(VERBOSE_INSTRUCTION);
    out
}
