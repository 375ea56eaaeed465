//! Output renderers for parse results.

mod json;
mod text;

pub use json::{to_json, JsonFormat};
pub use text::{sections_outline, validation_report};
