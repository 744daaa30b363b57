//! Diagnostics support for Parsley.
//!
//! - [`LineOffsetTable`] / [`SourceFile`]: byte offsets to 1-based line and column
//! - [`Problem`] / [`render_problem`]: terminal reports with source excerpts

mod emitter;
pub mod span_utils;

pub use emitter::{render_problem, Problem};
pub use span_utils::{LineOffsetTable, SourceFile};
