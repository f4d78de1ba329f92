//! Diagnostics for semantic analysis.
//!
//! - Error codes for searchability
//! - Clear messages (what went wrong)
//! - Primary span (where it went wrong)
//! - Notes (why it's wrong)
//!
//! Rendering diagnostics to a terminal or editor is left to the driver; this
//! crate only defines the renderer-agnostic value.

mod diagnostic;
mod error_code;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
