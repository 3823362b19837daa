//! Error types for the persona-data crate.
//!
//! Generation is deliberately forgiving: missing word lists degrade to empty
//! lists and invalid options fall back to defaults. The one failure surfaced
//! to callers is a template name that resolves to nothing, following the
//! project's error handling conventions with `thiserror`.

use thiserror::Error;

/// Errors that can occur while generating records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneratorError {
    /// The requested template name exists in no template set and no explicit
    /// template was supplied.
    #[error("template '{name}' not found")]
    TemplateNotFound {
        /// The template name that failed to resolve.
        name: String,
    },
}
