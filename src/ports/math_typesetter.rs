//! Math typesetter port.

use thiserror::Error;

/// How a formula is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathDisplay {
    Inline,
    Block,
}

/// Port for turning TeX source into a typeset form.
pub trait MathTypesetter: Send + Sync {
    fn typeset(&self, source: &str, display: MathDisplay) -> Result<String, TypesetError>;
}

/// The TeX source could not be typeset.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Typesetting failed: {0}")]
pub struct TypesetError(pub String);
