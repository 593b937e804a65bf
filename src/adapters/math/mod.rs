//! Math typesetting adapters.
//!
//! - `MathmlTypesetter` - TeX to MathML via latex2mathml (pure Rust)

mod mathml_typesetter;

pub use mathml_typesetter::MathmlTypesetter;
