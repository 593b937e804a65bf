//! HTML presentation adapter.

mod fragment;

pub use fragment::HtmlFragmentRenderer;
