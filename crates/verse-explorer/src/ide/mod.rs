//! Editor-agnostic positions and locations, plus their LSP conversions.

pub mod lsp;
pub mod navigation;

pub use navigation::{IdeLocation, IdePosition, IdeRange};
