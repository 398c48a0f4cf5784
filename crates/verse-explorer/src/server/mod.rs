pub(crate) mod commands;
pub(crate) mod handler;
pub(crate) mod state;

pub use commands::{NAVIGATE_TO_SYMBOL, SHOW_REFERENCE_MAP};
pub use state::VerseExplorerServer;
