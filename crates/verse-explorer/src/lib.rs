pub mod cli;
pub mod config;
pub mod document;
pub mod explorer;
pub mod graph;
pub mod ide;
pub mod intel;
pub mod server;
pub mod text_pos;

pub use config::ServerSettings;
pub use explorer::{ExplorerError, ExplorerMap, ExplorerSession};
pub use graph::{GraphMessage, GraphMessages};
pub use intel::{MemoryIntelligence, SymbolIntelligence, WorkspaceIntelligence};
pub use server::VerseExplorerServer;
