//! Symbol-chain exploration.
//!
//! Starting from the symbol under the caret, an exploration follows type
//! annotations forward into a chain, mirrors each chain entry's declaration
//! into a tree of children and base definitions, and lays the forest out for
//! the graph surface. Every lookup goes through
//! [`SymbolIntelligence`](crate::intel::SymbolIntelligence), and every
//! missing answer shrinks the result rather than failing it.

mod chain;
pub mod classify;
pub mod error;
pub mod layout;
mod resolver;
pub mod scanner;
mod session;
pub mod symbol;
mod tree;

pub use classify::{Classification, classify};
pub use error::ExplorerError;
pub use layout::{EdgeStyle, GraphPlan, PlanStep, PlannedEdge, PlannedNode, Position};
pub use resolver::ResolvedSymbol;
pub use session::{ExplorerMap, ExplorerSession};
pub use symbol::{ExpandableSymbol, IdGenerator, RootSymbol, SequentialIds, SimpleSymbol, SymbolLocation, UuidIds};
pub use tree::inheritance_candidates;
