//! The boundary to the graph-rendering surface: an ordered stream of
//! `addNode`/`addEdge` messages out, `navigateToSymbol` in.

pub mod messages;
pub mod render;

pub use messages::{EdgePayload, GraphMessage, GraphMessages, GroupNode, InboundMessage, NodePayload, SymbolNode};
pub use render::{describe, render};
