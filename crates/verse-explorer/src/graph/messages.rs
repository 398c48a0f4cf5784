use serde::{Deserialize, Serialize};

use crate::explorer::{EdgeStyle, Position, SymbolLocation};

/// Outbound message, tagged by `command`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum GraphMessage {
    AddNode {
        tiddler: NodePayload,
        position: Position,
    },
    AddEdge {
        edge: EdgePayload,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NodePayload {
    Symbol(SymbolNode),
    Group(GroupNode),
}

/// A declaration node. `title` is unique per map; `caption` is what the
/// surface displays and may repeat.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolNode {
    #[serde(rename = "tmap.id")]
    pub id: String,
    pub title: String,
    pub caption: String,
    pub tags: Vec<String>,
    pub text: String,
    pub location: SymbolLocation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupNode {
    #[serde(rename = "tmap.id")]
    pub id: String,
    pub title: String,
    pub caption: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgePayload {
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub style: EdgeStyle,
}

/// Result body of a map request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphMessages {
    pub messages: Vec<GraphMessage>,
}

/// Messages coming back from the surface.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum InboundMessage {
    NavigateToSymbol {
        location: SymbolLocation,
    },
}

#[cfg(test)]
#[path = "../../tests/src/graph/messages_tests.rs"]
mod tests;
