use tower_lsp::lsp_types::{DocumentSymbol, Location, Position, Range, SymbolKind, Url};

use crate::{
    ide::navigation::{IdeLocation, IdePosition, IdeRange},
    intel::{OutlineKind, OutlineNode},
};

pub fn lsp_position_to_ide(position: Position) -> IdePosition {
    IdePosition::new(position.line, position.character)
}

pub fn ide_position_to_lsp(position: IdePosition) -> Position {
    Position::new(position.line, position.character)
}

pub fn ide_range_to_lsp(range: IdeRange) -> Range {
    Range::new(ide_position_to_lsp(range.start), ide_position_to_lsp(range.end))
}

pub fn ide_location_to_lsp(location: &IdeLocation) -> Option<Location> {
    let uri = Url::from_file_path(&location.file_path).ok()?;
    Some(Location {
        uri,
        range: ide_range_to_lsp(location.range),
    })
}

pub fn outline_kind_to_lsp(kind: OutlineKind) -> SymbolKind {
    match kind {
        OutlineKind::Module => SymbolKind::MODULE,
        OutlineKind::Class => SymbolKind::CLASS,
        OutlineKind::Interface => SymbolKind::INTERFACE,
        OutlineKind::Struct => SymbolKind::STRUCT,
        OutlineKind::Enum => SymbolKind::ENUM,
        OutlineKind::EnumMember => SymbolKind::ENUM_MEMBER,
        OutlineKind::Method => SymbolKind::METHOD,
        OutlineKind::Function => SymbolKind::FUNCTION,
        OutlineKind::Property => SymbolKind::PROPERTY,
        OutlineKind::Variable => SymbolKind::VARIABLE,
        OutlineKind::Constant => SymbolKind::CONSTANT,
    }
}

/// Map an outline tree to nested LSP document symbols.
pub fn outline_to_document_symbols(nodes: &[OutlineNode]) -> Vec<DocumentSymbol> {
    nodes
        .iter()
        .map(|node| {
            let range = ide_range_to_lsp(node.range);
            let name_end = IdePosition::new(
                node.range.start.line,
                node.range.start.character + node.name.encode_utf16().count() as u32,
            );
            let children = outline_to_document_symbols(&node.children);
            #[allow(deprecated)]
            DocumentSymbol {
                name: node.name.clone(),
                detail: (!node.detail.is_empty()).then(|| node.detail.clone()),
                kind: outline_kind_to_lsp(node.kind),
                tags: None,
                deprecated: None,
                range,
                selection_range: Range::new(range.start, ide_position_to_lsp(name_end)),
                children: if children.is_empty() {
                    None
                } else {
                    Some(children)
                },
            }
        })
        .collect()
}
