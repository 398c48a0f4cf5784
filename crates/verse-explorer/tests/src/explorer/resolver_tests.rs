use std::{path::Path, sync::Arc};

use super::*;
use crate::{
    config::{ExplorerSettings, IdStrategy, LayoutSettings},
    intel::{MemoryIntelligence, OutlineNode},
};

const SCORE: &str = "/game/score.verse";
const USAGE: &str = "/game/usage.verse";

const SCORE_TEXT: &str = "\
score_manager := class:
    Add(Time : float) : void= # hello
    Total : float = 0.0
";

const USAGE_TEXT: &str = "\
Run(M : score_manager):void=
    M.Add(1.0)
";

fn intelligence() -> MemoryIntelligence {
    let intel = MemoryIntelligence::new();
    intel.add_document(SCORE, SCORE_TEXT).expect("absolute path");
    intel.add_document(USAGE, USAGE_TEXT).expect("absolute path");
    intel
}

fn session<I: SymbolIntelligence>(intel: I) -> ExplorerSession<I> {
    let settings = ExplorerSettings {
        id_strategy: IdStrategy::Sequential,
        ..ExplorerSettings::default()
    };
    ExplorerSession::new(Arc::new(intel), settings, LayoutSettings::default())
}

async fn resolve<I: SymbolIntelligence>(
    session: &ExplorerSession<I>,
    path: &str,
    line: u32,
    character: u32,
) -> Option<ResolvedSymbol> {
    let document = session.open(Path::new(path)).await.expect("registered document");
    session.resolve_at(&document, IdePosition::new(line, character)).await
}

fn location(
    path: &str,
    line: u32,
    start: u32,
    end: u32,
) -> IdeLocation {
    IdeLocation::new(path, IdeRange::new(IdePosition::new(line, start), IdePosition::new(line, end)))
}

#[tokio::test]
async fn word_without_definition_resolves_to_itself() {
    let session = session(intelligence());
    let symbol = resolve(&session, SCORE, 1, 5).await.expect("symbol");
    assert_eq!(symbol.name, "Add");
    assert_eq!(symbol.location, location(SCORE, 1, 4, 7));
    assert!(symbol.kind.is_empty());
    assert!(symbol.detail.is_empty());
}

#[tokio::test]
async fn caret_just_after_word_still_resolves() {
    let session = session(intelligence());
    let symbol = resolve(&session, SCORE, 1, 7).await.expect("symbol");
    assert_eq!(symbol.name, "Add");
}

#[tokio::test]
async fn whitespace_has_no_symbol() {
    let session = session(intelligence());
    assert!(resolve(&session, SCORE, 1, 1).await.is_none());
    assert!(resolve(&session, SCORE, 40, 0).await.is_none());
}

#[tokio::test]
async fn definition_in_other_file_is_followed() {
    let intel = intelligence();
    let usage = intel.word_range(USAGE, 0, "score_manager").expect("usage range");
    let target = intel.word_location(SCORE, 0, "score_manager").expect("target");
    intel.add_definition(USAGE, usage, target);

    let session = session(intel);
    let symbol = resolve(&session, USAGE, 0, 10).await.expect("symbol");
    assert_eq!(symbol.name, "score_manager");
    assert_eq!(symbol.location, location(SCORE, 0, 0, 13));
}

#[tokio::test]
async fn mismatched_definition_recovers_named_token() {
    let intel = intelligence();
    let usage = intel.word_range(USAGE, 1, "Add").expect("usage range");
    // Lands on `Time` instead of `Add`.
    intel.add_definition(USAGE, usage, location(SCORE, 1, 8, 12));

    let session = session(intel);
    let symbol = resolve(&session, USAGE, 1, 7).await.expect("symbol");
    assert_eq!(symbol.name, "Add");
    assert_eq!(symbol.location, location(SCORE, 1, 4, 7));
}

#[tokio::test]
async fn definition_on_whitespace_recovers_named_token() {
    let intel = intelligence();
    let usage = intel.word_range(USAGE, 1, "Add").expect("usage range");
    intel.add_definition(USAGE, usage, location(SCORE, 1, 0, 0));

    let session = session(intel);
    let symbol = resolve(&session, USAGE, 1, 7).await.expect("symbol");
    assert_eq!(symbol.location, location(SCORE, 1, 4, 7));
}

#[tokio::test]
async fn failed_recovery_yields_nothing() {
    let intel = intelligence();
    let usage = intel.word_range(USAGE, 1, "Add").expect("usage range");
    intel.add_definition(USAGE, usage, location(SCORE, 2, 4, 9));

    let session = session(intel);
    assert!(resolve(&session, USAGE, 1, 7).await.is_none());
}

#[tokio::test]
async fn definition_in_unknown_document_yields_nothing() {
    let intel = intelligence();
    let usage = intel.word_range(USAGE, 1, "Add").expect("usage range");
    intel.add_definition(USAGE, usage, location("/game/missing.verse", 0, 0, 3));

    let session = session(intel);
    assert!(resolve(&session, USAGE, 1, 7).await.is_none());
}

#[tokio::test]
async fn resolving_is_idempotent() {
    let intel = intelligence();
    let usage = intel.word_range(USAGE, 0, "score_manager").expect("usage range");
    let target = intel.word_location(SCORE, 0, "score_manager").expect("target");
    intel.add_definition(USAGE, usage, target.clone());
    intel.add_definition(SCORE, target.range, target);

    let session = session(intel);
    let first = resolve(&session, USAGE, 0, 10).await.expect("symbol");
    let again = resolve(
        &session,
        SCORE,
        first.location.range.start.line,
        first.location.range.start.character,
    )
    .await
    .expect("symbol");
    assert_eq!(first, again);
}

/// Reports word ranges that end on the following line.
struct SpanningWords(MemoryIntelligence);

#[tower_lsp::async_trait]
impl SymbolIntelligence for SpanningWords {
    async fn open_document(
        &self,
        path: &Path,
    ) -> Option<Arc<Document>> {
        self.0.open_document(path).await
    }

    fn word_range_at(
        &self,
        _document: &Document,
        position: IdePosition,
    ) -> Option<IdeRange> {
        Some(IdeRange::new(position, IdePosition::new(position.line + 1, 0)))
    }

    async fn definition_of(
        &self,
        document: &Document,
        position: IdePosition,
    ) -> Option<IdeLocation> {
        self.0.definition_of(document, position).await
    }

    async fn outline_of(
        &self,
        document: &Document,
    ) -> Vec<OutlineNode> {
        self.0.outline_of(document).await
    }
}

#[tokio::test]
async fn multi_line_word_range_is_rejected() {
    let session = session(SpanningWords(intelligence()));
    assert!(resolve(&session, SCORE, 1, 5).await.is_none());
}
