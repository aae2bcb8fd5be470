//! Completion provider adapter for the kro-core catalogs.

use kro_core::authoring::{completion_candidates, CompletionCandidate, CompletionKind};
use tower_lsp::lsp_types::{
    CompletionItem, CompletionItemKind, Documentation, InsertTextFormat, MarkupContent,
    MarkupKind, Position,
};

fn completion_kind(kind: CompletionKind) -> CompletionItemKind {
    match kind {
        CompletionKind::Keyword => CompletionItemKind::KEYWORD,
        CompletionKind::Property => CompletionItemKind::PROPERTY,
        CompletionKind::Variable => CompletionItemKind::VARIABLE,
        CompletionKind::Function => CompletionItemKind::FUNCTION,
    }
}

fn to_completion_item(candidate: &CompletionCandidate) -> CompletionItem {
    CompletionItem {
        label: candidate.label.to_string(),
        kind: Some(completion_kind(candidate.kind)),
        detail: Some(candidate.detail.to_string()),
        documentation: Some(Documentation::MarkupContent(MarkupContent {
            kind: MarkupKind::Markdown,
            value: candidate.documentation.to_string(),
        })),
        insert_text: Some(candidate.insert_text.to_string()),
        insert_text_format: Some(InsertTextFormat::PLAIN_TEXT),
        ..Default::default()
    }
}

/// Return completion items for a document position.
pub fn completion_items_for_document(content: &str, position: Position) -> Vec<CompletionItem> {
    let position = kro_core::Position::new(position.line, position.character);
    completion_candidates(content, position)
        .items
        .iter()
        .map(to_completion_item)
        .collect()
}
