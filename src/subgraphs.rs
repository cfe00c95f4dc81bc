pub(crate) mod selections;
pub(crate) mod state;

use crate::diagnostics::{Diagnostics, ErrorCode};
use cynic_parser::type_system as ast;

/// The collection of subgraph schemas to compose.
///
/// Subgraphs are ingested eagerly: each call to [`Subgraphs::ingest()`] walks the document once
/// and extracts everything composition needs. Problems found during ingestion become
/// diagnostics on the composition result.
#[derive(Default)]
pub struct Subgraphs {
    pub(crate) subgraphs: Vec<state::Subgraph>,
    pub(crate) ingestion_diagnostics: Diagnostics,
}

impl Subgraphs {
    /// Add a subgraph to compose.
    pub fn ingest(&mut self, document: &ast::TypeSystemDocument, name: &str, url: Option<&str>) {
        crate::ingest_subgraph::ingest_subgraph(document, name, url, self);
    }

    /// Parse and add a subgraph. Parse errors become fatal diagnostics on the composition
    /// result instead of failing the call.
    pub fn ingest_str(&mut self, sdl: &str, name: &str, url: Option<&str>) {
        match cynic_parser::parse_type_system_document(sdl) {
            Ok(document) => self.ingest(&document, name, url),
            Err(err) => self.ingestion_diagnostics.push_subgraph_error(
                name,
                format_args!("invalid GraphQL: {err}"),
                ErrorCode::InvalidGraphql,
            ),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.subgraphs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.subgraphs.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &state::Subgraph> {
        self.subgraphs.iter()
    }
}
