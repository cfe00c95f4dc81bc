//! An implementation of [Apollo Federation](https://www.apollographql.com/docs/federation)
//! supergraph composition, with satisfiability validation.
//!
//! Takes any number of subgraph schemas and produces either a supergraph SDL that routers can
//! execute against, or the list of reasons composition failed.
//!
//! ```
//! use federation_composition::Subgraphs;
//!
//! let mut subgraphs = Subgraphs::default();
//!
//! subgraphs.ingest_str(
//!     r#"
//!     type Query {
//!         users: [User!]!
//!     }
//!
//!     type User @key(fields: "id") {
//!         id: ID!
//!         name: String!
//!     }
//!     "#,
//!     "users",
//!     Some("http://users.example.com/graphql"),
//! );
//!
//! subgraphs.ingest_str(
//!     r#"
//!     type User @key(fields: "id") {
//!         id: ID!
//!         reviews: [String!]!
//!     }
//!     "#,
//!     "reviews",
//!     Some("http://reviews.example.com/graphql"),
//! );
//!
//! let result = federation_composition::compose(&subgraphs);
//!
//! assert!(!result.diagnostics().any_fatal());
//! ```

#![forbid(unsafe_code)]

mod diagnostics;
mod emit_supergraph;
mod ingest_subgraph;
mod link;
mod result;
mod satisfiability;
mod subgraphs;
mod supergraph;
mod validate;

pub use self::{
    diagnostics::{Diagnostic, Diagnostics, ErrorCode},
    result::{ComposedSupergraph, CompositionResult},
    subgraphs::Subgraphs,
};

/// Compose subgraphs into a supergraph.
pub fn compose(subgraphs: &Subgraphs) -> CompositionResult {
    let mut diagnostics = diagnostics::Diagnostics::default();
    diagnostics.clone_all_from(&subgraphs.ingestion_diagnostics);

    validate::validate_subgraphs(subgraphs, &mut diagnostics);

    let state = supergraph::compose::merge_subgraphs(subgraphs);

    supergraph::validate::validate_supergraph(&state, &mut diagnostics);
    satisfiability::validate_satisfiability(&state, &mut diagnostics);

    let supergraph = if diagnostics.any_fatal() {
        None
    } else {
        Some(ComposedSupergraph {
            supergraph_sdl: emit_supergraph::emit_supergraph_sdl(&state),
            api_sdl: emit_supergraph::emit_api_sdl(&state),
        })
    };

    CompositionResult { supergraph, diagnostics }
}
