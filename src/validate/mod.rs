//! Validation of each subgraph in isolation, plus cross-subgraph `@link` consistency. These
//! rules run after ingestion and before merging.

mod list_size;
mod override_rules;
mod unsupported;

use crate::{diagnostics::Diagnostics, link, subgraphs::Subgraphs};

pub(crate) fn validate_subgraphs(subgraphs: &Subgraphs, diagnostics: &mut Diagnostics) {
    for subgraph in subgraphs.iter() {
        list_size::validate(subgraph, diagnostics);
        override_rules::validate(subgraph, diagnostics);
        unsupported::validate(subgraph, diagnostics);
    }

    link::check_import_name_consistency(
        subgraphs
            .iter()
            .map(|subgraph| (subgraph.name.as_str(), subgraph.links.as_slice())),
        diagnostics,
    );
}
