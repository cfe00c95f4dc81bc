use crate::{
    diagnostics::{Diagnostics, ErrorCode},
    link::FederationVersion,
    subgraphs::state::Subgraph,
};

/// Federation features this implementation does not compose yet. Importing them is a hard
/// error rather than a silently wrong supergraph.
pub(super) fn validate(subgraph: &Subgraph, diagnostics: &mut Diagnostics) {
    if subgraph.version < FederationVersion::V2_8 {
        return;
    }

    let Some(federation_link) = subgraph.links.iter().find(|link| link.is_federation()) else {
        return;
    };

    for directive in ["@context", "@fromContext"] {
        if federation_link.imports_element(directive) {
            diagnostics.push_subgraph_error(
                &subgraph.name,
                format_args!("{directive} directive is not yet supported."),
                ErrorCode::UnsupportedFeature,
            );
        }
    }
}
