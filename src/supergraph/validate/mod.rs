mod inaccessible;

use crate::{diagnostics::Diagnostics, supergraph::state::SupergraphState};

/// Checks that only make sense on the merged state, after all subgraphs contributed.
pub(crate) fn validate_supergraph(state: &SupergraphState, diagnostics: &mut Diagnostics) {
    inaccessible::validate(state, diagnostics);
}
