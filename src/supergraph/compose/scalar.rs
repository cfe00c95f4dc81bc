use crate::{
    subgraphs::state::{ScalarType, Subgraph},
    supergraph::state::SupergraphState,
};

pub(super) fn visit(state: &mut SupergraphState, subgraph: &Subgraph, type_name: &str, scalar: &ScalarType) {
    let type_state = state.scalars.entry(type_name.to_owned()).or_default();

    super::merge_common(
        &scalar.common,
        &mut type_state.tags,
        &mut type_state.inaccessible,
        &mut type_state.authenticated,
        &mut type_state.policies,
        &mut type_state.scopes,
        &mut type_state.cost,
    );

    if type_state.description.is_none() {
        type_state.description = scalar.description.clone();
    }

    // First specifiedBy wins.
    if type_state.specified_by.is_none() {
        type_state.specified_by = scalar.specified_by.clone();
    }

    type_state.by_graph.insert(subgraph.name.clone());
}
