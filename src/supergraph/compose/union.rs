use crate::{
    subgraphs::state::{Subgraph, UnionType},
    supergraph::state::SupergraphState,
};

pub(super) fn visit(state: &mut SupergraphState, subgraph: &Subgraph, type_name: &str, union: &UnionType) {
    let type_state = state.unions.entry(type_name.to_owned()).or_default();

    type_state.tags.extend(union.common.tags.iter().cloned());
    type_state.inaccessible |= union.common.inaccessible;

    if type_state.description.is_none() {
        type_state.description = union.description.clone();
    }

    for member in &union.members {
        type_state
            .members
            .entry(member.clone())
            .or_default()
            .insert(subgraph.name.clone());
    }

    type_state.by_graph.insert(subgraph.name.clone());
}
