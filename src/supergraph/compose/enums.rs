use crate::{
    subgraphs::state::{EnumType, Subgraph},
    supergraph::state::SupergraphState,
};

pub(super) fn visit(state: &mut SupergraphState, subgraph: &Subgraph, type_name: &str, enum_type: &EnumType) {
    let type_state = state.enums.entry(type_name.to_owned()).or_default();

    type_state.tags.extend(enum_type.common.tags.iter().cloned());
    type_state.inaccessible |= enum_type.common.inaccessible;
    type_state.authenticated |= enum_type.common.authenticated;
    type_state.cost = super::max_nullable(type_state.cost, enum_type.common.cost);

    if type_state.description.is_none() {
        type_state.description = enum_type.description.clone();
    }

    for (value_name, value) in &enum_type.values {
        let value_state = type_state.values.entry(value_name.clone()).or_default();

        value_state.tags.extend(value.common.tags.iter().cloned());
        value_state.inaccessible |= value.common.inaccessible;

        if value_state.description.is_none() {
            value_state.description = value.description.clone();
        }

        if value_state.deprecated.is_none() {
            value_state.deprecated = value.deprecated.clone();
        }

        value_state.by_graph.insert(subgraph.name.clone());
    }

    type_state.by_graph.insert(subgraph.name.clone());
}
