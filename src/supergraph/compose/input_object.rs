use crate::{
    subgraphs::state::{InputObjectType, Subgraph},
    supergraph::state::SupergraphState,
};

pub(super) fn visit(state: &mut SupergraphState, subgraph: &Subgraph, type_name: &str, input_object: &InputObjectType) {
    let type_state = state.input_objects.entry(type_name.to_owned()).or_default();

    type_state.tags.extend(input_object.common.tags.iter().cloned());
    type_state.inaccessible |= input_object.common.inaccessible;

    if type_state.description.is_none() {
        type_state.description = input_object.description.clone();
    }

    for (field_name, field) in &input_object.fields {
        let field_state = type_state.fields.entry(field_name.clone()).or_default();

        if field_state.by_graph.is_empty() {
            field_state.r#type = field.r#type.clone();
        }

        // Input fields merge towards the stricter type.
        if field.r#type.is_non_null() {
            field_state.r#type = field.r#type.clone();
        }

        field_state.tags.extend(field.common.tags.iter().cloned());
        field_state.inaccessible |= field.common.inaccessible;
        field_state.cost = super::max_nullable(field_state.cost, field.common.cost);

        if field_state.description.is_none() {
            field_state.description = field.description.clone();
        }

        if field_state.deprecated.is_none() {
            field_state.deprecated = field.deprecated.clone();
        }

        if field.default_value.is_some() {
            field_state.default_value = field.default_value.clone();
        }

        field_state.by_graph.insert(subgraph.name.clone());
    }

    type_state.by_graph.insert(subgraph.name.clone());
}
