use crate::{
    subgraphs::state::{InterfaceType, ObjectType, Subgraph},
    supergraph::state::{InterfaceTypeInGraph, SupergraphState},
};

pub(super) fn visit(state: &mut SupergraphState, subgraph: &Subgraph, type_name: &str, interface: &InterfaceType) {
    let type_state = state.interfaces.entry(type_name.to_owned()).or_default();

    super::merge_common(
        &interface.common,
        &mut type_state.tags,
        &mut type_state.inaccessible,
        &mut type_state.authenticated,
        &mut type_state.policies,
        &mut type_state.scopes,
        &mut type_state.cost,
    );

    if type_state.description.is_none() {
        type_state.description = interface.description.clone();
    }

    type_state.is_entity |= !interface.keys.is_empty();
    type_state.interfaces.extend(interface.interfaces.iter().cloned());

    type_state.by_graph.insert(
        subgraph.name.clone(),
        InterfaceTypeInGraph {
            keys: interface.keys.clone(),
            is_interface_object: false,
            version: subgraph.version,
        },
    );

    for (field_name, field) in &interface.fields {
        let field_state = type_state.fields.entry(field_name.clone()).or_default();

        super::merge_output_field(field_state, field, subgraph, field.is_external());
    }
}

/// An object annotated with `@interfaceObject` stands in for the interface of the same name: its
/// fields and keys contribute to the interface type, and every object implementing the interface
/// gains the fields this subgraph added.
pub(super) fn visit_interface_object(
    state: &mut SupergraphState,
    subgraph: &Subgraph,
    type_name: &str,
    object: &ObjectType,
) {
    let type_state = state.interfaces.entry(type_name.to_owned()).or_default();

    super::merge_common(
        &object.common,
        &mut type_state.tags,
        &mut type_state.inaccessible,
        &mut type_state.authenticated,
        &mut type_state.policies,
        &mut type_state.scopes,
        &mut type_state.cost,
    );

    if type_state.description.is_none() {
        type_state.description = object.description.clone();
    }

    type_state.is_entity |= object.is_entity();
    type_state.has_interface_object = true;

    type_state.by_graph.insert(
        subgraph.name.clone(),
        InterfaceTypeInGraph {
            keys: object.keys.clone(),
            is_interface_object: true,
            version: subgraph.version,
        },
    );

    for (field_name, field) in &object.fields {
        let field_state = type_state.fields.entry(field_name.clone()).or_default();

        super::merge_output_field(field_state, field, subgraph, field.is_external());
    }
}
