use crate::{
    subgraphs::state::{ObjectType, Subgraph},
    supergraph::state::{ExtensionType, ObjectTypeInGraph, SupergraphState},
};

pub(super) fn visit(state: &mut SupergraphState, subgraph: &Subgraph, type_name: &str, object: &ObjectType) {
    let type_state = state.objects.entry(type_name.to_owned()).or_default();

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

    // A v1 `@extends` does not count as a definition even when the SDL spells it as a plain
    // `type` block.
    let has_definition_here = object.has_definition && !(subgraph.is_v1() && object.extends_directive);

    type_state.has_definition |= has_definition_here;
    type_state.is_entity |= object.is_entity();
    type_state.interfaces.extend(object.interfaces.iter().cloned());

    let in_graph = ObjectTypeInGraph {
        has_definition: has_definition_here,
        extension: object.is_extension(),
        extension_type: if object.extends_directive {
            Some(ExtensionType::Directive)
        } else if object.extends_keyword {
            Some(ExtensionType::Keyword)
        } else {
            None
        },
        external: object.external,
        keys: object.keys.clone(),
        inaccessible: object.common.inaccessible,
        shareable: object.shareable,
        interfaces: object.interfaces.iter().cloned().collect(),
        version: subgraph.version,
    };

    let type_is_real_extension = in_graph.is_real_extension();

    type_state.by_graph.insert(subgraph.name.clone(), in_graph);

    for (field_name, field) in &object.fields {
        let field_state = type_state.fields.entry(field_name.clone()).or_default();
        let field_is_external = super::is_external_in_graph(field, subgraph.version, type_is_real_extension);

        super::merge_output_field(field_state, field, subgraph, field_is_external);
    }
}
