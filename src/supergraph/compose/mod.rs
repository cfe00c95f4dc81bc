//! Folds the per-subgraph states into one [`SupergraphState`], applying the merge policies:
//! tags union, inaccessible/authenticated any-wins, cost max, least-nullable output types,
//! first description and deprecation win.

mod enums;
mod input_object;
mod interface;
mod object;
mod scalar;
mod union;

use crate::{
    link::FederationVersion,
    subgraphs::{
        Subgraphs,
        state::{CommonDirectives, Field, ListSize, Subgraph, TypeState},
    },
    supergraph::state::{ArgumentInGraph, FieldInGraph, FieldState, GraphInfo, SupergraphState, graph_enum_name},
};

pub(crate) fn merge_subgraphs(subgraphs: &Subgraphs) -> SupergraphState {
    let mut state = SupergraphState::default();

    for subgraph in subgraphs.iter() {
        state.graphs.insert(
            subgraph.name.clone(),
            GraphInfo {
                enum_name: graph_enum_name(&subgraph.name),
                url: subgraph.url.clone(),
                version: subgraph.version,
            },
        );
    }

    for subgraph in subgraphs.iter() {
        for (type_name, ty) in &subgraph.types {
            let type_name = subgraph.canonical_root_name(type_name).unwrap_or(type_name.as_str());

            match ty {
                TypeState::Object(object) if object.interface_object => {
                    interface::visit_interface_object(&mut state, subgraph, type_name, object);
                }
                TypeState::Object(object) => object::visit(&mut state, subgraph, type_name, object),
                TypeState::Interface(interface) => interface::visit(&mut state, subgraph, type_name, interface),
                TypeState::Scalar(scalar) => scalar::visit(&mut state, subgraph, type_name, scalar),
                TypeState::Enum(enum_type) => enums::visit(&mut state, subgraph, type_name, enum_type),
                TypeState::Union(union) => union::visit(&mut state, subgraph, type_name, union),
                TypeState::InputObject(input_object) => {
                    input_object::visit(&mut state, subgraph, type_name, input_object);
                }
            }
        }
    }

    state
}

pub(super) fn merge_common(
    common: &CommonDirectives,
    tags: &mut indexmap::IndexSet<String>,
    inaccessible: &mut bool,
    authenticated: &mut bool,
    policies: &mut Vec<Vec<String>>,
    scopes: &mut Vec<Vec<String>>,
    cost: &mut Option<i64>,
) {
    tags.extend(common.tags.iter().cloned());
    *inaccessible |= common.inaccessible;
    *authenticated |= common.authenticated;
    policies.extend(common.policies.iter().cloned());
    scopes.extend(common.required_scopes.iter().cloned());
    *cost = max_nullable(*cost, common.cost);
}

pub(super) fn max_nullable(a: Option<i64>, b: Option<i64>) -> Option<i64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (value, None) | (None, value) => value,
    }
}

/// Ordered union, keeping the first sighting's position for each element.
fn nullable_array_union(existing: Option<Vec<String>>, incoming: Option<&[String]>) -> Option<Vec<String>> {
    match (existing, incoming) {
        (None, None) => None,
        (Some(existing), None) => Some(existing),
        (None, Some(incoming)) => Some(incoming.to_vec()),
        (Some(mut existing), Some(incoming)) => {
            for item in incoming {
                if !existing.contains(item) {
                    existing.push(item.clone());
                }
            }
            Some(existing)
        }
    }
}

fn merge_list_size(existing: Option<ListSize>, incoming: &ListSize) -> ListSize {
    let existing = existing.unwrap_or(ListSize {
        require_one_slicing_argument: true,
        ..Default::default()
    });

    ListSize {
        assumed_size: max_nullable(existing.assumed_size, incoming.assumed_size),
        // prefer `false`
        require_one_slicing_argument: existing.require_one_slicing_argument
            && incoming.require_one_slicing_argument,
        slicing_arguments: nullable_array_union(existing.slicing_arguments, incoming.slicing_arguments.as_deref()),
        sized_fields: nullable_array_union(existing.sized_fields, incoming.sized_fields.as_deref()),
    }
}

/// The position of the last `!` decides which rendered type is "less nullable" for the merge:
/// a trailing `!` sits later in the string than any inner one.
fn last_bang_position(rendered: &str) -> isize {
    rendered.rfind('!').map(|i| i as isize).unwrap_or(-1)
}

/// Merges one subgraph's sighting of an output field into the merged field state. Shared
/// between object and interface types.
pub(super) fn merge_output_field(
    state: &mut FieldState,
    field: &Field,
    subgraph: &Subgraph,
    field_is_external: bool,
) {
    if state.by_graph.is_empty() {
        state.r#type = field.r#type.clone();
    }

    merge_common(
        &field.common,
        &mut state.tags,
        &mut state.inaccessible,
        &mut state.authenticated,
        &mut state.policies,
        &mut state.scopes,
        &mut state.cost,
    );

    let used_as_key = field.is_used_as_key();

    if used_as_key {
        state.used_as_key = true;
    }

    // The first non-external, non-key sighting pins the type, afterwards the least nullable
    // rendering wins. External sightings never influence the merged type.
    let should_force_type = !used_as_key && !field_is_external && !state.seen_non_external;
    let should_change_type = should_force_type
        || (!field_is_external
            && last_bang_position(&state.r#type.rendered) > last_bang_position(&field.r#type.rendered));

    if should_change_type {
        state.r#type = field.r#type.clone();
    }

    if !field_is_external {
        state.seen_non_external = true;
    }

    if let Some(list_size) = &field.list_size {
        state.list_size = Some(merge_list_size(state.list_size.take(), list_size));
    }

    // First wins, except that a graph overriding an entity field gets to correct the
    // description later, at the supergraph level.
    if state.description.is_none() {
        state.description = field.description.clone();
    }

    if let Some(r#override) = &field.r#override {
        state.override_from = Some(r#override.from.clone());

        if let Some(label) = &r#override.label {
            state.override_label = Some(label.clone());
        }
    }

    // First deprecation wins.
    if state.deprecated.is_none() {
        state.deprecated = field.deprecated.clone();
    }

    state.by_graph.insert(
        subgraph.name.clone(),
        FieldInGraph {
            r#type: field.r#type.clone(),
            external: field.is_external(),
            inaccessible: field.common.inaccessible,
            description: field.description.clone(),
            override_from: field.r#override.as_ref().map(|o| o.from.clone()),
            override_label: field.r#override.as_ref().and_then(|o| o.label.clone()),
            provides: field.provides.clone(),
            requires: field.requires.clone(),
            provided: field.is_provided(),
            required: field.is_required(),
            shareable: field.is_shareable(),
            used_as_key,
            version: subgraph.version,
        },
    );

    for (argument_name, argument) in &field.arguments {
        let argument_state = state.args.entry(argument_name.clone()).or_default();

        if argument_state.by_graph.is_empty() {
            argument_state.r#type = argument.r#type.clone();
        }

        argument_state.tags.extend(argument.common.tags.iter().cloned());

        // The most required argument type wins.
        if argument.r#type.is_non_null() {
            argument_state.r#type = argument.r#type.clone();
        }

        argument_state.inaccessible |= argument.common.inaccessible;

        if argument_state.description.is_none() {
            argument_state.description = argument.description.clone();
        }

        if argument_state.deprecated.is_none() {
            argument_state.deprecated = argument.deprecated.clone();
        }

        if argument.default_value.is_some() {
            argument_state.default_value = argument.default_value.clone();
        }

        argument_state.cost = max_nullable(argument_state.cost, argument.common.cost);

        argument_state.by_graph.insert(
            subgraph.name.clone(),
            ArgumentInGraph {
                r#type: argument.r#type.clone(),
                inaccessible: argument.common.inaccessible,
                default_value: argument.default_value.clone(),
            },
        );
    }
}

pub(super) fn is_external_in_graph(field: &Field, version: FederationVersion, type_is_real_extension: bool) -> bool {
    if version.is_v1() {
        field.is_external() && type_is_real_extension
    } else {
        field.is_external()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_nullable_prefers_any_value() {
        assert_eq!(max_nullable(None, None), None);
        assert_eq!(max_nullable(Some(3), None), Some(3));
        assert_eq!(max_nullable(None, Some(7)), Some(7));
        assert_eq!(max_nullable(Some(3), Some(7)), Some(7));
        assert_eq!(max_nullable(Some(9), Some(7)), Some(9));
    }

    #[test]
    fn list_size_merge_unions_and_prefers_false() {
        let a = ListSize {
            assumed_size: Some(10),
            slicing_arguments: Some(vec!["first".to_owned()]),
            sized_fields: None,
            require_one_slicing_argument: true,
        };
        let b = ListSize {
            assumed_size: Some(50),
            slicing_arguments: Some(vec!["last".to_owned(), "first".to_owned()]),
            sized_fields: Some(vec!["edges".to_owned()]),
            require_one_slicing_argument: false,
        };

        let merged = merge_list_size(Some(merge_list_size(None, &a)), &b);

        assert_eq!(merged.assumed_size, Some(50));
        assert!(!merged.require_one_slicing_argument);
        assert_eq!(
            merged.slicing_arguments.as_deref(),
            Some(&["first".to_owned(), "last".to_owned()][..])
        );
        assert_eq!(merged.sized_fields.as_deref(), Some(&["edges".to_owned()][..]));
    }

    #[test]
    fn bang_positions() {
        assert!(last_bang_position("[A!]!") > last_bang_position("[A!]"));
        assert!(last_bang_position("[A!]") > last_bang_position("[A]"));
        assert_eq!(last_bang_position("[A]"), -1);
        assert_eq!(last_bang_position("A"), -1);
    }
}
