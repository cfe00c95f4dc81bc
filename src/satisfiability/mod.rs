//! Proves that every field of the merged schema can actually be resolved by some sequence of
//! subgraph hops, or reports why not. Nodes are (type, subgraph) pairs, edges are field
//! resolutions, entity jumps and abstract narrowing; the search runs once per override-label
//! hypothesis.

mod errors;
mod finder;
mod graph;
mod labels;
mod validator;

use fixedbitset::FixedBitSet;
use indexmap::IndexSet;

use crate::{
    diagnostics::{Diagnostics, ErrorCode},
    subgraphs::selections::Selection,
    supergraph::state::SupergraphState,
};

use self::{
    errors::SatisfiabilityError,
    graph::{Graph, NodeId},
    labels::OverrideLabels,
    validator::{MoveValidator, OperationPath},
};

const ROOT_TYPE_NAMES: [&str; 3] = ["Query", "Mutation", "Subscription"];

pub(crate) fn validate_satisfiability(state: &SupergraphState, diagnostics: &mut Diagnostics) {
    let graph = Graph::build(state);
    let reachable = reachable_nodes(&graph, state);
    let hypotheses = label_hypotheses(state);

    let mut validator = MoveValidator::new(state, &graph);
    let mut reported: IndexSet<String> = IndexSet::new();

    for labels in &hypotheses {
        for (type_name, object) in &state.objects {
            for field_name in object.fields.keys() {
                check_field(
                    &mut validator,
                    &reachable,
                    labels,
                    type_name,
                    object.by_graph.keys().map(String::as_str),
                    field_name,
                    &mut reported,
                );
            }
        }

        for (type_name, interface) in &state.interfaces {
            for field_name in interface.fields.keys() {
                check_field(
                    &mut validator,
                    &reachable,
                    labels,
                    type_name,
                    interface.by_graph.keys().map(String::as_str),
                    field_name,
                    &mut reported,
                );
            }
        }
    }

    // An @interfaceObject without any concrete implementer anywhere cannot ever produce a
    // concrete type.
    for (type_name, interface) in &state.interfaces {
        if !interface.has_interface_object {
            continue;
        }

        let has_implementer = state
            .objects
            .values()
            .any(|object| object.interfaces.contains(type_name));

        if has_implementer {
            continue;
        }

        for (graph_name, in_graph) in &interface.by_graph {
            if in_graph.is_interface_object {
                let error = SatisfiabilityError::for_no_implementation(graph_name, type_name);
                reported.insert(format!("[{graph_name}] {error}"));
            }
        }
    }

    for message in reported {
        diagnostics.push_error(message, ErrorCode::SatisfiabilityError);
    }
}

/// One field, checked from every subgraph anchor the schema can actually reach. A request can
/// enter the type through any of those anchors, so each of them must resolve the field,
/// directly or through jumps.
#[allow(clippy::too_many_arguments)]
fn check_field<'a>(
    validator: &mut MoveValidator<'_>,
    reachable: &FixedBitSet,
    labels: &OverrideLabels,
    type_name: &str,
    graphs_declaring_type: impl Iterator<Item = &'a str>,
    field_name: &str,
    reported: &mut IndexSet<String>,
) {
    let graph = validator.graph;
    let graph_count = validator.graph_count();

    let selection = [Selection::Field {
        field: field_name.to_owned(),
        subselection: Vec::new(),
    }];

    let mut candidates = 0usize;
    let mut errors: Vec<SatisfiabilityError> = Vec::new();

    // No subgraph is treated as visited yet: the requirement fetches of a plan may come back
    // through the anchor itself.
    let visited_graphs = FixedBitSet::with_capacity(graph_count);

    for graph_name in graphs_declaring_type {
        let Some(node) = graph.node_id(type_name, graph_name) else {
            continue;
        };

        if !reachable.contains(node.0) {
            continue;
        }

        candidates += 1;

        let path = OperationPath::new(node);

        if let Err(mut attempt_errors) =
            validator.can_resolve_selection_set(&selection, &path, &[], &visited_graphs, &[], labels)
        {
            errors.append(&mut attempt_errors);
        }
    }

    // The type is unreachable from the root types in every subgraph. Nothing to report: its
    // fields can never be requested.
    if candidates == 0 {
        return;
    }

    for error in errors {
        let source = error.source_graph_name.clone();
        reported.insert(format!("[{source}] {error}"));
    }
}

/// All override labels that appear anywhere, explored under the all-false and all-true
/// assignments. With no labels there is a single empty hypothesis.
fn label_hypotheses(state: &SupergraphState) -> Vec<OverrideLabels> {
    let mut label_names: IndexSet<&str> = IndexSet::new();

    for fields in state
        .objects
        .values()
        .map(|object| &object.fields)
        .chain(state.interfaces.values().map(|interface| &interface.fields))
    {
        for field in fields.values() {
            for in_graph in field.by_graph.values() {
                if let Some(label) = &in_graph.override_label {
                    label_names.insert(label);
                }
            }
        }
    }

    if label_names.is_empty() {
        return vec![OverrideLabels::default()];
    }

    let mut all_false = OverrideLabels::default();
    let mut all_true = OverrideLabels::default();

    for label in label_names {
        all_false.set(label, false);
        all_true.set(label, true);
    }

    vec![all_false, all_true]
}

/// Structural reachability from the root operation types, ignoring resolvability: a node that
/// is not even structurally reachable never needs its fields checked.
fn reachable_nodes(graph: &Graph, state: &SupergraphState) -> FixedBitSet {
    let mut reachable = FixedBitSet::with_capacity(graph.node_count());
    let mut stack: Vec<NodeId> = Vec::new();

    for root_type in ROOT_TYPE_NAMES {
        for graph_name in state.graphs.keys() {
            if let Some(node) = graph.node_id(root_type, graph_name) {
                if !reachable.contains(node.0) {
                    reachable.insert(node.0);
                    stack.push(node);
                }
            }
        }
    }

    while let Some(node) = stack.pop() {
        for edge_id in graph.edges_from(node) {
            let tail = graph.edge(edge_id).tail;

            if !reachable.contains(tail.0) {
                reachable.insert(tail.0);
                stack.push(tail);
            }
        }
    }

    reachable
}
