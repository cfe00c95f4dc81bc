use std::collections::HashMap;

use fixedbitset::FixedBitSet;

use crate::{
    subgraphs::selections::Selection,
    supergraph::state::SupergraphState,
};

use super::{
    errors::SatisfiabilityError,
    graph::{Edge, EdgeId, Graph, Move, NodeId, OverrideCondition},
    labels::OverrideLabels,
};

/// A walk through the graph: a starting node plus the edges taken so far.
#[derive(Clone)]
pub(super) struct OperationPath {
    root: NodeId,
    edges: Vec<EdgeId>,
}

impl OperationPath {
    pub(super) fn new(root: NodeId) -> Self {
        OperationPath { root, edges: Vec::new() }
    }

    pub(super) fn tail(&self, graph: &Graph) -> NodeId {
        self.edges.last().map(|edge| graph.edge(*edge).tail).unwrap_or(self.root)
    }

    pub(super) fn advance(&self, edge: EdgeId) -> OperationPath {
        let mut next = self.clone();
        next.edges.push(edge);
        next
    }
}

pub(super) struct Requirement<'s> {
    pub(super) selection: &'s Selection,
    pub(super) paths: Vec<OperationPath>,
}

struct CacheEntry {
    graphs: FixedBitSet,
    labels: OverrideLabels,
    result: Result<(), SatisfiabilityError>,
}

/// The recursive satisfiability search. Edge resolvability and selection-set resolution are
/// mutually recursive: a `@requires` or `@key` condition on an edge spawns a nested search
/// before the edge is trusted. Results are memoized per (edge, visited graphs, label
/// assignment) and kept for the whole composition run.
pub(super) struct MoveValidator<'a> {
    pub(super) state: &'a SupergraphState,
    pub(super) graph: &'a Graph,
    cache: HashMap<EdgeId, Vec<CacheEntry>>,
}

impl<'a> MoveValidator<'a> {
    pub(super) fn new(state: &'a SupergraphState, graph: &'a Graph) -> Self {
        MoveValidator {
            state,
            graph,
            cache: HashMap::new(),
        }
    }

    pub(super) fn graph_count(&self) -> usize {
        self.state.graphs.len()
    }

    /// Resolve a whole selection set from `path`, depth-first over a worklist of requirements.
    /// The first requirement with no viable path fails the whole set.
    pub(super) fn can_resolve_selection_set(
        &mut self,
        selection_set: &[Selection],
        path: &OperationPath,
        visited_edges: &[EdgeId],
        visited_graphs: &FixedBitSet,
        visited_fields: &[String],
        labels: &OverrideLabels,
    ) -> Result<(), Vec<SatisfiabilityError>> {
        let mut requirements: Vec<Requirement<'_>> = selection_set
            .iter()
            .rev()
            .map(|selection| Requirement {
                selection,
                paths: vec![path.clone()],
            })
            .collect();

        while let Some(requirement) = requirements.pop() {
            let inner = self.validate_requirement(
                requirement,
                visited_edges,
                visited_graphs,
                visited_fields,
                labels,
            )?;

            requirements.extend(inner);
        }

        Ok(())
    }

    fn validate_requirement<'s>(
        &mut self,
        requirement: Requirement<'s>,
        visited_edges: &[EdgeId],
        visited_graphs: &FixedBitSet,
        visited_fields: &[String],
        labels: &OverrideLabels,
    ) -> Result<Vec<Requirement<'s>>, Vec<SatisfiabilityError>> {
        match requirement.selection {
            Selection::Field { field, subselection } => self.validate_field_requirement(
                field,
                subselection,
                requirement.paths,
                visited_edges,
                visited_graphs,
                visited_fields,
                labels,
            ),
            Selection::InlineFragment { on, subselection } => self.validate_fragment_requirement(
                on,
                subselection,
                requirement.paths,
                visited_edges,
                visited_graphs,
                visited_fields,
                labels,
            ),
        }
    }

    fn validate_field_requirement<'s>(
        &mut self,
        field_name: &str,
        subselection: &'s [Selection],
        paths: Vec<OperationPath>,
        visited_edges: &[EdgeId],
        visited_graphs: &FixedBitSet,
        visited_fields: &[String],
        labels: &OverrideLabels,
    ) -> Result<Vec<Requirement<'s>>, Vec<SatisfiabilityError>> {
        let mut next_paths = Vec::new();
        let mut errors = Vec::new();

        for path in &paths {
            self.find_direct_field_paths(
                path,
                field_name,
                visited_edges,
                visited_graphs,
                visited_fields,
                labels,
                &mut next_paths,
                &mut errors,
            );
            self.find_indirect_field_paths(
                path,
                field_name,
                visited_edges,
                visited_graphs,
                visited_fields,
                labels,
                &mut next_paths,
                &mut errors,
            );
        }

        if next_paths.is_empty() {
            if errors.is_empty() {
                let graph = self.graph;
                if let Some(path) = paths.first() {
                    let tail = graph.node(path.tail(graph));
                    errors.push(SatisfiabilityError::for_missing_field(
                        &tail.graph_name,
                        &tail.type_name,
                        field_name,
                    ));
                }
            }

            return Err(errors);
        }

        if subselection.is_empty() {
            return Ok(Vec::new());
        }

        Ok(subselection
            .iter()
            .rev()
            .map(|selection| Requirement {
                selection,
                paths: next_paths.clone(),
            })
            .collect())
    }

    fn validate_fragment_requirement<'s>(
        &mut self,
        type_condition: &str,
        subselection: &'s [Selection],
        paths: Vec<OperationPath>,
        visited_edges: &[EdgeId],
        visited_graphs: &FixedBitSet,
        visited_fields: &[String],
        labels: &OverrideLabels,
    ) -> Result<Vec<Requirement<'s>>, Vec<SatisfiabilityError>> {
        let graph = self.graph;

        // A type condition on the current type narrows nothing.
        if let Some(path) = paths.first() {
            if graph.node(path.tail(graph)).type_name == type_condition {
                return Ok(subselection
                    .iter()
                    .rev()
                    .map(|selection| Requirement {
                        selection,
                        paths: paths.clone(),
                    })
                    .collect());
            }
        }

        let mut next_paths = Vec::new();
        let mut errors = Vec::new();

        for path in &paths {
            self.find_downcast_paths(
                path,
                type_condition,
                visited_edges,
                visited_graphs,
                visited_fields,
                labels,
                &mut next_paths,
                &mut errors,
            );
        }

        if next_paths.is_empty() {
            if errors.is_empty() {
                if let Some(path) = paths.first() {
                    let tail = graph.node(path.tail(graph));
                    errors.push(SatisfiabilityError::for_no_implementation(
                        &tail.graph_name,
                        type_condition,
                    ));
                }
            }

            return Err(errors);
        }

        if subselection.is_empty() {
            return Ok(Vec::new());
        }

        Ok(subselection
            .iter()
            .rev()
            .map(|selection| Requirement {
                selection,
                paths: next_paths.clone(),
            })
            .collect())
    }

    fn cached_resolvability(
        &self,
        edge: EdgeId,
        queried_graphs: &FixedBitSet,
        labels: &OverrideLabels,
    ) -> Option<Result<(), SatisfiabilityError>> {
        self.cache.get(&edge)?.iter().find_map(|entry| {
            (entry.graphs.is_subset(queried_graphs) && entry.labels.matches(labels))
                .then(|| entry.result.clone())
        })
    }

    fn set_resolvable(
        &mut self,
        edge: EdgeId,
        graphs: FixedBitSet,
        labels: &OverrideLabels,
        result: Result<(), SatisfiabilityError>,
    ) -> Result<(), SatisfiabilityError> {
        self.cache.entry(edge).or_default().push(CacheEntry {
            graphs,
            labels: labels.clone(),
            result: result.clone(),
        });
        result
    }

    /// Can this edge be taken, given where we have already been? For field edges this checks
    /// override gating, externality and the `@requires` condition; for entity and keyed
    /// abstract edges it proves the key fields from the source side first.
    pub(super) fn is_edge_resolvable(
        &mut self,
        edge_id: EdgeId,
        path: &OperationPath,
        visited_edges: &[EdgeId],
        visited_graphs: &FixedBitSet,
        visited_fields: &[String],
        labels: &OverrideLabels,
    ) -> Result<(), SatisfiabilityError> {
        let graph = self.graph;
        let edge = graph.edge(edge_id);
        let head = graph.node(edge.head);
        let tail = graph.node(edge.tail);

        let mut queried_graphs = visited_graphs.clone();
        queried_graphs.insert(tail.graph_index);

        if let Some(result) = self.cached_resolvability(edge_id, &queried_graphs, labels) {
            return result;
        }

        match &edge.r#move {
            Move::Field {
                type_name,
                field_name,
                requires,
                r#override,
                ..
            } => {
                if !can_access_field_with_override(r#override.as_ref(), labels) {
                    return self.set_resolvable(
                        edge_id,
                        visited_graphs.clone(),
                        labels,
                        Err(SatisfiabilityError::for_missing_field(
                            &tail.graph_name,
                            type_name,
                            field_name,
                        )),
                    );
                }

                if self.is_external(edge) {
                    return self.set_resolvable(
                        edge_id,
                        visited_graphs.clone(),
                        labels,
                        Err(SatisfiabilityError::for_external(
                            &head.graph_name,
                            type_name,
                            field_name,
                        )),
                    );
                }

                if let Some(requires) = requires {
                    let new_visited_graphs = if head.graph_index != tail.graph_index {
                        queried_graphs.clone()
                    } else {
                        visited_graphs.clone()
                    };

                    let mut new_visited_edges = visited_edges.to_vec();
                    new_visited_edges.push(edge_id);

                    let mut new_visited_fields = visited_fields.to_vec();
                    if !new_visited_fields.iter().any(|source| *source == requires.source) {
                        new_visited_fields.push(requires.source.clone());
                    }

                    if self
                        .can_resolve_selection_set(
                            &requires.selection_set,
                            path,
                            &new_visited_edges,
                            &new_visited_graphs,
                            &new_visited_fields,
                            labels,
                        )
                        .is_ok()
                    {
                        return self.set_resolvable(edge_id, new_visited_graphs, labels, Ok(()));
                    }

                    // Not cached: a different incoming path may still satisfy the condition.
                    return Err(SatisfiabilityError::for_require(
                        &head.graph_name,
                        type_name,
                        field_name,
                    ));
                }

                self.set_resolvable(edge_id, visited_graphs.clone(), labels, Ok(()))
            }
            Move::Entity { key } | Move::Abstract { key: Some(key) } => {
                let mut new_visited_edges = visited_edges.to_vec();
                new_visited_edges.push(edge_id);

                let mut new_visited_fields = visited_fields.to_vec();
                if !new_visited_fields.iter().any(|source| *source == key.fields_str) {
                    new_visited_fields.push(key.fields_str.clone());
                }

                if self
                    .can_resolve_selection_set(
                        &key.selection_set,
                        path,
                        &new_visited_edges,
                        &queried_graphs,
                        &new_visited_fields,
                        labels,
                    )
                    .is_ok()
                {
                    return self.set_resolvable(edge_id, queried_graphs, labels, Ok(()));
                }

                let error = SatisfiabilityError::for_key(
                    &head.graph_name,
                    &tail.graph_name,
                    &head.type_name,
                    &key.fields_str,
                );

                self.set_resolvable(edge_id, queried_graphs, labels, Err(error))
            }
            Move::Abstract { key: None } => {
                self.set_resolvable(edge_id, visited_graphs.clone(), labels, Ok(()))
            }
        }
    }

    /// Port of the legacy externality rules: a field blocked as `@external` unless it is
    /// provided locally, or it doubles as a key field in the right extension configuration.
    fn is_external(&self, edge: &Edge) -> bool {
        let graph = self.graph;
        let state = self.state;

        let Move::Field {
            field_name, provided, ..
        } = &edge.r#move
        else {
            return false;
        };

        if *provided {
            return false;
        }

        let head = graph.node(edge.head);

        let Some(object) = state.objects.get(&head.type_name) else {
            return false;
        };

        let Some(field) = object.fields.get(field_name) else {
            return false;
        };

        let (Some(type_in_graph), Some(field_in_graph)) = (
            object.by_graph.get(&head.graph_name),
            field.by_graph.get(&head.graph_name),
        ) else {
            return false;
        };

        if !field_in_graph.external {
            return false;
        }

        if field_in_graph.version.is_v1() && type_in_graph.extension && field.used_as_key {
            return false;
        }

        if !field_in_graph.used_as_key {
            return true;
        }

        if type_in_graph.extension {
            return false;
        }

        true
    }
}

/// A labeled override only traverses under the hypothesis that matches its expected value.
/// Unlabeled overrides are static: the winning subgraph's edge traverses, the overridden one
/// never does.
fn can_access_field_with_override(r#override: Option<&OverrideCondition>, labels: &OverrideLabels) -> bool {
    let Some(condition) = r#override else {
        return true;
    };

    let Some(label) = &condition.label else {
        return condition.value;
    };

    match labels.get(label) {
        Some(value) => condition.value == value,
        None => false,
    }
}
