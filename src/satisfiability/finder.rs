use fixedbitset::FixedBitSet;
use indexmap::IndexSet;

use super::{
    errors::SatisfiabilityError,
    graph::{EdgeId, Move},
    labels::OverrideLabels,
    validator::{MoveValidator, OperationPath},
};

impl MoveValidator<'_> {
    /// Paths that advance through the field without leaving the current subgraph.
    #[allow(clippy::too_many_arguments)]
    pub(super) fn find_direct_field_paths(
        &mut self,
        path: &OperationPath,
        field_name: &str,
        visited_edges: &[EdgeId],
        visited_graphs: &FixedBitSet,
        visited_fields: &[String],
        labels: &OverrideLabels,
        next_paths: &mut Vec<OperationPath>,
        errors: &mut Vec<SatisfiabilityError>,
    ) {
        let graph = self.graph;
        let tail = path.tail(graph);

        for edge_id in graph.edges_from(tail) {
            if visited_edges.contains(&edge_id) {
                continue;
            }

            let edge = graph.edge(edge_id);

            let Move::Field { field_name: name, .. } = &edge.r#move else {
                continue;
            };

            if name != field_name {
                continue;
            }

            match self.is_edge_resolvable(edge_id, path, visited_edges, visited_graphs, visited_fields, labels) {
                Ok(()) => next_paths.push(path.advance(edge_id)),
                Err(error) => errors.push(error),
            }
        }
    }

    /// Paths that first jump to the same type in another subgraph (entity or interface-object
    /// move) and resolve the field there. Subgraphs that hold the field but offer no key to
    /// land on are reported as such.
    #[allow(clippy::too_many_arguments)]
    pub(super) fn find_indirect_field_paths(
        &mut self,
        path: &OperationPath,
        field_name: &str,
        visited_edges: &[EdgeId],
        visited_graphs: &FixedBitSet,
        visited_fields: &[String],
        labels: &OverrideLabels,
        next_paths: &mut Vec<OperationPath>,
        errors: &mut Vec<SatisfiabilityError>,
    ) {
        let graph = self.graph;
        let state = self.state;
        let tail_id = path.tail(graph);
        let tail = graph.node(tail_id);

        let merged_field = state
            .output_type_fields(&tail.type_name)
            .and_then(|fields| fields.get(field_name));

        // Graphs we can jump towards at all, resolvable or not.
        let mut jump_targets: IndexSet<&str> = IndexSet::new();

        for edge_id in graph.edges_from(tail_id) {
            if visited_edges.contains(&edge_id) {
                continue;
            }

            let edge = graph.edge(edge_id);
            let landing = graph.node(edge.tail);

            let crosses_graphs = match &edge.r#move {
                Move::Entity { .. } => true,
                Move::Abstract { key: Some(_) } => true,
                // The only keyless abstract edges staying on the same type are the free hops
                // between root operation types.
                Move::Abstract { key: None } => landing.type_name == tail.type_name,
                Move::Field { .. } => false,
            };

            if !crosses_graphs {
                continue;
            }

            if landing.graph_index == tail.graph_index {
                continue;
            }

            jump_targets.insert(landing.graph_name.as_str());

            if visited_graphs.contains(landing.graph_index) {
                continue;
            }

            let landing_has_field = state
                .output_type_fields(&landing.type_name)
                .and_then(|fields| fields.get(field_name))
                .is_some_and(|field| field.by_graph.contains_key(&landing.graph_name));

            if !landing_has_field {
                continue;
            }

            match self.is_edge_resolvable(edge_id, path, visited_edges, visited_graphs, visited_fields, labels) {
                Ok(()) => {
                    let jumped = path.advance(edge_id);

                    let mut new_visited_graphs = visited_graphs.clone();
                    new_visited_graphs.insert(landing.graph_index);

                    self.find_direct_field_paths(
                        &jumped,
                        field_name,
                        visited_edges,
                        &new_visited_graphs,
                        visited_fields,
                        labels,
                        next_paths,
                        errors,
                    );
                }
                Err(error) => errors.push(error),
            }
        }

        // A subgraph holding the field with no way in at all.
        if let Some(merged_field) = merged_field {
            for target_graph in merged_field.by_graph.keys() {
                if target_graph == &tail.graph_name || jump_targets.contains(target_graph.as_str()) {
                    continue;
                }

                errors.push(SatisfiabilityError::for_no_key(
                    &tail.graph_name,
                    target_graph,
                    &tail.type_name,
                    field_name,
                ));
            }
        }
    }

    /// Paths that narrow an abstract type to the given concrete type, locally or after an
    /// entity jump on the abstract type.
    #[allow(clippy::too_many_arguments)]
    pub(super) fn find_downcast_paths(
        &mut self,
        path: &OperationPath,
        type_condition: &str,
        visited_edges: &[EdgeId],
        visited_graphs: &FixedBitSet,
        visited_fields: &[String],
        labels: &OverrideLabels,
        next_paths: &mut Vec<OperationPath>,
        errors: &mut Vec<SatisfiabilityError>,
    ) {
        let graph = self.graph;
        let tail_id = path.tail(graph);
        let tail = graph.node(tail_id);

        for edge_id in graph.edges_from(tail_id) {
            if visited_edges.contains(&edge_id) {
                continue;
            }

            let edge = graph.edge(edge_id);
            let landing = graph.node(edge.tail);

            match &edge.r#move {
                Move::Abstract { .. } if landing.type_name == type_condition => {
                    match self.is_edge_resolvable(edge_id, path, visited_edges, visited_graphs, visited_fields, labels)
                    {
                        Ok(()) => next_paths.push(path.advance(edge_id)),
                        Err(error) => errors.push(error),
                    }
                }
                Move::Entity { .. } if landing.graph_index != tail.graph_index => {
                    if visited_graphs.contains(landing.graph_index) {
                        continue;
                    }

                    if self
                        .is_edge_resolvable(edge_id, path, visited_edges, visited_graphs, visited_fields, labels)
                        .is_err()
                    {
                        continue;
                    }

                    let jumped = path.advance(edge_id);

                    let mut new_visited_graphs = visited_graphs.clone();
                    new_visited_graphs.insert(landing.graph_index);

                    self.find_downcast_paths(
                        &jumped,
                        type_condition,
                        visited_edges,
                        &new_visited_graphs,
                        visited_fields,
                        labels,
                        next_paths,
                        errors,
                    );
                }
                _ => (),
            }
        }
    }
}
