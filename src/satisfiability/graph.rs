use indexmap::IndexMap;

use crate::{
    subgraphs::state::Key,
    supergraph::state::{FieldState, SupergraphState},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct EdgeId(pub(crate) usize);

/// Being at type `type_name`, anchored in one subgraph.
#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) type_name: String,
    pub(crate) graph_name: String,
    /// Position of the subgraph in the merged graph list, used for visited-set bitsets.
    pub(crate) graph_index: usize,
}

#[derive(Debug)]
pub(crate) struct OverrideCondition {
    pub(crate) label: Option<String>,
    /// Whether this edge belongs to the subgraph that wins the override. With a label, the
    /// edge only traverses when the hypothetical label value matches; without one the value is
    /// the static answer.
    pub(crate) value: bool,
}

#[derive(Debug)]
pub(crate) enum Move {
    /// Resolve one field within the head's subgraph.
    Field {
        type_name: String,
        field_name: String,
        requires: Option<crate::subgraphs::state::FieldSet>,
        /// The field is provided locally through `@provides`, lifting `@external`.
        provided: bool,
        r#override: Option<OverrideCondition>,
    },
    /// Jump to the same entity in another subgraph, proving the key fields first.
    Entity { key: Key },
    /// Resolve an abstract type to a concrete possibility. The key is present for
    /// `@interfaceObject` jumps, where landing requires proving it.
    Abstract { key: Option<Key> },
}

#[derive(Debug)]
pub(crate) struct Edge {
    pub(crate) head: NodeId,
    pub(crate) tail: NodeId,
    pub(crate) r#move: Move,
}

/// The satisfiability graph: one node per (type, subgraph) pair, edges for field resolution,
/// entity jumps and abstract type narrowing. Built once per composition run, immutable during
/// the search.
#[derive(Default)]
pub(crate) struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    edges_by_head: Vec<Vec<EdgeId>>,
    node_ids: IndexMap<(String, String), NodeId>,
}

impl Graph {
    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub(crate) fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0]
    }

    pub(crate) fn node_id(&self, type_name: &str, graph_name: &str) -> Option<NodeId> {
        self.node_ids.get(&(type_name.to_owned(), graph_name.to_owned())).copied()
    }

    pub(crate) fn edges_from(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges_by_head[node.0].iter().copied()
    }

    pub(crate) fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn ensure_node(&mut self, state: &SupergraphState, type_name: &str, graph_name: &str) -> NodeId {
        if let Some(id) = self.node_ids.get(&(type_name.to_owned(), graph_name.to_owned())) {
            return *id;
        }

        let graph_index = state.graphs.get_index_of(graph_name).unwrap_or_default();
        let id = NodeId(self.nodes.len());

        self.nodes.push(Node {
            type_name: type_name.to_owned(),
            graph_name: graph_name.to_owned(),
            graph_index,
        });
        self.edges_by_head.push(Vec::new());
        self.node_ids.insert((type_name.to_owned(), graph_name.to_owned()), id);

        id
    }

    fn push_edge(&mut self, head: NodeId, r#move: Move, tail: NodeId) {
        let id = EdgeId(self.edges.len());
        self.edges.push(Edge { head, tail, r#move });
        self.edges_by_head[head.0].push(id);
    }

    pub(crate) fn build(state: &SupergraphState) -> Graph {
        let mut graph = Graph::default();

        for (type_name, object) in &state.objects {
            for graph_name in object.by_graph.keys() {
                graph.ensure_node(state, type_name, graph_name);
            }

            graph.add_field_edges(state, type_name, &object.fields);

            // Entity jumps land on any subgraph declaring a resolvable key.
            for (target_graph, in_target) in &object.by_graph {
                for key in in_target.keys.iter().filter(|key| key.resolvable) {
                    for source_graph in object.by_graph.keys().filter(|name| *name != target_graph) {
                        let head = graph.ensure_node(state, type_name, source_graph);
                        let tail = graph.ensure_node(state, type_name, target_graph);
                        graph.push_edge(head, Move::Entity { key: key.clone() }, tail);
                    }
                }
            }

            // A request can start in any subgraph, so the root operation types are freely
            // traversable between the subgraphs defining them, without proving a key.
            if super::ROOT_TYPE_NAMES.contains(&type_name.as_str()) {
                for source_graph in object.by_graph.keys() {
                    for target_graph in object.by_graph.keys().filter(|name| *name != source_graph) {
                        let head = graph.ensure_node(state, type_name, source_graph);
                        let tail = graph.ensure_node(state, type_name, target_graph);
                        graph.push_edge(head, Move::Abstract { key: None }, tail);
                    }
                }
            }
        }

        for (type_name, interface) in &state.interfaces {
            for graph_name in interface.by_graph.keys() {
                graph.ensure_node(state, type_name, graph_name);
            }

            graph.add_field_edges(state, type_name, &interface.fields);

            for (target_graph, in_target) in &interface.by_graph {
                for key in in_target.keys.iter().filter(|key| key.resolvable) {
                    for source_graph in interface.by_graph.keys().filter(|name| *name != target_graph) {
                        let head = graph.ensure_node(state, type_name, source_graph);
                        let tail = graph.ensure_node(state, type_name, target_graph);
                        graph.push_edge(head, Move::Entity { key: key.clone() }, tail);
                    }
                }
            }
        }

        // Abstract narrowing: interface to implementer, within a subgraph that sees both. For
        // subgraphs that only know the interface as an @interfaceObject, the narrowing crosses
        // into the subgraphs owning the implementers and must prove the interface key.
        for (object_name, object) in &state.objects {
            for interface_name in &object.interfaces {
                let Some(interface) = state.interfaces.get(interface_name) else {
                    continue;
                };

                for (graph_name, in_graph) in &interface.by_graph {
                    if in_graph.is_interface_object {
                        let key = in_graph.keys.iter().find(|key| key.resolvable).cloned();

                        for target_graph in object.by_graph.keys() {
                            let head = graph.ensure_node(state, interface_name, graph_name);
                            let tail = graph.ensure_node(state, object_name, target_graph);
                            graph.push_edge(head, Move::Abstract { key: key.clone() }, tail);
                        }
                    } else if object.by_graph.contains_key(graph_name) {
                        let head = graph.ensure_node(state, interface_name, graph_name);
                        let tail = graph.ensure_node(state, object_name, graph_name);
                        graph.push_edge(head, Move::Abstract { key: None }, tail);
                    }
                }
            }
        }

        for (union_name, union) in &state.unions {
            for (member, member_graphs) in &union.members {
                for graph_name in member_graphs {
                    if union.by_graph.contains(graph_name) {
                        let head = graph.ensure_node(state, union_name, graph_name);
                        let tail = graph.ensure_node(state, member, graph_name);
                        graph.push_edge(head, Move::Abstract { key: None }, tail);
                    }
                }
            }
        }

        graph
    }

    fn add_field_edges(&mut self, state: &SupergraphState, type_name: &str, fields: &IndexMap<String, FieldState>) {
        for (field_name, field) in fields {
            // Overrides pair up the winning graph and the graph it takes the field from.
            let override_sources: Vec<(&str, Option<&str>)> = field
                .by_graph
                .iter()
                .filter_map(|(_, in_graph)| {
                    in_graph
                        .override_from
                        .as_ref()
                        .map(|from| (from.as_str(), in_graph.override_label.as_deref()))
                })
                .collect();

            for (graph_name, in_graph) in &field.by_graph {
                let r#override = if in_graph.override_from.is_some() {
                    Some(OverrideCondition {
                        label: in_graph.override_label.clone(),
                        value: true,
                    })
                } else {
                    override_sources
                        .iter()
                        .find(|(from, _)| *from == graph_name)
                        .map(|(_, label)| OverrideCondition {
                            label: label.map(str::to_owned),
                            value: false,
                        })
                };

                let head = self.ensure_node(state, type_name, graph_name);
                let tail = self.ensure_node(state, &in_graph.r#type.inner, graph_name);

                self.push_edge(
                    head,
                    Move::Field {
                        type_name: type_name.to_owned(),
                        field_name: field_name.clone(),
                        requires: in_graph.requires.clone(),
                        provided: in_graph.provided,
                        r#override,
                    },
                    tail,
                );
            }
        }
    }
}
