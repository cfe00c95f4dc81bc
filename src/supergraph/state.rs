use indexmap::{IndexMap, IndexSet};

use crate::{
    link::FederationVersion,
    subgraphs::state::{Deprecated, FieldSet, FieldType, Key, ListSize},
};

/// The merged view of all subgraphs, produced by the per-kind builders and consumed by
/// post-merge validation, satisfiability and SDL emission.
#[derive(Default)]
pub(crate) struct SupergraphState {
    pub(crate) graphs: IndexMap<String, GraphInfo>,
    pub(crate) objects: IndexMap<String, ObjectTypeState>,
    pub(crate) interfaces: IndexMap<String, InterfaceTypeState>,
    pub(crate) scalars: IndexMap<String, ScalarTypeState>,
    pub(crate) enums: IndexMap<String, EnumTypeState>,
    pub(crate) unions: IndexMap<String, UnionTypeState>,
    pub(crate) input_objects: IndexMap<String, InputObjectTypeState>,
}

impl SupergraphState {
    pub(crate) fn graph_enum_name(&self, subgraph_name: &str) -> Option<&str> {
        self.graphs.get(subgraph_name).map(|graph| graph.enum_name.as_str())
    }

    /// The join spec version the supergraph must link: the newest one any subgraph requires.
    pub(crate) fn join_spec_version(&self) -> &'static str {
        self.graphs
            .values()
            .map(|graph| graph.version)
            .max()
            .unwrap_or(FederationVersion::V2_0)
            .join_spec_version()
    }

    pub(crate) fn output_type_fields(&self, type_name: &str) -> Option<&IndexMap<String, FieldState>> {
        self.objects
            .get(type_name)
            .map(|object| &object.fields)
            .or_else(|| self.interfaces.get(type_name).map(|interface| &interface.fields))
    }
}

pub(crate) struct GraphInfo {
    /// The `join__Graph` enum value for this subgraph.
    pub(crate) enum_name: String,
    pub(crate) url: Option<String>,
    pub(crate) version: FederationVersion,
}

/// `join__Graph` enum values are the uppercased subgraph names, with anything that is not
/// alphanumeric replaced by an underscore.
pub(crate) fn graph_enum_name(subgraph_name: &str) -> String {
    subgraph_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

#[derive(Default)]
pub(crate) struct ObjectTypeState {
    pub(crate) description: Option<String>,
    pub(crate) tags: IndexSet<String>,
    pub(crate) inaccessible: bool,
    pub(crate) authenticated: bool,
    pub(crate) policies: Vec<Vec<String>>,
    pub(crate) scopes: Vec<Vec<String>>,
    pub(crate) cost: Option<i64>,
    pub(crate) has_definition: bool,
    pub(crate) is_entity: bool,
    pub(crate) interfaces: IndexSet<String>,
    pub(crate) fields: IndexMap<String, FieldState>,
    pub(crate) by_graph: IndexMap<String, ObjectTypeInGraph>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExtensionType {
    /// `@extends`
    Directive,
    /// `extend type` syntax
    Keyword,
}

pub(crate) struct ObjectTypeInGraph {
    pub(crate) has_definition: bool,
    pub(crate) extension: bool,
    pub(crate) extension_type: Option<ExtensionType>,
    pub(crate) external: bool,
    pub(crate) keys: Vec<Key>,
    pub(crate) inaccessible: bool,
    pub(crate) shareable: bool,
    pub(crate) interfaces: IndexSet<String>,
    pub(crate) version: FederationVersion,
}

impl ObjectTypeInGraph {
    /// Federation v1 `extend type` without `@extends` is plain type merging, not a federation
    /// extension. Everything else that extends is.
    pub(crate) fn is_real_extension(&self) -> bool {
        if !self.extension {
            return false;
        }

        let has_extends_directive = self.extension_type == Some(ExtensionType::Directive);

        if self.version.is_v1() && !has_extends_directive {
            return false;
        }

        if has_extends_directive {
            return true;
        }

        !self.has_definition
    }
}

#[derive(Default)]
pub(crate) struct FieldState {
    pub(crate) r#type: FieldType,
    pub(crate) tags: IndexSet<String>,
    pub(crate) inaccessible: bool,
    pub(crate) authenticated: bool,
    pub(crate) policies: Vec<Vec<String>>,
    pub(crate) scopes: Vec<Vec<String>>,
    pub(crate) cost: Option<i64>,
    pub(crate) list_size: Option<ListSize>,
    pub(crate) used_as_key: bool,
    pub(crate) override_from: Option<String>,
    pub(crate) override_label: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) deprecated: Option<Deprecated>,
    pub(crate) args: IndexMap<String, ArgumentState>,
    pub(crate) by_graph: IndexMap<String, FieldInGraph>,
    /// Once a non-external declaration of the field was seen, external sightings no longer
    /// influence the merged output type.
    pub(crate) seen_non_external: bool,
}

#[derive(Clone)]
pub(crate) struct FieldInGraph {
    pub(crate) r#type: FieldType,
    pub(crate) external: bool,
    pub(crate) inaccessible: bool,
    pub(crate) description: Option<String>,
    pub(crate) override_from: Option<String>,
    pub(crate) override_label: Option<String>,
    pub(crate) provides: Option<FieldSet>,
    pub(crate) requires: Option<FieldSet>,
    /// The field is part of a `@provides(fields:)` selection in this subgraph.
    pub(crate) provided: bool,
    /// The field is part of a `@requires(fields:)` selection in this subgraph.
    pub(crate) required: bool,
    pub(crate) shareable: bool,
    pub(crate) used_as_key: bool,
    pub(crate) version: FederationVersion,
}

#[derive(Default)]
pub(crate) struct ArgumentState {
    pub(crate) r#type: FieldType,
    pub(crate) tags: IndexSet<String>,
    pub(crate) inaccessible: bool,
    pub(crate) cost: Option<i64>,
    pub(crate) default_value: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) deprecated: Option<Deprecated>,
    pub(crate) by_graph: IndexMap<String, ArgumentInGraph>,
}

pub(crate) struct ArgumentInGraph {
    pub(crate) r#type: FieldType,
    pub(crate) inaccessible: bool,
    pub(crate) default_value: Option<String>,
}

#[derive(Default)]
pub(crate) struct InterfaceTypeState {
    pub(crate) description: Option<String>,
    pub(crate) tags: IndexSet<String>,
    pub(crate) inaccessible: bool,
    pub(crate) authenticated: bool,
    pub(crate) policies: Vec<Vec<String>>,
    pub(crate) scopes: Vec<Vec<String>>,
    pub(crate) cost: Option<i64>,
    pub(crate) is_entity: bool,
    /// Some subgraph contributes to this interface through an object annotated with
    /// `@interfaceObject`.
    pub(crate) has_interface_object: bool,
    pub(crate) interfaces: IndexSet<String>,
    pub(crate) fields: IndexMap<String, FieldState>,
    pub(crate) by_graph: IndexMap<String, InterfaceTypeInGraph>,
}

pub(crate) struct InterfaceTypeInGraph {
    pub(crate) keys: Vec<Key>,
    /// The subgraph contributes through an `@interfaceObject` object type.
    pub(crate) is_interface_object: bool,
    pub(crate) version: FederationVersion,
}

#[derive(Default)]
pub(crate) struct ScalarTypeState {
    pub(crate) description: Option<String>,
    pub(crate) specified_by: Option<String>,
    pub(crate) tags: IndexSet<String>,
    pub(crate) inaccessible: bool,
    pub(crate) authenticated: bool,
    pub(crate) policies: Vec<Vec<String>>,
    pub(crate) scopes: Vec<Vec<String>>,
    pub(crate) cost: Option<i64>,
    pub(crate) by_graph: IndexSet<String>,
}

#[derive(Default)]
pub(crate) struct EnumTypeState {
    pub(crate) description: Option<String>,
    pub(crate) tags: IndexSet<String>,
    pub(crate) inaccessible: bool,
    pub(crate) authenticated: bool,
    pub(crate) cost: Option<i64>,
    pub(crate) values: IndexMap<String, EnumValueState>,
    pub(crate) by_graph: IndexSet<String>,
}

#[derive(Default)]
pub(crate) struct EnumValueState {
    pub(crate) description: Option<String>,
    pub(crate) deprecated: Option<Deprecated>,
    pub(crate) tags: IndexSet<String>,
    pub(crate) inaccessible: bool,
    pub(crate) by_graph: IndexSet<String>,
}

#[derive(Default)]
pub(crate) struct UnionTypeState {
    pub(crate) description: Option<String>,
    pub(crate) tags: IndexSet<String>,
    pub(crate) inaccessible: bool,
    /// Member name to the graphs declaring it.
    pub(crate) members: IndexMap<String, IndexSet<String>>,
    pub(crate) by_graph: IndexSet<String>,
}

#[derive(Default)]
pub(crate) struct InputObjectTypeState {
    pub(crate) description: Option<String>,
    pub(crate) tags: IndexSet<String>,
    pub(crate) inaccessible: bool,
    pub(crate) fields: IndexMap<String, InputFieldState>,
    pub(crate) by_graph: IndexSet<String>,
}

#[derive(Default)]
pub(crate) struct InputFieldState {
    pub(crate) r#type: FieldType,
    pub(crate) tags: IndexSet<String>,
    pub(crate) inaccessible: bool,
    pub(crate) cost: Option<i64>,
    pub(crate) default_value: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) deprecated: Option<Deprecated>,
    pub(crate) by_graph: IndexSet<String>,
}
