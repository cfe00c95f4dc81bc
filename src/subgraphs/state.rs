use crate::link::{FederatedLink, FederationVersion};
use indexmap::{IndexMap, IndexSet};

use super::selections::Selection;

/// Everything extracted from one subgraph SDL document.
#[derive(Debug)]
pub(crate) struct Subgraph {
    pub(crate) name: String,
    pub(crate) url: Option<String>,
    pub(crate) version: FederationVersion,
    pub(crate) links: Vec<FederatedLink>,
    /// All named types, in declaration order.
    pub(crate) types: IndexMap<String, TypeState>,
    pub(crate) root_types: RootTypes,
}

impl Subgraph {
    pub(crate) fn is_v1(&self) -> bool {
        self.version.is_v1()
    }

    pub(crate) fn query_type_name(&self) -> &str {
        self.root_types.query.as_deref().unwrap_or("Query")
    }

    /// Root operation types merge under their canonical names, whatever the subgraph called
    /// them.
    pub(crate) fn canonical_root_name(&self, type_name: &str) -> Option<&'static str> {
        if self.root_types.query.as_deref() == Some(type_name) {
            Some("Query")
        } else if self.root_types.mutation.as_deref() == Some(type_name) {
            Some("Mutation")
        } else if self.root_types.subscription.as_deref() == Some(type_name) {
            Some("Subscription")
        } else {
            None
        }
    }

    pub(crate) fn root_type_names(&self) -> impl Iterator<Item = &str> {
        [
            self.root_types.query.as_deref(),
            self.root_types.mutation.as_deref(),
            self.root_types.subscription.as_deref(),
        ]
        .into_iter()
        .flatten()
    }
}

/// Root operation types, as declared by a `schema { ... }` definition or defaulted by name.
#[derive(Debug, Default)]
pub(crate) struct RootTypes {
    pub(crate) query: Option<String>,
    pub(crate) mutation: Option<String>,
    pub(crate) subscription: Option<String>,
}

#[derive(Debug)]
pub(crate) enum TypeState {
    Object(ObjectType),
    Interface(InterfaceType),
    Scalar(ScalarType),
    Enum(EnumType),
    Union(UnionType),
    InputObject(InputObjectType),
}

impl TypeState {
    pub(crate) fn kind_name(&self) -> &'static str {
        match self {
            TypeState::Object(_) => "object",
            TypeState::Interface(_) => "interface",
            TypeState::Scalar(_) => "scalar",
            TypeState::Enum(_) => "enum",
            TypeState::Union(_) => "union",
            TypeState::InputObject(_) => "input object",
        }
    }

    /// Output fields, for the kinds that have them.
    pub(crate) fn fields(&self) -> Option<&IndexMap<String, Field>> {
        match self {
            TypeState::Object(object) => Some(&object.fields),
            TypeState::Interface(interface) => Some(&interface.fields),
            _ => None,
        }
    }

    pub(crate) fn fields_mut(&mut self) -> Option<&mut IndexMap<String, Field>> {
        match self {
            TypeState::Object(object) => Some(&mut object.fields),
            TypeState::Interface(interface) => Some(&mut interface.fields),
            _ => None,
        }
    }

    pub(crate) fn keys(&self) -> &[Key] {
        match self {
            TypeState::Object(object) => &object.keys,
            TypeState::Interface(interface) => &interface.keys,
            _ => &[],
        }
    }
}

/// Directives that compose the same way on every kind of schema element.
#[derive(Debug, Default)]
pub(crate) struct CommonDirectives {
    pub(crate) tags: IndexSet<String>,
    pub(crate) inaccessible: bool,
    pub(crate) authenticated: bool,
    pub(crate) policies: Vec<Vec<String>>,
    pub(crate) required_scopes: Vec<Vec<String>>,
    pub(crate) cost: Option<i64>,
}

#[derive(Debug, Default)]
pub(crate) struct ObjectType {
    pub(crate) description: Option<String>,
    pub(crate) fields: IndexMap<String, Field>,
    pub(crate) keys: Vec<Key>,
    pub(crate) interfaces: Vec<String>,
    /// Declared with the `extend type` keyword.
    pub(crate) extends_keyword: bool,
    /// Annotated with `@extends`.
    pub(crate) extends_directive: bool,
    /// Declared at least once as a plain `type` definition, not only through extensions.
    pub(crate) has_definition: bool,
    pub(crate) shareable: bool,
    pub(crate) external: bool,
    pub(crate) interface_object: bool,
    pub(crate) common: CommonDirectives,
}

impl ObjectType {
    pub(crate) fn is_extension(&self) -> bool {
        self.extends_keyword || self.extends_directive
    }

    pub(crate) fn is_entity(&self) -> bool {
        !self.keys.is_empty()
    }
}

#[derive(Debug, Default)]
pub(crate) struct InterfaceType {
    pub(crate) description: Option<String>,
    pub(crate) fields: IndexMap<String, Field>,
    pub(crate) keys: Vec<Key>,
    pub(crate) interfaces: Vec<String>,
    pub(crate) common: CommonDirectives,
}

#[derive(Debug, Default)]
pub(crate) struct ScalarType {
    pub(crate) description: Option<String>,
    pub(crate) specified_by: Option<String>,
    pub(crate) common: CommonDirectives,
}

#[derive(Debug, Default)]
pub(crate) struct EnumType {
    pub(crate) description: Option<String>,
    pub(crate) values: IndexMap<String, EnumValue>,
    pub(crate) common: CommonDirectives,
}

#[derive(Debug, Default)]
pub(crate) struct EnumValue {
    pub(crate) description: Option<String>,
    pub(crate) deprecated: Option<Deprecated>,
    pub(crate) common: CommonDirectives,
}

#[derive(Debug, Default)]
pub(crate) struct UnionType {
    pub(crate) description: Option<String>,
    pub(crate) members: IndexSet<String>,
    pub(crate) common: CommonDirectives,
}

#[derive(Debug, Default)]
pub(crate) struct InputObjectType {
    pub(crate) description: Option<String>,
    pub(crate) fields: IndexMap<String, InputValue>,
    pub(crate) common: CommonDirectives,
}

/// Corresponds to one `@key(...)` annotation.
#[derive(Debug, Clone)]
pub(crate) struct Key {
    /// The raw `fields:` string, used when re-rendering `@join__type(key:)`.
    pub(crate) fields_str: String,
    pub(crate) selection_set: Vec<Selection>,
    pub(crate) resolvable: bool,
}

bitflags::bitflags! {
    /// Per-subgraph field facts. EXTERNAL and SHAREABLE come straight from directives,
    /// the rest are derived after ingestion from `@key`, `@provides` and `@requires`
    /// selection sets.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub(crate) struct FieldFlags: u8 {
        const EXTERNAL = 1;
        const SHAREABLE = 1 << 1;
        const USED_AS_KEY = 1 << 2;
        const PROVIDED = 1 << 3;
        const REQUIRED = 1 << 4;
    }
}

#[derive(Debug, Default)]
pub(crate) struct Field {
    pub(crate) r#type: FieldType,
    pub(crate) description: Option<String>,
    pub(crate) deprecated: Option<Deprecated>,
    pub(crate) arguments: IndexMap<String, InputValue>,
    pub(crate) flags: FieldFlags,
    pub(crate) r#override: Option<Override>,
    pub(crate) provides: Option<FieldSet>,
    pub(crate) requires: Option<FieldSet>,
    pub(crate) list_size: Option<ListSize>,
    pub(crate) common: CommonDirectives,
}

impl Field {
    pub(crate) fn is_external(&self) -> bool {
        self.flags.contains(FieldFlags::EXTERNAL)
    }

    pub(crate) fn is_shareable(&self) -> bool {
        self.flags.contains(FieldFlags::SHAREABLE)
    }

    pub(crate) fn is_used_as_key(&self) -> bool {
        self.flags.contains(FieldFlags::USED_AS_KEY)
    }

    pub(crate) fn is_provided(&self) -> bool {
        self.flags.contains(FieldFlags::PROVIDED)
    }

    pub(crate) fn is_required(&self) -> bool {
        self.flags.contains(FieldFlags::REQUIRED)
    }
}

/// A parsed `FieldSet` argument together with its source string.
#[derive(Debug, Clone)]
pub(crate) struct FieldSet {
    pub(crate) source: String,
    pub(crate) selection_set: Vec<Selection>,
}

#[derive(Debug, Clone)]
pub(crate) struct Override {
    pub(crate) from: String,
    pub(crate) label: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Deprecated {
    pub(crate) reason: Option<String>,
}

#[derive(Debug, Default)]
pub(crate) struct InputValue {
    pub(crate) r#type: FieldType,
    /// The default value, rendered as a GraphQL literal.
    pub(crate) default_value: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) deprecated: Option<Deprecated>,
    pub(crate) common: CommonDirectives,
}

/// A field or argument type reference: the named inner type plus its rendered form with list
/// and non-null wrappers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct FieldType {
    pub(crate) inner: String,
    pub(crate) rendered: String,
}

impl FieldType {
    /// Number of non-null markers across all wrapping levels. More markers means strictly less
    /// nullable for the same shape.
    pub(crate) fn non_null_count(&self) -> usize {
        self.rendered.bytes().filter(|b| *b == b'!').count()
    }

    pub(crate) fn is_non_null(&self) -> bool {
        self.rendered.ends_with('!')
    }

    pub(crate) fn is_list(&self) -> bool {
        self.rendered.starts_with('[')
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct ListSize {
    pub(crate) assumed_size: Option<i64>,
    pub(crate) slicing_arguments: Option<Vec<String>>,
    pub(crate) sized_fields: Option<Vec<String>>,
    pub(crate) require_one_slicing_argument: bool,
}
