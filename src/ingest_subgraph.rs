//! One walk over each subgraph document, extracting the state composition works with. This is
//! the only module that touches the type system AST of the subgraphs.

mod directives;
mod fields;
mod schema_definitions;

use self::directives::DirectiveMatcher;
use crate::{
    diagnostics::{Diagnostics, ErrorCode},
    link::FederationVersion,
    subgraphs::{
        Subgraphs,
        state::{
            EnumType, EnumValue, InputObjectType, InterfaceType, ObjectType, RootTypes, ScalarType, Subgraph,
            TypeState, UnionType,
        },
    },
};
use cynic_parser::{ConstValue, type_system as ast};

/// _Service is a special type exposed by subgraphs. It should not be composed.
const SERVICE_TYPE_NAME: &str = "_Service";

/// _Entity is a special union type exposed by subgraphs. It should not be composed.
const ENTITY_UNION_NAME: &str = "_Entity";

/// _Any is a special scalar used by the subgraph protocol. It should not be composed.
const ANY_SCALAR_NAME: &str = "_Any";

struct Context<'a> {
    subgraph_name: &'a str,
    matcher: DirectiveMatcher,
    diagnostics: &'a mut Diagnostics,
}

impl Context<'_> {
    fn error(&mut self, message: std::fmt::Arguments<'_>, code: ErrorCode) {
        self.diagnostics.push_subgraph_error(self.subgraph_name, message, code);
    }
}

pub(crate) fn ingest_subgraph(
    document: &ast::TypeSystemDocument,
    name: &str,
    url: Option<&str>,
    subgraphs: &mut Subgraphs,
) {
    let mut subgraph = Subgraph {
        name: name.to_owned(),
        url: url.map(str::to_owned),
        version: FederationVersion::V1_0,
        links: Vec::new(),
        types: Default::default(),
        root_types: RootTypes::default(),
    };

    schema_definitions::ingest_schema_definitions(document, &mut subgraph, &mut subgraphs.ingestion_diagnostics);

    subgraph.version = subgraph
        .links
        .iter()
        .find_map(|link| link.federation_version())
        .unwrap_or(FederationVersion::V1_0);

    let mut ctx = Context {
        subgraph_name: name,
        matcher: DirectiveMatcher::new(&subgraph.links, subgraph.version),
        diagnostics: &mut subgraphs.ingestion_diagnostics,
    };

    ingest_definitions(document, &mut ctx, &mut subgraph);

    default_missing_root_types(&mut subgraph);
    compute_field_facts(&mut subgraph);

    subgraphs.subgraphs.push(subgraph);
}

/// Derives the per-field facts that depend on selection sets: which fields are part of a key,
/// of a `@provides` selection, of a `@requires` selection. Nested selections mark fields on
/// the types they actually select from.
fn compute_field_facts(subgraph: &mut Subgraph) {
    use crate::subgraphs::{selections::Selection, state::FieldFlags};

    fn collect(
        subgraph: &Subgraph,
        parent_type: &str,
        selections: &[Selection],
        out: &mut Vec<(String, String)>,
    ) {
        for selection in selections {
            match selection {
                Selection::Field { field, subselection } => {
                    out.push((parent_type.to_owned(), field.clone()));

                    if !subselection.is_empty() {
                        let field_type = subgraph
                            .types
                            .get(parent_type)
                            .and_then(TypeState::fields)
                            .and_then(|fields| fields.get(field))
                            .map(|field| field.r#type.inner.clone());

                        if let Some(field_type) = field_type {
                            collect(subgraph, &field_type, subselection, out);
                        }
                    }
                }
                Selection::InlineFragment { on, subselection } => {
                    collect(subgraph, on, subselection, out);
                }
            }
        }
    }

    let mut used_as_key = Vec::new();
    let mut provided = Vec::new();
    let mut required = Vec::new();

    for (type_name, ty) in &subgraph.types {
        for key in ty.keys() {
            collect(subgraph, type_name, &key.selection_set, &mut used_as_key);
        }

        let Some(fields) = ty.fields() else { continue };

        for field in fields.values() {
            if let Some(requires) = &field.requires {
                collect(subgraph, type_name, &requires.selection_set, &mut required);
            }

            if let Some(provides) = &field.provides {
                collect(subgraph, &field.r#type.inner, &provides.selection_set, &mut provided);
            }
        }
    }

    for (marks, flag) in [
        (used_as_key, FieldFlags::USED_AS_KEY),
        (provided, FieldFlags::PROVIDED),
        (required, FieldFlags::REQUIRED),
    ] {
        for (type_name, field_name) in marks {
            if let Some(field) = subgraph
                .types
                .get_mut(&type_name)
                .and_then(TypeState::fields_mut)
                .and_then(|fields| fields.get_mut(&field_name))
            {
                field.flags |= flag;
            }
        }
    }
}

fn ingest_definitions(document: &ast::TypeSystemDocument, ctx: &mut Context<'_>, subgraph: &mut Subgraph) {
    let query_root_name = subgraph.root_types.query.clone().unwrap_or_else(|| "Query".to_owned());

    for definition in document.definitions() {
        let (type_definition, is_extension) = match definition {
            ast::Definition::Type(ty) => (ty, false),
            ast::Definition::TypeExtension(ty) => (ty, true),
            _ => continue,
        };

        let type_name = type_definition.name();

        match &type_definition {
            ast::TypeDefinition::Object(_) if type_name == SERVICE_TYPE_NAME => continue,
            ast::TypeDefinition::Union(_) if type_name == ENTITY_UNION_NAME => continue,
            ast::TypeDefinition::Scalar(_) if type_name == ANY_SCALAR_NAME => continue,
            _ => (),
        }

        let description = type_definition.description().map(|d| d.to_cow().into_owned());

        match type_definition {
            ast::TypeDefinition::Object(object) => {
                let state = match subgraph
                    .types
                    .entry(type_name.to_owned())
                    .or_insert_with(|| TypeState::Object(ObjectType::default()))
                {
                    TypeState::Object(object) => object,
                    other => {
                        let kind = other.kind_name();
                        ctx.error(
                            format_args!("`{type_name}` is defined both as an object and as {kind} type"),
                            ErrorCode::InvalidGraphql,
                        );
                        continue;
                    }
                };

                if is_extension {
                    state.extends_keyword = true;
                } else {
                    state.has_definition = true;
                }

                if state.description.is_none() {
                    state.description = description;
                }

                for interface in object.implements_interfaces() {
                    if !state.interfaces.iter().any(|name| name == interface) {
                        state.interfaces.push(interface.to_owned());
                    }
                }

                directives::ingest_object_directives(ctx, object.directives(), state);

                let is_query_root = type_name == query_root_name;
                fields::ingest_fields(ctx, object.fields(), type_name, is_query_root, &mut state.fields);
            }
            ast::TypeDefinition::Interface(interface) => {
                let state = match subgraph
                    .types
                    .entry(type_name.to_owned())
                    .or_insert_with(|| TypeState::Interface(InterfaceType::default()))
                {
                    TypeState::Interface(interface) => interface,
                    other => {
                        let kind = other.kind_name();
                        ctx.error(
                            format_args!("`{type_name}` is defined both as an interface and as {kind} type"),
                            ErrorCode::InvalidGraphql,
                        );
                        continue;
                    }
                };

                if state.description.is_none() {
                    state.description = description;
                }

                for implemented in interface.implements_interfaces() {
                    if !state.interfaces.iter().any(|name| name == implemented) {
                        state.interfaces.push(implemented.to_owned());
                    }
                }

                directives::ingest_interface_directives(ctx, interface.directives(), state);
                fields::ingest_fields(ctx, interface.fields(), type_name, false, &mut state.fields);
            }
            ast::TypeDefinition::Scalar(_) => {
                let state = match subgraph
                    .types
                    .entry(type_name.to_owned())
                    .or_insert_with(|| TypeState::Scalar(ScalarType::default()))
                {
                    TypeState::Scalar(scalar) => scalar,
                    other => {
                        let kind = other.kind_name();
                        ctx.error(
                            format_args!("`{type_name}` is defined both as a scalar and as {kind} type"),
                            ErrorCode::InvalidGraphql,
                        );
                        continue;
                    }
                };

                if state.description.is_none() {
                    state.description = description;
                }

                directives::ingest_scalar_directives(ctx, type_definition.directives(), state);
            }
            ast::TypeDefinition::Enum(enum_type) => {
                let state = match subgraph
                    .types
                    .entry(type_name.to_owned())
                    .or_insert_with(|| TypeState::Enum(EnumType::default()))
                {
                    TypeState::Enum(enum_type) => enum_type,
                    other => {
                        let kind = other.kind_name();
                        ctx.error(
                            format_args!("`{type_name}` is defined both as an enum and as {kind} type"),
                            ErrorCode::InvalidGraphql,
                        );
                        continue;
                    }
                };

                if state.description.is_none() {
                    state.description = description;
                }

                directives::ingest_common_directives(ctx, type_definition.directives(), &mut state.common);

                for value in enum_type.values() {
                    let value_state = state.values.entry(value.value().to_owned()).or_insert_with(EnumValue::default);

                    if value_state.description.is_none() {
                        value_state.description = value.description().map(|d| d.to_cow().into_owned());
                    }

                    directives::ingest_enum_value_directives(ctx, value.directives(), value_state);
                }
            }
            ast::TypeDefinition::Union(union) => {
                let state = match subgraph
                    .types
                    .entry(type_name.to_owned())
                    .or_insert_with(|| TypeState::Union(UnionType::default()))
                {
                    TypeState::Union(union) => union,
                    other => {
                        let kind = other.kind_name();
                        ctx.error(
                            format_args!("`{type_name}` is defined both as a union and as {kind} type"),
                            ErrorCode::InvalidGraphql,
                        );
                        continue;
                    }
                };

                if state.description.is_none() {
                    state.description = description;
                }

                directives::ingest_common_directives(ctx, type_definition.directives(), &mut state.common);

                for member in union.members() {
                    state.members.insert(member.name().to_owned());
                }
            }
            ast::TypeDefinition::InputObject(input_object) => {
                let state = match subgraph
                    .types
                    .entry(type_name.to_owned())
                    .or_insert_with(|| TypeState::InputObject(InputObjectType::default()))
                {
                    TypeState::InputObject(input_object) => input_object,
                    other => {
                        let kind = other.kind_name();
                        ctx.error(
                            format_args!("`{type_name}` is defined both as an input object and as {kind} type"),
                            ErrorCode::InvalidGraphql,
                        );
                        continue;
                    }
                };

                if state.description.is_none() {
                    state.description = description;
                }

                directives::ingest_common_directives(ctx, type_definition.directives(), &mut state.common);
                fields::ingest_input_fields(ctx, input_object.fields(), &mut state.fields);
            }
        }
    }
}

/// Root types that were not declared by a `schema { ... }` definition default by name, when an
/// object type with the default name exists.
fn default_missing_root_types(subgraph: &mut Subgraph) {
    for (slot, default_name) in [
        (&mut subgraph.root_types.query, "Query"),
        (&mut subgraph.root_types.mutation, "Mutation"),
        (&mut subgraph.root_types.subscription, "Subscription"),
    ] {
        if slot.is_none() && matches!(subgraph.types.get(default_name), Some(TypeState::Object(_))) {
            *slot = Some(default_name.to_owned());
        }
    }
}

/// Renders a const value back to its GraphQL literal form, for default values.
pub(crate) fn render_const_value(value: ConstValue<'_>) -> String {
    match value {
        ConstValue::Null(_) => "null".to_owned(),
        ConstValue::Int(n) => n.as_i64().to_string(),
        ConstValue::Float(n) => n.as_f64().to_string(),
        ConstValue::String(s) => format!("{:?}", s.as_str()),
        ConstValue::Boolean(b) => b.value().to_string(),
        ConstValue::Enum(e) => e.name().to_owned(),
        ConstValue::List(list) => {
            let items: Vec<String> = list.items().map(render_const_value).collect();
            format!("[{}]", items.join(", "))
        }
        ConstValue::Object(object) => {
            let fields: Vec<String> = object
                .fields()
                .map(|field| format!("{}: {}", field.name(), render_const_value(field.value())))
                .collect();
            format!("{{{}}}", fields.join(", "))
        }
    }
}
