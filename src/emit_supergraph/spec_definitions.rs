//! The fixed preamble of a supergraph document: the `schema` definition with its `@link`s, the
//! join and link spec definitions, and the `join__Graph` enum.

use std::fmt::Write;

use crate::supergraph::state::SupergraphState;

use super::render::{INDENT, write_quoted};

/// Which optional specs the supergraph actually uses. Their `@link`s and definitions are only
/// emitted when needed.
#[derive(Default)]
pub(super) struct UsedSpecs {
    pub(super) tag: bool,
    pub(super) inaccessible: bool,
    pub(super) authenticated: bool,
    pub(super) requires_scopes: bool,
    pub(super) policy: bool,
    pub(super) cost: bool,
    pub(super) list_size: bool,
}

impl UsedSpecs {
    pub(super) fn scan(state: &SupergraphState) -> UsedSpecs {
        let mut used = UsedSpecs::default();

        for object in state.objects.values() {
            used.mark(
                object.tags.len(),
                object.inaccessible,
                object.authenticated,
                object.scopes.len(),
                object.policies.len(),
                object.cost.is_some(),
            );

            for field in object.fields.values() {
                used.mark(
                    field.tags.len(),
                    field.inaccessible,
                    field.authenticated,
                    field.scopes.len(),
                    field.policies.len(),
                    field.cost.is_some(),
                );
                used.list_size |= field.list_size.is_some();

                for argument in field.args.values() {
                    used.mark(argument.tags.len(), argument.inaccessible, false, 0, 0, argument.cost.is_some());
                }
            }
        }

        for interface in state.interfaces.values() {
            used.mark(
                interface.tags.len(),
                interface.inaccessible,
                interface.authenticated,
                interface.scopes.len(),
                interface.policies.len(),
                interface.cost.is_some(),
            );

            for field in interface.fields.values() {
                used.mark(
                    field.tags.len(),
                    field.inaccessible,
                    field.authenticated,
                    field.scopes.len(),
                    field.policies.len(),
                    field.cost.is_some(),
                );
                used.list_size |= field.list_size.is_some();
            }
        }

        for scalar in state.scalars.values() {
            used.mark(
                scalar.tags.len(),
                scalar.inaccessible,
                scalar.authenticated,
                scalar.scopes.len(),
                scalar.policies.len(),
                scalar.cost.is_some(),
            );
        }

        for enum_type in state.enums.values() {
            used.mark(enum_type.tags.len(), enum_type.inaccessible, enum_type.authenticated, 0, 0, enum_type.cost.is_some());

            for value in enum_type.values.values() {
                used.mark(value.tags.len(), value.inaccessible, false, 0, 0, false);
            }
        }

        for union in state.unions.values() {
            used.mark(union.tags.len(), union.inaccessible, false, 0, 0, false);
        }

        for input_object in state.input_objects.values() {
            used.mark(input_object.tags.len(), input_object.inaccessible, false, 0, 0, false);

            for field in input_object.fields.values() {
                used.mark(field.tags.len(), field.inaccessible, false, 0, 0, field.cost.is_some());
            }
        }

        used
    }

    fn mark(&mut self, tags: usize, inaccessible: bool, authenticated: bool, scopes: usize, policies: usize, cost: bool) {
        self.tag |= tags > 0;
        self.inaccessible |= inaccessible;
        self.authenticated |= authenticated;
        self.requires_scopes |= scopes > 0;
        self.policy |= policies > 0;
        self.cost |= cost;
    }
}

pub(super) fn write_schema_definition(sdl: &mut String, state: &SupergraphState, used: &UsedSpecs) {
    let join_version = state.join_spec_version();

    sdl.push_str("schema\n");

    let _ = writeln!(sdl, "{INDENT}@link(url: \"https://specs.apollo.dev/link/v1.0\")");
    let _ = writeln!(
        sdl,
        "{INDENT}@link(url: \"https://specs.apollo.dev/join/{join_version}\", for: EXECUTION)"
    );

    if used.tag {
        let _ = writeln!(
            sdl,
            "{INDENT}@link(url: \"https://specs.apollo.dev/tag/v0.3\", import: [\"@tag\"])"
        );
    }

    if used.inaccessible {
        let _ = writeln!(
            sdl,
            "{INDENT}@link(url: \"https://specs.apollo.dev/inaccessible/v0.2\", import: [\"@inaccessible\"], for: SECURITY)"
        );
    }

    if used.authenticated {
        let _ = writeln!(
            sdl,
            "{INDENT}@link(url: \"https://specs.apollo.dev/authenticated/v0.1\", import: [\"@authenticated\"], for: SECURITY)"
        );
    }

    if used.requires_scopes {
        let _ = writeln!(
            sdl,
            "{INDENT}@link(url: \"https://specs.apollo.dev/requiresScopes/v0.1\", import: [\"@requiresScopes\"], for: SECURITY)"
        );
    }

    if used.policy {
        let _ = writeln!(
            sdl,
            "{INDENT}@link(url: \"https://specs.apollo.dev/policy/v0.1\", import: [\"@policy\"], for: SECURITY)"
        );
    }

    if used.cost || used.list_size {
        let _ = writeln!(
            sdl,
            "{INDENT}@link(url: \"https://specs.apollo.dev/cost/v0.1\", import: [\"@cost\", \"@listSize\"])"
        );
    }

    sdl.push_str("{\n");

    for (slot, type_name) in [("query", "Query"), ("mutation", "Mutation"), ("subscription", "Subscription")] {
        if state.objects.contains_key(type_name) {
            let _ = writeln!(sdl, "{INDENT}{slot}: {type_name}");
        }
    }

    sdl.push_str("}\n\n");
}

pub(super) fn write_spec_definitions(sdl: &mut String, state: &SupergraphState, used: &UsedSpecs) {
    let join_version = state.join_spec_version();

    sdl.push_str(indoc::indoc! {r#"
        directive @join__enumValue(graph: join__Graph!) repeatable on ENUM_VALUE

        directive @join__field(graph: join__Graph, requires: join__FieldSet, provides: join__FieldSet, type: String, external: Boolean, override: String, usedOverridden: Boolean"#});

    if join_version != "v0.3" {
        sdl.push_str(", overrideLabel: String");
    }

    sdl.push_str(") repeatable on FIELD_DEFINITION | INPUT_FIELD_DEFINITION\n\n");

    sdl.push_str(indoc::indoc! {r#"
        directive @join__graph(name: String!, url: String!) on ENUM_VALUE

        directive @join__implements(graph: join__Graph!, interface: String!) repeatable on OBJECT | INTERFACE

        directive @join__type(graph: join__Graph!, key: join__FieldSet, extension: Boolean! = false, resolvable: Boolean! = true, isInterfaceObject: Boolean! = false) repeatable on OBJECT | INTERFACE | UNION | ENUM | INPUT_OBJECT | SCALAR

        directive @join__unionMember(graph: join__Graph!, member: String!) repeatable on UNION

        directive @link(url: String, as: String, for: link__Purpose, import: [link__Import]) repeatable on SCHEMA

    "#});

    if used.tag {
        sdl.push_str("directive @tag(name: String!) repeatable on FIELD_DEFINITION | OBJECT | INTERFACE | UNION | ARGUMENT_DEFINITION | SCALAR | ENUM | ENUM_VALUE | INPUT_OBJECT | INPUT_FIELD_DEFINITION | SCHEMA\n\n");
    }

    if used.inaccessible {
        sdl.push_str("directive @inaccessible on FIELD_DEFINITION | OBJECT | INTERFACE | UNION | ARGUMENT_DEFINITION | SCALAR | ENUM | ENUM_VALUE | INPUT_OBJECT | INPUT_FIELD_DEFINITION\n\n");
    }

    if used.authenticated {
        sdl.push_str("directive @authenticated on FIELD_DEFINITION | OBJECT | INTERFACE | SCALAR | ENUM\n\n");
    }

    if used.requires_scopes {
        sdl.push_str("directive @requiresScopes(scopes: [[requiresScopes__Scope!]!]!) on FIELD_DEFINITION | OBJECT | INTERFACE | SCALAR | ENUM\n\n");
    }

    if used.policy {
        sdl.push_str("directive @policy(policies: [[policy__Policy!]!]!) on FIELD_DEFINITION | OBJECT | INTERFACE | SCALAR | ENUM\n\n");
    }

    if used.cost || used.list_size {
        sdl.push_str("directive @cost(weight: Int!) on ARGUMENT_DEFINITION | ENUM | FIELD_DEFINITION | INPUT_FIELD_DEFINITION | OBJECT | SCALAR\n\n");
        sdl.push_str("directive @listSize(assumedSize: Int, slicingArguments: [String!], sizedFields: [String!], requireOneSlicingArgument: Boolean = true) on FIELD_DEFINITION\n\n");
    }

    sdl.push_str("scalar join__FieldSet\n\n");

    if join_version == "v0.5" {
        sdl.push_str("scalar join__DirectiveArguments\n\n");
    }

    sdl.push_str("scalar link__Import\n\n");

    if used.requires_scopes {
        sdl.push_str("scalar requiresScopes__Scope\n\n");
    }

    if used.policy {
        sdl.push_str("scalar policy__Policy\n\n");
    }

    sdl.push_str(indoc::indoc! {r#"
        enum link__Purpose {
          """
          `SECURITY` features provide metadata necessary to securely resolve fields.
          """
          SECURITY

          """
          `EXECUTION` features provide metadata necessary for operation execution.
          """
          EXECUTION
        }

    "#});

    write_join_graph_enum(sdl, state);
}

fn write_join_graph_enum(sdl: &mut String, state: &SupergraphState) {
    sdl.push_str("enum join__Graph {\n");

    for (subgraph_name, graph) in &state.graphs {
        let _ = write!(sdl, "{INDENT}{} @join__graph(name: ", graph.enum_name);
        let _ = write_quoted(sdl, subgraph_name);
        sdl.push_str(", url: ");
        let _ = write_quoted(sdl, graph.url.as_deref().unwrap_or_default());
        sdl.push_str(")\n");
    }

    sdl.push_str("}\n\n");
}
