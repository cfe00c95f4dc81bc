//! Renders the merged state into the final supergraph SDL: the join spec preamble, one type
//! definition per merged type, and the `@join__*` annotations the routers need to plan
//! queries. The `@join__field` rules follow the merge semantics closely: a field only gets
//! annotated when the subgraphs disagree about it, or when overrides, externals or selection
//! conditions make the default ambiguous.

mod api_sdl;
mod render;
mod spec_definitions;

pub(crate) use api_sdl::emit_api_sdl;

use std::fmt::Write;

use itertools::Itertools as _;

use crate::supergraph::state::{
    ArgumentState, FieldState, InterfaceTypeState, ObjectTypeState, SupergraphState,
};

use self::{
    render::{Description, INDENT, write_deprecated, write_quoted, write_string_list, write_string_matrix, write_tags},
    spec_definitions::UsedSpecs,
};

pub(crate) fn emit_supergraph_sdl(state: &SupergraphState) -> String {
    let mut sdl = String::new();
    let used = UsedSpecs::scan(state);

    spec_definitions::write_schema_definition(&mut sdl, state, &used);
    spec_definitions::write_spec_definitions(&mut sdl, state, &used);

    for (type_name, object) in &state.objects {
        write_object_type(&mut sdl, state, type_name, object);
    }

    for (type_name, interface) in &state.interfaces {
        write_interface_type(&mut sdl, state, type_name, interface);
    }

    for (type_name, union) in &state.unions {
        write_union_type(&mut sdl, state, type_name, union);
    }

    for (type_name, enum_type) in &state.enums {
        write_enum_type(&mut sdl, state, type_name, enum_type);
    }

    for (type_name, scalar) in &state.scalars {
        write_scalar_type(&mut sdl, state, type_name, scalar);
    }

    for (type_name, input_object) in &state.input_objects {
        write_input_object_type(&mut sdl, state, type_name, input_object);
    }

    while sdl.ends_with('\n') {
        sdl.pop();
    }
    sdl.push('\n');

    sdl
}

/// One `@join__field(...)` occurrence on a field.
#[derive(Default)]
struct JoinField<'a> {
    graph_enum: &'a str,
    r#type: Option<&'a str>,
    external: bool,
    override_from: Option<&'a str>,
    override_label: Option<&'a str>,
    used_overridden: bool,
    provides: Option<&'a str>,
    requires: Option<&'a str>,
}

impl JoinField<'_> {
    /// Nothing but the graph: such an annotation adds no information when there is no
    /// ambiguity to resolve.
    fn is_plain(&self) -> bool {
        self.r#type.is_none()
            && !self.external
            && self.override_from.is_none()
            && self.override_label.is_none()
            && !self.used_overridden
            && self.provides.is_none()
            && self.requires.is_none()
    }
}

fn graph_enum<'a>(state: &'a SupergraphState, subgraph_name: &str) -> &'a str {
    state.graph_enum_name(subgraph_name).unwrap_or_default()
}

/// Is the field in this graph the target of another graph's `@override(from:)`?
fn is_overridden(field: &FieldState, graph_name: &str) -> bool {
    field
        .by_graph
        .values()
        .any(|in_graph| in_graph.override_from.as_deref() == Some(graph_name))
}

/// The label of the override taking this graph's field, if any.
fn overriding_label<'a>(field: &'a FieldState, graph_name: &str) -> Option<&'a str> {
    field.by_graph.values().find_map(|in_graph| {
        (in_graph.override_from.as_deref() == Some(graph_name))
            .then_some(in_graph.override_label.as_deref())
            .flatten()
    })
}

/// An overridden field still matters when it doubles as a non-external key field, or when an
/// interface obliges the graph to keep serving it.
fn used_overridden_value(
    state: &SupergraphState,
    object: Option<&ObjectTypeState>,
    field_name: &str,
    field: &FieldState,
    graph_name: &str,
) -> bool {
    if !is_overridden(field, graph_name) {
        return false;
    }

    let Some(in_graph) = field.by_graph.get(graph_name) else {
        return false;
    };

    if in_graph.used_as_key && !in_graph.external {
        return true;
    }

    let Some(object) = object else { return false };
    let Some(type_in_graph) = object.by_graph.get(graph_name) else {
        return false;
    };

    type_in_graph.interfaces.iter().any(|interface_name| {
        state
            .interfaces
            .get(interface_name)
            .is_some_and(|interface| {
                interface.fields.contains_key(field_name) && interface.by_graph.contains_key(graph_name)
            })
    })
}

fn should_set_external(object: Option<&ObjectTypeState>, field: &FieldState, graph_name: &str) -> bool {
    let Some(in_graph) = field.by_graph.get(graph_name) else {
        return false;
    };

    if !in_graph.external {
        return false;
    }

    if in_graph.provided {
        return true;
    }

    let type_is_extension = object
        .and_then(|object| object.by_graph.get(graph_name))
        .is_some_and(|type_in_graph| type_in_graph.extension);

    if in_graph.used_as_key && type_is_extension {
        return false;
    }

    true
}

/// Do the subgraphs disagree about this field in any way a router would have to know about?
fn has_differences_between_graphs(object: Option<&ObjectTypeState>, field: &FieldState) -> bool {
    let mut first_type: Option<&str> = None;

    for (graph_name, in_graph) in &field.by_graph {
        if in_graph.override_from.is_some() || in_graph.override_label.is_some() {
            return true;
        }

        if in_graph.provides.is_some() || in_graph.requires.is_some() {
            return true;
        }

        match first_type {
            None => first_type = Some(&in_graph.r#type.rendered),
            Some(rendered) if rendered != in_graph.r#type.rendered => return true,
            Some(_) => (),
        }

        if in_graph.external {
            let type_is_extension = object
                .and_then(|object| object.by_graph.get(graph_name))
                .is_some_and(|type_in_graph| type_in_graph.extension);

            let counts = if field.used_as_key { !type_is_extension } else { true };

            if counts {
                return true;
            }
        }
    }

    false
}

/// Build one join field per contributing graph, dropping entries that a pure extension-side
/// `@external` declaration would add without information.
fn create_join_fields<'a, 'b>(
    state: &'a SupergraphState,
    object: Option<&'a ObjectTypeState>,
    field_name: &str,
    field: &'a FieldState,
    graphs: impl Iterator<Item = &'b String>,
) -> Vec<JoinField<'a>> {
    let has_different_output_type = field
        .by_graph
        .values()
        .any(|in_graph| in_graph.r#type.rendered != field.r#type.rendered);

    let mut join_fields = Vec::new();

    for graph_name in graphs {
        let Some(in_graph) = field.by_graph.get(graph_name.as_str()) else {
            continue;
        };

        let external = should_set_external(object, field, graph_name);
        let used_overridden = used_overridden_value(state, object, field_name, field, graph_name);
        let defines_something =
            in_graph.provides.is_some() || in_graph.requires.is_some() || in_graph.override_from.is_some();
        let type_is_extension = object
            .and_then(|object| object.by_graph.get(graph_name.as_str()))
            .is_some_and(|type_in_graph| type_in_graph.extension);

        if external && type_is_extension && !defines_something && !(in_graph.provided || in_graph.required) {
            continue;
        }

        join_fields.push(JoinField {
            graph_enum: graph_enum(state, graph_name),
            r#type: has_different_output_type.then_some(in_graph.r#type.rendered.as_str()),
            external,
            override_from: in_graph.override_from.as_deref(),
            override_label: in_graph
                .override_label
                .as_deref()
                .or_else(|| overriding_label(field, graph_name)),
            used_overridden,
            provides: in_graph.provides.as_ref().map(|fields| fields.source.as_str()),
            requires: in_graph.requires.as_ref().map(|fields| fields.source.as_str()),
        });
    }

    join_fields
}

/// The graphs worth an annotation when an override is in play.
fn override_graphs<'a>(
    state: &SupergraphState,
    object: Option<&ObjectTypeState>,
    field_name: &str,
    field: &'a FieldState,
) -> Vec<&'a String> {
    field
        .by_graph
        .iter()
        .filter(|(graph_name, in_graph)| {
            let needs_override_label =
                in_graph.override_label.is_some() || overriding_label(field, graph_name).is_some();
            let needs_used_overridden = used_overridden_value(state, object, field_name, field, graph_name);

            (in_graph.external && in_graph.required)
                || needs_override_label
                || needs_used_overridden
                || !is_overridden(field, graph_name)
        })
        .map(|(graph_name, _)| graph_name)
        .collect()
}

/// Decides the `@join__field` list for an object type field. `None` means the field is a
/// federation v1 leftover and should not be printed at all.
fn object_field_join_fields<'a>(
    state: &'a SupergraphState,
    object: &'a ObjectTypeState,
    field_name: &str,
    field: &'a FieldState,
    is_query: bool,
    join_type_count: usize,
) -> Option<Vec<JoinField<'a>>> {
    // Federation v1 published external leftovers on extensions without ever resolving them.
    if let Some((graph_name, in_graph)) = field.by_graph.first() {
        if field.by_graph.len() == 1
            && in_graph.external
            && in_graph.version.is_v1()
            && !in_graph.used_as_key
            && !in_graph.required
            && !in_graph.provided
            && !used_overridden_value(state, Some(object), field_name, field, graph_name)
        {
            return None;
        }
    }

    let has_override = field.by_graph.values().any(|in_graph| in_graph.override_from.is_some());
    let defined_everywhere = if is_query {
        field.by_graph.len() == state.graphs.len()
    } else {
        field.by_graph.len() == object.by_graph.len()
    };

    let join_fields = if is_query {
        if has_override {
            let graphs = field
                .by_graph
                .iter()
                .filter(|(graph_name, in_graph)| {
                    in_graph.override_from.is_some()
                        || overriding_label(field, graph_name).is_some()
                        || (in_graph.shareable && !is_overridden(field, graph_name))
                })
                .map(|(graph_name, _)| graph_name)
                .collect::<Vec<_>>();

            create_join_fields(state, Some(object), field_name, field, graphs.into_iter())
        } else if state.graphs.len() > 1 && !defined_everywhere {
            create_join_fields(state, Some(object), field_name, field, field.by_graph.keys())
        } else {
            Vec::new()
        }
    } else if has_override {
        let graphs = override_graphs(state, Some(object), field_name, field);
        create_join_fields(state, Some(object), field_name, field, graphs.into_iter())
    } else if defined_everywhere {
        if has_differences_between_graphs(Some(object), field) {
            create_join_fields(state, Some(object), field_name, field, field.by_graph.keys())
        } else {
            Vec::new()
        }
    } else {
        create_join_fields(state, Some(object), field_name, field, field.by_graph.keys())
    };

    // A lone plain annotation on a single-graph type says nothing.
    if join_fields.len() == 1 && join_type_count == 1 && join_fields[0].is_plain() {
        return Some(Vec::new());
    }

    Some(join_fields)
}

fn write_join_field(sdl: &mut String, join_field: &JoinField<'_>) {
    let _ = write!(sdl, " @join__field(graph: {}", join_field.graph_enum);

    if let Some(rendered) = join_field.r#type {
        sdl.push_str(", type: ");
        let _ = write_quoted(sdl, rendered);
    }

    if join_field.external {
        sdl.push_str(", external: true");
    }

    if let Some(from) = join_field.override_from {
        sdl.push_str(", override: ");
        let _ = write_quoted(sdl, from);
    }

    if let Some(label) = join_field.override_label {
        sdl.push_str(", overrideLabel: ");
        let _ = write_quoted(sdl, label);
    }

    if join_field.used_overridden {
        sdl.push_str(", usedOverridden: true");
    }

    if let Some(provides) = join_field.provides {
        sdl.push_str(", provides: ");
        let _ = write_quoted(sdl, provides);
    }

    if let Some(requires) = join_field.requires {
        sdl.push_str(", requires: ");
        let _ = write_quoted(sdl, requires);
    }

    sdl.push(')');
}

fn write_common_type_directives(
    sdl: &mut String,
    tags: &indexmap::IndexSet<String>,
    inaccessible: bool,
    authenticated: bool,
    policies: &[Vec<String>],
    scopes: &[Vec<String>],
    cost: Option<i64>,
) {
    if !tags.is_empty() {
        let mut line = String::new();
        let _ = write_tags(&mut line, tags);
        let _ = writeln!(sdl, "{INDENT}{}", line.trim_start());
    }

    if inaccessible {
        let _ = writeln!(sdl, "{INDENT}@inaccessible");
    }

    if authenticated {
        let _ = writeln!(sdl, "{INDENT}@authenticated");
    }

    if !policies.is_empty() {
        let _ = write!(sdl, "{INDENT}@policy(policies: ");
        let _ = write_string_matrix(sdl, policies);
        sdl.push_str(")\n");
    }

    if !scopes.is_empty() {
        let _ = write!(sdl, "{INDENT}@requiresScopes(scopes: ");
        let _ = write_string_matrix(sdl, scopes);
        sdl.push_str(")\n");
    }

    if let Some(weight) = cost {
        let _ = writeln!(sdl, "{INDENT}@cost(weight: {weight})");
    }
}

fn write_object_type(sdl: &mut String, state: &SupergraphState, type_name: &str, object: &ObjectTypeState) {
    if let Some(description) = &object.description {
        let _ = write!(sdl, "{}", Description(description, ""));
    }

    let _ = write!(sdl, "type {type_name}");

    if !object.interfaces.is_empty() {
        let _ = write!(sdl, " implements {}", object.interfaces.iter().join(" & "));
    }

    sdl.push('\n');

    let is_query = type_name == "Query";
    let join_type_count = write_object_join_types(sdl, state, object, is_query);

    for (graph_name, in_graph) in &object.by_graph {
        for interface in &in_graph.interfaces {
            let _ = write!(sdl, "{INDENT}@join__implements(graph: {}, interface: ", graph_enum(state, graph_name));
            let _ = write_quoted(sdl, interface);
            sdl.push_str(")\n");
        }
    }

    write_common_type_directives(
        sdl,
        &object.tags,
        object.inaccessible,
        object.authenticated,
        &object.policies,
        &object.scopes,
        object.cost,
    );

    sdl.push_str("{\n");

    for (field_name, field) in &object.fields {
        let Some(join_fields) =
            object_field_join_fields(state, object, field_name, field, is_query, join_type_count)
        else {
            continue;
        };

        write_field(sdl, object, field_name, field, &join_fields);
    }

    // Interfaces served through @interfaceObject in some subgraph lend their fields to every
    // implementer, resolvable through the interface.
    for interface_name in &object.interfaces {
        let Some(interface) = state.interfaces.get(interface_name) else {
            continue;
        };

        if !interface.has_interface_object {
            continue;
        }

        for (field_name, field) in &interface.fields {
            if object.fields.contains_key(field_name) {
                continue;
            }

            let _ = write!(sdl, "{INDENT}{field_name}: {}", field.r#type.rendered);
            sdl.push_str(" @join__field\n");
        }
    }

    sdl.push_str("}\n\n");
}

/// Writes the `@join__type` lines and returns how many were written.
fn write_object_join_types(sdl: &mut String, state: &SupergraphState, object: &ObjectTypeState, is_query: bool) -> usize {
    let mut count = 0;

    if is_query {
        // The query root belongs to every subgraph.
        for graph in state.graphs.values() {
            let _ = writeln!(sdl, "{INDENT}@join__type(graph: {})", graph.enum_name);
            count += 1;
        }

        return count;
    }

    for (graph_name, in_graph) in &object.by_graph {
        if in_graph.keys.is_empty() {
            let _ = writeln!(sdl, "{INDENT}@join__type(graph: {})", graph_enum(state, graph_name));
            count += 1;
            continue;
        }

        for key in &in_graph.keys {
            let _ = write!(sdl, "{INDENT}@join__type(graph: {}, key: ", graph_enum(state, graph_name));
            let _ = write_quoted(sdl, &key.fields_str);

            if in_graph.is_real_extension() {
                sdl.push_str(", extension: true");
            }

            if !key.resolvable {
                sdl.push_str(", resolvable: false");
            }

            sdl.push_str(")\n");
            count += 1;
        }
    }

    count
}

fn write_field(
    sdl: &mut String,
    object: &ObjectTypeState,
    field_name: &str,
    field: &FieldState,
    join_fields: &[JoinField<'_>],
) {
    let description = field_description(object, field);

    if let Some(description) = description {
        let _ = write!(sdl, "{}", Description(description, INDENT));
    }

    let _ = write!(sdl, "{INDENT}{field_name}");
    write_arguments(sdl, field);
    let _ = write!(sdl, ": {}", field.r#type.rendered);

    for join_field in join_fields {
        write_join_field(sdl, join_field);
    }

    write_field_trailing_directives(sdl, field);

    sdl.push('\n');
}

/// The merged description, except that a graph overriding an entity field gets to supply it.
fn field_description<'a>(object: &ObjectTypeState, field: &'a FieldState) -> Option<&'a str> {
    if object.is_entity {
        let from_override = field
            .by_graph
            .values()
            .find(|in_graph| in_graph.override_from.is_some() && !in_graph.shareable)
            .and_then(|in_graph| in_graph.description.as_deref());

        if from_override.is_some() {
            return from_override;
        }
    }

    field.description.as_deref()
}

fn write_field_trailing_directives(sdl: &mut String, field: &FieldState) {
    let _ = write_tags(sdl, &field.tags);

    if field.inaccessible {
        sdl.push_str(" @inaccessible");
    }

    if field.authenticated {
        sdl.push_str(" @authenticated");
    }

    if !field.policies.is_empty() {
        sdl.push_str(" @policy(policies: ");
        let _ = write_string_matrix(sdl, &field.policies);
        sdl.push(')');
    }

    if !field.scopes.is_empty() {
        sdl.push_str(" @requiresScopes(scopes: ");
        let _ = write_string_matrix(sdl, &field.scopes);
        sdl.push(')');
    }

    if let Some(weight) = field.cost {
        let _ = write!(sdl, " @cost(weight: {weight})");
    }

    if let Some(list_size) = &field.list_size {
        sdl.push_str(" @listSize(");
        let mut first = true;

        if let Some(assumed_size) = list_size.assumed_size {
            let _ = write!(sdl, "assumedSize: {assumed_size}");
            first = false;
        }

        if let Some(slicing_arguments) = &list_size.slicing_arguments {
            if !first {
                sdl.push_str(", ");
            }
            sdl.push_str("slicingArguments: ");
            let _ = write_string_list(sdl, slicing_arguments);
            first = false;
        }

        if let Some(sized_fields) = &list_size.sized_fields {
            if !first {
                sdl.push_str(", ");
            }
            sdl.push_str("sizedFields: ");
            let _ = write_string_list(sdl, sized_fields);
            first = false;
        }

        if !list_size.require_one_slicing_argument {
            if !first {
                sdl.push_str(", ");
            }
            sdl.push_str("requireOneSlicingArgument: false");
        }

        sdl.push(')');
    }

    if let Some(deprecated) = &field.deprecated {
        let _ = write_deprecated(sdl, deprecated);
    }
}

/// Arguments merge by intersection: only those present in every subgraph that has the field
/// survive.
fn write_arguments(sdl: &mut String, field: &FieldState) {
    let arguments: Vec<(&String, &ArgumentState)> = field
        .args
        .iter()
        .filter(|(_, argument)| argument.by_graph.len() == field.by_graph.len())
        .collect();

    if arguments.is_empty() {
        return;
    }

    sdl.push('(');

    let mut arguments = arguments.into_iter().peekable();

    while let Some((name, argument)) = arguments.next() {
        let _ = write!(sdl, "{name}: {}", argument.r#type.rendered);

        if let Some(default) = &argument.default_value {
            let _ = write!(sdl, " = {default}");
        }

        let _ = write_tags(sdl, &argument.tags);

        if argument.inaccessible {
            sdl.push_str(" @inaccessible");
        }

        if let Some(weight) = argument.cost {
            let _ = write!(sdl, " @cost(weight: {weight})");
        }

        if let Some(deprecated) = &argument.deprecated {
            let _ = write_deprecated(sdl, deprecated);
        }

        if arguments.peek().is_some() {
            sdl.push_str(", ");
        }
    }

    sdl.push(')');
}

fn write_interface_type(sdl: &mut String, state: &SupergraphState, type_name: &str, interface: &InterfaceTypeState) {
    if let Some(description) = &interface.description {
        let _ = write!(sdl, "{}", Description(description, ""));
    }

    let _ = write!(sdl, "interface {type_name}");

    if !interface.interfaces.is_empty() {
        let _ = write!(sdl, " implements {}", interface.interfaces.iter().join(" & "));
    }

    sdl.push('\n');

    let mut join_type_count = 0;

    for (graph_name, in_graph) in &interface.by_graph {
        if in_graph.keys.is_empty() {
            let _ = writeln!(sdl, "{INDENT}@join__type(graph: {})", graph_enum(state, graph_name));
            join_type_count += 1;
            continue;
        }

        for key in &in_graph.keys {
            let _ = write!(sdl, "{INDENT}@join__type(graph: {}, key: ", graph_enum(state, graph_name));
            let _ = write_quoted(sdl, &key.fields_str);

            if in_graph.is_interface_object {
                sdl.push_str(", isInterfaceObject: true");
            }

            if !key.resolvable {
                sdl.push_str(", resolvable: false");
            }

            sdl.push_str(")\n");
            join_type_count += 1;
        }
    }

    write_common_type_directives(
        sdl,
        &interface.tags,
        interface.inaccessible,
        interface.authenticated,
        &interface.policies,
        &interface.scopes,
        interface.cost,
    );

    sdl.push_str("{\n");

    for (field_name, field) in &interface.fields {
        let join_fields = interface_field_join_fields(state, interface, field, join_type_count);

        if let Some(description) = &field.description {
            let _ = write!(sdl, "{}", Description(description, INDENT));
        }

        let _ = write!(sdl, "{INDENT}{field_name}");
        write_arguments(sdl, field);
        let _ = write!(sdl, ": {}", field.r#type.rendered);

        for join_field in &join_fields {
            write_join_field(sdl, join_field);
        }

        write_field_trailing_directives(sdl, field);
        sdl.push('\n');
    }

    sdl.push_str("}\n\n");
}

fn interface_field_join_fields<'a>(
    state: &'a SupergraphState,
    interface: &'a InterfaceTypeState,
    field: &'a FieldState,
    join_type_count: usize,
) -> Vec<JoinField<'a>> {
    let defined_everywhere = field.by_graph.len() == interface.by_graph.len();

    let join_fields = if !defined_everywhere || has_differences_between_graphs(None, field) {
        create_join_fields(state, None, "", field, field.by_graph.keys())
    } else {
        Vec::new()
    };

    if join_fields.len() == 1 && join_type_count == 1 && join_fields[0].is_plain() {
        return Vec::new();
    }

    join_fields
}

fn write_union_type(
    sdl: &mut String,
    state: &SupergraphState,
    type_name: &str,
    union: &crate::supergraph::state::UnionTypeState,
) {
    if let Some(description) = &union.description {
        let _ = write!(sdl, "{}", Description(description, ""));
    }

    let _ = write!(sdl, "union {type_name}");
    sdl.push('\n');

    for graph_name in &union.by_graph {
        let _ = writeln!(sdl, "{INDENT}@join__type(graph: {})", graph_enum(state, graph_name));
    }

    for (member, member_graphs) in &union.members {
        for graph_name in member_graphs {
            let _ = write!(sdl, "{INDENT}@join__unionMember(graph: {}, member: ", graph_enum(state, graph_name));
            let _ = write_quoted(sdl, member);
            sdl.push_str(")\n");
        }
    }

    if !union.tags.is_empty() {
        let mut line = String::new();
        let _ = write_tags(&mut line, &union.tags);
        let _ = writeln!(sdl, "{INDENT}{}", line.trim_start());
    }

    if union.inaccessible {
        let _ = writeln!(sdl, "{INDENT}@inaccessible");
    }

    let _ = writeln!(sdl, "{INDENT}= {}", union.members.keys().join(" | "));
    sdl.push('\n');
}

fn write_enum_type(
    sdl: &mut String,
    state: &SupergraphState,
    type_name: &str,
    enum_type: &crate::supergraph::state::EnumTypeState,
) {
    if let Some(description) = &enum_type.description {
        let _ = write!(sdl, "{}", Description(description, ""));
    }

    let _ = write!(sdl, "enum {type_name}");
    sdl.push('\n');

    for graph_name in &enum_type.by_graph {
        let _ = writeln!(sdl, "{INDENT}@join__type(graph: {})", graph_enum(state, graph_name));
    }

    if !enum_type.tags.is_empty() {
        let mut line = String::new();
        let _ = write_tags(&mut line, &enum_type.tags);
        let _ = writeln!(sdl, "{INDENT}{}", line.trim_start());
    }

    if enum_type.inaccessible {
        let _ = writeln!(sdl, "{INDENT}@inaccessible");
    }

    if enum_type.authenticated {
        let _ = writeln!(sdl, "{INDENT}@authenticated");
    }

    if let Some(weight) = enum_type.cost {
        let _ = writeln!(sdl, "{INDENT}@cost(weight: {weight})");
    }

    sdl.push_str("{\n");

    for (value_name, value) in &enum_type.values {
        if let Some(description) = &value.description {
            let _ = write!(sdl, "{}", Description(description, INDENT));
        }

        let _ = write!(sdl, "{INDENT}{value_name}");

        for graph_name in &value.by_graph {
            let _ = write!(sdl, " @join__enumValue(graph: {})", graph_enum(state, graph_name));
        }

        let _ = write_tags(sdl, &value.tags);

        if value.inaccessible {
            sdl.push_str(" @inaccessible");
        }

        if let Some(deprecated) = &value.deprecated {
            let _ = write_deprecated(sdl, deprecated);
        }

        sdl.push('\n');
    }

    sdl.push_str("}\n\n");
}

fn write_scalar_type(
    sdl: &mut String,
    state: &SupergraphState,
    type_name: &str,
    scalar: &crate::supergraph::state::ScalarTypeState,
) {
    if matches!(type_name, "ID" | "String" | "Int" | "Float" | "Boolean") {
        return;
    }

    if let Some(description) = &scalar.description {
        let _ = write!(sdl, "{}", Description(description, ""));
    }

    let _ = write!(sdl, "scalar {type_name}");

    for graph_name in &scalar.by_graph {
        let _ = write!(sdl, "\n{INDENT}@join__type(graph: {})", graph_enum(state, graph_name));
    }

    if let Some(url) = &scalar.specified_by {
        let _ = write!(sdl, "\n{INDENT}@specifiedBy(url: ");
        let _ = write_quoted(sdl, url);
        sdl.push(')');
    }

    let _ = write_tags(sdl, &scalar.tags);

    if scalar.inaccessible {
        sdl.push_str(" @inaccessible");
    }

    if scalar.authenticated {
        sdl.push_str(" @authenticated");
    }

    if !scalar.policies.is_empty() {
        sdl.push_str(" @policy(policies: ");
        let _ = write_string_matrix(sdl, &scalar.policies);
        sdl.push(')');
    }

    if !scalar.scopes.is_empty() {
        sdl.push_str(" @requiresScopes(scopes: ");
        let _ = write_string_matrix(sdl, &scalar.scopes);
        sdl.push(')');
    }

    if let Some(weight) = scalar.cost {
        let _ = write!(sdl, " @cost(weight: {weight})");
    }

    sdl.push_str("\n\n");
}

fn write_input_object_type(
    sdl: &mut String,
    state: &SupergraphState,
    type_name: &str,
    input_object: &crate::supergraph::state::InputObjectTypeState,
) {
    if let Some(description) = &input_object.description {
        let _ = write!(sdl, "{}", Description(description, ""));
    }

    let _ = write!(sdl, "input {type_name}");
    sdl.push('\n');

    for graph_name in &input_object.by_graph {
        let _ = writeln!(sdl, "{INDENT}@join__type(graph: {})", graph_enum(state, graph_name));
    }

    if !input_object.tags.is_empty() {
        let mut line = String::new();
        let _ = write_tags(&mut line, &input_object.tags);
        let _ = writeln!(sdl, "{INDENT}{}", line.trim_start());
    }

    if input_object.inaccessible {
        let _ = writeln!(sdl, "{INDENT}@inaccessible");
    }

    sdl.push_str("{\n");

    // Input fields merge by intersection.
    for (field_name, field) in &input_object.fields {
        if field.by_graph.len() != input_object.by_graph.len() {
            continue;
        }

        if let Some(description) = &field.description {
            let _ = write!(sdl, "{}", Description(description, INDENT));
        }

        let _ = write!(sdl, "{INDENT}{field_name}: {}", field.r#type.rendered);

        if let Some(default) = &field.default_value {
            let _ = write!(sdl, " = {default}");
        }

        let _ = write_tags(sdl, &field.tags);

        if field.inaccessible {
            sdl.push_str(" @inaccessible");
        }

        if let Some(weight) = field.cost {
            let _ = write!(sdl, " @cost(weight: {weight})");
        }

        if let Some(deprecated) = &field.deprecated {
            let _ = write_deprecated(sdl, deprecated);
        }

        sdl.push('\n');
    }

    sdl.push_str("}\n\n");
}
