//! The client-facing view of the supergraph: every `@inaccessible` element removed, all the
//! join and federation machinery stripped, only descriptions, `@deprecated` and `@specifiedBy`
//! kept.

use std::fmt::Write;

use crate::supergraph::state::SupergraphState;

use super::render::{Description, INDENT, write_deprecated, write_quoted};

pub(crate) fn emit_api_sdl(state: &SupergraphState) -> String {
    let mut sdl = String::new();

    for (type_name, object) in &state.objects {
        if object.inaccessible {
            continue;
        }

        let visible_fields: Vec<_> = object
            .fields
            .iter()
            .filter(|(_, field)| !field.inaccessible)
            .collect();

        if visible_fields.is_empty() {
            continue;
        }

        if let Some(description) = &object.description {
            let _ = write!(sdl, "{}", Description(description, ""));
        }

        let _ = write!(sdl, "type {type_name}");
        write_implements(&mut sdl, state, &object.interfaces);
        sdl.push_str(" {\n");

        for (field_name, field) in visible_fields {
            write_output_field(&mut sdl, field_name, field);
        }

        sdl.push_str("}\n\n");
    }

    for (type_name, interface) in &state.interfaces {
        if interface.inaccessible {
            continue;
        }

        let visible_fields: Vec<_> = interface
            .fields
            .iter()
            .filter(|(_, field)| !field.inaccessible)
            .collect();

        if visible_fields.is_empty() {
            continue;
        }

        if let Some(description) = &interface.description {
            let _ = write!(sdl, "{}", Description(description, ""));
        }

        let _ = write!(sdl, "interface {type_name}");
        write_implements(&mut sdl, state, &interface.interfaces);
        sdl.push_str(" {\n");

        for (field_name, field) in visible_fields {
            write_output_field(&mut sdl, field_name, field);
        }

        sdl.push_str("}\n\n");
    }

    for (type_name, union) in &state.unions {
        if union.inaccessible {
            continue;
        }

        let members: Vec<&str> = union
            .members
            .keys()
            .filter(|member| {
                state
                    .objects
                    .get(member.as_str())
                    .is_none_or(|object| !object.inaccessible)
            })
            .map(String::as_str)
            .collect();

        if members.is_empty() {
            continue;
        }

        if let Some(description) = &union.description {
            let _ = write!(sdl, "{}", Description(description, ""));
        }

        let _ = write!(sdl, "union {type_name} = {}\n\n", members.join(" | "));
    }

    for (type_name, enum_type) in &state.enums {
        if enum_type.inaccessible {
            continue;
        }

        let visible_values: Vec<_> = enum_type
            .values
            .iter()
            .filter(|(_, value)| !value.inaccessible)
            .collect();

        if visible_values.is_empty() {
            continue;
        }

        if let Some(description) = &enum_type.description {
            let _ = write!(sdl, "{}", Description(description, ""));
        }

        let _ = writeln!(sdl, "enum {type_name} {{");

        for (value_name, value) in visible_values {
            if let Some(description) = &value.description {
                let _ = write!(sdl, "{}", Description(description, INDENT));
            }

            let _ = write!(sdl, "{INDENT}{value_name}");

            if let Some(deprecated) = &value.deprecated {
                let _ = write_deprecated(&mut sdl, deprecated);
            }

            sdl.push('\n');
        }

        sdl.push_str("}\n\n");
    }

    for (type_name, scalar) in &state.scalars {
        if scalar.inaccessible || matches!(type_name.as_str(), "ID" | "String" | "Int" | "Float" | "Boolean") {
            continue;
        }

        if let Some(description) = &scalar.description {
            let _ = write!(sdl, "{}", Description(description, ""));
        }

        let _ = write!(sdl, "scalar {type_name}");

        if let Some(url) = &scalar.specified_by {
            sdl.push_str(" @specifiedBy(url: ");
            let _ = write_quoted(&mut sdl, url);
            sdl.push(')');
        }

        sdl.push_str("\n\n");
    }

    for (type_name, input_object) in &state.input_objects {
        if input_object.inaccessible {
            continue;
        }

        let visible_fields: Vec<_> = input_object
            .fields
            .iter()
            .filter(|(_, field)| {
                !field.inaccessible && field.by_graph.len() == input_object.by_graph.len()
            })
            .collect();

        if visible_fields.is_empty() {
            continue;
        }

        if let Some(description) = &input_object.description {
            let _ = write!(sdl, "{}", Description(description, ""));
        }

        let _ = writeln!(sdl, "input {type_name} {{");

        for (field_name, field) in visible_fields {
            if let Some(description) = &field.description {
                let _ = write!(sdl, "{}", Description(description, INDENT));
            }

            let _ = write!(sdl, "{INDENT}{field_name}: {}", field.r#type.rendered);

            if let Some(default) = &field.default_value {
                let _ = write!(sdl, " = {default}");
            }

            if let Some(deprecated) = &field.deprecated {
                let _ = write_deprecated(&mut sdl, deprecated);
            }

            sdl.push('\n');
        }

        sdl.push_str("}\n\n");
    }

    while sdl.ends_with('\n') {
        sdl.pop();
    }
    sdl.push('\n');

    sdl
}

fn write_implements(sdl: &mut String, state: &SupergraphState, interfaces: &indexmap::IndexSet<String>) {
    let visible: Vec<&str> = interfaces
        .iter()
        .filter(|name| {
            state
                .interfaces
                .get(name.as_str())
                .is_none_or(|interface| !interface.inaccessible)
        })
        .map(String::as_str)
        .collect();

    if visible.is_empty() {
        return;
    }

    sdl.push_str(" implements ");
    sdl.push_str(&visible.join(" & "));
}

fn write_output_field(sdl: &mut String, field_name: &str, field: &crate::supergraph::state::FieldState) {
    if let Some(description) = &field.description {
        let _ = write!(sdl, "{}", Description(description, INDENT));
    }

    let _ = write!(sdl, "{INDENT}{field_name}");

    let arguments: Vec<_> = field
        .args
        .iter()
        .filter(|(_, argument)| !argument.inaccessible && argument.by_graph.len() == field.by_graph.len())
        .collect();

    if !arguments.is_empty() {
        sdl.push('(');

        let mut arguments = arguments.into_iter().peekable();

        while let Some((name, argument)) = arguments.next() {
            let _ = write!(sdl, "{name}: {}", argument.r#type.rendered);

            if let Some(default) = &argument.default_value {
                let _ = write!(sdl, " = {default}");
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

    let _ = write!(sdl, ": {}", field.r#type.rendered);

    if let Some(deprecated) = &field.deprecated {
        let _ = write_deprecated(sdl, deprecated);
    }

    sdl.push('\n');
}
