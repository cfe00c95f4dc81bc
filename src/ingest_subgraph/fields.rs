use indexmap::IndexMap;

use super::*;
use crate::subgraphs::state::{Field, FieldType, InputValue};

pub(super) fn ingest_fields(
    ctx: &mut Context<'_>,
    fields: ast::iter::Iter<'_, ast::FieldDefinition<'_>>,
    type_name: &str,
    parent_is_query_root_type: bool,
    out: &mut IndexMap<String, Field>,
) {
    for field in fields {
        let field_name = field.name();

        // These are special fields on Query exposed by subgraphs.
        if parent_is_query_root_type && ["_entities", "_service"].contains(&field_name) {
            continue;
        }

        let state = out.entry(field_name.to_owned()).or_insert_with(Field::default);

        state.r#type = field_type_from_ast(field.ty());

        if state.description.is_none() {
            state.description = field.description().map(|d| d.to_cow().into_owned());
        }

        for argument in field.arguments() {
            let argument_state = state
                .arguments
                .entry(argument.name().to_owned())
                .or_insert_with(InputValue::default);

            ingest_input_value(ctx, argument, argument_state);
        }

        directives::ingest_field_directives(ctx, field.directives(), type_name, field_name, state);
    }
}

pub(super) fn ingest_input_fields(
    ctx: &mut Context<'_>,
    fields: ast::iter::Iter<'_, ast::InputValueDefinition<'_>>,
    out: &mut IndexMap<String, InputValue>,
) {
    for field in fields {
        let state = out.entry(field.name().to_owned()).or_insert_with(InputValue::default);
        ingest_input_value(ctx, field, state);
    }
}

fn ingest_input_value(ctx: &mut Context<'_>, input_value: ast::InputValueDefinition<'_>, state: &mut InputValue) {
    state.r#type = field_type_from_ast(input_value.ty());

    if state.description.is_none() {
        state.description = input_value.description().map(|d| d.to_cow().into_owned());
    }

    if state.default_value.is_none() {
        state.default_value = input_value.default_value().map(super::render_const_value);
    }

    directives::ingest_input_value_directives(ctx, input_value.directives(), state);
}

/// Renders the type reference with its list and non-null wrappers, innermost first.
pub(super) fn field_type_from_ast(ty: ast::Type<'_>) -> FieldType {
    use cynic_parser::common::WrappingType;

    let inner = ty.name().to_owned();
    let mut rendered = inner.clone();

    // wrappers() returns the outermost wrapper first.
    let wrappers: Vec<_> = ty.wrappers().collect();

    for wrapper in wrappers.into_iter().rev() {
        match wrapper {
            WrappingType::NonNull => rendered.push('!'),
            WrappingType::List => rendered = format!("[{rendered}]"),
        }
    }

    FieldType { inner, rendered }
}
