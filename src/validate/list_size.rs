use crate::{
    diagnostics::{Diagnostics, ErrorCode},
    subgraphs::state::{Field, ListSize, Subgraph, TypeState},
};

/// Semantic checks on `@listSize` usages. The argument shape checks already ran during
/// ingestion.
pub(super) fn validate(subgraph: &Subgraph, diagnostics: &mut Diagnostics) {
    for (type_name, ty) in &subgraph.types {
        let Some(fields) = ty.fields() else { continue };

        for (field_name, field) in fields {
            let Some(list_size) = &field.list_size else { continue };

            validate_list_size_on_field(subgraph, type_name, field_name, field, list_size, diagnostics);
        }
    }
}

fn validate_list_size_on_field(
    subgraph: &Subgraph,
    type_name: &str,
    field_name: &str,
    field: &Field,
    list_size: &ListSize,
    diagnostics: &mut Diagnostics,
) {
    let coordinate = format!("\"{type_name}.{field_name}\"");

    if list_size.assumed_size.is_some_and(|size| size < 0) {
        diagnostics.push_subgraph_error(
            &subgraph.name,
            format_args!("{coordinate} has negative @listSize(assumedSize:) value"),
            ErrorCode::ListSizeInvalidAssumedSize,
        );
        return;
    }

    let sized_fields = list_size.sized_fields.as_deref().unwrap_or_default();

    if sized_fields.is_empty() && !field.r#type.is_list() {
        diagnostics.push_subgraph_error(
            &subgraph.name,
            format_args!("{coordinate} is not a list. Try to add @listSize(sizedFields:) argument."),
            ErrorCode::ListSizeInvalidSizedField,
        );
        return;
    }

    if !sized_fields.is_empty() {
        let target_fields = subgraph
            .types
            .get(&field.r#type.inner)
            .filter(|ty| matches!(ty, TypeState::Object(_) | TypeState::Interface(_)))
            .and_then(TypeState::fields);

        let Some(target_fields) = target_fields else {
            diagnostics.push_subgraph_error(
                &subgraph.name,
                format_args!("{coordinate} has @listSize(sizedFields:) applied, but the output type is not an object"),
                ErrorCode::ListSizeInvalidSizedField,
            );
            return;
        };

        let mut any_invalid = false;

        for sized_field in sized_fields {
            match target_fields.get(sized_field) {
                None => {
                    diagnostics.push_subgraph_error(
                        &subgraph.name,
                        format_args!(
                            "{coordinate} references \"{sized_field}\" field in @listSize(sizedFields:) argument that does not exist."
                        ),
                        ErrorCode::ListSizeInvalidSizedField,
                    );
                    any_invalid = true;
                }
                Some(target) if !is_int_type(&target.r#type.rendered) => {
                    diagnostics.push_subgraph_error(
                        &subgraph.name,
                        format_args!(
                            "{coordinate} references \"{sized_field}\" field in @listSize(sizedFields:) argument that is not an integer."
                        ),
                        ErrorCode::ListSizeInvalidSizedField,
                    );
                    any_invalid = true;
                }
                Some(_) => (),
            }
        }

        if any_invalid {
            return;
        }
    }

    for slicing_argument in list_size.slicing_arguments.as_deref().unwrap_or_default() {
        match field.arguments.get(slicing_argument) {
            None => {
                diagnostics.push_subgraph_error(
                    &subgraph.name,
                    format_args!(
                        "{coordinate} references \"{slicing_argument}\" argument in @listSize(slicingArguments:) that does not exist."
                    ),
                    ErrorCode::ListSizeInvalidSlicingArgument,
                );
            }
            Some(argument) if !is_int_type(&argument.r#type.rendered) => {
                diagnostics.push_subgraph_error(
                    &subgraph.name,
                    format_args!(
                        "{coordinate} references \"{slicing_argument}\" argument in @listSize(slicingArguments:) that is not an integer."
                    ),
                    ErrorCode::ListSizeInvalidSlicingArgument,
                );
            }
            Some(_) => (),
        }
    }
}

/// `Int` or `Int!`, but not a list of them.
fn is_int_type(rendered: &str) -> bool {
    matches!(rendered, "Int" | "Int!")
}
