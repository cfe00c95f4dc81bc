/// A parsed selection set from a `FieldSet` argument (`@key(fields:)`, `@requires(fields:)`,
/// `@provides(fields:)`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Selection {
    Field {
        field: String,
        subselection: Vec<Selection>,
    },
    InlineFragment {
        on: String,
        subselection: Vec<Selection>,
    },
}

impl Selection {
    pub(crate) fn field_name(&self) -> Option<&str> {
        match self {
            Selection::Field { field, .. } => Some(field),
            Selection::InlineFragment { .. } => None,
        }
    }
}

/// Parses the string value of a `FieldSet` argument. The string is a selection set without the
/// outer braces.
pub(crate) fn parse_selection_set(
    fields: &str,
    directive_name: &str,
    argument_name: &str,
) -> Result<Vec<Selection>, String> {
    use cynic_parser::executable as ast;

    let document = format!("{{ {fields} }}");
    let parsed = cynic_parser::parse_executable_document(&document).map_err(|err| {
        format!("could not parse the `{argument_name}` argument in `@{directive_name}` as a selection set: {err}")
    })?;

    let Some(operation) = parsed.operations().next() else {
        return Err(format!(
            "the `{argument_name}` argument in `@{directive_name}` must be a selection set"
        ));
    };

    fn build_selection_set(selections: ast::Iter<'_, ast::Selection<'_>>) -> Result<Vec<Selection>, String> {
        selections
            .map(|selection| match selection {
                ast::Selection::Field(item) => Ok(Selection::Field {
                    field: item.name().to_owned(),
                    subselection: build_selection_set(item.selection_set())?,
                }),
                ast::Selection::InlineFragment(fragment) => {
                    let on = fragment
                        .type_condition()
                        .ok_or("inline fragments must have a type condition")?;

                    Ok(Selection::InlineFragment {
                        on: on.to_owned(),
                        subselection: build_selection_set(fragment.selection_set())?,
                    })
                }
                _ => Err("fragment spreads are not allowed".to_owned()),
            })
            .collect()
    }

    build_selection_set(operation.selection_set())
        .map_err(|error| format!("the `{argument_name}` argument in `@{directive_name}` was invalid: {error}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_key() {
        let selections = parse_selection_set("id sku", "key", "fields").unwrap();
        assert_eq!(
            selections,
            vec![
                Selection::Field {
                    field: "id".to_owned(),
                    subselection: vec![],
                },
                Selection::Field {
                    field: "sku".to_owned(),
                    subselection: vec![],
                },
            ]
        );
    }

    #[test]
    fn nested_key_with_fragment() {
        let selections = parse_selection_set("id item { ... on Book { isbn } }", "key", "fields").unwrap();
        let Selection::Field { subselection, .. } = &selections[1] else {
            panic!("expected a field");
        };
        assert!(matches!(&subselection[0], Selection::InlineFragment { on, .. } if on == "Book"));
    }

    #[test]
    fn invalid_selection_set() {
        let err = parse_selection_set("id {", "key", "fields").unwrap_err();
        assert!(err.contains("`fields` argument in `@key`"));
    }

    #[test]
    fn fragment_spreads_are_rejected() {
        let err = parse_selection_set("...Frag", "requires", "fields").unwrap_err();
        assert!(err.contains("fragment spreads are not allowed"));
    }
}
