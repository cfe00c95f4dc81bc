use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SatisfiabilityErrorKind {
    /// The key fields of an entity jump cannot be resolved from the source subgraph.
    Key,
    /// A `@requires(fields:)` condition cannot be satisfied.
    Require,
    /// The field is declared `@external` and not provided locally.
    External,
    /// The field cannot be found from here.
    MissingField,
    /// The target subgraph has the field, but no `@key` to land on.
    NoKey,
    /// No subgraph can resolve the concrete type behind an `@interfaceObject`.
    NoImplementation,
}

/// A reason why a field turned out to be unreachable. Carrying the raw pieces and formatting
/// only in [`fmt::Display`] keeps construction cheap: most of these are created during the
/// search and discarded when another path succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SatisfiabilityError {
    pub(crate) kind: SatisfiabilityErrorKind,
    pub(crate) source_graph_name: String,
    pub(crate) type_name: String,
    pub(crate) field_name: Option<String>,
    target_graph_name: Option<String>,
    key_fields: Option<String>,
}

impl SatisfiabilityError {
    pub(crate) fn for_key(
        source_graph_name: &str,
        target_graph_name: &str,
        type_name: &str,
        key_fields: &str,
    ) -> Self {
        SatisfiabilityError {
            kind: SatisfiabilityErrorKind::Key,
            source_graph_name: source_graph_name.to_owned(),
            type_name: type_name.to_owned(),
            field_name: None,
            target_graph_name: Some(target_graph_name.to_owned()),
            key_fields: Some(key_fields.to_owned()),
        }
    }

    pub(crate) fn for_require(source_graph_name: &str, type_name: &str, field_name: &str) -> Self {
        SatisfiabilityError {
            kind: SatisfiabilityErrorKind::Require,
            source_graph_name: source_graph_name.to_owned(),
            type_name: type_name.to_owned(),
            field_name: Some(field_name.to_owned()),
            target_graph_name: None,
            key_fields: None,
        }
    }

    pub(crate) fn for_external(source_graph_name: &str, type_name: &str, field_name: &str) -> Self {
        SatisfiabilityError {
            kind: SatisfiabilityErrorKind::External,
            source_graph_name: source_graph_name.to_owned(),
            type_name: type_name.to_owned(),
            field_name: Some(field_name.to_owned()),
            target_graph_name: None,
            key_fields: None,
        }
    }

    pub(crate) fn for_missing_field(source_graph_name: &str, type_name: &str, field_name: &str) -> Self {
        SatisfiabilityError {
            kind: SatisfiabilityErrorKind::MissingField,
            source_graph_name: source_graph_name.to_owned(),
            type_name: type_name.to_owned(),
            field_name: Some(field_name.to_owned()),
            target_graph_name: None,
            key_fields: None,
        }
    }

    pub(crate) fn for_no_key(
        source_graph_name: &str,
        target_graph_name: &str,
        type_name: &str,
        field_name: &str,
    ) -> Self {
        SatisfiabilityError {
            kind: SatisfiabilityErrorKind::NoKey,
            source_graph_name: source_graph_name.to_owned(),
            type_name: type_name.to_owned(),
            field_name: Some(field_name.to_owned()),
            target_graph_name: Some(target_graph_name.to_owned()),
            key_fields: None,
        }
    }

    pub(crate) fn for_no_implementation(source_graph_name: &str, type_name: &str) -> Self {
        SatisfiabilityError {
            kind: SatisfiabilityErrorKind::NoImplementation,
            source_graph_name: source_graph_name.to_owned(),
            type_name: type_name.to_owned(),
            field_name: None,
            target_graph_name: None,
            key_fields: None,
        }
    }
}

impl fmt::Display for SatisfiabilityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let type_name = &self.type_name;
        let field_name = self.field_name.as_deref().unwrap_or_default();

        match self.kind {
            SatisfiabilityErrorKind::Key => {
                let target = self.target_graph_name.as_deref().unwrap_or_default();
                let key_fields = self.key_fields.as_deref().unwrap_or_default();
                let source = &self.source_graph_name;
                write!(
                    f,
                    "cannot move to subgraph \"{target}\" using @key(fields: \"{key_fields}\") of \"{type_name}\", the key field(s) cannot be resolved from subgraph \"{source}\"."
                )
            }
            SatisfiabilityErrorKind::Require => {
                write!(f, "cannot satisfy @require conditions on field \"{type_name}.{field_name}\".")
            }
            SatisfiabilityErrorKind::External => {
                write!(
                    f,
                    "field \"{type_name}.{field_name}\" is not resolvable because marked @external."
                )
            }
            SatisfiabilityErrorKind::MissingField => {
                write!(f, "cannot find field \"{type_name}.{field_name}\".")
            }
            SatisfiabilityErrorKind::NoKey => {
                let target = self.target_graph_name.as_deref().unwrap_or_default();
                write!(
                    f,
                    "cannot move to subgraph \"{target}\", which has field \"{type_name}.{field_name}\", because type \"{type_name}\" has no @key defined in subgraph \"{target}\"."
                )
            }
            SatisfiabilityErrorKind::NoImplementation => {
                write!(
                    f,
                    "no subgraph can be reached to resolve the implementation type of @interfaceObject type \"{type_name}\"."
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SatisfiabilityError;

    #[test]
    fn message_templates() {
        assert_eq!(
            SatisfiabilityError::for_key("b", "a", "User", "id").to_string(),
            "cannot move to subgraph \"a\" using @key(fields: \"id\") of \"User\", the key field(s) cannot be resolved from subgraph \"b\"."
        );
        assert_eq!(
            SatisfiabilityError::for_require("b", "User", "name").to_string(),
            "cannot satisfy @require conditions on field \"User.name\"."
        );
        assert_eq!(
            SatisfiabilityError::for_external("b", "User", "name").to_string(),
            "field \"User.name\" is not resolvable because marked @external."
        );
        assert_eq!(
            SatisfiabilityError::for_missing_field("b", "User", "name").to_string(),
            "cannot find field \"User.name\"."
        );
        assert_eq!(
            SatisfiabilityError::for_no_key("b", "a", "User", "name").to_string(),
            "cannot move to subgraph \"a\", which has field \"User.name\", because type \"User\" has no @key defined in subgraph \"a\"."
        );
        assert_eq!(
            SatisfiabilityError::for_no_implementation("a", "Media").to_string(),
            "no subgraph can be reached to resolve the implementation type of @interfaceObject type \"Media\"."
        );
    }
}
