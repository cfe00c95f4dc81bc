use std::fmt;

/// Warnings and errors produced by composition.
#[derive(Default, Debug)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    /// Is any of the diagnostics fatal, i.e. a hard error?
    pub fn any_fatal(&self) -> bool {
        self.0.iter().any(|diagnostic| diagnostic.is_fatal)
    }

    /// Is there any diagnostic, warning or error?
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter()
    }

    /// Iterate fatal diagnostics.
    pub fn iter_errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter().filter(|diagnostic| diagnostic.is_fatal)
    }

    /// Iterate non-fatal diagnostics.
    pub fn iter_warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter().filter(|diagnostic| !diagnostic.is_fatal)
    }

    /// Iterate over all diagnostic messages.
    pub fn iter_messages(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|diagnostic| diagnostic.message.as_str())
    }

    pub(crate) fn clone_all_from(&mut self, other: &Diagnostics) {
        self.0.extend(other.0.iter().cloned())
    }

    /// A fatal diagnostic attributable to one subgraph. The message is prefixed with the
    /// subgraph name, following the `[subgraph] ...` convention.
    pub(crate) fn push_subgraph_error(
        &mut self,
        subgraph_name: &str,
        message: fmt::Arguments<'_>,
        code: ErrorCode,
    ) {
        self.0.push(Diagnostic {
            message: format!("[{subgraph_name}] {message}"),
            is_fatal: true,
            code: Some(code),
        });
    }

    pub(crate) fn push_error(&mut self, message: String, code: ErrorCode) {
        self.0.push(Diagnostic {
            message,
            is_fatal: true,
            code: Some(code),
        });
    }

    pub(crate) fn push_fatal(&mut self, message: String) {
        self.0.push(Diagnostic {
            message,
            is_fatal: true,
            code: None,
        });
    }

    pub(crate) fn push_warning(&mut self, message: String) {
        self.0.push(Diagnostic {
            message,
            is_fatal: false,
            code: None,
        });
    }
}

/// A composition diagnostic.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Diagnostic {
    message: String,
    /// Should this diagnostic be interpreted as a composition failure?
    #[serde(skip)]
    is_fatal: bool,
    #[serde(rename = "extensions", serialize_with = "serialize_code_as_extensions")]
    code: Option<ErrorCode>,
}

impl Diagnostic {
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_fatal(&self) -> bool {
        self.is_fatal
    }

    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }
}

fn serialize_code_as_extensions<S>(code: &Option<ErrorCode>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeMap;
    let mut map = serializer.serialize_map(Some(1))?;
    map.serialize_entry("code", code)?;
    map.end()
}

/// Machine readable error codes attached to fatal diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ImplementedByInaccessible,
    InvalidGraphql,
    InvalidLinkDirectiveUsage,
    LinkImportNameMismatch,
    ListSizeInvalidAssumedSize,
    ListSizeInvalidRequireOneSlicingArgument,
    ListSizeInvalidSizedField,
    ListSizeInvalidSlicingArgument,
    OverrideLabelInvalid,
    SatisfiabilityError,
    UnsupportedFeature,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ImplementedByInaccessible => "IMPLEMENTED_BY_INACCESSIBLE",
            ErrorCode::InvalidGraphql => "INVALID_GRAPHQL",
            ErrorCode::InvalidLinkDirectiveUsage => "INVALID_LINK_DIRECTIVE_USAGE",
            ErrorCode::LinkImportNameMismatch => "LINK_IMPORT_NAME_MISMATCH",
            ErrorCode::ListSizeInvalidAssumedSize => "LIST_SIZE_INVALID_ASSUMED_SIZE",
            ErrorCode::ListSizeInvalidRequireOneSlicingArgument => {
                "LIST_SIZE_INVALID_REQUIRE_ONE_SLICING_ARGUMENT"
            }
            ErrorCode::ListSizeInvalidSizedField => "LIST_SIZE_INVALID_SIZED_FIELD",
            ErrorCode::ListSizeInvalidSlicingArgument => "LIST_SIZE_INVALID_SLICING_ARGUMENT",
            ErrorCode::OverrideLabelInvalid => "OVERRIDE_LABEL_INVALID",
            ErrorCode::SatisfiabilityError => "SATISFIABILITY_ERROR",
            ErrorCode::UnsupportedFeature => "UNSUPPORTED_FEATURE",
        }
    }
}
