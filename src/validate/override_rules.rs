use crate::{
    diagnostics::{Diagnostics, ErrorCode},
    subgraphs::state::Subgraph,
};

pub(super) fn validate(subgraph: &Subgraph, diagnostics: &mut Diagnostics) {
    for (type_name, ty) in &subgraph.types {
        let Some(fields) = ty.fields() else { continue };

        for (field_name, field) in fields {
            let Some(label) = field.r#override.as_ref().and_then(|o| o.label.as_deref()) else {
                continue;
            };

            if !is_valid_label(label) {
                let subgraph_name = &subgraph.name;
                diagnostics.push_subgraph_error(
                    subgraph_name,
                    format_args!(
                        "Invalid @override label \"{label}\" on field \"{type_name}.{field_name}\" on subgraph \"{subgraph_name}\": labels must start with a letter and after that may contain alphanumerics, underscores, minuses, colons, periods, or slashes. Alternatively, labels may be of the form \"percent(x)\" where x is a float between 0-100 inclusive."
                    ),
                    ErrorCode::OverrideLabelInvalid,
                );
            }
        }
    }
}

/// A progressive override label is either `percent(x)` with `x` a float in `0..=100` carrying
/// at most 8 decimal places, or an identifier matching `[a-zA-Z][a-zA-Z0-9_\-:./]*`.
pub(crate) fn is_valid_label(label: &str) -> bool {
    if let Some(percent) = label.strip_prefix("percent(").and_then(|rest| rest.strip_suffix(')')) {
        return is_valid_percent(percent);
    }

    let mut chars = label.chars();
    chars.next().is_some_and(|first| first.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | ':' | '.' | '/'))
}

fn is_valid_percent(percent: &str) -> bool {
    let (integer, fraction) = match percent.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (percent, None),
    };

    if integer.is_empty() || !integer.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    if let Some(fraction) = fraction {
        if fraction.is_empty() || fraction.len() > 8 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
    }

    let Ok(value) = percent.parse::<f64>() else {
        return false;
    };

    (0.0..=100.0).contains(&value)
}

#[cfg(test)]
mod tests {
    use super::is_valid_label;

    #[test]
    fn percent_labels() {
        assert!(is_valid_label("percent(0)"));
        assert!(is_valid_label("percent(100)"));
        assert!(is_valid_label("percent(25.5)"));
        assert!(is_valid_label("percent(1.12345678)"));

        assert!(!is_valid_label("percent(101)"));
        assert!(!is_valid_label("percent(-1)"));
        assert!(!is_valid_label("percent(1.123456789)"));
        assert!(!is_valid_label("percent()"));
        assert!(!is_valid_label("percent(.5)"));
        assert!(!is_valid_label("percent(foo)"));
    }

    #[test]
    fn identifier_labels() {
        assert!(is_valid_label("foo"));
        assert!(is_valid_label("Foo_bar-2:baz.qux/quz"));

        assert!(!is_valid_label("2foo"));
        assert!(!is_valid_label("_foo"));
        assert!(!is_valid_label(""));
        assert!(!is_valid_label("foo bar"));
    }
}
