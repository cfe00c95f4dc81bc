use std::collections::HashMap;

use super::*;
use crate::{
    link::{COST_IDENTITY, FederatedLink},
    subgraphs::{
        selections::parse_selection_set,
        state::{CommonDirectives, Deprecated, Field, FieldFlags, FieldSet, InputValue, Key, ListSize, Override},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum FederationDirective {
    Authenticated,
    Cost,
    Extends,
    External,
    InterfaceObject,
    Key,
    ListSize,
    Override,
    Inaccessible,
    Policy,
    Provides,
    Requires,
    RequiresScopes,
    Shareable,
    Tag,
}

const FEDERATION_DIRECTIVES: &[(&str, FederationDirective)] = &[
    ("@authenticated", FederationDirective::Authenticated),
    ("@cost", FederationDirective::Cost),
    ("@extends", FederationDirective::Extends),
    ("@external", FederationDirective::External),
    ("@inaccessible", FederationDirective::Inaccessible),
    ("@interfaceObject", FederationDirective::InterfaceObject),
    ("@key", FederationDirective::Key),
    ("@listSize", FederationDirective::ListSize),
    ("@override", FederationDirective::Override),
    ("@policy", FederationDirective::Policy),
    ("@provides", FederationDirective::Provides),
    ("@requires", FederationDirective::Requires),
    ("@requiresScopes", FederationDirective::RequiresScopes),
    ("@shareable", FederationDirective::Shareable),
    ("@tag", FederationDirective::Tag),
];

/// Maps the directive names in use in one subgraph to the federation directives they stand for.
///
/// In a federation v2 subgraph, names go through `@link` import resolution: an unimported
/// directive is only recognized in its namespaced `federation__*` form, aliased imports are
/// recognized under the alias. Federation v1 subgraphs use the plain names.
pub(super) struct DirectiveMatcher {
    names: HashMap<String, FederationDirective>,
}

impl DirectiveMatcher {
    pub(super) fn new(links: &[FederatedLink], version: FederationVersion) -> DirectiveMatcher {
        let mut names = HashMap::new();

        match links.iter().find(|link| link.is_federation()) {
            Some(federation_link) if !version.is_v1() => {
                for (canonical, directive) in FEDERATION_DIRECTIVES {
                    names.insert(federation_link.resolve_import_name(canonical), *directive);
                }
            }
            _ => {
                for (canonical, directive) in FEDERATION_DIRECTIVES {
                    names.insert(canonical.trim_start_matches('@').to_owned(), *directive);
                }
            }
        }

        // The cost spec can also be linked on its own.
        for link in links.iter().filter(|link| link.identity() == COST_IDENTITY) {
            names.insert(link.resolve_import_name("@cost"), FederationDirective::Cost);
            names.insert(link.resolve_import_name("@listSize"), FederationDirective::ListSize);
        }

        DirectiveMatcher { names }
    }

    pub(super) fn match_name(&self, name: &str) -> Option<FederationDirective> {
        self.names.get(name).copied()
    }
}

pub(super) fn ingest_object_directives(
    ctx: &mut Context<'_>,
    directives: ast::iter::Iter<'_, ast::Directive<'_>>,
    object: &mut crate::subgraphs::state::ObjectType,
) {
    for directive in directives {
        match ctx.matcher.match_name(directive.name()) {
            Some(FederationDirective::Key) => {
                if let Some(key) = ingest_key(ctx, directive) {
                    object.keys.push(key);
                }
            }
            Some(FederationDirective::Shareable) => object.shareable = true,
            Some(FederationDirective::External) => object.external = true,
            Some(FederationDirective::Extends) => object.extends_directive = true,
            Some(FederationDirective::InterfaceObject) => object.interface_object = true,
            other => {
                apply_common_directive(ctx, directive, other, &mut object.common);
            }
        }
    }
}

pub(super) fn ingest_interface_directives(
    ctx: &mut Context<'_>,
    directives: ast::iter::Iter<'_, ast::Directive<'_>>,
    interface: &mut crate::subgraphs::state::InterfaceType,
) {
    for directive in directives {
        match ctx.matcher.match_name(directive.name()) {
            Some(FederationDirective::Key) => {
                if let Some(key) = ingest_key(ctx, directive) {
                    interface.keys.push(key);
                }
            }
            other => {
                apply_common_directive(ctx, directive, other, &mut interface.common);
            }
        }
    }
}

pub(super) fn ingest_scalar_directives(
    ctx: &mut Context<'_>,
    directives: ast::iter::Iter<'_, ast::Directive<'_>>,
    scalar: &mut crate::subgraphs::state::ScalarType,
) {
    for directive in directives {
        if directive.name() == "specifiedBy" {
            scalar.specified_by = directive
                .argument("url")
                .and_then(|arg| arg.value().as_str())
                .map(str::to_owned);
            continue;
        }

        let matched = ctx.matcher.match_name(directive.name());
        apply_common_directive(ctx, directive, matched, &mut scalar.common);
    }
}

pub(super) fn ingest_common_directives(
    ctx: &mut Context<'_>,
    directives: ast::iter::Iter<'_, ast::Directive<'_>>,
    common: &mut CommonDirectives,
) {
    for directive in directives {
        let matched = ctx.matcher.match_name(directive.name());
        apply_common_directive(ctx, directive, matched, common);
    }
}

pub(super) fn ingest_enum_value_directives(
    ctx: &mut Context<'_>,
    directives: ast::iter::Iter<'_, ast::Directive<'_>>,
    value: &mut crate::subgraphs::state::EnumValue,
) {
    for directive in directives {
        if directive.name() == "deprecated" {
            if value.deprecated.is_none() {
                value.deprecated = Some(parse_deprecated(directive));
            }
            continue;
        }

        let matched = ctx.matcher.match_name(directive.name());
        apply_common_directive(ctx, directive, matched, &mut value.common);
    }
}

pub(super) fn ingest_field_directives(
    ctx: &mut Context<'_>,
    directives: ast::iter::Iter<'_, ast::Directive<'_>>,
    type_name: &str,
    field_name: &str,
    field: &mut Field,
) {
    for directive in directives {
        match ctx.matcher.match_name(directive.name()) {
            Some(FederationDirective::External) => field.flags |= FieldFlags::EXTERNAL,
            Some(FederationDirective::Shareable) => field.flags |= FieldFlags::SHAREABLE,
            Some(FederationDirective::Override) => {
                let Some(from) = directive.argument("from").and_then(|arg| arg.value().as_str()) else {
                    ctx.error(
                        format_args!(
                            "the `from` argument of `@override` on `{type_name}.{field_name}` is required and must be a string"
                        ),
                        ErrorCode::InvalidGraphql,
                    );
                    continue;
                };

                let label = directive
                    .argument("label")
                    .and_then(|arg| arg.value().as_str())
                    .map(str::to_owned);

                field.r#override = Some(Override {
                    from: from.to_owned(),
                    label,
                });
            }
            Some(FederationDirective::Provides) => {
                field.provides = ingest_field_set(ctx, directive, "provides");
            }
            Some(FederationDirective::Requires) => {
                field.requires = ingest_field_set(ctx, directive, "requires");
            }
            Some(FederationDirective::ListSize) => {
                field.list_size = parse_list_size(ctx, directive);
            }
            other => {
                if directive.name() == "deprecated" {
                    if field.deprecated.is_none() {
                        field.deprecated = Some(parse_deprecated(directive));
                    }
                    continue;
                }
                apply_common_directive(ctx, directive, other, &mut field.common);
            }
        }
    }
}

pub(super) fn ingest_input_value_directives(
    ctx: &mut Context<'_>,
    directives: ast::iter::Iter<'_, ast::Directive<'_>>,
    input_value: &mut InputValue,
) {
    for directive in directives {
        if directive.name() == "deprecated" {
            if input_value.deprecated.is_none() {
                input_value.deprecated = Some(parse_deprecated(directive));
            }
            continue;
        }

        let matched = ctx.matcher.match_name(directive.name());
        apply_common_directive(ctx, directive, matched, &mut input_value.common);
    }
}

/// The directives that compose identically everywhere. Returns whether the directive was
/// consumed.
fn apply_common_directive(
    ctx: &mut Context<'_>,
    directive: ast::Directive<'_>,
    matched: Option<FederationDirective>,
    common: &mut CommonDirectives,
) -> bool {
    match matched {
        Some(FederationDirective::Tag) => {
            if let Some(tag) = directive.argument("name").and_then(|arg| arg.value().as_str()) {
                common.tags.insert(tag.to_owned());
            }
            true
        }
        Some(FederationDirective::Inaccessible) => {
            common.inaccessible = true;
            true
        }
        Some(FederationDirective::Authenticated) => {
            common.authenticated = true;
            true
        }
        Some(FederationDirective::Cost) => {
            if let Some(ConstValue::Int(weight)) = directive.argument("weight").map(|arg| arg.value()) {
                common.cost = Some(weight.as_i64());
            } else {
                ctx.error(
                    format_args!("the `weight` argument of `@cost` must be an integer"),
                    ErrorCode::InvalidGraphql,
                );
            }
            true
        }
        Some(FederationDirective::Policy) => {
            common.policies.extend(parse_string_list_of_lists(directive, "policies"));
            true
        }
        Some(FederationDirective::RequiresScopes) => {
            common
                .required_scopes
                .extend(parse_string_list_of_lists(directive, "scopes"));
            true
        }
        _ => false,
    }
}

/// `@policy(policies: [[String!]!]!)` and `@requiresScopes(scopes: [[String!]!]!)` take a list
/// of lists of strings.
fn parse_string_list_of_lists(directive: ast::Directive<'_>, argument_name: &str) -> Vec<Vec<String>> {
    directive
        .argument(argument_name)
        .into_iter()
        .flat_map(|arg| arg.value().as_items())
        .flatten()
        .map(|group| match group {
            ConstValue::List(items) => items
                .items()
                .filter_map(|item| match item {
                    ConstValue::String(s) => Some(s.as_str().to_owned()),
                    _ => None,
                })
                .collect(),
            _ => vec![],
        })
        .collect()
}

fn ingest_key(ctx: &mut Context<'_>, directive: ast::Directive<'_>) -> Option<Key> {
    let fields_str = directive.argument("fields").and_then(|arg| arg.value().as_str())?;

    let resolvable = directive
        .argument("resolvable")
        .and_then(|arg| arg.value().as_bool())
        .unwrap_or(true); // defaults to true

    match parse_selection_set(fields_str, "key", "fields") {
        Ok(selection_set) => Some(Key {
            fields_str: fields_str.to_owned(),
            selection_set,
            resolvable,
        }),
        Err(message) => {
            ctx.error(format_args!("{message}"), ErrorCode::InvalidGraphql);
            None
        }
    }
}

fn ingest_field_set(ctx: &mut Context<'_>, directive: ast::Directive<'_>, directive_name: &str) -> Option<FieldSet> {
    let fields_str = directive.argument("fields").and_then(|arg| arg.value().as_str())?;

    match parse_selection_set(fields_str, directive_name, "fields") {
        Ok(selection_set) => Some(FieldSet {
            source: fields_str.to_owned(),
            selection_set,
        }),
        Err(message) => {
            ctx.error(format_args!("{message}"), ErrorCode::InvalidGraphql);
            None
        }
    }
}

fn parse_deprecated(directive: ast::Directive<'_>) -> Deprecated {
    Deprecated {
        reason: directive
            .argument("reason")
            .and_then(|arg| arg.value().as_str())
            .map(str::to_owned),
    }
}

/// Parses `@listSize`, reporting the argument shape errors. The semantic checks (negative
/// sizes, sized fields that do not exist, ...) run later, over the ingested state.
fn parse_list_size(ctx: &mut Context<'_>, directive: ast::Directive<'_>) -> Option<ListSize> {
    let mut list_size = ListSize {
        require_one_slicing_argument: true,
        ..Default::default()
    };

    if let Some(argument) = directive.argument("assumedSize") {
        match argument.value() {
            ConstValue::Int(size) => list_size.assumed_size = Some(size.as_i64()),
            _ => {
                ctx.error(
                    format_args!("The value of @listSize(assumedSize:) must be an integer"),
                    ErrorCode::ListSizeInvalidAssumedSize,
                );
                return None;
            }
        }
    }

    if let Some(argument) = directive.argument("slicingArguments") {
        match parse_string_list(argument.value()) {
            Some(slicing_arguments) => list_size.slicing_arguments = Some(slicing_arguments),
            None => {
                ctx.error(
                    format_args!("The value of @listSize(slicingArguments:) must be a list of strings"),
                    ErrorCode::ListSizeInvalidSlicingArgument,
                );
                return None;
            }
        }
    }

    if let Some(argument) = directive.argument("sizedFields") {
        match parse_string_list(argument.value()) {
            Some(sized_fields) => list_size.sized_fields = Some(sized_fields),
            None => {
                ctx.error(
                    format_args!("The value of @listSize(sizedFields:) must be a list of strings"),
                    ErrorCode::ListSizeInvalidSizedField,
                );
                return None;
            }
        }
    }

    if let Some(argument) = directive.argument("requireOneSlicingArgument") {
        match argument.value() {
            ConstValue::Boolean(required) => list_size.require_one_slicing_argument = required.value(),
            _ => {
                ctx.error(
                    format_args!("The value of @listSize(requireOneSlicingArgument:) must be a boolean when defined"),
                    ErrorCode::ListSizeInvalidRequireOneSlicingArgument,
                );
                return None;
            }
        }
    }

    Some(list_size)
}

fn parse_string_list(value: ConstValue<'_>) -> Option<Vec<String>> {
    let ConstValue::List(list) = value else {
        return None;
    };

    list.items()
        .map(|item| match item {
            ConstValue::String(s) => Some(s.as_str().to_owned()),
            _ => None,
        })
        .collect()
}
