use super::*;
use crate::link::FederatedLink;
use crate::subgraphs::state::Subgraph;

/// Collects `@link`/`@core` directives and root operation type declarations from `schema` and
/// `extend schema` definitions.
pub(super) fn ingest_schema_definitions(
    document: &ast::TypeSystemDocument,
    subgraph: &mut Subgraph,
    diagnostics: &mut Diagnostics,
) {
    for definition in document.definitions() {
        let (ast::Definition::Schema(def) | ast::Definition::SchemaExtension(def)) = definition else {
            continue;
        };

        for directive in def.directives() {
            match FederatedLink::from_directive(directive) {
                Ok(Some(link)) => subgraph.links.push(link),
                Ok(None) => (),
                Err(message) => diagnostics.push_subgraph_error(
                    &subgraph.name,
                    format_args!("{message}"),
                    ErrorCode::InvalidLinkDirectiveUsage,
                ),
            }
        }

        if let Some(query) = def.query_type() {
            subgraph.root_types.query = Some(query.named_type().to_owned());
        }

        if let Some(mutation) = def.mutation_type() {
            subgraph.root_types.mutation = Some(mutation.named_type().to_owned());
        }

        if let Some(subscription) = def.subscription_type() {
            subgraph.root_types.subscription = Some(subscription.named_type().to_owned());
        }
    }
}
