mod import;
mod url;
mod version;

pub(crate) use self::{
    import::{LinkImport, parse_imports},
    url::LinkUrl,
};
pub use version::FederationVersion;

use crate::diagnostics::{Diagnostics, ErrorCode};
use cynic_parser::type_system as ast;
use indexmap::IndexMap;

pub(crate) const FEDERATION_IDENTITY: &str = "https://specs.apollo.dev/federation";
pub(crate) const LINK_IDENTITY: &str = "https://specs.apollo.dev/link";
pub(crate) const COST_IDENTITY: &str = "https://specs.apollo.dev/cost";

/// A schema linked by a subgraph through `@link` (or the legacy `@core`).
#[derive(Debug, Clone)]
pub(crate) struct FederatedLink {
    pub(crate) url: LinkUrl,
    /// The `as:` argument.
    pub(crate) alias: Option<String>,
    pub(crate) imports: Vec<LinkImport>,
}

impl FederatedLink {
    /// Reads a schema-level directive, returning a link if the directive is `@link` or `@core`.
    pub(crate) fn from_directive(directive: ast::Directive<'_>) -> Result<Option<FederatedLink>, String> {
        match directive.name() {
            "link" => Self::from_link_directive(directive).map(Some),
            "core" => Self::from_core_directive(directive).map(Some),
            _ => Ok(None),
        }
    }

    fn from_link_directive(directive: ast::Directive<'_>) -> Result<FederatedLink, String> {
        let url_str = directive
            .argument("url")
            .and_then(|arg| arg.value().as_str())
            .ok_or("the `url` argument of `@link` must be a string")?;

        let url = LinkUrl::parse(url_str)
            .ok_or_else(|| format!("the `url` argument of `@link` is not a valid URL: \"{url_str}\""))?;

        let alias = directive
            .argument("as")
            .and_then(|arg| arg.value().as_str())
            .map(str::to_owned);

        let imports = directive
            .argument("import")
            .map(|arg| parse_imports(arg.value()))
            .transpose()?
            .unwrap_or_default();

        Ok(FederatedLink { url, alias, imports })
    }

    /// Federation v1 subgraphs declare specs with `@core(feature: "...")`. The feature URL plays
    /// the role of the link URL, imports do not exist.
    fn from_core_directive(directive: ast::Directive<'_>) -> Result<FederatedLink, String> {
        let feature = directive
            .argument("feature")
            .and_then(|arg| arg.value().as_str())
            .ok_or("the `feature` argument of `@core` must be a string")?;

        let url = LinkUrl::parse(feature)
            .ok_or_else(|| format!("the `feature` argument of `@core` is not a valid URL: \"{feature}\""))?;

        let alias = directive
            .argument("as")
            .and_then(|arg| arg.value().as_str())
            .map(str::to_owned);

        Ok(FederatedLink {
            url,
            alias,
            imports: Vec::new(),
        })
    }

    pub(crate) fn identity(&self) -> &str {
        &self.url.identity
    }

    /// The prefix for qualified usages of linked elements: the `as:` argument if present, the
    /// name from the URL otherwise.
    pub(crate) fn namespace(&self) -> Option<&str> {
        self.alias.as_deref().or(self.url.name.as_deref())
    }

    pub(crate) fn is_federation(&self) -> bool {
        self.identity() == FEDERATION_IDENTITY
    }

    pub(crate) fn federation_version(&self) -> Option<FederationVersion> {
        if !self.is_federation() {
            return None;
        }
        let version = self.url.version_str()?;
        FederationVersion::from_version_str(&version)
    }

    /// The name `element_name` goes by in the linking subgraph. Directive names are passed and
    /// returned with their leading `@` stripped only in the output: `resolve_import_name("@key")`
    /// is `key` when imported unaliased, `federation__key` when not imported.
    pub(crate) fn resolve_import_name(&self, element_name: &str) -> String {
        if let Some(import) = self.imports.iter().find(|import| import.name == element_name) {
            return import.local_name().trim_start_matches('@').to_owned();
        }

        let bare = element_name.trim_start_matches('@');

        match self.namespace() {
            Some(namespace) => format!("{namespace}__{bare}"),
            None => bare.to_owned(),
        }
    }

    pub(crate) fn imports_element(&self, element_name: &str) -> bool {
        self.imports.iter().any(|import| import.name == element_name)
    }
}

/// An element imported from the same linked schema must go by the same local name in every
/// subgraph that imports it.
pub(crate) fn check_import_name_consistency<'a>(
    subgraph_links: impl Iterator<Item = (&'a str, &'a [FederatedLink])>,
    diagnostics: &mut Diagnostics,
) {
    let mut first_seen: IndexMap<(String, String), (String, &'a str)> = IndexMap::new();
    let mut already_reported: Vec<(String, String)> = Vec::new();

    for (subgraph_name, links) in subgraph_links {
        for link in links {
            for import in &link.imports {
                let key = (link.identity().to_owned(), import.name.clone());
                let local_name = import.local_name().to_owned();

                match first_seen.get(&key) {
                    None => {
                        first_seen.insert(key, (local_name, subgraph_name));
                    }
                    Some((first_local, first_subgraph)) if *first_local != local_name => {
                        if already_reported.contains(&key) {
                            continue;
                        }
                        diagnostics.push_error(
                            format!(
                                "The import name \"{element}\" is imported with mismatched name between subgraphs: \"{local_name}\" in subgraph \"{subgraph_name}\" and \"{first_local}\" in subgraph \"{first_subgraph}\". The import name must be consistent across subgraphs ({identity}).",
                                element = import.name,
                                identity = key.0,
                            ),
                            ErrorCode::LinkImportNameMismatch,
                        );
                        already_reported.push(key);
                    }
                    Some(_) => (),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(url: &str, imports: &[(&str, Option<&str>)]) -> FederatedLink {
        FederatedLink {
            url: LinkUrl::parse(url).unwrap(),
            alias: None,
            imports: imports
                .iter()
                .map(|(name, alias)| LinkImport {
                    name: (*name).to_owned(),
                    alias: alias.map(str::to_owned),
                })
                .collect(),
        }
    }

    #[test]
    fn resolve_imported_directive() {
        let link = link("https://specs.apollo.dev/federation/v2.3", &[("@key", None)]);
        assert_eq!(link.resolve_import_name("@key"), "key");
        assert_eq!(link.resolve_import_name("@shareable"), "federation__shareable");
    }

    #[test]
    fn resolve_aliased_directive() {
        let link = link(
            "https://specs.apollo.dev/cost/v0.1",
            &[("@cost", Some("@price"))],
        );
        assert_eq!(link.resolve_import_name("@cost"), "price");
    }

    #[test]
    fn namespace_prefers_alias() {
        let mut l = link("https://specs.apollo.dev/federation/v2.0", &[]);
        l.alias = Some("fed".to_owned());
        assert_eq!(l.resolve_import_name("@external"), "fed__external");
    }

    #[test]
    fn import_name_mismatch_is_reported_once() {
        let a = [link("https://specs.apollo.dev/cost/v0.1", &[("@cost", None)])];
        let b = [link(
            "https://specs.apollo.dev/cost/v0.1",
            &[("@cost", Some("@price"))],
        )];
        let c = [link(
            "https://specs.apollo.dev/cost/v0.1",
            &[("@cost", Some("@expense"))],
        )];

        let mut diagnostics = Diagnostics::default();
        check_import_name_consistency(
            [("a", &a[..]), ("b", &b[..]), ("c", &c[..])].into_iter(),
            &mut diagnostics,
        );

        let errors: Vec<_> = diagnostics.iter_errors().collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code(), Some(ErrorCode::LinkImportNameMismatch));
        assert!(errors[0].message().contains("\"@price\""));
    }
}
