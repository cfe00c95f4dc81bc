use cynic_parser::ConstValue;

/// One element of the `import:` argument of `@link`. Directive names keep their leading `@`,
/// type names have none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LinkImport {
    pub(crate) name: String,
    pub(crate) alias: Option<String>,
}

impl LinkImport {
    pub(crate) fn is_directive(&self) -> bool {
        self.name.starts_with('@')
    }

    /// The name the element goes by in the importing subgraph.
    pub(crate) fn local_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

/// Parses the `import:` argument value of a `@link` directive.
pub(crate) fn parse_imports(value: ConstValue<'_>) -> Result<Vec<LinkImport>, String> {
    let Some(items) = value.as_items() else {
        return Err("the `import` argument of `@link` must be a list".to_owned());
    };

    items.map(parse_import).collect()
}

fn parse_import(item: ConstValue<'_>) -> Result<LinkImport, String> {
    match item {
        ConstValue::String(name) => Ok(LinkImport {
            name: name.as_str().to_owned(),
            alias: None,
        }),
        ConstValue::Object(object) => {
            let mut name = None;
            let mut alias = None;

            for field in object.fields() {
                match field.name() {
                    "name" => name = field.value().as_str().map(str::to_owned),
                    "as" => alias = field.value().as_str().map(str::to_owned),
                    other => {
                        return Err(format!("unknown key `{other}` in `@link` import"));
                    }
                }
            }

            let Some(name) = name else {
                return Err("missing `name` in `@link` import".to_owned());
            };

            if let Some(alias) = &alias {
                // An import and its alias must be the same kind of element.
                if name.starts_with('@') != alias.starts_with('@') {
                    return Err(format!(
                        "invalid alias `{alias}` for `{name}` in `@link` import: directive names must be aliased to directive names, type names to type names",
                    ));
                }
            }

            Ok(LinkImport { name, alias })
        }
        _ => Err("`@link` imports must be strings or `{ name, as }` objects".to_owned()),
    }
}
