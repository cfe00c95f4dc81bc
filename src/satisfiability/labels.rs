use indexmap::IndexMap;

/// One hypothetical assignment of boolean values to progressive `@override(label:)` labels.
/// Resolvability is explored under each assignment separately, since a labeled override flips
/// which subgraph serves the field at runtime.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct OverrideLabels {
    values: IndexMap<String, bool>,
}

impl OverrideLabels {
    pub(crate) fn set(&mut self, label: &str, value: bool) {
        self.values.insert(label.to_owned(), value);
    }

    pub(crate) fn get(&self, label: &str) -> Option<bool> {
        self.values.get(label).copied()
    }

    /// Does every label this assignment pins have the same value in `other`? Used for cache
    /// entry matching: an entry recorded under fewer pinned labels applies to any assignment
    /// that agrees on them.
    pub(crate) fn matches(&self, other: &OverrideLabels) -> bool {
        self.values.iter().all(|(label, value)| other.get(label) == Some(*value))
    }
}

#[cfg(test)]
mod tests {
    use super::OverrideLabels;

    #[test]
    fn matches_is_subset_agreement() {
        let mut narrow = OverrideLabels::default();
        narrow.set("percent(25)", true);

        let mut wide = OverrideLabels::default();
        wide.set("percent(25)", true);
        wide.set("beta", false);

        assert!(narrow.matches(&wide));
        assert!(!wide.matches(&narrow));

        let mut disagreeing = OverrideLabels::default();
        disagreeing.set("percent(25)", false);

        assert!(!narrow.matches(&disagreeing));
        assert!(OverrideLabels::default().matches(&narrow));
    }
}
