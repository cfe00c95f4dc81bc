use std::fmt;

/// The Apollo Federation version a subgraph opted into, derived from its `@link` to the
/// federation spec. Subgraphs without any `@link`/`@core` are treated as v1.0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FederationVersion {
    V1_0,
    V2_0,
    V2_1,
    V2_2,
    V2_3,
    V2_4,
    V2_5,
    V2_6,
    V2_7,
    V2_8,
    V2_9,
}

impl FederationVersion {
    pub(crate) fn from_version_str(version: &str) -> Option<FederationVersion> {
        let version = version.strip_prefix('v').unwrap_or(version);
        let (major, minor) = version.split_once('.')?;
        let major: u32 = major.parse().ok()?;
        let minor: u32 = minor.parse().ok()?;

        match (major, minor) {
            (1, _) => Some(FederationVersion::V1_0),
            (2, 0) => Some(FederationVersion::V2_0),
            (2, 1) => Some(FederationVersion::V2_1),
            (2, 2) => Some(FederationVersion::V2_2),
            (2, 3) => Some(FederationVersion::V2_3),
            (2, 4) => Some(FederationVersion::V2_4),
            (2, 5) => Some(FederationVersion::V2_5),
            (2, 6) => Some(FederationVersion::V2_6),
            (2, 7) => Some(FederationVersion::V2_7),
            (2, 8) => Some(FederationVersion::V2_8),
            // Anything newer than what we know composes with the newest supported behavior.
            (2, _) => Some(FederationVersion::V2_9),
            _ => None,
        }
    }

    pub(crate) fn is_v1(self) -> bool {
        self == FederationVersion::V1_0
    }

    /// The version of the join spec the supergraph must link, given the federation version in
    /// use: v2.0-v2.6 map to join v0.3, v2.7 to v0.4 and v2.8+ to v0.5. Federation v1
    /// supergraphs are emitted as join v0.3.
    pub(crate) fn join_spec_version(self) -> &'static str {
        match self {
            FederationVersion::V1_0
            | FederationVersion::V2_0
            | FederationVersion::V2_1
            | FederationVersion::V2_2
            | FederationVersion::V2_3
            | FederationVersion::V2_4
            | FederationVersion::V2_5
            | FederationVersion::V2_6 => "v0.3",
            FederationVersion::V2_7 => "v0.4",
            FederationVersion::V2_8 | FederationVersion::V2_9 => "v0.5",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FederationVersion::V1_0 => "v1.0",
            FederationVersion::V2_0 => "v2.0",
            FederationVersion::V2_1 => "v2.1",
            FederationVersion::V2_2 => "v2.2",
            FederationVersion::V2_3 => "v2.3",
            FederationVersion::V2_4 => "v2.4",
            FederationVersion::V2_5 => "v2.5",
            FederationVersion::V2_6 => "v2.6",
            FederationVersion::V2_7 => "v2.7",
            FederationVersion::V2_8 => "v2.8",
            FederationVersion::V2_9 => "v2.9",
        }
    }
}

impl fmt::Display for FederationVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_parsing() {
        assert_eq!(FederationVersion::from_version_str("v2.3"), Some(FederationVersion::V2_3));
        assert_eq!(FederationVersion::from_version_str("2.0"), Some(FederationVersion::V2_0));
        assert_eq!(FederationVersion::from_version_str("v1.0"), Some(FederationVersion::V1_0));
        assert_eq!(FederationVersion::from_version_str("v2.42"), Some(FederationVersion::V2_9));
        assert_eq!(FederationVersion::from_version_str("v3.0"), None);
        assert_eq!(FederationVersion::from_version_str("potato"), None);
    }

    #[test]
    fn join_spec_mapping() {
        assert_eq!(FederationVersion::V2_0.join_spec_version(), "v0.3");
        assert_eq!(FederationVersion::V2_6.join_spec_version(), "v0.3");
        assert_eq!(FederationVersion::V2_7.join_spec_version(), "v0.4");
        assert_eq!(FederationVersion::V2_8.join_spec_version(), "v0.5");
        assert_eq!(FederationVersion::V2_9.join_spec_version(), "v0.5");
        assert_eq!(FederationVersion::V1_0.join_spec_version(), "v0.3");
    }
}
