use std::fmt;

/// A parsed `@link(url: ...)` argument.
///
/// The URL carries up to three pieces of information: the identity of the linked schema (origin
/// plus path), optionally the schema name (the last path segment that is a valid GraphQL name)
/// and optionally a version (a trailing `vX.Y` path segment).
///
/// `https://specs.apollo.dev/federation/v2.3` has the identity
/// `https://specs.apollo.dev/federation`, the name `federation` and the version `v2.3`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LinkUrl {
    /// Origin + path, version segment excluded.
    pub(crate) identity: String,
    pub(crate) name: Option<String>,
    pub(crate) version: Option<Version>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Version {
    pub(crate) major: u32,
    pub(crate) minor: u32,
}

impl LinkUrl {
    pub(crate) fn parse(input: &str) -> Option<LinkUrl> {
        let parsed = url::Url::parse(input).ok()?;

        if !parsed.has_host() {
            return None;
        }

        let mut segments: Vec<&str> = parsed
            .path_segments()
            .map(|segments| segments.filter(|segment| !segment.is_empty()).collect())
            .unwrap_or_default();

        let version = segments
            .last()
            .and_then(|segment| parse_version_segment(segment));

        if version.is_some() {
            segments.pop();
        }

        let name = segments
            .last()
            .filter(|segment| is_graphql_name(segment))
            .map(|segment| (*segment).to_owned());

        let origin = parsed.origin().ascii_serialization();
        let identity = if segments.is_empty() {
            origin
        } else {
            format!("{origin}/{}", segments.join("/"))
        };

        Some(LinkUrl {
            identity,
            name,
            version,
        })
    }

    /// True if this URL's version can serve a request for `vmajor.minor`: same major, equal or
    /// newer minor.
    pub(crate) fn supports(&self, major: u32, minor: u32) -> bool {
        self.version
            .map(|version| version.major == major && version.minor >= minor)
            .unwrap_or_default()
    }

    pub(crate) fn version_str(&self) -> Option<String> {
        self.version.map(|version| version.to_string())
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}", self.major, self.minor)
    }
}

/// A version path segment is `v` followed by a 1-3 digit major, a dot, and a 1-4 digit minor.
fn parse_version_segment(segment: &str) -> Option<Version> {
    let rest = segment.strip_prefix('v')?;
    let (major, minor) = rest.split_once('.')?;

    if major.is_empty() || major.len() > 3 || minor.is_empty() || minor.len() > 4 {
        return None;
    }

    if !major.bytes().all(|b| b.is_ascii_digit()) || !minor.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    Some(Version {
        major: major.parse().ok()?,
        minor: minor.parse().ok()?,
    })
}

fn is_graphql_name(s: &str) -> bool {
    let mut bytes = s.bytes();
    bytes
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == b'_')
        && bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_url() {
        let url = LinkUrl::parse("https://specs.apollo.dev/federation/v2.3").unwrap();
        assert_eq!(url.identity, "https://specs.apollo.dev/federation");
        assert_eq!(url.name.as_deref(), Some("federation"));
        assert_eq!(url.version, Some(Version { major: 2, minor: 3 }));
    }

    #[test]
    fn url_without_version() {
        let url = LinkUrl::parse("https://specs.apollo.dev/federation").unwrap();
        assert_eq!(url.identity, "https://specs.apollo.dev/federation");
        assert_eq!(url.name.as_deref(), Some("federation"));
        assert_eq!(url.version, None);
    }

    #[test]
    fn url_without_name() {
        let url = LinkUrl::parse("https://specs.apollo.dev/v1.0").unwrap();
        assert_eq!(url.identity, "https://specs.apollo.dev");
        assert_eq!(url.name, None);
        assert_eq!(url.version, Some(Version { major: 1, minor: 0 }));
    }

    #[test]
    fn name_segment_must_be_a_graphql_name() {
        let url = LinkUrl::parse("https://example.com/specs/my-spec/v0.1").unwrap();
        assert_eq!(url.identity, "https://example.com/specs/my-spec");
        assert_eq!(url.name, None);
    }

    #[test]
    fn version_supports() {
        let url = LinkUrl::parse("https://specs.apollo.dev/cost/v0.2").unwrap();
        assert!(url.supports(0, 1));
        assert!(url.supports(0, 2));
        assert!(!url.supports(0, 3));
        assert!(!url.supports(1, 0));
    }

    #[test]
    fn not_a_url() {
        assert_eq!(LinkUrl::parse("federation"), None);
    }
}
