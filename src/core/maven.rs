use std::fmt;

use crate::core::error::{LauncherError, LauncherResult};

/// A parsed library coordinate.
///
/// Supported formats:
///   `group:artifact:version`
///   `group:artifact:version:classifier`
///
/// The coordinate is split on the first three colons only; any further
/// colons remain part of the classifier segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryCoordinate {
    pub group: String,
    pub artifact: String,
    pub version: String,
    pub classifier: Option<String>,
}

impl LibraryCoordinate {
    pub fn parse(coord: &str) -> LauncherResult<Self> {
        let mut parts = coord.splitn(4, ':');
        let group = parts.next().unwrap_or_default();
        let artifact = parts.next();
        let version = parts.next();
        let classifier = parts.next();

        match (artifact, version) {
            (Some(artifact), Some(version)) if !group.is_empty() => Ok(Self {
                group: group.to_string(),
                artifact: artifact.to_string(),
                version: version.to_string(),
                classifier: classifier.map(str::to_string),
            }),
            _ => Err(LauncherError::InvalidCoordinate(coord.to_string())),
        }
    }

    /// The jar filename: `artifact-version[-classifier].jar`.
    pub fn file_name(&self) -> String {
        match &self.classifier {
            Some(classifier) => format!("{}-{}-{}.jar", self.artifact, self.version, classifier),
            None => format!("{}-{}.jar", self.artifact, self.version),
        }
    }

    /// Path relative to the libraries root, mirroring the Maven repo layout:
    /// `group/with/slashes/artifact/version/filename`.
    pub fn relative_path(&self) -> String {
        format!(
            "{}/{}/{}/{}",
            self.group.replace('.', "/"),
            self.artifact,
            self.version,
            self.file_name()
        )
    }
}

impl fmt::Display for LibraryCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.classifier {
            Some(classifier) => write!(
                f,
                "{}:{}:{}:{}",
                self.group, self.artifact, self.version, classifier
            ),
            None => write!(f, "{}:{}:{}", self.group, self.artifact, self.version),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_coordinate() {
        let c = LibraryCoordinate::parse("org.example:foo:1.0").unwrap();
        assert_eq!(c.group, "org.example");
        assert_eq!(c.artifact, "foo");
        assert_eq!(c.version, "1.0");
        assert_eq!(c.classifier, None);
        assert_eq!(c.relative_path(), "org/example/foo/1.0/foo-1.0.jar");
    }

    #[test]
    fn parse_with_classifier() {
        let c = LibraryCoordinate::parse("org.example:foo:1.0:natives-windows").unwrap();
        assert_eq!(c.classifier.as_deref(), Some("natives-windows"));
        assert_eq!(
            c.relative_path(),
            "org/example/foo/1.0/foo-1.0-natives-windows.jar"
        );
    }

    #[test]
    fn extra_colons_stay_in_the_classifier() {
        let c = LibraryCoordinate::parse("org.example:foo:1.0:natives:extra").unwrap();
        assert_eq!(c.classifier.as_deref(), Some("natives:extra"));
    }

    #[test]
    fn too_few_segments_is_rejected() {
        assert!(LibraryCoordinate::parse("org.example:foo").is_err());
        assert!(LibraryCoordinate::parse("justonesegment").is_err());
        assert!(LibraryCoordinate::parse("").is_err());
    }

    #[test]
    fn display_round_trips() {
        for raw in ["org.example:foo:1.0", "org.example:foo:1.0:natives-linux"] {
            let c = LibraryCoordinate::parse(raw).unwrap();
            assert_eq!(c.to_string(), raw);
        }
    }
}
