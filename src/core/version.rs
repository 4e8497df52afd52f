// ─── Version Descriptor ───
// Typed model of the version-definition JSON. The document is decoded once at
// the boundary; downstream launch logic never re-checks JSON shape.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::core::error::{LauncherError, LauncherResult};
use crate::core::launch::rules::{rules_allow, Rule};
use crate::core::maven::LibraryCoordinate;

/// Main class used when the descriptor does not name one.
pub const FALLBACK_MAIN_CLASS: &str = "cpw.mods.bootstraplauncher.BootstrapLauncher";

/// Asset index used when neither `assets` nor `assetIndex.id` is present.
pub const FALLBACK_ASSET_INDEX: &str = "5";

/// A fully parsed version descriptor.
///
/// Immutable once loaded; each launch operation owns its own instance.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionDescriptor {
    #[serde(default)]
    pub main_class: Option<String>,
    /// Legacy flat asset index id. Takes precedence over `assetIndex.id`.
    #[serde(default)]
    pub assets: Option<String>,
    #[serde(default)]
    pub asset_index: Option<AssetIndexInfo>,
    #[serde(default)]
    pub libraries: Vec<LibraryEntry>,
    /// Modern rule-tagged argument sections. Absent for legacy descriptors,
    /// in which case fixed argument templates apply.
    #[serde(default)]
    pub arguments: Option<ArgumentSections>,
}

#[derive(Debug, Deserialize)]
pub struct AssetIndexInfo {
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ArgumentSections {
    #[serde(default)]
    pub jvm: Vec<ArgumentToken>,
    #[serde(default)]
    pub game: Vec<ArgumentToken>,
}

/// One entry of a modern argument list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ArgumentToken {
    /// JSON `null` — skipped during assembly.
    Null,
    Literal(String),
    Conditional(ConditionalArgument),
}

#[derive(Debug, Deserialize)]
pub struct ConditionalArgument {
    #[serde(default)]
    pub rules: Vec<Rule>,
    #[serde(default)]
    pub value: Option<ArgumentValue>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ArgumentValue {
    Single(String),
    Many(Vec<String>),
}

// ─── Libraries ───

#[derive(Debug, Deserialize)]
pub struct LibraryEntry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub downloads: Option<LibraryDownloads>,
    #[serde(default)]
    pub rules: Option<Vec<Rule>>,
    /// OS name → native classifier (may contain `${arch}`).
    #[serde(default)]
    pub natives: Option<HashMap<String, String>>,
    /// Fetched for side effects only, never placed on the classpath.
    #[serde(default, rename = "downloadOnly")]
    pub download_only: bool,
}

#[derive(Debug, Deserialize)]
pub struct LibraryDownloads {
    #[serde(default)]
    pub artifact: Option<ArtifactRef>,
    #[serde(default)]
    pub classifiers: Option<HashMap<String, ArtifactRef>>,
}

#[derive(Debug, Deserialize)]
pub struct ArtifactRef {
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub sha1: Option<String>,
}

impl LibraryEntry {
    /// Whether this library applies on `current_os`. Entries without a rules
    /// section are always compatible.
    pub fn is_compatible(&self, current_os: &str) -> bool {
        match &self.rules {
            None => true,
            Some(rules) => rules_allow(rules, current_os),
        }
    }

    /// Relative artifact path under the libraries root.
    ///
    /// An explicit `downloads.artifact.path` wins over the path synthesized
    /// from the coordinate. Returns `None` when neither yields a path.
    pub fn artifact_path(&self) -> Option<String> {
        if let Some(path) = self
            .downloads
            .as_ref()
            .and_then(|d| d.artifact.as_ref())
            .and_then(|a| a.path.as_ref())
        {
            return Some(path.clone());
        }

        let name = self.name.as_deref()?;
        LibraryCoordinate::parse(name)
            .ok()
            .map(|coord| coord.relative_path())
    }

    /// Native classifier for `current_os`, with `${arch}` resolved.
    pub fn native_classifier(&self, current_os: &str) -> Option<String> {
        let arch = if cfg!(target_arch = "x86_64") { "64" } else { "32" };
        self.natives
            .as_ref()?
            .get(current_os)
            .map(|classifier| classifier.replace("${arch}", arch))
    }

    /// Download record for the given native classifier, if any.
    pub fn native_artifact(&self, classifier: &str) -> Option<&ArtifactRef> {
        self.downloads.as_ref()?.classifiers.as_ref()?.get(classifier)
    }
}

impl VersionDescriptor {
    /// Load and decode the descriptor at `path`, failing fast on schema
    /// violations.
    pub fn load(path: &Path) -> LauncherResult<Self> {
        if !path.exists() {
            return Err(LauncherError::DescriptorNotFound(path.to_path_buf()));
        }

        let raw = std::fs::read_to_string(path).map_err(|e| LauncherError::io(path, e))?;
        serde_json::from_str(&raw).map_err(|source| LauncherError::MalformedDescriptor {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn main_class(&self) -> &str {
        self.main_class
            .as_deref()
            .filter(|class| !class.is_empty())
            .unwrap_or(FALLBACK_MAIN_CLASS)
    }

    /// Asset index id: the flat `assets` field wins, then `assetIndex.id`,
    /// then the fixed fallback.
    pub fn asset_index_id(&self) -> &str {
        self.assets
            .as_deref()
            .or_else(|| self.asset_index.as_ref().and_then(|info| info.id.as_deref()))
            .unwrap_or(FALLBACK_ASSET_INDEX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(value: serde_json::Value) -> VersionDescriptor {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn main_class_falls_back_when_absent() {
        let d = descriptor(serde_json::json!({}));
        assert_eq!(d.main_class(), FALLBACK_MAIN_CLASS);

        let d = descriptor(serde_json::json!({"mainClass": "net.minecraft.client.main.Main"}));
        assert_eq!(d.main_class(), "net.minecraft.client.main.Main");
    }

    #[test]
    fn asset_index_prefers_flat_assets_field() {
        let d = descriptor(serde_json::json!({
            "assets": "12",
            "assetIndex": {"id": "17"}
        }));
        assert_eq!(d.asset_index_id(), "12");

        let d = descriptor(serde_json::json!({"assetIndex": {"id": "17"}}));
        assert_eq!(d.asset_index_id(), "17");

        let d = descriptor(serde_json::json!({}));
        assert_eq!(d.asset_index_id(), FALLBACK_ASSET_INDEX);
    }

    #[test]
    fn explicit_artifact_path_wins_over_coordinate() {
        let d = descriptor(serde_json::json!({
            "libraries": [{
                "name": "org.example:foo:1.0",
                "downloads": {"artifact": {"path": "custom/location/foo.jar"}}
            }]
        }));
        assert_eq!(
            d.libraries[0].artifact_path().as_deref(),
            Some("custom/location/foo.jar")
        );
    }

    #[test]
    fn artifact_path_synthesized_from_coordinate() {
        let d = descriptor(serde_json::json!({
            "libraries": [{"name": "org.example:foo:1.0:natives-windows"}]
        }));
        assert_eq!(
            d.libraries[0].artifact_path().as_deref(),
            Some("org/example/foo/1.0/foo-1.0-natives-windows.jar")
        );
    }

    #[test]
    fn unparsable_coordinate_yields_no_path() {
        let d = descriptor(serde_json::json!({"libraries": [{"name": "broken"}]}));
        assert_eq!(d.libraries[0].artifact_path(), None);
    }

    #[test]
    fn argument_tokens_decode_all_shapes() {
        let d = descriptor(serde_json::json!({
            "arguments": {
                "jvm": [
                    null,
                    "-Xss1M",
                    {
                        "rules": [{"action": "allow", "os": {"name": "windows"}}],
                        "value": ["-Dos=windows", "-Dextra=1"]
                    }
                ],
                "game": ["--username", "${auth_player_name}"]
            }
        }));

        let jvm = &d.arguments.as_ref().unwrap().jvm;
        assert!(matches!(jvm[0], ArgumentToken::Null));
        assert!(matches!(&jvm[1], ArgumentToken::Literal(s) if s == "-Xss1M"));
        assert!(matches!(&jvm[2], ArgumentToken::Conditional(_)));
    }

    #[test]
    fn load_reports_missing_and_malformed_descriptors() {
        let temp = std::env::temp_dir().join(format!("version-test-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&temp);
        std::fs::create_dir_all(&temp).unwrap();

        let missing = temp.join("absent.json");
        assert!(matches!(
            VersionDescriptor::load(&missing).unwrap_err(),
            LauncherError::DescriptorNotFound(_)
        ));

        let malformed = temp.join("bad.json");
        std::fs::write(&malformed, "{not json").unwrap();
        assert!(matches!(
            VersionDescriptor::load(&malformed).unwrap_err(),
            LauncherError::MalformedDescriptor { .. }
        ));

        let _ = std::fs::remove_dir_all(&temp);
    }

    #[test]
    fn library_compatibility_delegates_to_rules() {
        let d = descriptor(serde_json::json!({
            "libraries": [
                {"name": "a:b:1.0"},
                {
                    "name": "c:d:1.0",
                    "rules": [
                        {"action": "allow"},
                        {"action": "disallow", "os": {"name": "osx"}}
                    ]
                }
            ]
        }));

        assert!(d.libraries[0].is_compatible("osx"));
        assert!(!d.libraries[1].is_compatible("osx"));
        assert!(d.libraries[1].is_compatible("windows"));
    }
}
