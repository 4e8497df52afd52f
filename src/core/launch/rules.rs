// ─── Rule Evaluation ───
// OS-conditional inclusion rules shared by libraries and launch arguments.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Rule {
    pub action: RuleAction,
    #[serde(default)]
    pub os: Option<OsPredicate>,
    /// Feature predicates (demo mode, quick-play, custom resolution).
    /// Entries carrying one are excluded wholesale; see `rules_allow`.
    #[serde(default)]
    pub features: Option<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleAction {
    Allow,
    Disallow,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OsPredicate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub arch: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

/// The descriptor dialect's OS name for the current platform.
pub fn current_os_name() -> &'static str {
    if cfg!(target_os = "windows") {
        "windows"
    } else if cfg!(target_os = "macos") {
        "osx"
    } else {
        "linux"
    }
}

/// Decide whether a rule-tagged entry applies on `current_os`.
///
/// This is a left fold over an `include` accumulator, not a last-match-wins
/// scan: every rule whose predicate triggers overwrites the running decision
/// in list order, and rules whose predicate does not trigger leave it alone.
/// A `disallow` with a matching OS therefore wins even when it follows an
/// `allow`. This mirrors the upstream descriptor dialect exactly, ordering
/// quirks included.
///
/// Feature-gated entries are not supported: any rule carrying a `features`
/// predicate excludes the whole entry regardless of feature state.
pub fn rules_allow(rules: &[Rule], current_os: &str) -> bool {
    let mut include = true;

    for rule in rules {
        if rule.features.is_some() {
            return false;
        }

        let os_match = match rule.os.as_ref().and_then(|os| os.name.as_deref()) {
            None => true,
            Some(name) => name == current_os,
        };

        match rule.action {
            RuleAction::Allow if !os_match => include = false,
            RuleAction::Disallow if os_match => include = false,
            _ => {}
        }
    }

    include
}
