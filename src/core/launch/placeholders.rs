// ─── Placeholder Substitution ───
// Expands `${key}` tokens in argument templates against a resolved mapping.

use std::collections::HashMap;

/// Variable mapping built once per launch invocation; read-only during
/// substitution.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderMap {
    values: HashMap<String, String>,
}

impl PlaceholderMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// The resolved value, or the empty string for unknown keys. Used by the
    /// legacy argument templates where every key is launcher-provided.
    pub fn value(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }
}

/// Expand every `${key}` span in `template`.
///
/// Scanning is strictly left to right. Inserted values are never rescanned,
/// so substitution cannot recurse. Unknown keys pass through literally, and
/// an open marker without a closing brace leaves the trailing fragment
/// untouched.
pub fn substitute(template: &str, vars: &PlaceholderMap) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after_marker = &rest[start + 2..];

        let Some(end) = after_marker.find('}') else {
            // Unterminated marker: keep the fragment as-is and stop.
            out.push_str(&rest[start..]);
            return out;
        };

        let key = &after_marker[..end];
        match vars.get(key) {
            Some(value) => out.push_str(value),
            None => out.push_str(&rest[start..start + 2 + end + 1]),
        }

        rest = &after_marker[end + 1..];
    }

    out.push_str(rest);
    out
}
