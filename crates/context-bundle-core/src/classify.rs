//! Project-local vs. external import classification.
//!
//! Works without any package manifest, so it trades precision for
//! simplicity. A false positive (say, a scoped npm package) costs one
//! failed resolution; a false negative hides a real suggestion.

/// Prefixes that build tools conventionally map to a project root.
pub const ALIAS_PREFIXES: &[&str] = &["@/", "~/", "$/", "#/"];

/// Whether `path` starts with one of [`ALIAS_PREFIXES`].
pub fn has_alias_prefix(path: &str) -> bool {
    ALIAS_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}

/// Strip a leading alias prefix, if any.
pub fn strip_alias_prefix(path: &str) -> Option<&str> {
    ALIAS_PREFIXES
        .iter()
        .find_map(|prefix| path.strip_prefix(prefix))
}

/// Decide whether an import specifier is worth resolving.
///
/// | Input | Result |
/// |-------|--------|
/// | exactly `.` (Python `from . import x`) | `false` |
/// | starts with `.` or `/` | `true` |
/// | alias prefix (`@/`, `~/`, `$/`, `#/`) | `true` |
/// | contains `/` or `\` | `true` |
/// | anything else | `false` |
///
/// The bare-dot check runs first: a lone `.` also starts with a dot and
/// would otherwise be accepted as relative.
pub fn is_project_specific(path: &str) -> bool {
    if path == "." {
        return false;
    }
    if path.starts_with('.') || path.starts_with('/') {
        return true;
    }
    if has_alias_prefix(path) {
        return true;
    }
    path.contains('/') || path.contains('\\')
}
