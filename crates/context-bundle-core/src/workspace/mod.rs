//! Workspace abstraction for context-bundle.
//!
//! The [`Workspace`] trait is the only way the resolver, hub scorer, and
//! ranker touch project files. The application crate provides a
//! filesystem implementation; [`memory::InMemoryWorkspace`] backs tests.
//!
//! Implementations must be `Send + Sync` to work with async runtimes.

pub mod memory;

use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

/// Directories holding third-party code checked into a project.
///
/// Anything resolving inside one of these is treated as unresolved.
pub const VENDORED_DIRS: &[&str] = &["node_modules", "vendor", "third_party"];

/// Whether any segment of a workspace-relative path is a vendored directory.
pub fn is_vendored(path: &str) -> bool {
    path.split(['/', '\\'])
        .any(|segment| VENDORED_DIRS.contains(&segment))
}

/// Read-only view of a project tree.
///
/// All paths are workspace-relative with forward slashes.
///
/// # Operations
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`root`](Workspace::root) | Absolute root directory |
/// | [`find_files`](Workspace::find_files) | Glob search with a result cap |
/// | [`read_text`](Workspace::read_text) | Read a file as UTF-8 |
#[async_trait]
pub trait Workspace: Send + Sync {
    /// The workspace root directory.
    fn root(&self) -> &Path;

    /// Files matching `pattern`, a glob relative to the root.
    ///
    /// Vendored directories are never searched. Returns at most `limit`
    /// paths; callers probing for existence pass `1`.
    async fn find_files(&self, pattern: &str, limit: usize) -> Result<Vec<String>>;

    /// Read a workspace-relative file as text.
    async fn read_text(&self, relative: &str) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_vendored() {
        assert!(is_vendored("node_modules/react/index"));
        assert!(is_vendored("web/node_modules/x/y"));
        assert!(is_vendored("vendor\\lib\\a"));
        assert!(!is_vendored("src/vendors/a"));
        assert!(!is_vendored("src/a"));
    }
}
