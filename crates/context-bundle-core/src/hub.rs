//! Hub scoring: how many project files does a module pull in?
//!
//! Files with many outgoing project-local imports tend to be shared,
//! foundational modules. The count is a cheap centrality proxy, but it
//! costs a file read, so the ranker only calls it on a short list.

use anyhow::{anyhow, Result};
use tracing::warn;

use crate::extract::extract_project_imports;
use crate::resolve::find_file_with_extensions;
use crate::workspace::Workspace;

/// Count the project-specific imports of an extension-less file path.
///
/// Returns 0 when the file cannot be found or read; the failure is logged.
pub async fn hub_score(workspace: &dyn Workspace, file_path: &str, extensions: &[String]) -> usize {
    match try_hub_score(workspace, file_path, extensions).await {
        Ok(score) => score,
        Err(e) => {
            warn!("could not calculate hub score for {}: {:#}", file_path, e);
            0
        }
    }
}

async fn try_hub_score(workspace: &dyn Workspace, file_path: &str, extensions: &[String]) -> Result<usize> {
    let resolved = find_file_with_extensions(workspace, file_path, extensions)
        .await?
        .ok_or_else(|| anyhow!("no file matches {}", file_path))?;
    let text = workspace.read_text(&resolved).await?;
    Ok(extract_project_imports(&text).len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::ProbeOptions;
    use crate::workspace::memory::InMemoryWorkspace;

    #[tokio::test]
    async fn test_counts_project_imports_only() {
        let ws = InMemoryWorkspace::with_files(
            "/p",
            [(
                "src/core.ts",
                "import a from './a';\nimport b from '../b';\nimport React from 'react';\nimport c from '@/c';\n",
            )],
        );
        let exts = ProbeOptions::default().extensions;
        assert_eq!(hub_score(&ws, "src/core", &exts).await, 3);
    }

    #[tokio::test]
    async fn test_missing_file_scores_zero() {
        let ws = InMemoryWorkspace::new("/p");
        let exts = ProbeOptions::default().extensions;
        assert_eq!(hub_score(&ws, "src/ghost", &exts).await, 0);
    }

    #[tokio::test]
    async fn test_file_without_imports() {
        let ws = InMemoryWorkspace::with_files("/p", [("lib/leaf.py", "def f():\n    return 1\n")]);
        let exts = ProbeOptions::default().extensions;
        assert_eq!(hub_score(&ws, "lib/leaf", &exts).await, 0);
    }
}
