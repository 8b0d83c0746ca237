//! Loading snippet bundles and turning files into snippets.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

use context_bundle_core::models::{relative_to_root, AddedBy, Snippet};
use context_bundle_core::resolve::find_file_with_extensions;
use context_bundle_core::workspace::Workspace;

/// A prompt plus the snippets collected for it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Bundle {
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub snippets: Vec<Snippet>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BundleFile {
    Full(Bundle),
    Bare(Vec<Snippet>),
}

/// Parse a bundle: either `{"prompt": ..., "snippets": [...]}` or a bare
/// snippet array.
pub fn parse_bundle(json: &str) -> Result<Bundle> {
    let parsed: BundleFile = serde_json::from_str(json).with_context(|| "Failed to parse snippet bundle")?;
    Ok(match parsed {
        BundleFile::Full(bundle) => bundle,
        BundleFile::Bare(snippets) => Bundle {
            prompt: String::new(),
            snippets,
        },
    })
}

pub fn load_bundle(path: &Path) -> Result<Bundle> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snippet bundle: {}", path.display()))?;
    parse_bundle(&content).with_context(|| format!("Invalid snippet bundle: {}", path.display()))
}

/// Whole-file user snippets for `files` (root-relative or absolute).
pub async fn snippets_from_files(workspace: &dyn Workspace, files: &[String]) -> Result<Vec<Snippet>> {
    let mut snippets = Vec::with_capacity(files.len());
    for file in files {
        let relative = relative_to_root(workspace.root(), Path::new(file))
            .ok_or_else(|| anyhow!("{} is outside the workspace", file))?;
        let text = workspace.read_text(&relative).await?;
        snippets.push(Snippet::full_file(relative, text, AddedBy::User));
    }
    Ok(snippets)
}

/// Read each suggested (extension-less) path in full.
///
/// Paths that no longer resolve or cannot be read are skipped.
pub async fn load_suggested_files(workspace: &dyn Workspace, paths: &[String], extensions: &[String]) -> Vec<Snippet> {
    let mut snippets = Vec::with_capacity(paths.len());
    for path in paths {
        match read_suggested(workspace, path, extensions).await {
            Ok(snippet) => snippets.push(snippet),
            Err(e) => warn!("skipping suggested file {}: {:#}", path, e),
        }
    }
    snippets
}

async fn read_suggested(workspace: &dyn Workspace, path: &str, extensions: &[String]) -> Result<Snippet> {
    let resolved = find_file_with_extensions(workspace, path, extensions)
        .await?
        .ok_or_else(|| anyhow!("file not found"))?;
    let text = workspace.read_text(&resolved).await?;
    Ok(Snippet::full_file(resolved, text, AddedBy::Suggestion))
}
