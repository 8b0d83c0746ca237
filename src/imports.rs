//! `ctxb imports`: show what the extractor and resolver see in one file.

use anyhow::{anyhow, Result};
use serde::Serialize;
use std::path::Path;

use context_bundle_core::classify::is_project_specific;
use context_bundle_core::extract::extract_imports;
use context_bundle_core::models::relative_to_root;
use context_bundle_core::resolve::ResolveRequest;
use context_bundle_core::workspace::Workspace;

use crate::config::Config;
use crate::suggest::build_engine;

/// One extracted import and what became of it.
#[derive(Debug, Serialize)]
pub struct ImportReport {
    pub path: String,
    pub offset: usize,
    pub project: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved: Option<String>,
}

pub async fn run_imports(config: &Config, root: Option<&Path>, file: &Path, resolve: bool, json: bool) -> Result<()> {
    let engine = build_engine(config, root)?;
    let workspace = engine.workspace();
    let relative = relative_to_root(workspace.root(), file)
        .ok_or_else(|| anyhow!("{} is outside the workspace", file.display()))?;
    let code = workspace.read_text(&relative).await?;

    let mut reports = Vec::new();
    for candidate in extract_imports(&code) {
        let project = is_project_specific(&candidate.path);
        let resolved = if resolve && project {
            let req = ResolveRequest {
                import_path: &candidate.path,
                offset: candidate.index,
                source_file: &relative,
            };
            engine.resolver().resolve(&req, workspace).await
        } else {
            None
        };
        reports.push(ImportReport {
            path: candidate.path,
            offset: candidate.index,
            project,
            resolved,
        });
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }
    if reports.is_empty() {
        println!("No imports found in {}.", relative);
        return Ok(());
    }
    for r in &reports {
        let kind = if r.project { "project" } else { "external" };
        match (&r.resolved, resolve && r.project) {
            (Some(target), _) => println!("{:>6}  {:<8} {} -> {}", r.offset, kind, r.path, target),
            (None, true) => println!("{:>6}  {:<8} {} -> (unresolved)", r.offset, kind, r.path),
            (None, false) => println!("{:>6}  {:<8} {}", r.offset, kind, r.path),
        }
    }
    Ok(())
}
