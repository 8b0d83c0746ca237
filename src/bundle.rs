//! `ctxb bundle`: export a snippet bundle as one prompt document.

use anyhow::Result;
use std::path::Path;
use tracing::info;

use context_bundle_core::workspace::Workspace;

use crate::config::Config;
use crate::export::{render_bundle, write_output, ExportExtras, ExportFormat};
use crate::snippets::{load_bundle, load_suggested_files};
use crate::suggest::build_engine;
use crate::tree::{render_tree, TreeStyle};

/// Flags of `ctxb bundle`.
#[derive(Debug, Default)]
pub struct BundleOptions<'a> {
    pub with_suggestions: bool,
    pub tree: bool,
    pub request_full_code: bool,
    pub format: ExportFormat,
    pub output: Option<&'a Path>,
}

pub async fn run_bundle(config: &Config, root: Option<&Path>, snippets: &Path, opts: &BundleOptions<'_>) -> Result<()> {
    let engine = build_engine(config, root)?;
    let mut bundle = load_bundle(snippets)?;

    if opts.with_suggestions {
        let suggested = engine.rank(&bundle.snippets).await;
        info!("adding {} suggested files", suggested.len());
        let extensions = &config.resolver.extensions;
        let loaded = load_suggested_files(engine.workspace(), &suggested, extensions).await;
        bundle.snippets.extend(loaded);
    }

    let tree = if opts.tree || config.export.include_tree {
        Some(render_tree(engine.workspace().root(), TreeStyle::Unicode)?)
    } else {
        None
    };
    let extras = ExportExtras {
        project_tree: tree.as_deref(),
        request_full_code: opts
            .request_full_code
            .then_some(config.export.request_full_code_prompt.as_str()),
    };

    let content = render_bundle(&bundle.prompt, &bundle.snippets, &extras);
    if let Some(path) = write_output(&content, opts.output, opts.format)? {
        eprintln!("Exported {} snippets to {}", bundle.snippets.len(), path.display());
    }
    Ok(())
}
