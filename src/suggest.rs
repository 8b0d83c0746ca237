//! `ctxb suggest`: rank related files for a set of snippets.

use anyhow::{bail, Result};
use std::path::Path;

use context_bundle_core::models::SuggestionScore;
use context_bundle_core::rank::SuggestionEngine;
use context_bundle_core::resolve::ResolverChain;

use crate::config::Config;
use crate::definition::provider_for;
use crate::sink::OutputMode;
use crate::snippets::{load_bundle, snippets_from_files, Bundle};
use crate::workspace_fs::FsWorkspace;

/// Suggestion engine over the configured workspace and resolver.
pub fn build_engine(config: &Config, root: Option<&Path>) -> Result<SuggestionEngine<FsWorkspace>> {
    let workspace = FsWorkspace::from_config(config, root)?;
    let probe = config.resolver.probe_options();
    let resolver = if config.resolver.definition_command.is_empty() {
        ResolverChain::manual(probe.clone())
    } else {
        ResolverChain::standard(provider_for(&config.resolver.definition_command), probe.clone())
    };
    Ok(SuggestionEngine::new(workspace)
        .with_resolver(resolver)
        .with_probe_options(probe)
        .with_params(config.suggestions.rank_params()))
}

/// Bundle from `--snippets`, extended with whole-file snippets for each
/// `--file`.
pub async fn gather_bundle(
    engine: &SuggestionEngine<FsWorkspace>,
    snippets: Option<&Path>,
    files: &[String],
) -> Result<Bundle> {
    if snippets.is_none() && files.is_empty() {
        bail!("Nothing to suggest from: pass --snippets <FILE> or --file <PATH>");
    }
    let mut bundle = match snippets {
        Some(path) => load_bundle(path)?,
        None => Bundle::default(),
    };
    bundle
        .snippets
        .extend(snippets_from_files(engine.workspace(), files).await?);
    Ok(bundle)
}

pub async fn run_suggest(
    config: &Config,
    root: Option<&Path>,
    snippets: Option<&Path>,
    files: &[String],
    mode: OutputMode,
    explain: bool,
) -> Result<()> {
    let engine = build_engine(config, root)?;
    let bundle = gather_bundle(&engine, snippets, files).await?;

    if explain {
        let scores = engine.score(&bundle.snippets).await?;
        print_scores(&scores, mode)?;
        return Ok(());
    }

    let sink = mode.sink();
    engine.suggest_into(&bundle.snippets, sink.as_ref()).await;
    Ok(())
}

fn print_scores(scores: &[SuggestionScore], mode: OutputMode) -> Result<()> {
    if mode == OutputMode::Json {
        println!("{}", serde_json::to_string_pretty(scores)?);
        return Ok(());
    }
    if scores.is_empty() {
        println!("No suggestions.");
        return Ok(());
    }
    println!("{:<40} {:>5} {:>5} {:>7}", "FILE", "FREQ", "HUB", "SCORE");
    println!("{}", "-".repeat(60));
    for s in scores {
        println!(
            "{:<40} {:>5} {:>5} {:>7}",
            s.file_path, s.frequency, s.hub_score, s.composite_score
        );
    }
    Ok(())
}
