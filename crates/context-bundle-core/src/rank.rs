//! Suggestion ranking across a bundle of snippets.
//!
//! # Algorithm
//!
//! 1. **Frequency pass.** For every primary code snippet, extract,
//!    classify, and resolve its imports. Each resolved file gains one
//!    point per snippet importing it. Files already in the bundle are
//!    skipped.
//! 2. **Signal filter.** Drop files below `min_frequency` (default 2: a
//!    file must be imported by at least two primary snippets).
//! 3. **Hub pass.** Hub-score the top `shortlist_size` (default 7)
//!    survivors by frequency. This is the only step that reads files.
//! 4. **Composite ranking.** `frequency * 10 + hub_score`, stable sort
//!    descending, truncate to `max_suggestions` (default 4).
//!
//! Ranking is best effort: any failure yields an empty list.

use anyhow::Result;
use indexmap::{IndexMap, IndexSet};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, error};

use crate::extract::extract_project_imports;
use crate::hub::hub_score;
use crate::models::{normalize_context_path, relative_to_root, Snippet, SnippetKind, SuggestionScore};
use crate::resolve::{ProbeOptions, ResolveRequest, ResolverChain};
use crate::sink::SuggestionSink;
use crate::workspace::Workspace;

/// Upper bound on returned suggestions.
pub const MAX_SUGGESTIONS: usize = 4;
/// How many high-signal candidates get hub-scored.
pub const HUB_SHORTLIST: usize = 7;
/// Minimum number of importing primary snippets.
pub const MIN_FREQUENCY: usize = 2;
/// Weight of one importing snippet relative to one hub import.
pub const FREQUENCY_WEIGHT: usize = 10;

/// Ranking limits, decoupled from application config.
#[derive(Debug, Clone)]
pub struct RankParams {
    pub max_suggestions: usize,
    pub shortlist_size: usize,
    pub min_frequency: usize,
}

impl Default for RankParams {
    fn default() -> Self {
        Self {
            max_suggestions: MAX_SUGGESTIONS,
            shortlist_size: HUB_SHORTLIST,
            min_frequency: MIN_FREQUENCY,
        }
    }
}

/// Suggests related project files for a bundle of snippets.
pub struct SuggestionEngine<W: Workspace> {
    workspace: W,
    resolver: ResolverChain,
    probe: ProbeOptions,
    params: RankParams,
}

impl<W: Workspace> SuggestionEngine<W> {
    /// Engine with manual resolution and default limits.
    pub fn new(workspace: W) -> Self {
        Self {
            workspace,
            resolver: ResolverChain::default(),
            probe: ProbeOptions::default(),
            params: RankParams::default(),
        }
    }

    pub fn with_resolver(mut self, resolver: ResolverChain) -> Self {
        self.resolver = resolver;
        self
    }

    /// Extensions used when locating files for hub scoring.
    pub fn with_probe_options(mut self, probe: ProbeOptions) -> Self {
        self.probe = probe;
        self
    }

    pub fn with_params(mut self, params: RankParams) -> Self {
        self.params = params;
        self
    }

    pub fn workspace(&self) -> &W {
        &self.workspace
    }

    pub fn resolver(&self) -> &ResolverChain {
        &self.resolver
    }

    /// Resolve the project imports of one piece of code.
    ///
    /// `base_offset` is the byte offset of `code` inside `source_file`, so
    /// that definition lookups see positions in the whole file. Returns
    /// unique, extension-less paths in import order.
    pub async fn suggestions_for_code(&self, code: &str, source_file: &str, base_offset: usize) -> Vec<String> {
        let mut resolved = IndexSet::new();
        for candidate in extract_project_imports(code) {
            let req = ResolveRequest {
                import_path: &candidate.path,
                offset: base_offset + candidate.index,
                source_file,
            };
            match self.resolver.resolve(&req, &self.workspace).await {
                Some(path) => {
                    resolved.insert(path);
                }
                None => debug!("unresolved import {:?} in {}", candidate.path, source_file),
            }
        }
        resolved.into_iter().collect()
    }

    /// Rank suggestions for `snippets`, returning at most
    /// `max_suggestions` extension-less paths. Never fails.
    pub async fn rank(&self, snippets: &[Snippet]) -> Vec<String> {
        match self.score(snippets).await {
            Ok(scores) => scores.into_iter().map(|s| s.file_path).collect(),
            Err(e) => {
                error!("smart suggestions failed: {:#}", e);
                Vec::new()
            }
        }
    }

    /// [`rank`](Self::rank), then hand the result to `sink`.
    pub async fn suggest_into(&self, snippets: &[Snippet], sink: &dyn SuggestionSink) -> Vec<String> {
        let suggestions = self.rank(snippets).await;
        sink.deliver(&suggestions);
        suggestions
    }

    /// Full scoring breakdown for the returned suggestions, best first.
    pub async fn score(&self, snippets: &[Snippet]) -> Result<Vec<SuggestionScore>> {
        let root = self.workspace.root();
        let already_added: HashSet<String> = snippets
            .iter()
            .filter(|s| !s.file_name.is_empty())
            .map(|s| normalize_context_path(&workspace_relative(root, &s.file_name)))
            .collect();

        let primary: Vec<&Snippet> = snippets.iter().filter(|s| s.is_primary()).collect();
        if primary.is_empty() {
            return Ok(Vec::new());
        }

        let mut frequency: IndexMap<String, usize> = IndexMap::new();
        for snippet in primary {
            if snippet.kind != SnippetKind::Code || snippet.file_name.is_empty() || snippet.text.is_empty() {
                continue;
            }
            let source = workspace_relative(root, &snippet.file_name);
            let base_offset = self.snippet_offset(snippet, &source).await;
            for path in self.suggestions_for_code(&snippet.text, &source, base_offset).await {
                if !already_added.contains(&path) {
                    *frequency.entry(path).or_insert(0) += 1;
                }
            }
        }

        let high_signal: IndexMap<String, usize> = frequency
            .into_iter()
            .filter(|(_, count)| *count >= self.params.min_frequency)
            .collect();
        if high_signal.is_empty() {
            return Ok(Vec::new());
        }

        let mut by_frequency: Vec<(&String, &usize)> = high_signal.iter().collect();
        by_frequency.sort_by(|a, b| b.1.cmp(a.1));

        let mut hub_scores: IndexMap<&str, usize> = IndexMap::new();
        for (path, _) in by_frequency.into_iter().take(self.params.shortlist_size) {
            let score = hub_score(&self.workspace, path, &self.probe.extensions).await;
            hub_scores.insert(path.as_str(), score);
        }

        let mut ranked: Vec<SuggestionScore> = high_signal
            .iter()
            .map(|(path, &freq)| {
                let hub = hub_scores.get(path.as_str()).copied().unwrap_or(0);
                SuggestionScore {
                    file_path: path.clone(),
                    frequency: freq,
                    hub_score: hub,
                    composite_score: freq * FREQUENCY_WEIGHT + hub,
                }
            })
            .collect();
        ranked.sort_by(|a, b| b.composite_score.cmp(&a.composite_score));
        ranked.truncate(self.params.max_suggestions);
        Ok(ranked)
    }

    /// Byte offset of the snippet's first line in its source file.
    ///
    /// Only partial snippets starting below line 1 need the file. An
    /// unreadable source falls back to 0, which manual probing ignores.
    async fn snippet_offset(&self, snippet: &Snippet, source: &str) -> usize {
        let start_line = match snippet.start_line {
            Some(line) if line > 1 && !snippet.is_full_file => line,
            _ => return 0,
        };
        match self.workspace.read_text(source).await {
            Ok(text) => line_start_offset(&text, start_line).unwrap_or(0),
            Err(e) => {
                debug!("cannot locate snippet in {}: {:#}", source, e);
                0
            }
        }
    }
}

/// Byte offset where 1-based `line` starts, or `None` past the end.
fn line_start_offset(text: &str, line: usize) -> Option<usize> {
    if line <= 1 {
        return Some(0);
    }
    text.match_indices('\n').nth(line - 2).map(|(i, _)| i + 1)
}

/// Snippet paths may be absolute; the ranker works in root-relative terms.
fn workspace_relative(root: &Path, file_name: &str) -> String {
    relative_to_root(root, Path::new(file_name)).unwrap_or_else(|| file_name.to_string())
}
