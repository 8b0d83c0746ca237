//! Filesystem-backed [`Workspace`].
//!
//! Walks the project with `walkdir`, skipping `.git`, `node_modules` and
//! `target` entirely and filtering files through the configured exclude
//! globs. Patterns without glob metacharacters take a fast path that
//! checks the single candidate file instead of walking the tree.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use context_bundle_core::glob::{is_literal, GlobCache};
use context_bundle_core::models::normalize_separators;
use context_bundle_core::resolve::join_relative;
use context_bundle_core::workspace::Workspace;

use crate::config::Config;

/// Directories never descended into during searches.
const PRUNED_DIRS: &[&str] = &[".git", "node_modules", "target"];

pub struct FsWorkspace {
    root: PathBuf,
    exclude_set: GlobSet,
    follow_symlinks: bool,
    globs: GlobCache,
}

impl FsWorkspace {
    pub fn new(root: &Path, exclude_globs: &[String], follow_symlinks: bool) -> Result<Self> {
        if !root.is_dir() {
            bail!("Workspace root does not exist: {}", root.display());
        }
        let root = root
            .canonicalize()
            .with_context(|| format!("Failed to resolve workspace root: {}", root.display()))?;
        Ok(Self {
            root,
            exclude_set: build_globset(exclude_globs)?,
            follow_symlinks,
            globs: GlobCache::new(),
        })
    }

    /// Workspace from `[workspace]` config, with an optional root override.
    pub fn from_config(config: &Config, root_override: Option<&Path>) -> Result<Self> {
        let root = root_override.unwrap_or(&config.workspace.root);
        Self::new(root, &config.workspace.exclude_globs, config.workspace.follow_symlinks)
    }

    fn is_excluded(&self, relative: &str) -> bool {
        relative.split('/').any(|segment| PRUNED_DIRS.contains(&segment)) || self.exclude_set.is_match(relative)
    }

    fn relative(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        normalize_separators(&relative.to_string_lossy())
    }
}

#[async_trait]
impl Workspace for FsWorkspace {
    fn root(&self) -> &Path {
        &self.root
    }

    async fn find_files(&self, pattern: &str, limit: usize) -> Result<Vec<String>> {
        let pattern = normalize_separators(pattern);
        let pattern = pattern.trim_start_matches("./");
        if limit == 0 || pattern.is_empty() {
            return Ok(Vec::new());
        }

        if is_literal(pattern) {
            let Some(literal) = join_relative("", pattern) else {
                return Ok(Vec::new());
            };
            if !literal.is_empty() && !self.is_excluded(&literal) && self.root.join(&literal).is_file() {
                return Ok(vec![literal]);
            }
            return Ok(Vec::new());
        }

        let mut found = Vec::new();
        let walker = WalkDir::new(&self.root)
            .follow_links(self.follow_symlinks)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_pruned(e));
        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let rel = self.relative(entry.path());
            if self.exclude_set.is_match(&rel) {
                continue;
            }
            if self.globs.is_match(pattern, &rel)? {
                found.push(rel);
                if found.len() >= limit {
                    break;
                }
            }
        }
        Ok(found)
    }

    async fn read_text(&self, relative: &str) -> Result<String> {
        let Some(contained) = join_relative("", &normalize_separators(relative)) else {
            bail!("Path escapes the workspace root: {}", relative);
        };
        let path = self.root.join(contained);
        tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))
    }
}

fn is_pruned(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map(|name| PRUNED_DIRS.contains(&name))
            .unwrap_or(false)
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern).with_context(|| format!("Invalid exclude glob: {}", pattern))?);
    }
    Ok(builder.build()?)
}
