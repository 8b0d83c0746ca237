//! TOML configuration for `ctxb`.
//!
//! Every section is optional; a missing key falls back to the same value
//! the suggestion engine uses when embedded without configuration. See
//! `config/ctxb.example.toml` for a commented example.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use context_bundle_core::rank::{RankParams, HUB_SHORTLIST, MAX_SUGGESTIONS, MIN_FREQUENCY};
use context_bundle_core::resolve::{ProbeOptions, DEFAULT_ALIAS_ROOTS, DEFAULT_EXTENSIONS};

/// Path `--config` points at when not given explicitly.
pub const DEFAULT_CONFIG_PATH: &str = "./config/ctxb.toml";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub workspace: WorkspaceConfig,
    #[serde(default)]
    pub suggestions: SuggestionsConfig,
    #[serde(default)]
    pub resolver: ResolverConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WorkspaceConfig {
    #[serde(default = "default_root")]
    pub root: PathBuf,
    /// Extra globs excluded from workspace searches, on top of the
    /// built-in heavy directories.
    #[serde(default)]
    pub exclude_globs: Vec<String>,
    #[serde(default)]
    pub follow_symlinks: bool,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            exclude_globs: Vec::new(),
            follow_symlinks: false,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

#[derive(Debug, Deserialize, Clone)]
pub struct SuggestionsConfig {
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
    #[serde(default = "default_shortlist_size")]
    pub shortlist_size: usize,
    #[serde(default = "default_min_frequency")]
    pub min_frequency: usize,
}

impl Default for SuggestionsConfig {
    fn default() -> Self {
        Self {
            max_suggestions: MAX_SUGGESTIONS,
            shortlist_size: HUB_SHORTLIST,
            min_frequency: MIN_FREQUENCY,
        }
    }
}

fn default_max_suggestions() -> usize {
    MAX_SUGGESTIONS
}
fn default_shortlist_size() -> usize {
    HUB_SHORTLIST
}
fn default_min_frequency() -> usize {
    MIN_FREQUENCY
}

impl SuggestionsConfig {
    pub fn rank_params(&self) -> RankParams {
        RankParams {
            max_suggestions: self.max_suggestions,
            shortlist_size: self.shortlist_size,
            min_frequency: self.min_frequency,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ResolverConfig {
    /// Extensions probed for extension-less imports, in priority order.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default = "default_alias_roots")]
    pub alias_roots: Vec<String>,
    /// Go-to-definition command; `{file}` and `{offset}` are substituted.
    /// Empty disables definition lookups.
    #[serde(default)]
    pub definition_command: Vec<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            alias_roots: default_alias_roots(),
            definition_command: Vec::new(),
        }
    }
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect()
}
fn default_alias_roots() -> Vec<String> {
    DEFAULT_ALIAS_ROOTS.iter().map(|s| s.to_string()).collect()
}

impl ResolverConfig {
    pub fn probe_options(&self) -> ProbeOptions {
        ProbeOptions {
            extensions: self.extensions.clone(),
            alias_roots: self.alias_roots.clone(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExportConfig {
    #[serde(default)]
    pub include_tree: bool,
    #[serde(default = "default_request_full_code_prompt")]
    pub request_full_code_prompt: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            include_tree: false,
            request_full_code_prompt: default_request_full_code_prompt(),
        }
    }
}

fn default_request_full_code_prompt() -> String {
    "When you suggest changes, reply with the full code of every file you modify.".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

impl Config {
    /// Built-in defaults, used when no config file exists.
    pub fn minimal() -> Self {
        Self::default()
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

/// Load `path`, or fall back to [`Config::minimal`] when the implicit
/// default path does not exist. An explicit path must exist.
pub fn load_or_minimal(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => load_config(path),
        None => {
            let default = Path::new(DEFAULT_CONFIG_PATH);
            if default.exists() {
                load_config(default)
            } else {
                Ok(Config::minimal())
            }
        }
    }
}

fn validate(config: &Config) -> Result<()> {
    // Validate suggestions
    if config.suggestions.max_suggestions == 0 {
        bail!("suggestions.max_suggestions must be >= 1");
    }
    if config.suggestions.shortlist_size == 0 {
        bail!("suggestions.shortlist_size must be >= 1");
    }
    if config.suggestions.min_frequency == 0 {
        bail!("suggestions.min_frequency must be >= 1");
    }

    // Validate resolver
    if let Some(bad) = config.resolver.extensions.iter().find(|e| !e.starts_with('.')) {
        bail!("resolver.extensions entries must start with '.', got '{}'", bad);
    }

    if !LOG_LEVELS.contains(&config.log.level.as_str()) {
        bail!(
            "Unknown log level: '{}'. Must be one of {}.",
            config.log.level,
            LOG_LEVELS.join(", ")
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("ctxb.toml");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn empty_file_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let cfg = load_config(&write_config(&tmp, "")).unwrap();
        assert_eq!(cfg.suggestions.max_suggestions, 4);
        assert_eq!(cfg.suggestions.shortlist_size, 7);
        assert_eq!(cfg.suggestions.min_frequency, 2);
        assert_eq!(cfg.resolver.extensions.first().map(String::as_str), Some(".js"));
        assert_eq!(cfg.resolver.alias_roots, vec!["src", "lib", "app", ""]);
        assert_eq!(cfg.log.level, "warn");
    }

    #[test]
    fn sections_override_defaults() {
        let tmp = TempDir::new().unwrap();
        let cfg = load_config(&write_config(
            &tmp,
            r#"
[workspace]
root = "/srv/app"
exclude_globs = ["**/generated/**"]

[suggestions]
max_suggestions = 2

[resolver]
extensions = [".rs"]
definition_command = ["lsp-def", "{file}", "{offset}"]

[log]
level = "debug"
"#,
        ))
        .unwrap();
        assert_eq!(cfg.workspace.root, PathBuf::from("/srv/app"));
        assert_eq!(cfg.workspace.exclude_globs, vec!["**/generated/**"]);
        assert_eq!(cfg.suggestions.rank_params().max_suggestions, 2);
        assert_eq!(cfg.suggestions.rank_params().shortlist_size, 7);
        assert_eq!(cfg.resolver.probe_options().extensions, vec![".rs"]);
        assert_eq!(cfg.resolver.definition_command.len(), 3);
        assert_eq!(cfg.log.level, "debug");
    }

    #[test]
    fn rejects_zero_limits() {
        let tmp = TempDir::new().unwrap();
        let err = load_config(&write_config(&tmp, "[suggestions]\nshortlist_size = 0\n")).unwrap_err();
        assert!(err.to_string().contains("shortlist_size"));
    }

    #[test]
    fn rejects_extension_without_dot() {
        let tmp = TempDir::new().unwrap();
        let err = load_config(&write_config(&tmp, "[resolver]\nextensions = [\"ts\"]\n")).unwrap_err();
        assert!(err.to_string().contains("'ts'"));
    }

    #[test]
    fn rejects_unknown_log_level() {
        let tmp = TempDir::new().unwrap();
        assert!(load_config(&write_config(&tmp, "[log]\nlevel = \"loud\"\n")).is_err());
    }

    #[test]
    fn explicit_missing_path_errors() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope.toml");
        assert!(load_or_minimal(Some(&missing)).is_err());
    }
}
