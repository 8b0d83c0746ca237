//! Go-to-definition through an external command.
//!
//! Lets `ctxb` borrow a language server's understanding of path aliases
//! and module maps without linking one in. The configured command runs
//! once per import with `{file}` and `{offset}` substituted; every
//! non-empty stdout line is taken as a definition target.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::debug;

use context_bundle_core::resolve::{DefinitionProvider, NoDefinitions};

pub struct CommandDefinitionProvider {
    program: String,
    args: Vec<String>,
}

impl CommandDefinitionProvider {
    /// `None` when `command` is empty.
    pub fn new(command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    fn expand(&self, source_file: &Path, offset: usize) -> Vec<String> {
        let file = source_file.to_string_lossy();
        let offset = offset.to_string();
        self.args
            .iter()
            .map(|arg| arg.replace("{file}", &file).replace("{offset}", &offset))
            .collect()
    }
}

#[async_trait]
impl DefinitionProvider for CommandDefinitionProvider {
    async fn definitions(&self, source_file: &Path, offset: usize) -> Result<Vec<PathBuf>> {
        let args = self.expand(source_file, offset);
        debug!("running definition command {} {:?}", self.program, args);
        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .await
            .with_context(|| format!("Failed to run definition command: {}", self.program))?;
        if !output.status.success() {
            bail!(
                "definition command exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(PathBuf::from)
            .collect())
    }
}

/// Provider for `[resolver].definition_command`, or [`NoDefinitions`].
pub fn provider_for(command: &[String]) -> Box<dyn DefinitionProvider> {
    match CommandDefinitionProvider::new(command) {
        Some(provider) => Box::new(provider),
        None => Box::new(NoDefinitions),
    }
}
