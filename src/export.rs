//! Export a bundle as a single prompt document.
//!
//! The output is plain markdown meant to be pasted into an AI chat: the
//! prompt, a `---` rule, each snippet with its own header and rule, then
//! optionally the project tree and a closing instruction.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

use context_bundle_core::models::{Snippet, SnippetKind};

/// Output file flavour. Both share the same text.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, clap::ValueEnum)]
pub enum ExportFormat {
    #[default]
    Md,
    Txt,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Md => "md",
            ExportFormat::Txt => "txt",
        }
    }
}

/// Optional trailing sections.
#[derive(Debug, Default)]
pub struct ExportExtras<'a> {
    pub project_tree: Option<&'a str>,
    pub request_full_code: Option<&'a str>,
}

/// Render the bundle text.
pub fn render_bundle(prompt: &str, snippets: &[Snippet], extras: &ExportExtras<'_>) -> String {
    let mut out = format!("{}\n---\n", prompt);

    for snippet in snippets {
        match snippet.kind {
            SnippetKind::Code => {
                out.push_str(&format!("### {}\n\n", snippet.file_info()));
                out.push_str(&format!("```\n{}\n```\n", snippet.text));
            }
            SnippetKind::Terminal => {
                out.push_str(&format!("\n\n### Terminal Log\n\n```\n{}\n```\n", snippet.text));
            }
            SnippetKind::External => {
                out.push_str(&format!("\n\n### External Information\n\n{}\n", snippet.text));
            }
        }
        if let Some(note) = snippet.note.as_deref().filter(|n| !n.is_empty()) {
            out.push_str(&format!("> {}\n\n", note));
        }
        out.push_str("---\n");
    }

    if let Some(tree) = extras.project_tree {
        out.push_str(&format!("\n\n### Project Tree\n\n```\n{}\n```\n", tree));
    }

    if let Some(request) = extras.request_full_code.filter(|r| !r.is_empty()) {
        out.push_str(&format!("\n\n{}\n", request));
    }

    out
}

/// `context-bundle-YYYYMMDD-HHMMSS.<ext>`
pub fn default_file_name(format: ExportFormat, at: DateTime<Local>) -> String {
    format!("context-bundle-{}.{}", at.format("%Y%m%d-%H%M%S"), format.extension())
}

/// Where `--output` actually writes: a directory gets a timestamped file.
pub fn output_path(output: &Path, format: ExportFormat) -> PathBuf {
    if output.is_dir() {
        output.join(default_file_name(format, Local::now()))
    } else {
        output.to_path_buf()
    }
}

/// Write `content` to `output`, or stdout when `None`.
pub fn write_output(content: &str, output: Option<&Path>, format: ExportFormat) -> Result<Option<PathBuf>> {
    match output {
        Some(path) => {
            let path = output_path(path, format);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
            std::fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
            Ok(Some(path))
        }
        None => {
            print!("{}", content);
            Ok(None)
        }
    }
}
