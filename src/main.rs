//! # Context Bundle CLI (`ctxb`)
//!
//! Suggests related project files for the snippets in an AI chat context
//! bundle, and exports bundles as a single prompt document.
//!
//! ## Usage
//!
//! ```bash
//! ctxb --config ./config/ctxb.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `ctxb suggest` | Rank files imported by several snippets |
//! | `ctxb imports <file>` | List a file's imports and how they resolve |
//! | `ctxb bundle` | Render a bundle as markdown or text |
//! | `ctxb tree` | Print the project tree used in exports |
//!
//! ## Examples
//!
//! ```bash
//! # Suggestions for two files you are about to paste into a chat
//! ctxb suggest --file src/api/routes.ts --file src/api/auth.ts
//!
//! # Same, from a saved bundle, with the scoring breakdown
//! ctxb suggest --snippets bundle.json --explain
//!
//! # Export the bundle plus suggested files to a markdown file
//! ctxb bundle --snippets bundle.json --with-suggestions --output ctx.md
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use context_bundle::bundle::{run_bundle, BundleOptions};
use context_bundle::config;
use context_bundle::export::ExportFormat;
use context_bundle::imports::run_imports;
use context_bundle::logging;
use context_bundle::sink::OutputMode;
use context_bundle::suggest::run_suggest;
use context_bundle::tree::{render_tree, TreeStyle};
use context_bundle::workspace_fs::FsWorkspace;
use context_bundle_core::workspace::Workspace;

/// Context Bundle CLI: import-graph driven file suggestions for AI chat
/// context.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/ctxb.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "ctxb",
    about = "Context Bundle: suggest related files for AI chat context from the import graph",
    version,
    long_about = "Context Bundle reads the code snippets you have collected for an AI chat, \
    follows their imports into the project, and suggests the few files most of them depend on. \
    Bundles can then be exported as a single markdown or text prompt."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/ctxb.toml`; built-in defaults are used when
    /// that file does not exist.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Workspace root, overriding `[workspace].root`.
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Log at debug level (unless RUST_LOG is set).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Suggest related files for a set of snippets.
    ///
    /// A file is suggested only when at least two of your snippets import
    /// it. Candidates are ranked by how many snippets import them, then by
    /// how many project files they import themselves.
    Suggest {
        /// Snippet bundle (JSON): `{"prompt": ..., "snippets": [...]}` or a bare array.
        #[arg(long)]
        snippets: Option<PathBuf>,

        /// Add a whole file as a user snippet. Repeatable.
        #[arg(long = "file")]
        files: Vec<String>,

        /// Print `{"suggestions": [...]}` instead of one path per line.
        #[arg(long)]
        json: bool,

        /// Show frequency, hub and composite scores.
        #[arg(long)]
        explain: bool,
    },

    /// List the imports found in a file.
    ///
    /// Shows each specifier with its byte offset and whether it is treated
    /// as project-local. With `--resolve`, also shows the workspace file it
    /// resolves to.
    Imports {
        /// File to inspect, relative to the workspace root or absolute.
        file: PathBuf,

        /// Resolve project imports to workspace files.
        #[arg(long)]
        resolve: bool,

        /// Print JSON.
        #[arg(long)]
        json: bool,
    },

    /// Export a snippet bundle as a single prompt document.
    Bundle {
        /// Snippet bundle (JSON).
        #[arg(long)]
        snippets: PathBuf,

        /// Append the suggested files in full.
        #[arg(long)]
        with_suggestions: bool,

        /// Append the project tree (also enabled by `[export].include_tree`).
        #[arg(long)]
        tree: bool,

        /// Append `[export].request_full_code_prompt`.
        #[arg(long)]
        request_full_code: bool,

        /// Output format.
        #[arg(long, value_enum, default_value = "md")]
        format: ExportFormat,

        /// Output file or directory. Writes to stdout when omitted.
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Print the project tree.
    Tree {
        /// Use ASCII connectors instead of box-drawing characters.
        #[arg(long)]
        ascii: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cfg = config::load_or_minimal(cli.config.as_deref())?;
    logging::init(&cfg.log.level, cli.verbose);
    let root = cli.root.as_deref();

    match cli.command {
        Commands::Suggest {
            snippets,
            files,
            json,
            explain,
        } => {
            run_suggest(
                &cfg,
                root,
                snippets.as_deref(),
                &files,
                OutputMode::from_flag(json),
                explain,
            )
            .await?;
        }
        Commands::Imports {
            file,
            resolve,
            json,
        } => {
            run_imports(&cfg, root, &file, resolve, json).await?;
        }
        Commands::Bundle {
            snippets,
            with_suggestions,
            tree,
            request_full_code,
            format,
            output,
        } => {
            let opts = BundleOptions {
                with_suggestions,
                tree,
                request_full_code,
                format,
                output: output.as_deref(),
            };
            run_bundle(&cfg, root, &snippets, &opts).await?;
        }
        Commands::Tree { ascii } => {
            let workspace = FsWorkspace::from_config(&cfg, root)?;
            let style = if ascii { TreeStyle::Ascii } else { TreeStyle::Unicode };
            print!("{}", render_tree(workspace.root(), style)?);
        }
    }

    Ok(())
}
