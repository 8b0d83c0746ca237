//! # Context Bundle
//!
//! Suggests the project files most worth adding to an AI chat context,
//! based on what the snippets already in the bundle import, and exports
//! the bundle as a single prompt document.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐   ┌──────────────┐   ┌────────────┐   ┌───────────┐
//! │  Snippets  │──▶│   Extract +  │──▶│  Resolve   │──▶│   Rank    │
//! │ JSON/files │   │   classify   │   │ def → path │   │ freq + hub│
//! └────────────┘   └──────────────┘   └────────────┘   └─────┬─────┘
//!                                                            │
//!                              ┌─────────────────────────────┤
//!                              ▼                             ▼
//!                        ┌──────────┐                  ┌──────────┐
//!                        │  stdout  │                  │  export  │
//!                        │ (ctxb)   │                  │ md / txt │
//!                        └──────────┘                  └──────────┘
//! ```
//!
//! The algorithms live in `context-bundle-core`; this crate supplies the
//! filesystem workspace, the command-backed definition provider,
//! configuration, and the `ctxb` CLI.
//!
//! ## Quick Start
//!
//! ```bash
//! ctxb suggest --file src/api.ts --file src/worker.ts
//! ctxb imports src/api.ts --resolve
//! ctxb bundle --snippets bundle.json --with-suggestions --tree --output ctx.md
//! ctxb tree
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`workspace_fs`] | Filesystem workspace |
//! | [`definition`] | External go-to-definition command |
//! | [`snippets`] | Bundle loading, files as snippets |
//! | [`suggest`] | `ctxb suggest` |
//! | [`imports`] | `ctxb imports` |
//! | [`bundle`] | `ctxb bundle` |
//! | [`export`] | Prompt document rendering |
//! | [`tree`] | Project tree rendering |
//! | [`sink`] | Suggestion output |
//! | [`logging`] | Tracing subscriber setup |

pub mod bundle;
pub mod config;
pub mod definition;
pub mod export;
pub mod imports;
pub mod logging;
pub mod sink;
pub mod snippets;
pub mod suggest;
pub mod tree;
pub mod workspace_fs;
