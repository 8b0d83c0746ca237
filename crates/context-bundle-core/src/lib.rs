//! # Context Bundle Core
//!
//! Host-independent logic for context-bundle: import extraction,
//! project-import classification, path resolution, hub scoring, and
//! suggestion ranking.
//!
//! This crate performs no filesystem or process I/O of its own. Every
//! file lookup goes through the [`workspace::Workspace`] trait and every
//! "go to definition" query through [`resolve::DefinitionProvider`], so
//! the same engine runs against a real checkout, an editor's virtual
//! file system, or an in-memory fixture.

pub mod classify;
pub mod extract;
pub mod glob;
pub mod hub;
pub mod models;
pub mod rank;
pub mod resolve;
pub mod sink;
pub mod workspace;
