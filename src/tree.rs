//! Project tree rendering for exports.
//!
//! ```text
//! ├── src
//! │   ├── core
//! │   │   └── a.ts
//! │   └── index.ts
//! ├── node_modules/...
//! └── package.json
//! ```
//!
//! Directories come before files, each group sorted by name. Heavy
//! directories and anything matched by the root `.gitignore` are shown
//! collapsed as `name/...`; ignored files are left out.

use anyhow::{Context, Result};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::fs;
use std::path::Path;
use tracing::warn;

/// Directories never expanded in the tree.
pub const HEAVY_DIRS: &[&str] = &["node_modules/", "dist/", ".git/", "build/", "out/", "coverage/"];

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum TreeStyle {
    #[default]
    Unicode,
    Ascii,
}

impl TreeStyle {
    fn branch(self, last: bool) -> &'static str {
        match (self, last) {
            (TreeStyle::Unicode, false) => "├── ",
            (TreeStyle::Unicode, true) => "└── ",
            (TreeStyle::Ascii, false) => "|-- ",
            (TreeStyle::Ascii, true) => "`-- ",
        }
    }

    fn indent(self, last: bool) -> &'static str {
        match (self, last) {
            (_, true) => "    ",
            (TreeStyle::Unicode, false) => "│   ",
            (TreeStyle::Ascii, false) => "|   ",
        }
    }
}

/// Render the tree under `root`.
pub fn render_tree(root: &Path, style: TreeStyle) -> Result<String> {
    let filter = build_filter(root);
    let mut out = String::new();
    render_dir(root, root, &filter, style, "", &mut out)?;
    Ok(out)
}

fn build_filter(root: &Path) -> Gitignore {
    let mut builder = GitignoreBuilder::new(root);
    for dir in HEAVY_DIRS {
        if let Err(e) = builder.add_line(None, dir) {
            warn!("bad built-in ignore pattern {}: {}", dir, e);
        }
    }
    let gitignore = root.join(".gitignore");
    if gitignore.is_file() {
        if let Some(e) = builder.add(&gitignore) {
            warn!("failed to load {}: {}", gitignore.display(), e);
        }
    }
    builder.build().unwrap_or_else(|e| {
        warn!("failed to build ignore matcher: {}", e);
        Gitignore::empty()
    })
}

struct Entry {
    name: String,
    is_dir: bool,
    collapsed: bool,
}

fn render_dir(root: &Path, dir: &Path, filter: &Gitignore, style: TreeStyle, prefix: &str, out: &mut String) -> Result<()> {
    let mut entries = Vec::new();
    let listing = fs::read_dir(dir).with_context(|| format!("Failed to read directory: {}", dir.display()))?;
    for entry in listing {
        let entry = entry?;
        let is_dir = entry.file_type()?.is_dir();
        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(&path);
        let ignored = filter.matched(relative, is_dir).is_ignore();
        if ignored && !is_dir {
            continue;
        }
        entries.push(Entry {
            name: entry.file_name().to_string_lossy().to_string(),
            is_dir,
            collapsed: ignored,
        });
    }
    entries.sort_by(|a, b| b.is_dir.cmp(&a.is_dir).then_with(|| a.name.cmp(&b.name)));

    let count = entries.len();
    for (i, entry) in entries.into_iter().enumerate() {
        let last = i + 1 == count;
        out.push_str(prefix);
        out.push_str(style.branch(last));
        out.push_str(&entry.name);
        if entry.collapsed {
            out.push_str("/...\n");
            continue;
        }
        out.push('\n');
        if entry.is_dir {
            let child_prefix = format!("{}{}", prefix, style.indent(last));
            render_dir(root, &dir.join(&entry.name), filter, style, &child_prefix, out)?;
        }
    }
    Ok(())
}
