//! Import path resolution.
//!
//! Maps an import specifier to a workspace file through an ordered chain
//! of [`ResolveStrategy`] implementations. The standard chain asks a
//! [`DefinitionProvider`] first (language servers understand tsconfig
//! paths, package aliases and so on) and falls back to [`ManualStrategy`],
//! which probes the workspace using naming conventions.
//!
//! Resolution failure is never an error for callers: [`ResolverChain::resolve`]
//! returns `None` and logs the reason at debug level.
//!
//! # Probe order
//!
//! For a candidate path `p`, [`find_file_with_extensions`] tries:
//!
//! 1. `p` as given (explicit extensions)
//! 2. `p<ext>` for each extension in priority order
//! 3. `p/index<ext>` for each extension
//! 4. `p/__init__.py`

use anyhow::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::classify::strip_alias_prefix;
use crate::models::{normalize_separators, relative_to_root, strip_extension};
use crate::workspace::{is_vendored, Workspace};

/// Extensions probed for extension-less imports, highest priority first.
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    ".js", ".jsx", ".ts", ".tsx", ".json", ".mjs", ".cjs", ".py", ".java", ".go", ".c", ".cpp",
    ".h", ".hpp", ".php", ".rs",
];

/// Directories tried, in order, for alias-prefixed imports. The empty
/// entry means the workspace root.
pub const DEFAULT_ALIAS_ROOTS: &[&str] = &["src", "lib", "app", ""];

/// Tuning for manual resolution, decoupled from application config.
#[derive(Debug, Clone)]
pub struct ProbeOptions {
    pub extensions: Vec<String>,
    pub alias_roots: Vec<String>,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            alias_roots: DEFAULT_ALIAS_ROOTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Inputs for resolving one import.
#[derive(Debug, Clone, Copy)]
pub struct ResolveRequest<'a> {
    /// The specifier as written, e.g. `"./sibling"`.
    pub import_path: &'a str,
    /// Byte offset of the specifier inside the source file.
    pub offset: usize,
    /// File containing the import, workspace-relative.
    pub source_file: &'a str,
}

/// "Go to definition" capability of a host editor or language server.
#[async_trait]
pub trait DefinitionProvider: Send + Sync {
    /// Definition targets for the symbol at `offset` in `source_file`.
    ///
    /// `source_file` is absolute. Returned paths may be absolute or
    /// relative to the workspace root. An empty list means "unknown".
    async fn definitions(&self, source_file: &Path, offset: usize) -> Result<Vec<PathBuf>>;
}

/// Provider for hosts without definition support. Always empty.
pub struct NoDefinitions;

#[async_trait]
impl DefinitionProvider for NoDefinitions {
    async fn definitions(&self, _source_file: &Path, _offset: usize) -> Result<Vec<PathBuf>> {
        Ok(Vec::new())
    }
}

/// One way of turning an import into a workspace file.
#[async_trait]
pub trait ResolveStrategy: Send + Sync {
    /// Short label for diagnostics.
    fn name(&self) -> &str;

    /// Resolve to a workspace-relative path (extension allowed), or `None`.
    async fn resolve(&self, req: &ResolveRequest<'_>, workspace: &dyn Workspace) -> Result<Option<String>>;
}

/// Primary strategy: ask a [`DefinitionProvider`] at the specifier offset.
pub struct DefinitionStrategy {
    provider: Box<dyn DefinitionProvider>,
}

impl DefinitionStrategy {
    pub fn new(provider: Box<dyn DefinitionProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl ResolveStrategy for DefinitionStrategy {
    fn name(&self) -> &str {
        "definition"
    }

    async fn resolve(&self, req: &ResolveRequest<'_>, workspace: &dyn Workspace) -> Result<Option<String>> {
        let root = workspace.root();
        let source = root.join(req.source_file);
        let targets = self.provider.definitions(&source, req.offset).await?;
        let Some(first) = targets.first() else {
            return Ok(None);
        };
        Ok(relative_to_root(root, first))
    }
}

/// Fallback strategy: convention-driven probing of the workspace.
pub struct ManualStrategy {
    options: ProbeOptions,
}

impl ManualStrategy {
    pub fn new(options: ProbeOptions) -> Self {
        Self { options }
    }
}

#[async_trait]
impl ResolveStrategy for ManualStrategy {
    fn name(&self) -> &str {
        "manual"
    }

    async fn resolve(&self, req: &ResolveRequest<'_>, workspace: &dyn Workspace) -> Result<Option<String>> {
        let import = normalize_separators(req.import_path);
        let extensions = &self.options.extensions;

        if import.starts_with('.') {
            let base = parent_dir(req.source_file);
            let Some(joined) = join_relative(base, &import) else {
                return Ok(None);
            };
            return find_file_with_extensions(workspace, &joined, extensions).await;
        }

        if let Some(stripped) = strip_alias_prefix(&import) {
            for root in &self.options.alias_roots {
                let candidate = if root.is_empty() {
                    stripped.to_string()
                } else {
                    format!("{}/{}", root.trim_end_matches('/'), stripped)
                };
                if let Some(found) = find_file_with_extensions(workspace, &candidate, extensions).await? {
                    return Ok(Some(found));
                }
            }
            return Ok(None);
        }

        if let Some(stripped) = import.strip_prefix('/') {
            return find_file_with_extensions(workspace, stripped, extensions).await;
        }

        // Multi-segment paths may already name a file (`core/buffer.h`);
        // try that before reading dots as module separators.
        if import.contains('/') && import.contains('.') {
            if let Some(literal) = join_relative("", &import) {
                if let Some(found) = workspace.find_files(&literal, 1).await?.into_iter().next() {
                    return Ok(Some(found));
                }
            }
        }
        let dotted = import.replace('.', "/");
        find_file_with_extensions(workspace, &dotted, extensions).await
    }
}

/// Ordered list of strategies, tried until one yields a usable file.
pub struct ResolverChain {
    strategies: Vec<Box<dyn ResolveStrategy>>,
}

impl ResolverChain {
    pub fn new() -> Self {
        Self {
            strategies: Vec::new(),
        }
    }

    /// Definition provider first, manual probing second.
    pub fn standard(provider: Box<dyn DefinitionProvider>, options: ProbeOptions) -> Self {
        Self::new()
            .with_strategy(Box::new(DefinitionStrategy::new(provider)))
            .with_strategy(Box::new(ManualStrategy::new(options)))
    }

    /// Manual probing only.
    pub fn manual(options: ProbeOptions) -> Self {
        Self::new().with_strategy(Box::new(ManualStrategy::new(options)))
    }

    pub fn with_strategy(mut self, strategy: Box<dyn ResolveStrategy>) -> Self {
        self.strategies.push(strategy);
        self
    }

    /// Resolve an import to an extension-less, workspace-relative path.
    ///
    /// Errors and vendored results count as misses and move on to the
    /// next strategy.
    pub async fn resolve(&self, req: &ResolveRequest<'_>, workspace: &dyn Workspace) -> Option<String> {
        for strategy in &self.strategies {
            match strategy.resolve(req, workspace).await {
                Ok(Some(path)) => {
                    let path = normalize_separators(&path);
                    if is_vendored(&path) {
                        debug!(
                            strategy = strategy.name(),
                            import = req.import_path,
                            "discarding vendored target {}",
                            path
                        );
                        continue;
                    }
                    return Some(strip_extension(&path).to_string());
                }
                Ok(None) => {}
                Err(e) => {
                    debug!(
                        strategy = strategy.name(),
                        import = req.import_path,
                        "resolution failed: {:#}",
                        e
                    );
                }
            }
        }
        None
    }
}

impl Default for ResolverChain {
    fn default() -> Self {
        Self::manual(ProbeOptions::default())
    }
}

/// Find the file an extension-less path refers to.
///
/// Each probe is a workspace search capped at one result. Returns the
/// matched path with its extension. Paths that climb above the root
/// never match.
pub async fn find_file_with_extensions(
    workspace: &dyn Workspace,
    path: &str,
    extensions: &[String],
) -> Result<Option<String>> {
    let Some(path) = join_relative("", path) else {
        return Ok(None);
    };
    if path.is_empty() {
        return Ok(None);
    }

    let mut probes = Vec::with_capacity(extensions.len() * 2 + 2);
    probes.push(path.to_string());
    probes.extend(extensions.iter().map(|ext| format!("{}{}", path, ext)));
    probes.extend(extensions.iter().map(|ext| format!("{}/index{}", path, ext)));
    probes.push(format!("{}/__init__.py", path));

    for probe in probes {
        if let Some(found) = workspace.find_files(&probe, 1).await?.into_iter().next() {
            return Ok(Some(found));
        }
    }
    Ok(None)
}

/// Directory part of a workspace-relative file path (`""` at the root).
fn parent_dir(file: &str) -> &str {
    match file.rfind('/') {
        Some(i) => &file[..i],
        None => "",
    }
}

/// Join `relative` onto `base`, collapsing `.` and `..`.
///
/// Returns `None` when the result would climb above the workspace root.
pub fn join_relative(base: &str, relative: &str) -> Option<String> {
    let mut segments: Vec<&str> = base.split('/').filter(|s| !s.is_empty()).collect();
    for segment in relative.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            other => segments.push(other),
        }
    }
    Some(segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::memory::InMemoryWorkspace;

    fn req<'a>(import_path: &'a str, source_file: &'a str) -> ResolveRequest<'a> {
        ResolveRequest {
            import_path,
            offset: 0,
            source_file,
        }
    }

    struct FixedDefinitions(Vec<PathBuf>);

    #[async_trait]
    impl DefinitionProvider for FixedDefinitions {
        async fn definitions(&self, _source_file: &Path, _offset: usize) -> Result<Vec<PathBuf>> {
            Ok(self.0.clone())
        }
    }

    struct FailingDefinitions;

    #[async_trait]
    impl DefinitionProvider for FailingDefinitions {
        async fn definitions(&self, _source_file: &Path, _offset: usize) -> Result<Vec<PathBuf>> {
            anyhow::bail!("no language server")
        }
    }

    #[test]
    fn test_join_relative() {
        assert_eq!(join_relative("src", "./sibling"), Some("src/sibling".to_string()));
        assert_eq!(join_relative("src/a/b", "../../c"), Some("src/c".to_string()));
        assert_eq!(join_relative("", "./x"), Some("x".to_string()));
        assert_eq!(join_relative("src", "../../x"), None);
    }

    #[tokio::test]
    async fn test_relative_sibling() {
        let ws = InMemoryWorkspace::with_files("/p", [("src/a.ts", ""), ("src/sibling.ts", "")]);
        let chain = ResolverChain::default();
        let got = chain.resolve(&req("./sibling", "src/a.ts"), &ws).await;
        assert_eq!(got.as_deref(), Some("src/sibling"));
    }

    #[tokio::test]
    async fn test_parent_relative() {
        let ws = InMemoryWorkspace::with_files("/p", [("lib/util.py", "")]);
        let chain = ResolverChain::default();
        let got = chain.resolve(&req("../lib/util", "app/main.py"), &ws).await;
        assert_eq!(got.as_deref(), Some("lib/util"));
    }

    #[tokio::test]
    async fn test_alias_probes_src_root() {
        let ws = InMemoryWorkspace::with_files("/p", [("src/utils/log.ts", "")]);
        let chain = ResolverChain::default();
        let got = chain.resolve(&req("@/utils/log", "src/app.ts"), &ws).await;
        assert_eq!(got.as_deref(), Some("src/utils/log"));
    }

    #[tokio::test]
    async fn test_alias_root_order() {
        let ws = InMemoryWorkspace::with_files("/p", [("lib/x.js", ""), ("x.js", "")]);
        let chain = ResolverChain::default();
        let got = chain.resolve(&req("~/x", "a.js"), &ws).await;
        assert_eq!(got.as_deref(), Some("lib/x"));
    }

    #[tokio::test]
    async fn test_absolute_from_root() {
        let ws = InMemoryWorkspace::with_files("/p", [("shared/config.json", "{}")]);
        let chain = ResolverChain::default();
        let got = chain.resolve(&req("/shared/config", "web/a.js"), &ws).await;
        assert_eq!(got.as_deref(), Some("shared/config"));
    }

    #[tokio::test]
    async fn test_dotted_module() {
        let ws = InMemoryWorkspace::with_files("/p", [("app/models/user.py", "")]);
        let chain = ResolverChain::default();
        let got = chain.resolve(&req("app.models.user", "main.py"), &ws).await;
        assert_eq!(got.as_deref(), Some("app/models/user"));
    }

    #[tokio::test]
    async fn test_explicit_extension_include() {
        let ws = InMemoryWorkspace::with_files("/p", [("core/buffer.h", "")]);
        let chain = ResolverChain::default();
        let got = chain.resolve(&req("core/buffer.h", "main.c"), &ws).await;
        assert_eq!(got.as_deref(), Some("core/buffer"));
    }

    #[tokio::test]
    async fn test_index_and_init_files() {
        let ws = InMemoryWorkspace::with_files(
            "/p",
            [("src/components/index.tsx", ""), ("pkg/tools/__init__.py", "")],
        );
        let chain = ResolverChain::default();
        let got = chain.resolve(&req("./components", "src/a.ts"), &ws).await;
        assert_eq!(got.as_deref(), Some("src/components/index"));
        let got = chain.resolve(&req("../tools", "pkg/cli/run.py"), &ws).await;
        assert_eq!(got.as_deref(), Some("pkg/tools/__init__"));
    }

    #[tokio::test]
    async fn test_extension_priority() {
        let ws = InMemoryWorkspace::with_files("/p", [("src/m.ts", ""), ("src/m.js", "")]);
        let found = find_file_with_extensions(&ws, "src/m", &ProbeOptions::default().extensions)
            .await
            .unwrap();
        assert_eq!(found.as_deref(), Some("src/m.js"));
    }

    #[tokio::test]
    async fn test_unresolvable_is_none() {
        let ws = InMemoryWorkspace::with_files("/p", [("src/a.ts", "")]);
        let chain = ResolverChain::default();
        assert!(chain.resolve(&req("./missing", "src/a.ts"), &ws).await.is_none());
        assert!(chain.resolve(&req("@scope/pkg", "src/a.ts"), &ws).await.is_none());
    }

    #[tokio::test]
    async fn test_definition_provider_wins() {
        let ws = InMemoryWorkspace::with_files("/p", [("src/sibling.ts", ""), ("types/sibling.d.ts", "")]);
        let provider = FixedDefinitions(vec![PathBuf::from("/p/types/sibling.d.ts")]);
        let chain = ResolverChain::standard(Box::new(provider), ProbeOptions::default());
        let got = chain.resolve(&req("./sibling", "src/a.ts"), &ws).await;
        assert_eq!(got.as_deref(), Some("types/sibling.d"));
    }

    #[tokio::test]
    async fn test_failing_provider_falls_back() {
        let ws = InMemoryWorkspace::with_files("/p", [("src/sibling.ts", "")]);
        let chain = ResolverChain::standard(Box::new(FailingDefinitions), ProbeOptions::default());
        let got = chain.resolve(&req("./sibling", "src/a.ts"), &ws).await;
        assert_eq!(got.as_deref(), Some("src/sibling"));
    }

    #[tokio::test]
    async fn test_vendored_definition_discarded() {
        let ws = InMemoryWorkspace::with_files("/p", [("src/a.ts", "")]);
        let provider = FixedDefinitions(vec![PathBuf::from("/p/node_modules/lib/index.d.ts")]);
        let chain = ResolverChain::standard(Box::new(provider), ProbeOptions::default());
        assert!(chain.resolve(&req("lib/thing", "src/a.ts"), &ws).await.is_none());
    }

    #[tokio::test]
    async fn test_escaping_paths_never_resolve() {
        let ws = InMemoryWorkspace::with_files("/p/app", [("src/a.ts", ""), ("lib/x.ts", "")]);
        let chain = ResolverChain::default();
        for import in ["lib/../../secret.ts", "@/../../secret", "/../secret", "lib/../../../etc/passwd"] {
            assert!(chain.resolve(&req(import, "src/a.ts"), &ws).await.is_none(), "{}", import);
        }
    }

    #[tokio::test]
    async fn test_parent_segments_inside_root_collapse() {
        let ws = InMemoryWorkspace::with_files("/p", [("lib/x.ts", ""), ("src/a.ts", "")]);
        let chain = ResolverChain::default();
        let got = chain.resolve(&req("/src/../lib/x", "src/a.ts"), &ws).await;
        assert_eq!(got.as_deref(), Some("lib/x"));
        let got = chain.resolve(&req("@/../lib/x", "src/a.ts"), &ws).await;
        assert_eq!(got.as_deref(), Some("lib/x"));
        let found = find_file_with_extensions(&ws, "lib/../../x", &ProbeOptions::default().extensions)
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_definition_outside_root_ignored() {
        let ws = InMemoryWorkspace::with_files("/p", [("src/sibling.ts", "")]);
        let provider = FixedDefinitions(vec![PathBuf::from("/usr/lib/sibling.ts")]);
        let chain = ResolverChain::standard(Box::new(provider), ProbeOptions::default());
        let got = chain.resolve(&req("./sibling", "src/a.ts"), &ws).await;
        assert_eq!(got.as_deref(), Some("src/sibling"));
    }
}
