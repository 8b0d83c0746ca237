//! Regex-based import extraction.
//!
//! Scans raw text (never an AST) with an ordered table of patterns, one
//! entry per import syntax. Adding a language means adding a row to
//! [`IMPORT_PATTERNS`]; the scan loop does not change.
//!
//! The extractor does not judge candidates. Degenerate specifiers such as
//! the bare `.` from Python's `from . import x` are returned as found and
//! filtered later by [`crate::classify`].

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

use crate::classify::is_project_specific;
use crate::models::ImportCandidate;

/// One row of the pattern table.
pub struct ImportPattern {
    /// Short label, used only in diagnostics.
    pub name: &'static str,
    pub regex: Regex,
    /// Capture group holding the import specifier.
    pub group: usize,
}

impl ImportPattern {
    fn new(name: &'static str, pattern: &str, group: usize) -> Self {
        Self {
            name,
            regex: Regex::new(pattern).expect("invalid import pattern"),
            group,
        }
    }
}

/// Import syntaxes recognized by [`extract_imports`], in scan order.
pub static IMPORT_PATTERNS: Lazy<Vec<ImportPattern>> = Lazy::new(|| {
    vec![
        // import x from "p" / import { a, b } from "p" / import "p"
        ImportPattern::new(
            "es-module",
            r#"import\s+(?:[\w*{}\s,]+\s+from\s+)?['"]([^'"]+)['"]"#,
            1,
        ),
        ImportPattern::new("commonjs", r#"require\s*\(\s*['"]([^'"]+)['"]\s*\)"#, 1),
        ImportPattern::new("dynamic-import", r#"import\s*\(\s*['"]([^'"]+)['"]\s*\)"#, 1),
        ImportPattern::new("c-include", r#"(?m)^\s*#include\s*["<]([^"<>]+)[">]"#, 1),
        ImportPattern::new("use", r#"(?m)^\s*use\s+([\w\\]+);"#, 1),
        ImportPattern::new("python-from", r#"(?m)^\s*from\s+([\w.]+)\s+import"#, 1),
        ImportPattern::new("bare-import", r#"(?m)^\s*import\s+([\w.]+)"#, 1),
    ]
});

/// Extract every import specifier in `code`.
///
/// Results are deduplicated by specifier and ordered by first occurrence.
/// When several patterns match the same specifier, the smallest offset
/// wins.
pub fn extract_imports(code: &str) -> Vec<ImportCandidate> {
    let mut first_seen: HashMap<&str, usize> = HashMap::new();

    for pattern in IMPORT_PATTERNS.iter() {
        for caps in pattern.regex.captures_iter(code) {
            let Some(m) = caps.get(pattern.group) else {
                continue;
            };
            first_seen
                .entry(m.as_str())
                .and_modify(|index| *index = (*index).min(m.start()))
                .or_insert(m.start());
        }
    }

    let mut candidates: Vec<ImportCandidate> = first_seen
        .into_iter()
        .map(|(path, index)| ImportCandidate {
            path: path.to_string(),
            index,
        })
        .collect();
    candidates.sort_by_key(|c| c.index);
    candidates
}

/// Extract only the imports that look project-local.
pub fn extract_project_imports(code: &str) -> Vec<ImportCandidate> {
    extract_imports(code)
        .into_iter()
        .filter(|c| is_project_specific(&c.path))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(candidates: &[ImportCandidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.path.as_str()).collect()
    }

    #[test]
    fn test_offsets_point_at_specifier() {
        let code = "import x from \"./a\";\nconst b = require(\"../b\");\n";
        let found = extract_imports(code);
        let project: Vec<_> = found.iter().filter(|c| c.path.starts_with('.')).collect();
        assert_eq!(project.len(), 2);
        assert_eq!(project[0].path, "./a");
        assert_eq!(&code[project[0].index..project[0].index + 3], "./a");
        assert_eq!(project[1].path, "../b");
        assert_eq!(&code[project[1].index..project[1].index + 4], "../b");
        assert!(project[0].index < project[1].index);
    }

    #[test]
    fn test_duplicates_keep_first_offset() {
        let code = "import a from './a';\nimport b from './a';\nrequire('./a');\n";
        let found = extract_imports(code);
        let hits: Vec<_> = found.iter().filter(|c| c.path == "./a").collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].index, code.find("./a").unwrap());
    }

    #[test]
    fn test_es_module_forms() {
        let code = "import { a, b } from '@/utils/y';\nimport * as z from \"./z\";\nimport './side-effect';\n";
        let found = extract_imports(code);
        let p = paths(&found);
        assert!(p.contains(&"@/utils/y"));
        assert!(p.contains(&"./z"));
        assert!(p.contains(&"./side-effect"));
    }

    #[test]
    fn test_multiline_named_import() {
        let code = "import {\n  alpha,\n  beta,\n} from './greek';\n";
        let found = extract_imports(code);
        assert_eq!(found[0].path, "./greek");
        assert_eq!(found[0].index, code.find("./greek").unwrap());
    }

    #[test]
    fn test_dynamic_import() {
        let code = "const m = await import('./lazy');";
        let found = extract_imports(code);
        assert_eq!(paths(&found), vec!["./lazy"]);
        assert_eq!(found[0].index, code.find("./lazy").unwrap());
    }

    #[test]
    fn test_c_include() {
        let code = "#include \"core/buffer.h\"\n#include <stdio.h>\n";
        let p = paths(&extract_imports(code)).join(",");
        assert!(p.contains("core/buffer.h"));
        assert!(p.contains("stdio.h"));
    }

    #[test]
    fn test_python_forms() {
        let code = "from . import sibling\nfrom app.models import User\nimport os.path\n";
        let found = extract_imports(code);
        let p = paths(&found);
        assert!(p.contains(&"."));
        assert!(p.contains(&"app.models"));
        assert!(p.contains(&"os.path"));
    }

    #[test]
    fn test_use_statement() {
        let code = "<?php\nuse App\\Models\\User;\n";
        let found = extract_imports(code);
        assert_eq!(paths(&found), vec!["App\\Models\\User"]);
    }

    #[test]
    fn test_no_imports() {
        assert!(extract_imports("fn main() { println!(\"hi\"); }").is_empty());
        assert!(extract_imports("").is_empty());
    }

    #[test]
    fn test_project_filter_drops_packages_and_dot() {
        let code = "import React from 'react';\nimport x from './x';\nfrom . import y\n";
        let found = extract_project_imports(code);
        assert_eq!(paths(&found), vec!["./x"]);
    }
}
