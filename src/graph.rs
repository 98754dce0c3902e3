//! Dependency graph assembly.
//!
//! Runs the import extractor over every discovered file in parallel, resolves
//! relative imports against the containing package, and assembles the results
//! into an ordered module → dependencies map.
//!
//! A file that cannot be read or fails to parse is skipped and reported as a
//! [`SkippedFile`]; the rest of the run is unaffected.

use crate::discovery::module_name;
use crate::imports::{self, ParsedImport};
use crate::location::line_col;
use rayon::prelude::*;
use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// ── SkippedFile ───────────────────────────────────────────────────────────────

/// A non-fatal per-file problem; the file contributed nothing to the graph.
#[derive(Debug, Clone)]
pub struct SkippedFile {
    pub file: String,
    pub reason: String,
}

impl fmt::Display for SkippedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file, self.reason)
    }
}

// ── DependencyGraph ───────────────────────────────────────────────────────────

/// Module dependency graph for one project.
///
/// Keys are the dotted names of the project's own modules; each value is the
/// sorted, deduplicated list of modules that module imports (project-local
/// and external alike).
#[derive(Debug, Default, Clone)]
pub struct DependencyGraph {
    modules: BTreeMap<String, Vec<String>>,
}

impl DependencyGraph {
    pub fn modules(&self) -> &BTreeMap<String, Vec<String>> {
        &self.modules
    }

    /// True when `name` is one of the project's own modules.
    pub fn is_local(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    pub fn edge_count(&self) -> usize {
        self.modules.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Keep only modules reachable from the project's top-level modules
    /// (names without a dot) within `limit` project-local edges.
    ///
    /// `limit = 0` keeps just the top-level modules themselves.  Modules
    /// sitting exactly at the limit become leaves: their own dependency
    /// lists are emptied so the rendered graph never reaches past the limit.
    pub fn restrict_depth(&mut self, limit: usize) {
        let mut depth_of: BTreeMap<String, usize> = self
            .modules
            .keys()
            .filter(|name| !name.contains('.'))
            .map(|name| (name.clone(), 0))
            .collect();
        let mut queue: VecDeque<(String, usize)> = depth_of
            .iter()
            .map(|(name, &depth)| (name.clone(), depth))
            .collect();

        while let Some((module, depth)) = queue.pop_front() {
            if depth == limit {
                continue;
            }
            for dep in self.modules.get(&module).into_iter().flatten() {
                if self.modules.contains_key(dep) && !depth_of.contains_key(dep) {
                    depth_of.insert(dep.clone(), depth + 1);
                    queue.push_back((dep.clone(), depth + 1));
                }
            }
        }

        self.modules.retain(|name, _| depth_of.contains_key(name));
        for (name, deps) in self.modules.iter_mut() {
            if depth_of[name] == limit {
                deps.clear();
            }
        }
    }
}

// ── graph construction ────────────────────────────────────────────────────────

struct FileImports {
    module: String,
    records: Vec<ParsedImport>,
}

/// Extract imports from every file (in parallel) and assemble the graph.
///
/// Files outside `root` or not mapping to a module name are ignored; files
/// that fail to read or parse come back in the skipped list.
pub fn build_graph(root: &Path, files: &[PathBuf]) -> (DependencyGraph, Vec<SkippedFile>) {
    let outcomes: Vec<Result<FileImports, SkippedFile>> = files
        .par_iter()
        .filter_map(|path| {
            let module = module_name(root, path)?;
            Some(scan_file(path, module))
        })
        .collect();

    let mut graph = DependencyGraph::default();
    let mut skipped = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(scan) => {
                let mut deps: Vec<String> = scan
                    .records
                    .iter()
                    .filter_map(|record| resolve_import(record, &scan.module))
                    .collect();
                deps.sort();
                deps.dedup();
                graph.modules.insert(scan.module, deps);
            }
            Err(skip) => skipped.push(skip),
        }
    }
    (graph, skipped)
}

fn scan_file(path: &PathBuf, module: String) -> Result<FileImports, SkippedFile> {
    let file = path.to_string_lossy().into_owned();
    let source = fs::read_to_string(path).map_err(|e| SkippedFile {
        file: file.clone(),
        reason: e.to_string(),
    })?;
    match imports::extract_imports(&source) {
        Ok(records) => Ok(FileImports { module, records }),
        Err(e) => {
            let reason = match e.offset() {
                Some(offset) => {
                    let (line, col) = line_col(&source, offset as usize);
                    format!("{line}:{col}: {e}")
                }
                None => e.to_string(),
            };
            Err(SkippedFile { file, reason })
        }
    }
}

/// Resolve one parsed import record to the module name it depends on.
///
/// Relative records resolve against the importing module's package:
/// `pkg.mod` importing `from . import h` depends on `pkg.h`.  A bare
/// wildcard record names no module at all and resolves to `None`.
fn resolve_import(record: &ParsedImport, importer: &str) -> Option<String> {
    if record.module_name == "*" {
        return None;
    }
    if !record.relative {
        return Some(record.module_name.clone());
    }

    let package = importer.rsplit_once('.').map(|(p, _)| p).unwrap_or("");
    match (package.is_empty(), record.module_name.is_empty()) {
        // `from . import x` in a top-level module: the "package" is the
        // project root, which is not a module.
        (true, true) => None,
        (true, false) => Some(record.module_name.clone()),
        (false, true) => Some(package.to_owned()),
        (false, false) => Some(format!("{package}.{}", record.module_name)),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn graph_for(dir: &TempDir, files: &[&str]) -> (DependencyGraph, Vec<SkippedFile>) {
        let paths: Vec<PathBuf> = files.iter().map(|f| dir.path().join(f)).collect();
        build_graph(dir.path(), &paths)
    }

    fn write(dir: &TempDir, name: &str, content: &str) {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_single_file_graph() {
        let dir = TempDir::new().unwrap();
        write(&dir, "app.py", "import os\nfrom util import helper\n");
        let (graph, skipped) = graph_for(&dir, &["app.py"]);
        assert!(skipped.is_empty());
        assert_eq!(
            graph.modules()["app"],
            vec!["os".to_owned(), "util.helper".to_owned()]
        );
    }

    #[test]
    fn test_module_with_no_imports_still_a_node() {
        let dir = TempDir::new().unwrap();
        write(&dir, "leaf.py", "x = 1\n");
        let (graph, _) = graph_for(&dir, &["leaf.py"]);
        assert!(graph.modules()["leaf"].is_empty());
    }

    #[test]
    fn test_dependencies_sorted_and_deduplicated() {
        let dir = TempDir::new().unwrap();
        write(&dir, "app.py", "import z\nimport a\nimport z\n");
        let (graph, _) = graph_for(&dir, &["app.py"]);
        assert_eq!(graph.modules()["app"], vec!["a".to_owned(), "z".to_owned()]);
    }

    #[test]
    fn test_relative_import_resolves_to_package() {
        let dir = TempDir::new().unwrap();
        write(&dir, "pkg/__init__.py", "");
        write(&dir, "pkg/mod.py", "from . import helper\nfrom .sibling import f\n");
        let (graph, _) = graph_for(&dir, &["pkg/__init__.py", "pkg/mod.py"]);
        assert_eq!(
            graph.modules()["pkg.mod"],
            vec!["pkg.helper".to_owned(), "pkg.sibling.f".to_owned()]
        );
    }

    #[test]
    fn test_relative_wildcard_resolves_to_containing_package() {
        let dir = TempDir::new().unwrap();
        write(&dir, "pkg/mod.py", "from . import *\n");
        let (graph, _) = graph_for(&dir, &["pkg/mod.py"]);
        assert_eq!(graph.modules()["pkg.mod"], vec!["pkg".to_owned()]);
    }

    #[test]
    fn test_relative_import_in_top_level_module_drops_empty_root() {
        let dir = TempDir::new().unwrap();
        write(&dir, "app.py", "from . import x\n");
        let (graph, _) = graph_for(&dir, &["app.py"]);
        // The project root is not a module, so only `x` remains.
        assert_eq!(graph.modules()["app"], vec!["x".to_owned()]);
    }

    #[test]
    fn test_unparseable_file_skipped_with_position() {
        let dir = TempDir::new().unwrap();
        write(&dir, "good.py", "import os\n");
        write(&dir, "bad.py", "x = 1\nfrom import nothing\n");
        let (graph, skipped) = graph_for(&dir, &["good.py", "bad.py"]);

        assert!(graph.is_local("good"));
        assert!(!graph.is_local("bad"));
        assert_eq!(skipped.len(), 1);
        assert!(skipped[0].file.ends_with("bad.py"));
        assert!(skipped[0].reason.starts_with("2:6:"), "{}", skipped[0].reason);
        assert!(skipped[0].reason.contains("'from' keyword"));
    }

    #[test]
    fn test_is_local() {
        let dir = TempDir::new().unwrap();
        write(&dir, "app.py", "import os\n");
        let (graph, _) = graph_for(&dir, &["app.py"]);
        assert!(graph.is_local("app"));
        assert!(!graph.is_local("os"));
    }

    #[test]
    fn test_edge_count() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.py", "import x\nimport y\n");
        write(&dir, "b.py", "import a\n");
        let (graph, _) = graph_for(&dir, &["a.py", "b.py"]);
        assert_eq!(graph.module_count(), 2);
        assert_eq!(graph.edge_count(), 3);
    }

    // ── depth limiting ───────────────────────────────────────────────────────

    fn chain_graph() -> (TempDir, DependencyGraph) {
        // main -> pkg.a -> pkg.b -> pkg.c, plus an unreachable pkg.orphan
        let dir = TempDir::new().unwrap();
        write(&dir, "main.py", "from pkg import a\n");
        write(&dir, "pkg/a.py", "from . import b\n");
        write(&dir, "pkg/b.py", "from . import c\n");
        write(&dir, "pkg/c.py", "import os\n");
        write(&dir, "pkg/orphan.py", "import sys\n");
        let (graph, skipped) = graph_for(
            &dir,
            &["main.py", "pkg/a.py", "pkg/b.py", "pkg/c.py", "pkg/orphan.py"],
        );
        assert!(skipped.is_empty());
        (dir, graph)
    }

    #[test]
    fn test_depth_zero_keeps_top_level_only() {
        let (_dir, mut graph) = chain_graph();
        graph.restrict_depth(0);
        let kept: Vec<&String> = graph.modules().keys().collect();
        assert_eq!(kept, vec!["main"]);
    }

    #[test]
    fn test_depth_limits_reachable_set() {
        let (_dir, mut graph) = chain_graph();
        graph.restrict_depth(2);
        let kept: Vec<&String> = graph.modules().keys().collect();
        assert_eq!(kept, vec!["main", "pkg.a", "pkg.b"]);
    }

    #[test]
    fn test_modules_at_the_limit_become_leaves() {
        let (_dir, mut graph) = chain_graph();
        graph.restrict_depth(2);
        // pkg.b sits exactly at the limit: its edge to pkg.c is cut.
        assert!(graph.modules()["pkg.b"].is_empty());
        assert_eq!(graph.modules()["pkg.a"], vec!["pkg.b".to_owned()]);
    }

    #[test]
    fn test_large_depth_keeps_reachable_drops_orphan() {
        let (_dir, mut graph) = chain_graph();
        graph.restrict_depth(10);
        let kept: Vec<&String> = graph.modules().keys().collect();
        assert_eq!(kept, vec!["main", "pkg.a", "pkg.b", "pkg.c"]);
        assert!(!graph.is_local("pkg.orphan"));
    }
}
