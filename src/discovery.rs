//! Project discovery: walk a directory tree, collect `.py` files, and map
//! each file to the dotted module name it defines.
//!
//! The walker:
//!  - Respects `.gitignore` (and `.ignore`) files at every level.
//!  - Skips hidden entries (names starting with `.`) — this covers `.git`,
//!    `.venv`, `.tox`, `.mypy_cache`, and friends.
//!  - Always skips the well-known virtual-environment, cache, and build
//!    directories in [`ALWAYS_EXCLUDE`], gitignored or not.
//!  - Skips any path with a component matching a caller-supplied exclude name.
//!
//! Results come back sorted so the dependency graph renders the same way on
//! every run.

use anyhow::Result;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Directory names that are never part of a project's own module tree.
const ALWAYS_EXCLUDE: &[&str] = &[
    // virtual environments
    "venv",
    "env",
    ".venv",
    ".env",
    "virtualenv",
    // Python caches
    "__pycache__",
    ".mypy_cache",
    ".ruff_cache",
    ".pytest_cache",
    ".hypothesis",
    // build / dist
    "build",
    "dist",
    ".eggs",
    // version-control
    ".git",
    ".hg",
    ".svn",
    // node (sometimes present in monorepos)
    "node_modules",
    // tox / nox
    ".tox",
    ".nox",
];

/// Discover every `.py` file reachable from `root`, sorted by path.
pub fn discover_python_files(root: &Path, exclude: &[String]) -> Result<Vec<PathBuf>> {
    let walker = WalkBuilder::new(root)
        .hidden(true)
        .git_ignore(true)
        // Apply .gitignore rules even without a .git root.
        .require_git(false)
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("py") {
            continue;
        }
        if is_excluded(path, exclude) {
            continue;
        }
        files.push(path.to_path_buf());
    }

    files.sort();
    Ok(files)
}

/// True when any path component is in [`ALWAYS_EXCLUDE`] or matches one of
/// the caller's exclude names (exact or substring, e.g. "tests", "vendor").
fn is_excluded(path: &Path, exclude: &[String]) -> bool {
    for component in path.components() {
        let std::path::Component::Normal(name) = component else {
            continue;
        };
        let name = name.to_string_lossy();
        if ALWAYS_EXCLUDE.contains(&name.as_ref()) {
            return true;
        }
        if exclude
            .iter()
            .any(|pat| name == pat.as_str() || name.contains(pat.as_str()))
        {
            return true;
        }
    }
    false
}

/// Map a discovered file to the dotted module name it defines, relative to
/// the project root.
///
/// `pkg/util/text.py` becomes `pkg.util.text`; a package initialiser
/// `pkg/__init__.py` names the package itself, `pkg`.  Returns `None` for a
/// path outside `root`, a non-`.py` file, or an `__init__.py` sitting
/// directly in the project root (the root itself is not a module).
pub fn module_name(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    if rel.extension().and_then(|e| e.to_str()) != Some("py") {
        return None;
    }

    let mut parts: Vec<String> = Vec::new();
    for component in rel.components() {
        let std::path::Component::Normal(name) = component else {
            return None;
        };
        parts.push(name.to_string_lossy().into_owned());
    }

    let stem = parts.pop()?;
    let stem = stem.strip_suffix(".py")?;
    if stem != "__init__" {
        parts.push(stem.to_owned());
    }
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("."))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
