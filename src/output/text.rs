//! Human-readable text outputter (the default).

use super::{Outputter, Params};
use crate::graph::DependencyGraph;
use anyhow::Result;
use colored::Colorize;
use std::fmt::Write;

/// One block per module, dependencies indented underneath.  Project-local
/// dependencies render cyan, external ones dimmed.
#[derive(Debug)]
pub struct TextOutputter {
    /// Include dependencies on modules outside the project.
    external: bool,
}

impl TextOutputter {
    pub fn configure(params: &mut Params) -> Result<Self> {
        Ok(Self {
            external: params.take_bool("external", true)?,
        })
    }
}

impl Outputter for TextOutputter {
    fn render(&self, graph: &DependencyGraph) -> Result<String> {
        let mut out = String::new();
        let mut edges = 0usize;

        for (module, deps) in graph.modules() {
            writeln!(out, "{}", module.bold())?;
            for dep in deps {
                let local = graph.is_local(dep);
                if !local && !self.external {
                    continue;
                }
                edges += 1;
                let rendered = if local {
                    dep.cyan().to_string()
                } else {
                    dep.dimmed().to_string()
                };
                writeln!(out, "  -> {rendered}")?;
            }
        }

        writeln!(
            out,
            "{}",
            format!(
                "{} module(s), {} dependency edge(s)",
                graph.module_count(),
                edges
            )
            .yellow()
        )?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build_graph;
    use std::fs;
    use tempfile::TempDir;

    fn render(params: &[(&str, &str)], files: &[(&str, &str)]) -> String {
        let dir = TempDir::new().unwrap();
        let mut paths = Vec::new();
        for (name, content) in files {
            let path = dir.path().join(name);
            fs::write(&path, content).unwrap();
            paths.push(path);
        }
        let (graph, _) = build_graph(dir.path(), &paths);
        let pairs: Vec<(String, String)> = params
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let mut p = Params::new(&pairs);
        TextOutputter::configure(&mut p)
            .unwrap()
            .render(&graph)
            .unwrap()
    }

    #[test]
    fn test_lists_modules_and_dependencies() {
        let out = render(&[], &[("app.py", "import os\nfrom util import x\n")]);
        assert!(out.contains("app"));
        assert!(out.contains("-> "));
        assert!(out.contains("os"));
        assert!(out.contains("util.x"));
    }

    #[test]
    fn test_summary_line() {
        let out = render(&[], &[("app.py", "import os\n")]);
        assert!(out.contains("1 module(s), 1 dependency edge(s)"));
    }

    #[test]
    fn test_external_false_hides_foreign_modules() {
        let out = render(
            &[("external", "false")],
            &[("app.py", "import os\nimport util\n"), ("util.py", "")],
        );
        assert!(out.contains("util"));
        assert!(!out.contains("os"));
        assert!(out.contains("2 module(s), 1 dependency edge(s)"));
    }
}
