//! Graphviz `dot` outputter.
//!
//! The rendered digraph pipes straight into `dot -Tsvg` for a visual map of
//! the project's import structure.

use super::{Outputter, Params};
use crate::graph::DependencyGraph;
use anyhow::{Result, bail};
use std::fmt::Write;

#[derive(Debug)]
pub struct DotOutputter {
    rankdir: String,
    /// Include dependencies on modules outside the project.
    external: bool,
}

impl DotOutputter {
    pub fn configure(params: &mut Params) -> Result<Self> {
        let rankdir = params.take("rankdir").unwrap_or_else(|| "TB".to_owned());
        if !matches!(rankdir.as_str(), "TB" | "LR" | "BT" | "RL") {
            bail!("parameter `rankdir` expects TB, LR, BT or RL, got `{rankdir}`");
        }
        Ok(Self {
            rankdir,
            external: params.take_bool("external", true)?,
        })
    }
}

impl Outputter for DotOutputter {
    fn render(&self, graph: &DependencyGraph) -> Result<String> {
        let mut out = String::new();
        writeln!(out, "digraph dependencies {{")?;
        writeln!(out, "    rankdir={};", self.rankdir)?;
        writeln!(out, "    node [fontname=\"Helvetica\"];")?;

        // Project modules get a box shape; external leaves keep the default.
        for module in graph.modules().keys() {
            writeln!(out, "    \"{module}\" [shape=box];")?;
        }
        for (module, deps) in graph.modules() {
            for dep in deps {
                if !self.external && !graph.is_local(dep) {
                    continue;
                }
                writeln!(out, "    \"{module}\" -> \"{dep}\";")?;
            }
        }

        writeln!(out, "}}")?;
        Ok(out)
    }
}
