//! JSON outputter for machine consumption (CI, editors, graph tooling).

use super::{Outputter, Params};
use crate::graph::DependencyGraph;
use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Serialize)]
struct Report<'a> {
    modules: &'a BTreeMap<String, Vec<String>>,
    module_count: usize,
    edge_count: usize,
}

#[derive(Debug)]
pub struct JsonOutputter {
    pretty: bool,
}

impl JsonOutputter {
    pub fn configure(params: &mut Params) -> Result<Self> {
        Ok(Self {
            pretty: params.take_bool("pretty", true)?,
        })
    }
}

impl Outputter for JsonOutputter {
    fn render(&self, graph: &DependencyGraph) -> Result<String> {
        let report = Report {
            modules: graph.modules(),
            module_count: graph.module_count(),
            edge_count: graph.edge_count(),
        };
        let rendered = if self.pretty {
            serde_json::to_string_pretty(&report)?
        } else {
            serde_json::to_string(&report)?
        };
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build_graph;
    use std::fs;
    use tempfile::TempDir;

    fn render(params: &[(&str, &str)], source: &str) -> String {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.py");
        fs::write(&path, source).unwrap();
        let (graph, _) = build_graph(dir.path(), &[path]);
        let pairs: Vec<(String, String)> = params
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let mut p = Params::new(&pairs);
        JsonOutputter::configure(&mut p)
            .unwrap()
            .render(&graph)
            .unwrap()
    }

    #[test]
    fn test_output_parses_back() {
        let out = render(&[], "import os\nfrom util import x\n");
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["module_count"], 1);
        assert_eq!(value["edge_count"], 2);
        assert_eq!(value["modules"]["app"][0], "os");
        assert_eq!(value["modules"]["app"][1], "util.x");
    }

    #[test]
    fn test_pretty_by_default() {
        let out = render(&[], "import os\n");
        assert!(out.contains('\n'));
    }

    #[test]
    fn test_compact_with_pretty_false() {
        let out = render(&[("pretty", "false")], "import os\n");
        assert!(!out.contains('\n'));
    }
}
