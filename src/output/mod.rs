//! Pluggable output formatting for the dependency graph.
//!
//! An outputter is selected by name on the command line (`--outputter dot`)
//! and configured through `--param key=value` pairs.  Every outputter
//! validates its own parameters; an unknown outputter name or a parameter no
//! outputter claims is an error, never silently ignored.

pub mod dot;
pub mod json;
pub mod text;

use crate::graph::DependencyGraph;
use anyhow::{Result, bail};
use std::collections::BTreeMap;

/// Renders a dependency graph into its final textual representation.
pub trait Outputter: std::fmt::Debug {
    fn render(&self, graph: &DependencyGraph) -> Result<String>;
}

/// Construct the outputter registered under `name`.
pub fn for_name(name: &str, params: &[(String, String)]) -> Result<Box<dyn Outputter>> {
    let mut params = Params::new(params);
    let outputter: Box<dyn Outputter> = match name {
        "text" => Box::new(text::TextOutputter::configure(&mut params)?),
        "json" => Box::new(json::JsonOutputter::configure(&mut params)?),
        "dot" => Box::new(dot::DotOutputter::configure(&mut params)?),
        other => bail!("unknown outputter `{other}` (available: text, json, dot)"),
    };
    params.finish(name)?;
    Ok(outputter)
}

// ── Params ────────────────────────────────────────────────────────────────────

/// Key/value parameters handed to an outputter, with consumption tracking.
///
/// Outputters `take` the keys they understand during configuration; anything
/// left over afterwards is a typo and fails the run.
pub struct Params {
    remaining: BTreeMap<String, String>,
}

impl Params {
    fn new(pairs: &[(String, String)]) -> Self {
        // Later occurrences of a key override earlier ones.
        let remaining = pairs.iter().cloned().collect();
        Self { remaining }
    }

    pub fn take(&mut self, key: &str) -> Option<String> {
        self.remaining.remove(key)
    }

    pub fn take_bool(&mut self, key: &str, default: bool) -> Result<bool> {
        match self.take(key) {
            None => Ok(default),
            Some(value) => match value.as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                other => bail!("parameter `{key}` expects true or false, got `{other}`"),
            },
        }
    }

    fn finish(self, outputter: &str) -> Result<()> {
        if let Some(key) = self.remaining.keys().next() {
            bail!("unknown parameter `{key}` for outputter `{outputter}`");
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
