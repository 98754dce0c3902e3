use clap::Parser;
use colored::Colorize;
use moddep::{discovery, graph, output};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(
    name = "moddep",
    about = "Fast Python module dependency mapper",
    version,
    long_about = "Moddep walks a Python project, extracts every import \
                  statement, and renders the resulting module dependency \
                  graph as text, JSON, or Graphviz dot."
)]
struct Cli {
    /// Project directory to map.
    project: PathBuf,

    /// Limit the graph to modules reachable within N imports of the
    /// project's top-level modules.
    #[arg(long, short = 'd')]
    depth: Option<usize>,

    /// Suppress warnings for files that could not be parsed.
    #[arg(long, short = 'q')]
    quiet: bool,

    /// Output format.
    #[arg(long, short = 'o', default_value = "text")]
    outputter: String,

    /// Outputter-specific parameter as key=value (repeatable, e.g.
    /// --param rankdir=LR --param external=false).
    #[arg(long = "param", value_name = "KEY=VALUE")]
    params: Vec<String>,

    /// Exclude files or directories whose path contains any of the given
    /// comma-separated names (e.g. --exclude tests,migrations).
    /// Hidden and virtualenv/cache directories are always excluded.
    #[arg(long, value_delimiter = ',')]
    exclude: Option<Vec<String>>,
}

fn main() {
    let cli = Cli::parse();

    if !cli.project.is_dir() {
        eprintln!(
            "{}: `{}` is not a directory",
            "error".red().bold(),
            cli.project.display()
        );
        process::exit(2);
    }

    let params = match parse_params(&cli.params) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{}: {e}", "error".red().bold());
            process::exit(2);
        }
    };

    // Resolve the outputter before touching any files.
    let outputter = match output::for_name(&cli.outputter, &params) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("{}: {e}", "error".red().bold());
            process::exit(2);
        }
    };

    // ── file discovery ────────────────────────────────────────────────────────
    let exclude: Vec<String> = cli.exclude.unwrap_or_default();
    let files = match discovery::discover_python_files(&cli.project, &exclude) {
        Ok(found) => found,
        Err(e) => {
            eprintln!("{}: {e}", "error".red().bold());
            process::exit(2);
        }
    };

    // ── graph assembly ────────────────────────────────────────────────────────
    let (mut dependency_graph, skipped) = graph::build_graph(&cli.project, &files);

    if !cli.quiet {
        for skip in &skipped {
            eprintln!("{}: skipped {skip}", "warning".yellow().bold());
        }
    }

    if let Some(limit) = cli.depth {
        dependency_graph.restrict_depth(limit);
    }

    // ── output ────────────────────────────────────────────────────────────────
    match outputter.render(&dependency_graph) {
        Ok(rendered) => print!("{rendered}"),
        Err(e) => {
            eprintln!("{}: {e}", "error".red().bold());
            process::exit(2);
        }
    }
}

/// Split each `--param` occurrence into a key/value pair.
fn parse_params(raw: &[String]) -> Result<Vec<(String, String)>, String> {
    let mut pairs = Vec::with_capacity(raw.len());
    for param in raw {
        match param.split_once('=') {
            Some((key, value)) if !key.is_empty() && !value.is_empty() => {
                pairs.push((key.to_owned(), value.to_owned()));
            }
            _ => {
                return Err(format!(
                    "parameter `{param}` is not of the form key=value"
                ));
            }
        }
    }
    Ok(pairs)
}
