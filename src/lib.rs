//! moddep — map the import dependencies of a Python project.
//!
//! The pipeline: [`discovery`] finds the project's `.py` files, [`imports`]
//! extracts each file's import statements (lexer + recursive-descent parser),
//! [`graph`] resolves them into a module dependency graph, and [`output`]
//! renders the graph as text, JSON, or Graphviz dot.

pub mod discovery;
pub mod graph;
pub mod imports;
pub mod location;
pub mod output;
