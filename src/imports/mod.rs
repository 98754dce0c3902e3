//! Import extraction front end: lexer + recursive-descent parser.
//!
//! The analysis engine behind the dependency graph.  Feed it one file's
//! source text and get back the ordered list of modules that file imports,
//! with `from X import a, b, *` forms resolved to fully-qualified names and
//! relative imports flagged for later resolution.
//!
//! # Usage
//! ```
//! use moddep::imports::extract_imports;
//! let records = extract_imports("from pkg import util\n").unwrap();
//! assert_eq!(records[0].module_name, "pkg.util");
//! ```

pub mod lexer;
pub mod parser;

pub use lexer::{LexedToken, Token, tokenize};
pub use parser::{ParseError, ParsedImport, parse};

/// Tokenise and parse one source file's text in a single call.
pub fn extract_imports(source: &str) -> Result<Vec<ParsedImport>, ParseError> {
    parse(&tokenize(source))
}
