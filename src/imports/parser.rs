//! Recursive-descent import parser.
//!
//! Consumes the token stream produced by [`super::lexer::tokenize`] and emits
//! one [`ParsedImport`] record per imported module, in source order and with
//! duplicates preserved.  Tokens that are not part of an import statement are
//! skipped without inspection.
//!
//! Grammar (the only part of Python this crate understands):
//!
//! ```text
//! import-stmt  = "import" dotted-name
//! from-stmt    = "from" ["."] dotted-name? "import" objects
//! objects      = dotted-name ("," dotted-name)*
//! dotted-name  = identifier ("." identifier)* | "*"
//! ```
//!
//! Two long-standing grammar limits are deliberate contract, not bugs:
//! only the first module of `import a, b` is recorded, and only a single
//! leading relative dot is recognised after `from`.
//!
//! Any grammar violation aborts the whole parse with a [`ParseError`] — there
//! is no statement-level recovery.  Callers decide what to do with a file
//! that fails (the binary warns and skips it).

use super::lexer::{LexedToken, Token};
use serde::Serialize;
use thiserror::Error;

// ── ParsedImport ──────────────────────────────────────────────────────────────

/// One import found in a source file.
///
/// `module_name` is the fully-qualified dotted name as written, with
/// `from X import y` resolved to `X.y`.  For a relative import the leading
/// dot is *not* part of the name; `relative` carries that bit instead, and
/// resolution against the importing package happens at graph level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedImport {
    pub module_name: String,
    pub relative: bool,
}

impl ParsedImport {
    pub fn absolute(module_name: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
            relative: false,
        }
    }

    pub fn relative(module_name: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
            relative: true,
        }
    }
}

// ── ParseError ────────────────────────────────────────────────────────────────

/// A fatal grammar violation inside an import statement.
///
/// Variants carry the byte offset of the offending token where one exists,
/// so callers can report line:column positions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unexpected end of tokens")]
    UnexpectedEnd,

    #[error("unexpected end of tokens after a trailing dot")]
    TrailingDot { offset: u32 },

    #[error("two consecutive dot operators in dotted identifier")]
    ConsecutiveDots { offset: u32 },

    #[error("dotted identifier must start with an identifier token")]
    ExpectedIdentifier { offset: u32 },

    #[error("module identifier should follow the 'from' keyword")]
    MissingRootModule { offset: u32 },

    #[error("'import' keyword should follow the root module name in a 'from' import, found `{found}`")]
    MissingImportKeyword { found: String, offset: u32 },

    #[error("'from' statement never imported any objects")]
    NoImportedObjects { offset: u32 },
}

impl ParseError {
    /// Byte offset of the offending token, if the error points at one.
    pub fn offset(&self) -> Option<u32> {
        match self {
            ParseError::UnexpectedEnd => None,
            ParseError::TrailingDot { offset }
            | ParseError::ConsecutiveDots { offset }
            | ParseError::ExpectedIdentifier { offset }
            | ParseError::MissingRootModule { offset }
            | ParseError::MissingImportKeyword { offset, .. }
            | ParseError::NoImportedObjects { offset } => Some(*offset),
        }
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Parse a token stream into the ordered list of imports it contains.
///
/// An empty stream yields an empty list.  The first grammar violation aborts
/// the whole call.
pub fn parse(tokens: &[LexedToken<'_>]) -> Result<Vec<ParsedImport>, ParseError> {
    if tokens.is_empty() {
        return Ok(Vec::new());
    }
    Parser::new(tokens).parse_module()
}

// ── Parser ────────────────────────────────────────────────────────────────────

struct Parser<'toks, 'src> {
    tokens: &'toks [LexedToken<'src>],
    index: usize,
    found: Vec<ParsedImport>,
}

impl<'toks, 'src> Parser<'toks, 'src> {
    fn new(tokens: &'toks [LexedToken<'src>]) -> Self {
        Self {
            tokens,
            index: 0,
            found: Vec::new(),
        }
    }

    fn current(&self) -> Option<LexedToken<'src>> {
        self.tokens.get(self.index).copied()
    }

    /// Offset of the current token, or of the end of the stream.
    fn here(&self) -> u32 {
        match self.current() {
            Some(t) => t.offset,
            None => self.tokens.last().map(|t| t.offset).unwrap_or(0),
        }
    }

    // ── Top-level scan ────────────────────────────────────────────────────────

    fn parse_module(mut self) -> Result<Vec<ParsedImport>, ParseError> {
        while let Some(tok) = self.current() {
            match tok.token {
                Token::Import => self.parse_import()?,
                Token::From => self.parse_from()?,
                // Ordinary code: advance without inspection.
                _ => self.index += 1,
            }
        }
        Ok(self.found)
    }

    // ── `import a.b.c` ────────────────────────────────────────────────────────

    /// Records only the first dotted name after `import`; a following
    /// `, second` is left for the outer scan, which skips it.
    fn parse_import(&mut self) -> Result<(), ParseError> {
        self.index += 1; // `import`
        match self.parse_dotted_identifier()? {
            Some(module_name) => {
                self.found.push(ParsedImport::absolute(module_name));
                Ok(())
            }
            None => Err(ParseError::ExpectedIdentifier { offset: self.here() }),
        }
    }

    // ── `from [.]root import a, b, *` ─────────────────────────────────────────

    fn parse_from(&mut self) -> Result<(), ParseError> {
        self.index += 1; // `from`

        // A single leading dot marks the import relative.  Anything else
        // leaves the cursor where it is and the import is absolute.
        let relative = match self.current().map(|t| t.token) {
            None => return Err(ParseError::UnexpectedEnd),
            Some(Token::Dot) => {
                self.index += 1;
                true
            }
            Some(_) => false,
        };

        // Root module name.  The pure-relative form `from . import x` has a
        // zero-length root; everywhere else a missing root is an error.
        let root = match self.parse_dotted_identifier()? {
            Some(name) => name,
            None if relative => String::new(),
            None => return Err(ParseError::MissingRootModule { offset: self.here() }),
        };

        let import_offset = match self.current() {
            None => return Err(ParseError::UnexpectedEnd),
            Some(LexedToken {
                token: Token::Import,
                offset,
            }) => {
                self.index += 1;
                offset
            }
            Some(tok) => {
                return Err(ParseError::MissingImportKeyword {
                    found: describe(&tok.token),
                    offset: tok.offset,
                });
            }
        };

        let objects = self.parse_imported_objects()?;
        if objects.is_empty() {
            return Err(ParseError::NoImportedObjects {
                offset: import_offset,
            });
        }

        // A wildcard anywhere in the list wins: the whole root module was
        // imported, and the named entries are discarded.
        if objects.iter().any(|o| o == "*") {
            self.found.push(ParsedImport {
                module_name: root,
                relative,
            });
        } else {
            for object in objects {
                let module_name = if root.is_empty() {
                    object
                } else {
                    format!("{root}.{object}")
                };
                self.found.push(ParsedImport {
                    module_name,
                    relative,
                });
            }
        }
        Ok(())
    }

    // ── dotted-name ───────────────────────────────────────────────────────────

    /// Parse `identifier ("." identifier)*`, or the wildcard `*`.
    ///
    /// Returns `Ok(None)` without consuming anything when the current token
    /// cannot begin a dotted name — the from-rule uses this to detect the
    /// zero-length root of `from . import x`.  The wildcard is returned as
    /// the literal `"*"` and is *not* consumed; the outer scan steps over it.
    fn parse_dotted_identifier(&mut self) -> Result<Option<String>, ParseError> {
        match self.current().map(|t| t.token) {
            None => return Err(ParseError::UnexpectedEnd),
            Some(Token::Star) => return Ok(Some("*".to_owned())),
            Some(Token::Identifier(_)) => {}
            Some(_) => return Ok(None),
        }

        let mut name = String::new();
        let mut want_dot = false;
        loop {
            let Some(tok) = self.current() else {
                if want_dot {
                    break;
                }
                // The stream ended right after a dot.
                return Err(ParseError::TrailingDot {
                    offset: self.tokens[self.index - 1].offset,
                });
            };
            match tok.token {
                Token::Identifier(s) if !want_dot => {
                    name.push_str(s);
                    want_dot = true;
                }
                Token::Dot if !want_dot => {
                    return Err(ParseError::ConsecutiveDots { offset: tok.offset });
                }
                Token::Dot => {
                    name.push('.');
                    want_dot = false;
                }
                // Two identifiers in a row, or any unrelated token: the
                // dotted name ends here.
                _ => break,
            }
            self.index += 1;
        }
        Ok(Some(name))
    }

    // ── imported-objects ──────────────────────────────────────────────────────

    /// Comma-separated dotted names, order preserved, duplicates permitted.
    fn parse_imported_objects(&mut self) -> Result<Vec<String>, ParseError> {
        let mut objects = Vec::new();
        match self.parse_dotted_identifier()? {
            Some(name) => objects.push(name),
            None => return Ok(objects),
        }
        while matches!(self.current().map(|t| t.token), Some(Token::Comma)) {
            self.index += 1; // `,`
            match self.parse_dotted_identifier()? {
                Some(name) => objects.push(name),
                None => {
                    return Err(ParseError::ExpectedIdentifier { offset: self.here() });
                }
            }
        }
        Ok(objects)
    }
}

/// Short human-readable description of a token for error messages.
fn describe(token: &Token<'_>) -> String {
    match token {
        Token::Identifier(s) => (*s).to_owned(),
        Token::Import => "import".to_owned(),
        Token::From => "from".to_owned(),
        Token::Dot => ".".to_owned(),
        Token::Comma => ",".to_owned(),
        Token::Star => "*".to_owned(),
        Token::Other(s) => (*s).to_owned(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
