//! Zero-copy import lexer.
//!
//! Segments Python source into the flat token stream the import parser
//! consumes.  Only the constructs that matter for locating `import` /
//! `from ... import ...` statements are distinguished; everything else in
//! the file is reduced to [`Token::Identifier`] or [`Token::Other`] noise.
//!
//! Handles:
//! - Line comments (skipped)
//! - Triple-quoted strings, closed by the *same* quote style that opened them
//!   (skipped as one unit, embedded newlines included)
//! - Single-quoted strings on one logical line (skipped)
//! - The two keywords `import` and `from`
//! - `.`, `,`, `*` as dedicated tokens
//! - Identifier runs, including every Python keyword other than the two above
//!
//! Whitespace and newlines separate tokens but never produce them.  The lexer
//! does no grammar validation at all — that is the parser's job.

// ── Token ─────────────────────────────────────────────────────────────────────

/// One lexical unit of the import grammar.
///
/// A closed vocabulary: the parser dispatches exhaustively on these variants.
/// Payload slices borrow directly from the source buffer — no heap allocation
/// during tokenisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'src> {
    /// A name, including keywords the import grammar does not care about
    /// (`def`, `class`, `return`, ... all land here).
    Identifier(&'src str),
    /// The `import` keyword.
    Import,
    /// The `from` keyword.
    From,
    Dot,
    Comma,
    Star,
    /// Any other meaningful character: brackets, operators, digit runs, ...
    Other(&'src str),
}

/// A token plus the byte offset of its first character, so grammar errors
/// can be reported as line:column positions.
#[derive(Debug, Clone, Copy)]
pub struct LexedToken<'src> {
    pub token: Token<'src>,
    pub offset: u32,
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Tokenise Python source into the import token stream.
///
/// Pure function of the input: no state survives the call.  Empty input
/// yields an empty stream.
pub fn tokenize(source: &str) -> Vec<LexedToken<'_>> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    while let Some(tok) = lexer.next_token() {
        tokens.push(tok);
    }
    tokens
}

// ── Lexer ─────────────────────────────────────────────────────────────────────

struct Lexer<'src> {
    src: &'src [u8],
    /// The same source as a `&str` — used for safe UTF-8 slicing without `unsafe`.
    src_str: &'src str,
    pos: usize,
}

impl<'src> Lexer<'src> {
    fn new(source: &'src str) -> Self {
        Self {
            src: source.as_bytes(),
            src_str: source,
            pos: 0,
        }
    }

    /// Produce the next token, or `None` at end of input.
    fn next_token(&mut self) -> Option<LexedToken<'src>> {
        loop {
            let b = *self.src.get(self.pos)?;
            let start = self.pos;

            // ── Whitespace and newlines: separators only ──────────────────
            if b == b' ' || b == b'\t' || b == b'\r' || b == b'\n' {
                self.pos += 1;
                continue;
            }

            // ── Comment: `#` to end of line ───────────────────────────────
            if b == b'#' {
                while self.pos < self.src.len() && self.src[self.pos] != b'\n' {
                    self.pos += 1;
                }
                continue;
            }

            // ── String literals: skipped entirely ─────────────────────────
            if b == b'"' || b == b'\'' {
                self.skip_string(b);
                continue;
            }

            // ── Identifiers and the two keywords ──────────────────────────
            if b.is_ascii_alphabetic() || b == b'_' {
                return Some(self.lex_name(start));
            }

            // ── Digit runs collapse into a single `other` token ───────────
            if b.is_ascii_digit() {
                while self.pos < self.src.len() && self.src[self.pos].is_ascii_digit() {
                    self.pos += 1;
                }
                return Some(LexedToken {
                    token: Token::Other(&self.src_str[start..self.pos]),
                    offset: start as u32,
                });
            }

            // ── Punctuation the grammar distinguishes ─────────────────────
            let token = match b {
                b'.' => {
                    self.pos += 1;
                    Token::Dot
                }
                b',' => {
                    self.pos += 1;
                    Token::Comma
                }
                b'*' => {
                    self.pos += 1;
                    Token::Star
                }
                _ => {
                    // Anything else becomes one `other` token per character.
                    // Advance by the full UTF-8 char so slicing stays on a
                    // boundary for non-ASCII input.
                    let ch = self.src_str[self.pos..]
                        .chars()
                        .next()
                        .expect("pos is on a char boundary");
                    self.pos += ch.len_utf8();
                    Token::Other(&self.src_str[start..self.pos])
                }
            };
            return Some(LexedToken {
                token,
                offset: start as u32,
            });
        }
    }

    fn lex_name(&mut self, start: usize) -> LexedToken<'src> {
        while self.pos < self.src.len() {
            let b = self.src[self.pos];
            if b.is_ascii_alphanumeric() || b == b'_' {
                self.pos += 1;
            } else {
                break;
            }
        }
        // Only ASCII bytes were advanced over, so `start..pos` is always a
        // valid char-boundary slice.
        let s = &self.src_str[start..self.pos];
        let token = match s {
            "import" => Token::Import,
            "from" => Token::From,
            other => Token::Identifier(other),
        };
        LexedToken {
            token,
            offset: start as u32,
        }
    }

    /// Skip a string literal opening with quote byte `q` at the current
    /// position.
    ///
    /// A triple quote consumes everything (newlines included) up to the next
    /// triple of the *same* style; a differing quote style inside the string
    /// does not terminate it.  A single quote consumes to the matching quote
    /// or to the end of the line, whichever comes first.  Unterminated
    /// strings consume the rest of the input.
    fn skip_string(&mut self, q: u8) {
        let triple =
            self.src.get(self.pos + 1) == Some(&q) && self.src.get(self.pos + 2) == Some(&q);
        self.pos += if triple { 3 } else { 1 };

        if triple {
            while self.pos < self.src.len() {
                let b = self.src[self.pos];
                if b == b'\\' {
                    self.skip_escape();
                    continue;
                }
                if b == q
                    && self.src.get(self.pos + 1) == Some(&q)
                    && self.src.get(self.pos + 2) == Some(&q)
                {
                    self.pos += 3;
                    return;
                }
                self.pos += 1;
            }
        } else {
            while self.pos < self.src.len() {
                let b = self.src[self.pos];
                if b == b'\\' {
                    self.skip_escape();
                    continue;
                }
                if b == q {
                    self.pos += 1;
                    return;
                }
                if b == b'\n' {
                    return;
                }
                self.pos += 1;
            }
        }
    }

    /// Advance past a backslash escape inside a string literal.
    ///
    /// The escaped byte is only consumed when it is ASCII; a multi-byte char
    /// after the backslash is left for the surrounding scan so the cursor
    /// never lands inside a UTF-8 sequence.
    fn skip_escape(&mut self) {
        self.pos += 1;
        if self.pos < self.src.len() && self.src[self.pos].is_ascii() {
            self.pos += 1;
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
