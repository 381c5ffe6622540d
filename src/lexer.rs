use crate::errors::{ShellError, ShellResult};

/// Where a token's characters came from. Expansion passes are gated on
/// this: single-quoted text expands nothing, double-quoted text expands
/// variables but not patterns, unquoted text expands both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteOrigin {
    Unquoted,
    SingleQuoted,
    DoubleQuoted,
    Mixed,
}

impl QuoteOrigin {
    /// Quoted empty tokens survive expansion as empty arguments.
    pub fn is_quoted(self) -> bool {
        !matches!(self, QuoteOrigin::Unquoted)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Word,
    /// `|`, `>`, `>>`, `1>`, `1>>`, `2>`, `2>>`, emitted only when the
    /// characters were unquoted and unescaped.
    Operator,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub kind: TokenKind,
    pub origin: QuoteOrigin,
}

impl Token {
    pub fn word(text: impl Into<String>, origin: QuoteOrigin) -> Self {
        Token {
            text: text.into(),
            kind: TokenKind::Word,
            origin,
        }
    }

    fn operator(text: &str) -> Self {
        Token {
            text: text.to_string(),
            kind: TokenKind::Operator,
            origin: QuoteOrigin::Unquoted,
        }
    }

    pub fn is_operator(&self, text: &str) -> bool {
        self.kind == TokenKind::Operator && self.text == text
    }
}

struct Lexer {
    input: Vec<char>,
    pos: usize,
    buffer: String,
    // Per-token origin bookkeeping. The collected_* flags record where
    // actual characters came from; the quote flags record that a quote
    // pair was seen at all, so `''` still yields an (empty, quoted) token.
    collected_single: bool,
    collected_double: bool,
    collected_unquoted: bool,
    seen_single_quotes: bool,
    seen_double_quotes: bool,
}

impl Lexer {
    fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            pos: 0,
            buffer: String::new(),
            collected_single: false,
            collected_double: false,
            collected_unquoted: false,
            seen_single_quotes: false,
            seen_double_quotes: false,
        }
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.input.get(self.pos).copied();
        if ch.is_some() {
            self.pos += 1;
        }
        ch
    }

    fn peek_char(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn token_pending(&self) -> bool {
        !self.buffer.is_empty() || self.seen_single_quotes || self.seen_double_quotes
    }

    fn current_origin(&self) -> QuoteOrigin {
        match (
            self.collected_single,
            self.collected_double,
            self.collected_unquoted,
        ) {
            (true, false, false) => QuoteOrigin::SingleQuoted,
            (false, true, false) => QuoteOrigin::DoubleQuoted,
            (false, false, true) => QuoteOrigin::Unquoted,
            (false, false, false) => {
                // Empty quoted token such as '' or "".
                match (self.seen_single_quotes, self.seen_double_quotes) {
                    (true, false) => QuoteOrigin::SingleQuoted,
                    (false, true) => QuoteOrigin::DoubleQuoted,
                    _ => QuoteOrigin::Mixed,
                }
            }
            _ => QuoteOrigin::Mixed,
        }
    }

    fn finish_token(&mut self, out: &mut Vec<Token>) {
        if self.token_pending() {
            out.push(Token::word(std::mem::take(&mut self.buffer), self.current_origin()));
        }
        self.buffer.clear();
        self.collected_single = false;
        self.collected_double = false;
        self.collected_unquoted = false;
        self.seen_single_quotes = false;
        self.seen_double_quotes = false;
    }

    /// Whether the pending buffer is a lone unquoted fd digit that can fuse
    /// with a following `>` into `1>` / `2>`.
    fn buffer_is_fd_digit(&self) -> Option<char> {
        if self.collected_unquoted
            && !self.collected_single
            && !self.collected_double
            && !self.seen_single_quotes
            && !self.seen_double_quotes
            && (self.buffer == "1" || self.buffer == "2")
        {
            self.buffer.chars().next()
        } else {
            None
        }
    }

    fn lex(mut self) -> ShellResult<Vec<Token>> {
        let mut out = Vec::new();
        let mut in_single = false;
        let mut in_double = false;

        while let Some(ch) = self.next_char() {
            if in_single {
                if ch == '\'' {
                    in_single = false;
                    self.seen_single_quotes = true;
                } else {
                    self.buffer.push(ch);
                    self.collected_single = true;
                }
                continue;
            }

            if in_double {
                match ch {
                    '"' => {
                        in_double = false;
                        self.seen_double_quotes = true;
                    }
                    '\\' => match self.peek_char() {
                        Some(next @ ('"' | '\\' | '`' | '$' | '\n')) => {
                            self.next_char();
                            self.buffer.push(next);
                            self.collected_double = true;
                        }
                        _ => {
                            self.buffer.push('\\');
                            self.collected_double = true;
                        }
                    },
                    c => {
                        self.buffer.push(c);
                        self.collected_double = true;
                    }
                }
                continue;
            }

            match ch {
                '\'' => in_single = true,
                '"' => in_double = true,
                '\\' => match self.next_char() {
                    Some(next) => {
                        self.buffer.push(next);
                        self.collected_unquoted = true;
                    }
                    None => {
                        self.buffer.push('\\');
                        self.collected_unquoted = true;
                    }
                },
                ' ' | '\t' => self.finish_token(&mut out),
                '|' => {
                    self.finish_token(&mut out);
                    out.push(Token::operator("|"));
                }
                '>' => {
                    let fd = self.buffer_is_fd_digit();
                    if fd.is_some() {
                        // The digit fuses into the operator, not a word.
                        self.buffer.clear();
                        self.collected_unquoted = false;
                    } else {
                        self.finish_token(&mut out);
                    }
                    let append = self.peek_char() == Some('>');
                    if append {
                        self.next_char();
                    }
                    let op = match (fd, append) {
                        (Some('1'), false) => "1>",
                        (Some('1'), true) => "1>>",
                        (Some('2'), false) => "2>",
                        (Some('2'), true) => "2>>",
                        (None, false) => ">",
                        (None, true) => ">>",
                        _ => unreachable!(),
                    };
                    out.push(Token::operator(op));
                }
                c => {
                    self.buffer.push(c);
                    self.collected_unquoted = true;
                }
            }
        }

        if in_single || in_double {
            return Err(ShellError::UnterminatedQuote);
        }

        self.finish_token(&mut out);
        Ok(out)
    }
}

/// Tokenize one statement segment (no top-level `;`/`&&`/`||`).
pub fn tokenize(segment: &str) -> ShellResult<Vec<Token>> {
    Lexer::new(segment).lex()
}
