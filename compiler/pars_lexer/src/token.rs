//! Cooked tokens handed to the parser.

use std::fmt;

use pars_ir::{Name, Span};

/// Token with its source span.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

/// Token kinds. Literals carry their interned or parsed payload.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    Int(i64),
    /// `f64::to_bits` of the literal.
    Float(u64),
    Str(Name),
    Ident(Name),
    /// Module path without the leading `@`.
    ModulePath(Name),

    // Keywords
    Let,
    Fn,
    If,
    Else,
    For,
    In,
    Return,
    Stop,
    Skip,
    Check,
    Try,
    Computed,
    Export,
    Import,
    True,
    False,
    Null,
    And,
    Or,
    Not,
    As,

    // Punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Colon,
    Semicolon,
    Ellipsis,
    Dot,

    // Operators
    EqEq,
    Eq,
    NotEq,
    LtEq,
    Lt,
    GtEq,
    Gt,
    PlusPlus,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Bang,
    AmpAmp,
    PipePipe,

    /// Statement separator.
    Newline,
    /// Unlexable input; the matching `LexError` is in [`LexOutput::errors`](crate::LexOutput).
    Error,
    Eof,
}

impl TokenKind {
    /// Human-readable name for parse errors.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Int(_) => "integer",
            TokenKind::Float(_) => "float",
            TokenKind::Str(_) => "string",
            TokenKind::Ident(_) => "identifier",
            TokenKind::ModulePath(_) => "module path",
            TokenKind::Let => "`let`",
            TokenKind::Fn => "`fn`",
            TokenKind::If => "`if`",
            TokenKind::Else => "`else`",
            TokenKind::For => "`for`",
            TokenKind::In => "`in`",
            TokenKind::Return => "`return`",
            TokenKind::Stop => "`stop`",
            TokenKind::Skip => "`skip`",
            TokenKind::Check => "`check`",
            TokenKind::Try => "`try`",
            TokenKind::Computed => "`computed`",
            TokenKind::Export => "`export`",
            TokenKind::Import => "`import`",
            TokenKind::True => "`true`",
            TokenKind::False => "`false`",
            TokenKind::Null => "`null`",
            TokenKind::And => "`and`",
            TokenKind::Or => "`or`",
            TokenKind::Not => "`not`",
            TokenKind::As => "`as`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::LBracket => "`[`",
            TokenKind::RBracket => "`]`",
            TokenKind::Comma => "`,`",
            TokenKind::Colon => "`:`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Ellipsis => "`...`",
            TokenKind::Dot => "`.`",
            TokenKind::EqEq => "`==`",
            TokenKind::Eq => "`=`",
            TokenKind::NotEq => "`!=`",
            TokenKind::LtEq => "`<=`",
            TokenKind::Lt => "`<`",
            TokenKind::GtEq => "`>=`",
            TokenKind::Gt => "`>`",
            TokenKind::PlusPlus => "`++`",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::Slash => "`/`",
            TokenKind::Percent => "`%`",
            TokenKind::Bang => "`!`",
            TokenKind::AmpAmp => "`&&`",
            TokenKind::PipePipe => "`||`",
            TokenKind::Newline => "newline",
            TokenKind::Error => "invalid token",
            TokenKind::Eof => "end of input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Token sequence ending in exactly one `Eof`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    pub fn new() -> Self {
        TokenList { tokens: Vec::new() }
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    /// Token at `index`, or the final token once past the end.
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index).or_else(|| self.tokens.last())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }
}

impl std::ops::Index<usize> for TokenList {
    type Output = Token;

    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
