use std::ops::Range;

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Tok {
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[token("==")]
    EqEq,
    #[token("!=")]
    BangEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,
    #[token("^=")]
    CaretEq,
    #[token("$=")]
    DollarEq,
    #[token("*=")]
    StarEq,
    #[token("=~")]
    EqTilde,
    #[token("!~")]
    BangTilde,

    #[token("!")]
    Bang,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("and")]
    KwAnd,
    #[token("or")]
    KwOr,
    #[token("not")]
    KwNot,

    #[token("true")]
    KwTrue,
    #[token("false")]
    KwFalse,
    #[token("null")]
    KwNull,

    #[regex(r"-?[0-9]+")]
    Int,
    #[regex(r"-?[0-9]+\.[0-9]+(?:[eE][+-]?[0-9]+)?")]
    Float,
    #[regex(r#""(?:[^"\\]|\\.)*""#)]
    #[regex(r"'(?:[^'\\]|\\.)*'")]
    Str,

    #[regex(r"[A-Za-z_][A-Za-z0-9_\-]*")]
    Ident,

    #[token("(")]
    ParenOpen,
    #[token(")")]
    ParenClose,
    #[token("[")]
    BracketOpen,
    #[token("]")]
    BracketClose,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
}

impl Tok {
    pub(super) fn describe(self) -> &'static str {
        match self {
            Self::Whitespace => "whitespace",
            Self::EqEq => "`==`",
            Self::BangEq => "`!=`",
            Self::Lt => "`<`",
            Self::LtEq => "`<=`",
            Self::Gt => "`>`",
            Self::GtEq => "`>=`",
            Self::CaretEq => "`^=`",
            Self::DollarEq => "`$=`",
            Self::StarEq => "`*=`",
            Self::EqTilde => "`=~`",
            Self::BangTilde => "`!~`",
            Self::Bang => "`!`",
            Self::AmpAmp => "`&&`",
            Self::PipePipe => "`||`",
            Self::KwAnd => "`and`",
            Self::KwOr => "`or`",
            Self::KwNot => "`not`",
            Self::KwTrue => "`true`",
            Self::KwFalse => "`false`",
            Self::KwNull => "`null`",
            Self::Int => "integer",
            Self::Float => "float",
            Self::Str => "string",
            Self::Ident => "identifier",
            Self::ParenOpen => "`(`",
            Self::ParenClose => "`)`",
            Self::BracketOpen => "`[`",
            Self::BracketClose => "`]`",
            Self::Comma => "`,`",
            Self::Dot => "`.`",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Lexeme {
    pub kind: Tok,
    pub span: Range<usize>,
}

/// Tokens without whitespace, or the offset of the first unrecognized character.
pub(super) fn lex(source: &str) -> Result<Vec<Lexeme>, usize> {
    let mut lexer = Tok::lexer(source);
    let mut out = Vec::new();
    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(Tok::Whitespace) => {}
            Ok(kind) => out.push(Lexeme { kind, span }),
            Err(()) => return Err(span.start),
        }
    }
    Ok(out)
}

/// Inner text of a quoted string token with escapes resolved.
pub(super) fn unescape(quoted: &str) -> String {
    let inner = &quoted[1..quoted.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}
