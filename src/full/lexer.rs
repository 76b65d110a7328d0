//! Full lexer
//!
//! Tokenizes the complete statement language: type keywords, control
//! keywords, literals, every operator and punctuation token, identifiers and
//! the two marker keywords. Whitespace and comments are skipped.
//!
//! Unlike the structural lexer this one is strict: a character that starts
//! no token is a [`LexicalError`].
//!
//! `<<` and `>>` are deliberately absent. A shift is two adjacent `<` or `>`
//! tokens, which keeps `List<List<int>>` free of token splitting. The
//! compound assignments `<<=` and `>>=` are single tokens.

use crate::ast::PrimitiveType;
use crate::error::LexicalError;
use crate::source::{LineIndex, Span};
use crate::token::{Delimiter, Token, TokenKind};
use logos::{Filter, Logos};
use tracing::trace;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"//[^\r\n]*")]
pub enum FullKind {
    // Type keywords
    #[token("bool")]
    Bool,
    #[token("char")]
    Char,
    #[token("float")]
    Float,
    #[token("float32")]
    Float32,
    #[token("float64")]
    Float64,
    #[token("int")]
    Int,
    #[token("int8")]
    Int8,
    #[token("int16")]
    Int16,
    #[token("int32")]
    Int32,
    #[token("int64")]
    Int64,
    #[token("uint")]
    UInt,
    #[token("uint8")]
    UInt8,
    #[token("uint16")]
    UInt16,
    #[token("uint32")]
    UInt32,
    #[token("uint64")]
    UInt64,
    #[token("string")]
    Str,

    // Control keywords
    #[token("break")]
    Break,
    #[token("case")]
    Case,
    #[token("default")]
    Default,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("switch")]
    Switch,

    // Literals
    #[regex(r"[0-9][0-9_]*([uU][lL]?|[lL])?")]
    #[regex(r"0[xX][0-9a-fA-F][0-9a-fA-F_]*([uU][lL]?|[lL])?")]
    #[regex(r"0[bB][01][01_]*([uU][lL]?|[lL])?")]
    IntegerLiteral,
    #[regex(r"[0-9][0-9_]*\.[0-9][0-9_]*([eE][+-]?[0-9]+)?[fFdDmM]?")]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9]+[fFdDmM]?")]
    #[regex(r"[0-9][0-9_]*[fFdDmM]")]
    FloatLiteral,
    #[token("true")]
    #[token("false")]
    BooleanLiteral,
    #[regex(r"'([^'\\\r\n]|\\[^\r\n])'")]
    CharLiteral,
    #[regex(r#""([^"\\\r\n]|\\[^\r\n])*""#)]
    StringLiteral,
    #[token("null")]
    NullLiteral,

    // Markers
    #[token("@node")]
    NodeMarker,
    #[token("@sig")]
    SignalMarker,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Identifier,

    // Punctuation
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token("[")]
    LeftBracket,
    #[token("]")]
    RightBracket,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token(":")]
    Colon,
    #[token("::")]
    ColonColon,

    // Assignment
    #[token("=")]
    Assign,
    #[token("+=")]
    PlusAssign,
    #[token("-=")]
    MinusAssign,
    #[token("*=")]
    StarAssign,
    #[token("/=")]
    SlashAssign,
    #[token("&=")]
    AmpAssign,
    #[token("|=")]
    PipeAssign,
    #[token("^=")]
    CaretAssign,
    #[token("%=")]
    PercentAssign,
    #[token("<<=")]
    ShlAssign,
    #[token(">>=")]
    ShrAssign,

    // Operators
    #[token(">")]
    Gt,
    #[token("<")]
    Lt,
    #[token("==")]
    EqEq,
    #[token("<=")]
    Le,
    #[token(">=")]
    Ge,
    #[token("!=")]
    NotEq,
    #[token("!")]
    Bang,
    #[token("~")]
    Tilde,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("?")]
    Question,

    /// `/*` with no matching `*/`; turned into a [`LexicalError`]. A closed
    /// block comment is skipped.
    #[token("/*", skip_block_comment)]
    UnterminatedComment,

    Eof,
}

impl FullKind {
    pub fn primitive(self) -> Option<PrimitiveType> {
        let primitive = match self {
            FullKind::Bool => PrimitiveType::Bool,
            FullKind::Char => PrimitiveType::Char,
            FullKind::Float => PrimitiveType::Float,
            FullKind::Float32 => PrimitiveType::Float32,
            FullKind::Float64 => PrimitiveType::Float64,
            FullKind::Int => PrimitiveType::Int,
            FullKind::Int8 => PrimitiveType::Int8,
            FullKind::Int16 => PrimitiveType::Int16,
            FullKind::Int32 => PrimitiveType::Int32,
            FullKind::Int64 => PrimitiveType::Int64,
            FullKind::UInt => PrimitiveType::UInt,
            FullKind::UInt8 => PrimitiveType::UInt8,
            FullKind::UInt16 => PrimitiveType::UInt16,
            FullKind::UInt32 => PrimitiveType::UInt32,
            FullKind::UInt64 => PrimitiveType::UInt64,
            FullKind::Str => PrimitiveType::String,
            _ => return None,
        };
        Some(primitive)
    }

    pub fn is_literal(self) -> bool {
        matches!(
            self,
            FullKind::IntegerLiteral
                | FullKind::FloatLiteral
                | FullKind::BooleanLiteral
                | FullKind::CharLiteral
                | FullKind::StringLiteral
                | FullKind::NullLiteral
                | FullKind::NodeMarker
                | FullKind::SignalMarker
        )
    }
}

impl TokenKind for FullKind {
    const EOF: Self = FullKind::Eof;

    fn delimiter(self) -> Delimiter {
        match self {
            FullKind::Lt => Delimiter::Lt,
            FullKind::Gt => Delimiter::Gt,
            FullKind::Minus => Delimiter::Dash,
            FullKind::Comma => Delimiter::Comma,
            FullKind::Identifier => Delimiter::Identifier,
            FullKind::Eof => Delimiter::Eof,
            _ => Delimiter::Other,
        }
    }

    fn describe(self) -> &'static str {
        use FullKind::*;
        match self {
            Bool | Char | Float | Float32 | Float64 | Int | Int8 | Int16 | Int32 | Int64
            | UInt | UInt8 | UInt16 | UInt32 | UInt64 | Str => "type",
            Break => "'break'",
            Case => "'case'",
            Default => "'default'",
            If => "'if'",
            Else => "'else'",
            Switch => "'switch'",
            IntegerLiteral | FloatLiteral | BooleanLiteral | CharLiteral | StringLiteral
            | NullLiteral | NodeMarker | SignalMarker => "literal",
            Identifier => "identifier",
            LeftParen => "'('",
            RightParen => "')'",
            LeftBrace => "'{'",
            RightBrace => "'}'",
            LeftBracket => "'['",
            RightBracket => "']'",
            Semicolon => "';'",
            Comma => "','",
            Dot => "'.'",
            Colon => "':'",
            ColonColon => "'::'",
            Assign => "'='",
            PlusAssign => "'+='",
            MinusAssign => "'-='",
            StarAssign => "'*='",
            SlashAssign => "'/='",
            AmpAssign => "'&='",
            PipeAssign => "'|='",
            CaretAssign => "'^='",
            PercentAssign => "'%='",
            ShlAssign => "'<<='",
            ShrAssign => "'>>='",
            Gt => "'>'",
            Lt => "'<'",
            EqEq => "'=='",
            Le => "'<='",
            Ge => "'>='",
            NotEq => "'!='",
            Bang => "'!'",
            Tilde => "'~'",
            Amp => "'&'",
            Pipe => "'|'",
            Caret => "'^'",
            AmpAmp => "'&&'",
            PipePipe => "'||'",
            PlusPlus => "'++'",
            MinusMinus => "'--'",
            Plus => "'+'",
            Minus => "'-'",
            Star => "'*'",
            Slash => "'/'",
            Percent => "'%'",
            Question => "'?'",
            UnterminatedComment => "comment",
            Eof => "end of input",
        }
    }
}

fn skip_block_comment(lex: &mut logos::Lexer<FullKind>) -> Filter<()> {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            Filter::Skip
        }
        None => Filter::Emit(()),
    }
}

/// Tokenize `source`, failing on the first unrecognised character or
/// unterminated block comment.
pub fn tokenize(source: &str) -> Result<Vec<Token<'_, FullKind>>, LexicalError> {
    let (tokens, mut errors) = lex(source, true);
    if errors.is_empty() {
        Ok(tokens)
    } else {
        Err(errors.remove(0))
    }
}

/// Tokenize `source`, skipping what cannot be lexed and returning every
/// error alongside the tokens that could be produced.
pub fn tokenize_collecting(source: &str) -> (Vec<Token<'_, FullKind>>, Vec<LexicalError>) {
    lex(source, false)
}

fn lex(source: &str, stop_at_first: bool) -> (Vec<Token<'_, FullKind>>, Vec<LexicalError>) {
    let lines = LineIndex::new(source);
    let mut lexer = FullKind::lexer(source);
    let mut tokens = Vec::new();
    let mut errors = Vec::new();

    while let Some(result) = lexer.next() {
        let span: Span = lexer.span().into();
        let text = lexer.slice();
        let location = lines.location(span.start);

        let error = match result {
            Ok(FullKind::UnterminatedComment) => LexicalError::UnterminatedComment { location },
            Ok(kind) => {
                tokens.push(Token::new(kind, text, span));
                continue;
            }
            Err(()) => LexicalError::UnexpectedCharacter {
                character: text.chars().next().unwrap_or('\0'),
                location,
            },
        };

        errors.push(error);
        if stop_at_first {
            break;
        }
        if matches!(errors.last(), Some(LexicalError::UnterminatedComment { .. })) {
            // The rest of the file is inside the comment.
            break;
        }
    }
    tokens.push(Token::eof(source.len()));

    trace!(
        tokens = tokens.len(),
        errors = errors.len(),
        "full tokenize"
    );
    (tokens, errors)
}
