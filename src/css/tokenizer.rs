//! logos-based tokenizer for compiled CSS.
//!
//! This tokenizes at the node level rather than the value level: a block
//! comment is a single token with its text intact, quoted strings are atomic
//! (braces and semicolons inside them never count as structure), and any
//! other run of non-structural characters is a [`Token::Text`] chunk. Byte
//! spans are preserved so the parser can slice selectors and declaration
//! values out of the source with their original spacing.

use std::ops::Range;

use logos::Logos;

/// Token produced by the lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum Token {
    /// Block comment with its text intact: `/* ... */`.
    #[regex(r"/\*[^*]*\*+([^/*][^*]*\*+)*/")]
    Comment,

    /// Double-quoted string literal.
    #[regex(r#""([^"\\]|\\.)*""#)]
    DoubleQuoted,

    /// Single-quoted string literal.
    #[regex(r"'([^'\\]|\\.)*'")]
    SingleQuoted,

    /// `{`
    #[token("{")]
    BraceOpen,

    /// `}`
    #[token("}")]
    BraceClose,

    /// `;`
    #[token(";")]
    Semicolon,

    /// A `/` that does not start a comment.
    #[token("/")]
    Slash,

    /// Any other run of characters: selectors, properties, values.
    #[regex(r#"[^{};'"/ \t\n\r\f]+"#)]
    Text,
}

/// A token plus its byte span in the source.
#[derive(Debug, Clone)]
pub struct SpannedToken {
    pub token: Token,
    pub span: Range<usize>,
}

/// Tokenize `input`, keeping byte spans. Logos error tokens are skipped.
pub fn tokenize(input: &str) -> Vec<SpannedToken> {
    Token::lexer(input)
        .spanned()
        .filter_map(|(result, span)| result.ok().map(|token| SpannedToken { token, span }))
        .collect()
}
