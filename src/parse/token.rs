use logos::{Lexer, Logos};
use strum::Display;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Default, Error)]
pub enum LexerError {
    #[default]
    #[error("unknown token")]
    UnknownToken,
}

#[derive(Debug, Clone, PartialEq, Logos, Display)]
#[logos(skip r"[ \t\r\n\f]+", error = LexerError)]
pub enum Token<'a> {
    #[token("&&")]
    #[strum(serialize = "&&")]
    And,
    #[token("||")]
    #[strum(serialize = "||")]
    Or,
    #[token(";")]
    #[strum(serialize = ";")]
    Semi,
    #[token("&")]
    #[strum(serialize = "&")]
    Amp,
    #[token("|")]
    #[strum(serialize = "|")]
    Pipe,
    #[token("<")]
    #[strum(serialize = "<")]
    Read,
    #[token(">")]
    #[strum(serialize = ">")]
    Write,
    #[token(">>")]
    #[strum(serialize = ">>")]
    Append,
    #[token("2>")]
    #[strum(serialize = "2>")]
    ErrWrite,
    #[token("2>>")]
    #[strum(serialize = "2>>")]
    ErrAppend,
    #[token("&>")]
    #[strum(serialize = "&>")]
    BothWrite,
    #[token("&>>")]
    #[strum(serialize = "&>>")]
    BothAppend,

    #[regex(r##"[^ \t\r\n\f;&|<>'"#][^ \t\r\n\f;&|<>'"]*"##)]
    Bare(&'a str),
    #[regex(r#""([^"\\]|\\.)*""#, quoted_str_callback)]
    DoubleQuotedString(&'a str),
    #[regex(r"'[^']*'", quoted_str_callback)]
    SingleQuotedString(&'a str),
    #[regex(r"#[^\n]*")]
    Comment(&'a str),
}

impl Token<'_> {
    pub fn is_redirect(&self) -> bool {
        matches!(
            self,
            Self::Read
                | Self::Write
                | Self::Append
                | Self::ErrWrite
                | Self::ErrAppend
                | Self::BothWrite
                | Self::BothAppend
        )
    }

    pub fn is_word(&self) -> bool {
        matches!(
            self,
            Self::Bare(_) | Self::DoubleQuotedString(_) | Self::SingleQuotedString(_)
        )
    }
}

// strips the surrounding quotes; escapes are resolved when building words
fn quoted_str_callback<'a>(lex: &mut Lexer<'a, Token<'a>>) -> &'a str {
    let slice = lex.slice();
    &slice[1..slice.len() - 1]
}
