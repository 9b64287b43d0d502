// Scopetab - A scoped symbol table for compiler front ends
// Copyright (C) 2026  Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Tokenization of command lines.
//!
//! A command line is a sequence of whitespace-separated words. Words keep
//! their byte spans so the driver can take the raw remainder of a line
//! (the type descriptor of an insert) without re-joining words.

use logos::Logos;

use crate::error::Span;

/// Token kinds on a command line.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\x0B\x0C]+")]
pub enum Token {
    /// Any run of non-whitespace characters.
    #[regex(r"[^ \t\r\n\x0B\x0C]+")]
    Word,
}

/// A word and where it sits in the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme<'a> {
    /// The word's text.
    pub text: &'a str,
    /// Byte range of the word.
    pub span: Span,
}

/// Split `text` into words.
pub fn words(text: &str) -> Vec<Lexeme<'_>> {
    Token::lexer(text)
        .spanned()
        .filter_map(|(token, range)| match token {
            Ok(Token::Word) => Some(Lexeme {
                text: &text[range.clone()],
                span: range.into(),
            }),
            Err(()) => None,
        })
        .collect()
}

/// The first word of `text`, without scanning the rest.
pub fn first_word(text: &str) -> Option<Lexeme<'_>> {
    Token::lexer(text)
        .spanned()
        .find_map(|(token, range)| match token {
            Ok(Token::Word) => Some(Lexeme {
                text: &text[range.clone()],
                span: range.into(),
            }),
            Err(()) => None,
        })
}
