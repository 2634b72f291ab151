/*
    x86_dasm
    Copyright 2022-2025 Daniel Balsom
    https://github.com/dbalsom/marty_dasm

    Permission is hereby granted, free of charge, to any person obtaining a
    copy of this software and associated documentation files (the “Software”),
    to deal in the Software without restriction, including without limitation
    the rights to use, copy, modify, merge, publish, distribute, sublicense,
    and/or sell copies of the Software, and to permit persons to whom the
    Software is furnished to do so, subject to the following conditions:

    The above copyright notice and this permission notice shall be included in
    all copies or substantial portions of the Software.

    THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
    IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
    FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
    AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
    LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
    FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
    DEALINGS IN THE SOFTWARE.
*/

//! Token sink for translated text.
//!
//! A [TokenStream] keeps what a translator wrote as typed tokens, so a front end can colour
//! registers, immediates and branch targets without re-parsing the text. Joining the tokens
//! always reproduces the plain `String` rendering exactly.

use std::fmt::{Display, Formatter, Result as FmtResult};

use super::FormatterOutput;

/// Marker trait for all tokens; requires Display for rendering to text.
pub trait Token: Display {}

/// Tokens carrying instruction content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SemanticToken {
    Mnemonic(String),
    Register(String),
    Immediate(String),
    Displacement(String),
    /// A branch target address, or the symbol it resolved to.
    Pointer(String),
    Prefix(String),
    /// A resolved symbol name or other operand text.
    Operand(String),
}

impl SemanticToken {
    pub fn text(&self) -> &str {
        match self {
            SemanticToken::Mnemonic(s)
            | SemanticToken::Register(s)
            | SemanticToken::Immediate(s)
            | SemanticToken::Displacement(s)
            | SemanticToken::Pointer(s)
            | SemanticToken::Prefix(s)
            | SemanticToken::Operand(s) => s,
        }
    }
}

impl Display for SemanticToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.text())
    }
}
impl Token for SemanticToken {}

/// Punctuation and layout around the semantic tokens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecoratorToken {
    OpenBracket,
    CloseBracket,
    OpenParen,
    CloseParen,
    Plus,
    Minus,
    Multiply,
    Comma,
    Colon,
    /// AT&T operand marks: `%` before a register, `$` before an immediate.
    Sigil(char),
    Whitespace(String),
    Text(String),
    Number(String),
}

impl DecoratorToken {
    fn from_separator(s: &str) -> Self {
        match s {
            "[" => DecoratorToken::OpenBracket,
            "]" => DecoratorToken::CloseBracket,
            "(" => DecoratorToken::OpenParen,
            ")" => DecoratorToken::CloseParen,
            "," => DecoratorToken::Comma,
            ":" => DecoratorToken::Colon,
            ws if ws.trim().is_empty() => DecoratorToken::Whitespace(ws.to_string()),
            num if num.chars().all(|c| c.is_ascii_hexdigit()) => DecoratorToken::Number(num.to_string()),
            other => DecoratorToken::Text(other.to_string()),
        }
    }

    fn from_symbol(s: &str) -> Self {
        match s {
            "+" => DecoratorToken::Plus,
            "-" => DecoratorToken::Minus,
            "*" => DecoratorToken::Multiply,
            "%" => DecoratorToken::Sigil('%'),
            "$" => DecoratorToken::Sigil('$'),
            other => DecoratorToken::Text(other.to_string()),
        }
    }
}

impl Display for DecoratorToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let s = match self {
            DecoratorToken::OpenBracket => "[",
            DecoratorToken::CloseBracket => "]",
            DecoratorToken::OpenParen => "(",
            DecoratorToken::CloseParen => ")",
            DecoratorToken::Plus => "+",
            DecoratorToken::Minus => "-",
            DecoratorToken::Multiply => "*",
            DecoratorToken::Comma => ",",
            DecoratorToken::Colon => ":",
            DecoratorToken::Sigil(c) => return write!(f, "{}", c),
            DecoratorToken::Whitespace(s) | DecoratorToken::Text(s) | DecoratorToken::Number(s) => s.as_str(),
        };
        f.write_str(s)
    }
}
impl Token for DecoratorToken {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenItem {
    Semantic(SemanticToken),
    Decorator(DecoratorToken),
}

impl From<SemanticToken> for TokenItem {
    fn from(token: SemanticToken) -> Self {
        TokenItem::Semantic(token)
    }
}

impl From<DecoratorToken> for TokenItem {
    fn from(token: DecoratorToken) -> Self {
        TokenItem::Decorator(token)
    }
}

impl Display for TokenItem {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            TokenItem::Semantic(t) => Display::fmt(t, f),
            TokenItem::Decorator(t) => Display::fmt(t, f),
        }
    }
}
impl Token for TokenItem {}

#[derive(Default, Debug)]
pub struct TokenStream {
    pub tokens: Vec<TokenItem>,
}

impl TokenStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TokenItem> {
        self.tokens.iter()
    }

    /// Only the tokens with instruction content, in order.
    pub fn semantic(&self) -> impl Iterator<Item = &SemanticToken> {
        self.tokens.iter().filter_map(|t| match t {
            TokenItem::Semantic(s) => Some(s),
            TokenItem::Decorator(_) => None,
        })
    }

    /// Joins every token back into the plain rendering.
    pub fn to_string_flat(&self) -> String {
        self.tokens.iter().map(|t| t.to_string()).collect()
    }

    pub fn ws(&mut self) {
        self.push(DecoratorToken::Whitespace(" ".into()));
    }

    pub fn clear(&mut self) {
        self.tokens.clear();
    }

    fn push(&mut self, token: impl Into<TokenItem>) {
        self.tokens.push(token.into());
    }
}

impl FormatterOutput for TokenStream {
    fn write_text(&mut self, s: &str) {
        self.push(DecoratorToken::Text(s.to_string()));
    }

    fn write_prefix(&mut self, s: &str) {
        self.push(SemanticToken::Prefix(s.to_string()));
    }

    fn write_register(&mut self, s: &str) {
        self.push(SemanticToken::Register(s.to_string()));
    }

    fn write_mnemonic(&mut self, s: &str) {
        self.push(SemanticToken::Mnemonic(s.to_string()));
    }

    fn write_operand(&mut self, s: &str) {
        self.push(SemanticToken::Operand(s.to_string()));
    }

    fn write_immediate(&mut self, s: &str) {
        self.push(SemanticToken::Immediate(s.to_string()));
    }

    fn write_relative(&mut self, s: &str) {
        self.push(SemanticToken::Pointer(s.to_string()));
    }

    fn write_displacement(&mut self, s: &str) {
        self.push(SemanticToken::Displacement(s.to_string()));
    }

    fn write_separator(&mut self, s: &str) {
        self.push(DecoratorToken::from_separator(s));
    }

    fn write_symbol(&mut self, s: &str) {
        self.push(DecoratorToken::from_symbol(s));
    }

    fn write_error(&mut self) {
        self.push(SemanticToken::Mnemonic("invalid".into()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cpu_common::{ArchitectureMode, Vendor},
        decode::decode_one,
        translator::{AttTranslator, IntelTranslator, Translate},
    };

    fn tokens<T: Translate>(t: &T, bytes: &[u8]) -> TokenStream {
        let inst = decode_one(bytes, ArchitectureMode::Bits32, Vendor::Any, 0);
        let mut ts = TokenStream::new();
        t.format_instruction(&inst, &mut ts);
        assert_eq!(ts.to_string_flat(), t.translate(&inst));
        ts
    }

    #[test]
    fn intel_tokens() {
        let ts = tokens(&IntelTranslator::new(), &[0x8B, 0x44, 0x88, 0x10]);
        assert_eq!(ts.to_string_flat(), "mov eax, [eax+ecx*4+0x10]");

        let registers: Vec<_> = ts
            .semantic()
            .filter(|t| matches!(t, SemanticToken::Register(_)))
            .map(|t| t.text())
            .collect();
        assert_eq!(registers, ["eax", "eax", "ecx"]);
        assert_eq!(ts.tokens[0], TokenItem::Semantic(SemanticToken::Mnemonic("mov".into())));
        assert!(ts.iter().any(|t| *t == TokenItem::Decorator(DecoratorToken::OpenBracket)));
        assert!(ts.iter().any(|t| *t == TokenItem::Decorator(DecoratorToken::Multiply)));
        assert!(ts.semantic().any(|t| *t == SemanticToken::Displacement("0x10".into())));
    }

    #[test]
    fn att_sigils_are_decorators() {
        let ts = tokens(&AttTranslator::new(), &[0x8B, 0x44, 0x88, 0x10]);
        assert_eq!(ts.to_string_flat(), "movl 0x10(%eax,%ecx,4), %eax");
        let sigils = ts.iter().filter(|t| **t == TokenItem::Decorator(DecoratorToken::Sigil('%'))).count();
        assert_eq!(sigils, 3);
        assert!(ts.semantic().any(|t| *t == SemanticToken::Register("ecx".into())));
        assert!(ts.iter().any(|t| *t == TokenItem::Decorator(DecoratorToken::OpenParen)));

        let ts = tokens(&AttTranslator::new(), &[0xB8, 0x34, 0x12, 0x00, 0x00]);
        assert_eq!(ts.tokens[2], TokenItem::Decorator(DecoratorToken::Sigil('$')));
        assert_eq!(ts.tokens[3], TokenItem::Semantic(SemanticToken::Immediate("0x1234".into())));
    }

    #[test]
    fn att_tokens_and_targets() {
        let ts = tokens(&AttTranslator::new(), &[0xE8, 0x00, 0x10, 0x00, 0x00]);
        assert_eq!(ts.to_string_flat(), "call 0x1005");
        assert_eq!(ts.tokens.last(), Some(&TokenItem::Semantic(SemanticToken::Pointer("0x1005".into()))));
    }

    #[test]
    fn invalid_is_a_mnemonic_token() {
        let mut ts = tokens(&IntelTranslator::new(), &[0x8C, 0x38]);
        assert_eq!(ts.tokens, vec![TokenItem::Semantic(SemanticToken::Mnemonic("invalid".into()))]);
        ts.clear();
        ts.ws();
        assert_eq!(ts.to_string_flat(), " ");
    }
}
