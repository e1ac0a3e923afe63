//! Syntax highlighting for formatted snippets.
//!
//! Reuses the printer's tokenizer and splits the result into lines of
//! classified spans. Text the tokenizer rejects (like the Prisma schema) is
//! returned as plain lines.

use crate::printer::lexer::{tokenize, Token, TokenKind};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenClass {
    Plain,
    Keyword,
    Literal,
    Function,
    String,
    Number,
    Comment,
    Punctuation,
}

impl TokenClass {
    /// CSS class used by the generated page
    pub fn css_class(self) -> &'static str {
        match self {
            TokenClass::Plain => "tok-plain",
            TokenClass::Keyword => "tok-kw",
            TokenClass::Literal => "tok-lit",
            TokenClass::Function => "tok-fn",
            TokenClass::String => "tok-str",
            TokenClass::Number => "tok-num",
            TokenClass::Comment => "tok-com",
            TokenClass::Punctuation => "tok-punct",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Span {
    pub class: TokenClass,
    pub text: String,
}

pub type HighlightedLine = Vec<Span>;

const KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "case", "catch", "class", "const", "continue", "default",
    "delete", "do", "else", "enum", "export", "extends", "finally", "for", "from", "function",
    "if", "import", "in", "instanceof", "interface", "let", "new", "of", "return", "switch",
    "throw", "try", "type", "typeof", "var", "void", "while", "yield",
];

const LITERALS: &[&str] = &["true", "false", "null", "undefined", "this"];

pub fn highlight(source: &str) -> Vec<HighlightedLine> {
    let mut lines = vec![Vec::new()];
    match tokenize(source) {
        Ok(tokens) => {
            let mut pos = 0;
            for (i, tok) in tokens.iter().enumerate() {
                push(&mut lines, TokenClass::Plain, &source[pos..tok.start]);
                push(&mut lines, classify(tok, tokens.get(i + 1)), tok.text);
                pos = tok.end();
            }
            push(&mut lines, TokenClass::Plain, &source[pos..]);
        }
        Err(_) => push(&mut lines, TokenClass::Plain, source),
    }
    lines
}

fn classify(tok: &Token<'_>, next: Option<&Token<'_>>) -> TokenClass {
    match tok.kind {
        TokenKind::Word if KEYWORDS.contains(&tok.text) => TokenClass::Keyword,
        TokenKind::Word if LITERALS.contains(&tok.text) => TokenClass::Literal,
        TokenKind::Word if next.map_or(false, |n| n.is_punct("(") && !n.space_before) => {
            TokenClass::Function
        }
        TokenKind::Word => TokenClass::Plain,
        TokenKind::Number => TokenClass::Number,
        TokenKind::Str | TokenKind::Template | TokenKind::Regex => TokenClass::String,
        TokenKind::LineComment | TokenKind::BlockComment => TokenClass::Comment,
        TokenKind::Punct => TokenClass::Punctuation,
    }
}

fn push(lines: &mut Vec<HighlightedLine>, class: TokenClass, text: &str) {
    for (i, part) in text.split('\n').enumerate() {
        if i > 0 {
            lines.push(Vec::new());
        }
        if part.is_empty() {
            continue;
        }
        if let Some(line) = lines.last_mut() {
            match line.last_mut() {
                Some(span) if span.class == class => span.text.push_str(part),
                _ => line.push(Span {
                    class,
                    text: part.to_string(),
                }),
            }
        }
    }
}

/// Concatenated text of a line
pub fn line_text(line: &[Span]) -> String {
    line.iter().map(|span| span.text.as_str()).collect()
}
