//! Rejects token sequences that no valid statement contains, so the layout
//! never prints broken source as if it were fine.

use super::lexer::{is_keyword, Token, TokenKind};
use super::tree::Node;
use crate::error::{Result, VersusError};

/// Words that act as keywords in some positions, e.g. `static x` or
/// `x is string`
const CONTEXTUAL_KEYWORDS: &[&str] = &[
    "abstract", "accessor", "asserts", "declare", "enum", "get", "implements", "infer", "is",
    "keyof", "module", "namespace", "out", "override", "private", "protected", "public",
    "readonly", "set", "static", "unique", "using",
];

/// Operators that cannot end an expression
const BINARY_OPERATORS: &[&str] = &[
    "=", "==", "===", "!=", "!==", "<", ">", "<=", ">=", "+", "-", "*", "/", "%", "**", "&&",
    "||", "??", "&", "|", "^", "+=", "-=", "*=", "/=", "%=", "**=", "??=", "&&=", "||=", "|=",
    "&=", "^=", "=>", ".", "?.", "...",
];

/// Walk every delimiter level and fail on the first operator with nothing
/// after it or pair of operands with nothing between them.
pub fn check(nodes: &[Node<'_>]) -> Result<()> {
    let significant: Vec<&Node<'_>> = nodes.iter().filter(|n| !n.is_comment()).collect();

    for (i, node) in significant.iter().enumerate() {
        let next = significant.get(i + 1).copied();
        let tok = match node {
            Node::Group(group) => {
                check(&group.children)?;
                continue;
            }
            Node::Tok(tok) => tok,
        };

        if dangles(tok, next) {
            return Err(VersusError::syntax(
                tok.line,
                tok.column,
                format!("expected an expression after `{}`", tok.text),
            ));
        }
        if let Some(Node::Tok(next)) = next {
            if adjacent_operands(tok, next) {
                return Err(VersusError::syntax(
                    next.line,
                    next.column,
                    format!("unexpected `{}` after `{}`", next.text, tok.text),
                ));
            }
        }
    }
    Ok(())
}

fn dangles(tok: &Token<'_>, next: Option<&Node<'_>>) -> bool {
    tok.kind == TokenKind::Punct
        && BINARY_OPERATORS.contains(&tok.text)
        && next.map_or(true, |n| n.is_punct(";") || n.is_punct(","))
}

/// Two operands on one line. A template after an operand is a tagged
/// template, and a line break between them ends the statement.
fn adjacent_operands(prev: &Token<'_>, next: &Token<'_>) -> bool {
    next.newlines_before == 0
        && next.kind != TokenKind::Template
        && is_operand(prev)
        && is_operand(next)
}

fn is_operand(tok: &Token<'_>) -> bool {
    match tok.kind {
        TokenKind::Word => !is_keyword(tok.text) && !CONTEXTUAL_KEYWORDS.contains(&tok.text),
        TokenKind::Number | TokenKind::Str | TokenKind::Template | TokenKind::Regex => true,
        _ => false,
    }
}
