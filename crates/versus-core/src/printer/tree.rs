//! Groups a token stream into a tree of balanced delimiters.

use super::lexer::{Token, TokenKind};
use crate::error::{Result, VersusError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delim {
    Paren,
    Bracket,
    Brace,
    /// Type arguments, e.g. `Doc<"users">`
    Angle,
}

impl Delim {
    fn from_open(text: &str) -> Option<Delim> {
        match text {
            "(" => Some(Delim::Paren),
            "[" => Some(Delim::Bracket),
            "{" => Some(Delim::Brace),
            _ => None,
        }
    }

    fn from_close(text: &str) -> Option<Delim> {
        match text {
            ")" => Some(Delim::Paren),
            "]" => Some(Delim::Bracket),
            "}" => Some(Delim::Brace),
            _ => None,
        }
    }

    pub fn open(self) -> &'static str {
        match self {
            Delim::Paren => "(",
            Delim::Bracket => "[",
            Delim::Brace => "{",
            Delim::Angle => "<",
        }
    }

    pub fn close(self) -> &'static str {
        match self {
            Delim::Paren => ")",
            Delim::Bracket => "]",
            Delim::Brace => "}",
            Delim::Angle => ">",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Group<'a> {
    pub delim: Delim,
    pub open: Token<'a>,
    pub children: Vec<Node<'a>>,
    /// The source had a line break right after the opening delimiter
    pub broken: bool,
}

#[derive(Debug, Clone)]
pub enum Node<'a> {
    Tok(Token<'a>),
    Group(Group<'a>),
}

impl<'a> Node<'a> {
    fn first_token(&self) -> &Token<'a> {
        match self {
            Node::Tok(tok) => tok,
            Node::Group(group) => &group.open,
        }
    }

    pub fn newlines_before(&self) -> usize {
        self.first_token().newlines_before
    }

    pub fn token(&self) -> Option<&Token<'a>> {
        match self {
            Node::Tok(tok) => Some(tok),
            Node::Group(_) => None,
        }
    }

    pub fn group(&self) -> Option<&Group<'a>> {
        match self {
            Node::Group(group) => Some(group),
            Node::Tok(_) => None,
        }
    }

    pub fn is_punct(&self, punct: &str) -> bool {
        self.token().map_or(false, |t| t.is_punct(punct))
    }

    pub fn word(&self) -> Option<&'a str> {
        match self {
            Node::Tok(tok) if tok.kind == TokenKind::Word => Some(tok.text),
            _ => None,
        }
    }

    pub fn is_comment(&self) -> bool {
        self.token().map_or(false, Token::is_comment)
    }

    pub fn is_group(&self, delim: Delim) -> bool {
        self.group().map_or(false, |g| g.delim == delim)
    }
}

struct Frame<'a> {
    delim: Delim,
    open: Token<'a>,
    children: Vec<Node<'a>>,
    broken: bool,
}

/// Deepest delimiter nesting accepted; layout recurses once per level
pub const MAX_DEPTH: usize = 128;

/// Build the delimiter tree, rejecting unbalanced input and nesting deeper
/// than [`MAX_DEPTH`].
pub fn build(tokens: Vec<Token<'_>>) -> Result<Vec<Node<'_>>> {
    let mut root: Vec<Node<'_>> = Vec::new();
    let mut stack: Vec<Frame<'_>> = Vec::new();

    for i in 0..tokens.len() {
        let tok = tokens[i].clone();
        let broken = tokens.get(i + 1).map_or(false, |next| {
            next.newlines_before > 0 && Delim::from_close(next.text).is_none()
        });

        if tok.kind == TokenKind::Punct {
            let angle = tok.text == "<" && opens_type_arguments(&tokens, i);
            if (angle || Delim::from_open(tok.text).is_some()) && stack.len() >= MAX_DEPTH {
                return Err(VersusError::syntax(
                    tok.line,
                    tok.column,
                    format!("nesting deeper than {} levels", MAX_DEPTH),
                ));
            }

            if let Some(delim) = Delim::from_open(tok.text) {
                stack.push(Frame {
                    delim,
                    open: tok,
                    children: Vec::new(),
                    broken,
                });
                continue;
            }

            if angle {
                stack.push(Frame {
                    delim: Delim::Angle,
                    open: tok,
                    children: Vec::new(),
                    broken: false,
                });
                continue;
            }

            let closes_angle =
                tok.text == ">" && stack.last().map_or(false, |f| f.delim == Delim::Angle);
            let closer = if closes_angle {
                Some(Delim::Angle)
            } else {
                Delim::from_close(tok.text)
            };

            if let Some(delim) = closer {
                let frame = match stack.pop() {
                    Some(frame) => frame,
                    None => {
                        return Err(VersusError::syntax(
                            tok.line,
                            tok.column,
                            format!("unexpected `{}`", tok.text),
                        ))
                    }
                };
                if frame.delim != delim {
                    return Err(VersusError::syntax(
                        tok.line,
                        tok.column,
                        format!(
                            "expected `{}` to close `{}` from {}:{}, found `{}`",
                            frame.delim.close(),
                            frame.delim.open(),
                            frame.open.line,
                            frame.open.column,
                            tok.text
                        ),
                    ));
                }
                let node = Node::Group(Group {
                    delim: frame.delim,
                    open: frame.open,
                    children: frame.children,
                    broken: frame.broken,
                });
                match stack.last_mut() {
                    Some(parent) => parent.children.push(node),
                    None => root.push(node),
                }
                continue;
            }
        }

        match stack.last_mut() {
            Some(frame) => frame.children.push(Node::Tok(tok)),
            None => root.push(Node::Tok(tok)),
        }
    }

    if let Some(frame) = stack.pop() {
        return Err(VersusError::syntax(
            frame.open.line,
            frame.open.column,
            format!("unclosed `{}`", frame.delim.open()),
        ));
    }

    Ok(root)
}

/// A `<` directly after an identifier starts type arguments when a matching
/// `>` follows with only type-like tokens in between.
fn opens_type_arguments(tokens: &[Token<'_>], at: usize) -> bool {
    if at == 0 || tokens[at - 1].kind != TokenKind::Word || tokens[at].space_before {
        return false;
    }

    let mut depth = 1usize;
    for tok in &tokens[at + 1..] {
        match tok.kind {
            TokenKind::Word | TokenKind::Str | TokenKind::Number => {}
            TokenKind::Punct => match tok.text {
                "<" => depth += 1,
                ">" => {
                    depth -= 1;
                    if depth == 0 {
                        return true;
                    }
                }
                "," | "|" | "&" | "." | "[" | "]" => {}
                _ => return false,
            },
            _ => return false,
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printer::lexer::tokenize;

    fn parse(src: &str) -> Result<Vec<Node<'_>>> {
        build(tokenize(src)?)
    }

    #[test]
    fn nests_groups() {
        let nodes = parse("f(a, [b, { c }])").unwrap();
        assert_eq!(nodes.len(), 2);
        let call = nodes[1].group().unwrap();
        assert_eq!(call.delim, Delim::Paren);
        assert_eq!(call.children.len(), 3);
        assert!(call.children[2].is_group(Delim::Bracket));
    }

    #[test]
    fn records_source_line_break_after_open() {
        let nodes = parse("x = {\n a: 1 }").unwrap();
        assert!(nodes[2].group().unwrap().broken);
        let nodes = parse("x = { a: 1\n }").unwrap();
        assert!(!nodes[2].group().unwrap().broken);
    }

    #[test]
    fn detects_type_arguments() {
        let nodes = parse(r#"const m = {} as Record<string, Doc<"users">[]>"#).unwrap();
        let last = nodes.last().unwrap().group().unwrap();
        assert_eq!(last.delim, Delim::Angle);
    }

    #[test]
    fn comparisons_stay_operators() {
        let nodes = parse("users.length > 3 && a < b").unwrap();
        assert!(nodes.iter().all(|n| n.group().is_none()));
    }

    #[test]
    fn rejects_nesting_past_the_limit() {
        let deep = format!("x = {}a{}", "(".repeat(2000), ")".repeat(2000));
        let err = parse(&deep).unwrap_err();
        assert!(matches!(
            err,
            VersusError::Syntax { line: 1, column, .. } if column == MAX_DEPTH + 5
        ));
        assert!(err.to_string().contains("nesting deeper than"));

        let at_limit = format!("{}a{}", "[".repeat(MAX_DEPTH), "]".repeat(MAX_DEPTH));
        assert!(parse(&at_limit).is_ok());
    }

    #[test]
    fn reports_mismatched_delimiters() {
        let err = parse("f(a]").unwrap_err();
        assert!(err.to_string().contains("expected `)`"));
        assert!(parse("f(a").unwrap_err().to_string().contains("unclosed `(`"));
        assert!(parse("a)").unwrap_err().to_string().contains("unexpected `)`"));
    }
}
