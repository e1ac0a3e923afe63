//! Turns the delimiter tree into a layout document.
//!
//! Statements are separated by hard line breaks with at most one blank line
//! kept between them. Call arguments, parameters, arrays and objects become
//! groups that stay on one line when they fit and otherwise put one item per
//! line with a trailing comma. Long member chains break before each call.

use super::doc::Doc;
use super::lexer::{is_keyword, Token, TokenKind};
use super::tree::{Delim, Group, Node};

/// Keywords that cannot end a statement
const OPEN_KEYWORDS: &[&str] = &[
    "as", "async", "await", "case", "const", "default", "delete", "do", "else", "export",
    "extends", "finally", "from", "import", "in", "instanceof", "let", "new", "of", "satisfies",
    "throw", "try", "typeof", "var", "void", "yield",
];

/// Keywords that continue the statement on the previous line
const CONTINUATION_KEYWORDS: &[&str] = &[
    "as", "catch", "else", "extends", "finally", "in", "instanceof", "of", "satisfies",
];

/// Statements that end with a block take no semicolon
const BLOCK_STATEMENTS: &[&str] = &[
    "if", "for", "while", "switch", "try", "function", "class", "interface", "enum",
];

/// Lay out a whole program.
pub fn program(nodes: &[Node<'_>]) -> Doc {
    statements(nodes)
}

struct Statement<'n, 'a> {
    nodes: &'n [Node<'a>],
    blank_before: bool,
    trailing: Option<&'n Token<'a>>,
}

impl Statement<'_, '_> {
    fn is_comment(&self) -> bool {
        matches!(self.nodes, [node] if node.is_comment())
    }
}

fn statements(nodes: &[Node<'_>]) -> Doc {
    join_lines(&split_statements(nodes), statement)
}

/// One statement per line, keeping single blank lines
fn join_lines(stmts: &[Statement<'_, '_>], render: fn(&Statement<'_, '_>) -> Doc) -> Doc {
    let mut parts = Vec::new();
    for (i, stmt) in stmts.iter().enumerate() {
        if i > 0 {
            parts.push(Doc::HardLine);
            if stmt.blank_before {
                parts.push(Doc::HardLine);
            }
        }
        parts.push(render(stmt));
    }
    Doc::concat(parts)
}

fn split_statements<'n, 'a>(nodes: &'n [Node<'a>]) -> Vec<Statement<'n, 'a>> {
    let mut out: Vec<Statement<'n, 'a>> = Vec::new();
    let mut start = 0;

    for (i, node) in nodes.iter().enumerate() {
        if node.is_punct(";") {
            push_statement(&mut out, &nodes[start..i]);
            start = i + 1;
        } else if let Some(tok) = node.token().filter(|t| t.is_comment()) {
            let own_line = tok.newlines_before > 0;
            let line_comment = tok.kind == TokenKind::LineComment;
            if line_comment && !own_line && i > start {
                push_statement(&mut out, &nodes[start..i]);
                if let Some(last) = out.last_mut() {
                    last.trailing = Some(tok);
                }
                start = i + 1;
            } else if line_comment && !own_line && can_take_trailing(&out) {
                if let Some(last) = out.last_mut() {
                    last.trailing = Some(tok);
                }
                start = i + 1;
            } else if own_line || i == start {
                push_statement(&mut out, &nodes[start..i]);
                push_statement(&mut out, &nodes[i..i + 1]);
                start = i + 1;
            }
        } else if i > start && node.newlines_before() > 0 && ends_statement(&nodes[i - 1], node) {
            push_statement(&mut out, &nodes[start..i]);
            start = i;
        }
    }
    push_statement(&mut out, &nodes[start..]);
    out
}

fn push_statement<'n, 'a>(out: &mut Vec<Statement<'n, 'a>>, nodes: &'n [Node<'a>]) {
    if let Some(first) = nodes.first() {
        out.push(Statement {
            nodes,
            blank_before: !out.is_empty() && first.newlines_before() >= 2,
            trailing: None,
        });
    }
}

fn can_take_trailing(out: &[Statement<'_, '_>]) -> bool {
    out.last()
        .map_or(false, |last| last.trailing.is_none() && !last.is_comment())
}

/// Whether a line break between `prev` and `next` ends the statement
fn ends_statement(prev: &Node<'_>, next: &Node<'_>) -> bool {
    let prev_open = match prev {
        Node::Tok(tok) => match tok.kind {
            TokenKind::Punct => !matches!(tok.text, "++" | "--"),
            TokenKind::Word => OPEN_KEYWORDS.contains(&tok.text),
            _ => false,
        },
        Node::Group(_) => false,
    };
    if prev_open {
        return false;
    }

    match next {
        Node::Tok(tok) => match tok.kind {
            TokenKind::Punct => matches!(tok.text, "!" | "~" | "++" | "--" | "..."),
            TokenKind::Word => !CONTINUATION_KEYWORDS.contains(&tok.text),
            _ => true,
        },
        Node::Group(group) => !(group.delim == Delim::Brace && prev.is_group(Delim::Paren)),
    }
}

fn statement(stmt: &Statement<'_, '_>) -> Doc {
    terminated(stmt, needs_semicolon(stmt.nodes))
}

fn terminated(stmt: &Statement<'_, '_>, semicolon: bool) -> Doc {
    if stmt.is_comment() {
        if let Some(tok) = stmt.nodes[0].token() {
            return comment(tok);
        }
    }

    let mut parts = vec![sequence(stmt.nodes, Ctx::Statement)];
    if semicolon {
        parts.push(Doc::text(";"));
    }
    if let Some(tok) = stmt.trailing {
        parts.push(Doc::text(" "));
        parts.push(comment(tok));
    }
    Doc::concat(parts)
}

fn comment(tok: &Token<'_>) -> Doc {
    Doc::text(tok.text.trim_end())
}

fn needs_semicolon(nodes: &[Node<'_>]) -> bool {
    match nodes.last() {
        Some(last) if last.is_group(Delim::Brace) => {}
        _ => return true,
    }
    // Skip statement labels such as `outer:`
    let mut nodes = nodes;
    while let [label, colon, rest @ ..] = nodes {
        let labels_statement = label.word().is_some()
            && colon.is_punct(":")
            && rest.first().and_then(Node::word).is_some();
        if !labels_statement {
            break;
        }
        nodes = rest;
    }
    if nodes.len() == 1 {
        return false;
    }
    let head = nodes
        .iter()
        .map_while(Node::word)
        .find(|w| !matches!(*w, "export" | "default" | "async" | "declare"));
    !matches!(head, Some(w) if BLOCK_STATEMENTS.contains(&w))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ctx {
    /// First piece may open a block
    Statement,
    Expression,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece {
    Start,
    Word,
    Keyword,
    /// A closed group or other complete operand
    Value,
    /// Call arguments, index or type arguments glued to the operand before
    Attached,
    Op,
    Arrow,
    Colon,
    Dot,
    Prefix,
    Postfix,
    Comma,
    Semi,
    Comment,
}

fn ends_operand(piece: Piece) -> bool {
    matches!(
        piece,
        Piece::Word | Piece::Value | Piece::Attached | Piece::Postfix
    )
}

fn space_between(prev: Piece, cur: Piece) -> bool {
    match (prev, cur) {
        (Piece::Start, _) => false,
        (
            _,
            Piece::Comma
            | Piece::Semi
            | Piece::Colon
            | Piece::Postfix
            | Piece::Dot
            | Piece::Attached,
        ) => false,
        (Piece::Dot | Piece::Prefix, _) => false,
        _ => true,
    }
}

fn sequence(nodes: &[Node<'_>], ctx: Ctx) -> Doc {
    if let Some((question, colon)) = find_ternary(nodes) {
        return Doc::group(Doc::concat(vec![
            sequence(&nodes[..question], ctx),
            Doc::indent(Doc::concat(vec![
                Doc::Line,
                Doc::text("? "),
                sequence(&nodes[question + 1..colon], Ctx::Expression),
                Doc::Line,
                Doc::text(": "),
                sequence(&nodes[colon + 1..], Ctx::Expression),
            ])),
        ]));
    }

    let mut seq = Sequence {
        parts: Vec::new(),
        prev: Piece::Start,
        prev_word: None,
        ctx,
        ternaries: 0,
        pending_body: None,
    };
    let mut i = 0;
    while i < nodes.len() {
        i = seq.push_node(nodes, i);
    }
    Doc::concat(seq.parts)
}

/// Top-level `?` and its matching `:`, unless an arrow comes first
fn find_ternary(nodes: &[Node<'_>]) -> Option<(usize, usize)> {
    let question = nodes
        .iter()
        .position(|n| n.is_punct("?") || n.is_punct("=>"))?;
    if question == 0 || !nodes[question].is_punct("?") {
        return None;
    }

    let mut depth = 0usize;
    for (j, node) in nodes.iter().enumerate().skip(question + 1) {
        if node.is_punct("?") {
            depth += 1;
        } else if node.is_punct(":") {
            if depth == 0 {
                return (j > question + 1).then_some((question, j));
            }
            depth -= 1;
        }
    }
    None
}

struct Sequence<'a> {
    parts: Vec<Doc>,
    prev: Piece,
    prev_word: Option<&'a str>,
    ctx: Ctx,
    ternaries: usize,
    /// A `class` or `switch` keyword whose body has not been seen yet
    pending_body: Option<Body>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Body {
    Class,
    Switch,
}

impl<'a> Sequence<'a> {
    fn emit(&mut self, piece: Piece, doc: Doc) {
        if space_between(self.prev, piece) {
            self.parts.push(Doc::text(" "));
        }
        self.parts.push(doc);
        self.prev = piece;
        self.prev_word = None;
    }

    /// Lay out the node at `i` and return the index of the next one
    fn push_node(&mut self, nodes: &[Node<'a>], i: usize) -> usize {
        if self.prev != Piece::Dot && !ends_operand(self.prev) {
            if let Some((doc, end)) = member_chain(nodes, i) {
                self.emit(Piece::Value, doc);
                return end;
            }
        }

        match &nodes[i] {
            Node::Tok(tok) => self.push_token(nodes, i, tok),
            Node::Group(group) => {
                self.push_group(nodes, i, group);
                i + 1
            }
        }
    }

    fn push_token(&mut self, nodes: &[Node<'a>], i: usize, tok: &Token<'a>) -> usize {
        match tok.kind {
            TokenKind::LineComment => {
                self.emit(Piece::Comment, comment(tok));
                self.parts.push(Doc::HardLine);
                self.prev = Piece::Start;
            }
            TokenKind::BlockComment => self.emit(Piece::Comment, comment(tok)),
            TokenKind::Word if self.prev == Piece::Dot => {
                self.emit(Piece::Word, Doc::text(tok.text));
            }
            TokenKind::Word if is_keyword(tok.text) => {
                self.emit(Piece::Keyword, Doc::text(tok.text));
                self.prev_word = Some(tok.text);
                let is_key = nodes.get(i + 1).map_or(false, |n| n.is_punct(":"));
                match tok.text {
                    "class" if !is_key => self.pending_body = Some(Body::Class),
                    "switch" if !is_key => self.pending_body = Some(Body::Switch),
                    _ => {}
                }
            }
            TokenKind::Word if nodes.get(i + 1).map_or(false, |n| n.is_punct("=>")) => {
                self.emit(Piece::Value, Doc::text(format!("({})", tok.text)));
            }
            TokenKind::Word | TokenKind::Number | TokenKind::Template | TokenKind::Regex => {
                self.emit(Piece::Word, Doc::text(tok.text));
            }
            TokenKind::Str => self.emit(Piece::Word, Doc::text(normalize_quotes(tok.text))),
            TokenKind::Punct => return self.push_punct(nodes, i, tok.text),
        }
        i + 1
    }

    fn push_punct(&mut self, nodes: &[Node<'a>], i: usize, text: &str) -> usize {
        let after_operand = ends_operand(self.prev);
        let piece = match text {
            "." | "?." => Piece::Dot,
            "," => Piece::Comma,
            ";" => Piece::Semi,
            "..." => Piece::Prefix,
            "!" | "++" | "--" if after_operand => Piece::Postfix,
            "!" | "~" | "++" | "--" => Piece::Prefix,
            "+" | "-" if !after_operand => Piece::Prefix,
            "?" => {
                self.ternaries += 1;
                Piece::Op
            }
            ":" if self.ternaries > 0 => {
                self.ternaries -= 1;
                Piece::Op
            }
            ":" => Piece::Colon,
            "=>" => return self.push_arrow(nodes, i),
            _ => Piece::Op,
        };
        self.emit(piece, Doc::text(text));
        i + 1
    }

    fn push_arrow(&mut self, nodes: &[Node<'a>], i: usize) -> usize {
        self.emit(Piece::Arrow, Doc::text("=>"));
        let body = &nodes[i + 1..];
        let inline_body = match body {
            [] => true,
            [node] => node.group().is_some(),
            [first, ..] => first.is_group(Delim::Brace),
        };
        if inline_body {
            return i + 1;
        }

        self.parts.push(Doc::group(Doc::indent(Doc::concat(vec![
            Doc::Line,
            sequence(body, Ctx::Expression),
        ]))));
        self.prev = Piece::Value;
        nodes.len()
    }

    fn push_group(&mut self, nodes: &[Node<'a>], i: usize, group: &Group<'a>) {
        let after_operand = ends_operand(self.prev);
        let (piece, doc) = match group.delim {
            Delim::Paren if nodes.get(i + 1).map_or(false, |n| n.is_punct("=>")) => {
                (Piece::Value, delimited(group, false))
            }
            Delim::Paren if after_operand => (Piece::Attached, call_arguments(group)),
            Delim::Paren => (Piece::Value, parenthesized(group)),
            Delim::Bracket if after_operand && !group.open.space_before => (
                Piece::Attached,
                Doc::concat(vec![
                    Doc::text("["),
                    sequence(&group.children, Ctx::Expression),
                    Doc::text("]"),
                ]),
            ),
            Delim::Bracket => (Piece::Value, delimited(group, false)),
            Delim::Angle => (Piece::Attached, type_arguments(group)),
            Delim::Brace if self.pending_body.is_some() => match self.pending_body.take() {
                Some(Body::Switch) => (Piece::Value, switch_body(group)),
                _ => (Piece::Value, class_body(group)),
            },
            Delim::Brace if self.opens_block() => (Piece::Value, block(group)),
            Delim::Brace => (Piece::Value, delimited(group, true)),
        };
        self.emit(piece, doc);
    }

    fn opens_block(&self) -> bool {
        match self.prev {
            Piece::Start => self.ctx == Ctx::Statement,
            Piece::Arrow | Piece::Value | Piece::Attached => true,
            Piece::Keyword => matches!(self.prev_word, Some("else" | "try" | "finally" | "do")),
            _ => false,
        }
    }
}

fn block(group: &Group<'_>) -> Doc {
    if group.children.is_empty() {
        return Doc::text("{}");
    }
    Doc::concat(vec![
        Doc::text("{"),
        Doc::indent(Doc::concat(vec![Doc::HardLine, statements(&group.children)])),
        Doc::HardLine,
        Doc::text("}"),
    ])
}

/// Class members, one per line. Methods end at their body; fields and
/// arrow-function properties take a semicolon.
fn class_body(group: &Group<'_>) -> Doc {
    if group.children.is_empty() {
        return Doc::text("{}");
    }
    Doc::concat(vec![
        Doc::text("{"),
        Doc::indent(Doc::concat(vec![
            Doc::HardLine,
            join_lines(&split_members(&group.children), member),
        ])),
        Doc::HardLine,
        Doc::text("}"),
    ])
}

/// Statements, further split after every top-level brace group
fn split_members<'n, 'a>(nodes: &'n [Node<'a>]) -> Vec<Statement<'n, 'a>> {
    let mut out = Vec::new();
    for stmt in split_statements(nodes) {
        let nodes = stmt.nodes;
        let mut start = 0;
        for (i, node) in nodes.iter().enumerate() {
            if node.is_group(Delim::Brace) && i + 1 < nodes.len() {
                out.push(Statement {
                    nodes: &nodes[start..=i],
                    blank_before: start == 0 && stmt.blank_before,
                    trailing: None,
                });
                start = i + 1;
            }
        }
        out.push(Statement {
            nodes: &nodes[start..],
            blank_before: start == 0 && stmt.blank_before,
            trailing: stmt.trailing,
        });
    }
    out
}

fn member(stmt: &Statement<'_, '_>) -> Doc {
    let method = stmt.nodes.last().map_or(false, |n| n.is_group(Delim::Brace))
        && !stmt.nodes.iter().any(|n| n.is_punct("="));
    terminated(stmt, !method)
}

struct Clause<'n, 'a> {
    /// `case x` or `default`, without the colon
    label: Option<&'n [Node<'a>]>,
    blank_before: bool,
    /// Comment after a label with nothing else on its line
    trailing: Option<&'n Token<'a>>,
    body: Vec<Statement<'n, 'a>>,
}

/// `case` and `default` labels with their statements indented below them
fn switch_body(group: &Group<'_>) -> Doc {
    if group.children.is_empty() {
        return Doc::text("{}");
    }

    let mut clauses: Vec<Clause<'_, '_>> = Vec::new();
    for stmt in split_statements(&group.children) {
        let mut rest = stmt.nodes;
        let mut blank_before = stmt.blank_before;
        while let Some(colon) = label_end(rest) {
            let (label, after) = (&rest[..colon], &rest[colon + 1..]);
            clauses.push(Clause {
                label: Some(label),
                blank_before,
                trailing: if after.is_empty() { stmt.trailing } else { None },
                body: Vec::new(),
            });
            rest = after;
            blank_before = false;
        }
        if rest.is_empty() {
            continue;
        }
        let body = Statement {
            nodes: rest,
            blank_before,
            trailing: stmt.trailing,
        };
        match clauses.last_mut() {
            Some(clause) => clause.body.push(body),
            None => clauses.push(Clause {
                label: None,
                blank_before,
                trailing: None,
                body: vec![body],
            }),
        }
    }

    let mut parts = Vec::new();
    for (i, clause) in clauses.iter().enumerate() {
        if i > 0 {
            parts.push(Doc::HardLine);
            if clause.blank_before {
                parts.push(Doc::HardLine);
            }
        }
        match clause.label {
            Some(label) => {
                parts.push(sequence(label, Ctx::Expression));
                parts.push(Doc::text(":"));
                if let Some(tok) = clause.trailing {
                    parts.push(Doc::text(" "));
                    parts.push(comment(tok));
                }
                if !clause.body.is_empty() {
                    parts.push(Doc::indent(Doc::concat(vec![
                        Doc::HardLine,
                        join_lines(&clause.body, statement),
                    ])));
                }
            }
            None => parts.push(join_lines(&clause.body, statement)),
        }
    }

    Doc::concat(vec![
        Doc::text("{"),
        Doc::indent(Doc::concat(vec![Doc::HardLine, Doc::concat(parts)])),
        Doc::HardLine,
        Doc::text("}"),
    ])
}

/// Index of the colon closing a leading `case …:` or `default:` label
fn label_end(nodes: &[Node<'_>]) -> Option<usize> {
    match nodes.first().and_then(Node::word) {
        Some("default") if nodes.get(1).map_or(false, |n| n.is_punct(":")) => Some(1),
        Some("case") => nodes.iter().skip(2).position(|n| n.is_punct(":")).map(|p| p + 2),
        _ => None,
    }
}

fn split_items<'n, 'a>(nodes: &'n [Node<'a>]) -> Vec<&'n [Node<'a>]> {
    let mut items = Vec::new();
    let mut start = 0;
    for (i, node) in nodes.iter().enumerate() {
        if node.is_punct(",") {
            items.push(&nodes[start..i]);
            start = i + 1;
        }
    }
    if start < nodes.len() {
        items.push(&nodes[start..]);
    }
    items
}

/// Comma-separated items inside `group`'s delimiters. Objects are `spaced`
/// and keep a line break the source put after the opening brace.
fn delimited(group: &Group<'_>, spaced: bool) -> Doc {
    let mut items = split_items(&group.children);
    let trailing: Vec<&Token<'_>> = if items
        .last()
        .map_or(false, |last| last.iter().all(Node::is_comment))
    {
        items
            .pop()
            .map(|last| last.iter().filter_map(Node::token).collect())
            .unwrap_or_default()
    } else {
        Vec::new()
    };

    let (open, close) = (group.delim.open(), group.delim.close());
    if items.is_empty() && trailing.is_empty() {
        return Doc::text(format!("{}{}", open, close));
    }

    let line = if spaced { Doc::Line } else { Doc::SoftLine };
    let mut inner = vec![line.clone()];
    if !items.is_empty() {
        let docs = items
            .iter()
            .map(|item| sequence(item, Ctx::Expression))
            .collect();
        inner.push(Doc::join(
            docs,
            Doc::concat(vec![Doc::text(","), Doc::Line]),
        ));
        inner.push(Doc::if_break(Doc::text(",")));
    }
    for (k, tok) in trailing.iter().enumerate() {
        if k > 0 || !items.is_empty() {
            inner.push(Doc::HardLine);
        }
        inner.push(comment(tok));
    }

    let doc = Doc::concat(vec![
        Doc::text(open),
        Doc::indent(Doc::concat(inner)),
        line,
        Doc::text(close),
    ]);
    if (spaced && group.broken) || !trailing.is_empty() {
        Doc::broken_group(doc)
    } else {
        Doc::group(doc)
    }
}

fn call_arguments(group: &Group<'_>) -> Doc {
    let items = split_items(&group.children);
    if !hugs_last_argument(&items) {
        return delimited(group, false);
    }

    let docs = items
        .iter()
        .map(|item| sequence(item, Ctx::Expression))
        .collect();
    Doc::concat(vec![
        Doc::text("("),
        Doc::join(docs, Doc::text(", ")),
        Doc::text(")"),
    ])
}

/// The last argument is an object, array or function and nothing before it is
fn hugs_last_argument(items: &[&[Node<'_>]]) -> bool {
    let Some((last, rest)) = items.split_last() else {
        return false;
    };
    let last_huggable = match last {
        [node] => node.is_group(Delim::Brace) || node.is_group(Delim::Bracket),
        _ => is_arrow_function(last),
    };
    last_huggable
        && rest.iter().all(|item| !is_compound(item))
        && !items.iter().any(|item| item.iter().any(Node::is_comment))
}

fn is_arrow_function(item: &[Node<'_>]) -> bool {
    item.iter().any(|n| n.is_punct("=>"))
}

fn is_compound(item: &[Node<'_>]) -> bool {
    item.iter().any(|n| {
        n.is_punct("=>")
            || n.is_group(Delim::Bracket)
            || n.group()
                .map_or(false, |g| g.delim == Delim::Brace && !g.children.is_empty())
    })
}

fn parenthesized(group: &Group<'_>) -> Doc {
    if split_items(&group.children).len() > 1 {
        return delimited(group, false);
    }
    Doc::concat(vec![
        Doc::text("("),
        sequence(&group.children, Ctx::Expression),
        Doc::text(")"),
    ])
}

fn type_arguments(group: &Group<'_>) -> Doc {
    let docs = split_items(&group.children)
        .iter()
        .map(|item| sequence(item, Ctx::Expression))
        .collect();
    Doc::concat(vec![
        Doc::text("<"),
        Doc::join(docs, Doc::text(", ")),
        Doc::text(">"),
    ])
}

fn normalize_quotes(raw: &str) -> String {
    if raw.len() >= 2 && raw.starts_with('\'') {
        let inner = &raw[1..raw.len() - 1];
        if !inner.contains('"') && !inner.contains('\\') {
            return format!("\"{}\"", inner);
        }
    }
    raw.to_string()
}

fn is_member_access(nodes: &[Node<'_>], at: usize) -> bool {
    nodes
        .get(at)
        .map_or(false, |n| n.is_punct(".") || n.is_punct("?."))
        && nodes.get(at + 1).and_then(Node::word).is_some()
}

fn contains_broken_brace(node: &Node<'_>) -> bool {
    match node {
        Node::Group(group) => {
            (group.delim == Delim::Brace && group.broken)
                || group.children.iter().any(contains_broken_brace)
        }
        Node::Tok(_) => false,
    }
}

/// Lay out `a.b.c().d().e()` with one call per line when it has more than
/// two calls after its head. Returns the document and the index after the chain.
fn member_chain(nodes: &[Node<'_>], start: usize) -> Option<(Doc, usize)> {
    let head_ok = match &nodes[start] {
        Node::Tok(tok) => tok.kind == TokenKind::Word && !is_keyword(tok.text),
        Node::Group(group) => group.delim == Delim::Paren,
    };
    if !head_ok {
        return None;
    }

    let mut end = start + 1;
    let mut dots = Vec::new();
    loop {
        if is_member_access(nodes, end) {
            dots.push(end);
            end += 2;
            continue;
        }
        match nodes.get(end) {
            Some(Node::Group(g)) if g.delim != Delim::Brace && !g.open.space_before => end += 1,
            _ => break,
        }
    }
    if dots.len() < 3 {
        return None;
    }

    // Segment k runs from dots[k] to the next dot or the chain's end
    let segment_end = |k: usize| dots.get(k + 1).copied().unwrap_or(end);
    let is_call = |k: usize| nodes[dots[k]..segment_end(k)].iter().any(|n| n.is_group(Delim::Paren));

    // The head absorbs plain members that are followed by another member
    let mut head_len = 0;
    while head_len < dots.len() && !is_call(head_len) && segment_end(head_len) != end {
        head_len += 1;
    }
    let head_end = dots.get(head_len).copied().unwrap_or(end);
    let rest = head_len..dots.len();
    if rest.len() <= 2 {
        return None;
    }

    let calls: Vec<&Group<'_>> = nodes[start..end]
        .iter()
        .filter_map(Node::group)
        .filter(|g| g.delim == Delim::Paren)
        .collect();
    let complex_arguments = calls
        .iter()
        .any(|g| split_items(&g.children).iter().any(|item| is_compound(item)));
    let early_break = rest
        .clone()
        .take(rest.len() - 1)
        .any(|k| nodes[dots[k]..segment_end(k)].iter().any(contains_broken_brace));
    let forced = (calls.len() > 2 && complex_arguments) || early_break;

    let segments = rest
        .map(|k| {
            Doc::concat(vec![
                Doc::SoftLine,
                sequence(&nodes[dots[k]..segment_end(k)], Ctx::Expression),
            ])
        })
        .collect();
    let doc = Doc::concat(vec![
        sequence(&nodes[start..head_end], Ctx::Expression),
        Doc::indent(Doc::concat(segments)),
    ]);

    let doc = if forced {
        Doc::broken_group(doc)
    } else {
        Doc::group(doc)
    };
    Some((doc, end))
}
