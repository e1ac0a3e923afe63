//! Layout document and a Wadler-style printer for it.

use crate::config::INDENT_WIDTH;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Doc {
    Text(String),
    /// A space when flat, a newline when broken
    Line,
    /// Nothing when flat, a newline when broken
    SoftLine,
    /// Always a newline; breaks every enclosing group
    HardLine,
    Concat(Vec<Doc>),
    Indent(Box<Doc>),
    Group { contents: Box<Doc>, broken: bool },
    /// Printed only when the enclosing group is broken
    IfBreak(Box<Doc>),
}

impl Doc {
    pub fn text(text: impl Into<String>) -> Doc {
        Doc::Text(text.into())
    }

    pub fn concat(parts: Vec<Doc>) -> Doc {
        Doc::Concat(parts)
    }

    pub fn indent(doc: Doc) -> Doc {
        Doc::Indent(Box::new(doc))
    }

    pub fn group(doc: Doc) -> Doc {
        let broken = doc.forces_break();
        Doc::Group {
            contents: Box::new(doc),
            broken,
        }
    }

    /// A group that always breaks, and breaks its parents with it
    pub fn broken_group(doc: Doc) -> Doc {
        Doc::Group {
            contents: Box::new(doc),
            broken: true,
        }
    }

    pub fn if_break(doc: Doc) -> Doc {
        Doc::IfBreak(Box::new(doc))
    }

    /// Join docs with a separator
    pub fn join(docs: Vec<Doc>, separator: Doc) -> Doc {
        let mut parts = Vec::with_capacity(docs.len() * 2);
        for (i, doc) in docs.into_iter().enumerate() {
            if i > 0 {
                parts.push(separator.clone());
            }
            parts.push(doc);
        }
        Doc::Concat(parts)
    }

    fn forces_break(&self) -> bool {
        match self {
            Doc::HardLine => true,
            Doc::Concat(parts) => parts.iter().any(Doc::forces_break),
            Doc::Indent(doc) | Doc::IfBreak(doc) => doc.forces_break(),
            Doc::Group { broken, .. } => *broken,
            Doc::Text(_) | Doc::Line | Doc::SoftLine => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Flat,
    Break,
}

type Command<'d> = (usize, Mode, &'d Doc);

/// Render a document, fitting groups into `width` columns where possible.
pub fn print(doc: &Doc, width: usize) -> String {
    let mut out = String::new();
    let mut column = 0usize;
    let mut stack: Vec<Command<'_>> = vec![(0, Mode::Break, doc)];

    while let Some((indent, mode, doc)) = stack.pop() {
        match doc {
            Doc::Text(text) => {
                out.push_str(text);
                column = match text.rfind('\n') {
                    Some(pos) => text[pos + 1..].chars().count(),
                    None => column + text.chars().count(),
                };
            }
            Doc::Line if mode == Mode::Flat => {
                out.push(' ');
                column += 1;
            }
            Doc::SoftLine if mode == Mode::Flat => {}
            Doc::Line | Doc::SoftLine | Doc::HardLine => {
                newline(&mut out, indent);
                column = indent;
            }
            Doc::Concat(parts) => {
                for part in parts.iter().rev() {
                    stack.push((indent, mode, part));
                }
            }
            Doc::Indent(inner) => stack.push((indent + INDENT_WIDTH, mode, inner)),
            Doc::Group { contents, broken } => {
                let group_mode = if *broken {
                    Mode::Break
                } else if mode == Mode::Flat {
                    Mode::Flat
                } else {
                    let remaining = width as isize - column as isize;
                    if fits(contents, &stack, remaining) {
                        Mode::Flat
                    } else {
                        Mode::Break
                    }
                };
                stack.push((indent, group_mode, contents));
            }
            Doc::IfBreak(inner) => {
                if mode == Mode::Break {
                    stack.push((indent, mode, inner));
                }
            }
        }
    }

    out
}

fn newline(out: &mut String, indent: usize) {
    let trimmed = out.trim_end_matches(' ').len();
    out.truncate(trimmed);
    out.push('\n');
    out.extend(std::iter::repeat(' ').take(indent));
}

/// Whether `next` printed flat, followed by the pending commands up to the
/// next line break, fits in `remaining` columns.
fn fits(next: &Doc, rest: &[Command<'_>], mut remaining: isize) -> bool {
    let mut local: Vec<(Mode, &Doc)> = vec![(Mode::Flat, next)];
    let mut rest_idx = rest.len();

    loop {
        let (mode, doc) = match local.pop() {
            Some(cmd) => cmd,
            None => {
                if rest_idx == 0 {
                    return true;
                }
                rest_idx -= 1;
                let (_, mode, doc) = rest[rest_idx];
                (mode, doc)
            }
        };

        match doc {
            Doc::Text(text) => {
                let first_line = text.split('\n').next().unwrap_or("");
                remaining -= first_line.chars().count() as isize;
                if remaining < 0 {
                    return false;
                }
                if text.contains('\n') {
                    return true;
                }
            }
            Doc::Line => {
                if mode == Mode::Break {
                    return true;
                }
                remaining -= 1;
                if remaining < 0 {
                    return false;
                }
            }
            Doc::SoftLine => {
                if mode == Mode::Break {
                    return true;
                }
            }
            Doc::HardLine => return true,
            Doc::Concat(parts) => {
                for part in parts.iter().rev() {
                    local.push((mode, part));
                }
            }
            Doc::Indent(inner) => local.push((mode, inner)),
            Doc::Group { contents, broken } => {
                let group_mode = if *broken { Mode::Break } else { mode };
                local.push((group_mode, contents));
            }
            Doc::IfBreak(inner) => {
                if mode == Mode::Break {
                    local.push((mode, inner));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: &[&str]) -> Doc {
        let items = items.iter().map(|i| Doc::text(*i)).collect();
        Doc::group(Doc::concat(vec![
            Doc::text("["),
            Doc::indent(Doc::concat(vec![
                Doc::SoftLine,
                Doc::join(items, Doc::concat(vec![Doc::text(","), Doc::Line])),
                Doc::if_break(Doc::text(",")),
            ])),
            Doc::SoftLine,
            Doc::text("]"),
        ]))
    }

    #[test]
    fn flat_when_it_fits() {
        assert_eq!(print(&list(&["a", "b"]), 20), "[a, b]");
    }

    #[test]
    fn breaks_with_trailing_comma() {
        assert_eq!(
            print(&list(&["alpha", "beta"]), 10),
            "[\n  alpha,\n  beta,\n]"
        );
    }

    #[test]
    fn hard_line_breaks_enclosing_group() {
        let doc = Doc::group(Doc::concat(vec![
            Doc::text("{"),
            Doc::indent(Doc::concat(vec![Doc::Line, Doc::text("a")])),
            Doc::HardLine,
            Doc::text("}"),
        ]));
        assert!(matches!(doc, Doc::Group { broken: true, .. }));
        assert_eq!(print(&doc, 80), "{\n  a\n}");
    }

    #[test]
    fn trailing_text_counts_toward_fit() {
        let doc = Doc::concat(vec![list(&["a", "b"]), Doc::text(".then()")]);
        assert_eq!(print(&doc, 8), "[\n  a,\n  b,\n].then()");
    }

    #[test]
    fn no_trailing_spaces_on_blank_lines() {
        let doc = Doc::indent(Doc::concat(vec![
            Doc::text("a"),
            Doc::HardLine,
            Doc::HardLine,
            Doc::text("b"),
        ]));
        assert_eq!(print(&doc, 80), "a\n\n  b");
    }
}
