//! Tokenizer for TypeScript-flavoured snippet source.

use crate::error::{Result, VersusError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Word,
    Number,
    Str,
    Template,
    LineComment,
    BlockComment,
    Punct,
    /// `/pattern/flags`
    Regex,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    /// Byte offset of the first character
    pub start: usize,
    pub line: usize,
    pub column: usize,
    /// Line breaks between the previous token and this one
    pub newlines_before: usize,
    /// Any whitespace between the previous token and this one
    pub space_before: bool,
}

impl Token<'_> {
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }

    pub fn is_punct(&self, punct: &str) -> bool {
        self.kind == TokenKind::Punct && self.text == punct
    }

    pub fn is_comment(&self) -> bool {
        matches!(self.kind, TokenKind::LineComment | TokenKind::BlockComment)
    }
}

pub const KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "case", "catch", "class", "const", "continue", "default",
    "delete", "do", "else", "export", "extends", "finally", "for", "from", "function", "if",
    "import", "in", "instanceof", "interface", "let", "new", "of", "return", "satisfies",
    "switch", "throw", "try", "type", "typeof", "var", "void", "while", "yield",
];

pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

// Longest first
const PUNCTUATORS: &[&str] = &[
    "...", "===", "!==", "**=", "??=", "&&=", "||=", "=>", "==", "!=", "<=", ">=", "&&", "||",
    "??", "?.", "++", "--", "+=", "-=", "*=", "/=", "%=", "|=", "&=", "^=", "**", "{", "}", "(",
    ")", "[", "]", ";", ",", ".", "<", ">", "+", "-", "*", "/", "%", "&", "|", "^", "!", "~",
    "?", ":", "=",
];

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_at(&self, n: usize) -> Option<char> {
        self.src[self.pos..].chars().nth(n)
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn bump_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.bump();
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Split source text into tokens, failing on unterminated literals and
/// characters that cannot start a token.
pub fn tokenize(src: &str) -> Result<Vec<Token<'_>>> {
    let mut cursor = Cursor {
        src,
        pos: 0,
        line: 1,
        column: 1,
    };
    let mut tokens = Vec::new();
    let mut newlines = 0;
    let mut space = false;
    // Last non-comment token, deciding between regex and division
    let mut prev: Option<(TokenKind, &str)> = None;

    while let Some(c) = cursor.peek() {
        if c.is_whitespace() {
            if c == '\n' {
                newlines += 1;
            }
            space = true;
            cursor.bump();
            continue;
        }

        let start = cursor.pos;
        let (line, column) = (cursor.line, cursor.column);

        let kind = if c == '/' && cursor.peek_at(1) == Some('/') {
            cursor.bump_while(|c| c != '\n');
            TokenKind::LineComment
        } else if c == '/' && cursor.peek_at(1) == Some('*') {
            cursor.bump();
            cursor.bump();
            loop {
                if cursor.rest().starts_with("*/") {
                    cursor.bump();
                    cursor.bump();
                    break;
                }
                if cursor.bump().is_none() {
                    return Err(VersusError::syntax(line, column, "unterminated block comment"));
                }
            }
            TokenKind::BlockComment
        } else if c == '/' && regex_allowed(prev) {
            lex_regex(&mut cursor, line, column)?;
            TokenKind::Regex
        } else if is_ident_start(c) {
            cursor.bump_while(is_ident_continue);
            TokenKind::Word
        } else if c.is_ascii_digit()
            || (c == '.' && cursor.peek_at(1).map_or(false, |n| n.is_ascii_digit()))
        {
            cursor.bump_while(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_');
            TokenKind::Number
        } else if c == '"' || c == '\'' {
            lex_string(&mut cursor, c, line, column)?;
            TokenKind::Str
        } else if c == '`' {
            lex_template(&mut cursor, line, column)?;
            TokenKind::Template
        } else if let Some(punct) = PUNCTUATORS.iter().find(|p| cursor.rest().starts_with(**p)) {
            for _ in 0..punct.len() {
                cursor.bump();
            }
            TokenKind::Punct
        } else {
            return Err(VersusError::syntax(
                line,
                column,
                format!("unexpected character '{}'", c),
            ));
        };

        let text = &src[start..cursor.pos];
        if !matches!(kind, TokenKind::LineComment | TokenKind::BlockComment) {
            prev = Some((kind, text));
        }
        tokens.push(Token {
            kind,
            text,
            start,
            line,
            column,
            newlines_before: newlines,
            space_before: space,
        });
        newlines = 0;
        space = false;
    }

    Ok(tokens)
}

/// A `/` starts a regular expression at the start of input and after an
/// operator, an opening delimiter or a keyword. Anywhere else it divides.
fn regex_allowed(prev: Option<(TokenKind, &str)>) -> bool {
    match prev {
        None => true,
        Some((TokenKind::Punct, text)) => !matches!(text, ")" | "]" | "}" | "++" | "--"),
        Some((TokenKind::Word, text)) => is_keyword(text),
        Some(_) => false,
    }
}

fn lex_regex(cursor: &mut Cursor<'_>, line: usize, column: usize) -> Result<()> {
    cursor.bump();
    let mut in_class = false;
    loop {
        match cursor.bump() {
            Some('\\') => {
                if matches!(cursor.peek(), None | Some('\n')) {
                    break;
                }
                cursor.bump();
            }
            Some('[') => in_class = true,
            Some(']') => in_class = false,
            Some('/') if !in_class => {
                cursor.bump_while(is_ident_continue);
                return Ok(());
            }
            Some('\n') | None => break,
            Some(_) => {}
        }
    }
    Err(VersusError::syntax(
        line,
        column,
        "unterminated regular expression",
    ))
}

fn lex_string(cursor: &mut Cursor<'_>, quote: char, line: usize, column: usize) -> Result<()> {
    cursor.bump();
    loop {
        match cursor.bump() {
            Some('\\') => {
                cursor.bump();
            }
            Some(c) if c == quote => return Ok(()),
            Some('\n') | None => {
                return Err(VersusError::syntax(line, column, "unterminated string literal"))
            }
            Some(_) => {}
        }
    }
}

fn lex_template(cursor: &mut Cursor<'_>, line: usize, column: usize) -> Result<()> {
    cursor.bump();
    // Brace depth inside `${ ... }` substitutions
    let mut depth = 0usize;
    loop {
        match cursor.bump() {
            Some('\\') => {
                cursor.bump();
            }
            Some('`') if depth == 0 => return Ok(()),
            Some('$') if cursor.peek() == Some('{') => {
                cursor.bump();
                depth += 1;
            }
            Some('{') if depth > 0 => depth += 1,
            Some('}') if depth > 0 => depth -= 1,
            Some(_) => {}
            None => {
                return Err(VersusError::syntax(
                    line,
                    column,
                    "unterminated template literal",
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<(TokenKind, &str)> {
        tokenize(src)
            .unwrap()
            .into_iter()
            .map(|t| (t.kind, t.text))
            .collect()
    }

    #[test]
    fn splits_words_strings_and_punctuation() {
        assert_eq!(
            kinds(r#"const a = ctx.db.get("x")"#),
            vec![
                (TokenKind::Word, "const"),
                (TokenKind::Word, "a"),
                (TokenKind::Punct, "="),
                (TokenKind::Word, "ctx"),
                (TokenKind::Punct, "."),
                (TokenKind::Word, "db"),
                (TokenKind::Punct, "."),
                (TokenKind::Word, "get"),
                (TokenKind::Punct, "("),
                (TokenKind::Str, "\"x\""),
                (TokenKind::Punct, ")"),
            ]
        );
    }

    #[test]
    fn longest_punctuator_wins() {
        assert_eq!(
            kinds("a ??= b !== c => ...d"),
            vec![
                (TokenKind::Word, "a"),
                (TokenKind::Punct, "??="),
                (TokenKind::Word, "b"),
                (TokenKind::Punct, "!=="),
                (TokenKind::Word, "c"),
                (TokenKind::Punct, "=>"),
                (TokenKind::Punct, "..."),
                (TokenKind::Word, "d"),
            ]
        );
    }

    #[test]
    fn tracks_line_breaks_and_positions() {
        let tokens = tokenize("a\n\n  // note\nb").unwrap();
        assert_eq!(tokens[1].kind, TokenKind::LineComment);
        assert_eq!(tokens[1].newlines_before, 2);
        assert_eq!((tokens[1].line, tokens[1].column), (3, 3));
        assert_eq!(tokens[2].newlines_before, 1);
        assert!(!tokens[0].space_before);
        assert_eq!(tokens[2].end(), tokens[2].start + 1);
    }

    #[test]
    fn templates_keep_substitutions() {
        let tokens = tokenize("`took ${after - before}ms`").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Template);
    }

    #[test]
    fn reports_unterminated_literals() {
        assert!(matches!(
            tokenize("const a = 'oops"),
            Err(VersusError::Syntax { line: 1, column: 11, .. })
        ));
        assert!(tokenize("/* never closed").is_err());
        assert!(tokenize("`open").is_err());
    }

    #[test]
    fn slash_after_an_operator_starts_a_regex() {
        assert_eq!(
            kinds("const re = /ab+c/g;"),
            vec![
                (TokenKind::Word, "const"),
                (TokenKind::Word, "re"),
                (TokenKind::Punct, "="),
                (TokenKind::Regex, "/ab+c/g"),
                (TokenKind::Punct, ";"),
            ]
        );
        assert_eq!(kinds("/^[a-z]+$/.test(name)")[0], (TokenKind::Regex, "/^[a-z]+$/"));
        assert_eq!(kinds("return /x/i")[1], (TokenKind::Regex, "/x/i"));
        assert_eq!(kinds("f(/a\\/b/)")[2], (TokenKind::Regex, "/a\\/b/"));
    }

    #[test]
    fn slash_inside_a_character_class_does_not_end_the_regex() {
        assert_eq!(kinds("x = /[/]+/")[2], (TokenKind::Regex, "/[/]+/"));
    }

    #[test]
    fn slash_after_an_operand_divides() {
        assert_eq!(
            kinds("a / b / c"),
            vec![
                (TokenKind::Word, "a"),
                (TokenKind::Punct, "/"),
                (TokenKind::Word, "b"),
                (TokenKind::Punct, "/"),
                (TokenKind::Word, "c"),
            ]
        );
        assert_eq!(kinds("f(x) / 2")[4], (TokenKind::Punct, "/"));
        assert_eq!(kinds("total /* sum */ / n")[2], (TokenKind::Punct, "/"));
    }

    #[test]
    fn reports_unterminated_regex() {
        assert!(matches!(
            tokenize("x = /abc\nfoo()"),
            Err(VersusError::Syntax { line: 1, column: 5, .. })
        ));
    }

    #[test]
    fn rejects_unknown_characters() {
        let err = tokenize("model User @id").unwrap_err();
        assert!(err.to_string().contains("unexpected character '@'"));
    }
}
