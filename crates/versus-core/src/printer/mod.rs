//! Deterministic pretty-printer for TypeScript snippets.
//!
//! Source goes through five stages: [`lexer`] splits it into tokens, `tree`
//! pairs up delimiters, `check` rejects dangling operators and operands
//! with nothing between them, `layout` turns the tree into a document of
//! groups and line breaks, and `doc` prints that document within a column
//! limit.

mod check;
mod doc;
pub mod lexer;
mod layout;
mod tree;

use crate::error::Result;

/// A source-to-source formatter.
pub trait PrettyPrinter: Send + Sync {
    fn format(&self, source: &str, width: usize) -> Result<String>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TypeScriptPrinter;

impl PrettyPrinter for TypeScriptPrinter {
    fn format(&self, source: &str, width: usize) -> Result<String> {
        let tokens = lexer::tokenize(source)?;
        let nodes = tree::build(tokens)?;
        check::check(&nodes)?;
        let doc = layout::program(&nodes);
        Ok(doc::print(&doc, width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LINE_WIDTH;
    use crate::error::VersusError;

    fn fmt(src: &str) -> String {
        TypeScriptPrinter
            .format(src, LINE_WIDTH)
            .unwrap()
            .trim()
            .to_string()
    }

    #[test]
    fn spaces_objects_and_adds_semicolons() {
        assert_eq!(fmt("const a = {b:1}"), "const a = { b: 1 };");
        assert_eq!(fmt("const {name} = user"), "const { name } = user;");
    }

    #[test]
    fn keeps_objects_expanded_when_source_breaks_after_brace() {
        assert_eq!(fmt("x = {\n a: 1 }"), "x = {\n  a: 1,\n};");
    }

    #[test]
    fn normalizes_quotes() {
        assert_eq!(fmt("f('a')"), "f(\"a\");");
        assert_eq!(fmt(r#"f('say "hi"')"#), r#"f('say "hi"');"#);
    }

    #[test]
    fn breaks_long_argument_lists() {
        assert_eq!(
            fmt("someFunction(argumentNumberOne, argumentNumberTwo, argumentNumberThree)"),
            "someFunction(\n  argumentNumberOne,\n  argumentNumberTwo,\n  argumentNumberThree,\n);"
        );
    }

    #[test]
    fn breaks_member_chains_with_callbacks() {
        assert_eq!(
            fmt(r#"ctx.db.query('users').withIndex("email", q=>q.eq("email", "a")).unique()"#),
            "ctx.db\n  .query(\"users\")\n  .withIndex(\"email\", (q) => q.eq(\"email\", \"a\"))\n  .unique();"
        );
    }

    #[test]
    fn short_chains_stay_on_one_line() {
        assert_eq!(
            fmt(r#"const users = await ctx.db.query("users").collect()"#),
            "const users = await ctx.db.query(\"users\").collect();"
        );
    }

    #[test]
    fn parenthesizes_single_arrow_parameters() {
        assert_eq!(fmt("users.map(u => u.name)"), "users.map((u) => u.name);");
    }

    #[test]
    fn blocks_take_no_semicolon() {
        assert_eq!(
            fmt("if (!user) {\nthrow new Error('nope')\n}"),
            "if (!user) {\n  throw new Error(\"nope\");\n}"
        );
        assert_eq!(
            fmt("for (const {country} of users) {\ncounts[country]++\n}"),
            "for (const { country } of users) {\n  counts[country]++;\n}"
        );
    }

    #[test]
    fn collapses_blank_lines_and_keeps_comments() {
        assert_eq!(fmt("a()\n\n\n\nb()"), "a();\n\nb();");
        assert_eq!(
            fmt("// hi\nfoo() // trailing\n"),
            "// hi\nfoo(); // trailing"
        );
    }

    #[test]
    fn breaks_long_ternaries() {
        assert_eq!(
            fmt("const kind = isAdmin ? 'administrator with access' : 'regular member of the team'"),
            "const kind = isAdmin\n  ? \"administrator with access\"\n  : \"regular member of the team\";"
        );
    }

    #[test]
    fn keeps_type_arguments_tight() {
        assert_eq!(
            fmt("const m = {} as Record<string, number>"),
            "const m = {} as Record<string, number>;"
        );
    }

    #[test]
    fn regex_literals_are_kept_intact() {
        assert_eq!(fmt("const re = /ab+c/g;"), "const re = /ab+c/g;");
        assert_eq!(
            fmt("const ok = /^[a-z]+$/.test(name)"),
            "const ok = /^[a-z]+$/.test(name);"
        );
        assert_eq!(fmt("a/b/c"), "a / b / c;");
    }

    #[test]
    fn class_members_go_on_their_own_lines() {
        assert_eq!(
            fmt("class A { a() { return 1 } b() { return 2 } }"),
            "class A {\n  a() {\n    return 1;\n  }\n  b() {\n    return 2;\n  }\n}"
        );
        assert_eq!(
            fmt("class Counter extends Base {\ncount = 0\nincrement = () => {\nthis.count++\n}\n}"),
            "class Counter extends Base {\n  count = 0;\n  increment = () => {\n    this.count++;\n  };\n}"
        );
    }

    #[test]
    fn switch_cases_indent_their_bodies() {
        assert_eq!(
            fmt("switch (x) {\ncase 1:\ny()\nbreak\ndefault:\nz()\n}"),
            "switch (x) {\n  case 1:\n    y();\n    break;\n  default:\n    z();\n}"
        );
        assert_eq!(
            fmt("switch (k) { case 'a': case 'b': f(); break; default: g() }"),
            "switch (k) {\n  case \"a\":\n  case \"b\":\n    f();\n    break;\n  default:\n    g();\n}"
        );
    }

    #[test]
    fn keyword_keys_stay_object_properties() {
        assert_eq!(fmt("x = { class: { a: 1 } }"), "x = { class: { a: 1 } };");
    }

    #[test]
    fn labeled_loops_take_no_semicolon() {
        assert_eq!(
            fmt("outer: for (const a of b) {\nbreak outer\n}"),
            "outer: for (const a of b) {\n  break outer;\n}"
        );
    }

    #[test]
    fn invalid_statements_are_syntax_errors() {
        assert!(matches!(
            TypeScriptPrinter.format("const x = 1 +", LINE_WIDTH),
            Err(VersusError::Syntax { .. })
        ));
        assert!(matches!(
            TypeScriptPrinter.format("a b c", LINE_WIDTH),
            Err(VersusError::Syntax { .. })
        ));
    }

    #[test]
    fn deep_nesting_is_an_error_not_a_crash() {
        let deep = format!("x = {}a{}", "(".repeat(2000), ")".repeat(2000));
        assert!(TypeScriptPrinter.format(&deep, LINE_WIDTH).is_err());
    }

    #[test]
    fn unbalanced_source_is_a_syntax_error() {
        assert!(matches!(
            TypeScriptPrinter.format("f(", LINE_WIDTH),
            Err(VersusError::Syntax { line: 1, column: 2, .. })
        ));
    }

    #[test]
    fn output_is_deterministic() {
        let src = "const x = await Promise.all(ids.map(id => ctx.db.get(id)))";
        assert_eq!(fmt(src), fmt(src));
    }
}
