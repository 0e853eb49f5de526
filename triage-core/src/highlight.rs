//! Syntax highlighting for code previews.
//!
//! The highlighter only classifies tokens; choosing colors is the renderer's
//! job. Grammars come from syntect's bundled Sublime syntaxes. Unknown
//! languages and grammar errors come back as a single plain span per line.

use std::path::Path;

use log::debug;
use syntect::parsing::{ParseState, Scope, ScopeStack, SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

/// Token classes a renderer can style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Plain,
    Keyword,
    String,
    Number,
    Comment,
}

/// A run of text with one token class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub kind: TokenKind,
    pub text: String,
}

pub type HighlightedLine = Vec<Span>;

/// Turns raw preview text into classified spans, one entry per line
pub trait Highlighter {
    fn highlight(&self, text: &str, path_hint: &Path) -> Vec<HighlightedLine>;
}

/// Split `text` into lines of plain spans
pub fn plain(text: &str) -> Vec<HighlightedLine> {
    text.lines()
        .map(|line| {
            vec![Span {
                kind: TokenKind::Plain,
                text: line.to_string(),
            }]
        })
        .collect()
}

/// Scope prefixes mapped to token kinds
struct ScopeRules {
    /// Win wherever they appear in the stack
    enclosing: Vec<(Scope, TokenKind)>,
    /// Operators and punctuation, which most grammars file under `keyword.`
    plain: Vec<Scope>,
    /// Checked innermost first
    leaf: Vec<(Scope, TokenKind)>,
}

fn scopes(table: &[(&str, TokenKind)]) -> Vec<(Scope, TokenKind)> {
    table
        .iter()
        .filter_map(|(s, kind)| Scope::new(s).ok().map(|s| (s, *kind)))
        .collect()
}

impl ScopeRules {
    fn new() -> Self {
        Self {
            enclosing: scopes(&[
                ("comment", TokenKind::Comment),
                ("string", TokenKind::String),
                ("constant.character", TokenKind::String),
            ]),
            plain: ["keyword.operator", "punctuation"]
                .into_iter()
                .filter_map(|s| Scope::new(s).ok())
                .collect(),
            leaf: scopes(&[
                ("constant.numeric", TokenKind::Number),
                ("keyword", TokenKind::Keyword),
                ("storage", TokenKind::Keyword),
                ("constant.language", TokenKind::Keyword),
            ]),
        }
    }

    fn classify(&self, stack: &ScopeStack) -> TokenKind {
        let stack = stack.as_slice();
        let matching = |rules: &[(Scope, TokenKind)], scope: Scope| {
            rules
                .iter()
                .find(|(prefix, _)| prefix.is_prefix_of(scope))
                .map(|(_, kind)| *kind)
        };

        if let Some(kind) = stack.iter().find_map(|s| matching(&self.enclosing, *s)) {
            return kind;
        }

        for scope in stack.iter().rev() {
            if self.plain.iter().any(|p| p.is_prefix_of(*scope)) {
                return TokenKind::Plain;
            }
            if let Some(kind) = matching(&self.leaf, *scope) {
                return kind;
            }
        }
        TokenKind::Plain
    }
}

/// Highlighter backed by syntect grammars, picked by file name or extension
pub struct SyntaxHighlighter {
    syntaxes: SyntaxSet,
    rules: ScopeRules,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxHighlighter {
    pub fn new() -> Self {
        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            rules: ScopeRules::new(),
        }
    }

    fn syntax_for(&self, path: &Path) -> Option<&SyntaxReference> {
        let plain_text = self.syntaxes.find_syntax_plain_text();

        let by_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| self.syntaxes.find_syntax_by_extension(n));
        let by_ext = || {
            path.extension()
                .and_then(|e| e.to_str())
                .and_then(|e| self.syntaxes.find_syntax_by_token(e))
        };

        by_name
            .or_else(by_ext)
            .filter(|s| s.name != plain_text.name)
    }

    fn tokenize(&self, text: &str, syntax: &SyntaxReference) -> Option<Vec<HighlightedLine>> {
        let mut state = ParseState::new(syntax);
        let mut stack = ScopeStack::new();
        let mut lines = Vec::new();

        for line in LinesWithEndings::from(text) {
            let ops = state.parse_line(line, &self.syntaxes).ok()?;
            let mut spans = HighlightedLine::new();
            let mut start = 0;

            for (offset, op) in ops {
                if offset > start {
                    push(&mut spans, self.rules.classify(&stack), &line[start..offset]);
                    start = offset;
                }
                stack.apply(&op).ok()?;
            }
            push(&mut spans, self.rules.classify(&stack), &line[start..]);

            lines.push(spans);
        }

        Some(lines)
    }
}

impl Highlighter for SyntaxHighlighter {
    fn highlight(&self, text: &str, path_hint: &Path) -> Vec<HighlightedLine> {
        let Some(syntax) = self.syntax_for(path_hint) else {
            return plain(text);
        };

        self.tokenize(text, syntax).unwrap_or_else(|| {
            debug!("grammar {} failed on {}", syntax.name, path_hint.display());
            plain(text)
        })
    }
}

/// Append `text` (line ending stripped), merging with a same-kind neighbour
fn push(spans: &mut HighlightedLine, kind: TokenKind, text: &str) {
    let text = text.trim_end_matches(['\n', '\r']);
    if text.is_empty() {
        return;
    }
    if let Some(last) = spans.last_mut()
        && last.kind == kind
    {
        last.text.push_str(text);
        return;
    }
    spans.push(Span {
        kind,
        text: text.to_string(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::OnceLock;

    fn highlighter() -> &'static SyntaxHighlighter {
        static HIGHLIGHTER: OnceLock<SyntaxHighlighter> = OnceLock::new();
        HIGHLIGHTER.get_or_init(SyntaxHighlighter::new)
    }

    fn line_text(line: &HighlightedLine) -> String {
        line.iter().map(|s| s.text.as_str()).collect()
    }

    fn kinds_of<'a>(line: &'a HighlightedLine, kind: TokenKind) -> Vec<&'a str> {
        line.iter()
            .filter(|s| s.kind == kind)
            .map(|s| s.text.as_str())
            .collect()
    }

    #[test]
    fn test_rust_line() {
        let source = "let x = \"hi\"; // done";
        let lines = highlighter().highlight(source, &PathBuf::from("a.rs"));
        assert_eq!(lines.len(), 1);
        assert_eq!(line_text(&lines[0]), source);
        assert!(kinds_of(&lines[0], TokenKind::Keyword).concat().contains("let"));
        assert!(kinds_of(&lines[0], TokenKind::String).concat().contains("hi"));
        assert!(kinds_of(&lines[0], TokenKind::Comment).concat().contains("done"));
    }

    #[test]
    fn test_rust_lifetimes_are_not_strings() {
        let source = "fn f<'a>(x: &'a str) -> &'a str { x }";
        let lines = highlighter().highlight(source, &PathBuf::from("a.rs"));
        assert_eq!(line_text(&lines[0]), source);
        assert!(kinds_of(&lines[0], TokenKind::String).is_empty());
        assert!(kinds_of(&lines[0], TokenKind::Keyword).concat().starts_with("fn"));
    }

    #[test]
    fn test_rust_char_literal_is_string() {
        let source = "let c = 'x';";
        let lines = highlighter().highlight(source, &PathBuf::from("a.rs"));
        assert_eq!(kinds_of(&lines[0], TokenKind::String).concat(), "'x'");
    }

    #[test]
    fn test_python_comment_and_number() {
        let lines = highlighter().highlight("x = 42  # answer", &PathBuf::from("a.py"));
        assert_eq!(kinds_of(&lines[0], TokenKind::Number), vec!["42"]);
        assert!(kinds_of(&lines[0], TokenKind::Comment).concat().contains("answer"));
        assert!(!kinds_of(&lines[0], TokenKind::Keyword).contains(&"="));
    }

    #[test]
    fn test_multiline_keeps_line_count() {
        let source = "/* one\ntwo */\nlet y = 1;\n\n";
        let lines = highlighter().highlight(source, &PathBuf::from("a.js"));
        assert_eq!(lines.len(), 4);
        assert_eq!(kinds_of(&lines[1], TokenKind::Comment).concat(), "two */");
        assert!(lines[3].is_empty());
    }

    #[test]
    fn test_unknown_language_is_plain() {
        let text = "fn main() {}\nsecond";
        let lines = highlighter().highlight(text, &PathBuf::from("notes.unknown"));
        assert_eq!(lines, plain(text));
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_makefile_by_name() {
        let lines = highlighter().highlight("# build\nall:\n", &PathBuf::from("Makefile"));
        assert_eq!(kinds_of(&lines[0], TokenKind::Comment).concat(), "# build");
    }
}
