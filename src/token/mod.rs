//! Line tokenizer for syntax coloring.
//!
//! Splits one line of text into typed fragments using a prioritized table of
//! lexical matchers. This is a lexical approximation, not a language front
//! end: at each position every rule is tried, the longest match wins, and
//! ties go to the earlier rule in the table. Characters no rule claims are
//! coalesced into `Plain` runs, so tokenization never fails and the
//! concatenated token text always reproduces the input line exactly.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Category assigned to a token, used only for color lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Keyword,
    FunctionName,
    String,
    Number,
    Comment,
    Plain,
}

/// A typed, non-empty contiguous run of characters from one source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    text: String,
    kind: TokenKind,
}

impl Token {
    pub const fn new(text: String, kind: TokenKind) -> Self {
        Self { text, kind }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn kind(&self) -> TokenKind {
        self.kind
    }
}

/// Source language selecting a matcher table.
///
/// `Plain` has an empty table, so every line becomes a single `Plain` token.
/// Adding a language means adding one more table here, nothing structural.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Python,
    JavaScript,
    Plain,
}

impl Language {
    /// Pick a language from a file extension, defaulting to `Plain`.
    pub fn from_extension(ext: Option<&str>) -> Self {
        match ext {
            Some("py" | "pyw") => Self::Python,
            Some("js" | "mjs" | "cjs" | "jsx" | "ts") => Self::JavaScript,
            _ => Self::Plain,
        }
    }

    /// The matcher table for this language.
    pub fn rules(self) -> &'static RuleTable {
        match self {
            Self::Python => python_rules(),
            Self::JavaScript => javascript_rules(),
            Self::Plain => plain_rules(),
        }
    }
}

/// One lexical matcher: an anchored pattern and the kind it produces.
#[derive(Debug)]
struct Rule {
    pattern: Regex,
    kind: TokenKind,
}

/// A prioritized list of matchers for one language.
#[derive(Debug)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Build a table from `(pattern, kind)` pairs, in priority order.
    ///
    /// Patterns must be anchored (`^`); panics on an invalid pattern, which
    /// only happens for a typo in the built-in tables below.
    fn new(specs: &[(&str, TokenKind)]) -> Self {
        let rules = specs
            .iter()
            .map(|&(pattern, kind)| {
                debug_assert!(pattern.starts_with('^'), "rule pattern must be anchored");
                Rule {
                    pattern: Regex::new(pattern).expect("built-in rule pattern"),
                    kind,
                }
            })
            .collect();
        Self { rules }
    }

    /// Longest match at the start of `rest`, earlier rules winning ties.
    ///
    /// Returns the match length in bytes and its kind. Zero-length matches
    /// are ignored so a bad pattern can never stall the scan.
    fn longest_match(&self, rest: &str) -> Option<(usize, TokenKind)> {
        let mut best: Option<(usize, TokenKind)> = None;
        for rule in &self.rules {
            if let Some(m) = rule.pattern.find(rest) {
                let len = m.end();
                if len > 0 && best.is_none_or(|(best_len, _)| len > best_len) {
                    best = Some((len, rule.kind));
                }
            }
        }
        best
    }
}

/// Split one line (no newline characters) into typed tokens.
///
/// The output is empty only for an empty line; callers still account for the
/// line's vertical space. Concatenating the token texts reproduces `line`
/// exactly.
pub fn tokenize(line: &str, table: &RuleTable) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut plain_run = String::new();
    let mut rest = line;

    while !rest.is_empty() {
        if let Some((len, kind)) = table.longest_match(rest) {
            if !plain_run.is_empty() {
                tokens.push(Token::new(std::mem::take(&mut plain_run), TokenKind::Plain));
            }
            tokens.push(Token::new(rest[..len].to_string(), kind));
            rest = &rest[len..];
        } else {
            let Some(ch) = rest.chars().next() else { break };
            plain_run.push(ch);
            rest = &rest[ch.len_utf8()..];
        }
    }

    if !plain_run.is_empty() {
        tokens.push(Token::new(plain_run, TokenKind::Plain));
    }
    tokens
}

// Shared pattern fragments. Strings are closed-quote approximations; an
// unterminated quote falls through to the plain run.
const STRING_PATTERN: &str = r#"^("(?:[^"\\]|\\.)*"|'(?:[^'\\]|\\.)*')"#;
const NUMBER_PATTERN: &str = r"^\d+(?:\.\d+)?";
const IDENT_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_]*";
const WHITESPACE_PATTERN: &str = r"^\s+";

fn python_rules() -> &'static RuleTable {
    static TABLE: OnceLock<RuleTable> = OnceLock::new();
    TABLE.get_or_init(|| {
        RuleTable::new(&[
            (STRING_PATTERN, TokenKind::String),
            (r"^#.*", TokenKind::Comment),
            (NUMBER_PATTERN, TokenKind::Number),
            (
                r"^(?:def|class|return|if|elif|else|for|while|in|not|and|or|is|import|from|as|with|try|except|finally|raise|pass|break|continue|lambda|global|nonlocal|yield|assert|del|True|False|None)\b",
                TokenKind::Keyword,
            ),
            (
                r"^(?:print|input|len|range|int|str|float|list|dict|set|tuple|open|type|enumerate|zip|map|filter|sorted|sum|min|max|abs|round|append|split|join|format)\b",
                TokenKind::FunctionName,
            ),
            (IDENT_PATTERN, TokenKind::Plain),
            (WHITESPACE_PATTERN, TokenKind::Plain),
        ])
    })
}

fn javascript_rules() -> &'static RuleTable {
    static TABLE: OnceLock<RuleTable> = OnceLock::new();
    TABLE.get_or_init(|| {
        RuleTable::new(&[
            (STRING_PATTERN, TokenKind::String),
            (r"^//.*", TokenKind::Comment),
            (NUMBER_PATTERN, TokenKind::Number),
            (
                r"^(?:function|var|let|const|return|if|else|for|while|do|switch|case|default|break|continue|new|delete|typeof|instanceof|in|of|this|class|extends|super|import|export|from|try|catch|finally|throw|async|await|void|true|false|null|undefined)\b",
                TokenKind::Keyword,
            ),
            (
                r"^(?:console|log|alert|prompt|parseInt|parseFloat|push|pop|shift|unshift|slice|splice|indexOf|length|getElementById|querySelector|addEventListener|setTimeout|setInterval|JSON|stringify|parse)\b",
                TokenKind::FunctionName,
            ),
            (IDENT_PATTERN, TokenKind::Plain),
            (WHITESPACE_PATTERN, TokenKind::Plain),
        ])
    })
}

fn plain_rules() -> &'static RuleTable {
    static TABLE: OnceLock<RuleTable> = OnceLock::new();
    TABLE.get_or_init(|| RuleTable::new(&[]))
}
