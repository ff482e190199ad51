use crate::parser::{Handling, NodeKind, SyntaxNode};
use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;
use tracing::trace;

lazy_static! {
    // Markup left over inside content nodes, removed in this order
    static ref TAG: Regex = Regex::new(r#"(^|\s)#[^\s#,.:;!?"'`()\[\]{}<>]+"#).unwrap();
    static ref BLOCK_PREFIX: Regex = Regex::new(r"^\s*(?:#{1,6}|>+)[ \t]*").unwrap();
    static ref EMPHASIS: Regex = Regex::new(r"[_*]{1,3}").unwrap();
    static ref INLINE_CODE: Regex = Regex::new(r"`+[^`]*`+").unwrap();
    static ref LINK: Regex = Regex::new(r"!?\[([^\]]*)\]\([^)]*\)").unwrap();
    static ref REF_LINK: Regex = Regex::new(r"!?\[([^\]]*)\]\[[^\]]*\]").unwrap();
    static ref HTML_TAG: Regex = Regex::new(r"<[^>]*>").unwrap();
    static ref EMOJI: Regex = Regex::new(
        r"[\p{Extended_Pictographic}\p{Emoji_Presentation}\p{Emoji_Modifier}\x{FE0F}\x{200D}]+"
    )
    .unwrap();

    static ref EDGE_TRIM: Regex = Regex::new(r"(?s)^\W*(.*?)\W*$").unwrap();
    static ref WORD: Regex = Regex::new(r"^\w+(?:['\x{2018}\x{2019}\x{02BC}]\w+)*$").unwrap();
    static ref DIGIT: Regex = Regex::new(r"\d").unwrap();
}

/// A word found in a document, positioned relative to its source node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub word: String,
    /// Byte index of `word` within the source node's text.
    pub start_offset: usize,
    /// Byte offset of the source node within the document.
    pub node_start: usize,
}

impl Token {
    pub fn from(&self) -> usize {
        self.node_start + self.start_offset
    }

    pub fn to(&self) -> usize {
        self.from() + self.word.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Descend,
    Skip,
}

/// Extract every checkable word of a document, in document order.
pub fn extract_tokens(root: &SyntaxNode, text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    walk(root, text, &mut tokens);
    tokens
}

fn walk(node: &SyntaxNode, text: &str, tokens: &mut Vec<Token>) {
    if visit(node, text, tokens) == Visit::Descend {
        for child in &node.children {
            walk(child, text, tokens);
        }
    }
}

fn visit(node: &SyntaxNode, text: &str, tokens: &mut Vec<Token>) -> Visit {
    match node.kind.handling() {
        Handling::Skip => Visit::Skip,
        Handling::PassThrough => Visit::Descend,
        Handling::Content => {
            match node.text(text) {
                Some(source) => tokens.extend(node_tokens(node.kind, source, node.start)),
                None => trace!(
                    "node {:?} has an invalid range {}..{}",
                    node.kind,
                    node.start,
                    node.end
                ),
            }
            Visit::Skip
        }
    }
}

fn node_tokens(kind: NodeKind, source: &str, node_start: usize) -> Vec<Token> {
    // Drop the underline of setext headings
    let source = if kind == NodeKind::SetextHeading {
        let trimmed = source.trim_end();
        trimmed.rfind('\n').map_or(trimmed, |idx| &trimmed[..idx])
    } else {
        source
    };

    let cleaned = strip_markup(source);
    let mut tokens = Vec::new();
    let mut cursor = 0;

    for word in split_words(&cleaned) {
        match source[cursor..].find(word) {
            Some(idx) => {
                let start = cursor + idx;
                tokens.push(Token {
                    word: word.to_string(),
                    start_offset: start,
                    node_start,
                });
                cursor = start + word.len();
            }
            None => trace!("dropping '{}': not found after offset {}", word, cursor),
        }
    }

    tokens
}

/// Remove markdown syntax that survives inside a content node.
pub fn strip_markup(text: &str) -> String {
    let text = TAG.replace_all(text, "${1}");
    let text = replace(text, &BLOCK_PREFIX, "");
    let text = replace(text, &EMPHASIS, "");
    let text = replace(text, &INLINE_CODE, " ");
    let text = replace(text, &LINK, "${1}");
    let text = replace(text, &REF_LINK, "${1}");
    let text = replace(text, &HTML_TAG, " ");
    let text = replace(text, &EMOJI, " ");
    text.into_owned()
}

fn replace<'t>(text: Cow<'t, str>, re: &Regex, rep: &str) -> Cow<'t, str> {
    let replaced = match re.replace_all(&text, rep) {
        Cow::Borrowed(_) => None,
        Cow::Owned(s) => Some(s),
    };
    replaced.map_or(text, Cow::Owned)
}

/// Split cleaned text into checkable words.
///
/// Numbers and words mixing letters with digits are never checked.
pub fn split_words(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .map(trim_edges)
        .filter(|s| !s.is_empty() && WORD.is_match(s) && !DIGIT.is_match(s))
        .collect()
}

fn trim_edges(segment: &str) -> &str {
    EDGE_TRIM
        .captures(segment)
        .and_then(|caps| caps.get(1))
        .map_or("", |m| m.as_str())
}
