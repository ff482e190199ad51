pub mod markdown;

use std::ops::Range;
use std::path::Path;

/// Kinds of syntax tree nodes the extractor knows how to treat.
///
/// Hosts that bring their own parser map their node names onto this set;
/// the markdown adapter in [`markdown`] only produces a subset of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Document,
    Frontmatter,
    Paragraph,
    AtxHeading,
    SetextHeading,
    Blockquote,
    BulletList,
    OrderedList,
    ListItem,
    FencedCode,
    IndentedCode,
    HtmlBlock,
    HtmlTag,
    Url,
    InlineCode,
    Table,
    TableHeader,
    TableRow,
    TableCell,
    TableDelimiter,
    Link,
    Image,
    Emphasis,
    Strong,
    Strikethrough,
    FootnoteDefinition,
    ThematicBreak,
    Text,
    CodeMark,
    HeaderMark,
    EmphasisMark,
    LinkMark,
    QuoteMark,
    ListMark,
}

/// How the extractor treats a node of a given kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handling {
    /// Skip the node and its whole subtree.
    Skip,
    /// Extract nothing from the node itself but visit its children.
    PassThrough,
    /// Extract words from the node's text and stop there.
    Content,
}

impl NodeKind {
    pub fn handling(self) -> Handling {
        use NodeKind::*;

        match self {
            Frontmatter | FencedCode | IndentedCode | HtmlBlock | HtmlTag | Url | InlineCode
            | TableDelimiter | CodeMark | HeaderMark | EmphasisMark | LinkMark | QuoteMark
            | ListMark => Handling::Skip,
            Document | Link | Image | BulletList | OrderedList | Table => Handling::PassThrough,
            _ => Handling::Content,
        }
    }
}

/// A node of a document's syntax tree, addressed by byte range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub start: usize,
    pub end: usize,
    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    pub fn new(kind: NodeKind, range: Range<usize>) -> Self {
        Self {
            kind,
            start: range.start,
            end: range.end,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<SyntaxNode>) -> Self {
        self.children = children;
        self
    }

    /// The slice of `text` this node covers, or `None` if the range does
    /// not fall on valid boundaries.
    pub fn text<'t>(&self, text: &'t str) -> Option<&'t str> {
        text.get(self.start..self.end)
    }
}

/// A parsed document: the source text and its syntax tree.
#[derive(Debug, Clone)]
pub struct Document {
    pub text: String,
    pub root: SyntaxNode,
}

impl Document {
    pub fn new(text: impl Into<String>, root: SyntaxNode) -> Self {
        Self {
            text: text.into(),
            root,
        }
    }

    pub fn parse_markdown(text: impl Into<String>) -> Self {
        let text = text.into();
        let root = markdown::parse(&text);
        Self { text, root }
    }
}

/// Detect markdown files from their extension
pub fn is_markdown(path: &Path) -> bool {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    matches!(ext.as_str(), "md" | "mdx" | "markdown")
}
