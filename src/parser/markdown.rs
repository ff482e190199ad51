use crate::parser::{NodeKind, SyntaxNode};
use pulldown_cmark::{CodeBlockKind, Event, LinkType, Options, Parser, Tag};

fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_YAML_STYLE_METADATA_BLOCKS
}

/// Parse markdown into a syntax tree rooted at a `Document` node.
///
/// Every node carries the byte range of its source, so inline markup stays
/// in the text of the block that contains it.
pub fn parse(content: &str) -> SyntaxNode {
    let mut stack = vec![SyntaxNode::new(NodeKind::Document, 0..content.len())];

    for (event, range) in Parser::new_ext(content, options()).into_offset_iter() {
        match event {
            Event::Start(tag) => {
                let source = content.get(range.clone()).unwrap_or("");
                stack.push(SyntaxNode::new(tag_kind(&tag, source), range));
            }
            Event::End(_) => close(&mut stack),
            Event::Text(_) => push_leaf(&mut stack, SyntaxNode::new(NodeKind::Text, range)),
            Event::Code(_) => push_leaf(&mut stack, SyntaxNode::new(NodeKind::InlineCode, range)),
            Event::Html(_) | Event::InlineHtml(_) => {
                push_leaf(&mut stack, SyntaxNode::new(NodeKind::HtmlTag, range))
            }
            Event::Rule => push_leaf(&mut stack, SyntaxNode::new(NodeKind::ThematicBreak, range)),
            _ => {}
        }
    }

    while stack.len() > 1 {
        close(&mut stack);
    }

    stack
        .pop()
        .unwrap_or_else(|| SyntaxNode::new(NodeKind::Document, 0..content.len()))
}

fn tag_kind(tag: &Tag<'_>, source: &str) -> NodeKind {
    match tag {
        Tag::Paragraph => NodeKind::Paragraph,
        Tag::Heading { .. } => {
            if source.trim_start().starts_with('#') {
                NodeKind::AtxHeading
            } else {
                NodeKind::SetextHeading
            }
        }
        Tag::BlockQuote(..) => NodeKind::Blockquote,
        Tag::CodeBlock(CodeBlockKind::Fenced(_)) => NodeKind::FencedCode,
        Tag::CodeBlock(CodeBlockKind::Indented) => NodeKind::IndentedCode,
        Tag::HtmlBlock => NodeKind::HtmlBlock,
        Tag::List(Some(_)) => NodeKind::OrderedList,
        Tag::List(None) => NodeKind::BulletList,
        Tag::Item => NodeKind::ListItem,
        Tag::FootnoteDefinition(_) => NodeKind::FootnoteDefinition,
        Tag::Table(_) => NodeKind::Table,
        Tag::TableHead => NodeKind::TableHeader,
        Tag::TableRow => NodeKind::TableRow,
        Tag::TableCell => NodeKind::TableCell,
        Tag::Emphasis => NodeKind::Emphasis,
        Tag::Strong => NodeKind::Strong,
        Tag::Strikethrough => NodeKind::Strikethrough,
        Tag::Link { link_type, .. } => match link_type {
            LinkType::Autolink | LinkType::Email => NodeKind::Url,
            _ => NodeKind::Link,
        },
        Tag::Image { .. } => NodeKind::Image,
        Tag::MetadataBlock(_) => NodeKind::Frontmatter,
        #[allow(unreachable_patterns)]
        _ => NodeKind::Text,
    }
}

fn push_leaf(stack: &mut [SyntaxNode], node: SyntaxNode) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    }
}

fn close(stack: &mut Vec<SyntaxNode>) {
    if stack.len() <= 1 {
        return;
    }
    let Some(node) = stack.pop() else {
        return;
    };

    // Containers holding blocks are replaced by those blocks, so nested
    // code and HTML keep their own kind
    if is_container(node.kind) && node.children.iter().any(|c| is_block(c.kind)) {
        if let Some(parent) = stack.last_mut() {
            parent.children.extend(node.children);
        }
    } else {
        push_leaf(stack, node);
    }
}

fn is_container(kind: NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::ListItem | NodeKind::Blockquote | NodeKind::FootnoteDefinition
    )
}

fn is_block(kind: NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::Paragraph
            | NodeKind::AtxHeading
            | NodeKind::SetextHeading
            | NodeKind::Blockquote
            | NodeKind::BulletList
            | NodeKind::OrderedList
            | NodeKind::FencedCode
            | NodeKind::IndentedCode
            | NodeKind::HtmlBlock
            | NodeKind::Table
            | NodeKind::ThematicBreak
            | NodeKind::FootnoteDefinition
    )
}
