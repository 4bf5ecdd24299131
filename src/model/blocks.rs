//! Content blocks built from a captured selection.
//!
//! Each non-blank line of the selection becomes one paragraph block. Formatting
//! beyond line breaks is not preserved.

use serde::ser::{Serialize, Serializer};

/// One unit of saved content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBlock {
    Paragraph { text: String },
}

impl ContentBlock {
    pub fn paragraph(text: impl Into<String>) -> Self {
        ContentBlock::Paragraph { text: text.into() }
    }

    /// The block type name as Notion spells it.
    pub fn block_type(&self) -> &'static str {
        match self {
            ContentBlock::Paragraph { .. } => "paragraph",
        }
    }

    pub fn text(&self) -> &str {
        match self {
            ContentBlock::Paragraph { text } => text,
        }
    }
}

/// Builds the ordered block sequence for a selection.
///
/// The result is never empty: a blank selection yields a single empty
/// paragraph, since Notion rejects some writes with no children.
pub fn build_content_blocks(selection_text: &str) -> Vec<ContentBlock> {
    let blocks: Vec<ContentBlock> = selection_text
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ContentBlock::paragraph)
        .collect();

    if blocks.is_empty() {
        vec![ContentBlock::paragraph("")]
    } else {
        blocks
    }
}

/// A single plain-text rich text item, `{"type": "text", "text": {"content": ...}}`.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RichText<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    text: TextContent<'a>,
}

#[derive(Debug, Clone, serde::Serialize)]
struct TextContent<'a> {
    content: &'a str,
}

impl<'a> RichText<'a> {
    pub fn plain(content: &'a str) -> Self {
        Self {
            kind: "text",
            text: TextContent { content },
        }
    }
}

#[derive(serde::Serialize)]
struct TextBlockContent<'a> {
    rich_text: [RichText<'a>; 1],
}

#[derive(serde::Serialize)]
struct BlockObject<'a> {
    object: &'static str,
    #[serde(rename = "type")]
    block_type: &'static str,
    paragraph: TextBlockContent<'a>,
}

impl Serialize for ContentBlock {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            ContentBlock::Paragraph { text } => BlockObject {
                object: "block",
                block_type: self.block_type(),
                paragraph: TextBlockContent {
                    rich_text: [RichText::plain(text)],
                },
            }
            .serialize(serializer),
        }
    }
}
