//! Parsed article documents
//!
//! A `Document` is what the fetcher hands to the engine for one step: the page
//! title plus the body broken into blocks, in document order.

/// Structural kind of a body block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// A `<p>` paragraph
    Paragraph,
    /// A `<ul>` or `<ol>` list
    List,
    /// Anything else (tables, infoboxes, headings, hatnotes...)
    Other,
}

impl BlockKind {
    /// Maps an element name to a block kind
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "p" => Self::Paragraph,
            "ul" | "ol" => Self::List,
            _ => Self::Other,
        }
    }

    /// Returns true for blocks that hold running body text
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Paragraph | Self::List)
    }
}

/// A link found inside a block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Reference exactly as written in the markup
    pub href: String,

    /// Visible anchor text
    pub text: String,

    /// The anchor as it appears verbatim in the block's raw markup
    pub source: String,

    /// Byte offset of this occurrence of `source` in the block's raw markup
    pub position: usize,
}

impl Link {
    /// Creates a link whose textual form is its anchor text
    pub fn new(href: &str, text: &str, position: usize) -> Self {
        Self {
            href: href.to_string(),
            text: text.to_string(),
            source: text.to_string(),
            position,
        }
    }
}

/// One structural unit of the article body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBlock {
    pub kind: BlockKind,

    /// Visible text of the block
    pub text: String,

    /// Serialized markup of the block
    pub raw: String,

    /// Links in document order
    pub links: Vec<Link>,
}

impl ContentBlock {
    /// Builds a block whose markup and visible text are the same string
    pub fn from_text(kind: BlockKind, text: &str, links: Vec<Link>) -> Self {
        Self {
            kind,
            text: text.to_string(),
            raw: text.to_string(),
            links,
        }
    }
}

/// A fetched and parsed article
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub title: String,
    pub blocks: Vec<ContentBlock>,
}

impl Document {
    pub fn new(title: &str, blocks: Vec<ContentBlock>) -> Self {
        Self {
            title: title.to_string(),
            blocks,
        }
    }

    /// Total number of links across all blocks
    pub fn link_count(&self) -> usize {
        self.blocks.iter().map(|b| b.links.len()).sum()
    }
}
