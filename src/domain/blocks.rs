//! Display blocks produced from model output.
//!
//! One block corresponds to exactly one input line. Blocks are plain values:
//! a new sequence is derived on every render and never patched in place.

use serde::{Serialize, Serializer};

/// Heading depth recognised by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    pub fn get(self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }

    /// Line prefix that introduces a heading of this level.
    pub fn marker(self) -> &'static str {
        match self {
            HeadingLevel::H1 => "# ",
            HeadingLevel::H2 => "## ",
            HeadingLevel::H3 => "### ",
        }
    }
}

impl Serialize for HeadingLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.get())
    }
}

/// A run of text inside a paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Span {
    PlainText { text: String },
    Bold { text: String },
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Span::PlainText { text: text.into() }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Span::Bold { text: text.into() }
    }

    pub fn text(&self) -> &str {
        match self {
            Span::PlainText { text } | Span::Bold { text } => text,
        }
    }

    pub fn is_bold(&self) -> bool {
        matches!(self, Span::Bold { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DisplayBlock {
    Heading { level: HeadingLevel, text: String },
    ListItem { text: String },
    Break,
    Paragraph { spans: Vec<Span> },
}

impl DisplayBlock {
    pub fn heading(level: HeadingLevel, text: impl Into<String>) -> Self {
        DisplayBlock::Heading {
            level,
            text: text.into(),
        }
    }

    pub fn list_item(text: impl Into<String>) -> Self {
        DisplayBlock::ListItem { text: text.into() }
    }

    pub fn paragraph(spans: Vec<Span>) -> Self {
        DisplayBlock::Paragraph { spans }
    }
}
