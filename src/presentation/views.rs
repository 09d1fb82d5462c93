//! HTML view of a strategy document.

use askama::{Error as AskamaError, Template};
use thiserror::Error;
use tracing::error;

use crate::domain::blocks::{DisplayBlock, Span};

const PAGE_TITLE: &str = "Strategic Blueprint";
const DISCLAIMER: &str = "AI-generated strategy. Validate market assumptions before investing.";

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(source: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            source,
            public_message,
            error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanView {
    pub bold: bool,
    pub text: String,
}

impl From<&Span> for SpanView {
    fn from(span: &Span) -> Self {
        Self {
            bold: span.is_bold(),
            text: span.text().to_string(),
        }
    }
}

/// Block projection for the template; consecutive list items share one `list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockView {
    pub kind: &'static str,
    pub level: u8,
    pub text: String,
    pub items: Vec<String>,
    pub spans: Vec<SpanView>,
}

impl BlockView {
    fn empty(kind: &'static str) -> Self {
        Self {
            kind,
            level: 0,
            text: String::new(),
            items: Vec::new(),
            spans: Vec::new(),
        }
    }
}

pub fn project_blocks(blocks: &[DisplayBlock]) -> Vec<BlockView> {
    let mut views: Vec<BlockView> = Vec::with_capacity(blocks.len());

    for block in blocks {
        match block {
            DisplayBlock::Heading { level, text } => views.push(BlockView {
                level: level.get(),
                text: text.clone(),
                ..BlockView::empty("heading")
            }),
            DisplayBlock::ListItem { text } => match views.last_mut() {
                Some(last) if last.kind == "list" => last.items.push(text.clone()),
                _ => views.push(BlockView {
                    items: vec![text.clone()],
                    ..BlockView::empty("list")
                }),
            },
            DisplayBlock::Break => views.push(BlockView::empty("break")),
            DisplayBlock::Paragraph { spans } => views.push(BlockView {
                spans: spans.iter().map(SpanView::from).collect(),
                ..BlockView::empty("paragraph")
            }),
        }
    }

    views
}

#[derive(Template)]
#[template(path = "blueprint.html")]
pub struct BlueprintTemplate {
    pub title: &'static str,
    pub model: String,
    pub disclaimer: &'static str,
    pub blocks: Vec<BlockView>,
}

pub fn render_blueprint(
    blocks: &[DisplayBlock],
    model: Option<&str>,
) -> Result<String, TemplateRenderError> {
    let template = BlueprintTemplate {
        title: PAGE_TITLE,
        model: model.unwrap_or_default().to_string(),
        disclaimer: DISCLAIMER,
        blocks: project_blocks(blocks),
    };

    template.render().map_err(|err| {
        let err = TemplateRenderError::new(
            "presentation::views::render_blueprint",
            "Template rendering failed",
            err,
        );
        error!(target_module = err.source, error = %err.error, "{}", err.public_message);
        err
    })
}
