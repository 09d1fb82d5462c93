//! Output formats for a rendered strategy document.

use clap::ValueEnum;
use thiserror::Error;

use crate::{application::render::render_blocks, domain::blocks::DisplayBlock};

pub mod text;
pub mod views;

pub use views::TemplateRenderError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Terminal-friendly plain text.
    #[default]
    Text,
    /// Standalone HTML page.
    Html,
    /// Classified blocks as pretty-printed JSON.
    Json,
    /// The document exactly as the model wrote it.
    Markdown,
}

#[derive(Debug, Error)]
pub enum PresentationError {
    #[error(transparent)]
    Template(#[from] TemplateRenderError),
    #[error("failed to encode blocks as JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Options that only some formats honour.
#[derive(Debug, Clone, Default)]
pub struct PresentOptions {
    /// Wrap bold spans in ANSI escapes (text format).
    pub emphasis: bool,
    /// Model that produced the document (HTML format).
    pub model: Option<String>,
}

/// Render `content` in the requested format.
pub fn present(
    format: OutputFormat,
    content: &str,
    options: &PresentOptions,
) -> Result<String, PresentationError> {
    if format == OutputFormat::Markdown {
        return Ok(content.to_string());
    }

    let blocks = render_blocks(content);
    match format {
        OutputFormat::Text => Ok(text::render_text(&blocks, options.emphasis)),
        OutputFormat::Html => Ok(views::render_blueprint(&blocks, options.model.as_deref())?),
        OutputFormat::Json => render_json(&blocks),
        OutputFormat::Markdown => Ok(content.to_string()),
    }
}

fn render_json(blocks: &[DisplayBlock]) -> Result<String, PresentationError> {
    let mut encoded = serde_json::to_string_pretty(blocks)?;
    encoded.push('\n');
    Ok(encoded)
}
