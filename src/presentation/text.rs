use crate::domain::blocks::{DisplayBlock, HeadingLevel, Span};

const BOLD_ON: &str = "\x1b[1m";
const BOLD_OFF: &str = "\x1b[0m";
const BULLET: &str = "  • ";

/// Lay blocks out for a terminal, one output line per block.
///
/// First and second level headings are underlined; `emphasis` wraps bold
/// spans in ANSI escapes.
pub fn render_text(blocks: &[DisplayBlock], emphasis: bool) -> String {
    let mut out = String::new();

    for block in blocks {
        match block {
            DisplayBlock::Heading { level, text } => {
                push_line(&mut out, text);
                let rule = match level {
                    HeadingLevel::H1 => Some('='),
                    HeadingLevel::H2 => Some('-'),
                    HeadingLevel::H3 => None,
                };
                if let Some(rule) = rule {
                    let width = text.chars().count().max(1);
                    push_line(&mut out, &rule.to_string().repeat(width));
                }
            }
            DisplayBlock::ListItem { text } => {
                out.push_str(BULLET);
                push_line(&mut out, text);
            }
            DisplayBlock::Break => out.push('\n'),
            DisplayBlock::Paragraph { spans } => {
                for span in spans {
                    push_span(&mut out, span, emphasis);
                }
                out.push('\n');
            }
        }
    }

    out
}

fn push_line(out: &mut String, text: &str) {
    out.push_str(text);
    out.push('\n');
}

fn push_span(out: &mut String, span: &Span, emphasis: bool) {
    if emphasis && span.is_bold() {
        out.push_str(BOLD_ON);
        out.push_str(span.text());
        out.push_str(BOLD_OFF);
    } else {
        out.push_str(span.text());
    }
}
