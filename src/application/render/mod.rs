//! Markdown-subset renderer for model output.
//!
//! The renderer is a pure function: it accepts the raw text returned by the
//! model and produces an ordered list of [`DisplayBlock`]s, one per input line.
//! It never fails. Anything it does not recognise degrades to a plain
//! paragraph with its characters left intact.

mod inline;

use crate::domain::blocks::{DisplayBlock, HeadingLevel};

pub use inline::split_bold_spans;

/// Classification order matters: the longest heading marker is tested first.
const HEADING_LEVELS: [HeadingLevel; 3] = [HeadingLevel::H3, HeadingLevel::H2, HeadingLevel::H1];
const LIST_MARKERS: [&str; 2] = ["- ", "* "];

/// Render raw model output into display blocks.
///
/// Lines are split on `\n` with a trailing `\r` removed, so CRLF input behaves
/// like LF input. Splitting the empty string yields one empty line, which means
/// empty input renders as a single [`DisplayBlock::Break`].
pub fn render_blocks(source: &str) -> Vec<DisplayBlock> {
    source.split('\n').map(classify_line).collect()
}

/// Classify a single line. The first matching rule wins.
pub fn classify_line(line: &str) -> DisplayBlock {
    let line = line.strip_suffix('\r').unwrap_or(line);

    for level in HEADING_LEVELS {
        if let Some(text) = line.strip_prefix(level.marker()) {
            return DisplayBlock::heading(level, text);
        }
    }

    for marker in LIST_MARKERS {
        if let Some(text) = line.strip_prefix(marker) {
            return DisplayBlock::list_item(text);
        }
    }

    if line.trim().is_empty() {
        return DisplayBlock::Break;
    }

    DisplayBlock::paragraph(split_bold_spans(line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::blocks::Span;

    #[test]
    fn headings_are_classified_by_marker() {
        assert_eq!(
            render_blocks("### foo"),
            vec![DisplayBlock::heading(HeadingLevel::H3, "foo")]
        );
        assert_eq!(
            render_blocks("## Business Plan"),
            vec![DisplayBlock::heading(HeadingLevel::H2, "Business Plan")]
        );
        assert_eq!(
            render_blocks("# LedgerLoop"),
            vec![DisplayBlock::heading(HeadingLevel::H1, "LedgerLoop")]
        );
    }

    #[test]
    fn heading_markers_require_trailing_space() {
        for line in ["#foo", "#", "##", "###", "####"] {
            assert_eq!(
                classify_line(line),
                DisplayBlock::paragraph(vec![Span::plain(line)]),
                "`{line}` must not be a heading"
            );
        }
    }

    #[test]
    fn deeper_headings_fall_through_to_paragraphs() {
        assert_eq!(
            classify_line("#### Appendix"),
            DisplayBlock::paragraph(vec![Span::plain("#### Appendix")])
        );
    }

    #[test]
    fn heading_text_keeps_inline_markers_verbatim() {
        assert_eq!(
            classify_line("## **Phase 1** - MVP"),
            DisplayBlock::heading(HeadingLevel::H2, "**Phase 1** - MVP")
        );
    }

    #[test]
    fn list_items_strip_one_marker() {
        assert_eq!(
            classify_line("- Build an MVP"),
            DisplayBlock::list_item("Build an MVP")
        );
        assert_eq!(classify_line("* Ship fast"), DisplayBlock::list_item("Ship fast"));
        assert_eq!(classify_line("- - nested"), DisplayBlock::list_item("- nested"));
        assert_eq!(classify_line("- "), DisplayBlock::list_item(""));
    }

    #[test]
    fn list_markers_require_trailing_space() {
        assert_eq!(
            classify_line("-dash"),
            DisplayBlock::paragraph(vec![Span::plain("-dash")])
        );
        assert_eq!(
            classify_line("  - indented"),
            DisplayBlock::paragraph(vec![Span::plain("  - indented")])
        );
    }

    #[test]
    fn star_list_marker_wins_over_bold() {
        assert_eq!(
            classify_line("* **Revenue**: subscriptions"),
            DisplayBlock::list_item("**Revenue**: subscriptions")
        );
    }

    #[test]
    fn blank_lines_become_breaks() {
        assert_eq!(render_blocks("a\n\nb").len(), 3);
        assert_eq!(classify_line(""), DisplayBlock::Break);
        assert_eq!(classify_line("   \t"), DisplayBlock::Break);
    }

    #[test]
    fn empty_input_yields_single_break() {
        assert_eq!(render_blocks(""), vec![DisplayBlock::Break]);
    }

    #[test]
    fn trailing_newline_yields_trailing_break() {
        assert_eq!(
            render_blocks("Done\n"),
            vec![
                DisplayBlock::paragraph(vec![Span::plain("Done")]),
                DisplayBlock::Break
            ]
        );
    }

    #[test]
    fn crlf_input_matches_lf_input() {
        assert_eq!(
            render_blocks("# Title\r\n- item\r\n\r\ntext"),
            render_blocks("# Title\n- item\n\ntext")
        );
    }

    #[test]
    fn bold_label_paragraph() {
        assert_eq!(
            classify_line("**Revenue Model**: subscriptions"),
            DisplayBlock::paragraph(vec![
                Span::bold("Revenue Model"),
                Span::plain(": subscriptions")
            ])
        );
    }

    #[test]
    fn one_block_per_line_in_order() {
        let source = "# Blueprint\n## Idea\nA **niche** tool.\n- first\n* second\n\n### Stack\n[link](x) `code`";
        let blocks = render_blocks(source);

        assert_eq!(
            blocks,
            vec![
                DisplayBlock::heading(HeadingLevel::H1, "Blueprint"),
                DisplayBlock::heading(HeadingLevel::H2, "Idea"),
                DisplayBlock::paragraph(vec![
                    Span::plain("A "),
                    Span::bold("niche"),
                    Span::plain(" tool.")
                ]),
                DisplayBlock::list_item("first"),
                DisplayBlock::list_item("second"),
                DisplayBlock::Break,
                DisplayBlock::heading(HeadingLevel::H3, "Stack"),
                DisplayBlock::paragraph(vec![Span::plain("[link](x) `code`")]),
            ]
        );
    }

    #[test]
    fn rendering_is_deterministic() {
        let source = "# A\n**b** c **d\n- e\n\n";
        assert_eq!(render_blocks(source), render_blocks(source));
    }
}
