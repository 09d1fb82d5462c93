use crate::domain::blocks::Span;

const BOLD_DELIMITER: &str = "**";

/// Split a paragraph line into plain and bold spans.
///
/// Bold runs are balanced `**…**` pairs matched non-greedily from left to
/// right. A delimiter without a partner stays in the surrounding plain text.
/// Empty plain runs (between adjacent pairs or at the line edges) are not
/// emitted.
pub fn split_bold_spans(line: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut cursor = 0;

    while let Some(open) = find_from(line, cursor) {
        let inner_start = open + BOLD_DELIMITER.len();
        let Some(close) = find_from(line, inner_start) else {
            break;
        };

        push_plain(&mut spans, &line[cursor..open]);
        spans.push(Span::bold(&line[inner_start..close]));
        cursor = close + BOLD_DELIMITER.len();
    }

    push_plain(&mut spans, &line[cursor..]);
    spans
}

fn find_from(haystack: &str, from: usize) -> Option<usize> {
    haystack[from..]
        .find(BOLD_DELIMITER)
        .map(|offset| from + offset)
}

fn push_plain(spans: &mut Vec<Span>, text: &str) {
    if !text.is_empty() {
        spans.push(Span::plain(text));
    }
}
