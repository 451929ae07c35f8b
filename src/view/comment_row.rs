//! One comment as wrapped terminal lines.
//!
//! A comment renders as `author: text`, wrapped at character boundaries so
//! CJK text without spaces still wraps. Wide characters are never split
//! across lines. [`measure`] and [`lines`] share the same wrapping, so a
//! measured height is exactly the number of painted lines.

use super::styles::RowStyles;
use ratatui::text::{Line, Span};
use std::ops::Range;
use unicode_width::UnicodeWidthChar;

/// Between the author name and the comment text.
pub const AUTHOR_SEPARATOR: &str = ": ";

/// Number of terminal lines the comment occupies at `width` columns.
///
/// Never less than one.
pub fn measure(author: &str, text: &str, width: u16) -> usize {
    wrap_ranges(&content(author, text), width).len()
}

/// Styled lines of the comment at `width` columns.
pub fn lines(author: &str, text: &str, width: u16, styles: &RowStyles) -> Vec<Line<'static>> {
    let content = content(author, text);
    let author_end = author.len();

    wrap_ranges(&content, width)
        .into_iter()
        .map(|range| {
            let mut spans = Vec::with_capacity(2);
            if range.start < author_end {
                let end = range.end.min(author_end);
                spans.push(Span::styled(content[range.start..end].to_string(), styles.author));
            }
            if range.end > author_end {
                let start = range.start.max(author_end);
                spans.push(Span::styled(content[start..range.end].to_string(), styles.text));
            }
            Line::from(spans)
        })
        .collect()
}

fn content(author: &str, text: &str) -> String {
    format!("{author}{AUTHOR_SEPARATOR}{text}")
}

/// Byte ranges of the wrapped lines. Line breaks in the text start a new
/// line; a zero width is treated as one column.
fn wrap_ranges(content: &str, width: u16) -> Vec<Range<usize>> {
    let width = usize::from(width.max(1));
    let mut ranges = Vec::new();
    let mut offset = 0;

    for paragraph in content.split('\n') {
        let line = paragraph.strip_suffix('\r').unwrap_or(paragraph);
        let mut start = offset;
        let mut used = 0;
        for (i, ch) in line.char_indices() {
            let ch_width = ch.width().unwrap_or(1);
            if used + ch_width > width && used > 0 {
                ranges.push(start..offset + i);
                start = offset + i;
                used = 0;
            }
            used += ch_width;
        }
        ranges.push(start..offset + line.len());
        offset += paragraph.len() + 1;
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::styles::ColorConfig;
    use unicode_width::UnicodeWidthStr;

    fn styles() -> RowStyles {
        RowStyles::with_color_config(ColorConfig::new(true))
    }

    fn plain(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn short_comment_is_one_line() {
        assert_eq!(measure("Al", "hi", 40), 1);
        assert_eq!(plain(&lines("Al", "hi", 40, &styles())), vec!["Al: hi"]);
    }

    #[test]
    fn long_ascii_comment_wraps_by_columns() {
        let text = "x".repeat(50);
        // "Al: " + 50 columns = 54 columns
        assert_eq!(measure("Al", &text, 20), 3);
    }

    #[test]
    fn wide_characters_are_not_split() {
        // "A: " is 3 columns, each kana is 2
        let rendered = plain(&lines("A", "テスト", 4, &styles()));

        assert_eq!(rendered, vec!["A: ", "テス", "ト"]);
        assert_eq!(measure("A", "テスト", 4), 3);
        for line in &rendered {
            assert!(line.width() <= 4);
        }
    }

    #[test]
    fn line_breaks_start_new_lines() {
        assert_eq!(plain(&lines("A", "one\r\ntwo", 40, &styles())), vec!["A: one", "two"]);
    }

    #[test]
    fn empty_text_still_occupies_a_line() {
        assert_eq!(measure("", "", 10), 1);
    }

    #[test]
    fn zero_width_wraps_every_character() {
        assert_eq!(measure("A", "x", 0), 4);
    }

    #[test]
    fn character_wider_than_line_gets_its_own_line() {
        let rendered = plain(&lines("A", "テ", 1, &styles()));
        assert_eq!(rendered, vec!["A", ":", " ", "テ"]);
    }

    #[test]
    fn author_span_is_styled_separately() {
        let styles = styles();
        let rendered = lines("Alice", "hello", 40, &styles);

        assert_eq!(rendered[0].spans.len(), 2);
        assert_eq!(rendered[0].spans[0].content, "Alice");
        assert_eq!(rendered[0].spans[0].style, styles.author);
        assert_eq!(rendered[0].spans[1].content, ": hello");
        assert_eq!(rendered[0].spans[1].style, styles.text);
    }

    #[test]
    fn long_author_name_keeps_its_style_across_lines() {
        let styles = styles();
        let rendered = lines("abcdef", "x", 4, &styles);

        assert_eq!(plain(&rendered), vec!["abcd", "ef: ", "x"]);
        assert_eq!(rendered[1].spans[0].style, styles.author);
        assert_eq!(rendered[1].spans[1].content, ": ");
    }
}
