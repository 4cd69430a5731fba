use derive_more::{Deref, Display, From};
use std::num::NonZeroUsize;

/// One row of characters on the paper. Either a whole source line that fits
/// in a row, a fixed-width piece of a longer one, or empty for a blank
/// source line. Never longer than the number of columns it was split for.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deref, Display, From)]
pub struct Line(String);

impl Line {
    /// An empty row, used for blank source lines and for empty documents
    pub fn empty() -> Line {
        Line(String::new())
    }

    /// Number of cells the line occupies
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<&str> for Line {
    fn from(s: &str) -> Self {
        Line(s.to_string())
    }
}

/// Collapse `\r\n` and lone `\r` into `\n`; nothing else changes
pub fn normalize(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Split normalized text into rows of at most `cols` characters.
///
/// Every `\n` ends a row. Source lines longer than `cols` are cut into
/// consecutive pieces of exactly `cols` characters, the final piece taking
/// whatever is left. Blank source lines become empty rows, so the number of
/// rows is never less than the number of source lines. Characters are
/// counted as Unicode scalar values.
pub fn split_lines(text: &str, cols: NonZeroUsize) -> Vec<Line> {
    let cols = cols.get();
    let mut lines = Vec::new();
    for source in text.split('\n') {
        if source.is_empty() {
            lines.push(Line::empty());
            continue;
        }

        let chars: Vec<char> = source.chars().collect();
        lines.extend(
            chars
                .chunks(cols)
                .map(|chunk| Line(chunk.iter().collect())),
        );
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn strings(lines: &[Line]) -> Vec<&str> {
        lines.iter().map(|l| l.as_str()).collect()
    }

    #[test]
    fn normalizes_every_line_ending() {
        assert_eq!(normalize("a\r\nb\rc\nd"), "a\nb\nc\nd");
        assert_eq!(normalize("\r\r\n"), "\n\n");
        assert_eq!(normalize("无换行"), "无换行");
    }

    #[test]
    fn splits_on_newlines() {
        let lines = split_lines("AB\nCD", cols(20));
        assert_eq!(strings(&lines), vec!["AB", "CD"]);
    }

    #[test]
    fn wraps_long_lines_at_the_column_count() {
        let text = "字".repeat(45);
        let lines = split_lines(&text, cols(20));
        let lengths: Vec<usize> = lines.iter().map(Line::char_count).collect();
        assert_eq!(lengths, vec![20, 20, 5]);
    }

    #[test]
    fn exact_multiple_has_no_trailing_empty_chunk() {
        let lines = split_lines(&"x".repeat(40), cols(20));
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn blank_lines_are_kept() {
        let lines = split_lines("一\n\n二\n", cols(20));
        assert_eq!(strings(&lines), vec!["一", "", "二", ""]);
    }

    #[test]
    fn empty_text_is_one_empty_line() {
        assert_eq!(split_lines("", cols(20)), vec![Line::empty()]);
    }

    #[test]
    fn counts_characters_not_bytes() {
        let lines = split_lines("春眠不觉晓处处闻啼鸟", cols(5));
        assert_eq!(strings(&lines), vec!["春眠不觉晓", "处处闻啼鸟"]);
    }
}
