use super::text::Line;
use std::num::NonZeroUsize;

/// The rows that go on one sheet, together with where the sheet sits in the
/// document. Pages are rebuilt from scratch on every render.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Zero-based position of this page in the document
    pub index: usize,
    /// Number of pages in the document
    pub count: usize,
    /// At most `rows` lines, top to bottom
    pub lines: Vec<Line>,
}

impl Page {
    /// The 1-based page number printed in the footer
    pub fn number(&self) -> usize {
        self.index + 1
    }

    pub fn is_last(&self) -> bool {
        self.number() == self.count
    }
}

/// Number of pages needed for `line_count` lines, `ceil(line_count / rows)`
pub fn page_count(line_count: usize, rows: NonZeroUsize) -> usize {
    line_count.div_ceil(rows.get())
}

/// Deal lines onto pages of `rows` lines each, in order. Every page but the
/// last is full. An empty `lines` gives no pages; callers that always want a
/// sheet should pass at least one (possibly empty) line.
pub fn paginate(lines: Vec<Line>, rows: NonZeroUsize) -> Vec<Page> {
    let count = page_count(lines.len(), rows);
    let mut pages = Vec::with_capacity(count);
    let mut lines = lines.into_iter().peekable();
    while lines.peek().is_some() {
        let index = pages.len();
        pages.push(Page {
            index,
            count,
            lines: lines.by_ref().take(rows.get()).collect(),
        });
    }
    pages
}
