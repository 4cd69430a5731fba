use crate::refs::RefAllocator;
use chrono::{DateTime, Datelike, Local, Offset, TimeZone, Timelike};
use pdf_writer::{Date as PDate, Pdf, TextStr};

/// Document metadata written into the PDF information dictionary
#[derive(Default, Debug, Clone)]
pub struct Info {
    pub title: Option<String>,
    /// The author(s) of the document. No prescribed format.
    pub author: Option<String>,
    pub subject: Option<String>,
    /// Comma separated, as Adobe Acrobat suggests
    pub keywords: Option<String>,
}

impl Info {
    /// Create a new info block, with all metadata set to [None]
    pub fn new() -> Info {
        Info::default()
    }

    /// Metadata for a manuscript whose first line is `first_line`: that line
    /// becomes the title, the grid size and page count the subject
    pub fn for_manuscript(first_line: &str, rows: usize, cols: usize, pages: usize) -> Info {
        let title = first_line.trim();
        Info {
            title: (!title.is_empty()).then(|| title.to_string()),
            author: None,
            subject: Some(format!("{rows}×{cols} 稿纸，共 {pages} 页")),
            keywords: Some("manuscript, 稿纸".to_string()),
        }
    }

    pub fn title<S: ToString>(&mut self, title: S) -> &mut Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn author<S: ToString>(&mut self, author: S) -> &mut Self {
        self.author = Some(author.to_string());
        self
    }

    pub fn subject<S: ToString>(&mut self, subject: S) -> &mut Self {
        self.subject = Some(subject.to_string());
        self
    }

    pub fn keywords<S: ToString>(&mut self, keywords: S) -> &mut Self {
        self.keywords = Some(keywords.to_string());
        self
    }

    pub(crate) fn write(&self, refs: &mut RefAllocator, writer: &mut Pdf) {
        let mut info = writer.document_info(refs.bump());
        let fields = [
            (&self.title, "title"),
            (&self.author, "author"),
            (&self.subject, "subject"),
            (&self.keywords, "keywords"),
        ];
        for (value, key) in fields {
            let Some(value) = value else { continue };
            let value = TextStr(value.as_str());
            match key {
                "title" => info.title(value),
                "author" => info.author(value),
                "subject" => info.subject(value),
                _ => info.keywords(value),
            };
        }
        info.creator(TextStr(concat!(
            env!("CARGO_PKG_NAME"),
            " v",
            env!("CARGO_PKG_VERSION")
        )));
        info.creation_date(pdf_date(Local::now()));
    }
}

/// A timestamp as a PDF date, keeping its UTC offset
fn pdf_date<Tz: TimeZone>(at: DateTime<Tz>) -> PDate {
    let offset = at.offset().fix().local_minus_utc();
    let offset_hours = offset / (60 * 60);
    let offset_minutes = ((offset - offset_hours * 60 * 60) / 60).abs();
    PDate::new(at.year() as u16)
        .month(at.month() as u8)
        .day(at.day() as u8)
        .hour(at.hour() as u8)
        .minute(at.minute() as u8)
        .second(at.second() as u8)
        .utc_offset_hour(offset_hours as i8)
        .utc_offset_minute(offset_minutes as u8)
}
