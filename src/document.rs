use crate::{
    content::{PdfCanvas, PdfPage},
    engine::OutputTarget,
    font::{FontBook, GlyphSubset},
    info::Info,
    pagesize::{self, PageSize},
    refs::{FontRefs, PageRefs, RefAllocator},
    units::Px,
    ManuscriptError,
};
use pdf_writer::{Filter, Finish, Name, Pdf};
use std::{collections::BTreeMap, io::Write};

/// A PDF document that rendered pages are drawn into, one PDF page per
/// surface, then written out with a call to [Document::write]
pub struct Document {
    pub info: Option<Info>,
    pub fonts: FontBook,
    /// Paper every page is printed on; the canvas is scaled to fit it
    pub paper: PageSize,
    pub pages: Vec<PdfPage>,
    /// Glyphs drawn on any page, per font arena index
    pub(crate) subsets: BTreeMap<usize, GlyphSubset>,
}

impl Default for Document {
    fn default() -> Self {
        Document::new(FontBook::new())
    }
}

impl Document {
    /// An empty A4 document drawing text with `fonts`
    pub fn new(fonts: FontBook) -> Document {
        Document {
            info: None,
            fonts,
            paper: pagesize::A4,
            pages: Vec::new(),
            subsets: BTreeMap::new(),
        }
    }

    /// Sets information about the document. If not provided, no information block will be
    /// written to the PDF
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    /// Paper for pages created from now on
    pub fn set_paper(&mut self, paper: PageSize) {
        self.paper = paper;
    }

    /// Find a page by the id of the surface it was drawn on
    pub fn page(&self, surface_id: &str) -> Option<&PdfPage> {
        self.pages.iter().find(|page| page.surface_id == surface_id)
    }

    /// Write the entire document to the writer. The whole document is
    /// rendered in memory first.
    ///
    /// Only the fonts some page drew with are embedded. Each is cut down to
    /// the glyphs actually drawn, and only declares widths and unicode
    /// mappings for those.
    pub fn write<W: Write>(self, mut w: W) -> Result<(), ManuscriptError> {
        let Document {
            info,
            fonts,
            pages,
            subsets,
            ..
        } = self;

        let mut refs = RefAllocator::new();
        let catalog_id = refs.bump();
        let page_tree_id = refs.bump();

        let mut writer = Pdf::new();
        if let Some(info) = info {
            info.write(&mut refs, &mut writer);
        }

        let page_refs: Vec<PageRefs> = pages
            .iter()
            .map(|_| PageRefs::allocate(&mut refs))
            .collect();
        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs.iter().map(|r| r.page));

        let mut font_refs: BTreeMap<usize, FontRefs> = BTreeMap::new();
        for (id, font) in fonts.fonts.iter() {
            let Some(subset) = subsets.get(&id.index()).filter(|s| !s.is_empty()) else {
                continue;
            };
            let ids = FontRefs::allocate(&mut refs);
            font.write(&ids, id.index(), subset, &mut writer)?;
            log::debug!("embedded F{} with {} glyphs", id.index(), subset.len());
            font_refs.insert(id.index(), ids);
        }

        let page_count = pages.len();
        for (page, ids) in pages.into_iter().zip(page_refs.iter()) {
            let (width, height) = page.paper;
            let page_fonts: Vec<usize> = page.fonts_used().collect();

            let mut pdf_page = writer.page(ids.page);
            pdf_page.media_box(pdf_writer::Rect::new(0.0, 0.0, *width, *height));
            pdf_page.parent(page_tree_id);

            let mut resources = pdf_page.resources();
            let mut resource_fonts = resources.fonts();
            for font_index in page_fonts {
                if let Some(font) = font_refs.get(&font_index) {
                    resource_fonts.pair(Name(format!("F{font_index}").as_bytes()), font.type0);
                }
            }
            resource_fonts.finish();
            resources.finish();
            pdf_page.contents(ids.content);
            pdf_page.finish();

            let content = page.finish_content();
            let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
                &content,
                miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
            );
            writer
                .stream(ids.content, &compressed)
                .filter(Filter::FlateDecode);
        }

        let mut catalog = writer.catalog(catalog_id);
        catalog.pages(page_tree_id);
        catalog.finish();

        let bytes = writer.finish();
        log::info!(
            "wrote {} page PDF with {} embedded fonts ({} bytes)",
            page_count,
            font_refs.len(),
            bytes.len()
        );
        w.write_all(bytes.as_slice()).map_err(Into::into)
    }
}

impl OutputTarget for Document {
    type Surface<'a> = PdfCanvas<'a>;

    fn clear(&mut self) {
        self.pages.clear();
        self.subsets.clear();
    }

    fn create_surface(&mut self, id: &str, width: Px, height: Px) -> PdfCanvas<'_> {
        let index = self.pages.len();
        self.pages.push(PdfPage::new(id, (width, height), self.paper));
        PdfCanvas::new(&mut self.pages[index], &self.fonts, &mut self.subsets)
    }
}
