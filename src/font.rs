use crate::{refs::FontRefs, units::Px, ManuscriptError};
use id_arena::{Arena, Id};
use owned_ttf_parser::{AsFaceRef, GlyphId, OutlineBuilder, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Filter, Finish, Name, Pdf, Str,
};
use std::collections::{BTreeMap, HashMap};
use std::fmt::Write as _;
use subsetter::GlyphRemapper;

/// A parsed TrueType or OpenType face. Backends use it to find glyphs for the
/// characters on a page; the PDF backend also embeds it.
pub struct Font {
    pub face: OwnedFace,
}

impl Font {
    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, ManuscriptError> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        Ok(Font { face })
    }

    /// Load a font file from disk
    pub fn load_file<P: AsRef<std::path::Path>>(path: P) -> Result<Font, ManuscriptError> {
        Font::load(std::fs::read(path)?)
    }

    fn name_entry(&self, name_id: u16) -> Option<String> {
        self.face
            .as_face_ref()
            .names()
            .into_iter()
            .find(|name| name.name_id == name_id && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// The full name of the face, if it has one
    pub fn name(&self) -> Option<String> {
        self.name_entry(owned_ttf_parser::name_id::FULL_NAME)
    }

    /// The family name of the face, if it has one
    pub fn family(&self) -> Option<String> {
        self.name_entry(owned_ttf_parser::name_id::FAMILY)
    }

    pub fn units_per_em(&self) -> f32 {
        self.face.as_face_ref().units_per_em() as f32
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face.as_face_ref().glyph_index(ch).map(|i| i.0)
    }

    /// The glyph drawn for `ch`: its own, else the replacement character, else
    /// `.notdef`
    pub fn glyph_id_or_fallback(&self, ch: char) -> u16 {
        self.glyph_id(ch)
            .or_else(|| self.glyph_id('\u{FFFD}'))
            .unwrap_or(0)
    }

    /// Horizontal advance of a glyph at the given size
    pub fn advance(&self, glyph: u16, size: Px) -> Px {
        let advance = self
            .face
            .as_face_ref()
            .glyph_hor_advance(GlyphId(glyph))
            .unwrap_or_default() as f32;
        size * (advance / self.units_per_em())
    }

    /// How far below the middle of the em box the baseline sits, for text
    /// anchored on its vertical middle
    pub fn middle_to_baseline(&self, size: Px) -> Px {
        let face = self.face.as_face_ref();
        let middle = (face.ascender() as f32 + face.descender() as f32) / 2.0;
        size * (middle / self.units_per_em())
    }

    /// Trace a glyph's outline in font units, y pointing up. Returns false
    /// for glyphs without an outline, such as spaces.
    pub fn outline(&self, glyph: u16, builder: &mut dyn OutlineBuilder) -> bool {
        self.face
            .as_face_ref()
            .outline_glyph(GlyphId(glyph), builder)
            .is_some()
    }

    /// Which outline format the face carries, which decides how the PDF
    /// backend embeds it
    pub fn outlines(&self) -> Outlines {
        if self.face.as_face_ref().tables().cff.is_some() {
            Outlines::Cff
        } else {
            Outlines::TrueType
        }
    }

    /// Embed the glyphs in `subset` as a Type0 font named `F{font_index}`
    pub(crate) fn write(
        &self,
        refs: &FontRefs,
        font_index: usize,
        subset: &GlyphSubset,
        writer: &mut Pdf,
    ) -> Result<(), ManuscriptError> {
        let outlines = self.outlines();
        let program = match subsetter::subset(self.face.as_slice(), 0, &subset.remapper) {
            Ok(program) => Program::Subset(program),
            Err(err) if outlines == Outlines::TrueType => {
                log::warn!("could not subset font F{font_index}: {err}, embedding all of it");
                Program::Full
            }
            Err(err) => {
                return Err(ManuscriptError::Subset {
                    font: self.name().unwrap_or_else(|| format!("F{font_index}")),
                    reason: err.to_string(),
                })
            }
        };
        self.write_dictionaries(refs, font_index, outlines, &program, subset, writer);

        let bytes = match &program {
            Program::Subset(bytes) => bytes.as_slice(),
            Program::Full => self.face.as_slice(),
        };
        let compressed = compress(bytes);
        let mut data = writer.stream(refs.data, &compressed);
        data.filter(Filter::FlateDecode);
        match outlines {
            Outlines::TrueType => {
                data.pair(Name(b"Length1"), bytes.len() as i32);
            }
            Outlines::Cff => {
                data.pair(Name(b"Subtype"), Name(b"OpenType"));
            }
        }
        data.finish();

        if matches!(program, Program::Full) {
            let map = compress(&cid_to_gid_map(subset));
            writer
                .stream(refs.cid_to_gid, &map)
                .filter(Filter::FlateDecode);
        }

        let cmap = to_unicode_cmap(subset.glyphs.iter().map(|(&cid, &(_, ch))| (cid, ch)));
        writer
            .stream(refs.to_unicode, &compress(cmap.as_bytes()))
            .filter(Filter::FlateDecode);
        Ok(())
    }

    fn write_dictionaries(
        &self,
        refs: &FontRefs,
        font_index: usize,
        outlines: Outlines,
        program: &Program,
        subset: &GlyphSubset,
        writer: &mut Pdf,
    ) {
        let face = self.face.as_face_ref();
        let base_name = format!("F{font_index}");
        let scaling = 1000.0 / self.units_per_em();

        let mut font = writer.type0_font(refs.type0);
        font.base_font(Name(base_name.as_bytes()));
        font.encoding_predefined(Name(b"Identity-H"));
        font.descendant_font(refs.cid);
        font.to_unicode(refs.to_unicode);
        font.finish();

        let mut cid_font = writer.cid_font(refs.cid);
        cid_font.subtype(match outlines {
            Outlines::TrueType => CidFontType::Type2,
            Outlines::Cff => CidFontType::Type0,
        });
        cid_font.base_font(Name(base_name.as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(refs.descriptor);
        cid_font.default_width(1000.0);

        // only the glyphs drawn somewhere in the document get an explicit
        // width, in runs of consecutive ids
        let cid_widths: Vec<(u16, f32)> = subset
            .glyphs
            .iter()
            .map(|(&cid, &(glyph, _))| {
                let advance = face.glyph_hor_advance(GlyphId(glyph)).unwrap_or_default();
                (cid, advance as f32 * scaling)
            })
            .collect();
        let mut widths = cid_font.widths();
        for (start, run) in width_runs(&cid_widths) {
            widths.consecutive(start, run);
        }
        widths.finish();
        if outlines == Outlines::TrueType {
            match program {
                Program::Subset(_) => {
                    cid_font.cid_to_gid_map_predefined(Name(b"Identity"));
                }
                Program::Full => {
                    cid_font.cid_to_gid_map_stream(refs.cid_to_gid);
                }
            }
        }
        cid_font.finish();

        let bbox = face.global_bounding_box();
        let mut flags = FontFlags::SYMBOLIC;
        if face.is_monospaced() {
            flags.set(FontFlags::FIXED_PITCH, true);
        }
        if face.is_italic() {
            flags.set(FontFlags::ITALIC, true);
        }
        let family = self.family().unwrap_or_else(|| base_name.clone());
        let mut descriptor = writer.font_descriptor(refs.descriptor);
        descriptor.name(Name(base_name.as_bytes()));
        descriptor.family(Str(family.as_bytes()));
        descriptor.flags(flags);
        descriptor.bbox(pdf_writer::Rect {
            x1: bbox.x_min as f32 * scaling,
            y1: bbox.y_min as f32 * scaling,
            x2: bbox.x_max as f32 * scaling,
            y2: bbox.y_max as f32 * scaling,
        });
        descriptor.italic_angle(if face.is_italic() { -12.0 } else { 0.0 });
        descriptor.ascent(face.ascender() as f32 * scaling);
        descriptor.descent(face.descender() as f32 * scaling);
        descriptor.cap_height(
            face.capital_height()
                .map(|h| h as f32 * scaling)
                .unwrap_or(face.ascender() as f32 * scaling),
        );
        descriptor.stem_v(80.0);
        match outlines {
            Outlines::TrueType => descriptor.font_file2(refs.data),
            Outlines::Cff => descriptor.font_file3(refs.data),
        };
        descriptor.finish();
    }
}

/// Outline format of a face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outlines {
    /// `glyf` outlines, embedded as a CIDFontType2 with `FontFile2`
    TrueType,
    /// `CFF ` outlines, embedded as a CIDFontType0 with an OpenType `FontFile3`
    Cff,
}

/// The font program that ends up in the file
enum Program {
    Subset(Vec<u8>),
    /// Subsetting failed; glyphs keep their original ids inside the program
    Full,
}

/// The glyphs of one face drawn somewhere in a document.
///
/// Glyphs are renumbered densely in the order they are first drawn. The new
/// numbers are what content streams show, and what the subset font program
/// is built with.
pub struct GlyphSubset {
    remapper: GlyphRemapper,
    /// Drawn glyphs by their new id, with their id in the face and the
    /// character each was first drawn for
    glyphs: BTreeMap<u16, (u16, char)>,
}

impl Default for GlyphSubset {
    fn default() -> Self {
        GlyphSubset::new()
    }
}

impl GlyphSubset {
    pub fn new() -> GlyphSubset {
        GlyphSubset {
            remapper: GlyphRemapper::new(),
            glyphs: BTreeMap::new(),
        }
    }

    /// Record that `glyph` was drawn for `ch` and return the id to show it with
    pub fn add(&mut self, glyph: u16, ch: char) -> u16 {
        let cid = self.remapper.remap(glyph);
        self.glyphs.entry(cid).or_insert((glyph, ch));
        cid
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

/// Split `(id, width)` pairs, sorted by id, into runs of consecutive ids
fn width_runs(widths: &[(u16, f32)]) -> Vec<(u16, Vec<f32>)> {
    let mut runs: Vec<(u16, Vec<f32>)> = Vec::new();
    for &(id, width) in widths {
        match runs.last_mut() {
            Some((start, run)) if *start as usize + run.len() == id as usize => run.push(width),
            _ => runs.push((id, vec![width])),
        }
    }
    runs
}

/// A CIDToGIDMap stream body: the original glyph id of every new id, two
/// bytes each, big-endian
fn cid_to_gid_map(subset: &GlyphSubset) -> Vec<u8> {
    let len = subset.glyphs.keys().next_back().map_or(0, |&cid| cid as usize + 1);
    let mut map = vec![0u8; len * 2];
    for (&cid, &(glyph, _)) in subset.glyphs.iter() {
        let at = cid as usize * 2;
        map[at..at + 2].copy_from_slice(&glyph.to_be_bytes());
    }
    map
}

fn compress(bytes: &[u8]) -> Vec<u8> {
    miniz_oxide::deflate::compress_to_vec_zlib(
        bytes,
        miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
    )
}

/// A CMap mapping the drawn glyph ids back to the characters they came from,
/// so text can be copied out of the PDF
fn to_unicode_cmap(used: impl Iterator<Item = (u16, char)>) -> String {
    let mut map = String::from(
        "/CIDInit /ProcSet findresource begin\n\
         12 dict begin\n\
         begincmap\n\
         /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
         /CMapName /Adobe-Identity-UCS def\n\
         /CMapType 2 def\n\
         1 begincodespacerange\n\
         <0000> <FFFF>\n\
         endcodespacerange\n",
    );

    let entries: Vec<(u16, char)> = used.collect();
    // bfchar blocks hold at most 100 entries
    for block in entries.chunks(100) {
        let _ = writeln!(map, "{} beginbfchar", block.len());
        for &(gid, ch) in block {
            let mut utf16 = [0u16; 2];
            let units: String = ch
                .encode_utf16(&mut utf16)
                .iter()
                .map(|unit| format!("{unit:04x}"))
                .collect();
            let _ = writeln!(map, "<{gid:04x}> <{units}>");
        }
        map.push_str("endbfchar\n");
    }

    map.push_str("endcmap CMapName currentdict /CMap defineresource pop end end\n");
    map
}

/// The faces available to a backend, looked up by family name.
///
/// The first face added is the fallback: it is used for the generic
/// `sans-serif` family and for any family that was never registered.
#[derive(Default)]
pub struct FontBook {
    pub fonts: Arena<Font>,
    families: HashMap<String, Id<Font>>,
    fallback: Option<Id<Font>>,
}

impl FontBook {
    pub fn new() -> FontBook {
        FontBook::default()
    }

    /// Add a face under the family name it declares
    pub fn add(&mut self, font: Font) -> Id<Font> {
        let family = font.family();
        let id = self.fonts.alloc(font);
        if let Some(family) = family {
            self.alias(&family, id);
        }
        self.fallback.get_or_insert(id);
        id
    }

    /// Make `family` resolve to an already added face
    pub fn alias(&mut self, family: &str, id: Id<Font>) {
        self.families.insert(family.trim().to_lowercase(), id);
    }

    pub fn is_empty(&self) -> bool {
        self.fallback.is_none()
    }

    /// Whether `family` resolves to a face of its own rather than the fallback
    pub fn contains(&self, family: &str) -> bool {
        self.families.contains_key(&family.trim().to_lowercase())
    }

    /// Families with a face of their own, sorted
    pub fn families(&self) -> Vec<&str> {
        let mut families: Vec<&str> = self.families.keys().map(String::as_str).collect();
        families.sort_unstable();
        families
    }

    /// The face for `family`, falling back to the first face added. [None]
    /// only when the book is empty.
    pub fn resolve(&self, family: &str) -> Option<Id<Font>> {
        let key = family.trim().to_lowercase();
        self.families.get(&key).copied().or_else(|| {
            log::debug!("no face registered for `{family}`, using the fallback");
            self.fallback
        })
    }

    pub fn get(&self, id: Id<Font>) -> &Font {
        &self.fonts[id]
    }
}
