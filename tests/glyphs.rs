mod common;

use manuscript_gen::{
    Document, Font, FontBook, Outlines, Px, RasterSurface, RasterTarget, RenderEngine,
    RenderOptions,
};

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/DejaVuSans.ttf");

fn dejavu() -> Font {
    Font::load_file(FIXTURE).expect("fixture font loads")
}

fn book() -> FontBook {
    let mut fonts = FontBook::new();
    fonts.add(dejavu());
    fonts
}

/// Rows and columns holding dark pixels inside a box, as (min_y, max_y, min_x, max_x)
fn ink_bounds(
    surface: &RasterSurface,
    x: (u32, u32),
    y: (u32, u32),
) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for py in y.0..y.1 {
        for px in x.0..x.1 {
            let Some([r, g, b, _]) = surface.pixel(px, py) else {
                continue;
            };
            // the green ruling is bright in its green channel
            if r < 128 && g < 128 && b < 128 {
                bounds = Some(match bounds {
                    None => (py, py, px, px),
                    Some((y0, y1, x0, x1)) => (y0.min(py), y1.max(py), x0.min(px), x1.max(px)),
                });
            }
        }
    }
    bounds
}

#[test]
fn fixture_metrics() {
    let font = dejavu();
    assert_eq!(font.family().as_deref(), Some("DejaVu Sans"));
    assert_eq!(font.outlines(), Outlines::TrueType);
    assert_ne!(font.glyph_id('H'), None);
    assert_eq!(font.glyph_id('稿'), None);
    // DejaVu has a replacement character for the CJK it lacks
    assert_ne!(font.glyph_id_or_fallback('稿'), 0);

    // (ascender + descender) / 2 = (1901 - 483) / 2 of 2048 units
    let drop = *font.middle_to_baseline(Px(50.0));
    assert!((drop - 17.31).abs() < 0.05, "{drop}");
}

#[test]
fn glyphs_are_centred_on_the_cell_midline() {
    common::init_logging();
    let mut engine = RenderEngine::default();
    let mut target = RasterTarget::new(book());
    engine.render_into("HH", &RenderOptions::default(), &mut target);

    let surface = target.surface("page-surface-1").expect("surface exists");
    // first cell spans x 160..240 and y 192..272, its midline is y = 232
    let (top, bottom, left, right) =
        ink_bounds(surface, (161, 239), (193, 271)).expect("first H is drawn");
    let middle = (top + bottom) as f32 / 2.0;
    assert!((middle - 232.0).abs() <= 3.0, "ink spans rows {top}..{bottom}");
    // a 50px H is about 36px tall
    assert!((32..=40).contains(&(bottom - top)), "ink spans rows {top}..{bottom}");
    // drawn from the left inset of (80 - 50) / 2
    assert!(left >= 175 && right < 240, "ink spans columns {left}..{right}");

    let second = ink_bounds(surface, (241, 319), (193, 271)).expect("second H is drawn");
    assert_eq!((second.0, second.1), (top, bottom));
    assert_eq!(second.2 - left, 80);

    // the third cell stays empty
    assert_eq!(ink_bounds(surface, (321, 399), (193, 271)), None);
}

#[test]
fn footer_text_is_drawn() {
    let mut engine = RenderEngine::default();
    let mut target = RasterTarget::new(book());
    engine.render_into("", &RenderOptions::default(), &mut target);

    let surface = &target.surfaces()[0];
    // the footer is anchored at (1508, 2482) and runs to the right
    assert!(ink_bounds(surface, (1500, 1920), (2440, 2540)).is_some());
    assert_eq!(ink_bounds(surface, (161, 239), (193, 271)), None);
}

#[test]
fn pdf_embeds_a_subset_of_the_face() {
    common::init_logging();
    let mut engine = RenderEngine::default();
    let mut doc = Document::new(book());
    // repeated letters and a character DejaVu lacks, over two sheets
    let text = format!("{}Hello, 稿纸", "ab".repeat(210));
    let pages = engine.render_into(&text, &RenderOptions::default(), &mut doc);
    assert_eq!(pages.len(), 2);
    for page in doc.pages.iter() {
        assert_eq!(page.fonts_used().collect::<Vec<_>>(), vec![0]);
    }

    let mut pdf: Vec<u8> = Vec::new();
    doc.write(&mut pdf).expect("can write PDF");
    let text = String::from_utf8_lossy(&pdf);
    assert!(text.contains("/Subtype /Type0"));
    assert!(text.contains("/Encoding /Identity-H"));
    assert!(text.contains("/Subtype /CIDFontType2"));
    assert!(text.contains("/CIDToGIDMap /Identity"));
    assert!(text.contains("/W ["));
    assert!(text.contains("/ToUnicode"));
    assert!(text.contains("/FontFile2"));
    // one embedded font, referenced from the resources of both pages
    assert_eq!(text.matches("/Subtype /Type0").count(), 1);
    assert_eq!(text.matches("/Font <<").count(), 2);
    assert!(pdf.len() < std::fs::metadata(FIXTURE).map_or(0, |m| m.len() as usize) / 4);
}
