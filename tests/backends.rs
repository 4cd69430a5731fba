mod common;

use manuscript_gen::{
    pagesize, Document, GridPattern, Info, ManuscriptError, RasterTarget, RenderEngine,
    RenderOptions,
};

const GREEN: [u8; 4] = [0x33, 0xcc, 0x33, 0xff];
const WHITE: [u8; 4] = [0xff, 0xff, 0xff, 0xff];

#[test]
fn pdf_has_a_page_per_sheet() {
    common::init_logging();
    let mut engine = RenderEngine::default();
    let mut doc = Document::default();
    doc.set_paper(pagesize::B5);
    // no font is registered, so only the ruling ends up in the file
    let pages = engine.render_into(&"字".repeat(850), &RenderOptions::default(), &mut doc);
    assert_eq!(pages.len(), 3);
    assert_eq!(doc.pages.len(), 3);
    assert_eq!(doc.pages[2].surface_id, "page-surface-3");
    assert!(doc.pages.iter().all(|p| p.fonts_used().count() == 0));

    doc.set_info(Info::for_manuscript("字", 20, 20, pages.len()));
    let mut pdf: Vec<u8> = Vec::new();
    doc.write(&mut pdf).expect("can write PDF");
    let text = String::from_utf8_lossy(&pdf);
    assert!(text.starts_with("%PDF-"));
    assert!(text.contains("/Count 3"));
    assert!(!text.contains("/Type0"));
}

#[test]
fn png_pages_show_paper_and_ruling() {
    common::init_logging();
    let mut engine = RenderEngine::default();
    let mut target = RasterTarget::default();
    let options = RenderOptions {
        grid_pattern: GridPattern::Cross,
        ..Default::default()
    };
    engine.render_into("", &options, &mut target);
    assert_eq!(target.surfaces().len(), 1);

    let surface = target.surface("page-surface-1").expect("surface exists");
    assert_eq!((surface.width(), surface.height()), (1920, 2592));
    // paper in the margin and in the spacing band above the first row
    assert_eq!(surface.pixel(10, 10), Some(WHITE));
    assert_eq!(surface.pixel(500, 175), Some(WHITE));
    // the top of the first row of cells, and the left edge of the second cell
    assert_eq!(surface.pixel(500, 192), Some(GREEN));
    assert_eq!(surface.pixel(240, 230), Some(GREEN));

    // the vertical bisector of the first cell is dashed
    let column: Vec<[u8; 4]> = (196..268)
        .filter_map(|y| surface.pixel(200, y))
        .collect();
    assert!(column.iter().filter(|&&p| p == GREEN).count() > 10);
    assert!(column.iter().filter(|&&p| p == WHITE).count() > 10);

    let (name, png) = target.export_page(0).expect("page exports");
    assert_eq!(name, "page_1.png");
    let decoded = image::load_from_memory(&png).expect("valid PNG").to_rgba8();
    assert_eq!(decoded.dimensions(), (1920, 2592));
    assert_eq!(decoded.get_pixel(500, 192).0, GREEN);

    assert!(matches!(
        target.export_page(1),
        Err(ManuscriptError::PageMissing(2))
    ));
}

#[test]
fn bad_colours_keep_the_previous_one() {
    let mut engine = RenderEngine::default();
    let mut target = RasterTarget::default();
    let options = RenderOptions {
        paper_colour: "not-a-colour".to_string(),
        grid_colour: "#00f".to_string(),
        ..Default::default()
    };
    engine.render_into("", &options, &mut target);
    let surface = &target.surfaces()[0];
    // nothing valid was given for the paper, so it is painted black
    assert_eq!(surface.pixel(10, 10), Some([0, 0, 0, 0xff]));
    assert_eq!(surface.pixel(500, 192), Some([0, 0, 0xff, 0xff]));
}
