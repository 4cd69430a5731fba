use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use manuscript_gen::{
    catalog,
    layout::LayoutConstants,
    pagesize::{self, PageSize},
    Document, Font, FontBook, GridPattern, Info, ManuscriptError, RasterTarget, RenderEngine,
    RenderOptions, TextSize, DEFAULT_FONT_FAMILY,
};
use std::io::Read;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// One PDF with a page per sheet, for printing
    Pdf,
    /// One PNG image per sheet
    Png,
}

/// Lay text out on Chinese manuscript paper (稿纸)
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Text file to lay out; reads stdin when missing or `-`
    input: Option<PathBuf>,

    /// Output file for PDF, output directory for PNG
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = Format::Pdf)]
    format: Format,

    /// Only export this page (1-based, PNG only)
    #[arg(long)]
    page: Option<NonZeroUsize>,

    /// TrueType / OpenType font to draw characters with; the first one is the
    /// fallback for unknown families
    #[arg(long = "font-file")]
    font_files: Vec<PathBuf>,

    /// Font family to draw characters with
    #[arg(long, default_value = DEFAULT_FONT_FAMILY)]
    font_family: String,

    /// Character size: small, medium, large (小, 中, 大)
    #[arg(long, default_value_t = TextSize::Medium)]
    size: TextSize,

    /// Cell pattern: plain, tian, mi (口, 田, 米)
    #[arg(long, default_value_t = GridPattern::Plain)]
    pattern: GridPattern,

    #[arg(long, default_value = "#000")]
    text_colour: String,

    #[arg(long, default_value = "#fff")]
    paper_colour: String,

    #[arg(long, default_value = "#3C3")]
    grid_colour: String,

    #[arg(long, default_value = "20")]
    rows: NonZeroUsize,

    #[arg(long, default_value = "20")]
    cols: NonZeroUsize,

    /// Paper to print PDF pages on: a3, a4, a5, b5, letter, legal
    #[arg(long, default_value = "a4", value_parser = pagesize::paper_size)]
    paper: PageSize,

    /// Print the catalogue of known Chinese font families and exit
    #[arg(long)]
    list_fonts: bool,
}

impl Cli {
    /// Reject combinations clap can't express on its own
    fn validate(&self) -> Result<(), clap::Error> {
        if self.page.is_some() && self.format == Format::Pdf {
            return Err(Cli::command().error(
                ErrorKind::ArgumentConflict,
                "--page only applies to --format png; a PDF always holds every page",
            ));
        }
        Ok(())
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(err) = cli.validate() {
        err.exit();
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), ManuscriptError> {
    if cli.list_fonts {
        for (family, name) in catalog::FONT_CATALOG {
            println!("{family}\t{name}");
        }
        return Ok(());
    }

    let text = read_input(cli.input.as_deref())?;

    let fonts = load_fonts(&cli.font_files)?;
    if !fonts.contains(&cli.font_family) {
        log::warn!(
            "no face for `{}`{}, using the first font file",
            cli.font_family,
            catalog::display_name(&cli.font_family)
                .map(|name| format!(" ({name})"))
                .unwrap_or_default()
        );
    }

    let options = RenderOptions {
        font_family: cli.font_family,
        text_size: cli.size,
        text_colour: cli.text_colour,
        paper_colour: cli.paper_colour,
        grid_colour: cli.grid_colour,
        grid_pattern: cli.pattern,
    };
    let mut engine = RenderEngine::new(LayoutConstants::default().with_grid(cli.rows, cli.cols));

    match cli.format {
        Format::Pdf => {
            let mut doc = Document::new(fonts);
            doc.set_paper(cli.paper);
            let pages = engine.render_into(&text, &options, &mut doc);
            let first_line = engine.lines(&text).first().map(|l| l.to_string()).unwrap_or_default();
            doc.set_info(Info::for_manuscript(
                &first_line,
                engine.layout().rows(),
                engine.layout().cols(),
                pages.len(),
            ));

            let path = cli.output.unwrap_or_else(|| PathBuf::from("manuscript.pdf"));
            let file = std::fs::File::create(&path)?;
            doc.write(std::io::BufWriter::new(file))?;
            log::info!("saved {}", path.display());
        }
        Format::Png => {
            let mut target = RasterTarget::new(fonts);
            engine.render_into(&text, &options, &mut target);

            let dir = cli.output.unwrap_or_else(|| PathBuf::from("."));
            std::fs::create_dir_all(&dir)?;
            let indices: Vec<usize> = match cli.page {
                Some(page) => vec![page.get() - 1],
                None => (0..engine.num_pages()).collect(),
            };
            for index in indices {
                let (name, png) = target.export_page(index)?;
                let path = dir.join(name);
                std::fs::write(&path, png)?;
                log::info!("saved {}", path.display());
            }
        }
    }

    Ok(())
}

/// Every page carries a footer, so even empty text needs a face to draw with
fn load_fonts(paths: &[PathBuf]) -> Result<FontBook, ManuscriptError> {
    let mut fonts = FontBook::new();
    for path in paths {
        let font = Font::load_file(path)?;
        log::info!(
            "loaded `{}` from {}",
            font.name().unwrap_or_default(),
            path.display()
        );
        fonts.add(font);
    }
    if fonts.is_empty() {
        return Err(ManuscriptError::NoFont);
    }
    Ok(fonts)
}

fn read_input(path: Option<&Path>) -> Result<String, ManuscriptError> {
    match path {
        Some(path) if path != Path::new("-") => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}
