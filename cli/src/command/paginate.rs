use clap::Args;
use folio::Epub;
use folio::ebook::location::Location;
use folio::epub::EpubSettings;
use folio::paginator::{LayoutConfig, Margins, Orientation, RenditionLayout, SpreadMode};
use std::error::Error;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct PaginateCommand {
    /// An EPUB file or directory containing the contents of an unzipped EPUB
    pub ebook_path: PathBuf,

    /// Tolerate malformed content instead of failing
    #[arg(long)]
    lenient: bool,

    /// The width of a single page in layout units
    #[arg(long, default_value_t = 1000.0)]
    width: f64,

    /// The space between the two pages of a spread
    #[arg(long, default_value_t = 0.0)]
    gutter: f64,

    /// One value, or four in `top right bottom left` order (e.g., "10 20 10 20")
    #[arg(long)]
    margins: Option<Margins>,

    /// none, landscape or both; taken from the package by default
    #[arg(long)]
    spread: Option<SpreadMode>,

    /// portrait or landscape
    #[arg(long, default_value = "portrait")]
    orientation: Orientation,

    /// reflowable or pre-paginated; taken from the package by default
    #[arg(long)]
    rendition: Option<RenditionLayout>,

    /// Print the text of the screen at this index
    #[arg(long, conflicts_with = "resource")]
    screen: Option<usize>,

    /// Print the text of the screen showing this resource id
    #[arg(long)]
    resource: Option<String>,

    /// The offset within `--resource`
    #[arg(long, default_value_t = 0, requires = "resource")]
    offset: usize,
}

impl PaginateCommand {
    pub fn paginate(&self) -> Result<(), Box<dyn Error>> {
        let settings = EpubSettings::builder().strict(!self.lenient);
        let epub = Epub::open_with(&self.ebook_path, settings)?;
        let mut paginator = epub.paginator_with(self.layout(&epub)?)?;

        let screen = match (self.screen, &self.resource) {
            (Some(index), _) => paginator.goto_screen(index)?,
            (None, Some(resource)) => {
                paginator.goto_location(&Location::new(resource.as_str(), self.offset))?
            }
            (None, None) => {
                self.show_screens(&epub, paginator.screens());
                return Ok(());
            }
        };

        println!("Screen #{}: {} to {}", screen.index(), screen.begin(), screen.end());
        for segment in epub.content().segments(screen) {
            let range = segment.range();
            println!("--- {} [{}..{}]", segment.unit().id(), range.start, range.end);
            println!("{}", segment.text());
        }
        Ok(())
    }

    fn layout(&self, epub: &Epub) -> Result<LayoutConfig, Box<dyn Error>> {
        let declared = LayoutConfig::from_metadata(epub.metadata());
        let layout = LayoutConfig::builder()
            .width(self.width)
            .gutter(self.gutter)
            .margins(self.margins.unwrap_or_default())
            .spread(self.spread.unwrap_or(declared.spread()))
            .orientation(self.orientation)
            .rendition(self.rendition.unwrap_or(declared.rendition()))
            .build()?;
        Ok(layout)
    }

    fn show_screens(&self, epub: &Epub, screens: &[folio::paginator::Screen]) {
        let locations = epub.content().locations();

        for screen in screens {
            let progression = locations.progression(screen.begin()).unwrap_or_default();
            println!(
                "#{:<4} {:>5.1}%  {} to {}",
                screen.index(),
                progression * 100.0,
                screen.begin(),
                screen.end(),
            );
        }
    }
}
