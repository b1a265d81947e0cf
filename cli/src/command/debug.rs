use clap::Args;
use folio::Epub;
use folio::ebook::errors::EbookResult;
use folio::epub::{EpubSettings, TocFormat};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct DebugCommand {
    /// An EPUB file or directory containing the contents of an unzipped EPUB
    pub ebook_path: PathBuf,

    /// Tolerate malformed content instead of failing
    #[arg(long)]
    lenient: bool,

    /// Prefer the EPUB 2 NCX over the EPUB 3 navigation document
    #[arg(long)]
    ncx: bool,

    /// Display all metadata
    #[arg(long)]
    metadata: bool,

    /// Display every resource and the reading order
    #[arg(long)]
    content: bool,

    /// Display the location model
    #[arg(long)]
    locations: bool,

    /// Display the navigation trees
    #[arg(long)]
    nav: bool,
}

impl DebugCommand {
    pub fn debug(&self) -> EbookResult<()> {
        let settings = EpubSettings::builder()
            .strict(!self.lenient)
            .preferred_toc(if self.ncx {
                TocFormat::Ncx
            } else {
                TocFormat::Xhtml
            });

        let epub = Epub::open_with(&self.ebook_path, settings)?;
        self.show_debug(&epub);

        Ok(())
    }

    pub fn has_selected_components(&self) -> bool {
        self.metadata || self.content || self.locations || self.nav
    }

    pub fn show_debug(&self, epub: &Epub) {
        if !self.has_selected_components() {
            println!("{epub:#?}");
            return;
        }

        let debug_structs: &[(bool, &dyn std::fmt::Debug)] = &[
            (self.metadata, epub.metadata()),
            (self.content, epub.content()),
            (self.locations, epub.content().locations()),
            (self.nav, epub.navigation()),
        ];

        for (is_print, debug_struct) in debug_structs {
            if *is_print {
                println!("{debug_struct:#?}");
            }
        }
    }
}
