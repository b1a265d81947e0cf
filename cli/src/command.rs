use clap::Subcommand;

mod debug;
mod paginate;

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the debugged contents of folio::Epub.
    Debug(debug::DebugCommand),
    /// Paginate an EPUB and print its screens.
    Paginate(paginate::PaginateCommand),
}
