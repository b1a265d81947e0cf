use clap::Parser;
use folio_cli::Cli;
use folio_cli::command::Commands;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    match cli.commands {
        Commands::Debug(debug) => debug.debug()?,
        Commands::Paginate(paginate) => paginate.paginate()?,
    }

    Ok(())
}
