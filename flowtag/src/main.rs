use clap::Parser;
use clap::error::ErrorKind;
use flowtag_core::cli::{self, Cli, USAGE};
use flowtag_core::logging::init_logging;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            eprintln!("{e}");
            eprintln!("{USAGE}");
            std::process::exit(1);
        }
    };

    init_logging(cli.log_format);

    if let Err(e) = cli::run(&cli) {
        eprintln!("flowtag error: {e:#}");
        std::process::exit(1);
    }
}
