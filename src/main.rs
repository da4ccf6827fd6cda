use clap::{Parser, Subcommand};
use eyre::Result;

use kilink_logging::config::Config;
use kilink_logging::logging::{setup_logging, Logger};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Also log to the console
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Emit one sample record at each level
    Emit,
    /// Panic on purpose to exercise the crash hook
    Crash,
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let logger = Logger::new("kilink.cli");
    setup_logging(&config, &logger, cli.verbose)?;

    match cli.command {
        Some(Commands::Crash) => {
            panic!("crash requested from the command line");
        }
        Some(Commands::Emit) | None => {
            logger.debug("sample debug record");
            logger.info("sample info record");
            logger.warn("sample warn record");
            logger.error("sample error record");
            println!(
                "wrote sample records under {}",
                config.log_directory.display()
            );
        }
    }

    Ok(())
}
