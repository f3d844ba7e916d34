mod commands;
mod logging;
mod starter;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use zomekit_core::Format;

/// zomekit - host the starter zome from the command line
#[derive(Parser, Debug)]
#[command(name = "zomekit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Zome configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Wire format, overriding the configuration
    #[arg(long, global = true, value_enum)]
    format: Option<WireFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the zome's export table as JSON
    Manifest,

    /// Run genesis, then invoke a function with JSON arguments
    ///
    /// Every run starts from an empty in-memory host, so an entry committed
    /// by one run (`create_note`) cannot be fetched by a later one
    /// (`get_note`).
    Invoke {
        /// Name of the exported function
        function: String,

        /// One JSON document per parameter
        args: Vec<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum WireFormat {
    Canonical,
    Json,
}

impl From<WireFormat> for Format {
    fn from(format: WireFormat) -> Self {
        match format {
            WireFormat::Canonical => Format::CANONICAL,
            WireFormat::Json => Format::JSON,
        }
    }
}

fn main() {
    logging::init();
    let cli = Cli::parse();

    let result = commands::load_config(cli.config.as_deref(), cli.format.map(Format::from))
        .and_then(|config| match cli.command {
            Command::Manifest => commands::manifest(config),
            Command::Invoke { function, args } => commands::invoke(config, &function, &args),
        });

    match result {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
