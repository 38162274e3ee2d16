//! # Batch Resize - Main Entry Point
//!
//! Questo è il punto di ingresso principale dell'applicazione.
//!
//! ## Responsabilità:
//! - Parsing degli argomenti della command line con `clap`
//! - Inizializzazione del sistema di logging con `tracing`
//! - Costruzione della configurazione (file JSON opzionale + override da CLI)
//! - Avvio del batch resizer e report dell'errore finale
//!
//! ## Flusso di esecuzione:
//! 1. Parsa gli argomenti CLI (directory, limiti, destinazione, zip, etc.)
//! 2. Configura il logging (INFO o DEBUG a seconda del flag verbose, `RUST_LOG` vince)
//! 3. Crea un oggetto Config con tutti i parametri
//! 4. Istanzia BatchResizer e avvia il run
//!
//! ## Esempio di utilizzo:
//! ```bash
//! batch-resize resize ./photos --max-width 1024 --max-height 768 --zip
//! ```

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use batch_resize::json_output::JsonMessage;
use batch_resize::{BatchResizer, Config, ResizeAlgorithm};

#[derive(Parser)]
#[command(name = "batch-resize")]
#[command(version)]
#[command(about = "Resize every JPEG/PNG in a directory to fit within a bounding box")]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resize images in the specified directory
    Resize(ResizeArgs),
}

#[derive(Args)]
struct ResizeArgs {
    /// Path to the images directory
    directory: PathBuf,

    /// New max width of the images [default: 600]
    #[arg(long, alias = "maxWidth", value_parser = clap::value_parser!(u32).range(1..))]
    max_width: Option<u32>,

    /// New max height of the images [default: 800]
    #[arg(long, alias = "maxHeight", value_parser = clap::value_parser!(u32).range(1..))]
    max_height: Option<u32>,

    /// Directory name for saving processed images [default: resized]
    #[arg(long, alias = "destinationDir")]
    destination_dir: Option<String>,

    /// Bundle processed images into a zip archive inside the destination directory
    #[arg(long, value_name = "ARCHIVE_NAME", num_args = 0..=1, default_missing_value = batch_resize::config::DEFAULT_ARCHIVE_NAME)]
    zip: Option<String>,

    /// Interpolation filter used when downscaling [default: lanczos3]
    #[arg(long, value_enum)]
    filter: Option<ResizeAlgorithm>,

    /// JSON config file providing defaults for the options above
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output progress and status as JSON lines on stdout
    #[arg(long)]
    json: bool,
}

impl ResizeArgs {
    /// Config file (if any) overridden by the options given on the command line
    fn to_config(&self) -> Result<Config> {
        let mut config = match self.config {
            Some(ref path) => {
                if !path.exists() {
                    warn!("Config file {} not found, using defaults", path.display());
                }
                Config::from_file(path)?
            }
            None => Config::default(),
        };

        if let Some(max_width) = self.max_width {
            config.max_width = max_width;
        }
        if let Some(max_height) = self.max_height {
            config.max_height = max_height;
        }
        if let Some(ref destination_dir) = self.destination_dir {
            config.destination_dir = destination_dir.clone();
        }
        if let Some(ref archive_name) = self.zip {
            config.archive = true;
            config.archive_name = archive_name.clone();
        }
        if let Some(filter) = self.filter {
            config.filter = filter;
        }
        config.json_output = self.json;

        Ok(config)
    }
}

fn init_logging(verbose: bool, json: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    // keep stdout clean for JSON lines
    if json {
        tracing::subscriber::set_global_default(builder.with_writer(std::io::stderr).finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Resize(args) => {
            init_logging(cli.verbose, args.json)?;

            let config = args.to_config()?;
            debug!("Configuration: {:?}", config);

            let json_output = config.json_output;
            let result = BatchResizer::new(&args.directory, config).and_then(|resizer| resizer.run());

            if let Err(ref e) = result {
                if json_output {
                    JsonMessage::error(e.to_string(), e.failing_file().map(str::to_string)).emit();
                }
            }

            result?;
        }
    }

    Ok(())
}
