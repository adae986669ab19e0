//! Geotag CLI - embed GPS coordinates and a location name into image EXIF.
//!
//! # Usage
//!
//! ```bash
//! # Tag one image with the default Costa del Sol location
//! geotag villa.jpg
//!
//! # Use a named location, write to a new file
//! geotag villa.jpg -k marbella -o villa-tagged.jpg
//!
//! # Explicit coordinates
//! geotag villa.png --latitude 36.51 --longitude -4.8826 -l "Marbella"
//!
//! # Every image in a folder
//! geotag ./photos --batch -k estepona
//!
//! # Read back what a file carries
//! geotag show villa.jpg
//! ```

use clap::{Parser, Subcommand};
use std::ffi::OsString;

mod cli;
mod logging;

/// Geotag - embed GPS geolocation into JPEG, PNG and WebP metadata.
#[derive(Parser, Debug)]
#[command(name = "geotag")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
#[command(subcommand_negates_reqs = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(flatten)]
    embed: cli::embed::EmbedArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available commands. Without one, geotag embeds into `<PATH>`.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the geolocation stored in an image
    Show(cli::show::ShowArgs),

    /// List the named locations
    Locations(cli::locations::LocationsArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

/// Rewrite the single-dash `-lat` / `-lon` spellings to their long forms so
/// clap does not read them as bundled short flags.
fn normalize_legacy_flags<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut passthrough = false;
    args.into_iter()
        .map(|arg| {
            if passthrough {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            match text {
                "--" => {
                    passthrough = true;
                    arg
                }
                "-lat" => OsString::from("--latitude"),
                "-lon" => OsString::from("--longitude"),
                _ => {
                    if let Some(value) = text.strip_prefix("-lat=") {
                        OsString::from(format!("--latitude={value}"))
                    } else if let Some(value) = text.strip_prefix("-lon=") {
                        OsString::from(format!("--longitude={value}"))
                    } else {
                        arg
                    }
                }
            }
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_from(normalize_legacy_flags(std::env::args_os()));

    // Logging isn't initialized yet, so use eprintln for config warnings.
    let config = match geotag_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `geotag config path`."
            );
            geotag_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Geotag v{}", geotag_core::VERSION);

    match cli.command {
        Some(Commands::Show(args)) => cli::show::execute(args, &config),
        Some(Commands::Locations(args)) => cli::locations::execute(args),
        Some(Commands::Config(args)) => cli::config::execute(args, &config),
        None => cli::embed::execute(cli.embed, &config),
    }
}
