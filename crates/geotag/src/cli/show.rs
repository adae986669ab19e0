//! The `geotag show` command: print the geotag currently stored in a file.

use clap::Args;
use geotag_core::{Config, GeoEmbedder, OutputWriter};
use std::path::PathBuf;

use super::Format;

/// Arguments for the `show` command.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Image file to inspect
    pub file: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,
}

pub fn execute(args: ShowArgs, config: &Config) -> anyhow::Result<()> {
    let embedder = GeoEmbedder::new(config);
    let tag = embedder.inspect(&args.file)?;

    match tag {
        Some(tag) => {
            let stdout = std::io::stdout();
            let mut writer = OutputWriter::new(stdout.lock(), args.format.into(), true);
            writer.write(&tag)?;
            writer.flush()?;
        }
        None if args.format == Format::Text => {
            println!("{}: no GPS metadata", args.file.display());
        }
        None => println!("null"),
    }

    Ok(())
}
