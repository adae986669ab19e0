//! The `geotag locations` command: list the named-location table.

use clap::Args;
use geotag_core::{OutputWriter, NAMED_LOCATIONS};

use super::Format;

/// Arguments for the `locations` command.
#[derive(Args, Debug)]
pub struct LocationsArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,
}

pub fn execute(args: LocationsArgs) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut writer = OutputWriter::new(stdout.lock(), args.format.into(), true);
    writer.write_all(&NAMED_LOCATIONS)?;
    writer.flush()?;
    Ok(())
}
