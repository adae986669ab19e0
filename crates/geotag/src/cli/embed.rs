//! The default command: embed a location into one image or a directory.

use clap::Args;
use console::style;
use geotag_core::output::OutputFormat;
use geotag_core::{
    BatchDriver, BatchReport, Config, EmbedRequest, GeoEmbedder, LocationRequest, OutputWriter,
};
use std::path::{Path, PathBuf};

use super::Format;

/// Arguments for embedding.
#[derive(Args, Debug, Default)]
pub struct EmbedArgs {
    /// Image file, or a directory with --batch
    #[arg(required = true)]
    pub path: Option<PathBuf>,

    /// Output file (defaults to overwriting the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Latitude in decimal degrees (legacy spelling: -lat)
    #[arg(long, allow_negative_numbers = true)]
    pub latitude: Option<f64>,

    /// Longitude in decimal degrees (legacy spelling: -lon)
    #[arg(long, allow_negative_numbers = true)]
    pub longitude: Option<f64>,

    /// Location name written to ImageDescription
    #[arg(short, long)]
    pub location: Option<String>,

    /// Named location key (marbella, estepona, malaga, ...)
    #[arg(short = 'k', long)]
    pub location_key: Option<String>,

    /// Process every supported image in the directory
    #[arg(short, long)]
    pub batch: bool,

    /// Report format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,
}

impl EmbedArgs {
    pub fn location_request(&self) -> LocationRequest {
        LocationRequest {
            key: self.location_key.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
            name: self.location.clone(),
        }
    }
}

/// Execute the embed command.
pub fn execute(args: EmbedArgs, config: &Config) -> anyhow::Result<()> {
    let Some(path) = args.path.clone() else {
        anyhow::bail!("No input path given");
    };
    let embedder = GeoEmbedder::new(config);

    if args.batch {
        run_batch(&args, &path, embedder, config)
    } else {
        run_single(&args, path, &embedder)
    }
}

/// One file; any error ends the run with a non-zero exit.
fn run_single(args: &EmbedArgs, input: PathBuf, embedder: &GeoEmbedder) -> anyhow::Result<()> {
    let report = embedder.embed(&EmbedRequest {
        input,
        output: args.output.clone(),
        location: args.location_request(),
    })?;

    let stdout = std::io::stdout();
    let mut writer = OutputWriter::new(stdout.lock(), args.format.into(), true);
    writer.write(&report)?;
    writer.flush()?;
    Ok(())
}

/// Every supported file in a directory; per-file errors are reported and
/// the run continues.
fn run_batch(
    args: &EmbedArgs,
    dir: &Path,
    embedder: GeoEmbedder,
    config: &Config,
) -> anyhow::Result<()> {
    if args.output.is_some() {
        tracing::warn!("--output is ignored in batch mode; files are overwritten in place");
    }

    let driver = BatchDriver::new(embedder, config.batch.clone());
    let found = driver.discover(dir)?;
    if found.files.is_empty() {
        tracing::warn!("No supported images found in {:?}", dir);
    }

    let start_time = std::time::Instant::now();
    let progress = create_progress_bar(found.files.len() as u64);
    let format: OutputFormat = args.format.into();
    let stdout = std::io::stdout();
    let mut writer = OutputWriter::new(stdout.lock(), format, true);
    let mut write_error = None;

    let report = driver.process(dir, found, &args.location_request(), |outcome| {
        // Per-item lines stream for text and JSONL; JSON waits for the full report.
        if format != OutputFormat::Json && write_error.is_none() {
            if let Err(e) = progress.suspend(|| writer.write(outcome)) {
                write_error = Some(e);
            }
        }
        progress.inc(1);
    });
    progress.finish_and_clear();

    if let Some(e) = write_error {
        return Err(e.into());
    }

    match format {
        OutputFormat::Text => {
            writer.write(&report)?;
        }
        OutputFormat::Json => {
            writer.write(&report)?;
            print_summary(&report, start_time.elapsed());
        }
        OutputFormat::JsonLines => print_summary(&report, start_time.elapsed()),
    }
    writer.flush()?;

    Ok(())
}

/// Create a progress bar for batch processing.
fn create_progress_bar(total: u64) -> indicatif::ProgressBar {
    use indicatif::{ProgressBar, ProgressStyle};

    let pb = ProgressBar::new(total);
    let style = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {wide_msg}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("##-");
    pb.set_style(style);
    pb
}

/// Print a styled summary on stderr.
fn print_summary(report: &BatchReport, elapsed: std::time::Duration) {
    eprintln!();
    eprintln!(
        "  {} Embedded:  {:>6}",
        style("✓").green(),
        report.succeeded()
    );
    if report.failed() > 0 {
        eprintln!("  {} Failed:    {:>6}", style("✗").red(), report.failed());
    }
    if report.skipped > 0 {
        eprintln!("  {} Skipped:   {:>6}", style("·").dim(), report.skipped);
    }
    eprintln!("    Duration: {:>7.1}s", elapsed.as_secs_f64());
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};

    fn write_image(dir: &Path, name: &str, format: ImageFormat) -> PathBuf {
        let path = dir.join(name);
        RgbImage::from_pixel(6, 6, image::Rgb([10, 20, 30]))
            .save_with_format(&path, format)
            .unwrap();
        path
    }

    #[test]
    fn test_location_request_from_args() {
        let args = EmbedArgs {
            latitude: Some(-33.9),
            location: Some("Cape Town".to_string()),
            ..Default::default()
        };
        let request = args.location_request();
        assert_eq!(request.latitude, Some(-33.9));
        assert_eq!(request.longitude, None);
        assert_eq!(request.name.as_deref(), Some("Cape Town"));
        assert!(request.key.is_none());
    }

    #[test]
    fn test_single_file_error_is_returned() {
        let args = EmbedArgs {
            path: Some(PathBuf::from("/nonexistent/photo.jpg")),
            ..Default::default()
        };
        assert!(execute(args, &Config::default()).is_err());
    }

    #[test]
    fn test_single_file_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_image(dir.path(), "in.png", ImageFormat::Png);
        let output = dir.path().join("out.png");
        let args = EmbedArgs {
            path: Some(input),
            output: Some(output.clone()),
            location_key: Some("malaga".to_string()),
            format: Format::Json,
            ..Default::default()
        };

        execute(args, &Config::default()).unwrap();
        let tag = GeoEmbedder::new(&Config::default())
            .inspect(&output)
            .unwrap()
            .unwrap();
        assert_eq!(
            tag.description.as_deref(),
            Some("Málaga, Costa del Sol, Spain")
        );
    }

    #[test]
    fn test_batch_survives_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        write_image(dir.path(), "a.jpg", ImageFormat::Jpeg);
        std::fs::write(dir.path().join("b.png"), b"garbage").unwrap();
        let args = EmbedArgs {
            path: Some(dir.path().to_path_buf()),
            batch: true,
            format: Format::Jsonl,
            ..Default::default()
        };

        execute(args, &Config::default()).unwrap();
    }

    #[test]
    fn test_batch_on_missing_directory_fails() {
        let args = EmbedArgs {
            path: Some(PathBuf::from("/nonexistent/photos")),
            batch: true,
            ..Default::default()
        };
        assert!(execute(args, &Config::default()).is_err());
    }
}
