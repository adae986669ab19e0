//! Directory processing: embed into every supported image in one folder.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::BatchConfig;
use crate::embed::{EmbedRequest, GeoEmbedder};
use crate::error::{EmbedError, EmbedResult};
use crate::locations::LocationRequest;
use crate::types::{BatchReport, FileOutcome};

/// Candidate files found in a directory.
#[derive(Debug, Clone, Default)]
pub struct Discovered {
    /// Supported files, sorted by path
    pub files: Vec<PathBuf>,
    /// Entries ignored (subdirectories, unsupported extensions)
    pub skipped: usize,
}

/// Runs the embedder over the top level of a directory.
pub struct BatchDriver {
    embedder: GeoEmbedder,
    config: BatchConfig,
}

impl BatchDriver {
    pub fn new(embedder: GeoEmbedder, config: BatchConfig) -> Self {
        Self { embedder, config }
    }

    /// List the supported files directly inside `dir`. Not recursive.
    pub fn discover(&self, dir: &Path) -> EmbedResult<Discovered> {
        if !dir.is_dir() {
            return Err(EmbedError::Directory {
                path: dir.to_path_buf(),
                message: "not a directory".to_string(),
            });
        }

        let mut found = Discovered::default();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    return Err(EmbedError::Directory {
                        path: dir.to_path_buf(),
                        message: e.to_string(),
                    })
                }
                Err(e) => {
                    tracing::debug!("Skipping unreadable entry: {e}");
                    found.skipped += 1;
                    continue;
                }
            };

            let path = entry.path();
            if path.is_file() && self.is_supported(path) {
                found.files.push(path.to_path_buf());
            } else {
                found.skipped += 1;
            }
        }

        // Sort by path for deterministic ordering
        found.files.sort();
        Ok(found)
    }

    /// Embed into every supported file in `dir`, overwriting each in place.
    ///
    /// `on_item` sees each outcome as soon as the file is done. Per-file
    /// failures are recorded in the report; only a directory that cannot be
    /// listed is an error.
    pub fn run<F>(
        &self,
        dir: &Path,
        location: &LocationRequest,
        on_item: F,
    ) -> EmbedResult<BatchReport>
    where
        F: FnMut(&FileOutcome),
    {
        let found = self.discover(dir)?;
        Ok(self.process(dir, found, location, on_item))
    }

    /// Embed into already discovered files, one at a time.
    pub fn process<F>(
        &self,
        dir: &Path,
        found: Discovered,
        location: &LocationRequest,
        mut on_item: F,
    ) -> BatchReport
    where
        F: FnMut(&FileOutcome),
    {
        tracing::debug!(
            "Found {} files in {:?} ({} skipped)",
            found.files.len(),
            dir,
            found.skipped
        );

        let mut report = BatchReport {
            directory: dir.to_path_buf(),
            outcomes: Vec::with_capacity(found.files.len()),
            skipped: found.skipped,
        };

        for path in found.files {
            let request = EmbedRequest {
                input: path.clone(),
                output: None,
                location: location.clone(),
            };
            let outcome = match self.embedder.embed(&request) {
                Ok(embedded) => FileOutcome::Embedded(embedded),
                Err(e) => {
                    tracing::error!("Failed to process {:?}: {}", path, e);
                    FileOutcome::Failed {
                        file_name: file_name(&path),
                        path,
                        reason: e.to_string(),
                    }
                }
            };
            on_item(&outcome);
            report.outcomes.push(outcome);
        }

        report
    }

    /// Check if a file name ends in `.<format>` for a configured format.
    /// A bare dot-name such as `.jpg` counts.
    fn is_supported(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            return false;
        };
        let name = name.to_lowercase();
        self.config
            .supported_formats
            .iter()
            .any(|fmt| name.ends_with(&format!(".{}", fmt.to_lowercase())))
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::metadata::MetadataBlock;
    use image::{ImageFormat, RgbImage};

    fn driver() -> BatchDriver {
        let config = Config::default();
        BatchDriver::new(GeoEmbedder::new(&config), config.batch)
    }

    fn write_image(dir: &Path, name: &str, format: ImageFormat) {
        RgbImage::from_pixel(8, 8, image::Rgb([200, 100, 50]))
            .save_with_format(dir.join(name), format)
            .unwrap();
    }

    #[test]
    fn test_is_supported() {
        let driver = driver();
        assert!(driver.is_supported(Path::new("test.jpg")));
        assert!(driver.is_supported(Path::new("test.JPG")));
        assert!(driver.is_supported(Path::new("test.jpeg")));
        assert!(driver.is_supported(Path::new("test.png")));
        assert!(driver.is_supported(Path::new("test.WebP")));
        assert!(!driver.is_supported(Path::new("test.gif")));
        assert!(!driver.is_supported(Path::new("test.txt")));
        assert!(!driver.is_supported(Path::new("README")));
        assert!(!driver.is_supported(Path::new("photojpg")));
        assert!(driver.is_supported(Path::new(".jpg")));
        assert!(driver.is_supported(Path::new("/photos/.PNG")));
    }

    #[test]
    fn test_dot_named_image_is_discovered_and_embedded() {
        let dir = tempfile::tempdir().unwrap();
        write_image(dir.path(), ".jpg", ImageFormat::Jpeg);
        write_image(dir.path(), "a.png", ImageFormat::Png);

        let found = driver().discover(dir.path()).unwrap();
        let names: Vec<String> = found.files.iter().map(|p| file_name(p)).collect();
        assert_eq!(names, vec![".jpg", "a.png"]);
        assert_eq!(found.skipped, 0);

        let report = driver()
            .run(dir.path(), &LocationRequest::default(), |_| {})
            .unwrap();
        assert_eq!(report.succeeded(), 2);
        let bytes = std::fs::read(dir.path().join(".jpg")).unwrap();
        assert_eq!(MetadataBlock::from_container(&bytes).unwrap().gps.len(), 6);
    }

    #[test]
    fn test_discover_is_flat_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        write_image(dir.path(), "c.png", ImageFormat::Png);
        write_image(dir.path(), "a.jpg", ImageFormat::Jpeg);
        write_image(dir.path(), "b.webp", ImageFormat::WebP);
        std::fs::write(dir.path().join("notes.txt"), "hello").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        write_image(&dir.path().join("nested"), "deep.jpg", ImageFormat::Jpeg);

        let found = driver().discover(dir.path()).unwrap();
        let names: Vec<String> = found.files.iter().map(|p| file_name(p)).collect();
        assert_eq!(names, vec!["a.jpg", "b.webp", "c.png"]);
        assert_eq!(found.skipped, 2);
    }

    #[test]
    fn test_run_embeds_every_supported_file() {
        let dir = tempfile::tempdir().unwrap();
        write_image(dir.path(), "one.jpg", ImageFormat::Jpeg);
        write_image(dir.path(), "two.PNG", ImageFormat::Png);
        write_image(dir.path(), "three.webp", ImageFormat::WebP);
        std::fs::write(dir.path().join("skip.gif"), b"GIF89a").unwrap();
        std::fs::write(dir.path().join("skip.txt"), b"text").unwrap();

        let mut seen = Vec::new();
        let report = driver()
            .run(dir.path(), &LocationRequest::default(), |outcome| {
                seen.push(outcome.is_success())
            })
            .unwrap();

        assert_eq!(report.succeeded(), 3);
        assert_eq!(report.failed(), 0);
        assert_eq!(report.skipped, 2);
        assert_eq!(seen, vec![true, true, true]);

        for name in ["one.jpg", "two.PNG", "three.webp"] {
            let bytes = std::fs::read(dir.path().join(name)).unwrap();
            let block = MetadataBlock::from_container(&bytes).unwrap();
            assert_eq!(block.gps.len(), 6);
        }
        let untouched = std::fs::read(dir.path().join("skip.gif")).unwrap();
        assert_eq!(untouched, b"GIF89a");
    }

    #[test]
    fn test_corrupt_file_does_not_stop_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        write_image(dir.path(), "a.jpg", ImageFormat::Jpeg);
        std::fs::write(dir.path().join("b.jpg"), b"not really a jpeg").unwrap();
        write_image(dir.path(), "c.png", ImageFormat::Png);

        let report = driver()
            .run(dir.path(), &LocationRequest::default(), |_| {})
            .unwrap();

        assert_eq!(report.outcomes.len(), 3);
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);
        match report.failures().next().unwrap() {
            FileOutcome::Failed {
                file_name, reason, ..
            } => {
                assert_eq!(file_name, "b.jpg");
                assert!(reason.contains("Decode error"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
        assert!(report.outcomes[2].is_success());
    }

    #[test]
    fn test_uses_location_key() {
        let dir = tempfile::tempdir().unwrap();
        write_image(dir.path(), "a.jpg", ImageFormat::Jpeg);
        let location = LocationRequest {
            key: Some("fuengirola".to_string()),
            ..Default::default()
        };

        let report = driver().run(dir.path(), &location, |_| {}).unwrap();
        match &report.outcomes[0] {
            FileOutcome::Embedded(embedded) => {
                assert_eq!(embedded.location_name, "Fuengirola, Costa del Sol, Spain");
            }
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let report = driver()
            .run(dir.path(), &LocationRequest::default(), |_| {})
            .unwrap();
        assert!(report.outcomes.is_empty());
        assert_eq!(report.succeeded(), 0);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let err = driver()
            .run(
                Path::new("/nonexistent/photos"),
                &LocationRequest::default(),
                |_| {},
            )
            .unwrap_err();
        assert!(matches!(err, EmbedError::Directory { .. }));
    }

    #[test]
    fn test_custom_format_list() {
        let config = BatchConfig {
            supported_formats: vec!["png".to_string()],
        };
        let driver = BatchDriver::new(GeoEmbedder::new(&Config::default()), config);
        let dir = tempfile::tempdir().unwrap();
        write_image(dir.path(), "a.jpg", ImageFormat::Jpeg);
        write_image(dir.path(), "b.png", ImageFormat::Png);

        let found = driver.discover(dir.path()).unwrap();
        assert_eq!(found.files.len(), 1);
        assert_eq!(found.skipped, 1);
    }
}
