//! Report service
//!
//! Renders selection reports and optionally persists them to the report directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::{format_timestamp, render_report, report_file_name, CategoryPath};
use crate::infrastructure::traits::{Clock, FileSystem};

/// A rendered report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedReport {
    /// Where the report was written, or the file name it would have.
    pub identifier: String,
    /// UTF-8 report text.
    pub content: Vec<u8>,
}

impl GeneratedReport {
    /// Report text; always valid UTF-8 since it is rendered from strings.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.content).into_owned()
    }
}

/// Service for rendering and writing selection reports.
pub struct ReportService {
    fs: Arc<dyn FileSystem>,
    clock: Arc<dyn Clock>,
    report_dir: PathBuf,
    prefix: String,
}

impl ReportService {
    pub fn new(
        fs: Arc<dyn FileSystem>,
        clock: Arc<dyn Clock>,
        report_dir: impl Into<PathBuf>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            fs,
            clock,
            report_dir: report_dir.into(),
            prefix: prefix.into(),
        }
    }

    pub fn report_dir(&self) -> &Path {
        &self.report_dir
    }

    /// Render a report without touching the filesystem.
    ///
    /// The identifier is the file name `write` would use.
    #[instrument(level = "debug", skip(self, paths), fields(paths = paths.len()))]
    pub fn render(&self, paths: &[CategoryPath]) -> GeneratedReport {
        let timestamp = format_timestamp(&self.clock.now());
        GeneratedReport {
            identifier: report_file_name(&self.prefix, &timestamp),
            content: render_report(paths, &timestamp).into_bytes(),
        }
    }

    /// Render a report and write it into the report directory.
    ///
    /// The file is named after the timestamp; if that name is taken a numeric
    /// suffix is added so earlier reports are kept.
    #[instrument(level = "debug", skip(self, paths), fields(paths = paths.len()))]
    pub fn write(&self, paths: &[CategoryPath]) -> ApplicationResult<GeneratedReport> {
        let timestamp = format_timestamp(&self.clock.now());
        let content = render_report(paths, &timestamp);
        let target = self.free_target(&report_file_name(&self.prefix, &timestamp));

        self.fs
            .ensure_parent(&target)
            .with_path_context("create report directory", &target)?;
        self.fs
            .write(&target, &content)
            .with_path_context("write report", &target)?;
        info!("report written: {}", target.display());

        Ok(GeneratedReport {
            identifier: target.display().to_string(),
            content: content.into_bytes(),
        })
    }

    fn free_target(&self, file_name: &str) -> PathBuf {
        let candidate = self.report_dir.join(file_name);
        if !self.fs.exists(&candidate) {
            return candidate;
        }
        let stem = file_name.trim_end_matches(".txt");
        let free = (1u32..)
            .map(|n| self.report_dir.join(format!("{stem}-{n}.txt")))
            .find(|p| !self.fs.exists(p))
            .unwrap_or(candidate);
        debug!("report name taken, using {}", free.display());
        free
    }
}
