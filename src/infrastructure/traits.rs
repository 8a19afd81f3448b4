//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations, allowing services
//! to be tested with mock implementations.

use std::io;
use std::path::Path;

use chrono::{Local, NaiveDateTime};

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write string content to file.
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a file.
    fn is_file(&self, path: &Path) -> bool;

    /// Create directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Create parent directories if needed.
    fn ensure_parent(&self, path: &Path) -> io::Result<()>;
}

/// Item for FZF-style selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionItem {
    /// Display text shown in selector
    pub display: String,
    /// Actual value (category name or control action)
    pub value: String,
}

/// Interactive FZF-style selector abstraction.
pub trait Selector: Send + Sync {
    /// Present items to user and return selected one.
    /// Returns None if user cancels (Esc/Ctrl-C).
    fn select_one(
        &self,
        items: &[SelectionItem],
        prompt: &str,
    ) -> Result<Option<SelectionItem>, String>;
}

/// Source of the current local time, used to stamp reports.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        std::fs::write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn ensure_parent(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                self.create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}

/// Wall clock in the local time zone.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Real selector implementation using skim (FZF-like).
#[derive(Debug, Default)]
pub struct SkimSelector;

impl Selector for SkimSelector {
    fn select_one(
        &self,
        items: &[SelectionItem],
        prompt: &str,
    ) -> Result<Option<SelectionItem>, String> {
        use skim::prelude::*;
        use std::io::Cursor;

        if items.is_empty() {
            return Ok(None);
        }

        // Build input as newline-separated display strings
        let input = items
            .iter()
            .map(|i| i.display.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        // skim prints the prompt inline, keep a gap before the query
        let prompt = format!("{prompt} ");
        let options = SkimOptionsBuilder::default()
            .prompt(Some(prompt.as_str()))
            .height(Some("50%"))
            .multi(false)
            .build()
            .map_err(|e| format!("failed to build skim options: {e}"))?;

        let item_reader = SkimItemReader::default();
        let items_arc = item_reader.of_bufread(Cursor::new(input));

        match Skim::run_with(&options, Some(items_arc)) {
            Some(out) if out.is_abort => Ok(None),
            Some(out) => Ok(out.selected_items.first().and_then(|selected| {
                let display = selected.output().to_string();
                items.iter().find(|i| i.display == display).cloned()
            })),
            None => Ok(None),
        }
    }
}
