//! Plain-text selection report.
//!
//! The layout is fixed so that reports stay comparable byte for byte:
//!
//! ```text
//! Material Navigator Report - 2024-05-01_14-03-59
//! ===============================================
//!
//! 1. Belag > Asphalt
//! 2. Treppe > Holz
//! ```

use chrono::NaiveDateTime;

use crate::domain::entities::{format_path, CategoryPath};

pub const REPORT_TITLE: &str = "Material Navigator Report";

/// `YYYY-MM-DD_HH-MM-SS`, safe to embed in file names.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

pub const NO_SELECTIONS: &str = "No selections.";

/// Format a point in time the way reports and report file names embed it.
pub fn format_timestamp(at: &NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Render the report body for the given paths.
pub fn render_report(paths: &[CategoryPath], timestamp: &str) -> String {
    let title = format!("{REPORT_TITLE} - {timestamp}");
    let underline = "=".repeat(title.trim().chars().count());

    let mut lines = vec![title, underline, String::new()];
    if paths.is_empty() {
        lines.push(NO_SELECTIONS.to_string());
    } else {
        lines.extend(
            paths
                .iter()
                .enumerate()
                .map(|(i, p)| format!("{}. {}", i + 1, format_path(p))),
        );
    }

    let mut content = lines.join("\n");
    content.push('\n');
    content
}

/// File name of a report written at `timestamp`.
pub fn report_file_name(prefix: &str, timestamp: &str) -> String {
    format!("{prefix}_{timestamp}.txt")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const TS: &str = "2024-05-01_14-03-59";

    fn p(names: &[&str]) -> CategoryPath {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn given_no_paths_when_rendering_then_no_selections_line() {
        let content = render_report(&[], TS);
        assert_eq!(
            content,
            "Material Navigator Report - 2024-05-01_14-03-59\n\
             ===============================================\n\
             \n\
             No selections.\n"
        );
    }

    #[test]
    fn given_two_paths_when_rendering_then_numbered_in_order() {
        let content = render_report(&[p(&["A", "B"]), p(&["C"])], TS);
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(&lines[3..], ["1. A > B", "2. C"]);
        assert!(!content.contains(NO_SELECTIONS));
        assert!(content.ends_with("2. C\n"));
        assert!(!content.ends_with("\n\n"));
    }

    #[test]
    fn given_title_when_rendering_then_underline_matches_title_length() {
        let content = render_report(&[], TS);
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines[0].len(), lines[1].len());
        assert!(lines[1].chars().all(|c| c == '='));
        assert_eq!(lines[2], "");
    }

    #[test]
    fn given_datetime_when_formatting_then_file_name_safe() {
        let at = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(14, 3, 59)
            .unwrap();
        assert_eq!(format_timestamp(&at), TS);
        assert_eq!(
            report_file_name("selection_report", TS),
            "selection_report_2024-05-01_14-03-59.txt"
        );
    }
}
