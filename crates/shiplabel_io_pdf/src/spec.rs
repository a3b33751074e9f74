//! Combine-stage report model and error types.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

////////////////////////////////////////////////////////////////////////////////
// #region ReportModels

/// Outcome of one `combine_labels` run.
#[derive(Debug, Default, Clone)]
pub struct ReportCombine {
    /// Number of label documents converted to PDF.
    pub converted: u64,
    /// Number of pages in the merged output.
    pub pages: u64,
    /// Merged output path; `None` when there was nothing to combine.
    pub path_out: Option<PathBuf>,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl ReportCombine {
    /// Number of collected warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Machine-readable counters.
    pub fn to_dict(&self) -> BTreeMap<String, u64> {
        let mut dict_counts = BTreeMap::new();
        dict_counts.insert("cnt_converted".to_string(), self.converted);
        dict_counts.insert("cnt_pages".to_string(), self.pages);
        dict_counts.insert("cnt_warnings".to_string(), self.warning_count() as u64);
        dict_counts
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        let dict_counts = self.to_dict();
        let c_out = self
            .path_out
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "-".to_string());
        format!(
            "{prefix} converted={} pages={} warnings={} output={c_out}",
            dict_counts["cnt_converted"], dict_counts["cnt_pages"], dict_counts["cnt_warnings"]
        )
    }
}

impl fmt::Display for ReportCombine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[COMBINE]"))
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Failures of a single conversion backend or session.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// Office process could not be started or probed.
    #[error("Conversion backend `{bin}` is unavailable: {message}")]
    Unavailable {
        /// Executable that was tried.
        bin: String,
        /// Probe failure text.
        message: String,
    },
    /// Office process ran but reported failure.
    #[error("Failed to convert {}: {message}", .path.display())]
    Failed {
        /// Source document.
        path: PathBuf,
        /// Exit status and captured stderr.
        message: String,
    },
    /// Office process reported success but produced no file.
    #[error("Conversion of {} produced no output at {}", .path.display(), .path_expected.display())]
    OutputMissing {
        /// Source document.
        path: PathBuf,
        /// Where the PDF was expected.
        path_expected: PathBuf,
    },
}

/// Failures while concatenating PDF files.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// An input PDF could not be parsed.
    #[error("Failed to load PDF {}: {message}", .path.display())]
    Load {
        /// Input path.
        path: PathBuf,
        /// Parser error text.
        message: String,
    },
    /// No input contributed a page.
    #[error("No pages to merge")]
    NoPages,
    /// An input lacks the catalog or page tree needed to merge it.
    #[error("PDF structure incomplete: {message}")]
    MissingStructure {
        /// What was missing.
        message: String,
    },
    /// Writing the merged file failed.
    #[error("Failed to save merged PDF {}: {source}", .path.display())]
    Save {
        /// Output path.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
}

/// "Top-level call failed" errors for [`crate::combine::combine_labels`].
#[derive(Debug, thiserror::Error)]
pub enum CombineLabelsError {
    /// The temporary conversion folder could not be prepared.
    #[error("Failed to prepare conversion workspace {}: {source}", .path.display())]
    WorkspaceInitFailed {
        /// Workspace folder.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Label folder could not be listed.
    #[error("Failed to list label folder {}: {source}", .path.display())]
    ListFailed {
        /// Label folder.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Backend acquisition or a document conversion failed.
    #[error(transparent)]
    Convert(#[from] ConvertError),
    /// Merging the converted PDFs failed.
    #[error(transparent)]
    Merge(#[from] MergeError),
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::ReportCombine;

    #[test]
    fn report_combine_format_shows_output_or_dash() {
        let report_empty = ReportCombine::default();
        assert_eq!(
            report_empty.to_string(),
            "[COMBINE] converted=0 pages=0 warnings=0 output=-"
        );

        let report = ReportCombine {
            converted: 2,
            pages: 3,
            path_out: Some(PathBuf::from("/tmp/combined_orders.pdf")),
            warnings: vec!["skipped".to_string()],
        };
        assert_eq!(report.to_dict()["cnt_warnings"], 1);
        assert_eq!(
            report.format("[X]"),
            "[X] converted=2 pages=3 warnings=1 output=/tmp/combined_orders.pdf"
        );
    }
}
