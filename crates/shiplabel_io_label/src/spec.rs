//! Label models, batch options and error types.

use std::path::PathBuf;
use std::time::Duration;

use shiplabel_io_orders::LoadOrdersError;

use crate::conf::{
    N_FONT_PT_RECEIVER_BODY, N_FONT_PT_RECEIVER_HEADER, N_FONT_PT_SENDER_BODY,
    N_FONT_PT_SENDER_HEADER, N_FONT_PT_TITLE, N_ITEMS_DISPLAY_MAX, N_PAGE_MARGIN_TWIPS,
    TUP_SENDER_LINES,
};

////////////////////////////////////////////////////////////////////////////////
// #region LabelModels

/// Receiver block fields after defaulting and float-suffix cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecReceiverAddress {
    /// Receiver name.
    pub name: String,
    /// Street line.
    pub street: String,
    /// City.
    pub city: String,
    /// Zip code.
    pub zip: String,
    /// Province / state.
    pub province: String,
    /// Country.
    pub country: String,
    /// Phone number.
    pub phone: String,
}

impl SpecReceiverAddress {
    /// Printed receiver lines, in label order.
    pub fn to_lines(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.street.clone(),
            format!("{}, {}", self.city, self.zip),
            format!("{},{}", self.province, self.country),
            format!("Phone:{}", self.phone),
        ]
    }
}

/// One distinct line item and its occurrence count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecItemCount {
    /// Line-item name.
    pub name: String,
    /// Number of rows carrying this name.
    pub quantity: usize,
}

/// Rendered content of one shipping label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecLabelDocument {
    /// Order identifier as read from the export.
    pub order_id: String,
    /// Title line.
    pub title: String,
    /// Fixed sender lines.
    pub sender_lines: Vec<String>,
    /// Receiver block.
    pub receiver: SpecReceiverAddress,
    /// Total items across all distinct names, including truncated ones.
    pub total_items: usize,
    /// Displayed item rows, first-seen order, capped.
    pub items: Vec<SpecItemCount>,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Options

/// Label text and typography.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecLabelLayout {
    /// Title printed at the top.
    pub title: String,
    /// Sender block lines.
    pub sender_lines: Vec<String>,
    /// Maximum distinct item rows.
    pub n_items_max: usize,
    /// Page margin for all sides, in twips.
    pub page_margin_twips: i32,
    /// Title font size (pt).
    pub font_pt_title: usize,
    /// `TO:` header font size (pt).
    pub font_pt_receiver_header: usize,
    /// Receiver body font size (pt).
    pub font_pt_receiver_body: usize,
    /// `FROM:` header font size (pt).
    pub font_pt_sender_header: usize,
    /// Sender body font size (pt).
    pub font_pt_sender_body: usize,
}

impl Default for SpecLabelLayout {
    fn default() -> Self {
        Self {
            title: TUP_SENDER_LINES[0].to_string(),
            sender_lines: TUP_SENDER_LINES.iter().map(|c| c.to_string()).collect(),
            n_items_max: N_ITEMS_DISPLAY_MAX,
            page_margin_twips: N_PAGE_MARGIN_TWIPS,
            font_pt_title: N_FONT_PT_TITLE,
            font_pt_receiver_header: N_FONT_PT_RECEIVER_HEADER,
            font_pt_receiver_body: N_FONT_PT_RECEIVER_BODY,
            font_pt_sender_header: N_FONT_PT_SENDER_HEADER,
            font_pt_sender_body: N_FONT_PT_SENDER_BODY,
        }
    }
}

/// Options for [`crate::batch::process_export`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecExportOptions {
    /// Label layout shared by all orders.
    pub layout: SpecLabelLayout,
}

/// Polling policy for [`crate::batch::await_label_files`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecReadinessPolicy {
    /// Give up after this long.
    pub timeout: Duration,
    /// Delay between polls.
    pub interval: Duration,
}

impl Default for SpecReadinessPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            interval: Duration::from_millis(100),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ErrorsAndReportItems

/// One per-order failure with order id + error text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecOrderError {
    /// Offending order identifier.
    pub order_id: String,
    /// User-facing error text.
    pub exception: String,
}

/// Failure building or saving a single label document.
#[derive(Debug, thiserror::Error)]
pub enum LabelWriteError {
    /// Document assembly or packaging failed.
    #[error("Failed to build label document {}: {message}", .path.display())]
    Build {
        /// Target path.
        path: PathBuf,
        /// Builder error text.
        message: String,
    },
    /// File could not be created.
    #[error("Failed to write label document {}: {source}", .path.display())]
    Io {
        /// Target path.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
}

/// "Top-level call failed" errors for [`crate::batch::process_export`].
#[derive(Debug, thiserror::Error)]
pub enum ProcessExportError {
    /// Loading the export failed (missing file/columns, parse error).
    #[error(transparent)]
    Load(#[from] LoadOrdersError),
    /// Output directory could not be created.
    #[error("Failed to initialize output folder {}: {source}", .path.display())]
    OutputInitFailed {
        /// Output folder.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
}

/// Expected label files did not all appear in time.
#[derive(Debug, thiserror::Error)]
#[error("{} label file(s) not ready after {timeout:?}: {missing:?}", .missing.len())]
pub struct LabelsNotReadyError {
    /// Paths still absent at timeout.
    pub missing: Vec<PathBuf>,
    /// Timeout that elapsed.
    pub timeout: Duration,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
