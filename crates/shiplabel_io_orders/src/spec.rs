//! Order row/group models and loader error types.

use std::path::PathBuf;

////////////////////////////////////////////////////////////////////////////////
// #region OrderModels

/// One line item of the export.
///
/// Every field except `order_id` is `None` when the source cell is empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecOrderRow {
    /// Order identifier, never empty.
    pub order_id: String,
    /// Receiver name.
    pub shipping_name: Option<String>,
    /// Receiver street.
    pub shipping_street: Option<String>,
    /// Receiver city.
    pub shipping_city: Option<String>,
    /// Receiver zip, raw text (may carry a `.0` float artifact).
    pub shipping_zip: Option<String>,
    /// Receiver province.
    pub shipping_province: Option<String>,
    /// Receiver country.
    pub shipping_country: Option<String>,
    /// Receiver phone, raw text (may carry a `.0` float artifact).
    pub shipping_phone: Option<String>,
    /// Line-item name.
    pub lineitem_name: Option<String>,
}

/// All rows sharing one order identifier, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecOrderGroup {
    /// Shared order identifier.
    pub order_id: String,
    /// Member rows; never empty.
    pub rows: Vec<SpecOrderRow>,
}

impl SpecOrderGroup {
    /// First row of the group, the source of all address fields.
    pub fn row_first(&self) -> Option<&SpecOrderRow> {
        self.rows.first()
    }

    /// Number of rows carrying a line-item name.
    pub fn count_items(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| row.lineitem_name.is_some())
            .count()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Structural failures that abort a whole load.
#[derive(Debug, thiserror::Error)]
pub enum LoadOrdersError {
    /// Input path does not resolve to a file.
    #[error("File '{}' not found.", .path.display())]
    InputNotFound {
        /// Requested input path.
        path: PathBuf,
    },
    /// One or more required columns are absent.
    #[error("Missing columns: {missing:?} (available columns: {present:?})")]
    MissingColumns {
        /// Required columns that were not found.
        missing: Vec<String>,
        /// Columns present in the input.
        present: Vec<String>,
    },
    /// The CSV reader rejected the file.
    #[error("Failed to parse '{}': {message}", .path.display())]
    ParseFailed {
        /// Input path.
        path: PathBuf,
        /// Reader error text.
        message: String,
    },
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
