//! Label batch report model and mutable report builder.

use std::collections::BTreeMap;
use std::fmt;

use crate::spec::SpecOrderError;

/// Outcome of one `process_export` run.
#[derive(Debug, Default, Clone)]
pub struct ReportLabels {
    /// Number of order groups loaded from the export.
    pub cnt_orders: u64,
    /// Created label file names, in processing order.
    pub created: Vec<String>,
    /// Per-order failures; processing continued past each one.
    pub errors: Vec<SpecOrderError>,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl ReportLabels {
    /// Number of created labels.
    pub fn created_count(&self) -> usize {
        self.created.len()
    }

    /// Number of failed orders.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Number of collected warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Machine-readable counters.
    pub fn to_dict(&self) -> BTreeMap<String, u64> {
        let mut dict_counts = BTreeMap::new();
        dict_counts.insert("cnt_orders".to_string(), self.cnt_orders);
        dict_counts.insert("cnt_created".to_string(), self.created_count() as u64);
        dict_counts.insert("cnt_errors".to_string(), self.error_count() as u64);
        dict_counts.insert("cnt_warnings".to_string(), self.warning_count() as u64);
        dict_counts
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        let dict_counts = self.to_dict();
        format!(
            "{prefix} orders={} created={} errors={} warnings={}",
            dict_counts["cnt_orders"],
            dict_counts["cnt_created"],
            dict_counts["cnt_errors"],
            dict_counts["cnt_warnings"]
        )
    }
}

impl fmt::Display for ReportLabels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[LABELS]"))
    }
}

/// Mutable accumulator for label batch results.
#[derive(Debug, Default, Clone)]
pub struct ReportLabelsBuilder {
    /// See [`ReportLabels::cnt_orders`].
    pub cnt_orders: u64,
    /// See [`ReportLabels::created`].
    pub created: Vec<String>,
    /// See [`ReportLabels::errors`].
    pub errors: Vec<SpecOrderError>,
    /// See [`ReportLabels::warnings`].
    pub warnings: Vec<String>,
}

impl ReportLabelsBuilder {
    /// Record the number of loaded order groups.
    pub fn set_orders(&mut self, cnt_orders: usize) {
        self.cnt_orders = cnt_orders as u64;
    }

    /// Add one created label file name.
    pub fn add_created(&mut self, file_name: String) {
        self.created.push(file_name);
    }

    /// Add warning message.
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Add one order-scoped error.
    pub fn add_error(&mut self, order_id: String, exception: String) {
        self.errors.push(SpecOrderError {
            order_id,
            exception,
        });
    }

    /// Finalize builder into immutable report.
    pub fn build(self) -> ReportLabels {
        ReportLabels {
            cnt_orders: self.cnt_orders,
            created: self.created,
            errors: self.errors,
            warnings: self.warnings,
        }
    }
}
