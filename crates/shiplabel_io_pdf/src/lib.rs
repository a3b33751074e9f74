//! `shiplabel_io_pdf` v1:
//! Label-to-PDF conversion and merge stage.
//!
//! Modules:
//! - `conf`    : workspace/output names and backend defaults
//! - `spec`    : report model and error types
//! - `convert` : conversion backend traits and the LibreOffice backend
//! - `merge`   : page concatenation of PDF files
//! - `combine` : folder-level orchestration with guaranteed cleanup
//! - `util`    : label discovery helpers
pub mod combine;
pub mod conf;
pub mod convert;
pub mod merge;
pub mod spec;
pub mod util;

#[cfg(test)]
mod fixture;

pub use combine::combine_labels;
pub use conf::{C_COMBINED_FILE_NAME, C_SOFFICE_BIN_DEFAULT, C_WORKSPACE_DIR_NAME};
pub use convert::{ConversionBackend, ConversionSession, SofficeBackend, SofficeSession};
pub use merge::merge_pdf_files;
pub use spec::{CombineLabelsError, ConvertError, MergeError, ReportCombine};
pub use util::list_label_files;
