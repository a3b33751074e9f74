//! `shiplabel_io_label` v1:
//! Shipping-label renderer and batch driver.
//!
//! Modules:
//! - `conf`   : sender block, layout constants and default presets
//! - `spec`   : label models, options and errors
//! - `render` : pure label derivation from an order group
//! - `writer` : `.docx` writer
//! - `report` : batch report model and builder
//! - `batch`  : `process_export` driver and readiness check
//! - `util`   : pure text helpers
pub mod batch;
pub mod conf;
pub mod render;
pub mod report;
pub mod spec;
pub mod util;
pub mod writer;

pub use batch::{await_label_files, process_export};
pub use conf::{
    C_LABEL_FILE_EXT, C_LABEL_FILE_PREFIX, N_ITEMS_DISPLAY_MAX, TUP_SENDER_LINES,
    derive_default_label_layout,
};
pub use render::{derive_item_tally, derive_receiver_address, render_label};
pub use report::{ReportLabels, ReportLabelsBuilder};
pub use spec::{
    LabelWriteError, LabelsNotReadyError, ProcessExportError, SpecExportOptions, SpecItemCount,
    SpecLabelDocument, SpecLabelLayout, SpecOrderError, SpecReadinessPolicy, SpecReceiverAddress,
};
pub use util::{derive_label_file_name, sanitize_order_id, strip_float_suffix};
pub use writer::write_label_docx;
