//! Combine-stage constants.

/// Temporary folder created inside the label folder for intermediate PDFs.
pub const C_WORKSPACE_DIR_NAME: &str = "temp_pdfs_for_conversion";
/// File name of the merged output.
pub const C_COMBINED_FILE_NAME: &str = "combined_orders.pdf";
/// Extension of label documents picked up for conversion (lowercase, no dot).
pub const C_LABEL_EXT: &str = "docx";
/// LibreOffice executable looked up on `PATH` when none is configured.
pub const C_SOFFICE_BIN_DEFAULT: &str = "soffice";
/// LibreOffice export filter for PDF.
pub const C_SOFFICE_PDF_FILTER: &str = "pdf:writer_pdf_Export";
/// PDF version written for merged output.
pub const C_PDF_VERSION: &str = "1.5";
