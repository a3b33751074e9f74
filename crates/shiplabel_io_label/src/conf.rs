//! Label constants and default layout preset.

use crate::spec::SpecLabelLayout;

/// Store name printed as the label title and first sender line.
pub const C_SENDER_NAME: &str = "Sillage Perfumes";
/// Fixed sender block, one entry per printed line.
pub const TUP_SENDER_LINES: [&str; 5] = [
    C_SENDER_NAME,
    "Outer Ring Road Doddanekundi",
    "Bengaluru, 560037",
    "Karnataka, India",
    "Phone: 8904620890",
];

/// Maximum distinct items listed in the item table.
pub const N_ITEMS_DISPLAY_MAX: usize = 5;

/// Label file name prefix.
pub const C_LABEL_FILE_PREFIX: &str = "shipping_label_";
/// Label file extension (without dot).
pub const C_LABEL_FILE_EXT: &str = "docx";

/// Page margin in twentieths of a point (0.2 inch).
pub const N_PAGE_MARGIN_TWIPS: i32 = 288;

/// Font sizes in points.
pub const N_FONT_PT_TITLE: usize = 26;
/// Receiver `TO:` header.
pub const N_FONT_PT_RECEIVER_HEADER: usize = 24;
/// Receiver address body.
pub const N_FONT_PT_RECEIVER_BODY: usize = 22;
/// Sender `FROM:` header.
pub const N_FONT_PT_SENDER_HEADER: usize = 18;
/// Sender address body.
pub const N_FONT_PT_SENDER_BODY: usize = 16;

/// Build the default label layout.
pub fn derive_default_label_layout() -> SpecLabelLayout {
    SpecLabelLayout::default()
}
