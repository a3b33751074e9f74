//! Pure text helpers shared by the renderer and writer.

use crate::conf::{C_LABEL_FILE_EXT, C_LABEL_FILE_PREFIX};

/// Replace path separators so an order id is safe as a file-name fragment.
pub fn sanitize_order_id(order_id: &str) -> String {
    order_id.replace(['/', '\\'], "_")
}

/// File name of the label for `order_id`.
pub fn derive_label_file_name(order_id: &str) -> String {
    format!(
        "{C_LABEL_FILE_PREFIX}{}.{C_LABEL_FILE_EXT}",
        sanitize_order_id(order_id)
    )
}

/// Drop a trailing `.0` left by float-typed zip/phone columns.
pub fn strip_float_suffix(text: &str) -> String {
    text.strip_suffix(".0").unwrap_or(text).to_string()
}

#[cfg(test)]
mod tests {
    use super::{derive_label_file_name, sanitize_order_id, strip_float_suffix};

    #[test]
    fn sanitize_order_id_replaces_both_slashes() {
        assert_eq!(sanitize_order_id("#10/01\\b"), "#10_01_b");
        let c_name = derive_label_file_name("a/b\\c");
        assert_eq!(c_name, "shipping_label_a_b_c.docx");
        assert!(!c_name.contains('/') && !c_name.contains('\\'));
    }

    #[test]
    fn strip_float_suffix_only_trims_trailing_artifact() {
        assert_eq!(strip_float_suffix("560037.0"), "560037");
        assert_eq!(strip_float_suffix("560037"), "560037");
        assert_eq!(strip_float_suffix("12.05"), "12.05");
        assert_eq!(strip_float_suffix("N/A"), "N/A");
    }
}
