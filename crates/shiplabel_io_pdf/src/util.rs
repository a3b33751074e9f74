//! Label discovery helpers.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::conf::C_LABEL_EXT;

/// List label documents directly inside `dir_labels`, sorted by file name.
///
/// Matching is on the `.docx` extension, case-insensitive. Subdirectories
/// are not descended.
pub fn list_label_files(dir_labels: &Path) -> Result<Vec<PathBuf>, io::Error> {
    let mut l_files = Vec::new();
    for entry in fs::read_dir(dir_labels)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path_file = entry.path();
        let if_is_label = path_file
            .extension()
            .and_then(|v| v.to_str())
            .is_some_and(|c_ext| c_ext.eq_ignore_ascii_case(C_LABEL_EXT));
        if if_is_label {
            l_files.push(path_file);
        }
    }
    l_files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(l_files)
}

/// Intermediate PDF path for `path_file_doc` inside `dir_out`.
pub(crate) fn derive_pdf_path(path_file_doc: &Path, dir_out: &Path) -> PathBuf {
    let c_stem = path_file_doc
        .file_stem()
        .map(|v| v.to_string_lossy().to_string())
        .unwrap_or_default();
    dir_out.join(format!("{c_stem}.pdf"))
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{derive_pdf_path, list_label_files};

    #[test]
    fn list_label_files_sorts_by_name_and_filters_extension() {
        let tmp = tempfile::tempdir().expect("tempdir");
        for c_name in [
            "shipping_label_B.docx",
            "shipping_label_A.DOCX",
            "shipping_label_10.docx",
            "notes.txt",
            "combined_orders.pdf",
        ] {
            std::fs::write(tmp.path().join(c_name), b"x").expect("write");
        }
        std::fs::create_dir_all(tmp.path().join("nested.docx")).expect("mkdir");

        let l_names: Vec<String> = list_label_files(tmp.path())
            .expect("list")
            .iter()
            .filter_map(|p| p.file_name().map(|v| v.to_string_lossy().to_string()))
            .collect();
        assert_eq!(
            l_names,
            vec![
                "shipping_label_10.docx".to_string(),
                "shipping_label_A.DOCX".to_string(),
                "shipping_label_B.docx".to_string(),
            ]
        );
    }

    #[test]
    fn derive_pdf_path_swaps_extension() {
        let path_pdf = derive_pdf_path(Path::new("/x/shipping_label_A.docx"), Path::new("/tmp/w"));
        assert_eq!(path_pdf, Path::new("/tmp/w/shipping_label_A.pdf"));
    }
}
